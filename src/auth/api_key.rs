use crate::auth::Authorizer;

/// Single static shared secret, compared for equality. A missing key never
/// authorizes.
pub struct StaticApiKey {
    secret: String,
}

impl StaticApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        StaticApiKey {
            secret: secret.into(),
        }
    }
}

impl Authorizer for StaticApiKey {
    fn is_authorized(&self, presented: Option<&str>) -> bool {
        presented == Some(self.secret.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_secret_passes() {
        let auth = StaticApiKey::new("TopSecretAPIKey");
        assert!(auth.is_authorized(Some("TopSecretAPIKey")));
        assert!(!auth.is_authorized(Some("topsecretapikey")));
        assert!(!auth.is_authorized(Some("")));
        assert!(!auth.is_authorized(None));
    }
}
