pub mod api_key;

pub use api_key::StaticApiKey;

/// Gate for destructive operations. Handlers only see this trait, so the
/// static shared-secret check can later be swapped for a real credential
/// mechanism without touching route logic.
pub trait Authorizer: Send + Sync {
    /// `presented` is the key from the request, `None` when the client sent
    /// no key at all.
    fn is_authorized(&self, presented: Option<&str>) -> bool;
}
