use std::env;

/// Runtime configuration, read from the environment (a `.env` file is loaded
/// first when present). Every value has a local-development default.
pub struct AppConfig {
    pub mongo_uri: String,
    pub database: String,
    pub api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            mongo_uri: env::var("CAFE_API_MONGO_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: env::var("CAFE_API_DATABASE").unwrap_or_else(|_| "cafes".to_string()),
            api_key: env::var("CAFE_API_KEY").unwrap_or_else(|_| "TopSecretAPIKey".to_string()),
        }
    }
}
