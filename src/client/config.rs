use std::env;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub store_path: String,
    pub log_level: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_base_url: env::var("SPLITPARTY_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            store_path: env::var("SPLITPARTY_STORE_PATH")
                .unwrap_or_else(|_| "data/splitparty_store.json".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
