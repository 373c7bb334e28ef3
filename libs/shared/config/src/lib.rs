use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub search_backend_url: String,
    pub search_backend_api_key: String,
    pub jwt_secret: String,
    pub redis_url: Option<String>,
    pub reminder_interval_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            search_backend_url: env::var("SEARCH_BACKEND_URL")
                .unwrap_or_else(|_| {
                    warn!("SEARCH_BACKEND_URL not set, using empty value");
                    String::new()
                }),
            search_backend_api_key: env::var("SEARCH_BACKEND_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("SEARCH_BACKEND_API_KEY not set, using empty value");
                    String::new()
                }),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            redis_url: env::var("REDIS_URL").ok(),
            reminder_interval_hours: env::var("REMINDER_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.search_backend_url.is_empty() && !self.jwt_secret.is_empty()
    }

    pub fn is_notifications_configured(&self) -> bool {
        self.redis_url.is_some()
    }
}
