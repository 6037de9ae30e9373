use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub navigation_timeout_secs: u64,
    pub content_wait_secs: u64,
    /// Preferred `User-Agent`; adapters rotate browser agents when `None`.
    pub user_agent: Option<String>,
    pub max_concurrent_sessions: usize,
    pub scan_listing_limit: usize,
    pub classifieds_url: String,
    pub marketplace_url: String,
    pub marketplace_location: String,
    pub marketplace_cookie: Option<String>,
    pub retailer_a_url: String,
    pub retailer_b_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("navigation_timeout_secs", &self.navigation_timeout_secs)
            .field("content_wait_secs", &self.content_wait_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_sessions", &self.max_concurrent_sessions)
            .field("scan_listing_limit", &self.scan_listing_limit)
            .field("classifieds_url", &self.classifieds_url)
            .field("marketplace_url", &self.marketplace_url)
            .field("marketplace_location", &self.marketplace_location)
            .field(
                "marketplace_cookie",
                &self.marketplace_cookie.as_ref().map(|_| "[redacted]"),
            )
            .field("retailer_a_url", &self.retailer_a_url)
            .field("retailer_b_url", &self.retailer_b_url)
            .finish()
    }
}
