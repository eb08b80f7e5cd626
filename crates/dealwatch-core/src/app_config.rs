/// Browser identification sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36";

/// Origin that relative deal links are resolved against.
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.amazon.it";

/// Deals pages polled on every tick, in delivery order.
pub const DEFAULT_DEAL_PAGES: [&str; 4] = [
    "https://www.amazon.it/gp/goldbox",
    "https://www.amazon.it/gp/bestsellers",
    "https://www.amazon.it/deals?ref_=nav_cs_gb",
    "https://www.amazon.it/ref=nav_logo",
];

#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: Option<String>,
    pub log_level: String,
    pub default_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub site_origin: String,
    pub deal_pages: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "telegram_token",
                &self.telegram_token.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("default_interval_secs", &self.default_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("site_origin", &self.site_origin)
            .field("deal_pages", &self.deal_pages)
            .finish()
    }
}
