//! Startup configuration for the web client.
//!
//! The API base URL is resolved in this order:
//! 1. `<meta name="api-base-url" content="...">` in the host page
//! 2. `FITNESS_API_URL` at compile time
//! 3. [`DEFAULT_API_BASE_URL`]

pub const DEFAULT_API_BASE_URL: &str = "http://94.156.112.206:5100";

/// Local storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_storage_key: &'static str,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `orange_fitness=debug`.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: TOKEN_STORAGE_KEY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the host page and build environment.
    pub fn load() -> Self {
        let api_base_url = meta_content("api-base-url")
            .or_else(|| option_env!("FITNESS_API_URL").map(str::to_string));

        Self::from_sources(api_base_url.as_deref(), option_env!("FITNESS_LOG"))
    }

    fn from_sources(api_base_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_base_url.and_then(normalize_base_url) {
            config.api_base_url = url;
        }
        if let Some(filter) = log_filter.map(str::trim).filter(|f| !f.is_empty()) {
            config.log_filter = filter.to_string();
        }
        config
    }

    /// Join an API path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Trim whitespace and trailing slashes. Blank values are ignored.
fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??;
    element.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::from_sources(None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.token_storage_key, "authToken");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AppConfig::from_sources(Some(" https://api.example.com/ "), None);
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(
            config.endpoint("/api/Workout"),
            "https://api.example.com/api/Workout"
        );
    }

    #[test]
    fn test_blank_sources_fall_back() {
        let config = AppConfig::from_sources(Some("   "), Some(""));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_log_filter_override() {
        let config = AppConfig::from_sources(None, Some("orange_fitness=debug"));
        assert_eq!(config.log_filter, "orange_fitness=debug");
    }
}
