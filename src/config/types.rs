use serde::Deserialize;

/// The gallery site crawled when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://35photo.pro";

/// Number of download workers when none is configured
pub const DEFAULT_WORKERS: usize = 8;

/// Main configuration structure for Photo-Ripple
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub download: DownloadConfig,
}

/// Remote site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the gallery site, without a trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SiteConfig {
    /// Base URL with any trailing slash removed
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Request identity and transport settings
///
/// The site only answers feed requests that look like they come from a
/// browser, so the header set built from this is sent with every request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0"
                .to_string(),
            accept_language: "en-GB,en;q=0.5".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Download pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Number of concurrent download workers
    pub workers: usize,

    /// Directory photos are written to
    #[serde(rename = "output-dir")]
    pub output_dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            output_dir: ".".to_string(),
        }
    }
}
