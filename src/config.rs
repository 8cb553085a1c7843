use crate::browser::BrowserConfig;
use crate::error::ScrapeError;
use crate::export::ExportFormat;
use crate::extract::DetailPages;
use crate::waiter::WaitPolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Addresses of the source system
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Listing page the school ids are discovered from
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Overview sub-page, `{id}` is replaced by the school id
    #[serde(default = "default_overview_url_template")]
    pub overview_url_template: String,

    /// Contact sub-page, `{id}` is replaced by the school id
    #[serde(default = "default_contact_url_template")]
    pub contact_url_template: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    /// Retries after the first attempt, for navigations and for each school
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Export destination; nothing is written when unset
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Hide the browser window
    #[serde(default = "default_false")]
    pub headless: bool,

    /// Outbound proxy address
    #[serde(default)]
    pub proxy_server: Option<String>,

    /// Deadline for a page to become readable, in seconds
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Delay between readiness checks, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Disable images in browser (faster loading)
    #[serde(default = "default_true")]
    pub disable_images: bool,
}

fn default_true() -> bool { true }
fn default_false() -> bool { false }
fn default_retries() -> u32 { 10 }
fn default_wait_timeout() -> u64 { 30 }
fn default_poll_interval() -> u64 { 100 }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_listing_url() -> String {
    "https://www.det.wa.edu.au/schoolsonline/home.do".to_string()
}
fn default_overview_url_template() -> String {
    "https://www.det.wa.edu.au/schoolsonline/overview.do?schoolID={id}&pageID=SO01".to_string()
}
fn default_contact_url_template() -> String {
    "https://www.det.wa.edu.au/schoolsonline/contact.do?schoolID={id}&pageID=CI01".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            overview_url_template: default_overview_url_template(),
            contact_url_template: default_contact_url_template(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            output: None,
            format: ExportFormat::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            proxy_server: None,
            wait_timeout_secs: default_wait_timeout(),
            poll_interval_ms: default_poll_interval(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: None,
            disable_images: true,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            match Self::from_file(path) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Load an explicitly requested configuration file
    pub fn from_file(path: &Path) -> Result<Self, ScrapeError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ScrapeError> {
        Ok(toml::from_str(content)?)
    }

    /// Sub-page addresses and wait policy for the extractor
    pub fn detail_pages(&self) -> DetailPages {
        DetailPages {
            overview_url_template: self.site.overview_url_template.clone(),
            contact_url_template: self.site.contact_url_template.clone(),
            retries: self.scrape.retries,
            wait: self.browser.wait_policy(),
        }
    }
}

impl BrowserSettings {
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            timeout: Duration::from_secs(self.wait_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Launch configuration for the browser session
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless,
            proxy_server: self.proxy_server.clone(),
            window_size: (self.window_width, self.window_height),
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.wait_timeout_secs,
            disable_images: self.disable_images,
            chrome_flags: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scrape.retries, 10);
        assert!(config.scrape.output.is_none());
        assert_eq!(config.scrape.format, ExportFormat::Csv);
        assert!(!config.browser.headless);
        assert!(config.site.overview_url_template.contains("{id}"));
        assert!(config.site.contact_url_template.contains("{id}"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.scrape.retries, 10);
        assert_eq!(config.browser.wait_timeout_secs, 30);
        assert_eq!(config.browser.poll_interval_ms, 100);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [scrape]
            retries = 3
            format = "tsv"

            [browser]
            headless = true
            proxy_server = "http://proxy:8080"
            wait_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.scrape.retries, 3);
        assert_eq!(config.scrape.format, ExportFormat::Tsv);
        assert!(config.browser.headless);
        assert_eq!(config.browser.wait_policy().timeout, Duration::from_secs(5));
        assert!(config.browser.disable_images);

        let browser = config.browser.browser_config();
        assert_eq!(browser.proxy_server.as_deref(), Some("http://proxy:8080"));
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml("[scrape]\nretries = \"many\"");
        assert!(matches!(result, Err(ScrapeError::Config(_))));
    }

    #[test]
    fn test_detail_pages() {
        let config = Config::default();
        let pages = config.detail_pages();
        assert_eq!(pages.retries, 10);
        assert_eq!(pages.wait.timeout, Duration::from_secs(30));
    }
}
