use super::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// Owns the Chrome process for a run
pub struct BrowserManager {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserManager {
    /// Launch a browser with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let args = config.launch_args();
        let launch_options = Self::build_launch_options(&config, &args)?;

        log::info!(
            "Launching browser (headless: {}, proxy: {})",
            config.headless,
            config.proxy_server.as_deref().unwrap_or("none")
        );

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        Ok(Self { browser, config })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [String],
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_size.0, config.window_size.1)))
            .idle_browser_timeout(config.idle_timeout())
            .args(args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Open the tab the run navigates with
    pub fn new_tab(&self) -> Result<Arc<Tab>, BrowserError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))?;

        tab.set_default_timeout(self.config.timeout());
        Ok(tab)
    }
}

impl Drop for BrowserManager {
    fn drop(&mut self) {
        // Chrome is killed when `Browser` drops
        log::debug!("Closing browser");
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),
}
