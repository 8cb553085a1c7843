use std::time::Duration;

/// Configuration for the browser session
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Outbound proxy, passed to Chrome as `--proxy-server`
    pub proxy_server: Option<String>,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Navigation timeout in seconds
    pub timeout_seconds: u64,

    /// Disable image loading for performance
    pub disable_images: bool,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            proxy_server: None,
            window_size: (1920, 1080),
            user_agent: None,
            timeout_seconds: 30,
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// How long Chrome may sit without CDP traffic before the session is torn down.
    /// Must outlast the longest readiness wait.
    pub fn idle_timeout(&self) -> Duration {
        self.timeout() * 4
    }

    /// Command-line switches passed to Chrome on launch
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = self.chrome_flags.clone();

        if let Some(proxy) = &self.proxy_server {
            args.push(format!("--proxy-server={}", proxy));
        }
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua));
        }
        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }

        args
    }
}
