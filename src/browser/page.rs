use super::manager::BrowserError;
use crate::error::ScrapeError;
use crate::page::Page;
use async_trait::async_trait;
use headless_chrome::Tab;
use std::sync::Arc;

/// [`Page`] backed by a Chrome tab
pub struct ChromePage {
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }
}

#[async_trait]
impl Page for ChromePage {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        log::debug!("Navigating to: {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), ScrapeError> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|e| BrowserError::ElementNotFound(format!("{}: {}", selector, e)))?;

        element
            .click()
            .map_err(|e| BrowserError::NavigationError(format!("Click on {} failed: {}", selector, e)))?;

        Ok(())
    }

    async fn content(&self) -> Result<String, ScrapeError> {
        let html = self
            .tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))?;

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserConfig, BrowserManager};
    use crate::waiter::{wait_until, Readiness, WaitPolicy};

    fn headless_page() -> (BrowserManager, ChromePage) {
        let manager = BrowserManager::new(BrowserConfig {
            headless: true,
            ..Default::default()
        })
        .unwrap();
        let page = ChromePage::new(manager.new_tab().unwrap());
        (manager, page)
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn test_basic_navigation() {
        let (_manager, page) = headless_page();
        assert!(page.goto("https://example.com").await.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn test_html_extraction() {
        let (_manager, page) = headless_page();
        page.goto("https://example.com").await.unwrap();

        let html = wait_until(&page, &Readiness::present("h1"), &WaitPolicy::default())
            .await
            .unwrap();
        assert!(html.contains("Example"));
    }
}
