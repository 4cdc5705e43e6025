//! Browser process lifecycle, page handle table, and per-session state.

use std::collections::HashMap;
use std::sync::Arc;

use headless_chrome::{Browser, Tab};

use webscope::browser::{launch, BrowserConfig};

use crate::types::{McpError, McpResult};

/// Owns the persistent browser process and the page handle table shared by
/// all browser-automation tools. Audit runs use their own call-scoped
/// instance and never touch this one.
pub struct BrowserSessionManager {
    config: BrowserConfig,
    browser: Option<Browser>,
    pages: HashMap<String, Arc<Tab>>,
    // The current page id. Kept at zero: one implicit page per session.
    page_id: u32,
    console_logs: Vec<String>,
    screenshots: HashMap<String, String>,
}

impl BrowserSessionManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            browser: None,
            pages: HashMap::new(),
            page_id: 0,
            console_logs: Vec::new(),
            screenshots: HashMap::new(),
        }
    }

    /// Whether a browser process is currently live.
    pub fn is_running(&self) -> bool {
        self.browser.is_some()
    }

    /// Launch a fresh browser process, replacing any previous one.
    /// Failures closing the old process's tabs are logged, not propagated.
    pub fn open_browser(&mut self) -> McpResult<()> {
        if let Some(previous) = self.browser.take() {
            tracing::info!("Replacing existing browser process");
            close_tabs(&previous);
        }

        let browser = launch(&self.config).map_err(McpError::from)?;
        self.browser = Some(browser);
        self.pages.clear();
        self.page_id = 0;
        Ok(())
    }

    /// The current page handle, creating the browser and the page lazily.
    /// Returns the same handle across calls until `open_browser` runs again.
    pub fn current_page(&mut self) -> McpResult<Arc<Tab>> {
        if self.browser.is_none() {
            self.open_browser()?;
        }

        let key = format!("page_{}", self.page_id);
        if let Some(tab) = self.pages.get(&key) {
            return Ok(tab.clone());
        }

        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| McpError::BrowserError("Browser process is not running".to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| McpError::BrowserError(format!("Failed to open page: {e}")))?;

        tracing::debug!("Created page handle {key}");
        self.pages.insert(key, tab.clone());
        Ok(tab)
    }

    /// Shut the browser down. Safe to call when nothing is running.
    pub fn close(&mut self) {
        if let Some(browser) = self.browser.take() {
            tracing::info!("Closing browser process");
            close_tabs(&browser);
        }
        self.pages.clear();
        self.page_id = 0;
    }

    /// Append console lines captured by an evaluate call.
    pub fn push_console_logs<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.console_logs.extend(lines);
    }

    pub fn console_logs(&self) -> &[String] {
        &self.console_logs
    }

    /// Store a named screenshot (base64 PNG), replacing any previous one
    /// under the same name.
    pub fn store_screenshot(&mut self, name: String, data: String) {
        self.screenshots.insert(name, data);
    }

    pub fn screenshot(&self, name: &str) -> Option<&String> {
        self.screenshots.get(name)
    }

    pub fn screenshot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.screenshots.keys().cloned().collect();
        names.sort();
        names
    }
}

fn close_tabs(browser: &Browser) {
    let tabs = browser.get_tabs();
    let tabs = match tabs.lock() {
        Ok(guard) => guard.clone(),
        Err(_) => {
            tracing::warn!("Tab list lock poisoned while closing browser");
            return;
        }
    };
    for tab in tabs {
        if let Err(e) = tab.close(true) {
            tracing::warn!("Failed to close tab: {e}");
        }
    }
    // The process handle itself is reclaimed when the Browser drops.
}

impl Drop for BrowserSessionManager {
    fn drop(&mut self) {
        if self.browser.is_some() {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> BrowserSessionManager {
        BrowserSessionManager::new(BrowserConfig::default())
    }

    #[test]
    fn new_manager_has_no_browser() {
        let session = manager();
        assert!(!session.is_running());
        assert!(session.console_logs().is_empty());
        assert!(session.screenshot_names().is_empty());
    }

    #[test]
    fn close_without_browser_is_a_no_op() {
        let mut session = manager();
        session.close();
        assert!(!session.is_running());
    }

    #[test]
    fn console_logs_accumulate_in_order() {
        let mut session = manager();
        session.push_console_logs(vec!["first".to_string()]);
        session.push_console_logs(vec!["second".to_string(), "third".to_string()]);
        assert_eq!(session.console_logs(), ["first", "second", "third"]);
    }

    #[test]
    fn screenshots_replace_by_name() {
        let mut session = manager();
        session.store_screenshot("home".to_string(), "aaaa".to_string());
        session.store_screenshot("home".to_string(), "bbbb".to_string());
        session.store_screenshot("cart".to_string(), "cccc".to_string());

        assert_eq!(session.screenshot("home"), Some(&"bbbb".to_string()));
        assert_eq!(session.screenshot_names(), ["cart", "home"]);
    }
}
