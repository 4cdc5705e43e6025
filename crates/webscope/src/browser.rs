//! Headless Chrome launch and per-action delegation.
//!
//! Every public function here is one engine-level call: the orchestration
//! (which page, when to launch) belongs to the caller.

use std::ffi::OsStr;
use std::path::PathBuf;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, Element, LaunchOptionsBuilder, Tab};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::types::{WebError, WebResult};

/// Browser launch configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Explicit Chrome/Chromium binary, when auto-detection is not wanted.
    pub chrome_path: Option<PathBuf>,
    /// Remote debugging port, for engines that attach to the instance.
    pub port: Option<u16>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            chrome_path: None,
            port: None,
        }
    }
}

fn launch_args(config: &BrowserConfig) -> Vec<String> {
    vec![
        format!("--window-size={},{}", config.width, config.height),
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
    ]
}

/// Launch a headless browser process.
pub fn launch(config: &BrowserConfig) -> WebResult<Browser> {
    let args = launch_args(config);
    let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

    let launch_options = LaunchOptionsBuilder::default()
        .headless(true)
        .args(os_args)
        .port(config.port)
        .path(config.chrome_path.clone())
        .build()
        .map_err(|e| WebError::Launch(format!("Failed to build launch options: {e}")))?;

    let browser = Browser::new(launch_options)
        .map_err(|e| WebError::Launch(format!("Failed to launch browser: {e}")))?;

    info!(
        "Launched headless browser ({}x{}{})",
        config.width,
        config.height,
        config
            .port
            .map(|p| format!(", debug port {p}"))
            .unwrap_or_default()
    );

    Ok(browser)
}

fn find_element<'a>(tab: &'a Tab, selector: &str) -> WebResult<Element<'a>> {
    tab.wait_for_element(selector)
        .map_err(|_| WebError::ElementNotFound(format!("no element matches selector '{selector}'")))
}

/// Navigate the page and wait until the load settles. Returns the page title.
pub fn navigate(tab: &Tab, url: &str) -> WebResult<String> {
    info!("Navigating to {url}");

    tab.navigate_to(url)
        .map_err(|e| WebError::Action(format!("Failed to navigate to {url}: {e}")))?;
    tab.wait_until_navigated()
        .map_err(|e| WebError::Action(format!("Navigation to {url} did not complete: {e}")))?;

    Ok(tab.get_title().unwrap_or_default())
}

/// Capture a PNG screenshot of the page, or of a single element when a
/// selector is given. The viewport is resized to `width`x`height` first.
pub fn screenshot(
    tab: &Tab,
    selector: Option<&str>,
    width: u32,
    height: u32,
) -> WebResult<Vec<u8>> {
    tab.set_bounds(Bounds::Normal {
        left: None,
        top: None,
        width: Some(f64::from(width)),
        height: Some(f64::from(height)),
    })
    .map_err(|e| WebError::Action(format!("Failed to set viewport to {width}x{height}: {e}")))?;

    let png = match selector {
        Some(sel) => find_element(tab, sel)?
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png)
            .map_err(|e| WebError::Action(format!("Failed to capture '{sel}': {e}")))?,
        None => tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| WebError::Action(format!("Failed to capture page: {e}")))?,
    };

    debug!("Captured screenshot: {} bytes", png.len());
    Ok(png)
}

/// Click the first element matching the selector.
pub fn click(tab: &Tab, selector: &str) -> WebResult<()> {
    find_element(tab, selector)?
        .click()
        .map_err(|e| WebError::Action(format!("Failed to click '{selector}': {e}")))?;
    Ok(())
}

/// Clear a field and type a value into it.
pub fn fill(tab: &Tab, selector: &str, value: &str) -> WebResult<()> {
    let element = find_element(tab, selector)?;
    let _ = element.call_js_fn(
        "function () { if ('value' in this) { this.value = ''; } }",
        vec![],
        false,
    );
    element
        .type_into(value)
        .map_err(|e| WebError::Action(format!("Failed to fill '{selector}': {e}")))?;
    Ok(())
}

/// Set the value of a select element and fire its change event.
pub fn select(tab: &Tab, selector: &str, value: &str) -> WebResult<()> {
    find_element(tab, selector)?
        .call_js_fn(
            "function (value) { this.value = value; this.dispatchEvent(new Event('change', { bubbles: true })); }",
            vec![serde_json::json!(value)],
            false,
        )
        .map_err(|e| WebError::Action(format!("Failed to select '{value}' in '{selector}': {e}")))?;
    Ok(())
}

/// Move the mouse over the first element matching the selector.
pub fn hover(tab: &Tab, selector: &str) -> WebResult<()> {
    find_element(tab, selector)?
        .move_mouse_over()
        .map_err(|e| WebError::Action(format!("Failed to hover '{selector}': {e}")))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct EvalPayload {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    logs: Vec<String>,
}

fn console_wrapper(script: &str) -> String {
    // The user script is embedded as a JSON string literal and run through
    // eval so arbitrary expressions and statements both work.
    let quoted = Value::String(script.to_string()).to_string();
    format!(
        r#"(() => {{
  const logs = [];
  const original = {{ log: console.log, info: console.info, warn: console.warn, error: console.error }};
  const record = (...args) => {{
    logs.push(args.map((a) => (typeof a === "object" ? JSON.stringify(a) : String(a))).join(" "));
  }};
  console.log = console.info = console.warn = console.error = record;
  try {{
    const value = eval({quoted});
    return JSON.stringify({{ value, logs }});
  }} finally {{
    console.log = original.log;
    console.info = original.info;
    console.warn = original.warn;
    console.error = original.error;
  }}
}})()"#
    )
}

/// Run a script in the page and collect whatever it wrote to the console.
/// Returns the script's value and the captured console lines.
pub fn evaluate(tab: &Tab, script: &str) -> WebResult<(Value, Vec<String>)> {
    debug!(
        "Evaluating script: {}...",
        &script[..script.len().min(50)]
    );

    let wrapped = console_wrapper(script);
    let result = tab
        .evaluate(&wrapped, false)
        .map_err(|e| WebError::Action(format!("Script evaluation failed: {e}")))?;

    let Some(Value::String(payload)) = result.value else {
        return Err(WebError::Action(
            "Script evaluation produced no result".to_string(),
        ));
    };

    let parsed: EvalPayload = serde_json::from_str(&payload)?;
    Ok((parsed.value, parsed.logs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_args_carry_fixed_flags() {
        let args = launch_args(&BrowserConfig::default());
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--disable-dev-shm-usage".to_string()));
        assert!(args.contains(&"--window-size=1280,720".to_string()));
    }

    #[test]
    fn console_wrapper_escapes_the_script() {
        let wrapped = console_wrapper(r#"console.log("hi"); 1 + 1"#);
        assert!(wrapped.contains(r#"eval("console.log(\"hi\"); 1 + 1")"#));
        assert!(wrapped.contains("JSON.stringify({ value, logs })"));
    }

    #[test]
    fn eval_payload_tolerates_missing_value() {
        // JSON.stringify drops the `value` key when the script evaluates to
        // undefined; the payload must still parse.
        let parsed: EvalPayload = serde_json::from_str(r#"{"logs":["a","b"]}"#).unwrap();
        assert_eq!(parsed.value, Value::Null);
        assert_eq!(parsed.logs, vec!["a", "b"]);
    }
}
