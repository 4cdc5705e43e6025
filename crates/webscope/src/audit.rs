//! Audit runner — one call-scoped headless Chrome plus one Lighthouse run.

use std::net::TcpListener;
use std::process::{Command, Stdio};

use serde_json::Value;
use tracing::{debug, info};

use crate::browser::{launch, BrowserConfig};
use crate::report;
use crate::types::{AuditCategory, AuditOptions, AuditOutcome, OutputFormat, WebError, WebResult};

fn lighthouse_bin() -> String {
    std::env::var("WEBSCOPE_LIGHTHOUSE").unwrap_or_else(|_| "lighthouse".to_string())
}

fn pick_debug_port() -> WebResult<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

fn lighthouse_args(options: &AuditOptions, port: u16) -> Vec<String> {
    let categories: Vec<&str> = options.categories.iter().copied().map(AuditCategory::as_str).collect();
    vec![
        options.url.clone(),
        format!("--port={port}"),
        format!("--output={}", options.format.as_str()),
        "--output-path=stdout".to_string(),
        format!("--only-categories={}", categories.join(",")),
        "--quiet".to_string(),
    ]
}

fn invoke_lighthouse(options: &AuditOptions, port: u16) -> WebResult<String> {
    let args = lighthouse_args(options, port);
    debug!("Running {} {}", lighthouse_bin(), args.join(" "));

    let output = Command::new(lighthouse_bin())
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| WebError::Audit(format!("Failed to run lighthouse: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WebError::Audit(format!(
            "Lighthouse exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let body = String::from_utf8_lossy(&output.stdout).into_owned();
    if body.trim().is_empty() {
        return Err(WebError::Audit("Lighthouse produced no report".to_string()));
    }

    Ok(body)
}

/// Run one audit against a dedicated headless Chrome instance.
///
/// The instance exists only for this call; the audit engine attaches to it
/// over the debugging port. Dropping the handle kills the process, so the
/// instance is reclaimed on every path out of this function.
pub fn run_audit(options: &AuditOptions) -> WebResult<AuditOutcome> {
    let port = pick_debug_port()?;
    info!("Starting audit of {} on port {port}", options.url);

    let config = BrowserConfig {
        port: Some(port),
        ..BrowserConfig::default()
    };
    let browser = launch(&config)?;

    let result = invoke_lighthouse(options, port);
    drop(browser);
    let body = result?;

    let report = match options.format {
        OutputFormat::Json => Some(serde_json::from_str::<Value>(&body).map_err(|e| {
            WebError::Audit(format!("Lighthouse returned unparseable JSON: {e}"))
        })?),
        _ => None,
    };

    let file_path = match &options.output_path {
        Some(dir) => {
            let path = report::write_report(dir, options.format, &body)?;
            info!("Report written to {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(AuditOutcome {
        format: options.format,
        report,
        body,
        file_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_port_format_and_categories() {
        let mut options = AuditOptions::new("https://example.com");
        options.categories = vec![AuditCategory::Performance, AuditCategory::Seo];
        options.format = OutputFormat::Html;

        let args = lighthouse_args(&options, 9222);
        assert_eq!(args[0], "https://example.com");
        assert!(args.contains(&"--port=9222".to_string()));
        assert!(args.contains(&"--output=html".to_string()));
        assert!(args.contains(&"--output-path=stdout".to_string()));
        assert!(args.contains(&"--only-categories=performance,seo".to_string()));
    }

    #[test]
    fn debug_ports_are_ephemeral() {
        let port = pick_debug_port().unwrap();
        assert!(port > 0);
    }

    #[test]
    fn lighthouse_bin_honours_env_override() {
        std::env::set_var("WEBSCOPE_LIGHTHOUSE", "/opt/lighthouse/cli");
        assert_eq!(lighthouse_bin(), "/opt/lighthouse/cli");
        std::env::remove_var("WEBSCOPE_LIGHTHOUSE");
    }
}
