//! Webscope — core library gluing headless Chrome automation and Lighthouse audits.

pub mod audit;
pub mod browser;
pub mod metrics;
pub mod report;
pub mod types;

pub use audit::run_audit;
pub use browser::{launch, BrowserConfig};
pub use metrics::extract_metrics;
pub use report::write_report;
pub use types::*;
