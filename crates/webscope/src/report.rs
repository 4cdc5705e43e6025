//! Report persistence under the configured output directory.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::types::{OutputFormat, WebResult};

fn report_file_name(format: OutputFormat) -> String {
    // ISO 8601 with colons swapped for dashes so the name is valid on
    // every filesystem.
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("lighthouse-{stamp}.{}", format.extension())
}

/// Write a report body into `dir`, creating the directory chain if needed.
/// Returns the path of the file written.
pub fn write_report(dir: &Path, format: OutputFormat, body: &str) -> WebResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(format));
    std::fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_timestamp_and_extension() {
        let name = report_file_name(OutputFormat::Html);
        assert!(name.starts_with("lighthouse-"));
        assert!(name.ends_with(".html"));
        assert!(!name.contains(':'));
    }

    #[test]
    fn write_report_produces_exactly_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports");

        let path = write_report(&nested, OutputFormat::Json, "{\"ok\":true}").unwrap();
        assert!(path.exists());

        let entries: Vec<_> = std::fs::read_dir(&nested).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"ok\":true}");
    }
}
