//! Derive a compact metrics summary from a Lighthouse JSON report.

use serde_json::{json, Map, Value};

/// Category score keys in the summary, paired with their Lighthouse ids.
const CATEGORY_SCORES: [(&str, &str); 4] = [
    ("performance", "performanceScore"),
    ("accessibility", "accessibilityScore"),
    ("best-practices", "bestPracticesScore"),
    ("seo", "seoScore"),
];

/// The numeric audits surfaced individually in the summary.
const METRIC_AUDITS: [&str; 6] = [
    "first-contentful-paint",
    "largest-contentful-paint",
    "total-blocking-time",
    "cumulative-layout-shift",
    "speed-index",
    "interactive",
];

/// Reduce a full Lighthouse report to category scores and the headline
/// numeric audits. Fails softly: a report without an `audits` section maps
/// to `{"error": "Invalid Lighthouse results"}` rather than an error.
pub fn extract_metrics(report: &Value) -> Value {
    let Some(audits) = report.get("audits").and_then(Value::as_object) else {
        return json!({ "error": "Invalid Lighthouse results" });
    };

    let mut metrics = Map::new();

    for (category, key) in CATEGORY_SCORES {
        let score = report
            .get("categories")
            .and_then(|c| c.get(category))
            .and_then(|c| c.get("score"))
            .and_then(Value::as_f64);
        if let Some(score) = score {
            metrics.insert(key.to_string(), json!((score * 100.0).round() as i64));
        }
    }

    for name in METRIC_AUDITS {
        if let Some(audit) = audits.get(name) {
            metrics.insert(
                name.to_string(),
                json!({
                    "score": audit.get("score").cloned().unwrap_or(Value::Null),
                    "value": audit.get("numericValue").cloned().unwrap_or(Value::Null),
                    "displayValue": audit.get("displayValue").cloned().unwrap_or(Value::Null),
                }),
            );
        }
    }

    Value::Object(metrics)
}
