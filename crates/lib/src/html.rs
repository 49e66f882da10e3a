//! # HTML Quality Gate
//!
//! Generated report pages come back from the model as free-form text. Before
//! a page is handed to the caller it is scored against a fixed checklist;
//! pages that score too low are regenerated and eventually replaced by the
//! deterministic fallback in [`crate::report`].

use serde::Serialize;

/// Script patterns that disqualify a generated page.
const DISALLOWED_PATTERNS: &[&str] = &[
    "document.location",
    "window.location",
    "eval(",
    "innerHTML",
];

/// Points deducted per detected issue.
const ISSUE_PENALTY: u32 = 20;

/// The outcome of scoring one generated HTML page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub score: u32,
}

/// Scores a generated HTML page: 100 minus 20 per detected issue.
pub fn validate_html(html: &str) -> HtmlValidation {
    let mut issues = Vec::new();

    if !html.trim_start().starts_with("<!DOCTYPE") {
        issues.push("missing DOCTYPE declaration".to_string());
    }

    if html.contains("Chart.js") && !html.contains("cdnjs.cloudflare.com") {
        issues.push("missing Chart.js CDN reference".to_string());
    }

    for pattern in DISALLOWED_PATTERNS {
        if html.contains(pattern) {
            issues.push(format!("disallowed pattern detected: {pattern}"));
        }
    }

    if html.contains("new Chart(") && !html.contains("ctx") {
        issues.push("missing chart context variable".to_string());
    }

    let score = 100u32.saturating_sub(issues.len() as u32 * ISSUE_PENALTY);
    HtmlValidation {
        is_valid: issues.is_empty(),
        issues,
        score,
    }
}

/// Strips a markdown code fence from a model response that should have been
/// bare HTML. Responses already starting with a document root pass through
/// untouched.
pub fn strip_html_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html") {
        return trimmed.to_string();
    }

    for fence in ["```html", "```"] {
        if let Some(start) = trimmed.find(fence) {
            let rest = &trimmed[start + fence.len()..];
            let body = match rest.find("```") {
                Some(end) => &rest[..end],
                None => rest,
            };
            return body.trim().to_string();
        }
    }

    trimmed.to_string()
}
