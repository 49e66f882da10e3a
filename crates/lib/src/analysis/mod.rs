//! # Result-Shape Analysis
//!
//! The deterministic core of the service: profiling a query result set into
//! per-column statistics, recommending a chart rendering for it, and deriving
//! quick natural-language insights. All three stages are pure functions over
//! in-memory rows, hold no state between calls, and never fail on malformed
//! input: query results coming back from an external engine are inherently
//! messy, and the profiler's job is best-effort insight extraction.

mod chart;
mod insights;
mod profile;

pub use chart::{suggest_chart, ChartConfig, ChartType};
pub use insights::summarize;
pub use profile::{
    profile, CategoricalStats, ColumnKind, ColumnProfile, NumericStats, Profile, TopValue,
    CATEGORICAL_SAMPLE_CAP, TOP_VALUES_LIMIT,
};

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
