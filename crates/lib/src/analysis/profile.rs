use super::{round1, round2};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of leading non-null values inspected for uniqueness and frequency
/// analysis. Bounds the cost of profiling pathologically wide categorical
/// columns.
pub const CATEGORICAL_SAMPLE_CAP: usize = 100;

/// How many of the most frequent categorical values are reported.
pub const TOP_VALUES_LIMIT: usize = 5;

/// Classification of a result column, derived from the first non-null value
/// observed in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    NestedObject,
    Array,
    Unknown,
}

impl ColumnKind {
    /// The serialized name of the kind, for prompt and log text.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::NestedObject => "nested_object",
            ColumnKind::Array => "array",
            ColumnKind::Unknown => "unknown",
        }
    }
}

/// Summary statistics for a numeric column.
///
/// `median` is the value at index `floor(n / 2)` of the ascending-sorted
/// values, not the interpolated midpoint for even counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub sum: f64,
}

/// One of the most frequent values of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Frequency statistics for a categorical column, computed over the capped
/// sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStats {
    pub unique_count: usize,
    pub most_common: String,
    pub top_values: Vec<TopValue>,
}

/// Per-column statistics. The extended stat blocks are flattened into the
/// serialized object and absent for columns of the other kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percentage: f64,
    #[serde(flatten)]
    pub numeric: Option<NumericStats>,
    #[serde(flatten)]
    pub categorical: Option<CategoricalStats>,
}

/// Aggregate per-column statistics over a row set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub row_count: usize,
    pub columns: BTreeMap<String, ColumnProfile>,
}

/// Profiles an ordered row set into per-column statistics.
///
/// Column discovery scans every row, not just the first: BigQuery omits
/// optional and nested fields from individual rows, so the union of keys is
/// the only reliable column set. Rows that are not JSON objects are skipped
/// for key collection and value extraction but still count toward
/// `row_count`. Malformed values degrade the affected column rather than
/// failing the profile.
pub fn profile(rows: &[Value]) -> Profile {
    let row_count = rows.len();

    let mut names: BTreeSet<&str> = BTreeSet::new();
    for row in rows {
        if let Some(object) = row.as_object() {
            names.extend(object.keys().map(String::as_str));
        }
    }

    let mut columns = BTreeMap::new();
    for name in names {
        let values: Vec<&Value> = rows
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|object| object.get(name))
            .filter(|value| !value.is_null())
            .collect();
        columns.insert(name.to_string(), profile_column(&values, row_count));
    }

    Profile { row_count, columns }
}

fn profile_column(values: &[&Value], row_count: usize) -> ColumnProfile {
    let non_null_count = values.len();
    let null_count = row_count - non_null_count;
    let null_percentage = if row_count > 0 {
        round1(null_count as f64 / row_count as f64 * 100.0)
    } else {
        0.0
    };

    let kind = match values.first() {
        Some(Value::Number(_)) | Some(Value::Bool(_)) => ColumnKind::Numeric,
        Some(Value::String(_)) => ColumnKind::Categorical,
        Some(Value::Object(_)) => ColumnKind::NestedObject,
        Some(Value::Array(_)) => ColumnKind::Array,
        _ => ColumnKind::Unknown,
    };

    let numeric = match kind {
        ColumnKind::Numeric => numeric_stats(values),
        _ => None,
    };
    let categorical = match kind {
        ColumnKind::Categorical => Some(categorical_stats(values)),
        _ => None,
    };

    ColumnProfile {
        kind,
        non_null_count,
        null_count,
        null_percentage,
        numeric,
        categorical,
    }
}

/// Aggregates over the values that coerce to a float; everything else is
/// silently dropped from the aggregates without failing the column. An empty
/// coerced set yields no stats block at all.
fn numeric_stats(values: &[&Value]) -> Option<NumericStats> {
    let mut coerced: Vec<f64> = values.iter().filter_map(|value| coerce_numeric(value)).collect();
    if coerced.is_empty() {
        return None;
    }

    let sum: f64 = coerced.iter().sum();
    let min = coerced.iter().copied().fold(f64::INFINITY, f64::min);
    let max = coerced.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = round2(sum / coerced.len() as f64);

    coerced.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = round2(coerced[coerced.len() / 2]);

    Some(NumericStats {
        min,
        max,
        mean,
        median,
        sum,
    })
}

fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        // Booleans participate in numeric aggregates as 0/1.
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn categorical_stats(values: &[&Value]) -> CategoricalStats {
    let sample = &values[..values.len().min(CATEGORICAL_SAMPLE_CAP)];

    // Frequency counting keyed by rendered value; the first-seen index makes
    // tie-breaking deterministic (first occurrence wins).
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, value) in sample.iter().enumerate() {
        let entry = counts.entry(render_value(value)).or_insert((0, index));
        entry.0 += 1;
    }
    let unique_count = counts.len();

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first_seen))| (value, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let most_common = ranked
        .first()
        .map(|(value, ..)| value.clone())
        .unwrap_or_default();
    let top_values = ranked
        .into_iter()
        .take(TOP_VALUES_LIMIT)
        .map(|(value, count, _)| TopValue { value, count })
        .collect();

    CategoricalStats {
        unique_count,
        most_common,
        top_values,
    }
}

/// Categorical values are keyed by their text; a stray non-string value in a
/// text column falls back to its JSON rendering rather than aborting the
/// column.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
