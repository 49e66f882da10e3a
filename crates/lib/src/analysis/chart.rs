use serde::Serialize;
use serde_json::Value;

/// The chart renderings the advisor knows how to recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
}

/// A recommended chart rendering for a row set. `value_column` is set for
/// the single-series bar shape, `value_columns` for multi-series shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub label_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_columns: Option<Vec<String>>,
    pub title: String,
}

/// Proposes at most one chart configuration for a row set.
///
/// Only the first row is probed. That keeps the advisor cheap, at the cost
/// of occasionally missing a chartable result whose first row is atypical;
/// whenever the shape is ambiguous the advisor recommends nothing. Missing
/// and null cells probe as text in the label position and as numeric in
/// value positions.
pub fn suggest_chart(rows: &[Value], columns: &[String]) -> Option<ChartConfig> {
    if columns.len() < 2 {
        return None;
    }
    let first = rows.first()?.as_object()?;

    if columns.len() == 2 {
        let label = &columns[0];
        let value = &columns[1];
        if probes_text(first.get(label.as_str())) && probes_numeric(first.get(value.as_str())) {
            return Some(ChartConfig {
                chart_type: ChartType::Bar,
                label_column: label.clone(),
                value_column: Some(value.clone()),
                value_columns: None,
                title: format!("{label} by {value}"),
            });
        }
        return None;
    }

    // Three or more columns: the first is the label, the rest are series.
    let (label, value_columns) = columns.split_first()?;
    let all_numeric = value_columns
        .iter()
        .all(|column| probes_numeric(first.get(column.as_str())));
    if !all_numeric {
        return None;
    }

    let chart_type = if value_columns.len() > 1 {
        ChartType::Line
    } else {
        ChartType::Bar
    };
    Some(ChartConfig {
        chart_type,
        label_column: label.clone(),
        value_column: None,
        value_columns: Some(value_columns.to_vec()),
        title: format!("{label} comparison"),
    })
}

fn probes_text(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}

fn probes_numeric(value: Option<&Value>) -> bool {
    matches!(
        value,
        None | Some(Value::Null) | Some(Value::Number(_)) | Some(Value::Bool(_))
    )
}
