use crate::{errors::NlqError, providers::db::storage::Storage};
use async_trait::async_trait;
use chrono::DateTime;
use gcp_bigquery_client::{
    model::{
        query_request::QueryRequest, query_response::ResultSet,
        table_field_schema::TableFieldSchema, table_schema::TableSchema,
    },
    Client,
};
use serde_json::{Map, Value};
use std::fmt::{self, Debug};
use tracing::info;

/// A provider for executing generated SQL against Google BigQuery.
#[derive(Clone)]
pub struct BigQueryProvider {
    client: Client,
    project_id: String,
}

impl BigQueryProvider {
    /// Creates a new `BigQueryProvider` using application default credentials.
    pub async fn new(project_id: String) -> Result<Self, NlqError> {
        let client = Client::from_application_default_credentials()
            .await
            .map_err(|e| NlqError::StorageConnection(e.to_string()))?;
        Ok(Self { client, project_id })
    }
}

impl Debug for BigQueryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigQueryProvider")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Storage for BigQueryProvider {
    fn name(&self) -> &str {
        "BigQuery"
    }

    /// Executes a SQL query on BigQuery and returns normalized JSON rows.
    async fn execute_query(&self, sql: &str) -> Result<Vec<Value>, NlqError> {
        info!("--> Executing BigQuery SQL: {sql}");
        let response = self
            .client
            .job()
            .query(
                &self.project_id,
                QueryRequest {
                    query: sql.to_string(),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| NlqError::StorageQueryFailed(e.to_string()))?;

        let schema = response.schema.clone();
        let mut results = ResultSet::new_from_query_response(response);
        let column_names = results.column_names();

        let mut rows: Vec<Value> = Vec::new();
        while results.next_row() {
            let mut row_map = Map::new();
            for name in &column_names {
                let raw = results
                    .get_json_value_by_name(name)
                    .ok()
                    .flatten()
                    .unwrap_or(Value::Null);
                let value = normalize_cell(raw, field_for(schema.as_ref(), name));
                row_map.insert(name.clone(), value);
            }
            rows.push(Value::Object(row_map));
        }

        Ok(rows)
    }
}

fn field_for<'a>(schema: Option<&'a TableSchema>, name: &str) -> Option<&'a TableFieldSchema> {
    schema?
        .fields
        .as_ref()?
        .iter()
        .find(|field| field.name == name)
}

/// Converts one raw BigQuery cell into the row shape the profiler consumes.
///
/// The REST API returns every scalar as a string and wraps nested records
/// and repeated fields in `{"f": ...}` / `{"v": ...}` envelopes. Numeric and
/// boolean cells become JSON numbers and booleans, temporal cells become
/// ISO-8601 text, and nested structures are unwrapped recursively. Cells
/// with no matching schema field pass through untouched.
fn normalize_cell(value: Value, field: Option<&TableFieldSchema>) -> Value {
    let Some(field) = field else {
        return value;
    };

    if field.mode.as_deref() == Some("REPEATED") {
        return match value {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| normalize_scalar(unwrap_v(item), field))
                    .collect(),
            ),
            other => normalize_scalar(other, field),
        };
    }

    normalize_scalar(value, field)
}

fn normalize_scalar(value: Value, field: &TableFieldSchema) -> Value {
    use gcp_bigquery_client::model::field_type::FieldType;

    if value.is_null() {
        return Value::Null;
    }

    match &field.r#type {
        FieldType::Integer | FieldType::Int64 => parse_integer(value),
        FieldType::Float | FieldType::Float64 | FieldType::Numeric | FieldType::Bignumeric => {
            parse_float(value)
        }
        FieldType::Boolean | FieldType::Bool => parse_boolean(value),
        FieldType::Timestamp => to_iso8601(value),
        FieldType::Record | FieldType::Struct => unwrap_record(value, field),
        _ => value,
    }
}

fn parse_integer(value: Value) -> Value {
    match value {
        Value::String(text) => match text.parse::<i64>() {
            Ok(number) => Value::from(number),
            Err(_) => Value::String(text),
        },
        other => other,
    }
}

fn parse_float(value: Value) -> Value {
    match value {
        Value::String(text) => match text.parse::<f64>() {
            Ok(number) => serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or(Value::String(text)),
            Err(_) => Value::String(text),
        },
        other => other,
    }
}

fn parse_boolean(value: Value) -> Value {
    match value {
        Value::String(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(text),
        },
        other => other,
    }
}

/// TIMESTAMP cells arrive as fractional epoch seconds; the analysis pipeline
/// wants ISO-8601 text.
fn to_iso8601(value: Value) -> Value {
    let text = match &value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return value,
    };
    match text.parse::<f64>() {
        Ok(epoch) => {
            let seconds = epoch.trunc() as i64;
            let nanos = (epoch.fract() * 1e9).round() as u32;
            match DateTime::from_timestamp(seconds, nanos) {
                Some(timestamp) => Value::String(timestamp.to_rfc3339()),
                None => value,
            }
        }
        Err(_) => value,
    }
}

/// RECORD cells arrive as `{"f": [{"v": ...}, ...]}` with one entry per
/// subfield, in schema order.
fn unwrap_record(value: Value, field: &TableFieldSchema) -> Value {
    let mut wrapper = match value {
        Value::Object(wrapper) => wrapper,
        other => return other,
    };
    let cells = match wrapper.remove("f") {
        Some(Value::Array(cells)) => cells,
        Some(other) => {
            wrapper.insert("f".to_string(), other);
            return Value::Object(wrapper);
        }
        None => return Value::Object(wrapper),
    };

    let subfields: &[TableFieldSchema] = field.fields.as_deref().unwrap_or(&[]);
    let mut record = Map::new();
    for (index, cell) in cells.into_iter().enumerate() {
        let Some(subfield) = subfields.get(index) else {
            break;
        };
        record.insert(
            subfield.name.clone(),
            normalize_cell(unwrap_v(cell), Some(subfield)),
        );
    }
    Value::Object(record)
}

fn unwrap_v(value: Value) -> Value {
    match value {
        Value::Object(mut wrapper) if wrapper.contains_key("v") => {
            wrapper.remove("v").unwrap_or(Value::Null)
        }
        other => other,
    }
}
