//! # Fixed Table Schema
//!
//! The service answers questions against a single GA4 export table. Its
//! schema description is baked in at compile time and shared by the
//! SQL-generation prompt and the `/schema` endpoint; it is the only
//! process-wide data besides the provider clients, and it never changes
//! after startup.

use serde::Serialize;

pub const PROJECT_ID: &str = "nlq-ex";
pub const DATASET_ID: &str = "test_dataset";
pub const TABLE_ID: &str = "events_20201121";
pub const TABLE_DESCRIPTION: &str = "GA4 event data (November 21, 2020)";

/// One column of the GA4 events table, as surfaced by the `/schema` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaColumn {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: &'static str,
    pub description: &'static str,
}

pub const COLUMNS: &[SchemaColumn] = &[
    SchemaColumn { name: "event_date", column_type: "STRING", description: "Event date (YYYYMMDD format)" },
    SchemaColumn { name: "event_timestamp", column_type: "INTEGER", description: "Event timestamp (microseconds)" },
    SchemaColumn { name: "event_name", column_type: "STRING", description: "Event name (page_view, purchase, add_to_cart, ...)" },
    SchemaColumn { name: "event_previous_timestamp", column_type: "INTEGER", description: "Previous event timestamp" },
    SchemaColumn { name: "event_value_in_usd", column_type: "FLOAT", description: "Event value (USD)" },
    SchemaColumn { name: "event_bundle_sequence_id", column_type: "INTEGER", description: "Event bundle sequence id" },
    SchemaColumn { name: "event_server_timestamp_offset", column_type: "INTEGER", description: "Server timestamp offset" },
    SchemaColumn { name: "user_id", column_type: "STRING", description: "User id" },
    SchemaColumn { name: "user_pseudo_id", column_type: "STRING", description: "Anonymous user id" },
    SchemaColumn { name: "privacy_info", column_type: "RECORD", description: "Privacy related information" },
    SchemaColumn { name: "user_properties", column_type: "RECORD", description: "User properties (nested key-value pairs)" },
    SchemaColumn { name: "user_first_touch_timestamp", column_type: "INTEGER", description: "First touch timestamp for the user" },
    SchemaColumn { name: "user_ltv", column_type: "RECORD", description: "User lifetime value information" },
    SchemaColumn { name: "device", column_type: "RECORD", description: "Device information (category, mobile_brand_name, operating_system, ...)" },
    SchemaColumn { name: "geo", column_type: "RECORD", description: "Geographic information (country, region, city, ...)" },
    SchemaColumn { name: "app_info", column_type: "RECORD", description: "App information (id, version, install_store, ...)" },
    SchemaColumn { name: "traffic_source", column_type: "RECORD", description: "Traffic source information (name, medium, source, ...)" },
    SchemaColumn { name: "stream_id", column_type: "STRING", description: "Stream id" },
    SchemaColumn { name: "platform", column_type: "STRING", description: "Platform (WEB, IOS, ANDROID)" },
    SchemaColumn { name: "event_params", column_type: "RECORD", description: "Event parameters (nested key-value pairs)" },
    SchemaColumn { name: "ecommerce", column_type: "RECORD", description: "E-commerce information (purchase_revenue, items, ...)" },
    SchemaColumn { name: "items", column_type: "RECORD", description: "Item array (item_id, item_name, price, ...)" },
];

pub const SAMPLE_QUESTIONS: &[&str] = &[
    "How many events happened today?",
    "Show the most frequent event types",
    "Show the number of users per country",
    "Show the ratio of mobile to desktop users",
    "Show the total revenue of purchase events",
    "Which hours have the most page_view events?",
    "Show the user distribution per operating system",
    "Show the number of events per traffic source",
];

/// The fully qualified table name in backtick form, ready for generated SQL.
pub fn full_table_name() -> String {
    format!("`{PROJECT_ID}.{DATASET_ID}.{TABLE_ID}`")
}

/// Renders the schema description block embedded in the SQL-generation
/// system prompt.
pub fn schema_prompt() -> String {
    let table = full_table_name();
    format!(
        r#"The following describes the BigQuery GA4 event data table (project: {PROJECT_ID}):

Table: {table}
Description: Google Analytics 4 event data (November 21, 2020)

Main columns:
- event_date (STRING): Event date (YYYYMMDD format)
- event_timestamp (INTEGER): Event timestamp (microseconds)
- event_name (STRING): Event name (page_view, purchase, add_to_cart, session_start, ...)
- event_value_in_usd (FLOAT): Event value (USD)
- user_id (STRING): User id
- user_pseudo_id (STRING): Anonymous user id

Nested structs:
- device.category (STRING): Device category (mobile, desktop, tablet)
- device.operating_system (STRING): Operating system (iOS, Android, Windows, ...)
- device.mobile_brand_name (STRING): Mobile brand name
- geo.country (STRING): Country
- geo.region (STRING): Region
- geo.city (STRING): City
- traffic_source.name (STRING): Traffic source name
- traffic_source.medium (STRING): Medium
- traffic_source.source (STRING): Source
- app_info.id (STRING): App id
- platform (STRING): Platform (WEB, IOS, ANDROID)

Event parameters (event_params array):
- Extracting a specific parameter from the event_params array:
  (SELECT value.string_value FROM UNNEST(event_params) WHERE key = 'page_title')
  (SELECT value.int_value FROM UNNEST(event_params) WHERE key = 'ga_session_id')

E-commerce information:
- ecommerce.purchase_revenue (FLOAT): Purchase revenue
- ecommerce.purchase_revenue_in_usd (FLOAT): Purchase revenue in USD

Important BigQuery functions:
- TIMESTAMP_MICROS(event_timestamp): Convert a timestamp to a datetime
- EXTRACT(HOUR FROM TIMESTAMP_MICROS(event_timestamp)): Extract the hour
- PARSE_DATE('%Y%m%d', event_date): Parse the string date into a DATE
"#
    )
}
