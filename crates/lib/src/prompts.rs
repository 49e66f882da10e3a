//! # Prompt Templates
//!
//! The hardcoded prompt templates for every AI task in the pipeline, plus the
//! helpers that substitute request data into them. Template placeholders use
//! `{name}` markers and are filled with plain string replacement.

use crate::analysis::Profile;
use crate::schema;
use serde_json::Value;

/// Rows embedded verbatim as sample data in the prose-report prompt.
const REPORT_SAMPLE_ROWS: usize = 5;
/// Rows embedded verbatim as sample data in the HTML-report prompt.
const HTML_SAMPLE_ROWS: usize = 3;
/// Chart label/value pairs embedded in the HTML-report prompt.
const HTML_CHART_POINTS: usize = 5;

// --- SQL Generation ---

pub const SQL_GENERATION_SYSTEM_PROMPT: &str = r#"You are a BigQuery SQL expert specializing in GA4 (Google Analytics 4) data analysis.
Convert the user's natural language question into a BigQuery SQL query.

{schema}

Important rules:
1. Use BigQuery standard SQL syntax.
2. Always reference the table with backticks, as {table}.
3. Use the correct syntax for GA4 nested structs (e.g. device.category, geo.country).
4. Use UNNEST with a subquery to extract values from the event_params array.
5. Use the TIMESTAMP_MICROS() function when converting timestamps.
6. Return only the SQL query, with no other explanation.
7. The query must end with a semicolon (;).
8. Use a LIMIT clause when the result set should be bounded.

Common GA4 query patterns:
- Event counts: SELECT event_name, COUNT(*) AS event_count FROM table GROUP BY event_name
- Device breakdown: SELECT device.category, COUNT(*) AS count FROM table GROUP BY device.category
- Regional breakdown: SELECT geo.country, COUNT(DISTINCT user_pseudo_id) AS users FROM table GROUP BY geo.country
- Hourly breakdown: SELECT EXTRACT(HOUR FROM TIMESTAMP_MICROS(event_timestamp)) AS hour, COUNT(*) FROM table GROUP BY hour
- Purchase analysis: SELECT SUM(ecommerce.purchase_revenue_in_usd) AS total_revenue FROM table WHERE event_name = 'purchase'

Examples:
Question: "How many events happened in total today?"
Answer: SELECT COUNT(*) AS total_events FROM {table};

Question: "Show the top 5 most frequent event types"
Answer: SELECT event_name, COUNT(*) AS event_count FROM {table} GROUP BY event_name ORDER BY event_count DESC LIMIT 5;"#;

/// Renders the SQL-generation system prompt with the fixed GA4 schema.
pub fn sql_generation_system_prompt() -> String {
    SQL_GENERATION_SYSTEM_PROMPT
        .replace("{schema}", &schema::schema_prompt())
        .replace("{table}", &schema::full_table_name())
}

// --- Structured Analysis Report ---

pub const ANALYSIS_REPORT_SYSTEM_PROMPT: &str = "You are a senior data analyst. You write concise, scannable analysis reports in Markdown, grounded strictly in the statistics and sample data provided by the user.";

pub const ANALYSIS_REPORT_USER_PROMPT: &str = r#"The following is a GA4 data analysis result. Write a structured analysis report.

**Original question:** {question}

**Executed SQL:**
```sql
{sql}
```

**Data overview:**
- Total records: {row_count}
- Columns: {column_summary}

**Key statistics:**
{statistics}

**Auto-generated insights:**
{insights}

**Sample data (first {sample_count} rows):**
{sample}

Structure the report with exactly these sections:

## Data Analysis Report

### Key Insights
(3-4 concise, clearly stated findings)

### Main Statistics
(the key figures, with concrete numbers)

### Pattern Analysis
(trends or patterns visible in the data)

### Business Implications
(actionable takeaways for practitioners)

### Suggested Next Steps
(follow-up analyses or action items)

Keep every section short and scannable, include concrete figures and percentages, and stay within what the data supports."#;

/// Renders the analysis-report prompt for one query result.
pub fn analysis_report_prompt(
    question: &str,
    sql: &str,
    profile: &Profile,
    insights: &[String],
    rows: &[Value],
) -> String {
    let column_summary = profile
        .columns
        .iter()
        .map(|(name, column)| format!("{name} ({})", column.kind.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let statistics =
        serde_json::to_string_pretty(&profile.columns).unwrap_or_else(|_| "{}".to_string());
    let sample_rows = &rows[..rows.len().min(REPORT_SAMPLE_ROWS)];
    let sample = serde_json::to_string_pretty(sample_rows).unwrap_or_else(|_| "[]".to_string());

    ANALYSIS_REPORT_USER_PROMPT
        .replace("{question}", question)
        .replace("{sql}", sql)
        .replace("{row_count}", &profile.row_count.to_string())
        .replace("{column_summary}", &column_summary)
        .replace("{statistics}", &statistics)
        .replace("{insights}", &insights.join("\n"))
        .replace("{sample_count}", &sample_rows.len().to_string())
        .replace("{sample}", &sample)
}

// --- Self-Contained HTML Report ---

pub const HTML_REPORT_SYSTEM_PROMPT: &str = "You are a frontend engineer and data analyst. You produce complete, self-contained HTML pages with working Chart.js visualizations. You return only HTML, never commentary.";

pub const HTML_REPORT_USER_PROMPT: &str = r#"Turn the following GA4 analysis result into a complete HTML page.

**Original question:** {question}

**Executed SQL:**
```sql
{sql}
```

**Data:**
- Total rows: {row_count}
- Columns: {columns}

**Sample data (first rows):**
{sample}

**Chart data:**
- Labels: {chart_labels}
- Data: {chart_values}

Requirements for the generated page:

1. A fully self-contained HTML file (from <!DOCTYPE html> to </html>).
2. A Chart.js chart using the CDN script https://cdnjs.cloudflare.com/ajax/libs/Chart.js/3.9.1/chart.min.js, rendered through a `ctx` canvas context.
3. Responsive layout that works on mobile.
4. A structured report body: key insights, main statistics, business implications.
5. All styles inline in a <style> block; no external CSS.

Use the actual data values for concrete insights and return only the complete HTML."#;

/// Renders the HTML-report prompt for one query result.
pub fn html_report_prompt(
    question: &str,
    sql: &str,
    rows: &[Value],
    columns: &[String],
    chart_labels: &[String],
    chart_values: &[f64],
) -> String {
    let sample_rows = &rows[..rows.len().min(HTML_SAMPLE_ROWS)];
    let sample = serde_json::to_string_pretty(sample_rows).unwrap_or_else(|_| "[]".to_string());
    let labels = serde_json::to_string(&chart_labels[..chart_labels.len().min(HTML_CHART_POINTS)])
        .unwrap_or_else(|_| "[]".to_string());
    let values = serde_json::to_string(&chart_values[..chart_values.len().min(HTML_CHART_POINTS)])
        .unwrap_or_else(|_| "[]".to_string());

    HTML_REPORT_USER_PROMPT
        .replace("{question}", question)
        .replace("{sql}", sql)
        .replace("{row_count}", &rows.len().to_string())
        .replace("{columns}", &columns.join(", "))
        .replace("{sample}", &sample)
        .replace("{chart_labels}", &labels)
        .replace("{chart_values}", &values)
}
