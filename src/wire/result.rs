//! Tabular query results

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::ResponseError;

/// Column names the backend uses for well-known result columns
pub const COLUMN_EVENT_NAME: &str = "event_name";
pub const COLUMN_EVENT_INDEX: &str = "event_index";
pub const COLUMN_COUNT: &str = "count";
/// Value column of aggregate (sum/average) queries, read when `count` is absent
pub const COLUMN_AGGREGATE: &str = "aggregate";
pub const COLUMN_DATETIME: &str = "datetime";
pub const COLUMN_ERROR: &str = "error";

/// Headers plus positional rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderRows {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

/// Result of one backend query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularResult {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    /// Aggregate sub-table (totals per key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<HeaderRows>,
}

impl TabularResult {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            headers,
            rows,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: HeaderRows) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// True when there is nothing to chart
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Error text if the backend reported failure in the data
    pub fn error_message(&self) -> Option<String> {
        let idx = self.column(COLUMN_ERROR)?;
        let message = self
            .rows
            .first()
            .and_then(|row| row.get(idx))
            .map(|cell| match cell {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        Some(message)
    }

    /// Fail if the result carries an `error` column
    pub fn check(&self) -> Result<(), ResponseError> {
        check_at(self, 0)
    }
}

fn check_at(result: &TabularResult, position: usize) -> Result<(), ResponseError> {
    match result.error_message() {
        Some(message) => {
            log::warn!("query result {} reported an error: {}", position, message);
            Err(ResponseError::Upstream { position, message })
        }
        None => Ok(()),
    }
}

/// Results of a query group, in query order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    #[serde(default)]
    pub result_group: Vec<TabularResult>,
}

impl ResultGroup {
    /// Fail on the first member carrying an `error` column
    pub fn check(&self) -> Result<(), ResponseError> {
        self.result_group
            .iter()
            .enumerate()
            .try_for_each(|(position, result)| check_at(result, position))
    }

    pub fn get(&self, position: usize) -> Option<&TabularResult> {
        self.result_group.get(position)
    }
}

/// Read a result cell as a number
///
/// The backend sends counts as JSON numbers, but aggregates over text
/// columns arrive as numeric strings.
pub fn cell_number(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a result cell as display text
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
