//! Column positions of a tabular result

use std::collections::HashMap;
use serde_json::Value;
use crate::wire::{
    cell_number, cell_text, TabularResult, COLUMN_AGGREGATE, COLUMN_COUNT, COLUMN_DATETIME, COLUMN_EVENT_INDEX,
    COLUMN_EVENT_NAME,
};

/// Where the well-known columns of a result sit
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnLayout {
    pub event_name: usize,
    pub count: usize,
    pub event_index: Option<usize>,
    pub datetime: Option<usize>,
    /// Columns strictly between `event_name` and `count`, minus `datetime`
    pub breakdown: Vec<usize>,
}

impl ColumnLayout {
    /// None when `event_name` or the value column (`count`, else `aggregate`) is missing
    pub fn of(result: &TabularResult) -> Option<Self> {
        let Some(event_name) = result.column(COLUMN_EVENT_NAME) else {
            log::warn!("result has no '{}' column", COLUMN_EVENT_NAME);
            return None;
        };
        let Some(count) = result
            .column(COLUMN_COUNT)
            .or_else(|| result.column(COLUMN_AGGREGATE))
        else {
            log::warn!("result has no '{}' or '{}' column", COLUMN_COUNT, COLUMN_AGGREGATE);
            return None;
        };
        let datetime = result.column(COLUMN_DATETIME);
        let breakdown = (event_name + 1..count).filter(|i| Some(*i) != datetime).collect();
        Some(Self {
            event_name,
            count,
            event_index: result.column(COLUMN_EVENT_INDEX),
            datetime,
            breakdown,
        })
    }

    pub fn event(&self, row: &[Value]) -> String {
        row.get(self.event_name).map(cell_text).unwrap_or_default()
    }

    pub fn count(&self, row: &[Value]) -> f64 {
        match row.get(self.count) {
            Some(cell) => cell_number(cell).unwrap_or_else(|| {
                log::warn!("non-numeric count {} treated as 0", cell);
                0.0
            }),
            None => 0.0,
        }
    }

    pub fn datetime(&self, row: &[Value]) -> Option<String> {
        self.datetime.and_then(|i| row.get(i)).map(cell_text)
    }

    pub fn breakdown_values(&self, row: &[Value]) -> Vec<String> {
        self.breakdown
            .iter()
            .map(|&i| row.get(i).map(cell_text).unwrap_or_default())
            .collect()
    }

    /// 0-based owning event, from `event_index` or by name among `events`
    pub fn event_position(&self, row: &[Value], events: &[String]) -> usize {
        if let Some(pos) = self
            .event_index
            .and_then(|i| row.get(i))
            .and_then(cell_number)
            .filter(|n| *n >= 0.0)
        {
            return pos as usize;
        }
        let event = self.event(row);
        events.iter().position(|e| *e == event).unwrap_or_else(|| {
            log::warn!("row event '{}' is not one of the query events", event);
            0
        })
    }

    /// Composite label: display name followed by breakdown values
    pub fn label(&self, row: &[Value], display_names: &HashMap<String, String>) -> String {
        let event = self.event(row);
        let mut parts = vec![display_names.get(&event).cloned().unwrap_or(event)];
        parts.extend(self.breakdown_values(row));
        parts.join(",")
    }
}
