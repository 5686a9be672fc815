//! Series records → breakdown table rows

use std::collections::BTreeMap;
use serde::Serialize;
use super::layout::ColumnLayout;
use super::series::SeriesRecord;
use crate::descriptor::Breakdown;
use crate::wire::TabularResult;

/// One row of the breakdown table
///
/// Breakdown cells are keyed `<property>;<position>` so the same property
/// used twice (per-event and global) stays in separate columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub index: usize,
    pub event: String,
    pub event_index: usize,
    pub label: String,
    pub value: f64,
    pub color: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, String>,
}

/// Build table rows in record order
///
/// Cell keys use the breakdown's property names; columns past the end of
/// the breakdown list fall back to the result header.
pub fn format_breakdown_table(result: &TabularResult, records: &[SeriesRecord], breakdown: &Breakdown) -> Vec<TableRow> {
    if result.is_empty() {
        return Vec::new();
    }
    let Some(layout) = ColumnLayout::of(result) else {
        return Vec::new();
    };
    let properties: Vec<&str> = breakdown.entries().map(|e| e.property.as_str()).collect();

    records
        .iter()
        .filter_map(|record| {
            let row = result.rows.get(record.index)?;
            let cells = layout
                .breakdown
                .iter()
                .zip(layout.breakdown_values(row))
                .enumerate()
                .map(|(position, (&column, value))| {
                    let property = properties
                        .get(position)
                        .copied()
                        .or_else(|| result.headers.get(column).map(String::as_str))
                        .unwrap_or_default();
                    (column_key(property, position), value)
                })
                .collect();
            Some(TableRow {
                index: record.index,
                event: record.event.clone(),
                event_index: record.event_index,
                label: record.label.clone(),
                value: record.value,
                color: record.color.clone(),
                cells,
            })
        })
        .collect()
}

/// Table column key for a breakdown property
pub fn column_key(property: &str, position: usize) -> String {
    format!("{};{}", property, position)
}
