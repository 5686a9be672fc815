//! Tabular result → ordered chart series

use std::collections::HashMap;
use serde::Serialize;
use super::layout::ColumnLayout;
use crate::wire::TabularResult;

/// One chart series: an event, or an event × breakdown combination
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    /// `<event>,<breakdown values...>`
    pub label: String,
    pub value: f64,
    /// Row position in the source result
    pub index: usize,
    /// Raw event name
    pub event: String,
    /// 0-based owning event
    pub event_index: usize,
    pub color: String,
}

/// Turn a tabular result into series records
///
/// Records are ordered by value, except that the top record of each event
/// is pinned to the front in event order so every event shows up among
/// the first legend entries.
pub fn normalize(
    result: &TabularResult,
    events: &[String],
    palette: &[String],
    display_names: &HashMap<String, String>,
) -> Vec<SeriesRecord> {
    if result.is_empty() {
        return Vec::new();
    }
    let Some(layout) = ColumnLayout::of(result) else {
        return Vec::new();
    };

    let records = result
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let event_index = layout.event_position(row, events);
            SeriesRecord {
                label: layout.label(row, display_names),
                value: layout.count(row),
                index,
                event: layout.event(row),
                event_index,
                color: palette_color(palette, event_index),
            }
        })
        .collect();

    pin_event_representatives(records, events.len())
}

fn palette_color(palette: &[String], position: usize) -> String {
    if palette.is_empty() {
        return String::new();
    }
    palette[position % palette.len()].clone()
}

/// Sort by value descending, then move the first record of every event to the front
fn pin_event_representatives(mut records: Vec<SeriesRecord>, event_count: usize) -> Vec<SeriesRecord> {
    records.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut pinned = vec![false; records.len()];
    let mut ordered = Vec::with_capacity(records.len());
    for position in 0..event_count {
        if let Some(i) = records.iter().position(|r| r.event_index == position) {
            pinned[i] = true;
            ordered.push(i);
        }
    }
    ordered.extend((0..records.len()).filter(|i| !pinned[*i]));

    let mut slots: Vec<Option<SeriesRecord>> = records.into_iter().map(Some).collect();
    ordered.into_iter().filter_map(|i| slots[i].take()).collect()
}

/// Legend entries: labels tagged with their event, grouped by event
///
/// Within an event, entries keep descending value order.
pub fn format_visible_properties(records: &[SeriesRecord], events: &[String]) -> Vec<SeriesRecord> {
    let mut visible: Vec<SeriesRecord> = records
        .iter()
        .map(|r| SeriesRecord {
            label: format!("{}; [{}]", r.label, r.event_index),
            ..r.clone()
        })
        .collect();

    visible.sort_by(|a, b| b.value.total_cmp(&a.value));
    // Stable: ties keep the value order from the first pass
    visible.sort_by_key(|r| event_order(r, events));
    visible
}

fn event_order(record: &SeriesRecord, events: &[String]) -> usize {
    if record.event_index < events.len() {
        record.event_index
    } else {
        events.len()
    }
}
