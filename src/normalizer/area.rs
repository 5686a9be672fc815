//! Time-series result → stacked area series

use std::collections::HashMap;
use serde::Serialize;
use super::layout::ColumnLayout;
use super::series::SeriesRecord;
use crate::wire::TabularResult;

/// Values of one series across the chart categories
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    pub label: String,
    pub event_index: usize,
    pub color: String,
    pub data: Vec<f64>,
}

/// Categories (timestamps, in first-seen order) plus one series per record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StackedAreaData {
    pub categories: Vec<String>,
    pub series: Vec<AreaSeries>,
}

/// Pivot a time-series result into stacked area series
///
/// `series` are the records normalized from the totals query; time-series
/// rows are matched to them by event and composite label. Buckets with no
/// row are 0; when several rows share a bucket the last one wins.
pub fn format_stacked_area(
    result: &TabularResult,
    series: &[SeriesRecord],
    events: &[String],
    display_names: &HashMap<String, String>,
) -> StackedAreaData {
    if result.is_empty() {
        return StackedAreaData::default();
    }
    let Some(layout) = ColumnLayout::of(result) else {
        return StackedAreaData::default();
    };
    if layout.datetime.is_none() {
        log::warn!("stacked area needs a time-series result, got headers {:?}", result.headers);
        return StackedAreaData::default();
    }

    let mut categories: Vec<String> = Vec::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();
    for datetime in result.rows.iter().filter_map(|row| layout.datetime(row)) {
        if !category_index.contains_key(&datetime) {
            category_index.insert(datetime.clone(), categories.len());
            categories.push(datetime);
        }
    }

    let series_index: HashMap<(usize, String), usize> = series
        .iter()
        .enumerate()
        .map(|(i, s)| ((s.event_index, s.label.clone()), i))
        .collect();

    let mut out: Vec<AreaSeries> = series
        .iter()
        .map(|s| AreaSeries {
            label: s.label.clone(),
            event_index: s.event_index,
            color: s.color.clone(),
            data: vec![0.0; categories.len()],
        })
        .collect();

    for row in &result.rows {
        let Some(datetime) = layout.datetime(row) else {
            continue;
        };
        let key = (layout.event_position(row, events), layout.label(row, display_names));
        if let (Some(&s), Some(&c)) = (series_index.get(&key), category_index.get(&datetime)) {
            out[s].data[c] = layout.count(row);
        }
    }

    StackedAreaData { categories, series: out }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pivot_fills_missing_buckets_with_zero() {
        let events = vec!["page_view".to_string()];
        let palette = vec!["#111".to_string()];
        let names = HashMap::new();

        let totals = TabularResult::new(
            headers(&["event_index", "event_name", "$country", "count"]),
            vec![
                vec![json!(0), json!("page_view"), json!("India"), json!(7)],
                vec![json!(0), json!("page_view"), json!("US"), json!(2)],
            ],
        );
        let records = normalize(&totals, &events, &palette, &names);

        let series = TabularResult::new(
            headers(&["event_index", "event_name", "datetime", "$country", "count"]),
            vec![
                vec![json!(0), json!("page_view"), json!("2024-01-02"), json!("India"), json!(4)],
                vec![json!(0), json!("page_view"), json!("2024-01-01"), json!("India"), json!(3)],
                vec![json!(0), json!("page_view"), json!("2024-01-02"), json!("US"), json!(2)],
            ],
        );
        let area = format_stacked_area(&series, &records, &events, &names);

        assert_eq!(area.categories, vec!["2024-01-02", "2024-01-01"]);
        assert_eq!(area.series.len(), 2);
        assert_eq!(area.series[0].label, "page_view,India");
        assert_eq!(area.series[0].data, vec![4.0, 3.0]);
        assert_eq!(area.series[1].data, vec![2.0, 0.0]);
    }

    #[test]
    fn test_repeated_bucket_keeps_last_row() {
        let events = vec!["page_view".to_string()];
        let names = HashMap::new();
        let totals = TabularResult::new(
            headers(&["event_index", "event_name", "count"]),
            vec![vec![json!(0), json!("page_view"), json!(9)]],
        );
        let records = normalize(&totals, &events, &[], &names);

        let series = TabularResult::new(
            headers(&["event_index", "event_name", "datetime", "count"]),
            vec![
                vec![json!(0), json!("page_view"), json!("2024-01-01"), json!(5)],
                vec![json!(0), json!("page_view"), json!("2024-01-01"), json!(4)],
            ],
        );
        let area = format_stacked_area(&series, &records, &events, &names);
        assert_eq!(area.categories, vec!["2024-01-01"]);
        assert_eq!(area.series[0].data, vec![4.0]);
    }

    #[test]
    fn test_totals_result_has_no_categories() {
        let result = TabularResult::new(headers(&["event_name", "count"]), vec![vec![json!("a"), json!(1)]]);
        let area = format_stacked_area(&result, &[], &[], &HashMap::new());
        assert_eq!(area, StackedAreaData::default());
    }
}
