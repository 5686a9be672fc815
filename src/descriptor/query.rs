//! Query descriptor - the composer's view of a query

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::filter::Filter;
use super::types::{BreakdownType, CountType, DataType, Frequency, PropertyCategory, QueryType};

/// One event of the query with its filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSelection {
    /// Event identifier, e.g. `$session` or `page_view`
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl EventSelection {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alias: None,
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// A property used to partition results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub property: String,
    pub category: PropertyCategory,
    pub datatype: DataType,
    /// Owning event for per-event breakdowns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// 0-based position of the owning event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_index: Option<usize>,
    /// Bucket size for datetime properties (day, week, month, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

impl BreakdownEntry {
    /// Breakdown applied to every event
    pub fn global(property: impl Into<String>, category: PropertyCategory, datatype: DataType) -> Self {
        Self {
            property: property.into(),
            category,
            datatype,
            event_name: None,
            event_index: None,
            granularity: None,
        }
    }

    /// Breakdown owned by one event of the query
    pub fn for_event(
        property: impl Into<String>,
        category: PropertyCategory,
        datatype: DataType,
        event_name: impl Into<String>,
        event_index: usize,
    ) -> Self {
        Self {
            event_name: Some(event_name.into()),
            event_index: Some(event_index),
            ..Self::global(property, category, datatype)
        }
    }

    pub fn with_granularity(mut self, granularity: impl Into<String>) -> Self {
        self.granularity = Some(granularity.into());
        self
    }
}

/// Breakdowns split by scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub event: Vec<BreakdownEntry>,
    #[serde(default)]
    pub global: Vec<BreakdownEntry>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.event.is_empty() && self.global.is_empty()
    }

    /// Event breakdowns followed by global breakdowns
    pub fn entries(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.event.iter().chain(self.global.iter())
    }

    pub fn len(&self) -> usize {
        self.event.len() + self.global.len()
    }
}

/// Query date range
///
/// When either bound is missing the builder queries the current week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            frequency: None,
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

/// Everything the composer knows about a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub query_type: QueryType,
    #[serde(default)]
    pub count_type: CountType,
    #[serde(default)]
    pub breakdown_type: BreakdownType,
    pub events: Vec<EventSelection>,
    #[serde(default)]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl QueryDescriptor {
    pub fn new(query_type: QueryType) -> Self {
        Self {
            query_type,
            count_type: CountType::default(),
            breakdown_type: BreakdownType::default(),
            events: Vec::new(),
            breakdown: Breakdown::default(),
            date_range: None,
        }
    }

    pub fn with_event(mut self, event: EventSelection) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_count_type(mut self, count_type: CountType) -> Self {
        self.count_type = count_type;
        self
    }

    pub fn with_breakdown_type(mut self, breakdown_type: BreakdownType) -> Self {
        self.breakdown_type = breakdown_type;
        self
    }

    pub fn with_breakdown(mut self, entry: BreakdownEntry) -> Self {
        if entry.event_index.is_some() {
            self.breakdown.event.push(entry);
        } else {
            self.breakdown.global.push(entry);
        }
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Event labels in input order
    pub fn event_labels(&self) -> Vec<String> {
        self.events.iter().map(|e| e.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_composer_json() {
        let json = r#"{
            "queryType": "events",
            "countType": "unique_users",
            "events": [{"label": "page_view", "filters": []}],
            "breakdown": {"event": [], "global": []},
            "dateRange": {"from": "2024-01-01", "to": "2024-01-07", "frequency": "date"}
        }"#;
        let descriptor: QueryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.query_type, QueryType::Events);
        assert_eq!(descriptor.count_type, CountType::UniqueUsers);
        assert_eq!(descriptor.breakdown_type, BreakdownType::Each);
        let range = descriptor.date_range.unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(range.frequency, Some(Frequency::Date));
    }

    #[test]
    fn test_with_breakdown_partitions_by_event_index() {
        let descriptor = QueryDescriptor::new(QueryType::Events)
            .with_breakdown(BreakdownEntry::global("$country", PropertyCategory::User, DataType::Categorical))
            .with_breakdown(BreakdownEntry::for_event(
                "$page_url",
                PropertyCategory::Event,
                DataType::Categorical,
                "page_view",
                0,
            ));
        assert_eq!(descriptor.breakdown.global.len(), 1);
        assert_eq!(descriptor.breakdown.event.len(), 1);
        let order: Vec<&str> = descriptor.breakdown.entries().map(|e| e.property.as_str()).collect();
        assert_eq!(order, vec!["$page_url", "$country"]);
    }
}
