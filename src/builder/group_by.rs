//! Breakdowns → `gbp`

use super::error::BuildError;
use super::filters::check_property_parts;
use crate::config::QueryConfig;
use crate::descriptor::{Breakdown, BreakdownEntry, DataType, EventSelection, PropertyCatalog};
use crate::wire::WireGroupBy;

/// Translate per-event then global breakdowns into group-by entries
pub fn build_group_by(
    breakdown: &Breakdown,
    events: &[EventSelection],
    config: &QueryConfig,
    catalog: Option<&PropertyCatalog>,
) -> Result<Vec<WireGroupBy>, BuildError> {
    breakdown
        .entries()
        .map(|entry| build_group_by_entry(entry, events, config, catalog))
        .collect()
}

fn build_group_by_entry(
    entry: &BreakdownEntry,
    events: &[EventSelection],
    config: &QueryConfig,
    catalog: Option<&PropertyCatalog>,
) -> Result<WireGroupBy, BuildError> {
    check_property_parts(&entry.property, entry.category, entry.datatype, catalog, "breakdown")?;

    let owner = match entry.event_index {
        Some(index) => Some(events.get(index).ok_or_else(|| BuildError::InvalidEventIndex {
            property: entry.property.clone(),
            index,
            events: events.len(),
        })?),
        None => None,
    };

    let ena = entry
        .event_name
        .clone()
        .or_else(|| owner.map(|e| e.label.clone()))
        .unwrap_or_else(|| config.global_breakdown_event.clone());

    let grn = (entry.datatype == DataType::DateTime).then(|| {
        entry
            .granularity
            .clone()
            .unwrap_or_else(|| config.default_breakdown_granularity.clone())
    });

    Ok(WireGroupBy {
        pr: entry.property.clone(),
        en: entry.category.as_str().to_string(),
        pty: entry.datatype.as_str().to_string(),
        ena,
        eni: entry.event_index.map(|i| i + 1),
        grn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyCategory;

    fn events() -> Vec<EventSelection> {
        vec![EventSelection::new("page_view"), EventSelection::new("signup")]
    }

    #[test]
    fn test_event_breakdowns_come_first_with_one_based_index() {
        let breakdown = Breakdown {
            event: vec![BreakdownEntry::for_event(
                "$source",
                PropertyCategory::Event,
                DataType::Categorical,
                "signup",
                1,
            )],
            global: vec![BreakdownEntry::global("$country", PropertyCategory::User, DataType::Categorical)],
        };
        let gbp = build_group_by(&breakdown, &events(), &QueryConfig::default(), None).unwrap();

        assert_eq!(gbp.len(), 2);
        assert_eq!(gbp[0].pr, "$source");
        assert_eq!(gbp[0].ena, "signup");
        assert_eq!(gbp[0].eni, Some(2));
        assert_eq!(gbp[1].pr, "$country");
        assert_eq!(gbp[1].ena, "$present");
        assert_eq!(gbp[1].eni, None);
    }

    #[test]
    fn test_datetime_breakdown_gets_granularity() {
        let breakdown = Breakdown {
            event: vec![],
            global: vec![
                BreakdownEntry::global("$joinTime", PropertyCategory::User, DataType::DateTime),
                BreakdownEntry::global("$signupTime", PropertyCategory::User, DataType::DateTime)
                    .with_granularity("week"),
                BreakdownEntry::global("$country", PropertyCategory::User, DataType::Categorical)
                    .with_granularity("week"),
            ],
        };
        let gbp = build_group_by(&breakdown, &events(), &QueryConfig::default(), None).unwrap();
        assert_eq!(gbp[0].grn.as_deref(), Some("day"));
        assert_eq!(gbp[1].grn.as_deref(), Some("week"));
        assert_eq!(gbp[2].grn, None);
    }

    #[test]
    fn test_event_index_out_of_range() {
        let breakdown = Breakdown {
            event: vec![BreakdownEntry::for_event(
                "$source",
                PropertyCategory::Event,
                DataType::Categorical,
                "logout",
                5,
            )],
            global: vec![],
        };
        let err = build_group_by(&breakdown, &events(), &QueryConfig::default(), None).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidEventIndex {
                property: "$source".to_string(),
                index: 5,
                events: 2
            }
        );
    }
}
