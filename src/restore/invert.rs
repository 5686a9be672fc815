//! Wire query → descriptor

use std::str::FromStr;
use chrono::{DateTime, NaiveDate};
use super::error::RestoreError;
use crate::builder::{LOGICAL_AND, LOGICAL_OR};
use crate::config::QueryConfig;
use crate::descriptor::{
    Breakdown, BreakdownEntry, BreakdownType, CountType, DataType, DateRange, EventSelection, Filter,
    FilterValue, Frequency, PropertyCategory, PropertyRef, QueryDescriptor, QueryType, Scalar,
};
use crate::wire::{DateTimeValue, WireEvent, WireFilter, WireGroupBy, WireQuery};

/// Reopen a stored query in the composer
///
/// Inverse of the builder: OR-runs of filter entries become value lists,
/// group-by entries with an event index become per-event breakdowns and
/// the rest become global breakdowns.
pub fn restore_descriptor(query: &WireQuery, config: &QueryConfig) -> Result<QueryDescriptor, RestoreError> {
    let query_type = QueryType::from_str(&query.cl)?;
    let count_type = CountType::from_str(&query.ty)?;
    let breakdown_type = if query.ec.is_empty() {
        BreakdownType::default()
    } else {
        BreakdownType::from_wire_token(&query.ec)?
    };

    let events = query
        .ewp
        .iter()
        .map(|event| restore_event(event, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryDescriptor {
        query_type,
        count_type,
        breakdown_type,
        events,
        breakdown: restore_breakdown(&query.gbp, config)?,
        date_range: Some(restore_date_range(query)?),
    })
}

fn restore_date_range(query: &WireQuery) -> Result<DateRange, RestoreError> {
    let frequency = if query.gbt.is_empty() {
        None
    } else {
        Some(Frequency::from_str(&query.gbt)?)
    };
    Ok(DateRange {
        from: Some(utc_date(query.fr)?),
        to: Some(utc_date(query.to)?),
        frequency,
    })
}

fn utc_date(ts: i64) -> Result<NaiveDate, RestoreError> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.date_naive())
        .ok_or(RestoreError::InvalidTimestamp(ts))
}

fn restore_event(event: &WireEvent, config: &QueryConfig) -> Result<EventSelection, RestoreError> {
    let mut filters: Vec<Filter> = Vec::new();
    let mut last: Option<&WireFilter> = None;

    for entry in &event.pr {
        let continues_last = entry.lop == LOGICAL_OR
            && last.is_some_and(|prev| same_property(prev, entry))
            && entry.ty != DataType::DateTime.as_str();

        if continues_last {
            if let Some(filter) = filters.last_mut() {
                push_value(&mut filter.values, Scalar(entry.va.clone()));
            }
        } else {
            if entry.lop != LOGICAL_AND && entry.lop != LOGICAL_OR {
                log::warn!("unexpected logical operator '{}' on '{}', treating as AND", entry.lop, entry.pr);
            }
            filters.push(restore_filter(entry, config)?);
        }
        last = Some(entry);
    }

    Ok(EventSelection {
        label: event.na.clone(),
        alias: None,
        filters,
    })
}

fn same_property(a: &WireFilter, b: &WireFilter) -> bool {
    a.pr == b.pr && a.op == b.op && a.en == b.en && a.ty == b.ty
}

fn push_value(values: &mut FilterValue, value: Scalar) {
    match values {
        FilterValue::List(list) => list.push(value),
        FilterValue::Single(first) => {
            *values = FilterValue::List(vec![first.clone(), value]);
        }
        FilterValue::Range { .. } => {}
    }
}

fn restore_filter(entry: &WireFilter, config: &QueryConfig) -> Result<Filter, RestoreError> {
    let category = PropertyCategory::from_str(&entry.en)?;
    let datatype = DataType::from_str(&entry.ty)?;
    let operator = config
        .operators
        .from_wire(&entry.op, datatype)
        .ok_or_else(|| RestoreError::UnknownOperator {
            operator: entry.op.clone(),
            datatype: entry.ty.clone(),
        })?;

    let values = if datatype == DataType::DateTime {
        let value: DateTimeValue = serde_json::from_str(&entry.va).map_err(|e| RestoreError::InvalidValue {
            property: entry.pr.clone(),
            reason: e.to_string(),
        })?;
        FilterValue::Range {
            from: value.fr,
            to: value.to,
            override_period: value.ovp,
        }
    } else {
        FilterValue::Single(Scalar(entry.va.clone()))
    };

    Ok(Filter {
        property: PropertyRef::new(entry.pr.clone(), category, datatype),
        operator: operator.token().to_string(),
        values,
    })
}

fn restore_breakdown(gbp: &[WireGroupBy], config: &QueryConfig) -> Result<Breakdown, RestoreError> {
    let mut breakdown = Breakdown::default();
    for entry in gbp {
        let event_index = entry.eni.filter(|&i| i > 0).map(|i| i - 1);
        let event_name = if entry.ena.is_empty()
            || (event_index.is_none() && entry.ena == config.global_breakdown_event)
        {
            None
        } else {
            Some(entry.ena.clone())
        };
        let restored = BreakdownEntry {
            property: entry.pr.clone(),
            category: PropertyCategory::from_str(&entry.en)?,
            datatype: DataType::from_str(&entry.pty)?,
            event_name,
            event_index,
            granularity: entry.grn.clone(),
        };
        if restored.event_index.is_some() {
            breakdown.event.push(restored);
        } else {
            breakdown.global.push(restored);
        }
    }
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(lop: &str, pr: &str, va: &str) -> WireFilter {
        WireFilter {
            en: "user".to_string(),
            lop: lop.to_string(),
            op: "equals".to_string(),
            pr: pr.to_string(),
            ty: "categorical".to_string(),
            va: va.to_string(),
        }
    }

    #[test]
    fn test_or_runs_become_lists() {
        let event = WireEvent {
            na: "page_view".to_string(),
            pr: vec![
                filter("AND", "$country", "India"),
                filter("OR", "$country", "US"),
                filter("AND", "$browser", "Chrome"),
            ],
        };
        let restored = restore_event(&event, &QueryConfig::default()).unwrap();
        assert_eq!(restored.filters.len(), 2);
        assert_eq!(restored.filters[0].values, FilterValue::list(["India", "US"]));
        assert_eq!(restored.filters[0].operator, "=");
        assert_eq!(restored.filters[1].values, FilterValue::single("Chrome"));
    }

    #[test]
    fn test_or_on_other_property_starts_new_filter() {
        let event = WireEvent {
            na: "page_view".to_string(),
            pr: vec![filter("AND", "$country", "India"), filter("OR", "$city", "Pune")],
        };
        let restored = restore_event(&event, &QueryConfig::default()).unwrap();
        assert_eq!(restored.filters.len(), 2);
    }

    #[test]
    fn test_unknown_wire_operator() {
        let mut entry = filter("AND", "$country", "India");
        entry.op = "startsWith".to_string();
        let event = WireEvent { na: "x".to_string(), pr: vec![entry] };
        assert!(matches!(
            restore_event(&event, &QueryConfig::default()),
            Err(RestoreError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn test_zero_eni_is_global() {
        let gbp = vec![WireGroupBy {
            pr: "$country".to_string(),
            en: "user".to_string(),
            pty: "categorical".to_string(),
            ena: "$present".to_string(),
            eni: Some(0),
            grn: None,
        }];
        let breakdown = restore_breakdown(&gbp, &QueryConfig::default()).unwrap();
        assert!(breakdown.event.is_empty());
        assert_eq!(breakdown.global.len(), 1);
        assert_eq!(breakdown.global[0].event_name, None);
    }
}
