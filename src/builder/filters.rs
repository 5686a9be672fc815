//! Event filters → `ewp`

use chrono::{DateTime, Utc};
use super::error::BuildError;
use crate::config::{Operator, OperatorVocabulary};
use crate::descriptor::{DataType, EventSelection, Filter, FilterValue, PropertyCatalog, PropertyRef};
use crate::wire::{DateTimeValue, WireEvent, WireFilter};

pub(crate) const LOGICAL_AND: &str = "AND";
pub(crate) const LOGICAL_OR: &str = "OR";

/// Translate every event selection into a wire event
pub fn build_events_with_properties(
    events: &[EventSelection],
    vocabulary: &OperatorVocabulary,
    catalog: Option<&PropertyCatalog>,
    now: DateTime<Utc>,
) -> Result<Vec<WireEvent>, BuildError> {
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            if event.label.trim().is_empty() {
                return Err(BuildError::MissingEventLabel { index });
            }
            let mut pr = Vec::new();
            for filter in &event.filters {
                pr.extend(build_filter(filter, vocabulary, catalog, now)?);
            }
            Ok(WireEvent {
                na: event.label.clone(),
                pr,
            })
        })
        .collect()
}

/// Translate one filter into its wire entries
///
/// A list of N values becomes N sibling entries: the first joins the
/// preceding filters with AND, the rest are OR'd onto it.
pub fn build_filter(
    filter: &Filter,
    vocabulary: &OperatorVocabulary,
    catalog: Option<&PropertyCatalog>,
    now: DateTime<Utc>,
) -> Result<Vec<WireFilter>, BuildError> {
    let property = &filter.property;
    check_property(property, catalog, "filter")?;
    let operator = resolve_operator(&filter.operator, property.datatype, vocabulary)?;

    let entry = |lop: &str, va: String| WireFilter {
        en: property.category.as_str().to_string(),
        lop: lop.to_string(),
        op: operator.wire_name().to_string(),
        pr: property.name.clone(),
        ty: property.datatype.as_str().to_string(),
        va,
    };

    match (&filter.values, property.datatype) {
        (FilterValue::Range { from, to, override_period }, DataType::DateTime) => {
            let value = datetime_value(property, *from, *to, *override_period, now)?;
            let va = serde_json::to_string(&value).map_err(|e| BuildError::InvalidValue {
                property: property.name.clone(),
                reason: e.to_string(),
            })?;
            Ok(vec![entry(LOGICAL_AND, va)])
        }
        (FilterValue::Range { .. }, datatype) => Err(BuildError::InvalidValue {
            property: property.name.clone(),
            reason: format!("range values are only valid for datetime properties, not {}", datatype),
        }),
        (_, DataType::DateTime) => Err(BuildError::InvalidValue {
            property: property.name.clone(),
            reason: "datetime filters need a from/to range".to_string(),
        }),
        (values, datatype) => {
            let scalars = values.scalars();
            if scalars.is_empty() {
                return Err(BuildError::InvalidValue {
                    property: property.name.clone(),
                    reason: "no values selected".to_string(),
                });
            }
            if datatype == DataType::Numerical {
                if let Some(bad) = scalars.iter().find(|s| !is_finite_number(s.as_str())) {
                    return Err(BuildError::InvalidValue {
                        property: property.name.clone(),
                        reason: format!("'{}' is not a number", bad.as_str()),
                    });
                }
            }
            Ok(scalars
                .iter()
                .enumerate()
                .map(|(i, v)| entry(if i == 0 { LOGICAL_AND } else { LOGICAL_OR }, v.0.clone()))
                .collect())
        }
    }
}

// f64 parsing also accepts NaN and infinities
fn is_finite_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn datetime_value(
    property: &PropertyRef,
    from: i64,
    to: i64,
    override_period: bool,
    now: DateTime<Utc>,
) -> Result<DateTimeValue, BuildError> {
    if from > to {
        return Err(BuildError::InvalidValue {
            property: property.name.clone(),
            reason: format!("range starts after it ends: {} > {}", from, to),
        });
    }
    if !override_period {
        return Ok(DateTimeValue { fr: from, to, ovp: false });
    }
    // Keep the window length, end it now
    let end = now.timestamp();
    Ok(DateTimeValue {
        fr: end - (to - from),
        to: end,
        ovp: true,
    })
}

/// Resolve a human operator token against the vocabulary of `datatype`
pub fn resolve_operator(
    token: &str,
    datatype: DataType,
    vocabulary: &OperatorVocabulary,
) -> Result<Operator, BuildError> {
    if let Some(operator) = vocabulary.operator(token, datatype) {
        return Ok(operator);
    }
    if vocabulary.datatypes_for(token).is_empty() {
        Err(BuildError::UnknownOperator {
            operator: token.to_string(),
        })
    } else {
        Err(BuildError::OperatorNotAllowed {
            operator: token.to_string(),
            datatype,
        })
    }
}

/// Reject empty names and, with a catalog, unknown or mistyped properties
pub(crate) fn check_property(
    property: &PropertyRef,
    catalog: Option<&PropertyCatalog>,
    context: &str,
) -> Result<(), BuildError> {
    check_property_parts(&property.name, property.category, property.datatype, catalog, context)
}

pub(crate) fn check_property_parts(
    name: &str,
    category: crate::descriptor::PropertyCategory,
    datatype: DataType,
    catalog: Option<&PropertyCatalog>,
    context: &str,
) -> Result<(), BuildError> {
    if name.trim().is_empty() {
        return Err(BuildError::MissingProperty {
            context: context.to_string(),
        });
    }
    let Some(catalog) = catalog else {
        return Ok(());
    };
    match catalog.datatype(name, category) {
        None => Err(BuildError::UnknownProperty {
            name: name.to_string(),
            category,
        }),
        Some(expected) if expected != datatype => Err(BuildError::DatatypeMismatch {
            name: name.to_string(),
            expected,
            found: datatype,
        }),
        Some(_) => Ok(()),
    }
}
