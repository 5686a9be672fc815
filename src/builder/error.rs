//! Builder error types

use std::fmt;
use chrono::NaiveDate;
use crate::descriptor::{DataType, PropertyCategory, QueryType};

/// Errors that reject a descriptor before any payload is built
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Descriptor has no events
    NoEvents,
    /// Event at `index` has an empty label
    MissingEventLabel { index: usize },
    /// A filter or breakdown names no property
    MissingProperty { context: String },
    /// Property is not in the catalog
    UnknownProperty { name: String, category: PropertyCategory },
    /// Property is in the catalog with another datatype
    DatatypeMismatch { name: String, expected: DataType, found: DataType },
    /// Operator token is in no vocabulary
    UnknownOperator { operator: String },
    /// Operator token exists, but not for this datatype
    OperatorNotAllowed { operator: String, datatype: DataType },
    /// Filter value does not fit the property
    InvalidValue { property: String, reason: String },
    /// Breakdown points at an event the query doesn't have
    InvalidEventIndex { property: String, index: usize, events: usize },
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
    NotEnoughFunnelSteps { found: usize },
    UnsupportedQueryType(QueryType),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NoEvents => write!(f, "Query must have at least one event"),
            BuildError::MissingEventLabel { index } => {
                write!(f, "Event {} has no label", index + 1)
            }
            BuildError::MissingProperty { context } => {
                write!(f, "Missing property name in {}", context)
            }
            BuildError::UnknownProperty { name, category } => {
                write!(f, "Unknown {} property '{}'", category, name)
            }
            BuildError::DatatypeMismatch { name, expected, found } => {
                write!(f, "Property '{}' is {}, not {}", name, expected, found)
            }
            BuildError::UnknownOperator { operator } => {
                write!(f, "Unknown operator '{}'", operator)
            }
            BuildError::OperatorNotAllowed { operator, datatype } => {
                write!(f, "Operator '{}' is not valid for {} properties", operator, datatype)
            }
            BuildError::InvalidValue { property, reason } => {
                write!(f, "Invalid value for '{}': {}", property, reason)
            }
            BuildError::InvalidEventIndex { property, index, events } => {
                write!(
                    f,
                    "Breakdown '{}' refers to event {} but the query has {} events",
                    property,
                    index + 1,
                    events
                )
            }
            BuildError::InvalidDateRange { from, to } => {
                write!(f, "Date range starts after it ends: {} > {}", from, to)
            }
            BuildError::NotEnoughFunnelSteps { found } => {
                write!(f, "Funnel needs at least 2 events, got {}", found)
            }
            BuildError::UnsupportedQueryType(query_type) => {
                write!(f, "Cannot build '{}' queries", query_type)
            }
        }
    }
}

impl std::error::Error for BuildError {}
