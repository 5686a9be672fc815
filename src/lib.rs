//! wirequery - Compile analytics query descriptors to wire queries and shape their results
//!
//! This library provides:
//! - Query descriptor types (events, filters, breakdowns, date range)
//! - Configuration parsing from YAML (operators, palette, timezone)
//! - Query building (descriptor → wire query JSON)
//! - Query restoring (wire query → descriptor)
//! - Response normalization (tabular result → ordered, colored series)
//! - Derived metrics (frequency, active users)
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `descriptor/` - what the user selected (QueryDescriptor, Filter, Breakdown)
//! - `config/` - settings and operator vocabulary (QueryConfig)
//! - `wire/` - the wire query and result shapes (WireQuery, TabularResult)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → QueryConfig
//! - `builder/` - QueryDescriptor → QueryPayload
//! - `restore/` - WireQuery → QueryDescriptor
//! - `normalizer/` - TabularResult → SeriesRecord, TableRow, StackedAreaData
//! - `metrics/` - TabularResult × TabularResult → TabularResult
//!
//! # Example
//!
//! ```ignore
//! use wirequery::{parser, build_query, normalize, EventSelection, QueryDescriptor, QueryType};
//!
//! let config = parser::parse_file("analytics.yaml")?;
//! let descriptor = QueryDescriptor::new(QueryType::Events)
//!     .with_event(EventSelection::new("page_view"));
//! let payload = build_query(&descriptor, &config)?;
//! let body = payload.to_request_body()?;
//! // ... send `body`, receive a TabularResult ...
//! let records = normalize(&result, &descriptor.event_labels(), &config.palette, &names);
//! ```

pub mod descriptor;
pub mod config;
pub mod wire;
pub mod parser;
pub mod builder;
pub mod restore;
pub mod normalizer;
pub mod metrics;
pub mod error;

// Re-export commonly used types
pub use descriptor::{
    Breakdown, BreakdownEntry, BreakdownType, CountType, DataType, DateRange, EventSelection, Filter,
    FilterValue, Frequency, PropertyCatalog, PropertyCategory, PropertyRef, QueryDescriptor, QueryType, Scalar,
};
pub use config::{OperatorVocabulary, QueryConfig, RoundingPolicy};
pub use wire::{QueryPayload, ResultGroup, TabularResult, WireFilter, WireGroupBy, WireQuery};
pub use builder::{build_query, BuildError, QueryBuilder};
pub use restore::{restore_descriptor, RestoreError};
pub use normalizer::{
    format_breakdown_table, format_stacked_area, format_visible_properties, normalize, SeriesRecord,
    StackedAreaData, TableRow,
};
pub use metrics::{calculate_active_users_data, calculate_frequency_data};
pub use error::{ParseError, ResponseError};
