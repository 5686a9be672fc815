//! Query descriptor types (nouns)
//!
//! These types describe a query the way the composer holds it: selected
//! events, their filters, breakdowns and the date range.

mod catalog;
mod filter;
mod query;
mod types;

pub use catalog::PropertyCatalog;
pub use filter::{Filter, FilterValue, PropertyRef, Scalar};
pub use query::{Breakdown, BreakdownEntry, DateRange, EventSelection, QueryDescriptor};
pub use types::{BreakdownType, CountType, DataType, Frequency, ParseTokenError, PropertyCategory, QueryType};
