//! Query builder (verb module)
//!
//! Transforms a [`QueryDescriptor`](crate::QueryDescriptor) into a
//! [`QueryPayload`](crate::QueryPayload):
//! - `window` - date range → `fr`/`to` and `gbt`
//! - `filters` - event filters → `ewp`
//! - `group_by` - breakdowns → `gbp`
//! - `build` - query-type branching and assembly

mod build;
mod error;
mod filters;
mod group_by;
mod window;

pub use build::{build_query, QueryBuilder};
pub use error::BuildError;
pub use filters::{build_events_with_properties, build_filter, resolve_operator};
pub use group_by::build_group_by;
pub use window::{resolve_frequency, time_window, TimeWindow};

pub(crate) use filters::{LOGICAL_AND, LOGICAL_OR};
