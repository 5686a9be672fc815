//! Response normalizer (verb module)
//!
//! Transforms a [`TabularResult`](crate::TabularResult) into what charts
//! and tables consume:
//! - `series` - ordered, colored series records and legend entries
//! - `table` - breakdown table rows
//! - `area` - stacked area series from a time-series result

mod area;
mod layout;
mod series;
mod table;

pub use area::{format_stacked_area, AreaSeries, StackedAreaData};
pub use series::{format_visible_properties, normalize, SeriesRecord};
pub use table::{column_key, format_breakdown_table, TableRow};
