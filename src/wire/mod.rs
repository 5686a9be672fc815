//! Backend wire types (nouns)
//!
//! - `query` - the JSON query payload with abbreviated field names
//! - `result` - tabular results and result groups

mod query;
mod result;

pub use query::{DateTimeValue, QueryPayload, WireEvent, WireFilter, WireGroupBy, WireQuery};
pub use result::{
    cell_number, cell_text, HeaderRows, ResultGroup, TabularResult, COLUMN_AGGREGATE, COLUMN_COUNT,
    COLUMN_DATETIME, COLUMN_ERROR, COLUMN_EVENT_INDEX, COLUMN_EVENT_NAME,
};
