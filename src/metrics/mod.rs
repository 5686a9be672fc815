//! Derived metric calculators (verb module)
//!
//! Combine two results of the same query shape into ratio results.
//! Divide-by-zero and unmatched rows give 0; rounding follows
//! [`RoundingPolicy`](crate::RoundingPolicy).

mod derive;
mod rounding;

pub use derive::{
    calculate_active_users_data, calculate_frequency_data, calculate_frequency_data_for_breakdown,
    calculate_frequency_data_for_no_breakdown,
};
pub use rounding::{ratio, round_value};
