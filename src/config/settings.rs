//! Query configuration

use chrono::Weekday;
use serde::Deserialize;
use super::vocabulary::OperatorVocabulary;
use crate::descriptor::Frequency;

/// Rounding applied to derived metric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Whole results stay integers, other results round to 2 decimals
    Mixed,
    /// Every result is a float rounded to 2 decimals
    TwoDecimals,
    /// No rounding
    Raw,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        RoundingPolicy::Mixed
    }
}

/// Series colors used when no palette is configured
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#4D7DB4", "#4CBCBD", "#EEAC4C", "#D4787D", "#9C5EC2",
    "#7FB36A", "#F5A623", "#5B8FF9", "#E86452", "#6DC8EC",
];

/// Values the builder and normalizer take as given
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Timezone token sent as `tz`
    pub timezone: String,
    pub operators: OperatorVocabulary,
    /// Time-series granularity when the date range names none
    pub default_frequency: Frequency,
    /// `grn` for datetime breakdowns without a granularity
    pub default_breakdown_granularity: String,
    /// `ena` for global breakdowns
    pub global_breakdown_event: String,
    /// First day of the default (current week) window
    pub week_start: Weekday,
    pub palette: Vec<String>,
    pub rounding: RoundingPolicy,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            operators: OperatorVocabulary::default(),
            default_frequency: Frequency::Date,
            default_breakdown_granularity: "day".to_string(),
            global_breakdown_event: "$present".to_string(),
            week_start: Weekday::Sun,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            rounding: RoundingPolicy::Mixed,
        }
    }
}

impl QueryConfig {
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }
}
