//! Vocabulary types shared by descriptors and wire queries

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Property data types known to the analytics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    /// String-valued property
    Categorical,
    /// Number-valued property
    Numerical,
    /// Timestamp-valued property
    DateTime,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Categorical, DataType::Numerical, DataType::DateTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Categorical => "categorical",
            DataType::Numerical => "numerical",
            DataType::DateTime => "datetime",
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Categorical
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing one of the vocabulary tokens
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTokenError {
    pub kind: &'static str,
    pub input: String,
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {} '{}'", self.kind, self.input)
    }
}

impl std::error::Error for ParseTokenError {}

impl FromStr for DataType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "categorical" | "string" => Ok(DataType::Categorical),
            "numerical" | "number" => Ok(DataType::Numerical),
            "datetime" | "date" | "timestamp" => Ok(DataType::DateTime),
            _ => Err(ParseTokenError {
                kind: "data type",
                input: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DataType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Property category
// ============================================================================

/// Whether a property is recorded on the event or on the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Event,
    User,
}

impl PropertyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Event => "event",
            PropertyCategory::User => "user",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyCategory {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(PropertyCategory::Event),
            // user_g is the backend's global user property entity
            "user" | "user_g" => Ok(PropertyCategory::User),
            _ => Err(ParseTokenError {
                kind: "property category",
                input: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Query class and count type
// ============================================================================

/// Analysis mode of a query composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Events,
    Funnel,
    Attribution,
    Kpi,
}

impl QueryType {
    /// Wire `cl` token
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Events => "events",
            QueryType::Funnel => "funnel",
            QueryType::Attribution => "attribution",
            QueryType::Kpi => "kpi",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // insights is the legacy name of the events class
            "events" | "insights" => Ok(QueryType::Events),
            "funnel" => Ok(QueryType::Funnel),
            "attribution" => Ok(QueryType::Attribution),
            "kpi" => Ok(QueryType::Kpi),
            _ => Err(ParseTokenError {
                kind: "query class",
                input: s.to_string(),
            }),
        }
    }
}

/// What an events query counts (`ty`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountType {
    EventsOccurrence,
    UniqueUsers,
}

impl CountType {
    /// Map the composer's result tab to a count type
    ///
    /// Tab `"1"` is the unique-users tab, every other tab counts occurrences.
    pub fn from_active_tab(tab: &str) -> Self {
        if tab == "1" {
            CountType::UniqueUsers
        } else {
            CountType::EventsOccurrence
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CountType::EventsOccurrence => "events_occurrence",
            CountType::UniqueUsers => "unique_users",
        }
    }
}

impl Default for CountType {
    fn default() -> Self {
        CountType::EventsOccurrence
    }
}

impl FromStr for CountType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events_occurrence" => Ok(CountType::EventsOccurrence),
            "unique_users" => Ok(CountType::UniqueUsers),
            _ => Err(ParseTokenError {
                kind: "count type",
                input: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Combination policy
// ============================================================================

/// How multiple events of a query are combined (`ec`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownType {
    /// One series per event
    Each,
    /// Users who did any of the events
    Any,
    /// Users who did all of the events
    All,
}

impl BreakdownType {
    pub fn wire_token(&self) -> &'static str {
        match self {
            BreakdownType::Each => "each_given_event",
            BreakdownType::Any => "any_given_event",
            BreakdownType::All => "all_given_event",
        }
    }

    pub fn from_wire_token(token: &str) -> Result<Self, ParseTokenError> {
        match token {
            "each_given_event" => Ok(BreakdownType::Each),
            "any_given_event" => Ok(BreakdownType::Any),
            "all_given_event" => Ok(BreakdownType::All),
            _ => Err(ParseTokenError {
                kind: "event combination",
                input: token.to_string(),
            }),
        }
    }
}

impl Default for BreakdownType {
    fn default() -> Self {
        BreakdownType::Each
    }
}

// ============================================================================
// Time granularity
// ============================================================================

/// Time-series granularity (`gbt`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hour,
    Date,
    Week,
    Month,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Hour => "hour",
            Frequency::Date => "date",
            Frequency::Week => "week",
            Frequency::Month => "month",
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Date
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Frequency::Hour),
            "date" | "day" => Ok(Frequency::Date),
            "week" => Ok(Frequency::Week),
            "month" => Ok(Frequency::Month),
            _ => Err(ParseTokenError {
                kind: "frequency",
                input: s.to_string(),
            }),
        }
    }
}
