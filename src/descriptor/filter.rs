//! Filter types

use serde::{Deserialize, Deserializer, Serialize};
use super::types::{DataType, PropertyCategory};

/// Reference to an event or user property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub name: String,
    pub category: PropertyCategory,
    pub datatype: DataType,
}

impl PropertyRef {
    pub fn new(name: impl Into<String>, category: PropertyCategory, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            category,
            datatype,
        }
    }
}

/// A single filter value in its string form
///
/// The wire format carries every value as a string, so numbers and
/// booleans coming from the composer are stored as their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Scalar(pub String);

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar(s)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Scalar(s)),
            serde_json::Value::Number(n) => Ok(Scalar(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Scalar(b.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "filter value must be a string, number or boolean, got {}",
                other
            ))),
        }
    }
}

/// Value set of a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Datetime window in Unix seconds
    Range {
        from: i64,
        to: i64,
        /// Slide the window so it ends now, keeping its length
        #[serde(default, rename = "overridePeriod")]
        override_period: bool,
    },
    /// Several values, OR'd together
    List(Vec<Scalar>),
    /// One value
    Single(Scalar),
}

impl FilterValue {
    pub fn single(value: impl Into<Scalar>) -> Self {
        FilterValue::Single(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn range(from: i64, to: i64) -> Self {
        FilterValue::Range {
            from,
            to,
            override_period: false,
        }
    }

    /// Scalar values of a single or list value (empty for ranges)
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            FilterValue::Single(v) => std::slice::from_ref(v),
            FilterValue::List(vs) => vs,
            FilterValue::Range { .. } => &[],
        }
    }
}

/// Filter on a property of an event selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub property: PropertyRef,
    /// Human operator token, e.g. `=`, `not contains`, `between`
    pub operator: String,
    pub values: FilterValue,
}

impl Filter {
    pub fn new(property: PropertyRef, operator: impl Into<String>, values: FilterValue) -> Self {
        Self {
            property,
            operator: operator.into(),
            values,
        }
    }
}
