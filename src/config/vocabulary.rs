//! Operator vocabulary

use std::collections::BTreeMap;
use serde::Deserialize;
use crate::descriptor::DataType;

/// An operator checked against the datatype it is applied to
///
/// Only [`OperatorVocabulary::operator`] creates one, so holding an
/// `Operator` means the token was legal for its datatype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    datatype: DataType,
    token: String,
    wire: String,
}

impl Operator {
    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    /// Human token, e.g. `not contains`
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Backend name, e.g. `notContains`
    pub fn wire_name(&self) -> &str {
        &self.wire
    }
}

/// Human operator tokens mapped to backend operator names, per datatype
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OperatorVocabulary {
    pub categorical: BTreeMap<String, String>,
    pub numerical: BTreeMap<String, String>,
    pub datetime: BTreeMap<String, String>,
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(token, wire)| (token.to_string(), wire.to_string()))
        .collect()
}

impl Default for OperatorVocabulary {
    fn default() -> Self {
        Self {
            categorical: table(&[
                ("=", "equals"),
                ("!=", "notEqual"),
                ("contains", "contains"),
                ("not contains", "notContains"),
            ]),
            numerical: table(&[
                ("=", "equals"),
                ("!=", "notEqual"),
                ("<", "lesserThan"),
                ("<=", "lesserThanOrEqual"),
                (">", "greaterThan"),
                (">=", "greaterThanOrEqual"),
            ]),
            datetime: table(&[
                ("between", "between"),
                ("not between", "notInBetween"),
                ("before", "before"),
                ("since", "since"),
            ]),
        }
    }
}

impl OperatorVocabulary {
    pub fn for_datatype(&self, datatype: DataType) -> &BTreeMap<String, String> {
        match datatype {
            DataType::Categorical => &self.categorical,
            DataType::Numerical => &self.numerical,
            DataType::DateTime => &self.datetime,
        }
    }

    /// Resolve a human token for a datatype
    pub fn operator(&self, token: &str, datatype: DataType) -> Option<Operator> {
        self.for_datatype(datatype).get(token).map(|wire| Operator {
            datatype,
            token: token.to_string(),
            wire: wire.clone(),
        })
    }

    /// Datatypes whose vocabulary contains `token`
    pub fn datatypes_for(&self, token: &str) -> Vec<DataType> {
        DataType::ALL
            .into_iter()
            .filter(|dt| self.for_datatype(*dt).contains_key(token))
            .collect()
    }

    /// Inverse lookup: backend name back to an operator
    pub fn from_wire(&self, wire: &str, datatype: DataType) -> Option<Operator> {
        self.for_datatype(datatype)
            .iter()
            .find(|(_, w)| w.as_str() == wire)
            .map(|(token, w)| Operator {
                datatype,
                token: token.clone(),
                wire: w.clone(),
            })
    }
}
