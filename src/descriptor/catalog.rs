//! Known-property catalog used to validate descriptors

use std::collections::HashMap;
use serde::Deserialize;
use super::types::{DataType, PropertyCategory};

/// Properties a project has seen, by category
///
/// The composer loads these from the properties API; the builder uses them
/// to reject filters and breakdowns on unknown or mistyped properties.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyCatalog {
    #[serde(default)]
    pub event: HashMap<String, DataType>,
    #[serde(default)]
    pub user: HashMap<String, DataType>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, category: PropertyCategory, datatype: DataType) -> Self {
        self.properties_mut(category).insert(name.into(), datatype);
        self
    }

    /// Datatype of a known property
    pub fn datatype(&self, name: &str, category: PropertyCategory) -> Option<DataType> {
        self.properties(category).get(name).copied()
    }

    fn properties(&self, category: PropertyCategory) -> &HashMap<String, DataType> {
        match category {
            PropertyCategory::Event => &self.event,
            PropertyCategory::User => &self.user,
        }
    }

    fn properties_mut(&mut self, category: PropertyCategory) -> &mut HashMap<String, DataType> {
        match category {
            PropertyCategory::Event => &mut self.event,
            PropertyCategory::User => &mut self.user,
        }
    }
}
