//! Config parser (verb module)
//!
//! Transforms YAML files into [`QueryConfig`].

use std::path::Path;
use crate::config::QueryConfig;
use crate::error::ParseError;

/// Parse a config from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<QueryConfig, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a config from a YAML string
///
/// Missing keys fall back to [`QueryConfig::default`].
pub fn parse_str(yaml: &str) -> Result<QueryConfig, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingPolicy;
    use crate::descriptor::{DataType, Frequency};
    use chrono::Weekday;

    #[test]
    fn test_parse_analytics_config() {
        let config = parse_file("tests/test_data/analytics.yaml").unwrap();

        assert_eq!(config.timezone, "Asia/Kolkata");
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.default_frequency, Frequency::Date);
        assert_eq!(config.rounding, RoundingPolicy::TwoDecimals);
        assert_eq!(config.palette.len(), 3);

        // Vocabulary overrides replace the whole table for that datatype
        let op = config.operators.operator("is", DataType::Categorical).unwrap();
        assert_eq!(op.wire_name(), "equals");
        assert!(config.operators.operator("contains", DataType::Categorical).is_none());

        // Untouched tables keep their defaults
        assert!(config.operators.operator(">", DataType::Numerical).is_some());
    }

    #[test]
    fn test_parse_empty_mapping_gives_defaults() {
        let config = parse_str("{}").unwrap();
        assert_eq!(config, QueryConfig::default());
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.global_breakdown_event, "$present");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("timezone: [valid: yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("tests/test_data/does_not_exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does_not_exist.yaml"));
    }
}
