//! Shared test utilities for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use wirequery::{parser, QueryConfig, QueryDescriptor, TabularResult};

fn fixture_path(name: &str) -> String {
    format!("tests/test_data/{}", name)
}

/// Load a configuration fixture from the tests/test_data directory
pub fn load_config(name: &str) -> QueryConfig {
    parser::parse_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Load a JSON fixture from the tests/test_data directory
pub fn load_json<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = fixture_path(name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

pub fn load_descriptor(name: &str) -> QueryDescriptor {
    load_json(name)
}

pub fn load_result(name: &str) -> TabularResult {
    load_json(name)
}

/// A fixed clock for builder tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
