//! Derived metric calculator tests

mod common;

use common::{load_config, load_json};
use serde::Deserialize;
use serde_json::json;
use wirequery::metrics::calculate_frequency_data_for_breakdown;
use wirequery::{
    calculate_active_users_data, calculate_frequency_data, Breakdown, BreakdownEntry, DataType, PropertyCategory,
    RoundingPolicy, TabularResult,
};

#[derive(Deserialize)]
struct Inputs {
    events: TabularResult,
    users: TabularResult,
    sessions: TabularResult,
}

fn country() -> Breakdown {
    Breakdown {
        event: vec![],
        global: vec![BreakdownEntry::global("$country", PropertyCategory::User, DataType::Categorical)],
    }
}

#[test]
fn test_frequency_by_country() {
    let inputs: Inputs = load_json("frequency_inputs.json");
    let rounding = load_config("analytics.yaml").rounding;
    assert_eq!(rounding, RoundingPolicy::TwoDecimals);

    let derived = calculate_frequency_data(&inputs.events, &inputs.users, &country(), rounding);
    assert_eq!(
        derived.rows,
        vec![
            vec![json!("page_view"), json!("US"), json!(3.5)],
            vec![json!("page_view"), json!("India"), json!(2.5)],
            vec![json!("signup"), json!("India"), json!(0.0)],
        ]
    );
    assert_eq!(
        derived.metrics.as_ref().map(|m| m.rows.clone()),
        Some(vec![vec![json!("page_view"), json!("India"), json!(2.5)]])
    );
    assert_eq!(
        derived,
        calculate_frequency_data_for_breakdown(&inputs.events, &inputs.users, rounding)
    );
}

#[test]
fn test_active_users_by_country() {
    let inputs: Inputs = load_json("frequency_inputs.json");
    let derived = calculate_active_users_data(&inputs.users, &inputs.sessions, &country(), RoundingPolicy::Mixed);

    assert_eq!(
        derived.rows,
        vec![
            vec![json!("page_view"), json!("US"), json!(66.67)],
            vec![json!("page_view"), json!("India"), json!(75)],
            vec![json!("signup"), json!("India"), json!(0)],
        ]
    );
    // Sessions carry no metrics table, so every metrics ratio is 0
    assert_eq!(
        derived.metrics.map(|m| m.rows),
        Some(vec![vec![json!("page_view"), json!("India"), json!(0)]])
    );
}

#[test]
fn test_raw_rounding_keeps_precision() {
    let events = TabularResult::new(
        vec!["datetime".to_string(), "count".to_string()],
        vec![vec![json!("2024-01-01"), json!(10)]],
    );
    let users = TabularResult::new(
        vec!["datetime".to_string(), "count".to_string()],
        vec![vec![json!("2024-01-01"), json!(3)]],
    );
    let derived = calculate_frequency_data(&events, &users, &Breakdown::default(), RoundingPolicy::Raw);
    assert_eq!(derived.rows[0][1], json!(10.0 / 3.0));
}
