//! Combine two results into a ratio result

use serde_json::Value;
use super::rounding::{ratio, round_value};
use crate::config::RoundingPolicy;
use crate::descriptor::Breakdown;
use crate::wire::{cell_number, HeaderRows, TabularResult};

/// How the two inputs combine
#[derive(Debug, Clone, Copy)]
struct Derivation {
    scale: f64,
    rounding: RoundingPolicy,
    /// The result whose shape is kept is the numerator (otherwise the denominator)
    primary_is_numerator: bool,
}

impl Derivation {
    fn value(&self, primary: Option<&Value>, other: Option<&Value>) -> Value {
        let p = primary.and_then(cell_number);
        let o = other.and_then(cell_number);
        let (numerator, denominator) = if self.primary_is_numerator { (p, o) } else { (o, p) };
        round_value(ratio(numerator, denominator, self.scale), self.rounding)
    }
}

/// Average events per user: event counts / user counts
///
/// The output keeps the layout of `user_result`.
pub fn calculate_frequency_data(
    event_result: &TabularResult,
    user_result: &TabularResult,
    breakdown: &Breakdown,
    rounding: RoundingPolicy,
) -> TabularResult {
    let derivation = Derivation {
        scale: 1.0,
        rounding,
        primary_is_numerator: false,
    };
    derive(user_result, event_result, !breakdown.is_empty(), derivation)
}

/// Active users as a percentage: user counts / session counts × 100
///
/// The output keeps the layout of `user_result`.
pub fn calculate_active_users_data(
    user_result: &TabularResult,
    session_result: &TabularResult,
    breakdown: &Breakdown,
    rounding: RoundingPolicy,
) -> TabularResult {
    let derivation = Derivation {
        scale: 100.0,
        rounding,
        primary_is_numerator: true,
    };
    derive(user_result, session_result, !breakdown.is_empty(), derivation)
}

/// Frequency without breakdown: rows align by position
pub fn calculate_frequency_data_for_no_breakdown(
    event_result: &TabularResult,
    user_result: &TabularResult,
    rounding: RoundingPolicy,
) -> TabularResult {
    calculate_frequency_data(event_result, user_result, &Breakdown::default(), rounding)
}

/// Frequency with breakdown: rows align by breakdown tuple
pub fn calculate_frequency_data_for_breakdown(
    event_result: &TabularResult,
    user_result: &TabularResult,
    rounding: RoundingPolicy,
) -> TabularResult {
    let derivation = Derivation {
        scale: 1.0,
        rounding,
        primary_is_numerator: false,
    };
    derive(user_result, event_result, true, derivation)
}

fn derive(primary: &TabularResult, other: &TabularResult, by_key: bool, derivation: Derivation) -> TabularResult {
    let rows = if by_key {
        derive_by_key(&primary.rows, &other.rows, derivation)
    } else {
        derive_by_position(&primary.rows, &other.rows, derivation)
    };

    let metrics = primary.metrics.as_ref().map(|metrics| {
        let other_rows = other.metrics.as_ref().map(|m| m.rows.as_slice()).unwrap_or(&[]);
        let rows = if by_key {
            derive_by_key(&metrics.rows, other_rows, derivation)
        } else {
            derive_by_first_column(&metrics.rows, other_rows, derivation)
        };
        HeaderRows {
            headers: metrics.headers.clone(),
            rows,
        }
    });

    TabularResult {
        rows,
        metrics,
        ..primary.clone()
    }
}

/// Row i pairs with row i; column 0 is the key, every other column is divided
fn derive_by_position(primary: &[Vec<Value>], other: &[Vec<Value>], derivation: Derivation) -> Vec<Vec<Value>> {
    primary
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let matched = other.get(i);
            row.iter()
                .enumerate()
                .map(|(j, cell)| {
                    if j == 0 {
                        cell.clone()
                    } else {
                        derivation.value(Some(cell), matched.and_then(|m| m.get(j)))
                    }
                })
                .collect()
        })
        .collect()
}

/// Rows pair on equal column 0; the last column is divided
fn derive_by_first_column(primary: &[Vec<Value>], other: &[Vec<Value>], derivation: Derivation) -> Vec<Vec<Value>> {
    primary
        .iter()
        .map(|row| {
            let matched = row
                .first()
                .and_then(|key| other.iter().find(|o| o.first() == Some(key)));
            derive_last_column(row, matched, derivation)
        })
        .collect()
}

/// Rows pair when every column but the last is equal; the last column is divided
fn derive_by_key(primary: &[Vec<Value>], other: &[Vec<Value>], derivation: Derivation) -> Vec<Vec<Value>> {
    primary
        .iter()
        .map(|row| {
            let matched = row.split_last().and_then(|(_, key)| {
                other
                    .iter()
                    .find(|o| o.split_last().is_some_and(|(_, other_key)| other_key == key))
            });
            derive_last_column(row, matched, derivation)
        })
        .collect()
}

fn derive_last_column(row: &[Value], matched: Option<&Vec<Value>>, derivation: Derivation) -> Vec<Value> {
    let Some((last, key)) = row.split_last() else {
        return Vec::new();
    };
    let mut derived = key.to_vec();
    derived.push(derivation.value(Some(last), matched.and_then(|m| m.last())));
    derived
}
