// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{KeyResult, MetricType, Objective};
use std::collections::HashSet;

/// Validates an objective title.
///
/// # Errors
///
/// Returns an error if the title is empty or whitespace only.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    Ok(())
}

/// Validates an objective period label.
///
/// # Errors
///
/// Returns an error if the period is empty or whitespace only.
pub fn validate_period(period: &str) -> Result<(), DomainError> {
    if period.trim().is_empty() {
        return Err(DomainError::InvalidPeriod(String::from(
            "Period cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a key result definition and returns its normalized form.
///
/// Boolean key results are forced to `start = 0`, `target = 1` with no
/// unit, and their current value must be `0` or `1`. Units on other
/// metric types are trimmed; a blank unit becomes `None`.
///
/// # Arguments
///
/// * `key_result` - The key result to validate
///
/// # Returns
///
/// * `Ok(KeyResult)` the normalized key result
/// * `Err(DomainError)` if the definition is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The description is empty
/// - Any value is not finite
/// - A boolean key result has a current value other than `0` or `1`
pub fn validate_key_result(key_result: &KeyResult) -> Result<KeyResult, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidKeyResult {
        key_result_id: key_result.id.clone(),
        reason: reason.to_string(),
    };

    if key_result.description.trim().is_empty() {
        return Err(invalid("description cannot be empty"));
    }

    let values: [f64; 3] = [
        key_result.start_value,
        key_result.target_value,
        key_result.current_value,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid("values must be finite numbers"));
    }

    let mut normalized: KeyResult = key_result.clone();
    if key_result.metric_type == MetricType::Boolean {
        normalized.start_value = 0.0;
        normalized.target_value = 1.0;
        normalized.current_value =
            validate_key_result_value(&normalized, key_result.current_value)?;
        normalized.unit = None;
    } else {
        normalized.unit = key_result
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(str::to_string);
    }

    Ok(normalized)
}

/// Validates a reported current value for a key result.
///
/// # Errors
///
/// Returns an error if the value is not finite, or if the key result is
/// boolean and the value is neither `0` nor `1`.
pub fn validate_key_result_value(key_result: &KeyResult, value: f64) -> Result<f64, DomainError> {
    let rejected = || DomainError::InvalidKeyResultValue {
        key_result_id: key_result.id.clone(),
        metric_type: key_result.metric_type,
        value: value.to_string(),
    };

    if !value.is_finite() {
        return Err(rejected());
    }

    if key_result.metric_type == MetricType::Boolean {
        if value.abs() < f64::EPSILON {
            return Ok(0.0);
        }
        if (value - 1.0).abs() < f64::EPSILON {
            return Ok(1.0);
        }
        return Err(rejected());
    }

    Ok(value)
}

/// Validates the editable fields of an objective and normalizes its key results.
///
/// This function does NOT check the hierarchy (that requires the index).
///
/// # Errors
///
/// Returns an error if:
/// - The title or period is empty
/// - Any key result is invalid
/// - A key result belongs to a different objective
/// - Two key results share an id
pub fn validate_objective_fields(objective: &Objective) -> Result<Objective, DomainError> {
    validate_title(&objective.title)?;
    validate_period(&objective.period)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut key_results: Vec<KeyResult> = Vec::with_capacity(objective.key_results.len());
    for key_result in &objective.key_results {
        if key_result.objective_id != objective.id {
            return Err(DomainError::InvalidKeyResult {
                key_result_id: key_result.id.clone(),
                reason: format!("belongs to objective '{}'", key_result.objective_id),
            });
        }
        if !seen.insert(key_result.id.as_str()) {
            return Err(DomainError::InvalidKeyResult {
                key_result_id: key_result.id.clone(),
                reason: String::from("duplicate key result id"),
            });
        }
        key_results.push(validate_key_result(key_result)?);
    }

    let mut normalized: Objective = objective.clone();
    normalized.title = objective.title.trim().to_string();
    normalized.period = objective.period.trim().to_string();
    normalized.key_results = key_results;
    Ok(normalized)
}
