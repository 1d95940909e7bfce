// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key result and objective progress.
//!
//! Progress is a percentage in `[0, 100]`. Key result progress is a float;
//! objective progress is the rounded mean of its key results.

use crate::types::{KeyResult, MetricType, Objective};

/// Computes the progress percentage of a single key result.
///
/// Boolean key results are all-or-nothing. Every other metric type is a
/// linear interpolation from `start_value` to `target_value`, clamped to
/// `[0, 100]`, so decreasing targets (e.g. "reduce churn from 8 to 4")
/// work without special casing.
///
/// When `target_value == start_value` there is no span to interpolate
/// over: the key result is complete once `current_value` reaches the
/// target.
///
/// # Arguments
///
/// * `key_result` - The key result to evaluate
///
/// # Returns
///
/// A value in `[0, 100]`. Non-finite inputs yield `0`.
#[must_use]
pub fn key_result_progress(key_result: &KeyResult) -> f64 {
    let start: f64 = key_result.start_value;
    let target: f64 = key_result.target_value;
    let current: f64 = key_result.current_value;

    if key_result.metric_type == MetricType::Boolean {
        return if (current - target).abs() < f64::EPSILON {
            100.0
        } else {
            0.0
        };
    }

    let span: f64 = target - start;
    if span.abs() < f64::EPSILON {
        return if current >= target { 100.0 } else { 0.0 };
    }

    let raw: f64 = 100.0 * (current - start) / span;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

/// Computes the aggregate progress of a set of key results.
///
/// Unweighted arithmetic mean, rounded to the nearest integer. An empty
/// set has progress `0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn objective_progress(key_results: &[KeyResult]) -> u8 {
    if key_results.is_empty() {
        return 0;
    }

    let total: f64 = key_results.iter().map(key_result_progress).sum();
    let mean: f64 = total / key_results.len() as f64;

    // Each term is clamped to [0, 100], so the mean is too.
    mean.round().clamp(0.0, 100.0) as u8
}

impl Objective {
    /// Computes the aggregate progress of this objective's key results.
    #[must_use]
    pub fn computed_progress(&self) -> u8 {
        objective_progress(&self.key_results)
    }
}
