// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Linear interpolation
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `cells + 1` equally spaced values from `start` to `stop`, both included exactly
pub fn linspace(start: f64, stop: f64, cells: usize) -> Vec<f64> {
    if cells == 0 {
        return vec![start];
    }

    let mut values: Vec<f64> = (0..=cells)
        .map(|n| lerp(start, stop, n as f64 / cells as f64))
        .collect();
    values[cells] = stop;
    values
}

/// Differences between consecutive values
pub fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
