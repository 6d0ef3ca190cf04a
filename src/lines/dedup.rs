// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sorting and near-duplicate removal for line sets

use crate::config::DedupTolerance;
use crate::utils::math::{diff, mean};

/// Sort `lines` and collapse values closer than the tolerance threshold.
///
/// The earlier value of a close pair is kept. Every kept value is compared
/// against the previously kept one, so a chain of tiny steps collapses into
/// its first member.
pub fn unique(lines: &[f64], tolerance: DedupTolerance) -> Vec<f64> {
    let mut sorted = lines.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let Some(mean_spacing) = mean(&diff(&sorted)) else {
        return sorted;
    };
    let threshold = tolerance.threshold(mean_spacing);

    let mut out = Vec::with_capacity(sorted.len());
    out.push(sorted[0]);
    for &value in &sorted[1..] {
        let last = out[out.len() - 1];
        if value - last >= threshold {
            out.push(value);
        }
    }

    if out.len() < sorted.len() {
        log::debug!(
            "merged {} near-duplicate lines (threshold {:e})",
            sorted.len() - out.len(),
            threshold
        );
    }
    out
}

/// Merge `extra` into `lines` and deduplicate the union.
pub fn merge(lines: &[f64], extra: &[f64], tolerance: DedupTolerance) -> Vec<f64> {
    let mut all = Vec::with_capacity(lines.len() + extra.len());
    all.extend_from_slice(lines);
    all.extend_from_slice(extra);
    unique(&all, tolerance)
}
