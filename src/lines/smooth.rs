// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Iterative mesh-line smoothing
//!
//! The working set is refined one gap at a time: the smallest gap that is
//! still wider than the maximum resolution is filled first, so the fine
//! spacing of its neighbors propagates outward into the coarser gaps that
//! are handled later.

use super::dedup::{merge, unique};
use super::range::smooth_range;
use super::symmetry::{classify_symmetry, Symmetry};
use crate::config::SmoothingConfig;
use crate::error::{MeshLineError, Result};
use crate::utils::math::diff;
use serde::{Deserialize, Serialize};

/// Smoothed lines together with how they were obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothOutcome {
    pub lines: Vec<f64>,
    /// Symmetry that was exploited, `None` if smoothing ran on the full set
    pub symmetry: Symmetry,
    /// Number of gaps that were filled
    pub iterations: usize,
    /// `false` when refinement stopped without reaching the resolution
    pub converged: bool,
}

/// Smooth `lines` so no gap exceeds `config.max_resolution`.
pub fn smooth_mesh_lines(lines: &[f64], config: &SmoothingConfig) -> Result<Vec<f64>> {
    Ok(smooth_mesh_lines_with_outcome(lines, config)?.lines)
}

/// Same as [`smooth_mesh_lines`], also reporting symmetry use and convergence.
///
/// Fewer than two distinct input lines are returned deduplicated and
/// otherwise untouched.
pub fn smooth_mesh_lines_with_outcome(
    lines: &[f64],
    config: &SmoothingConfig,
) -> Result<SmoothOutcome> {
    config.validate()?;
    if let Some((index, &value)) = lines.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(MeshLineError::NonFiniteLine { index, value });
    }

    let lines = unique(lines, config.dedup);
    if lines.len() < 2 {
        return Ok(SmoothOutcome {
            lines,
            symmetry: Symmetry::None,
            iterations: 0,
            converged: true,
        });
    }

    let symmetry = if config.exploit_symmetry {
        classify_symmetry(&lines, config.symmetry_tolerance)
    } else {
        Symmetry::None
    };

    let n = lines.len();
    let first = lines[0];
    let last = lines[n - 1];
    let center = 0.5 * (first + last);

    let working = match symmetry {
        Symmetry::None => lines,
        Symmetry::OddCentered => lines[..=n / 2].to_vec(),
        Symmetry::EvenCentered => even_half(&lines[..n / 2], center, config),
    };
    log::debug!(
        "smoothing {} lines ({}), max_res {}, ratio {}",
        n,
        symmetry.as_str(),
        config.max_resolution,
        config.ratio
    );

    let Refinement {
        lines: working,
        iterations,
        mut converged,
    } = refine(working, config)?;

    let lines = match symmetry {
        Symmetry::None => working,
        Symmetry::OddCentered | Symmetry::EvenCentered => {
            let snap = (last - first) * config.symmetry_tolerance;
            mirror(&working, center, snap, config)
        }
    };

    let max_gap = diff(&lines).into_iter().fold(0.0, f64::max);
    if config.exceeds_resolution(max_gap) {
        converged = false;
    }

    Ok(SmoothOutcome {
        lines,
        symmetry,
        iterations,
        converged,
    })
}

struct Refinement {
    lines: Vec<f64>,
    iterations: usize,
    converged: bool,
}

/// Fill violating gaps, smallest first, until none is left or no progress is made.
fn refine(mut lines: Vec<f64>, config: &SmoothingConfig) -> Result<Refinement> {
    let max_res = config.max_resolution;
    let mut iterations = 0;

    loop {
        let gaps = diff(&lines);
        let Some(idx) = next_gap(&gaps, config) else {
            return Ok(Refinement {
                lines,
                iterations,
                converged: true,
            });
        };

        let start_res = if idx > 0 { gaps[idx - 1] } else { max_res };
        let stop_res = gaps.get(idx + 1).copied().unwrap_or(max_res);

        let (start, stop) = (lines[idx], lines[idx + 1]);
        let fill = smooth_range(start, stop, start_res, stop_res, config)?;
        let before = lines.len();
        lines = merge(&lines, &fill, config.dedup);
        iterations += 1;

        log::debug!(
            "iteration {}: gap {} [{}, {}] -> {} lines",
            iterations,
            idx,
            start,
            stop,
            lines.len()
        );

        if lines.len() == before {
            log::warn!(
                "smoothing stalled after {} iterations with {} lines; returning best effort",
                iterations,
                lines.len()
            );
            return Ok(Refinement {
                lines,
                iterations,
                converged: false,
            });
        }
    }
}

/// Index of the smallest gap wider than the resolution, first one on ties
fn next_gap(gaps: &[f64], config: &SmoothingConfig) -> Option<usize> {
    gaps.iter()
        .enumerate()
        .filter(|&(_, &g)| config.exceeds_resolution(g))
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(idx, _)| idx)
}

/// Lower half of an even-centered set, ready for refinement.
///
/// Mirroring doubles the distance from the last line to the center into a
/// single central cell. When that cell would exceed the resolution the
/// center becomes a line of its own, so the gap up to it is refined like
/// any other and its mirror image has the same cells.
fn even_half(half: &[f64], center: f64, config: &SmoothingConfig) -> Vec<f64> {
    let mut half = half.to_vec();
    if let Some(&last) = half.last() {
        if config.exceeds_resolution(2.0 * center - last - last) {
            half.push(center);
        }
    }
    half
}

/// Rebuild the full set from its lower half by reflection about `center`.
///
/// Lines within `snap` of the center are moved onto it first so the
/// reflection cannot produce a near-duplicate pair around the center.
fn mirror(half: &[f64], center: f64, snap: f64, config: &SmoothingConfig) -> Vec<f64> {
    let lower: Vec<f64> = half
        .iter()
        .map(|&x| if (x - center).abs() <= snap { center } else { x })
        .filter(|&x| x <= center)
        .collect();

    let mut full = Vec::with_capacity(lower.len() * 2);
    full.extend_from_slice(&lower);
    full.extend(lower.iter().rev().map(|&x| 2.0 * center - x));
    unique(&full, config.dedup)
}
