// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric grading sequences
//!
//! All functions here work in offsets from the anchor line of a gap, so the
//! same series serves a taper growing to the right from `start` and one
//! growing to the left from `stop`.

/// Geometric run that grows a cell size from a boundary resolution up to the
/// maximum resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideTaper {
    /// Number of cells in the run
    pub steps: usize,
    /// Growth factor, at most the policy ratio, chosen so the last cell is
    /// exactly the maximum resolution
    pub ratio: f64,
    /// Distance covered by the run
    pub length: f64,
}

impl SideTaper {
    /// Smallest run growing from `start_res` to `max_res` with factor at most `ratio`.
    pub fn plan(start_res: f64, ratio: f64, max_res: f64) -> Self {
        let mut res = start_res;
        let mut steps = 0;
        while res < max_res {
            res *= ratio;
            steps += 1;
        }

        if steps == 0 {
            return Self {
                steps,
                ratio: 1.0,
                length: 0.0,
            };
        }

        let ratio = adjusted_ratio(start_res, max_res, steps);
        let length = geometric_offsets(start_res, ratio, steps)[steps];
        Self {
            steps,
            ratio,
            length,
        }
    }

    /// Offsets `0, c1, c1 + c2, ...` of the run's cell boundaries
    pub fn offsets(&self, start_res: f64) -> Vec<f64> {
        geometric_offsets(start_res, self.ratio, self.steps)
    }
}

/// Growth factor that turns `start_res` into `max_res` in exactly `steps` cells.
pub fn adjusted_ratio(start_res: f64, max_res: f64, steps: usize) -> f64 {
    ((max_res.ln() - start_res.ln()) / steps as f64).exp()
}

/// Cumulative offsets of `steps` cells sized `start_res * ratio^k`, `k = 1..=steps`.
pub fn geometric_offsets(start_res: f64, ratio: f64, steps: usize) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(steps + 1);
    offsets.push(0.0);
    let mut res = start_res;
    let mut pos = 0.0;
    for _ in 0..steps {
        res *= ratio;
        pos += res;
        offsets.push(pos);
    }
    offsets
}

/// Multiply every offset so the last one equals `target`.
pub(crate) fn rescale(offsets: &mut [f64], target: f64) {
    if let Some(&last) = offsets.last() {
        if last > 0.0 {
            let scale = target / last;
            offsets.iter_mut().for_each(|o| *o *= scale);
        }
    }
}

/// Graded offsets from 0 to `rng`, starting with cells of about `start_res`
/// and growing by at most `ratio` until `max_res` is reached.
///
/// When the range ends before the cells reach `max_res`, the plain
/// geometric run is compressed onto the range. Otherwise the run is
/// re-planned with an adjusted factor that lands exactly on `max_res`,
/// padded with `max_res` cells and compressed onto the range.
pub fn one_side_taper(start_res: f64, ratio: f64, max_res: f64, rng: f64) -> Vec<f64> {
    let mut res = start_res;
    let mut pos = 0.0;
    let mut steps = 0;
    while res < max_res && pos < rng {
        res *= ratio;
        pos += res;
        steps += 1;
    }

    if pos > rng {
        let mut offsets = geometric_offsets(start_res, ratio, steps);
        rescale(&mut offsets, rng);
        return offsets;
    }

    let mut offsets = if steps == 0 {
        vec![0.0]
    } else {
        geometric_offsets(start_res, adjusted_ratio(start_res, max_res, steps), steps)
    };

    let mut pos = offsets[offsets.len() - 1];
    while pos < rng {
        pos += max_res;
        offsets.push(pos);
    }

    rescale(&mut offsets, rng);
    offsets
}
