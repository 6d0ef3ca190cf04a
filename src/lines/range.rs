// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Filling a single gap between two lines with graded cells

use super::dedup::unique;
use super::taper::{one_side_taper, rescale, SideTaper};
use crate::config::SmoothingConfig;
use crate::error::{MeshLineError, Result};
use crate::utils::math::linspace;
use serde::{Deserialize, Serialize};

/// How a gap gets filled, decided from its length and boundary resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaperCase {
    /// Gap is small next to both neighbors, no new lines
    Trivial,
    /// Both neighbors are coarse, equal subdivision
    Uniform,
    /// Fine cells at the start grow toward the stop
    TaperStart,
    /// Fine cells at the stop grow toward the start
    TaperStop,
    /// Fine cells on both sides
    TaperBoth,
}

impl TaperCase {
    /// Pick the case for a gap of length `rng`, checked in priority order.
    pub fn classify(rng: f64, start_res: f64, stop_res: f64, max_res: f64, ratio: f64) -> Self {
        if rng < max_res && rng < start_res * ratio && rng < stop_res * ratio {
            return TaperCase::Trivial;
        }

        let coarse = max_res / ratio;
        match (start_res >= coarse, stop_res >= coarse) {
            (true, true) => TaperCase::Uniform,
            (false, true) => TaperCase::TaperStart,
            (true, false) => TaperCase::TaperStop,
            (false, false) => TaperCase::TaperBoth,
        }
    }
}

/// Lines filling `[start, stop]`, endpoints included.
///
/// Cells grow from `start_res` at the left and `stop_res` at the right by
/// at most `config.ratio` per cell and are capped at
/// `config.max_resolution` wherever the gap is long enough to reach it.
pub fn smooth_range(
    start: f64,
    stop: f64,
    start_res: f64,
    stop_res: f64,
    config: &SmoothingConfig,
) -> Result<Vec<f64>> {
    config.validate()?;
    if !(start < stop) {
        return Err(MeshLineError::EmptyRange { start, stop });
    }
    for (name, res) in [("start_res", start_res), ("stop_res", stop_res)] {
        if !res.is_finite() || res <= 0.0 {
            return Err(MeshLineError::invalid_param(
                name,
                res,
                "must be finite and positive",
            ));
        }
    }

    let rng = stop - start;
    let max_res = config.max_resolution;
    let ratio = config.ratio;

    let case = TaperCase::classify(rng, start_res, stop_res, max_res, ratio);
    log::debug!(
        "filling [{}, {}] as {:?} (start_res {}, stop_res {})",
        start,
        stop,
        case,
        start_res,
        stop_res
    );

    let offsets = match case {
        TaperCase::Trivial => vec![0.0, rng],
        TaperCase::Uniform => uniform_offsets(rng, max_res),
        TaperCase::TaperStart => one_side_taper(start_res, ratio, max_res, rng),
        TaperCase::TaperStop => {
            mirror_offsets(&one_side_taper(stop_res, ratio, max_res, rng), rng)
        }
        TaperCase::TaperBoth => both_sides_offsets(rng, start_res, stop_res, max_res, ratio),
    };

    let mut lines: Vec<f64> = offsets
        .iter()
        .map(|o| start + o)
        .filter(|&x| x > start && x < stop)
        .collect();
    lines.push(start);
    lines.push(stop);

    let mut lines = unique(&lines, config.dedup);
    pin_endpoints(&mut lines, start, stop);
    Ok(lines)
}

fn pin_endpoints(lines: &mut [f64], start: f64, stop: f64) {
    if let Some(first) = lines.first_mut() {
        *first = start;
    }
    if let Some(last) = lines.last_mut() {
        *last = stop;
    }
}

/// `ceil(rng / max_res)` equal cells
fn uniform_offsets(rng: f64, max_res: f64) -> Vec<f64> {
    linspace(0.0, rng, cell_count(rng, max_res).max(1))
}

/// Cells of at most `max_res` needed to cover `length`, ignoring round-off
fn cell_count(length: f64, max_res: f64) -> usize {
    (length / max_res - SmoothingConfig::RESOLUTION_SLACK).ceil().max(0.0) as usize
}

/// Offsets measured from the far end, re-expressed from the near end
fn mirror_offsets(offsets: &[f64], rng: f64) -> Vec<f64> {
    offsets.iter().rev().map(|o| rng - o).collect()
}

fn both_sides_offsets(
    rng: f64,
    start_res: f64,
    stop_res: f64,
    max_res: f64,
    ratio: f64,
) -> Vec<f64> {
    let left = SideTaper::plan(start_res, ratio, max_res);
    let right = SideTaper::plan(stop_res, ratio, max_res);

    if left.length + right.length < rng {
        full_tapers_offsets(rng, start_res, stop_res, max_res, &left, &right)
    } else {
        meeting_fronts_offsets(rng, start_res, stop_res, ratio)
    }
}

/// Left run, `max_res` cells in the middle, right run, compressed onto the range
fn full_tapers_offsets(
    rng: f64,
    start_res: f64,
    stop_res: f64,
    max_res: f64,
    left: &SideTaper,
    right: &SideTaper,
) -> Vec<f64> {
    let mut offsets = left.offsets(start_res);
    let right_offsets = right.offsets(stop_res);

    let middle = rng - left.length - right.length;
    let cells = cell_count(middle, max_res);
    let mut pos = offsets[offsets.len() - 1];
    for _ in 0..cells {
        pos += max_res;
        offsets.push(pos);
    }

    let length = pos + right.length;
    offsets.extend(right_offsets.iter().map(|r| length - r));
    join_and_rescale(offsets, length, rng)
}

/// Grow from both ends until the fronts meet, always extending the side
/// whose current cell is smaller; equal cells grow together.
fn meeting_fronts_offsets(rng: f64, start_res: f64, stop_res: f64, ratio: f64) -> Vec<f64> {
    let mut left = vec![0.0];
    let mut right = vec![0.0];
    let mut left_res = start_res;
    let mut right_res = stop_res;

    while left[left.len() - 1] + right[right.len() - 1] < rng {
        let grow_left = left_res <= right_res;
        let grow_right = right_res <= left_res;
        if grow_left {
            left_res *= ratio;
            left.push(left[left.len() - 1] + left_res);
        }
        if grow_right {
            right_res *= ratio;
            right.push(right[right.len() - 1] + right_res);
        }
    }

    let length = left[left.len() - 1] + right[right.len() - 1];
    left.extend(right.iter().map(|r| length - r));
    join_and_rescale(left, length, rng)
}

fn join_and_rescale(mut offsets: Vec<f64>, length: f64, rng: f64) -> Vec<f64> {
    offsets.sort_by(f64::total_cmp);
    offsets.dedup_by(|a, b| (*a - *b).abs() <= length * 1e-12);
    if let Some(last) = offsets.last_mut() {
        *last = length;
    }
    rescale(&mut offsets, rng);
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cells(lines: &[f64]) -> Vec<f64> {
        lines.windows(2).map(|w| w[1] - w[0]).collect()
    }

    fn max_growth(lines: &[f64]) -> f64 {
        cells(lines)
            .windows(2)
            .map(|w| (w[1] / w[0]).max(w[0] / w[1]))
            .fold(1.0, f64::max)
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(TaperCase::classify(0.5, 1.0, 1.0, 1.0, 1.5), TaperCase::Trivial);
        assert_eq!(TaperCase::classify(10.0, 1.0, 1.0, 1.0, 1.5), TaperCase::Uniform);
        assert_eq!(TaperCase::classify(10.0, 0.1, 1.0, 1.0, 1.5), TaperCase::TaperStart);
        assert_eq!(TaperCase::classify(10.0, 1.0, 0.1, 1.0, 1.5), TaperCase::TaperStop);
        assert_eq!(TaperCase::classify(10.0, 0.1, 0.1, 1.0, 1.5), TaperCase::TaperBoth);
        // a short gap next to fine neighbors still needs grading
        assert_eq!(TaperCase::classify(0.5, 0.1, 0.1, 1.0, 1.5), TaperCase::TaperBoth);
    }

    #[test]
    fn test_trivial_keeps_endpoints_only() {
        let config = SmoothingConfig::new(1.0);
        let lines = smooth_range(2.0, 2.5, 1.0, 1.0, &config).unwrap();
        assert_eq!(lines, vec![2.0, 2.5]);
    }

    #[test]
    fn test_uniform_subdivision() {
        let config = SmoothingConfig::new(1.0);
        let lines = smooth_range(0.0, 10.0, 1.0, 1.0, &config).unwrap();
        assert_eq!(lines.len(), 11);
        for c in cells(&lines) {
            assert_relative_eq!(c, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_taper_start_grades_up() {
        let config = SmoothingConfig::new(1.0);
        let lines = smooth_range(0.0, 10.0, 0.1, 1.0, &config).unwrap();
        assert_eq!(lines[0], 0.0);
        assert_eq!(lines[lines.len() - 1], 10.0);
        let c = cells(&lines);
        assert!(c[0] < 0.2);
        assert!(c.iter().all(|&x| x <= 1.0 + 1e-12));
        assert!(max_growth(&lines) <= 1.5 + 1e-9);
    }

    #[test]
    fn test_taper_stop_mirrors_taper_start() {
        let config = SmoothingConfig::new(1.0);
        let fwd = smooth_range(0.0, 10.0, 0.1, 1.0, &config).unwrap();
        let back = smooth_range(0.0, 10.0, 1.0, 0.1, &config).unwrap();
        assert_eq!(fwd.len(), back.len());
        for (a, b) in fwd.iter().zip(back.iter().rev()) {
            assert_relative_eq!(*a, 10.0 - *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_taper_both_with_uniform_middle() {
        let config = SmoothingConfig::new(1.0);
        let lines = smooth_range(0.0, 20.0, 0.1, 0.2, &config).unwrap();
        assert_eq!(lines[0], 0.0);
        assert_eq!(lines[lines.len() - 1], 20.0);
        let c = cells(&lines);
        assert!(c[0] < 0.2);
        assert!(c[c.len() - 1] < 0.3);
        assert!(c.iter().all(|&x| x <= 1.0 + 1e-12));
        assert!(max_growth(&lines) <= 1.5 + 1e-9);
    }

    #[test]
    fn test_taper_both_meeting_fronts_is_symmetric_for_equal_ends() {
        let config = SmoothingConfig::new(10.0);
        let lines = smooth_range(0.0, 3.0, 0.1, 0.1, &config).unwrap();
        assert_eq!(lines[0], 0.0);
        assert_eq!(lines[lines.len() - 1], 3.0);
        let n = lines.len();
        for i in 0..n {
            assert_relative_eq!(lines[i], 3.0 - lines[n - 1 - i], epsilon = 1e-9);
        }
        assert!(max_growth(&lines) <= 1.5 + 1e-9);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let config = SmoothingConfig::new(1.0);
        assert!(matches!(
            smooth_range(1.0, 1.0, 1.0, 1.0, &config),
            Err(MeshLineError::EmptyRange { .. })
        ));
        assert!(smooth_range(0.0, 1.0, 0.0, 1.0, &config).is_err());
        assert!(smooth_range(0.0, 1.0, 1.0, 1.0, &config.clone().with_ratio(1.0)).is_err());
    }
}
