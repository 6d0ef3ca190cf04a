// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! meshlines
//!
//! Adaptive smoothing of 1-D mesh lines for rectilinear simulation grids.
//! Given mandatory lines along an axis and a maximum cell size, the
//! smoother inserts lines so that no cell exceeds the maximum and
//! neighboring cells differ by at most a fixed growth ratio. Mirror
//! symmetric inputs stay exactly symmetric.

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod lines;
pub mod utils;

pub use config::{DedupTolerance, SmoothingConfig};
pub use error::{MeshLineError, Result};
pub use grid::{Axis, BoundingBox, CoordinateSystem, RectGrid};
pub use lines::{
    classify_symmetry, one_side_taper, smooth_mesh_lines, smooth_mesh_lines_with_outcome,
    smooth_range, unique, LineStats, SmoothOutcome, Symmetry, TaperCase,
};

/// Smooth `lines` with the given maximum resolution and growth ratio.
///
/// Shorthand for [`smooth_mesh_lines`] with an otherwise default
/// [`SmoothingConfig`]; [`SmoothingConfig::DEFAULT_RATIO`] is the usual
/// choice for `ratio`.
pub fn smooth_lines(lines: &[f64], max_resolution: f64, ratio: f64) -> Result<Vec<f64>> {
    let config = SmoothingConfig::new(max_resolution).with_ratio(ratio);
    smooth_mesh_lines(lines, &config)
}
