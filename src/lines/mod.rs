// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lines module - 1-D line sets and their smoothing

mod dedup;
mod range;
mod smooth;
mod stats;
mod symmetry;
pub mod taper;

pub use dedup::{merge, unique};
pub use range::{smooth_range, TaperCase};
pub use smooth::{smooth_mesh_lines, smooth_mesh_lines_with_outcome, SmoothOutcome};
pub use stats::LineStats;
pub use symmetry::{classify_symmetry, Symmetry};
pub use taper::{one_side_taper, SideTaper};
