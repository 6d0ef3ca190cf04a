// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rectilinear grid: three independent sets of mesh lines

use super::bbox::BoundingBox;
use crate::config::SmoothingConfig;
use crate::error::{MeshLineError, Result};
use crate::lines::{smooth_mesh_lines_with_outcome, SmoothOutcome};
use nalgebra::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grid direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = MeshLineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x" | "0" => Ok(Axis::X),
            "y" | "1" => Ok(Axis::Y),
            "z" | "2" => Ok(Axis::Z),
            _ => Err(MeshLineError::UnknownAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate system the lines are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    #[default]
    Cartesian,
    Cylindrical,
}

impl CoordinateSystem {
    pub fn code(&self) -> u8 {
        match self {
            CoordinateSystem::Cartesian => 0,
            CoordinateSystem::Cylindrical => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CoordinateSystem::Cartesian),
            1 => Some(CoordinateSystem::Cylindrical),
            _ => None,
        }
    }
}

/// Result of snapping a coordinate to the nearest line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    /// Index of the nearest line
    pub index: usize,
    /// Whether the value lies within the outermost lines
    pub inside: bool,
}

/// Rectilinear grid with independent line sets per axis.
///
/// Lines may be stored unsorted until [`RectGrid::sort`] is called; the
/// smoothing and XML paths always leave them sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct RectGrid {
    lines: [Vec<f64>; 3],
    delta_unit: f64,
    coordinate_system: CoordinateSystem,
}

impl RectGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            lines: [Vec::new(), Vec::new(), Vec::new()],
            delta_unit: 1.0,
            coordinate_system: CoordinateSystem::Cartesian,
        }
    }

    pub fn with_coordinate_system(coordinate_system: CoordinateSystem) -> Self {
        Self {
            coordinate_system,
            ..Self::new()
        }
    }

    pub fn add_line(&mut self, axis: Axis, value: f64) {
        self.lines[axis.index()].push(value);
    }

    pub fn add_lines(&mut self, axis: Axis, values: &[f64]) {
        self.lines[axis.index()].extend_from_slice(values);
    }

    /// Replace all lines of an axis
    pub fn set_lines(&mut self, axis: Axis, values: &[f64]) {
        self.lines[axis.index()] = values.to_vec();
    }

    /// Overwrite the line at `index`; `false` if out of range
    pub fn set_line(&mut self, axis: Axis, index: usize, value: f64) -> bool {
        match self.lines[axis.index()].get_mut(index) {
            Some(line) => {
                *line = value;
                true
            }
            None => false,
        }
    }

    pub fn lines(&self, axis: Axis) -> &[f64] {
        &self.lines[axis.index()]
    }

    pub fn line(&self, axis: Axis, index: usize) -> Option<f64> {
        self.lines[axis.index()].get(index).copied()
    }

    pub fn qty_lines(&self, axis: Axis) -> usize {
        self.lines[axis.index()].len()
    }

    /// Comma-separated lines of an axis
    pub fn lines_as_string(&self, axis: Axis) -> String {
        format_lines(self.lines(axis))
    }

    /// Remove the line at `index`; `false` if out of range
    pub fn remove_line_at(&mut self, axis: Axis, index: usize) -> bool {
        let lines = &mut self.lines[axis.index()];
        if index < lines.len() {
            lines.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove the first line equal to `value`; `false` if there is none
    pub fn remove_line(&mut self, axis: Axis, value: f64) -> bool {
        match self.lines[axis.index()].iter().position(|&l| l == value) {
            Some(index) => self.remove_line_at(axis, index),
            None => false,
        }
    }

    pub fn clear_lines(&mut self, axis: Axis) {
        self.lines[axis.index()].clear();
    }

    /// Remove all lines and reset the delta unit
    pub fn clear(&mut self) {
        self.lines.iter_mut().for_each(Vec::clear);
        self.delta_unit = 1.0;
    }

    /// Drawing unit, e.g. `1e-3` for millimetres
    pub fn delta_unit(&self) -> f64 {
        self.delta_unit
    }

    pub fn set_delta_unit(&mut self, delta_unit: f64) {
        self.delta_unit = delta_unit;
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    pub fn set_coordinate_system(&mut self, coordinate_system: CoordinateSystem) {
        self.coordinate_system = coordinate_system;
    }

    /// Sort an axis and drop exact duplicates
    pub fn sort(&mut self, axis: Axis) {
        let lines = &mut self.lines[axis.index()];
        lines.sort_by(f64::total_cmp);
        lines.dedup();
    }

    pub fn sort_all(&mut self) {
        Axis::ALL.iter().for_each(|&axis| self.sort(axis));
    }

    /// Number of axes with more than one line, `None` if any axis is empty
    pub fn dimension(&self) -> Option<usize> {
        if self.lines.iter().any(Vec::is_empty) {
            return None;
        }
        Some(self.lines.iter().filter(|l| l.len() > 1).count())
    }

    /// At least two lines on every axis
    pub fn is_valid(&self) -> bool {
        self.lines.iter().all(|l| l.len() >= 2)
    }

    /// Box spanned by the outermost lines; empty axes contribute `0..0`
    pub fn sim_area(&self) -> BoundingBox {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for (i, lines) in self.lines.iter().enumerate() {
            if !lines.is_empty() {
                min[i] = lines.iter().copied().fold(f64::INFINITY, f64::min);
                max[i] = lines.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            }
        }
        BoundingBox::new(Point3::from(min), Point3::from(max))
    }

    /// Index of the line nearest to `value` on a sorted axis.
    ///
    /// Values beyond the outermost lines snap to them with `inside = false`.
    /// Returns `None` for an empty axis.
    pub fn snap_to_line(&self, axis: Axis, value: f64) -> Option<Snap> {
        let lines = self.lines(axis);
        let last = lines.len().checked_sub(1)?;

        if value < lines[0] {
            return Some(Snap { index: 0, inside: false });
        }
        if value > lines[last] {
            return Some(Snap { index: last, inside: false });
        }

        let index = lines
            .windows(2)
            .position(|w| value < 0.5 * (w[0] + w[1]))
            .unwrap_or(last);
        Some(Snap { index, inside: true })
    }

    /// Subdivide every cell of a sorted axis into `factor` equal parts.
    pub fn increase_resolution(&mut self, axis: Axis, factor: usize) -> Result<()> {
        if factor < 2 {
            return Err(MeshLineError::invalid_param(
                "factor",
                factor,
                "must be at least 2",
            ));
        }

        let lines = self.lines(axis).to_vec();
        let mut refined = Vec::with_capacity(lines.len() * factor);
        for w in lines.windows(2) {
            let delta = (w[1] - w[0]) / factor as f64;
            refined.push(w[0]);
            refined.extend((1..factor).map(|n| w[0] + n as f64 * delta));
        }
        refined.extend(lines.last().copied());

        self.lines[axis.index()] = refined;
        self.sort(axis);
        Ok(())
    }

    /// Smooth one axis in place.
    pub fn smooth_axis(&mut self, axis: Axis, config: &SmoothingConfig) -> Result<SmoothOutcome> {
        let outcome = smooth_mesh_lines_with_outcome(self.lines(axis), config)?;
        self.lines[axis.index()] = outcome.lines.clone();
        Ok(outcome)
    }

    /// Smooth all three axes in place, in parallel.
    ///
    /// Axes are independent; on error no axis is modified.
    pub fn smooth_all(&mut self, config: &SmoothingConfig) -> Result<[SmoothOutcome; 3]> {
        let outcomes = self
            .lines
            .par_iter()
            .map(|lines| smooth_mesh_lines_with_outcome(lines, config))
            .collect::<Result<Vec<_>>>()?;

        for (lines, outcome) in self.lines.iter_mut().zip(&outcomes) {
            *lines = outcome.lines.clone();
        }

        outcomes
            .try_into()
            .map_err(|_| MeshLineError::GridFormat("expected three axes".into()))
    }
}

impl Default for RectGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Format lines as a comma-separated list
pub fn format_lines(lines: &[f64]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a comma-separated list of lines; blank entries are skipped
pub fn parse_lines(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| MeshLineError::GridFormat(format!("not a number: {:?}", token)))
        })
        .collect()
}
