// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Grid module - rectilinear grids built from per-axis line sets

mod bbox;
mod rect_grid;
mod xml;

pub use bbox::BoundingBox;
pub use rect_grid::{format_lines, parse_lines, Axis, CoordinateSystem, RectGrid, Snap};
