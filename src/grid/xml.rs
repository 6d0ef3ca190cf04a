// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML persistence for rectilinear grids
//!
//! ```xml
//! <RectilinearGrid DeltaUnit="0.001" CoordSystem="0">
//!   <XLines Qty="3">0,1,2</XLines>
//!   <YLines Qty="2">-1,1</YLines>
//!   <ZLines Qty="0"/>
//! </RectilinearGrid>
//! ```

use super::rect_grid::{format_lines, parse_lines, Axis, CoordinateSystem, RectGrid};
use crate::error::{MeshLineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "RectilinearGrid")]
struct GridDocument {
    #[serde(rename = "@DeltaUnit", default = "default_delta_unit")]
    delta_unit: f64,
    #[serde(rename = "@CoordSystem", default)]
    coord_system: u8,
    #[serde(rename = "XLines")]
    x_lines: LinesElement,
    #[serde(rename = "YLines")]
    y_lines: LinesElement,
    #[serde(rename = "ZLines")]
    z_lines: LinesElement,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinesElement {
    #[serde(rename = "@Qty", default)]
    qty: usize,
    #[serde(rename = "$text", default)]
    text: String,
}

fn default_delta_unit() -> f64 {
    1.0
}

impl LinesElement {
    fn from_lines(lines: &[f64]) -> Self {
        Self {
            qty: lines.len(),
            text: format_lines(lines),
        }
    }
}

impl RectGrid {
    /// Serialize the grid; `sorted` sorts every axis first.
    pub fn to_xml(&mut self, sorted: bool) -> Result<String> {
        if sorted {
            self.sort_all();
        }

        let document = GridDocument {
            delta_unit: self.delta_unit(),
            coord_system: self.coordinate_system().code(),
            x_lines: LinesElement::from_lines(self.lines(Axis::X)),
            y_lines: LinesElement::from_lines(self.lines(Axis::Y)),
            z_lines: LinesElement::from_lines(self.lines(Axis::Z)),
        };

        quick_xml::se::to_string(&document)
            .map_err(|e| MeshLineError::GridFormat(e.to_string()))
    }

    /// Parse a `RectilinearGrid` element. Lines come back sorted.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document: GridDocument =
            quick_xml::de::from_str(xml).map_err(|e| MeshLineError::GridFormat(e.to_string()))?;

        let coordinate_system = CoordinateSystem::from_code(document.coord_system).ok_or_else(|| {
            MeshLineError::GridFormat(format!(
                "unknown coordinate system: {}",
                document.coord_system
            ))
        })?;

        let mut grid = RectGrid::with_coordinate_system(coordinate_system);
        grid.set_delta_unit(document.delta_unit);

        for (axis, element) in [
            (Axis::X, &document.x_lines),
            (Axis::Y, &document.y_lines),
            (Axis::Z, &document.z_lines),
        ] {
            let lines = parse_lines(&element.text)?;
            if lines.len() != element.qty {
                log::warn!(
                    "{} lines: Qty attribute says {}, found {}",
                    axis,
                    element.qty,
                    lines.len()
                );
            }
            grid.set_lines(axis, &lines);
        }

        grid.sort_all();
        Ok(grid)
    }

    pub fn save_xml(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml(true)?;
        std::fs::write(path.as_ref(), xml)?;
        log::info!("grid written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_xml(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path.as_ref())?;
        let grid = Self::from_xml(&xml)?;
        log::info!("grid loaded from {}", path.as_ref().display());
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_contains_attributes() {
        let mut grid = RectGrid::new();
        grid.set_delta_unit(0.001);
        grid.set_lines(Axis::X, &[2.0, 0.0, 1.0]);
        grid.set_lines(Axis::Y, &[-1.0, 1.0]);

        let xml = grid.to_xml(true).unwrap();
        assert!(xml.starts_with("<RectilinearGrid"));
        assert!(xml.contains("DeltaUnit=\"0.001\""));
        assert!(xml.contains("CoordSystem=\"0\""));
        assert!(xml.contains(">0,1,2</XLines>"));
        assert!(xml.contains("Qty=\"2\""));
    }

    #[test]
    fn test_read_sorts_and_defaults_delta_unit() {
        let xml = r#"<RectilinearGrid CoordSystem="1">
            <XLines Qty="3">2, 0, 1</XLines>
            <YLines Qty="2">-1,1</YLines>
            <ZLines Qty="0"></ZLines>
        </RectilinearGrid>"#;

        let grid = RectGrid::from_xml(xml).unwrap();
        assert_eq!(grid.delta_unit(), 1.0);
        assert_eq!(grid.coordinate_system(), CoordinateSystem::Cylindrical);
        assert_eq!(grid.lines(Axis::X), &[0.0, 1.0, 2.0]);
        assert_eq!(grid.lines(Axis::Y), &[-1.0, 1.0]);
        assert!(grid.lines(Axis::Z).is_empty());
    }

    #[test]
    fn test_read_rejects_garbage() {
        let xml = r#"<RectilinearGrid>
            <XLines Qty="1">abc</XLines>
            <YLines Qty="0"></YLines>
            <ZLines Qty="0"></ZLines>
        </RectilinearGrid>"#;
        assert!(matches!(
            RectGrid::from_xml(xml),
            Err(MeshLineError::GridFormat(_))
        ));

        let missing_axis = r#"<RectilinearGrid><XLines Qty="0"></XLines></RectilinearGrid>"#;
        assert!(RectGrid::from_xml(missing_axis).is_err());
    }
}
