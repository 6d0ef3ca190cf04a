// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing policy configuration

use crate::error::{MeshLineError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tolerance used when collapsing near-duplicate lines.
///
/// Two consecutive lines closer than
/// `max(absolute, relative * mean_spacing)` are merged into the first one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DedupTolerance {
    /// Fraction of the mean line spacing
    pub relative: f64,
    /// Absolute floor in coordinate units
    pub absolute: f64,
}

impl DedupTolerance {
    pub const DEFAULT_RELATIVE: f64 = 1e-7;
    pub const DEFAULT_ABSOLUTE: f64 = 1e-9;

    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    /// Tolerance that only collapses exact duplicates
    pub fn exact() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Merge threshold for a sequence with the given mean spacing
    pub fn threshold(&self, mean_spacing: f64) -> f64 {
        self.absolute.max(self.relative * mean_spacing)
    }
}

impl Default for DedupTolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RELATIVE, Self::DEFAULT_ABSOLUTE)
    }
}

/// Policy for [`smooth_mesh_lines`](crate::smooth_mesh_lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Largest allowed distance between consecutive lines
    pub max_resolution: f64,
    /// Largest allowed growth factor between neighboring cells
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    /// Near-duplicate merge tolerance
    #[serde(default)]
    pub dedup: DedupTolerance,
    /// Symmetry check tolerance, relative to the total range
    #[serde(default = "default_symmetry_tolerance")]
    pub symmetry_tolerance: f64,
    /// Smooth only half of a mirror-symmetric input and mirror the result
    #[serde(default = "default_exploit_symmetry")]
    pub exploit_symmetry: bool,
}

fn default_ratio() -> f64 {
    SmoothingConfig::DEFAULT_RATIO
}

fn default_symmetry_tolerance() -> f64 {
    SmoothingConfig::DEFAULT_SYMMETRY_TOLERANCE
}

fn default_exploit_symmetry() -> bool {
    true
}

impl SmoothingConfig {
    pub const DEFAULT_RATIO: f64 = 1.5;
    pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-6;
    /// Relative round-off allowance when comparing a gap with the resolution
    pub const RESOLUTION_SLACK: f64 = 1e-9;

    /// Config with the given max resolution and default policy otherwise
    pub fn new(max_resolution: f64) -> Self {
        Self {
            max_resolution,
            ratio: Self::DEFAULT_RATIO,
            dedup: DedupTolerance::default(),
            symmetry_tolerance: Self::DEFAULT_SYMMETRY_TOLERANCE,
            exploit_symmetry: true,
        }
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupTolerance) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_symmetry(mut self, exploit_symmetry: bool) -> Self {
        self.exploit_symmetry = exploit_symmetry;
        self
    }

    /// Whether a gap is wider than the maximum resolution, beyond round-off
    pub fn exceeds_resolution(&self, gap: f64) -> bool {
        gap > self.max_resolution * (1.0 + Self::RESOLUTION_SLACK)
    }

    /// Check the preconditions of the smoothing algorithm.
    pub fn validate(&self) -> Result<()> {
        if !self.max_resolution.is_finite() || self.max_resolution <= 0.0 {
            return Err(MeshLineError::invalid_param(
                "max_resolution",
                self.max_resolution,
                "must be finite and positive",
            ));
        }
        if !self.ratio.is_finite() || self.ratio <= 1.0 {
            return Err(MeshLineError::invalid_param(
                "ratio",
                self.ratio,
                "must be finite and greater than 1",
            ));
        }
        if !(self.dedup.relative >= 0.0 && self.dedup.absolute >= 0.0) {
            return Err(MeshLineError::invalid_param(
                "dedup",
                format!("{:?}", self.dedup),
                "tolerances must be non-negative",
            ));
        }
        if !(self.symmetry_tolerance >= 0.0) {
            return Err(MeshLineError::invalid_param(
                "symmetry_tolerance",
                self.symmetry_tolerance,
                "must be non-negative",
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SmoothingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Reads `path` when given, otherwise `meshlines.toml` in the working
    /// directory if present, otherwise starts from `fallback_max_resolution`.
    pub fn load(path: Option<&Path>, fallback_max_resolution: f64) -> anyhow::Result<Self> {
        let default_path = PathBuf::from("meshlines.toml");
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.exists() => Self::from_file(&default_path)?,
            None => Self::new(fallback_max_resolution),
        };

        if let Ok(max_res) = std::env::var("MESHLINES_MAX_RES") {
            config.max_resolution = max_res
                .parse()
                .with_context(|| format!("MESHLINES_MAX_RES is not a number: {}", max_res))?;
        }

        if let Ok(ratio) = std::env::var("MESHLINES_RATIO") {
            config.ratio = ratio
                .parse()
                .with_context(|| format!("MESHLINES_RATIO is not a number: {}", ratio))?;
        }

        if let Ok(no_symmetry) = std::env::var("MESHLINES_NO_SYMMETRY") {
            config.exploit_symmetry = !no_symmetry.parse().unwrap_or(false);
        }

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
