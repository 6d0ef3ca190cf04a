// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh-line smoothing and grid handling

use thiserror::Error;

/// Result type alias using [`MeshLineError`].
pub type Result<T> = std::result::Result<T, MeshLineError>;

/// Errors raised by the smoothing core and the grid container.
#[derive(Error, Debug)]
pub enum MeshLineError {
    /// A policy or argument value is outside its valid domain.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value, formatted.
        value: String,
        /// Why the value is rejected.
        reason: &'static str,
    },

    /// An input coordinate is NaN or infinite.
    #[error("line {index} is not finite: {value}")]
    NonFiniteLine {
        /// Position in the caller's input.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A range to be filled has `start >= stop`.
    #[error("empty range: start {start} must be below stop {stop}")]
    EmptyRange { start: f64, stop: f64 },

    /// Axis name that is not one of x, y, z.
    #[error("unknown axis: {0}")]
    UnknownAxis(String),

    /// Malformed grid document or line list.
    #[error("grid format error: {0}")]
    GridFormat(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshLineError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshLineError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
