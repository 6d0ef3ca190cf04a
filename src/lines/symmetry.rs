// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mirror-symmetry detection for sorted line sets

use serde::{Deserialize, Serialize};

/// Whether a line set is a mirror image about its midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symmetry {
    /// Not symmetric, or too short to tell
    None,
    /// Odd count, the middle line sits on the center
    OddCentered,
    /// Even count, the center falls between the two middle lines
    EvenCentered,
}

impl Symmetry {
    /// Numeric code: 0 none, 1 odd-centered, 2 even-centered
    pub fn code(&self) -> u8 {
        match self {
            Symmetry::None => 0,
            Symmetry::OddCentered => 1,
            Symmetry::EvenCentered => 2,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Symmetry::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symmetry::None => "none",
            Symmetry::OddCentered => "odd-centered",
            Symmetry::EvenCentered => "even-centered",
        }
    }
}

/// Classify a sorted, deduplicated line set.
///
/// Each mirrored pair must balance about `(first + last) / 2` within
/// `range * tolerance`.
pub fn classify_symmetry(lines: &[f64], tolerance: f64) -> Symmetry {
    let n = lines.len();
    if n <= 2 {
        return Symmetry::None;
    }

    let first = lines[0];
    let last = lines[n - 1];
    let center = 0.5 * (first + last);
    let limit = (last - first) * tolerance;

    for i in 0..n / 2 {
        let left = center - lines[i];
        let right = lines[n - 1 - i] - center;
        if (left - right).abs() > limit {
            return Symmetry::None;
        }
    }

    if n % 2 == 1 {
        if (lines[n / 2] - center).abs() > limit {
            return Symmetry::None;
        }
        Symmetry::OddCentered
    } else {
        Symmetry::EvenCentered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_short_sequences_are_not_symmetric() {
        assert_eq!(classify_symmetry(&[], TOL), Symmetry::None);
        assert_eq!(classify_symmetry(&[1.0], TOL), Symmetry::None);
        assert_eq!(classify_symmetry(&[-1.0, 1.0], TOL), Symmetry::None);
    }

    #[test]
    fn test_odd_centered() {
        let s = classify_symmetry(&[-100.0, -90.0, 0.0, 90.0, 100.0], TOL);
        assert_eq!(s, Symmetry::OddCentered);
        assert_eq!(s.code(), 1);
    }

    #[test]
    fn test_even_centered_off_origin() {
        let s = classify_symmetry(&[10.0, 11.0, 14.0, 19.0, 22.0, 23.0], TOL);
        assert_eq!(s, Symmetry::EvenCentered);
        assert_eq!(s.code(), 2);
    }

    #[test]
    fn test_odd_with_shifted_middle() {
        assert_eq!(
            classify_symmetry(&[-10.0, -5.0, 0.5, 5.0, 10.0], TOL),
            Symmetry::None
        );
    }

    #[test]
    fn test_asymmetric_pair() {
        assert_eq!(
            classify_symmetry(&[0.0, 1.0, 3.0, 4.5], TOL),
            Symmetry::None
        );
    }

    #[test]
    fn test_within_tolerance() {
        let s = classify_symmetry(&[-1.0, -0.5, 0.5 + 1e-9, 1.0], TOL);
        assert_eq!(s, Symmetry::EvenCentered);
        assert!(s.is_symmetric());
    }
}
