// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Spacing statistics for line sets

use crate::config::SmoothingConfig;
use serde::{Deserialize, Serialize};

/// Spacing summary of a sorted line set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStats {
    /// Number of lines
    pub count: usize,
    /// Distance from the first to the last line
    pub span: f64,
    /// Smallest cell width, 0 for fewer than two lines
    pub min_gap: f64,
    /// Largest cell width, 0 for fewer than two lines
    pub max_gap: f64,
    /// Largest factor between neighboring cell widths, 1 when there is
    /// nothing to compare
    pub max_growth: f64,
    /// Index of the cell pair with the largest growth factor
    pub max_growth_at: Option<usize>,
}

impl LineStats {
    /// Gather statistics for sorted `lines`
    pub fn analyze(lines: &[f64]) -> Self {
        let gaps: Vec<f64> = lines.windows(2).map(|w| w[1] - w[0]).collect();

        let (min_gap, max_gap) = if gaps.is_empty() {
            (0.0, 0.0)
        } else {
            gaps.iter()
                .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &g| (lo.min(g), hi.max(g)))
        };

        let mut max_growth = 1.0;
        let mut max_growth_at = None;
        for (i, w) in gaps.windows(2).enumerate() {
            let growth = (w[1] / w[0]).max(w[0] / w[1]);
            if growth > max_growth {
                max_growth = growth;
                max_growth_at = Some(i);
            }
        }

        Self {
            count: lines.len(),
            span: match (lines.first(), lines.last()) {
                (Some(first), Some(last)) => last - first,
                _ => 0.0,
            },
            min_gap,
            max_gap,
            max_growth,
            max_growth_at,
        }
    }

    /// No cell is wider than the maximum resolution
    pub fn within_resolution(&self, config: &SmoothingConfig) -> bool {
        !config.exceeds_resolution(self.max_gap)
    }

    /// No neighboring cells differ by more than the ratio
    pub fn within_ratio(&self, config: &SmoothingConfig) -> bool {
        self.max_growth <= config.ratio * (1.0 + 1e-6)
    }

    /// Print a short human-readable summary
    pub fn print(&self) {
        println!("Lines:       {}", self.count);
        println!("Span:        {:.6}", self.span);
        println!("Min gap:     {:.6}", self.min_gap);
        println!("Max gap:     {:.6}", self.max_gap);
        println!("Max growth:  {:.4}", self.max_growth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze() {
        let stats = LineStats::analyze(&[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.span, 4.0);
        assert_eq!(stats.min_gap, 1.0);
        assert_eq!(stats.max_gap, 2.0);
        assert_eq!(stats.max_growth, 2.0);
        assert_eq!(stats.max_growth_at, Some(0));
    }

    #[test]
    fn test_analyze_short() {
        let stats = LineStats::analyze(&[7.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.span, 0.0);
        assert_eq!(stats.max_gap, 0.0);
        assert_eq!(stats.max_growth, 1.0);
        assert_eq!(stats.max_growth_at, None);
    }

    #[test]
    fn test_policy_checks() {
        let config = SmoothingConfig::new(2.0);
        let stats = LineStats::analyze(&[0.0, 1.0, 3.0, 4.0]);
        assert!(stats.within_resolution(&config));
        assert!(!stats.within_ratio(&config));
        assert!(!stats.within_resolution(&SmoothingConfig::new(1.5)));
    }
}
