// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::config::SmoothingConfig;
use crate::lines::{LineStats, SmoothOutcome};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a smoothing run
    pub fn report_smoothing(
        label: &str,
        input_count: usize,
        outcome: &SmoothOutcome,
        config: &SmoothingConfig,
        elapsed: Duration,
    ) {
        let stats = LineStats::analyze(&outcome.lines);

        println!("\n{}", "━".repeat(60).bright_black());
        println!("{} {}", "Axis:".bold(), label.cyan());
        println!("{}", "━".repeat(60).bright_black());

        if outcome.converged {
            println!("{} {}", "✅".green(), "Resolution reached".green().bold());
        } else {
            println!(
                "{} {}",
                "⚠".yellow(),
                "Stopped before reaching the resolution".yellow().bold()
            );
        }

        println!("\n{}", "Result:".bold());
        println!(
            "  {} {} -> {}",
            "Lines:".bright_black(),
            input_count,
            stats.count.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Symmetry:".bright_black(),
            outcome.symmetry.as_str()
        );
        println!("  {} {}", "Iterations:".bright_black(), outcome.iterations);
        Self::print_bound("Max gap", stats.max_gap, config.max_resolution);
        Self::print_bound("Max growth", stats.max_growth, config.ratio);
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(elapsed).cyan()
        );
    }

    /// Report statistics of an existing line set; `true` if it satisfies the policy
    pub fn report_check(stats: &LineStats, config: &SmoothingConfig) -> bool {
        let within_resolution = stats.within_resolution(config);
        let within_ratio = stats.within_ratio(config);

        println!("{}", "Line set statistics".bold());
        println!("  {} {}", "Lines:".bright_black(), stats.count);
        println!("  {} {:.6}", "Span:".bright_black(), stats.span);
        println!("  {} {:.6}", "Min gap:".bright_black(), stats.min_gap);
        Self::print_bound("Max gap", stats.max_gap, config.max_resolution);
        Self::print_bound("Max growth", stats.max_growth, config.ratio);
        if let (false, Some(at)) = (within_ratio, stats.max_growth_at) {
            println!(
                "  {} cells {} and {}",
                "Worst grading at:".bright_black(),
                at,
                at + 1
            );
        }

        let passed = within_resolution && within_ratio;
        if passed {
            println!("{} {}", "✅".green(), "Line set is smooth".green().bold());
        } else {
            println!("{} {}", "❌".red(), "Line set is not smooth".red().bold());
        }
        passed
    }

    /// Report an error
    pub fn report_error(error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    fn print_bound(name: &str, value: f64, limit: f64) {
        let formatted = format!("{:.6} (limit {})", value, limit);
        let styled = if value <= limit * (1.0 + 1e-6) {
            formatted.green()
        } else {
            formatted.red()
        };
        println!("  {} {}", format!("{}:", name).bright_black(), styled);
    }

    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();
        if micros < 1000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1000.0)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(Reporter::format_duration(Duration::from_micros(500)), "500µs");
        assert_eq!(Reporter::format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(Reporter::format_duration(Duration::from_millis(2500)), "2.50s");
    }

    #[test]
    fn test_report_check_result() {
        let config = SmoothingConfig::new(1.0);
        assert!(Reporter::report_check(&LineStats::analyze(&[0.0, 0.5, 1.0]), &config));
        assert!(!Reporter::report_check(&LineStats::analyze(&[0.0, 0.1, 1.0]), &config));
    }
}
