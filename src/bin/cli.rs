// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! meshlines CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meshlines::cli::Reporter;
use meshlines::grid::{format_lines, parse_lines};
use meshlines::{smooth_mesh_lines_with_outcome, Axis, LineStats, RectGrid, SmoothingConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "meshlines")]
#[command(about = "Graded 1-D mesh-line smoothing for rectilinear grids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Smooth a comma-separated list of lines
    Smooth {
        /// Mandatory lines, e.g. "-100,-90,0,90,100"
        #[arg(short, long, allow_hyphen_values = true)]
        lines: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the lines to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check spacing and grading of an existing line list
    Check {
        /// Lines to check
        #[arg(short, long, allow_hyphen_values = true)]
        lines: String,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Smooth the axes of a grid XML file
    Grid {
        /// Input grid XML file
        input: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Axis to smooth (x, y, z or all)
        #[arg(short, long, default_value = "all")]
        axis: String,

        /// Output file, defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct PolicyArgs {
    /// Maximum distance between consecutive lines
    #[arg(short = 'r', long)]
    max_res: Option<f64>,

    /// Maximum growth factor between neighboring cells
    #[arg(long)]
    ratio: Option<f64>,

    /// TOML config file (defaults to ./meshlines.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Smooth the full range even for mirror-symmetric input
    #[arg(long)]
    no_symmetry: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl PolicyArgs {
    fn resolve(&self) -> Result<SmoothingConfig> {
        let mut config = SmoothingConfig::load(self.config.as_deref(), 1.0)?;
        if let Some(max_res) = self.max_res {
            config.max_resolution = max_res;
        } else if self.config.is_none()
            && !Path::new("meshlines.toml").exists()
            && std::env::var_os("MESHLINES_MAX_RES").is_none()
        {
            anyhow::bail!("--max-res is required when no config file is given");
        }
        if let Some(ratio) = self.ratio {
            config.ratio = ratio;
        }
        if self.no_symmetry {
            config.exploit_symmetry = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let result = match &cli.command {
        Commands::Smooth {
            lines,
            policy,
            format,
            output,
        } => smooth_command(lines, policy, *format, output.as_deref()),
        Commands::Check { lines, policy } => check_command(lines, policy),
        Commands::Grid {
            input,
            policy,
            axis,
            output,
        } => grid_command(input, policy, axis, output.as_deref()),
        Commands::Version => {
            println!("meshlines v{}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            Reporter::report_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}

fn smooth_command(
    lines: &str,
    policy: &PolicyArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<bool> {
    let config = policy.resolve()?;
    let input = parse_lines(lines)?;

    let start = std::time::Instant::now();
    let outcome = smooth_mesh_lines_with_outcome(&input, &config)?;
    let elapsed = start.elapsed();

    let rendered = match format {
        OutputFormat::Text => format_lines(&outcome.lines),
        OutputFormat::Json => serde_json::to_string_pretty(&outcome)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("{} lines written to {}", outcome.lines.len(), path.display());
            Reporter::report_smoothing("lines", input.len(), &outcome, &config, elapsed);
        }
        None => println!("{}", rendered),
    }

    Ok(true)
}

fn check_command(lines: &str, policy: &PolicyArgs) -> Result<bool> {
    let config = policy.resolve()?;
    let mut lines = parse_lines(lines)?;
    lines.sort_by(f64::total_cmp);

    let stats = LineStats::analyze(&lines);
    Ok(Reporter::report_check(&stats, &config))
}

fn grid_command(
    input: &Path,
    policy: &PolicyArgs,
    axis: &str,
    output: Option<&Path>,
) -> Result<bool> {
    let config = policy.resolve()?;
    let mut grid = RectGrid::load_xml(input)
        .with_context(|| format!("Failed to load grid {}", input.display()))?;

    let axes: Vec<Axis> = if axis.eq_ignore_ascii_case("all") {
        Axis::ALL.to_vec()
    } else {
        vec![axis.parse()?]
    };

    let before: Vec<usize> = axes.iter().map(|&a| grid.qty_lines(a)).collect();
    let start = std::time::Instant::now();
    let outcomes = if axes.len() == Axis::ALL.len() {
        grid.smooth_all(&config)?.to_vec()
    } else {
        axes.iter()
            .map(|&a| grid.smooth_axis(a, &config))
            .collect::<meshlines::Result<Vec<_>>>()?
    };
    let elapsed = start.elapsed();

    for ((axis, count), outcome) in axes.iter().zip(before).zip(&outcomes) {
        Reporter::report_smoothing(axis.as_str(), count, outcome, &config, elapsed);
    }

    let output = output.unwrap_or(input);
    grid.save_xml(output)
        .with_context(|| format!("Failed to write grid {}", output.display()))?;

    Ok(outcomes.iter().all(|o| o.converged))
}
