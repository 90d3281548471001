//! warpath: warp the paths of an SVG file from the command line.
//!
//! Reads an SVG document, converts every shape to a path of uniform curve
//! segments, optionally adapts the resolution, applies a chain of built-in
//! point transforms, and writes the warped document.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin warpath -- [OPTIONS] <INPUT>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod effects;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use warpath_core::{BasisMode, Point, SegmentKind, WarpConfig};
use warpath_svg::Warp;

use crate::effects::Effects;

/// Warp the paths of an SVG document with adaptive curve resolution.
///
/// Transforms are applied in the order scale, swirl, wave, translate.
#[derive(Parser)]
#[command(name = "warpath", version)]
struct Cli {
    /// Path to the input SVG.
    input: PathBuf,

    /// Write the warped SVG here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Curve type every segment is normalized to.
    #[arg(long, value_enum, default_value_t = CLI_DEFAULT_CURVE_TYPE)]
    curve_type: CurveType,

    /// Freeze the original geometry so transforms do not compound.
    #[arg(long)]
    lock_original: bool,

    /// Split segments longer than this before warping.
    #[arg(long, value_parser = parse_threshold)]
    interpolate: Option<f64>,

    /// Merge neighbouring segments spanning at most this before warping.
    #[arg(long, value_parser = parse_threshold)]
    extrapolate: Option<f64>,

    /// Measure --interpolate and --extrapolate on the warped positions
    /// instead of the original ones.
    #[arg(long)]
    pre: bool,

    /// Center of scale and swirl.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    center: Option<Vec<f64>>,

    /// Scale about the center.
    #[arg(long, num_args = 2, value_names = ["SX", "SY"], allow_negative_numbers = true)]
    scale: Option<Vec<f64>>,

    /// Rotate up to DEGREES about the center, fading out at RADIUS.
    #[arg(long, num_args = 2, value_names = ["DEGREES", "RADIUS"], allow_negative_numbers = true)]
    swirl: Option<Vec<f64>>,

    /// Displace y by AMPLITUDE * sin(2 pi x / WAVELENGTH).
    #[arg(
        long,
        num_args = 2,
        value_names = ["AMPLITUDE", "WAVELENGTH"],
        allow_negative_numbers = true
    )]
    wave: Option<Vec<f64>>,

    /// Shift every point.
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
    translate: Option<Vec<f64>>,

    /// Print per-path segment counts as JSON on stderr.
    #[arg(long)]
    stats: bool,

    /// Full warp config as a JSON string.
    ///
    /// When provided, --curve-type and --lock-original are ignored. The
    /// JSON must be a valid `WarpConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Curve type selection.
#[derive(Clone, Copy, ValueEnum)]
enum CurveType {
    /// Straight lines (`L`).
    Line,
    /// Quadratic Béziers (`Q`).
    Quadratic,
    /// Cubic Béziers (`C`).
    Cubic,
}

/// Maps a [`SegmentKind`] to the local CLI [`CurveType`] enum.
const fn curve_type_from_core(kind: SegmentKind) -> CurveType {
    match kind {
        SegmentKind::Line => CurveType::Line,
        SegmentKind::Quadratic => CurveType::Quadratic,
        SegmentKind::Cubic => CurveType::Cubic,
    }
}

/// The CLI default curve type, derived from
/// [`WarpConfig::DEFAULT_CURVE_TYPE`] so the two cannot silently diverge.
const CLI_DEFAULT_CURVE_TYPE: CurveType = curve_type_from_core(WarpConfig::DEFAULT_CURVE_TYPE);

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(format!("threshold must be a finite non-negative number, got {threshold}"))
    }
}

fn pair(values: Option<&Vec<f64>>) -> Option<(f64, f64)> {
    match values.map(Vec::as_slice) {
        Some(&[a, b]) => Some((a, b)),
        _ => None,
    }
}

/// Build a [`WarpConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual config flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<WarpConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(WarpConfig {
        curve_type: match cli.curve_type {
            CurveType::Line => SegmentKind::Line,
            CurveType::Quadratic => SegmentKind::Quadratic,
            CurveType::Cubic => SegmentKind::Cubic,
        },
        basis_mode: if cli.lock_original {
            BasisMode::Locked
        } else {
            BasisMode::Live
        },
        ..WarpConfig::default()
    })
}

fn effects_from_cli(cli: &Cli) -> Effects {
    Effects {
        center: pair(cli.center.as_ref()).map_or(Point::new(0.0, 0.0), |(x, y)| Point::new(x, y)),
        scale: pair(cli.scale.as_ref()),
        swirl: pair(cli.swirl.as_ref()),
        wave: pair(cli.wave.as_ref()),
        translate: pair(cli.translate.as_ref()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source = match std::fs::read_to_string(&cli.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let mut warp = match Warp::new(&source, &config) {
        Ok(warp) => warp,
        Err(e) => {
            eprintln!("Error loading {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };
    log::info!("config: {config:?}");

    let chain = effects_from_cli(&cli).chain();
    log::info!("{} transform steps", chain.len());

    if let Some(threshold) = cli.interpolate {
        let result = if cli.pre {
            warp.pre_interpolate(&chain, threshold)
        } else {
            warp.interpolate(threshold)
        };
        match result {
            Ok(did_work) => log::info!("interpolate {threshold}: did work = {did_work}"),
            Err(e) => {
                eprintln!("Interpolation failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(threshold) = cli.extrapolate {
        let did_work = if cli.pre {
            warp.pre_extrapolate(&chain, threshold)
        } else {
            warp.extrapolate(threshold)
        };
        log::info!("extrapolate {threshold}: did work = {did_work}");
    }

    warp.transform(&chain);

    if cli.stats {
        let counts: Vec<usize> = warp.paths().map(|s| s.working().segment_count()).collect();
        let stats = serde_json::json!({
            "paths": counts.len(),
            "segments": counts.iter().sum::<usize>(),
            "per_path": counts,
        });
        eprintln!("{stats}");
    }

    let svg = warp.to_svg_string();
    match cli.output {
        Some(ref path) => match std::fs::write(path, &svg) {
            Ok(()) => {
                eprintln!("SVG written to {} ({} bytes)", path.display(), svg.len());
            }
            Err(e) => {
                eprintln!("Error writing SVG to {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{svg}") {
                eprintln!("Error writing SVG: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
