// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS Dynamics CLI
//!
//! Inspect configuration and evaluate generator models from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show effective configuration
//! qubit-os-dynamics config
//!
//! # Validate a configuration file
//! qubit-os-dynamics validate --config /path/to/config.yaml
//!
//! # Single-qubit Lindblad generator with T1 = 50 μs, T2 = 30 μs at 5 GHz
//! qubit-os-dynamics qubit --t1-us 50 --t2-us 30 --freq-ghz 5 --time-ns 10
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ndarray::{array, Array2};
use num_complex::Complex64;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qubit_os_dynamics::lindblad::{vec_commutator, CollapseOperator, LindbladModel};
use qubit_os_dynamics::{config::Config, Frame, Generator, Result, Signal, VERSION};

/// QubitOS time-dependent generator models
#[derive(Parser)]
#[command(name = "qubit-os-dynamics")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Time-dependent generator models for quantum dynamics")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,

    /// Evaluate a driven single-qubit Lindblad generator
    Qubit {
        /// T1 relaxation time in microseconds
        #[arg(long, default_value_t = 50.0)]
        t1_us: f64,

        /// T2 coherence time in microseconds
        #[arg(long, default_value_t = 30.0)]
        t2_us: f64,

        /// Qubit frequency in GHz
        #[arg(long, default_value_t = 5.0)]
        freq_ghz: f64,

        /// Resonant drive amplitude in MHz (0 disables the drive)
        #[arg(long, default_value_t = 0.0)]
        drive_mhz: f64,

        /// Evaluation time in nanoseconds
        #[arg(long, default_value_t = 0.0)]
        time_ns: f64,

        /// Evaluate in the frame rotating at the qubit frequency
        #[arg(long)]
        rotating_frame: bool,

        /// Rotating-wave cutoff frequency in GHz
        #[arg(long)]
        cutoff_ghz: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, &config.logging.format);

    match cli.command {
        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },

        Commands::Qubit {
            t1_us,
            t2_us,
            freq_ghz,
            drive_mhz,
            time_ns,
            rotating_frame,
            cutoff_ghz,
        } => {
            config.validate()?;
            run_qubit(
                &config,
                QubitArgs {
                    t1_us,
                    t2_us,
                    freq_hz: freq_ghz * 1e9,
                    drive_hz: drive_mhz * 1e6,
                    time_s: time_ns * 1e-9,
                    rotating_frame,
                    cutoff_hz: cutoff_ghz.map(|f| f * 1e9),
                },
            )?;
        }
    }

    Ok(())
}

struct QubitArgs {
    t1_us: f64,
    t2_us: f64,
    freq_hz: f64,
    drive_hz: f64,
    time_s: f64,
    rotating_frame: bool,
    cutoff_hz: Option<f64>,
}

/// H(t) = π f Z + π Ω cos(2π f t) X, with T1/T_φ collapse operators.
fn run_qubit(config: &Config, args: QubitArgs) -> Result<()> {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let pi = std::f64::consts::PI;

    let z: Array2<Complex64> = array![[one, zero], [zero, -one]];
    let x: Array2<Complex64> = array![[zero, one], [one, zero]];
    let z_half_omega = z.mapv(|v| v * pi * args.freq_hz);

    let collapse = CollapseOperator::from_t1_t2(args.t1_us, args.t2_us, "q0")?;
    let drive_hz = args.drive_hz;
    let mut model = LindbladModel::from_collapse_operators(
        &[z_half_omega.clone(), x.mapv(|v| v * pi)],
        vec![
            Signal::constant(1.0),
            Signal::new(move |_| Complex64::new(drive_hz, 0.0), args.freq_hz, 0.0),
        ],
        &collapse,
    )?
    .with_numerics(config.numerics);

    if args.rotating_frame {
        let frame_op = vec_commutator(&z_half_omega).mapv(|v| v * Complex64::new(0.0, -1.0));
        model.set_frame(Frame::from_matrix_with(frame_op, &config.numerics)?)?;
    }
    model.set_cutoff_freq(args.cutoff_hz)?;

    info!(
        t1_us = args.t1_us,
        t2_us = args.t2_us,
        freq_hz = args.freq_hz,
        rotating_frame = args.rotating_frame,
        cutoff_hz = ?args.cutoff_hz,
        "Built single-qubit Lindblad model"
    );

    for op in &collapse {
        println!("{}: rate = {:.4e} Hz", op.label, op.rate);
    }

    match model.drift() {
        Ok(Some(drift)) => print_matrix("Drift superoperator", &drift),
        Ok(None) => {}
        Err(e) => println!("Drift superoperator: {}\n", e),
    }
    let generator = model.evaluate(args.time_s, false)?;
    print_matrix(&format!("Generator at t = {:e} s", args.time_s), &generator);

    Ok(())
}

fn print_matrix(title: &str, m: &Array2<Complex64>) {
    println!("{}:", title);
    for row in m.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|z| format!("{:>+11.4e}{:>+11.4e}i", z.re, z.im))
            .collect();
        println!("  [{}]", cells.join("  "));
    }
    println!();
}

/// Initialize logging with tracing.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
