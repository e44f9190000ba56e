#![forbid(unsafe_code)]

//! `sortsynth moves`: dump an input array and its move log as JSON.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use sortsynth_core::{Algorithm, MoveLog, generate_array, generate_array_with, seeded_rng, sort};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct MovesArgs {
    /// Algorithm name (see `sortsynth list`).
    pub algorithm: String,

    /// Number of values to sort.
    #[arg(long, default_value_t = sortsynth_core::DEFAULT_ARRAY_LEN)]
    pub size: usize,

    /// Seed for a reproducible input array.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct MovesReport {
    pub algorithm: Algorithm,
    pub input: Vec<f64>,
    pub swaps: usize,
    pub overwrites: usize,
    pub log: MoveLog,
}

/// Input array for `size` and an optional seed, shared with `play`.
#[must_use]
pub fn input_array(size: usize, seed: Option<u64>) -> Vec<f64> {
    match seed {
        Some(seed) => generate_array_with(&mut seeded_rng(seed), size),
        None => generate_array(size),
    }
}

pub fn build_report(args: &MovesArgs) -> Result<MovesReport> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let input = input_array(args.size, args.seed);
    let log = sort(algorithm, &input);
    Ok(MovesReport {
        algorithm,
        swaps: log.swap_count(),
        overwrites: log.overwrite_count(),
        input,
        log,
    })
}

pub fn write_report(args: &MovesArgs, out: &mut dyn Write) -> Result<()> {
    let report = build_report(args)?;
    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn run_moves(args: MovesArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_report(&args, &mut lock)
}
