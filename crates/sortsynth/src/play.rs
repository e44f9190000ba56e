#![forbid(unsafe_code)]

//! `sortsynth play`: animate a sort as bars and optionally write its tones.
//!
//! The run loop is the host side of the cooperative scheduler: tick, then
//! sleep until the next deadline. `--then`/`--switch-after` issues a second
//! sort request mid-playback, which cancels the first one and sorts whatever
//! is on screen at that moment.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use sortsynth_core::Algorithm;
use sortsynth_runtime::{
    AudioDevice, AudioError, NullRenderer, PlaybackStats, Renderer, Scheduler, Session,
    SilentTone, SortSynthConfig, TickOutcome, ToneSink,
};
use web_time::Instant;

use crate::error::{CliError, Result};
use crate::moves::input_array;
use crate::render::BarRenderer;

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Algorithm name (see `sortsynth list`).
    pub algorithm: String,

    /// Number of values to sort [default: from config, else 30].
    #[arg(long)]
    pub size: Option<usize>,

    /// Seed for a reproducible input array.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between steps in milliseconds [default: from config, else 4].
    #[arg(long = "step-ms")]
    pub step_ms: Option<u64>,

    /// Second algorithm to switch to mid-playback.
    #[arg(long, requires = "switch_after")]
    pub then: Option<String>,

    /// Number of steps of the first sort to play before switching.
    #[arg(long = "switch-after", requires = "then")]
    pub switch_after: Option<usize>,

    /// Write tones as mono f32 little-endian PCM to this file.
    #[arg(long = "pcm-out")]
    pub pcm_out: Option<PathBuf>,

    /// TOML or JSON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not draw bars or print the summary.
    #[arg(long, short)]
    pub quiet: bool,
}

/// How a `play` run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySummary {
    pub algorithm: Algorithm,
    /// Algorithm the run switched to, if it did.
    pub switched_to: Option<Algorithm>,
    pub input: Vec<f64>,
    pub output: Vec<f64>,
    pub stats: PlaybackStats,
}

impl fmt::Display for PlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.algorithm)?;
        if let Some(next) = self.switched_to {
            write!(f, " -> {next}")?;
        }
        write!(
            f,
            ": {} values, {} steps, {} tones",
            self.output.len(),
            self.stats.steps_applied,
            self.stats.tones_emitted
        )?;
        if self.stats.tones_dropped > 0 {
            write!(f, " ({} dropped)", self.stats.tones_dropped)?;
        }
        Ok(())
    }
}

enum Screen<W: Write> {
    Bars(BarRenderer<W>),
    Off(NullRenderer),
}

impl<W: Write> Renderer for Screen<W> {
    fn render(&mut self, snapshot: &[f64]) {
        match self {
            Self::Bars(bars) => bars.render(snapshot),
            Self::Off(null) => null.render(snapshot),
        }
    }
}

impl<W: Write> Screen<W> {
    fn finish(self) -> io::Result<()> {
        match self {
            Self::Bars(bars) => bars.finish().map(drop),
            Self::Off(_) => Ok(()),
        }
    }
}

enum Speaker {
    Device(AudioDevice),
    Silent(SilentTone),
}

impl ToneSink for Speaker {
    fn emit_tone(&mut self, frequency: f64) -> std::result::Result<(), AudioError> {
        match self {
            Self::Device(device) => device.emit_tone(frequency),
            Self::Silent(silent) => silent.emit_tone(frequency),
        }
    }
}

impl Speaker {
    fn release(self) -> std::result::Result<(), AudioError> {
        match self {
            Self::Device(device) => device.release(),
            Self::Silent(_) => Ok(()),
        }
    }
}

fn load_config(args: &PlayArgs) -> Result<SortSynthConfig> {
    let mut config = match &args.config {
        Some(path) => SortSynthConfig::load(path)?,
        None => SortSynthConfig::default(),
    };
    if let Some(size) = args.size {
        config.array.len = size;
    }
    if let Some(step_ms) = args.step_ms {
        config.playback.step_interval_ms = step_ms;
    }
    Ok(config)
}

/// Run one `play` invocation, drawing bars to `out` unless `--quiet`.
pub fn play<W: Write>(args: &PlayArgs, out: W) -> Result<PlaySummary> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let then = args
        .then
        .as_deref()
        .map(str::parse::<Algorithm>)
        .transpose()?;
    let mut pending = match (then, args.switch_after) {
        (Some(next), Some(k)) => Some((next, k)),
        (None, None) => None,
        _ => {
            return Err(CliError::invalid(
                "--then and --switch-after must be given together",
            ));
        }
    };
    let config = load_config(args)?;

    let display = if args.quiet {
        Screen::Off(NullRenderer)
    } else {
        Screen::Bars(BarRenderer::new(out))
    };
    let speaker = match &args.pcm_out {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            Speaker::Device(AudioDevice::acquire(config.audio_config(), Box::new(file))?)
        }
        None => Speaker::Silent(SilentTone),
    };

    let scheduler = Scheduler::new(display, speaker, config.playback_config());
    let input = input_array(config.array.len, args.seed);
    let mut session = Session::new(scheduler, input.clone());
    tracing::info!(
        target: "sortsynth.cli",
        algorithm = %algorithm,
        len = input.len(),
        seed = ?args.seed,
        "play"
    );

    session.request_sort(algorithm);
    let mut switched_to = None;
    if let Some((next, 0)) = pending {
        session.request_sort(next);
        switched_to = Some(next);
        pending = None;
    }

    loop {
        match session.tick(Instant::now()) {
            TickOutcome::Stepped { step, .. } => match pending {
                Some((next, k)) if step.step >= k => {
                    session.request_sort(next);
                    switched_to = Some(next);
                    pending = None;
                }
                _ => session.scheduler().wait_for_deadline(),
            },
            TickOutcome::Waiting { .. } => session.scheduler().wait_for_deadline(),
            TickOutcome::Finished { .. } if pending.is_some() => {
                // The first sort was shorter than --switch-after.
                if let Some((next, _)) = pending.take() {
                    session.request_sort(next);
                    switched_to = Some(next);
                }
            }
            _ => break,
        }
    }

    let output = session.values().to_vec();
    let stats = session.scheduler().stats();
    let (display, speaker) = session.into_scheduler().into_parts();
    display.finish()?;
    speaker.release()?;

    Ok(PlaySummary {
        algorithm,
        switched_to,
        input,
        output,
        stats,
    })
}

pub fn run_play(args: PlayArgs) -> Result<()> {
    let stdout = io::stdout();
    let summary = play(&args, stdout.lock())?;
    if !args.quiet {
        let mut lock = stdout.lock();
        writeln!(lock, "{summary}")?;
    }
    Ok(())
}
