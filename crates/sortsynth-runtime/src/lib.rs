#![forbid(unsafe_code)]

//! SortSynth Runtime
//!
//! Turns move logs into timed, audible playback.
//!
//! # Key Components
//!
//! - [`Scheduler`] - Cooperative tick-driven replay of one move log at a time
//! - [`PlayHandle`] - Cancellable handle to a playback
//! - [`Session`] - Owns the on screen array and turns sort requests into playbacks
//! - [`Renderer`] / [`ToneSink`] - Injected side-effect capabilities
//! - [`AudioDevice`] - Process-wide tone synthesizer
//! - [`SortSynthConfig`] - TOML/JSON configuration
//!
//! # Role in SortSynth
//! `sortsynth-core` decides *what* happens during a sort; this crate decides
//! *when* each move becomes visible and audible. Nothing here blocks except
//! the explicit `run_until_idle` drivers.

pub mod audio;
pub mod cancellation;
pub mod capability;
pub mod config;
pub mod playback;
pub mod scheduler;
pub mod session;

pub use audio::{AudioConfig, AudioDevice, AudioError, synthesize_tone};
pub use cancellation::{CancellationSource, CancellationToken};
pub use capability::{NullRenderer, Renderer, SilentTone, ToneSink};
pub use config::{ConfigError, SortSynthConfig};
pub use playback::{PlaybackState, PlaybackStep, ToneBurst};
pub use scheduler::{
    DEFAULT_STEP_INTERVAL, PlayHandle, PlaybackConfig, PlaybackId, PlaybackStats, Scheduler,
    TickOutcome,
};
pub use session::Session;
