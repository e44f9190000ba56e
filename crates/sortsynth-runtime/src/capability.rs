#![forbid(unsafe_code)]

//! Injected side-effect capabilities.
//!
//! The scheduler knows nothing about screens or sound cards. After each step
//! it hands the new snapshot to a [`Renderer`] and one or two frequencies to a
//! [`ToneSink`]. Both are plain traits with blanket impls for closures, so a
//! test can capture calls with a couple of lines:
//!
//! ```
//! use sortsynth_runtime::{AudioError, Renderer, ToneSink};
//!
//! let mut frames = Vec::new();
//! let mut render = |snapshot: &[f64]| frames.push(snapshot.to_vec());
//! render.render(&[0.1, 0.2]);
//!
//! let mut tones = Vec::new();
//! let mut sink = |hz: f64| -> Result<(), AudioError> {
//!     tones.push(hz);
//!     Ok(())
//! };
//! sink.emit_tone(440.0).unwrap();
//! ```

use crate::audio::AudioError;

/// Displays an array snapshot. Return values are never consulted.
pub trait Renderer {
    fn render(&mut self, snapshot: &[f64]);
}

impl<F> Renderer for F
where
    F: FnMut(&[f64]),
{
    fn render(&mut self, snapshot: &[f64]) {
        self(snapshot);
    }
}

/// Produces a short tone at a frequency.
///
/// Errors are reported back so the scheduler can log and count them; they
/// never abort playback.
pub trait ToneSink {
    fn emit_tone(&mut self, frequency: f64) -> Result<(), AudioError>;
}

impl<F> ToneSink for F
where
    F: FnMut(f64) -> Result<(), AudioError>,
{
    fn emit_tone(&mut self, frequency: f64) -> Result<(), AudioError> {
        self(frequency)
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &[f64]) {}
}

/// Tone sink for hosts without audio output; tones are only traced.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentTone;

impl ToneSink for SilentTone {
    fn emit_tone(&mut self, frequency: f64) -> Result<(), AudioError> {
        tracing::trace!(target: "sortsynth.audio", frequency, "silent tone");
        Ok(())
    }
}
