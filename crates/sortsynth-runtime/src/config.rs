#![forbid(unsafe_code)]

//! Configuration as data.
//!
//! Every tunable lives in one [`SortSynthConfig`] that can be loaded from TOML
//! or JSON. Missing sections and fields fall back to the built-in defaults,
//! so an empty file is a valid config.
//!
//! ```toml
//! # sortsynth.toml
//! [array]
//! len = 40
//!
//! [playback]
//! step_interval_ms = 8
//!
//! [tone]
//! base_hz = 220.0
//! span_hz = 660.0
//!
//! [audio]
//! sample_rate = 48000
//! tone_ms = 80
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use sortsynth_core::{DEFAULT_ARRAY_LEN, DEFAULT_BASE_HZ, DEFAULT_SPAN_HZ, ToneMapper};
use thiserror::Error;
use web_time::Duration;

use crate::audio::{AudioConfig, MAX_SAMPLE_RATE, MAX_TONE_DURATION};
use crate::scheduler::PlaybackConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config failed validation: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSynthConfig {
    pub array: ArraySection,
    pub playback: PlaybackSection,
    pub tone: ToneSection,
    pub audio: AudioSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArraySection {
    /// Number of values generated per run.
    pub len: usize,
}

impl Default for ArraySection {
    fn default() -> Self {
        Self {
            len: DEFAULT_ARRAY_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSection {
    /// Minimum delay between two replayed moves.
    pub step_interval_ms: u64,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            step_interval_ms: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneSection {
    pub base_hz: f64,
    pub span_hz: f64,
}

impl Default for ToneSection {
    fn default() -> Self {
        Self {
            base_hz: DEFAULT_BASE_HZ,
            span_hz: DEFAULT_SPAN_HZ,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSection {
    pub sample_rate: u32,
    pub tone_ms: u64,
    pub decay_ms: u64,
    pub amplitude: f32,
}

impl Default for AudioSection {
    fn default() -> Self {
        let audio = AudioConfig::default();
        Self {
            sample_rate: audio.sample_rate,
            tone_ms: audio.tone_duration.as_millis() as u64,
            decay_ms: audio.decay.as_millis() as u64,
            amplitude: audio.amplitude,
        }
    }
}

impl SortSynthConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension: `.json` is JSON, anything else TOML. The result is
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        tracing::debug!(target: "sortsynth.config", path = %path.display(), "config loaded");
        config.validated()
    }

    /// Every out-of-range parameter, as human-readable messages. Empty means
    /// valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tone.span_hz < 0.0 || !self.tone.span_hz.is_finite() {
            errors.push(format!(
                "tone.span_hz must be >= 0, got {}",
                self.tone.span_hz
            ));
        }
        if self.tone.base_hz <= 0.0 || !self.tone.base_hz.is_finite() {
            errors.push(format!(
                "tone.base_hz must be > 0, got {}",
                self.tone.base_hz
            ));
        }
        if self.audio.sample_rate == 0 || self.audio.sample_rate > MAX_SAMPLE_RATE {
            errors.push(format!(
                "audio.sample_rate must be in 1..={MAX_SAMPLE_RATE}, got {}",
                self.audio.sample_rate
            ));
        }
        let max_tone_ms = MAX_TONE_DURATION.as_millis() as u64;
        if self.audio.tone_ms == 0 || self.audio.tone_ms > max_tone_ms {
            errors.push(format!(
                "audio.tone_ms must be in 1..={max_tone_ms}, got {}",
                self.audio.tone_ms
            ));
        }
        if self.audio.decay_ms == 0 {
            errors.push("audio.decay_ms must be > 0".into());
        }
        if !(self.audio.amplitude > 0.0 && self.audio.amplitude <= 1.0) {
            errors.push(format!(
                "audio.amplitude must be in (0, 1], got {}",
                self.audio.amplitude
            ));
        }
        errors
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    #[must_use]
    pub fn tone_mapper(&self) -> ToneMapper {
        ToneMapper::new(self.tone.base_hz, self.tone.span_hz)
    }

    #[must_use]
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig::default()
            .with_step_interval(Duration::from_millis(self.playback.step_interval_ms))
            .with_tone(self.tone_mapper())
    }

    #[must_use]
    pub fn audio_config(&self) -> AudioConfig {
        AudioConfig {
            sample_rate: self.audio.sample_rate,
            tone_duration: Duration::from_millis(self.audio.tone_ms),
            decay: Duration::from_millis(self.audio.decay_ms),
            amplitude: self.audio.amplitude,
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
