#![forbid(unsafe_code)]

//! Process-wide tone synthesizer.
//!
//! There is at most one [`AudioDevice`] per process. It is acquired once at
//! startup, injected into the scheduler as its [`ToneSink`], and released on
//! shutdown (explicitly or by drop). Each tone is a decaying sine rendered as
//! mono 32-bit float PCM, little endian, and written to the device's output.
//!
//! If the output fails the device marks itself unavailable; later tones fail
//! fast with [`AudioError::Unavailable`] and the scheduler carries on without
//! sound.

use std::f32::consts::TAU;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use web_time::Duration;

use crate::capability::ToneSink;

static DEVICE_HELD: AtomicBool = AtomicBool::new(false);

/// Highest accepted sample rate.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Longest accepted tone. Every tone is synthesized into one buffer.
pub const MAX_TONE_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device already acquired by this process")]
    AlreadyAcquired,

    #[error("audio output unavailable")]
    Unavailable,

    #[error("audio output failed: {0}")]
    Output(#[from] io::Error),

    #[error("invalid audio config: {0}")]
    InvalidConfig(String),
}

/// Shape of every emitted tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    pub sample_rate: u32,
    /// Fixed length of a tone.
    pub tone_duration: Duration,
    /// Exponential decay time constant of the envelope.
    pub decay: Duration,
    /// Peak amplitude in `(0, 1]`.
    pub amplitude: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            tone_duration: Duration::from_millis(100),
            decay: Duration::from_millis(30),
            amplitude: 0.2,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(AudioError::InvalidConfig(format!(
                "sample_rate must be in 1..={MAX_SAMPLE_RATE}, got {}",
                self.sample_rate
            )));
        }
        if self.tone_duration.is_zero() || self.tone_duration > MAX_TONE_DURATION {
            return Err(AudioError::InvalidConfig(format!(
                "tone_duration must be in (0, {MAX_TONE_DURATION:?}], got {:?}",
                self.tone_duration
            )));
        }
        if self.decay.is_zero() {
            return Err(AudioError::InvalidConfig("decay must be > 0".into()));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(AudioError::InvalidConfig(format!(
                "amplitude must be in (0, 1], got {}",
                self.amplitude
            )));
        }
        Ok(())
    }

    /// Number of samples in one tone.
    #[must_use]
    pub fn samples_per_tone(&self) -> usize {
        (self.tone_duration.as_secs_f64() * f64::from(self.sample_rate)).round() as usize
    }
}

/// Render one tone: `amplitude * exp(-t / decay) * sin(2πft)`.
#[must_use]
pub fn synthesize_tone(config: &AudioConfig, frequency: f64) -> Vec<f32> {
    let rate = config.sample_rate as f32;
    let decay = config.decay.as_secs_f32();
    let freq = frequency as f32;
    (0..config.samples_per_tone())
        .map(|k| {
            let t = k as f32 / rate;
            config.amplitude * (-t / decay).exp() * (TAU * freq * t).sin()
        })
        .collect()
}

/// The process's single tone output.
pub struct AudioDevice {
    config: AudioConfig,
    output: Box<dyn Write + Send>,
    available: bool,
    tones_written: u64,
}

impl AudioDevice {
    /// Claim the process-wide device.
    ///
    /// Fails with [`AudioError::AlreadyAcquired`] while another handle is live.
    pub fn acquire(config: AudioConfig, output: Box<dyn Write + Send>) -> Result<Self, AudioError> {
        config.validate()?;
        if DEVICE_HELD
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AudioError::AlreadyAcquired);
        }
        tracing::info!(
            target: "sortsynth.audio",
            sample_rate = config.sample_rate,
            tone_ms = config.tone_duration.as_millis() as u64,
            "audio device acquired"
        );
        Ok(Self {
            config,
            output,
            available: true,
            tones_written: 0,
        })
    }

    /// Whether a device is currently held somewhere in the process.
    #[must_use]
    pub fn is_held() -> bool {
        DEVICE_HELD.load(Ordering::Acquire)
    }

    /// Flush and give the device back.
    pub fn release(mut self) -> Result<(), AudioError> {
        let flushed = self.output.flush();
        // Drop does the bookkeeping; flush errors are still reported here.
        drop(self);
        flushed.map_err(AudioError::from)
    }

    #[must_use]
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub fn tones_written(&self) -> u64 {
        self.tones_written
    }

    fn write_samples(&mut self, samples: &[f32]) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(samples.len() * 4);
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        self.output.write_all(&bytes)
    }
}

impl ToneSink for AudioDevice {
    fn emit_tone(&mut self, frequency: f64) -> Result<(), AudioError> {
        if !self.available {
            return Err(AudioError::Unavailable);
        }
        let samples = synthesize_tone(&self.config, frequency);
        if let Err(err) = self.write_samples(&samples) {
            self.available = false;
            return Err(AudioError::Output(err));
        }
        self.tones_written += 1;
        Ok(())
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        let _ = self.output.flush();
        DEVICE_HELD.store(false, Ordering::Release);
        tracing::info!(
            target: "sortsynth.audio",
            tones = self.tones_written,
            "audio device released"
        );
    }
}

impl std::fmt::Debug for AudioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDevice")
            .field("config", &self.config)
            .field("available", &self.available)
            .field("tones_written", &self.tones_written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// The device is process-wide, so tests that acquire it take turns.
    static DEVICE_LOCK: Mutex<()> = Mutex::new(());

    fn acquire_with(config: AudioConfig, output: impl Write + Send + 'static) -> AudioDevice {
        let output: Box<dyn Write + Send> = Box::new(output);
        AudioDevice::acquire(config, output).unwrap()
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tone_has_fixed_length_and_decays() {
        let config = AudioConfig::default();
        let samples = synthesize_tone(&config, 440.0);
        assert_eq!(samples.len(), 4410);
        assert_eq!(samples[0], 0.0);
        let head = samples[..441].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let tail = samples[3969..].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(head <= config.amplitude);
        assert!(tail < head / 10.0);
    }

    #[test]
    fn second_acquire_fails_until_release() {
        let _lock = DEVICE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let device = acquire_with(AudioConfig::default(), io::sink());
        assert!(AudioDevice::is_held());
        assert!(matches!(
            AudioDevice::acquire(AudioConfig::default(), Box::new(io::sink())),
            Err(AudioError::AlreadyAcquired)
        ));
        device.release().unwrap();
        assert!(!AudioDevice::is_held());
        let again = acquire_with(AudioConfig::default(), io::sink());
        drop(again);
        assert!(!AudioDevice::is_held());
    }

    #[test]
    fn emitted_tones_are_written_as_le_floats() {
        let _lock = DEVICE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let buf = SharedBuf::default();
        let config = AudioConfig {
            tone_duration: Duration::from_millis(10),
            ..AudioConfig::default()
        };
        let mut device = acquire_with(config, buf.clone());
        device.emit_tone(300.0).unwrap();
        device.emit_tone(600.0).unwrap();
        assert_eq!(device.tones_written(), 2);
        drop(device);

        let bytes = buf.0.lock().unwrap().clone();
        assert_eq!(bytes.len(), 2 * config.samples_per_tone() * 4);
        let expected = synthesize_tone(&config, 300.0);
        let first = f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(first, expected[1]);
    }

    #[test]
    fn output_failure_makes_device_unavailable() {
        let _lock = DEVICE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut device = acquire_with(AudioConfig::default(), BrokenPipe);
        assert!(matches!(
            device.emit_tone(300.0),
            Err(AudioError::Output(_))
        ));
        assert!(!device.is_available());
        assert!(matches!(
            device.emit_tone(300.0),
            Err(AudioError::Unavailable)
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_acquire() {
        let _lock = DEVICE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let config = AudioConfig {
            amplitude: 0.0,
            ..AudioConfig::default()
        };
        assert!(matches!(
            AudioDevice::acquire(config, Box::new(io::sink())),
            Err(AudioError::InvalidConfig(_))
        ));
        assert!(!AudioDevice::is_held());
    }

    #[test]
    fn oversized_tone_buffers_are_rejected() {
        let too_long = AudioConfig {
            tone_duration: Duration::from_millis(u64::MAX),
            ..AudioConfig::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(AudioError::InvalidConfig(_))
        ));

        let too_fast = AudioConfig {
            sample_rate: MAX_SAMPLE_RATE + 1,
            ..AudioConfig::default()
        };
        assert!(matches!(
            too_fast.validate(),
            Err(AudioError::InvalidConfig(_))
        ));

        let silent = AudioConfig {
            tone_duration: Duration::ZERO,
            ..AudioConfig::default()
        };
        assert!(matches!(
            silent.validate(),
            Err(AudioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn largest_accepted_tone_is_bounded() {
        let config = AudioConfig {
            sample_rate: MAX_SAMPLE_RATE,
            tone_duration: MAX_TONE_DURATION,
            ..AudioConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.samples_per_tone(), 192_000);
    }
}
