#![forbid(unsafe_code)]

//! Value-to-frequency mapping for audio feedback.

/// Lowest tone, emitted for a value of `0.0`.
pub const DEFAULT_BASE_HZ: f64 = 200.0;

/// Width of the frequency band covered by the value domain `[0, 1)`.
pub const DEFAULT_SPAN_HZ: f64 = 500.0;

/// Linear map `base + value * span`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMapper {
    pub base_hz: f64,
    pub span_hz: f64,
}

impl ToneMapper {
    #[must_use]
    pub const fn new(base_hz: f64, span_hz: f64) -> Self {
        Self { base_hz, span_hz }
    }

    /// Frequency in hertz for the value just written to an array slot.
    #[inline]
    #[must_use]
    pub fn frequency(&self, value: f64) -> f64 {
        self.base_hz + value * self.span_hz
    }
}

impl Default for ToneMapper {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_HZ, DEFAULT_SPAN_HZ)
    }
}

/// [`ToneMapper::frequency`] with the default constants.
#[inline]
#[must_use]
pub fn tone_frequency(value: f64) -> f64 {
    ToneMapper::default().frequency(value)
}
