//! Size-proportional durations for `Timeout::Auto`.
//!
//! Taller content animates longer, but the growth flattens quickly (a fourth
//! root term plus a small linear term) and the result is clamped to a band
//! so that tiny content is still perceptible and huge content never crawls.

use std::time::Duration;

/// Inclusive bounds for auto-estimated durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoDurationBand {
    pub min: Duration,
    pub max: Duration,
}

impl AutoDurationBand {
    pub const DEFAULT: Self = Self {
        min: Duration::from_millis(200),
        max: Duration::from_millis(800),
    };

    /// Create a band. Swapped bounds are reordered.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Estimate the duration for content of `pixels` height.
    ///
    /// Non-finite and negative sizes count as zero.
    pub fn estimate(&self, pixels: f32) -> Duration {
        let pixels = if pixels.is_finite() { pixels.max(0.0) } else { 0.0 };
        let constant = f64::from(pixels) / 36.0;
        let raw_ms = ((4.0 + 15.0 * constant.powf(0.25) + constant / 5.0) * 10.0).round();
        // Fields are public, so the bounds may arrive swapped
        let min_ms = self.min.min(self.max).as_millis() as f64;
        let max_ms = self.max.max(self.min).as_millis() as f64;
        Duration::from_millis(raw_ms.clamp(min_ms, max_ms) as u64)
    }
}

impl Default for AutoDurationBand {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Estimate an auto duration using [`AutoDurationBand::DEFAULT`].
pub fn estimate_auto_duration(pixels: f32) -> Duration {
    AutoDurationBand::DEFAULT.estimate(pixels)
}
