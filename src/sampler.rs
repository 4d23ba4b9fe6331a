//! Throttle sample normalization.
//!
//! [`ThrottleSampler`] turns one raw converter value into a
//! [`ThrottleReading`]: reject obviously-corrupt readings, clamp into the
//! calibrated window, then linearly map onto two independent integer
//! scales. It is pure computation; writing the result anywhere is the
//! scheduler's job.
//!
//! # Example
//!
//! ```rust
//! use evdash::{config::SensorConfig, ThrottleSampler};
//!
//! let sampler = ThrottleSampler::new(SensorConfig::default());
//!
//! // Below the calibrated window clamps to closed throttle
//! let reading = sampler.sample(1400);
//! assert_eq!(reading.ui, 0);
//!
//! // Full travel maps to both full scales
//! let reading = sampler.sample(2160);
//! assert_eq!(reading.ui, 100);
//! assert_eq!(reading.wire, 255);
//! ```

use crate::config::SensorConfig;

/// One normalized throttle sample.
///
/// Both fields come from the same clamped raw value through the same
/// linear family, scaled to different ceilings: `ui` is what the gauge
/// shows, `wire` is what goes on the link. Immutable once produced;
/// superseded each sampling cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleReading {
    /// Displayed value in `[0, ui_full_scale]`
    pub ui: u16,
    /// Transmitted value in `[0, wire_full_scale]`
    pub wire: u16,
}

/// Normalizes raw sensor values into [`ThrottleReading`]s.
#[derive(Clone, Copy, Debug)]
pub struct ThrottleSampler {
    config: SensorConfig,
}

impl ThrottleSampler {
    /// Create a sampler with the given calibration.
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    /// Normalize one raw converter value.
    ///
    /// Order matters: the noise ceiling is checked first so a corrupt
    /// reading (converter glitch, disconnected sensor rail) lands at
    /// closed throttle instead of full. Then the value is clamped into
    /// the calibrated window and mapped.
    pub fn sample(&self, raw: u16) -> ThrottleReading {
        let c = &self.config;

        let raw = if raw > c.noise_ceiling { c.raw_min } else { raw };
        let raw = raw.clamp(c.raw_min, c.raw_max);

        ThrottleReading {
            ui: self.map(raw, c.ui_full_scale),
            wire: self.map(raw, c.wire_full_scale),
        }
    }

    /// Integer-rounded linear interpolation from the raw window onto
    /// `[0, full_scale]`. `raw` must already be clamped.
    fn map(&self, raw: u16, full_scale: u16) -> u16 {
        let span = u32::from(self.config.raw_max - self.config.raw_min);
        if span == 0 {
            // Degenerate calibration: the window has no travel
            return 0;
        }
        let offset = u32::from(raw - self.config.raw_min);
        ((offset * u32::from(full_scale) + span / 2) / span) as u16
    }

    /// The calibration this sampler was built with.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }
}
