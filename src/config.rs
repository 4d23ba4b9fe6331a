//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use evdash::config::{Config, LinkConfig, ScheduleConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_link(LinkConfig::default().with_dest_address(7))
//!     .with_schedule(ScheduleConfig::default().with_render_interval_ms(250));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (RF parameter lists, band ids)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Throttle sensor calibration
    pub sensor: SensorConfig,
    /// Radio link configuration
    pub link: LinkConfig,
    /// Activity cadences and thresholds
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Set sensor configuration
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set link configuration
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    /// Set schedule configuration
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }
}

// ============================================================================
// Sensor Config
// ============================================================================

/// Throttle sensor calibration.
///
/// The raw window `[raw_min, raw_max]` is the usable travel of the hall
/// sensor inside the converter's full range. `ui_full_scale` and
/// `wire_full_scale` are two independent ceilings for the same linear
/// mapping: the gauge shows `0..=ui_full_scale`, the wire carries
/// `0..=wire_full_scale`. They differ on purpose and are configured
/// separately.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// Raw reading at closed throttle
    pub raw_min: u16,
    /// Raw reading at full throttle
    pub raw_max: u16,
    /// Readings above this are converter noise and treated as closed throttle
    pub noise_ceiling: u16,
    /// Ceiling of the displayed percentage
    pub ui_full_scale: u16,
    /// Ceiling of the value transmitted on the wire
    pub wire_full_scale: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            raw_min: 1590,
            raw_max: 2160,
            noise_ceiling: 4000,
            ui_full_scale: 100,
            wire_full_scale: 255,
        }
    }
}

impl SensorConfig {
    /// Set the calibrated raw window
    pub fn with_raw_range(mut self, min: u16, max: u16) -> Self {
        self.raw_min = min;
        self.raw_max = max;
        self
    }

    /// Set the noise rejection ceiling
    pub fn with_noise_ceiling(mut self, ceiling: u16) -> Self {
        self.noise_ceiling = ceiling;
        self
    }

    /// Set the displayed full-scale value
    pub fn with_ui_full_scale(mut self, full: u16) -> Self {
        self.ui_full_scale = full;
        self
    }

    /// Set the transmitted full-scale value
    pub fn with_wire_full_scale(mut self, full: u16) -> Self {
        self.wire_full_scale = full;
        self
    }
}

// ============================================================================
// Link Config
// ============================================================================

/// Radio link configuration.
///
/// Addresses and network id follow the transceiver's AT dialect
/// (`AT+ADDRESS`, `AT+NETWORKID`, `AT+SEND=<dest>,...`). `rf_parameters`
/// is the module's spreading-factor/bandwidth/coding-rate/preamble tuple,
/// passed through verbatim to `AT+PARAMETER`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    /// Local module address
    pub address: u16,
    /// Remote drive unit address
    pub dest_address: u16,
    /// Network id shared by both ends
    pub network_id: u8,
    /// UART baud rate
    pub baud: u32,
    /// RF parameter tuple for `AT+PARAMETER`
    pub rf_parameters: ShortString,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address: 1,
            dest_address: 2,
            network_id: 18,
            baud: 115_200,
            rf_parameters: short_string("9,7,1,12"),
        }
    }
}

impl LinkConfig {
    /// Set the local address
    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    /// Set the drive unit address
    pub fn with_dest_address(mut self, dest: u16) -> Self {
        self.dest_address = dest;
        self
    }

    /// Set the network id
    pub fn with_network_id(mut self, id: u8) -> Self {
        self.network_id = id;
        self
    }

    /// Set the UART baud rate
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Set the RF parameter tuple
    pub fn with_rf_parameters(mut self, params: &str) -> Self {
        self.rf_parameters = short_string(params);
        self
    }
}

// ============================================================================
// Schedule Config
// ============================================================================

/// Activity cadences and motion threshold.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleConfig {
    /// Sample-and-transmit interval in milliseconds
    pub transmit_interval_ms: u32,
    /// Receive poll interval in milliseconds
    pub receive_interval_ms: u32,
    /// Render interval in milliseconds
    pub render_interval_ms: u32,
    /// Speed at or above which the vehicle counts as moving
    pub motion_threshold: u16,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            transmit_interval_ms: 250,
            receive_interval_ms: 250,
            render_interval_ms: 500,
            motion_threshold: 1,
        }
    }
}

impl ScheduleConfig {
    /// Set the transmit cadence
    pub fn with_transmit_interval_ms(mut self, ms: u32) -> Self {
        self.transmit_interval_ms = ms;
        self
    }

    /// Set the receive cadence
    pub fn with_receive_interval_ms(mut self, ms: u32) -> Self {
        self.receive_interval_ms = ms;
        self
    }

    /// Set the render cadence
    pub fn with_render_interval_ms(mut self, ms: u32) -> Self {
        self.render_interval_ms = ms;
        self
    }

    /// Set the motion threshold
    pub fn with_motion_threshold(mut self, threshold: u16) -> Self {
        self.motion_threshold = threshold;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
