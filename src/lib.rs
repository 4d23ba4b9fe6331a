//! # evdash
//!
//! Telemetry and control loop for a single-rider electric-vehicle
//! dashboard: sample the throttle, talk to the remote drive unit over an
//! AT-command LoRa link, and keep a gauge display honest without
//! repainting the world.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the throttle sensor, the two
//!   serial link halves, and the display panel
//! - **Race-free telemetry**: producers publish events onto a bounded
//!   lock-free bus; one consumer owns the store
//! - **Incremental rendering**: the gauge redraws only the arc segment
//!   the value actually swept, colored by direction
//! - **Best-effort radio bring-up**: AT configuration that logs but can
//!   never fail the boot
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware, link, and display abstractions
//! - `sampler` - Raw sensor value clamping and dual-scale mapping
//! - `frame` - ASCII command-frame codec for the link
//! - `telemetry` - Shared state, events, and the bounded bus
//! - `scheduler` - The three periodic activities and their driving loop
//! - `gauge` / `indicator` - Stateful incremental renderers
//! - `radio` - AT-command envelopes and startup configuration
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use evdash::config::Config;
//! use evdash::hal::{MockDiag, MockLinkRx, MockLinkTx, MockPanel, MockSensor};
//! use evdash::scheduler::{Activity, ReceiveActivity, RenderActivity, TransmitActivity};
//! use evdash::telemetry::TelemetryBus;
//!
//! let config = Config::default();
//! let bus = TelemetryBus::new();
//!
//! // Wide-open throttle on the bench
//! let mut transmit = TransmitActivity::new(
//!     MockSensor::new(2160),
//!     MockLinkTx::new(),
//!     MockDiag::new(),
//!     &bus,
//!     &config,
//! );
//!
//! // The drive unit answers with a speed report
//! let mut rx = MockLinkRx::new();
//! rx.queue_line("S25");
//! let mut receive = ReceiveActivity::new(rx, &bus, &config);
//!
//! let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);
//! render.init().unwrap();
//!
//! // One scheduling round
//! transmit.tick();
//! receive.tick();
//! render.tick();
//!
//! assert_eq!(render.store().throttle_pct, 100);
//! assert_eq!(render.store().speed, 25);
//! assert!(render.store().link_up);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration system for desktop and ESP32.
pub mod config;
/// ASCII command-frame codec for the radio link.
pub mod frame;
/// Incremental gauge rendering.
pub mod gauge;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Two-state link connectivity indicator.
pub mod indicator;
/// Radio transceiver bring-up and command envelopes.
pub mod radio;
/// Throttle sample clamping and dual-scale mapping.
pub mod sampler;
/// The three periodic activities and their driving loop.
pub mod scheduler;
/// Telemetry store, events, and the bounded bus.
pub mod telemetry;
/// Core traits for hardware, link, and display abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{Config, LinkConfig, ScheduleConfig, SensorConfig};
pub use frame::TelemetryFrame;
pub use gauge::{GaugeRenderer, GaugeStyle};
pub use indicator::{IndicatorStyle, LinkIndicator};
pub use sampler::{ThrottleReading, ThrottleSampler};
pub use scheduler::{Activity, ReceiveActivity, RenderActivity, TransmitActivity};
pub use telemetry::{TelemetryBus, TelemetryEvent, TelemetryStore};
pub use traits::{Color, DiagSink, GaugePanel, LinkRx, LinkTx, ThrottleSensor};

#[cfg(feature = "std")]
pub use scheduler::drive;
