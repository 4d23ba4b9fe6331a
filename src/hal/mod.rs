//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `eg`: Gauge panel adapter for `embedded-graphics` draw targets
//!   (requires `display` feature)
//! - `esp32`: ESP32-C3 with an AT-command LoRa module on UART1
//!   (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "display")]
pub mod eg;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "display")]
pub use eg::*;

#[cfg(feature = "esp32")]
pub use esp32::*;
