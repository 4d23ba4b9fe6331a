//! ESP32-C3 hardware abstraction layer for the dashboard.
//!
//! This module provides hardware implementations for an ESP32-C3 board
//! carrying a hall throttle on ADC, an AT-command LoRa transceiver on
//! UART1, and an ST7789 TFT on SPI.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 (RISC-V 160MHz, 4MB Flash)
//! - **Throttle**: hall sensor, 0-3.3V into ADC1
//! - **Radio**: RYLR-class LoRa module, 115200 8N1
//! - **Display**: 320x240 ST7789 TFT (SPI)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod sensor;
mod uart;

pub use sensor::Esp32Throttle;
pub use uart::{split_link, Esp32LinkRx, Esp32LinkTx};

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::Esp32Panel;

/// Pin assignments for the ESP32-C3 dashboard board.
pub mod pins {
    // =========================================================================
    // Throttle (hall sensor)
    // =========================================================================

    /// Throttle analog input - ADC1 channel 0
    pub const THROTTLE_ADC: i32 = 0;

    // =========================================================================
    // Radio (LoRa module on UART1)
    // =========================================================================

    /// UART TX into the module's RXD
    pub const LORA_TX: i32 = 21;

    /// UART RX from the module's TXD
    pub const LORA_RX: i32 = 20;

    // =========================================================================
    // Display (ST7789 on SPI2)
    // =========================================================================

    /// SPI clock
    pub const TFT_SCK: i32 = 6;

    /// SPI data out
    pub const TFT_MOSI: i32 = 7;

    /// Chip select
    pub const TFT_CS: i32 = 10;

    /// Data/command select
    pub const TFT_DC: i32 = 4;

    /// Panel reset
    pub const TFT_RST: i32 = 5;
}
