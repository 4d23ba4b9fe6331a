//! Hall throttle sensing via ESP32 ADC.
//!
//! The throttle is a hall-effect sensor outputting 0.8-1.7V across its
//! travel, read through ADC1. Raw values go to the sampler uncorrected;
//! calibration lives in [`SensorConfig`](crate::config::SensorConfig),
//! not here.
//!
//! # Wiring
//!
//! - Signal → GPIO0 (ADC1 channel 0)
//! - Supply → 3.3V, GND → GND
//!
//! Note: On ESP32-C3, GPIO0-4 are on ADC1. ADC2 has limitations and is
//! not used.

use crate::traits::ThrottleSensor;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::Gpio0;
use esp_idf_hal::peripheral::Peripheral;

/// Hall throttle sensor on ADC1.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::adc::oneshot::AdcDriver;
/// use evdash::hal::esp32::Esp32Throttle;
/// use evdash::traits::ThrottleSensor;
///
/// let peripherals = Peripherals::take()?;
/// let adc1 = AdcDriver::new(peripherals.adc1)?;
/// let mut throttle = Esp32Throttle::new(&adc1, peripherals.pins.gpio0)?;
///
/// let raw = throttle.read_raw()?;
/// ```
pub struct Esp32Throttle<'d> {
    channel: AdcChannelDriver<'d, Gpio0, &'d AdcDriver<'d, ADC1>>,
}

impl<'d> Esp32Throttle<'d> {
    /// Creates a new throttle sensor.
    ///
    /// # Arguments
    ///
    /// * `adc` - Reference to ADC1 driver (must outlive this struct)
    /// * `pin` - GPIO0, the throttle signal input
    ///
    /// # Errors
    ///
    /// Returns an error if ADC channel initialization fails.
    pub fn new(
        adc: &'d AdcDriver<'d, ADC1>,
        pin: impl Peripheral<P = Gpio0> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let channel = AdcChannelDriver::new(adc, pin, &config)?;
        Ok(Self { channel })
    }
}

impl ThrottleSensor for Esp32Throttle<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        self.channel.read()
    }
}
