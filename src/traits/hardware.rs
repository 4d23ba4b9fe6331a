//! Hardware abstraction traits for the throttle sensor.
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).

/// Throttle sensor trait - abstracts a single-channel analog position sensor.
///
/// Implementations return the raw converter value; calibration, clamping
/// and scaling are the job of [`ThrottleSampler`](crate::ThrottleSampler),
/// not the sensor.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use evdash::traits::ThrottleSensor;
///
/// struct MySensor { /* ADC handle */ }
///
/// impl ThrottleSensor for MySensor {
///     type Error = ();
///
///     fn read_raw(&mut self) -> Result<u16, ()> {
///         // Read the ADC channel...
///         Ok(2048)
///     }
/// }
/// ```
pub trait ThrottleSensor {
    /// Error type for sensor reads.
    type Error;

    /// Read one raw sample from the converter.
    ///
    /// The value is unscaled hardware output (e.g. 0-4095 for a 12-bit
    /// converter). Out-of-range or noisy values are acceptable here; the
    /// sampler rejects and clamps them.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSensor {
        value: u16,
    }

    impl ThrottleSensor for TestSensor {
        type Error = ();

        fn read_raw(&mut self) -> Result<u16, ()> {
            Ok(self.value)
        }
    }

    #[test]
    fn sensor_returns_raw_value() {
        let mut sensor = TestSensor { value: 1234 };
        assert_eq!(sensor.read_raw(), Ok(1234));
    }
}
