//! ESP32-C3 dashboard firmware.
//!
//! This is the main entry point for the vehicle hardware. It brings up
//! the throttle ADC, the LoRa module on UART1 and (if enabled) the
//! ST7789 TFT, then runs the three periodic activities on their own
//! threads:
//! - Transmit: sample the throttle, radio it to the drive unit (250ms)
//! - Receive: poll the module for speed/trip reports (250ms)
//! - Render: drive the gauge, link indicator and trip readout (500ms)
//!
//! # Build
//!
//! ```bash
//! # Headless link bridge (no display)
//! cargo build --features esp32 --bin esp32_main
//!
//! # With the TFT gauge
//! cargo build --features esp32,display --bin esp32_main
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{self, UartDriver};
use evdash::config::Config;
use evdash::hal::esp32::{split_link, Esp32Throttle};
use evdash::scheduler::{drive, ReceiveActivity, TransmitActivity};
use evdash::telemetry::TelemetryBus;
use evdash::traits::LogDiag;
use evdash::radio;
use std::thread;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    println!();
    println!("================================");
    println!("  evdash dashboard");
    println!("================================");
    println!();

    let config = Config::default();
    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Throttle (hall sensor on GPIO0 ADC)
    // =========================================================================
    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let throttle = Esp32Throttle::new(&adc1, peripherals.pins.gpio0)?;
    println!("[OK] Throttle sensor initialized (GPIO0 ADC)");

    // =========================================================================
    // Initialize Radio (LoRa module on UART1, GPIO21/20)
    // =========================================================================
    let uart_config = uart::config::Config::new().baudrate(Hertz(config.link.baud));
    let serial = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio21,
        peripherals.pins.gpio20,
        Option::<esp_idf_hal::gpio::Gpio3>::None,
        Option::<esp_idf_hal::gpio::Gpio3>::None,
        &uart_config,
    )?;
    let (mut link_tx, mut link_rx) = split_link(serial);
    println!("[OK] Radio UART initialized (GPIO21/20)");

    // Best-effort module bring-up; responses are logged, never validated
    radio::configure(&mut link_tx, &mut link_rx, &config.link);
    println!("[OK] Radio configuration sent");

    // =========================================================================
    // Telemetry bus and link activities
    // =========================================================================
    let bus = TelemetryBus::new();
    let mut transmit = TransmitActivity::new(throttle, link_tx, LogDiag, &bus, &config);
    let mut receive = ReceiveActivity::new(link_rx, &bus, &config);

    // =========================================================================
    // Initialize Display (ST7789 on SPI2) - Optional
    // =========================================================================
    #[cfg(feature = "display")]
    let mut render = {
        use esp_idf_hal::spi::config::{Config as SpiConfig, DriverConfig as SpiDriverConfig};
        use esp_idf_hal::spi::SpiDeviceDriver;
        use evdash::hal::esp32::Esp32Panel;
        use evdash::hal::EgPanel;
        use evdash::scheduler::RenderActivity;

        let spi = SpiDeviceDriver::new_single(
            peripherals.spi2,
            peripherals.pins.gpio6,
            peripherals.pins.gpio7,
            Option::<esp_idf_hal::gpio::Gpio8>::None,
            Some(peripherals.pins.gpio10),
            &SpiDriverConfig::new(),
            &SpiConfig::new().baudrate(40.MHz().into()),
        )?;
        let tft = Esp32Panel::new(
            spi,
            peripherals.pins.gpio4.downgrade_output(),
            peripherals.pins.gpio5.downgrade_output(),
        )?;
        let mut render = RenderActivity::new(EgPanel::new(tft), &bus, &config);
        render.init()?;
        println!("[OK] Display initialized (SPI2), dial painted");
        render
    };

    println!("[OK] Activities ready, entering scheduling loop");
    println!();

    thread::scope(|scope| {
        scope.spawn(|| drive(&mut transmit));

        #[cfg(feature = "display")]
        scope.spawn(|| drive(&mut render));

        drive(&mut receive)
    })
}
