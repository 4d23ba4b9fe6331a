//! ST7789 TFT panel for ESP32 over SPI.
//!
//! A minimal write-only driver for the 320x240 ST7789 controller,
//! exposed as an `embedded-graphics` draw target so the gauge renders
//! through [`EgPanel`](crate::hal::eg::EgPanel). Pixels are pushed
//! per-primitive; the incremental redraw policy upstream keeps the bus
//! traffic small, which is the whole point of that policy.
//!
//! # Wiring
//!
//! - SCK → GPIO6, MOSI → GPIO7, CS → GPIO10
//! - DC → GPIO4, RST → GPIO5
//! - Backlight tied to 3.3V

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver};
use esp_idf_hal::sys::EspError;

const WIDTH: u16 = 320;
const HEIGHT: u16 = 240;

// ST7789 command set, the subset this driver needs
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// ST7789 TFT panel driver.
///
/// # Example
///
/// ```ignore
/// use evdash::hal::esp32::Esp32Panel;
/// use evdash::hal::EgPanel;
///
/// let tft = Esp32Panel::new(spi_device, dc_pin, rst_pin)?;
/// let mut panel = EgPanel::new(tft);
/// ```
pub struct Esp32Panel<'d> {
    spi: SpiDeviceDriver<'d, SpiDriver<'d>>,
    dc: PinDriver<'d, AnyOutputPin, Output>,
    rst: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Esp32Panel<'d> {
    /// Creates and initializes the panel.
    ///
    /// Runs the controller's wake-up sequence and clears the screen to
    /// black. Takes ~300ms due to mandated post-reset delays.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI or GPIO setup fails.
    pub fn new(
        spi: SpiDeviceDriver<'d, SpiDriver<'d>>,
        dc: AnyOutputPin,
        rst: AnyOutputPin,
    ) -> Result<Self, EspError> {
        let mut panel = Self {
            spi,
            dc: PinDriver::output(dc)?,
            rst: PinDriver::output(rst)?,
        };
        panel.init()?;
        Ok(panel)
    }

    fn init(&mut self) -> Result<(), EspError> {
        // Hardware reset pulse
        self.rst.set_low()?;
        FreeRtos::delay_ms(20);
        self.rst.set_high()?;
        FreeRtos::delay_ms(120);

        self.command(SWRESET, &[])?;
        FreeRtos::delay_ms(150);
        self.command(SLPOUT, &[])?;
        FreeRtos::delay_ms(120);

        self.command(COLMOD, &[0x55])?; // 16bpp
        self.command(MADCTL, &[0x60])?; // landscape, RGB order
        self.command(INVON, &[])?; // panel ships inverted
        self.command(NORON, &[])?;
        self.command(DISPON, &[])?;
        FreeRtos::delay_ms(20);

        self.fill_rect(0, 0, WIDTH, HEIGHT, 0x0000)
    }

    fn command(&mut self, cmd: u8, data: &[u8]) -> Result<(), EspError> {
        self.dc.set_low()?;
        self.spi.write(&[cmd])?;
        if !data.is_empty() {
            self.dc.set_high()?;
            self.spi.write(data)?;
        }
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), EspError> {
        self.command(
            CASET,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )?;
        self.command(
            RASET,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )?;
        self.command(RAMWR, &[])?;
        self.dc.set_high()
    }

    fn write_pixel(&mut self, x: u16, y: u16, raw: u16) -> Result<(), EspError> {
        self.set_window(x, y, x, y)?;
        self.spi.write(&raw.to_be_bytes())
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, raw: u16) -> Result<(), EspError> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.set_window(x, y, x + w - 1, y + h - 1)?;

        let [hi, lo] = raw.to_be_bytes();
        let mut chunk = [0u8; 64];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = u32::from(w) * u32::from(h) * 2;
        while remaining > 0 {
            let n = remaining.min(chunk.len() as u32) as usize;
            self.spi.write(&chunk[..n])?;
            remaining -= n as u32;
        }
        Ok(())
    }
}

impl OriginDimensions for Esp32Panel<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl DrawTarget for Esp32Panel<'_> {
    type Color = Rgb565;
    type Error = EspError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= i32::from(WIDTH)
                || point.y >= i32::from(HEIGHT)
            {
                continue;
            }
            self.write_pixel(point.x as u16, point.y as u16, color.into_storage())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color.into_storage(),
        )
    }
}
