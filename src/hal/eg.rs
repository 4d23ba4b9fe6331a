//! Gauge panel adapter for `embedded-graphics` draw targets.
//!
//! [`EgPanel`] implements [`GaugePanel`] on top of any RGB565
//! [`DrawTarget`], so the renderer works unchanged against an SPI TFT, a
//! simulator window, or a framebuffer. The concrete display driver stays
//! out of the core; this adapter is the whole bridge.
//!
//! # Angle convention
//!
//! Panel angles are degrees clockwise from the 6 o'clock position, the
//! convention TFT gauge widgets use. `embedded-graphics` measures from
//! the 3 o'clock position, so the adapter shifts by 90 degrees.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle, StyledDrawable, Triangle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String as HString;

use crate::traits::{Color, GaugePanel};

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::from(RawU16::new(color.0))
    }
}

/// [`GaugePanel`] over any RGB565 `embedded-graphics` draw target.
///
/// # Example
///
/// ```rust,ignore
/// use evdash::hal::EgPanel;
///
/// let display = /* any DrawTarget<Color = Rgb565> */;
/// let mut panel = EgPanel::new(display);
/// gauge.draw_face(&mut panel)?;
/// ```
pub struct EgPanel<D> {
    target: D,
}

impl<D> EgPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// The wrapped draw target.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target.
    pub fn into_inner(self) -> D {
        self.target
    }

    fn angle(deg: u16) -> Angle {
        // 6 o'clock clockwise -> 3 o'clock based
        Angle::from_degrees(f32::from(deg) + 90.0)
    }
}

impl<D> GaugePanel for EgPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill_circle(&mut self, cx: i32, cy: i32, r: u32, color: Color) -> Result<(), Self::Error> {
        Circle::with_center(Point::new(cx, cy), r * 2)
            .draw_styled(&PrimitiveStyle::with_fill(color.into()), &mut self.target)
    }

    fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        r_outer: u32,
        r_inner: u32,
        start_deg: u16,
        end_deg: u16,
        fg: Color,
        _bg: Color,
    ) -> Result<(), Self::Error> {
        // A stroked arc on the mid radius spans exactly r_inner..r_outer
        // with center stroke alignment
        let diameter = r_outer + r_inner;
        let sweep = Angle::from_degrees(f32::from(end_deg.saturating_sub(start_deg)));
        Arc::with_center(Point::new(cx, cy), diameter, Self::angle(start_deg), sweep).draw_styled(
            &PrimitiveStyle::with_stroke(fg.into(), r_outer - r_inner),
            &mut self.target,
        )
    }

    fn draw_number(&mut self, value: i32, cx: i32, cy: i32) -> Result<(), Self::Error> {
        let mut buf: HString<12> = HString::new();
        let _ = write!(buf, "{}", value);
        let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
        Text::with_alignment(&buf, Point::new(cx, cy), style, Alignment::Center)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, color.into());
        Text::with_alignment(text, Point::new(x, y), style, Alignment::Center)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn fill_triangle(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        color: Color,
    ) -> Result<(), Self::Error> {
        Triangle::new(
            Point::new(p1.0, p1.1),
            Point::new(p2.0, p2.1),
            Point::new(p3.0, p3.1),
        )
        .draw_styled(&PrimitiveStyle::with_fill(color.into()), &mut self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn panel() -> EgPanel<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        // The gauge legitimately repaints pixels between calls
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        EgPanel::new(display)
    }

    #[test]
    fn color_conversion_roundtrip() {
        let rgb: Rgb565 = Color::GREEN.into();
        assert_eq!(rgb, Rgb565::GREEN);
        let rgb: Rgb565 = Color::BLACK.into();
        assert_eq!(rgb, Rgb565::BLACK);
    }

    #[test]
    fn primitives_draw_without_error() {
        let mut panel = panel();
        panel.fill_circle(32, 32, 10, Color::DARKER_GREY).unwrap();
        panel
            .draw_arc(32, 32, 20, 16, 30, 120, Color::GREEN, Color::BLACK)
            .unwrap();
        panel.draw_number(42, 32, 32).unwrap();
        panel.draw_text("trip", 32, 50, Color::WHITE).unwrap();
        panel
            .fill_triangle((10, 10), (0, 20), (20, 20), Color::RED)
            .unwrap();
    }
}
