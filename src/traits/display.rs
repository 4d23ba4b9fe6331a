//! Display abstraction for gauge rendering.
//!
//! This module defines the [`GaugePanel`] trait, the small set of drawing
//! primitives the dashboard needs from a display driver, and the RGB565
//! [`Color`] type used across the rendering code.
//!
//! The panel is a consumed capability: the renderer calls these operations
//! as opaque requests and never assumes anything about how they are
//! rasterized. The `display` feature provides an adapter for any
//! `embedded-graphics` RGB565 draw target; `hal::mock::MockPanel` records
//! operations for tests.

/// An RGB565 color as used by small TFT panels.
///
/// Stored as the raw 16-bit value so drivers can push it to the bus
/// unconverted. Constants cover the dashboard's fixed palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u16);

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color(0x0000);
    /// Pure white.
    pub const WHITE: Color = Color(0xFFFF);
    /// Silver, used for the gauge rim.
    pub const SILVER: Color = Color(0xC618);
    /// Bright green, the "value increasing" sweep color.
    pub const GREEN: Color = Color(0x07E0);
    /// Bright red, the link-down alarm color.
    pub const RED: Color = Color(0xF800);
    /// Very dark grey, the gauge face color.
    pub const DARKER_GREY: Color = Color(0x18E0);
}

/// Drawing capability consumed by the gauge renderer and link indicator.
///
/// Mirrors the primitives a typical TFT widget library exposes. All
/// coordinates are pixels with the origin at the panel's top-left.
///
/// # Errors
///
/// Drawing failures are display-bus problems; the render activity logs
/// them and carries on. Nothing in the core treats them as fatal.
pub trait GaugePanel {
    /// Error type for drawing operations.
    type Error;

    /// Fill a circle centered at (`cx`, `cy`).
    fn fill_circle(&mut self, cx: i32, cy: i32, r: u32, color: Color) -> Result<(), Self::Error>;

    /// Draw an arc ring segment between two radii.
    ///
    /// Angles are degrees, clockwise from the gauge's zero position,
    /// with `start_deg <= end_deg`. `fg` fills the segment; `bg` is the
    /// anti-aliasing backdrop hint (drivers without smoothing ignore it).
    #[allow(clippy::too_many_arguments)]
    fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        r_outer: u32,
        r_inner: u32,
        start_deg: u16,
        end_deg: u16,
        fg: Color,
        bg: Color,
    ) -> Result<(), Self::Error>;

    /// Draw an integer value centered at (`cx`, `cy`) in the panel's
    /// large numeric font.
    fn draw_number(&mut self, value: i32, cx: i32, cy: i32) -> Result<(), Self::Error>;

    /// Draw a short text label with its anchor at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), Self::Error>;

    /// Fill a triangle given three vertices.
    fn fill_triangle(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        color: Color,
    ) -> Result<(), Self::Error>;
}
