//! Incremental gauge rendering.
//!
//! The dial is a circular face with an arc that sweeps between a start
//! and end angle as the value moves across its domain. Repainting the
//! whole dial every tick would be correct but wasteful on a slow display
//! bus, so [`GaugeRenderer`] remembers the angle it last drew and only
//! touches the swept segment between the previous and the new needle
//! position:
//!
//! - value unchanged (same angle): no drawing at all
//! - value increased: the new segment is painted in the active color
//! - value decreased: the stale segment is painted back out in the face
//!   color
//!
//! The direction-dependent coloring is not just an optimization detail;
//! it doubles as the rising/falling cue the rider sees.
//!
//! # Example
//!
//! ```rust
//! use evdash::gauge::{GaugeRenderer, GaugeStyle};
//! use evdash::hal::MockPanel;
//!
//! let mut panel = MockPanel::new();
//! let mut gauge = GaugeRenderer::new(GaugeStyle::default());
//!
//! gauge.draw_face(&mut panel).unwrap();
//! assert!(gauge.render(&mut panel, 12).unwrap());  // paints the delta
//! assert!(!gauge.render(&mut panel, 12).unwrap()); // no-op, same angle
//! ```

use crate::traits::{Color, GaugePanel};

/// Geometry, domain and palette of one gauge.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeStyle {
    /// Dial center in panel pixels.
    pub center: (i32, i32),
    /// Dial face radius.
    pub radius: u32,
    /// Outer radius of the sweep arc.
    pub arc_outer: u32,
    /// Inner radius of the sweep arc.
    pub arc_inner: u32,
    /// Angle at the bottom of the value domain, degrees.
    pub start_angle: u16,
    /// Angle at the top of the value domain, degrees.
    pub end_angle: u16,
    /// Bottom of the value domain.
    pub value_min: u16,
    /// Top of the value domain.
    pub value_max: u16,
    /// Sweep color while the value rises.
    pub active: Color,
    /// Dial face color, also used to sweep back down.
    pub face: Color,
    /// Rim ring color.
    pub rim: Color,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        // 320x240 panel, 90px dial, 300 degree sweep
        let radius = 90;
        let arc_outer = radius - 3;
        Self {
            center: (160, 120),
            radius,
            arc_outer,
            arc_inner: arc_outer - arc_outer / 5,
            start_angle: 30,
            end_angle: 330,
            value_min: 0,
            value_max: 30,
            active: Color::GREEN,
            face: Color::DARKER_GREY,
            rim: Color::SILVER,
        }
    }
}

impl GaugeStyle {
    /// Map a value onto the arc domain, integer-rounded.
    ///
    /// Values outside the domain clamp to its ends, so the needle can
    /// never leave the dial.
    pub fn angle_for(&self, value: u16) -> u16 {
        let value = value.clamp(self.value_min, self.value_max);
        let span = u32::from(self.value_max - self.value_min);
        if span == 0 {
            return self.start_angle;
        }
        let offset = u32::from(value - self.value_min);
        let sweep = u32::from(self.end_angle - self.start_angle);
        self.start_angle + ((offset * sweep + span / 2) / span) as u16
    }
}

/// Stateful incremental renderer for one gauge.
///
/// `last_angle` always equals the angle last physically drawn; it is
/// updated only after a successful partial redraw, so a failed draw
/// retries the same segment next cycle.
#[derive(Debug)]
pub struct GaugeRenderer {
    style: GaugeStyle,
    last_angle: u16,
}

impl GaugeRenderer {
    /// Create a renderer. The needle starts at the bottom of the sweep.
    pub fn new(style: GaugeStyle) -> Self {
        Self {
            last_angle: style.start_angle,
            style,
        }
    }

    /// Paint the static dial once: face, rim ring, blank sweep track.
    ///
    /// Called at boot before the first [`render`](Self::render).
    pub fn draw_face<P: GaugePanel>(&self, panel: &mut P) -> Result<(), P::Error> {
        let (cx, cy) = self.style.center;
        panel.fill_circle(cx, cy, self.style.radius, self.style.face)?;
        panel.draw_arc(
            cx,
            cy,
            self.style.radius,
            self.style.radius - 2,
            0,
            360,
            self.style.rim,
            self.style.face,
        )?;
        panel.draw_arc(
            cx,
            cy,
            self.style.arc_outer,
            self.style.arc_inner,
            self.style.start_angle,
            self.style.end_angle,
            Color::BLACK,
            self.style.face,
        )
    }

    /// Render the given value, redrawing only what changed.
    ///
    /// Returns `Ok(true)` when something was drawn, `Ok(false)` for the
    /// same-angle no-op. On a draw error nothing is latched and the next
    /// call repaints the same delta.
    pub fn render<P: GaugePanel>(&mut self, panel: &mut P, value: u16) -> Result<bool, P::Error> {
        let target = self.style.angle_for(value);
        if target == self.last_angle {
            return Ok(false);
        }

        let (cx, cy) = self.style.center;

        // Numeric readout sits inside the arc; blank and redraw it
        panel.fill_circle(cx, cy, self.style.arc_inner, self.style.face)?;
        panel.draw_number(i32::from(value), cx, cy)?;

        if target > self.last_angle {
            panel.draw_arc(
                cx,
                cy,
                self.style.arc_outer,
                self.style.arc_inner,
                self.last_angle,
                target,
                self.style.active,
                Color::BLACK,
            )?;
        } else {
            panel.draw_arc(
                cx,
                cy,
                self.style.arc_outer,
                self.style.arc_inner,
                target,
                self.last_angle,
                Color::BLACK,
                self.style.face,
            )?;
        }

        self.last_angle = target;
        Ok(true)
    }

    /// The angle currently on the panel.
    pub fn last_angle(&self) -> u16 {
        self.last_angle
    }

    /// The style this renderer was built with.
    pub fn style(&self) -> &GaugeStyle {
        &self.style
    }
}
