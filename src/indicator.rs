//! Link connectivity indicator.
//!
//! A small two-state glyph in a corner of the panel: an antenna wedge in
//! the active color while the drive unit is answering, the same wedge in
//! the alarm color with a strike mark when the link has gone silent.
//! Only a connectivity transition repaints it; repeated identical reads
//! cost nothing. The region is small and has exactly two states, so a
//! full clear-and-redraw per transition is fine - no incremental variant
//! needed.

use crate::traits::{Color, GaugePanel};

/// Placement and palette of the indicator.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorStyle {
    /// Region center in panel pixels.
    pub center: (i32, i32),
    /// Radius of the cleared region.
    pub region_radius: u32,
    /// Glyph half-width/height.
    pub glyph_size: i32,
    /// Color while the link is up.
    pub up_color: Color,
    /// Color while the link is down.
    pub down_color: Color,
    /// Backdrop the region is cleared to.
    pub backdrop: Color,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            center: (296, 24),
            region_radius: 18,
            glyph_size: 10,
            up_color: Color::GREEN,
            down_color: Color::RED,
            backdrop: Color::BLACK,
        }
    }
}

/// Stateful two-state connectivity glyph.
///
/// `last_up` starts out unset so the very first update always paints,
/// whatever the initial link state is.
#[derive(Debug)]
pub struct LinkIndicator {
    style: IndicatorStyle,
    last_up: Option<bool>,
}

impl LinkIndicator {
    /// Create an indicator that has not drawn yet.
    pub fn new(style: IndicatorStyle) -> Self {
        Self {
            style,
            last_up: None,
        }
    }

    /// Reflect the given link state, repainting only on a transition.
    ///
    /// Returns `Ok(true)` when the glyph was redrawn. On a draw error
    /// nothing is latched, so the next call repaints.
    pub fn update<P: GaugePanel>(&mut self, panel: &mut P, up: bool) -> Result<bool, P::Error> {
        if self.last_up == Some(up) {
            return Ok(false);
        }

        let s = &self.style;
        let (cx, cy) = s.center;
        let h = s.glyph_size;

        panel.fill_circle(cx, cy, s.region_radius, s.backdrop)?;

        let color = if up { s.up_color } else { s.down_color };
        panel.fill_triangle((cx, cy - h), (cx - h, cy + h), (cx + h, cy + h), color)?;
        if !up {
            panel.draw_text("X", cx, cy, Color::WHITE)?;
        }

        self.last_up = Some(up);
        Ok(true)
    }

    /// The state currently on the panel, if any.
    pub fn last_up(&self) -> Option<bool> {
        self.last_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockPanel, PanelOp};

    fn indicator() -> LinkIndicator {
        LinkIndicator::new(IndicatorStyle::default())
    }

    #[test]
    fn first_update_always_paints() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();
        assert!(ind.update(&mut panel, false).unwrap());
        assert_eq!(ind.last_up(), Some(false));
    }

    #[test]
    fn repeated_state_is_a_noop() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();
        ind.update(&mut panel, true).unwrap();
        let ops = panel.ops.len();

        assert!(!ind.update(&mut panel, true).unwrap());
        assert!(!ind.update(&mut panel, true).unwrap());
        assert_eq!(panel.ops.len(), ops);
    }

    #[test]
    fn one_repaint_per_transition() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();

        for up in [true, true, false, false, true] {
            ind.update(&mut panel, up).unwrap();
        }

        // Three transitions: none->true, true->false, false->true
        let clears = panel
            .ops
            .iter()
            .filter(|op| matches!(op, PanelOp::FillCircle { .. }))
            .count();
        assert_eq!(clears, 3);
    }

    #[test]
    fn down_state_draws_strike() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();
        ind.update(&mut panel, false).unwrap();

        assert!(panel
            .ops
            .iter()
            .any(|op| matches!(op, PanelOp::DrawText { .. })));
    }

    #[test]
    fn up_state_has_no_strike() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();
        ind.update(&mut panel, true).unwrap();

        assert!(!panel
            .ops
            .iter()
            .any(|op| matches!(op, PanelOp::DrawText { .. })));
    }

    #[test]
    fn failed_draw_does_not_latch() {
        let mut panel = MockPanel::new();
        let mut ind = indicator();

        panel.fail_next(1);
        assert!(ind.update(&mut panel, true).is_err());
        assert_eq!(ind.last_up(), None);

        assert!(ind.update(&mut panel, true).unwrap());
        assert_eq!(ind.last_up(), Some(true));
    }
}
