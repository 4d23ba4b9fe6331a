//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware and link traits,
//! enabling development and testing on desktop without a vehicle.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockSensor`] | [`ThrottleSensor`] | Queued or constant raw readings |
//! | [`MockLinkTx`] | [`LinkTx`] | Captures sent command lines |
//! | [`MockLinkRx`] | [`LinkRx`] | Queued inbound lines |
//! | [`MockPanel`] | [`GaugePanel`] | Records drawing operations |
//! | [`MockDiag`] | [`DiagSink`] | Captures diagnostic lines |
//!
//! # Example
//!
//! ```rust
//! use evdash::hal::{MockPanel, PanelOp};
//! use evdash::gauge::{GaugeRenderer, GaugeStyle};
//!
//! let mut panel = MockPanel::new();
//! let mut gauge = GaugeRenderer::new(GaugeStyle::default());
//!
//! gauge.render(&mut panel, 10).unwrap();
//! assert!(panel.ops.iter().any(|op| matches!(op, PanelOp::DrawArc { .. })));
//! ```
//!
//! [`ThrottleSensor`]: crate::traits::ThrottleSensor
//! [`LinkTx`]: crate::traits::LinkTx
//! [`LinkRx`]: crate::traits::LinkRx
//! [`GaugePanel`]: crate::traits::GaugePanel
//! [`DiagSink`]: crate::traits::DiagSink

use crate::traits::{Color, DiagSink, GaugePanel, LineBuf, LinkRx, LinkTx, ThrottleSensor};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

// ============================================================================
// Sensor Mock
// ============================================================================

/// Mock throttle sensor.
///
/// Returns queued readings in FIFO order, then falls back to a constant.
/// Can be made to fail every read for error-path testing.
///
/// # Example
///
/// ```rust
/// use evdash::hal::MockSensor;
/// use evdash::traits::ThrottleSensor;
///
/// let mut sensor = MockSensor::new(1590);
/// sensor.queue_reading(2000);
///
/// assert_eq!(sensor.read_raw(), Ok(2000)); // queued first
/// assert_eq!(sensor.read_raw(), Ok(1590)); // then the fallback
/// ```
#[derive(Debug, Default)]
pub struct MockSensor {
    readings: Vec<u16>,
    fallback: u16,
    fail_reads: bool,
}

impl MockSensor {
    /// Creates a sensor that constantly reads `fallback`.
    pub fn new(fallback: u16) -> Self {
        Self {
            fallback,
            ..Default::default()
        }
    }

    /// Queue a reading to be returned before the fallback (FIFO).
    pub fn queue_reading(&mut self, raw: u16) {
        self.readings.push(raw);
    }

    /// Make every read fail.
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl ThrottleSensor for MockSensor {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, ()> {
        if self.fail_reads {
            return Err(());
        }
        if self.readings.is_empty() {
            Ok(self.fallback)
        } else {
            Ok(self.readings.remove(0))
        }
    }
}

// ============================================================================
// Link Mocks
// ============================================================================

/// Mock outbound link half.
///
/// Records every sent line for verification.
#[derive(Debug, Default)]
pub struct MockLinkTx {
    /// Lines that have been sent, in order.
    pub sent: Vec<String>,
    fail_writes: bool,
}

impl MockLinkTx {
    /// Creates a mock TX half.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl LinkTx for MockLinkTx {
    type Error = ();

    fn send_line(&mut self, line: &str) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.sent.push(line.into());
        Ok(())
    }
}

/// Mock inbound link half.
///
/// Queue lines to simulate the remote device; an empty queue is link
/// silence.
///
/// # Example
///
/// ```rust
/// use evdash::hal::MockLinkRx;
/// use evdash::traits::LinkRx;
///
/// let mut rx = MockLinkRx::new();
/// rx.queue_line("S20");
///
/// assert_eq!(rx.poll_line().unwrap().unwrap().as_str(), "S20");
/// assert!(rx.poll_line().unwrap().is_none()); // silent now
/// ```
#[derive(Debug, Default)]
pub struct MockLinkRx {
    incoming: Vec<String>,
    fail_reads: bool,
}

impl MockLinkRx {
    /// Creates a silent mock RX half.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an inbound line (FIFO).
    pub fn queue_line(&mut self, line: impl Into<String>) {
        self.incoming.push(line.into());
    }

    /// Make every poll fail.
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl LinkRx for MockLinkRx {
    type Error = ();

    fn poll_line(&mut self) -> Result<Option<LineBuf>, ()> {
        if self.fail_reads {
            return Err(());
        }
        if self.incoming.is_empty() {
            return Ok(None);
        }
        let raw = self.incoming.remove(0);
        let mut line = LineBuf::new();
        for c in raw.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        Ok(Some(line))
    }
}

// ============================================================================
// Diagnostic Mock
// ============================================================================

/// Mock diagnostic sink that captures recorded lines.
#[derive(Debug, Default)]
pub struct MockDiag {
    /// Lines recorded, in order.
    pub lines: Vec<String>,
}

impl MockDiag {
    /// Creates an empty mock sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagSink for MockDiag {
    fn record(&mut self, line: &str) {
        self.lines.push(line.into());
    }
}

// ============================================================================
// Panel Mock
// ============================================================================

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelOp {
    /// A `fill_circle` call.
    FillCircle {
        /// Center x.
        cx: i32,
        /// Center y.
        cy: i32,
        /// Radius.
        r: u32,
        /// Fill color.
        color: Color,
    },
    /// A `draw_arc` call.
    DrawArc {
        /// Center x.
        cx: i32,
        /// Center y.
        cy: i32,
        /// Outer radius.
        r_outer: u32,
        /// Inner radius.
        r_inner: u32,
        /// Sweep start, degrees.
        start_deg: u16,
        /// Sweep end, degrees.
        end_deg: u16,
        /// Segment color.
        fg: Color,
        /// Backdrop hint.
        bg: Color,
    },
    /// A `draw_number` call.
    DrawNumber {
        /// The value drawn.
        value: i32,
        /// Anchor x.
        cx: i32,
        /// Anchor y.
        cy: i32,
    },
    /// A `draw_text` call.
    DrawText {
        /// The text drawn.
        text: String,
        /// Anchor x.
        x: i32,
        /// Anchor y.
        y: i32,
        /// Text color.
        color: Color,
    },
    /// A `fill_triangle` call.
    FillTriangle {
        /// First vertex.
        p1: (i32, i32),
        /// Second vertex.
        p2: (i32, i32),
        /// Third vertex.
        p3: (i32, i32),
        /// Fill color.
        color: Color,
    },
}

/// Compact view of one recorded arc, for sweep assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcRecord {
    /// Sweep start, degrees.
    pub start_deg: u16,
    /// Sweep end, degrees.
    pub end_deg: u16,
    /// Segment color.
    pub fg: Color,
    /// Backdrop hint.
    pub bg: Color,
}

/// Mock panel that records every drawing operation.
///
/// `fail_next(n)` makes the next `n` operations fail, for testing that
/// renderers do not latch state across a failed draw.
#[derive(Debug, Default)]
pub struct MockPanel {
    /// All recorded operations, in call order.
    pub ops: Vec<PanelOp>,
    fail_budget: usize,
}

impl MockPanel {
    /// Creates an empty mock panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` drawing operations fail.
    pub fn fail_next(&mut self, n: usize) {
        self.fail_budget = n;
    }

    /// Forget all recorded operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// All recorded arcs, in call order.
    pub fn arcs(&self) -> Vec<ArcRecord> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                PanelOp::DrawArc {
                    start_deg,
                    end_deg,
                    fg,
                    bg,
                    ..
                } => Some(ArcRecord {
                    start_deg,
                    end_deg,
                    fg,
                    bg,
                }),
                _ => None,
            })
            .collect()
    }

    fn check(&mut self) -> Result<(), ()> {
        if self.fail_budget > 0 {
            self.fail_budget -= 1;
            return Err(());
        }
        Ok(())
    }
}

impl GaugePanel for MockPanel {
    type Error = ();

    fn fill_circle(&mut self, cx: i32, cy: i32, r: u32, color: Color) -> Result<(), ()> {
        self.check()?;
        self.ops.push(PanelOp::FillCircle { cx, cy, r, color });
        Ok(())
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
        bg: Color,
    ) -> Result<(), ()> {
        self.check()?;
        self.ops.push(PanelOp::DrawArc {
            cx,
            cy,
            r_outer,
            r_inner,
            start_deg,
            end_deg,
            fg,
            bg,
        });
        Ok(())
    }

    fn draw_number(&mut self, value: i32, cx: i32, cy: i32) -> Result<(), ()> {
        self.check()?;
        self.ops.push(PanelOp::DrawNumber { value, cx, cy });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) -> Result<(), ()> {
        self.check()?;
        self.ops.push(PanelOp::DrawText {
            text: text.into(),
            x,
            y,
            color,
        });
        Ok(())
    }

    fn fill_triangle(
        &mut self,
        p1: (i32, i32),
        p2: (i32, i32),
        p3: (i32, i32),
        color: Color,
    ) -> Result<(), ()> {
        self.check()?;
        self.ops.push(PanelOp::FillTriangle { p1, p2, p3, color });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
