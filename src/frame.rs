//! Command-frame codec for the radio link.
//!
//! Frames are short ASCII payloads: a single tag character followed by a
//! decimal body. The dashboard encodes throttle frames (`T<value>`); the
//! remote drive unit answers with speed (`S<value>`) and trip-distance
//! increments (`D<value>`). Anything else - unknown tag, junk body,
//! empty line - decodes to [`TelemetryFrame::Unrecognized`] so the caller
//! can decide how loud to be about it. Decoding never panics.
//!
//! # Example
//!
//! ```rust
//! use evdash::frame::{self, TelemetryFrame};
//!
//! assert_eq!(frame::encode_throttle(42).as_str(), "T42");
//! assert_eq!(frame::decode("S17"), TelemetryFrame::Speed(17));
//! assert_eq!(frame::decode("D3"), TelemetryFrame::TripDelta(3));
//! assert!(matches!(frame::decode("XYZ"), TelemetryFrame::Unrecognized(_)));
//! ```

use core::fmt::Write;

use heapless::String as HString;

/// Maximum length of one frame payload.
pub const MAX_FRAME: usize = 32;

/// A bounded frame payload buffer.
pub type FrameBuf = HString<MAX_FRAME>;

/// One telemetry frame as exchanged on the link.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TelemetryFrame {
    /// Throttle command, dashboard to drive unit (`T<value>`).
    Throttle(u16),
    /// Current speed report, drive unit to dashboard (`S<value>`).
    Speed(u16),
    /// Trip distance increment, drive unit to dashboard (`D<value>`).
    TripDelta(u32),
    /// Anything that did not parse; carries the raw text, truncated to
    /// the frame bound.
    Unrecognized(FrameBuf),
}

/// Encode a throttle frame: `T<value>`, no sign, no padding.
pub fn encode_throttle(value: u16) -> FrameBuf {
    let mut buf = FrameBuf::new();
    // A tag plus a u16 always fits MAX_FRAME
    let _ = write!(buf, "T{}", value);
    buf
}

/// Encode a speed frame (`S<value>`), the drive unit's side of the
/// protocol. Used by the simulator and round-trip tests.
pub fn encode_speed(value: u16) -> FrameBuf {
    let mut buf = FrameBuf::new();
    let _ = write!(buf, "S{}", value);
    buf
}

/// Encode a trip-distance increment frame (`D<value>`).
pub fn encode_trip_delta(value: u32) -> FrameBuf {
    let mut buf = FrameBuf::new();
    let _ = write!(buf, "D{}", value);
    buf
}

/// Decode one received payload.
///
/// Total over all inputs: malformed text yields
/// [`TelemetryFrame::Unrecognized`], never an error or a panic. The body
/// must be a bare decimal; signs, whitespace and trailing garbage all
/// count as malformed.
pub fn decode(raw: &str) -> TelemetryFrame {
    let mut chars = raw.chars();
    let Some(tag) = chars.next() else {
        return TelemetryFrame::Unrecognized(FrameBuf::new());
    };
    let body = chars.as_str();

    match tag {
        'T' => match parse_u16(body) {
            Some(v) => TelemetryFrame::Throttle(v),
            None => unrecognized(raw),
        },
        'S' => match parse_u16(body) {
            Some(v) => TelemetryFrame::Speed(v),
            None => unrecognized(raw),
        },
        'D' => match parse_u32(body) {
            Some(v) => TelemetryFrame::TripDelta(v),
            None => unrecognized(raw),
        },
        _ => unrecognized(raw),
    }
}

fn parse_u16(body: &str) -> Option<u16> {
    if body.is_empty() {
        return None;
    }
    body.parse().ok()
}

fn parse_u32(body: &str) -> Option<u32> {
    if body.is_empty() {
        return None;
    }
    body.parse().ok()
}

fn unrecognized(raw: &str) -> TelemetryFrame {
    let mut buf = FrameBuf::new();
    // Keep as much of the raw text as fits, on a char boundary
    for c in raw.chars() {
        if buf.push(c).is_err() {
            break;
        }
    }
    TelemetryFrame::Unrecognized(buf)
}
