//! Serial link traits for the radio transceiver module.
//!
//! The transceiver is a line-oriented AT-command module on a UART. The two
//! directions are modeled as separate traits so each can be exclusively
//! owned by its activity:
//!
//! | Trait | Owner |
//! |-------|-------|
//! | [`LinkTx`] | Transmit activity (and one-time radio configuration) |
//! | [`LinkRx`] | Receive activity |
//! | [`DiagSink`] | Transmit activity's side diagnostic channel |
//!
//! There is no acknowledgment or retry protocol on the link; a dropped
//! frame is simply never received. That is an accepted property of the
//! system, and these traits do not try to paper over it.

use heapless::String as HString;

/// Maximum length of one inbound serial line, including any module
/// envelope around the telemetry payload.
pub const MAX_LINE: usize = 64;

/// One received line, bounded for `no_std` use.
pub type LineBuf = HString<MAX_LINE>;

/// Outbound half of the serial link.
///
/// Writes one complete command line to the transceiver. Implementations
/// append the line terminator themselves; callers pass the bare command
/// text (e.g. `AT+SEND=2,3,T42`).
pub trait LinkTx {
    /// Error type for link writes.
    type Error;

    /// Write one command line to the module.
    ///
    /// Fire-and-forget: a successful return means the bytes were handed
    /// to the UART, not that the remote device received anything.
    fn send_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

/// Inbound half of the serial link.
///
/// The poll must never block beyond checking what is already buffered;
/// absence of data is the normal `Ok(None)` outcome, not an error.
pub trait LinkRx {
    /// Error type for link reads.
    type Error;

    /// Poll for one complete received line.
    ///
    /// Returns `Ok(Some(line))` when a full line was available,
    /// `Ok(None)` when the link was silent this cycle. Partial lines are
    /// buffered internally until their terminator arrives.
    fn poll_line(&mut self) -> Result<Option<LineBuf>, Self::Error>;
}

/// Side channel for raw diagnostic command text.
///
/// The transmit activity publishes every outbound command here verbatim,
/// which is how the original console trace worked. Sinks must be cheap;
/// they are called once per transmit cycle.
pub trait DiagSink {
    /// Record one diagnostic line.
    fn record(&mut self, line: &str);
}

/// Forwards diagnostic lines to the `log` facade at debug level.
///
/// The default sink for hardware builds, where a dedicated trace console
/// is not wired up.
#[derive(Debug, Default)]
pub struct LogDiag;

impl DiagSink for LogDiag {
    fn record(&mut self, line: &str) {
        log::debug!("link tx: {}", line);
    }
}
