//! Radio transceiver bring-up and command envelopes.
//!
//! The transceiver is an AT-command LoRa module on a UART. Two concerns
//! live here:
//!
//! - [`send_command`] wraps a frame payload in the module's send envelope
//!   (`AT+SEND=<dest>,<len>,<payload>`).
//! - [`configure`] runs the one-shot startup sequence: baud, RF
//!   parameters, local address, network id, then a few identity queries.
//!
//! Configuration is best-effort by design. The module has no real
//! handshake protocol: responses are read if one happens to be waiting
//! and logged, never validated, and a write failure is logged and
//! swallowed. Boot cannot fail here.

use core::fmt::Write;

use heapless::String as HString;

use crate::config::LinkConfig;
use crate::traits::{LinkRx, LinkTx};

/// Maximum length of one outbound command line, envelope included.
pub const MAX_COMMAND: usize = 64;

/// A bounded outbound command buffer.
pub type CommandBuf = HString<MAX_COMMAND>;

/// Build the module's send envelope around a frame payload.
///
/// # Example
///
/// ```rust
/// use evdash::radio::send_command;
///
/// let cmd = send_command(2, "T42");
/// assert_eq!(cmd.as_str(), "AT+SEND=2,3,T42");
/// ```
pub fn send_command(dest: u16, payload: &str) -> CommandBuf {
    let mut buf = CommandBuf::new();
    // dest and a MAX_FRAME payload always fit MAX_COMMAND
    let _ = write!(buf, "AT+SEND={},{},{}", dest, payload.len(), payload);
    buf
}

/// Run the startup configuration sequence against the module.
///
/// Called once at boot while both link halves are still in hand, before
/// they are handed to their activities. Each command is written, then
/// one response line is drained and logged if the module already
/// answered. Nothing is validated and nothing can fail the boot.
pub fn configure<T: LinkTx, R: LinkRx>(tx: &mut T, rx: &mut R, config: &LinkConfig) {
    let mut cmd = CommandBuf::new();

    let _ = write!(cmd, "AT+IPR={}", config.baud);
    exchange(tx, rx, &cmd);

    cmd.clear();
    let _ = write!(cmd, "AT+PARAMETER={}", config.rf_parameters.as_str());
    exchange(tx, rx, &cmd);

    cmd.clear();
    let _ = write!(cmd, "AT+ADDRESS={}", config.address);
    exchange(tx, rx, &cmd);

    cmd.clear();
    let _ = write!(cmd, "AT+NETWORKID={}", config.network_id);
    exchange(tx, rx, &cmd);

    // Identity and RF state queries, answers informational only
    for query in ["AT+VER?", "AT+BAND?", "AT+CRFOP?"] {
        exchange(tx, rx, query);
    }
}

/// Write one command and opportunistically log whatever answer is
/// already buffered.
fn exchange<T: LinkTx, R: LinkRx>(tx: &mut T, rx: &mut R, command: &str) {
    if tx.send_line(command).is_err() {
        log::warn!("radio: write failed for {}", command);
        return;
    }
    match rx.poll_line() {
        Ok(Some(line)) => log::info!("radio: {} -> {}", command, line.as_str()),
        Ok(None) => log::info!("radio: {} (no response yet)", command),
        Err(_) => log::warn!("radio: read failed after {}", command),
    }
}
