//! UART link halves for the LoRa module.
//!
//! The transceiver speaks line-oriented AT commands over UART1. The
//! driver is split at setup so each direction can be exclusively owned
//! by its activity: [`Esp32LinkTx`] by transmit, [`Esp32LinkRx`] by
//! receive.
//!
//! # Wiring
//!
//! - GPIO21 (TX) → module RXD
//! - GPIO20 (RX) ← module TXD
//! - Module VCC → 3.3V (the module is not 5V tolerant)

use esp_idf_hal::sys::EspError;
use esp_idf_hal::uart::{UartDriver, UartRxDriver, UartTxDriver};
use heapless::Vec as HVec;

use crate::traits::{LineBuf, LinkRx, LinkTx};

/// Raw bytes buffered while waiting for a line terminator.
const PENDING_CAPACITY: usize = 128;

/// Split a configured UART driver into the two link halves.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::uart::{config::Config, UartDriver};
/// use esp_idf_hal::units::Hertz;
/// use evdash::hal::esp32::split_link;
///
/// let config = Config::new().baudrate(Hertz(115_200));
/// let uart = UartDriver::new(
///     peripherals.uart1,
///     peripherals.pins.gpio21,
///     peripherals.pins.gpio20,
///     Option::<esp_idf_hal::gpio::Gpio3>::None,
///     Option::<esp_idf_hal::gpio::Gpio3>::None,
///     &config,
/// )?;
/// let (tx, rx) = split_link(uart);
/// ```
pub fn split_link(uart: UartDriver<'_>) -> (Esp32LinkTx<'_>, Esp32LinkRx<'_>) {
    let (tx, rx) = uart.into_split();
    (
        Esp32LinkTx { tx },
        Esp32LinkRx {
            rx,
            pending: HVec::new(),
        },
    )
}

/// Outbound UART half. Appends CRLF, as the module expects.
pub struct Esp32LinkTx<'d> {
    tx: UartTxDriver<'d>,
}

impl LinkTx for Esp32LinkTx<'_> {
    type Error = EspError;

    fn send_line(&mut self, line: &str) -> Result<(), EspError> {
        self.tx.write(line.as_bytes())?;
        self.tx.write(b"\r\n")?;
        Ok(())
    }
}

/// Inbound UART half with line assembly.
///
/// Polls the UART with a zero-tick timeout, accumulating bytes until a
/// newline. Trailing CR is stripped. If the accumulator overflows with
/// no terminator in sight the buffered bytes are discarded to resync,
/// which surfaces downstream as one unrecognized frame at worst.
pub struct Esp32LinkRx<'d> {
    rx: UartRxDriver<'d>,
    pending: HVec<u8, PENDING_CAPACITY>,
}

impl LinkRx for Esp32LinkRx<'_> {
    type Error = EspError;

    fn poll_line(&mut self) -> Result<Option<LineBuf>, EspError> {
        let mut chunk = [0u8; 32];
        loop {
            // Timeout 0: take only what is already buffered
            let n = self.rx.read(&mut chunk, 0)?;
            if n == 0 {
                return Ok(None);
            }
            for &byte in &chunk[..n] {
                if byte == b'\n' {
                    let line = take_line(&mut self.pending);
                    return Ok(Some(line));
                }
                if self.pending.push(byte).is_err() {
                    log::warn!("rx line overflow, resyncing");
                    self.pending.clear();
                }
            }
        }
    }
}

/// Drain the accumulator into a bounded line, dropping a trailing CR
/// and anything that does not fit or is not UTF-8.
fn take_line(pending: &mut HVec<u8, PENDING_CAPACITY>) -> LineBuf {
    let mut bytes: &[u8] = pending.as_slice();
    if bytes.last() == Some(&b'\r') {
        bytes = &bytes[..bytes.len() - 1];
    }

    let mut line = LineBuf::new();
    if let Ok(text) = core::str::from_utf8(bytes) {
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
    }
    pending.clear();
    line
}
