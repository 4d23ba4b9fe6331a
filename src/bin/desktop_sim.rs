//! Desktop dashboard simulation.
//!
//! Runs the full telemetry pipeline against a simulated drive unit: a
//! wandering throttle feeds the transmit activity, the fake drive unit
//! answers throttle frames with speed and trip reports, and the render
//! activity draws onto a console panel that narrates what a TFT would
//! show.
//!
//! # Run
//!
//! ```bash
//! cargo run --bin desktop_sim
//! ```
//!
//! Stop with Ctrl-C; like the firmware, the loop has no exit state.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;

use evdash::config::Config;
use evdash::frame::{self, TelemetryFrame};
use evdash::hal::MockDiag;
use evdash::scheduler::{drive, ReceiveActivity, RenderActivity, TransmitActivity};
use evdash::telemetry::TelemetryBus;
use evdash::traits::{Color, GaugePanel, LineBuf, LinkRx, LinkTx, ThrottleSensor};
use evdash::{radio, GaugeStyle};

/// Top speed the simulated drive unit reaches at full throttle.
const SIM_MAX_SPEED: u16 = 30;

fn main() -> anyhow::Result<()> {
    println!();
    println!("================================");
    println!("  evdash desktop simulation");
    println!("================================");
    println!();

    let config = Config::default();
    let bus = TelemetryBus::new();

    let unit = SimDriveUnit::new(config.sensor.wire_full_scale);
    let (mut tx, mut rx) = unit.split();

    // Best-effort radio bring-up against the simulated module
    radio::configure(&mut tx, &mut rx, &config.link);
    println!("[OK] Radio configured (simulated)");

    let mut transmit = TransmitActivity::new(SweepingThrottle::new(), tx, MockDiag::new(), &bus, &config);
    let mut receive = ReceiveActivity::new(rx, &bus, &config);
    let mut render = RenderActivity::new(ConsolePanel, &bus, &config);

    render.init()?;
    println!("[OK] Dial painted, starting activities");
    println!();

    thread::scope(|scope| {
        scope.spawn(|| drive(&mut transmit));
        scope.spawn(|| drive(&mut receive));
        drive(&mut render)
    })
}

// ============================================================================
// Simulated throttle
// ============================================================================

/// Throttle that sweeps up and down across the calibrated window.
struct SweepingThrottle {
    raw: u16,
    rising: bool,
}

impl SweepingThrottle {
    fn new() -> Self {
        Self {
            raw: 1590,
            rising: true,
        }
    }
}

impl ThrottleSensor for SweepingThrottle {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, ()> {
        if self.rising {
            self.raw += 30;
            if self.raw >= 2160 {
                self.rising = false;
            }
        } else {
            self.raw -= 30;
            if self.raw <= 1590 {
                self.rising = true;
            }
        }
        Ok(self.raw)
    }
}

// ============================================================================
// Simulated drive unit
// ============================================================================

/// The remote end of the link, in-process.
///
/// Parses the `AT+SEND` envelope the dashboard writes, tracks throttle,
/// and queues the speed/trip lines a real drive unit would radio back.
struct SimDriveUnit {
    inner: Arc<Mutex<SimInner>>,
}

struct SimInner {
    /// Lines waiting for the dashboard's receive activity.
    pending: VecDeque<String>,
    /// Full-scale wire value, for speed scaling.
    wire_full_scale: u16,
    /// Trip meters accumulated but not yet reported.
    trip_acc: u32,
}

impl SimDriveUnit {
    fn new(wire_full_scale: u16) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimInner {
                pending: VecDeque::new(),
                wire_full_scale,
                trip_acc: 0,
            })),
        }
    }

    fn split(&self) -> (SimLinkTx, SimLinkRx) {
        (
            SimLinkTx {
                inner: Arc::clone(&self.inner),
            },
            SimLinkRx {
                inner: Arc::clone(&self.inner),
            },
        )
    }
}

struct SimLinkTx {
    inner: Arc<Mutex<SimInner>>,
}

struct SimLinkRx {
    inner: Arc<Mutex<SimInner>>,
}

impl LinkTx for SimLinkTx {
    type Error = ();

    fn send_line(&mut self, line: &str) -> Result<(), ()> {
        let mut inner = self.inner.lock().unwrap();

        let Some(args) = line.strip_prefix("AT+SEND=") else {
            // Configuration command; a real module answers +OK
            inner.pending.push_back("+OK".into());
            return Ok(());
        };

        // AT+SEND=<dest>,<len>,<payload>
        let payload = args.splitn(3, ',').nth(2).unwrap_or("");
        if let TelemetryFrame::Throttle(wire) = frame::decode(payload) {
            let speed =
                u32::from(wire) * u32::from(SIM_MAX_SPEED) / u32::from(inner.wire_full_scale);
            inner.pending.push_back(format!("S{}", speed));

            // Crude odometer: a moving vehicle covers ground each frame
            if speed > 0 {
                inner.trip_acc += speed / 2 + 1;
                if inner.trip_acc >= 10 {
                    let delta = inner.trip_acc;
                    inner.trip_acc = 0;
                    inner.pending.push_back(format!("D{}", delta));
                }
            }
        }
        Ok(())
    }
}

impl LinkRx for SimLinkRx {
    type Error = ();

    fn poll_line(&mut self) -> Result<Option<LineBuf>, ()> {
        let mut inner = self.inner.lock().unwrap();
        let Some(raw) = inner.pending.pop_front() else {
            return Ok(None);
        };
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
// Console panel
// ============================================================================

/// Panel that narrates drawing operations to stdout.
struct ConsolePanel;

impl GaugePanel for ConsolePanel {
    type Error = std::convert::Infallible;

    fn fill_circle(&mut self, _cx: i32, _cy: i32, _r: u32, _color: Color) -> Result<(), Self::Error> {
        Ok(())
    }

    fn draw_arc(
        &mut self,
        _cx: i32,
        _cy: i32,
        _r_outer: u32,
        _r_inner: u32,
        start_deg: u16,
        end_deg: u16,
        fg: Color,
        _bg: Color,
    ) -> Result<(), Self::Error> {
        let direction = if fg == GaugeStyle::default().active {
            "up"
        } else {
            "down"
        };
        println!("[gauge] sweep {} {}..{} deg", direction, start_deg, end_deg);
        Ok(())
    }

    fn draw_number(&mut self, value: i32, _cx: i32, _cy: i32) -> Result<(), Self::Error> {
        println!("[gauge] speed {}", value);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _color: Color) -> Result<(), Self::Error> {
        println!("[trip ] {}", text);
        Ok(())
    }

    fn fill_triangle(
        &mut self,
        _p1: (i32, i32),
        _p2: (i32, i32),
        _p3: (i32, i32),
        color: Color,
    ) -> Result<(), Self::Error> {
        let state = if color == Color::GREEN { "UP" } else { "DOWN" };
        println!("[link ] {}", state);
        Ok(())
    }
}
