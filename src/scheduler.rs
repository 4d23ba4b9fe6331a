//! The three periodic activities and their driving loop.
//!
//! The dashboard is three logically concurrent activities, each on its
//! own cadence, interacting only through the [`TelemetryBus`]:
//!
//! | Activity | Cadence | Owns |
//! |----------|---------|------|
//! | [`TransmitActivity`] | fast (250 ms) | sensor, sampler, link TX half, diag sink |
//! | [`ReceiveActivity`] | fast (250 ms) | link RX half |
//! | [`RenderActivity`] | slow (500 ms) | telemetry store, panel, gauge, indicator |
//!
//! Each activity cycles Idle -> Running -> suspend-for-cadence forever;
//! there is no terminal state short of process shutdown. Suspension is a
//! cooperative sleep, and the receive poll never waits for data - a
//! silent link is a normal cycle outcome, not a timeout.
//!
//! Activities never hold references into each other. The transmit and
//! receive activities publish events; the render activity is the sole
//! consumer and owner of the store. That is the whole synchronization
//! story.
//!
//! # Example
//!
//! ```rust
//! use evdash::config::Config;
//! use evdash::hal::{MockDiag, MockLinkRx, MockLinkTx, MockPanel, MockSensor};
//! use evdash::scheduler::{Activity, ReceiveActivity, RenderActivity, TransmitActivity};
//! use evdash::telemetry::TelemetryBus;
//!
//! let config = Config::default();
//! let bus = TelemetryBus::new();
//!
//! let mut transmit = TransmitActivity::new(
//!     MockSensor::new(2160),
//!     MockLinkTx::new(),
//!     MockDiag::new(),
//!     &bus,
//!     &config,
//! );
//! let mut receive = ReceiveActivity::new(MockLinkRx::new(), &bus, &config);
//! let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);
//!
//! // Drive one scheduling round by hand
//! transmit.tick();
//! receive.tick();
//! render.tick();
//!
//! assert_eq!(render.store().throttle_pct, 100);
//! ```

use core::fmt::Write as _;

use heapless::String as HString;

use crate::config::Config;
use crate::frame::{self, TelemetryFrame};
use crate::gauge::{GaugeRenderer, GaugeStyle};
use crate::indicator::{IndicatorStyle, LinkIndicator};
use crate::radio;
use crate::sampler::ThrottleSampler;
use crate::telemetry::{TelemetryBus, TelemetryEvent, TelemetryStore};
use crate::traits::{Color, DiagSink, GaugePanel, LinkRx, LinkTx, ThrottleSensor};

/// One periodic activity: a body to run and a cadence to run it at.
pub trait Activity {
    /// Run one cycle. Must not block beyond its own work.
    fn tick(&mut self);

    /// Suspension interval between cycles, in milliseconds.
    fn interval_ms(&self) -> u32;
}

/// Drive one activity forever with cooperative suspension.
///
/// This is the Running -> suspend loop of the scheduling model; spawn it
/// on its own thread, one per activity.
#[cfg(feature = "std")]
pub fn drive(activity: &mut dyn Activity) -> ! {
    loop {
        activity.tick();
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            activity.interval_ms(),
        )));
    }
}

// ============================================================================
// Transmit
// ============================================================================

/// Sample-and-transmit activity.
///
/// Each cycle: read the sensor, normalize, encode a throttle frame, wrap
/// it in the radio's send envelope, write it to the link, mirror the raw
/// command text to the diagnostic sink, and publish the displayed value.
/// Frames are fire-and-forget; a failed write is a lost frame, logged
/// and otherwise accepted.
pub struct TransmitActivity<'a, S, T, D> {
    sensor: S,
    sampler: ThrottleSampler,
    tx: T,
    diag: D,
    bus: &'a TelemetryBus,
    dest: u16,
    interval_ms: u32,
}

impl<'a, S, T, D> TransmitActivity<'a, S, T, D>
where
    S: ThrottleSensor,
    T: LinkTx,
    D: DiagSink,
{
    /// Create the activity from its owned peripherals and the config.
    pub fn new(sensor: S, tx: T, diag: D, bus: &'a TelemetryBus, config: &Config) -> Self {
        Self {
            sensor,
            sampler: ThrottleSampler::new(config.sensor),
            tx,
            diag,
            bus,
            dest: config.link.dest_address,
            interval_ms: config.schedule.transmit_interval_ms,
        }
    }

    /// Run one sample-and-transmit cycle.
    pub fn run_cycle(&mut self) {
        let raw = match self.sensor.read_raw() {
            Ok(raw) => raw,
            Err(_) => {
                // Skip the cycle rather than retransmit a stale value
                log::warn!("throttle sensor read failed, skipping cycle");
                return;
            }
        };

        let reading = self.sampler.sample(raw);
        let payload = frame::encode_throttle(reading.wire);
        let command = radio::send_command(self.dest, &payload);

        if self.tx.send_line(&command).is_err() {
            log::warn!("link write failed, frame lost");
        }
        self.diag.record(&command);

        self.bus.publish(TelemetryEvent::ThrottleUpdated(reading.ui));
    }

    /// The diagnostic sink, for inspection in tests.
    pub fn diag(&self) -> &D {
        &self.diag
    }

    /// The link TX half, for inspection in tests.
    pub fn link(&self) -> &T {
        &self.tx
    }
}

impl<S, T, D> Activity for TransmitActivity<'_, S, T, D>
where
    S: ThrottleSensor,
    T: LinkTx,
    D: DiagSink,
{
    fn tick(&mut self) {
        self.run_cycle();
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

// ============================================================================
// Receive
// ============================================================================

/// Receive-and-decode activity.
///
/// Each cycle is one non-blocking poll. A received line is decoded and
/// published as events; silence publishes a link-down marker. Decode
/// failures are logged and mutate nothing.
pub struct ReceiveActivity<'a, R> {
    rx: R,
    bus: &'a TelemetryBus,
    interval_ms: u32,
}

impl<'a, R: LinkRx> ReceiveActivity<'a, R> {
    /// Create the activity from its owned RX half and the config.
    pub fn new(rx: R, bus: &'a TelemetryBus, config: &Config) -> Self {
        Self {
            rx,
            bus,
            interval_ms: config.schedule.receive_interval_ms,
        }
    }

    /// Run one poll-and-decode cycle.
    pub fn run_cycle(&mut self) {
        match self.rx.poll_line() {
            Ok(Some(line)) => {
                match frame::decode(&line) {
                    TelemetryFrame::Speed(speed) => {
                        self.bus.publish(TelemetryEvent::SpeedReported(speed));
                    }
                    TelemetryFrame::TripDelta(delta) => {
                        self.bus.publish(TelemetryEvent::TripAdvanced(delta));
                    }
                    TelemetryFrame::Throttle(_) => {
                        // Our own frame class coming back at us; nothing
                        // on the dashboard consumes it
                        log::warn!("ignoring inbound throttle frame: {}", line.as_str());
                    }
                    TelemetryFrame::Unrecognized(raw) => {
                        log::warn!("unrecognized frame: {:?}", raw.as_str());
                    }
                }
                // Any successful read counts as a live link, even when
                // the payload was garbage
                self.bus.publish(TelemetryEvent::LinkActive(true));
            }
            Ok(None) => {
                self.bus.publish(TelemetryEvent::LinkActive(false));
            }
            Err(_) => {
                log::warn!("link read failed");
                self.bus.publish(TelemetryEvent::LinkActive(false));
            }
        }
    }

    /// The link RX half, for inspection in tests.
    pub fn link_mut(&mut self) -> &mut R {
        &mut self.rx
    }
}

impl<R: LinkRx> Activity for ReceiveActivity<'_, R> {
    fn tick(&mut self) {
        self.run_cycle();
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

// ============================================================================
// Render
// ============================================================================

/// Render activity: the store owner.
///
/// Each cycle drains the bus into its privately owned
/// [`TelemetryStore`], latches a snapshot, and drives the gauge, the
/// link indicator and the trip readout from that snapshot. Drawing
/// failures degrade to a logged warning; the renderers re-attempt their
/// un-latched deltas next cycle.
pub struct RenderActivity<'a, P> {
    bus: &'a TelemetryBus,
    store: TelemetryStore,
    panel: P,
    gauge: GaugeRenderer,
    indicator: LinkIndicator,
    motion_threshold: u16,
    trip_anchor: (i32, i32),
    interval_ms: u32,
}

impl<'a, P: GaugePanel> RenderActivity<'a, P> {
    /// Create the activity with default gauge and indicator styles.
    pub fn new(panel: P, bus: &'a TelemetryBus, config: &Config) -> Self {
        Self::with_styles(
            panel,
            bus,
            config,
            GaugeStyle::default(),
            IndicatorStyle::default(),
        )
    }

    /// Create the activity with explicit styles.
    pub fn with_styles(
        panel: P,
        bus: &'a TelemetryBus,
        config: &Config,
        gauge: GaugeStyle,
        indicator: IndicatorStyle,
    ) -> Self {
        Self {
            bus,
            store: TelemetryStore::default(),
            panel,
            gauge: GaugeRenderer::new(gauge),
            indicator: LinkIndicator::new(indicator),
            motion_threshold: config.schedule.motion_threshold,
            trip_anchor: (160, 220),
            interval_ms: config.schedule.render_interval_ms,
        }
    }

    /// Paint the static dial. Call once at boot.
    pub fn init(&mut self) -> Result<(), P::Error> {
        self.gauge.draw_face(&mut self.panel)
    }

    /// Run one drain-and-render cycle.
    pub fn run_cycle(&mut self) {
        while let Some(event) = self.bus.try_next() {
            self.store.apply(event);
        }

        let snapshot = self.store.snapshot();
        if self.render_frame(&snapshot).is_err() {
            log::warn!("panel draw failed, retrying next cycle");
        }
    }

    fn render_frame(&mut self, snapshot: &TelemetryStore) -> Result<(), P::Error> {
        self.gauge.render(&mut self.panel, snapshot.speed)?;
        self.indicator.update(&mut self.panel, snapshot.link_up)?;

        if snapshot.speed >= self.motion_threshold {
            let mut text: HString<16> = HString::new();
            let _ = write!(text, "{}", snapshot.trip_distance);
            let (x, y) = self.trip_anchor;
            self.panel.draw_text(&text, x, y, Color::WHITE)?;
        }
        Ok(())
    }

    /// The latched telemetry values.
    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    /// The panel, for inspection in tests.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable panel access, for inspection in tests.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}

impl<P: GaugePanel> Activity for RenderActivity<'_, P> {
    fn tick(&mut self) {
        self.run_cycle();
    }

    fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDiag, MockLinkRx, MockLinkTx, MockPanel, MockSensor, PanelOp};

    fn config() -> Config {
        Config::default()
    }

    // =========================================================================
    // TransmitActivity
    // =========================================================================

    #[test]
    fn transmit_sends_enveloped_frame() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut transmit = TransmitActivity::new(
            MockSensor::new(2160),
            MockLinkTx::new(),
            MockDiag::new(),
            &bus,
            &config,
        );

        transmit.tick();

        // Full throttle: wire scale 255 at the default calibration
        assert_eq!(transmit.link().sent, vec!["AT+SEND=2,4,T255"]);
    }

    #[test]
    fn transmit_mirrors_command_to_diag() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut transmit = TransmitActivity::new(
            MockSensor::new(1875),
            MockLinkTx::new(),
            MockDiag::new(),
            &bus,
            &config,
        );

        transmit.tick();

        assert_eq!(transmit.diag().lines.len(), 1);
        assert_eq!(transmit.diag().lines[0], transmit.link().sent[0]);
    }

    #[test]
    fn transmit_publishes_ui_value() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut transmit = TransmitActivity::new(
            MockSensor::new(2160),
            MockLinkTx::new(),
            MockDiag::new(),
            &bus,
            &config,
        );

        transmit.tick();

        assert_eq!(bus.try_next(), Some(TelemetryEvent::ThrottleUpdated(100)));
        assert_eq!(bus.try_next(), None);
    }

    #[test]
    fn transmit_skips_cycle_on_sensor_error() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut transmit = TransmitActivity::new(
            MockSensor::new(0).with_failing_reads(),
            MockLinkTx::new(),
            MockDiag::new(),
            &bus,
            &config,
        );

        transmit.tick();

        assert!(transmit.link().sent.is_empty());
        assert_eq!(bus.try_next(), None);
    }

    #[test]
    fn transmit_survives_link_write_failure() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut transmit = TransmitActivity::new(
            MockSensor::new(2160),
            MockLinkTx::new().with_failing_writes(),
            MockDiag::new(),
            &bus,
            &config,
        );

        transmit.tick();

        // Frame lost, but the UI value still flows
        assert_eq!(bus.try_next(), Some(TelemetryEvent::ThrottleUpdated(100)));
    }

    // =========================================================================
    // ReceiveActivity
    // =========================================================================

    #[test]
    fn receive_decodes_speed_and_marks_link_up() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut rx = MockLinkRx::new();
        rx.queue_line("S25");
        let mut receive = ReceiveActivity::new(rx, &bus, &config);

        receive.tick();

        assert_eq!(bus.try_next(), Some(TelemetryEvent::SpeedReported(25)));
        assert_eq!(bus.try_next(), Some(TelemetryEvent::LinkActive(true)));
    }

    #[test]
    fn receive_decodes_trip_delta() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut rx = MockLinkRx::new();
        rx.queue_line("D12");
        let mut receive = ReceiveActivity::new(rx, &bus, &config);

        receive.tick();

        assert_eq!(bus.try_next(), Some(TelemetryEvent::TripAdvanced(12)));
        assert_eq!(bus.try_next(), Some(TelemetryEvent::LinkActive(true)));
    }

    #[test]
    fn silence_marks_link_down() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut receive = ReceiveActivity::new(MockLinkRx::new(), &bus, &config);

        receive.tick();

        assert_eq!(bus.try_next(), Some(TelemetryEvent::LinkActive(false)));
        assert_eq!(bus.try_next(), None);
    }

    #[test]
    fn garbage_line_is_logged_only_but_keeps_link_up() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut rx = MockLinkRx::new();
        rx.queue_line("%&garbage");
        let mut receive = ReceiveActivity::new(rx, &bus, &config);

        receive.tick();

        // No store mutation events; the read itself proves the link
        assert_eq!(bus.try_next(), Some(TelemetryEvent::LinkActive(true)));
        assert_eq!(bus.try_next(), None);
    }

    #[test]
    fn read_error_marks_link_down() {
        let bus = TelemetryBus::new();
        let config = config();
        let rx = MockLinkRx::new().with_failing_reads();
        let mut receive = ReceiveActivity::new(rx, &bus, &config);

        receive.tick();

        assert_eq!(bus.try_next(), Some(TelemetryEvent::LinkActive(false)));
    }

    // =========================================================================
    // RenderActivity
    // =========================================================================

    #[test]
    fn render_applies_events_then_draws() {
        let bus = TelemetryBus::new();
        let config = config();
        bus.publish(TelemetryEvent::SpeedReported(15));
        bus.publish(TelemetryEvent::LinkActive(true));

        let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);
        render.tick();

        assert_eq!(render.store().speed, 15);
        assert!(render.store().link_up);
        assert!(render
            .panel()
            .ops
            .iter()
            .any(|op| matches!(op, PanelOp::DrawNumber { value: 15, .. })));
    }

    #[test]
    fn render_refreshes_trip_only_in_motion() {
        let bus = TelemetryBus::new();
        let config = config();
        bus.publish(TelemetryEvent::TripAdvanced(120));

        let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);
        render.tick();

        // Speed 0 is below the motion threshold: no trip text
        assert!(!render
            .panel()
            .ops
            .iter()
            .any(|op| matches!(op, PanelOp::DrawText { .. })));

        bus.publish(TelemetryEvent::SpeedReported(3));
        render.tick();

        let texts: Vec<_> = render
            .panel()
            .ops
            .iter()
            .filter_map(|op| match op {
                PanelOp::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"120"));
    }

    #[test]
    fn render_is_idempotent_between_events() {
        let bus = TelemetryBus::new();
        let config = config();
        bus.publish(TelemetryEvent::SpeedReported(10));
        bus.publish(TelemetryEvent::LinkActive(true));

        let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);
        render.tick();
        let ops = render.panel().ops.len();

        // No new events, speed above threshold: only the trip text
        // refresh may draw; gauge and indicator stay quiet
        render.tick();
        let new_ops = &render.panel().ops[ops..];
        assert!(new_ops
            .iter()
            .all(|op| matches!(op, PanelOp::DrawText { .. })));
    }

    #[test]
    fn init_paints_the_dial() {
        let bus = TelemetryBus::new();
        let config = config();
        let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);

        render.init().unwrap();
        assert!(!render.panel().ops.is_empty());
    }

    // =========================================================================
    // Cadences
    // =========================================================================

    #[test]
    fn activities_report_configured_cadences() {
        let bus = TelemetryBus::new();
        let config = Config::default().with_schedule(
            crate::config::ScheduleConfig::default()
                .with_transmit_interval_ms(100)
                .with_receive_interval_ms(150)
                .with_render_interval_ms(400),
        );

        let transmit = TransmitActivity::new(
            MockSensor::new(0),
            MockLinkTx::new(),
            MockDiag::new(),
            &bus,
            &config,
        );
        let receive = ReceiveActivity::new(MockLinkRx::new(), &bus, &config);
        let render = RenderActivity::new(MockPanel::new(), &bus, &config);

        assert_eq!(transmit.interval_ms(), 100);
        assert_eq!(receive.interval_ms(), 150);
        assert_eq!(render.interval_ms(), 400);
    }
}
