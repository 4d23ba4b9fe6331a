//! Edge case and boundary condition tests for the dashboard core.

use evdash::config::{Config, SensorConfig};
use evdash::frame::{self, TelemetryFrame, MAX_FRAME};
use evdash::gauge::{GaugeRenderer, GaugeStyle};
use evdash::hal::{MockLinkRx, MockPanel, PanelOp};
use evdash::indicator::{IndicatorStyle, LinkIndicator};
use evdash::sampler::ThrottleSampler;
use evdash::scheduler::{Activity, ReceiveActivity, RenderActivity};
use evdash::telemetry::{TelemetryBus, TelemetryEvent, TelemetryStore};

// ============================================================================
// Sampler Boundaries
// ============================================================================

#[test]
fn reading_exactly_at_noise_ceiling_is_valid() {
    let sampler = ThrottleSampler::new(SensorConfig::default());
    // 4000 is the ceiling itself: still a legitimate (if saturated) value
    let reading = sampler.sample(4000);
    assert_eq!(reading.ui, 100);
}

#[test]
fn reading_one_above_noise_ceiling_is_rejected() {
    let sampler = ThrottleSampler::new(SensorConfig::default());
    let reading = sampler.sample(4001);
    assert_eq!(reading.ui, 0);
}

#[test]
fn raw_extremes_stay_in_scale() {
    let sampler = ThrottleSampler::new(
        SensorConfig::default()
            .with_raw_range(0, 4095)
            .with_noise_ceiling(u16::MAX),
    );
    assert_eq!(sampler.sample(0).ui, 0);
    assert_eq!(sampler.sample(u16::MAX).ui, 100);
}

#[test]
fn single_step_window() {
    let sampler = ThrottleSampler::new(
        SensorConfig::default()
            .with_raw_range(100, 101)
            .with_noise_ceiling(200),
    );
    assert_eq!(sampler.sample(100).ui, 0);
    assert_eq!(sampler.sample(101).ui, 100);
}

// ============================================================================
// Codec Boundaries
// ============================================================================

#[test]
fn decode_module_status_lines_are_unrecognized() {
    // The transceiver's own chatter must not crash or mutate anything
    for line in ["+OK", "+ERR=4", "+RCV=2,3,S10,-40,11", "AT", ""] {
        assert!(matches!(
            frame::decode(line),
            TelemetryFrame::Unrecognized(_)
        ));
    }
}

#[test]
fn decode_exact_u16_boundary() {
    assert_eq!(frame::decode("S65535"), TelemetryFrame::Speed(65535));
    assert!(matches!(
        frame::decode("S65536"),
        TelemetryFrame::Unrecognized(_)
    ));
}

#[test]
fn decode_multibyte_tag_is_unrecognized() {
    assert!(matches!(
        frame::decode("⚡42"),
        TelemetryFrame::Unrecognized(_)
    ));
}

#[test]
fn decode_line_at_frame_bound() {
    let mut line = String::from("S");
    line.push_str(&"9".repeat(MAX_FRAME * 2));
    // Numeric overflow, not a panic
    assert!(matches!(
        frame::decode(&line),
        TelemetryFrame::Unrecognized(_)
    ));
}

// ============================================================================
// Gauge Boundaries
// ============================================================================

#[test]
fn gauge_value_above_domain_pins_to_end_angle() {
    let style = GaugeStyle::default();
    let mut panel = MockPanel::new();
    let mut gauge = GaugeRenderer::new(style);

    gauge.render(&mut panel, 500).unwrap();
    assert_eq!(gauge.last_angle(), style.end_angle);

    // Pinned is pinned: a second out-of-domain value changes nothing
    let ops = panel.ops.len();
    gauge.render(&mut panel, 1000).unwrap();
    assert_eq!(panel.ops.len(), ops);
}

#[test]
fn gauge_degenerate_domain_never_moves() {
    let style = GaugeStyle {
        value_min: 10,
        value_max: 10,
        ..GaugeStyle::default()
    };
    let mut panel = MockPanel::new();
    let mut gauge = GaugeRenderer::new(style);

    assert!(!gauge.render(&mut panel, 0).unwrap());
    assert!(!gauge.render(&mut panel, 10).unwrap());
    assert!(!gauge.render(&mut panel, 30).unwrap());
    assert!(panel.ops.is_empty());
}

#[test]
fn gauge_full_sweep_and_back() {
    let style = GaugeStyle::default();
    let mut panel = MockPanel::new();
    let mut gauge = GaugeRenderer::new(style);

    gauge.render(&mut panel, style.value_max).unwrap();
    gauge.render(&mut panel, 0).unwrap();

    let arcs = panel.arcs();
    assert_eq!(arcs.len(), 2);
    // Both sweeps cover the whole arc domain
    for arc in arcs {
        assert_eq!(arc.start_deg, style.start_angle);
        assert_eq!(arc.end_deg, style.end_angle);
    }
    assert_eq!(gauge.last_angle(), style.start_angle);
}

#[test]
fn adjacent_values_below_angle_resolution_coalesce() {
    // 300 degrees over 0..=3000 means sub-degree steps exist
    let style = GaugeStyle {
        value_max: 3000,
        ..GaugeStyle::default()
    };
    let mut panel = MockPanel::new();
    let mut gauge = GaugeRenderer::new(style);

    gauge.render(&mut panel, 1000).unwrap();
    let ops = panel.ops.len();

    // One value-unit later the angle is identical: no redraw
    gauge.render(&mut panel, 1001).unwrap();
    assert_eq!(panel.ops.len(), ops);
}

// ============================================================================
// Indicator Boundaries
// ============================================================================

#[test]
fn indicator_alternating_states_paint_every_time() {
    let mut panel = MockPanel::new();
    let mut ind = LinkIndicator::new(IndicatorStyle::default());

    for (i, up) in [true, false, true, false].iter().enumerate() {
        assert!(ind.update(&mut panel, *up).unwrap(), "transition {}", i);
    }
}

#[test]
fn indicator_mid_sequence_draw_failure_recovers() {
    let mut panel = MockPanel::new();
    let mut ind = LinkIndicator::new(IndicatorStyle::default());

    ind.update(&mut panel, true).unwrap();

    // The region clear fails: state must not latch
    panel.fail_next(1);
    assert!(ind.update(&mut panel, false).is_err());
    assert_eq!(ind.last_up(), Some(true));

    // Next cycle retries the transition in full
    assert!(ind.update(&mut panel, false).unwrap());
    assert_eq!(ind.last_up(), Some(false));
}

// ============================================================================
// Store and Bus Boundaries
// ============================================================================

#[test]
fn store_applies_interleaved_events_in_order() {
    let mut store = TelemetryStore::default();
    let events = [
        TelemetryEvent::SpeedReported(5),
        TelemetryEvent::LinkActive(true),
        TelemetryEvent::SpeedReported(9),
        TelemetryEvent::TripAdvanced(2),
        TelemetryEvent::LinkActive(false),
        TelemetryEvent::TripAdvanced(3),
    ];
    for event in events {
        store.apply(event);
    }

    assert_eq!(store.speed, 9);
    assert_eq!(store.trip_distance, 5);
    assert!(!store.link_up);
}

#[test]
fn oversized_inbound_line_degrades_to_unrecognized() {
    let config = Config::default();
    let bus = TelemetryBus::new();

    let mut rx = MockLinkRx::new();
    rx.queue_line(format!("S{}", "1".repeat(300)));
    let mut receive = ReceiveActivity::new(rx, &bus, &config);
    let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);

    receive.tick();
    render.tick();

    // Truncated to the line bound, failed to parse, logged only; the
    // read itself still proves the link
    let store = render.store();
    assert_eq!(store.speed, 0);
    assert!(store.link_up);
}

#[test]
fn speed_spike_clamps_on_the_dial_not_in_the_store() {
    let config = Config::default();
    let bus = TelemetryBus::new();
    let mut render = RenderActivity::new(MockPanel::new(), &bus, &config);

    // Drive unit reports more than the dial can show
    bus.publish(TelemetryEvent::SpeedReported(120));
    render.tick();

    // The store keeps the honest value; the gauge pins at its end angle
    assert_eq!(render.store().speed, 120);
    assert!(render
        .panel()
        .ops
        .iter()
        .any(|op| matches!(op, PanelOp::DrawNumber { value: 120, .. })));
}
