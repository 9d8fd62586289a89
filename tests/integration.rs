//! Integration tests for gilt-interact.
//!
//! These tests exercise the public API from outside the crate, driving the
//! controllers through the headless Pilot on virtual time.

use gilt_interact::config::{InteractConfig, StepperConfig, TooltipConfig};
use gilt_interact::event::{Key, KeyEvent, PointerButton};
use gilt_interact::geometry::{Point, Rect};
use gilt_interact::ripple::{RippleController, RippleInput};
use gilt_interact::stepper::{Direction, Magnitude, StepperController, StepperInput};
use gilt_interact::testing::{timeline_to_string, Pilot};
use gilt_interact::timing::{ManualClock, Millis};
use gilt_interact::visibility::{
    DismissReason, Source, VisibilityController, VisibilityEvent, VisibilityInput,
};
use gilt_interact::Controller;

fn tooltip_pilot(config: TooltipConfig) -> Pilot<VisibilityController<ManualClock>> {
    let clock = ManualClock::new();
    Pilot::new(VisibilityController::new(config, clock.clone()), clock)
}

fn stepper_pilot(config: StepperConfig) -> Pilot<StepperController<ManualClock>> {
    let clock = ManualClock::new();
    Pilot::new(StepperController::new(config, clock.clone()), clock)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Tiny deterministic generator for sequence tests.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

#[test]
fn test_tooltip_reactivation_during_pending_hide() {
    let mut pilot = tooltip_pilot(TooltipConfig::default());
    pilot.send(VisibilityInput::Activate {
        source: Source::Hover,
        immediate: false,
    });
    pilot.send_at(
        150,
        VisibilityInput::Deactivate {
            source: Source::Hover,
            immediate: false,
        },
    );
    pilot.send_at(
        300,
        VisibilityInput::Activate {
            source: Source::Hover,
            immediate: false,
        },
    );
    pilot.advance_to(2000);
    insta::assert_snapshot!(timeline_to_string(pilot.timeline()), @"100 OpenChange(true)");
    assert!(pilot.controller().is_open());
}

#[test]
fn test_tooltip_hover_in_and_out() {
    let mut pilot = tooltip_pilot(TooltipConfig::default());
    pilot.send(VisibilityInput::HoverStart);
    pilot.send_at(150, VisibilityInput::HoverEnd);
    pilot.advance_to(2000);
    insta::assert_snapshot!(
        timeline_to_string(pilot.timeline()),
        @"100 OpenChange(true) | 450 OpenChange(false)"
    );
}

#[test]
fn test_tooltip_focus_and_escape() {
    let mut pilot = tooltip_pilot(TooltipConfig::default());
    pilot.send_at(10, VisibilityInput::Focus { visible: true });
    pilot.send_at(20, VisibilityInput::Key(KeyEvent::press(Key::Escape)));
    pilot.send_at(30, VisibilityInput::Blur);
    insta::assert_snapshot!(
        timeline_to_string(pilot.timeline()),
        @"10 OpenChange(true) | 20 OpenChange(false)"
    );
}

#[test]
fn test_tooltip_controlled_owner_round_trip() {
    let mut pilot = tooltip_pilot(TooltipConfig::new().controlled(false));
    pilot.send(VisibilityInput::HoverStart);
    pilot.advance_to(100);
    assert_eq!(
        pilot.take_timeline(),
        vec![(100, VisibilityEvent::OpenChange(true))]
    );
    assert!(!pilot.controller().is_open());

    pilot.send(VisibilityInput::SetOpen(true));
    assert!(pilot.controller().is_open());
    pilot.send(VisibilityInput::Dismiss(DismissReason::OutsideClick));
    assert_eq!(
        pilot.take_timeline(),
        vec![(100, VisibilityEvent::OpenChange(false))]
    );
    pilot.send(VisibilityInput::SetOpen(false));
    assert!(!pilot.controller().is_open());
}

#[test]
fn test_tooltip_opens_only_while_a_source_is_active() {
    let mut rng = Lcg(7);
    for _ in 0..50 {
        let mut pilot = tooltip_pilot(TooltipConfig::default());
        let mut t: Millis = 0;
        for _ in 0..40 {
            t += rng.below(250);
            let source = if rng.below(2) == 0 {
                Source::Hover
            } else {
                Source::Focus
            };
            let immediate = rng.below(4) == 0;
            let input = if rng.below(2) == 0 {
                VisibilityInput::Activate { source, immediate }
            } else {
                VisibilityInput::Deactivate { source, immediate }
            };

            pilot.advance_to(t);
            check_opens_with_active_source(&mut pilot);
            pilot.send(input);
            check_opens_with_active_source(&mut pilot);
        }
    }
}

fn check_opens_with_active_source(pilot: &mut Pilot<VisibilityController<ManualClock>>) {
    let opened = pilot
        .take_timeline()
        .iter()
        .any(|(_, e)| *e == VisibilityEvent::OpenChange(true));
    if opened {
        let ctl = pilot.controller();
        assert!(ctl.is_hovered() || ctl.is_focused());
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

#[test]
fn test_stepper_large_step_clamps() {
    let mut pilot = stepper_pilot(
        StepperConfig::new()
            .with_bounds(0.0, 10.0)
            .with_steps(1.0, 5.0)
            .with_value(8.0),
    );
    pilot.send(StepperInput::StepOnce(Magnitude::LargeStep, Direction::Up));
    assert_eq!(pilot.controller().value(), 10.0);
}

#[test]
fn test_stepper_auto_repeat_timeline() {
    let mut pilot = stepper_pilot(StepperConfig::default());
    pilot.send(StepperInput::StartRepeat(Magnitude::Step, Direction::Up));
    pilot.send_at(650, StepperInput::StopRepeat);
    pilot.advance_to(3000);
    insta::assert_snapshot!(
        timeline_to_string(pilot.timeline()),
        @"0 ValueChange(1.0) | 500 ValueChange(2.0) | 600 ValueChange(3.0)"
    );
}

#[test]
fn test_stepper_double_start_is_idempotent() {
    let mut once = stepper_pilot(StepperConfig::default());
    once.send(StepperInput::StartRepeat(Magnitude::Step, Direction::Down));
    once.advance_to(1000);

    let mut twice = stepper_pilot(StepperConfig::default());
    twice.send(StepperInput::StartRepeat(Magnitude::Step, Direction::Down));
    twice.send(StepperInput::StartRepeat(Magnitude::Step, Direction::Down));
    twice.advance_to(1000);

    assert_eq!(once.timeline(), twice.timeline());
}

#[test]
fn test_stepper_keyboard_session() {
    let mut pilot = stepper_pilot(StepperConfig::new().with_bounds(0.0, 20.0));
    pilot.send(StepperInput::Key(KeyEvent::press(Key::PageUp)));
    pilot.send(StepperInput::Key(KeyEvent::press(Key::Up)));
    pilot.send_at(40, StepperInput::Key(KeyEvent::repeat(Key::Up)));
    pilot.send_at(70, StepperInput::Key(KeyEvent::repeat(Key::Up)));
    pilot.send_at(700, StepperInput::Key(KeyEvent::release(Key::Up)));
    // press, press, first repeat at 40, ticks at 540 and 640
    assert_eq!(pilot.controller().value(), 9.0);
    pilot.send(StepperInput::Key(KeyEvent::press(Key::End)));
    assert_eq!(pilot.controller().value(), 20.0);
    pilot.send(StepperInput::Key(KeyEvent::press(Key::Home)));
    assert_eq!(pilot.controller().value(), 0.0);
}

#[test]
fn test_stepper_stays_within_bounds() {
    init_tracing();
    for (seed, step, large_step) in [(42, 1.5, 4.0), (43, -1.5, 4.0), (44, 2.0, -3.0)] {
        check_stays_within_bounds(seed, step, large_step);
    }
}

fn check_stays_within_bounds(seed: u64, step: f64, large_step: f64) {
    let mut rng = Lcg(seed);
    let (min, max) = (-5.0, 12.0);
    let mut pilot = stepper_pilot(
        StepperConfig::new()
            .with_bounds(min, max)
            .with_steps(step, large_step),
    );
    let mut t: Millis = 0;
    for _ in 0..500 {
        t += rng.below(180);
        let direction = if rng.below(2) == 0 {
            Direction::Up
        } else {
            Direction::Down
        };
        let magnitude = if rng.below(3) == 0 {
            Magnitude::LargeStep
        } else {
            Magnitude::Step
        };
        let input = match rng.below(6) {
            0 => StepperInput::StartRepeat(magnitude, direction),
            1 => StepperInput::StopRepeat,
            2 => StepperInput::PressStart(direction),
            3 => StepperInput::PressEnd,
            _ => StepperInput::StepOnce(magnitude, direction),
        };
        pilot.send_at(t, input);
        let value = pilot.controller().value();
        assert!(
            (min..=max).contains(&value),
            "value {value} escaped [{min}, {max}] with steps ({step}, {large_step})"
        );
    }
}

#[test]
fn test_stepper_out_of_range_input_snaps() {
    let mut pilot = stepper_pilot(StepperConfig::new().with_bounds(0.0, 10.0));
    pilot.send(StepperInput::SetValue(99.0));
    pilot.send(StepperInput::StepOnce(Magnitude::Step, Direction::Up));
    assert_eq!(pilot.controller().value(), 10.0);
}

#[test]
fn test_stepper_zero_repeat_rate_keeps_advancing() {
    let mut pilot = stepper_pilot(StepperConfig::new().with_repeat(500, 0));
    pilot.send(StepperInput::StartRepeat(Magnitude::Step, Direction::Up));
    pilot.send_at(503, StepperInput::StopRepeat);
    pilot.advance_to(1000);
    insta::assert_snapshot!(
        timeline_to_string(pilot.timeline()),
        @"0 ValueChange(1.0) | 500 ValueChange(2.0) | 501 ValueChange(3.0) | 502 ValueChange(4.0) | 503 ValueChange(5.0)"
    );
}

// ---------------------------------------------------------------------------
// Ripple
// ---------------------------------------------------------------------------

#[test]
fn test_ripple_press_release_lifecycle() {
    let clock = ManualClock::new();
    let mut pilot = Pilot::new(
        RippleController::new(Default::default(), clock.clone()),
        clock,
    );
    pilot.send(RippleInput::PointerDown {
        button: PointerButton::Primary,
        position: Point::new(3.0, 4.0),
        bounds: Rect::new(0.0, 0.0, 6.0, 8.0),
    });
    pilot.send_at(50, RippleInput::PointerUp);
    pilot.advance_to(1000);

    let times: Vec<Millis> = pilot.timeline().iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![0, 250, 600]);
    assert!(pilot.controller().is_empty());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_from_toml_builds_controllers() {
    init_tracing();
    let cfg = InteractConfig::from_toml_str(
        r#"
        [tooltip]
        show_delay = 0

        [stepper]
        min = 10.0
        max = 0.0
        "#,
    )
    .unwrap();
    assert_eq!(cfg.validate().len(), 1);

    let clock = ManualClock::new();
    let mut tooltip = VisibilityController::new(cfg.tooltip, clock.clone());
    tooltip.handle(VisibilityInput::HoverStart);
    assert!(tooltip.is_open());

    let stepper = StepperController::new(cfg.stepper, clock);
    assert_eq!(stepper.diagnostics().len(), 1);
}
