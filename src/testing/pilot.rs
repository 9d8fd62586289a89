//! Pilot: programmatic interaction with a controller on virtual time.
//!
//! The `Pilot` owns a controller built on a [`ManualClock`] and provides
//! methods to send inputs at chosen times, advance the clock, and inspect the
//! timestamped output timeline for snapshot testing.

use crate::controller::Controller;
use crate::timing::{Clock, ManualClock, Millis};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless controller driver for testing.
///
/// Timers fire one deadline at a time while advancing, so every output in the
/// timeline carries the exact time it was produced.
///
/// # Examples
///
/// ```
/// use gilt_interact::config::TooltipConfig;
/// use gilt_interact::testing::Pilot;
/// use gilt_interact::timing::ManualClock;
/// use gilt_interact::visibility::{VisibilityController, VisibilityInput};
///
/// let clock = ManualClock::new();
/// let mut pilot = Pilot::new(
///     VisibilityController::new(TooltipConfig::default(), clock.clone()),
///     clock,
/// );
/// pilot.send(VisibilityInput::HoverStart);
/// pilot.advance_to(500);
/// assert_eq!(pilot.timeline().len(), 1);
/// assert_eq!(pilot.timeline()[0].0, 100);
/// ```
pub struct Pilot<T: Controller> {
    controller: T,
    clock: ManualClock,
    timeline: Vec<(Millis, T::Output)>,
}

impl<T: Controller> Pilot<T> {
    /// Wrap a controller. `clock` must be (a clone of) the controller's clock.
    pub fn new(controller: T, clock: ManualClock) -> Self {
        Self {
            controller,
            clock,
            timeline: Vec::new(),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Deliver an input at the current time.
    pub fn send(&mut self, input: T::Input) {
        self.controller.handle(input);
        self.record();
    }

    /// Advance to `at` (firing due timers on the way), then deliver `input`.
    pub fn send_at(&mut self, at: Millis, input: T::Input) {
        self.advance_to(at);
        self.send(input);
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Advance virtual time to `target`, firing timers deadline by deadline.
    ///
    /// Moving backwards is a no-op.
    pub fn advance_to(&mut self, target: Millis) {
        while let Some(deadline) = self.controller.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set(deadline);
            self.controller.poll();
            self.record();
        }
        self.clock.set(target);
    }

    /// Advance virtual time by `delta`.
    pub fn advance(&mut self, delta: Millis) {
        let target = self.now().saturating_add(delta);
        self.advance_to(target);
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Every output so far, with the time it was produced.
    pub fn timeline(&self) -> &[(Millis, T::Output)] {
        &self.timeline
    }

    /// Drain the recorded timeline.
    pub fn take_timeline(&mut self) -> Vec<(Millis, T::Output)> {
        std::mem::take(&mut self.timeline)
    }

    pub fn controller(&self) -> &T {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut T {
        &mut self.controller
    }

    /// Dispose the controller and hand it back.
    pub fn finish(mut self) -> T {
        self.controller.dispose();
        self.controller
    }

    fn record(&mut self) {
        let now = self.clock.now();
        self.timeline
            .extend(self.controller.take_events().into_iter().map(|e| (now, e)));
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StepperConfig, TooltipConfig};
    use crate::stepper::{Direction, StepperController, StepperEvent, StepperInput};
    use crate::visibility::{VisibilityController, VisibilityEvent, VisibilityInput};
    use pretty_assertions::assert_eq;

    fn tooltip_pilot() -> Pilot<VisibilityController<ManualClock>> {
        let clock = ManualClock::new();
        Pilot::new(
            VisibilityController::new(TooltipConfig::default(), clock.clone()),
            clock,
        )
    }

    #[test]
    fn new_pilot_starts_at_zero() {
        let pilot = tooltip_pilot();
        assert_eq!(pilot.now(), 0);
        assert!(pilot.timeline().is_empty());
    }

    #[test]
    fn send_records_immediate_output() {
        let mut pilot = tooltip_pilot();
        pilot.send_at(40, VisibilityInput::Focus { visible: true });
        assert_eq!(pilot.timeline(), &[(40, VisibilityEvent::OpenChange(true))]);
    }

    #[test]
    fn advance_records_timer_output_at_deadline() {
        let mut pilot = tooltip_pilot();
        pilot.send(VisibilityInput::HoverStart);
        pilot.advance(1000);
        assert_eq!(pilot.now(), 1000);
        assert_eq!(pilot.timeline(), &[(100, VisibilityEvent::OpenChange(true))]);
    }

    #[test]
    fn advance_backwards_is_noop() {
        let mut pilot = tooltip_pilot();
        pilot.advance_to(300);
        pilot.advance_to(100);
        assert_eq!(pilot.now(), 300);
    }

    #[test]
    fn repeat_ticks_are_individually_timestamped() {
        let clock = ManualClock::new();
        let mut pilot = Pilot::new(
            StepperController::new(StepperConfig::default(), clock.clone()),
            clock,
        );
        pilot.send(StepperInput::PressStart(Direction::Up));
        pilot.send_at(650, StepperInput::PressEnd);
        let times: Vec<Millis> = pilot.timeline().iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0, 500, 600]);
        assert_eq!(
            pilot.timeline().last().map(|(_, e)| *e),
            Some(StepperEvent::ValueChange(3.0))
        );
    }

    #[test]
    fn take_timeline_drains() {
        let mut pilot = tooltip_pilot();
        pilot.send(VisibilityInput::Focus { visible: true });
        assert_eq!(pilot.take_timeline().len(), 1);
        assert!(pilot.timeline().is_empty());
    }

    #[test]
    fn finish_disposes() {
        let mut pilot = tooltip_pilot();
        pilot.send(VisibilityInput::HoverStart);
        let ctl = pilot.finish();
        assert_eq!(ctl.next_deadline(), None);
    }
}
