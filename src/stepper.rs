//! Step-repeat: numeric stepping with press-and-hold auto-repeat.
//!
//! [`StepperController`] turns discrete step gestures (arrow keys, paging
//! keys, pressing the up/down buttons) into value changes bounded by
//! `min`/`max`. Holding a gesture starts an auto-repeat loop: one step at
//! once, then after `threshold` one step every `repeat_rate`.
//!
//! Keyboard and pointer holds share the same repeat loop; the controller does
//! not care which one started it.

use tracing::{debug, trace, warn};

use crate::config::StepperConfig;
use crate::controller::Controller;
use crate::error::ConfigWarning;
use crate::event::{Key, KeyEvent, KeyPhase};
use crate::timing::{Clock, Millis, TimerId, TimerQueue};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which way a step moves the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

/// Which configured increment a step uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Magnitude {
    Step,
    LargeStep,
}

/// A value bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    Min,
    Max,
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepperEvent {
    ValueChange(f64),
}

/// Host input for [`Controller::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepperInput {
    Key(KeyEvent),
    /// Pointer pressed on the up or down button.
    PressStart(Direction),
    /// Pointer released.
    PressEnd,
    StepOnce(Magnitude, Direction),
    StartRepeat(Magnitude, Direction),
    StopRepeat,
    JumpTo(Bound),
    /// External value input (typing, owner update). Stored unclamped.
    SetValue(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Repeat,
}

// ---------------------------------------------------------------------------
// StepperController
// ---------------------------------------------------------------------------

/// Bounded numeric value with single-step and auto-repeat stepping.
#[derive(Debug)]
pub struct StepperController<C: Clock> {
    clock: C,
    config: StepperConfig,
    value: f64,
    /// Set from repeat start until repeat stop, even after the loop halts at
    /// a bound, so a held key cannot restart it.
    has_active_repeat: bool,
    repeat: Option<(Magnitude, Direction)>,
    repeat_timer: Option<TimerId>,
    timers: TimerQueue<TimerKind>,
    firing_at: Option<Millis>,
    diagnostics: Vec<ConfigWarning>,
    events: Vec<StepperEvent>,
}

impl<C: Clock> StepperController<C> {
    /// Create a controller starting at `config.value`.
    ///
    /// Misconfiguration (`min > max`, `step > large_step`) is logged and kept
    /// in [`diagnostics`](Self::diagnostics); the values are used as given.
    pub fn new(config: StepperConfig, clock: C) -> Self {
        let diagnostics = config.validate();
        for warning in &diagnostics {
            warn!(%warning, "stepper misconfiguration");
        }
        Self {
            clock,
            value: config.value,
            config,
            has_active_repeat: false,
            repeat: None,
            repeat_timer: None,
            timers: TimerQueue::new(),
            firing_at: None,
            diagnostics,
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &[ConfigWarning] {
        &self.diagnostics
    }

    /// Whether an auto-repeat gesture is in progress.
    pub fn has_active_repeat(&self) -> bool {
        self.has_active_repeat
    }

    /// Whether the repeat timer is still ticking.
    pub fn is_repeating(&self) -> bool {
        self.repeat_timer.is_some_and(|id| self.timers.contains(id))
    }

    /// Whether the value sits on the bound `direction` moves towards.
    pub fn is_at_bound(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.config.max == Some(self.value),
            Direction::Down => self.config.min == Some(self.value),
        }
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    /// Apply one step. Returns whether the value changed.
    ///
    /// An out-of-range value is first snapped to the nearest violated bound
    /// (that snap *is* the step). A value already on the bound in the step's
    /// direction does not move. Otherwise the step is applied and the result
    /// clamped to both declared bounds.
    pub fn step_once(&mut self, magnitude: Magnitude, direction: Direction) -> bool {
        if self.is_at_bound(direction) {
            return false;
        }
        if let Some(bound) = self.violated_bound() {
            return self.set(bound);
        }
        let delta = self.delta(magnitude);
        let next = match direction {
            Direction::Up => self.value + delta,
            Direction::Down => self.value - delta,
        };
        self.set(self.clamp(next))
    }

    /// Step once now, then repeat every `repeat_rate` after `threshold`.
    ///
    /// Does nothing while a repeat gesture is already active.
    pub fn start_auto_repeat(&mut self, magnitude: Magnitude, direction: Direction) {
        if self.has_active_repeat {
            return;
        }
        self.has_active_repeat = true;
        self.repeat = Some((magnitude, direction));
        debug!(?magnitude, ?direction, "stepper auto-repeat start");
        self.step_once(magnitude, direction);
        if self.is_at_bound(direction) {
            return;
        }
        let at = self.now() + self.config.threshold;
        self.repeat_timer = Some(self.timers.schedule(TimerKind::Repeat, at));
    }

    /// End the repeat gesture. Safe to call when none is active.
    pub fn stop_auto_repeat(&mut self) {
        if let Some(id) = self.repeat_timer.take() {
            self.timers.cancel(id);
        }
        if self.has_active_repeat {
            debug!(value = self.value, "stepper auto-repeat stop");
        }
        self.has_active_repeat = false;
        self.repeat = None;
    }

    /// Set the value to a bound. `Min` without a declared `min` goes to `0`;
    /// `Max` without a declared `max` does nothing.
    pub fn jump_to_bound(&mut self, bound: Bound) -> bool {
        match bound {
            Bound::Min => self.set(self.config.min.unwrap_or(0.0)),
            Bound::Max => match self.config.max {
                Some(max) => self.set(max),
                None => false,
            },
        }
    }

    /// Store an externally supplied value as-is. It is clamped on the next step.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    // -----------------------------------------------------------------------
    // Host events
    // -----------------------------------------------------------------------

    /// Route a key event. Returns whether the key belongs to the stepper (the
    /// host should suppress its default behaviour).
    ///
    /// Arrows step by `step`, paging keys by `large_step`. A held key (its
    /// `Repeat` phase) starts auto-repeat and releasing it stops. Home and End
    /// jump to the bounds.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let gesture = match key.code {
            Key::Up => Some((Magnitude::Step, Direction::Up)),
            Key::Down => Some((Magnitude::Step, Direction::Down)),
            Key::PageUp => Some((Magnitude::LargeStep, Direction::Up)),
            Key::PageDown => Some((Magnitude::LargeStep, Direction::Down)),
            _ => None,
        };

        if let Some((magnitude, direction)) = gesture {
            match key.phase {
                KeyPhase::Press => {
                    self.step_once(magnitude, direction);
                }
                KeyPhase::Repeat => self.start_auto_repeat(magnitude, direction),
                KeyPhase::Release => self.stop_auto_repeat(),
            }
            return true;
        }

        let bound = match key.code {
            Key::Home => Bound::Min,
            Key::End => Bound::Max,
            _ => return false,
        };
        if key.is_down() {
            self.jump_to_bound(bound);
        }
        true
    }

    /// Pointer pressed on a step button.
    pub fn on_press_start(&mut self, direction: Direction) {
        self.start_auto_repeat(Magnitude::Step, direction);
    }

    /// Pointer released.
    pub fn on_press_end(&mut self) {
        self.stop_auto_repeat();
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn now(&self) -> Millis {
        self.firing_at.unwrap_or_else(|| self.clock.now())
    }

    fn delta(&self, magnitude: Magnitude) -> f64 {
        match magnitude {
            Magnitude::Step => self.config.step,
            Magnitude::LargeStep => self.config.large_step,
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let value = match self.config.max {
            Some(max) if value > max => max,
            _ => value,
        };
        match self.config.min {
            Some(min) if value < min => min,
            _ => value,
        }
    }

    /// The bound to snap to when the value lies outside `[min, max]`.
    ///
    /// With inverted bounds both can be violated at once; the nearer wins,
    /// ties go to `max`.
    fn violated_bound(&self) -> Option<f64> {
        let above = self.config.max.filter(|&max| self.value > max);
        let below = self.config.min.filter(|&min| self.value < min);
        match (above, below) {
            (Some(max), Some(min)) => {
                if (min - self.value) < (self.value - max) {
                    Some(min)
                } else {
                    Some(max)
                }
            }
            (Some(max), None) => Some(max),
            (None, Some(min)) => Some(min),
            (None, None) => None,
        }
    }

    fn set(&mut self, next: f64) -> bool {
        if next == self.value {
            return false;
        }
        trace!(from = self.value, to = next, "stepper value change");
        self.value = next;
        self.events.push(StepperEvent::ValueChange(next));
        true
    }

    fn fire_repeat(&mut self, at: Millis) {
        self.repeat_timer = None;
        let Some((magnitude, direction)) = self.repeat else {
            return;
        };
        self.step_once(magnitude, direction);
        if self.is_at_bound(direction) {
            debug!(value = self.value, "stepper auto-repeat reached bound");
            return;
        }
        // A zero rate would make the next tick due immediately, forever.
        let next = at + self.config.repeat_rate.max(1);
        self.repeat_timer = Some(self.timers.schedule(TimerKind::Repeat, next));
    }
}

impl<C: Clock> Controller for StepperController<C> {
    type Input = StepperInput;
    type Output = StepperEvent;

    fn handle(&mut self, input: StepperInput) {
        match input {
            StepperInput::Key(key) => {
                self.on_key(key);
            }
            StepperInput::PressStart(direction) => self.on_press_start(direction),
            StepperInput::PressEnd => self.on_press_end(),
            StepperInput::StepOnce(magnitude, direction) => {
                self.step_once(magnitude, direction);
            }
            StepperInput::StartRepeat(magnitude, direction) => {
                self.start_auto_repeat(magnitude, direction)
            }
            StepperInput::StopRepeat => self.stop_auto_repeat(),
            StepperInput::JumpTo(bound) => {
                self.jump_to_bound(bound);
            }
            StepperInput::SetValue(value) => self.set_value(value),
        }
    }

    fn poll(&mut self) {
        let now = self.clock.now();
        while let Some((_, TimerKind::Repeat, at)) = self.timers.pop_due(now) {
            self.firing_at = Some(at);
            self.fire_repeat(at);
        }
        self.firing_at = None;
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    fn take_events(&mut self) -> Vec<StepperEvent> {
        std::mem::take(&mut self.events)
    }

    fn dispose(&mut self) {
        self.timers.clear();
        self.repeat_timer = None;
        self.has_active_repeat = false;
        self.repeat = None;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
