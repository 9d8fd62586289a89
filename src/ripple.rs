//! Press ripple lifecycle.
//!
//! A ripple spawns where the primary button goes down, sized so its circle
//! covers the whole target. Once the pointer is released it stays until it
//! has been visible for `completed_factor * duration`, then fades for
//! `fade_ratio * duration` and is removed.
//!
//! The controller only tracks ripples and their timing; drawing the circle
//! and animating its scale belongs to the presentation layer, driven by the
//! [`RippleEvent`]s drained from [`Controller::take_events`].

use slotmap::{new_key_type, SlotMap};
use tracing::{trace, warn};

use crate::config::RippleConfig;
use crate::controller::Controller;
use crate::error::ConfigWarning;
use crate::event::PointerButton;
use crate::geometry::{Point, Rect};
use crate::timing::{Clock, Millis, TimerQueue};

new_key_type! {
    /// Handle to a live ripple.
    pub struct RippleId;
}

// ---------------------------------------------------------------------------
// Ripple
// ---------------------------------------------------------------------------

/// Where a ripple is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RipplePhase {
    /// Pointer still held.
    Held,
    /// Pointer released, waiting out the minimum visible time.
    Released,
    /// Fade-out running.
    Fading,
}

/// A live ripple.
#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    /// Centre, relative to the target's top-left corner.
    pub center: Point,
    /// Diameter of the fully grown circle.
    pub size: f64,
    pub spawned_at: Millis,
    pub phase: RipplePhase,
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RippleEvent {
    Spawn { id: RippleId, center: Point, size: f64 },
    Fade(RippleId),
    Remove(RippleId),
}

/// Host input for [`Controller::handle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RippleInput {
    PointerDown {
        button: PointerButton,
        position: Point,
        bounds: Rect,
    },
    PointerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Fade(RippleId),
    Remove(RippleId),
}

// ---------------------------------------------------------------------------
// RippleController
// ---------------------------------------------------------------------------

/// Spawns, fades and removes press ripples.
#[derive(Debug)]
pub struct RippleController<C: Clock> {
    clock: C,
    config: RippleConfig,
    ripples: SlotMap<RippleId, Ripple>,
    timers: TimerQueue<TimerKind>,
    firing_at: Option<Millis>,
    diagnostics: Vec<ConfigWarning>,
    events: Vec<RippleEvent>,
}

impl<C: Clock> RippleController<C> {
    pub fn new(config: RippleConfig, clock: C) -> Self {
        let diagnostics = config.validate();
        for warning in &diagnostics {
            warn!(%warning, "ripple misconfiguration");
        }
        Self {
            clock,
            config,
            ripples: SlotMap::with_key(),
            timers: TimerQueue::new(),
            firing_at: None,
            diagnostics,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    /// Misconfigurations found at construction.
    pub fn diagnostics(&self) -> &[ConfigWarning] {
        &self.diagnostics
    }

    pub fn get(&self, id: RippleId) -> Option<&Ripple> {
        self.ripples.get(id)
    }

    /// Live ripples, in no particular order.
    pub fn ripples(&self) -> impl Iterator<Item = (RippleId, &Ripple)> {
        self.ripples.iter()
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Spawn a ripple for a primary-button press inside `bounds`.
    ///
    /// Presses that land outside `bounds` are ignored.
    pub fn on_pointer_down(
        &mut self,
        button: PointerButton,
        position: Point,
        bounds: Rect,
    ) -> Option<RippleId> {
        if self.config.disabled
            || button != PointerButton::Primary
            || !bounds.contains(position)
        {
            return None;
        }
        let ripple = Ripple {
            center: position - bounds.origin(),
            size: bounds.farthest_corner_distance(position) * 2.0,
            spawned_at: self.now(),
            phase: RipplePhase::Held,
        };
        let (center, size) = (ripple.center, ripple.size);
        let id = self.ripples.insert(ripple);
        trace!(?id, size, "ripple spawn");
        self.events.push(RippleEvent::Spawn { id, center, size });
        Some(id)
    }

    /// Release every held ripple.
    ///
    /// Each fades once it has been visible for the minimum time, or at once
    /// if it already has.
    pub fn on_pointer_up(&mut self) {
        let now = self.now();
        let min_visible = self.config.min_visible();
        let mut released = Vec::new();
        for (id, ripple) in self.ripples.iter_mut() {
            if ripple.phase == RipplePhase::Held {
                ripple.phase = RipplePhase::Released;
                let elapsed = now.saturating_sub(ripple.spawned_at);
                released.push((id, now + min_visible.saturating_sub(elapsed)));
            }
        }
        for (id, at) in released {
            self.timers.schedule(TimerKind::Fade(id), at);
        }
    }

    fn now(&self) -> Millis {
        self.firing_at.unwrap_or_else(|| self.clock.now())
    }

    fn fire(&mut self, kind: TimerKind, at: Millis) {
        match kind {
            TimerKind::Fade(id) => {
                if let Some(ripple) = self.ripples.get_mut(id) {
                    ripple.phase = RipplePhase::Fading;
                    self.events.push(RippleEvent::Fade(id));
                    let remove_at = at + self.config.fade_duration();
                    self.timers.schedule(TimerKind::Remove(id), remove_at);
                }
            }
            TimerKind::Remove(id) => {
                if self.ripples.remove(id).is_some() {
                    trace!(?id, "ripple removed");
                    self.events.push(RippleEvent::Remove(id));
                }
            }
        }
    }
}

impl<C: Clock> Controller for RippleController<C> {
    type Input = RippleInput;
    type Output = RippleEvent;

    fn handle(&mut self, input: RippleInput) {
        match input {
            RippleInput::PointerDown {
                button,
                position,
                bounds,
            } => {
                self.on_pointer_down(button, position, bounds);
            }
            RippleInput::PointerUp => self.on_pointer_up(),
        }
    }

    fn poll(&mut self) {
        let now = self.clock.now();
        while let Some((_, kind, at)) = self.timers.pop_due(now) {
            self.firing_at = Some(at);
            self.fire(kind, at);
        }
        self.firing_at = None;
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    fn take_events(&mut self) -> Vec<RippleEvent> {
        std::mem::take(&mut self.events)
    }

    fn dispose(&mut self) {
        self.timers.clear();
        self.ripples.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
