//! Delayed visibility: tooltip show/hide scheduling.
//!
//! [`VisibilityController`] merges activation signals from several sources
//! (trigger hover, keyboard focus, hovering the tooltip content itself) into
//! one debounced open/closed state. Opening waits `show_delay`, closing waits
//! `hide_delay`, and any re-activation while a close is pending aborts it.
//!
//! Decisions always look at the combined source state at the moment they are
//! made (signal time *and* timer-fire time), so one source handing over to
//! another never produces a premature close.
//!
//! ```
//! use gilt_interact::config::TooltipConfig;
//! use gilt_interact::controller::Controller;
//! use gilt_interact::timing::ManualClock;
//! use gilt_interact::visibility::{Source, VisibilityController};
//!
//! let clock = ManualClock::new();
//! let mut tooltip = VisibilityController::new(TooltipConfig::default(), clock.clone());
//!
//! tooltip.notify_activate(Source::Hover, false);
//! clock.advance(99);
//! tooltip.poll();
//! assert!(!tooltip.is_open());
//!
//! clock.advance(1);
//! tooltip.poll();
//! assert!(tooltip.is_open());
//! ```

use tracing::{debug, trace};

use crate::config::{TooltipConfig, TriggerMode};
use crate::controller::{Controllable, Controller};
use crate::event::{Key, KeyEvent, KeyPhase};
use crate::timing::{Clock, Millis, TimerId, TimerQueue};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// An independent activation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Hover,
    Focus,
}

/// Why a tooltip was closed without delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    Escape,
    OutsideClick,
    Programmatic,
    /// The trigger element was pressed.
    TriggerPressed,
    /// The trigger element became disabled.
    Disabled,
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// Visibility changed (uncontrolled) or a change is requested from the
    /// owner (controlled).
    OpenChange(bool),
}

/// Host input for [`Controller::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityInput {
    Activate { source: Source, immediate: bool },
    Deactivate { source: Source, immediate: bool },
    /// Pointer entered the trigger.
    HoverStart,
    /// Pointer left the trigger.
    HoverEnd,
    /// Trigger received focus; `visible` when the focus ring is showing.
    Focus { visible: bool },
    Blur,
    /// Pointer pressed on the trigger.
    Press,
    /// Pointer entered the tooltip content.
    ContentHoverStart,
    /// Pointer left the tooltip content.
    ContentHoverEnd,
    Key(KeyEvent),
    Dismiss(DismissReason),
    SetDisabled(bool),
    /// The owner pins visibility (controlled mode).
    SetOpen(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Show,
    Hide,
}

// ---------------------------------------------------------------------------
// VisibilityController
// ---------------------------------------------------------------------------

/// Debounced open/closed state for a tooltip-like overlay.
#[derive(Debug)]
pub struct VisibilityController<C: Clock> {
    clock: C,
    config: TooltipConfig,
    open: Controllable<bool>,
    is_hovered: bool,
    is_focused: bool,
    content_hovered: bool,
    disabled: bool,
    timers: TimerQueue<TimerKind>,
    show_timer: Option<TimerId>,
    hide_timer: Option<TimerId>,
    /// Logical time while a timer is firing (its deadline).
    firing_at: Option<Millis>,
    events: Vec<VisibilityEvent>,
}

impl<C: Clock> VisibilityController<C> {
    /// Create a controller. Controlled when `config.open` is set.
    pub fn new(config: TooltipConfig, clock: C) -> Self {
        let open = Controllable::new(config.open, config.default_open);
        Self {
            clock,
            config,
            open,
            is_hovered: false,
            is_focused: false,
            content_hovered: false,
            disabled: false,
            timers: TimerQueue::new(),
            show_timer: None,
            hide_timer: None,
            firing_at: None,
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current visibility (the owner's value in controlled mode).
    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_controlled(&self) -> bool {
        self.open.is_controlled()
    }

    pub fn has_pending_show(&self) -> bool {
        self.show_timer.is_some_and(|id| self.timers.contains(id))
    }

    pub fn has_pending_hide(&self) -> bool {
        self.hide_timer.is_some_and(|id| self.timers.contains(id))
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    /// Mark `source` active and, if closed, schedule (or perform) the open.
    ///
    /// A pending close is always aborted.
    pub fn notify_activate(&mut self, source: Source, immediate: bool) {
        if self.disabled {
            return;
        }
        trace!(?source, immediate, "tooltip source activated");
        self.set_source(source, true);
        if self.has_active_source() {
            self.show(immediate);
        }
    }

    /// Mark `source` inactive; close only once no source remains active.
    pub fn notify_deactivate(&mut self, source: Source, immediate: bool) {
        if self.disabled {
            return;
        }
        trace!(?source, immediate, "tooltip source deactivated");
        self.set_source(source, false);
        if !self.has_active_source() {
            self.hide(immediate);
        }
    }

    /// Cancel every pending timer and close now.
    pub fn force_close(&mut self, reason: DismissReason) {
        debug!(?reason, "tooltip dismissed");
        self.cancel_show();
        self.cancel_hide();
        self.set_open(false);
    }

    /// The owner pins visibility to `open` (switches to controlled mode).
    pub fn set_controlled_open(&mut self, open: bool) {
        self.open.pin(open);
        if !open {
            self.cancel_hide();
        }
    }

    /// Enable or disable the trigger. Disabling closes and clears all sources.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled && !self.disabled {
            self.clear_sources();
            self.force_close(DismissReason::Disabled);
        }
        self.disabled = disabled;
    }

    // -----------------------------------------------------------------------
    // Host events
    // -----------------------------------------------------------------------

    /// Pointer entered the trigger.
    pub fn on_hover_start(&mut self) {
        if self.config.trigger != TriggerMode::Focus {
            self.notify_activate(Source::Hover, false);
        }
    }

    /// Pointer left the trigger.
    pub fn on_hover_end(&mut self) {
        if self.config.trigger != TriggerMode::Focus {
            self.notify_deactivate(Source::Hover, false);
        }
    }

    /// Trigger focused. Only keyboard-visible focus opens, and it opens at once.
    pub fn on_focus(&mut self, focus_visible: bool) {
        if self.config.trigger != TriggerMode::Hover && focus_visible {
            self.notify_activate(Source::Focus, true);
        }
    }

    /// Trigger blurred; closes at once if nothing else holds it open.
    pub fn on_blur(&mut self) {
        if self.config.trigger != TriggerMode::Hover {
            self.notify_deactivate(Source::Focus, true);
        }
    }

    /// Pressing the trigger drops every source and closes at once.
    pub fn on_press(&mut self) {
        if self.disabled {
            return;
        }
        self.clear_sources();
        self.force_close(DismissReason::TriggerPressed);
    }

    /// Pointer entered the tooltip content: keep it open.
    pub fn on_content_hover_start(&mut self) {
        if self.disabled || !self.config.interactive {
            return;
        }
        self.content_hovered = true;
        self.show(true);
    }

    /// Pointer left the tooltip content.
    pub fn on_content_hover_end(&mut self) {
        if self.disabled || !self.config.interactive {
            return;
        }
        self.content_hovered = false;
        if !self.has_active_source() {
            self.hide(false);
        }
    }

    /// Escape closes an open tooltip.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == Key::Escape
            && key.phase == KeyPhase::Press
            && self.is_open()
            && !self.disabled
        {
            self.force_close(DismissReason::Escape);
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn now(&self) -> Millis {
        self.firing_at.unwrap_or_else(|| self.clock.now())
    }

    /// The one place activation is decided.
    fn has_active_source(&self) -> bool {
        self.is_hovered || self.is_focused || self.content_hovered
    }

    fn set_source(&mut self, source: Source, active: bool) {
        match source {
            Source::Hover => self.is_hovered = active,
            Source::Focus => self.is_focused = active,
        }
    }

    fn clear_sources(&mut self) {
        self.is_hovered = false;
        self.is_focused = false;
        self.content_hovered = false;
    }

    fn show(&mut self, immediate: bool) {
        self.cancel_hide();
        if self.is_open() {
            return;
        }
        if immediate || self.config.show_delay == 0 {
            self.cancel_show();
            self.set_open(true);
        } else {
            self.cancel_show();
            let at = self.now() + self.config.show_delay;
            self.show_timer = Some(self.timers.schedule(TimerKind::Show, at));
            trace!(at, "tooltip show scheduled");
        }
    }

    fn hide(&mut self, immediate: bool) {
        self.cancel_show();
        if immediate || self.config.hide_delay == 0 || !self.is_open() {
            self.cancel_hide();
            self.set_open(false);
        } else {
            self.cancel_hide();
            let at = self.now() + self.config.hide_delay;
            self.hide_timer = Some(self.timers.schedule(TimerKind::Hide, at));
            trace!(at, "tooltip hide scheduled");
        }
    }

    fn cancel_show(&mut self) {
        if let Some(id) = self.show_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_hide(&mut self) {
        if let Some(id) = self.hide_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn set_open(&mut self, open: bool) {
        if let Some(next) = self.open.request(open) {
            debug!(
                open = next,
                controlled = self.open.is_controlled(),
                "tooltip visibility change"
            );
            self.events.push(VisibilityEvent::OpenChange(next));
        }
        if !self.is_open() {
            self.cancel_hide();
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Show => {
                self.show_timer = None;
                if self.has_active_source() {
                    self.set_open(true);
                }
            }
            TimerKind::Hide => {
                self.hide_timer = None;
                if !self.has_active_source() {
                    self.set_open(false);
                }
            }
        }
    }
}

impl<C: Clock> Controller for VisibilityController<C> {
    type Input = VisibilityInput;
    type Output = VisibilityEvent;

    fn handle(&mut self, input: VisibilityInput) {
        match input {
            VisibilityInput::Activate { source, immediate } => {
                self.notify_activate(source, immediate)
            }
            VisibilityInput::Deactivate { source, immediate } => {
                self.notify_deactivate(source, immediate)
            }
            VisibilityInput::HoverStart => self.on_hover_start(),
            VisibilityInput::HoverEnd => self.on_hover_end(),
            VisibilityInput::Focus { visible } => self.on_focus(visible),
            VisibilityInput::Blur => self.on_blur(),
            VisibilityInput::Press => self.on_press(),
            VisibilityInput::ContentHoverStart => self.on_content_hover_start(),
            VisibilityInput::ContentHoverEnd => self.on_content_hover_end(),
            VisibilityInput::Key(key) => self.on_key(key),
            VisibilityInput::Dismiss(reason) => self.force_close(reason),
            VisibilityInput::SetDisabled(disabled) => self.set_disabled(disabled),
            VisibilityInput::SetOpen(open) => self.set_controlled_open(open),
        }
    }

    fn poll(&mut self) {
        let now = self.clock.now();
        while let Some((_, kind, at)) = self.timers.pop_due(now) {
            self.firing_at = Some(at);
            self.fire(kind);
        }
        self.firing_at = None;
    }

    fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    fn take_events(&mut self) -> Vec<VisibilityEvent> {
        std::mem::take(&mut self.events)
    }

    fn dispose(&mut self) {
        self.timers.clear();
        self.show_timer = None;
        self.hide_timer = None;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
