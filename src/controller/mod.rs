//! The host-facing controller seam.
//!
//! Every interaction controller in this crate is a sans-IO state machine: the
//! host feeds it inputs, calls [`Controller::poll`] when time has passed, and
//! drains output events. The async [`driver`](crate::driver) and the headless
//! [`Pilot`](crate::testing::Pilot) are written against this trait only.

pub mod controllable;

pub use controllable::Controllable;

use crate::timing::Millis;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// A timer-driven interaction state machine.
pub trait Controller {
    /// Host input the controller understands.
    type Input;
    /// Notification the controller produces for the presentation layer.
    type Output;

    /// Handle one input signal. Runs to completion; never fires timers.
    fn handle(&mut self, input: Self::Input);

    /// Fire every timer due at or before the clock's current time.
    fn poll(&mut self);

    /// The earliest pending timer deadline, if any.
    fn next_deadline(&self) -> Option<Millis>;

    /// Drain accumulated output events, oldest first.
    fn take_events(&mut self) -> Vec<Self::Output>;

    /// Cancel all outstanding timers. No timer fires after this returns.
    fn dispose(&mut self);
}
