//! Injectable time: clocks and the per-controller timer queue.
//!
//! Controllers never read wall-clock time directly. They ask a [`Clock`] for
//! "now" and park their deferred work in a [`TimerQueue`], which the host
//! drains by calling `poll()` on the controller.

pub mod clock;
pub mod queue;

pub use clock::{Clock, ManualClock, Millis, SystemClock, TokioClock};
pub use queue::{TimerId, TimerQueue};
