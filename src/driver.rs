//! Async host loop for a controller on tokio.
//!
//! [`drive`] owns a controller for the lifetime of a widget: it feeds inputs
//! from a channel, sleeps until the controller's next timer deadline, and
//! forwards every output event. When the input side closes (the widget is
//! unmounted) or nobody listens for outputs any more, the controller is
//! disposed and handed back.

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::controller::Controller;
use crate::timing::TokioClock;

/// Why [`drive`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveExit {
    /// Every input sender was dropped.
    InputClosed,
    /// The output receiver was dropped.
    OutputClosed,
}

/// Run `controller` until its input channel closes.
///
/// `clock` must be the clock the controller was built with; it maps timer
/// deadlines to tokio instants. Returns the disposed controller.
pub async fn drive<T>(
    mut controller: T,
    clock: TokioClock,
    mut inputs: mpsc::Receiver<T::Input>,
    outputs: mpsc::Sender<T::Output>,
) -> (T, DriveExit)
where
    T: Controller,
{
    let exit = loop {
        let deadline = controller.next_deadline().map(|at| clock.instant_at(at));

        tokio::select! {
            input = inputs.recv() => match input {
                Some(input) => controller.handle(input),
                None => break DriveExit::InputClosed,
            },
            _ = sleep_until(deadline) => controller.poll(),
        }

        let mut closed = false;
        for event in controller.take_events() {
            if outputs.send(event).await.is_err() {
                closed = true;
                break;
            }
        }
        if closed {
            break DriveExit::OutputClosed;
        }
    };

    debug!(?exit, "controller driver stopped");
    controller.dispose();
    (controller, exit)
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{StepperConfig, TooltipConfig};
    use crate::timing::clock::Clock;
    use crate::stepper::{Direction, StepperController, StepperEvent, StepperInput};
    use crate::visibility::{VisibilityController, VisibilityEvent, VisibilityInput};
    use tokio_test::assert_ok;

    #[tokio::test(start_paused = true)]
    async fn tooltip_opens_after_delay() {
        let clock = TokioClock::new();
        let ctl = VisibilityController::new(TooltipConfig::default(), clock);
        let (in_tx, in_rx) = mpsc::channel(8);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let task = tokio::spawn(drive(ctl, clock, in_rx, out_tx));

        let start = Instant::now();
        assert_ok!(in_tx.send(VisibilityInput::HoverStart).await);
        assert_eq!(out_rx.recv().await, Some(VisibilityEvent::OpenChange(true)));
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        drop(in_tx);
        let (ctl, exit) = assert_ok!(task.await);
        assert_eq!(exit, DriveExit::InputClosed);
        assert!(ctl.is_open());
        assert_eq!(ctl.next_deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn stepper_repeats_while_held() {
        let clock = TokioClock::new();
        let ctl = StepperController::new(StepperConfig::default(), clock);
        let (in_tx, in_rx) = mpsc::channel(8);
        let (out_tx, mut out_rx) = mpsc::channel(32);
        let task = tokio::spawn(drive(ctl, clock, in_rx, out_tx));

        assert_ok!(in_tx.send(StepperInput::PressStart(Direction::Up)).await);
        assert_eq!(out_rx.recv().await, Some(StepperEvent::ValueChange(1.0)));
        assert_eq!(out_rx.recv().await, Some(StepperEvent::ValueChange(2.0)));
        assert_eq!(out_rx.recv().await, Some(StepperEvent::ValueChange(3.0)));
        assert_eq!(clock.now(), 600);

        assert_ok!(in_tx.send(StepperInput::PressEnd).await);
        drop(in_tx);
        let (ctl, _) = assert_ok!(task.await);
        assert_eq!(ctl.value(), 3.0);
        assert!(!ctl.has_active_repeat());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_output_stops_driver() {
        let clock = TokioClock::new();
        let ctl = VisibilityController::new(TooltipConfig::default(), clock);
        let (in_tx, in_rx) = mpsc::channel(8);
        let (out_tx, out_rx) = mpsc::channel(8);
        drop(out_rx);
        let task = tokio::spawn(drive(ctl, clock, in_rx, out_tx));

        assert_ok!(
            in_tx
                .send(VisibilityInput::Focus { visible: true })
                .await
        );
        let (ctl, exit) = assert_ok!(task.await);
        assert_eq!(exit, DriveExit::OutputClosed);
        assert_eq!(ctl.next_deadline(), None);
    }
}
