//! Snapshot rendering helpers.
//!
//! Converts a recorded [`Pilot`](super::Pilot) timeline into a single line of
//! text suitable for inline snapshot assertions.

use std::fmt::Debug;

use crate::timing::Millis;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a timeline as `"<time> <event>"` entries joined by `" | "`.
///
/// # Examples
///
/// ```
/// use gilt_interact::testing::timeline_to_string;
/// use gilt_interact::visibility::VisibilityEvent;
///
/// let timeline = [
///     (100, VisibilityEvent::OpenChange(true)),
///     (450, VisibilityEvent::OpenChange(false)),
/// ];
/// assert_eq!(
///     timeline_to_string(&timeline),
///     "100 OpenChange(true) | 450 OpenChange(false)"
/// );
/// ```
pub fn timeline_to_string<E: Debug>(timeline: &[(Millis, E)]) -> String {
    timeline
        .iter()
        .map(|(at, event)| format!("{at} {event:?}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

// ===========================================================================
// Tests
// ===========================================================================
