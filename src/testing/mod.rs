//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a controller on virtual time without a runtime.
//! Use [`timeline_to_string`] to capture its output timeline as plain text for
//! snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::timeline_to_string;
