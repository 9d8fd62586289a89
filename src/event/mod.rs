//! Host input: keys with press phases and pointer buttons.

pub mod input;

pub use input::{Key, KeyEvent, KeyPhase, PointerButton};
