//! Controlled / uncontrolled state cell.
//!
//! A [`Controllable`] either owns its value (uncontrolled) or mirrors a value
//! pinned by an external owner (controlled). Requests to change a controlled
//! value are reported back to the caller instead of being applied.

// ---------------------------------------------------------------------------
// Controllable
// ---------------------------------------------------------------------------

/// A value that may be owned internally or pinned by an external owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Controllable<T> {
    value: T,
    controlled: bool,
}

impl<T: Clone + PartialEq> Controllable<T> {
    /// An internally owned value starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            value: default,
            controlled: false,
        }
    }

    /// A value pinned by an external owner.
    pub fn controlled(value: T) -> Self {
        Self {
            value,
            controlled: true,
        }
    }

    /// Build from an optional pinned value, falling back to `default`.
    pub fn new(pinned: Option<T>, default: T) -> Self {
        match pinned {
            Some(v) => Self::controlled(v),
            None => Self::uncontrolled(default),
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether an external owner pins the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Request a change to `next`.
    ///
    /// Returns `Some(next)` when the request differs from the current value
    /// and should be announced. Only uncontrolled cells apply it.
    pub fn request(&mut self, next: T) -> Option<T> {
        if self.value == next {
            return None;
        }
        if !self.controlled {
            self.value = next.clone();
        }
        Some(next)
    }

    /// The external owner pins a new value (switches to controlled mode).
    pub fn pin(&mut self, value: T) {
        self.value = value;
        self.controlled = true;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
