//! Host input types, decoupled from crossterm.
//!
//! Defines [`Key`], [`KeyPhase`], [`KeyEvent`] and [`PointerButton`].
//! Crossterm events are converted via `From` impls so the controllers never
//! depend on crossterm directly.

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key the controllers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Anything else; ignored by every controller.
    Other,
}

// ---------------------------------------------------------------------------
// KeyPhase
// ---------------------------------------------------------------------------

/// Where in its press lifecycle a key event sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPhase {
    /// Initial key-down.
    #[default]
    Press,
    /// Key-down generated by the OS while the key is held.
    Repeat,
    /// Key-up.
    Release,
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with its phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub phase: KeyPhase,
}

impl KeyEvent {
    pub fn new(code: Key, phase: KeyPhase) -> Self {
        Self { code, phase }
    }

    /// Initial key-down.
    pub fn press(code: Key) -> Self {
        Self::new(code, KeyPhase::Press)
    }

    /// Held key-down.
    pub fn repeat(code: Key) -> Self {
        Self::new(code, KeyPhase::Repeat)
    }

    /// Key-up.
    pub fn release(code: Key) -> Self {
        Self::new(code, KeyPhase::Release)
    }

    /// Whether this is a key-down (initial or repeated).
    pub fn is_down(&self) -> bool {
        self.phase != KeyPhase::Release
    }
}

// ---------------------------------------------------------------------------
// PointerButton
// ---------------------------------------------------------------------------

/// Pointer button, numbered the DOM way (0 = primary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        match code {
            crossterm::event::KeyCode::Char(c) => Key::Char(c),
            crossterm::event::KeyCode::Enter => Key::Enter,
            crossterm::event::KeyCode::Esc => Key::Escape,
            crossterm::event::KeyCode::Tab => Key::Tab,
            crossterm::event::KeyCode::Up => Key::Up,
            crossterm::event::KeyCode::Down => Key::Down,
            crossterm::event::KeyCode::Left => Key::Left,
            crossterm::event::KeyCode::Right => Key::Right,
            crossterm::event::KeyCode::Home => Key::Home,
            crossterm::event::KeyCode::End => Key::End,
            crossterm::event::KeyCode::PageUp => Key::PageUp,
            crossterm::event::KeyCode::PageDown => Key::PageDown,
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyEventKind> for KeyPhase {
    fn from(kind: crossterm::event::KeyEventKind) -> Self {
        match kind {
            crossterm::event::KeyEventKind::Press => KeyPhase::Press,
            crossterm::event::KeyEventKind::Repeat => KeyPhase::Repeat,
            crossterm::event::KeyEventKind::Release => KeyPhase::Release,
        }
    }
}

/// Convert a crossterm `KeyEvent` into our `KeyEvent`.
///
/// Repeat and release phases are only reported by terminals that support
/// the kitty keyboard enhancement flags; elsewhere every event is a `Press`.
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        KeyEvent {
            code: Key::from(ct.code),
            phase: KeyPhase::from(ct.kind),
        }
    }
}

impl From<crossterm::event::MouseButton> for PointerButton {
    fn from(b: crossterm::event::MouseButton) -> Self {
        match b {
            crossterm::event::MouseButton::Left => PointerButton::Primary,
            crossterm::event::MouseButton::Middle => PointerButton::Auxiliary,
            crossterm::event::MouseButton::Right => PointerButton::Secondary,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
