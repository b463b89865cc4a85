use crate::unit::Unit;

/// Named keys a duration input reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Backspace,
    ArrowUp,
    ArrowDown,
    Tab,
    Escape,
}

/// Input events routed to a duration input and its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Committed text input (one or more characters) for the focused field.
    TextInput { text: String },
    /// Replace the focused field's whole text (select-all then type, paste).
    Replace { text: String },
    /// Named key pressed. `shift` reverses Tab.
    KeyPress { key: Key, shift: bool },
    /// Pointer pressed on the field for `unit`.
    Click { unit: Unit },
    /// Pointer pressed outside the input.
    ClickOutside,
}

impl InputEvent {
    pub fn text(text: impl Into<String>) -> Self {
        InputEvent::TextInput { text: text.into() }
    }

    pub fn replace(text: impl Into<String>) -> Self {
        InputEvent::Replace { text: text.into() }
    }

    pub fn key(key: Key) -> Self {
        InputEvent::KeyPress { key, shift: false }
    }
}

/// Result of routing an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
