use std::borrow::Cow;

use crate::event::{EventResult, InputEvent, Key};

// ── EditBuffer ────────────────────────────────────────────────────────────

/// What a field is showing while the user edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditBuffer {
    /// The text parses as a non-negative integer.
    Valid(u64),
    /// Raw text that does not parse (empty, a sign, a decimal point, letters).
    Invalid(String),
}

impl EditBuffer {
    /// Only plain ASCII digits are accepted, surrounding whitespace aside.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return EditBuffer::Invalid(raw.to_string());
        }
        match trimmed.parse::<u64>() {
            Ok(n) => EditBuffer::Valid(n),
            // Too many digits for u64.
            Err(_) => EditBuffer::Invalid(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            EditBuffer::Valid(n) => Some(*n),
            EditBuffer::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, EditBuffer::Valid(_))
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            EditBuffer::Valid(n) => Cow::Owned(n.to_string()),
            EditBuffer::Invalid(s) => Cow::Borrowed(s),
        }
    }
}

// ── BoundedFieldEditor ────────────────────────────────────────────────────

/// A controlled integer field with an inclusive floor and optional ceiling.
///
/// The field keeps two values apart: the value last confirmed by its owner
/// and the buffer being edited. Only numeric buffers are committed; a
/// buffer that does not parse stays local until it is fixed or the field
/// loses focus.
///
/// Typing above the ceiling commits the ceiling. Typing below the floor is
/// committed as-is, since the user may still be on the way to a larger
/// number; the owner corrects it. The stepper respects both ends.
///
/// # Example
/// ```rust
/// use hourglass_input::field::BoundedFieldEditor;
///
/// let mut field = BoundedFieldEditor::new(5).min(0).max(59);
/// assert_eq!(field.edit("75"), Some(59));
/// assert_eq!(field.edit(""), None);
/// field.blur();
/// assert_eq!(field.text(), "5");
/// ```
#[derive(Debug, Clone)]
pub struct BoundedFieldEditor {
    confirmed: u64,
    buffer: EditBuffer,
    min: u64,
    max: Option<u64>,
    focused: bool,
}

impl BoundedFieldEditor {
    pub fn new(value: u64) -> Self {
        Self {
            confirmed: value,
            buffer: EditBuffer::Valid(value),
            min: 0,
            max: None,
            focused: false,
        }
    }

    pub fn min(mut self, v: u64) -> Self { self.min = v; self }
    pub fn max(mut self, v: u64) -> Self { self.max = Some(v); self }
    pub fn focused(mut self, v: bool) -> Self { self.focused = v; self }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Value last confirmed by the owner.
    #[inline]
    pub fn confirmed(&self) -> u64 { self.confirmed }
    #[inline]
    pub fn buffer(&self) -> &EditBuffer { &self.buffer }
    #[inline]
    pub fn floor(&self) -> u64 { self.min }
    #[inline]
    pub fn ceiling(&self) -> Option<u64> { self.max }
    #[inline]
    pub fn is_focused(&self) -> bool { self.focused }

    /// The text a renderer should show.
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    /// The buffer's value, or the confirmed value while the buffer is invalid.
    pub fn value(&self) -> u64 {
        self.buffer.value().unwrap_or(self.confirmed)
    }

    /// True while the buffer holds text that does not parse.
    pub fn is_mid_edit(&self) -> bool {
        !self.buffer.is_valid()
    }

    // ── Editing ───────────────────────────────────────────────────────────

    /// Replaces the buffer with `raw`. Returns the value to report upward,
    /// if any.
    pub fn edit(&mut self, raw: &str) -> Option<u64> {
        match EditBuffer::parse(raw) {
            EditBuffer::Valid(n) => match self.max {
                Some(max) if n > max => {
                    log::trace!("typed {n} exceeds ceiling {max}, coerced");
                    self.buffer = EditBuffer::Valid(max);
                    Some(max)
                }
                _ => {
                    self.buffer = EditBuffer::Valid(n);
                    Some(n)
                }
            },
            invalid => {
                self.buffer = invalid;
                None
            }
        }
    }

    /// Appends typed text at the end of the buffer.
    pub fn push_str(&mut self, text: &str) -> Option<u64> {
        let mut next = self.text().into_owned();
        next.push_str(text);
        self.edit(&next)
    }

    /// Removes the last character of the buffer.
    pub fn backspace(&mut self) -> Option<u64> {
        let next = {
            let current = self.text();
            let mut chars = current.chars();
            chars.next_back();
            chars.as_str().to_string()
        };
        self.edit(&next)
    }

    /// Increments by one, staying inside `[min, max]`.
    pub fn step_up(&mut self) -> Option<u64> {
        let next = self.value().saturating_add(1);
        self.step_to(next)
    }

    /// Decrements by one, staying inside `[min, max]`.
    pub fn step_down(&mut self) -> Option<u64> {
        let next = self.value().saturating_sub(1);
        self.step_to(next)
    }

    fn step_to(&mut self, target: u64) -> Option<u64> {
        let mut next = target.max(self.min);
        if let Some(max) = self.max {
            next = next.min(max);
        }
        if self.buffer == EditBuffer::Valid(next) {
            return None;
        }
        self.buffer = EditBuffer::Valid(next);
        Some(next)
    }

    // ── Focus ─────────────────────────────────────────────────────────────

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Loses focus. An unparseable buffer is discarded in favour of the
    /// confirmed value.
    pub fn blur(&mut self) {
        self.focused = false;
        if let EditBuffer::Invalid(raw) = &self.buffer {
            log::debug!("discarding unparseable input {raw:?}, restoring {}", self.confirmed);
            self.buffer = EditBuffer::Valid(self.confirmed);
        }
    }

    // ── Sync ──────────────────────────────────────────────────────────────

    /// Applies the owner's current value and limits.
    ///
    /// Limits always follow. A changed value replaces a numeric buffer but
    /// leaves text that is still being typed alone.
    pub fn sync(&mut self, value: u64, min: u64, max: Option<u64>) {
        self.min = min;
        self.max = max;
        if value == self.confirmed {
            return;
        }
        self.confirmed = value;
        if let EditBuffer::Valid(current) = self.buffer {
            if current != value {
                self.buffer = EditBuffer::Valid(value);
            }
        }
    }

    // ── Event handling ────────────────────────────────────────────────────

    /// Handles editing events while focused.
    ///
    /// Returns `(result, commit)`, where `commit` is the value to report to
    /// the owner. Focus changes are left to the containing input.
    pub fn on_event(&mut self, event: &InputEvent) -> (EventResult, Option<u64>) {
        if !self.focused {
            return (EventResult::Ignored, None);
        }
        let commit = match event {
            InputEvent::TextInput { text } => self.push_str(text),
            InputEvent::Replace { text } => self.edit(text),
            InputEvent::KeyPress { key: Key::Backspace, .. } => self.backspace(),
            InputEvent::KeyPress { key: Key::ArrowUp, .. } => self.step_up(),
            InputEvent::KeyPress { key: Key::ArrowDown, .. } => self.step_down(),
            _ => return (EventResult::Ignored, None),
        };
        (EventResult::Consumed, commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes_field(value: u64) -> BoundedFieldEditor {
        BoundedFieldEditor::new(value).min(0).max(59).focused(true)
    }

    // ── EditBuffer::parse ─────────────────────────────────────────────────

    #[test]
    fn parse_accepts_digits_only() {
        assert_eq!(EditBuffer::parse("42"), EditBuffer::Valid(42));
        assert_eq!(EditBuffer::parse(" 7 "), EditBuffer::Valid(7));
        assert_eq!(EditBuffer::parse(""), EditBuffer::Invalid(String::new()));
        assert_eq!(EditBuffer::parse("-3"), EditBuffer::Invalid("-3".into()));
        assert_eq!(EditBuffer::parse("1.5"), EditBuffer::Invalid("1.5".into()));
        assert!(!EditBuffer::parse("99999999999999999999999").is_valid());
    }

    // ── edit ──────────────────────────────────────────────────────────────

    #[test]
    fn non_numeric_edit_is_kept_but_not_reported() {
        let mut f = minutes_field(12);
        assert_eq!(f.edit("abc"), None);
        assert_eq!(f.text(), "abc");
        assert_eq!(f.confirmed(), 12);
        assert_eq!(f.value(), 12);
        assert!(f.is_mid_edit());
    }

    #[test]
    fn over_ceiling_is_coerced_and_reported() {
        let mut f = minutes_field(12);
        assert_eq!(f.edit("120"), Some(59));
        assert_eq!(f.text(), "59");
    }

    #[test]
    fn under_floor_is_reported_unchanged() {
        let mut f = BoundedFieldEditor::new(10).min(5).max(59);
        assert_eq!(f.edit("2"), Some(2));
        assert_eq!(f.text(), "2");
    }

    #[test]
    fn no_ceiling_accepts_anything() {
        let mut f = BoundedFieldEditor::new(0);
        assert_eq!(f.edit("100000"), Some(100_000));
    }

    // ── typing ────────────────────────────────────────────────────────────

    #[test]
    fn typing_appends_and_backspace_can_empty() {
        let mut f = minutes_field(1);
        assert_eq!(f.push_str("5"), Some(15));
        assert_eq!(f.backspace(), Some(1));
        assert_eq!(f.backspace(), None);
        assert_eq!(f.text(), "");
    }

    // ── blur ──────────────────────────────────────────────────────────────

    #[test]
    fn blur_restores_confirmed_value_after_invalid_edit() {
        let mut f = minutes_field(30);
        f.edit("");
        f.blur();
        assert_eq!(f.buffer(), &EditBuffer::Valid(30));
        assert!(!f.is_focused());
    }

    #[test]
    fn blur_keeps_valid_buffer() {
        let mut f = minutes_field(30);
        f.edit("45");
        f.blur();
        assert_eq!(f.text(), "45");
    }

    // ── sync ──────────────────────────────────────────────────────────────

    #[test]
    fn sync_overwrites_numeric_buffer() {
        let mut f = minutes_field(30);
        f.sync(10, 0, Some(20));
        assert_eq!(f.text(), "10");
        assert_eq!(f.ceiling(), Some(20));
    }

    #[test]
    fn sync_leaves_text_being_typed() {
        let mut f = minutes_field(30);
        f.edit("");
        f.sync(10, 0, Some(59));
        assert_eq!(f.text(), "");
        f.blur();
        assert_eq!(f.text(), "10");
    }

    #[test]
    fn sync_with_unchanged_value_keeps_local_edit() {
        let mut f = minutes_field(30);
        f.edit("40");
        f.sync(30, 0, Some(59));
        assert_eq!(f.text(), "40");
    }

    // ── stepper ───────────────────────────────────────────────────────────

    #[test]
    fn stepper_respects_both_limits() {
        let mut f = BoundedFieldEditor::new(1).min(1).max(2);
        assert_eq!(f.step_down(), None);
        assert_eq!(f.step_up(), Some(2));
        assert_eq!(f.step_up(), None);
    }

    #[test]
    fn stepper_starts_from_confirmed_when_mid_edit() {
        let mut f = minutes_field(7);
        f.edit("x");
        assert_eq!(f.step_up(), Some(8));
    }

    // ── on_event ──────────────────────────────────────────────────────────

    #[test]
    fn events_ignored_without_focus() {
        let mut f = BoundedFieldEditor::new(3);
        let (result, commit) = f.on_event(&InputEvent::text("4"));
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(commit, None);
    }

    #[test]
    fn events_route_to_editing_primitives() {
        let mut f = minutes_field(3);
        assert_eq!(f.on_event(&InputEvent::text("0")), (EventResult::Consumed, Some(30)));
        assert_eq!(f.on_event(&InputEvent::key(Key::ArrowUp)), (EventResult::Consumed, Some(31)));
        assert_eq!(f.on_event(&InputEvent::replace("")), (EventResult::Consumed, None));
        assert_eq!(f.on_event(&InputEvent::key(Key::Tab)), (EventResult::Ignored, None));
    }
}
