use crate::bounds::DurationBounds;
use crate::controller::{DurationController, DurationProps, UnitBinding};
use crate::event::{EventResult, InputEvent, Key};
use crate::field::BoundedFieldEditor;
use crate::focus::{FocusChange, FocusRing};
use crate::unit::{Unit, UnitSet};

// ── UnitField ─────────────────────────────────────────────────────────────

/// A [`BoundedFieldEditor`] bound to one unit of a duration.
///
/// The binding is handed in on every call instead of being stored, so the
/// field never holds on to the controller.
#[derive(Debug, Clone)]
pub struct UnitField {
    unit: Unit,
    editor: BoundedFieldEditor,
}

impl UnitField {
    /// Registers `unit` with `binding` and starts from its current view.
    pub fn new(unit: Unit, binding: &mut dyn UnitBinding) -> Self {
        binding.register(unit);
        let view = binding.view(unit);
        let mut editor = BoundedFieldEditor::new(view.value);
        editor.sync(view.value, view.min, view.max);
        Self { unit, editor }
    }

    #[inline]
    pub fn unit(&self) -> Unit { self.unit }
    #[inline]
    pub fn editor(&self) -> &BoundedFieldEditor { &self.editor }

    /// Pulls the latest value and limits from `binding`.
    pub fn sync(&mut self, binding: &dyn UnitBinding) {
        let view = binding.view(self.unit);
        self.editor.sync(view.value, view.min, view.max);
    }

    /// Routes an editing event; a commit is forwarded to `binding`.
    pub fn on_event(&mut self, event: &InputEvent, binding: &mut dyn UnitBinding) -> EventResult {
        let (result, commit) = self.editor.on_event(event);
        if let Some(value) = commit {
            binding.commit(self.unit, value);
        }
        result
    }

    pub fn focus(&mut self) {
        self.editor.focus();
    }

    pub fn blur(&mut self) {
        self.editor.blur();
    }
}

// ── DurationInput ─────────────────────────────────────────────────────────

/// A duration editor made of one field per unit.
///
/// Owns the controller, the fields and their focus. After every event the
/// fields are resynchronized from the controller before returning, so
/// sibling fields never observe a half-applied edit.
///
/// # Example
/// ```rust
/// use hourglass_input::prelude::*;
///
/// let mut input = DurationInput::new(
///     DurationProps::new().max(5400),
///     UnitSet::HOURS_AND_MINUTES,
///     |v| println!("duration: {v}s"),
/// );
/// input.on_event(&InputEvent::Click { unit: Unit::Hour });
/// input.on_event(&InputEvent::replace("1"));
/// assert_eq!(input.value(), 3600);
/// assert_eq!(input.field(Unit::Minute).and_then(|f| f.editor().ceiling()), Some(30));
/// ```
pub struct DurationInput {
    controller: DurationController,
    fields: Vec<UnitField>,
    focus: FocusRing,
}

impl DurationInput {
    pub fn new(props: DurationProps, units: UnitSet, on_change: impl FnMut(u64) + 'static) -> Self {
        let mut controller = DurationController::initialize(props, units, on_change);
        let fields = units
            .iter()
            .map(|unit| UnitField::new(unit, &mut controller))
            .collect();
        Self { controller, fields, focus: FocusRing::new(units) }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn value(&self) -> u64 { self.controller.value() }
    #[inline]
    pub fn controller(&self) -> &DurationController { &self.controller }
    #[inline]
    pub fn fields(&self) -> &[UnitField] { &self.fields }
    #[inline]
    pub fn focused(&self) -> Option<Unit> { self.focus.focused() }

    pub fn field(&self, unit: Unit) -> Option<&UnitField> {
        self.fields.iter().find(|f| f.unit() == unit)
    }

    // ── Owner updates ─────────────────────────────────────────────────────

    /// Mounts a field for `unit` next to the existing ones.
    ///
    /// The new field joins the Tab order in display order. Mounting a unit
    /// that already has a field changes nothing.
    pub fn register(&mut self, unit: Unit) {
        if self.field(unit).is_some() {
            return;
        }
        let field = UnitField::new(unit, &mut self.controller);
        let at = self.fields.partition_point(|f| f.unit() < unit);
        self.fields.insert(at, field);
        self.focus.register(unit);
        self.sync_fields();
    }

    /// The owner pushed a new value (or echoed one it received).
    pub fn set_value(&mut self, value: u64) {
        self.controller.set_value(value);
        self.sync_fields();
    }

    /// The owner changed the allowed range.
    pub fn set_bounds(&mut self, bounds: DurationBounds) {
        self.controller.set_bounds(bounds);
        self.sync_fields();
    }

    // ── Events ────────────────────────────────────────────────────────────

    pub fn on_event(&mut self, event: &InputEvent) -> EventResult {
        let change = match event {
            InputEvent::Click { unit } => Some(self.focus.request(*unit)),
            InputEvent::ClickOutside => Some(self.focus.clear()),
            InputEvent::KeyPress { key: Key::Tab, shift } => Some(self.focus.advance(*shift)),
            InputEvent::KeyPress { key: Key::Escape, .. } => Some(self.focus.clear()),
            _ => None,
        };
        if let Some(change) = change {
            return self.apply_focus(change);
        }

        let Some(unit) = self.focus.focused() else {
            return EventResult::Ignored;
        };
        let Some(field) = self.fields.iter_mut().find(|f| f.unit() == unit) else {
            return EventResult::Ignored;
        };
        let result = field.on_event(event, &mut self.controller);
        self.sync_fields();
        result
    }

    // ── private ───────────────────────────────────────────────────────────

    fn apply_focus(&mut self, change: FocusChange) -> EventResult {
        if change.is_empty() {
            return EventResult::Ignored;
        }
        for field in &mut self.fields {
            if change.lost == Some(field.unit()) {
                field.blur();
            }
            if change.gained == Some(field.unit()) {
                field.focus();
            }
        }
        self.sync_fields();
        EventResult::Consumed
    }

    fn sync_fields(&mut self) {
        for field in &mut self.fields {
            field.sync(&self.controller);
        }
    }
}
