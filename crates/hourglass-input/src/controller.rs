//! The canonical duration value and its recomposition from unit edits.

use crate::bounds::{
    derive_bounds, derive_display, recompose_hours, recompose_minutes, Correction,
    DurationBounds, UnitBounds, UnitDisplay,
};
use crate::unit::{Unit, UnitSet};

// ── DurationProps ─────────────────────────────────────────────────────────

/// Initial inputs supplied by the owner of the duration.
///
/// Supplying `value` makes the controller *controlled*: it reports edits but
/// only changes its value when [`DurationController::set_value`] is called.
/// Without `value` the controller keeps its own value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DurationProps {
    pub value: Option<u64>,
    pub default_value: Option<u64>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl DurationProps {
    pub fn new() -> Self { Self::default() }

    pub fn value(mut self, v: u64) -> Self { self.value = Some(v); self }
    pub fn default_value(mut self, v: u64) -> Self { self.default_value = Some(v); self }
    pub fn min(mut self, v: u64) -> Self { self.min = Some(v); self }
    pub fn max(mut self, v: u64) -> Self { self.max = Some(v); self }

    /// `value`, else `default_value`, else `min`, else 0.
    pub fn effective_value(&self) -> u64 {
        self.value.or(self.default_value).or(self.min).unwrap_or(0)
    }

    pub fn bounds(&self) -> DurationBounds {
        DurationBounds { min: self.min.unwrap_or(0), max: self.max }
    }
}

// ── UnitView / UnitBinding ────────────────────────────────────────────────

/// Everything a unit field needs to render itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnitView {
    pub value: u64,
    pub min: u64,
    pub max: Option<u64>,
}

/// Read/write access a unit field has to the duration it edits.
///
/// Fields never touch controller state directly; they read a [`UnitView`]
/// and report commits through this trait.
pub trait UnitBinding {
    /// Declares that a field for `unit` exists. Must be idempotent.
    fn register(&mut self, unit: Unit);

    /// Current value and limits for `unit`.
    fn view(&self, unit: Unit) -> UnitView;

    /// A field for `unit` committed `value`.
    fn commit(&mut self, unit: Unit, value: u64);
}

// ── DurationController ────────────────────────────────────────────────────

/// Owns the canonical duration and keeps the unit values consistent with it.
///
/// # Example
/// ```rust
/// use hourglass_input::prelude::*;
///
/// let mut ctl = DurationController::initialize(
///     DurationProps::new().min(60).max(3600),
///     UnitSet::HOURS_AND_MINUTES,
///     |v| println!("duration: {v}s"),
/// );
/// assert_eq!(ctl.value(), 60);
/// ctl.on_unit_change(Unit::Minute, 30);
/// assert_eq!(ctl.value(), 1800);
/// ```
pub struct DurationController {
    value: u64,
    controlled: bool,
    bounds: DurationBounds,
    units: UnitSet,
    display: UnitDisplay,
    on_change: Box<dyn FnMut(u64)>,
}

impl DurationController {
    /// Resolves the starting value and, when the owner did not supply one,
    /// reports it straight away so both sides agree.
    pub fn initialize(
        props: DurationProps,
        units: UnitSet,
        on_change: impl FnMut(u64) + 'static,
    ) -> Self {
        let value = props.effective_value();
        let mut ctl = Self {
            value,
            controlled: props.value.is_some(),
            bounds: props.bounds(),
            units,
            display: derive_display(value, units),
            on_change: Box::new(on_change),
        };
        log::debug!(
            "duration input initialized: value={}s units={} min={} max={:?} controlled={}",
            value, units, ctl.bounds.min, ctl.bounds.max, ctl.controlled,
        );
        if !ctl.controlled {
            ctl.emit(value);
        }
        ctl
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn value(&self) -> u64 { self.value }
    #[inline]
    pub fn units(&self) -> UnitSet { self.units }
    #[inline]
    pub fn display(&self) -> UnitDisplay { self.display }
    #[inline]
    pub fn bounds(&self) -> DurationBounds { self.bounds }
    #[inline]
    pub fn is_controlled(&self) -> bool { self.controlled }

    /// Limits of every unit for the current value.
    pub fn unit_bounds(&self) -> UnitBounds {
        derive_bounds(self.units, self.display.hours, self.value, self.bounds)
    }

    pub fn unit_view(&self, unit: Unit) -> UnitView {
        let (min, max) = self.unit_bounds().for_unit(unit);
        UnitView { value: self.display.get(unit), min, max }
    }

    // ── Inbound ───────────────────────────────────────────────────────────

    /// Records that a field for `unit` exists.
    ///
    /// Calling this again for a known unit changes nothing.
    pub fn register(&mut self, unit: Unit) {
        if self.units.insert(unit) {
            log::debug!("registered {unit} field, units now {}", self.units);
            self.rederive();
        }
    }

    /// The owner pushed a new value.
    pub fn set_value(&mut self, value: u64) {
        if value != self.value {
            log::trace!("value set externally: {}s -> {}s", self.value, value);
        }
        self.value = value;
        self.rederive();
    }

    /// The owner changed the allowed range.
    pub fn set_bounds(&mut self, bounds: DurationBounds) {
        self.bounds = bounds;
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    /// Recomposes the canonical value after one unit changed and reports it.
    ///
    /// Exactly one value is emitted per call.
    pub fn on_unit_change(&mut self, unit: Unit, unit_value: u64) {
        let recomposed = match unit {
            Unit::Hour => recompose_hours(unit_value, self.display.minutes, self.bounds),
            Unit::Minute => recompose_minutes(self.display.hours, unit_value),
        };
        match recomposed.correction {
            Some(Correction::Clamped) => log::debug!(
                "{unit}={unit_value} exceeds max {:?}, clamped to {}s",
                self.bounds.max, recomposed.value,
            ),
            Some(Correction::Raised) => log::debug!(
                "{unit}={unit_value} below min {}, raised to {}s",
                self.bounds.min, recomposed.value,
            ),
            None => {}
        }
        if !self.controlled {
            self.value = recomposed.value;
            self.rederive();
        }
        self.emit(recomposed.value);
    }

    // ── private ───────────────────────────────────────────────────────────

    fn rederive(&mut self) {
        self.display = derive_display(self.value, self.units);
    }

    fn emit(&mut self, value: u64) {
        log::trace!("emit {value}s");
        (self.on_change)(value);
    }
}

impl UnitBinding for DurationController {
    fn register(&mut self, unit: Unit) {
        DurationController::register(self, unit);
    }

    fn view(&self, unit: Unit) -> UnitView {
        self.unit_view(unit)
    }

    fn commit(&mut self, unit: Unit, value: u64) {
        self.on_unit_change(unit, value);
    }
}
