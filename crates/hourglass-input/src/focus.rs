//! Keyboard focus across the unit fields of one duration input.
//!
//! [`FocusRing`] lives on [`crate::input::DurationInput`]. Every focus
//! operation returns a [`FocusChange`] so the input can blur the field that
//! lost focus in the same event turn.

use crate::unit::{Unit, UnitSet};

/// Which field lost and which gained focus in one operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FocusChange {
    pub lost: Option<Unit>,
    pub gained: Option<Unit>,
}

impl FocusChange {
    pub fn is_empty(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

/// Tracks the focused unit field and cycles through fields in display order.
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    /// Focusable units, largest first.
    order: Vec<Unit>,
    focused: Option<Unit>,
}

impl FocusRing {
    pub fn new(units: UnitSet) -> Self {
        Self { order: units.iter().collect(), focused: None }
    }

    /// Adds `unit` to the cycle. Repeated calls are ignored.
    pub fn register(&mut self, unit: Unit) {
        if let Err(at) = self.order.binary_search(&unit) {
            self.order.insert(at, unit);
        }
    }

    #[inline]
    pub fn focused(&self) -> Option<Unit> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, unit: Unit) -> bool {
        self.focused == Some(unit)
    }

    /// Moves focus to `unit`. Unknown units are ignored.
    pub fn request(&mut self, unit: Unit) -> FocusChange {
        if !self.order.contains(&unit) {
            return FocusChange::default();
        }
        self.move_to(Some(unit))
    }

    /// Moves to the next (or previous, if `reverse`) field, wrapping around.
    pub fn advance(&mut self, reverse: bool) -> FocusChange {
        if self.order.is_empty() {
            return FocusChange::default();
        }
        let n = self.order.len();
        let next = match self.focused.and_then(|u| self.order.iter().position(|&x| x == u)) {
            None => self.order[if reverse { n - 1 } else { 0 }],
            Some(i) if reverse => self.order[(i + n - 1) % n],
            Some(i) => self.order[(i + 1) % n],
        };
        self.move_to(Some(next))
    }

    /// Drops focus entirely (Escape, click outside).
    pub fn clear(&mut self) -> FocusChange {
        self.move_to(None)
    }

    fn move_to(&mut self, next: Option<Unit>) -> FocusChange {
        if next == self.focused {
            return FocusChange::default();
        }
        let lost = self.focused;
        self.focused = next;
        FocusChange { lost, gained: next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_cycles_in_display_order() {
        let mut ring = FocusRing::new(UnitSet::HOURS_AND_MINUTES);
        assert_eq!(ring.advance(false), FocusChange { lost: None, gained: Some(Unit::Hour) });
        assert_eq!(
            ring.advance(false),
            FocusChange { lost: Some(Unit::Hour), gained: Some(Unit::Minute) },
        );
        assert_eq!(ring.advance(false).gained, Some(Unit::Hour));
    }

    #[test]
    fn reverse_from_nothing_starts_at_last() {
        let mut ring = FocusRing::new(UnitSet::HOURS_AND_MINUTES);
        assert_eq!(ring.advance(true).gained, Some(Unit::Minute));
    }

    #[test]
    fn single_field_advance_is_no_change() {
        let mut ring = FocusRing::new(UnitSet::MINUTES);
        ring.advance(false);
        assert!(ring.advance(false).is_empty());
        assert!(ring.is_focused(Unit::Minute));
    }

    #[test]
    fn request_ignores_unknown_units() {
        let mut ring = FocusRing::new(UnitSet::HOURS);
        assert!(ring.request(Unit::Minute).is_empty());
        ring.register(Unit::Minute);
        ring.register(Unit::Minute);
        assert_eq!(ring.request(Unit::Minute).gained, Some(Unit::Minute));
    }

    #[test]
    fn clear_reports_lost_field() {
        let mut ring = FocusRing::new(UnitSet::HOURS);
        ring.request(Unit::Hour);
        assert_eq!(ring.clear(), FocusChange { lost: Some(Unit::Hour), gained: None });
        assert!(ring.clear().is_empty());
    }
}
