//! Decomposition of a duration into unit values, and the per-unit limits
//! derived from the overall `[min, max]` range.
//!
//! Everything here is a pure function of its arguments. The controller calls
//! into this module every time the value, the unit set or the range changes.

use crate::unit::{Unit, UnitSet, MINUTE_WRAP, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

// ── DurationBounds ────────────────────────────────────────────────────────

/// Inclusive range of the canonical duration, in seconds.
///
/// `min <= max` is not checked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct DurationBounds {
    pub min: u64,
    /// `None` means unbounded above.
    pub max: Option<u64>,
}

impl DurationBounds {
    pub fn new() -> Self { Self::default() }

    pub fn min(mut self, v: u64) -> Self { self.min = v; self }
    pub fn max(mut self, v: u64) -> Self { self.max = Some(v); self }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }
}

// ── UnitDisplay ───────────────────────────────────────────────────────────

/// What each unit field currently shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct UnitDisplay {
    pub hours: u64,
    pub minutes: u64,
}

impl UnitDisplay {
    pub fn get(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
        }
    }

    /// Seconds represented by the displayed values, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        compose(self.hours, self.minutes)
    }
}

/// Splits `value` across the units in `units`.
///
/// A unit that is present alone absorbs the whole value; anything smaller
/// than the smallest present unit is dropped.
pub fn derive_display(value: u64, units: UnitSet) -> UnitDisplay {
    let has_hours = units.contains(Unit::Hour);
    let has_minutes = units.contains(Unit::Minute);
    match (has_hours, has_minutes) {
        (true, true) => UnitDisplay {
            hours: value / SECONDS_PER_HOUR,
            minutes: (value % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        },
        (true, false) => UnitDisplay { hours: value / SECONDS_PER_HOUR, minutes: 0 },
        (false, true) => UnitDisplay { hours: 0, minutes: value / SECONDS_PER_MINUTE },
        (false, false) => UnitDisplay::default(),
    }
}

// ── UnitBounds ────────────────────────────────────────────────────────────

/// Limits for each unit field.
///
/// Minute limits depend on the hours currently displayed, so these are
/// recomputed after every change rather than cached per range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct UnitBounds {
    pub max_hours: Option<u64>,
    pub max_minutes: Option<u64>,
    pub min_hours: u64,
    pub min_minutes: u64,
}

impl UnitBounds {
    /// `(min, max)` for one unit.
    pub fn for_unit(&self, unit: Unit) -> (u64, Option<u64>) {
        match unit {
            Unit::Hour => (self.min_hours, self.max_hours),
            Unit::Minute => (self.min_minutes, self.max_minutes),
        }
    }
}

pub fn derive_bounds(units: UnitSet, hours: u64, value: u64, bounds: DurationBounds) -> UnitBounds {
    let has_hours = units.contains(Unit::Hour);
    let has_minutes = units.contains(Unit::Minute);

    let max_hours = if has_hours { bounds.max.map(|max| max / SECONDS_PER_HOUR) } else { None };
    let max_minutes = if has_minutes { max_minutes_for(has_hours, hours, bounds.max) } else { None };

    UnitBounds {
        max_hours,
        max_minutes,
        min_hours: min_hours_for(has_minutes, bounds.min),
        min_minutes: min_minutes_for(value, bounds.min),
    }
}

/// Upper limit of the minute field.
///
/// Next to an hour field the minutes wrap at 59 and share the budget left
/// over by the selected hours. Alone, the minutes carry the whole duration.
pub fn max_minutes_for(has_hours: bool, hours: u64, max: Option<u64>) -> Option<u64> {
    match (has_hours, max) {
        (true, None) => Some(MINUTE_WRAP),
        (true, Some(max)) if max < SECONDS_PER_HOUR => Some(max / SECONDS_PER_MINUTE),
        (true, Some(max)) => {
            // Saturate: hours past the budget leave zero minutes, never fewer.
            let remaining = max.saturating_sub(hours.saturating_mul(SECONDS_PER_HOUR));
            Some((remaining / SECONDS_PER_MINUTE).min(MINUTE_WRAP))
        }
        (false, Some(max)) => Some(max / SECONDS_PER_MINUTE),
        (false, None) => None,
    }
}

/// Lower limit of the hour field.
///
/// Without a minute field a sub-hour minimum cannot be expressed, so the
/// hour field never goes below 1 in that case. This rounds the true minimum
/// up.
pub fn min_hours_for(has_minutes: bool, min: u64) -> u64 {
    if has_minutes || min >= SECONDS_PER_HOUR {
        min / SECONDS_PER_HOUR
    } else {
        1
    }
}

/// Lower limit of the minute field for a duration of `total` seconds.
///
/// Below one hour the minutes must make up the sub-hour part of `min`;
/// from one hour on they are free. Whole hours of `min` are left to the hour
/// field, so with `min = 5400` a total of exactly one hour is accepted even
/// though it falls short of the minimum.
pub fn min_minutes_for(total: u64, min: u64) -> u64 {
    if total < SECONDS_PER_HOUR {
        (min % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    } else {
        0
    }
}

// ── Recomposition ─────────────────────────────────────────────────────────

/// How an hour edit was corrected to stay inside the range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Correction {
    /// Value exceeded `max`; hours and minutes were pulled down.
    Clamped,
    /// Value fell short of `min`; minutes were raised.
    Raised,
}

/// Result of recomposing the canonical value after a unit edit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Recomposed {
    pub value: u64,
    pub correction: Option<Correction>,
}

/// New canonical value after the hour field changed to `hours`.
///
/// An hour edit can invalidate the minutes shown next to it, so the
/// minutes are corrected here.
pub fn recompose_hours(hours: u64, minutes: u64, bounds: DurationBounds) -> Recomposed {
    let candidate = compose(hours, minutes);

    if let Some(max) = bounds.max.filter(|max| candidate > *max) {
        let hours = hours.min(max / SECONDS_PER_HOUR);
        let base = hours * SECONDS_PER_HOUR;
        let minutes = ((max - base) / SECONDS_PER_MINUTE).min(MINUTE_WRAP);
        return Recomposed {
            value: base + minutes * SECONDS_PER_MINUTE,
            correction: Some(Correction::Clamped),
        };
    }

    if candidate < bounds.min {
        let minutes = min_minutes_for(candidate, bounds.min);
        return Recomposed {
            value: compose(hours, minutes),
            correction: Some(Correction::Raised),
        };
    }

    Recomposed { value: candidate, correction: None }
}

/// New canonical value after the minute field changed to `minutes`.
///
/// Never corrected: the minute field's own limits already keep it in range.
pub fn recompose_minutes(hours: u64, minutes: u64) -> Recomposed {
    Recomposed { value: compose(hours, minutes), correction: None }
}

/// `hours*3600 + minutes*60`, saturating. Unbounded fields accept any `u64`.
fn compose(hours: u64, minutes: u64) -> u64 {
    hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: UnitSet = UnitSet::HOURS_AND_MINUTES;

    // ── derive_display ────────────────────────────────────────────────────

    #[test]
    fn display_splits_exactly_with_both_units() {
        let d = derive_display(5400, BOTH);
        assert_eq!(d, UnitDisplay { hours: 1, minutes: 30 });
    }

    #[test]
    fn display_hours_only_drops_minutes() {
        let d = derive_display(5400, UnitSet::HOURS);
        assert_eq!(d, UnitDisplay { hours: 1, minutes: 0 });
    }

    #[test]
    fn display_minutes_only_folds_hours() {
        let d = derive_display(5430, UnitSet::MINUTES);
        assert_eq!(d, UnitDisplay { hours: 0, minutes: 90 });
    }

    #[test]
    fn display_empty_set_is_zero() {
        assert_eq!(derive_display(7200, UnitSet::EMPTY), UnitDisplay::default());
    }

    #[test]
    fn display_round_trips_below_a_day() {
        for value in (0..86_400).step_by(60) {
            assert_eq!(derive_display(value, BOTH).total(), value);
        }
    }

    // ── derive_bounds ─────────────────────────────────────────────────────

    #[test]
    fn max_hours_needs_hour_unit_and_max() {
        let b = DurationBounds::new().max(9000);
        assert_eq!(derive_bounds(BOTH, 0, 0, b).max_hours, Some(2));
        assert_eq!(derive_bounds(UnitSet::MINUTES, 0, 0, b).max_hours, None);
        assert_eq!(derive_bounds(BOTH, 0, 0, DurationBounds::new()).max_hours, None);
    }

    #[test]
    fn max_minutes_wraps_without_max() {
        let ub = derive_bounds(BOTH, 3, 10_800, DurationBounds::new());
        assert_eq!(ub.max_minutes, Some(59));
    }

    #[test]
    fn max_minutes_sub_hour_budget() {
        let ub = derive_bounds(BOTH, 0, 0, DurationBounds::new().max(1800));
        assert_eq!(ub.max_minutes, Some(30));
    }

    #[test]
    fn max_minutes_tracks_remaining_budget() {
        let b = DurationBounds::new().max(5400);
        assert_eq!(derive_bounds(BOTH, 0, 0, b).max_minutes, Some(59));
        assert_eq!(derive_bounds(BOTH, 1, 3600, b).max_minutes, Some(30));
    }

    #[test]
    fn max_minutes_never_negative_when_hours_exhaust_budget() {
        let b = DurationBounds::new().max(5400);
        assert_eq!(derive_bounds(BOTH, 2, 7200, b).max_minutes, Some(0));
    }

    #[test]
    fn max_minutes_alone_carries_whole_duration() {
        let b = DurationBounds::new().max(150);
        assert_eq!(derive_bounds(UnitSet::MINUTES, 0, 0, b).max_minutes, Some(2));
        let unbounded = derive_bounds(UnitSet::MINUTES, 0, 0, DurationBounds::new());
        assert_eq!(unbounded.max_minutes, None);
    }

    #[test]
    fn min_hours_with_minutes_is_floor() {
        let ub = derive_bounds(BOTH, 0, 0, DurationBounds::new().min(5400));
        assert_eq!(ub.min_hours, 1);
        let ub = derive_bounds(BOTH, 0, 0, DurationBounds::new().min(1800));
        assert_eq!(ub.min_hours, 0);
    }

    #[test]
    fn min_hours_alone_rounds_sub_hour_minimum_up() {
        assert_eq!(min_hours_for(false, 0), 1);
        assert_eq!(min_hours_for(false, 1800), 1);
        assert_eq!(min_hours_for(false, 7200), 2);
        assert_eq!(min_hours_for(false, 9000), 2);
    }

    #[test]
    fn min_minutes_free_once_hours_cover_minimum() {
        let b = DurationBounds::new().min(1800);
        assert_eq!(derive_bounds(BOTH, 1, 3600, b).min_minutes, 0);
        assert_eq!(derive_bounds(BOTH, 0, 600, b).min_minutes, 30);
    }

    #[test]
    fn min_minutes_only_binds_below_one_hour() {
        // 1h30m minimum: under an hour the minutes carry the 30 minute part,
        // from one hour on they are free.
        let b = DurationBounds::new().min(5400);
        assert_eq!(derive_bounds(BOTH, 0, 0, b).min_minutes, 30);
        assert_eq!(derive_bounds(BOTH, 1, 3600, b).min_minutes, 0);
    }

    #[test]
    fn min_minutes_alone_uses_sub_hour_remainder() {
        let b = DurationBounds::new().min(5400);
        assert_eq!(derive_bounds(UnitSet::MINUTES, 0, 0, b).min_minutes, 30);
        assert_eq!(derive_bounds(UnitSet::MINUTES, 0, 3600, b).min_minutes, 0);
    }

    #[test]
    fn min_minutes_ignores_whole_hours_of_minimum() {
        assert_eq!(min_minutes_for(0, 3600), 0);
        assert_eq!(min_minutes_for(3599, 1500), 25);
        assert_eq!(min_minutes_for(u64::MAX, 1500), 0);
    }

    #[test]
    fn total_saturates() {
        let d = UnitDisplay { hours: u64::MAX, minutes: 59 };
        assert_eq!(d.total(), u64::MAX);
    }

    // ── recompose ─────────────────────────────────────────────────────────

    #[test]
    fn hour_edit_within_range_is_unchanged() {
        let b = DurationBounds::new().max(10_800);
        let r = recompose_hours(2, 15, b);
        assert_eq!(r, Recomposed { value: 8100, correction: None });
    }

    #[test]
    fn hour_edit_over_max_pulls_minutes_down() {
        let b = DurationBounds::new().max(9000); // 2h30m
        let r = recompose_hours(2, 45, b);
        assert_eq!(r.value, 9000);
        assert_eq!(r.correction, Some(Correction::Clamped));
    }

    #[test]
    fn hour_edit_past_max_hours_floors_minutes_at_zero() {
        let b = DurationBounds::new().max(5400);
        let r = recompose_hours(2, 0, b);
        assert_eq!(r.value, 5400);
        let r = recompose_hours(3, 59, DurationBounds::new().max(7200));
        assert_eq!(r.value, 7200);
    }

    #[test]
    fn hour_edit_under_min_raises_minutes() {
        let b = DurationBounds::new().min(1500);
        let r = recompose_hours(0, 5, b);
        assert_eq!(r.value, 1500);
        assert_eq!(r.correction, Some(Correction::Raised));
    }

    #[test]
    fn hour_edit_never_exceeds_max() {
        for max in (3600..20_000).step_by(450) {
            let b = DurationBounds::new().max(max);
            for hours in 0..8 {
                for minutes in [0, 1, 30, 59] {
                    assert!(recompose_hours(hours, minutes, b).value <= max);
                }
            }
        }
    }

    #[test]
    fn hour_edit_reaches_sub_hour_minimum() {
        for min in (0..3600).step_by(60) {
            let b = DurationBounds::new().min(min);
            for minutes in [0, 1, 30, 59] {
                assert!(recompose_hours(0, minutes, b).value >= min);
            }
        }
    }

    #[test]
    fn hour_edit_at_one_hour_keeps_whole_hours() {
        // The hour field's own floor covers whole hours of the minimum.
        let b = DurationBounds::new().min(5400);
        let r = recompose_hours(1, 0, b);
        assert_eq!(r, Recomposed { value: 3600, correction: Some(Correction::Raised) });
    }

    #[test]
    fn hours_only_edit_under_whole_hour_minimum_adds_no_minutes() {
        let b = DurationBounds::new().min(3600);
        assert_eq!(recompose_hours(0, 0, b).value, 0);
        let b = DurationBounds::new().min(5400);
        assert_eq!(recompose_hours(0, 0, b).value, 1800);
    }

    #[test]
    fn huge_unit_values_saturate() {
        let unbounded = DurationBounds::new();
        assert_eq!(recompose_hours(u64::MAX, 0, unbounded).value, u64::MAX);
        assert_eq!(recompose_minutes(0, u64::MAX).value, u64::MAX);
        assert_eq!(recompose_minutes(u64::MAX / 3600, 59).value, u64::MAX);
        let r = recompose_hours(u64::MAX, 59, DurationBounds::new().max(5400));
        assert_eq!(r.value, 5400);
    }

    #[test]
    fn minute_edit_is_never_corrected() {
        let r = recompose_minutes(1, 45);
        assert_eq!(r, Recomposed { value: 4500, correction: None });
    }
}
