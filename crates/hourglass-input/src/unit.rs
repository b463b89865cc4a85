use std::fmt;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;
/// Highest minute value shown when an hour field carries the larger part.
pub const MINUTE_WRAP: u64 = 59;

// ── Unit ──────────────────────────────────────────────────────────────────

/// One display component of a duration.
///
/// Variants are declared largest first; that order is also the focus order
/// and the order fields are laid out in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Hour,
    Minute,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::Hour, Unit::Minute];

    /// Length of one step of this unit, in seconds.
    #[inline]
    pub fn seconds(self) -> u64 {
        match self {
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Minute => SECONDS_PER_MINUTE,
        }
    }

    /// Short suffix a renderer may place after the field.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Hour => "hrs",
            Unit::Minute => "mins",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Unit::Hour => 0b01,
            Unit::Minute => 0b10,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Hour => "hour",
            Unit::Minute => "minute",
        })
    }
}

// ── UnitSet ───────────────────────────────────────────────────────────────

/// The set of units a duration input is composed of.
///
/// Sets only ever grow: [`UnitSet::insert`] is the single mutator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct UnitSet(u8);

impl UnitSet {
    pub const EMPTY: UnitSet = UnitSet(0);
    pub const HOURS: UnitSet = UnitSet(0b01);
    pub const MINUTES: UnitSet = UnitSet(0b10);
    pub const HOURS_AND_MINUTES: UnitSet = UnitSet(0b11);

    #[inline]
    pub fn contains(self, unit: Unit) -> bool {
        self.0 & unit.bit() != 0
    }

    /// Adds `unit`. Returns `true` if the set changed.
    pub fn insert(&mut self, unit: Unit) -> bool {
        let before = self.0;
        self.0 |= unit.bit();
        before != self.0
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, unit: Unit) -> Self {
        self.insert(unit);
        self
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in display order (largest unit first).
    pub fn iter(self) -> impl Iterator<Item = Unit> {
        Unit::ALL.into_iter().filter(move |u| self.contains(*u))
    }
}

impl FromIterator<Unit> for UnitSet {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        let mut set = UnitSet::EMPTY;
        for unit in iter {
            set.insert(unit);
        }
        set
    }
}

impl fmt::Display for UnitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, unit) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{unit}")?;
        }
        Ok(())
    }
}
