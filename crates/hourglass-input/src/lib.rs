//! Hourglass input: a duration editor split into hour and minute fields.
//!
//! A single value in seconds is shown through any combination of an hour
//! field and a minute field. The value stays inside an inclusive
//! `[min, max]` range while each field is edited on its own, and text that
//! does not parse yet never reaches the value.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`unit`] | `Unit`, `UnitSet` |
//! | [`bounds`] | decomposition, per-unit limits, recomposition |
//! | [`controller`] | `DurationController`, `DurationProps`, `UnitBinding` |
//! | [`field`] | `BoundedFieldEditor`, `EditBuffer` |
//! | [`focus`] | `FocusRing` |
//! | [`input`] | `DurationInput`, `UnitField` |
//! | [`logging`] | `init_logging` |
//!
//! # Quick start
//!
//! ```rust
//! use hourglass_input::prelude::*;
//!
//! let mut input = DurationInput::new(
//!     DurationProps::new().min(60).max(5400),
//!     UnitSet::HOURS_AND_MINUTES,
//!     |seconds| println!("duration is now {seconds}s"),
//! );
//! assert_eq!(input.value(), 60);
//!
//! input.on_event(&InputEvent::Click { unit: Unit::Minute });
//! input.on_event(&InputEvent::replace("45"));
//! assert_eq!(input.value(), 2700);
//! ```

pub mod bounds;
pub mod controller;
pub mod event;
pub mod field;
pub mod focus;
pub mod input;
pub mod logging;
pub mod unit;

/// The types needed to embed a duration input.
pub mod prelude {
    pub use crate::bounds::{DurationBounds, UnitBounds, UnitDisplay};
    pub use crate::controller::{DurationController, DurationProps, UnitBinding, UnitView};
    pub use crate::event::{EventResult, InputEvent, Key};
    pub use crate::field::{BoundedFieldEditor, EditBuffer};
    pub use crate::focus::{FocusChange, FocusRing};
    pub use crate::input::{DurationInput, UnitField};
    pub use crate::unit::{Unit, UnitSet};
}
