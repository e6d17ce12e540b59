//! # slotcal-core
//!
//! Calendar bucketing and seat availability for a training slot calendar.
//!
//! This library answers the questions a slot calendar view asks, all in one
//! reference timezone (`Europe/Paris`) with explicit DST handling.
//!
//! ## Features
//!
//! - **DST Safety**: Calendar days and weeks are computed on local dates and
//!   converted back to instants one day at a time, so 23-hour and 25-hour days
//!   are classified correctly.
//! - **ISO Weeks**: Monday week starts and ISO-8601 week numbers.
//! - **Nullable Capacity**: Seat pools distinguish "not offered" from "full".
//! - **Action Derivation**: Register, waitlist and cancel buttons from card
//!   status, registration and availability.
//! - **Persisted Filters**: An observable filter store over pluggable storage.
//! - **No Panics on Bad Input**: Invalid instants and odd numbers degrade to
//!   placeholders and empty results.
//!
//! ## Example
//!
//! ```rust
//! use slotcal_core::prelude::*;
//!
//! let slot = Slot::new(Instant::parse("2024-03-31T02:30"), 1.5)
//!     .with_on_site(Some(2), Some(0));
//!
//! let days = group_by_day([&slot]);
//! assert!(days.contains_key("2024-03-31"));
//!
//! let availability = build_availability(Some(&slot));
//! let buttons = build_action_buttons(Some(&slot), None, &availability);
//! println!("{}: {}", format_time_range(&slot.start, slot.duration_hours), buttons[0].label);
//! ```

pub mod actions;
pub mod availability;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod format;
pub mod models;
pub mod parse;
pub mod preferences;
pub mod tz;
pub mod week;

// Re-export commonly used types at the crate root
pub use actions::{ActionState, build_action_buttons, is_registration_mode};
pub use availability::{build_availability, resolve_remaining};
pub use calendar::{DayBuckets, filter_by_format, group_by_day};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, SlotCalError};
pub use models::{
    ActionButton, AvailabilityMode, ButtonVariant, CalendarDateParts, CalendarDay,
    CalendarFilters, CapacityPool, CardStatus, DateKey, ModeKey, Registration,
    RegistrationStatus, Slot,
};
pub use parse::Instant;
pub use preferences::{FileStorage, FilterStore, KeyValueStorage, MemoryStorage};

/// Prelude module for convenient imports.
///
/// ```
/// use slotcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::actions::{build_action_buttons, is_registration_mode};
    pub use crate::availability::{build_availability, resolve_remaining};
    pub use crate::calendar::{filter_by_format, group_by_day};
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::error::{Result, SlotCalError};
    pub use crate::format::{format_date, format_time, format_time_range};
    pub use crate::models::*;
    pub use crate::parse::Instant;
    pub use crate::tz::{date_key, date_parts, instant_from_parts};
    pub use crate::week::{calendar_days, week_number, week_start};
}
