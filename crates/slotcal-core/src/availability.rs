//! Seat availability resolution.
//!
//! A mode is offered when its pool has a seat total. A missing remaining
//! count means the mode is unconstrained and fully available. Resolved
//! counts are clamped at zero but never capped at the seat total: a stored
//! remaining count above the seats is trusted as-is.

use crate::models::{AvailabilityMode, CapacityPool, ModeKey, Slot};

/// Modes in the order they are presented.
const MODE_ORDER: [ModeKey; 2] = [ModeKey::OnSite, ModeKey::Remote];

/// Resolve the remaining seat count of a pool.
///
/// Returns `None` when the mode is not offered (`seats` absent), otherwise
/// `max(remaining.unwrap_or(seats), 0)`.
///
/// # Examples
///
/// ```
/// use slotcal_core::availability::resolve_remaining;
///
/// assert_eq!(resolve_remaining(None, Some(4)), None);
/// assert_eq!(resolve_remaining(Some(5), None), Some(5));
/// assert_eq!(resolve_remaining(Some(5), Some(-3)), Some(0));
/// assert_eq!(resolve_remaining(Some(5), Some(9)), Some(9));
/// ```
pub fn resolve_remaining(seats: Option<i64>, remaining: Option<i64>) -> Option<u64> {
    let seats = seats?;
    Some(remaining.unwrap_or(seats).max(0).unsigned_abs())
}

impl CapacityPool {
    /// Remaining seats after resolution, or `None` if the mode is not offered.
    pub fn resolved_remaining(&self) -> Option<u64> {
        resolve_remaining(self.seats, self.remaining)
    }

    /// Whether the pool was ever given capacity, regardless of current fullness.
    ///
    /// Used by the format filter. This is not the same test as
    /// [`CapacityPool::resolved_remaining`] being `Some`.
    pub fn has_capacity(&self) -> bool {
        self.seats.unwrap_or(0) > 0 || self.remaining.unwrap_or(0) > 0
    }
}

/// Availability of each offered mode of a slot, on-site first.
///
/// A missing slot has no availability.
pub fn build_availability(slot: Option<&Slot>) -> Vec<AvailabilityMode> {
    let Some(slot) = slot else {
        return Vec::new();
    };

    MODE_ORDER
        .into_iter()
        .filter_map(|key| {
            let remaining = slot.pool(key).resolved_remaining()?;
            Some(AvailabilityMode {
                key,
                label: key.label(),
                remaining,
                is_full: remaining == 0,
            })
        })
        .collect()
}
