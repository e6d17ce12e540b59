//! Day bucketing and format filtering of slots.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{CalendarFilters, DateKey, Slot};
use crate::tz::date_key;

/// Slots bucketed by local calendar day. Keys iterate chronologically; each
/// bucket keeps input order.
pub type DayBuckets<'a> = BTreeMap<DateKey, Vec<&'a Slot>>;

/// Whether a slot ever had on-site capacity.
pub fn is_in_person_slot(slot: &Slot) -> bool {
    slot.on_site.has_capacity()
}

/// Whether a slot ever had remote capacity.
pub fn is_online_slot(slot: &Slot) -> bool {
    slot.remote.has_capacity()
}

/// Keep the slots matching the active format filters.
///
/// With no filter active every slot is kept, in input order. Otherwise a slot
/// is kept when it has capacity in at least one selected mode, even if that
/// mode is currently full.
pub fn filter_by_format(slots: &[Slot], filters: CalendarFilters) -> Vec<&Slot> {
    if !filters.is_active() {
        return slots.iter().collect();
    }

    slots
        .iter()
        .filter(|slot| {
            (filters.in_person && is_in_person_slot(slot))
                || (filters.online && is_online_slot(slot))
        })
        .collect()
}

/// Bucket slots by the local calendar day of their start.
///
/// Slots whose start is not a valid instant are dropped.
pub fn group_by_day<'a, I>(slots: I) -> DayBuckets<'a>
where
    I: IntoIterator<Item = &'a Slot>,
{
    let mut buckets = DayBuckets::new();
    let mut dropped = 0usize;

    for slot in slots {
        match date_key(&slot.start) {
            Some(key) => buckets.entry(key).or_default().push(slot),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "dropped slots with an invalid start");
    }

    buckets
}
