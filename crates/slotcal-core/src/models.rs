//! Core data types for slotcal.
//!
//! This module defines the primary types used throughout the library:
//! - [`DateKey`] - Calendar day identifier in the reference timezone
//! - [`CalendarDateParts`] - Year/month/day in the reference timezone
//! - [`CapacityPool`] - Nullable seat totals for one registration mode
//! - [`Slot`] - A bookable time slot as supplied upstream
//! - [`Registration`] - The current user's registration against a slot
//! - [`AvailabilityMode`] - Resolved availability of one mode
//! - [`ActionButton`] - A user-facing action derived from slot state
//! - [`CalendarDay`] - One day of the rendered week scaffold
//! - [`CalendarFilters`] - The format filter preference record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parse::Instant;

/// A calendar day in the reference timezone, formatted `YYYY-MM-DD`.
///
/// Two instants are on the "same day" exactly when their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub(crate) fn from_parts(parts: CalendarDateParts) -> Self {
        Self(format!(
            "{:04}-{:02}-{:02}",
            parts.year, parts.month, parts.day
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for DateKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Calendar date parts in the reference timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDateParts {
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u32,
    /// Day of the month, 1-31.
    pub day: u32,
}

/// Registration mode of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKey {
    #[serde(rename = "on-site")]
    OnSite,
    #[serde(rename = "remote")]
    Remote,
}

impl ModeKey {
    /// Display label of the mode.
    pub fn label(self) -> &'static str {
        match self {
            ModeKey::OnSite => "Présentiel",
            ModeKey::Remote => "Distanciel",
        }
    }
}

impl std::fmt::Display for ModeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeKey::OnSite => write!(f, "on-site"),
            ModeKey::Remote => write!(f, "remote"),
        }
    }
}

/// Seat totals for one registration mode.
///
/// `seats: None` means the mode is not offered. `remaining: None` with seats
/// present means the mode is unconstrained. Stored values are not trusted to
/// be non-negative; see [`crate::availability::resolve_remaining`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPool {
    pub seats: Option<i64>,
    pub remaining: Option<i64>,
}

impl CapacityPool {
    pub fn new(seats: Option<i64>, remaining: Option<i64>) -> Self {
        Self { seats, remaining }
    }

    /// A pool for a mode that is not offered.
    pub fn not_offered() -> Self {
        Self::default()
    }
}

/// Display status of a slot card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// Card is hidden from the user.
    Hidden,
    /// Card belongs to the user's own listing.
    My,
    /// Regular visible card. Unknown statuses fall back here.
    #[default]
    #[serde(other)]
    None,
}

/// A bookable time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotRecord", into = "SlotRecord")]
pub struct Slot {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start: Instant,
    /// Duration in hours. May be non-finite when upstream omitted it.
    pub duration_hours: f64,
    pub on_site: CapacityPool,
    pub remote: CapacityPool,
    pub card_status: CardStatus,
}

impl Slot {
    /// A visible slot with no capacity in either mode.
    pub fn new(start: Instant, duration_hours: f64) -> Self {
        Self {
            id: None,
            title: None,
            start,
            duration_hours,
            on_site: CapacityPool::not_offered(),
            remote: CapacityPool::not_offered(),
            card_status: CardStatus::None,
        }
    }

    pub fn with_on_site(mut self, seats: Option<i64>, remaining: Option<i64>) -> Self {
        self.on_site = CapacityPool::new(seats, remaining);
        self
    }

    pub fn with_remote(mut self, seats: Option<i64>, remaining: Option<i64>) -> Self {
        self.remote = CapacityPool::new(seats, remaining);
        self
    }

    pub fn with_card_status(mut self, card_status: CardStatus) -> Self {
        self.card_status = card_status;
        self
    }

    /// The capacity pool of the given mode.
    pub fn pool(&self, key: ModeKey) -> &CapacityPool {
        match key {
            ModeKey::OnSite => &self.on_site,
            ModeKey::Remote => &self.remote,
        }
    }
}

/// Flat wire shape of a slot as served by the training API.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default = "Instant::missing")]
    start: Instant,
    #[serde(default)]
    duration_hours: Option<f64>,
    #[serde(default)]
    on_site_seats: Option<i64>,
    #[serde(default)]
    on_site_remaining: Option<i64>,
    #[serde(default)]
    remote_seats: Option<i64>,
    #[serde(default)]
    remote_remaining: Option<i64>,
    #[serde(default, rename = "cardStatus", alias = "card_status")]
    card_status: Option<CardStatus>,
}

impl From<SlotRecord> for Slot {
    fn from(record: SlotRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            start: record.start,
            duration_hours: record.duration_hours.unwrap_or(f64::NAN),
            on_site: CapacityPool::new(record.on_site_seats, record.on_site_remaining),
            remote: CapacityPool::new(record.remote_seats, record.remote_remaining),
            card_status: record.card_status.unwrap_or_default(),
        }
    }
}

impl From<Slot> for SlotRecord {
    fn from(slot: Slot) -> Self {
        Self {
            id: slot.id,
            title: slot.title,
            start: slot.start,
            duration_hours: Some(slot.duration_hours).filter(|d| d.is_finite()),
            on_site_seats: slot.on_site.seats,
            on_site_remaining: slot.on_site.remaining,
            remote_seats: slot.remote.seats,
            remote_remaining: slot.remote.remaining,
            card_status: Some(slot.card_status),
        }
    }
}

/// Status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Confirmed,
    Waitlisted,
}

/// The current user's registration against one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub remote: bool,
    pub status: RegistrationStatus,
}

impl Registration {
    /// The mode this registration was made in.
    pub fn mode(&self) -> ModeKey {
        if self.remote {
            ModeKey::Remote
        } else {
            ModeKey::OnSite
        }
    }
}

/// Resolved availability of one registration mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityMode {
    pub key: ModeKey,
    pub label: &'static str,
    pub remaining: u64,
    pub is_full: bool,
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

/// An action offered to the user for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub key: ModeKey,
    pub label: String,
    pub variant: ButtonVariant,
    pub is_cancel: bool,
}

/// One day of a rendered week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Local midnight of the day, as an absolute instant.
    pub date: DateTime<Utc>,
    pub key: DateKey,
    pub is_today: bool,
}

/// Format filters of the calendar view, also the persisted preference record.
///
/// Missing fields decode to `false` so partially written records merge over
/// the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarFilters {
    pub in_person: bool,
    pub online: bool,
}

impl CalendarFilters {
    pub fn new(in_person: bool, online: bool) -> Self {
        Self { in_person, online }
    }

    /// Whether any format filter is active.
    pub fn is_active(&self) -> bool {
        self.in_person || self.online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_key_serialization() {
        assert_eq!(
            serde_json::to_string(&ModeKey::OnSite).unwrap(),
            "\"on-site\""
        );
        assert_eq!(
            serde_json::to_string(&ModeKey::Remote).unwrap(),
            "\"remote\""
        );
    }

    #[test]
    fn mode_key_labels() {
        assert_eq!(ModeKey::OnSite.label(), "Présentiel");
        assert_eq!(ModeKey::Remote.label(), "Distanciel");
        assert_eq!(format!("{}", ModeKey::OnSite), "on-site");
    }

    #[test]
    fn card_status_unknown_falls_back_to_none() {
        let status: CardStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, CardStatus::None);
        let status: CardStatus = serde_json::from_str("\"my\"").unwrap();
        assert_eq!(status, CardStatus::My);
    }

    #[test]
    fn slot_from_flat_record() {
        let json = r#"{
            "id": "s1",
            "start": "2024-03-01T09:05:00+01:00",
            "duration_hours": 1.5,
            "on_site_seats": 2,
            "on_site_remaining": 0,
            "remote_seats": null,
            "cardStatus": "hidden"
        }"#;
        let slot: Slot = serde_json::from_str(json).unwrap();

        assert_eq!(slot.id.as_deref(), Some("s1"));
        assert!(slot.start.is_valid());
        assert_eq!(slot.duration_hours, 1.5);
        assert_eq!(slot.on_site, CapacityPool::new(Some(2), Some(0)));
        assert_eq!(slot.remote, CapacityPool::not_offered());
        assert_eq!(slot.card_status, CardStatus::Hidden);
    }

    #[test]
    fn slot_missing_optional_fields() {
        let slot: Slot = serde_json::from_str(r#"{"start": "garbage"}"#).unwrap();

        assert!(!slot.start.is_valid());
        assert!(slot.duration_hours.is_nan());
        assert_eq!(slot.card_status, CardStatus::None);
    }

    #[test]
    fn slot_with_unknown_card_status_is_visible() {
        let slot: Slot =
            serde_json::from_str(r#"{"start": "2024-03-01T09:00", "cardStatus": "archived"}"#)
                .unwrap();
        assert_eq!(slot.card_status, CardStatus::None);
    }

    #[test]
    fn bad_start_does_not_reject_the_list() {
        let json = r#"[
            {"id": "null", "start": null},
            {"id": "absent"},
            {"id": "object", "start": {"at": 1}},
            {"id": "ok", "start": "2024-03-01T09:00"}
        ]"#;
        let slots: Vec<Slot> = serde_json::from_str(json).unwrap();

        assert_eq!(slots.len(), 4);
        assert_eq!(slots[1].start, Instant::missing());
        let valid: Vec<_> = slots.iter().filter(|s| s.start.is_valid()).collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id.as_deref(), Some("ok"));
    }

    #[test]
    fn registration_mode() {
        let remote = Registration {
            remote: true,
            status: RegistrationStatus::Confirmed,
        };
        let on_site = Registration {
            remote: false,
            status: RegistrationStatus::Waitlisted,
        };
        assert_eq!(remote.mode(), ModeKey::Remote);
        assert_eq!(on_site.mode(), ModeKey::OnSite);
    }

    #[test]
    fn filters_merge_over_defaults() {
        let filters: CalendarFilters = serde_json::from_str(r#"{"online": true}"#).unwrap();
        assert_eq!(filters, CalendarFilters::new(false, true));
        assert!(filters.is_active());
        assert!(!CalendarFilters::default().is_active());
    }

    #[test]
    fn action_button_serialization() {
        let button = ActionButton {
            key: ModeKey::Remote,
            label: "Se désinscrire".to_string(),
            variant: ButtonVariant::Primary,
            is_cancel: true,
        };
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(json["key"], "remote");
        assert_eq!(json["variant"], "primary");
        assert_eq!(json["isCancel"], true);
    }
}
