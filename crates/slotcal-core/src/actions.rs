//! Action button derivation.
//!
//! The buttons shown on a slot depend on three inputs, classified into an
//! [`ActionState`] first and then matched exhaustively:
//! - a hidden or own card offers nothing, whatever else is known
//! - an existing registration offers exactly one cancel action in its mode
//! - otherwise every available mode offers a register or waitlist action

use crate::models::{
    ActionButton, AvailabilityMode, ButtonVariant, CardStatus, ModeKey, Registration,
    RegistrationStatus, Slot,
};

const CANCEL_LABEL: &str = "Se désinscrire";
const WITHDRAW_LABEL: &str = "Se retirer de la liste d'attente";

/// What a slot card can offer the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState<'a> {
    /// Hidden or own card.
    Concealed,
    /// The user already holds a registration.
    Registered(&'a Registration),
    /// The user may register in any of the listed modes.
    Open(&'a [AvailabilityMode]),
}

impl<'a> ActionState<'a> {
    pub fn classify(
        card_status: CardStatus,
        registration: Option<&'a Registration>,
        availability: &'a [AvailabilityMode],
    ) -> Self {
        match (card_status, registration) {
            (CardStatus::Hidden | CardStatus::My, _) => ActionState::Concealed,
            (CardStatus::None, Some(registration)) => ActionState::Registered(registration),
            (CardStatus::None, None) => ActionState::Open(availability),
        }
    }

    pub fn buttons(self) -> Vec<ActionButton> {
        match self {
            ActionState::Concealed => Vec::new(),
            ActionState::Registered(registration) => vec![cancel_button(registration)],
            ActionState::Open(availability) => availability.iter().map(mode_button).collect(),
        }
    }
}

fn cancel_button(registration: &Registration) -> ActionButton {
    let label = match registration.status {
        RegistrationStatus::Waitlisted => WITHDRAW_LABEL,
        RegistrationStatus::Confirmed => CANCEL_LABEL,
    };

    ActionButton {
        key: registration.mode(),
        label: label.to_string(),
        variant: ButtonVariant::Primary,
        is_cancel: true,
    }
}

fn mode_button(mode: &AvailabilityMode) -> ActionButton {
    let label = mode.label.to_lowercase();
    let (label, variant) = if mode.is_full {
        (
            format!("Sur liste d'attente ({label})"),
            ButtonVariant::Secondary,
        )
    } else {
        (format!("S'inscrire ({label})"), ButtonVariant::Primary)
    };

    ActionButton {
        key: mode.key,
        label,
        variant,
        is_cancel: false,
    }
}

/// Derive the action buttons of a slot.
///
/// A missing slot is treated as a visible card.
pub fn build_action_buttons(
    slot: Option<&Slot>,
    registration: Option<&Registration>,
    availability: &[AvailabilityMode],
) -> Vec<ActionButton> {
    let card_status = slot.map(|s| s.card_status).unwrap_or_default();
    ActionState::classify(card_status, registration, availability).buttons()
}

/// Whether `registration` exists and was made in mode `key`.
pub fn is_registration_mode(registration: Option<&Registration>, key: ModeKey) -> bool {
    registration.is_some_and(|r| r.mode() == key)
}
