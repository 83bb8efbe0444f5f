//! Module with classroom reservation models compatible with both reservation stores
use std::num::NonZeroU32;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A reservation as it travels over the wire.
/// `reservedBy` is `null` when nobody holds the room; a missing field or `""` is read the same way.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default)]
    pub classroom_name: String,
    pub amount_of_people: u32,
    #[serde(default)]
    pub is_reserved: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub reserved_by: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|owner| !owner.is_empty()))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReservation {
    #[error("classroom name is empty")]
    EmptyName,
    #[error("room capacity must be positive")]
    ZeroCapacity,
    #[error("room is marked reserved but has no owner")]
    ReservedWithoutOwner,
    #[error("room is marked free but is held by {0}")]
    OwnerWithoutReservation(String),
}

/// What a reservation looks like from the point of view of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    Available,
    ReservedByMe,
    ReservedByOther,
}

impl ReservationState {
    pub fn status_label(self) -> &'static str {
        match self {
            ReservationState::Available => "Available",
            ReservationState::ReservedByMe | ReservationState::ReservedByOther => "Reserved",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            ReservationState::Available => "Reserve",
            ReservationState::ReservedByMe => "Cancel Reservation",
            ReservationState::ReservedByOther => "Reserved",
        }
    }
}

/// A validated classroom reservation. The room is reserved exactly when it has a holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    classroom_name: String,
    amount_of_people: NonZeroU32,
    holder: Option<String>,
}

impl Reservation {
    pub fn available(classroom_name: impl Into<String>, amount_of_people: NonZeroU32) -> Self {
        Reservation {
            classroom_name: classroom_name.into(),
            amount_of_people,
            holder: None,
        }
    }

    pub fn classroom_name(&self) -> &str {
        &self.classroom_name
    }

    pub fn amount_of_people(&self) -> u32 {
        self.amount_of_people.get()
    }

    pub fn is_reserved(&self) -> bool {
        self.holder.is_some()
    }

    pub fn reserved_by(&self) -> Option<&str> {
        self.holder.as_deref()
    }

    pub fn state_for(&self, owner_id: &str) -> ReservationState {
        match self.holder.as_deref() {
            None => ReservationState::Available,
            Some(holder) if holder == owner_id => ReservationState::ReservedByMe,
            Some(_) => ReservationState::ReservedByOther,
        }
    }

    /// The reservation after `owner_id` presses the toggle, or `None` when someone else holds it.
    pub fn toggled_for(&self, owner_id: &str) -> Option<Reservation> {
        let holder = match self.state_for(owner_id) {
            ReservationState::Available => Some(owner_id.to_owned()),
            ReservationState::ReservedByMe => None,
            ReservationState::ReservedByOther => return None,
        };
        Some(Reservation {
            holder,
            ..self.clone()
        })
    }

    pub fn to_record(&self) -> ReservationRecord {
        ReservationRecord {
            classroom_name: self.classroom_name.clone(),
            amount_of_people: self.amount_of_people.get(),
            is_reserved: self.is_reserved(),
            reserved_by: self.holder.clone(),
        }
    }
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = InvalidReservation;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        if record.classroom_name.is_empty() {
            return Err(InvalidReservation::EmptyName);
        }
        let amount_of_people =
            NonZeroU32::new(record.amount_of_people).ok_or(InvalidReservation::ZeroCapacity)?;
        let reserved_by = record.reserved_by.filter(|owner| !owner.is_empty());
        let holder = match (record.is_reserved, reserved_by) {
            (true, Some(owner)) => Some(owner),
            (true, None) => return Err(InvalidReservation::ReservedWithoutOwner),
            (false, Some(owner)) => return Err(InvalidReservation::OwnerWithoutReservation(owner)),
            (false, None) => None,
        };
        Ok(Reservation {
            classroom_name: record.classroom_name,
            amount_of_people,
            holder,
        })
    }
}
