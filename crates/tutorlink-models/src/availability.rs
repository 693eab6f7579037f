//! Weekly availability slots.
//!
//! Times travel as `HH:MM` strings and are held as [`NaiveTime`] on the
//! client. `day_of_week` runs from 0 (Monday) to 6 (Sunday).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tutorlink_core::serde::deserialize_string_or_number;
use validator::{Validate, ValidationError};

pub const TIME_FORMAT: &str = "%H:%M";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Parse a wall-clock time in `HH:MM` form.
pub fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
}

pub fn weekday_name(day_of_week: u8) -> Option<&'static str> {
    WEEKDAYS.get(day_of_week as usize).copied()
}

mod hhmm {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::TIME_FORMAT;
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.collect_str(&t.format(TIME_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => crate::availability::parse_time(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// A slot as returned by `GET /availability/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    pub day_of_week: u8,
    #[serde(default, with = "hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
}

/// Body of `POST /availability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_slot_range"))]
pub struct NewAvailabilitySlot {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

fn validate_new_slot_range(slot: &NewAvailabilitySlot) -> Result<(), ValidationError> {
    if slot.end_time <= slot.start_time {
        return Err(ValidationError::new("time_range"));
    }
    Ok(())
}

/// Body of `PUT /availability/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_slot_update_range"))]
pub struct AvailabilitySlotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
}

impl AvailabilitySlotUpdate {
    pub fn is_empty(&self) -> bool {
        self.day_of_week.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }
}

// Only checkable when both ends are in the update; the server re-checks
// against the stored slot.
fn validate_slot_update_range(update: &AvailabilitySlotUpdate) -> Result<(), ValidationError> {
    match (update.start_time, update.end_time) {
        (Some(start), Some(end)) if end <= start => Err(ValidationError::new("time_range")),
        _ => Ok(()),
    }
}
