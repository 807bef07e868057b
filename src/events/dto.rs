use serde::{Deserialize, Serialize};
use time::{Date, Time};

use super::repo::Event;

/// `YYYY-MM-DD` wire format for event dates.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let s = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `HH:MM` wire format for event times.
pub(crate) mod wall_time {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Time};

    const FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let s = time.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let s = String::deserialize(deserializer)?;
        Time::parse(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Request body for a generic timeline event.
#[derive(Debug, Deserialize)]
pub struct LogEventRequest {
    pub title: String,
    #[serde(with = "iso_date")]
    pub event_date: Date,
    #[serde(with = "wall_time")]
    pub event_time: Time,
}

/// Request body for a medication intake log.
#[derive(Debug, Deserialize)]
pub struct MedicationLogRequest {
    pub medication: String,
    #[serde(with = "wall_time")]
    pub time: Time,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct EventLoggedResponse {
    pub message: String,
    pub event_id: i64,
}
