use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::Role;
use crate::models::Room;

/// Fixed-width UTC timestamps so that text ordering matches time ordering.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_room(value: &str) -> Result<Room> {
    Room::parse(value).ok_or_else(|| anyhow!("unknown room {value}"))
}

pub fn parse_role(value: &str) -> Result<Role> {
    match value {
        "owner" => Ok(Role::Owner),
        "resident" => Ok(Role::Resident),
        other => Err(anyhow!("unknown user role {other}")),
    }
}
