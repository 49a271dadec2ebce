//! Canonical lighting zones shared by the interpreter and the preference store.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Kitchen,
    Master,
    Guest,
    Hall,
}

impl Room {
    pub const ALL: [Room; 4] = [Room::Kitchen, Room::Master, Room::Guest, Room::Hall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Kitchen => "kitchen",
            Room::Master => "master",
            Room::Guest => "guest",
            Room::Hall => "hall",
        }
    }

    /// Exact, case-sensitive match against the canonical names.
    pub fn parse(value: &str) -> Option<Room> {
        Room::ALL.into_iter().find(|room| room.as_str() == value)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Room;

    #[test]
    fn parses_canonical_names_only() {
        assert_eq!(Room::parse("kitchen"), Some(Room::Kitchen));
        assert_eq!(Room::parse("hall"), Some(Room::Hall));
        assert_eq!(Room::parse("Hall"), None);
        assert_eq!(Room::parse("living"), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Room::Master).unwrap();
        assert_eq!(json, "\"master\"");
    }
}
