use serde::{Deserialize, Serialize};

const AREA_ALIASES: [(&str, &str); 4] = [
    ("kitchen", "kitchen"),
    ("living", "hall"),
    ("bedroom1", "master"),
    ("bedroom2", "guest"),
];

/// Maps a client area name to its canonical room name. Unknown names pass
/// through unchanged so validation can report them.
pub fn normalize_room(area: &str) -> String {
    AREA_ALIASES
        .iter()
        .find(|(alias, _)| *alias == area)
        .map(|(_, room)| (*room).to_string())
        .unwrap_or_else(|| area.to_string())
}

/// Room field of a submitted preference: either `"living"` or `{"room": "living"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaInput {
    Name(String),
    Nested { room: String },
}

impl AreaInput {
    pub fn name(&self) -> &str {
        match self {
            AreaInput::Name(name) => name,
            AreaInput::Nested { room } => room,
        }
    }

    pub fn normalized(&self) -> String {
        normalize_room(self.name())
    }
}

impl From<&str> for AreaInput {
    fn from(value: &str) -> Self {
        AreaInput::Name(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_aliases() {
        assert_eq!(normalize_room("bedroom1"), "master");
        assert_eq!(normalize_room("bedroom2"), "guest");
        assert_eq!(normalize_room("living"), "hall");
        assert_eq!(normalize_room("kitchen"), "kitchen");
    }

    #[test]
    fn passes_unknown_areas_through() {
        assert_eq!(normalize_room("unknown_area"), "unknown_area");
        assert_eq!(normalize_room("hall"), "hall");
        assert_eq!(normalize_room(""), "");
    }

    #[test]
    fn accepts_flat_and_nested_room_fields() {
        let flat: AreaInput = serde_json::from_str("\"living\"").unwrap();
        let nested: AreaInput = serde_json::from_str(r#"{"room": "bedroom2"}"#).unwrap();
        assert_eq!(flat.normalized(), "hall");
        assert_eq!(nested.normalized(), "guest");
    }
}
