//! Keyword tables scanned by the interpreter. Table order is significant:
//! every scan keeps the last hit, so later entries override earlier ones.

use super::command::{Intensity, Intent};
use crate::models::Room;

pub(super) const ROOM_KEYWORDS: [(&str, Room); 4] = [
    ("master", Room::Master),
    ("kitchen", Room::Kitchen),
    ("guest", Room::Guest),
    ("hall", Room::Hall),
];

pub(super) const INTENT_KEYWORDS: [(&str, Intent); 2] = [("on", Intent::On), ("off", Intent::Off)];

// Low is listed first so that high wins when both classes are present.
pub(super) const INTENSITY_CLASSES: [(Intensity, &[&str]); 2] = [
    (Intensity::Low, &["low", "soft", "decrease"]),
    (Intensity::High, &["high", "bright", "increase"]),
];

/// Iterates `candidates` in order and returns the last one accepted by `hit`.
pub fn last_match<T, I, F>(candidates: I, mut hit: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    let mut last = None;
    for candidate in candidates {
        if hit(&candidate) {
            last = Some(candidate);
        }
    }
    last
}
