//! Transcript interpreter.
//!
//! Maps free-form text to a light [`Command`] by plain substring matching on
//! the lowercased transcript. No state, no I/O; every input yields a command.

mod command;
mod keywords;

pub use command::{Command, Intensity, Intent, FALLBACK_RESPONSE};
pub use keywords::last_match;

use keywords::{INTENSITY_CLASSES, INTENT_KEYWORDS, ROOM_KEYWORDS};

pub fn interpret(transcript: &str) -> Command {
    let text = transcript.to_lowercase();

    let room = last_match(ROOM_KEYWORDS, |(keyword, _)| text.contains(*keyword)).map(|(_, room)| room);
    let Some(room) = room else {
        return Command::fallback(transcript);
    };

    let mut intent =
        last_match(INTENT_KEYWORDS, |(keyword, _)| text.contains(*keyword)).map(|(_, intent)| intent);

    let intensity = last_match(INTENSITY_CLASSES, |(_, keywords)| {
        keywords.iter().any(|keyword| text.contains(*keyword))
    })
    .map(|(level, _)| level);

    // Any brightness keyword means the light has to be on.
    if intensity.is_some() {
        intent = Some(Intent::On);
    }

    let (intensity, response_message) = match intent {
        Some(Intent::On) => {
            let level = intensity.unwrap_or(Intensity::Low);
            (
                Some(level),
                format!("The light is turned on with {level} intensity in {room} room."),
            )
        }
        Some(Intent::Off) => (None, format!("The light is turned off in {room} room.")),
        None => (
            None,
            format!("Please say whether to turn the light on or off in {room} room."),
        ),
    };

    Command {
        room: Some(room),
        intent,
        intensity,
        original_text: transcript.to_string(),
        response_message,
    }
}
