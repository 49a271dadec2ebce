pub mod admin;
pub mod audio_record;
pub mod preference;
pub mod user;

pub use admin::{Admin, AdminSession};
pub use audio_record::{AudioRecord, ConversationLog};
pub use preference::{Preference, PreferenceSummary};
pub use user::{Role, User, UserProfile};
