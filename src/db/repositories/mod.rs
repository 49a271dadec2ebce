mod admins;
mod audio_records;
mod preferences;
mod users;
