//! Spoken light commands and the conversation history behind them.

pub mod commands;

pub use commands::AudioUpload;
