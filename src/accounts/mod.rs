//! Households and residents: registration, login and profile management.

pub mod commands;
pub mod password;

pub use commands::{ImageUpload, LoginRequest, ProfileRequest, RegisterRequest};
