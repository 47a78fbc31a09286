pub mod cache;
pub mod dictionary;
pub mod language;
pub mod types;
