//! Pure helpers shared across crates

pub mod status;
