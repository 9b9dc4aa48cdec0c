pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Invalid engine configuration value.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("`{field}` must be a finite number greater than zero, got {value}")]
    NonPositiveInterval { field: &'static str, value: f64 },
    #[display("`{field}` must be a finite non-negative number, got {value}")]
    NegativeDecrement { field: &'static str, value: f64 },
}

/// Malformed piece seed string.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: {_0}")]
    InvalidDigit(std::num::ParseIntError),
}
