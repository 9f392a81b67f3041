//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant via `#[from]`.  The dispatcher has no recoverable errors at all:
//! contract violations there panic.

use thiserror::Error;

use crate::Floor;

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("floor {floor} is outside a {floor_count}-floor building")]
    FloorOutOfRange { floor: Floor, floor_count: u32 },
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
