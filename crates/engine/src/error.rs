//! The module contains the errors the engine can throw.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),
}
