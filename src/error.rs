//! Caller-facing error values.

use thiserror::Error;

/// Explicit rejections for caller misuse.
///
/// Backend-boundary write rejections never reach this type; they are caught
/// where the write happens (see `core::screen::WriteRejected`). Operating on
/// a panel that was never sized is a programming error and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("progress {found} is outside the valid range 0..=100")]
    ProgressOutOfRange { found: i32 },

    #[error("key '{key}' is already registered in this grid")]
    DuplicateGridKey { key: String },

    #[error("no grid slot is registered under key '{key}'")]
    UnknownGridKey { key: String },
}
