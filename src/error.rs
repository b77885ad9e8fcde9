//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A configuration lookup failed (unknown document name or unknown
    /// route-to-model mapping). The message names the requested key and
    /// enumerates the known keys.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Configuration(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
