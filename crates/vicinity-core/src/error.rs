//! Error types for `vicinity-core`.
//!
//! Recoverable errors exist only at the configuration boundary. The distance
//! kernels themselves never return errors: precondition failures are contract
//! violations checked by debug assertions, and numerical hazards are handled
//! in-band (see the kernel modules).

use thiserror::Error;

/// Result type alias for `vicinity-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring the distance engine.
///
/// Error codes follow the pattern `VIC-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Metric name not part of the closed metric set (VIC-001).
    #[error("[VIC-001] Unknown metric '{0}'")]
    UnknownMetric(String),

    /// Lp exponent outside its valid domain (VIC-002).
    #[error("[VIC-002] Invalid Lp exponent {0}: must be finite and > 0")]
    InvalidExponent(f32),

    /// Other configuration error (VIC-003).
    #[error("[VIC-003] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "VIC-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownMetric(_) => "VIC-001",
            Self::InvalidExponent(_) => "VIC-002",
            Self::Config(_) => "VIC-003",
        }
    }
}
