//! Error types for the check operation, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (C001-C004) for documentation lookup:
//!
//! - C001: `ZeroRowWidth` (Row width must be positive)
//! - C002: `ZeroRowBudget` (Row budget must be positive)
//! - C003: `TooManyPositions` (Phrase exceeds the defensive position cap)
//! - C004: `TooManyTiles` (Inventory exceeds the defensive tile cap)
//!
//! These are *caller* errors: the check never fails on malformed user data.
//! A bad inventory token degrades to fewer tiles, an oversized phrase or an
//! insufficient inventory is reported as a [`CheckOutcome`] value, and
//! unavailable storage is ignored. Only configuration bugs and the
//! defensive input caps surface here.
//!
//! [`CheckOutcome`]: crate::checker::CheckOutcome

use std::io;

/// Hard errors from [`check`](crate::checker::check).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckError {
    /// The configured row width was zero. Wrapping cannot make progress
    /// against a zero-width row, so this is rejected up front.
    #[error("row width must be positive (got 0)")]
    ZeroRowWidth,

    /// The configured row budget was zero.
    #[error("row budget must be positive (got 0)")]
    ZeroRowBudget,

    /// The wrapped phrase produced more character positions than the
    /// defensive cap allows.
    #[error("phrase has {count} positions, more than the supported {limit}")]
    TooManyPositions { count: usize, limit: usize },

    /// The parsed inventory produced more tiles than the defensive cap
    /// allows.
    #[error("inventory has {count} tiles, more than the supported {limit}")]
    TooManyTiles { count: usize, limit: usize },
}

impl From<CheckError> for io::Error {
    fn from(e: CheckError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    }
}

impl CheckError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::ZeroRowWidth => "C001",
            CheckError::ZeroRowBudget => "C002",
            CheckError::TooManyPositions { .. } => "C003",
            CheckError::TooManyTiles { .. } => "C004",
        }
    }

    /// Short description of the error type
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CheckError::ZeroRowWidth => "Invalid row width",
            CheckError::ZeroRowBudget => "Invalid row budget",
            CheckError::TooManyPositions { .. } => "Phrase too large",
            CheckError::TooManyTiles { .. } => "Inventory too large",
        }
    }

    /// Longer explanation, suitable for a debug report
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            CheckError::ZeroRowWidth | CheckError::ZeroRowBudget => {
                "Row width and row budget are caller-supplied configuration; \
                 zero values indicate a configuration bug rather than bad user data."
            }
            CheckError::TooManyPositions { .. } | CheckError::TooManyTiles { .. } => {
                "Inputs are capped to keep the matching stage from pathological \
                 blowups; the check reports the cap instead of hanging."
            }
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CheckError::ZeroRowWidth => Some("Pass a row width of at least 1"),
            CheckError::ZeroRowBudget => Some("Pass a row budget of at least 1"),
            CheckError::TooManyPositions { .. } => {
                Some("Shorten the phrase; the checker is sized for hand-entered input")
            }
            CheckError::TooManyTiles { .. } => {
                Some("Reduce the tile counts; the checker is sized for hand-entered inventories")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self.help() {
            Some(help) => format!("{self} ({})\n{help}", self.code()),
            None => format!("{self} ({})", self.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_help() {
        let err = CheckError::ZeroRowWidth;
        assert_eq!(err.code(), "C001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("C001"));
        assert!(detailed.contains("at least 1"));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let errors = [
            CheckError::ZeroRowWidth,
            CheckError::ZeroRowBudget,
            CheckError::TooManyPositions { count: 9, limit: 1 },
            CheckError::TooManyTiles { count: 9, limit: 1 },
        ];

        let mut codes = std::collections::HashSet::new();
        for err in errors {
            assert!(codes.insert(err.code()), "duplicate code {}", err.code());
        }
        assert_eq!(codes.len(), 4);
    }

    #[test]
    fn test_cap_errors_include_values() {
        let err = CheckError::TooManyPositions { count: 12_345, limit: 10_000 };
        let msg = err.to_string();
        assert!(msg.contains("12345"));
        assert!(msg.contains("10000"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err: io::Error = CheckError::ZeroRowWidth.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert!(io_err.to_string().contains("row width"));
    }
}
