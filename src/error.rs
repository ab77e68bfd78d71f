// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Crate-wide error type.

use thiserror::Error;

/// Errors raised by the timing helpers.
///
/// Every fallible operation in the crate returns [`Result`]; nothing is
/// retried or recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    /// A date string did not match its format, or names a local time that
    /// does not exist.
    #[error("invalid date {input:?} for format {format:?}")]
    InvalidDate { input: String, format: String },

    /// The orbital period is zero or not finite.
    #[error("invalid orbital period: {0} days")]
    InvalidPeriod(f64),

    /// The cycle count cannot be represented as an integer.
    #[error("epoch is not finite: {0}")]
    NonFiniteEpoch(f64),

    /// The eclipse target returned no eclipse after the requested date.
    #[error("no eclipse found after the requested date")]
    EclipseNotFound,

    /// Parallel timing vectors do not share the same length.
    #[error("length mismatch for {field}: expected {expected}, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Observation tag other than `"tra"` or `"occ"`.
    #[error("unknown eclipse kind {0:?}, expected \"tra\" or \"occ\"")]
    UnknownEclipseKind(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TimingError>;
