// Copyright 2025 the Hyades Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the point, cluster, and classifier layers.

use thiserror::Error;

/// Errors returned by this crate and by the region-growth layer built on it.
///
/// All variants are programmer errors: they are reported at the call that
/// triggered them and leave the receiver unchanged.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// An argument was rejected: a non-finite number, an empty cluster list,
    /// a `k` below one, or a value outside the operation's domain.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A coordinate list (or buffer) does not have the expected length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// More weight was removed than a cluster holds.
    #[error("underflow: requested {requested}, but only {available} available")]
    Underflow {
        /// Weight that was asked for.
        requested: f64,
        /// Weight that was actually held.
        available: f64,
    },
}

impl Error {
    /// Whether this error belongs to the invalid-argument family.
    ///
    /// A wrong coordinate count is a malformed argument too, so
    /// [`Error::DimensionMismatch`] is included.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::DimensionMismatch { .. })
    }

    pub(crate) const fn non_finite(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            message: "must be finite",
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;
