// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Error types for proof construction and decoding.
//!
//! Verification never produces one of these: [`Proof::verify`] is a plain
//! predicate, so a caller cannot learn which check rejected a proof.
//!
//! [`Proof::verify`]: crate::zkp::Proof::verify

use thiserror::Error;

/// The default Result type used in this crate.
pub type Result<T> = std::result::Result<T, InternalError>;

/// Errors that are caused by incorrect behavior by the calling application.
#[derive(Clone, Copy, Eq, PartialEq, Error, Debug)]
pub enum CallerError {
    /// An argument to a proof constructor is out of its domain (for example a
    /// non-positive modulus).
    #[error("A proof was constructed from invalid input")]
    BadInput,
    /// The byte parts handed to a decoder have the wrong count or contain an
    /// empty part.
    #[error("Could not decode proof from byte parts")]
    DeserializationFailed,
    /// A sampling loop ran out of attempts.
    #[error("Could not sample a value within the retry limit")]
    RetryFailed,
}

/// Errors produced by this crate.
#[derive(Clone, Copy, Eq, PartialEq, Error, Debug)]
pub enum InternalError {
    /// The calling application made a mistake; see the wrapped error.
    #[error("Calling application made a mistake: {0}")]
    CallingApplicationMistake(CallerError),
    /// An internal invariant was violated. This indicates a bug.
    #[error("Internal invariant failed")]
    InternalInvariantFailed,
}

impl From<CallerError> for InternalError {
    fn from(err: CallerError) -> Self {
        InternalError::CallingApplicationMistake(err)
    }
}
