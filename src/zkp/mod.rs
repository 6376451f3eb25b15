// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Non-interactive zero-knowledge proofs.
//!
//! Every proof is a Sigma protocol compiled with Fiat-Shamir. The prover
//! gets a [`Proof::CommonInput`] and a [`Proof::ProverSecret`]; the verifier
//! only gets the common input. Verification is split in two:
//! [`Proof::validate_basic`] is a cheap structural check, and
//! [`Proof::verify`] runs it before the range and algebraic checks.

pub mod alice_range;
pub(crate) mod challenge;
pub mod fac;

use crate::errors::Result;
use rand::{CryptoRng, RngCore};

/// A non-interactive zero-knowledge proof.
pub trait Proof: Sized {
    /// Public values known to both prover and verifier.
    type CommonInput;
    /// The prover's witness.
    type ProverSecret;

    /// Construct a proof of `secret` for the statement `input`, using fresh
    /// randomness from `rng`.
    fn prove<R: RngCore + CryptoRng>(
        input: &Self::CommonInput,
        secret: &Self::ProverSecret,
        rng: &mut R,
    ) -> Result<Self>;

    /// Cheap structural check: every field is present in the form the wire
    /// encoding can carry. Does no modular arithmetic.
    fn validate_basic(&self) -> bool;

    /// Full check of the proof against `input`.
    ///
    /// Returns `false` on any failure, without saying which check failed.
    fn verify(&self, input: &Self::CommonInput) -> bool;
}
