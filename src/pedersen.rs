// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Pedersen-style commitments modulo an auxiliary RSA modulus.
//!
//! The parameters are a modulus `N` and two bases `s`, `t` whose discrete-log
//! relation is unknown to the prover. A commitment to `x` with randomness `r`
//! is `s^x · t^r mod N`. The range proof calls the bases `h1` and `h2`.

use crate::utils::{is_odd_modulus, modpow};
use libpaillier::unknown_order::BigNumber;
use serde::{Deserialize, Serialize};

/// Auxiliary modulus and commitment bases.
///
/// These must be generated by the verifier (or jointly); nothing here checks
/// that `s` and `t` generate the same subgroup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenParams {
    modulus: BigNumber,
    s: BigNumber,
    t: BigNumber,
}

impl PedersenParams {
    /// Collect the auxiliary modulus `N` and bases `s`, `t`.
    pub fn new(modulus: BigNumber, s: BigNumber, t: BigNumber) -> Self {
        Self { modulus, s, t }
    }

    /// The auxiliary modulus.
    pub fn modulus(&self) -> &BigNumber {
        &self.modulus
    }

    /// The first base (`s`, or `h1`).
    pub fn s(&self) -> &BigNumber {
        &self.s
    }

    /// The second base (`t`, or `h2`).
    pub fn t(&self) -> &BigNumber {
        &self.t
    }

    /// An odd modulus greater than one and non-negative bases. Anything else
    /// cannot be used for modular exponentiation.
    pub(crate) fn is_well_formed(&self) -> bool {
        let zero = BigNumber::zero();
        is_odd_modulus(&self.modulus) && self.s >= zero && self.t >= zero
    }

    /// Compute `s^value · t^randomness mod N`.
    pub(crate) fn commit(&self, value: &BigNumber, randomness: &BigNumber) -> BigNumber {
        self.commit_with_base(&self.s, value, randomness)
    }

    /// Compute `base^value · t^randomness mod N`.
    pub(crate) fn commit_with_base(
        &self,
        base: &BigNumber,
        value: &BigNumber,
        randomness: &BigNumber,
    ) -> BigNumber {
        modpow(base, value, &self.modulus)
            .modmul(&modpow(&self.t, randomness, &self.modulus), &self.modulus)
    }

    /// Compute `a · b^e mod N`.
    pub(crate) fn combine(&self, a: &BigNumber, b: &BigNumber, e: &BigNumber) -> BigNumber {
        a.modmul(&modpow(b, e, &self.modulus), &self.modulus)
    }
}
