// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Paillier public key material, as consumed by the range proof.

use libpaillier::unknown_order::BigNumber;
use serde::{Deserialize, Serialize};

/// A Paillier public key `(N, N², Γ)`.
///
/// The proofs treat these as opaque integers; nothing here checks that `N`
/// is a well-formed Paillier modulus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaillierPublicKey {
    n: BigNumber,
    n_squared: BigNumber,
    gamma: BigNumber,
}

impl PaillierPublicKey {
    /// Build the key for modulus `N` with the standard generator `Γ = N + 1`.
    pub fn new(n: BigNumber) -> Self {
        let gamma = &n + &BigNumber::one();
        Self::with_generator(n, gamma)
    }

    /// Build the key for modulus `N` and an explicit generator `Γ`.
    pub fn with_generator(n: BigNumber, gamma: BigNumber) -> Self {
        let n_squared = &n * &n;
        Self {
            n,
            n_squared,
            gamma,
        }
    }

    /// The modulus `N`.
    pub fn n(&self) -> &BigNumber {
        &self.n
    }

    /// The squared modulus `N²`.
    pub fn n_squared(&self) -> &BigNumber {
        &self.n_squared
    }

    /// The generator `Γ`.
    pub fn gamma(&self) -> &BigNumber {
        &self.gamma
    }

    /// The key as it enters a Fiat-Shamir challenge: `(N, Γ)`.
    pub(crate) fn as_ints(&self) -> [&BigNumber; 2] {
        [&self.n, &self.gamma]
    }

    /// Compute `Γ^m · r^N mod N²`.
    #[cfg(test)]
    pub(crate) fn encrypt_with_nonce(&self, m: &BigNumber, r: &BigNumber) -> BigNumber {
        let gm = self.gamma.modpow(m, &self.n_squared);
        let rn = r.modpow(&self.n, &self.n_squared);
        gm.modmul(&rn, &self.n_squared)
    }
}
