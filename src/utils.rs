// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

use crate::errors::{CallerError, InternalError, Result};
use libpaillier::unknown_order::BigNumber;
use num_bigint::{BigInt, Sign};
use rand::{CryptoRng, RngCore};
use tracing::error;

pub(crate) const CRYPTOGRAPHIC_RETRY_MAX: usize = 500usize;

/// Compute a^e (mod n).
pub(crate) fn modpow(a: &BigNumber, e: &BigNumber, n: &BigNumber) -> BigNumber {
    a.modpow(e, n)
}

/// Compute a^(-e) (mod n) as (a^-1)^e.
///
/// Returns `None` if `a` is not invertible modulo `n`.
pub(crate) fn modpow_inverse(a: &BigNumber, e: &BigNumber, n: &BigNumber) -> Option<BigNumber> {
    a.invert(n).map(|a_inv| modpow(&a_inv, e, n))
}

/// Returns `true` if `value ∊ [0, bound)`.
pub(crate) fn is_in_interval(value: &BigNumber, bound: &BigNumber) -> bool {
    value >= &BigNumber::zero() && value < bound
}

/// Returns `true` if `n` can be used as a modulus for [`modpow`]: odd and
/// greater than one. GMP's constant-time exponentiation panics on an even
/// modulus.
pub(crate) fn is_odd_modulus(n: &BigNumber) -> bool {
    n > &BigNumber::one() && n.nmod(&BigNumber::from(2u64)).is_one()
}

/// Returns `true` if `value` and `n` share no nontrivial factor.
pub(crate) fn is_coprime(value: &BigNumber, n: &BigNumber) -> bool {
    value.gcd(n) == BigNumber::one()
}

/// Find the square root of a non-negative BigNumber, rounding down.
pub(crate) fn sqrt(num: &BigNumber) -> BigNumber {
    // convert to a struct with a square root function first
    let num_bigint: BigInt = BigInt::from_bytes_be(Sign::Plus, &num.to_bytes());
    let sqrt = num_bigint.sqrt();
    BigNumber::from_slice(sqrt.to_bytes_be().1)
}

/// Sample a number uniformly at random from the range [0, n). This can be used
/// for sampling from a prime field `F_p` or the integers modulo `n` (for any
/// `n`).
pub(crate) fn random_positive_bn<R: RngCore + CryptoRng>(rng: &mut R, n: &BigNumber) -> BigNumber {
    BigNumber::from_rng(n, rng)
}

/// Generate a random `BigNumber` that is in the multiplicative group of
/// integers modulo `n`.
///
/// Note: In this application, `n` is typically the product of two primes. If
/// the drawn element is not coprime with `n` and is not `0 mod n`, then the
/// caller has accidentally stumbled upon the factorization of `n`!
/// This is a security issue when `n` is someone else's Paillier modulus, but
/// the chance of this happening is basically 0 and we drop the element anyway.
pub(crate) fn random_bn_in_z_star<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: &BigNumber,
) -> Result<BigNumber> {
    // Try up to `CRYPTOGRAPHIC_RETRY_MAX` times to draw a non-zero element. This
    // should virtually never error, though.
    std::iter::repeat_with(|| BigNumber::from_rng(n, rng))
        .take(CRYPTOGRAPHIC_RETRY_MAX)
        .find(|result| result != &BigNumber::zero() && is_coprime(result, n))
        .ok_or_else(|| {
            error!("Failed to sample an element of Z*_n within the retry limit");
            InternalError::CallingApplicationMistake(CallerError::RetryFailed)
        })
}

/// Split-out structural check on wire parts: exactly `expected` parts, none
/// of them empty.
pub(crate) fn non_empty_parts(parts: &[Vec<u8>], expected: usize) -> bool {
    parts.len() == expected && parts.iter().all(|part| !part.is_empty())
}


////////////////////////////
// Test Utility Functions //
////////////////////////////
