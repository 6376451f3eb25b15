// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Fiat-Shamir challenge derivation.
//!
//! A challenge is SHA-512/256 over an ordered tuple of integers, folded into
//! `[0, q)` by rejection sampling. Prover and verifier must hash the same
//! tuple in the same order; a reordered tuple yields an unrelated challenge.

use crate::{
    curve::CurveTrait,
    errors::{CallerError, InternalError, Result},
    utils::CRYPTOGRAPHIC_RETRY_MAX,
};
use libpaillier::unknown_order::BigNumber;
use sha2::{Digest, Sha512_256};
use tracing::error;

const DIGEST_LEN: usize = 32;
const INPUT_DELIMITER: u8 = b'$';

/// Hash an ordered tuple of integers with SHA-512/256.
///
/// The encoding is `le_u64(count) || x_0 || '$' || x_1 || '$' || ...`, with
/// each `x_i` in minimal big-endian form.
pub(crate) fn sha512_256i(ints: &[&BigNumber]) -> Result<[u8; DIGEST_LEN]> {
    if ints.is_empty() {
        error!("Refusing to derive a challenge from an empty tuple");
        return Err(InternalError::InternalInvariantFailed);
    }
    let mut hasher = Sha512_256::new();
    hasher.update((ints.len() as u64).to_le_bytes());
    for x in ints {
        hasher.update(x.to_bytes());
        hasher.update([INPUT_DELIMITER]);
    }
    Ok(hasher.finalize().into())
}

/// Map `digest` to a uniform value in `[0, q)`.
///
/// Candidates are truncated to the bit length of `q` and rejected when they
/// land in `[q, 2^bitlen(q))`; a rejected candidate is re-hashed rather than
/// reduced, so no residue is favored.
pub(crate) fn rejection_sample(q: &BigNumber, digest: &[u8; DIGEST_LEN]) -> Result<BigNumber> {
    let q_bytes = q.to_bytes();
    let top_byte = match q_bytes.first() {
        Some(&byte) if q > &BigNumber::zero() => byte,
        _ => {
            error!("Challenge space must be non-empty");
            return Err(CallerError::BadInput.into());
        }
    };
    let top_mask = 0xffu8 >> top_byte.leading_zeros();

    let mut digest = *digest;
    for attempt in 0..CRYPTOGRAPHIC_RETRY_MAX {
        let mut candidate = expand(&digest, q_bytes.len());
        candidate[0] &= top_mask;
        let e = BigNumber::from_slice(&candidate);
        if &e < q {
            return Ok(e);
        }
        digest = Sha512_256::new()
            .chain_update(b"rejection sample")
            .chain_update((attempt as u64).to_le_bytes())
            .chain_update(digest)
            .finalize()
            .into();
    }
    error!("Rejection sampling did not find a challenge within the retry limit");
    Err(CallerError::RetryFailed.into())
}

/// Stretch `digest` to `len` bytes. A digest that is already long enough is
/// used as-is.
fn expand(digest: &[u8; DIGEST_LEN], len: usize) -> Vec<u8> {
    if len <= DIGEST_LEN {
        return digest[..len].to_vec();
    }
    let mut out = Vec::with_capacity(len + DIGEST_LEN);
    let mut block = 0u64;
    while out.len() < len {
        out.extend_from_slice(
            &Sha512_256::new()
                .chain_update(b"expand")
                .chain_update(block.to_le_bytes())
                .chain_update(digest)
                .finalize(),
        );
        block += 1;
    }
    out.truncate(len);
    out
}

/// Derive the challenge `e ∊ [0, q)` for the ordered public tuple `ints`,
/// where `q` is the order of `C`.
pub(crate) fn challenge<C: CurveTrait>(ints: &[&BigNumber]) -> Result<BigNumber> {
    let digest = sha512_256i(ints)?;
    rejection_sample(&C::order(), &digest).map_err(|err| {
        error!("Could not derive a challenge over the {} group order", C::NAME);
        err
    })
}
