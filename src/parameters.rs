// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Security parameter definitions.
//!
//! The factorization proof scales every sampling range by the range parameter
//! `l`. A verifier accepting the proof learns that each factor of `N0` lies
//! within `l` bits of [`NOMINAL_PRIME_BITS`].

use libpaillier::unknown_order::BigNumber;

/// Bit size of the range parameter `l`, i.e. `l = 2^RANGE_PARAMETER_BITS`.
pub(crate) const RANGE_PARAMETER_BITS: usize = 15;

/// Nominal bit size of each factor of a modulus proven by
/// [`FacProof`](crate::zkp::fac::FacProof).
pub const NOMINAL_PRIME_BITS: usize = 1024;

/// Number of byte parts in the wire form of an
/// [`AliceRangeProof`](crate::zkp::alice_range::AliceRangeProof).
pub const ALICE_RANGE_PROOF_PARTS: usize = 6;

/// Number of byte parts in the wire form of a
/// [`FacProof`](crate::zkp::fac::FacProof).
pub const FAC_PROOF_PARTS: usize = 11;

/// The range parameter `l`.
pub(crate) fn range_parameter() -> BigNumber {
    BigNumber::one() << RANGE_PARAMETER_BITS
}
