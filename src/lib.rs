// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Zero-knowledge proofs for threshold ECDSA over Paillier encryption.
//!
//! This crate provides two non-interactive proofs:
//! - [`AliceRangeProof`]: a Paillier ciphertext encrypts a value below `q³`,
//!   where `q` is the order of the signing curve. The MtA
//!   (multiplicative-to-additive) conversion uses it to stop a party from
//!   submitting an out-of-range ciphertext.
//! - [`FacProof`]: a modulus `N0` is the product of two factors of bounded
//!   size, so that a party cannot use a maliciously structured modulus.
//!
//! Both are Sigma protocols made non-interactive with Fiat-Shamir, anchored to
//! Pedersen-style commitments modulo an auxiliary modulus
//! ([`PedersenParams`]) that the verifier provides.
//!
//! Proving takes a caller-supplied cryptographically secure RNG and returns a
//! [`Result`](errors::Result). Verifying is a plain predicate: it returns
//! `false` on any failure and never says which check failed.
//!
//! ```ignore
//! use tss_zkp::{fac, FacProof, PedersenParams, Proof, Secp256k1};
//!
//! let input = fac::CommonInput::new(&setup_params, &modulus);
//! let proof = FacProof::<Secp256k1>::prove(&input, &fac::ProverSecret::new(&p, &q), &mut rng)?;
//! let wire = proof.to_bytes();
//!
//! let received = FacProof::<Secp256k1>::from_bytes(&wire)?;
//! assert!(received.verify(&input));
//! ```

#![allow(non_snake_case)]
#![warn(missing_docs)]

pub mod curve;
pub mod errors;
pub mod k256;
pub mod p256;
pub mod paillier;
pub mod parameters;
pub mod pedersen;
mod utils;
pub mod zkp;

pub use curve::{CurveTrait, Secp256k1, Secp256r1};
pub use paillier::PaillierPublicKey;
pub use pedersen::PedersenParams;
pub use zkp::{
    alice_range::{self, AliceRangeProof},
    fac::{self, FacProof},
    Proof,
};
