//! Elliptic curve parameter abstraction.
//!
//! The proofs in this crate only consume the order `q` of the curve group: it
//! bounds the Fiat-Shamir challenge and scales the sampling ranges.
use crate::{k256::K256, p256::P256};
use libpaillier::unknown_order::BigNumber;
use std::fmt::Debug;

/// An elliptic curve whose group order parameterizes a proof.
pub trait CurveTrait: 'static + Clone + Copy + Debug + Send + Sync + Eq + PartialEq {
    /// A short human-readable name, used in log output.
    const NAME: &'static str;

    /// The order of the curve.
    fn order() -> BigNumber;
}

/// Default curve type.
pub type TestCurve = K256;

/// K256 curve type.
pub type Secp256k1 = K256;

/// P256 curve type.
pub type Secp256r1 = P256;
