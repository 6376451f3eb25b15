//! P256 functions

use crate::curve::CurveTrait;
use libpaillier::unknown_order::BigNumber;
use p256::elliptic_curve::{bigint::Encoding, Curve};

/// Marker type for the NIST P-256 curve.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct P256;

pub(crate) fn p256_order() -> BigNumber {
    // Set order = q
    let order_bytes: [u8; 32] = p256::NistP256::ORDER.to_be_bytes();
    BigNumber::from_slice(order_bytes)
}

impl CurveTrait for P256 {
    const NAME: &'static str = "P-256";

    fn order() -> BigNumber {
        p256_order()
    }
}
