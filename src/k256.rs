//! K256 functions

use crate::curve::CurveTrait;
use k256::elliptic_curve::{bigint::Encoding, Curve};
use libpaillier::unknown_order::BigNumber;

/// Marker type for the secp256k1 curve.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct K256;

pub(crate) fn k256_order() -> BigNumber {
    // Set order = q
    let order_bytes: [u8; 32] = k256::Secp256k1::ORDER.to_be_bytes();
    BigNumber::from_slice(order_bytes)
}

impl CurveTrait for K256 {
    const NAME: &'static str = "secp256k1";

    fn order() -> BigNumber {
        k256_order()
    }
}
