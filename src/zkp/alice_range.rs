// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Implements Alice's range proof from the MtA protocol: the Paillier
//! ciphertext `c` encrypts a plaintext `m` with `m < q³`, where `q` is the
//! order of the curve.
//!
//! The proof is defined in Figure 9 of GG18[^cite], and uses a standard
//! Fiat-Shamir transformation to make the proof non-interactive.
//!
//! [^cite]: Rosario Gennaro and Steven Goldfeder. Fast Multiparty Threshold
//! ECDSA with Fast Trustless Setup. [EPrint archive,
//! 2019](https://eprint.iacr.org/2019/114.pdf).

use crate::{
    curve::CurveTrait,
    errors::{CallerError, Result},
    paillier::PaillierPublicKey,
    parameters::ALICE_RANGE_PROOF_PARTS,
    pedersen::PedersenParams,
    utils::{
        is_odd_modulus, modpow, modpow_inverse, non_empty_parts, random_bn_in_z_star,
        random_positive_bn,
    },
    zkp::{challenge::challenge, Proof},
};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, marker::PhantomData};
use tracing::{debug, error};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Proof that a Paillier ciphertext encrypts a value smaller than `q³`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(bound = "")]
pub struct AliceRangeProof<C: CurveTrait> {
    /// Commitment to the plaintext `m` with randomness `rho`.
    z: BigNumber,
    /// Paillier encryption of `alpha` with nonce `beta`.
    u: BigNumber,
    /// Commitment to `alpha` with randomness `gamma`.
    w: BigNumber,
    /// Nonce `r` masked with `beta`.
    s: BigNumber,
    /// Plaintext `m` masked with `alpha`.
    s1: BigNumber,
    /// Randomness `rho` masked with `gamma`.
    s2: BigNumber,
    #[serde(skip)]
    curve: PhantomData<C>,
}

/// Common input and setup parameters known to both the prover and verifier.
#[derive(Clone, Debug, Serialize)]
pub struct CommonInput {
    pk: PaillierPublicKey,
    setup_params: PedersenParams,
    ciphertext: BigNumber,
}

impl CommonInput {
    /// Generate public input for proving and verifying [`AliceRangeProof`]
    /// about `ciphertext` under `pk`.
    ///
    /// Note: `setup_params` (`NTilde`, `h1`, `h2`) **must be** provided by
    /// the verifier!
    pub fn new(
        pk: &PaillierPublicKey,
        setup_params: &PedersenParams,
        ciphertext: &BigNumber,
    ) -> Self {
        Self {
            pk: pk.clone(),
            setup_params: setup_params.clone(),
            ciphertext: ciphertext.clone(),
        }
    }

    /// `N` must be odd, and `N²` must be recomputed from it rather than
    /// trusted: a key decoded from the wire carries both.
    fn is_well_formed(&self) -> bool {
        let zero = BigNumber::zero();
        is_odd_modulus(self.pk.n())
            && self.pk.n_squared() == &(self.pk.n() * self.pk.n())
            && self.pk.gamma() >= &zero
            && self.ciphertext >= zero
            && self.setup_params.is_well_formed()
    }
}

/// The prover's secret knowledge: the plaintext `m` and nonce `r` with
/// `c = Γ^m · r^N mod N²`.
#[derive(ZeroizeOnDrop)]
pub struct ProverSecret {
    plaintext: BigNumber,
    nonce: BigNumber,
}

impl Debug for ProverSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("alice_range::ProverSecret")
            .field("plaintext", &"[redacted]")
            .field("nonce", &"[redacted]")
            .finish()
    }
}

impl ProverSecret {
    /// Collect the plaintext and Paillier nonce of the ciphertext.
    pub fn new(plaintext: &BigNumber, nonce: &BigNumber) -> Self {
        Self {
            plaintext: plaintext.clone(),
            nonce: nonce.clone(),
        }
    }
}

impl<C: CurveTrait> Proof for AliceRangeProof<C> {
    type CommonInput = CommonInput;
    type ProverSecret = ProverSecret;

    fn prove<R: RngCore + CryptoRng>(
        input: &Self::CommonInput,
        secret: &Self::ProverSecret,
        rng: &mut R,
    ) -> Result<Self> {
        if !input.is_well_formed() {
            error!("Cannot prove range of a ciphertext under a malformed public input");
            return Err(CallerError::BadInput.into());
        }
        if secret.plaintext < BigNumber::zero() || secret.nonce < BigNumber::zero() {
            error!("Range proof secret must be non-negative");
            return Err(CallerError::BadInput.into());
        }

        let q = C::order();
        let q3 = &(&q * &q) * &q;
        let n_tilde = input.setup_params.modulus();
        let q_n_tilde = &q * n_tilde;
        let q3_n_tilde = &q3 * n_tilde;

        let alpha = Zeroizing::new(random_positive_bn(rng, &q3));
        let beta = Zeroizing::new(random_bn_in_z_star(rng, input.pk.n())?);
        let gamma = Zeroizing::new(random_positive_bn(rng, &q3_n_tilde));
        let rho = Zeroizing::new(random_positive_bn(rng, &q_n_tilde));

        let z = input.setup_params.commit(&secret.plaintext, &rho);
        let w = input.setup_params.commit(&alpha, &gamma);
        let nn = input.pk.n_squared();
        let u = modpow(input.pk.gamma(), &alpha, nn).modmul(&modpow(&beta, input.pk.n(), nn), nn);

        let e = Self::challenge(input, &z, &u, &w)?;

        let s = modpow(&secret.nonce, &e, input.pk.n()).modmul(&beta, input.pk.n());
        let s1 = &*alpha + &e * &secret.plaintext;
        let s2 = &*gamma + &e * &*rho;

        Ok(Self {
            z,
            u,
            w,
            s,
            s1,
            s2,
            curve: PhantomData,
        })
    }

    fn validate_basic(&self) -> bool {
        self.fields().iter().all(|x| *x >= &BigNumber::zero())
    }

    fn verify(&self, input: &Self::CommonInput) -> bool {
        if !self.validate_basic() || !input.is_well_formed() {
            debug!("Range proof or its public input is malformed");
            return false;
        }

        let q = C::order();
        let q3 = &(&q * &q) * &q;
        if self.s1 > q3 {
            debug!("Range proof s1 exceeds q^3");
            return false;
        }

        let e = match Self::challenge(input, &self.z, &self.u, &self.w) {
            Ok(e) => e,
            Err(_) => return false,
        };

        // Γ^s1 · s^N · c^-e = u (mod N²)
        let nn = input.pk.n_squared();
        let c_exp_minus_e = match modpow_inverse(&input.ciphertext, &e, nn) {
            Some(x) => x,
            None => {
                debug!("Ciphertext is not invertible mod N^2");
                return false;
            }
        };
        let products = modpow(input.pk.gamma(), &self.s1, nn)
            .modmul(&modpow(&self.s, input.pk.n(), nn), nn)
            .modmul(&c_exp_minus_e, nn);
        if products != self.u {
            debug!("Range proof ciphertext check failed");
            return false;
        }

        // h1^s1 · h2^s2 · z^-e = w (mod NTilde)
        let n_tilde = input.setup_params.modulus();
        let z_exp_minus_e = match modpow_inverse(&self.z, &e, n_tilde) {
            Some(x) => x,
            None => {
                debug!("Range proof commitment z is not invertible");
                return false;
            }
        };
        let products = input
            .setup_params
            .commit(&self.s1, &self.s2)
            .modmul(&z_exp_minus_e, n_tilde);
        if products != self.w {
            debug!("Range proof commitment check failed");
            return false;
        }

        true
    }
}

impl<C: CurveTrait> AliceRangeProof<C> {
    /// The challenge over `(N, Γ, c, z, u, w)`, in that order.
    fn challenge(
        input: &CommonInput,
        z: &BigNumber,
        u: &BigNumber,
        w: &BigNumber,
    ) -> Result<BigNumber> {
        let [n, gamma] = input.pk.as_ints();
        challenge::<C>(&[n, gamma, &input.ciphertext, z, u, w])
    }

    fn fields(&self) -> [&BigNumber; ALICE_RANGE_PROOF_PARTS] {
        [&self.z, &self.u, &self.w, &self.s, &self.s1, &self.s2]
    }

    /// Decode a proof from its wire parts, ordered `z, u, w, s, s1, s2`.
    ///
    /// Note: This **does not validate** the decoded proof beyond its shape;
    /// call [`Proof::verify`].
    pub fn from_bytes(parts: &[Vec<u8>]) -> Result<Self> {
        if !non_empty_parts(parts, ALICE_RANGE_PROOF_PARTS) {
            error!(
                "Expected {} non-empty byte parts to construct a range proof, got {}",
                ALICE_RANGE_PROOF_PARTS,
                parts.len()
            );
            return Err(CallerError::DeserializationFailed.into());
        }
        Ok(Self {
            z: BigNumber::from_slice(&parts[0]),
            u: BigNumber::from_slice(&parts[1]),
            w: BigNumber::from_slice(&parts[2]),
            s: BigNumber::from_slice(&parts[3]),
            s1: BigNumber::from_slice(&parts[4]),
            s2: BigNumber::from_slice(&parts[5]),
            curve: PhantomData,
        })
    }

    /// Encode the proof as minimal big-endian parts, ordered
    /// `z, u, w, s, s1, s2`.
    pub fn to_bytes(&self) -> [Vec<u8>; ALICE_RANGE_PROOF_PARTS] {
        self.fields().map(|x| x.to_bytes())
    }

    /// Commitment `z` to the plaintext.
    pub fn z(&self) -> &BigNumber {
        &self.z
    }

    /// Encryption `u` of the mask `alpha`.
    pub fn u(&self) -> &BigNumber {
        &self.u
    }

    /// Commitment `w` to the mask `alpha`.
    pub fn w(&self) -> &BigNumber {
        &self.w
    }

    /// Masked nonce `s`.
    pub fn s(&self) -> &BigNumber {
        &self.s
    }

    /// Masked plaintext `s1`.
    pub fn s1(&self) -> &BigNumber {
        &self.s1
    }

    /// Masked commitment randomness `s2`.
    pub fn s2(&self) -> &BigNumber {
        &self.s2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::TestCurve,
        errors::InternalError,
        p256::P256,
        utils::testing::{init_testing, pedersen_setup, prime_pair},
    };

    // Small moduli keep the tests fast; the proof does not depend on their size.
    const TEST_PRIME_BITS: usize = 512;

    fn random_range_proof<C: CurveTrait, R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> Result<(CommonInput, AliceRangeProof<C>)> {
        let (p, q) = prime_pair(TEST_PRIME_BITS);
        let pk = PaillierPublicKey::new(&p * &q);
        let (n_tilde, h1, h2) = pedersen_setup(rng, TEST_PRIME_BITS);
        let setup_params = PedersenParams::new(n_tilde, h1, h2);

        let m = random_positive_bn(rng, &C::order());
        let r = random_bn_in_z_star(rng, pk.n())?;
        let c = pk.encrypt_with_nonce(&m, &r);

        let input = CommonInput::new(&pk, &setup_params, &c);
        let proof = AliceRangeProof::<C>::prove(&input, &ProverSecret::new(&m, &r), rng)?;
        Ok((input, proof))
    }

    fn one() -> BigNumber {
        BigNumber::one()
    }

    #[test]
    fn range_proof_verifies() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        assert!(proof.validate_basic());
        assert!(proof.verify(&input));
        // verification is repeatable
        assert!(proof.verify(&input));
        Ok(())
    }

    #[test]
    fn range_proof_verifies_on_p256() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<P256, _>(&mut rng)?;
        assert!(proof.verify(&input));
        Ok(())
    }

    #[test]
    fn proofs_are_randomized() -> Result<()> {
        let mut rng = init_testing();
        let (p, q) = prime_pair(TEST_PRIME_BITS);
        let pk = PaillierPublicKey::new(&p * &q);
        let (n_tilde, h1, h2) = pedersen_setup(&mut rng, TEST_PRIME_BITS);
        let setup_params = PedersenParams::new(n_tilde, h1, h2);
        let m = BigNumber::from(42u64);
        let r = random_bn_in_z_star(&mut rng, pk.n())?;
        let input = CommonInput::new(&pk, &setup_params, &pk.encrypt_with_nonce(&m, &r));
        let secret = ProverSecret::new(&m, &r);

        let first = AliceRangeProof::<TestCurve>::prove(&input, &secret, &mut rng)?;
        let second = AliceRangeProof::<TestCurve>::prove(&input, &secret, &mut rng)?;
        assert_ne!(first, second);
        assert!(first.verify(&input));
        assert!(second.verify(&input));
        Ok(())
    }

    #[test]
    fn mutated_fields_are_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;

        for i in 0..7 {
            let mut bad = proof.clone();
            match i {
                0 => bad.z = &bad.z + &one(),
                1 => bad.u = &bad.u + &one(),
                2 => bad.w = &bad.w + &one(),
                3 => bad.s = &bad.s + &one(),
                4 => bad.s1 = &bad.s1 + &one(),
                5 => bad.s2 = &bad.s2 + &one(),
                _ => std::mem::swap(&mut bad.s1, &mut bad.s2),
            }
            assert!(!bad.verify(&input), "mutation {i} was accepted");
        }
        Ok(())
    }

    #[test]
    fn s1_above_q_cubed_is_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (input, mut proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let q = TestCurve::order();
        proof.s1 = &(&(&q * &q) * &q) + &one();
        assert!(!proof.verify(&input));
        Ok(())
    }

    #[test]
    fn out_of_range_plaintext_is_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (p, q) = prime_pair(TEST_PRIME_BITS);
        let pk = PaillierPublicKey::new(&p * &q);
        let (n_tilde, h1, h2) = pedersen_setup(&mut rng, TEST_PRIME_BITS);
        let setup_params = PedersenParams::new(n_tilde, h1, h2);

        // m ≈ q^4 makes e·m overshoot q^3 for any non-trivial challenge
        let order = TestCurve::order();
        let m = &(&(&order * &order) * &order) * &order;
        let r = random_bn_in_z_star(&mut rng, pk.n())?;
        let input = CommonInput::new(&pk, &setup_params, &pk.encrypt_with_nonce(&m, &r));
        let proof =
            AliceRangeProof::<TestCurve>::prove(&input, &ProverSecret::new(&m, &r), &mut rng)?;
        assert!(!proof.verify(&input));
        Ok(())
    }

    #[test]
    fn wrong_statement_is_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;

        let other_ciphertext = CommonInput::new(
            &input.pk,
            &input.setup_params,
            &input.pk.encrypt_with_nonce(&BigNumber::from(7u64), &BigNumber::from(3u64)),
        );
        assert!(!proof.verify(&other_ciphertext));

        let (n_tilde, h1, h2) = pedersen_setup(&mut rng, TEST_PRIME_BITS);
        let other_setup = CommonInput::new(
            &input.pk,
            &PedersenParams::new(n_tilde, h1, h2),
            &input.ciphertext,
        );
        assert!(!proof.verify(&other_setup));
        Ok(())
    }

    #[test]
    fn even_moduli_are_rejected_without_panicking() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;

        let even_n = CommonInput::new(
            &PaillierPublicKey::new(BigNumber::from(1000u64)),
            &input.setup_params,
            &BigNumber::from(3u64),
        );
        assert!(!proof.verify(&even_n));

        let even_n_tilde = CommonInput::new(
            &input.pk,
            &PedersenParams::new(
                input.setup_params.modulus() + &one(),
                input.setup_params.s().clone(),
                input.setup_params.t().clone(),
            ),
            &input.ciphertext,
        );
        assert!(!proof.verify(&even_n_tilde));

        let secret = ProverSecret::new(&BigNumber::from(5u64), &BigNumber::from(7u64));
        for bad_input in [&even_n, &even_n_tilde] {
            assert_eq!(
                AliceRangeProof::<TestCurve>::prove(bad_input, &secret, &mut rng).unwrap_err(),
                InternalError::from(CallerError::BadInput)
            );
        }
        Ok(())
    }

    #[test]
    fn decoded_key_with_inconsistent_square_is_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let n = input.pk.n().clone();
        let gamma = input.pk.gamma().clone();

        let honest: PaillierPublicKey =
            bincode::deserialize(&bincode::serialize(&(&n, &(&n * &n), &gamma)).unwrap()).unwrap();
        assert_eq!(honest, input.pk);

        let forged_square = &(&n * &n) * &BigNumber::from(3u64);
        let forged: PaillierPublicKey =
            bincode::deserialize(&bincode::serialize(&(&n, &forged_square, &gamma)).unwrap())
                .unwrap();
        let forged_input = CommonInput::new(&forged, &input.setup_params, &input.ciphertext);
        assert!(!proof.verify(&forged_input));
        Ok(())
    }

    #[test]
    fn degenerate_inputs_are_rejected_without_panicking() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let minus_one = BigNumber::zero() - one();

        let zero_n_tilde = CommonInput::new(
            &input.pk,
            &PedersenParams::new(
                BigNumber::zero(),
                input.setup_params.s().clone(),
                input.setup_params.t().clone(),
            ),
            &input.ciphertext,
        );
        assert!(!proof.verify(&zero_n_tilde));

        let zero_n = CommonInput::new(
            &PaillierPublicKey::new(BigNumber::zero()),
            &input.setup_params,
            &input.ciphertext,
        );
        assert!(!proof.verify(&zero_n));

        let negative_ciphertext = CommonInput::new(&input.pk, &input.setup_params, &minus_one);
        assert!(!proof.verify(&negative_ciphertext));

        let mut negative_field = proof.clone();
        negative_field.s = minus_one;
        assert!(!negative_field.validate_basic());
        assert!(!negative_field.verify(&input));
        Ok(())
    }

    #[test]
    fn malformed_input_cannot_be_proven() {
        let mut rng = init_testing();
        let pk = PaillierPublicKey::new(BigNumber::zero());
        let setup_params =
            PedersenParams::new(BigNumber::from(15u64), BigNumber::from(4u64), one());
        let input = CommonInput::new(&pk, &setup_params, &one());
        let result = AliceRangeProof::<TestCurve>::prove(
            &input,
            &ProverSecret::new(&one(), &one()),
            &mut rng,
        );
        assert_eq!(result.unwrap_err(), InternalError::from(CallerError::BadInput));
    }

    #[test]
    fn byte_parts_round_trip() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let parts = proof.to_bytes();
        let decoded = AliceRangeProof::<TestCurve>::from_bytes(&parts)?;
        assert_eq!(decoded, proof);
        assert_eq!(decoded.to_bytes(), parts);
        assert!(decoded.verify(&input));
        Ok(())
    }

    #[test]
    fn malformed_byte_parts_are_rejected() -> Result<()> {
        let mut rng = init_testing();
        let (_, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let parts = proof.to_bytes().to_vec();

        let short = &parts[..ALICE_RANGE_PROOF_PARTS - 1];
        assert_eq!(
            AliceRangeProof::<TestCurve>::from_bytes(short).unwrap_err(),
            InternalError::from(CallerError::DeserializationFailed)
        );

        let mut holey = parts.clone();
        holey[2] = vec![];
        assert!(AliceRangeProof::<TestCurve>::from_bytes(&holey).is_err());
        Ok(())
    }

    #[test]
    fn serde_round_trip() -> Result<()> {
        let mut rng = init_testing();
        let (input, proof) = random_range_proof::<TestCurve, _>(&mut rng)?;
        let bytes = bincode::serialize(&proof).unwrap();
        let decoded: AliceRangeProof<TestCurve> = bincode::deserialize(&bytes).unwrap();
        assert!(decoded.verify(&input));
        Ok(())
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = ProverSecret::new(&BigNumber::from(1234u64), &BigNumber::from(5678u64));
        let printed = format!("{secret:?}");
        assert!(!printed.contains("1234"));
        assert!(!printed.contains("5678"));
    }
}
