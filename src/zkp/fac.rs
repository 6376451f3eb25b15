// Copyright (c) Facebook, Inc. and its affiliates.
// Modifications Copyright (c) 2022-2023 Bolt Labs Holdings, Inc
//
// This source code is licensed under both the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree and the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree.

//! Implements a zero-knowledge proof that the modulus `N0` factors as `p·q`
//! with both factors of bounded size, without revealing `p` or `q`.
//!
//! The proof is defined in Figure 28 of CGGMP[^cite], and uses a standard
//! Fiat-Shamir transformation to make the proof non-interactive. All
//! sampling ranges are non-negative and scaled by the range parameter
//! `l = 2^15`.
//!
//! [^cite]: Ran Canetti, Rosario Gennaro, Steven Goldfeder, Nikolaos Makriyannis, and Udi Peled.
//! UC Non-Interactive, Proactive, Threshold ECDSA with Identifiable Aborts.
//! [EPrint archive, 2021](https://eprint.iacr.org/2021/060.pdf).

use crate::{
    curve::CurveTrait,
    errors::{CallerError, Result},
    parameters::{range_parameter, FAC_PROOF_PARTS},
    pedersen::PedersenParams,
    utils::{
        is_coprime, is_in_interval, non_empty_parts, random_bn_in_z_star, random_positive_bn, sqrt,
    },
    zkp::{challenge::challenge, Proof},
};
use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, marker::PhantomData};
use tracing::{debug, error};
use zeroize::{ZeroizeOnDrop, Zeroizing};

/// Proof that the modulus `N0` is the product of two factors within `l` bits
/// of `sqrt(N0)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(bound = "")]
pub struct FacProof<C: CurveTrait> {
    /// Commitment to the factor p using randomness mu.
    commitment_p: BigNumber,
    /// Commitment to the factor q using randomness nu.
    commitment_q: BigNumber,
    /// Commitment to randomness alpha and x.
    commitment_alpha: BigNumber,
    /// Commitment to randomness beta and y.
    commitment_beta: BigNumber,
    /// Commitment to alpha under base `commitment_q`, with randomness r.
    commitment_combine_q_r: BigNumber,
    /// Commitment randomness tying `N0` to `commitment_q`.
    sigma: BigNumber,
    /// Mask p with randomness alpha.
    mask_alpha_p: BigNumber,
    /// Mask q with randomness beta.
    mask_beta_q: BigNumber,
    /// Mask mu with randomness x.
    masked_mu: BigNumber,
    /// Mask nu with randomness y.
    masked_nu: BigNumber,
    v: BigNumber,
    #[serde(skip)]
    curve: PhantomData<C>,
}

/// Common input and setup parameters known to both the prover and verifier.
#[derive(Clone, Debug, Serialize)]
pub struct CommonInput {
    setup_params: PedersenParams,
    modulus: BigNumber,
}

impl CommonInput {
    /// Generate public input for proving and verifying [`FacProof`] about
    /// `N0`.
    ///
    /// Note: `setup_params` (`NCap`, `s`, `t`) **must be** provided by the
    /// verifier!
    pub fn new(setup_params: &PedersenParams, N0: &BigNumber) -> Self {
        Self {
            setup_params: setup_params.clone(),
            modulus: N0.clone(),
        }
    }

    fn is_well_formed(&self) -> bool {
        self.modulus > BigNumber::zero() && self.setup_params.is_well_formed()
    }
}

/// The prover's secret knowledge: the factors `p` and `q` of the modulus `N0`
/// where `N0 = pq`.
#[derive(ZeroizeOnDrop)]
pub struct ProverSecret {
    p: BigNumber,
    q: BigNumber,
}

impl Debug for ProverSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("fac::ProverSecret")
            .field("p", &"[redacted]")
            .field("q", &"[redacted]")
            .finish()
    }
}

impl ProverSecret {
    /// Collect the factors of `N0`.
    pub fn new(p: &BigNumber, q: &BigNumber) -> Self {
        Self {
            p: p.clone(),
            q: q.clone(),
        }
    }
}

/// Sampling and acceptance bounds, derived from `q`, `N0` and `NCap`.
struct Bounds {
    /// `l·q·sqrt(N0)`
    le_sqrt_n0: BigNumber,
    /// `l·NCap`
    l_n_cap: BigNumber,
    /// `l·NCap·N0`
    l_n0_n_cap: BigNumber,
    /// `l·NCap·N0·q`
    le_n0_n_cap: BigNumber,
    /// `l·NCap·q`
    le_n_cap: BigNumber,
}

impl Bounds {
    fn new<C: CurveTrait>(input: &CommonInput) -> Self {
        let q = C::order();
        let l = range_parameter();
        let n_cap = input.setup_params.modulus();

        let le_sqrt_n0 = &(&l * &q) * &sqrt(&input.modulus);
        let l_n_cap = &l * n_cap;
        let l_n0_n_cap = &l_n_cap * &input.modulus;
        let le_n0_n_cap = &l_n0_n_cap * &q;
        let le_n_cap = &l_n_cap * &q;
        Self {
            le_sqrt_n0,
            l_n_cap,
            l_n0_n_cap,
            le_n0_n_cap,
            le_n_cap,
        }
    }
}

impl<C: CurveTrait> Proof for FacProof<C> {
    type CommonInput = CommonInput;
    type ProverSecret = ProverSecret;

    fn prove<R: RngCore + CryptoRng>(
        input: &Self::CommonInput,
        secret: &Self::ProverSecret,
        rng: &mut R,
    ) -> Result<Self> {
        if !input.is_well_formed() {
            error!("Cannot prove factorization under a malformed public input");
            return Err(CallerError::BadInput.into());
        }
        if secret.p <= BigNumber::zero() || secret.q <= BigNumber::zero() {
            error!("Factors of N0 must be positive");
            return Err(CallerError::BadInput.into());
        }

        let bounds = Bounds::new::<C>(input);
        let scheme = &input.setup_params;

        let alpha = Zeroizing::new(random_positive_bn(rng, &bounds.le_sqrt_n0));
        let beta = Zeroizing::new(random_positive_bn(rng, &bounds.le_sqrt_n0));
        let mu = Zeroizing::new(random_positive_bn(rng, &bounds.l_n_cap));
        let nu = Zeroizing::new(random_positive_bn(rng, &bounds.l_n_cap));
        let sigma = random_positive_bn(rng, &bounds.l_n0_n_cap);
        let r = Zeroizing::new(random_bn_in_z_star(rng, &bounds.le_n0_n_cap)?);
        let x = Zeroizing::new(random_positive_bn(rng, &bounds.le_n_cap));
        let y = Zeroizing::new(random_positive_bn(rng, &bounds.le_n_cap));

        let P = scheme.commit(&secret.p, &mu);
        let Q = scheme.commit(&secret.q, &nu);
        let A = scheme.commit(&alpha, &x);
        let B = scheme.commit(&beta, &y);
        let T = scheme.commit_with_base(&Q, &alpha, &r);

        let e = Self::challenge(input, &P, &Q, &A, &B, &T, &sigma)?;

        let z1 = &*alpha + &e * &secret.p;
        let z2 = &*beta + &e * &secret.q;
        let w1 = &*x + &e * &*mu;
        let w2 = &*y + &e * &*nu;
        let sigma_hat = Zeroizing::new(&sigma - &(&*nu * &secret.p));
        let v = &*r + &e * &*sigma_hat;

        Ok(Self {
            commitment_p: P,
            commitment_q: Q,
            commitment_alpha: A,
            commitment_beta: B,
            commitment_combine_q_r: T,
            sigma,
            mask_alpha_p: z1,
            mask_beta_q: z2,
            masked_mu: w1,
            masked_nu: w2,
            v,
            curve: PhantomData,
        })
    }

    fn validate_basic(&self) -> bool {
        self.fields().iter().all(|x| *x >= &BigNumber::zero())
    }

    fn verify(&self, input: &Self::CommonInput) -> bool {
        if !self.validate_basic() || !input.is_well_formed() {
            debug!("Factorization proof or its public input is malformed");
            return false;
        }

        let bounds = Bounds::new::<C>(input);
        let le_n0_n_cap_2 = bounds.le_n0_n_cap.clone() << 1;
        let le_n_cap_2 = bounds.le_n_cap.clone() << 1;
        let scheme = &input.setup_params;
        let n_cap = scheme.modulus();

        let commitments = [
            ("P", &self.commitment_p),
            ("Q", &self.commitment_q),
            ("A", &self.commitment_alpha),
            ("B", &self.commitment_beta),
            ("T", &self.commitment_combine_q_r),
        ];
        for (name, commitment) in commitments {
            if !is_in_interval(commitment, n_cap) {
                debug!("Commitment {name} is outside [0, NCap)");
                return false;
            }
        }
        if !is_in_interval(&self.sigma, &bounds.l_n0_n_cap) {
            debug!("sigma is outside [0, l·N0·NCap)");
            return false;
        }
        for (name, commitment) in commitments {
            if !is_coprime(commitment, n_cap) {
                debug!("Commitment {name} shares a factor with NCap");
                return false;
            }
        }
        let ranges = [
            ("w1", &self.masked_mu, &le_n_cap_2),
            ("w2", &self.masked_nu, &le_n_cap_2),
            ("v", &self.v, &le_n0_n_cap_2),
            ("z1", &self.mask_alpha_p, &bounds.le_sqrt_n0),
            ("z2", &self.mask_beta_q, &bounds.le_sqrt_n0),
        ];
        for (name, value, bound) in ranges {
            if !is_in_interval(value, bound) {
                debug!("Response {name} is out of range");
                return false;
            }
        }

        let e = match Self::challenge(
            input,
            &self.commitment_p,
            &self.commitment_q,
            &self.commitment_alpha,
            &self.commitment_beta,
            &self.commitment_combine_q_r,
            &self.sigma,
        ) {
            Ok(e) => e,
            Err(_) => return false,
        };

        let eq_check_1 = {
            let lhs = scheme.commit(&self.mask_alpha_p, &self.masked_mu);
            let rhs = scheme.combine(&self.commitment_alpha, &self.commitment_p, &e);
            lhs == rhs
        };
        if !eq_check_1 {
            debug!("eq_check_1 failed");
            return false;
        }

        let eq_check_2 = {
            let lhs = scheme.commit(&self.mask_beta_q, &self.masked_nu);
            let rhs = scheme.combine(&self.commitment_beta, &self.commitment_q, &e);
            lhs == rhs
        };
        if !eq_check_2 {
            debug!("eq_check_2 failed");
            return false;
        }

        let eq_check_3 = {
            let R = scheme.commit(&input.modulus, &self.sigma);
            let lhs = scheme.commit_with_base(&self.commitment_q, &self.mask_alpha_p, &self.v);
            let rhs = scheme.combine(&self.commitment_combine_q_r, &R, &e);
            lhs == rhs
        };
        if !eq_check_3 {
            debug!("eq_check_3 failed");
            return false;
        }

        true
    }
}

impl<C: CurveTrait> FacProof<C> {
    /// The challenge over `(N0, NCap, s, t, P, Q, A, B, T, sigma)`, in that
    /// order.
    #[allow(clippy::too_many_arguments)]
    fn challenge(
        input: &CommonInput,
        P: &BigNumber,
        Q: &BigNumber,
        A: &BigNumber,
        B: &BigNumber,
        T: &BigNumber,
        sigma: &BigNumber,
    ) -> Result<BigNumber> {
        let scheme = &input.setup_params;
        challenge::<C>(&[
            &input.modulus,
            scheme.modulus(),
            scheme.s(),
            scheme.t(),
            P,
            Q,
            A,
            B,
            T,
            sigma,
        ])
    }

    fn fields(&self) -> [&BigNumber; FAC_PROOF_PARTS] {
        [
            &self.commitment_p,
            &self.commitment_q,
            &self.commitment_alpha,
            &self.commitment_beta,
            &self.commitment_combine_q_r,
            &self.sigma,
            &self.mask_alpha_p,
            &self.mask_beta_q,
            &self.masked_mu,
            &self.masked_nu,
            &self.v,
        ]
    }

    /// Decode a proof from its wire parts, ordered
    /// `P, Q, A, B, T, sigma, z1, z2, w1, w2, v`.
    ///
    /// Note: This **does not validate** the decoded proof beyond its shape;
    /// call [`Proof::verify`].
    pub fn from_bytes(parts: &[Vec<u8>]) -> Result<Self> {
        if !non_empty_parts(parts, FAC_PROOF_PARTS) {
            error!(
                "Expected {} non-empty byte parts to construct a factorization proof, got {}",
                FAC_PROOF_PARTS,
                parts.len()
            );
            return Err(CallerError::DeserializationFailed.into());
        }
        let part = |i: usize| BigNumber::from_slice(&parts[i]);
        Ok(Self {
            commitment_p: part(0),
            commitment_q: part(1),
            commitment_alpha: part(2),
            commitment_beta: part(3),
            commitment_combine_q_r: part(4),
            sigma: part(5),
            mask_alpha_p: part(6),
            mask_beta_q: part(7),
            masked_mu: part(8),
            masked_nu: part(9),
            v: part(10),
            curve: PhantomData,
        })
    }

    /// Encode the proof as minimal big-endian parts, ordered
    /// `P, Q, A, B, T, sigma, z1, z2, w1, w2, v`.
    pub fn to_bytes(&self) -> [Vec<u8>; FAC_PROOF_PARTS] {
        self.fields().map(|x| x.to_bytes())
    }

    /// Commitment `P` to the first factor.
    pub fn p(&self) -> &BigNumber {
        &self.commitment_p
    }

    /// Commitment `Q` to the second factor.
    pub fn q(&self) -> &BigNumber {
        &self.commitment_q
    }

    /// Commitment `A` to the mask `alpha`.
    pub fn a(&self) -> &BigNumber {
        &self.commitment_alpha
    }

    /// Commitment `B` to the mask `beta`.
    pub fn b(&self) -> &BigNumber {
        &self.commitment_beta
    }

    /// Commitment `T` to `alpha` under base `Q`.
    pub fn t(&self) -> &BigNumber {
        &self.commitment_combine_q_r
    }

    /// Commitment randomness `sigma`.
    pub fn sigma(&self) -> &BigNumber {
        &self.sigma
    }

    /// Response `z1 = e·p + alpha`.
    pub fn z1(&self) -> &BigNumber {
        &self.mask_alpha_p
    }

    /// Response `z2 = e·q + beta`.
    pub fn z2(&self) -> &BigNumber {
        &self.mask_beta_q
    }

    /// Response `w1 = e·mu + x`.
    pub fn w1(&self) -> &BigNumber {
        &self.masked_mu
    }

    /// Response `w2 = e·nu + y`.
    pub fn w2(&self) -> &BigNumber {
        &self.masked_nu
    }

    /// Response `v = e·(sigma - nu·p) + r`.
    pub fn v(&self) -> &BigNumber {
        &self.v
    }
}
