// Copyright (c) 2024-2026 Botho Foundation

//! L2S signing.
//!
//! Signing runs one shared Fiat–Shamir transcript and, per signer, a
//! private copy of the proof layer that is folded in half every
//! round. Each round emits a response and a fresh commitment under a
//! newly sampled nonce; the final round proves the accumulated
//! challenge product against the response-weighted sum.

use alloc::vec::Vec;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::Identity,
};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{
    error::{Error, Result},
    hashes::{hash_to_point, hash_to_scalar, ScalarTranscript},
    ring_signature::{
        expand_ring, linking_challenge, L2sSignature, L2sSignatureElement,
        MAX_TRANSCRIPT_DEPTH,
    },
};

/// Per-signer secret state, held only while signing.
///
/// Everything in here can undo the signer's anonymity, so the whole
/// struct is wiped on every exit path.
#[derive(Zeroize, ZeroizeOnDrop)]
struct SignerState {
    /// Blinding factor f applied to the anchor.
    blind: Scalar,
    /// Blinded opening k0 = f·b⁻¹ of the layer slot.
    opening: Scalar,
    /// Current round nonce q, resampled every round.
    nonce: Scalar,
    /// Accumulated product of the local challenges.
    challenge_product: Scalar,
    /// Witness x = a/k0, fixed in the final round.
    witness: Scalar,
    /// Live prefix length of `layer`.
    layer_len: usize,
    /// Index of the signer's slot in the live prefix.
    even_idx: usize,
    /// Index of the paired slot (last bit flipped).
    odd_idx: usize,
    /// Private working copy of the proof layer, folded in place.
    layer: Vec<RistrettoPoint>,
}

/// Divide, asserting the divisor is usable.
///
/// A zero divisor here means a broken RNG or corrupted state, not a
/// rejectable input.
fn div(numerator: &Scalar, denominator: &Scalar) -> Scalar {
    debug_assert_ne!(denominator, &Scalar::ZERO, "scalar division by zero");
    numerator * denominator.invert()
}

/// Create an L2S signature.
///
/// # Arguments
/// * `message` - Message digest to sign, reduced to a scalar by the
///   caller.
/// * `ring` - The public ring; its length must be a power of two.
/// * `secret_keys` - One secret scalar per signer, each nonzero.
/// * `signer_indices` - Position of each signer's public key in the
///   ring, i.e. `secret_keys[i] * G == ring[signer_indices[i]]`.
///   Positions may repeat; repeated secrets produce identical key
///   images (see [`KeyImage`](crate::KeyImage)).
/// * `rng` - Cryptographic RNG for blinds and per-round nonces.
pub fn sign<RNG: CryptoRngCore>(
    message: &Scalar,
    ring: &[RistrettoPoint],
    secret_keys: &[Scalar],
    signer_indices: &[usize],
    rng: &mut RNG,
) -> Result<L2sSignature> {
    let num_signers = secret_keys.len();
    let ring_size = ring.len();
    let layer_size = 2 * ring_size;

    if signer_indices.len() != num_signers {
        return Err(Error::SignerCountMismatch(num_signers, signer_indices.len()));
    }
    if !layer_size.is_power_of_two() || layer_size < 2 {
        return Err(Error::RingSizeNotPowerOfTwo);
    }
    if num_signers == 0 {
        return Err(Error::NoSigners);
    }
    if num_signers > ring_size {
        return Err(Error::TooManySigners(num_signers, ring_size));
    }

    // log2 of the layer size; the power-of-two check above makes
    // trailing_zeros exact.
    let depth = layer_size.trailing_zeros() as usize;
    if depth >= MAX_TRANSCRIPT_DEPTH {
        return Err(Error::DepthLimitExceeded(depth, MAX_TRANSCRIPT_DEPTH));
    }

    for &index in signer_indices {
        if index >= ring_size {
            return Err(Error::IndexOutOfBounds(index, ring_size));
        }
    }
    for secret in secret_keys {
        if secret == &Scalar::ZERO {
            return Err(Error::ZeroSecretKey);
        }
    }

    let generator = RISTRETTO_BASEPOINT_POINT;

    let secret_inverses: Zeroizing<Vec<Scalar>> =
        Zeroizing::new(secret_keys.iter().map(Scalar::invert).collect());

    // Key images I = b⁻¹·Hp(b·G), then the linking challenge over
    // message, ring, and images.
    let key_images: Vec<RistrettoPoint> = secret_keys
        .iter()
        .zip(secret_inverses.iter())
        .map(|(secret, inverse)| inverse * hash_to_point(&(secret * generator)))
        .collect();

    let z = linking_challenge(message, ring, &key_images);

    // Anchors A = G + z·I and the interleaved proof layer.
    let anchors: Vec<RistrettoPoint> =
        key_images.iter().map(|image| generator + z * image).collect();
    let layer = expand_ring(&z, ring, &anchors);

    // The only predicate tying a secret to its claimed slot.
    for (i, &index) in signer_indices.iter().enumerate() {
        if secret_inverses[i] * layer[2 * index] != anchors[i] {
            return Err(Error::SignerBindingViolated);
        }
    }

    // Round 0: commit to the anchor openings.
    let mut transcript = ScalarTranscript::new();
    transcript.append_scalar(&hash_to_scalar(&z));
    transcript.append_points(&layer);

    let mut states: Vec<SignerState> = Vec::with_capacity(num_signers);
    let mut elements: Vec<L2sSignatureElement> = Vec::with_capacity(num_signers);
    for (i, &index) in signer_indices.iter().enumerate() {
        let blind = Scalar::random(rng);
        let nonce = Scalar::random(rng);
        let anchor = anchors[i];
        let blinded_anchor = blind * anchor;
        let anchor_commitment = nonce * anchor;

        transcript.append_point(&anchor);
        transcript.append_point(&anchor_commitment);
        transcript.append_point(&blinded_anchor);

        states.push(SignerState {
            blind,
            opening: blind * secret_inverses[i],
            nonce,
            challenge_product: Scalar::ONE,
            witness: Scalar::ZERO,
            layer_len: layer_size,
            even_idx: 2 * index,
            odd_idx: 2 * index + 1,
            layer: layer.clone(),
        });
        elements.push(L2sSignatureElement {
            anchor,
            anchor_commitment,
            anchor_response: Scalar::ZERO,
            blinded_anchor,
            responses: Vec::with_capacity(depth),
            commitments: Vec::with_capacity(depth),
            final_commitment: RistrettoPoint::identity(),
            final_response: Scalar::ZERO,
        });
    }
    let c0 = transcript.challenge();

    // Anchor responses and the first round commitments.
    transcript.append_scalar(&c0);
    for (state, element) in states.iter_mut().zip(elements.iter_mut()) {
        element.anchor_response = state.nonce - state.blind * c0;
        state.nonce = Scalar::random(rng);
        let commitment = div(&state.opening, &state.nonce) * state.layer[state.odd_idx];
        element.commitments.push(commitment);

        transcript.append_scalar(&element.anchor_response);
        transcript.append_point(&commitment);
    }
    let mut ci1 = transcript.challenge();
    let mut ci3 = hash_to_scalar(&ci1);

    // Kept for the self-check below; the verifier rebuilds the same
    // vectors from the emitted record.
    #[cfg(debug_assertions)]
    let mut c1_array: Vec<Scalar> = Vec::with_capacity(depth);
    #[cfg(debug_assertions)]
    let mut c3_array: Vec<Scalar> = Vec::with_capacity(depth.saturating_sub(1));

    // Folding rounds: respond under the local challenge, halve the
    // layer, commit to the new paired slot under a fresh nonce.
    for _round in 0..depth - 1 {
        #[cfg(debug_assertions)]
        {
            c1_array.push(ci1);
            c3_array.push(ci3);
        }

        // Slot parity selects the live challenge: even slots fold
        // with weight 1, odd slots with ci1 or ci3.
        let lookup = [Scalar::ONE, ci1, Scalar::ONE, ci3];

        transcript.append_scalar(&ci1);
        for (state, element) in states.iter_mut().zip(elements.iter_mut()) {
            let e_local = lookup[state.even_idx % 4];
            let g_local = lookup[state.odd_idx % 4];

            let response = div(&(state.nonce * g_local), &e_local);
            element.responses.push(response);
            state.challenge_product *= e_local;

            debug_assert!(state.layer_len.is_power_of_two());
            state.layer_len /= 2;
            let e_inv = e_local.invert();
            for j in 0..state.layer_len {
                state.layer[j] = (state.layer[2 * j]
                    + lookup[(2 * j + 1) % 4] * state.layer[2 * j + 1])
                    * e_inv;
            }

            state.even_idx /= 2;
            state.odd_idx = state.even_idx ^ 1;
            state.nonce = Scalar::random(rng);
            let commitment =
                div(&state.opening, &state.nonce) * state.layer[state.odd_idx];
            element.commitments.push(commitment);

            transcript.append_scalar(&response);
            transcript.append_point(&commitment);
        }
        ci1 = transcript.challenge();
        ci3 = hash_to_scalar(&ci1);
    }

    #[cfg(debug_assertions)]
    c1_array.push(ci1);

    // Final round: the layer is down to one pair; fix the witness and
    // commit to the response-weighted sum.
    transcript.append_scalar(&ci1);
    for (i, (state, element)) in states.iter_mut().zip(elements.iter_mut()).enumerate() {
        debug_assert!(
            state.even_idx <= 1 && state.odd_idx == state.even_idx ^ 1,
            "layer indices out of final-round range"
        );
        let (e_local, g_local) = if state.even_idx == 0 {
            (Scalar::ONE, ci1)
        } else {
            (ci1, Scalar::ONE)
        };

        let response = div(&(state.nonce * g_local), &e_local);
        element.responses.push(response);
        state.challenge_product *= e_local;
        state.witness = div(&state.challenge_product, &state.opening);
        state.nonce = Scalar::random(rng);

        debug_assert_eq!(
            state.opening * layer[2 * signer_indices[i]],
            element.blinded_anchor,
            "blinded anchor does not open the signer slot"
        );

        let mut weighted_sum = element.blinded_anchor;
        for (resp, comm) in element.responses.iter().zip(element.commitments.iter()) {
            weighted_sum += resp * comm;
        }
        element.final_commitment = state.nonce * weighted_sum;

        transcript.append_scalar(&response);
        transcript.append_point(&element.final_commitment);
    }
    let c = transcript.challenge();

    for (state, element) in states.iter().zip(elements.iter_mut()) {
        element.final_response = state.nonce - state.witness * c;
    }

    // Self-check: the emitted record must satisfy the verifier's
    // identities. A violation is an implementation bug, so it only
    // trips debug builds.
    #[cfg(debug_assertions)]
    {
        let folded = crate::rsum::rsum(depth, &layer, &c1_array, &c3_array)
            .expect("self-check rsum shapes are well-formed");
        for (state, element) in states.iter().zip(elements.iter()) {
            let mut weighted_sum = element.blinded_anchor;
            for (resp, comm) in element.responses.iter().zip(element.commitments.iter())
            {
                weighted_sum += resp * comm;
            }
            debug_assert_eq!(element.final_commitment, state.nonce * weighted_sum);
            debug_assert_eq!(folded, state.witness * weighted_sum);
            debug_assert_eq!(
                element.final_response * weighted_sum + c * folded,
                element.final_commitment
            );
        }
    }

    drop(states);

    Ok(L2sSignature {
        linking_challenge: z,
        elements,
    })
}
