// Copyright (c) 2024-2026 Botho Foundation

//! L2S verification.
//!
//! Verification recovers the key images from the anchors, replays the
//! full challenge transcript from the record, and checks the
//! round-zero opening plus one folded identity per signer against the
//! recomputed layer aggregate.

use alloc::vec::Vec;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::RistrettoPoint,
    scalar::Scalar,
    traits::Identity,
};

use crate::{
    error::{Error, Result},
    hashes::{hash_to_scalar, ScalarTranscript},
    key_image::KeyImage,
    ring_signature::{expand_ring, linking_challenge, L2sSignature, MAX_TRANSCRIPT_DEPTH},
    rsum::rsum,
};

/// Verify an L2S signature.
///
/// On success returns the recovered key images, one per signer, in
/// element order — the caller's hook for linkability checks. Any
/// failure aborts with the distinguishing error and yields nothing.
///
/// # Arguments
/// * `message` - Message digest that was signed.
/// * `ring` - The public ring the signature claims membership in.
/// * `signature` - The signature to verify.
pub fn verify(
    message: &Scalar,
    ring: &[RistrettoPoint],
    signature: &L2sSignature,
) -> Result<Vec<KeyImage>> {
    let num_signers = signature.elements.len();
    if num_signers == 0 {
        return Err(Error::NoSigners);
    }

    let depth = signature.elements[0].responses.len();
    if depth == 0 {
        return Err(Error::ZeroDepth);
    }
    if depth >= MAX_TRANSCRIPT_DEPTH {
        return Err(Error::DepthLimitExceeded(depth, MAX_TRANSCRIPT_DEPTH));
    }
    let layer_size = 1usize << depth;
    if ring.len() != layer_size / 2 {
        return Err(Error::LengthMismatch(ring.len(), layer_size / 2));
    }
    for element in &signature.elements {
        if element.responses.len() != depth {
            return Err(Error::LengthMismatch(element.responses.len(), depth));
        }
        if element.commitments.len() != depth {
            return Err(Error::LengthMismatch(element.commitments.len(), depth));
        }
    }

    let generator = RISTRETTO_BASEPOINT_POINT;
    let z = &signature.linking_challenge;

    // A genuine linking challenge is a hash and is nonzero; a zero
    // value is a forgery and must not reach the inversion below.
    if z == &Scalar::ZERO {
        return Err(Error::LinkingChallengeMismatch);
    }

    // Recover the key images from the anchors: I = (Z0 − G)/z, then
    // require the linking challenge to rebind.
    let z_inverse = z.invert();
    let key_images: Vec<RistrettoPoint> = signature
        .elements
        .iter()
        .map(|element| z_inverse * (element.anchor - generator))
        .collect();

    if linking_challenge(message, ring, &key_images) != *z {
        return Err(Error::LinkingChallengeMismatch);
    }

    // Rebuild the proof layer from the ring and the anchors.
    let anchors: Vec<RistrettoPoint> =
        signature.elements.iter().map(|element| element.anchor).collect();
    let layer = expand_ring(z, ring, &anchors);

    // Replay the transcript: round zero first.
    let mut transcript = ScalarTranscript::new();
    transcript.append_scalar(&hash_to_scalar(z));
    transcript.append_points(&layer);
    for element in &signature.elements {
        transcript.append_point(&element.anchor);
        transcript.append_point(&element.anchor_commitment);
        transcript.append_point(&element.blinded_anchor);
    }
    let c0 = transcript.challenge();

    // Round-zero openings: t0·Z0 + c0·Z == T0.
    for element in &signature.elements {
        if element.anchor_response * element.anchor + c0 * element.blinded_anchor
            != element.anchor_commitment
        {
            return Err(Error::RoundZeroCheckFailed);
        }
    }

    // Replay the folding rounds to rebuild both challenge vectors.
    let mut c1_array: Vec<Scalar> = Vec::with_capacity(depth);
    let mut c3_array: Vec<Scalar> = Vec::with_capacity(depth - 1);

    transcript.append_scalar(&c0);
    for element in &signature.elements {
        transcript.append_scalar(&element.anchor_response);
        transcript.append_point(&element.commitments[0]);
    }
    let mut ci1 = transcript.challenge();
    c1_array.push(ci1);
    if depth > 1 {
        c3_array.push(hash_to_scalar(&ci1));
    }

    for round in 1..depth {
        transcript.append_scalar(&ci1);
        for element in &signature.elements {
            transcript.append_scalar(&element.responses[round - 1]);
            transcript.append_point(&element.commitments[round]);
        }
        ci1 = transcript.challenge();
        c1_array.push(ci1);
        if round != depth - 1 {
            c3_array.push(hash_to_scalar(&ci1));
        }
    }

    // Final challenge over the last responses and commitments.
    transcript.append_scalar(&ci1);
    for element in &signature.elements {
        transcript.append_scalar(&element.responses[depth - 1]);
        transcript.append_point(&element.final_commitment);
    }
    let c = transcript.challenge();

    let folded = rsum(depth, &layer, &c1_array, &c3_array)?;

    // Per signer: walk the response-weighted sum, rejecting
    // degenerate terms along the way, then check the final identity
    // t·S + c·R == T.
    for element in &signature.elements {
        let mut weighted_sum = element.blinded_anchor;
        for (response, commitment) in
            element.responses.iter().zip(element.commitments.iter())
        {
            weighted_sum += response * commitment;
            if weighted_sum == RistrettoPoint::identity() {
                return Err(Error::DegeneratePartialSum);
            }
            if response == &Scalar::ZERO {
                return Err(Error::ZeroResponse);
            }
            if commitment == &RistrettoPoint::identity() {
                return Err(Error::DegenerateCommitment);
            }
        }

        if element.final_response * weighted_sum + c * folded != element.final_commitment
        {
            return Err(Error::InvalidSignature);
        }
    }

    Ok(key_images.iter().map(KeyImage::from_point).collect())
}
