// Copyright (c) 2024-2026 Botho Foundation

//! L2S linkable multi-signatures.
//!
//! L2S proves knowledge of the discrete logarithms behind L positions
//! of a public ring while publishing one key image per secret, so a
//! verifier can link signatures made with the same key. The
//! membership argument folds a power-of-two layer of ring-derived
//! points down a log-depth Fiat–Shamir transcript, which keeps the
//! signature at O(L·log N) group elements instead of O(N).
//!
//! Reference: "Lin2-Xor Lemma and Log-size Linkable Threshold Ring
//! Signature" (Sokolov).

mod signer;
mod verifier;

pub use signer::sign;
pub use verifier::verify;

use alloc::vec::Vec;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    hashes::{hash_to_point, ScalarTranscript},
};

/// Transcript depths at or above this are rejected outright.
///
/// The protocol is defined for any depth ≥ 1; the ceiling bounds
/// allocation against adversarial signature shapes before any
/// `1 << depth` is computed.
pub const MAX_TRANSCRIPT_DEPTH: usize = 32;

/// Per-signer part of an L2S signature.
///
/// One element carries the anchor tying a key image to the ring, the
/// round-zero proof of its opening, and the per-round responses and
/// commitments of the folding argument.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct L2sSignatureElement {
    /// Anchor Z0 = G + z·I; the verifier recovers the key image I
    /// from it.
    pub anchor: RistrettoPoint,

    /// Round-zero commitment T0 = q0·Z0.
    pub anchor_commitment: RistrettoPoint,

    /// Round-zero response t0 = q0 − f·c0.
    pub anchor_response: Scalar,

    /// Blinded anchor Z = f·Z0.
    pub blinded_anchor: RistrettoPoint,

    /// Per-round responses r[0..n].
    pub responses: Vec<Scalar>,

    /// Per-round commitments H[0..n].
    pub commitments: Vec<RistrettoPoint>,

    /// Final commitment T = q·W over the response-weighted sum W.
    pub final_commitment: RistrettoPoint,

    /// Final response t = q − x·c.
    pub final_response: Scalar,
}

/// An L2S signature over a message and a ring: the linking challenge
/// plus one element per signer.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct L2sSignature {
    /// Linking challenge z = Hs(m, B, I), binding message, ring, and
    /// every key image.
    pub linking_challenge: Scalar,

    /// One element per signer.
    pub elements: Vec<L2sSignatureElement>,
}

impl L2sSignature {
    /// The transcript depth n, i.e. log₂ of the proof layer size.
    pub fn depth(&self) -> usize {
        self.elements.first().map_or(0, |e| e.responses.len())
    }

    /// Number of signers (key images) in this signature.
    pub fn num_signers(&self) -> usize {
        self.elements.len()
    }

    /// Serialized size in bytes for the given shape.
    pub fn encoded_size(depth: usize, num_signers: usize) -> usize {
        32 + num_signers * 32 * (6 + 2 * depth)
    }

    /// Serialized size of this signature in bytes.
    pub fn encoded_len(&self) -> usize {
        Self::encoded_size(self.depth(), self.num_signers())
    }

    /// Serialize to the canonical byte form.
    ///
    /// Order: `z`, then per element `Z0, T0, t0, Z, r[0..n], H[0..n],
    /// T, t`, each scalar and compressed point 32 bytes. The shape
    /// (depth, signer count) is not encoded; callers carry it in the
    /// enclosing protocol.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(self.linking_challenge.as_bytes());
        for element in &self.elements {
            bytes.extend_from_slice(element.anchor.compress().as_bytes());
            bytes.extend_from_slice(element.anchor_commitment.compress().as_bytes());
            bytes.extend_from_slice(element.anchor_response.as_bytes());
            bytes.extend_from_slice(element.blinded_anchor.compress().as_bytes());
            for response in &element.responses {
                bytes.extend_from_slice(response.as_bytes());
            }
            for commitment in &element.commitments {
                bytes.extend_from_slice(commitment.compress().as_bytes());
            }
            bytes.extend_from_slice(element.final_commitment.compress().as_bytes());
            bytes.extend_from_slice(element.final_response.as_bytes());
        }
        bytes
    }

    /// Deserialize from the canonical byte form for a known shape.
    ///
    /// Rejects wrong lengths, non-canonical scalars, and invalid
    /// point encodings.
    pub fn from_bytes(bytes: &[u8], depth: usize, num_signers: usize) -> Result<Self> {
        if depth == 0 {
            return Err(Error::ZeroDepth);
        }
        if depth >= MAX_TRANSCRIPT_DEPTH {
            return Err(Error::DepthLimitExceeded(depth, MAX_TRANSCRIPT_DEPTH));
        }
        if num_signers == 0 {
            return Err(Error::NoSigners);
        }
        let expected = Self::encoded_size(depth, num_signers);
        if bytes.len() != expected {
            return Err(Error::LengthMismatch(bytes.len(), expected));
        }

        let mut chunks = bytes.chunks_exact(32);
        let mut next = || chunks.next().expect("length checked above");

        let linking_challenge = read_scalar(next())?;
        let mut elements = Vec::with_capacity(num_signers);
        for _ in 0..num_signers {
            let anchor = read_point(next())?;
            let anchor_commitment = read_point(next())?;
            let anchor_response = read_scalar(next())?;
            let blinded_anchor = read_point(next())?;
            let mut responses = Vec::with_capacity(depth);
            for _ in 0..depth {
                responses.push(read_scalar(next())?);
            }
            let mut commitments = Vec::with_capacity(depth);
            for _ in 0..depth {
                commitments.push(read_point(next())?);
            }
            let final_commitment = read_point(next())?;
            let final_response = read_scalar(next())?;

            elements.push(L2sSignatureElement {
                anchor,
                anchor_commitment,
                anchor_response,
                blinded_anchor,
                responses,
                commitments,
                final_commitment,
                final_response,
            });
        }

        Ok(Self {
            linking_challenge,
            elements,
        })
    }
}

fn read_scalar(chunk: &[u8]) -> Result<Scalar> {
    let array: [u8; 32] = chunk.try_into().expect("chunks are 32 bytes");
    Option::<Scalar>::from(Scalar::from_canonical_bytes(array))
        .ok_or(Error::DeserializationError("non-canonical scalar"))
}

fn read_point(chunk: &[u8]) -> Result<RistrettoPoint> {
    CompressedRistretto::from_slice(chunk)
        .map_err(|_e| Error::DeserializationError("invalid point encoding"))?
        .decompress()
        .ok_or(Error::DeserializationError("invalid point encoding"))
}

/// The ring-to-layer shift applied to every layer slot:
/// `point + z·Hp(point)`.
pub(crate) fn shift_by_hash(point: &RistrettoPoint, z: &Scalar) -> RistrettoPoint {
    point + z * hash_to_point(point)
}

/// The linking challenge z = Hs(m, B, I).
pub(crate) fn linking_challenge(
    message: &Scalar,
    ring: &[RistrettoPoint],
    key_images: &[RistrettoPoint],
) -> Scalar {
    let mut transcript = ScalarTranscript::new();
    transcript.append_scalar(message);
    transcript.append_points(ring);
    transcript.append_points(key_images);
    transcript.challenge()
}

/// Expand the ring into the interleaved proof layer.
///
/// Even slots hold the shifted ring `P[j] = B[j] + z·Hp(B[j])`; odd
/// slots hold the same shift applied to `B[j] + Q_shift`, where
/// `Q_shift = Hs(A, P)·G` ties the layer to the signer anchors. The
/// layer has exactly twice the ring length, and the signer-binding
/// predicate lives on the even slots: `b⁻¹·layer[2s] == A`.
pub(crate) fn expand_ring(
    z: &Scalar,
    ring: &[RistrettoPoint],
    anchors: &[RistrettoPoint],
) -> Vec<RistrettoPoint> {
    let shifted_ring: Vec<RistrettoPoint> =
        ring.iter().map(|member| shift_by_hash(member, z)).collect();

    let mut transcript = ScalarTranscript::new();
    transcript.append_points(anchors);
    transcript.append_points(&shifted_ring);
    let q_shift = transcript.challenge() * RISTRETTO_BASEPOINT_POINT;

    let mut layer = Vec::with_capacity(2 * ring.len());
    for (member, shifted) in ring.iter().zip(&shifted_ring) {
        layer.push(*shifted);
        layer.push(shift_by_hash(&(member + q_shift), z));
    }
    layer
}
