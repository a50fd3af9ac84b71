// Copyright (c) 2024-2026 Botho Foundation

//! Hash oracles for L2S: hash-to-point, hash-to-scalar, and the
//! incremental transcript accumulator driven by both signer and
//! verifier.

use blake2::{Blake2b512, Digest};
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};

use crate::domain_separators::{
    L2S_HASH_TO_POINT_DOMAIN_TAG, L2S_HASH_TO_SCALAR_DOMAIN_TAG,
};

/// Hash a group element to another group element of unknown discrete
/// logarithm.
pub fn hash_to_point(point: &RistrettoPoint) -> RistrettoPoint {
    let mut hasher = Blake2b512::new();
    hasher.update(L2S_HASH_TO_POINT_DOMAIN_TAG);
    hasher.update(point.compress().as_bytes());
    RistrettoPoint::from_hash(hasher)
}

/// Hash a single scalar to a scalar.
pub fn hash_to_scalar(scalar: &Scalar) -> Scalar {
    let mut hasher = Blake2b512::new();
    hasher.update(L2S_HASH_TO_SCALAR_DOMAIN_TAG);
    hasher.update(scalar.as_bytes());
    Scalar::from_hash(hasher)
}

/// Incremental hash-to-scalar accumulator.
///
/// [`challenge`](Self::challenge) digests everything appended so far
/// without resetting the accumulator: later appends extend the same
/// stream, and the next challenge covers the whole of it. The
/// multi-round transcript depends on this — an accumulator that
/// restarts after each challenge diverges the signer and verifier.
#[derive(Clone)]
pub struct ScalarTranscript {
    hasher: Blake2b512,
}

impl ScalarTranscript {
    /// A fresh accumulator, seeded with the hash-to-scalar domain tag.
    pub fn new() -> Self {
        let mut hasher = Blake2b512::new();
        hasher.update(L2S_HASH_TO_SCALAR_DOMAIN_TAG);
        Self { hasher }
    }

    /// Append one scalar.
    pub fn append_scalar(&mut self, scalar: &Scalar) {
        self.hasher.update(scalar.as_bytes());
    }

    /// Append one group element, in compressed form.
    pub fn append_point(&mut self, point: &RistrettoPoint) {
        self.hasher.update(point.compress().as_bytes());
    }

    /// Append a sequence of group elements in order.
    pub fn append_points(&mut self, points: &[RistrettoPoint]) {
        for point in points {
            self.append_point(point);
        }
    }

    /// The digest of everything appended so far, as a scalar.
    ///
    /// The accumulator state is untouched; appending afterwards
    /// extends the same stream.
    pub fn challenge(&self) -> Scalar {
        Scalar::from_hash(self.hasher.clone())
    }
}

impl Default for ScalarTranscript {
    fn default() -> Self {
        Self::new()
    }
}
