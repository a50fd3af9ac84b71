// Copyright (c) 2024-2026 Botho Foundation

//! Key images: the linkability tags published with every signature.

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
    hashes::hash_to_point,
};

/// The "image" of a secret key `b`: I = b⁻¹ · Hp(b·G).
///
/// The image is a deterministic function of the secret alone, so two
/// signatures made with the same secret carry the same image — the
/// hook for double-spend and reuse detection. Images compare and
/// order byte-wise, making them usable as set and map keys in
/// spent-image tracking.
#[derive(Clone, Copy, Debug, Default, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct KeyImage {
    /// The curve point corresponding to the key image.
    pub point: CompressedRistretto,
}

// Comparisons and hashing go through the canonical byte encoding.
impl PartialEq for KeyImage {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for KeyImage {}

impl PartialOrd for KeyImage {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyImage {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl core::hash::Hash for KeyImage {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl KeyImage {
    /// Compute the image of a secret key.
    ///
    /// Fails with [`Error::ZeroSecretKey`] for the zero scalar, which
    /// has no inverse.
    pub fn from_secret_key(secret: &Scalar) -> Result<Self> {
        if secret == &Scalar::ZERO {
            return Err(Error::ZeroSecretKey);
        }
        let public = secret * RISTRETTO_BASEPOINT_POINT;
        let point = secret.invert() * hash_to_point(&public);
        Ok(Self::from_point(&point))
    }

    pub(crate) fn from_point(point: &RistrettoPoint) -> Self {
        Self {
            point: point.compress(),
        }
    }

    /// View the underlying compressed point as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }

    /// Copies `self` into a new Vec.
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        self.point.as_bytes().to_vec()
    }

    /// The image as a group element, if the encoding is valid.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        self.point.decompress()
    }
}

impl TryFrom<[u8; 32]> for KeyImage {
    type Error = Error;

    fn try_from(src: [u8; 32]) -> Result<Self> {
        let point = CompressedRistretto::from_slice(&src)
            .map_err(|_e| Error::DeserializationError("invalid key image"))?;
        Ok(Self { point })
    }
}

impl TryFrom<&[u8]> for KeyImage {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self> {
        if src.len() != 32 {
            return Err(Error::LengthMismatch(src.len(), 32));
        }
        let point = CompressedRistretto::from_slice(src)
            .map_err(|_e| Error::DeserializationError("invalid key image"))?;
        Ok(Self { point })
    }
}

impl AsRef<CompressedRistretto> for KeyImage {
    fn as_ref(&self) -> &CompressedRistretto {
        &self.point
    }
}

impl AsRef<[u8; 32]> for KeyImage {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for KeyImage {
    fn as_ref(&self) -> &[u8] {
        &self.as_bytes()[..]
    }
}
