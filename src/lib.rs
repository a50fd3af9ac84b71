// Copyright (c) 2024-2026 Botho Foundation

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! L2S: Log-size Linkable Multi-Signatures for Botho
//!
//! This crate implements the L2S linkable multi-signature scheme: a
//! non-interactive proof that the signers know the discrete
//! logarithms behind L positions of a public ring, published together
//! with one key image per secret so reuse of a key across signatures
//! is detectable.
//!
//! # Overview
//!
//! - **Sender privacy**: each signer is hidden among the ring members;
//!   the signature reveals only that every claimed position is opened
//!   by *some* secret, not which one.
//! - **Linkability**: a key image is a deterministic tag of the secret
//!   alone, so two signatures by the same key carry the same image,
//!   enabling double-spend detection.
//! - **Log-size membership proof**: the ring is expanded into a
//!   power-of-two proof layer that is folded in half once per
//!   transcript round, so a signature holds O(log N) group elements
//!   per signer rather than O(N).
//!
//! Multiple signers share one Fiat–Shamir transcript, making the
//! whole record one multi-signature rather than L separate proofs.
//!
//! # Example
//!
//! ```rust,no_run
//! use bth_crypto_l2s::{sign, verify, KeyImage};
//! use curve25519_dalek::{
//!     constants::RISTRETTO_BASEPOINT_POINT, scalar::Scalar,
//! };
//! use rand::rngs::OsRng;
//!
//! // A ring of four members; the signer holds the key for slot 2.
//! let secret = Scalar::random(&mut OsRng);
//! let mut ring: Vec<_> = (0..4)
//!     .map(|_| Scalar::random(&mut OsRng) * RISTRETTO_BASEPOINT_POINT)
//!     .collect();
//! ring[2] = secret * RISTRETTO_BASEPOINT_POINT;
//!
//! // The message digest is a scalar, reduced by the caller.
//! let message = Scalar::from(1234567890u64);
//!
//! let signature = sign(&message, &ring, &[secret], &[2], &mut OsRng)
//!     .expect("signing failed");
//!
//! // Anyone can verify; acceptance yields the recovered key images.
//! let images = verify(&message, &ring, &signature).expect("invalid signature");
//! assert_eq!(images[0], KeyImage::from_secret_key(&secret).unwrap());
//! ```
//!
//! # Shapes
//!
//! | Name | Meaning | Constraint |
//! |------|---------|------------|
//! | n | transcript depth | 1 ≤ n < 32 |
//! | N = 2ⁿ | proof layer size | twice the ring length |
//! | L | signers per signature | 1 ≤ L ≤ N/2 |
//!
//! A signature serializes to `32·(1 + L·(6 + 2n))` bytes.

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod domain_separators;
pub mod error;
pub mod hashes;
pub mod key_image;
pub mod ring_signature;
pub mod rsum;

// Re-export commonly used types
pub use error::{Error, Result};
pub use hashes::{hash_to_point, hash_to_scalar, ScalarTranscript};
pub use key_image::KeyImage;
pub use ring_signature::{
    sign, verify, L2sSignature, L2sSignatureElement, MAX_TRANSCRIPT_DEPTH,
};
pub use rsum::rsum;
