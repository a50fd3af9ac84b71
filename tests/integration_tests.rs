// Copyright (c) 2024-2026 Botho Foundation

//! End-to-end tests for L2S signing and verification.
//!
//! These walk the complete flow over concrete ring shapes: round
//! trips at every supported depth, linkability across contexts,
//! boundary signer counts, and the reject paths for malformed inputs
//! and tampered records.

use bth_crypto_l2s::{sign, verify, Error, KeyImage, L2sSignature};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A ring of decoys with real keys planted at the given positions.
fn ring_with_signers(
    ring_size: usize,
    signer_indices: &[usize],
    rng: &mut ChaCha20Rng,
) -> (Vec<RistrettoPoint>, Vec<Scalar>) {
    let mut ring: Vec<RistrettoPoint> = (0..ring_size)
        .map(|_| Scalar::random(rng) * RISTRETTO_BASEPOINT_POINT)
        .collect();
    let secrets: Vec<Scalar> = signer_indices
        .iter()
        .map(|&index| {
            let secret = Scalar::random(rng);
            ring[index] = secret * RISTRETTO_BASEPOINT_POINT;
            secret
        })
        .collect();
    (ring, secrets)
}

#[test]
fn test_minimal_ring_roundtrip() {
    // Depth 1: a single-member ring, the signer at position 0
    let mut rng = ChaCha20Rng::seed_from_u64(100);
    let (ring, secrets) = ring_with_signers(1, &[0], &mut rng);

    let message = Scalar::from(11u64);
    let signature = sign(&message, &ring, &secrets, &[0], &mut rng).unwrap();
    assert_eq!(signature.depth(), 1);

    let images = verify(&message, &ring, &signature).expect("should accept");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0], KeyImage::from_secret_key(&secrets[0]).unwrap());
}

#[test]
fn test_one_real_one_decoy_roundtrip() {
    // The smallest ring with an actual decoy
    let mut rng = ChaCha20Rng::seed_from_u64(113);
    let (ring, secrets) = ring_with_signers(2, &[0], &mut rng);

    let message = Scalar::from(12u64);
    let signature = sign(&message, &ring, &secrets, &[0], &mut rng).unwrap();
    assert_eq!(signature.depth(), 2);

    let images = verify(&message, &ring, &signature).expect("should accept");
    assert_eq!(images[0], KeyImage::from_secret_key(&secrets[0]).unwrap());
}

#[test]
fn test_roundtrip_at_every_depth() {
    let mut rng = ChaCha20Rng::seed_from_u64(101);
    for ring_size in [1usize, 2, 4, 8, 16] {
        let (ring, secrets) = ring_with_signers(ring_size, &[ring_size - 1], &mut rng);
        let message = Scalar::from(ring_size as u64);

        let signature =
            sign(&message, &ring, &secrets, &[ring_size - 1], &mut rng).unwrap();
        assert!(
            verify(&message, &ring, &signature).is_ok(),
            "rejected valid signature over ring of {ring_size}"
        );
    }
}

#[test]
fn test_tampered_final_response_rejected() {
    // Perturbing t leaves every earlier check intact and trips the
    // final identity
    let mut rng = ChaCha20Rng::seed_from_u64(102);
    let (ring, secrets) = ring_with_signers(4, &[2], &mut rng);
    let message = Scalar::from(5u64);

    let signature = sign(&message, &ring, &secrets, &[2], &mut rng).unwrap();
    assert!(verify(&message, &ring, &signature).is_ok());

    let mut tampered = signature;
    tampered.elements[0].final_response += Scalar::ONE;
    assert_eq!(
        verify(&message, &ring, &tampered),
        Err(Error::InvalidSignature)
    );
}

#[test]
fn test_two_distinct_signers() {
    let mut rng = ChaCha20Rng::seed_from_u64(103);
    let (ring, secrets) = ring_with_signers(4, &[1, 3], &mut rng);
    let message = Scalar::from(7u64);

    let signature = sign(&message, &ring, &secrets, &[1, 3], &mut rng).unwrap();
    let images = verify(&message, &ring, &signature).expect("should accept");

    assert_eq!(images.len(), 2);
    assert_ne!(images[0], images[1]);
}

#[test]
fn test_reused_secret_links_within_signature() {
    // The same secret included twice produces identical images - the
    // linkability detector fires inside a single signature
    let mut rng = ChaCha20Rng::seed_from_u64(104);
    let (ring, secrets) = ring_with_signers(4, &[2], &mut rng);
    let doubled = vec![secrets[0], secrets[0]];

    let message = Scalar::from(8u64);
    let signature = sign(&message, &ring, &doubled, &[2, 2], &mut rng).unwrap();
    let images = verify(&message, &ring, &signature).expect("should accept");

    assert_eq!(images.len(), 2);
    assert_eq!(images[0], images[1]);
}

#[test]
fn test_linkability_across_contexts() {
    // Same secret, different message, different ring, different
    // position: the image is unchanged
    let mut rng = ChaCha20Rng::seed_from_u64(105);
    let secret = Scalar::random(&mut rng);

    let mut ring1: Vec<RistrettoPoint> = (0..4)
        .map(|_| Scalar::random(&mut rng) * RISTRETTO_BASEPOINT_POINT)
        .collect();
    let mut ring2: Vec<RistrettoPoint> = (0..8)
        .map(|_| Scalar::random(&mut rng) * RISTRETTO_BASEPOINT_POINT)
        .collect();
    ring1[0] = secret * RISTRETTO_BASEPOINT_POINT;
    ring2[5] = secret * RISTRETTO_BASEPOINT_POINT;

    let sig1 = sign(&Scalar::from(1u64), &ring1, &[secret], &[0], &mut rng).unwrap();
    let sig2 = sign(&Scalar::from(2u64), &ring2, &[secret], &[5], &mut rng).unwrap();

    let images1 = verify(&Scalar::from(1u64), &ring1, &sig1).unwrap();
    let images2 = verify(&Scalar::from(2u64), &ring2, &sig2).unwrap();
    assert_eq!(images1[0], images2[0]);
}

#[test]
fn test_ring_substitution_rejected() {
    // Swapping any decoy after signing breaks the linking challenge
    let mut rng = ChaCha20Rng::seed_from_u64(106);
    let (ring, secrets) = ring_with_signers(4, &[2], &mut rng);
    let message = Scalar::from(3u64);

    let signature = sign(&message, &ring, &secrets, &[2], &mut rng).unwrap();

    let mut substituted = ring.clone();
    substituted[0] = Scalar::random(&mut rng) * RISTRETTO_BASEPOINT_POINT;
    assert_eq!(
        verify(&message, &substituted, &signature),
        Err(Error::LinkingChallengeMismatch)
    );
}

#[test]
fn test_message_bit_binding() {
    let mut rng = ChaCha20Rng::seed_from_u64(107);
    let (ring, secrets) = ring_with_signers(4, &[0], &mut rng);
    let message = Scalar::from(1u64 << 20);

    let signature = sign(&message, &ring, &secrets, &[0], &mut rng).unwrap();

    // Flip a single bit of the message digest
    let mut flipped_bytes = message.to_bytes();
    flipped_bytes[0] ^= 1;
    let flipped = Scalar::from_canonical_bytes(flipped_bytes).unwrap();

    assert_eq!(
        verify(&flipped, &ring, &signature),
        Err(Error::LinkingChallengeMismatch)
    );
}

#[test]
fn test_maximum_signer_count_boundary() {
    let mut rng = ChaCha20Rng::seed_from_u64(108);

    // L equal to the ring size, all positions distinct: accepts
    let (ring, secrets) = ring_with_signers(4, &[0, 1, 2, 3], &mut rng);
    let message = Scalar::from(4u64);
    let signature =
        sign(&message, &ring, &secrets, &[0, 1, 2, 3], &mut rng).unwrap();
    let images = verify(&message, &ring, &signature).expect("should accept");
    assert_eq!(images.len(), 4);

    // One signer past the boundary: rejected before anything is
    // emitted
    let mut overfull = secrets.clone();
    overfull.push(secrets[0]);
    assert_eq!(
        sign(&message, &ring, &overfull, &[0, 1, 2, 3, 0], &mut rng),
        Err(Error::TooManySigners(5, 4))
    );
}

#[test]
fn test_generation_rejects_bad_inputs() {
    let mut rng = ChaCha20Rng::seed_from_u64(109);
    let (ring, secrets) = ring_with_signers(4, &[1], &mut rng);
    let message = Scalar::from(6u64);

    // Zero secret
    assert_eq!(
        sign(&message, &ring, &[Scalar::ZERO], &[1], &mut rng),
        Err(Error::ZeroSecretKey)
    );
    // Position out of range
    assert_eq!(
        sign(&message, &ring, &secrets, &[4], &mut rng),
        Err(Error::IndexOutOfBounds(4, 4))
    );
    // Empty signer set
    assert_eq!(
        sign(&message, &ring, &[], &[], &mut rng),
        Err(Error::NoSigners)
    );
    // Ring length not a power of two
    assert_eq!(
        sign(&message, &ring[..3], &secrets, &[1], &mut rng),
        Err(Error::RingSizeNotPowerOfTwo)
    );
    // Secret/index count mismatch
    assert_eq!(
        sign(&message, &ring, &secrets, &[1, 2], &mut rng),
        Err(Error::SignerCountMismatch(1, 2))
    );
    // Secret does not open the claimed position
    assert_eq!(
        sign(&message, &ring, &secrets, &[0], &mut rng),
        Err(Error::SignerBindingViolated)
    );
}

#[test]
fn test_every_record_field_is_tamper_evident() {
    let mut rng = ChaCha20Rng::seed_from_u64(110);
    let (ring, secrets) = ring_with_signers(4, &[1, 2], &mut rng);
    let message = Scalar::from(13u64);
    let signature = sign(&message, &ring, &secrets, &[1, 2], &mut rng).unwrap();
    assert!(verify(&message, &ring, &signature).is_ok());

    let point_nudge = RISTRETTO_BASEPOINT_POINT;

    let mut cases: Vec<(&str, L2sSignature)> = Vec::new();

    let mut tampered = signature.clone();
    tampered.linking_challenge += Scalar::ONE;
    cases.push(("linking_challenge", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].anchor += point_nudge;
    cases.push(("anchor", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].anchor_commitment += point_nudge;
    cases.push(("anchor_commitment", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].anchor_response += Scalar::ONE;
    cases.push(("anchor_response", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].blinded_anchor += point_nudge;
    cases.push(("blinded_anchor", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].responses[0] += Scalar::ONE;
    cases.push(("responses[0]", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].commitments[1] += point_nudge;
    cases.push(("commitments[1]", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].final_commitment += point_nudge;
    cases.push(("final_commitment", tampered));

    let mut tampered = signature.clone();
    tampered.elements[1].final_response += Scalar::ONE;
    cases.push(("final_response", tampered));

    for (field, tampered) in cases {
        assert!(
            verify(&message, &ring, &tampered).is_err(),
            "tampering {field} was not detected"
        );
    }
}

#[test]
fn test_serialization_roundtrip_verifies() {
    let mut rng = ChaCha20Rng::seed_from_u64(111);
    let (ring, secrets) = ring_with_signers(8, &[0, 5], &mut rng);
    let message = Scalar::from(21u64);

    let signature = sign(&message, &ring, &secrets, &[0, 5], &mut rng).unwrap();
    let bytes = signature.to_bytes();
    assert_eq!(bytes.len(), signature.encoded_len());

    let recovered =
        L2sSignature::from_bytes(&bytes, signature.depth(), signature.num_signers())
            .expect("deserialization should succeed");
    assert_eq!(signature, recovered);
    assert!(verify(&message, &ring, &recovered).is_ok());
}

#[test]
fn test_deterministic_signing_under_fixed_rng() {
    let mut setup = ChaCha20Rng::seed_from_u64(112);
    let (ring, secrets) = ring_with_signers(4, &[3], &mut setup);
    let message = Scalar::from(17u64);

    let sig_a = sign(
        &message,
        &ring,
        &secrets,
        &[3],
        &mut ChaCha20Rng::seed_from_u64(7),
    )
    .unwrap();
    let sig_b = sign(
        &message,
        &ring,
        &secrets,
        &[3],
        &mut ChaCha20Rng::seed_from_u64(7),
    )
    .unwrap();
    let sig_c = sign(
        &message,
        &ring,
        &secrets,
        &[3],
        &mut ChaCha20Rng::seed_from_u64(8),
    )
    .unwrap();

    assert_eq!(sig_a, sig_b);
    // Fresh randomness produces a different record over the same
    // inputs, but the key image is unchanged
    assert_ne!(sig_a, sig_c);
    assert_eq!(
        verify(&message, &ring, &sig_a).unwrap(),
        verify(&message, &ring, &sig_c).unwrap()
    );
}
