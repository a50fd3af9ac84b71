// Copyright (c) 2024-2026 Botho Foundation

//! Recursive tree-folded aggregation over the proof layer.
//!
//! Both the signer (in its self-check) and the verifier evaluate the
//! same folded linear combination of the layer points against the two
//! challenge vectors, so the evaluator lives here, shared and free of
//! any per-side state.

use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};

use crate::{
    error::{Error, Result},
    ring_signature::MAX_TRANSCRIPT_DEPTH,
};

/// Evaluate the tree-folded combination of `x_array` against the
/// challenge vectors.
///
/// `x_array` must hold exactly 2ⁿ points, `c1_array` n challenges and
/// `c3_array` n − 1 challenges. The fold pairs adjacent halves level
/// by level: at depth one a pair folds to `slice[0] + μ·slice[1]`,
/// and at depth k the two halves fold recursively, the lower half
/// under `c1_array[k−2]` and the upper under `c3_array[k−2]`, joined
/// as `low + μ·high`. The top-level μ is `c1_array[n−1]`.
///
/// The evaluation is deterministic, identical for signer and
/// verifier, and branches only on public lengths.
pub fn rsum(
    n: usize,
    x_array: &[RistrettoPoint],
    c1_array: &[Scalar],
    c3_array: &[Scalar],
) -> Result<RistrettoPoint> {
    if n == 0 {
        return Err(Error::ZeroDepth);
    }
    if n >= MAX_TRANSCRIPT_DEPTH {
        return Err(Error::DepthLimitExceeded(n, MAX_TRANSCRIPT_DEPTH));
    }

    let expected = 1usize << n;
    if x_array.len() != expected {
        return Err(Error::LengthMismatch(x_array.len(), expected));
    }
    if c1_array.len() != n {
        return Err(Error::LengthMismatch(c1_array.len(), n));
    }
    if c3_array.len() != n - 1 {
        return Err(Error::LengthMismatch(c3_array.len(), n - 1));
    }

    Ok(fold(n, x_array, c1_array, c3_array, &c1_array[n - 1]))
}

/// One fold level. Depth is bounded by [`MAX_TRANSCRIPT_DEPTH`], so
/// direct recursion is safe.
fn fold(
    n: usize,
    slice: &[RistrettoPoint],
    c1_array: &[Scalar],
    c3_array: &[Scalar],
    mu: &Scalar,
) -> RistrettoPoint {
    if n == 1 {
        return slice[0] + mu * slice[1];
    }

    let half = slice.len() / 2;
    fold(n - 1, &slice[..half], c1_array, c3_array, &c1_array[n - 2])
        + mu * fold(n - 1, &slice[half..], c1_array, c3_array, &c3_array[n - 2])
}
