// Copyright (c) 2024-2026 Botho Foundation

//! Domain separator tags for the L2S hash oracles.
//!
//! Every oracle absorbs its tag before any payload bytes, so digests
//! produced by different oracles can never collide.

/// Hash-to-scalar oracle, both the one-shot form and the transcript
/// accumulator.
pub const L2S_HASH_TO_SCALAR_DOMAIN_TAG: &str = "bth_l2s_hash_to_scalar";

/// Hash-to-point oracle.
pub const L2S_HASH_TO_POINT_DOMAIN_TAG: &str = "bth_l2s_hash_to_point";
