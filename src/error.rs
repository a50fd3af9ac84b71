// Copyright (c) 2024-2026 Botho Foundation

//! Errors which can occur when creating or verifying L2S signatures.

use displaydoc::Display;

/// An error which can occur when signing or verifying an L2S
/// signature.
///
/// Shape and domain violations in the inputs carry no cryptographic
/// meaning. Rejections raised during verification mean the signature
/// is invalid under the given ring and message; callers outside test
/// harnesses should treat them as a single reject.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// Number of secret keys `{0}` does not match number of ring positions `{1}`
    SignerCountMismatch(usize, usize),

    /// Ring size is not a power of two
    RingSizeNotPowerOfTwo,

    /// The signer set is empty
    NoSigners,

    /// Too many signers: `{0}` exceeds the ring size `{1}`
    TooManySigners(usize, usize),

    /// A secret key is zero
    ZeroSecretKey,

    /// Ring position `{0}` is out of bounds for a ring of size `{1}`
    IndexOutOfBounds(usize, usize),

    /// A secret key does not open the ring element at its claimed position
    SignerBindingViolated,

    /// Transcript depth of zero
    ZeroDepth,

    /// Transcript depth `{0}` exceeds the supported maximum `{1}`
    DepthLimitExceeded(usize, usize),

    /// Incorrect length for array, provided `{0}`, required `{1}`
    LengthMismatch(usize, usize),

    /// Recomputed linking challenge does not match the signature
    LinkingChallengeMismatch,

    /// The round-zero commitment equation does not hold
    RoundZeroCheckFailed,

    /// A partial response sum is the identity
    DegeneratePartialSum,

    /// A response scalar is zero
    ZeroResponse,

    /// A round commitment is the identity
    DegenerateCommitment,

    /// The signature was not able to be validated
    InvalidSignature,

    /// Deserialization error: {0}
    DeserializationError(&'static str),
}

/// Result type for L2S operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl std::error::Error for Error {}
