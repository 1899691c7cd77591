//!
//! Error types
//!

/// Result type with the crate-local [`Error`]
pub type Result<T> = core::result::Result<T, Error>;

/// DSA errors
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Structurally inconsistent domain parameters or key material
    InvalidParameter(&'static str),

    /// The requested (L, N) pair is not one of the approved combinations
    UnsupportedParameterSize,

    /// The platform entropy source could not be read
    EntropyUnavailable,

    /// An internal retry ceiling was exceeded; retry the whole operation
    GenerationAborted,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidParameter(what) => write!(f, "dsa: invalid parameter: {}", what),
            Error::UnsupportedParameterSize => write!(f, "dsa: unsupported parameter size"),
            Error::EntropyUnavailable => write!(f, "dsa: entropy source unavailable"),
            Error::GenerationAborted => write!(f, "dsa: generation retry ceiling exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
