//! Error types for fusegen-core
//!
//! This module provides a no_std compatible error type shared by the
//! encoder, the decoder and the text parsers.

use core::fmt;

use crate::fuse::FuseByte;

/// Option whose value could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuseOption {
    /// Brown-out detector trip level (BODLEVEL)
    BrownOutLevel,
    /// Clock source and start-up time (CKSEL/SUT)
    ClockSelect,
}

impl fmt::Display for FuseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrownOutLevel => write!(f, "brown-out level"),
            Self::ClockSelect => write!(f, "clock select"),
        }
    }
}

/// Details about a fuse triple string that could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedInput {
    /// Fewer than three comma-separated fields
    MissingField {
        /// The first fuse without a value
        fuse: FuseByte,
    },
    /// More than three comma-separated fields
    TrailingField,
    /// A field is not a hexadecimal byte
    InvalidHex {
        /// The fuse whose field failed to parse
        fuse: FuseByte,
    },
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { fuse } => write!(f, "missing value for {}", fuse),
            Self::TrailingField => write!(f, "expected exactly three fuse values"),
            Self::InvalidHex { fuse } => write!(f, "invalid hex byte for {}", fuse),
        }
    }
}

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An option holds a value, token or bit pattern with no table entry
    UnrecognizedValue(FuseOption),
    /// A textual fuse triple is not of the form `lfuse,hfuse,efuse`
    MalformedInput(MalformedInput),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedValue(option) => write!(f, "unrecognized {} value", option),
            Self::MalformedInput(input) => write!(f, "malformed fuse triple: {}", input),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
