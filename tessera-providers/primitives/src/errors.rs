use std::{fmt, io};

use thiserror::Error;

/// Errors raised while loading a primitive assembly.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The assembly description could not be read.
    #[error("failed to read assembly `{origin}`: {source}")]
    Io {
        /// Path or label of the unreadable input.
        origin: String,
        #[source]
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// A line does not describe a part.
    #[error("line {line}: {reason}")]
    InvalidFormat {
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },
}

/// Stable codes describing [`AssemblyError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum AssemblyErrorCode {
    /// The assembly description could not be read.
    Io,
    /// A line does not describe a part.
    InvalidFormat,
}

impl AssemblyErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "ASSEMBLY_IO",
            Self::InvalidFormat => "ASSEMBLY_INVALID_FORMAT",
        }
    }
}

impl fmt::Display for AssemblyErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AssemblyError {
    /// Retrieve the stable [`AssemblyErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> AssemblyErrorCode {
        match self {
            Self::Io { .. } => AssemblyErrorCode::Io,
            Self::InvalidFormat { .. } => AssemblyErrorCode::InvalidFormat,
        }
    }
}
