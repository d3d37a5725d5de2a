//! Error types for the Tessera core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::GeometryProvider`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Requested part index was outside the provider's bounds.
    #[error("part index {index} is out of bounds")]
    OutOfBounds {
        /// The requested part index.
        index: usize,
    },
    /// The part's geometry cannot take part in a distance query.
    #[error("part {index} has degenerate geometry: {reason}")]
    Degenerate {
        /// Index of the offending part.
        index: usize,
        /// Description of the defect.
        reason: Arc<str>,
    },
    /// The provider returned a negative or non-finite distance.
    #[error("distance between parts {left} and {right} is invalid ({value})")]
    InvalidDistance {
        /// Index of the first part.
        left: usize,
        /// Index of the second part.
        right: usize,
        /// The distance value that was rejected.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GeometryError`] variants.
    enum GeometryErrorCode for GeometryError {
        /// Requested part index was outside the provider's bounds.
        OutOfBounds => OutOfBounds { .. } => "GEOMETRY_OUT_OF_BOUNDS",
        /// The part's geometry cannot take part in a distance query.
        Degenerate => Degenerate { .. } => "GEOMETRY_DEGENERATE",
        /// The provider returned a negative or non-finite distance.
        InvalidDistance => InvalidDistance { .. } => "GEOMETRY_INVALID_DISTANCE",
    }
}

/// A structural invariant of a [`crate::ContactMatrix`] that does not hold.
///
/// Each variant names exactly one invariant together with the location that
/// violates it. Row and column indices are zero-based matrix indices.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// The matrix has no parts.
    #[error("contact matrix must contain at least one part")]
    Empty,
    /// The tabular input has no header row.
    #[error("missing header row")]
    MissingHeader,
    /// The first header cell must be empty.
    #[error("header must start with an empty cell but found `{found}`")]
    HeaderCorner {
        /// Content of the leading header cell.
        found: String,
    },
    /// The number of names differs from the number of matrix rows.
    #[error("{names} part names were given for a matrix with {rows} rows")]
    NameCountMismatch {
        /// Number of part names.
        names: usize,
        /// Number of matrix rows.
        rows: usize,
    },
    /// A row has a different number of cells from the matrix size.
    #[error("row {row} has {actual} cells but the matrix is {expected}x{expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Matrix size.
        expected: usize,
        /// Cells found in the row.
        actual: usize,
    },
    /// A row label does not match the header name at the same position.
    #[error("row {row} is labelled `{actual}` but the header names it `{expected}`")]
    RowLabelMismatch {
        /// Offending row.
        row: usize,
        /// Name from the header.
        expected: String,
        /// Label found at the start of the row.
        actual: String,
    },
    /// A cell holds something other than `0` or `1`.
    #[error("cell ({row}, {column}) must be 0 or 1 but found `{value}`")]
    NonBinary {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Raw cell content.
        value: String,
    },
    /// A diagonal cell is not `1`.
    #[error("diagonal cell ({index}, {index}) must be 1")]
    DiagonalNotUnit {
        /// Index of the offending diagonal cell.
        index: usize,
    },
    /// The matrix is not symmetric.
    #[error("row {row} is not symmetric with column {column}")]
    Asymmetric {
        /// Row of the first mismatching cell.
        row: usize,
        /// Column of the first mismatching cell.
        column: usize,
    },
    /// Two parts share a name, breaking the index-to-name bijection.
    #[error("part name `{name}` is used by both index {first} and index {second}")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// First index carrying the name.
        first: usize,
        /// Second index carrying the name.
        second: usize,
    },
    /// A quoted field is never closed.
    #[error("line {line}: quoted field is not terminated")]
    UnterminatedQuote {
        /// Line on which the quoted field starts.
        line: usize,
    },
    /// A field mixes quoted and unquoted content.
    #[error("line {line}: malformed quoted field")]
    MalformedField {
        /// Line containing the malformed field.
        line: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ValidationError`] variants.
    enum ValidationErrorCode for ValidationError {
        /// The matrix has no parts.
        Empty => Empty => "MATRIX_EMPTY",
        /// The tabular input has no header row.
        MissingHeader => MissingHeader => "MATRIX_MISSING_HEADER",
        /// The first header cell must be empty.
        HeaderCorner => HeaderCorner { .. } => "MATRIX_HEADER_CORNER",
        /// The number of names differs from the number of matrix rows.
        NameCountMismatch => NameCountMismatch { .. } => "MATRIX_NAME_COUNT_MISMATCH",
        /// A row has a different number of cells from the matrix size.
        NotSquare => NotSquare { .. } => "MATRIX_NOT_SQUARE",
        /// A row label does not match the header.
        RowLabelMismatch => RowLabelMismatch { .. } => "MATRIX_ROW_LABEL_MISMATCH",
        /// A cell holds something other than `0` or `1`.
        NonBinary => NonBinary { .. } => "MATRIX_NON_BINARY",
        /// A diagonal cell is not `1`.
        DiagonalNotUnit => DiagonalNotUnit { .. } => "MATRIX_DIAGONAL_NOT_UNIT",
        /// The matrix is not symmetric.
        Asymmetric => Asymmetric { .. } => "MATRIX_ASYMMETRIC",
        /// Two parts share a name.
        DuplicateName => DuplicateName { .. } => "MATRIX_DUPLICATE_NAME",
        /// A quoted field is never closed.
        UnterminatedQuote => UnterminatedQuote { .. } => "MATRIX_UNTERMINATED_QUOTE",
        /// A field mixes quoted and unquoted content.
        MalformedField => MalformedField { .. } => "MATRIX_MALFORMED_FIELD",
    }
}

/// Error type produced when configuring or running [`crate::ContactAnalyzer`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ContactError {
    /// The assembly contained no parts.
    #[error("assembly `{assembly}` contains no parts")]
    EmptyAssembly {
        /// Identifier for the empty assembly.
        assembly: Arc<str>,
    },
    /// A configuration value is out of range.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: Arc<str>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The bounded worker pool could not be created.
    #[error("failed to start {workers} contact workers: {reason}")]
    WorkerPool {
        /// Requested worker count.
        workers: usize,
        /// Error reported by the thread pool builder.
        reason: Arc<str>,
    },
    /// A pairwise distance query failed; the whole computation is discarded.
    #[error("assembly `{assembly}`: distance query between parts {left} and {right} failed: {error}")]
    GeometryQuery {
        /// Identifier for the assembly being analysed.
        assembly: Arc<str>,
        /// Index of the first part.
        left: usize,
        /// Index of the second part.
        right: usize,
        #[source]
        /// Underlying provider failure.
        error: GeometryError,
    },
    /// The provider failed outside a pairwise query, e.g. while listing parts.
    #[error("assembly `{assembly}` failed: {error}")]
    Geometry {
        /// Identifier for the assembly being analysed.
        assembly: Arc<str>,
        #[source]
        /// Underlying provider failure.
        error: GeometryError,
    },
    /// The assembled matrix violated a structural invariant.
    #[error(transparent)]
    Validation {
        #[from]
        /// The violated invariant.
        source: ValidationError,
    },
}

define_error_codes! {
    /// Stable codes describing [`ContactError`] variants.
    enum ContactErrorCode for ContactError {
        /// The assembly contained no parts.
        EmptyAssembly => EmptyAssembly { .. } => "CONTACT_EMPTY_ASSEMBLY",
        /// A configuration value is out of range.
        InvalidParameter => InvalidParameter { .. } => "CONTACT_INVALID_PARAMETER",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "CONTACT_BACKEND_UNAVAILABLE",
        /// The bounded worker pool could not be created.
        WorkerPool => WorkerPool { .. } => "CONTACT_WORKER_POOL",
        /// A pairwise distance query failed.
        GeometryQuery => GeometryQuery { .. } => "CONTACT_GEOMETRY_QUERY",
        /// The provider failed outside a pairwise query.
        GeometryFailure => Geometry { .. } => "CONTACT_GEOMETRY_FAILURE",
        /// The assembled matrix violated a structural invariant.
        Validation => Validation { .. } => "CONTACT_VALIDATION",
    }
}

impl ContactError {
    /// Retrieve the inner [`GeometryErrorCode`] when the error originated in a
    /// [`crate::GeometryProvider`].
    #[must_use]
    pub const fn geometry_code(&self) -> Option<GeometryErrorCode> {
        match self {
            Self::GeometryQuery { error, .. } | Self::Geometry { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ContactError>;
