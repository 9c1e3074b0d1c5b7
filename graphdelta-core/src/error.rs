//! Error types for the graphdelta core library.
//!
//! Defines error enums exposed by the public API together with stable,
//! machine-readable codes for logging surfaces.

use std::fmt;

use thiserror::Error;

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

/// An error produced by [`crate::OrderedEdgeMap`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EdgeMapError {
    /// The requested key is not stored in the map.
    #[error("key {key} is not present in the edge map")]
    KeyNotFound {
        /// The missing target vertex id.
        key: usize,
    },
    /// The arena no longer encodes a valid AVL tree.
    #[error("edge map invariant violated: {message}")]
    InvariantViolation {
        /// Description of the violated invariant.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`EdgeMapError`] variants.
    enum EdgeMapErrorCode for EdgeMapError {
        /// The requested key is not stored in the map.
        KeyNotFound => KeyNotFound { .. } => "EDGE_MAP_KEY_NOT_FOUND",
        /// The arena no longer encodes a valid AVL tree.
        InvariantViolation => InvariantViolation { .. } => "EDGE_MAP_INVARIANT_VIOLATION",
    }
}

/// Error type produced while configuring or generating a [`crate::GraphDelta`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DeltaError {
    /// Sampling parameters were rejected during validation.
    #[error("invalid delta parameter: {reason}")]
    InvalidParameters {
        /// Human-readable explanation of the rejected parameter.
        reason: String,
    },
    /// The graph has no valid vertices to sample from.
    #[error("cannot sample a delta from a graph without valid vertices")]
    NoVertices,
    /// Every vertex received zero (or non-finite) preferential weight.
    #[error(
        "preferential weights over {vertices} vertices sum to {total_weight}; no vertex can be selected"
    )]
    DegenerateDistribution {
        /// Number of valid vertices that were weighted.
        vertices: usize,
        /// Sum of the clamped weights.
        total_weight: f64,
    },
    /// The discrete sampler rejected the normalised weights.
    #[error("failed to build vertex sampler: {reason}")]
    Sampler {
        /// Reason reported by the underlying distribution.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`DeltaError`] variants.
    enum DeltaErrorCode for DeltaError {
        /// Sampling parameters were rejected during validation.
        InvalidParameters => InvalidParameters { .. } => "DELTA_INVALID_PARAMETERS",
        /// The graph has no valid vertices to sample from.
        NoVertices => NoVertices => "DELTA_NO_VERTICES",
        /// Every vertex received zero preferential weight.
        DegenerateDistribution => DegenerateDistribution { .. } => "DELTA_DEGENERATE_DISTRIBUTION",
        /// The discrete sampler rejected the normalised weights.
        Sampler => Sampler { .. } => "DELTA_SAMPLER",
    }
}

/// Convenient alias for results returned by delta generation.
pub type Result<T> = core::result::Result<T, DeltaError>;
