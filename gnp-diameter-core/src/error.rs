//! Error types for the gnp-diameter core library.
//!
//! Configuration problems are reported as [`SimulationError`] before any trial
//! runs; misuse of the [`crate::Graph`] API surfaces as [`GraphError`].

use std::{fmt, sync::Arc};

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

/// An error produced by [`crate::Graph`] operations that address vertices.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A vertex address was not below the vertex count.
    #[error("vertex {vertex} is out of bounds for a graph with {vertex_count} vertices")]
    OutOfBounds {
        /// The offending address.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// Both endpoints of an edge were the same vertex.
    #[error("edge {{{vertex}, {vertex}}} would be a self-loop")]
    SelfLoop {
        /// The repeated endpoint.
        vertex: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A vertex address was not below the vertex count.
        OutOfBounds => OutOfBounds { .. } => "GRAPH_VERTEX_OUT_OF_BOUNDS",
        /// Both endpoints of an edge were the same vertex.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
    }
}

/// Error raised while validating simulation parameters or preparing the
/// trial runner.
///
/// Every variant is detected before any trial executes; none is retryable.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Graphs need at least one vertex.
    #[error("vertex count must be at least 1 (got {got})")]
    InvalidVertexCount {
        /// The rejected vertex count.
        got: usize,
    },
    /// Edge probabilities must be finite and lie in `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    InvalidEdgeProbability {
        /// The rejected probability.
        got: f64,
    },
    /// At least one trial per parameter value is required.
    #[error("trial count must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The rejected trial count.
        got: u64,
    },
    /// The worker pool needs at least one thread.
    #[error("worker count must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The rejected worker count.
        got: usize,
    },
    /// Sweep increments must be finite and strictly positive.
    #[error("sweep increment must be finite and greater than zero (got {got})")]
    InvalidIncrement {
        /// The rejected increment.
        got: f64,
    },
    /// The sweep range cannot be traversed.
    #[error("invalid sweep range from {start} to {stop}: {reason}")]
    InvalidSweepRange {
        /// Starting value of the swept parameter.
        start: f64,
        /// Requested stopping value.
        stop: f64,
        /// Why the range was rejected.
        reason: &'static str,
    },
    /// Vertex-count sweeps advance by whole vertices only.
    #[error("vertex-count sweeps need a whole-number increment (got {got})")]
    FractionalVertexIncrement {
        /// The rejected increment.
        got: f64,
    },
    /// The sweep mode label was not recognised.
    #[error("unknown sweep mode `{provided}`; expected `V` or `P`")]
    UnknownSweepMode {
        /// Raw label supplied by the caller.
        provided: Arc<str>,
    },
    /// The worker thread pool could not be created.
    #[error("failed to start the trial worker pool: {message}")]
    ThreadPoolUnavailable {
        /// Message reported by the pool builder.
        message: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`SimulationError`] variants.
    enum SimulationErrorCode for SimulationError {
        /// Graphs need at least one vertex.
        InvalidVertexCount => InvalidVertexCount { .. } => "SIM_INVALID_VERTEX_COUNT",
        /// Edge probabilities must lie in `[0, 1]`.
        InvalidEdgeProbability => InvalidEdgeProbability { .. } => "SIM_INVALID_EDGE_PROBABILITY",
        /// At least one trial is required.
        InvalidTrialCount => InvalidTrialCount { .. } => "SIM_INVALID_TRIAL_COUNT",
        /// The worker pool needs at least one thread.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "SIM_INVALID_WORKER_COUNT",
        /// Sweep increments must be strictly positive.
        InvalidIncrement => InvalidIncrement { .. } => "SIM_INVALID_INCREMENT",
        /// The sweep range cannot be traversed.
        InvalidSweepRange => InvalidSweepRange { .. } => "SIM_INVALID_SWEEP_RANGE",
        /// Vertex-count sweeps advance by whole vertices only.
        FractionalVertexIncrement => FractionalVertexIncrement { .. } => "SIM_FRACTIONAL_VERTEX_INCREMENT",
        /// The sweep mode label was not recognised.
        UnknownSweepMode => UnknownSweepMode { .. } => "SIM_UNKNOWN_SWEEP_MODE",
        /// The worker thread pool could not be created.
        ThreadPoolUnavailable => ThreadPoolUnavailable { .. } => "SIM_THREAD_POOL_UNAVAILABLE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SimulationError>;
