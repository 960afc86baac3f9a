//! Error types for network layout and execution.
//!
//! Every failure in this crate is deterministic and local: a buffer that is
//! too small, a dimension that does not line up, or a configuration value
//! that does not parse. Nothing is transient, so there is no retry surface.

use thiserror::Error;

/// All error conditions raised by layout, predict and train.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The supplied buffer cannot hold every layer region plus the trailing
    /// staging area. `required` is the total the layout needs, in `f32`
    /// elements, so callers can re-allocate and retry with a correct size.
    #[error("buffer too small: layout requires {required} elements, buffer holds {available}")]
    BufferTooSmall { required: usize, available: usize },

    /// A declared or supplied vector length does not match what the network
    /// expects (adjacent layers that do not chain, or a wrong-sized
    /// input/target/weight slice).
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An activation name that is not part of the closed set.
    #[error("unknown activation '{0}', must be one of: linear, relu, leaky_relu, sigmoid, softplus")]
    InvalidActivation(String),

    /// A network was declared with no layers at all.
    #[error("network must have at least one layer")]
    EmptyNetwork,

    /// A layer was declared with zero inputs or zero outputs.
    #[error("layer {index} has zero inputs or outputs")]
    ZeroSizedLayer { index: usize },
}
