//! Activation functions for dense layers
//!
//! The engine supports a closed set of elementwise activations. Each variant
//! knows how to apply itself to a pre-activation sum and how to compute its
//! derivative from the post-activation output value, which is the form the
//! backward pass needs (the output vector is what survives the forward pass).

use std::str::FromStr;

use crate::error::NetworkError;

/// Slope applied to negative pre-activation sums by leaky ReLU.
const LEAKY_SLOPE: f32 = 0.01;

/// Elementwise activation applied after a layer's weighted sum.
///
/// The set is closed; configuration strings that name anything else are
/// rejected while parsing, so an unrecognized variant can never reach the
/// forward or backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Identity: the weighted sum is the output.
    Linear,
    /// max(0, x)
    Relu,
    /// x for positive sums, 0.01·x otherwise.
    LeakyRelu,
    /// 1 / (1 + e^−x)
    Sigmoid,
    /// ln(1 + e^x)
    Softplus,
}

impl Activation {
    /// Apply the activation to a pre-activation sum.
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_SLOPE * x
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Softplus => (1.0 + x.exp()).ln(),
        }
    }

    /// Derivative with respect to the pre-activation sum, computed from the
    /// post-activation output value `output`.
    ///
    /// For sigmoid this is the familiar y·(1−y); relu and leaky relu read
    /// their slope off the sign of the output. Softplus uses the sigmoid of
    /// the output, matching the reference numerics for this engine family.
    pub fn derivative(self, output: f32) -> f32 {
        match self {
            Activation::Linear => 1.0,
            Activation::Relu => {
                if output > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::LeakyRelu => {
                if output > 0.0 {
                    1.0
                } else {
                    LEAKY_SLOPE
                }
            }
            Activation::Sigmoid => output * (1.0 - output),
            Activation::Softplus => 1.0 / (1.0 + (-output).exp()),
        }
    }

    /// Configuration name of the activation.
    pub fn name(self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::Relu => "relu",
            Activation::LeakyRelu => "leaky_relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Softplus => "softplus",
        }
    }
}

impl FromStr for Activation {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Activation::Linear),
            "relu" => Ok(Activation::Relu),
            "leaky_relu" => Ok(Activation::LeakyRelu),
            "sigmoid" => Ok(Activation::Sigmoid),
            "softplus" => Ok(Activation::Softplus),
            other => Err(NetworkError::InvalidActivation(other.to_string())),
        }
    }
}
