//! Network declaration from JSON configuration files
//!
//! This module lets callers declare a network structure in JSON and build
//! the corresponding layer specs without code changes. Declarations are
//! validated before any layout happens, so a bad file never reaches the
//! buffer-partitioning step.
//!
//! # Example
//!
//! ```json
//! {
//!   "layers": [
//!     { "inputs": 2, "outputs": 4, "activation": "sigmoid" },
//!     { "inputs": 4, "outputs": 1, "activation": "sigmoid", "bias": false }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fs;

use crate::layers::DenseSpec;
use crate::utils::Activation;

/// Configuration for a single dense layer.
///
/// `activation` defaults to `"sigmoid"` and `bias` to `true` when omitted,
/// matching the engine's dense-layer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerConfig {
    /// Number of input neurons.
    pub inputs: usize,

    /// Number of output neurons.
    pub outputs: usize,

    /// Activation name: "linear", "relu", "leaky_relu", "sigmoid" or
    /// "softplus".
    pub activation: Option<String>,

    /// Whether the layer carries bias terms.
    pub bias: Option<bool>,
}

/// Configuration for the entire network.
///
/// Layers are applied in the order they appear.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Sequence of layer configurations defining the network structure.
    pub layers: Vec<LayerConfig>,
}

/// Loads a network configuration from a JSON file.
///
/// Reads the file at `path`, deserializes its JSON contents and validates
/// the declaration.
///
/// # Returns
///
/// `Ok(NetworkConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or validation fails.
pub fn load_network(path: &str) -> Result<NetworkConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let config: NetworkConfig = serde_json::from_str(&contents)?;
    validate_network(&config)?;
    Ok(config)
}

/// Validates a network configuration.
///
/// Checks that:
/// - The network has at least one layer
/// - Every layer has nonzero input and output counts
/// - Every activation name is recognized
/// - Each layer's output count matches the next layer's input count
fn validate_network(config: &NetworkConfig) -> Result<(), Box<dyn Error>> {
    if config.layers.is_empty() {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Network must have at least one layer",
        )));
    }

    for (i, layer) in config.layers.iter().enumerate() {
        if layer.inputs == 0 {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Layer {}: inputs must be greater than 0", i),
            )));
        }
        if layer.outputs == 0 {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Layer {}: outputs must be greater than 0", i),
            )));
        }
        if let Some(ref activation) = layer.activation {
            if activation.parse::<Activation>().is_err() {
                return Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "Layer {}: invalid activation '{}'. Must be one of: linear, relu, leaky_relu, sigmoid, softplus",
                        i, activation
                    ),
                )));
            }
        }
    }

    for i in 0..config.layers.len() - 1 {
        let current = &config.layers[i];
        let next = &config.layers[i + 1];
        if current.outputs != next.inputs {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Layer connection mismatch: Layer {} output size ({}) does not match Layer {} input size ({})",
                    i, current.outputs, i + 1, next.inputs
                ),
            )));
        }
    }

    Ok(())
}

/// Builds layer specs from a network configuration.
///
/// Resolves the per-layer defaults (sigmoid activation, bias enabled) and
/// returns the spec sequence ready for `Network::layout`.
pub fn build_specs(config: &NetworkConfig) -> Result<Vec<DenseSpec>, Box<dyn Error>> {
    validate_network(config)?;

    let mut specs = Vec::with_capacity(config.layers.len());
    for layer in &config.layers {
        let activation = match layer.activation {
            Some(ref name) => name.parse::<Activation>()?,
            None => Activation::Sigmoid,
        };
        let mut spec = DenseSpec::new(layer.inputs, layer.outputs, activation);
        if layer.bias == Some(false) {
            spec = spec.without_bias();
        }
        specs.push(spec);
    }
    Ok(specs)
}
