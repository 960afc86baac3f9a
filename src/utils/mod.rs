//! Shared utilities for the network engine
//!
//! This module provides the activation function set and a small seedable
//! random number generator used for weight initialization.

pub mod activations;
pub mod rng;

pub use activations::Activation;
pub use rng::SimpleRng;
