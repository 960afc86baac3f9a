//! Layer abstractions for the network engine
//!
//! Only fully connected (dense) layers exist in this engine; a layer is
//! declared by a `DenseSpec` and its storage is bound by the network layout.

pub mod dense;

pub use dense::DenseSpec;
