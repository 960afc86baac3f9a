//! Whole-network layout, inference and training.
//!
//! A `Network` is built by laying out a sequence of layer specs over a
//! caller-supplied buffer. Layout validates the declaration and partitions
//! the buffer exactly once; predict and train then run entirely inside it,
//! with each layer's input aliasing the previous layer's output region.

use std::io::{self, Write};

use crate::arena::{self, LayerRegions, Span};
use crate::error::NetworkError;
use crate::layers::DenseSpec;
use crate::utils::SimpleRng;

/// A layer spec together with its bound buffer regions.
struct BoundLayer {
    spec: DenseSpec,
    regions: LayerRegions,
}

/// A feedforward network bound to a caller-owned `f32` buffer.
///
/// The network borrows the buffer for its whole lifetime, so any output view
/// returned by [`Network::predict`] is invalidated by the next predict or
/// train call, and the buffer cannot be touched from outside while the
/// network exists. Laying the same specs out over a different buffer simply
/// constructs a new network.
///
/// # Example
///
/// ```
/// use arena_nn::arena;
/// use arena_nn::layers::DenseSpec;
/// use arena_nn::network::Network;
/// use arena_nn::utils::Activation;
///
/// let specs = [
///     DenseSpec::new(2, 4, Activation::Sigmoid),
///     DenseSpec::new(4, 1, Activation::Sigmoid),
/// ];
/// let mut buffer = vec![0.0f32; arena::required_len(&specs)];
/// let mut net = Network::layout(&specs, &mut buffer).unwrap();
/// let out = net.predict(&[0.0, 1.0]).unwrap();
/// assert_eq!(out.len(), 1);
/// ```
pub struct Network<'a> {
    layers: Vec<BoundLayer>,
    /// Trailing region where the output error is staged before the first
    /// backward step.
    staging: Span,
    buffer: &'a mut [f32],
}

impl<'a> Network<'a> {
    /// Validate `specs` and partition `buffer` into per-layer regions.
    ///
    /// The declaration must be non-empty, free of zero-sized layers, and
    /// each layer's output count must equal the next layer's input count.
    /// If the buffer is smaller than the layout requires, no region is
    /// bound and the error reports the required length so the caller can
    /// resize. Layout is deterministic: the same specs produce the same
    /// offsets every time.
    pub fn layout(specs: &[DenseSpec], buffer: &'a mut [f32]) -> Result<Self, NetworkError> {
        if specs.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        for (index, spec) in specs.iter().enumerate() {
            if spec.inputs == 0 || spec.outputs == 0 {
                return Err(NetworkError::ZeroSizedLayer { index });
            }
        }
        for pair in specs.windows(2) {
            if pair[0].outputs != pair[1].inputs {
                return Err(NetworkError::DimensionMismatch {
                    expected: pair[0].outputs,
                    actual: pair[1].inputs,
                });
            }
        }

        let layout = arena::partition(specs);
        if layout.required > buffer.len() {
            return Err(NetworkError::BufferTooSmall {
                required: layout.required,
                available: buffer.len(),
            });
        }

        let layers = specs
            .iter()
            .zip(layout.regions)
            .map(|(&spec, regions)| BoundLayer { spec, regions })
            .collect();
        Ok(Self {
            layers,
            staging: layout.staging,
            buffer,
        })
    }

    /// Number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Input length the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers[0].spec.inputs
    }

    /// Output length the last layer produces.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].spec.outputs
    }

    /// Weight vector of the given layer.
    ///
    /// # Panics
    ///
    /// Panics if `layer` is out of range.
    pub fn weights(&self, layer: usize) -> &[f32] {
        self.layers[layer].regions.weights.view(self.buffer)
    }

    /// Overwrite the weight vector of the given layer.
    ///
    /// `values` must match the layer's weight length exactly: with bias,
    /// one row of `inputs + 1` elements per output neuron (bias last);
    /// without bias, `inputs` elements per row.
    ///
    /// # Panics
    ///
    /// Panics if `layer` is out of range.
    pub fn set_weights(&mut self, layer: usize, values: &[f32]) -> Result<(), NetworkError> {
        let span = self.layers[layer].regions.weights;
        if values.len() != span.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: span.len(),
                actual: values.len(),
            });
        }
        span.view_mut(self.buffer).copy_from_slice(values);
        Ok(())
    }

    /// Initialize every layer's weights with Xavier/Glorot uniform samples.
    ///
    /// Weight entries are drawn from ±sqrt(6 / (inputs + outputs)); bias
    /// slots are set to zero. Deterministic for a given RNG seed.
    pub fn init_weights(&mut self, rng: &mut SimpleRng) {
        for layer in &self.layers {
            let spec = layer.spec;
            let limit = (6.0f32 / (spec.inputs + spec.outputs) as f32).sqrt();
            let n = spec.stride();
            let weights = layer.regions.weights.view_mut(self.buffer);
            for row in weights.chunks_exact_mut(n) {
                for w in row[..spec.inputs].iter_mut() {
                    *w = rng.gen_range_f32(-limit, limit);
                }
                if spec.bias {
                    row[n - 1] = 0.0;
                }
            }
        }
    }

    /// Run inference: forward-propagate `x` through every layer and return
    /// the final output as a view into the buffer.
    ///
    /// The view is borrowed from the network and invalidated by the next
    /// predict or train call.
    pub fn predict(&mut self, x: &[f32]) -> Result<&[f32], NetworkError> {
        let expected = self.input_size();
        if x.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }
        self.run_forward(x);
        let last = self.layers.len() - 1;
        Ok(self.layers[last].regions.output.view(self.buffer))
    }

    /// Run one online training step and return the loss.
    ///
    /// Performs a forward pass, writes the output error `y[i] − output[i]`
    /// into the staging region (accumulating the squared error divided by
    /// the output length as the loss), then backward-propagates from the
    /// last layer to the first, each layer consuming the error vector the
    /// layer above produced. Exactly one gradient step per call.
    pub fn train(&mut self, x: &[f32], y: &[f32], rate: f32) -> Result<f32, NetworkError> {
        let expected = self.input_size();
        if x.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }
        let out_len = self.output_size();
        if y.len() != out_len {
            return Err(NetworkError::DimensionMismatch {
                expected: out_len,
                actual: y.len(),
            });
        }

        self.run_forward(x);

        let last_output = self.layers[self.layers.len() - 1].regions.output;
        let (head, rest) = self.buffer.split_at_mut(self.staging.offset());
        let staging = &mut rest[..self.staging.len()];
        let output = last_output.view(head);
        let mut loss = 0.0f32;
        for ((e, &target), &out) in staging.iter_mut().zip(y.iter()).zip(output.iter()) {
            *e = target - out;
            loss += *e * *e / out_len as f32;
        }

        let mut upstream = self.staging;
        for index in (0..self.layers.len()).rev() {
            self.backward_layer(index, x, upstream, rate);
            upstream = self.layers[index].regions.errors;
        }
        Ok(loss)
    }

    /// Write every layer's current vectors to `out` for inspection.
    ///
    /// Purely diagnostic: reads the buffer, never mutates it. The first
    /// layer's input is supplied per call and therefore not stored.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (index, layer) in self.layers.iter().enumerate() {
            writeln!(out, "LAYER {index}")?;
            if index > 0 {
                let input = self.layers[index - 1].regions.output.view(self.buffer);
                dump_vec(out, "X", input)?;
            } else {
                writeln!(out, "  X: (caller input)")?;
            }
            dump_vec(out, "Y", layer.regions.output.view(self.buffer))?;
            dump_vec(out, "W", layer.regions.weights.view(self.buffer))?;
            dump_vec(out, "E", layer.regions.errors.view(self.buffer))?;
            dump_vec(out, "C", layer.regions.cache.view(self.buffer))?;
        }
        Ok(())
    }

    fn run_forward(&mut self, x: &[f32]) {
        for index in 0..self.layers.len() {
            self.forward_layer(index, x);
        }
    }

    /// Forward one layer, resolving its spans into disjoint slices.
    ///
    /// Regions ascend through the buffer (input < output < weights), so a
    /// pair of splits yields the input view, the output slice and the
    /// weight view simultaneously.
    fn forward_layer(&mut self, index: usize, x: &[f32]) {
        let spec = self.layers[index].spec;
        let regions = self.layers[index].regions;

        let (head, rest) = self.buffer.split_at_mut(regions.output.offset());
        let (output, rest) = rest.split_at_mut(regions.output.len());
        let weights_rel = regions.weights.offset() - regions.output.end();
        let weights = &rest[weights_rel..weights_rel + regions.weights.len()];
        let input = if index == 0 {
            x
        } else {
            self.layers[index - 1].regions.output.view(head)
        };
        spec.forward(input, weights, output);
    }

    /// Backward one layer against the `upstream` error span (the staging
    /// region for the last layer, the layer above's error region otherwise).
    ///
    /// Span order in the buffer is input < output < weights < errors <
    /// upstream, so successive splits produce all five views at once.
    fn backward_layer(&mut self, index: usize, x: &[f32], upstream: Span, rate: f32) {
        let spec = self.layers[index].spec;
        let regions = self.layers[index].regions;

        let (head, rest) = self.buffer.split_at_mut(regions.weights.offset());
        let (weights, rest) = rest.split_at_mut(regions.weights.len());
        let errors_rel = regions.errors.offset() - regions.weights.end();
        let (errors_zone, rest) = rest.split_at_mut(errors_rel + regions.errors.len());
        let errors = &mut errors_zone[errors_rel..];
        let upstream_rel = upstream.offset() - regions.errors.end();
        let upstream = &rest[upstream_rel..upstream_rel + upstream.len()];

        let output = regions.output.view(head);
        let input = if index == 0 {
            x
        } else {
            self.layers[index - 1].regions.output.view(head)
        };
        spec.backward(input, output, weights, errors, upstream, rate);
    }
}

fn dump_vec<W: Write>(out: &mut W, label: &str, values: &[f32]) -> io::Result<()> {
    write!(out, "  {label}:")?;
    for value in values {
        write!(out, " {value:.2}")?;
    }
    writeln!(out)
}
