//! Dense (fully connected) layer: declaration and per-layer math.
//!
//! A `DenseSpec` declares the static configuration of one layer: input and
//! output counts, activation variant and bias presence. The forward and
//! backward routines operate on plain slices; the network resolves each
//! layer's arena spans into those slices and guarantees the lengths line up,
//! so the math here can stay free of any storage concerns.
//!
//! Weights are stored row-major with one row per output neuron. With bias
//! enabled each row carries a trailing bias element, so the row stride is
//! `inputs + 1`; without bias the stride is exactly `inputs` and no bias
//! slot exists anywhere in the vector.

use crate::utils::Activation;

/// Static configuration of a dense layer.
///
/// # Example
///
/// ```
/// use arena_nn::layers::DenseSpec;
/// use arena_nn::utils::Activation;
///
/// let spec = DenseSpec::new(3, 1, Activation::Sigmoid);
/// assert_eq!(spec.weights_len(), 4); // 1 row of 3 weights + bias
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenseSpec {
    /// Number of input neurons (the previous layer's output count, or the
    /// network input count for the first layer).
    pub inputs: usize,
    /// Number of output neurons.
    pub outputs: usize,
    /// Elementwise activation applied after the weighted sum.
    pub activation: Activation,
    /// Whether each output neuron carries a bias term.
    pub bias: bool,
}

impl DenseSpec {
    /// Declare a dense layer with bias enabled.
    pub fn new(inputs: usize, outputs: usize, activation: Activation) -> Self {
        Self {
            inputs,
            outputs,
            activation,
            bias: true,
        }
    }

    /// Disable the bias term for this layer.
    pub fn without_bias(mut self) -> Self {
        self.bias = false;
        self
    }

    /// Elements per weight row (the trailing element is the bias when
    /// present).
    pub(crate) fn stride(&self) -> usize {
        if self.bias {
            self.inputs + 1
        } else {
            self.inputs
        }
    }

    /// Total length of the layer's weight vector.
    pub fn weights_len(&self) -> usize {
        self.outputs * self.stride()
    }

    /// Forward pass: compute `output` from `input` and `weights`.
    ///
    /// For each output neuron the weighted sum over all inputs is taken,
    /// the bias added unless disabled, and the activation applied. The
    /// output slice is overwritten in place; nothing is allocated.
    ///
    /// # Panics
    ///
    /// Panics if any slice length disagrees with the spec. The network
    /// validates lengths before resolving spans, so this only fires on
    /// direct misuse.
    pub fn forward(&self, input: &[f32], weights: &[f32], output: &mut [f32]) {
        assert_eq!(input.len(), self.inputs, "input length mismatch");
        assert_eq!(output.len(), self.outputs, "output length mismatch");
        assert_eq!(weights.len(), self.weights_len(), "weight length mismatch");

        let n = self.stride();
        for (row, out) in weights.chunks_exact(n).zip(output.iter_mut()) {
            let mut sum = 0.0f32;
            for (&w, &x) in row.iter().zip(input.iter()) {
                sum += w * x;
            }
            if self.bias {
                sum += row[n - 1];
            }
            *out = self.activation.apply(sum);
        }
    }

    /// Backward pass: propagate the error and apply one gradient step.
    ///
    /// `output` must hold this layer's post-activation values from the most
    /// recent forward pass, and `upstream` the error at the output side (one
    /// entry per output neuron, oriented target-minus-prediction). Two
    /// passes run in a fixed order:
    ///
    /// 1. The propagated error for every input neuron j,
    ///    `errors[j] = Σᵢ upstream[i] · act'(output[i]) · weights[i,j]`,
    ///    is written out in full first.
    /// 2. Every weight is then incremented by
    ///    `rate · upstream[i] · act'(output[i]) · input[j]`, the bias slot
    ///    by the same step without the input factor.
    ///
    /// The error sums must see the weights as they were before this call's
    /// updates, which is why pass 1 completes before pass 2 touches
    /// anything.
    ///
    /// # Panics
    ///
    /// Panics if any slice length disagrees with the spec.
    pub fn backward(
        &self,
        input: &[f32],
        output: &[f32],
        weights: &mut [f32],
        errors: &mut [f32],
        upstream: &[f32],
        rate: f32,
    ) {
        assert_eq!(input.len(), self.inputs, "input length mismatch");
        assert_eq!(output.len(), self.outputs, "output length mismatch");
        assert_eq!(weights.len(), self.weights_len(), "weight length mismatch");
        assert_eq!(errors.len(), self.inputs, "error length mismatch");
        assert_eq!(upstream.len(), self.outputs, "upstream error length mismatch");

        let n = self.stride();
        for (j, err) in errors.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (i, (&e, &y)) in upstream.iter().zip(output.iter()).enumerate() {
                sum += e * self.activation.derivative(y) * weights[i * n + j];
            }
            *err = sum;
        }

        for (i, row) in weights.chunks_exact_mut(n).enumerate() {
            let step = rate * upstream[i] * self.activation.derivative(output[i]);
            for (w, &x) in row.iter_mut().zip(input.iter()) {
                *w += step * x;
            }
            if self.bias {
                row[n - 1] += step;
            }
        }
    }
}
