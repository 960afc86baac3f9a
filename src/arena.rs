//! Buffer partitioning for network storage.
//!
//! The whole network lives inside one caller-owned `&mut [f32]`. This module
//! carves that buffer into per-layer regions (output, weights, errors and
//! cache, in that order) followed by a single trailing staging region the
//! size of the final layer's output, where the output error is written before
//! the first backward step. Regions are described by `Span` values (offset
//! plus length) instead of raw pointers, and resolved into slices through
//! bounds-checked views only after the whole layout has been validated.

use crate::layers::DenseSpec;

/// A (offset, length) descriptor into the shared buffer.
///
/// Spans never own data; they are bound once during layout and stay valid for
/// as long as the network borrows the buffer they index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    pub(crate) const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Number of elements the span covers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First element past the span.
    pub(crate) fn end(&self) -> usize {
        self.offset + self.len
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Resolve the span into a shared slice of `buffer`.
    pub fn view<'b>(&self, buffer: &'b [f32]) -> &'b [f32] {
        &buffer[self.offset..self.offset + self.len]
    }

    /// Resolve the span into a mutable slice of `buffer`.
    pub fn view_mut<'b>(&self, buffer: &'b mut [f32]) -> &'b mut [f32] {
        &mut buffer[self.offset..self.offset + self.len]
    }
}

/// The four regions belonging to one layer.
///
/// A layer's input is not listed here: it aliases the previous layer's
/// output span, and the first layer's input is supplied per call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayerRegions {
    pub output: Span,
    pub weights: Span,
    pub errors: Span,
    /// Reserved scratch; always zero-length for dense layers.
    pub cache: Span,
}

/// Result of partitioning: per-layer regions, the trailing staging span and
/// the total element count the buffer must provide.
pub(crate) struct Layout {
    pub regions: Vec<LayerRegions>,
    pub staging: Span,
    pub required: usize,
}

/// Assign ascending, non-overlapping spans for every layer region.
///
/// Purely a function of the spec sequence: identical specs produce identical
/// offsets on every call. No capacity is consulted here; callers compare
/// `Layout::required` against their buffer before resolving any span.
pub(crate) fn partition(specs: &[DenseSpec]) -> Layout {
    let mut cursor = 0usize;
    let mut regions = Vec::with_capacity(specs.len());
    for spec in specs {
        let output = Span::new(cursor, spec.outputs);
        cursor += output.len();
        let weights = Span::new(cursor, spec.weights_len());
        cursor += weights.len();
        let errors = Span::new(cursor, spec.inputs);
        cursor += errors.len();
        let cache = Span::new(cursor, 0);
        cursor += cache.len();
        regions.push(LayerRegions {
            output,
            weights,
            errors,
            cache,
        });
    }
    let staging = Span::new(cursor, specs.last().map_or(0, |s| s.outputs));
    cursor += staging.len();
    Layout {
        regions,
        staging,
        required: cursor,
    }
}

/// Minimum buffer length, in `f32` elements, needed to lay out `specs`.
///
/// This is the sum of every layer's output, weights, errors and cache
/// lengths plus one trailing region equal to the final layer's output
/// length. Independent of any actual buffer.
pub fn required_len(specs: &[DenseSpec]) -> usize {
    partition(specs).required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Activation;

    #[test]
    fn test_span_views() {
        let mut buffer = [0.0f32, 1.0, 2.0, 3.0, 4.0];
        let span = Span::new(1, 3);
        assert_eq!(span.view(&buffer), &[1.0, 2.0, 3.0]);
        span.view_mut(&mut buffer)[0] = 9.0;
        assert_eq!(buffer[1], 9.0);
    }

    #[test]
    fn test_partition_regions_are_adjacent() {
        let specs = [
            DenseSpec::new(2, 3, Activation::Sigmoid),
            DenseSpec::new(3, 1, Activation::Linear),
        ];
        let layout = partition(&specs);

        let mut cursor = 0;
        for (regions, spec) in layout.regions.iter().zip(&specs) {
            assert_eq!(regions.output.offset(), cursor);
            cursor += spec.outputs;
            assert_eq!(regions.weights.offset(), cursor);
            cursor += spec.weights_len();
            assert_eq!(regions.errors.offset(), cursor);
            cursor += spec.inputs;
            assert_eq!(regions.cache.offset(), cursor);
            assert!(regions.cache.is_empty());
        }
        assert_eq!(layout.staging.offset(), cursor);
        assert_eq!(layout.staging.len(), 1);
        assert_eq!(layout.required, cursor + 1);
    }

    #[test]
    fn test_required_len_formula() {
        let specs = [
            DenseSpec::new(2, 3, Activation::Sigmoid),
            DenseSpec::new(3, 1, Activation::Linear).without_bias(),
        ];
        // Layer 0: 3 outputs + 3*(2+1) weights + 2 errors = 14
        // Layer 1: 1 output + 1*3 weights + 3 errors = 7
        // Staging: 1
        assert_eq!(required_len(&specs), 22);
    }

    #[test]
    fn test_required_len_deterministic() {
        let specs = [
            DenseSpec::new(4, 10, Activation::Relu),
            DenseSpec::new(10, 3, Activation::Sigmoid),
        ];
        assert_eq!(required_len(&specs), required_len(&specs));
    }
}
