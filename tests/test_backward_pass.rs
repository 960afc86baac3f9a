// Tests for backward propagation against the classic worked 2-2-2 example:
// forward outputs, rate-zero loss, and the exact weight values after one
// gradient step. These numbers only come out right if every layer computes
// its full propagated-error vector from pre-update weights before mutating
// anything.

use approx::assert_relative_eq;

use arena_nn::arena;
use arena_nn::layers::DenseSpec;
use arena_nn::network::Network;
use arena_nn::utils::Activation;

const LAYER0_WEIGHTS: [f32; 6] = [0.15, 0.2, 0.35, 0.25, 0.3, 0.35];
const LAYER1_WEIGHTS: [f32; 6] = [0.4, 0.45, 0.6, 0.5, 0.55, 0.6];
const X: [f32; 2] = [0.05, 0.1];
const Y: [f32; 2] = [0.01, 0.99];

fn fixture_network(buffer: &mut Vec<f32>) -> Network<'_> {
    let specs = [
        DenseSpec::new(2, 2, Activation::Sigmoid),
        DenseSpec::new(2, 2, Activation::Sigmoid),
    ];
    buffer.resize(arena::required_len(&specs), 0.0);
    let mut net = Network::layout(&specs, buffer).unwrap();
    net.set_weights(0, &LAYER0_WEIGHTS).unwrap();
    net.set_weights(1, &LAYER1_WEIGHTS).unwrap();
    net
}

fn assert_weights_eq(actual: &[f32], expected: &[f32], epsilon: f32) {
    assert_eq!(actual.len(), expected.len());
    for (&a, &e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(a, e, epsilon = epsilon);
    }
}

#[test]
fn test_forward_reference_outputs() {
    let mut buffer = Vec::new();
    let mut net = fixture_network(&mut buffer);
    let z = net.predict(&X).unwrap();
    assert_relative_eq!(z[0], 0.75136507, epsilon = 1e-4);
    assert_relative_eq!(z[1], 0.772928465, epsilon = 1e-4);
}

#[test]
fn test_rate_zero_reports_loss_without_touching_weights() {
    let mut buffer = Vec::new();
    let mut net = fixture_network(&mut buffer);

    let loss = net.train(&X, &Y, 0.0).unwrap();
    assert_relative_eq!(loss, 0.298371109, epsilon = 1e-4);

    assert_weights_eq(net.weights(0), &LAYER0_WEIGHTS, 1e-6);
    assert_weights_eq(net.weights(1), &LAYER1_WEIGHTS, 1e-6);
}

#[test]
fn test_one_gradient_step_matches_reference_weights() {
    let mut buffer = Vec::new();
    let mut net = fixture_network(&mut buffer);

    net.train(&X, &Y, 0.5).unwrap();

    assert_weights_eq(
        net.weights(1),
        &[
            0.35891648, 0.408666186, 0.530751, 0.51130127, 0.561370121, 0.619049,
        ],
        1e-3,
    );
    assert_weights_eq(
        net.weights(0),
        &[
            0.149780716, 0.19956143, 0.345614, 0.24975114, 0.29950229, 0.345023,
        ],
        1e-3,
    );
}

#[test]
fn test_perfect_target_leaves_weights_unchanged() {
    let mut buffer = Vec::new();
    let mut net = fixture_network(&mut buffer);

    // Training toward the network's own prediction produces a zero error
    // vector, a zero loss, and no weight movement even at a large rate.
    let prediction = net.predict(&X).unwrap().to_vec();
    let loss = net.train(&X, &prediction, 1.0).unwrap();

    assert_relative_eq!(loss, 0.0, epsilon = 1e-10);
    assert_weights_eq(net.weights(0), &LAYER0_WEIGHTS, 1e-6);
    assert_weights_eq(net.weights(1), &LAYER1_WEIGHTS, 1e-6);
}
