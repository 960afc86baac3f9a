// Behavioral training tests: online gradient steps must actually learn.
// Weight initialization is seeded, so these runs are deterministic.

use arena_nn::arena;
use arena_nn::layers::DenseSpec;
use arena_nn::network::Network;
use arena_nn::utils::{Activation, SimpleRng};

#[test]
fn test_single_unit_learns_or() {
    let x: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let y: [[f32; 1]; 4] = [[0.0], [1.0], [1.0], [1.0]];

    let specs = [DenseSpec::new(2, 1, Activation::Sigmoid)];
    let mut buffer = vec![0.0f32; arena::required_len(&specs)];
    let mut net = Network::layout(&specs, &mut buffer).unwrap();
    net.init_weights(&mut SimpleRng::new(42));

    for _ in 0..1000 {
        for (xi, yi) in x.iter().zip(y.iter()) {
            net.train(xi, yi, 1.0).unwrap();
        }
    }

    for (xi, yi) in x.iter().zip(y.iter()) {
        let z = net.predict(xi).unwrap();
        assert!(
            (z[0] - yi[0]).abs() < 0.1,
            "input {:?} predicted {} expected {}",
            xi,
            z[0],
            yi[0]
        );
    }
}

#[test]
fn test_hidden_layer_learns_xor() {
    let x: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let y: [[f32; 1]; 4] = [[0.0], [1.0], [1.0], [0.0]];

    let specs = [
        DenseSpec::new(2, 4, Activation::Sigmoid),
        DenseSpec::new(4, 1, Activation::Sigmoid),
    ];
    let mut buffer = vec![0.0f32; arena::required_len(&specs)];
    let mut net = Network::layout(&specs, &mut buffer).unwrap();
    net.init_weights(&mut SimpleRng::new(7));

    let mut converged = false;
    for _ in 0..10000 {
        let mut epoch_loss = 0.0f32;
        for (xi, yi) in x.iter().zip(y.iter()) {
            epoch_loss += net.train(xi, yi, 1.0).unwrap();
        }
        if epoch_loss < 0.02 {
            converged = true;
            break;
        }
    }
    assert!(converged, "failed to train");
}

#[test]
fn test_repeated_steps_reduce_loss() {
    let specs = [
        DenseSpec::new(2, 2, Activation::Sigmoid),
        DenseSpec::new(2, 2, Activation::Sigmoid),
    ];
    let mut buffer = vec![0.0f32; arena::required_len(&specs)];
    let mut net = Network::layout(&specs, &mut buffer).unwrap();
    net.set_weights(0, &[0.15, 0.2, 0.35, 0.25, 0.3, 0.35]).unwrap();
    net.set_weights(1, &[0.4, 0.45, 0.6, 0.5, 0.55, 0.6]).unwrap();

    let x = [0.05f32, 0.1];
    let y = [0.01f32, 0.99];
    let first = net.train(&x, &y, 0.5).unwrap();
    let mut last = first;
    for _ in 0..99 {
        last = net.train(&x, &y, 0.5).unwrap();
    }
    assert!(
        last < first / 10.0,
        "loss did not drop: first {first}, last {last}"
    );
}
