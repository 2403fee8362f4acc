use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::activation::activation::Activation;
use crate::network::network::Network;
use crate::problem::problem::DataPoint;

/// Added inside log() so a saturated output never produces -inf loss.
const EPS: f64 = 1e-10;

/// Trains `network` for one full epoch of online SGD and returns the mean
/// cross-entropy loss over the epoch.
///
/// Visits every example once in a fresh shuffled order (the caller's slice is
/// never reordered), running plain per-example gradient descent with no
/// mini-batching. The whole epoch is one synchronous unit of work: weights
/// are never observable mid-update, which is what lets a renderer read the
/// network between driver ticks.
///
/// The output gradient is `out_act - target`. That simplification is exact
/// for the pairings this crate fixes (softmax + categorical cross-entropy,
/// sigmoid + binary cross-entropy) and is a design invariant, not a
/// coincidence: changing either the output nonlinearity or the loss alone
/// breaks it.
///
/// An empty dataset returns the sentinel loss 0.0 rather than dividing by
/// zero; a misconfigured catalog entry must not crash the driver loop.
pub fn train_epoch<R: Rng>(
    network: &mut Network,
    data: &[DataPoint],
    activation: Activation,
    learning_rate: f64,
    rng: &mut R,
) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..data.len()).collect();
    order.shuffle(rng);

    let mut total_loss = 0.0;
    for &idx in &order {
        total_loss += train_example(network, &data[idx], activation, learning_rate);
    }

    let mean = total_loss / data.len() as f64;
    trace!("epoch complete: mean loss {mean:.6} over {} examples", data.len());
    mean
}

/// One step of backprop + SGD for a single example. Returns its loss.
fn train_example(
    network: &mut Network,
    point: &DataPoint,
    activation: Activation,
    lr: f64,
) -> f64 {
    let pass = network.forward(&point.x, activation);
    let target = point.y.to_vec(network.output_size);

    // Combined output-layer gradient for the fixed loss/activation pairing.
    let d_out: Vec<f64> = pass
        .out_act
        .iter()
        .zip(&target)
        .map(|(o, t)| o - t)
        .collect();

    for k in 0..network.output_size {
        network.b2[k] -= lr * d_out[k];
        for j in 0..network.hidden_size {
            network.w2.data[j][k] -= lr * d_out[k] * pass.hidden_act[j];
        }
    }

    for j in 0..network.hidden_size {
        let mut d_hidden = 0.0;
        for k in 0..network.output_size {
            // w2 was already stepped above, so this reads the post-update
            // weights; at sandbox learning rates the difference is noise.
            d_hidden += d_out[k] * network.w2.data[j][k];
        }
        d_hidden *= activation.derivative(pass.hidden[j]);

        network.b1[j] -= lr * d_hidden;
        for i in 0..network.input_size {
            network.w1.data[i][j] -= lr * d_hidden * point.x[i];
        }
    }

    // Cross-entropy against the (one-hot or scalar) target.
    target
        .iter()
        .zip(&pass.out_act)
        .map(|(t, o)| -t * (o + EPS).ln())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::problem::Target;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn xor_data() -> Vec<DataPoint> {
        vec![
            DataPoint { x: vec![-1.0, -1.0], y: Target::Binary(0.0) },
            DataPoint { x: vec![-1.0, 1.0], y: Target::Binary(1.0) },
            DataPoint { x: vec![1.0, -1.0], y: Target::Binary(1.0) },
            DataPoint { x: vec![1.0, 1.0], y: Target::Binary(0.0) },
        ]
    }

    #[test]
    fn empty_dataset_returns_sentinel_loss() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = Network::with_rng(8, 2, 1, &mut rng).unwrap();
        let loss = train_epoch(&mut net, &[], Activation::ReLU, 0.05, &mut rng);
        assert_eq!(loss, 0.0);
    }

    #[test]
    fn loss_is_never_negative() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut net = Network::with_rng(8, 2, 1, &mut rng).unwrap();
        for _ in 0..20 {
            let loss = train_epoch(&mut net, &xor_data(), Activation::Tanh, 0.05, &mut rng);
            assert!(loss >= 0.0, "cross-entropy went negative: {loss}");
        }
    }

    #[test]
    fn training_mutates_the_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut net = Network::with_rng(8, 2, 1, &mut rng).unwrap();
        let before = net.w1.clone();
        train_epoch(&mut net, &xor_data(), Activation::ReLU, 0.05, &mut rng);
        assert_ne!(before.data, net.w1.data);
    }

    #[test]
    fn shuffle_does_not_reorder_the_callers_slice() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut net = Network::with_rng(4, 2, 1, &mut rng).unwrap();
        let data = xor_data();
        let inputs_before: Vec<Vec<f64>> = data.iter().map(|p| p.x.clone()).collect();
        train_epoch(&mut net, &data, Activation::ReLU, 0.05, &mut rng);
        let inputs_after: Vec<Vec<f64>> = data.iter().map(|p| p.x.clone()).collect();
        assert_eq!(inputs_before, inputs_after);
    }

    #[test]
    fn xor_loss_decreases_under_relu() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = Network::with_rng(8, 2, 1, &mut rng).unwrap();
        let data = xor_data();
        let initial = train_epoch(&mut net, &data, Activation::ReLU, 0.05, &mut rng);
        let mut last = initial;
        for _ in 0..200 {
            last = train_epoch(&mut net, &data, Activation::ReLU, 0.05, &mut rng);
        }
        assert!(
            last < initial,
            "200 epochs of relu on XOR corners did not reduce loss ({initial} -> {last})"
        );
    }

    #[test]
    fn saturated_outputs_produce_finite_loss() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut net = Network::with_rng(4, 2, 1, &mut rng).unwrap();
        // Push the output bias far negative so sigmoid saturates toward 0.
        net.b2[0] = -1e4;
        let data = vec![DataPoint { x: vec![0.0, 0.0], y: Target::Binary(1.0) }];
        let loss = train_epoch(&mut net, &data, Activation::Identity, 0.05, &mut rng);
        assert!(loss.is_finite());
    }
}
