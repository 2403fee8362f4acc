use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::{sigmoid, Activation};
use crate::error::SandboxError;
use crate::math::matrix::Matrix;

/// A fully-connected network with one hidden layer.
///
/// The struct is plain mutable state; all behavior lives in pure functions
/// over it (`forward`, `predict`) and in `train::epoch::train_epoch`, which
/// mutates the weights in place. Layer sizes are fixed at construction;
/// resizing the hidden layer means discarding the network and building a new
/// one, which is what the session store does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    /// input_size × hidden_size
    pub w1: Matrix,
    /// length hidden_size
    pub b1: Vec<f64>,
    /// hidden_size × output_size
    pub w2: Matrix,
    /// length output_size
    pub b2: Vec<f64>,
}

/// Every intermediate of one forward pass, kept for backprop and rendering.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// Hidden pre-activations, z₁ = x·W₁ + b₁.
    pub hidden: Vec<f64>,
    /// Hidden activations, a₁ = f(z₁).
    pub hidden_act: Vec<f64>,
    /// Output pre-activations, z₂ = a₁·W₂ + b₂.
    pub out: Vec<f64>,
    /// Output activations: sigmoid(z₂) for binary, softmax(z₂) for multi-class.
    pub out_act: Vec<f64>,
}

/// Result of `Network::predict`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prediction {
    /// Binary networks: the raw sigmoid probability, not thresholded.
    Probability(f64),
    /// Multi-class networks: argmax of the softmax, first occurrence on ties.
    Class(usize),
}

impl Network {
    /// Builds a network with all weights and biases uniform in [-1, 1],
    /// drawn from `thread_rng`.
    pub fn new(
        hidden_size: usize,
        input_size: usize,
        output_size: usize,
    ) -> Result<Network, SandboxError> {
        Network::with_rng(hidden_size, input_size, output_size, &mut rand::thread_rng())
    }

    /// Like `new`, but with an injected randomness source for seeded tests.
    pub fn with_rng<R: Rng>(
        hidden_size: usize,
        input_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Network, SandboxError> {
        for (which, value) in [
            ("input", input_size),
            ("hidden", hidden_size),
            ("output", output_size),
        ] {
            if value == 0 {
                return Err(SandboxError::InvalidLayerSize { which, value });
            }
        }

        Ok(Network::init(hidden_size, input_size, output_size, rng))
    }

    /// Construction without size validation, for internal callers whose
    /// dimensions were already checked (the session store rebuilds networks
    /// from catalog problems and bounds-validated hidden sizes).
    pub(crate) fn init<R: Rng>(
        hidden_size: usize,
        input_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Network {
        Network {
            input_size,
            hidden_size,
            output_size,
            w1: Matrix::uniform(input_size, hidden_size, rng),
            b1: (0..hidden_size).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect(),
            w2: Matrix::uniform(hidden_size, output_size, rng),
            b2: (0..output_size).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect(),
        }
    }

    /// Forward pass. Pure: no stored activations, no rng, so the renderer can
    /// query it per pixel while training is paused between epochs.
    ///
    /// The output nonlinearity is fixed by `output_size` (sigmoid for one
    /// unit, softmax with max-subtraction otherwise) regardless of
    /// the hidden activation chosen.
    pub fn forward(&self, x: &[f64], activation: Activation) -> ForwardPass {
        let hidden: Vec<f64> = (0..self.hidden_size)
            .map(|j| {
                let mut sum = self.b1[j];
                for i in 0..self.input_size {
                    sum += x[i] * self.w1.data[i][j];
                }
                sum
            })
            .collect();

        let hidden_act: Vec<f64> = hidden.iter().map(|&z| activation.function(z)).collect();

        let out: Vec<f64> = (0..self.output_size)
            .map(|k| {
                let mut sum = self.b2[k];
                for j in 0..self.hidden_size {
                    sum += hidden_act[j] * self.w2.data[j][k];
                }
                sum
            })
            .collect();

        let out_act = if self.output_size == 1 {
            vec![sigmoid(out[0])]
        } else {
            softmax(&out)
        };

        ForwardPass { hidden, hidden_act, out, out_act }
    }

    /// Prediction for display: probability for binary, class index otherwise.
    pub fn predict(&self, x: &[f64], activation: Activation) -> Prediction {
        let pass = self.forward(x, activation);
        if self.output_size == 1 {
            Prediction::Probability(pass.out_act[0])
        } else {
            Prediction::Class(argmax(&pass.out_act))
        }
    }
}

/// Numerically stable softmax: subtracting the max changes nothing
/// mathematically but keeps every exponent ≤ 0.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the maximum element; first occurrence wins ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn net(hidden: usize, input: usize, output: usize, seed: u64) -> Network {
        Network::with_rng(hidden, input, output, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn construction_produces_exact_shapes() {
        for (input, hidden, output) in [(2, 8, 1), (2, 16, 17), (3, 4, 9), (1, 32, 2)] {
            let n = net(hidden, input, output, 1);
            assert_eq!((n.w1.rows, n.w1.cols), (input, hidden));
            assert_eq!(n.b1.len(), hidden);
            assert_eq!((n.w2.rows, n.w2.cols), (hidden, output));
            assert_eq!(n.b2.len(), output);
        }
    }

    #[test]
    fn zero_sized_layers_fail_construction() {
        let err = Network::new(0, 2, 1).unwrap_err();
        assert!(matches!(err, SandboxError::InvalidLayerSize { which: "hidden", value: 0 }));
        assert!(Network::new(8, 0, 1).is_err());
        assert!(Network::new(8, 2, 0).is_err());
    }

    #[test]
    fn initial_parameters_lie_in_unit_interval() {
        let n = net(16, 2, 9, 3);
        let all = n
            .w1.data.iter().flatten()
            .chain(n.w2.data.iter().flatten())
            .chain(n.b1.iter())
            .chain(n.b2.iter());
        assert!(all.into_iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn forward_is_deterministic() {
        let n = net(8, 2, 1, 4);
        let a = n.forward(&[0.3, -0.7], Activation::ReLU);
        let b = n.forward(&[0.3, -0.7], Activation::ReLU);
        assert_eq!(a.out_act, b.out_act);
        assert_eq!(a.hidden, b.hidden);
    }

    #[test]
    fn binary_output_stays_in_open_unit_interval() {
        let n = net(8, 2, 1, 5);
        for x in [[-1.0, -1.0], [0.0, 0.0], [1.0, 1.0], [1e6, -1e6]] {
            let p = n.forward(&x, Activation::Tanh).out_act[0];
            assert!(p > 0.0 && p < 1.0, "sigmoid output {p} escaped (0, 1)");
        }
    }

    #[test]
    fn softmax_output_sums_to_one() {
        for seed in 0..5 {
            let n = net(16, 2, 17, seed);
            let sum: f64 = n.forward(&[0.5, -0.5], Activation::ReLU).out_act.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "softmax sum {sum} off by more than 1e-6");
        }
    }

    #[test]
    fn softmax_survives_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, -1000.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs[0] - 0.5).abs() < 1e-9);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn predict_returns_probability_for_binary_networks() {
        let n = net(8, 2, 1, 6);
        match n.predict(&[0.2, 0.8], Activation::Sigmoid) {
            Prediction::Probability(p) => assert!(p > 0.0 && p < 1.0),
            Prediction::Class(_) => panic!("binary network must predict a probability"),
        }
    }

    #[test]
    fn predict_returns_argmax_class_for_multiclass_networks() {
        let n = net(8, 2, 9, 7);
        let pass = n.forward(&[0.0, 0.5], Activation::ReLU);
        let expected = argmax(&pass.out_act);
        assert_eq!(n.predict(&[0.0, 0.5], Activation::ReLU), Prediction::Class(expected));
    }

    #[test]
    fn argmax_breaks_ties_toward_first_occurrence() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5, 0.1]), 1);
        assert_eq!(argmax(&[0.7]), 0);
    }
}
