use rand::Rng;

use crate::network::network::Network;
use crate::problem::problem::{DataPoint, Problem};

/// Per-problem mutable training state.
///
/// One session exists per catalog problem, so a learner can switch problems
/// without losing progress on the others. A session is replaced wholesale on
/// reset, activation change, or hidden-layer resize, and mutated in place
/// (epoch, loss, weights) by each training step.
#[derive(Debug, Clone)]
pub struct Session {
    pub network: Network,
    /// Completed training epochs; monotonically non-decreasing until the
    /// session is replaced.
    pub epoch: u64,
    /// Mean loss of the most recent epoch. Starts at the placeholder 1.0,
    /// which is a UI convention for "untrained", not a measurement.
    pub loss: f64,
    pub data: Vec<DataPoint>,
    pub hidden_size: usize,
}

impl Session {
    /// Builds a fresh session: new random weights, newly generated dataset,
    /// epoch 0, placeholder loss.
    ///
    /// Infallible by construction: callers (the session store) only pass
    /// catalog dimensions and bounds-checked hidden sizes, all validated
    /// positive before the first session is built.
    pub(crate) fn fresh<R: Rng>(problem: &Problem, hidden_size: usize, rng: &mut R) -> Session {
        Session {
            network: Network::init(hidden_size, problem.input_size, problem.output_size, rng),
            epoch: 0,
            loss: 1.0,
            data: problem.generate_data(rng),
            hidden_size,
        }
    }
}
