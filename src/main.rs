use std::time::{Duration, Instant};

use nn_sandbox::{Activation, Prediction, SessionStore, TrainingDriver};

/// Terminal demo: trains the XOR problem with relu the same way an embedding
/// UI would, through the session store and the throttled driver, and prints
/// the learned decision for the four quadrants.
fn main() {
    env_logger::init();

    let mut store = SessionStore::new().expect("bundled catalog is valid");
    store.set_activation(Activation::ReLU);
    store.start_training();

    // Simulate a 30 Hz host loop without real waiting: advance a synthetic
    // clock by the driver interval and pump until 500 epochs have run.
    let mut driver = TrainingDriver::new();
    let mut now = Instant::now();
    while store.epoch() < 500 {
        if driver.tick(&mut store, now) && store.epoch() % 100 == 0 {
            println!("epoch {:4}: loss = {:.6}", store.epoch(), store.loss());
        }
        now += Duration::from_millis(33);
    }
    store.stop_training();

    println!();
    for (x1, x2) in [(-0.5, -0.5), (-0.5, 0.5), (0.5, -0.5), (0.5, 0.5)] {
        let p = match store.current_session().network.predict(&[x1, x2], store.activation()) {
            Prediction::Probability(p) => p,
            Prediction::Class(c) => c as f64,
        };
        println!("({x1:5.1}, {x2:5.1}) -> {p:.3}  (expect {})", if (x1 > 0.0) != (x2 > 0.0) { 1 } else { 0 });
    }
}
