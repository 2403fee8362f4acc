pub mod network;

pub use network::{ForwardPass, Network, Prediction};
