pub mod math;
pub mod activation;
pub mod network;
pub mod train;
pub mod problem;
pub mod session;
pub mod driver;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::Activation;
pub use network::network::{ForwardPass, Network, Prediction};
pub use train::epoch::train_epoch;
pub use problem::problem::{DataPoint, Problem, ProblemKind, Target, VisualKind};
pub use problem::catalog::catalog;
pub use session::session::Session;
pub use session::store::{SessionSnapshot, SessionStore};
pub use driver::driver::TrainingDriver;
pub use error::SandboxError;
