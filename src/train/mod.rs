pub mod epoch;

pub use epoch::train_epoch;
