pub mod problem;
pub mod catalog;

pub use problem::{DataPoint, Problem, ProblemKind, Target, VisualKind};
pub use catalog::catalog;
