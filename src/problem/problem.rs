use rand::Rng;
use serde::{Serialize, Deserialize};

/// Training target for one example.
///
/// `Binary` pairs with a single sigmoid output unit; `Class` pairs with a
/// softmax output layer and is expanded to one-hot during training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Binary(f64),
    Class(usize),
}

impl Target {
    /// Expands the target to a dense vector of length `output_size`.
    pub fn to_vec(&self, output_size: usize) -> Vec<f64> {
        match *self {
            Target::Binary(y) => vec![y],
            Target::Class(class) => {
                let mut one_hot = vec![0.0; output_size];
                if class < output_size {
                    one_hot[class] = 1.0;
                }
                one_hot
            }
        }
    }
}

/// One training example: an input vector and its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: Vec<f64>,
    pub y: Target,
}

/// How the embedding renderer should draw a problem's predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualKind {
    /// Scatter of labelled 2-D points over a decision-boundary heatmap.
    TwoDBinary,
    /// Grid of input pairs, each cell showing the predicted class.
    Grid,
}

/// Closed set of dataset generators. Dispatch lives in `generate_data` so the
/// catalog stays a plain data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Xor,
    Addition,
    Multiplication,
    Circle,
}

/// Immutable descriptor of one toy learning problem.
///
/// Serializes for display layers; never deserialized, the catalog is the only
/// source of descriptors.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub explanation: &'static str,
    pub input_size: usize,
    /// Default hidden width; the session store may override it per problem.
    pub hidden_size: usize,
    pub output_size: usize,
    pub visual: VisualKind,
    pub kind: ProblemKind,
}

/// Number of random points drawn for the classification problems.
const CLASSIFICATION_POINTS: usize = 100;

/// Inclusive upper operand for the arithmetic grids (0..=4).
pub const ARITHMETIC_MAX: usize = 4;

impl Problem {
    /// Produces a fresh dataset.
    ///
    /// Classification problems draw `CLASSIFICATION_POINTS` uniform points in
    /// [-1, 1]² and label them by a closed-form geometric rule, so repeated
    /// calls differ. Arithmetic problems enumerate every operand pair in
    /// 0..=ARITHMETIC_MAX exhaustively and are fully deterministic; the rng
    /// is untouched for those.
    pub fn generate_data<R: Rng>(&self, rng: &mut R) -> Vec<DataPoint> {
        match self.kind {
            ProblemKind::Xor => sample_plane(rng, |x1, x2| (x1 > 0.0) != (x2 > 0.0)),
            ProblemKind::Circle => sample_plane(rng, |x1, x2| x1 * x1 + x2 * x2 < 0.5),
            ProblemKind::Addition => enumerate_pairs(|a, b| a + b),
            ProblemKind::Multiplication => enumerate_pairs(|a, b| a * b),
        }
    }
}

fn sample_plane<R: Rng>(rng: &mut R, rule: impl Fn(f64, f64) -> bool) -> Vec<DataPoint> {
    (0..CLASSIFICATION_POINTS)
        .map(|_| {
            let x1 = rng.gen::<f64>() * 2.0 - 1.0;
            let x2 = rng.gen::<f64>() * 2.0 - 1.0;
            let label = if rule(x1, x2) { 1.0 } else { 0.0 };
            DataPoint { x: vec![x1, x2], y: Target::Binary(label) }
        })
        .collect()
}

fn enumerate_pairs(op: impl Fn(usize, usize) -> usize) -> Vec<DataPoint> {
    let mut data = Vec::with_capacity((ARITHMETIC_MAX + 1) * (ARITHMETIC_MAX + 1));
    for a in 0..=ARITHMETIC_MAX {
        for b in 0..=ARITHMETIC_MAX {
            // Normalize operands from 0..=4 to [-1, 1].
            let x = vec![a as f64 / 2.0 - 1.0, b as f64 / 2.0 - 1.0];
            data.push(DataPoint { x, y: Target::Class(op(a, b)) });
        }
    }
    data
}
