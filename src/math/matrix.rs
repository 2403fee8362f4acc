use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::SandboxError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a rows×cols matrix with independent uniform samples in [-1, 1].
    pub fn uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from row data. Ragged rows are a construction error.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, SandboxError> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());

        if data.iter().any(|row| row.len() != cols) {
            return Err(SandboxError::RaggedMatrix);
        }

        Ok(Matrix { rows, cols, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 5);
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 5);
        assert_eq!(m.data.len(), 3);
        assert!(m.data.iter().all(|row| row.len() == 5));
        assert!(m.data.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn uniform_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::uniform(4, 6, &mut rng);
        assert!(m.data.iter().flatten().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn uniform_is_reproducible_under_a_fixed_seed() {
        let a = Matrix::uniform(2, 3, &mut StdRng::seed_from_u64(42));
        let b = Matrix::uniform(2, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(res, Err(SandboxError::RaggedMatrix)));
    }
}
