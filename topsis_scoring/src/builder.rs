pub use crate::config::*;
use crate::run_topsis_scoring;

/// A builder for assembling a scoring problem step by step.
///
/// Declare the criteria first, then add the alternatives row by row:
///
/// ```
/// pub use topsis_scoring::builder::Builder;
/// pub use topsis_scoring::Impact;
/// # use topsis_scoring::ScoringError;
///
/// let mut builder = Builder::new()
///     .criterion(0.5, Impact::Cost)?
///     .criterion(0.5, Impact::Beneficial)?;
///
/// builder.add_alternative(&[250.0, 16.0])?;
/// builder.add_alternative(&[200.0, 32.0])?;
///
/// let result = builder.solve()?;
/// assert_eq!(result.ranks.len(), 2);
///
/// # Ok::<(), ScoringError>(())
/// ```
#[derive(Debug)]
pub struct Builder {
    pub(crate) _weights: Vec<f64>,
    pub(crate) _impacts: Vec<Impact>,
    pub(crate) _rows: Vec<Vec<f64>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _weights: Vec::new(),
            _impacts: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Declares one criterion with its weight and direction of preference.
    /// The weight is checked eagerly; the remaining invariants are checked
    /// when solving.
    pub fn criterion(mut self, weight: f64, impact: Impact) -> Result<Builder, ScoringError> {
        if !weight.is_finite() {
            return Err(ScoringError::NonFiniteWeight {
                index: self._weights.len(),
            });
        }
        if weight < 0.0 {
            return Err(ScoringError::NegativeWeight {
                index: self._weights.len(),
            });
        }
        self._weights.push(weight);
        self._impacts.push(impact);
        Ok(self)
    }

    /// Adds one alternative. The number of values must match the number of
    /// declared criteria.
    pub fn add_alternative(&mut self, values: &[f64]) -> Result<(), ScoringError> {
        if values.len() != self._weights.len() {
            return Err(ScoringError::RaggedRow {
                row: self._rows.len(),
                expected: self._weights.len(),
                found: values.len(),
            });
        }
        self._rows.push(values.to_vec());
        Ok(())
    }

    pub fn solve(&self) -> Result<ScoringResult, ScoringError> {
        let matrix = DecisionMatrix::from_rows(self._rows.clone());
        run_topsis_scoring(&matrix, &self._weights, &self._impacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_matches_direct_call() {
        let mut builder = Builder::new()
            .criterion(0.25, Impact::Cost)
            .unwrap()
            .criterion(0.75, Impact::Beneficial)
            .unwrap();
        builder.add_alternative(&[250.0, 16.0]).unwrap();
        builder.add_alternative(&[200.0, 32.0]).unwrap();
        builder.add_alternative(&[300.0, 24.0]).unwrap();
        let from_builder = builder.solve().unwrap();

        let matrix = DecisionMatrix::from_rows(vec![
            vec![250.0, 16.0],
            vec![200.0, 32.0],
            vec![300.0, 24.0],
        ]);
        let direct = run_topsis_scoring(
            &matrix,
            &[0.25, 0.75],
            &[Impact::Cost, Impact::Beneficial],
        )
        .unwrap();
        assert_eq!(from_builder, direct);
    }

    #[test]
    fn builder_rejects_a_short_row_eagerly() {
        let mut builder = Builder::new()
            .criterion(1.0, Impact::Beneficial)
            .unwrap()
            .criterion(1.0, Impact::Cost)
            .unwrap();
        let err = builder.add_alternative(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn builder_rejects_a_bad_weight_eagerly() {
        let err = Builder::new().criterion(-1.0, Impact::Cost).unwrap_err();
        assert_eq!(err, ScoringError::NegativeWeight { index: 0 });
    }
}
