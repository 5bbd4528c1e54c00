// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The direction of preference for one criterion.
///
/// In the textual input formats, `Beneficial` is written `+` and `Cost` is
/// written `-`. No other token is accepted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher raw values are preferred (profit, capacity, ...).
    Beneficial,
    /// Lower raw values are preferred (price, defect rate, ...).
    Cost,
}

impl FromStr for Impact {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Impact, ScoringError> {
        match s.trim() {
            "+" => Ok(Impact::Beneficial),
            "-" => Ok(Impact::Cost),
            x => Err(ScoringError::UnknownImpactToken {
                token: x.to_string(),
            }),
        }
    }
}

impl Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Beneficial => write!(f, "+"),
            Impact::Cost => write!(f, "-"),
        }
    }
}

/// The decision matrix: one row per alternative, one column per criterion.
///
/// The matrix is only a container. All the invariants (rectangular shape,
/// at least one row, at least two columns, finite cells) are checked by
/// [run_topsis_scoring](crate::run_topsis_scoring) before any numeric pass.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> DecisionMatrix {
        DecisionMatrix { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_alternatives(&self) -> usize {
        self.rows.len()
    }

    /// The number of criteria columns, as defined by the first row.
    pub fn num_criteria(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }
}

// ******** Output data structures *********

/// The outcome of one scoring pass.
///
/// `scores` and `ranks` are positionally aligned to the input rows. The
/// ideal vectors are the direction-adjusted per-criterion extremes of the
/// weighted matrix, exposed for logging and diagnostics.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoringResult {
    /// Closeness coefficient per alternative, in [0, 1]. 1 coincides with
    /// the ideal-best vector, 0 with the ideal-worst vector.
    pub scores: Vec<f64>,
    /// Competition rank per alternative: 1 + the number of alternatives
    /// with a strictly greater score. Tied alternatives share a rank.
    pub ranks: Vec<u32>,
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
}

// ********* Errors **********

/// The class of a [ScoringError], for callers that translate errors into
/// user-facing messages by category.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// A count or dimension does not line up.
    Shape,
    /// A token or cell is not an acceptable value.
    Parse,
    /// The input is well-formed but numerically degenerate.
    Degenerate,
}

/// Errors that prevent the scoring pass from completing.
///
/// All of them are deterministic functions of the input: nothing is
/// transient, nothing is retried, and no partial result is returned.
#[derive(PartialEq, Debug, Clone)]
pub enum ScoringError {
    /// The matrix has no rows.
    NoAlternatives,
    /// The matrix has fewer than 2 criteria columns.
    NotEnoughCriteria { found: usize },
    /// A row does not have the same length as the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The weight count does not match the criteria column count.
    WeightCountMismatch { weights: usize, criteria: usize },
    /// The impact count does not match the criteria column count.
    ImpactCountMismatch { impacts: usize, criteria: usize },
    /// A matrix cell is NaN or infinite.
    NonFiniteCell { row: usize, column: usize },
    /// A weight is NaN or infinite.
    NonFiniteWeight { index: usize },
    /// A weight is negative. Weights express relative importance and may
    /// not flip the direction of a criterion.
    NegativeWeight { index: usize },
    /// An impact token is not `+` or `-`.
    UnknownImpactToken { token: String },
    /// Every weight is zero: the weighted matrix degenerates to zero and
    /// the scores are undefined.
    AllWeightsZero,
    /// A criteria column is entirely zero, so its Euclidean norm is zero
    /// and the normalization step is undefined.
    ZeroNormColumn { column: usize },
    /// A row coincides with both ideal points. This only happens when all
    /// the rows are identical on every weighted criterion, and no ranking
    /// information is left in the table.
    IndistinctRows { row: usize },
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoringError::NoAlternatives
            | ScoringError::NotEnoughCriteria { .. }
            | ScoringError::RaggedRow { .. }
            | ScoringError::WeightCountMismatch { .. }
            | ScoringError::ImpactCountMismatch { .. } => ErrorKind::Shape,
            ScoringError::NonFiniteCell { .. }
            | ScoringError::NonFiniteWeight { .. }
            | ScoringError::NegativeWeight { .. }
            | ScoringError::UnknownImpactToken { .. } => ErrorKind::Parse,
            ScoringError::AllWeightsZero
            | ScoringError::ZeroNormColumn { .. }
            | ScoringError::IndistinctRows { .. } => ErrorKind::Degenerate,
        }
    }
}

impl Error for ScoringError {}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::NoAlternatives => {
                write!(f, "the decision matrix has no rows")
            }
            ScoringError::NotEnoughCriteria { found } => {
                write!(
                    f,
                    "at least 2 criteria columns are required, found {}",
                    found
                )
            }
            ScoringError::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "row {} has {} cells, expected {} like the first row",
                    row, found, expected
                )
            }
            ScoringError::WeightCountMismatch { weights, criteria } => {
                write!(
                    f,
                    "{} weights provided for {} criteria columns",
                    weights, criteria
                )
            }
            ScoringError::ImpactCountMismatch { impacts, criteria } => {
                write!(
                    f,
                    "{} impacts provided for {} criteria columns",
                    impacts, criteria
                )
            }
            ScoringError::NonFiniteCell { row, column } => {
                write!(
                    f,
                    "cell at row {}, column {} is not a finite number",
                    row, column
                )
            }
            ScoringError::NonFiniteWeight { index } => {
                write!(f, "weight {} is not a finite number", index)
            }
            ScoringError::NegativeWeight { index } => {
                write!(f, "weight {} is negative", index)
            }
            ScoringError::UnknownImpactToken { token } => {
                write!(f, "impact token {:?} is not '+' or '-'", token)
            }
            ScoringError::AllWeightsZero => {
                write!(f, "all the weights are zero")
            }
            ScoringError::ZeroNormColumn { column } => {
                write!(
                    f,
                    "criteria column {} is entirely zero and cannot be normalized",
                    column
                )
            }
            ScoringError::IndistinctRows { row } => {
                write!(
                    f,
                    "row {} coincides with both ideal points: all the rows are \
                     identical on every weighted criterion",
                    row
                )
            }
        }
    }
}
