pub mod builder;
mod config;
pub mod manual;
pub mod quick_start;

use log::{debug, info};

pub use crate::builder::Builder;
pub use crate::config::*;

// **** Private structures ****

/// Per-criterion extremes of the weighted matrix, direction-adjusted:
/// for a beneficial criterion the best point is the column maximum, for a
/// cost criterion it is the column minimum.
#[derive(PartialEq, Debug, Clone)]
struct IdealPoints {
    best: Vec<f64>,
    worst: Vec<f64>,
}

/// Euclidean separation of one row from the two ideal vectors.
#[derive(PartialEq, Debug, Clone, Copy)]
struct Separation {
    to_best: f64,
    to_worst: f64,
}

/// Runs the TOPSIS scoring pipeline over the given decision matrix.
///
/// Arguments:
/// * `matrix` the decision matrix, one row per alternative and one column
///   per criterion
/// * `weights` the relative importance of each criterion. The weights do
///   not need to sum to 1: only their relative magnitudes matter.
/// * `impacts` the direction of preference for each criterion
///
/// The scores and ranks in the result are aligned to the input row order.
/// The function is pure: it reads no ambient state and performs no I/O, so
/// it can be called concurrently without synchronization.
///
/// Every invariant violation is reported as a [ScoringError] before any
/// numeric work starts; numeric degeneracies (a zero-norm column, a table
/// whose rows cannot be told apart) abort the pass as well. No partial
/// result is ever returned.
pub fn run_topsis_scoring(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<ScoringResult, ScoringError> {
    info!(
        "run_topsis_scoring: processing {} alternatives over {} criteria",
        matrix.num_alternatives(),
        matrix.num_criteria()
    );
    checks(matrix, weights, impacts)?;

    let norms = column_norms(matrix)?;
    debug!("run_topsis_scoring: column norms: {:?}", norms);

    let weighted = weighted_matrix(matrix, &norms, weights);
    let ideal = ideal_points(&weighted, impacts);
    info!(
        "run_topsis_scoring: ideal best: {:?} ideal worst: {:?}",
        ideal.best, ideal.worst
    );

    let separations = separations(&weighted, &ideal);
    let scores = closeness_scores(&separations)?;
    let ranks = competition_ranks(&scores);
    debug!("run_topsis_scoring: scores: {:?} ranks: {:?}", scores, ranks);

    Ok(ScoringResult {
        scores,
        ranks,
        ideal_best: ideal.best,
        ideal_worst: ideal.worst,
    })
}

/// Validates every precondition, in order: shape first, then values.
/// Nothing numeric runs before this pass has fully succeeded.
fn checks(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<(), ScoringError> {
    if matrix.num_alternatives() == 0 {
        return Err(ScoringError::NoAlternatives);
    }
    let criteria = matrix.num_criteria();
    if criteria < 2 {
        return Err(ScoringError::NotEnoughCriteria { found: criteria });
    }
    for (idx, row) in matrix.rows().iter().enumerate() {
        if row.len() != criteria {
            return Err(ScoringError::RaggedRow {
                row: idx,
                expected: criteria,
                found: row.len(),
            });
        }
    }
    if weights.len() != criteria {
        return Err(ScoringError::WeightCountMismatch {
            weights: weights.len(),
            criteria,
        });
    }
    if impacts.len() != criteria {
        return Err(ScoringError::ImpactCountMismatch {
            impacts: impacts.len(),
            criteria,
        });
    }
    for (idx, w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(ScoringError::NonFiniteWeight { index: idx });
        }
        if *w < 0.0 {
            return Err(ScoringError::NegativeWeight { index: idx });
        }
    }
    if weights.iter().all(|w| *w == 0.0) {
        return Err(ScoringError::AllWeightsZero);
    }
    for (i, row) in matrix.rows().iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if !cell.is_finite() {
                return Err(ScoringError::NonFiniteCell { row: i, column: j });
            }
        }
    }
    Ok(())
}

/// The Euclidean norm of every criteria column.
/// A zero norm means the whole column is zero and the normalization step
/// is undefined for it.
fn column_norms(matrix: &DecisionMatrix) -> Result<Vec<f64>, ScoringError> {
    let mut norms: Vec<f64> = vec![0.0; matrix.num_criteria()];
    for row in matrix.rows().iter() {
        for (j, cell) in row.iter().enumerate() {
            norms[j] += cell * cell;
        }
    }
    for (j, n) in norms.iter_mut().enumerate() {
        *n = n.sqrt();
        if *n == 0.0 {
            return Err(ScoringError::ZeroNormColumn { column: j });
        }
    }
    Ok(norms)
}

fn weighted_matrix(matrix: &DecisionMatrix, norms: &[f64], weights: &[f64]) -> Vec<Vec<f64>> {
    matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| cell / norms[j] * weights[j])
                .collect()
        })
        .collect()
}

fn ideal_points(weighted: &[Vec<f64>], impacts: &[Impact]) -> IdealPoints {
    let mut best: Vec<f64> = Vec::with_capacity(impacts.len());
    let mut worst: Vec<f64> = Vec::with_capacity(impacts.len());
    for (j, impact) in impacts.iter().enumerate() {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in weighted.iter() {
            lo = lo.min(row[j]);
            hi = hi.max(row[j]);
        }
        match impact {
            Impact::Beneficial => {
                best.push(hi);
                worst.push(lo);
            }
            Impact::Cost => {
                best.push(lo);
                worst.push(hi);
            }
        }
    }
    IdealPoints { best, worst }
}

fn separations(weighted: &[Vec<f64>], ideal: &IdealPoints) -> Vec<Separation> {
    weighted
        .iter()
        .map(|row| Separation {
            to_best: euclidean_distance(row, &ideal.best),
            to_worst: euclidean_distance(row, &ideal.worst),
        })
        .collect()
}

fn euclidean_distance(row: &[f64], point: &[f64]) -> f64 {
    row.iter()
        .zip(point.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// The closeness coefficient of every row: to_worst / (to_best + to_worst).
/// A zero denominator means the row coincides with both ideal points, which
/// only happens when all the rows are identical on every weighted
/// criterion. The whole pass is aborted in that case.
fn closeness_scores(separations: &[Separation]) -> Result<Vec<f64>, ScoringError> {
    let mut scores: Vec<f64> = Vec::with_capacity(separations.len());
    for (idx, sep) in separations.iter().enumerate() {
        let denom = sep.to_best + sep.to_worst;
        if denom == 0.0 {
            return Err(ScoringError::IndistinctRows { row: idx });
        }
        scores.push(sep.to_worst / denom);
    }
    Ok(scores)
}

/// Competition ranking: a row's rank is 1 + the number of rows with a
/// strictly greater score. Tied rows share a rank and the next distinct
/// score skips the tied slots.
///
/// Ties are detected by exact equality. Identical input rows flow through
/// identical arithmetic, so they always end up with bitwise-equal scores.
fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // The scores are finite by construction at this point.
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap());

    let mut ranks: Vec<u32> = vec![0; scores.len()];
    let mut idx = 0;
    while idx < order.len() {
        let mut last = idx;
        while last + 1 < order.len() && scores[order[last + 1]] == scores[order[idx]] {
            last += 1;
        }
        for k in idx..=last {
            ranks[order[k]] = (idx + 1) as u32;
        }
        idx = last + 1;
    }
    ranks
}
