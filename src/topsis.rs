use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use topsis_scoring::{
    run_topsis_scoring, DecisionMatrix, Impact, ScoringError, ScoringResult,
};

use crate::args::Args;
use crate::topsis::config_reader::*;

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum TopsisError {
    #[snafu(display("Error opening table file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error rendering the output table"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No readable worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Line {lineno}, column {column:?}: unsupported cell {content}"))]
    ExcelWrongCellType {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the result to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(
        "The table needs an identifier column and at least 2 criteria columns, found {found} columns"
    ))]
    TableTooNarrow { found: usize },
    #[snafu(display("Line {lineno}: expected {expected} cells, found {found}"))]
    LineTooShort {
        lineno: usize,
        expected: usize,
        found: usize,
    },
    #[snafu(display("Line {lineno}, column {column:?}: cell {content:?} is not a finite number"))]
    CellNotNumeric {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Weight token {token:?} is not a finite number"))]
    BadWeightToken { token: String },
    #[snafu(display("Impact token {token:?} is not '+' or '-'"))]
    BadImpactToken { token: String },
    #[snafu(display("Invalid scoring input ({:?} error): {}", source.kind(), source))]
    Scoring { source: ScoringError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TopsisResult<T> = Result<T, TopsisError>;

/// A table as parsed by the readers, before numeric validation.
/// The identifier column is kept verbatim and never enters the matrix.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRow {
    /// 1-based line in the source file, the header being line 1.
    pub lineno: usize,
    pub id: String,
    pub cells: Vec<String>,
}

impl ParsedTable {
    pub fn num_criteria(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }
}

pub mod config_reader {
    use crate::topsis::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputSettings {
        #[serde(rename = "jobName")]
        pub job_name: String,
        #[serde(rename = "outputPath")]
        pub output_path: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct TableSource {
        pub provider: String,
        #[serde(rename = "filePath")]
        pub file_path: String,
        #[serde(rename = "worksheetName")]
        pub worksheet_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct TopsisConfig {
        #[serde(rename = "outputSettings")]
        pub output_settings: OutputSettings,
        #[serde(rename = "tableSource")]
        pub table_source: TableSource,
        pub weights: String,
        pub impacts: String,
    }

    pub fn read_config(path: &str) -> TopsisResult<TopsisConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        let config: TopsisConfig =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        debug!("read_config: {:?}", config);
        Ok(config)
    }
}

/// One fully resolved scoring job: the configuration file (if any) merged
/// with the command line flags, flags winning.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ScoringJob {
    job_name: String,
    provider: String,
    input_path: String,
    worksheet_name: Option<String>,
    weights: String,
    impacts: String,
    out: Option<String>,
}

fn guess_provider(path: &str) -> String {
    if path.to_lowercase().ends_with(".xlsx") {
        "xlsx".to_string()
    } else {
        "csv".to_string()
    }
}

fn resolve_job(args: &Args) -> TopsisResult<ScoringJob> {
    let config = match &args.config {
        Some(path) => Some(read_config(path)?),
        None => None,
    };

    let input_path = match args
        .input
        .clone()
        .or_else(|| config.as_ref().map(|c| c.table_source.file_path.clone()))
    {
        Some(p) => p,
        None => whatever!("No input table: pass --input or a --config with a tableSource"),
    };
    let provider = args
        .input_type
        .clone()
        .or_else(|| config.as_ref().map(|c| c.table_source.provider.clone()))
        .unwrap_or_else(|| guess_provider(&input_path));
    let weights = match args
        .weights
        .clone()
        .or_else(|| config.as_ref().map(|c| c.weights.clone()))
    {
        Some(w) => w,
        None => whatever!("No weights: pass --weights or a --config with a weights entry"),
    };
    let impacts = match args
        .impacts
        .clone()
        .or_else(|| config.as_ref().map(|c| c.impacts.clone()))
    {
        Some(i) => i,
        None => whatever!("No impacts: pass --impacts or a --config with an impacts entry"),
    };

    Ok(ScoringJob {
        job_name: config
            .as_ref()
            .map(|c| c.output_settings.job_name.clone())
            .unwrap_or_else(|| io_common::simplify_file_name(&input_path)),
        worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.table_source.worksheet_name.clone())),
        out: args
            .out
            .clone()
            .or_else(|| config.as_ref().and_then(|c| c.output_settings.output_path.clone())),
        provider,
        input_path,
        weights,
        impacts,
    })
}

/// Parses a comma-separated weight string, e.g. `0.25,0.25,0.5`.
pub fn parse_weights(input: &str) -> TopsisResult<Vec<f64>> {
    let mut res: Vec<f64> = Vec::new();
    for token in input.split(',') {
        let w = token
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .context(BadWeightTokenSnafu {
                token: token.trim(),
            })?;
        res.push(w);
    }
    Ok(res)
}

/// Parses a comma-separated impact string, e.g. `-,+,+`.
pub fn parse_impacts(input: &str) -> TopsisResult<Vec<Impact>> {
    let mut res: Vec<Impact> = Vec::new();
    for token in input.split(',') {
        match token.trim().parse::<Impact>() {
            Ok(impact) => res.push(impact),
            Err(_) => {
                return BadImpactTokenSnafu {
                    token: token.trim(),
                }
                .fail()
            }
        }
    }
    Ok(res)
}

/// Converts the raw criteria cells into a decision matrix, rejecting any
/// cell that is not a finite number with its line and column named.
fn validate_table(table: &ParsedTable) -> TopsisResult<DecisionMatrix> {
    ensure!(
        table.headers.len() >= 3,
        TableTooNarrowSnafu {
            found: table.headers.len()
        }
    );
    let criteria = table.num_criteria();
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.rows.len());
    for row in table.rows.iter() {
        ensure!(
            row.cells.len() == criteria,
            LineTooShortSnafu {
                lineno: row.lineno,
                expected: criteria + 1,
                found: row.cells.len() + 1,
            }
        );
        let mut values: Vec<f64> = Vec::with_capacity(criteria);
        for (j, cell) in row.cells.iter().enumerate() {
            let value = cell
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .context(CellNotNumericSnafu {
                    lineno: row.lineno,
                    column: table.headers[j + 1].clone(),
                    content: cell.clone(),
                })?;
            values.push(value);
        }
        rows.push(values);
    }
    Ok(DecisionMatrix::from_rows(rows))
}

/// The output table: the input columns in their original order, then the
/// score, then the rank. Row order is preserved.
fn append_scores(table: &ParsedTable, result: &ScoringResult) -> ParsedTable {
    let mut headers = table.headers.clone();
    headers.push("Score".to_string());
    headers.push("Rank".to_string());

    let rows = table
        .rows
        .iter()
        .zip(result.scores.iter().zip(result.ranks.iter()))
        .map(|(row, (score, rank))| {
            let mut cells = row.cells.clone();
            cells.push(format!("{:.5}", score));
            cells.push(rank.to_string());
            ParsedRow {
                lineno: row.lineno,
                id: row.id.clone(),
                cells,
            }
        })
        .collect();

    ParsedTable { headers, rows }
}

fn check_reference(path: &str, rendered: &str) -> TopsisResult<()> {
    let expected = fs::read_to_string(path).context(OpeningReferenceSnafu { path })?;
    if expected != rendered {
        warn!("Found differences with the reference table");
        print_diff(expected.as_str(), rendered, "\n");
        whatever!("Difference detected between the scored table and the reference table");
    }
    info!("check_reference: output matches {}", path);
    Ok(())
}

pub fn run_scoring(args: &Args) -> TopsisResult<()> {
    let job = resolve_job(args)?;
    info!(
        "run_scoring: job {:?}: reading {} table {}",
        job.job_name, job.provider, job.input_path
    );

    let table = match job.provider.as_str() {
        "csv" => io_csv::read_csv_table(&job.input_path)?,
        "xlsx" => io_xlsx::read_xlsx_table(&job.input_path, job.worksheet_name.as_deref())?,
        x => whatever!("Unknown input type {:?}", x),
    };
    debug!(
        "run_scoring: parsed {} rows, headers {:?}",
        table.rows.len(),
        table.headers
    );

    let weights = parse_weights(&job.weights)?;
    let impacts = parse_impacts(&job.impacts)?;
    let matrix = validate_table(&table)?;

    let result = run_topsis_scoring(&matrix, &weights, &impacts).context(ScoringSnafu {})?;
    info!("run_scoring: scored {} alternatives", result.scores.len());

    let rendered = io_csv::render_csv_table(&append_scores(&table, &result))?;

    match job.out.as_deref() {
        Some("stdout") => print!("{}", rendered),
        Some(path) => {
            fs::write(path, &rendered).context(WritingOutputSnafu { path })?;
            info!("run_scoring: result written to {}", path);
        }
        None => {
            let path = io_common::default_output_path(&job.input_path);
            fs::write(&path, &rendered).context(WritingOutputSnafu { path: path.clone() })?;
            info!("run_scoring: result written to {}", path);
        }
    }

    if let Some(reference) = &args.reference {
        check_reference(reference, &rendered)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONES_CSV: &str = "\
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
M5,225,16,16,2
";

    fn parse_csv(data: &str) -> ParsedTable {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        io_csv::read_table(rdr, "test.csv").unwrap()
    }

    #[test]
    fn weights_parse() {
        assert_eq!(
            parse_weights("0.25, 0.5 ,1").unwrap(),
            vec![0.25, 0.5, 1.0]
        );
    }

    #[test]
    fn bad_weight_tokens_are_named() {
        let err = parse_weights("1,abc,2").unwrap_err();
        assert!(
            matches!(&err, TopsisError::BadWeightToken { token } if token == "abc"),
            "{:?}",
            err
        );
        // An empty token and a non-finite token are equally rejected.
        assert!(parse_weights("1,,2").is_err());
        assert!(parse_weights("1,inf,2").is_err());
    }

    #[test]
    fn impacts_parse() {
        assert_eq!(
            parse_impacts("-,+, +").unwrap(),
            vec![Impact::Cost, Impact::Beneficial, Impact::Beneficial]
        );
        let err = parse_impacts("+,*").unwrap_err();
        assert!(
            matches!(&err, TopsisError::BadImpactToken { token } if token == "*"),
            "{:?}",
            err
        );
    }

    #[test]
    fn csv_table_scores_end_to_end() {
        let table = parse_csv(PHONES_CSV);
        assert_eq!(table.num_criteria(), 4);

        let matrix = validate_table(&table).unwrap();
        let weights = parse_weights("0.25,0.25,0.25,0.25").unwrap();
        let impacts = parse_impacts("-,+,+,+").unwrap();
        let result = run_topsis_scoring(&matrix, &weights, &impacts).unwrap();

        let rendered = io_csv::render_csv_table(&append_scores(&table, &result)).unwrap();
        let expected = "\
Model,Price,Storage,Camera,Looks,Score,Rank
M1,250,16,12,5,0.53428,3
M2,200,16,8,3,0.30837,5
M3,300,32,16,4,0.69163,1
M4,275,32,8,4,0.53474,2
M5,225,16,16,2,0.40105,4
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn mismatched_vector_lengths_abort_before_scoring() {
        let table = parse_csv(PHONES_CSV);
        let matrix = validate_table(&table).unwrap();
        let weights = parse_weights("1,1").unwrap();
        let impacts = parse_impacts("+,+,+").unwrap();

        let err = run_topsis_scoring(&matrix, &weights, &impacts).unwrap_err();
        assert_eq!(
            err,
            ScoringError::WeightCountMismatch {
                weights: 2,
                criteria: 4
            }
        );
    }

    #[test]
    fn non_numeric_cells_are_located() {
        let table = parse_csv(
            "Model,Price,Storage\n\
             M1,250,16\n\
             M2,lots,16\n",
        );
        let err = validate_table(&table).unwrap_err();
        match err {
            TopsisError::CellNotNumeric {
                lineno,
                column,
                content,
            } => {
                assert_eq!(lineno, 3);
                assert_eq!(column, "Price");
                assert_eq!(content, "lots");
            }
            x => panic!("unexpected error {:?}", x),
        }
    }

    #[test]
    fn narrow_tables_are_rejected() {
        let table = parse_csv("Model,Price\nM1,250\nM2,200\n");
        let err = validate_table(&table).unwrap_err();
        assert!(
            matches!(err, TopsisError::TableTooNarrow { found: 2 }),
            "{:?}",
            err
        );
    }

    #[test]
    fn config_round_trip() {
        let config: TopsisConfig = serde_json::from_str(
            r#"{
                "outputSettings": {"jobName": "phones", "outputPath": "out.csv"},
                "tableSource": {"provider": "csv", "filePath": "phones.csv"},
                "weights": "1,1,1,1",
                "impacts": "-,+,+,+"
            }"#,
        )
        .unwrap();
        assert_eq!(config.output_settings.job_name, "phones");
        assert_eq!(config.table_source.provider, "csv");
        assert_eq!(config.table_source.worksheet_name, None);
        assert_eq!(config.impacts, "-,+,+,+");
    }

    #[test]
    fn default_output_sits_next_to_the_input() {
        assert_eq!(
            io_common::default_output_path("data/phones.csv"),
            "data/phones_scored.csv"
        );
        assert_eq!(io_common::default_output_path("phones.xlsx"), "phones_scored.csv");
    }
}
