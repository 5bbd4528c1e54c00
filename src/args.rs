use clap::Parser;

/// This is a TOPSIS scoring and ranking program for tabular data.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON description of the scoring job (input table, weights,
    /// impacts, output settings). Flags given on the command line override the
    /// corresponding configuration entries.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The table to score. The first row is the header, the first column is a
    /// free-form row identifier and every other column is a numeric criterion.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx. Guessed from the file extension
    /// when not specified.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (comma-separated numbers) One weight per criteria column, e.g. '0.25,0.25,0.5'.
    /// Only the relative magnitudes matter.
    #[clap(short, long, value_parser)]
    pub weights: Option<String>,

    /// (comma-separated tokens) One impact per criteria column, '+' when higher values are
    /// preferred and '-' when lower values are preferred, e.g. '-,+,+'.
    #[clap(long, value_parser)]
    pub impacts: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the scored table. Without this flag the
    /// result is written next to the input as '<name>_scored.csv'.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing an expected scored table. If provided, the
    /// program checks that its output matches the reference and fails on any difference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default: first worksheet) When using an Excel file, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
