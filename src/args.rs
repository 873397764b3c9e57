use clap::Parser;

/// Aggregates per-evaluator evaluation workbooks into per-candidate and
/// per-team reports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the run: the master roster file, the
    /// directory holding the evaluator workbooks and the output locations.
    #[clap(short, long, value_parser, default_value = "hazanotomat_config.json")]
    pub config: String,

    /// (default flat) The output to produce. 'flat' writes a single CSV file with
    /// one row per scored axis. 'forms' writes one formatted workbook per
    /// (team, exercise) under the configured output directory.
    #[clap(short, long, value_parser)]
    pub output: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
