use clap::Parser;

/// This is an Importance-Performance Analysis (IPA) program for ESG surveys.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the analysis: input file, column names, output settings.
    /// The other flags override the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, esg-ipa will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The spreadsheet with the rated items. Setting this option overrides the file specified
    /// in the --config file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx, default inferred from the file extension) The type of the input.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default Item) The name of the column containing the item identifiers.
    #[clap(long, value_parser)]
    pub item_column: Option<String>,

    /// (default Importance) The name of the column containing the importance ratings.
    #[clap(long, value_parser)]
    pub importance_column: Option<String>,

    /// (default Performance) The name of the column containing the performance ratings.
    #[clap(long, value_parser)]
    pub performance_column: Option<String>,

    /// When using an Excel file with several worksheets, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) A glossary of item codes, in JSON or CSV format.
    #[clap(short, long, value_parser)]
    pub glossary: Option<String>,

    /// (file path or 'stdout') If specified, the classified items are exported in CSV format.
    #[clap(short, long, value_parser)]
    pub export: Option<String>,

    /// (file path or 'stdout') If specified, the scatter and radar chart specifications are written
    /// in JSON format.
    #[clap(long, value_parser)]
    pub chart: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
