use log::{debug, info, warn};

use ipa_analysis::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::ipa::config_reader::*;
use crate::ipa::glossary::{pillar, Glossary};

pub mod chart;
pub mod config_reader;
pub mod export;
pub mod glossary;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod report;

/// The keyword that sends an output to the standard output instead of a file.
pub const STDOUT: &str = "stdout";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IpaError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display(
        "{path} has {count} worksheets, the name of the worksheet to use must be provided"
    ))]
    AmbiguousWorksheet { path: String, count: usize },
    #[snafu(display("No data found in {path}"))]
    EmptySpreadsheet { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error writing CSV"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Column {column_name} not found in the header"))]
    CannotFindColumnInHeader { column_name: String },
    #[snafu(display("Line {lineno}: column {column}: cannot use value {content:?}"))]
    MalformedInput {
        lineno: usize,
        column: String,
        content: String,
    },
    #[snafu(display("Analysis failed: {source}"))]
    Analysis { source: IpaErrors },
    #[snafu(display("No input file: use --input or a configuration file"))]
    MissingInput {},
    #[snafu(display("Unknown input type {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Cannot find the parent directory of {path}"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type IpaResult<T> = Result<T, IpaError>;

/// The content of a cell, as read from a spreadsheet.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
    /// Anything else (dates, booleans, errors), kept for reporting.
    Other(String),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn content(&self) -> String {
        match self {
            CellValue::Number(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => "".to_string(),
            CellValue::Other(s) => s.clone(),
        }
    }
}

/// A row, as parsed by the readers.
/// This is before checking that the values are usable.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedItem {
    /// The line in the spreadsheet, starting at 1 with the header.
    pub lineno: usize,
    pub id: CellValue,
    pub importance: CellValue,
    pub performance: CellValue,
}

fn read_rated_items(root_path: &Path, source: &InputSource) -> IpaResult<Vec<RatedItem>> {
    let p: PathBuf = root_path.join(&source.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read item file {:?}", p2);
    let parsed_items = match source.provider()?.as_str() {
        "csv" => io_csv::read_csv_items(&p2, source)?,
        "xlsx" => io_excel::read_excel_items(&p2, source)?,
        x => {
            return UnknownProviderSnafu {
                provider: x.to_string(),
            }
            .fail()
        }
    };
    validate_items(&parsed_items, source)
}

/// Turns the parsed rows into items.
///
/// Fully blank rows are dropped, any other row must have an identifier and two numbers.
pub fn validate_items(
    parsed_items: &[ParsedItem],
    source: &InputSource,
) -> IpaResult<Vec<RatedItem>> {
    let mut res: Vec<RatedItem> = Vec::new();
    for pi in parsed_items.iter() {
        if pi.id.is_blank() && pi.importance.is_blank() && pi.performance.is_blank() {
            debug!("validate_items: skipping blank line {}", pi.lineno);
            continue;
        }
        let id = match &pi.id {
            CellValue::Text(s) if !s.trim().is_empty() => s.trim().to_string(),
            CellValue::Number(f) => io_common::format_number_id(*f),
            cell => {
                return MalformedInputSnafu {
                    lineno: pi.lineno,
                    column: source.item_column(),
                    content: cell.content(),
                }
                .fail()
            }
        };
        let importance = read_rating(&pi.importance, pi.lineno, &source.importance_column())?;
        let performance = read_rating(&pi.performance, pi.lineno, &source.performance_column())?;
        debug!(
            "validate_items: line {}: {} {} {}",
            pi.lineno, id, importance, performance
        );
        res.push(RatedItem {
            id,
            importance,
            performance,
        });
    }
    Ok(res)
}

fn read_rating(cell: &CellValue, lineno: usize, column: &str) -> IpaResult<f64> {
    let value = match cell {
        CellValue::Number(f) => Some(*f),
        CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(f) if f.is_finite() => Ok(f),
        _ => MalformedInputSnafu {
            lineno,
            column,
            content: cell.content(),
        }
        .fail(),
    }
}

#[derive(PartialEq, Debug, Clone, Serialize)]
struct SummaryItem {
    item: String,
    importance: f64,
    performance: f64,
    strategy: String,
    recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pillar: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
struct SummaryGroup {
    strategy: String,
    label: String,
    count: usize,
    members: Vec<String>,
    #[serde(rename = "meanImportance")]
    mean_importance: f64,
    #[serde(rename = "meanPerformance")]
    mean_performance: f64,
    recommendation: String,
}

fn build_summary_js(config: &IpaConfig, res: &AnalysisResult, glossary: &Glossary) -> JSValue {
    let c = OutputConfig {
        title: config.output_settings.analysis_title.clone(),
        date: config.output_settings.survey_date.clone(),
        organization: config.output_settings.organization.clone(),
        source: config.input_source.file_path.clone(),
    };
    let items: Vec<SummaryItem> = res
        .items
        .iter()
        .map(|ci| SummaryItem {
            item: ci.item.id.clone(),
            importance: ci.item.importance,
            performance: ci.item.performance,
            strategy: ci.strategy.name().to_string(),
            recommendation: ci.recommendation.clone(),
            description: glossary.describe(&ci.item.id).map(|s| s.to_string()),
            pillar: pillar(&ci.item.id).map(|s| s.to_string()),
        })
        .collect();
    let groups: Vec<SummaryGroup> = res
        .groups
        .iter()
        .map(|g| SummaryGroup {
            strategy: g.strategy.name().to_string(),
            label: g.strategy.label().to_string(),
            count: g.members.len(),
            members: g.members.iter().map(|m| m.item.id.clone()).collect(),
            mean_importance: g.mean_importance,
            mean_performance: g.mean_performance,
            recommendation: g.strategy.recommendation().to_string(),
        })
        .collect();
    json!({
        "config": c,
        "means": {
            "importance": res.means.importance_mean,
            "performance": res.means.performance_mean,
        },
        "items": items,
        "groups": groups,
    })
}

/// Writes some content to a file, or to the standard output.
fn write_output(dest: &str, content: &[u8]) -> IpaResult<()> {
    if dest == STDOUT {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(content)
            .context(WritingFileSnafu { path: STDOUT })?;
        if !content.ends_with(b"\n") {
            writeln!(stdout).context(WritingFileSnafu { path: STDOUT })?;
        }
        return Ok(());
    }
    fs::write(dest, content).context(WritingFileSnafu { path: dest })?;
    info!("Wrote {}", dest);
    Ok(())
}

/// Fails if a file cannot be created at this place because its directory is missing.
fn check_destination(dest: &str) -> IpaResult<()> {
    if dest == STDOUT {
        return Ok(());
    }
    match Path::new(dest).parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            MissingParentDirSnafu { path: dest }.fail()
        }
        _ => Ok(()),
    }
}

/// Where an output is written. Relative paths go to the output directory of the
/// configuration, if there is one.
fn output_path(config: &IpaConfig, root_p: &Path, dest: &str) -> String {
    match config.output_settings.output_directory.clone() {
        Some(dir) if dest != STDOUT && Path::new(dest).is_relative() => {
            root_p.join(dir).join(dest).display().to_string()
        }
        _ => dest.to_string(),
    }
}

/// Finds the configuration of the analysis, from the arguments and the optional
/// configuration file.
///
/// Returns the configuration and the directory against which relative paths are resolved.
pub fn resolve_config(args: &Args) -> IpaResult<(IpaConfig, PathBuf)> {
    let (config, root) = match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?
                .to_path_buf();
            (config.merge_args(args), root)
        }
        None => {
            let input = args.input.clone().context(MissingInputSnafu {})?;
            (IpaConfig::from_input(&input).merge_args(args), PathBuf::new())
        }
    };
    info!("config: {:?}", config);
    Ok((config, root))
}

pub fn run_ipa(args: &Args) -> IpaResult<()> {
    let (config, root_p) = resolve_config(args)?;

    let items = read_rated_items(&root_p, &config.input_source)?;
    info!("Read {} items", items.len());

    let glossary = match config.glossary_path.clone() {
        Some(gp) => Glossary::from_file(root_p.join(gp).as_path())?,
        None => Glossary::default(),
    };
    debug!("Glossary: {} codes", glossary.len());

    let result = run_analysis(&items).context(AnalysisSnafu {})?;

    // Assemble the final json
    let result_js = build_summary_js(&config, &result, &glossary);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let mut stdout = std::io::stdout();
    report::write_report(&mut stdout, &config, &result, &glossary)
        .context(WritingFileSnafu { path: STDOUT })?;
    stdout.flush().context(WritingFileSnafu { path: STDOUT })?;

    // All the outputs are prepared before writing anything.
    let mut outputs: Vec<(String, Vec<u8>)> = Vec::new();
    if let Some(out_path) = args.out.clone() {
        outputs.push((
            output_path(&config, &root_p, &out_path),
            pretty_js_stats.clone().into_bytes(),
        ));
    }
    if let Some(export_path) = args.export.clone() {
        let mut buf: Vec<u8> = Vec::new();
        export::write_export(&mut buf, &result.items)?;
        outputs.push((output_path(&config, &root_p, &export_path), buf));
    }
    if let Some(chart_path) = args.chart.clone() {
        let chart_js = chart::build_chart_js(&result);
        let pretty_chart = serde_json::to_string_pretty(&chart_js).context(ParsingJsonSnafu {})?;
        outputs.push((
            output_path(&config, &root_p, &chart_path),
            pretty_chart.into_bytes(),
        ));
    }
    for (dest, _) in outputs.iter() {
        check_destination(dest)?;
    }
    for (dest, content) in outputs.iter() {
        write_output(dest, content)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.clone() {
        let summary_ref = read_summary(&summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
fn run_ipa_test(test_name: &str, config_lpath: &str, summary_lpath: &str) {
    let test_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests");
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/{}/{}", test_dir, test_name, config_lpath)),
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        ..Args::default()
    };
    let res = run_ipa(&args);
    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        panic!("test {} failed: {}", test_name, e);
    }
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    run_ipa_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}
