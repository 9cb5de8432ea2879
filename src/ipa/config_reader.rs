use crate::args::Args;
use crate::ipa::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_ITEM_COLUMN: &str = "Item";
pub const DEFAULT_IMPORTANCE_COLUMN: &str = "Importance";
pub const DEFAULT_PERFORMANCE_COLUMN: &str = "Performance";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "analysisTitle", default)]
    pub analysis_title: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "surveyDate")]
    pub survey_date: Option<String>,
    #[serde(rename = "organization")]
    pub organization: Option<String>,
}

/// The description of the analysis, as written in the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub source: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "itemColumn")]
    pub item_column: Option<String>,
    #[serde(rename = "importanceColumn")]
    pub importance_column: Option<String>,
    #[serde(rename = "performanceColumn")]
    pub performance_column: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl InputSource {
    /// The type of the input. If not provided, it is inferred from the extension of the file.
    pub fn provider(&self) -> IpaResult<String> {
        match self.provider.clone() {
            Some(p) if p == "csv" || p == "xlsx" => Ok(p),
            Some(p) => UnknownProviderSnafu { provider: p }.fail(),
            None if self.file_path.to_lowercase().ends_with(".xlsx") => Ok("xlsx".to_string()),
            None => Ok("csv".to_string()),
        }
    }

    pub fn item_column(&self) -> String {
        column_or(&self.item_column, DEFAULT_ITEM_COLUMN)
    }

    pub fn importance_column(&self) -> String {
        column_or(&self.importance_column, DEFAULT_IMPORTANCE_COLUMN)
    }

    pub fn performance_column(&self) -> String {
        column_or(&self.performance_column, DEFAULT_PERFORMANCE_COLUMN)
    }

    /// The names of the three columns to read: item, importance, performance.
    pub fn column_names(&self) -> [String; 3] {
        [
            self.item_column(),
            self.importance_column(),
            self.performance_column(),
        ]
    }
}

fn column_or(col: &Option<String>, default: &str) -> String {
    match col {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => default.to_string(),
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct IpaConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "inputSource")]
    pub input_source: InputSource,
    #[serde(rename = "glossaryPath")]
    pub glossary_path: Option<String>,
}

impl IpaConfig {
    /// A configuration with only an input file, and the defaults for everything else.
    pub fn from_input(path: &str) -> IpaConfig {
        IpaConfig {
            output_settings: OutputSettings {
                analysis_title: io_common::simplify_file_name(path),
                ..OutputSettings::default()
            },
            input_source: InputSource {
                provider: None,
                file_path: path.to_string(),
                item_column: None,
                importance_column: None,
                performance_column: None,
                excel_worksheet_name: None,
            },
            glossary_path: None,
        }
    }

    /// The command line flags take precedence over the content of the file.
    pub fn merge_args(self, args: &Args) -> IpaConfig {
        let src = self.input_source;
        IpaConfig {
            output_settings: self.output_settings,
            input_source: InputSource {
                provider: args.input_type.clone().or(src.provider),
                file_path: args.input.clone().unwrap_or(src.file_path),
                item_column: args.item_column.clone().or(src.item_column),
                importance_column: args.importance_column.clone().or(src.importance_column),
                performance_column: args.performance_column.clone().or(src.performance_column),
                excel_worksheet_name: args
                    .excel_worksheet_name
                    .clone()
                    .or(src.excel_worksheet_name),
            },
            glossary_path: args.glossary.clone().or(self.glossary_path),
        }
    }
}

pub fn read_config(path: &str) -> IpaResult<IpaConfig> {
    let config_str = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: IpaConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> IpaResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let js = r#"{
            "outputSettings": {"analysisTitle": "ESG 2024", "surveyDate": "2024-05-01"},
            "inputSource": {"provider": "xlsx", "filePath": "survey.xlsx", "itemColumn": "Code"},
            "glossaryPath": "glossary.json"
        }"#;
        let config: IpaConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.analysis_title, "ESG 2024");
        assert_eq!(config.input_source.provider().unwrap(), "xlsx");
        assert_eq!(
            config.input_source.column_names(),
            [
                "Code".to_string(),
                "Importance".to_string(),
                "Performance".to_string()
            ]
        );
        assert_eq!(config.glossary_path, Some("glossary.json".to_string()));
    }

    #[test]
    fn output_settings_are_optional() {
        let js = r#"{"inputSource": {"filePath": "data.csv"}}"#;
        let config: IpaConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings, OutputSettings::default());
        assert_eq!(config.glossary_path, None);
    }

    #[test]
    fn provider_inferred_from_extension() {
        let c = IpaConfig::from_input("/tmp/Survey.XLSX");
        assert_eq!(c.input_source.provider().unwrap(), "xlsx");
        assert_eq!(c.output_settings.analysis_title, "Survey.XLSX");
        let c = IpaConfig::from_input("survey.txt");
        assert_eq!(c.input_source.provider().unwrap(), "csv");
        let mut c = IpaConfig::from_input("survey.csv");
        c.input_source.provider = Some("ods".to_string());
        assert!(c.input_source.provider().is_err());
    }

    #[test]
    fn args_override_config() {
        let config = IpaConfig::from_input("survey.csv");
        let args = Args {
            input: Some("other.xlsx".to_string()),
            performance_column: Some("Perf".to_string()),
            glossary: Some("codes.csv".to_string()),
            ..Args::default()
        };
        let merged = config.merge_args(&args);
        assert_eq!(merged.input_source.file_path, "other.xlsx");
        assert_eq!(merged.input_source.provider().unwrap(), "xlsx");
        assert_eq!(merged.input_source.item_column(), "Item");
        assert_eq!(merged.input_source.performance_column(), "Perf");
        assert_eq!(merged.glossary_path, Some("codes.csv".to_string()));
    }
}
