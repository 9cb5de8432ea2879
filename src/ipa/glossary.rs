//! Descriptions of the item codes (E1, S12, ...). Only used for display.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ipa::*;

/// The ESG pillar of an item code, from its first letter.
pub fn pillar(code: &str) -> Option<&'static str> {
    match code.trim().chars().next()?.to_ascii_uppercase() {
        'E' => Some("Environmental"),
        'S' => Some("Social"),
        'G' => Some("Governance"),
        _ => None,
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Glossary {
    descriptions: HashMap<String, String>,
}

#[derive(Deserialize)]
struct GlossaryRecord {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Description")]
    description: String,
}

impl Glossary {
    pub fn new(descriptions: HashMap<String, String>) -> Glossary {
        Glossary { descriptions }
    }

    /// Reads a glossary: a JSON object if the file ends with `.json`, a CSV file with the
    /// columns `Code` and `Description` otherwise.
    pub fn from_file(path: &Path) -> IpaResult<Glossary> {
        let path_s = path.display().to_string();
        info!("Reading glossary {:?}", path_s);
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            let contents = fs::read_to_string(path).context(OpeningFileSnafu { path: path_s })?;
            Glossary::from_json(&contents)
        } else {
            let rdr = csv::Reader::from_path(path).context(CsvOpenSnafu { path: path_s })?;
            Glossary::from_csv(rdr)
        }
    }

    fn from_json(contents: &str) -> IpaResult<Glossary> {
        let descriptions: HashMap<String, String> =
            serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
        Ok(Glossary::new(descriptions))
    }

    fn from_csv<R: std::io::Read>(mut rdr: csv::Reader<R>) -> IpaResult<Glossary> {
        let mut descriptions: HashMap<String, String> = HashMap::new();
        for rec in rdr.deserialize::<GlossaryRecord>() {
            let rec = rec.context(CsvLineParseSnafu {})?;
            let code = rec.code.trim().to_string();
            if descriptions.contains_key(&code) {
                warn!("Glossary: code {} defined more than once, keeping the first one", code);
                continue;
            }
            descriptions.insert(code, rec.description.trim().to_string());
        }
        Ok(Glossary::new(descriptions))
    }

    pub fn describe(&self, code: &str) -> Option<&str> {
        self.descriptions.get(code.trim()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
