// Export of the classified items in CSV format.

use std::io;

use serde::{Deserialize, Serialize};

use crate::ipa::*;
use ipa_analysis::*;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct ExportRecord {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Importance")]
    importance: f64,
    #[serde(rename = "Performance")]
    performance: f64,
    #[serde(rename = "Strategy")]
    strategy: String,
    #[serde(rename = "Recommendation")]
    recommendation: String,
}

/// Writes one line per item, in the order of the analysis.
pub fn write_export<W: io::Write>(w: W, items: &[ClassifiedItem]) -> IpaResult<()> {
    let mut wtr = csv::Writer::from_writer(w);
    for ci in items.iter() {
        wtr.serialize(ExportRecord {
            item: ci.item.id.clone(),
            importance: ci.item.importance,
            performance: ci.item.performance,
            strategy: ci.strategy.name().to_string(),
            recommendation: ci.recommendation.clone(),
        })
        .context(CsvWriteSnafu {})?;
    }
    wtr.flush().context(WritingFileSnafu { path: "csv export" })?;
    debug!("write_export: {} lines", items.len());
    Ok(())
}

/// Reads back a file written by `write_export`.
pub fn read_export(path: &str) -> IpaResult<Vec<(String, f64, f64, Strategy)>> {
    let rdr = csv::Reader::from_path(path).context(CsvOpenSnafu { path })?;
    read_export_records(rdr)
}

fn read_export_records<R: io::Read>(
    mut rdr: csv::Reader<R>,
) -> IpaResult<Vec<(String, f64, f64, Strategy)>> {
    let mut res = Vec::new();
    for (idx, rec_r) in rdr.deserialize::<ExportRecord>().enumerate() {
        let rec = rec_r.context(CsvLineParseSnafu {})?;
        let strategy: Strategy = rec.strategy.parse().ok().context(MalformedInputSnafu {
            lineno: idx + 2,
            column: "Strategy",
            content: rec.strategy.clone(),
        })?;
        res.push((rec.item, rec.importance, rec.performance, strategy));
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported(items: &[ClassifiedItem]) -> String {
        let mut buf: Vec<u8> = Vec::new();
        write_export(&mut buf, items).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_order() {
        let data = vec![
            RatedItem::new("A", 5.0, 5.0),
            RatedItem::new("B", 1.0, 1.0),
            RatedItem::new("C", 5.0, 1.0),
            RatedItem::new("D", 1.0, 5.0),
        ];
        let (_, items) = classify(&data).unwrap();
        let content = exported(&items);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Item,Importance,Performance,Strategy,Recommendation");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("A,5.0,5.0,retain,"));
        assert!(lines[3].starts_with("C,5.0,1.0,improve_first,"));
    }

    #[test]
    fn round_trip() {
        let data = vec![
            RatedItem::new("E1 \"air\"", 4.25, 3.1),
            RatedItem::new("환경, 2", 1.0 / 3.0, 4.0),
            RatedItem::new("G1", 2.0, 0.1 + 0.2),
        ];
        let (_, items) = classify(&data).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("export.csv");
        let f = std::fs::File::create(&p).unwrap();
        write_export(f, &items).unwrap();

        let back = read_export(&p.display().to_string()).unwrap();
        let expected: Vec<(String, f64, f64, Strategy)> = items
            .iter()
            .map(|ci| {
                (
                    ci.item.id.clone(),
                    ci.item.importance,
                    ci.item.performance,
                    ci.strategy,
                )
            })
            .collect();
        assert_eq!(back, expected);
    }

    #[test]
    fn unknown_strategy() {
        let content = "Item,Importance,Performance,Strategy,Recommendation\nE1,1,2,keep,x\n";
        let rdr = csv::Reader::from_reader(content.as_bytes());
        assert!(matches!(
            read_export_records(rdr),
            Err(IpaError::MalformedInput { lineno: 2, .. })
        ));
    }
}
