// Primitives for reading CSV files.

use std::io;

use crate::ipa::{io_common::get_col_index_mapping, *};

pub fn read_csv_items(path: &str, source: &InputSource) -> IpaResult<Vec<ParsedItem>> {
    let rdr = reader_builder()
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_records(rdr, source)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // The header is handled by hand, and the lines may have different lengths.
    builder.has_headers(false).flexible(true);
    builder
}

fn read_records<R: io::Read>(
    rdr: csv::Reader<R>,
    source: &InputSource,
) -> IpaResult<Vec<ParsedItem>> {
    let mut records = rdr.into_records();
    let header: Vec<Option<String>> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu {})?
            .iter()
            // Spreadsheet programs often start the file with a byte order mark.
            .map(|s| Some(s.trim_start_matches('\u{feff}').to_string()))
            .collect(),
        None => return Ok(Vec::new()),
    };
    debug!("read_csv_items: header: {:?}", header);
    let col_idxs = get_col_index_mapping(&source.column_names(), &header)?;

    let mut res: Vec<ParsedItem> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let cell = |col: usize| match line.get(col_idxs[col]) {
            Some(s) if !s.is_empty() => CellValue::Text(s.to_string()),
            _ => CellValue::Empty,
        };
        let pi = ParsedItem {
            lineno,
            id: cell(0),
            importance: cell(1),
            performance: cell(2),
        };
        debug!("read_csv_items: {:?}", pi);
        res.push(pi);
    }
    Ok(res)
}
