// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::ipa::{io_common::get_col_index_mapping, *};

pub fn read_excel_items(path: &str, source: &InputSource) -> IpaResult<Vec<ParsedItem>> {
    let wrange = get_range(path, source)?;
    let res = read_range(&wrange, source)?;
    if res.is_empty() && wrange.is_empty() {
        return EmptySpreadsheetSnafu { path }.fail();
    }
    Ok(res)
}

fn read_range(wrange: &Range<DataType>, source: &InputSource) -> IpaResult<Vec<ParsedItem>> {
    let mut iter = wrange.rows();
    let header: Vec<Option<String>> = match iter.next() {
        Some(row) => row
            .iter()
            .map(|dt| match dt {
                DataType::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        None => return Ok(Vec::new()),
    };
    debug!("read_excel_items: header: {:?}", header);
    let col_idxs = get_col_index_mapping(&source.column_names(), &header)?;

    // The range does not necessarily start on the first line of the worksheet.
    let first_line = wrange.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let mut res: Vec<ParsedItem> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = first_line + idx + 1;
        let cell = |col: usize| row.get(col_idxs[col]).map(read_cell).unwrap_or(CellValue::Empty);
        let pi = ParsedItem {
            lineno,
            id: cell(0),
            importance: cell(1),
            performance: cell(2),
        };
        debug!("read_excel_items: {:?}", pi);
        res.push(pi);
    }
    Ok(res)
}

fn read_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::String(s) if s.is_empty() => CellValue::Empty,
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Empty => CellValue::Empty,
        _ => CellValue::Other(format!("{:?}", cell)),
    }
}

fn get_range(path: &str, source: &InputSource) -> IpaResult<Range<DataType>> {
    let worksheet_name_o = source.excel_worksheet_name.clone();
    debug!(
        "read_excel_items: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name.clone(),
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptySpreadsheetSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_excel_items: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu {
                path,
                count: all_worksheets.len(),
            }
            .fail(),
        }
    }
}
