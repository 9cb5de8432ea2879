use std::collections::HashMap;
use std::path::Path;

use crate::ipa::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Item codes stored as numbers in a spreadsheet (1, 2, ...) are written without decimals.
pub fn format_number_id(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Given the header of a file (names of each of the columns), and the names of the
/// requested columns, finds the position of each requested column.
pub fn get_col_index_mapping(
    req_col_names: &[String],
    header: &[Option<String>],
) -> IpaResult<Vec<usize>> {
    let mut col_names: HashMap<String, usize> = HashMap::new();
    for (idx, x) in header.iter().enumerate() {
        if let Some(s) = x {
            // The first column with a given name wins.
            col_names.entry(s.trim().to_string()).or_insert(idx);
        }
    }

    debug!("get_col_index_mapping: col_names: {:?}", col_names);

    let mut col_indexes: Vec<usize> = Vec::new();
    for cname in req_col_names {
        let idx = col_names
            .get(cname.trim())
            .context(CannotFindColumnInHeaderSnafu {
                column_name: cname.clone(),
            })?;
        col_indexes.push(*idx);
    }
    Ok(col_indexes)
}
