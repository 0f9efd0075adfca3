use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, Trim};
use probe_core::{parse_identifiers, Identifier, Mapping};
use probe_logging::{probe_debug, probe_info};

use crate::decode::{decode_text, DecodeError};

/// Extensions read as workbooks; everything else is treated as CSV text.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot decode {path}: {source}")]
    Decode { path: PathBuf, source: DecodeError },
}

/// Fatal problems with the mapping file. Any of them stops the run before
/// probing starts.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("malformed CSV in {path}: {message}")]
    Csv { path: PathBuf, message: String },
    #[error("cannot open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
    #[error("workbook {path} has no worksheet")]
    NoWorksheet { path: PathBuf },
    #[error("mapping file {path} must have at least two columns (ID and label), found {found}")]
    TooFewColumns { path: PathBuf, found: usize },
}

/// Read a newline-delimited identifier list from disk.
pub fn load_identifiers(path: &Path) -> Result<Vec<Identifier>, SourceError> {
    let text = read_text(path)?;
    let identifiers = parse_identifiers(&text);
    probe_info!("Loaded {} identifiers from {:?}", identifiers.len(), path);
    Ok(identifiers)
}

/// Load an identifier-to-label table. The first row is a header; column one
/// is the identifier, column two the label, further columns are ignored.
pub fn load_mapping(path: &Path) -> Result<Mapping, MappingError> {
    let mapping = if is_spreadsheet(path) {
        load_workbook_mapping(path)?
    } else {
        let text = read_text(path)?;
        parse_csv_mapping(&text, path)?
    };
    probe_info!("Loaded {} mapping entries from {:?}", mapping.len(), path);
    Ok(mapping)
}

/// Parse comma-delimited mapping text. `origin` is only used in errors.
pub fn parse_csv_mapping(text: &str, origin: &Path) -> Result<Mapping, MappingError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let csv_error = |err: csv::Error| MappingError::Csv {
        path: origin.to_path_buf(),
        message: err.to_string(),
    };

    let columns = reader.headers().map_err(csv_error)?.len();
    if columns < 2 {
        return Err(MappingError::TooFewColumns {
            path: origin.to_path_buf(),
            found: columns,
        });
    }

    let mut mapping = Mapping::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let key = record.get(0).unwrap_or_default();
        let label = record.get(1).unwrap_or_default();
        mapping.insert(key, label);
    }
    Ok(mapping)
}

fn load_workbook_mapping(path: &Path) -> Result<Mapping, MappingError> {
    let mut workbook = open_workbook_auto(path).map_err(|err| MappingError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MappingError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|err| MappingError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let columns = range.width();
    if columns < 2 {
        return Err(MappingError::TooFewColumns {
            path: path.to_path_buf(),
            found: columns,
        });
    }
    probe_debug!("Workbook {:?} first sheet is {:?}", path, range.get_size());

    let mut mapping = Mapping::new();
    for row in range.rows().skip(1) {
        let key = row.first().map(cell_text).unwrap_or_default();
        let label = row.get(1).map(cell_text).unwrap_or_default();
        mapping.insert(&key, &label);
    }
    Ok(mapping)
}

/// Render a cell the way it reads in the sheet; whole floats drop the `.0`
/// so numeric identifier columns match their decimal keys.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn read_text(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_text(&bytes).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    probe_debug!("Decoded {:?} as {}", path, decoded.encoding_label);
    Ok(decoded.text)
}
