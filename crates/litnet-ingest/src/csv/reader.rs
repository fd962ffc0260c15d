//! Record table loading into Polars DataFrames.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};
use crate::tables::InputTable;

/// Maximum file size for CSV loading (200 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Rejects UTF-16 input; a UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads any CSV file into a DataFrame with a single header row.
///
/// Every column is read as text so identifiers such as `007` keep their
/// leading zeros; presence cells are parsed later.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(strip_bom_from_names(df)?)
}

/// Reads the labelled records table and checks its required columns.
pub fn read_records(path: &Path) -> Result<DataFrame> {
    let df = read_csv_frame(path)?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    InputTable::Records.check_columns(&names)?;
    if df.width() > 1000 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "records table has more than 1000 columns"
        );
    }
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "records loaded"
    );
    Ok(df)
}

fn strip_bom_from_names(mut df: DataFrame) -> polars::prelude::PolarsResult<DataFrame> {
    let first = df.get_column_names().first().map(|name| name.to_string());
    if let Some(first) = first
        && let Some(stripped) = first.strip_prefix('\u{feff}')
    {
        let stripped = stripped.to_string();
        df.rename(&first, stripped.into())?;
    }
    Ok(df)
}
