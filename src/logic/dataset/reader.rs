//! Raw split reader
//!
//! Parses a header-less NSL-KDD split file into a [`Table`] using the fixed
//! column layout.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{DatasetError, DatasetResult};
use super::layout::{is_categorical, COLUMNS, COLUMN_COUNT};
use super::table::{Column, ColumnData, Table};

/// Read one split file. The file must exist; every row must carry exactly
/// one field per layout column.
pub fn read_split(path: &Path) -> DatasetResult<Table> {
    if !path.is_file() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut data: Vec<RawColumn> = COLUMNS
        .iter()
        .map(|name| {
            if is_categorical(name) {
                RawColumn::Categorical(Vec::new())
            } else {
                RawColumn::Numeric(Vec::new())
            }
        })
        .collect();

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != COLUMN_COUNT {
            return Err(DatasetError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("expected {} fields, found {}", COLUMN_COUNT, record.len()),
            });
        }

        for ((field, column), name) in record.iter().zip(data.iter_mut()).zip(COLUMNS) {
            match column {
                // Categorical values are kept verbatim
                RawColumn::Categorical(values) => values.push(field.to_string()),
                RawColumn::Numeric(values) => {
                    let value = field.trim().parse::<f64>().map_err(|_| DatasetError::Parse {
                        path: path.to_path_buf(),
                        line,
                        message: format!("column '{}': invalid number '{}'", name, field),
                    })?;
                    values.push(value);
                }
            }
        }
    }

    let table = Table::from_columns(
        COLUMNS
            .iter()
            .zip(data)
            .map(|(name, raw)| Column::new(*name, raw.into()))
            .collect(),
    )?;

    log::debug!("Read {} rows from {}", table.n_rows(), path.display());
    Ok(table)
}

/// Column under construction; raw files only hold numbers and strings
enum RawColumn {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl From<RawColumn> for ColumnData {
    fn from(raw: RawColumn) -> Self {
        match raw {
            RawColumn::Numeric(values) => ColumnData::Numeric(values),
            RawColumn::Categorical(values) => ColumnData::Categorical(values),
        }
    }
}

/// Count data rows without parsing fields
pub fn count_rows(path: &Path) -> DatasetResult<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut record = csv::ByteRecord::new();
    let mut count = 0;
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| csv_error(path, e))?
    {
        count += 1;
    }
    Ok(count)
}

fn csv_error(path: &Path, err: csv::Error) -> DatasetError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DatasetError::io(path, source),
        kind => DatasetError::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("{:?}", kind),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ROW: &str = "0,tcp,http,SF,181,5450,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,8,8,0.00,0.00,0.00,0.00,1.00,0.00,0.00,9,9,1.00,0.00,0.11,0.00,0.00,0.00,0.00,0.00,normal,21";

    #[test]
    fn test_read_single_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("split.txt");
        fs::write(&path, format!("{}\n", ROW)).unwrap();

        let table = read_split(&path).unwrap();
        assert_eq!(table.shape(), (1, COLUMN_COUNT));
        assert_eq!(table.categorical("service").unwrap()[0], "http");
        assert_eq!(table.numeric("src_bytes").unwrap()[0], 181.0);
        assert_eq!(table.numeric("dst_host_srv_count").unwrap()[0], 9.0);
        assert_eq!(table.categorical("label").unwrap()[0], "normal");
        assert_eq!(table.numeric("difficulty").unwrap()[0], 21.0);
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("split.txt");
        fs::write(&path, format!("{}\n0,tcp,http\n", ROW)).unwrap();

        match read_split(&path) {
            Err(DatasetError::Parse { line, message, .. }) => {
                assert_eq!(line, 2);
                assert!(message.contains("found 3"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_names_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("split.txt");
        fs::write(&path, ROW.replacen("181", "abc", 1)).unwrap();

        let err = read_split(&path).unwrap_err();
        assert!(err.to_string().contains("src_bytes"));
    }

    #[test]
    fn test_categorical_whitespace_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("split.txt");
        fs::write(&path, ROW.replacen(",tcp,", ", tcp,", 1).replacen(",181,", ", 181 ,", 1)).unwrap();

        let table = read_split(&path).unwrap();
        assert_eq!(table.categorical("protocol_type").unwrap()[0], " tcp");
        assert_eq!(table.numeric("src_bytes").unwrap()[0], 181.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_split(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn test_count_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("split.txt");
        fs::write(&path, format!("{}\n{}\n{}\n", ROW, ROW, ROW)).unwrap();
        assert_eq!(count_rows(&path).unwrap(), 3);
    }
}
