//! Tabular data input and output for the workbench.

pub mod binary;
pub mod table;

pub use binary::Endian;
pub use table::DataTable;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: cannot parse '{token}' as a number")]
    Parse { line: usize, token: String },

    #[error("Line {line}: expected {expected} columns, found {found}")]
    Layout {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Binary data of {bytes} bytes is not a whole number of {columns}-column f64 records")]
    Truncated { bytes: usize, columns: usize },

    #[error("Column {index} out of range ({count} columns)")]
    MissingColumn { index: usize, count: usize },

    #[error("Column '{name}' has {found} rows, table has {expected}")]
    RowMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("No data rows found")]
    Empty,
}

/// On-disk layout of an input or output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DataFormat {
    /// Whitespace, comma or semicolon separated text
    #[default]
    Ascii,
    /// Interleaved little-endian f64 records
    BinaryLe,
    /// Interleaved big-endian f64 records
    BinaryBe,
}

impl DataFormat {
    fn endian(self) -> Option<Endian> {
        match self {
            Self::Ascii => None,
            Self::BinaryLe => Some(Endian::Little),
            Self::BinaryBe => Some(Endian::Big),
        }
    }
}

/// Reads a table from `path`; `columns` is only used for binary input.
pub fn load(path: &Path, format: DataFormat, columns: usize) -> Result<DataTable, DataError> {
    let reader = BufReader::new(File::open(path)?);
    let table = match format.endian() {
        None => DataTable::read_ascii(reader)?,
        Some(endian) => binary::read_binary(reader, columns, endian)?,
    };
    log::info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Writes `table` to `out_path`, or to stdout when it is `-`.
pub fn save(out_path: &str, table: &DataTable, format: DataFormat) -> Result<(), DataError> {
    if out_path == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_table(&mut out, table, format)?;
        out.flush()?;
    } else {
        let mut out = BufWriter::new(File::create(out_path)?);
        write_table(&mut out, table, format)?;
        out.flush()?;
        log::info!("Wrote {out_path}");
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &DataTable, format: DataFormat) -> Result<(), DataError> {
    match format.endian() {
        None => table.write_ascii(out),
        Some(endian) => binary::write_binary(out, table, endian),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_save_files() {
        let dir = std::env::temp_dir().join(format!("nsl-data-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let table = DataTable::from_columns(
            vec!["t".into(), "v".into()],
            vec![vec![0.0, 0.5, 1.0], vec![1.25, -2.0, 3.5]],
        )
        .unwrap();

        for format in [DataFormat::Ascii, DataFormat::BinaryLe, DataFormat::BinaryBe] {
            let path = dir.join(format!("{format:?}.dat"));
            save(path.to_str().unwrap(), &table, format).unwrap();
            let back = load(&path, format, 2).unwrap();
            assert_eq!(back.columns, table.columns, "{format:?}");
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/nsl/input.dat"), DataFormat::Ascii, 2).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
