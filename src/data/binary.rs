//! Raw binary tables: interleaved f64 records with no header.

use super::{DataError, DataTable};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

fn decode<B: ByteOrder>(bytes: &[u8]) -> Result<Vec<f64>, DataError> {
    let mut cursor = Cursor::new(bytes);
    let mut values = Vec::with_capacity(bytes.len() / 8);
    for _ in 0..bytes.len() / 8 {
        values.push(cursor.read_f64::<B>()?);
    }
    Ok(values)
}

/// Reads records of `columns` values each until end of input.
pub fn read_binary<R: Read>(mut reader: R, columns: usize, endian: Endian) -> Result<DataTable, DataError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let record = columns.checked_mul(8).filter(|&r| r > 0);
    if record.map_or(true, |r| bytes.len() % r != 0) {
        return Err(DataError::Truncated {
            bytes: bytes.len(),
            columns,
        });
    }
    if bytes.is_empty() {
        return Err(DataError::Empty);
    }

    let values = match endian {
        Endian::Little => decode::<LittleEndian>(&bytes)?,
        Endian::Big => decode::<BigEndian>(&bytes)?,
    };
    let rows = values.len() / columns;
    let mut cols = vec![Vec::with_capacity(rows); columns];
    for record in values.chunks_exact(columns) {
        for (col, &v) in cols.iter_mut().zip(record) {
            col.push(v);
        }
    }
    log::debug!("Decoded {rows} binary records of {columns} columns ({endian:?} endian)");
    DataTable::from_columns(Vec::new(), cols)
}

pub fn write_binary<W: Write>(out: &mut W, table: &DataTable, endian: Endian) -> Result<(), DataError> {
    for row in 0..table.row_count() {
        for col in &table.columns {
            match endian {
                Endian::Little => out.write_f64::<LittleEndian>(col[row])?,
                Endian::Big => out.write_f64::<BigEndian>(col[row])?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_layout() {
        let mut bytes = Vec::new();
        for v in [1.0f64, 10.0, 2.0, 20.0, 3.0, 30.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let table = read_binary(bytes.as_slice(), 2, Endian::Little).unwrap();
        assert_eq!(table.columns, vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]]);
        assert_eq!(table.names, vec!["col1", "col2"]);
    }

    #[test]
    fn test_big_endian() {
        let bytes: Vec<u8> = [0.5f64, -4.0].iter().flat_map(|v| v.to_be_bytes()).collect();
        let table = read_binary(bytes.as_slice(), 1, Endian::Big).unwrap();
        assert_eq!(table.columns, vec![vec![0.5, -4.0]]);

        let mut out = Vec::new();
        write_binary(&mut out, &table, Endian::Big).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_partial_record_rejected() {
        let bytes = vec![0u8; 24];
        assert!(matches!(
            read_binary(bytes.as_slice(), 2, Endian::Little),
            Err(DataError::Truncated { bytes: 24, columns: 2 })
        ));
        assert!(read_binary(bytes.as_slice(), 0, Endian::Little).is_err());
        assert!(matches!(
            read_binary(bytes.as_slice(), usize::MAX, Endian::Little),
            Err(DataError::Truncated { bytes: 24, .. })
        ));
        assert!(matches!(
            read_binary(&[][..], 2, Endian::Little),
            Err(DataError::Empty)
        ));
    }
}
