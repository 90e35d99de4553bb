//! Column-oriented numeric table with a plain-text reader and writer.
//!
//! Lines starting with `#` are comments. Fields are separated by whitespace,
//! commas or semicolons. A first row that does not parse as numbers is taken
//! as the column names.

use super::DataError;
use std::io::{BufRead, BufReader, Read, Write};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|s| !s.is_empty())
}

fn default_name(index: usize) -> String {
    format!("col{}", index + 1)
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table, checking that every column has the same length.
    pub fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self, DataError> {
        let mut table = Self::new();
        let mut names = names.into_iter();
        for (i, values) in columns.into_iter().enumerate() {
            let name = names.next().unwrap_or_else(|| default_name(i));
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn column(&self, index: usize) -> Result<&[f64], DataError> {
        self.columns
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataError::MissingColumn {
                index,
                count: self.columns.len(),
            })
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), DataError> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(DataError::RowMismatch {
                name,
                expected: self.row_count(),
                found: values.len(),
            });
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    pub fn read_ascii<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut header: Option<Vec<String>> = None;
        let mut columns: Vec<Vec<f64>> = Vec::new();

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = fields(trimmed).collect();
            let parsed: Result<Vec<f64>, &str> = tokens
                .iter()
                .map(|t| t.parse::<f64>().map_err(|_| *t))
                .collect();
            let row = match parsed {
                Ok(row) => row,
                Err(_) if columns.is_empty() && header.is_none() => {
                    header = Some(tokens.iter().map(|t| t.to_string()).collect());
                    continue;
                }
                Err(token) => {
                    return Err(DataError::Parse {
                        line: line_no,
                        token: token.to_string(),
                    })
                }
            };

            if columns.is_empty() {
                columns = vec![Vec::new(); row.len()];
            }
            if row.len() != columns.len() {
                return Err(DataError::Layout {
                    line: line_no,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (col, v) in columns.iter_mut().zip(row) {
                col.push(v);
            }
        }

        if columns.is_empty() {
            return Err(DataError::Empty);
        }
        let names = match header {
            Some(names) if names.len() == columns.len() => names,
            Some(names) => {
                log::warn!(
                    "Ignoring header with {} names for {} columns",
                    names.len(),
                    columns.len()
                );
                Vec::new()
            }
            None => Vec::new(),
        };
        Self::from_columns(names, columns)
    }

    /// Writes a header row followed by tab separated values.
    pub fn write_ascii<W: Write>(&self, out: &mut W) -> Result<(), DataError> {
        let header: Vec<String> = self
            .names
            .iter()
            .map(|n| n.split_whitespace().collect::<Vec<_>>().join("_"))
            .collect();
        writeln!(out, "{}", header.join("\t"))?;
        for row in 0..self.row_count() {
            let line: Vec<String> = self.columns.iter().map(|c| c[row].to_string()).collect();
            writeln!(out, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_header_and_comments() {
        let text = "# exported trace\n\ntime, signal\n0, 1.5\n0.5; -2\n1\t3e2\n";
        let table = DataTable::read_ascii(text.as_bytes()).unwrap();
        assert_eq!(table.names, vec!["time", "signal"]);
        assert_eq!(table.columns, vec![vec![0.0, 0.5, 1.0], vec![1.5, -2.0, 300.0]]);
    }

    #[test]
    fn test_read_without_header() {
        let table = DataTable::read_ascii("1 2 3\n4 5 6\n".as_bytes()).unwrap();
        assert_eq!(table.names, vec!["col1", "col2", "col3"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(2).unwrap(), &[3.0, 6.0]);
    }

    #[test]
    fn test_read_errors() {
        let err = DataTable::read_ascii("1 2\n3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Layout { line: 2, expected: 2, found: 1 }));

        let err = DataTable::read_ascii("1 2\n3 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, ref token } if token == "x"));

        assert!(matches!(
            DataTable::read_ascii("# nothing\n".as_bytes()),
            Err(DataError::Empty)
        ));
    }

    #[test]
    fn test_write_then_read() {
        let table = DataTable::from_columns(
            vec!["x value".into(), "y".into()],
            vec![vec![0.1, 0.2], vec![1.0 / 3.0, -1e-300]],
        )
        .unwrap();
        let mut buf = Vec::new();
        table.write_ascii(&mut buf).unwrap();
        let back = DataTable::read_ascii(buf.as_slice()).unwrap();
        assert_eq!(back.names, vec!["x_value", "y"]);
        assert_eq!(back.columns, table.columns);
    }

    #[test]
    fn test_column_checks() {
        let mut table = DataTable::new();
        table.push_column("a", vec![1.0, 2.0]).unwrap();
        assert!(table.push_column("b", vec![1.0]).is_err());
        assert!(matches!(
            table.column(3),
            Err(DataError::MissingColumn { index: 3, count: 1 })
        ));
        assert_eq!(table.name(0), Some("a"));
    }
}
