// src/data/mod.rs
use std::{fmt, fs, path::Path};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::PrepError;

/// Name of the file each partition is written to inside its output directory.
pub const PARTITION_FILE: &str = "data.csv";

/// A single cell. Columns are homogeneous: the loader picks one variant
/// per column based on content.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
        }
    }
}

/// An in-memory table: ordered column names plus rows of equal width.
/// Row order is load order and is only changed by the split shuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// New frame containing the given rows, in the order listed.
    pub fn take(&self, indices: &[usize]) -> Frame {
        let rows = indices.iter().map(|&i| self.rows[i].clone()).collect();
        Frame::new(self.columns.clone(), rows)
    }
}

/// Per-column type chosen while loading: Int if every cell parses as i64,
/// Float if every cell parses as f64, Str otherwise.
fn infer_dtype<'a, I: Iterator<Item = &'a str> + Clone>(mut cells: I) -> fn(&str) -> Value {
    if cells.clone().all(|c| c.parse::<i64>().is_ok()) {
        |c| {
            c.parse()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Str(c.to_string()))
        }
    } else if cells.all(|c| c.parse::<f64>().is_ok()) {
        |c| {
            c.parse()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::Str(c.to_string()))
        }
    } else {
        |c| Value::Str(c.to_string())
    }
}

/// Load a delimited file (header row + records) fully into memory,
/// preserving column and row order.
pub fn read_csv(path: &Path) -> Result<Frame, PrepError> {
    let file = fs::File::open(path).map_err(|source| PrepError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| PrepError::Malformed {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut raw: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| PrepError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        raw.push(record.iter().map(str::to_string).collect());
    }

    // Decide each column's type from the full column contents, then convert.
    let converters: Vec<fn(&str) -> Value> = (0..columns.len())
        .map(|col| infer_dtype(raw.iter().map(move |row| row[col].as_str())))
        .collect();

    let rows: Vec<Vec<Value>> = raw
        .iter()
        .map(|row| {
            row.iter()
                .zip(&converters)
                .map(|(cell, conv)| conv(cell))
                .collect()
        })
        .collect();

    debug!(path = %path.display(), rows = rows.len(), cols = columns.len(), "loaded dataset");
    Ok(Frame::new(columns, rows))
}

/// Write `frame` as `<dir>/data.csv` with a header row and no index column,
/// creating `dir` first if needed.
pub fn write_csv(frame: &Frame, dir: &Path) -> Result<(), PrepError> {
    let out_path = dir.join(PARTITION_FILE);
    let io_write = |source: csv::Error| PrepError::IoWrite {
        path: out_path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(|e| io_write(e.into()))?;

    let mut writer = WriterBuilder::new().from_path(&out_path).map_err(io_write)?;
    writer.write_record(frame.columns()).map_err(io_write)?;
    for row in frame.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(io_write)?;
    }
    writer.flush().map_err(|e| io_write(csv::Error::from(e)))?;

    debug!(path = %out_path.display(), rows = frame.len(), "wrote partition");
    Ok(())
}
