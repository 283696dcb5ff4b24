//! Columnar in-memory table
//!
//! Every column has the same row count; row order is the order rows were
//! read or appended in.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{DatasetError, DatasetResult};
use super::layout::schema_hash;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
    /// One-hot indicator values
    Indicator(Vec<bool>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
            ColumnData::Indicator(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnData::Numeric(_) => "numeric",
            ColumnData::Categorical(_) => "categorical",
            ColumnData::Indicator(_) => "indicator",
        }
    }

    /// Numeric view of one cell (indicators become 0/1, categorical has none)
    pub fn value(&self, row: usize) -> Option<f64> {
        match self {
            ColumnData::Numeric(v) => v.get(row).copied(),
            ColumnData::Indicator(v) => v.get(row).map(|&b| if b { 1.0 } else { 0.0 }),
            ColumnData::Categorical(_) => None,
        }
    }

    fn cell(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(v) => format_number(v[row]),
            ColumnData::Categorical(v) => v[row].clone(),
            ColumnData::Indicator(v) => v[row].to_string(),
        }
    }

    fn slice(&self, start: usize, end: usize) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(v[start..end].to_vec()),
            ColumnData::Categorical(v) => ColumnData::Categorical(v[start..end].to_vec()),
            ColumnData::Indicator(v) => ColumnData::Indicator(v[start..end].to_vec()),
        }
    }

    fn split_off(&mut self, at: usize) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(v.split_off(at)),
            ColumnData::Categorical(v) => ColumnData::Categorical(v.split_off(at)),
            ColumnData::Indicator(v) => ColumnData::Indicator(v.split_off(at)),
        }
    }

    fn extend_from(&mut self, other: &ColumnData) -> bool {
        match (self, other) {
            (ColumnData::Numeric(a), ColumnData::Numeric(b)) => a.extend_from_slice(b),
            (ColumnData::Categorical(a), ColumnData::Categorical(b)) => a.extend_from_slice(b),
            (ColumnData::Indicator(a), ColumnData::Indicator(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, checking equal lengths and unique names
    pub fn from_columns(columns: Vec<Column>) -> DatasetResult<Self> {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// String values of a categorical column
    pub fn categorical(&self, name: &str) -> Option<&[String]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Categorical(values)) => Some(values),
            _ => None,
        }
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Numeric(values)) => Some(values),
            _ => None,
        }
    }

    pub fn indicator(&self, name: &str) -> Option<&[bool]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Indicator(values)) => Some(values),
            _ => None,
        }
    }

    /// Append a column at the end
    pub fn push_column(&mut self, column: Column) -> DatasetResult<()> {
        if self.has_column(&column.name) {
            return Err(DatasetError::Schema(format!(
                "duplicate column '{}'",
                column.name
            )));
        }
        if !self.columns.is_empty() && column.data.len() != self.rows {
            return Err(DatasetError::Schema(format!(
                "column '{}' has {} rows, table has {}",
                column.name,
                column.data.len(),
                self.rows
            )));
        }
        self.rows = column.data.len();
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by name, returning it if present
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.columns.iter().position(|c| c.name == name)?;
        let column = self.columns.remove(idx);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        Some(column)
    }

    /// Rows of `self` followed by rows of `other`; schemas must match exactly
    pub fn concat(&self, other: &Table) -> DatasetResult<Table> {
        if self.column_names() != other.column_names() {
            return Err(DatasetError::Schema(
                "cannot concatenate tables with different columns".to_string(),
            ));
        }

        let mut combined = self.clone();
        for (dst, src) in combined.columns.iter_mut().zip(&other.columns) {
            if !dst.data.extend_from(&src.data) {
                return Err(DatasetError::Schema(format!(
                    "column '{}' is {} in one table and {} in the other",
                    dst.name,
                    dst.data.kind_name(),
                    src.data.kind_name()
                )));
            }
        }
        combined.rows = self.rows + other.rows;
        Ok(combined)
    }

    /// Split into rows `[0, at)` and `[at, n)`
    pub fn split_at(mut self, at: usize) -> (Table, Table) {
        let at = at.min(self.rows);
        let tail_columns = self
            .columns
            .iter_mut()
            .map(|c| Column::new(c.name.clone(), c.data.split_off(at)))
            .collect();
        let tail = Table {
            columns: tail_columns,
            rows: self.rows - at,
        };
        self.rows = at;
        (self, tail)
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Table {
        let end = n.min(self.rows);
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.slice(0, end)))
                .collect(),
            rows: end,
        }
    }

    /// Sorted distinct values of a categorical column
    pub fn categories(&self, name: &str) -> Option<Vec<&str>> {
        let values = self.categorical(name)?;
        let set: BTreeSet<&str> = values.iter().map(String::as_str).collect();
        Some(set.into_iter().collect())
    }

    pub fn schema_hash(&self) -> u32 {
        schema_hash(self.columns.iter().map(|c| c.name.as_str()))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self.rows.saturating_sub(1).to_string().len();
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| (0..self.rows).map(|r| c.data.cell(r)).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, col)| col.iter().map(String::len).chain([c.name.len()]).max().unwrap_or(0))
            .collect();

        write!(f, "{:width$}", "", width = index_width)?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.name, width = width)?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "{:>width$}", row, width = index_width)?;
            for (col, width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", col[row], width = width)?;
            }
            writeln!(f)?;
        }

        write!(f, "[{} rows x {} columns]", self.rows, self.columns.len())
    }
}
