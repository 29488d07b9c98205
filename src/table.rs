// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Named tables of loosely typed cells, as read from a source workbook.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single value in a table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Parses a raw text value: blank text is `Null`, numeric text is a
    /// `Number`, anything else is kept as `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Returns true for `Null` and for blank text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Returns the cell as trimmed text, or `default` if the cell is null or
    /// blank.
    pub fn as_str_or(&self, default: &str) -> String {
        if self.is_blank() {
            return default.to_string();
        }
        self.to_string().trim().to_string()
    }

    /// Returns the cell as a number, parsing text if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Returns the cell as a number, or `default` if it isn't one.
    pub fn as_f64_or(&self, default: f64) -> f64 {
        self.as_f64().unwrap_or(default)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(n.into())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// A table with named, ordered columns.
///
/// Every row has exactly one cell per column.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Tables keyed by sheet name.
pub type TableSet = BTreeMap<String, Table>;

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from the given columns and rows.  Short rows are padded
    /// with `Null` and long rows are truncated.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<Cell>>,
    ) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Returns the position of the named column.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Returns the cell at the given row in the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns an iterator over the cells of the named column, or `None` if
    /// the column doesn't exist.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Appends a row, padding or truncating it to the number of columns.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    /// Replaces the named column with the given cells, adding the column if
    /// it doesn't exist.  Missing cells are `Null`.
    pub fn set_column(&mut self, column: &str, cells: impl IntoIterator<Item = Cell>) {
        let col = match self.column_index(column) {
            Some(col) => col,
            None => {
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Null);
                }
                self.columns.len() - 1
            }
        };
        let mut cells = cells.into_iter();
        for row in &mut self.rows {
            row[col] = cells.next().unwrap_or_default();
        }
    }

    /// Returns a table holding only the rows for which `keep` returns true.
    pub fn filter_rows(&self, mut keep: impl FnMut(&Table, usize) -> bool) -> Table {
        let rows = (0..self.rows.len())
            .filter(|&i| keep(self, i))
            .map(|i| self.rows[i].clone())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Applies `f` to every cell.
    pub fn map_cells(&mut self, mut f: impl FnMut(&mut Cell)) {
        self.rows.iter_mut().flatten().for_each(|cell| f(cell));
    }
}
