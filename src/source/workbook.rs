// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Reading workbooks from Excel files, CSV directories or JSON documents,
//! and writing them as CSV directories.
//!
//! The first row of every Excel sheet holds the column names.  A CSV
//! workbook is a directory with one `.csv` file per sheet, named after the
//! sheet.  A JSON workbook is an object mapping sheet names to arrays of row
//! objects.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader};
use serde_json::Value;

use crate::table::{Cell, Table, TableSet};
use crate::Error;

/// Reads the workbook at `path`.
pub(crate) fn read_workbook(path: &Path) -> Result<TableSet, Error> {
    if !path.exists() {
        return Err(Error::io(format!("Workbook not found: {}", path.display())));
    }
    if path.is_dir() {
        return read_csv_dir(path);
    }
    match extension(path).as_deref() {
        Some("json") => read_json(path),
        Some("csv") => {
            let mut tables = TableSet::new();
            tables.insert(sheet_name(path)?, read_csv(path)?);
            Ok(tables)
        }
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => read_excel(path),
        _ => Err(Error::unsupported_source(format!(
            "Unrecognized workbook format: {}",
            path.display()
        ))),
    }
}

/// Writes every table as a CSV file into `dir`, creating it if needed, and
/// returns the written paths.
pub(crate) fn write_csv_dir(tables: &TableSet, dir: &Path) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(tables.len());
    for (name, table) in tables {
        let path = dir.join(format!("{name}.csv"));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn sheet_name(path: &Path) -> Result<String, Error> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::io(format!("Invalid sheet file name: {}", path.display())))
}

fn read_csv_dir(dir: &Path) -> Result<TableSet, Error> {
    let mut tables = TableSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && extension(&path).as_deref() == Some("csv") {
            tables.insert(sheet_name(&path)?, read_csv(&path)?);
        }
    }
    tracing::debug!("Read {} sheets from {}.", tables.len(), dir.display());
    Ok(tables)
}

fn read_csv(path: &Path) -> Result<Table, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);
    for record in reader.records() {
        table.push_row(record?.iter().map(Cell::parse).collect());
    }
    Ok(table)
}

fn read_excel(path: &Path) -> Result<TableSet, Error> {
    let failed = |err: calamine::Error| {
        Error::parse(format!("Failed to load Excel file {}: {err}", path.display()))
    };
    let mut workbook = calamine::open_workbook_auto(path).map_err(failed)?;

    let mut tables = TableSet::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(failed)?;
        tables.insert(name, range_to_table(&range));
    }
    tracing::debug!("Read {} sheets from {}.", tables.len(), path.display());
    Ok(tables)
}

/// Converts a sheet into a table, taking the column names from its first
/// row.  Rows without any value are dropped.
fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell.to_string().trim() {
            "" => format!("Unnamed: {i}"),
            name => name.to_string(),
        })
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(excel_cell).collect();
        if cells.iter().any(|c| !c.is_null()) {
            table.push_row(cells);
        }
    }
    table
}

fn excel_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Float(n) => Cell::Number(*n),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

fn read_json(path: &Path) -> Result<TableSet, Error> {
    let document: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    let Value::Object(sheets) = document else {
        return Err(Error::parse(format!(
            "Expected an object of sheets in {}",
            path.display()
        )));
    };

    let mut tables = TableSet::new();
    for (name, rows) in sheets {
        let Value::Array(rows) = rows else {
            return Err(Error::parse(format!("Sheet '{name}' is not an array of rows")));
        };
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            let Value::Object(fields) = row else {
                return Err(Error::parse(format!("Sheet '{name}' has a row that is not an object")));
            };
            for key in fields.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        let mut table = Table::new(columns.clone());
        for row in &rows {
            table.push_row(
                columns
                    .iter()
                    .map(|col| row.get(col).map(json_cell).unwrap_or_default())
                    .collect(),
            );
        }
        tables.insert(name, table);
    }
    Ok(tables)
}

fn json_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Number(n) => n.as_f64().map_or(Cell::Null, Cell::Number),
        Value::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}
