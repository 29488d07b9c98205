// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The reader for ETYS workbooks, and helpers for working with their
//! sheets.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::{Table, TableSet};
use crate::Error;

use super::{standardize, workbook, SourceReader, SourceRequest};

/// The box that geographic coordinates are scaled into for network
/// diagrams.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiagramBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for DiagramBounds {
    fn default() -> Self {
        Self {
            min_x: 20.0,
            min_y: 20.0,
            width: 260.0,
            height: 170.0,
        }
    }
}

/// Diagram positions keyed by node name.
pub type Coordinates = BTreeMap<String, (f64, f64)>;

/// Reads ETYS workbooks.
#[derive(Clone, Debug, Default)]
pub struct EtysReader {
    bounds: DiagramBounds,
}

impl SourceReader for EtysReader {
    fn load(&self, request: &SourceRequest) -> Result<TableSet, Error> {
        let tables = workbook::read_workbook(&request.path)?;
        tracing::info!(
            "Loaded {} sheets from {}.",
            tables.len(),
            request.path.display()
        );
        Ok(tables)
    }

    fn source_type(&self) -> &str {
        "EtysReader"
    }

    fn supported_formats(&self) -> Vec<String> {
        ["excel", "xlsx", "xls", "csv", "json", "ETYS"]
            .map(String::from)
            .to_vec()
    }

    fn standardize(&self, tables: TableSet) -> TableSet {
        standardize::standardize_etys(tables)
    }
}

impl EtysReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader that scales diagram coordinates into `bounds`.
    pub fn with_bounds(bounds: DiagramBounds) -> Self {
        Self { bounds }
    }

    pub fn coordinate_bounds(&self) -> DiagramBounds {
        self.bounds
    }

    /// The sheets an ETYS workbook is expected to have.
    pub fn required_sheets() -> [&'static str; 20] {
        standardize::ETYS_TABLE_NAMES.map(|(sheet, _)| sheet)
    }

    /// The ETYS sheets grouped by the kind of equipment they describe.
    pub fn sheet_categories() -> BTreeMap<&'static str, &'static [&'static str]> {
        BTreeMap::from([
            ("line_sheets", &["OHL", "Cable", "Composite", "Zero Length"][..]),
            (
                "transformer_sheets",
                &["Transformer", "Quadbooster", "Series Compensation", "SSSC"][..],
            ),
            ("shunt_sheets", &["Shunt Reactor", "Mechanically Switched Capacitor"][..]),
            ("dynamic_sheets", &["SVC", "STATCOM", "Sync Comp"][..]),
            ("series_sheets", &["Series Reactor", "Series Capacitor"][..]),
            ("load_sheets", &["Demand Data"][..]),
            ("generator_sheets", &["TEC Register", "IC Register"][..]),
            ("hvdc_sheets", &["Intra_HVDC"][..]),
        ])
    }

    /// Returns the distinct non-blank values of the zone column, in order
    /// of first appearance.
    pub fn extract_zones(nodes: &Table, zone_column: &str) -> Vec<String> {
        distinct(nodes, zone_column)
    }

    /// Returns the distinct non-blank values of the area column, in order of
    /// first appearance.
    pub fn extract_areas(nodes: &Table, area_column: &str) -> Vec<String> {
        distinct(nodes, area_column)
    }

    /// Returns the rows that have a non-blank node reference in
    /// `node_column`.  Tables without that column are returned unchanged.
    pub fn filter_valid_nodes(table: &Table, node_column: &str) -> Table {
        if !table.has_column(node_column) {
            return table.clone();
        }
        table.filter_rows(|t, row| t.get(row, node_column).is_some_and(|c| !c.is_blank()))
    }

    /// Returns the generator register rows that describe an actual machine:
    /// rows with a node reference and a non-zero capacity.
    ///
    /// Interconnector registers count a row if either its import or its
    /// export capacity is non-zero.  Every other register uses
    /// `MW_Capacity`.
    pub fn filter_generators(table: &Table, interconnectors: bool, node_column: &str) -> Table {
        let capacity = |t: &Table, row: usize, column: &str| {
            t.get(row, column).map_or(0.0, |c| c.as_f64_or(0.0))
        };
        table.filter_rows(|t, row| {
            let has_node = t.get(row, node_column).is_some_and(|c| !c.is_blank());
            let has_capacity = if interconnectors {
                capacity(t, row, "MW_Import_Capacity") != 0.0
                    || capacity(t, row, "MW_Export_Capacity") != 0.0
            } else {
                capacity(t, row, "MW_Capacity") != 0.0
            };
            has_node && has_capacity
        })
    }

    /// Scales the latitude and longitude of every node into the diagram
    /// bounds.
    ///
    /// Longitude maps to `x` and latitude to `y`.  Nodes without coordinates
    /// are placed at the minimum of their axis.
    pub fn diagram_coordinates(&self, nodes: &Table, node_column: &str) -> Coordinates {
        let points: Vec<(String, f64, f64)> = (0..nodes.len())
            .filter_map(|row| {
                let name = nodes.get(row, node_column)?.as_str_or("");
                let lat = nodes.get(row, "latitude").and_then(|c| c.as_f64());
                let lon = nodes.get(row, "longitude").and_then(|c| c.as_f64());
                Some((name, lat.unwrap_or(f64::NAN), lon.unwrap_or(f64::NAN)))
            })
            .collect();
        if points.is_empty() {
            return Coordinates::new();
        }

        let range = |values: Vec<f64>| {
            let present = values.into_iter().filter(|v| !v.is_nan());
            let (min, max) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            if min.is_finite() {
                (min, if max > min { max - min } else { 1.0 })
            } else {
                (0.0, 1.0)
            }
        };
        let (min_lat, lat_rng) = range(points.iter().map(|p| p.1).collect());
        let (min_lon, lon_rng) = range(points.iter().map(|p| p.2).collect());

        points
            .into_iter()
            .map(|(name, lat, lon)| {
                let lat = if lat.is_nan() { min_lat } else { lat };
                let lon = if lon.is_nan() { min_lon } else { lon };
                let x = (lon - min_lon) / lon_rng * self.bounds.width + self.bounds.min_x;
                let y = (lat - min_lat) / lat_rng * self.bounds.height + self.bounds.min_y;
                (name, (x, y))
            })
            .collect()
    }

    /// Scales coordinates globally and separately within each zone.
    ///
    /// The result has a `"global"` entry plus one entry per zone, which is
    /// empty for zones without nodes.
    pub fn zonal_diagram_coordinates(
        &self,
        nodes: &Table,
        node_column: &str,
        zones: &[String],
        zone_column: &str,
    ) -> BTreeMap<String, Coordinates> {
        let mut all = BTreeMap::new();
        all.insert("global".to_string(), self.diagram_coordinates(nodes, node_column));
        for zone in zones {
            let zone_nodes = nodes.filter_rows(|t, row| {
                t.get(row, zone_column)
                    .is_some_and(|c| !c.is_blank() && c.as_str_or("") == *zone)
            });
            all.insert(zone.clone(), self.diagram_coordinates(&zone_nodes, node_column));
        }
        all
    }

    /// Parses a `dd/mm/yyyy` study date into a Unix timestamp at midnight
    /// UTC.
    pub fn parse_study_date(date: &str) -> Result<i64, Error> {
        chrono::NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| {
                Error::parse(format!(
                    "Invalid date format: '{date}'. Expected dd/mm/yyyy"
                ))
            })
    }
}

fn distinct(table: &Table, column: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    if let Some(cells) = table.column(column) {
        for cell in cells.filter(|c| !c.is_blank()) {
            let value = cell.as_str_or("");
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
    values
}
