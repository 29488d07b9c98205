// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The names of the tables and columns a validator inspects.

use serde::Serialize;

/// Names of the tables and columns that the validation stages look at.
///
/// [`SourceSchema::etys`] describes a workbook as published, and
/// [`SourceSchema::canonical`] describes the same workbook after
/// standardization, so that standardized tables can be validated again.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceSchema {
    /// The mandatory table listing the network nodes.
    pub node_table: String,
    pub node_id_column: String,
    pub voltage_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
    /// Columns the node table must have.
    pub required_node_columns: Vec<String>,
    /// Zone and area assignment columns of the node table.
    pub zone_columns: Vec<String>,

    /// Tables that are recognized when present.
    pub optional_tables: Vec<String>,

    /// Line-like tables, checked against the line rating limit.
    pub line_tables: Vec<String>,
    /// Transformer-like tables, checked against the transformer rating limit.
    pub transformer_tables: Vec<String>,
    /// Generator-like tables, checked for negative capacities.
    pub generator_tables: Vec<String>,
    pub impedance_columns: Vec<String>,
    pub line_rating_columns: Vec<String>,
    pub transformer_rating_column: String,
    pub capacity_columns: Vec<String>,

    /// Tables whose rows connect two nodes.
    pub branch_tables: Vec<String>,
    /// The node reference columns of branch tables.
    pub branch_node_columns: Vec<String>,
    /// Tables whose rows reference a single node, with the referencing column.
    pub equipment_tables: Vec<(String, String)>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

const ZONE_COLUMNS: [&str; 2] = ["Major Flop Zone", "DESNZ T-Zone"];
const IMPEDANCE_COLUMNS: [&str; 2] = ["R (% on 100MVA)", "X (% on 100MVA)"];
const LINE_RATING_COLUMNS: [&str; 2] = ["Winter Rating (MVA)", "Summer Rating (MVA)"];
const CAPACITY_COLUMNS: [&str; 3] = ["MW_Capacity", "MW_Import_Capacity", "MW_Export_Capacity"];

impl SourceSchema {
    /// The schema of an ETYS workbook, with the sheet and column names as
    /// published.
    pub fn etys() -> Self {
        Self {
            node_table: "Nodes".into(),
            node_id_column: "Node".into(),
            voltage_column: "Voltage (Derived)".into(),
            latitude_column: "latitude".into(),
            longitude_column: "longitude".into(),
            required_node_columns: names(&[
                "Node",
                "Voltage (Derived)",
                "latitude",
                "longitude",
                "Site Name",
                "Relevant TO",
                "Type",
                "Indoor/Outdoor",
            ]),
            zone_columns: names(&ZONE_COLUMNS),
            optional_tables: names(&[
                "OHL",
                "Cable",
                "Composite",
                "Zero Length",
                "Transformer",
                "Quadbooster",
                "Series Compensation",
                "SSSC",
                "Shunt Reactor",
                "Mechanically Switched Capacitor",
                "SVC",
                "STATCOM",
                "Sync Comp",
                "Series Reactor",
                "Series Capacitor",
                "Demand Data",
                "TEC Register",
                "IC Register",
                "Intra_HVDC",
            ]),
            line_tables: names(&["OHL", "Cable", "Composite", "Zero Length"]),
            transformer_tables: names(&["Transformer", "Quadbooster", "Series Compensation", "SSSC"]),
            generator_tables: names(&["TEC Register", "IC Register"]),
            impedance_columns: names(&IMPEDANCE_COLUMNS),
            line_rating_columns: names(&LINE_RATING_COLUMNS),
            transformer_rating_column: LINE_RATING_COLUMNS[0].into(),
            capacity_columns: names(&CAPACITY_COLUMNS),
            branch_tables: names(&[
                "OHL",
                "Cable",
                "Composite",
                "Zero Length",
                "Transformer",
                "Quadbooster",
                "Series Compensation",
                "SSSC",
                "Series Reactor",
                "Series Capacitor",
                "Intra_HVDC",
            ]),
            branch_node_columns: names(&["Node 1", "Node 2"]),
            equipment_tables: [
                ("Demand Data", "ETYS_Node"),
                ("TEC Register", "ETYS_Node"),
                ("IC Register", "ETYS_Node"),
                ("Shunt Reactor", "Node"),
                ("Mechanically Switched Capacitor", "Node"),
                ("SVC", "Node"),
                ("STATCOM", "Node"),
                ("Sync Comp", "Node"),
            ]
            .into_iter()
            .map(|(t, c)| (t.to_string(), c.to_string()))
            .collect(),
        }
    }

    /// The schema of a standardized table set.
    ///
    /// Standardization keeps the original columns, so only the table names,
    /// the node and voltage columns, and the node reference columns differ
    /// from [`SourceSchema::etys`].
    pub fn canonical() -> Self {
        Self {
            node_table: "nodes".into(),
            node_id_column: "node_id".into(),
            voltage_column: "voltage_kv".into(),
            latitude_column: "latitude".into(),
            longitude_column: "longitude".into(),
            required_node_columns: names(&["node_id", "voltage_kv"]),
            zone_columns: names(&ZONE_COLUMNS),
            optional_tables: names(&[
                "overhead_lines",
                "cables",
                "composite_lines",
                "zero_length_lines",
                "transformers",
                "quadboosters",
                "series_compensation",
                "sssc_devices",
                "shunt_reactors",
                "switched_capacitors",
                "svc_devices",
                "statcom_devices",
                "sync_compensators",
                "series_reactors",
                "series_capacitors",
                "loads",
                "tec_generators",
                "interconnectors",
                "hvdc_links",
            ]),
            line_tables: names(&["overhead_lines", "cables", "composite_lines", "zero_length_lines"]),
            transformer_tables: names(&[
                "transformers",
                "quadboosters",
                "series_compensation",
                "sssc_devices",
            ]),
            generator_tables: names(&["tec_generators", "interconnectors"]),
            impedance_columns: names(&IMPEDANCE_COLUMNS),
            line_rating_columns: names(&LINE_RATING_COLUMNS),
            transformer_rating_column: LINE_RATING_COLUMNS[0].into(),
            capacity_columns: names(&CAPACITY_COLUMNS),
            branch_tables: names(&[
                "overhead_lines",
                "cables",
                "composite_lines",
                "zero_length_lines",
                "transformers",
                "quadboosters",
                "series_compensation",
                "sssc_devices",
                "series_reactors",
                "series_capacitors",
                "hvdc_links",
            ]),
            branch_node_columns: names(&["node_1", "node_2"]),
            equipment_tables: [
                "loads",
                "tec_generators",
                "interconnectors",
                "shunt_reactors",
                "switched_capacitors",
                "svc_devices",
                "statcom_devices",
                "sync_compensators",
            ]
            .into_iter()
            .map(|t| (t.to_string(), "node_id".to_string()))
            .collect(),
        }
    }
}
