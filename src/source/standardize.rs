// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Translation of ETYS sheet and column names onto the canonical schema.

use tracing::warn;

use crate::table::{Cell, Table, TableSet};

/// ETYS sheet names and the canonical table names they are translated to.
pub const ETYS_TABLE_NAMES: [(&str, &str); 20] = [
    ("Nodes", "nodes"),
    ("OHL", "overhead_lines"),
    ("Cable", "cables"),
    ("Composite", "composite_lines"),
    ("Zero Length", "zero_length_lines"),
    ("Transformer", "transformers"),
    ("Quadbooster", "quadboosters"),
    ("Series Compensation", "series_compensation"),
    ("SSSC", "sssc_devices"),
    ("Shunt Reactor", "shunt_reactors"),
    ("Mechanically Switched Capacitor", "switched_capacitors"),
    ("SVC", "svc_devices"),
    ("STATCOM", "statcom_devices"),
    ("Sync Comp", "sync_compensators"),
    ("Series Reactor", "series_reactors"),
    ("Series Capacitor", "series_capacitors"),
    ("Demand Data", "loads"),
    ("TEC Register", "tec_generators"),
    ("IC Register", "interconnectors"),
    ("Intra_HVDC", "hvdc_links"),
];

/// Returns the canonical name of an ETYS sheet.
pub fn canonical_table_name(sheet: &str) -> Option<&'static str> {
    ETYS_TABLE_NAMES
        .iter()
        .find(|(source, _)| *source == sheet)
        .map(|(_, canonical)| *canonical)
}

/// Renames ETYS sheets to their canonical names and adds the canonical
/// columns next to the original ones.
///
/// Sheets without a canonical name, including sheets that already carry
/// one, are passed through unchanged.  When a source sheet and a table with
/// its canonical name are both present, the translated source sheet is kept.
pub fn standardize_etys(tables: TableSet) -> TableSet {
    let (source, passthrough): (Vec<_>, Vec<_>) = tables
        .into_iter()
        .partition(|(sheet, _)| canonical_table_name(sheet).is_some());

    let mut standardized = TableSet::new();
    for (sheet, table) in source {
        if let Some(canonical) = canonical_table_name(&sheet) {
            let table = transform_table(table, &sheet, canonical);
            standardized.insert(canonical.to_string(), table);
        }
    }
    for (name, table) in passthrough {
        if standardized.contains_key(&name) {
            warn!("Dropping table '{name}': it collides with a translated source sheet.");
            continue;
        }
        standardized.insert(name, table);
    }
    standardized
}

fn transform_table(mut table: Table, sheet: &str, canonical: &str) -> Table {
    match canonical {
        "nodes" => {
            copy_as_text(&mut table, "Node", "node_id");
            let voltages: Option<Vec<Cell>> = table
                .column("Voltage (Derived)")
                .map(|cells| cells.map(|c| c.as_f64().into()).collect());
            if let Some(voltages) = voltages {
                table.set_column("voltage_kv", voltages);
            }
        }
        "overhead_lines" | "cables" | "composite_lines" | "zero_length_lines" | "transformers"
        | "quadboosters" | "series_compensation" | "sssc_devices" | "series_reactors"
        | "series_capacitors" | "hvdc_links" => {
            copy_as_text(&mut table, "Node 1", "node_1");
            copy_as_text(&mut table, "Node 2", "node_2");
        }
        "loads" | "tec_generators" | "interconnectors" => {
            copy_as_text(&mut table, "ETYS_Node", "node_id");
        }
        "shunt_reactors" | "switched_capacitors" | "svc_devices" | "statcom_devices"
        | "sync_compensators" => {
            copy_as_text(&mut table, "Node", "node_id");
        }
        _ => {}
    }

    let rows = table.len();
    table.set_column("source_sheet", vec![Cell::from(sheet); rows]);
    table.set_column("data_source", vec![Cell::from("etys"); rows]);
    table
}

/// Copies `from` into `to` as trimmed text, if `from` exists.
fn copy_as_text(table: &mut Table, from: &str, to: &str) {
    let copied: Option<Vec<Cell>> = table.column(from).map(|cells| {
        cells
            .map(|c| {
                if c.is_blank() {
                    Cell::Null
                } else {
                    Cell::Text(c.as_str_or(""))
                }
            })
            .collect()
    });
    if let Some(copied) = copied {
        table.set_column(to, copied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_utils::etys_workbook;

    #[test]
    fn test_table_names() {
        assert_eq!(canonical_table_name("OHL"), Some("overhead_lines"));
        assert_eq!(canonical_table_name("Intra_HVDC"), Some("hvdc_links"));
        assert_eq!(canonical_table_name("nodes"), None);
        assert_eq!(ETYS_TABLE_NAMES.len(), 20);
    }

    #[test]
    fn test_standardize() {
        let standardized = standardize_etys(etys_workbook());
        let names: Vec<_> = standardized.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["loads", "nodes", "overhead_lines", "tec_generators", "transformers"]
        );

        let nodes = &standardized["nodes"];
        assert!(nodes.has_column("Node"));
        assert_eq!(nodes.get(0, "node_id"), Some(&Cell::from("ABC4")));
        assert_eq!(nodes.get(0, "voltage_kv"), Some(&Cell::from(400)));
        assert_eq!(nodes.get(0, "source_sheet"), Some(&Cell::from("Nodes")));
        assert_eq!(nodes.get(0, "data_source"), Some(&Cell::from("etys")));

        let lines = &standardized["overhead_lines"];
        assert_eq!(lines.get(0, "node_1"), Some(&Cell::from("ABC4")));
        assert_eq!(lines.get(0, "node_2"), Some(&Cell::from("DEF2")));

        assert_eq!(standardized["loads"].get(0, "node_id"), Some(&Cell::from("ABC4")));
    }

    #[test]
    fn test_canonical_name_collision() {
        let mut tables = etys_workbook();
        tables.insert(
            "nodes".into(),
            Table::from_rows(["node_id"], [vec![Cell::from("B1")], vec![Cell::from("B2")]]),
        );
        let standardized = standardize_etys(tables);
        let nodes = &standardized["nodes"];
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.get(0, "node_id"), Some(&Cell::from("ABC4")));
        assert_eq!(nodes.get(0, "source_sheet"), Some(&Cell::from("Nodes")));
    }

    #[test]
    fn test_standardize_is_idempotent() {
        let once = standardize_etys(etys_workbook());
        let twice = standardize_etys(once.clone());
        assert_eq!(once, twice);
    }
}
