// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Small ETYS workbooks for tests.

use crate::table::{Cell, Table, TableSet};

/// A node table with three clean nodes: `ABC4` (400 kV), `DEF2` (275 kV) and
/// `GHI1` (132 kV).
pub(crate) fn nodes_table() -> Table {
    Table::from_rows(
        [
            "Node",
            "Voltage (Derived)",
            "latitude",
            "longitude",
            "Site Name",
            "Relevant TO",
            "Type",
            "Indoor/Outdoor",
            "Major Flop Zone",
            "DESNZ T-Zone",
        ],
        [
            node("ABC4", 400, 51.0, -1.0, "Abbey", "B6", "T1"),
            node("DEF2", 275, 53.0, 1.0, "Deffield", "B6", "T2"),
            node("GHI1", 132, 52.0, 0.0, "Ghillie", "B7", "T2"),
        ],
    )
}

fn node(id: &str, kv: i32, lat: f64, lon: f64, site: &str, zone: &str, area: &str) -> Vec<Cell> {
    vec![
        id.into(),
        kv.into(),
        lat.into(),
        lon.into(),
        site.into(),
        "NGET".into(),
        "Substation".into(),
        "Outdoor".into(),
        zone.into(),
        area.into(),
    ]
}

/// A workbook that passes validation without errors or warnings.
pub(crate) fn etys_workbook() -> TableSet {
    let branch_columns = [
        "Node 1",
        "Node 2",
        "R (% on 100MVA)",
        "X (% on 100MVA)",
        "B (% on 100MVA)",
        "Winter Rating (MVA)",
        "Summer Rating (MVA)",
    ];
    let ohl = Table::from_rows(
        branch_columns,
        [
            vec!["ABC4".into(), "DEF2".into(), 0.05.into(), 0.5.into(), 2.0.into(), 2_000.into(), 1_800.into()],
            vec!["DEF2".into(), "GHI1".into(), 0.1.into(), 1.2.into(), 0.8.into(), 900.into(), 800.into()],
        ],
    );
    let transformer = Table::from_rows(
        branch_columns,
        [vec!["DEF2".into(), "GHI1".into(), 0.02.into(), 4.0.into(), Cell::Null, 1_000.into(), 900.into()]],
    );
    let demand = Table::from_rows(
        ["ETYS_Node", "Name", "MW", "MVar"],
        [
            vec!["ABC4".into(), "Abbey Demand".into(), 120.into(), 30.into()],
            vec!["GHI1".into(), "Ghillie".into(), 45.5.into(), 10.into()],
        ],
    );
    let tec = Table::from_rows(
        ["Plant Name", "ETYS_Node", "MW_Capacity", "Plant Type"],
        [vec!["Ghillie Wind".into(), "GHI1".into(), 350.into(), "Wind Offshore".into()]],
    );

    TableSet::from([
        ("Nodes".to_string(), nodes_table()),
        ("OHL".to_string(), ohl),
        ("Transformer".to_string(), transformer),
        ("Demand Data".to_string(), demand),
        ("TEC Register".to_string(), tec),
    ])
}

/// A standardized table set with a line to a node that doesn't exist.
pub(crate) fn canonical_example() -> TableSet {
    TableSet::from([
        (
            "nodes".to_string(),
            Table::from_rows(["node_id", "voltage_kv"], [vec!["N1".into(), 132.into()]]),
        ),
        (
            "overhead_lines".to_string(),
            Table::from_rows(["node_1", "node_2"], [vec!["N1".into(), "N2".into()]]),
        ),
    ])
}
