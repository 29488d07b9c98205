// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Completeness and uniqueness checks on the node table.

use std::collections::{BTreeMap, HashSet};

use crate::diagnostics::Diagnostic;
use crate::table::Table;

use super::{format_list, TableSetValidator};

pub(super) const CATEGORY: &str = "Data Quality";

fn count_blank(table: &Table, column: &str) -> usize {
    table
        .column(column)
        .map(|cells| cells.filter(|c| c.is_blank()).count())
        .unwrap_or(0)
}

impl TableSetValidator<'_> {
    /// Checks the node table for missing and duplicate identifiers, missing
    /// coordinates and missing voltage levels.
    pub(super) fn check_quality(&self) -> Vec<Diagnostic> {
        let mut messages = Vec::new();
        let Some(nodes) = self.nodes() else {
            return messages;
        };
        let schema = self.schema;
        let location = schema.node_table.as_str();

        if let Some(ids) = nodes.column(&schema.node_id_column) {
            let mut missing = 0;
            let mut seen = HashSet::new();
            let mut duplicates = BTreeMap::new();
            for (row, cell) in ids.enumerate() {
                if cell.is_blank() {
                    missing += 1;
                    continue;
                }
                let id = cell.as_str_or("");
                if !seen.insert(id.clone()) {
                    duplicates.entry(id).or_insert(row);
                }
            }
            if missing > 0 {
                messages.push(
                    Diagnostic::error(CATEGORY, format!("{missing} nodes have missing names"))
                        .with_location(location)
                        .with_suggestion("Ensure all nodes have valid names"),
                );
            }
            if !duplicates.is_empty() {
                let mut duplicates: Vec<_> = duplicates.into_iter().collect();
                duplicates.sort_by_key(|(_, row)| *row);
                messages.push(
                    Diagnostic::error(
                        CATEGORY,
                        format!(
                            "Duplicate node names found: {}",
                            format_list(duplicates.into_iter().map(|(id, _)| id))
                        ),
                    )
                    .with_location(location)
                    .with_suggestion("Remove or rename duplicate nodes"),
                );
            }
        }

        if nodes.has_column(&schema.latitude_column) || nodes.has_column(&schema.longitude_column) {
            let missing_lat = count_blank(nodes, &schema.latitude_column);
            let missing_lon = count_blank(nodes, &schema.longitude_column);
            if missing_lat > 0 || missing_lon > 0 {
                messages.push(
                    Diagnostic::warning(
                        CATEGORY,
                        format!(
                            "Missing coordinates: {missing_lat} latitude, {missing_lon} longitude"
                        ),
                    )
                    .with_location(location)
                    .with_suggestion("Verify coordinate data for proper diagram positioning"),
                );
            }
        }

        let missing_voltage = count_blank(nodes, &schema.voltage_column);
        if missing_voltage > 0 {
            messages.push(
                Diagnostic::error(
                    CATEGORY,
                    format!("{missing_voltage} nodes have missing voltage levels"),
                )
                .with_location(location)
                .with_suggestion("Ensure all nodes have valid voltage levels"),
            );
        }

        messages
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Severity;
    use crate::source::test_utils::nodes_table;
    use crate::source::{EtysValidator, SourceValidator};
    use crate::table::{Cell, TableSet};

    fn quality_messages(tables: &TableSet) -> Vec<(Severity, String)> {
        EtysValidator::new()
            .validate(tables)
            .messages
            .into_iter()
            .filter(|m| m.category == "Data Quality")
            .map(|m| (m.severity, m.message))
            .collect()
    }

    #[test]
    fn test_clean_nodes() {
        let tables = TableSet::from([("Nodes".to_string(), nodes_table())]);
        assert!(quality_messages(&tables).is_empty());
    }

    #[test]
    fn test_missing_and_duplicate_nodes() {
        let mut nodes = nodes_table();
        let mut ids: Vec<Cell> = nodes.column("Node").map(|c| c.cloned().collect()).unwrap_or_default();
        ids[1] = Cell::Null;
        ids[2] = ids[0].clone();
        nodes.set_column("Node", ids);
        let mut voltages: Vec<Cell> = nodes
            .column("Voltage (Derived)")
            .map(|c| c.cloned().collect())
            .unwrap_or_default();
        voltages[0] = Cell::Text("  ".into());
        nodes.set_column("Voltage (Derived)", voltages);
        nodes.set_column("latitude", [Cell::Null]);

        let tables = TableSet::from([("Nodes".to_string(), nodes)]);
        let messages = quality_messages(&tables);
        assert_eq!(
            messages,
            vec![
                (Severity::Error, "1 nodes have missing names".to_string()),
                (Severity::Error, "Duplicate node names found: ABC4".to_string()),
                (Severity::Warning, "Missing coordinates: 3 latitude, 0 longitude".to_string()),
                (Severity::Error, "1 nodes have missing voltage levels".to_string()),
            ]
        );
    }
}
