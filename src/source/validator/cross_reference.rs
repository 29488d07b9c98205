// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Referential integrity between the node table and the other tables.

use std::collections::HashSet;

use crate::diagnostics::Diagnostic;
use crate::table::Table;

use super::{format_list, TableSetValidator};

pub(super) const CATEGORY: &str = "Cross-Sheet References";

impl TableSetValidator<'_> {
    /// Checks that every node referenced by a branch or equipment table is
    /// listed in the node table.
    pub(super) fn check_cross_references(&self) -> Vec<Diagnostic> {
        let mut messages = Vec::new();
        let Some(nodes) = self.nodes() else {
            return messages;
        };
        let schema = self.schema;

        let valid: HashSet<String> = nodes
            .column(&schema.node_id_column)
            .map(|cells| {
                cells
                    .filter(|c| !c.is_blank())
                    .map(|c| c.as_str_or(""))
                    .collect()
            })
            .unwrap_or_default();

        for (name, table) in self.present(&schema.branch_tables) {
            for column in &schema.branch_node_columns {
                messages.extend(self.check_references(&valid, name, table, column));
            }
        }
        for (name, column) in &schema.equipment_tables {
            if let Some(table) = self.tables.get(name) {
                messages.extend(self.check_references(&valid, name, table, column));
            }
        }

        messages
    }

    fn check_references(
        &self,
        valid: &HashSet<String>,
        name: &str,
        table: &Table,
        column: &str,
    ) -> Option<Diagnostic> {
        let mut invalid: Vec<String> = Vec::new();
        for cell in table.column(column)?.filter(|c| !c.is_blank()) {
            let node = cell.as_str_or("");
            if !valid.contains(&node) && !invalid.contains(&node) {
                invalid.push(node);
            }
        }
        if invalid.is_empty() {
            return None;
        }
        Some(
            Diagnostic::error(
                CATEGORY,
                format!("{name}: Invalid {column} references: {}", format_list(invalid)),
            )
            .with_location(name)
            .with_suggestion(format!(
                "Ensure all referenced nodes exist in the {} sheet",
                self.schema.node_table
            )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_utils::etys_workbook;
    use crate::source::{EtysValidator, SourceValidator};
    use crate::table::Cell;

    #[test]
    fn test_dangling_references() {
        let mut tables = etys_workbook();
        if let Some(ohl) = tables.get_mut("OHL") {
            ohl.set_column("Node 2", [Cell::from("XYZ9"), Cell::from("XYZ9")]);
        }
        if let Some(demand) = tables.get_mut("Demand Data") {
            demand.set_column("ETYS_Node", [Cell::from(" ABC4 "), Cell::Null]);
        }
        if let Some(tec) = tables.get_mut("TEC Register") {
            tec.set_column("ETYS_Node", [Cell::from("QRS1")]);
        }

        let result = EtysValidator::new().validate(&tables);
        let errors: Vec<_> = result
            .errors()
            .filter(|m| m.category == CATEGORY)
            .map(|m| m.to_string())
            .collect();
        assert_eq!(
            errors,
            vec![
                "[ERROR:Cross-Sheet References] OHL: Invalid Node 2 references: XYZ9 [OHL]",
                "[ERROR:Cross-Sheet References] TEC Register: Invalid ETYS_Node references: QRS1 \
                 [TEC Register]",
            ]
        );
    }

    #[test]
    fn test_no_node_table() {
        let mut tables = etys_workbook();
        tables.remove("Nodes");
        let result = EtysValidator::new().validate(&tables);
        assert_eq!(result.messages.iter().filter(|m| m.category == CATEGORY).count(), 0);
    }
}
