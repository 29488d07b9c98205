// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks for the presence of the expected tables and columns.

use crate::diagnostics::Diagnostic;

use super::{format_list, TableSetValidator};

pub(super) const CATEGORY: &str = "Structure";

impl TableSetValidator<'_> {
    /// Checks that the node table exists, is not empty and has the required
    /// columns, and reports which of the optional tables are present.
    pub(super) fn check_structure(&self) -> Vec<Diagnostic> {
        let mut messages = Vec::new();
        let node_table = &self.schema.node_table;

        match self.nodes() {
            None => messages.push(
                Diagnostic::critical(
                    CATEGORY,
                    format!("Required sheet '{node_table}' not found in Excel file"),
                )
                .with_suggestion("Ensure the Excel file contains all required sheets"),
            ),
            Some(nodes) => {
                if nodes.is_empty() {
                    messages.push(
                        Diagnostic::critical(
                            CATEGORY,
                            format!("Required sheet '{node_table}' is empty"),
                        )
                        .with_location(node_table),
                    );
                }

                let missing: Vec<_> = self
                    .schema
                    .required_node_columns
                    .iter()
                    .filter(|col| !nodes.has_column(col))
                    .collect();
                if !missing.is_empty() {
                    messages.push(
                        Diagnostic::error(
                            CATEGORY,
                            format!(
                                "{node_table} sheet missing required columns: {}",
                                format_list(missing)
                            ),
                        )
                        .with_location(node_table)
                        .with_suggestion(format!("Add missing columns to the {node_table} sheet")),
                    );
                }
            }
        }

        for (name, table) in self.present(&self.schema.optional_tables) {
            if table.is_empty() {
                messages.push(Diagnostic::warning(
                    CATEGORY,
                    format!("Sheet '{name}' is present but empty"),
                ));
            } else {
                messages.push(Diagnostic::info(
                    CATEGORY,
                    format!("Sheet '{name}' found with {} rows", table.len()),
                ));
            }
        }

        messages
    }
}
