// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Domain rules for node voltages, names and zone assignments.

use crate::diagnostics::Diagnostic;
use crate::table::Cell;

use super::{format_list, TableSetValidator};

pub(super) const CATEGORY: &str = "Business Rules";

/// Returns true if the identifier contains only ASCII letters, digits,
/// hyphens and underscores.
pub(crate) fn is_standard_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl TableSetValidator<'_> {
    /// Checks node voltages against the allowed levels, node names against
    /// the naming convention, and the zone assignment of every node.
    pub(super) fn check_business_rules(&self) -> Vec<Diagnostic> {
        let mut messages = Vec::new();
        let Some(nodes) = self.nodes() else {
            return messages;
        };
        let schema = self.schema;
        let location = schema.node_table.as_str();

        if let Some(voltages) = nodes.column(&schema.voltage_column) {
            let mut invalid: Vec<&Cell> = Vec::new();
            for cell in voltages.filter(|c| !c.is_blank()) {
                let standard = cell
                    .as_f64()
                    .is_some_and(|kv| self.config.is_standard_voltage(kv));
                if !standard && !invalid.contains(&cell) {
                    invalid.push(cell);
                }
            }
            if !invalid.is_empty() {
                let mut allowed = self.config.allowed_voltage_levels.clone();
                allowed.sort_by(f64::total_cmp);
                messages.push(
                    Diagnostic::warning(
                        CATEGORY,
                        format!("Non-standard voltage levels found: {}", format_list(invalid)),
                    )
                    .with_location(location)
                    .with_suggestion(format!(
                        "Standard voltage levels are: {}",
                        format_list(allowed.into_iter().map(Cell::Number))
                    )),
                );
            }
        }

        if let Some(ids) = nodes.column(&schema.node_id_column) {
            let non_standard = ids
                .filter(|c| !c.is_blank())
                .filter(|c| !is_standard_name(&c.as_str_or("")))
                .count();
            if non_standard > 0 {
                messages.push(
                    Diagnostic::warning(
                        CATEGORY,
                        format!("{non_standard} nodes have non-standard characters in names"),
                    )
                    .with_location(location)
                    .with_suggestion(
                        "Node names should only contain letters, numbers, hyphens, and underscores",
                    ),
                );
            }
        }

        for zone_column in &schema.zone_columns {
            match nodes.column(zone_column) {
                None => messages.push(
                    Diagnostic::warning(
                        CATEGORY,
                        format!("{location} sheet has no {zone_column} column"),
                    )
                    .with_location(location)
                    .with_suggestion("Add zone assignments for proper network organization"),
                ),
                Some(cells) => {
                    let missing = cells.filter(|c| c.is_blank()).count();
                    if missing > 0 {
                        messages.push(
                            Diagnostic::warning(
                                CATEGORY,
                                format!("{missing} nodes missing {zone_column} assignment"),
                            )
                            .with_location(location)
                            .with_suggestion(
                                "Verify zone assignments for proper network organization",
                            ),
                        );
                    }
                }
            }
        }

        messages
    }
}
