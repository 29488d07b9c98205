// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Normalization applied to table sets that passed validation.

use crate::table::{Cell, TableSet};

/// Trims all text cells and turns blank text into `Null`.
pub(super) fn clean_tables(tables: &TableSet) -> TableSet {
    tables
        .iter()
        .map(|(name, table)| {
            let mut table = table.clone();
            table.map_cells(|cell| {
                if let Cell::Text(text) = cell {
                    let trimmed = text.trim();
                    *cell = if trimmed.is_empty() {
                        Cell::Null
                    } else {
                        Cell::Text(trimmed.to_string())
                    };
                }
            });
            (name.clone(), table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn test_clean_tables() {
        let tables = TableSet::from([(
            "Nodes".to_string(),
            Table::from_rows(
                ["Node", "Site Name", "Voltage (Derived)"],
                [vec![Cell::from(" ABC4 "), Cell::from("   "), Cell::from(400)]],
            ),
        )]);
        let cleaned = clean_tables(&tables);
        let nodes = &cleaned["Nodes"];
        assert_eq!(nodes.get(0, "Node"), Some(&Cell::from("ABC4")));
        assert_eq!(nodes.get(0, "Site Name"), Some(&Cell::Null));
        assert_eq!(nodes.get(0, "Voltage (Derived)"), Some(&Cell::from(400)));

        assert_eq!(clean_tables(&cleaned), cleaned);
    }
}
