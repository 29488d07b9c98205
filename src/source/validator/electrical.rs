// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Sanity checks on impedances, ratings and capacities.

use crate::diagnostics::Diagnostic;
use crate::table::Table;

use super::TableSetValidator;

pub(super) const CATEGORY: &str = "Electrical Parameters";

/// Counts the rows whose value in `column` is numeric and satisfies `pred`.
/// Null and non-numeric cells are never counted.
fn count_numeric(table: &Table, column: &str, pred: impl Fn(f64) -> bool) -> Option<usize> {
    table
        .column(column)
        .map(|cells| cells.filter_map(|c| c.as_f64()).filter(|v| pred(*v)).count())
}

impl TableSetValidator<'_> {
    /// Checks line and transformer tables for negative impedances and
    /// implausible ratings, and generator tables for negative capacities.
    pub(super) fn check_electrical_parameters(&self) -> Vec<Diagnostic> {
        let mut messages = Vec::new();
        let schema = self.schema;

        for (name, table) in self.present(&schema.line_tables) {
            for column in &schema.impedance_columns {
                if let Some(n @ 1..) = count_numeric(table, column, |v| v < 0.0) {
                    messages.push(
                        Diagnostic::error(
                            CATEGORY,
                            format!("{name}: {n} lines have negative {column}"),
                        )
                        .with_location(name)
                        .with_suggestion("Impedance values should be positive"),
                    );
                }
            }

            let max = self.config.max_line_rating_mva;
            for column in &schema.line_rating_columns {
                if let Some(n @ 1..) = count_numeric(table, column, |v| v <= 0.0 || v > max) {
                    messages.push(
                        Diagnostic::warning(
                            CATEGORY,
                            format!("{name}: {n} lines have unreasonable {column}"),
                        )
                        .with_location(name)
                        .with_suggestion(format!(
                            "Verify power ratings are realistic (0-{max} MVA)"
                        )),
                    );
                }
            }
        }

        let max = self.config.max_transformer_rating_mva;
        for (name, table) in self.present(&schema.transformer_tables) {
            let column = &schema.transformer_rating_column;
            if let Some(n @ 1..) = count_numeric(table, column, |v| v <= 0.0 || v > max) {
                messages.push(
                    Diagnostic::warning(
                        CATEGORY,
                        format!("{name}: {n} transformers have unreasonable ratings"),
                    )
                    .with_location(name)
                    .with_suggestion(format!(
                        "Verify transformer ratings are realistic (0-{max} MVA)"
                    )),
                );
            }
        }

        for (name, table) in self.present(&schema.generator_tables) {
            for column in &schema.capacity_columns {
                if let Some(n @ 1..) = count_numeric(table, column, |v| v < 0.0) {
                    messages.push(
                        Diagnostic::warning(
                            CATEGORY,
                            format!("{name}: {n} generators have negative {column}"),
                        )
                        .with_location(name)
                        .with_suggestion("Generator capacities should be positive or zero"),
                    );
                }
            }
        }

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::source::test_utils::etys_workbook;
    use crate::source::{EtysValidator, SourceValidator};
    use crate::table::Cell;

    fn electrical_messages(validator: &EtysValidator, tables: &crate::table::TableSet) -> Vec<(Severity, String)> {
        validator
            .validate(tables)
            .messages
            .into_iter()
            .filter(|m| m.category == CATEGORY)
            .map(|m| (m.severity, m.message))
            .collect()
    }

    #[test]
    fn test_clean_workbook() {
        let validator = EtysValidator::new();
        assert!(electrical_messages(&validator, &etys_workbook()).is_empty());
    }

    #[test]
    fn test_out_of_range_values() {
        let mut tables = etys_workbook();
        if let Some(ohl) = tables.get_mut("OHL") {
            ohl.set_column("R (% on 100MVA)", [Cell::from(-0.1), Cell::from(0.2)]);
            ohl.set_column("Winter Rating (MVA)", [Cell::from(0), Cell::from(20_000)]);
            ohl.set_column("Summer Rating (MVA)", [Cell::Null, Cell::from("n/a")]);
        }
        if let Some(tx) = tables.get_mut("Transformer") {
            tx.set_column("Winter Rating (MVA)", [Cell::from(2_500)]);
        }
        if let Some(tec) = tables.get_mut("TEC Register") {
            tec.set_column("MW_Capacity", [Cell::from(-5)]);
        }

        let validator = EtysValidator::new();
        let messages = electrical_messages(&validator, &tables);
        assert_eq!(
            messages,
            vec![
                (Severity::Error, "OHL: 1 lines have negative R (% on 100MVA)".to_string()),
                (Severity::Warning, "OHL: 2 lines have unreasonable Winter Rating (MVA)".to_string()),
                (Severity::Warning, "Transformer: 1 transformers have unreasonable ratings".to_string()),
                (Severity::Warning, "TEC Register: 1 generators have negative MW_Capacity".to_string()),
            ]
        );
    }

    #[test]
    fn test_configured_limits() {
        let mut tables = etys_workbook();
        if let Some(ohl) = tables.get_mut("OHL") {
            ohl.set_column("Winter Rating (MVA)", [Cell::from(600), Cell::from(600)]);
            ohl.set_column("Summer Rating (MVA)", [Cell::from(450), Cell::from(500)]);
        }
        let config = crate::ValidatorConfig {
            max_line_rating_mva: 500.0,
            ..Default::default()
        };
        let validator = EtysValidator::with_schema(crate::source::SourceSchema::etys(), config);
        assert_eq!(
            electrical_messages(&validator, &tables),
            vec![(
                Severity::Warning,
                "OHL: 2 lines have unreasonable Winter Rating (MVA)".to_string()
            )]
        );
    }
}
