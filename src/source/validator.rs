// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The five-stage validator for ETYS workbooks.

mod business_rules;
mod cleaning;
mod cross_reference;
mod electrical;
mod quality;
mod structure;

use std::fmt::Display;

use crate::diagnostics::ValidationResult;
use crate::table::{Table, TableSet};
use crate::ValidatorConfig;

use super::{SourceSchema, SourceValidator, ValidatorInfo};

/// Validates an ETYS table set in five stages: structure, data quality,
/// business rules, electrical parameters and cross-sheet references.
///
/// Every stage runs regardless of what the earlier stages found, so that a
/// single run reports every finding.  The result is valid if no `ERROR` or
/// `CRITICAL` diagnostic was produced, and only then carries a cleaned copy
/// of the tables.
#[derive(Clone, Debug)]
pub struct EtysValidator {
    schema: SourceSchema,
    config: ValidatorConfig,
}

impl Default for EtysValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EtysValidator {
    /// Creates a validator for workbooks with the published sheet names.
    pub fn new() -> Self {
        Self::with_schema(SourceSchema::etys(), ValidatorConfig::default())
    }

    /// Creates a validator for standardized table sets.
    pub fn canonical() -> Self {
        Self::with_schema(SourceSchema::canonical(), ValidatorConfig::default())
    }

    pub fn with_schema(schema: SourceSchema, config: ValidatorConfig) -> Self {
        Self { schema, config }
    }

    pub fn schema(&self) -> &SourceSchema {
        &self.schema
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Runs the structure stage only.  The result never carries cleaned
    /// tables.
    pub fn validate_structure(&self, tables: &TableSet) -> ValidationResult {
        let messages = self.stages(tables).check_structure();
        ValidationResult {
            is_valid: !messages.iter().any(|m| m.severity.is_fatal()),
            messages,
            cleaned_data: None,
        }
    }

    /// Returns a copy of the tables with all text trimmed, and blank text
    /// replaced by null cells.
    pub fn clean_and_normalize(&self, tables: &TableSet) -> TableSet {
        cleaning::clean_tables(tables)
    }

    fn stages<'a>(&'a self, tables: &'a TableSet) -> TableSetValidator<'a> {
        TableSetValidator {
            tables,
            schema: &self.schema,
            config: &self.config,
        }
    }
}

impl SourceValidator for EtysValidator {
    fn validate(&self, tables: &TableSet) -> ValidationResult {
        let stages = self.stages(tables);
        let mut messages = stages.check_structure();
        messages.extend(stages.check_quality());
        messages.extend(stages.check_business_rules());
        messages.extend(stages.check_electrical_parameters());
        messages.extend(stages.check_cross_references());

        let result = ValidationResult::from_messages(messages, || self.clean_and_normalize(tables));
        tracing::info!(
            "Validated {} tables: {} ({} errors, {} warnings).",
            tables.len(),
            if result.is_valid { "valid" } else { "invalid" },
            result.errors().count(),
            result.warnings().count()
        );
        result
    }

    fn validator_type(&self) -> &str {
        "EtysValidator"
    }

    fn rules_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            validator_type: self.validator_type().to_string(),
            rules_version: "1.0".to_string(),
            stages: [
                structure::CATEGORY,
                quality::CATEGORY,
                business_rules::CATEGORY,
                electrical::CATEGORY,
                cross_reference::CATEGORY,
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Runs the individual stages over one table set.
pub(crate) struct TableSetValidator<'a> {
    tables: &'a TableSet,
    schema: &'a SourceSchema,
    config: &'a ValidatorConfig,
}

impl TableSetValidator<'_> {
    /// Returns the node table, if present.
    fn nodes(&self) -> Option<&Table> {
        self.tables.get(&self.schema.node_table)
    }

    /// Returns the named tables that are present, in the given order.
    fn present<'b>(&'b self, names: &'b [String]) -> impl Iterator<Item = (&'b str, &'b Table)> {
        names
            .iter()
            .filter_map(|name| self.tables.get(name).map(|t| (name.as_str(), t)))
    }
}

/// Renders values as a comma separated list.
fn format_list<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
