// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `NetworkDataManager`, which dispatches workbooks
//! to the reader and validator registered for their source type.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::diagnostics::ValidationResult;
use crate::source::{
    self, EtysReader, EtysValidator, ReaderInfo, SourceReader, SourceRequest, SourceValidator,
    ValidatorInfo,
};
use crate::table::TableSet;
use crate::Error;

/// The reader and validator formats of a registered source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceInfo {
    pub reader: ReaderInfo,
    pub validator: ValidatorInfo,
}

struct SourceEntry {
    reader: Box<dyn SourceReader>,
    validator: Box<dyn SourceValidator>,
}

/// A registry of sources, keyed by source type.
///
/// [`NetworkDataManager::new`] registers the `"etys"` source.  Further
/// sources can be registered with [`add_source`][Self::add_source].
pub struct NetworkDataManager {
    sources: BTreeMap<String, SourceEntry>,
}

impl Default for NetworkDataManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NetworkDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkDataManager")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registry.
impl NetworkDataManager {
    /// Creates a manager with the `"etys"` source registered.
    pub fn new() -> Self {
        let mut manager = Self::with_sources();
        manager.add_source("etys", EtysReader::new(), EtysValidator::new());
        manager
    }

    /// Creates a manager with no sources registered.
    pub fn with_sources() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    /// Registers a source, replacing any earlier registration under the same
    /// type.
    pub fn add_source(
        &mut self,
        source_type: impl Into<String>,
        reader: impl SourceReader + 'static,
        validator: impl SourceValidator + 'static,
    ) {
        self.sources.insert(
            source_type.into(),
            SourceEntry {
                reader: Box::new(reader),
                validator: Box::new(validator),
            },
        );
    }

    /// Removes a source.  Returns false if it wasn't registered.
    pub fn remove_source(&mut self, source_type: &str) -> bool {
        self.sources.remove(source_type).is_some()
    }

    /// Describes every registered source.
    pub fn available_sources(&self) -> BTreeMap<String, SourceInfo> {
        self.sources
            .iter()
            .map(|(name, entry)| {
                (
                    name.clone(),
                    SourceInfo {
                        reader: entry.reader.info(),
                        validator: entry.validator.rules_info(),
                    },
                )
            })
            .collect()
    }

    fn source(&self, source_type: &str) -> Result<&SourceEntry, Error> {
        self.sources.get(source_type).ok_or_else(|| {
            Error::unsupported_source(format!(
                "Unsupported source type: {source_type}. Available: {}",
                self.sources.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

/// Loading and validation.
impl NetworkDataManager {
    /// Reads the workbook with the source's reader and validates it.
    pub fn load_and_validate(
        &self,
        source_type: &str,
        request: &SourceRequest,
    ) -> Result<(TableSet, ValidationResult), Error> {
        let entry = self.source(source_type)?;
        let tables = entry.reader.load(request)?;
        let result = entry.validator.validate(&tables);
        Ok((tables, result))
    }

    /// Reads, validates and standardizes the workbook.
    ///
    /// In strict mode an invalid workbook is an error.  Otherwise the cleaned
    /// tables are standardized if validation produced them, and the raw
    /// tables if it didn't.  When `request.export_to` is set, the
    /// standardized tables are also written there as CSV files.
    pub fn get_standardized_data(
        &self,
        source_type: &str,
        strict: bool,
        request: &SourceRequest,
    ) -> Result<TableSet, Error> {
        let entry = self.source(source_type)?;
        let (raw, result) = self.load_and_validate(source_type, request)?;

        let tables = match result.cleaned_data {
            Some(cleaned) => cleaned,
            None if strict => {
                let errors = result.errors().count();
                return Err(Error::validation_failed(format!(
                    "Validation of {} failed with {errors} errors.",
                    request.path.display()
                )));
            }
            None => {
                warn!(
                    "Validation of {} failed with {} errors; standardizing the raw tables.",
                    request.path.display(),
                    result.errors().count()
                );
                raw
            }
        };

        let standardized = entry.reader.standardize(tables);
        info!(
            "Standardized {} tables from {}.",
            standardized.len(),
            request.path.display()
        );
        if let Some(dir) = &request.export_to {
            self.export_standardized(&standardized, dir)?;
        }
        Ok(standardized)
    }

    /// Renders the validation report of the workbook.  Failures to read the
    /// workbook are rendered into the report.
    pub fn validation_report(&self, source_type: &str, request: &SourceRequest) -> String {
        match self.load_and_validate(source_type, request) {
            Ok((_, result)) => result.detailed_report(),
            Err(err) => format!("Error generating report: {err}"),
        }
    }

    /// Writes every table as a CSV file into `dir`.
    pub fn export_standardized(&self, tables: &TableSet, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let written = source::write_csv_dir(tables, dir)?;
        info!("Exported {} tables to {}.", written.len(), dir.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::source::test_utils::etys_workbook;
    use crate::table::Cell;
    use crate::ErrorKind;

    fn write_workbook(tables: &TableSet) -> Result<tempfile::TempDir, Error> {
        let dir = tempfile::tempdir()?;
        source::write_csv_dir(tables, dir.path())?;
        Ok(dir)
    }

    #[test]
    fn test_registry() {
        let mut manager = NetworkDataManager::new();
        let sources = manager.available_sources();
        assert_eq!(sources.keys().collect::<Vec<_>>(), vec!["etys"]);
        assert_eq!(sources["etys"].validator.stages.len(), 5);

        manager.add_source("canonical", EtysReader::new(), EtysValidator::canonical());
        assert_eq!(manager.available_sources().len(), 2);
        assert!(manager.remove_source("canonical"));
        assert!(!manager.remove_source("canonical"));

        assert!(NetworkDataManager::with_sources().available_sources().is_empty());
    }

    #[test]
    fn test_unknown_source() {
        let manager = NetworkDataManager::new();
        let request = SourceRequest::new("unused");
        assert!(manager
            .load_and_validate("cim", &request)
            .is_err_and(|e| e == Error::unsupported_source("Unsupported source type: cim. Available: etys")));
        assert_eq!(
            manager.validation_report("cim", &request),
            "Error generating report: UnsupportedSource: Unsupported source type: cim. Available: etys"
        );
    }

    #[test]
    fn test_load_and_validate() -> Result<(), Error> {
        let dir = write_workbook(&etys_workbook())?;
        let manager = NetworkDataManager::new();
        let (tables, result) = manager.load_and_validate("etys", &SourceRequest::new(dir.path()))?;
        assert_eq!(tables, etys_workbook());
        assert!(result.is_valid, "{}", result.detailed_report());
        Ok(())
    }

    #[test]
    fn test_standardized_data() -> Result<(), Error> {
        let dir = write_workbook(&etys_workbook())?;
        let out = tempfile::tempdir()?;
        let manager = NetworkDataManager::new();
        let request = SourceRequest::new(dir.path()).with_export(out.path().join("std"));

        let tables = manager.get_standardized_data("etys", true, &request)?;
        assert!(tables.contains_key("nodes"));
        assert!(tables.contains_key("overhead_lines"));
        assert!(out.path().join("std").join("nodes.csv").is_file());

        // Standardized tables validate against the canonical schema.
        let result = EtysValidator::canonical().validate(&tables);
        assert!(result.is_valid, "{}", result.detailed_report());
        Ok(())
    }

    #[test]
    fn test_strict_and_lenient() -> Result<(), Error> {
        let mut tables = etys_workbook();
        if let Some(ohl) = tables.get_mut("OHL") {
            ohl.set_column("Node 2", [Cell::from("XYZ9"), Cell::from("GHI1")]);
        }
        let dir = write_workbook(&tables)?;
        let manager = NetworkDataManager::new();
        let request = SourceRequest::new(dir.path());

        assert!(manager
            .get_standardized_data("etys", true, &request)
            .is_err_and(|e| e.kind() == ErrorKind::ValidationFailed));

        let lenient = manager.get_standardized_data("etys", false, &request)?;
        assert_eq!(
            lenient["overhead_lines"].get(0, "node_2"),
            Some(&Cell::from("XYZ9"))
        );

        let report = manager.validation_report("etys", &request);
        assert!(report.contains("OHL: Invalid Node 2 references: XYZ9"));
        Ok(())
    }

    #[test]
    fn test_missing_workbook() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let manager = NetworkDataManager::new();
        let request = SourceRequest::new(dir.path().join("missing"));
        assert!(manager
            .get_standardized_data("etys", false, &request)
            .is_err_and(|e| e.kind() == ErrorKind::Io));
        assert!(manager
            .validation_report("etys", &request)
            .starts_with("Error generating report: Io: "));

        fs::create_dir(dir.path().join("empty"))?;
        let report = manager.validation_report("etys", &SourceRequest::new(dir.path().join("empty")));
        assert!(report.contains("Required sheet 'Nodes' not found in Excel file"));
        Ok(())
    }
}
