// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Source readers and validators.
//!
//! A [`SourceReader`] turns a workbook on disk into a [`TableSet`], and a
//! [`SourceValidator`] checks the tables and reports its findings as
//! [`Diagnostic`][crate::Diagnostic]s.  Both are registered per source type
//! with the [`NetworkDataManager`][crate::NetworkDataManager].

mod reader;
mod schema;
mod standardize;
mod validator;
mod workbook;

#[cfg(test)]
pub(crate) mod test_utils;

pub use reader::{Coordinates, DiagramBounds, EtysReader};
pub use schema::SourceSchema;
pub use standardize::{canonical_table_name, standardize_etys, ETYS_TABLE_NAMES};
pub use validator::EtysValidator;

pub(crate) use workbook::write_csv_dir;

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostics::ValidationResult;
use crate::table::TableSet;
use crate::Error;

/// Where to read a workbook from, and optionally where to export the
/// standardized tables to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceRequest {
    pub path: PathBuf,
    pub export_to: Option<PathBuf>,
}

impl SourceRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            export_to: None,
        }
    }

    /// Requests the standardized tables to be written as CSV files into
    /// `dir`.
    pub fn with_export(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_to = Some(dir.into());
        self
    }
}

/// A description of a reader.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReaderInfo {
    pub source_type: String,
    pub supported_formats: Vec<String>,
}

/// A description of the rules applied by a validator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidatorInfo {
    pub validator_type: String,
    pub rules_version: String,
    pub stages: Vec<String>,
}

/// Reads the tables of one kind of source.
pub trait SourceReader {
    /// Reads the tables described by `request`.
    fn load(&self, request: &SourceRequest) -> Result<TableSet, Error>;

    /// The file formats this reader understands.
    fn supported_formats(&self) -> Vec<String>;

    fn source_type(&self) -> &str;

    fn info(&self) -> ReaderInfo {
        ReaderInfo {
            source_type: self.source_type().to_string(),
            supported_formats: self.supported_formats(),
        }
    }

    /// Translates source-specific table and column names onto the canonical
    /// schema.  Readers of sources that already use canonical names keep the
    /// default, which returns the tables unchanged.
    fn standardize(&self, tables: TableSet) -> TableSet {
        tables
    }
}

/// Validates the tables of one kind of source.
pub trait SourceValidator {
    fn validate(&self, tables: &TableSet) -> ValidationResult;

    fn validator_type(&self) -> &str;

    fn rules_info(&self) -> ValidatorInfo {
        ValidatorInfo {
            validator_type: self.validator_type().to_string(),
            rules_version: String::new(),
            stages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PassThrough;

    impl SourceReader for PassThrough {
        fn load(&self, _request: &SourceRequest) -> Result<TableSet, Error> {
            Ok(TableSet::new())
        }

        fn supported_formats(&self) -> Vec<String> {
            vec!["json".into()]
        }

        fn source_type(&self) -> &str {
            "PassThrough"
        }
    }

    #[test]
    fn test_reader_defaults() -> Result<(), Error> {
        let reader = PassThrough;
        assert_eq!(
            reader.info(),
            ReaderInfo {
                source_type: "PassThrough".into(),
                supported_formats: vec!["json".into()],
            }
        );
        let tables = test_utils::etys_workbook();
        assert_eq!(reader.standardize(tables.clone()), tables);
        assert!(reader.load(&SourceRequest::new("anywhere"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_request() {
        let request = SourceRequest::new("etys").with_export("out");
        assert_eq!(request.path, PathBuf::from("etys"));
        assert_eq!(request.export_to, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_etys_reader_info() {
        let info = EtysReader::new().info();
        assert_eq!(info.source_type, "EtysReader");
        assert!(info.supported_formats.contains(&"csv".to_string()));
    }
}
