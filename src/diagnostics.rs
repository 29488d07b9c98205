// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Severity-tagged findings produced while validating a source, and the
//! result of a validation run.

use std::fmt::Display;

use serde::Serialize;

use crate::table::TableSet;

/// How urgent a diagnostic is.  Ordered from least to most urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Returns true for severities that make a validation run fail.
    pub fn is_fatal(&self) -> bool {
        *self >= Severity::Error
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single finding.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The validation stage that produced the finding.
    pub category: String,
    pub message: String,
    /// The table the finding refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// How to fix the finding, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    pub fn info(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    pub fn warning(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub fn error(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    pub fn critical(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, category, message)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.severity, self.category, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " [{location}]")?;
        }
        Ok(())
    }
}

/// The outcome of validating a table set.
///
/// `cleaned_data` is only present when no fatal diagnostic was produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub messages: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_data: Option<TableSet>,
}

impl ValidationResult {
    /// Creates a result from the given diagnostics.  The result is valid if
    /// none of them is fatal.  `clean` is only called for valid results.
    pub fn from_messages(messages: Vec<Diagnostic>, clean: impl FnOnce() -> TableSet) -> Self {
        let is_valid = !messages.iter().any(|m| m.severity.is_fatal());
        Self {
            is_valid,
            cleaned_data: is_valid.then(clean),
            messages,
        }
    }

    /// Returns the `ERROR` and `CRITICAL` diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter().filter(|m| m.severity.is_fatal())
    }

    /// Returns the `WARNING` diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages
            .iter()
            .filter(|m| m.severity == Severity::Warning)
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    /// Renders a human readable report, with one section per severity.
    pub fn detailed_report(&self) -> String {
        let mut report = vec![
            "Network Data Validation Report".to_string(),
            "=".repeat(35),
            String::new(),
        ];
        report.push(if self.is_valid {
            "✓ Overall Status: VALID".to_string()
        } else {
            "✗ Overall Status: INVALID".to_string()
        });
        report.push(String::new());
        report.push(format!("Total Messages: {}", self.messages.len()));
        report.push(String::new());

        for severity in Severity::ALL {
            let messages: Vec<_> = self
                .messages
                .iter()
                .filter(|m| m.severity == severity)
                .collect();
            if messages.is_empty() {
                continue;
            }
            report.push(format!("{severity} Messages ({}):", messages.len()));
            report.push("-".repeat(30));
            for msg in messages {
                let location = msg
                    .location
                    .as_ref()
                    .map(|l| format!(" [{l}]"))
                    .unwrap_or_default();
                report.push(format!("  • {}: {}{location}", msg.category, msg.message));
                if let Some(suggestion) = &msg.suggestion {
                    report.push(format!("    Suggestion: {suggestion}"));
                }
            }
            report.push(String::new());
        }

        report.join("\n")
    }
}
