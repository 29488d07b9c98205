// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the `DataModelManager`
//! and the source validators.

/// Configuration options for the `DataModelManager`.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Whether to maintain the bus identifier index and the per-bus reverse
    /// indices of attached generators, loads and branches.  When this is
    /// `false`, every lookup is a linear scan over the collections.
    pub use_bus_index: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            use_bus_index: true,
        }
    }
}

/// Configuration options for the source validators.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Nominal voltage levels, in kV, that are considered standard.  Nodes at
    /// any other level are reported as warnings.
    pub allowed_voltage_levels: Vec<f64>,

    /// Upper bound for line ratings, in MVA.  Ratings outside
    /// `(0, max_line_rating_mva]` are reported as warnings.
    pub max_line_rating_mva: f64,

    /// Upper bound for transformer ratings, in MVA.
    pub max_transformer_rating_mva: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allowed_voltage_levels: vec![
                0.4, 11.0, 13.0, 33.0, 66.0, 132.0, 220.0, 275.0, 400.0, 500.0, 765.0,
            ],
            max_line_rating_mva: 10_000.0,
            max_transformer_rating_mva: 2_000.0,
        }
    }
}

impl ValidatorConfig {
    /// Returns true if `kv` is one of the allowed voltage levels.
    pub fn is_standard_voltage(&self, kv: f64) -> bool {
        self.allowed_voltage_levels
            .iter()
            .any(|level| (level - kv).abs() < 1e-9)
    }
}
