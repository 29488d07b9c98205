// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The canonical in-memory store of buses, generators, loads and branches,
//! and the relationships between them.

mod insertion;
mod retrieval;
mod sync;
mod topology;

#[cfg(test)]
pub(crate) mod test_utils;

pub use sync::SyncReport;
pub use topology::Topology;

use std::collections::HashMap;

use crate::component::{Branch, Bus, Generator, Load, RadialElement};
use crate::{ElementId, ModelConfig};

/// `BusIndexMap` stores the position in the bus collection for every bus
/// identifier, so that buses can be found without scanning the collection.
pub(crate) type BusIndexMap = HashMap<ElementId, usize>;

/// The canonical store of a network description.
///
/// Entities are kept in one ordered collection per kind and addressed by
/// their position in that collection.  When [`ModelConfig::use_bus_index`] is
/// set, an identifier index over the buses is created on the first insertion,
/// and every bus keeps the positions of the generators, loads and branches
/// attached to it.
///
/// Buses must be inserted before any element referring to them.
#[derive(Clone, Debug, Default)]
pub struct DataModelManager {
    buses: Vec<Bus>,
    generators: Vec<Generator>,
    loads: Vec<Load>,
    branches: Vec<Branch>,
    bus_index: Option<BusIndexMap>,
    config: ModelConfig,
}

impl DataModelManager {
    /// Creates an empty `DataModelManager` with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `DataModelManager` with the given configuration.
    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Returns the configuration of the manager.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Returns true if the bus identifier index is active.
    pub fn is_indexed(&self) -> bool {
        self.bus_index.is_some()
    }

    /// Removes all entities and drops the bus index.
    pub fn clear(&mut self) {
        self.buses.clear();
        self.generators.clear();
        self.loads.clear();
        self.branches.clear();
        self.bus_index = None;
    }

    /// Turns on the bus index, rebuilding it and all reverse indices from the
    /// current collections.
    pub fn enable_bus_index(&mut self) {
        self.config.use_bus_index = true;
        self.rebuild_indices();
    }

    /// Turns off the bus index.  Subsequent lookups scan the collections.
    pub fn disable_bus_index(&mut self) {
        self.config.use_bus_index = false;
        self.bus_index = None;
        for bus in &mut self.buses {
            bus.clear_reverse_indices();
        }
    }

    fn rebuild_indices(&mut self) {
        let mut index = BusIndexMap::with_capacity(self.buses.len());
        for (position, bus) in self.buses.iter_mut().enumerate() {
            bus.clear_reverse_indices();
            index.entry(bus.id().clone()).or_insert(position);
        }

        let lookup =
            |cached: Option<usize>, id: &ElementId| cached.or_else(|| index.get(id).copied());

        for (position, gen) in self.generators.iter().enumerate() {
            if let Some(bus) = lookup(gen.bus_position(), gen.bus_id()) {
                self.buses[bus].generators.push(position);
            }
        }
        for (position, load) in self.loads.iter().enumerate() {
            if let Some(bus) = lookup(load.bus_position(), load.bus_id()) {
                self.buses[bus].loads.push(position);
            }
        }
        for (position, branch) in self.branches.iter().enumerate() {
            let mut ends: Vec<usize> = branch.resolved_positions().collect();
            ends.dedup();
            for bus in ends {
                if !self.buses[bus].branches.contains(&position) {
                    self.buses[bus].branches.push(position);
                }
            }
        }

        tracing::debug!(
            "Rebuilt bus index over {} buses, {} generators, {} loads, {} branches.",
            self.buses.len(),
            self.generators.len(),
            self.loads.len(),
            self.branches.len()
        );
        self.bus_index = Some(index);
    }
}
