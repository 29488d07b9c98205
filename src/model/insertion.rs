// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for adding entities to a [`DataModelManager`].

use crate::component::{Branch, BranchEnd, Bus, Generator, Load, RadialElement};
use crate::{DataModelManager, ElementId, Error};

use super::BusIndexMap;

/// Entity insertion.
impl DataModelManager {
    /// Appends a bus and returns its position.
    ///
    /// Fails if the bus has no identifier, or if a bus with the same
    /// identifier is already stored.  The store is unchanged on failure.
    pub fn add_bus(&mut self, bus: Bus) -> Result<usize, Error> {
        if bus.id().is_missing() {
            tracing::error!("Can't add a bus without an identifier.");
            return Err(Error::invalid_component("Bus has no identifier."));
        }
        if let Some((_, existing)) = self.find_bus(bus.id()) {
            tracing::warn!(
                "Rejecting duplicate bus {}: already stored at position {}.",
                bus.id(),
                existing
            );
            return Err(Error::duplicate_identifier(format!(
                "Bus {} already exists at position {}.",
                bus.id(),
                existing
            )));
        }

        let position = self.buses.len();
        if self.config.use_bus_index {
            self.bus_index
                .get_or_insert_with(BusIndexMap::new)
                .insert(bus.id().clone(), position);
        }
        self.buses.push(bus);
        Ok(position)
    }

    /// Appends a generator and returns its position.
    ///
    /// The generator's bus must already be stored.  A generator that hasn't
    /// been associated with its bus yet is associated here.
    pub fn add_generator(&mut self, mut generator: Generator) -> Result<usize, Error> {
        let bus = self.attach_radial(&mut generator)?;
        let position = self.generators.len();
        self.generators.push(generator);
        if self.is_indexed() {
            self.buses[bus].generators.push(position);
        }
        Ok(position)
    }

    /// Appends a load and returns its position.
    ///
    /// The load's bus must already be stored.  A load that hasn't been
    /// associated with its bus yet is associated here.
    pub fn add_load(&mut self, mut load: Load) -> Result<usize, Error> {
        let bus = self.attach_radial(&mut load)?;
        let position = self.loads.len();
        self.loads.push(load);
        if self.is_indexed() {
            self.buses[bus].loads.push(position);
        }
        Ok(position)
    }

    /// Appends a branch and returns its position.
    ///
    /// All end buses of the branch must already be stored.  Ends that haven't
    /// been associated yet are associated here.
    pub fn add_branch(&mut self, mut branch: Branch) -> Result<usize, Error> {
        let mut ends = vec![BranchEnd::One, BranchEnd::Two];
        if branch.has_third_bus() {
            ends.push(BranchEnd::Three);
        }

        let mut resolved = Vec::with_capacity(ends.len());
        for end in ends {
            let bus = match branch.bus_position(end) {
                Some(bus) if self.holds_bus(bus, branch.bus_id(end)) => bus,
                _ => self.resolve_bus(branch.bus_id(end))?,
            };
            resolved.push((end, bus));
        }
        for (end, bus) in &resolved {
            let name = self.buses[*bus].name.clone();
            branch.attach_end(*end, *bus, &name);
        }

        let position = self.branches.len();
        self.branches.push(branch);
        if self.is_indexed() {
            for (_, bus) in resolved {
                let attached = &mut self.buses[bus].branches;
                if !attached.contains(&position) {
                    attached.push(position);
                }
            }
        }
        Ok(position)
    }

    fn attach_radial(&self, element: &mut impl RadialElement) -> Result<usize, Error> {
        if let Some(bus) = element.bus_position() {
            if self.holds_bus(bus, element.bus_id()) {
                return Ok(bus);
            }
        }
        let bus = self.resolve_bus(element.bus_id())?;
        element.attach_to_bus(bus, &self.buses[bus].name);
        Ok(bus)
    }

    fn holds_bus(&self, position: usize, bus_id: &ElementId) -> bool {
        self.buses.get(position).is_some_and(|bus| bus.id() == bus_id)
    }

    /// Returns the position of the bus with the given identifier, or a
    /// `BusNotFound` error.
    pub(crate) fn resolve_bus(&self, bus_id: &ElementId) -> Result<usize, Error> {
        self.find_bus(bus_id)
            .map(|(_, position)| position)
            .ok_or_else(|| {
                tracing::error!("Bus with ID {bus_id} not found in data model.");
                Error::bus_not_found(format!("Bus with ID {bus_id} not found in data model."))
            })
    }
}
