// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `Bus` record.

use serde::Serialize;

use crate::engine::{EntityMut, EntityRef};
use crate::ElementId;

use super::{Component, ComponentKind, ComponentState};

/// A network node at a given voltage level.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bus {
    id: ElementId,

    /// Display name, usually the site name.
    pub name: String,
    /// Nominal voltage in kV.
    pub kv: f64,
    /// Bus type tag as given by the source.
    pub bus_type: String,
    /// Area or zone the bus belongs to.
    pub area: String,
    /// Owning transmission operator.
    pub owner: String,
    /// Whether the bus is disconnected from the network.
    pub disconnected: bool,
    /// Whether the bus is the slack bus.
    pub slack: bool,

    pub(crate) branches: Vec<usize>,
    pub(crate) generators: Vec<usize>,
    pub(crate) loads: Vec<usize>,

    state: ComponentState,
}

impl Bus {
    /// Creates a new bus with the given identifier.
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kv: 0.0,
            bus_type: String::new(),
            area: String::new(),
            owner: String::new(),
            disconnected: false,
            slack: false,
            branches: Vec::new(),
            generators: Vec::new(),
            loads: Vec::new(),
            state: ComponentState::default(),
        }
    }

    /// Returns the identifier of the bus.
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Positions of the branches attached to this bus, when the bus index
    /// is in use.
    pub fn branch_positions(&self) -> &[usize] {
        &self.branches
    }

    /// Positions of the generators attached to this bus, when the bus index
    /// is in use.
    pub fn generator_positions(&self) -> &[usize] {
        &self.generators
    }

    /// Positions of the loads attached to this bus, when the bus index is in
    /// use.
    pub fn load_positions(&self) -> &[usize] {
        &self.loads
    }

    pub(crate) fn clear_reverse_indices(&mut self) {
        self.branches.clear();
        self.generators.clear();
        self.loads.clear();
    }
}

impl Component for Bus {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Bus
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn readable_name(&self) -> String {
        let id = self.id.to_string();
        if id != self.name {
            format!("{}-({})", self.name, id)
        } else {
            id
        }
    }

    fn as_entity(&self) -> EntityRef<'_> {
        EntityRef::Bus(self)
    }

    fn as_entity_mut(&mut self) -> EntityMut<'_> {
        EntityMut::Bus(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_coercion() {
        assert_eq!(Bus::new("101").id(), &ElementId::Number(101));
        assert_eq!(Bus::new("N1").id(), &ElementId::Text("N1".into()));
    }

    #[test]
    fn test_readable_name() {
        let mut bus = Bus::new("ABC4");
        bus.name = "ABC4".into();
        assert_eq!(bus.readable_name(), "ABC4");

        bus.name = "Abbey Road".into();
        assert_eq!(bus.readable_name(), "Abbey Road-(ABC4)");
    }
}
