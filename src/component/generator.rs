// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `Generator` record.

use serde::Serialize;

use crate::engine::{EntityMut, EntityRef};
use crate::identifier::normalize_local_id;
use crate::ElementId;

use super::{Component, ComponentKind, ComponentState, RadialElement};

/// A generating unit attached to a single bus.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Generator {
    bus_id: ElementId,
    id: String,
    bus_position: Option<usize>,
    bus_name: String,

    /// Display name, usually the plant name.
    pub name: String,
    /// Active power output in MW.
    pub mw: f64,
    /// Reactive power output in MVAr.
    pub mvar: f64,
    /// Registered capacity in MW.
    pub mw_capacity: f64,
    /// Minimum stable generation in MW.
    pub msg: f64,
    /// Upper reactive power limit in MVAr.
    pub q_max: f64,
    /// Lower reactive power limit in MVAr.
    pub q_min: f64,

    state: ComponentState,
}

impl Generator {
    /// Creates a new generator attached to `bus_id`.  The generator id is
    /// stored trimmed.
    pub fn new(bus_id: impl Into<ElementId>, id: impl AsRef<str>) -> Self {
        Self {
            bus_id: bus_id.into(),
            id: normalize_local_id(id.as_ref()),
            bus_position: None,
            bus_name: String::new(),
            name: String::new(),
            mw: 0.0,
            mvar: 0.0,
            mw_capacity: 0.0,
            msg: 0.0,
            q_max: 99_999.0,
            q_min: -99_999.0,
            state: ComponentState::default(),
        }
    }

    /// Returns the generator id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cached name of the bus the generator is attached to.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }
}

impl Component for Generator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Generator
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn readable_name(&self) -> String {
        format!("{}-{}", self.bus_name, self.id)
    }

    fn as_entity(&self) -> EntityRef<'_> {
        EntityRef::Generator(self)
    }

    fn as_entity_mut(&mut self) -> EntityMut<'_> {
        EntityMut::Generator(self)
    }
}

impl RadialElement for Generator {
    fn bus_id(&self) -> &ElementId {
        &self.bus_id
    }

    fn local_id(&self) -> &str {
        &self.id
    }

    fn bus_position(&self) -> Option<usize> {
        self.bus_position
    }

    fn attach_to_bus(&mut self, position: usize, bus_name: &str) {
        self.bus_position = Some(position);
        self.bus_name = bus_name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let gen = Generator::new("17", " G1 ");
        assert_eq!(gen.bus_id(), &ElementId::Number(17));
        assert_eq!(gen.id(), "G1");
        assert_eq!(gen.bus_position(), None);
        assert_eq!(gen.q_max, 99_999.0);
    }

    #[test]
    fn test_attach() {
        let mut gen = Generator::new("N1", "G1");
        gen.attach_to_bus(3, "North");
        assert_eq!(gen.bus_position(), Some(3));
        assert_eq!(gen.bus_name(), "North");
        assert_eq!(gen.readable_name(), "North-G1");
    }
}
