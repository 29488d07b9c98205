// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `Load` record.

use serde::Serialize;

use crate::engine::{EntityMut, EntityRef};
use crate::identifier::normalize_local_id;
use crate::ElementId;

use super::{Component, ComponentKind, ComponentState, RadialElement};

/// A demand attached to a single bus.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Load {
    bus_id: ElementId,
    id: String,
    bus_position: Option<usize>,
    bus_name: String,

    /// Display name.
    pub name: String,
    /// Active power demand in MW.
    pub mw: f64,
    /// Reactive power demand in MVAr.
    pub mvar: f64,
    /// Contracted capacity in MW.
    pub mw_capacity: f64,

    state: ComponentState,
}

impl Load {
    /// Creates a new load attached to `bus_id`.  The load id is stored
    /// trimmed.
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
            state: ComponentState::default(),
        }
    }

    /// Returns the load id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cached name of the bus the load is attached to.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }
}

impl Component for Load {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Load
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
        EntityRef::Load(self)
    }

    fn as_entity_mut(&mut self) -> EntityMut<'_> {
        EntityMut::Load(self)
    }
}

impl RadialElement for Load {
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
