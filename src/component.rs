// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The entity records stored in a [`DataModelManager`][crate::DataModelManager]
//! and the status contract they share.
//!
//! Entities carry no engine behavior of their own.  Status and value
//! synchronization is delegated to an [`EngineAdapter`] passed in by the
//! caller.

mod branch;
mod bus;
mod generator;
mod load;

pub use branch::{Branch, BranchEnd};
pub use bus::Bus;
pub use generator::Generator;
pub use load::Load;

use std::fmt::Display;

use serde::Serialize;

use crate::engine::{EngineAdapter, EntityMut, EntityRef};
use crate::ElementId;

/// The kind of an entity in the data model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentKind {
    Bus,
    Generator,
    Load,
    Branch,
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Bus => write!(f, "Bus"),
            ComponentKind::Generator => write!(f, "Generator"),
            ComponentKind::Load => write!(f, "Load"),
            ComponentKind::Branch => write!(f, "Branch"),
        }
    }
}

/// The status flags common to all entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComponentState {
    /// Whether the component is in service.
    pub on: bool,
    /// Whether results are available for the component.
    pub results: bool,
}

impl Default for ComponentState {
    fn default() -> Self {
        Self {
            on: true,
            results: true,
        }
    }
}

/// The status contract shared by buses, generators, loads and branches.
pub trait Component {
    /// Returns the kind of the component.
    fn kind(&self) -> ComponentKind;
    /// Returns the status flags of the component.
    fn state(&self) -> &ComponentState;
    /// Returns the status flags of the component for modification.
    fn state_mut(&mut self) -> &mut ComponentState;
    /// Returns a name for the component that can be shown to users.
    fn readable_name(&self) -> String;
    /// Returns a kind-tagged reference to the component.
    fn as_entity(&self) -> EntityRef<'_>;
    /// Returns a kind-tagged mutable reference to the component.
    fn as_entity_mut(&mut self) -> EntityMut<'_>;

    fn is_on(&self) -> bool {
        self.state().on
    }

    fn set_on(&mut self, on: bool) {
        self.state_mut().on = on;
    }

    fn switch_on(&mut self) {
        self.state_mut().on = true;
    }

    fn switch_off(&mut self) {
        self.state_mut().on = false;
    }

    fn toggle(&mut self) {
        let state = self.state_mut();
        state.on = !state.on;
    }

    fn has_results(&self) -> bool {
        self.state().results
    }

    fn set_results(&mut self, available: bool) {
        self.state_mut().results = available;
    }

    /// Sets the in-service flag and, if an engine is given, pushes the new
    /// status to it.
    ///
    /// Returns the engine's answer, or `true` when no engine is involved.
    fn set_status(&mut self, on: bool, engine: Option<&mut dyn EngineAdapter>) -> bool {
        self.state_mut().on = on;
        match engine {
            Some(engine) => engine.set_status(self.as_entity()),
            None => true,
        }
    }

    /// Pushes the current status to the engine.
    fn push_status(&self, engine: &mut dyn EngineAdapter) -> bool {
        engine.set_status(self.as_entity())
    }

    /// Reads the status of the component back from the engine.
    fn pull_status(&mut self, engine: &mut dyn EngineAdapter) -> bool {
        engine.get_status(self.as_entity_mut())
    }

    /// Writes the component's values to the engine.
    fn push_to_engine(&self, engine: &mut dyn EngineAdapter) -> bool {
        engine.set_entity_to_engine(self.as_entity())
    }

    /// Reads the component's values from the engine.
    fn pull_from_engine(&mut self, engine: &mut dyn EngineAdapter) -> bool {
        engine.get_entity_from_engine(self.as_entity_mut())
    }
}

/// A generator or a load: an element attached to exactly one bus.
pub trait RadialElement: Component {
    /// Returns the identifier of the bus the element is attached to.
    fn bus_id(&self) -> &ElementId;
    /// Returns the element's own identifier, unique per bus.
    fn local_id(&self) -> &str;
    /// Returns the position of the resolved bus, if resolved.
    fn bus_position(&self) -> Option<usize>;
    /// Records the resolved bus on the element.
    fn attach_to_bus(&mut self, position: usize, bus_name: &str);
}
