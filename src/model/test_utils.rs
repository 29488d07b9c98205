// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by the tests of the `model` module and its users.
//!
//! - the `ModelFixture`, which can declaratively describe a network for use
//!   in tests, and build a `DataModelManager` from it.
//! - the `RecordingEngine`, an `EngineAdapter` that records every call and
//!   answers from a configurable outcome.

use crate::component::{Branch, Bus, Component, Generator, Load};
use crate::engine::{EngineAdapter, EntityMut, EntityRef};
use crate::{DataModelManager, ElementId, Error, ModelConfig};

enum Entry {
    Bus(Bus),
    Generator(Generator),
    Load(Load),
    Branch(Branch),
}

/// A builder for creating network configurations easily, for use in tests.
///
/// Entries are inserted into the model in the order they were declared.
pub(crate) struct ModelFixture {
    entries: Vec<Entry>,
}

impl ModelFixture {
    /// Creates a new, empty `ModelFixture`.
    pub(crate) fn new() -> Self {
        ModelFixture {
            entries: Vec::new(),
        }
    }

    /// Adds a bus whose name is its identifier.
    pub(crate) fn bus(&mut self, id: impl Into<ElementId>) -> &mut Self {
        let mut bus = Bus::new(id);
        bus.name = bus.id().to_string();
        bus.kv = 400.0;
        self.entries.push(Entry::Bus(bus));
        self
    }

    /// Adds a two-terminal line.
    pub(crate) fn line(
        &mut self,
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        id: &str,
    ) -> &mut Self {
        let mut branch = Branch::new(bus1, bus2, None, id);
        branch.is_line = true;
        self.entries.push(Entry::Branch(branch));
        self
    }

    /// Adds a three-winding transformer.
    pub(crate) fn transformer3(
        &mut self,
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        bus3: impl Into<ElementId>,
        id: &str,
    ) -> &mut Self {
        let mut branch = Branch::new(bus1, bus2, Some(bus3.into()), id);
        branch.tx_name = id.to_string();
        self.entries.push(Entry::Branch(branch));
        self
    }

    /// Adds a generator.
    pub(crate) fn generator(&mut self, bus: impl Into<ElementId>, id: &str) -> &mut Self {
        self.entries.push(Entry::Generator(Generator::new(bus, id)));
        self
    }

    /// Adds a load.
    pub(crate) fn load(&mut self, bus: impl Into<ElementId>, id: &str) -> &mut Self {
        self.entries.push(Entry::Load(Load::new(bus, id)));
        self
    }

    /// Builds a `DataModelManager` holding the declared entities.
    pub(crate) fn build(&self, config: ModelConfig) -> Result<DataModelManager, Error> {
        let mut model = DataModelManager::with_config(config);
        for entry in &self.entries {
            match entry {
                Entry::Bus(bus) => model.add_bus(bus.clone())?,
                Entry::Generator(gen) => model.add_generator(gen.clone())?,
                Entry::Load(load) => model.add_load(load.clone())?,
                Entry::Branch(branch) => model.add_branch(branch.clone())?,
            };
        }
        Ok(model)
    }
}

/// An `EngineAdapter` that records the entities it was called with, as
/// `"{kind} {readable_name}"` strings.
pub(crate) struct RecordingEngine {
    /// The answer returned for every call.
    pub(crate) outcome: bool,
    /// The status written into entities by `get_status`.
    pub(crate) engine_status: bool,
    pub(crate) calls: Vec<String>,
}

impl RecordingEngine {
    pub(crate) fn new(outcome: bool) -> Self {
        Self {
            outcome,
            engine_status: false,
            calls: Vec::new(),
        }
    }

    fn record(&mut self, op: &str, entity: EntityRef<'_>) {
        let name = match entity {
            EntityRef::Bus(e) => e.readable_name(),
            EntityRef::Generator(e) => e.readable_name(),
            EntityRef::Load(e) => e.readable_name(),
            EntityRef::Branch(e) => e.readable_name(),
        };
        self.calls.push(format!("{op} {} {name}", entity.kind()));
    }
}

impl EngineAdapter for RecordingEngine {
    fn get_status(&mut self, entity: EntityMut<'_>) -> bool {
        let on = self.engine_status;
        match entity {
            EntityMut::Bus(e) => e.set_on(on),
            EntityMut::Generator(e) => e.set_on(on),
            EntityMut::Load(e) => e.set_on(on),
            EntityMut::Branch(e) => e.set_on(on),
        }
        self.outcome
    }

    fn set_status(&mut self, entity: EntityRef<'_>) -> bool {
        self.record("status", entity);
        self.outcome
    }

    fn get_entity_from_engine(&mut self, entity: EntityMut<'_>) -> bool {
        if let EntityMut::Generator(gen) = entity {
            gen.mw = 100.0;
        }
        self.outcome
    }

    fn set_entity_to_engine(&mut self, entity: EntityRef<'_>) -> bool {
        self.record("values", entity);
        self.outcome
    }
}
