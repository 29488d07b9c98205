// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the capability interface that needs to be implemented
//! by adapters to external simulation engines.

use crate::component::{Branch, Bus, ComponentKind, Generator, Load};

/// A kind-tagged reference to an entity of the data model.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Bus(&'a Bus),
    Generator(&'a Generator),
    Load(&'a Load),
    Branch(&'a Branch),
}

/// A kind-tagged mutable reference to an entity of the data model.
#[derive(Debug)]
pub enum EntityMut<'a> {
    Bus(&'a mut Bus),
    Generator(&'a mut Generator),
    Load(&'a mut Load),
    Branch(&'a mut Branch),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            EntityRef::Bus(_) => ComponentKind::Bus,
            EntityRef::Generator(_) => ComponentKind::Generator,
            EntityRef::Load(_) => ComponentKind::Load,
            EntityRef::Branch(_) => ComponentKind::Branch,
        }
    }
}

impl EntityMut<'_> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            EntityMut::Bus(_) => ComponentKind::Bus,
            EntityMut::Generator(_) => ComponentKind::Generator,
            EntityMut::Load(_) => ComponentKind::Load,
            EntityMut::Branch(_) => ComponentKind::Branch,
        }
    }
}

/**
This trait needs to be implemented by the types that synchronize the data
model with an external solver engine.

Every method reports success as a `bool`; the data model never interprets
engine failures beyond counting them.

<details>
<summary>Example implementation that only records what it was asked to do:</summary>

```
use network_data_model::{EngineAdapter, EntityMut, EntityRef};

#[derive(Default)]
struct Recorder {
    pushed: Vec<String>,
}

impl EngineAdapter for Recorder {
    fn get_status(&mut self, _entity: EntityMut<'_>) -> bool {
        true
    }

    fn set_status(&mut self, entity: EntityRef<'_>) -> bool {
        self.pushed.push(format!("{} status", entity.kind()));
        true
    }

    fn get_entity_from_engine(&mut self, _entity: EntityMut<'_>) -> bool {
        false
    }

    fn set_entity_to_engine(&mut self, entity: EntityRef<'_>) -> bool {
        self.pushed.push(format!("{} values", entity.kind()));
        true
    }
}
```

</details>
*/
pub trait EngineAdapter {
    /// Reads the in-service status of the entity from the engine.
    fn get_status(&mut self, entity: EntityMut<'_>) -> bool;
    /// Writes the in-service status of the entity to the engine.
    fn set_status(&mut self, entity: EntityRef<'_>) -> bool;
    /// Reads the entity's values from the engine.
    fn get_entity_from_engine(&mut self, entity: EntityMut<'_>) -> bool;
    /// Writes the entity's values to the engine.
    fn set_entity_to_engine(&mut self, entity: EntityRef<'_>) -> bool;
}
