// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Synchronization of a [`DataModelManager`] with an external engine.

use crate::component::Component;
use crate::engine::EngineAdapter;
use crate::DataModelManager;

/// The outcome of a synchronization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of entities the engine was called for.
    pub attempted: usize,
    /// Number of calls the engine reported as successful.
    pub succeeded: usize,
}

impl SyncReport {
    /// Returns the number of calls the engine reported as failed.
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    /// Returns true if every call succeeded.
    pub fn is_complete(&self) -> bool {
        self.attempted == self.succeeded
    }

    fn record(&mut self, ok: bool) {
        self.attempted += 1;
        if ok {
            self.succeeded += 1;
        }
    }
}

/// Engine synchronization.
///
/// Every pass walks buses, branches, generators and loads, each in collection
/// order, and never stops at a failed call.
impl DataModelManager {
    /// Writes the values of every entity to the engine.
    pub fn push_to_engine(&self, engine: &mut dyn EngineAdapter) -> SyncReport {
        self.push_each(|entity| entity.push_to_engine(engine))
    }

    /// Reads the values of every entity from the engine.
    pub fn pull_from_engine(&mut self, engine: &mut dyn EngineAdapter) -> SyncReport {
        self.pull_each(|entity| entity.pull_from_engine(engine))
    }

    /// Writes the status of every entity to the engine.
    pub fn push_status(&self, engine: &mut dyn EngineAdapter) -> SyncReport {
        self.push_each(|entity| entity.push_status(engine))
    }

    /// Reads the status of every entity from the engine.
    pub fn pull_status(&mut self, engine: &mut dyn EngineAdapter) -> SyncReport {
        self.pull_each(|entity| entity.pull_status(engine))
    }

    fn push_each(&self, mut call: impl FnMut(&dyn Component) -> bool) -> SyncReport {
        let mut report = SyncReport::default();
        let entities = self
            .buses
            .iter()
            .map(|e| e as &dyn Component)
            .chain(self.branches.iter().map(|e| e as &dyn Component))
            .chain(self.generators.iter().map(|e| e as &dyn Component))
            .chain(self.loads.iter().map(|e| e as &dyn Component));
        for entity in entities {
            report.record(call(entity));
        }
        report
    }

    fn pull_each(&mut self, mut call: impl FnMut(&mut dyn Component) -> bool) -> SyncReport {
        let mut report = SyncReport::default();
        let entities = self
            .buses
            .iter_mut()
            .map(|e| e as &mut dyn Component)
            .chain(self.branches.iter_mut().map(|e| e as &mut dyn Component))
            .chain(self.generators.iter_mut().map(|e| e as &mut dyn Component))
            .chain(self.loads.iter_mut().map(|e| e as &mut dyn Component));
        for entity in entities {
            report.record(call(entity));
        }
        report
    }
}
