// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `Branch` record.

use serde::Serialize;

use crate::engine::{EntityMut, EntityRef};
use crate::identifier::normalize_local_id;
use crate::ElementId;

use super::{Component, ComponentKind, ComponentState};

/// One of the terminals of a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BranchEnd {
    One,
    Two,
    Three,
}

impl BranchEnd {
    fn slot(self) -> usize {
        match self {
            BranchEnd::One => 0,
            BranchEnd::Two => 1,
            BranchEnd::Three => 2,
        }
    }
}

/// A line, cable, transformer or other series element connecting two buses,
/// or three for three-winding transformers and multi-section lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Branch {
    bus_ids: [ElementId; 3],
    id: String,
    bus_positions: [Option<usize>; 3],
    bus_names: [String; 3],

    /// Display name.
    pub name: String,
    /// Transformer name, used in the readable name of transformers.
    pub tx_name: String,

    /// Ratings in MVA, typically winter, summer and short-term.
    pub rating_a: f64,
    pub rating_b: f64,
    pub rating_c: f64,

    pub is_switch: bool,
    pub is_transformer: bool,
    pub is_line: bool,
    pub is_breaker: bool,
    pub is_coupler: bool,
    pub is_series_reactor: bool,
    pub is_three_winding: bool,
    pub is_shunt: bool,
    pub is_multi_section: bool,
    pub is_hvdc: bool,

    state: ComponentState,
}

impl Branch {
    /// Creates a new branch between `bus1` and `bus2`.
    ///
    /// A `bus3` that is absent or zero marks a two-terminal branch.  Any other
    /// third bus flags the branch as a three-winding transformer.
    pub fn new(
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        bus3: Option<ElementId>,
        id: impl AsRef<str>,
    ) -> Self {
        let bus3 = bus3
            .filter(|b| !b.is_missing())
            .unwrap_or(ElementId::NONE);
        let three_terminal = !bus3.is_none_marker();

        Self {
            bus_ids: [bus1.into(), bus2.into(), bus3],
            id: normalize_local_id(id.as_ref()),
            bus_positions: [None; 3],
            bus_names: Default::default(),
            name: String::new(),
            tx_name: String::new(),
            rating_a: 0.0,
            rating_b: 0.0,
            rating_c: 0.0,
            is_switch: false,
            is_transformer: three_terminal,
            is_line: false,
            is_breaker: false,
            is_coupler: false,
            is_series_reactor: false,
            is_three_winding: three_terminal,
            is_shunt: false,
            is_multi_section: false,
            is_hvdc: false,
            state: ComponentState::default(),
        }
    }

    /// Returns the branch id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the identifier of the bus at the given end.
    pub fn bus_id(&self, end: BranchEnd) -> &ElementId {
        &self.bus_ids[end.slot()]
    }

    pub fn bus1(&self) -> &ElementId {
        &self.bus_ids[0]
    }

    pub fn bus2(&self) -> &ElementId {
        &self.bus_ids[1]
    }

    pub fn bus3(&self) -> &ElementId {
        &self.bus_ids[2]
    }

    /// Returns true if the branch has a third terminal.
    pub fn has_third_bus(&self) -> bool {
        !self.bus_ids[2].is_none_marker()
    }

    /// Returns the position of the resolved bus at the given end.
    pub fn bus_position(&self, end: BranchEnd) -> Option<usize> {
        self.bus_positions[end.slot()]
    }

    /// Returns the cached name of the bus at the given end.
    pub fn bus_name(&self, end: BranchEnd) -> &str {
        &self.bus_names[end.slot()]
    }

    /// Sets the cached bus name for the given end.
    pub fn set_bus_name(&mut self, end: BranchEnd, name: impl Into<String>) {
        self.bus_names[end.slot()] = name.into();
    }

    /// Records the resolved bus at the given end.
    pub(crate) fn attach_end(&mut self, end: BranchEnd, position: usize, bus_name: &str) {
        self.bus_positions[end.slot()] = Some(position);
        self.bus_names[end.slot()] = bus_name.to_string();
    }

    /// Returns the positions of all resolved end buses.
    pub(crate) fn resolved_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.bus_positions.iter().flatten().copied()
    }

    /// Returns true if the branch connects `bus1`, `bus2` and `bus3` in exactly
    /// that order.
    pub(crate) fn connects(&self, bus1: &ElementId, bus2: &ElementId, bus3: &ElementId) -> bool {
        self.bus_ids[0] == *bus1 && self.bus_ids[1] == *bus2 && self.bus_ids[2] == *bus3
    }
}

impl Component for Branch {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Branch
    }

    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn readable_name(&self) -> String {
        let [b1, b2, b3] = &self.bus_ids;
        if self.is_three_winding {
            format!("{} ({b1}, {b2}, {b3})", self.tx_name)
        } else if self.is_transformer {
            format!("{} ({b1}, {b2})", self.tx_name)
        } else if self.is_multi_section {
            format!("{} ({b1}, {b2}, {b3})", self.id)
        } else {
            format!("{} ({b1}, {b2})", self.id)
        }
    }

    fn as_entity(&self) -> EntityRef<'_> {
        EntityRef::Branch(self)
    }

    fn as_entity_mut(&mut self) -> EntityMut<'_> {
        EntityMut::Branch(self)
    }
}
