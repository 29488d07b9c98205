// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving entities from a [`DataModelManager`].

use crate::component::{Branch, Bus, Generator, Load, RadialElement};
use crate::identifier::normalize_local_id;
use crate::{DataModelManager, ElementId};

/// Bus lookup.
impl DataModelManager {
    /// Returns the bus with the given identifier and its position.
    ///
    /// Uses the bus index when it is active, and scans the bus collection
    /// otherwise.  The index covers every stored bus, so a miss in the index
    /// is final.
    pub fn find_bus(&self, bus_id: impl Into<ElementId>) -> Option<(&Bus, usize)> {
        let bus_id = bus_id.into();
        if let Some(index) = &self.bus_index {
            let position = *index.get(&bus_id)?;
            return self.buses.get(position).map(|bus| (bus, position));
        }
        self.buses
            .iter()
            .enumerate()
            .find(|(_, bus)| *bus.id() == bus_id)
            .map(|(position, bus)| (bus, position))
    }

    /// Returns the bus a generator or load is attached to.
    pub fn bus_of(&self, element: &impl RadialElement) -> Option<&Bus> {
        match element.bus_position() {
            Some(position) => self.buses.get(position),
            None => self.find_bus(element.bus_id()).map(|(bus, _)| bus),
        }
    }
}

/// Branch lookup.
impl DataModelManager {
    /// Returns the branch with the given end buses and id, and its position.
    ///
    /// A branch stored as `(bus1, bus2, bus3)` always matches.  With
    /// `allow_transposed`, branches stored as `(bus2, bus1, bus3)` or as
    /// `(bus3, bus2, bus1)` match as well.  A `bus3` of `None` stands for a
    /// two-terminal branch.
    pub fn find_branch(
        &self,
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        bus3: Option<ElementId>,
        branch_id: &str,
        allow_transposed: bool,
    ) -> Option<(&Branch, usize)> {
        let bus1 = bus1.into();
        let bus2 = bus2.into();
        let bus3 = bus3
            .filter(|b| !b.is_missing())
            .unwrap_or(ElementId::NONE);
        let branch_id = normalize_local_id(branch_id);

        let matches = |branch: &Branch| {
            branch.id() == branch_id
                && (branch.connects(&bus1, &bus2, &bus3)
                    || allow_transposed
                        && (branch.connects(&bus2, &bus1, &bus3)
                            || branch.connects(&bus3, &bus2, &bus1)))
        };

        if self.is_indexed() {
            if let Some((bus, _)) = self.find_bus(&bus1) {
                let found = bus
                    .branches
                    .iter()
                    .filter_map(|&position| self.branches.get(position).map(|b| (b, position)))
                    .find(|(branch, _)| matches(branch));
                if found.is_some() {
                    return found;
                }
            }
        }

        self.branches
            .iter()
            .enumerate()
            .find(|(_, branch)| matches(branch))
            .map(|(position, branch)| (branch, position))
    }

    /// Returns every branch attached to the given bus, with its position.
    pub fn get_all_branches_on_bus(&self, bus_id: impl Into<ElementId>) -> Vec<(&Branch, usize)> {
        let bus_id = bus_id.into();
        if self.is_indexed() {
            return match self.find_bus(&bus_id) {
                Some((bus, _)) => collect_positions(&self.branches, &bus.branches),
                None => Vec::new(),
            };
        }
        self.branches
            .iter()
            .enumerate()
            .filter(|(_, branch)| {
                *branch.bus1() == bus_id
                    || *branch.bus2() == bus_id
                    || branch.has_third_bus() && *branch.bus3() == bus_id
            })
            .map(|(position, branch)| (branch, position))
            .collect()
    }
}

/// Generator and load lookup.
impl DataModelManager {
    /// Returns the generator with the given id on the given bus, and its
    /// position.  The generator id is compared trimmed.
    pub fn find_generator(
        &self,
        bus_id: impl Into<ElementId>,
        gen_id: &str,
    ) -> Option<(&Generator, usize)> {
        let bus_id = bus_id.into();
        let attached = self.attached(&bus_id, |bus| &bus.generators);
        find_radial(&self.generators, attached, &bus_id, gen_id)
    }

    /// Returns the load with the given id on the given bus, and its position.
    /// The load id is compared trimmed.
    pub fn find_load(
        &self,
        bus_id: impl Into<ElementId>,
        load_id: &str,
    ) -> Option<(&Load, usize)> {
        let bus_id = bus_id.into();
        let attached = self.attached(&bus_id, |bus| &bus.loads);
        find_radial(&self.loads, attached, &bus_id, load_id)
    }

    /// Returns every generator attached to the given bus, with its position.
    pub fn get_all_generators_on_bus(
        &self,
        bus_id: impl Into<ElementId>,
    ) -> Vec<(&Generator, usize)> {
        let bus_id = bus_id.into();
        match self.attached(&bus_id, |bus| &bus.generators) {
            Some(positions) => collect_positions(&self.generators, positions),
            None => scan_radial(&self.generators, &bus_id),
        }
    }

    /// Returns every load attached to the given bus, with its position.
    pub fn get_all_loads_on_bus(&self, bus_id: impl Into<ElementId>) -> Vec<(&Load, usize)> {
        let bus_id = bus_id.into();
        match self.attached(&bus_id, |bus| &bus.loads) {
            Some(positions) => collect_positions(&self.loads, positions),
            None => scan_radial(&self.loads, &bus_id),
        }
    }

    /// Returns the reverse index list selected by `list` on the given bus,
    /// when the bus index is active and the bus exists.
    fn attached<'a>(
        &'a self,
        bus_id: &ElementId,
        list: impl Fn(&'a Bus) -> &'a Vec<usize>,
    ) -> Option<&'a [usize]> {
        if !self.is_indexed() {
            return None;
        }
        self.find_bus(bus_id).map(|(bus, _)| list(bus).as_slice())
    }
}

/// Positional access and iteration.
impl DataModelManager {
    pub fn bus(&self, position: usize) -> Option<&Bus> {
        self.buses.get(position)
    }

    /// Returns the bus at the given position for modification of its
    /// enrichment fields.
    pub fn bus_mut(&mut self, position: usize) -> Option<&mut Bus> {
        self.buses.get_mut(position)
    }

    pub fn generator(&self, position: usize) -> Option<&Generator> {
        self.generators.get(position)
    }

    pub fn generator_mut(&mut self, position: usize) -> Option<&mut Generator> {
        self.generators.get_mut(position)
    }

    pub fn load(&self, position: usize) -> Option<&Load> {
        self.loads.get(position)
    }

    pub fn load_mut(&mut self, position: usize) -> Option<&mut Load> {
        self.loads.get_mut(position)
    }

    pub fn branch(&self, position: usize) -> Option<&Branch> {
        self.branches.get(position)
    }

    pub fn branch_mut(&mut self, position: usize) -> Option<&mut Branch> {
        self.branches.get_mut(position)
    }

    /// Returns an iterator over the buses, in insertion order.
    pub fn buses(&self) -> std::slice::Iter<'_, Bus> {
        self.buses.iter()
    }

    /// Returns an iterator over the generators, in insertion order.
    pub fn generators(&self) -> std::slice::Iter<'_, Generator> {
        self.generators.iter()
    }

    /// Returns an iterator over the loads, in insertion order.
    pub fn loads(&self) -> std::slice::Iter<'_, Load> {
        self.loads.iter()
    }

    /// Returns an iterator over the branches, in insertion order.
    pub fn branches(&self) -> std::slice::Iter<'_, Branch> {
        self.branches.iter()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    pub fn load_count(&self) -> usize {
        self.loads.len()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

fn find_radial<'a, T: RadialElement>(
    items: &'a [T],
    attached: Option<&[usize]>,
    bus_id: &ElementId,
    local_id: &str,
) -> Option<(&'a T, usize)> {
    let local_id = normalize_local_id(local_id);
    let matches = |item: &T| item.bus_id() == bus_id && item.local_id() == local_id;

    if let Some(positions) = attached {
        let found = positions
            .iter()
            .filter_map(|&position| items.get(position).map(|item| (item, position)))
            .find(|(item, _)| matches(item));
        if found.is_some() {
            return found;
        }
    }

    items
        .iter()
        .enumerate()
        .find(|(_, item)| matches(item))
        .map(|(position, item)| (item, position))
}

fn scan_radial<'a, T: RadialElement>(items: &'a [T], bus_id: &ElementId) -> Vec<(&'a T, usize)> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.bus_id() == bus_id)
        .map(|(position, item)| (item, position))
        .collect()
}

fn collect_positions<'a, T>(items: &'a [T], positions: &[usize]) -> Vec<(&'a T, usize)> {
    positions
        .iter()
        .filter_map(|&position| items.get(position).map(|item| (item, position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_utils::ModelFixture;
    use crate::{Error, ModelConfig};

    fn fixture() -> ModelFixture {
        let mut fixture = ModelFixture::new();
        fixture
            .bus("N1")
            .bus("N2")
            .bus("N3")
            .bus(400)
            .line("N1", "N2", "L1")
            .line("N2", "N1", "L2")
            .transformer3("N1", "N2", "N3", "T1")
            .generator("N1", " G1 ")
            .generator("N2", "G2")
            .load("N1", "D1")
            .load("N1", "D2");
        fixture
    }

    #[test]
    fn test_find_bus_with_and_without_index() -> Result<(), Error> {
        for use_bus_index in [true, false] {
            let model = fixture().build(ModelConfig { use_bus_index })?;
            assert_eq!(model.is_indexed(), use_bus_index);

            let (bus, position) = model.find_bus("N2").ok_or(Error::internal("N2"))?;
            assert_eq!(bus.id(), &ElementId::parse("N2"));
            assert_eq!(position, 1);

            assert_eq!(model.find_bus("400").map(|(_, p)| p), Some(3));
            assert_eq!(model.find_bus(400).map(|(_, p)| p), Some(3));
            assert!(model.find_bus("N9").is_none());
        }
        Ok(())
    }

    #[test]
    fn test_indexed_find_bus_is_map_only() -> Result<(), Error> {
        let mut model = fixture().build(ModelConfig::default())?;
        assert_eq!(model.bus_index.as_ref().map(|index| index.len()), Some(4));

        if let Some(index) = model.bus_index.as_mut() {
            index.remove(&ElementId::parse("N3"));
        }
        assert!(model.find_bus("N3").is_none());
        assert_eq!(model.find_bus("N2").map(|(_, p)| p), Some(1));

        model.enable_bus_index();
        assert_eq!(model.find_bus("N3").map(|(_, p)| p), Some(2));
        Ok(())
    }

    #[test]
    fn test_mixed_indexing() -> Result<(), Error> {
        let mut model = fixture().build(ModelConfig {
            use_bus_index: false,
        })?;
        model.enable_bus_index();
        model.add_bus(Bus::new("N4"))?;
        model.add_load(Load::new("N4", "D4"))?;

        for id in ["N1", "N2", "N3", "N4"] {
            assert!(model.find_bus(id).is_some());
        }
        assert_eq!(model.find_load("N1", "D2").map(|(_, p)| p), Some(1));
        assert_eq!(model.find_load("N4", "D4").map(|(_, p)| p), Some(2));
        assert_eq!(model.get_all_loads_on_bus("N1").len(), 2);
        Ok(())
    }

    #[test]
    fn test_find_branch() -> Result<(), Error> {
        for use_bus_index in [true, false] {
            let model = fixture().build(ModelConfig { use_bus_index })?;

            assert_eq!(
                model.find_branch("N1", "N2", None, "L1", false).map(|(_, p)| p),
                Some(0)
            );
            assert_eq!(
                model.find_branch("N1", "N2", None, " L1 ", true).map(|(_, p)| p),
                Some(0)
            );

            // L2 is stored as (N2, N1).
            assert!(model.find_branch("N1", "N2", None, "L2", false).is_none());
            assert_eq!(
                model.find_branch("N1", "N2", None, "L2", true).map(|(_, p)| p),
                Some(1)
            );

            // T1 is stored as (N1, N2, N3).
            let t1 = Some(ElementId::parse("N1"));
            assert!(model.find_branch("N3", "N2", t1.clone(), "T1", false).is_none());
            assert_eq!(
                model.find_branch("N3", "N2", t1, "T1", true).map(|(_, p)| p),
                Some(2)
            );

            assert!(model.find_branch("N1", "N3", None, "L1", true).is_none());
        }
        Ok(())
    }

    #[test]
    fn test_find_radial() -> Result<(), Error> {
        for use_bus_index in [true, false] {
            let model = fixture().build(ModelConfig { use_bus_index })?;

            let (gen, position) = model
                .find_generator("N1", "G1")
                .ok_or(Error::internal("G1"))?;
            assert_eq!(gen.id(), "G1");
            assert_eq!(position, 0);

            assert_eq!(model.find_generator("N2", " G2").map(|(_, p)| p), Some(1));
            assert!(model.find_generator("N1", "G2").is_none());
            assert!(model.find_generator("N9", "G1").is_none());

            assert_eq!(model.find_load("N1", "D2").map(|(_, p)| p), Some(1));
            assert!(model.find_load("N2", "D2").is_none());
        }
        Ok(())
    }

    #[test]
    fn test_get_all_on_bus() -> Result<(), Error> {
        for use_bus_index in [true, false] {
            let model = fixture().build(ModelConfig { use_bus_index })?;

            let loads: Vec<_> = model
                .get_all_loads_on_bus("N1")
                .into_iter()
                .map(|(load, _)| load.id())
                .collect();
            assert_eq!(loads, vec!["D1", "D2"]);

            assert_eq!(model.get_all_generators_on_bus("N2").len(), 1);
            assert!(model.get_all_generators_on_bus("N3").is_empty());

            let branches: Vec<_> = model
                .get_all_branches_on_bus("N3")
                .into_iter()
                .map(|(_, p)| p)
                .collect();
            assert_eq!(branches, vec![2]);
            assert_eq!(model.get_all_branches_on_bus("N1").len(), 3);
            assert!(model.get_all_branches_on_bus(400).is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_bus_of() -> Result<(), Error> {
        let model = fixture().build(ModelConfig::default())?;
        let gen = model.generator(1).ok_or(Error::internal("G2"))?;
        assert_eq!(model.bus_of(gen).map(|b| b.id().to_string()), Some("N2".into()));
        assert_eq!(model.generators().count(), 2);
        assert_eq!(model.buses().count(), 4);
        Ok(())
    }
}
