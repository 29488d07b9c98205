// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the `ComponentFactory`, which constructs entities and
//! resolves their references to buses in a [`DataModelManager`].

use crate::component::{Branch, BranchEnd, Bus, Generator, Load, RadialElement};
use crate::{DataModelManager, ElementId, Error};

/// Constructs entities and resolves their bus references.
///
/// Construction never fails.  Association looks up the referenced buses in a
/// model and caches their positions and names on the entity, and fails with
/// a `BusNotFound` error when a mandatory bus is missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentFactory;

impl ComponentFactory {
    pub fn create_bus(&self, id: impl Into<ElementId>) -> Bus {
        Bus::new(id)
    }

    pub fn create_generator(&self, bus_id: impl Into<ElementId>, gen_id: &str) -> Generator {
        Generator::new(bus_id, gen_id)
    }

    pub fn create_load(&self, bus_id: impl Into<ElementId>, load_id: &str) -> Load {
        Load::new(bus_id, load_id)
    }

    pub fn create_branch(
        &self,
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        bus3: Option<ElementId>,
        branch_id: &str,
    ) -> Branch {
        Branch::new(bus1, bus2, bus3, branch_id)
    }

    /// Resolves the bus of a generator or load and caches it on the element.
    pub fn associate_radial_with_bus(
        &self,
        model: &DataModelManager,
        element: &mut impl RadialElement,
    ) -> Result<(), Error> {
        let position = model.resolve_bus(element.bus_id())?;
        let name = model.bus(position).map(|b| b.name.as_str()).unwrap_or_default();
        element.attach_to_bus(position, name);
        Ok(())
    }

    /// Resolves the end buses of a branch and caches them on the branch.
    ///
    /// `bus1` and `bus2` are mandatory.  The third bus is resolved only for
    /// three-terminal branches, and a third bus that doesn't resolve is an
    /// error as well.  On failure the branch is left unchanged.
    pub fn associate_branch_with_bus(
        &self,
        model: &DataModelManager,
        branch: &mut Branch,
    ) -> Result<(), Error> {
        let mut ends = vec![BranchEnd::One, BranchEnd::Two];
        if branch.has_third_bus() {
            ends.push(BranchEnd::Three);
        }

        let mut resolved = Vec::with_capacity(ends.len());
        for end in ends {
            resolved.push((end, model.resolve_bus(branch.bus_id(end))?));
        }
        for (end, position) in resolved {
            let name = model.bus(position).map(|b| b.name.as_str()).unwrap_or_default();
            branch.attach_end(end, position, name);
        }
        Ok(())
    }

    /// Creates a generator, resolves its bus and adds it to the model.
    /// Returns the generator's position.
    pub fn create_and_associate_generator(
        &self,
        model: &mut DataModelManager,
        bus_id: impl Into<ElementId>,
        gen_id: &str,
        configure: impl FnOnce(&mut Generator),
    ) -> Result<usize, Error> {
        let mut generator = self.create_generator(bus_id, gen_id);
        self.associate_radial_with_bus(model, &mut generator)?;
        configure(&mut generator);
        model.add_generator(generator)
    }

    /// Creates a load, resolves its bus and adds it to the model.  Returns the
    /// load's position.
    pub fn create_and_associate_load(
        &self,
        model: &mut DataModelManager,
        bus_id: impl Into<ElementId>,
        load_id: &str,
        configure: impl FnOnce(&mut Load),
    ) -> Result<usize, Error> {
        let mut load = self.create_load(bus_id, load_id);
        self.associate_radial_with_bus(model, &mut load)?;
        configure(&mut load);
        model.add_load(load)
    }

    /// Creates a branch, resolves its end buses and adds it to the model.
    /// Returns the branch's position.
    pub fn create_and_associate_branch(
        &self,
        model: &mut DataModelManager,
        bus1: impl Into<ElementId>,
        bus2: impl Into<ElementId>,
        bus3: Option<ElementId>,
        branch_id: &str,
        configure: impl FnOnce(&mut Branch),
    ) -> Result<usize, Error> {
        let mut branch = self.create_branch(bus1, bus2, bus3, branch_id);
        self.associate_branch_with_bus(model, &mut branch)?;
        configure(&mut branch);
        model.add_branch(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::model::test_utils::ModelFixture;
    use crate::ModelConfig;

    fn model() -> Result<DataModelManager, Error> {
        let mut fixture = ModelFixture::new();
        fixture.bus("N1").bus("N2").bus("N3");
        fixture.build(ModelConfig::default())
    }

    #[test]
    fn test_associate_radial() -> Result<(), Error> {
        let model = model()?;
        let factory = ComponentFactory;

        let mut gen = factory.create_generator("N2", " G1 ");
        factory.associate_radial_with_bus(&model, &mut gen)?;
        assert_eq!(gen.bus_position(), Some(1));
        assert_eq!(gen.bus_name(), "N2");
        assert_eq!(model.bus_of(&gen).map(|b| b.id()), Some(&ElementId::parse("N2")));

        let mut load = factory.create_load("N9", "D1");
        assert!(factory
            .associate_radial_with_bus(&model, &mut load)
            .is_err_and(|e| e == Error::bus_not_found("Bus with ID N9 not found in data model.")));
        assert_eq!(load.bus_position(), None);

        Ok(())
    }

    #[test]
    fn test_associate_branch() -> Result<(), Error> {
        let model = model()?;
        let factory = ComponentFactory;

        let mut line = factory.create_branch("N1", "N2", None, "L1");
        factory.associate_branch_with_bus(&model, &mut line)?;
        assert_eq!(line.bus_position(BranchEnd::One), Some(0));
        assert_eq!(line.bus_position(BranchEnd::Two), Some(1));
        assert_eq!(line.bus_position(BranchEnd::Three), None);
        assert_eq!(line.bus_name(BranchEnd::Two), "N2");

        let mut t3 = factory.create_branch("N1", "N2", Some("N3".into()), "T1");
        factory.associate_branch_with_bus(&model, &mut t3)?;
        assert_eq!(t3.bus_position(BranchEnd::Three), Some(2));

        let mut broken = factory.create_branch("N1", "N9", None, "L2");
        assert!(factory
            .associate_branch_with_bus(&model, &mut broken)
            .is_err_and(|e| e.kind() == crate::ErrorKind::BusNotFound));
        assert_eq!(broken.bus_position(BranchEnd::One), None);

        Ok(())
    }

    #[test]
    fn test_create_and_associate() -> Result<(), Error> {
        let mut model = model()?;
        let factory = ComponentFactory;

        let position = factory.create_and_associate_branch(
            &mut model,
            "N2",
            "N1",
            None,
            "L1",
            |b| b.rating_a = 500.0,
        )?;
        assert_eq!(
            model.find_branch("N1", "N2", None, "L1", true).map(|(b, p)| (b.rating_a, p)),
            Some((500.0, position))
        );

        factory.create_and_associate_generator(&mut model, "N1", "G1", |g| g.mw = 12.5)?;
        let (gen, _) = model
            .find_generator("N1", "G1")
            .ok_or(Error::internal("G1"))?;
        assert_eq!(gen.mw, 12.5);
        assert!(gen.is_on());

        assert!(factory
            .create_and_associate_load(&mut model, "N7", "D1", |_| {})
            .is_err());
        assert_eq!(model.load_count(), 0);

        Ok(())
    }
}
