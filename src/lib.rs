// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Network Data Model

This is a library for holding a transmission network description (buses,
generators, loads and branches) in memory, independent of any power-system
simulation engine, and for feeding it from validated source workbooks.

## The data model

The main struct is [`DataModelManager`], which keeps one ordered collection
per entity kind and resolves the relationships between them: every
generator, load and branch refers to its buses by identifier, and the manager
caches the positions of those buses when the element is inserted.

Buses must be inserted first.  Entities are created and attached to their
buses with the [`ComponentFactory`]:

- [`add_bus`][DataModelManager::add_bus]
- [`create_and_associate_generator`][ComponentFactory::create_and_associate_generator]
- [`create_and_associate_load`][ComponentFactory::create_and_associate_load]
- [`create_and_associate_branch`][ComponentFactory::create_and_associate_branch]

Lookups such as [`find_bus`][DataModelManager::find_bus] and
[`find_branch`][DataModelManager::find_branch] use an identifier index when
[`ModelConfig::use_bus_index`] is set, and a linear scan otherwise.

## Engines

The library doesn't talk to any simulation engine itself.  An engine is
plugged in by implementing [`EngineAdapter`], after which every entity can
push its status and values to the engine, and pull them back, through the
[`Component`] trait.

## Sources

Source workbooks are read by a [`SourceReader`] and checked by a
[`SourceValidator`] in five stages: structure, data quality, business rules,
electrical parameters and cross-sheet references.  Findings are reported as
[`Diagnostic`]s with a [`Severity`], and a workbook is valid if none of them
is an `ERROR` or `CRITICAL`.

The [`NetworkDataManager`] keeps a reader and a validator per source type,
and translates source tables onto canonical table and column names.  The
[`ModelBuilder`] then loads the canonical tables into a
[`DataModelManager`].
*/

mod builder;
pub use builder::{BuildReport, ModelBuilder};

mod component;
pub use component::{
    Branch, BranchEnd, Bus, Component, ComponentKind, ComponentState, Generator, Load,
    RadialElement,
};

mod config;
pub use config::{ModelConfig, ValidatorConfig};

mod diagnostics;
pub use diagnostics::{Diagnostic, Severity, ValidationResult};

mod engine;
pub use engine::{EngineAdapter, EntityMut, EntityRef};

mod error;
pub use error::{Error, ErrorKind};

mod factory;
pub use factory::ComponentFactory;

mod identifier;
pub use identifier::ElementId;

mod model;
pub use model::{DataModelManager, SyncReport, Topology};

mod network_data_manager;
pub use network_data_manager::{NetworkDataManager, SourceInfo};

mod source;
pub use source::{
    canonical_table_name, standardize_etys, Coordinates, DiagramBounds, EtysReader,
    EtysValidator, ReaderInfo, SourceReader, SourceRequest, SourceSchema, SourceValidator,
    ValidatorInfo, ETYS_TABLE_NAMES,
};

mod table;
pub use table::{Cell, Table, TableSet};
