// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the `ModelBuilder`, which loads standardized tables
//! into a [`DataModelManager`].

use serde::Serialize;
use tracing::{error, info};

use crate::component::Bus;
use crate::table::{Table, TableSet};
use crate::{ComponentFactory, DataModelManager, ElementId, Error, ModelConfig};

/// Branch tables, in loading order.
const BRANCH_TABLES: [&str; 10] = [
    "overhead_lines",
    "cables",
    "composite_lines",
    "zero_length_lines",
    "transformers",
    "quadboosters",
    "series_compensation",
    "sssc_devices",
    "series_reactors",
    "series_capacitors",
];

const LINE_TABLES: [&str; 4] = ["overhead_lines", "cables", "composite_lines", "zero_length_lines"];

/// Shunt tables loaded as reactive-only loads.
const SHUNT_LOAD_TABLES: [&str; 2] = ["shunt_reactors", "switched_capacitors"];

/// Shunt tables loaded as zero-output generators.
const DYNAMIC_TABLES: [&str; 2] = ["svc_devices", "statcom_devices"];

const GENERATOR_TABLES: [&str; 3] = ["tec_generators", "interconnectors", "sync_compensators"];

/// The number of entities a [`ModelBuilder`] added, per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub buses: usize,
    pub branches: usize,
    pub generators: usize,
    pub loads: usize,
    /// Rows that were rejected by the model, because their buses didn't
    /// resolve or their bus was a duplicate.
    pub skipped: usize,
}

/// Loads standardized tables into a [`DataModelManager`].
///
/// Tables are loaded in dependency order: nodes first, then branches, loads,
/// shunt devices, generators and HVDC links.  Rows without node references
/// are ignored, and rows the model rejects are skipped and counted, so a
/// single bad row doesn't stop the rest of the tables from loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModelBuilder {
    factory: ComponentFactory,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a new model from the tables.
    pub fn build(
        &self,
        tables: &TableSet,
        config: ModelConfig,
    ) -> Result<(DataModelManager, BuildReport), Error> {
        let mut model = DataModelManager::with_config(config);
        let report = self.load_into(&mut model, tables)?;
        Ok((model, report))
    }

    /// Adds the entities described by the tables to `model`.
    ///
    /// Fails if there is no `nodes` table, because nothing else could be
    /// attached without it.
    pub fn load_into(
        &self,
        model: &mut DataModelManager,
        tables: &TableSet,
    ) -> Result<BuildReport, Error> {
        let nodes = tables
            .get("nodes")
            .ok_or_else(|| Error::invalid_table("Table 'nodes' not found."))?;

        let mut report = BuildReport::default();
        self.load_nodes(model, nodes, &mut report);
        for name in BRANCH_TABLES {
            if let Some(table) = tables.get(name) {
                self.load_branches(model, table, name, &mut report);
            }
        }
        if let Some(table) = tables.get("loads") {
            self.load_loads(model, table, &mut report);
        }
        for name in SHUNT_LOAD_TABLES.into_iter().chain(DYNAMIC_TABLES) {
            if let Some(table) = tables.get(name) {
                self.load_shunts(model, table, name, &mut report);
            }
        }
        for name in GENERATOR_TABLES {
            if let Some(table) = tables.get(name) {
                self.load_generators(model, table, name, &mut report);
            }
        }
        if let Some(table) = tables.get("hvdc_links") {
            self.load_hvdc_links(model, table, &mut report);
        }

        info!(
            "Loaded {} buses, {} branches, {} generators and {} loads; skipped {} rows.",
            report.buses, report.branches, report.generators, report.loads, report.skipped
        );
        Ok(report)
    }
}

/// Per-table loaders.
impl ModelBuilder {
    fn load_nodes(&self, model: &mut DataModelManager, table: &Table, report: &mut BuildReport) {
        let mut added = 0;
        for row in 0..table.len() {
            let Some(node) = text(table, row, &["node_id", "Node"]) else {
                continue;
            };
            let mut bus: Bus = self.factory.create_bus(ElementId::parse(&node));
            bus.name = text(table, row, &["Site Name"]).unwrap_or_else(|| node.clone());
            bus.kv = number(table, row, &["voltage_kv", "Voltage (Derived)"]);
            bus.bus_type = text(table, row, &["Type"]).unwrap_or_default();
            bus.area = text(table, row, &["Major Flop Zone"]).unwrap_or_default();
            bus.owner = text(table, row, &["Relevant TO"]).unwrap_or_default();
            bus.disconnected = false;
            if model.add_bus(bus).is_ok() {
                added += 1;
            } else {
                report.skipped += 1;
            }
        }
        report.buses += added;
        info!("Loaded {added} nodes into the data model.");
    }

    fn load_branches(
        &self,
        model: &mut DataModelManager,
        table: &Table,
        name: &str,
        report: &mut BuildReport,
    ) {
        let mut added = 0;
        for row in 0..table.len() {
            let (Some(node1), Some(node2)) = (
                text(table, row, &["node_1", "Node 1"]),
                text(table, row, &["node_2", "Node 2"]),
            ) else {
                continue;
            };
            let id = format!("{node1}_{node2}_{name}");
            let result = self.factory.create_and_associate_branch(
                model,
                node1,
                node2,
                None,
                &id,
                |branch| {
                    branch.name = text(table, row, &["Name"]).unwrap_or_else(|| id.clone());
                    branch.rating_a = number(table, row, &["Winter Rating (MVA)"]);
                    branch.rating_b = number(table, row, &["Summer Rating (MVA)"]);
                    branch.is_transformer = matches!(name, "transformers" | "quadboosters");
                    branch.is_line = LINE_TABLES.contains(&name);
                    branch.is_series_reactor = name == "series_reactors";
                },
            );
            tally(result, &mut added, report, name, &id);
        }
        report.branches += added;
        info!("Loaded {added} {name} into the data model.");
    }

    fn load_loads(&self, model: &mut DataModelManager, table: &Table, report: &mut BuildReport) {
        let mut added = 0;
        for row in 0..table.len() {
            let Some(node) = text(table, row, &["node_id", "ETYS_Node"]) else {
                continue;
            };
            let id = format!("Load_{node}_{}", model.load_count());
            let result = self.factory.create_and_associate_load(model, node, &id, |load| {
                load.name = text(table, row, &["Name"]).unwrap_or_else(|| id.clone());
                load.mw = number(table, row, &["MW"]);
                load.mvar = number(table, row, &["MVar"]);
            });
            tally(result, &mut added, report, "loads", &id);
        }
        report.loads += added;
        info!("Loaded {added} loads into the data model.");
    }

    fn load_shunts(
        &self,
        model: &mut DataModelManager,
        table: &Table,
        name: &str,
        report: &mut BuildReport,
    ) {
        let mut added = 0;
        let as_load = SHUNT_LOAD_TABLES.contains(&name);
        for row in 0..table.len() {
            let Some(node) = text(table, row, &["node_id", "Node"]) else {
                continue;
            };
            let (id, result) = if as_load {
                let id = format!("Shunt_{name}_{node}_{}", model.load_count());
                let result = self.factory.create_and_associate_load(model, node, &id, |load| {
                    load.name = text(table, row, &["Name"]).unwrap_or_else(|| id.clone());
                    load.mw = 0.0;
                    load.mvar = number(table, row, &["MVar"]);
                });
                (id, result)
            } else {
                let id = format!("DynComp_{name}_{node}_{}", model.generator_count());
                let result = self.factory.create_and_associate_generator(model, node, &id, |gen| {
                    gen.name = text(table, row, &["Name"]).unwrap_or_else(|| id.clone());
                    gen.mw = 0.0;
                    gen.mvar = 0.0;
                });
                (id, result)
            };
            tally(result, &mut added, report, name, &id);
        }
        if as_load {
            report.loads += added;
        } else {
            report.generators += added;
        }
        info!("Loaded {added} {name} into the data model.");
    }

    fn load_generators(
        &self,
        model: &mut DataModelManager,
        table: &Table,
        name: &str,
        report: &mut BuildReport,
    ) {
        let mut added = 0;
        for row in 0..table.len() {
            let Some(node) = text(table, row, &["node_id", "ETYS_Node"]) else {
                continue;
            };
            let id = format!("Gen_{node}_{name}_{}", model.generator_count());
            let result = self.factory.create_and_associate_generator(model, node, &id, |gen| {
                gen.name = text(table, row, &["Plant Name"]).unwrap_or_else(|| id.clone());
                let capacity = match name {
                    "tec_generators" => Some(number(table, row, &["MW_Capacity"])),
                    "interconnectors" => Some(number(table, row, &["MW_Import_Capacity"])),
                    _ => None,
                };
                if let Some(mw) = capacity {
                    gen.mw = mw;
                    gen.mw_capacity = mw;
                }
            });
            tally(result, &mut added, report, name, &id);
        }
        report.generators += added;
        info!("Loaded {added} {name} into the data model.");
    }

    fn load_hvdc_links(&self, model: &mut DataModelManager, table: &Table, report: &mut BuildReport) {
        let mut added = 0;
        for row in 0..table.len() {
            let (Some(node1), Some(node2)) = (
                text(table, row, &["node_1", "Node 1"]),
                text(table, row, &["node_2", "Node 2"]),
            ) else {
                continue;
            };
            let id = format!("HVDC_{node1}_{node2}");
            let result = self.factory.create_and_associate_branch(
                model,
                node1,
                node2,
                None,
                &id,
                |branch| {
                    branch.name = text(table, row, &["Name"]).unwrap_or_else(|| id.clone());
                    branch.is_hvdc = true;
                },
            );
            tally(result, &mut added, report, "hvdc_links", &id);
        }
        report.branches += added;
        info!("Loaded {added} HVDC links into the data model.");
    }
}

/// Counts an insertion result, logging rejected rows.
fn tally(
    result: Result<usize, Error>,
    added: &mut usize,
    report: &mut BuildReport,
    table: &str,
    id: &str,
) {
    match result {
        Ok(_) => *added += 1,
        Err(err) => {
            error!("Skipping {id} from {table}: {err}");
            report.skipped += 1;
        }
    }
}

/// Returns the trimmed text of the first of `columns` the table has, or
/// `None` if that cell is blank.
fn text(table: &Table, row: usize, columns: &[&str]) -> Option<String> {
    let column = columns.iter().find(|c| table.has_column(c))?;
    table
        .get(row, column)
        .filter(|cell| !cell.is_blank())
        .map(|cell| cell.as_str_or(""))
}

/// Returns the number in the first of `columns` the table has, or zero.
fn number(table: &Table, row: usize, columns: &[&str]) -> f64 {
    columns
        .iter()
        .find(|c| table.has_column(c))
        .and_then(|column| table.get(row, column))
        .map_or(0.0, |cell| cell.as_f64_or(0.0))
}
