// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Connectivity of the buses of a [`DataModelManager`].

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::component::{BranchEnd, Component};
use crate::DataModelManager;

/// An undirected graph over the in-service buses of a model, connected by the
/// in-service branches between them.
///
/// Node weights are bus positions and edge weights are branch positions.
pub struct Topology {
    graph: UnGraph<usize, usize>,
    node_indices: HashMap<usize, NodeIndex>,
}

impl DataModelManager {
    /// Builds the connectivity graph of the model.
    ///
    /// Buses that are switched off or flagged as disconnected are left out,
    /// as are branches that are switched off or touch a left-out bus.  The
    /// ends of a three-terminal branch are connected pairwise.
    pub fn topology(&self) -> Topology {
        let mut graph = UnGraph::default();
        let mut node_indices = HashMap::new();

        for (position, bus) in self.buses.iter().enumerate() {
            if bus.is_on() && !bus.disconnected {
                node_indices.insert(position, graph.add_node(position));
            }
        }

        for (position, branch) in self.branches.iter().enumerate() {
            if !branch.is_on() {
                continue;
            }
            let mut ends = vec![BranchEnd::One, BranchEnd::Two];
            if branch.has_third_bus() {
                ends.push(BranchEnd::Three);
            }
            let Some(nodes) = ends
                .into_iter()
                .map(|end| {
                    branch
                        .bus_position(end)
                        .and_then(|bus| node_indices.get(&bus).copied())
                })
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            for (i, a) in nodes.iter().enumerate() {
                for b in &nodes[i + 1..] {
                    if a != b {
                        graph.add_edge(*a, *b, position);
                    }
                }
            }
        }

        Topology {
            graph,
            node_indices,
        }
    }
}

impl Topology {
    /// Returns the groups of mutually reachable buses, as bus positions.
    ///
    /// Each group is sorted, and the groups are sorted by their first bus.
    pub fn islands(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.graph.node_count()];
        let mut islands = Vec::new();

        for start in self.graph.node_indices() {
            if visited[start.index()] {
                continue;
            }
            let mut island = Vec::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(index) = bfs.next(&self.graph) {
                visited[index.index()] = true;
                island.push(self.graph[index]);
            }
            island.sort_unstable();
            islands.push(island);
        }

        islands.sort();
        islands
    }

    /// Returns the positions of the in-service buses without any in-service
    /// branch, in ascending order.
    pub fn isolated_buses(&self) -> Vec<usize> {
        let mut isolated: Vec<usize> = self
            .graph
            .node_indices()
            .filter(|&index| self.graph.neighbors(index).next().is_none())
            .map(|index| self.graph[index])
            .collect();
        isolated.sort_unstable();
        isolated
    }

    /// Returns the positions of the buses directly connected to the bus at
    /// the given position.
    pub fn neighbors(&self, bus: usize) -> Vec<usize> {
        let Some(&index) = self.node_indices.get(&bus) else {
            return Vec::new();
        };
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(index)
            .map(|n| self.graph[n])
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Returns the number of buses in the graph.
    pub fn bus_count(&self) -> usize {
        self.graph.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_utils::ModelFixture;
    use crate::{Error, ModelConfig};

    fn fixture() -> ModelFixture {
        let mut fixture = ModelFixture::new();
        fixture
            .bus(1)
            .bus(2)
            .bus(3)
            .bus(4)
            .bus(5)
            .bus(6)
            .line(1, 2, "L1")
            .line(2, 1, "L2")
            .transformer3(3, 4, 5, "T1");
        fixture
    }

    #[test]
    fn test_islands() -> Result<(), Error> {
        let model = fixture().build(ModelConfig::default())?;
        let topology = model.topology();

        assert_eq!(topology.bus_count(), 6);
        assert_eq!(topology.islands(), vec![vec![0, 1], vec![2, 3, 4], vec![5]]);
        assert_eq!(topology.isolated_buses(), vec![5]);
        assert_eq!(topology.neighbors(0), vec![1]);
        assert_eq!(topology.neighbors(3), vec![2, 4]);
        Ok(())
    }

    #[test]
    fn test_out_of_service() -> Result<(), Error> {
        let mut model = fixture().build(ModelConfig::default())?;
        if let Some(bus) = model.bus_mut(3) {
            bus.switch_off();
        }
        if let Some(line) = model.branch_mut(0) {
            line.switch_off();
        }
        let topology = model.topology();

        // L2 still connects 1 and 2; T1 is dropped with bus 4.
        assert_eq!(topology.islands(), vec![vec![0, 1], vec![2], vec![4], vec![5]]);
        assert_eq!(topology.isolated_buses(), vec![2, 4, 5]);
        assert!(topology.neighbors(3).is_empty());
        Ok(())
    }
}
