// RouteSim: Distance-Vector and Link-State Routing Simulation
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Topology
//!
//! The weighted graph of nodes and directed links. The topology owns the node identifiers: they
//! are indices into a [`StableGraph`](petgraph::stable_graph::StableGraph), which stay valid when
//! other nodes are removed, and which are recycled once their node is gone.

use crate::netsim::types::{LinkChange, LinkUpdate, TopologyGraph};
use crate::netsim::{LinkCost, NetworkError, NodeId, NodeLabel, INFINITE_COST};

use log::*;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// # Topology
/// Nodes and directed links with their cost. Undirected links are represented as two
/// complementary directed links, which are added (and removed) independently.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: TopologyGraph,
    labels: BTreeMap<NodeLabel, NodeId>,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self { graph: TopologyGraph::default(), labels: BTreeMap::new() }
    }

    /// Add a node with the given label, and return its identifier. If the label is already mapped,
    /// nothing changes and the existing identifier is returned.
    pub fn add_node(&mut self, label: NodeLabel) -> NodeId {
        if let Some(id) = self.labels.get(&label) {
            return *id;
        }
        let id = self.graph.add_node(label);
        trace!("add node {} as {:?}", label, id);
        self.labels.insert(label, id);
        id
    }

    /// Remove the node with the given label, together with all links from and to it. Its
    /// identifier becomes free and is handed out again by a later [`Topology::add_node`]. Returns
    /// the removed identifier and all former neighbors, or `None` if the label is not mapped.
    pub fn remove_node(&mut self, label: NodeLabel) -> Option<(NodeId, Vec<NodeId>)> {
        let id = self.labels.remove(&label)?;
        let mut neighbors: Vec<NodeId> = self.graph.neighbors_undirected(id).collect();
        neighbors.sort();
        neighbors.dedup();
        self.graph.remove_node(id);
        debug!("removed node {} ({:?}), former neighbors: {:?}", label, id, neighbors);
        Some((id, neighbors))
    }

    /// Add, update or remove the directed link from `source` to `target`. Both nodes are created if
    /// they don't exist yet.
    ///
    /// - No link exists and `cost` is non-negative: the link is created.
    /// - The link exists and `cost` is non-negative: its cost is rewritten.
    /// - The link exists and `cost` is negative: the link is removed.
    /// - No link exists and `cost` is negative: nothing happens.
    ///
    /// Costs at or above [`INFINITE_COST`] are stored as `INFINITE_COST`. Links from a node to
    /// itself are ignored.
    pub fn add_or_update_link(
        &mut self,
        source: NodeLabel,
        target: NodeLabel,
        cost: i64,
    ) -> LinkUpdate {
        let source = self.add_node(source);
        let target = self.add_node(target);
        let change = if source == target {
            LinkChange::Ignored
        } else {
            match (self.graph.find_edge(source, target), cost_from_raw(cost)) {
                (None, Some(cost)) => {
                    self.graph.add_edge(source, target, cost);
                    LinkChange::Added(cost)
                }
                (None, None) => LinkChange::Ignored,
                (Some(edge), Some(cost)) => {
                    let old = self.graph[edge];
                    self.graph[edge] = cost;
                    LinkChange::Updated { old, new: cost }
                }
                (Some(edge), None) => {
                    let old = self.graph[edge];
                    self.graph.remove_edge(edge);
                    LinkChange::Removed(old)
                }
            }
        };
        trace!("link {:?} -> {:?}: {:?}", source, target, change);
        LinkUpdate { source, target, change }
    }

    /// Returns true if the directed link from `source` to `target` exists.
    pub fn has_link(&self, source: NodeLabel, target: NodeLabel) -> bool {
        match (self.labels.get(&source), self.labels.get(&target)) {
            (Some(s), Some(t)) => self.graph.contains_edge(*s, *t),
            _ => false,
        }
    }

    /// Returns the number of nodes in the topology
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Returns the cost of the directed link from `source` to `target`, if it exists.
    pub fn link_cost(&self, source: NodeId, target: NodeId) -> Option<LinkCost> {
        self.graph.find_edge(source, target).map(|e| self.graph[e])
    }

    /// Returns all direct neighbors of the node, together with the cost of the link towards them,
    /// sorted by their identifier.
    pub fn neighbors(&self, node: NodeId) -> Vec<(NodeId, LinkCost)> {
        if !self.graph.contains_node(node) {
            return Vec::new();
        }
        let mut result: Vec<(NodeId, LinkCost)> =
            self.graph.edges(node).map(|e| (e.target(), *e.weight())).collect();
        result.sort();
        result
    }

    /// Get the identifier of the node with the given label.
    pub fn node_id(&self, label: NodeLabel) -> Result<NodeId, NetworkError> {
        self.labels.get(&label).copied().ok_or(NetworkError::UnknownNode(label))
    }

    /// Get the label of the node with the given identifier.
    pub fn label(&self, id: NodeId) -> Result<NodeLabel, NetworkError> {
        self.graph.node_weight(id).copied().ok_or(NetworkError::NodeNotFound(id))
    }

    /// Returns all nodes, sorted by their label.
    pub fn nodes_by_label(&self) -> impl Iterator<Item = (NodeLabel, NodeId)> + '_ {
        self.labels.iter().map(|(l, id)| (*l, *id))
    }

    /// Returns the identifiers of all nodes, sorted by identifier.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.graph.node_indices().collect();
        ids.sort();
        ids
    }

    /// Returns a reference to the underlying graph (PetGraph struct)
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }
}

/// Negative costs denote removal, and are mapped to `None`.
fn cost_from_raw(cost: i64) -> Option<LinkCost> {
    if cost < 0 {
        None
    } else if cost >= INFINITE_COST as i64 {
        Some(INFINITE_COST)
    } else {
        Some(cost as LinkCost)
    }
}
