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

//! # Link-State Routing
//!
//! Centralized computation on the full topology: Dijkstra from every node
//! ([`compute_from_source`]), followed by the derivation of the first hop on every shortest path
//! ([`derive_next_hops`]). Any change of the topology invalidates all tables, which are then
//! recomputed from scratch.

use crate::netsim::protocol::{Convergence, RoutingProtocol};
use crate::netsim::topology::Topology;
use crate::netsim::types::LinkUpdate;
use crate::netsim::{Distance, NodeId, RouteEntry, RoutingTable};

use log::*;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Result of a single run of Dijkstra's algorithm. It is never modified after the search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    source: NodeId,
    /// Shortest distance from the source, `Distance::Unreachable` if the node was not reached.
    distances: HashMap<NodeId, Distance>,
    /// Predecessor on the shortest path from the source. Missing for the source and for nodes
    /// that were not reached.
    predecessors: HashMap<NodeId, NodeId>,
    /// Nodes in the order in which they were extracted from the queue
    visited: Vec<NodeId>,
}

impl SearchResult {
    /// Returns the source of the search
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the shortest distance from the source to the node.
    pub fn distance(&self, node: NodeId) -> Distance {
        self.distances.get(&node).copied().unwrap_or(Distance::Unreachable)
    }

    /// Returns the predecessor of the node on the shortest path from the source.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(&node).copied()
    }

    /// Returns all reached nodes, in the order in which the search visited them.
    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }
}

/// Run Dijkstra's algorithm from `source` over the topology. Ties are broken by the node
/// identifier, which makes the result deterministic.
pub fn compute_from_source(topology: &Topology, source: NodeId) -> SearchResult {
    let mut distances: HashMap<NodeId, Distance> =
        topology.node_ids().into_iter().map(|n| (n, Distance::Unreachable)).collect();
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited_set: HashSet<NodeId> = HashSet::new();
    let mut visited: Vec<NodeId> = Vec::new();
    let mut queue: BinaryHeap<Reverse<(Distance, NodeId)>> = BinaryHeap::new();

    distances.insert(source, Distance::Finite(0));
    queue.push(Reverse((Distance::Finite(0), source)));

    while let Some(Reverse((current_distance, current))) = queue.pop() {
        // outdated queue entry
        if !visited_set.insert(current) {
            continue;
        }
        visited.push(current);
        for (neighbor, cost) in topology.neighbors(current) {
            let candidate = current_distance + Distance::from_cost(cost);
            let known = distances.get(&neighbor).copied().unwrap_or(Distance::Unreachable);
            if candidate < known {
                distances.insert(neighbor, candidate);
                predecessors.insert(neighbor, current);
                queue.push(Reverse((candidate, neighbor)));
            }
        }
    }

    SearchResult { source, distances, predecessors, visited }
}

/// Derive the routing table of the source from the search result. For every reached destination,
/// the predecessor chain is followed back to the node right after the source, which is the next
/// hop. Destinations that were not reached have no entry.
pub fn derive_next_hops(search: &SearchResult) -> RoutingTable {
    let mut table = RoutingTable::new();
    table.insert(search.source, RouteEntry::local(search.source));
    'dest: for dest in search.visited.iter().copied() {
        if dest == search.source {
            continue;
        }
        let mut hop = dest;
        let next_hop = loop {
            match search.predecessors.get(&hop) {
                Some(pred) if *pred == search.source => break hop,
                Some(pred) => hop = *pred,
                None => continue 'dest,
            }
        };
        table.insert(dest, RouteEntry { distance: search.distance(dest), next_hop });
    }
    table
}

/// # Link-State Protocol
/// Holds one routing table per source node. After any change of the topology, all tables are
/// invalid (and not returned) until the next convergence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkState {
    tables: HashMap<NodeId, RoutingTable>,
    stale: bool,
}

impl LinkState {
    /// Create the protocol without any table.
    pub fn new() -> Self {
        Self { tables: HashMap::new(), stale: false }
    }

    /// Mark all tables as invalid. They are recomputed on the next convergence.
    fn invalidate(&mut self) {
        if !self.stale {
            trace!("link-state tables invalidated");
            self.stale = true;
        }
    }
}

impl RoutingProtocol for LinkState {
    fn name(&self) -> &'static str {
        "link-state"
    }

    fn node_added(&mut self, _node: NodeId) {
        self.invalidate();
    }

    fn node_removed(&mut self, _node: NodeId) {
        self.invalidate();
    }

    fn link_changed(&mut self, _update: &LinkUpdate) {
        self.invalidate();
    }

    fn converge(&mut self, topology: &Topology) -> Convergence {
        let old_tables = std::mem::take(&mut self.tables);
        let mut changes = 0;
        for source in topology.node_ids() {
            let table = derive_next_hops(&compute_from_source(topology, source));
            if old_tables.get(&source) != Some(&table) {
                changes += 1;
            }
            self.tables.insert(source, table);
        }
        self.stale = false;
        debug!(
            "link-state tables recomputed for {} nodes ({} changed)",
            self.tables.len(),
            changes
        );
        Convergence { rounds: 1, changes }
    }

    fn routing_table(&self, node: NodeId) -> Option<&RoutingTable> {
        if self.stale {
            None
        } else {
            self.tables.get(&node)
        }
    }
}
