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

//! # Distance-Vector Routing
//!
//! Every node keeps its own routing table, and the routing table last advertised by each of its
//! neighbors. Convergence is simulated as a sequence of synchronous passes: in every pass, each
//! node receives the current table of every direct neighbor and updates its own table with
//! [`DvNode::update_row`]. The simulation stops as soon as a full pass changes nothing.
//!
//! There is no bound on the number of passes. Distances saturate at
//! [`Distance::Unreachable`](crate::netsim::Distance), which bounds counting to infinity, but
//! pathological inputs may still take very long to converge.
//!
//! ## Link removal
//!
//! When a link is removed, or its cost increases, the node owning it deletes every entry routed
//! over that link. Relaxation cannot repair an entry that got too short: with zero-cost links, it
//! would keep a forwarding loop alive. Before the next relaxation, all nodes withdraw entries whose
//! next hop does not advertise the destination anymore (see [`DvNode::withdraw_stale`]), until no
//! more entries are withdrawn. The direct route over a more expensive link is learned again during
//! relaxation.
//! Without this step, two neighbors would keep re-learning the deleted route from each other.

use crate::netsim::protocol::{Convergence, RoutingProtocol};
use crate::netsim::topology::Topology;
use crate::netsim::types::{LinkChange, LinkUpdate};
use crate::netsim::{Distance, LinkCost, NodeId, RouteEntry, RoutingTable};

use log::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// # Distance-Vector Node
/// Routing state of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct DvNode {
    id: NodeId,
    /// Own routing table
    table: RoutingTable,
    /// Last table advertised by each neighbor
    advertised: HashMap<NodeId, RoutingTable>,
}

impl DvNode {
    /// Create a node which only knows the route to itself.
    pub fn new(id: NodeId) -> Self {
        let mut table = RoutingTable::new();
        table.insert(id, RouteEntry::local(id));
        Self { id, table, advertised: HashMap::new() }
    }

    /// Return the id of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Return the routing table of the node
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Return the last table advertised by the neighbor, if any was received.
    pub fn advertised_row(&self, neighbor: NodeId) -> Option<&RoutingTable> {
        self.advertised.get(&neighbor)
    }

    /// Offer the direct route towards a neighbor with the given link cost. It is installed if no
    /// route to the neighbor is known, if the known route already uses this link, or if the link is
    /// strictly shorter. Returns true if the table changed.
    pub(crate) fn offer_direct_route(&mut self, neighbor: NodeId, cost: LinkCost) -> bool {
        let direct = RouteEntry { distance: Distance::from_cost(cost), next_hop: neighbor };
        match self.table.entry(neighbor) {
            Entry::Vacant(e) => {
                e.insert(direct);
                true
            }
            Entry::Occupied(mut e) => {
                let current = e.get_mut();
                if *current != direct
                    && (current.next_hop == neighbor || direct.distance < current.distance)
                {
                    *current = direct;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// The link to the neighbor was removed. Delete the route to the neighbor, every route using
    /// the neighbor as next hop, and the table advertised by it.
    pub(crate) fn remove_neighbor(&mut self, neighbor: NodeId) {
        self.advertised.remove(&neighbor);
        self.table.remove(&neighbor);
        self.table.retain(|_, entry| entry.next_hop != neighbor);
    }

    /// The node was removed from the topology. Forget everything about it.
    pub(crate) fn forget_node(&mut self, node: NodeId) {
        self.remove_neighbor(node);
        for row in self.advertised.values_mut() {
            row.remove(&node);
        }
    }

    /// Update the own table with a table advertised by a direct neighbor, reached with a link of
    /// cost `link_cost`. For every destination in the advertised table, the first matching rule
    /// applies:
    ///
    /// 1. The destination is unknown: add it with next hop `neighbor`.
    /// 2. The current next hop is `neighbor`: refresh the distance, even if it gets worse.
    /// 3. The neighbor routes this destination through us: ignore it (poison reverse).
    /// 4. The route over `neighbor` is strictly shorter: switch to it.
    ///
    /// Returns true if any entry of the own table changed.
    pub fn update_row(
        &mut self,
        neighbor: NodeId,
        link_cost: LinkCost,
        neighbor_row: &RoutingTable,
    ) -> bool {
        let own_id = self.id;
        let link = Distance::from_cost(link_cost);
        let mut changed = false;
        for (dest, advertised) in neighbor_row.iter() {
            let candidate = link + advertised.distance;
            match self.table.entry(*dest) {
                Entry::Vacant(e) => {
                    e.insert(RouteEntry { distance: candidate, next_hop: neighbor });
                    changed = true;
                }
                Entry::Occupied(mut e) => {
                    let current = e.get_mut();
                    if current.next_hop == neighbor {
                        if current.distance != candidate {
                            current.distance = candidate;
                            changed = true;
                        }
                    } else if advertised.next_hop == own_id {
                        continue;
                    } else if candidate < current.distance {
                        *current = RouteEntry { distance: candidate, next_hop: neighbor };
                        changed = true;
                    }
                }
            }
        }
        self.advertised.insert(neighbor, neighbor_row.clone());
        changed
    }

    /// Delete every entry which uses `neighbor` as next hop, but for which `neighbor_row` contains
    /// no route anymore. Returns true if any entry was deleted.
    pub fn withdraw_stale(&mut self, neighbor: NodeId, neighbor_row: &RoutingTable) -> bool {
        let own_id = self.id;
        let before = self.table.len();
        self.table.retain(|dest, entry| {
            *dest == own_id || entry.next_hop != neighbor || neighbor_row.contains_key(dest)
        });
        before != self.table.len()
    }
}

/// # Distance-Vector Protocol
/// Routing state of all nodes in the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceVector {
    nodes: HashMap<NodeId, DvNode>,
}

impl DistanceVector {
    /// Create the protocol without any node.
    pub fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Returns the routing state of a single node.
    pub fn node(&self, id: NodeId) -> Option<&DvNode> {
        self.nodes.get(&id)
    }

    /// Run the withdrawal phase until no more entries are withdrawn. Returns the number of
    /// (node, neighbor) exchanges which withdrew at least one entry.
    fn withdraw_until_stable(&mut self, topology: &Topology) -> usize {
        let mut withdrawals = 0;
        loop {
            let mut changed = false;
            for node in topology.node_ids() {
                for (neighbor, _) in topology.neighbors(node) {
                    let neighbor_row = match self.nodes.get(&neighbor) {
                        Some(n) => n.table.clone(),
                        None => continue,
                    };
                    if let Some(dv_node) = self.nodes.get_mut(&node) {
                        if dv_node.withdraw_stale(neighbor, &neighbor_row) {
                            withdrawals += 1;
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break withdrawals;
            }
        }
    }

    /// Perform one full pass, where every node receives the current table of all of its neighbors.
    /// Returns the number of (node, neighbor) exchanges that changed the table of the node.
    fn relaxation_pass(&mut self, topology: &Topology) -> usize {
        let mut changes = 0;
        for node in topology.node_ids() {
            for (neighbor, cost) in topology.neighbors(node) {
                let neighbor_row = match self.nodes.get(&neighbor) {
                    Some(n) => n.table.clone(),
                    None => continue,
                };
                if let Some(dv_node) = self.nodes.get_mut(&node) {
                    if dv_node.update_row(neighbor, cost, &neighbor_row) {
                        changes += 1;
                    }
                }
            }
        }
        changes
    }
}

impl RoutingProtocol for DistanceVector {
    fn name(&self) -> &'static str {
        "distance-vector"
    }

    fn node_added(&mut self, node: NodeId) {
        self.nodes.entry(node).or_insert_with(|| DvNode::new(node));
    }

    fn node_removed(&mut self, node: NodeId) {
        self.nodes.remove(&node);
        for dv_node in self.nodes.values_mut() {
            dv_node.forget_node(node);
        }
    }

    fn link_changed(&mut self, update: &LinkUpdate) {
        let dv_node = match self.nodes.get_mut(&update.source) {
            Some(n) => n,
            None => {
                warn!("link change on unknown node {:?} ignored", update.source);
                return;
            }
        };
        match update.change {
            // all routes over the link are too short now. Forget them, such that the withdrawal
            // phase also clears every route depending on them, and learn the link again.
            LinkChange::Updated { old, new } if new > old => {
                dv_node.remove_neighbor(update.target)
            }
            LinkChange::Added(cost) | LinkChange::Updated { new: cost, .. } => {
                dv_node.offer_direct_route(update.target, cost);
            }
            LinkChange::Removed(_) => dv_node.remove_neighbor(update.target),
            LinkChange::Ignored => {}
        }
    }

    fn converge(&mut self, topology: &Topology) -> Convergence {
        let withdrawals = self.withdraw_until_stable(topology);
        let mut result = Convergence { rounds: 0, changes: withdrawals };
        loop {
            result.rounds += 1;
            let changes = self.relaxation_pass(topology);
            trace!("distance-vector pass {}: {} tables changed", result.rounds, changes);
            result.changes += changes;
            if changes == 0 {
                break;
            }
        }
        debug!(
            "distance-vector converged after {} passes ({} withdrawals, {} changes)",
            result.rounds, withdrawals, result.changes
        );
        result
    }

    fn routing_table(&self, node: NodeId) -> Option<&RoutingTable> {
        self.nodes.get(&node).map(|n| &n.table)
    }
}
