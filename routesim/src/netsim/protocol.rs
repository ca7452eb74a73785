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

//! # Routing Protocol
//!
//! Trait shared by the [distance-vector](crate::netsim::DistanceVector) and the
//! [link-state](crate::netsim::LinkState) protocol. The [`Network`](crate::netsim::Network)
//! notifies the protocol about every change of the topology, and asks it to converge afterwards.

use crate::netsim::topology::Topology;
use crate::netsim::types::LinkUpdate;
use crate::netsim::{ForwardingState, NodeId, RoutingTable};

use std::fmt::Debug;

/// Statistics of a single convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Convergence {
    /// Number of full passes over all nodes. The last pass never changes anything.
    pub rounds: usize,
    /// Number of table updates that changed a routing table.
    pub changes: usize,
}

/// # Routing Protocol
/// A protocol computes a routing table for every node of the topology.
pub trait RoutingProtocol: Debug {
    /// Name of the protocol, used in log messages.
    fn name(&self) -> &'static str;

    /// A new node was added to the topology.
    fn node_added(&mut self, node: NodeId);

    /// A node was removed from the topology (together with all its links).
    fn node_removed(&mut self, node: NodeId);

    /// A single directed link was added, updated or removed.
    fn link_changed(&mut self, update: &LinkUpdate);

    /// Recompute the routing tables until they are stable for the given topology.
    fn converge(&mut self, topology: &Topology) -> Convergence;

    /// Returns the routing table of a node, or `None` if the node is not known.
    fn routing_table(&self, node: NodeId) -> Option<&RoutingTable>;

    /// Extract the forwarding state of all nodes in the topology.
    fn forwarding_state(&self, topology: &Topology) -> ForwardingState {
        ForwardingState::new(
            topology
                .node_ids()
                .into_iter()
                .filter_map(|n| self.routing_table(n).map(|t| (n, t.clone())))
                .collect(),
        )
    }
}
