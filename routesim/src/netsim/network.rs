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

//! # Top-level Network module
//!
//! This module combines the topology with a routing protocol. Every change of the topology is
//! forwarded to the protocol, and followed by a full convergence before the network can be queried
//! again.

use crate::input::LinkRecord;
use crate::netsim::protocol::{Convergence, RoutingProtocol};
use crate::netsim::topology::Topology;
use crate::netsim::{Distance, ForwardingState, NetworkError, NodeId, NodeLabel};

use log::*;

/// # Network struct
/// The struct owns the topology and the state of the routing protocol `P`. All links are treated as
/// undirected: adding, updating or removing a link always changes both directions.
///
/// A topology change and the subsequent convergence form one step. Functions that only change the
/// topology without converging ([`Network::add_link`]) must be followed by [`Network::converge`]
/// before the network is queried.
#[derive(Debug, Clone)]
pub struct Network<P: RoutingProtocol> {
    topology: Topology,
    protocol: P,
    last_convergence: Convergence,
}

impl<P: RoutingProtocol + Default> Default for Network<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: RoutingProtocol + Default> Network<P> {
    /// Build the network from a list of undirected links, and let it converge.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LinkRecord>) -> Self {
        let mut net = Self::default();
        for r in records {
            net.add_link(r.source, r.target, r.cost);
        }
        net.converge();
        net
    }
}

impl<P: RoutingProtocol> Network<P> {
    /// Generate an empty network running the given protocol.
    pub fn new(protocol: P) -> Self {
        Self { topology: Topology::new(), protocol, last_convergence: Convergence::default() }
    }

    /// Add a node to the network, and return its ID. If the label is already known, nothing
    /// changes. The network needs to converge afterwards.
    pub fn add_node(&mut self, label: NodeLabel) -> NodeId {
        if let Ok(id) = self.topology.node_id(label) {
            return id;
        }
        let id = self.topology.add_node(label);
        self.protocol.node_added(id);
        id
    }

    /// Add, update or remove the undirected link between `a` and `b`, without letting the network
    /// converge. A negative cost removes the link. Unknown nodes are created.
    pub fn add_link(&mut self, a: NodeLabel, b: NodeLabel, cost: i64) {
        self.add_node(a);
        self.add_node(b);
        for (source, target) in [(a, b), (b, a)].iter() {
            let update = self.topology.add_or_update_link(*source, *target, cost);
            self.protocol.link_changed(&update);
        }
    }

    /// Let the routing protocol converge on the current topology.
    pub fn converge(&mut self) -> Convergence {
        self.last_convergence = self.protocol.converge(&self.topology);
        info!(
            "{} converged on {} nodes: {} rounds, {} changes",
            self.protocol.name(),
            self.topology.size(),
            self.last_convergence.rounds,
            self.last_convergence.changes
        );
        self.last_convergence
    }

    /// Apply a topology change (set the cost of the undirected link between `a` and `b`, or remove
    /// it if `cost` is negative), and let the network converge.
    pub fn apply_change(&mut self, a: NodeLabel, b: NodeLabel, cost: i64) -> Convergence {
        debug!("apply change: {} <-> {} cost {}", a, b, cost);
        self.add_link(a, b, cost);
        self.converge()
    }

    /// Remove a node together with all its links, and let the network converge. Returns `None` if
    /// the label is unknown.
    pub fn remove_node(&mut self, label: NodeLabel) -> Option<Convergence> {
        let (id, neighbors) = self.topology.remove_node(label)?;
        trace!("node {} removed, {} links dropped", label, neighbors.len());
        self.protocol.node_removed(id);
        Some(self.converge())
    }

    // ********************
    // * Helper Functions *
    // ********************

    /// Returns a reference to the topology
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns a reference to the state of the routing protocol
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the statistics of the last convergence.
    pub fn last_convergence(&self) -> Convergence {
        self.last_convergence
    }

    /// Compute and return the current forwarding state.
    pub fn get_forwarding_state(&self) -> ForwardingState {
        self.protocol.forwarding_state(&self.topology)
    }

    /// Returns the next hop and the distance from `node` to `destination`, or `None` if the node
    /// knows no route.
    pub fn get_route_entry(
        &self,
        node: NodeLabel,
        destination: NodeLabel,
    ) -> Result<Option<(NodeLabel, Distance)>, NetworkError> {
        let node_id = self.topology.node_id(node)?;
        let dest_id = self.topology.node_id(destination)?;
        let table = match self.protocol.routing_table(node_id) {
            Some(t) => t,
            None => return Ok(None),
        };
        match table.get(&dest_id) {
            Some(entry) if entry.distance.is_reachable() => {
                Ok(Some((self.topology.label(entry.next_hop)?, entry.distance)))
            }
            _ => Ok(None),
        }
    }

    /// Returns the routing table of the node: for every node in the network (in label order), the
    /// next hop and the distance, or `None` if there is no route.
    pub fn get_routing_table(
        &self,
        node: NodeLabel,
    ) -> Result<Vec<(NodeLabel, Option<(NodeLabel, Distance)>)>, NetworkError> {
        self.topology
            .nodes_by_label()
            .map(|(dest, _)| Ok((dest, self.get_route_entry(node, dest)?)))
            .collect()
    }

    /// Return the route a message takes from `source` to `destination`, as a list of `NodeIds`,
    /// starting at the source and ending at the destination.
    pub fn get_route(
        &self,
        source: NodeLabel,
        destination: NodeLabel,
    ) -> Result<Vec<NodeId>, NetworkError> {
        let source = self.topology.node_id(source)?;
        let destination = self.topology.node_id(destination)?;
        self.get_forwarding_state().get_route(source, destination)
    }

    /// Trace a message from `source` to `destination`, and return the labels of all nodes it
    /// visits, including both the source and the destination. Fails with `NetworkError::NoRoute` if
    /// a node on the way knows no route to the destination.
    pub fn trace(
        &self,
        source: NodeLabel,
        destination: NodeLabel,
    ) -> Result<Vec<NodeLabel>, NetworkError> {
        let path = self.get_route(source, destination);
        if let Err(NetworkError::NoRoute(p)) = &path {
            debug!("No route from {} to {}: {:?}", source, destination, self.labels(p));
        }
        self.labels(&path?)
    }

    /// Translate a path of `NodeIds` into their labels.
    pub fn labels(&self, path: &[NodeId]) -> Result<Vec<NodeLabel>, NetworkError> {
        path.iter().map(|id| self.topology.label(*id)).collect()
    }
}
