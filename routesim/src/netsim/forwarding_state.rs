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

//! # This module contains the implementation of the global forwarding state. This is a structure
//! containing the routing tables of all nodes, and providing helper functions to follow messages
//! through the network.

use crate::netsim::{Distance, NetworkError, NodeId, RouteEntry, RoutingTable};
use log::*;
use std::collections::{HashMap, HashSet};

/// # Forwarding State
///
/// Snapshot of the routing tables of every node, as computed by either protocol. It provides
/// helper functions for querying next hops and for tracing the route of a message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForwardingState {
    tables: HashMap<NodeId, RoutingTable>,
}

impl ForwardingState {
    /// Create the forwarding state from the routing table of every node.
    pub fn new(tables: HashMap<NodeId, RoutingTable>) -> Self {
        Self { tables }
    }

    /// Returns the number of nodes in the forwarding state
    pub fn num_nodes(&self) -> usize {
        self.tables.len()
    }

    /// Returns the routing table of the node.
    pub fn get_table(&self, node: NodeId) -> Result<&RoutingTable, NetworkError> {
        self.tables.get(&node).ok_or(NetworkError::NodeNotFound(node))
    }

    /// Returns the entry of `node` for the destination, if the destination can be reached. Entries
    /// with an unreachable distance are treated as missing.
    pub fn get_entry(
        &self,
        node: NodeId,
        destination: NodeId,
    ) -> Result<Option<RouteEntry>, NetworkError> {
        Ok(self
            .get_table(node)?
            .get(&destination)
            .filter(|e| e.distance.is_reachable())
            .copied())
    }

    /// Get the next hop of a node for a specific destination. If that node does not know any route,
    /// `Ok(None)` is returned.
    pub fn get_next_hop(
        &self,
        node: NodeId,
        destination: NodeId,
    ) -> Result<Option<NodeId>, NetworkError> {
        Ok(self.get_entry(node, destination)?.map(|e| e.next_hop))
    }

    /// Get the distance from a node to a specific destination. If that node does not know any
    /// route, `Distance::Unreachable` is returned.
    pub fn get_distance(
        &self,
        node: NodeId,
        destination: NodeId,
    ) -> Result<Distance, NetworkError> {
        Ok(self.get_entry(node, destination)?.map(|e| e.distance).unwrap_or(Distance::Unreachable))
    }

    /// Returns the route from the source to the destination, by following the next hop at every
    /// node. The route starts at the source and ends at the destination. If a node on the way has
    /// no route, `NetworkError::NoRoute` is returned, and if a node is visited twice,
    /// `NetworkError::ForwardingLoop` is returned. Both errors carry the path up to that point.
    pub fn get_route(
        &self,
        source: NodeId,
        destination: NodeId,
    ) -> Result<Vec<NodeId>, NetworkError> {
        // check if both nodes exist
        self.get_table(source)?;
        self.get_table(destination)?;
        let mut visited_nodes: HashSet<NodeId> = HashSet::new();
        let mut path: Vec<NodeId> = Vec::new();
        let mut current_node = source;
        loop {
            path.push(current_node);
            if current_node == destination {
                break Ok(path);
            }
            if !visited_nodes.insert(current_node) {
                trace!("Forwarding loop detected: {:?}", path);
                break Err(NetworkError::ForwardingLoop(path));
            }
            current_node = match self.get_next_hop(current_node, destination)? {
                Some(nh) => nh,
                None => {
                    trace!("No route detected: {:?}", path);
                    break Err(NetworkError::NoRoute(path));
                }
            };
        }
    }
}
