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

//! Module containing all type definitions

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;
use thiserror::Error;

type IndexType = u32;
/// Node Identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// External label of a node, as it appears in the input and output records.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct NodeLabel(pub u32);
/// Link cost of a single directed link
pub type LinkCost = u32;
/// Graph storing the topology. Every node carries its label, every edge its cost.
pub type TopologyGraph = StableGraph<NodeLabel, LinkCost, Directed, IndexType>;
/// Routing table of a single node, mapping each known destination to the selected route.
pub type RoutingTable = HashMap<NodeId, RouteEntry>;

/// Link cost at which (and above which) a link is treated as unreachable.
pub const INFINITE_COST: LinkCost = 0x7FFF_FFFF;

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeLabel {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

/// # Distance
///
/// Distance of a route. Every finite distance is smaller than `Unreachable`. Adding two distances
/// never overflows: if one of them is `Unreachable`, or if the sum reaches [`INFINITE_COST`], the
/// result is `Unreachable`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Distance {
    /// Route with a finite cost
    Finite(u32),
    /// Destination is known, but cannot be reached.
    Unreachable,
}

impl Distance {
    /// Distance of a single link with the given cost.
    pub fn from_cost(cost: LinkCost) -> Self {
        if cost >= INFINITE_COST {
            Self::Unreachable
        } else {
            Self::Finite(cost)
        }
    }

    /// Returns true if the distance is finite.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Maps the distance to an option, with `Some(d)` only if the distance is finite.
    pub fn finite(self) -> Option<u32> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => {
                let sum = a as u64 + b as u64;
                if sum >= INFINITE_COST as u64 {
                    Self::Unreachable
                } else {
                    Self::Finite(sum as u32)
                }
            }
            _ => Self::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Unreachable => write!(f, "inf"),
        }
    }
}

/// Entry of a routing table: the distance to the destination, and the neighbor to forward to.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct RouteEntry {
    /// Distance to the destination
    pub distance: Distance,
    /// Next hop on the route. For the entry of the node itself, this is the node itself.
    pub next_hop: NodeId,
}

impl RouteEntry {
    /// Entry of a node for itself: distance 0, and the next hop is the node itself.
    pub fn local(node: NodeId) -> Self {
        Self { distance: Distance::Finite(0), next_hop: node }
    }
}

/// What a single call to [`Topology::add_or_update_link`](crate::netsim::Topology) did to the
/// directed link.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LinkChange {
    /// The link did not exist before, and was created with the given cost.
    Added(LinkCost),
    /// The cost of an existing link was rewritten.
    Updated {
        /// Cost before the update
        old: LinkCost,
        /// Cost after the update
        new: LinkCost,
    },
    /// The link was removed (a negative cost was set).
    Removed(LinkCost),
    /// Nothing happened: removal of a link that does not exist, or a link from a node to itself.
    Ignored,
}

/// A change on one directed link, as reported by the topology to the routing protocol.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct LinkUpdate {
    /// Node owning the link
    pub source: NodeId,
    /// Other end of the link
    pub target: NodeId,
    /// What happened to the link
    pub change: LinkChange,
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// No label is mapped to this node
    #[error("Node was not found in topology: {0:?}")]
    NodeNotFound(NodeId),
    /// No node carries this label
    #[error("Node label was not found in topology: {0}")]
    UnknownNode(NodeLabel),
    /// A node on the path has no route to the destination
    #[error("No route to the destination! path: {0:?}")]
    NoRoute(Vec<NodeId>),
    /// Forwarding loop detected
    #[error("Forwarding Loop occurred! path: {0:?}")]
    ForwardingLoop(Vec<NodeId>),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance_order() {
        assert!(Distance::Finite(0) < Distance::Finite(1));
        assert!(Distance::Finite(u32::MAX) < Distance::Unreachable);
        assert_eq!(Distance::Unreachable.max(Distance::Finite(3)), Distance::Unreachable);
    }

    #[test]
    fn test_distance_add() {
        assert_eq!(Distance::Finite(2) + Distance::Finite(3), Distance::Finite(5));
        assert_eq!(Distance::Finite(2) + Distance::Unreachable, Distance::Unreachable);
        assert_eq!(Distance::Unreachable + Distance::Unreachable, Distance::Unreachable);
        assert_eq!(
            Distance::Finite(INFINITE_COST - 1) + Distance::Finite(1),
            Distance::Unreachable
        );
        assert_eq!(
            Distance::Finite(INFINITE_COST - 2) + Distance::Finite(1),
            Distance::Finite(INFINITE_COST - 1)
        );
    }

    #[test]
    fn test_distance_from_cost() {
        assert_eq!(Distance::from_cost(0), Distance::Finite(0));
        assert_eq!(Distance::from_cost(INFINITE_COST), Distance::Unreachable);
        assert_eq!(Distance::from_cost(u32::MAX), Distance::Unreachable);
        assert_eq!(Distance::from_cost(7).finite(), Some(7));
        assert_eq!(Distance::Unreachable.finite(), None);
    }
}
