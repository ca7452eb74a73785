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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetSim
//!
//! This is a library for simulating routing protocols on a network topology. Two protocols are
//! available, which both compute a routing table for every node:
//!
//! - [`DistanceVector`]: every node exchanges its table with its direct neighbors, until no table
//!   changes anymore (Bellman-Ford with poison reverse).
//! - [`LinkState`]: every node computes the shortest paths to all other nodes on the full
//!   topology (Dijkstra).
//!
//! ## Example usage
//!
//! The following example generates a network with four nodes. Node 1 reaches node 4 over node 3.
//! After the link between 1 and 3 is removed, node 1 has no route to node 4 anymore.
//!
//! ```rust
//! use routesim::netsim::{DistanceVector, Network, NetworkError, NodeLabel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let n1 = NodeLabel(1);
//!     let n2 = NodeLabel(2);
//!     let n3 = NodeLabel(3);
//!     let n4 = NodeLabel(4);
//!
//!     let mut net: Network<DistanceVector> = Network::default();
//!     net.add_link(n1, n2, 2);
//!     net.add_link(n1, n3, 1);
//!     net.add_link(n3, n4, 2);
//!     net.converge();
//!
//!     assert_eq!(net.trace(n1, n4)?, vec![n1, n3, n4]);
//!
//!     // remove the link between 1 and 3
//!     net.apply_change(n1, n3, -1);
//!     assert!(matches!(net.trace(n1, n4), Err(NetworkError::NoRoute(_))));
//!
//!     Ok(())
//! }
//! ```

pub mod distance_vector;
pub(crate) mod forwarding_state;
pub mod link_state;
pub(crate) mod network;
pub mod printer;
pub mod protocol;
pub mod topology;
pub(crate) mod types;

pub use distance_vector::{DistanceVector, DvNode};
pub use forwarding_state::ForwardingState;
pub use link_state::{compute_from_source, derive_next_hops, LinkState, SearchResult};
pub use network::Network;
pub use protocol::{Convergence, RoutingProtocol};
pub use topology::Topology;
pub use types::{
    Distance, LinkChange, LinkCost, LinkUpdate, NetworkError, NodeId, NodeLabel, RouteEntry,
    RoutingTable, TopologyGraph, INFINITE_COST,
};
