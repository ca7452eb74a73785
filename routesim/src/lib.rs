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


#![deny(missing_docs)]

//! # RouteSim: Distance-Vector and Link-State Routing Simulation
//! This is a library for simulating how routing tables evolve in a network of nodes connected by
//! weighted links, and how messages are forwarded along them.
//!
//! ## Structure
//!
//! - **[`NetSim`](netsim)**: Network simulator. The main structure is the
//!   [`Network`](netsim::Network), which owns the [`Topology`](netsim::Topology) and the state of a
//!   [`RoutingProtocol`](netsim::RoutingProtocol). Two protocols are available:
//!   [`DistanceVector`](netsim::DistanceVector) and [`LinkState`](netsim::LinkState).
//!
//! - **[`Input`](input)**: Parsers for the line based topology, message and change files.
//!
//! - **[`ExampleNetworks`](example_networks)**: Small prepared topologies, and a generator for
//!   random connected topologies of arbitrary size.
//!
//! ## Usage
//!
//! Build the network from a list of links, let it converge, and trace a message. Afterwards, the
//! topology can be changed, which makes the network converge again.
//!
//! ```
//! use routesim::input::parse_link_records;
//! use routesim::netsim::{LinkState, Network, NodeLabel};
//! use routesim::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let records = parse_link_records("1 2 2\n1 3 1\n3 4 2\n")?;
//!     let mut net: Network<LinkState> = Network::from_records(&records);
//!
//!     let path = net.trace(NodeLabel(1), NodeLabel(4))?;
//!     assert_eq!(path, vec![NodeLabel(1), NodeLabel(3), NodeLabel(4)]);
//!
//!     // make the link between 3 and 4 very expensive
//!     net.apply_change(NodeLabel(3), NodeLabel(4), 10);
//!     let path = net.trace(NodeLabel(1), NodeLabel(4))?;
//!     assert_eq!(path, vec![NodeLabel(1), NodeLabel(3), NodeLabel(4)]);
//!     let entry = net.get_route_entry(NodeLabel(1), NodeLabel(4))?;
//!     assert_eq!(entry.and_then(|(_, distance)| distance.finite()), Some(11));
//!
//!     Ok(())
//! }
//! ```

// test modules
pub mod example_networks;
mod test;

mod error;
pub mod input;
pub mod netsim;

pub use error::Error;
