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


//! Networks for testing

use crate::input::LinkRecord;
use crate::netsim::{Network, NodeLabel, RoutingProtocol};

mod random;
pub use random::{random_changes, random_topology};

/// Trait for easier access to example networks.
pub trait ExampleNetwork {
    /// Get the undirected links of the network.
    fn links() -> Vec<LinkRecord>;

    /// Get the converged network running the protocol `P`.
    fn net<P: RoutingProtocol + Default>() -> Network<P> {
        Network::from_records(&Self::links())
    }
}

fn link(source: u32, target: u32, cost: i64) -> LinkRecord {
    LinkRecord { source: NodeLabel(source), target: NodeLabel(target), cost }
}

/// # Scenario Network
///
/// ```text
/// 2 --(2)-- 1 --(1)-- 3 --(2)-- 4
/// ```
pub struct ScenarioNet {}

impl ExampleNetwork for ScenarioNet {
    fn links() -> Vec<LinkRecord> {
        vec![link(1, 2, 2), link(1, 3, 1), link(3, 4, 2)]
    }
}

/// # Triangle Network
///
/// Three nodes, where the direct link between 1 and 3 is more expensive than the path over 2.
///
/// ```text
///   1 --(5)-- 3
///    \       /
///    (1)   (1)
///      \   /
///        2
/// ```
pub struct TriangleNet {}

impl ExampleNetwork for TriangleNet {
    fn links() -> Vec<LinkRecord> {
        vec![link(1, 2, 1), link(2, 3, 1), link(1, 3, 5)]
    }
}

/// # Square Network
///
/// Four nodes in a ring, with an expensive diagonal between 1 and 3.
///
/// ```text
/// 1 --(1)-- 2
/// | \       |
/// (1) (3)  (1)
/// |       \ |
/// 4 --(1)-- 3
/// ```
pub struct SquareNet {}

impl ExampleNetwork for SquareNet {
    fn links() -> Vec<LinkRecord> {
        vec![link(1, 2, 1), link(2, 3, 1), link(3, 4, 1), link(4, 1, 1), link(1, 3, 3)]
    }
}
