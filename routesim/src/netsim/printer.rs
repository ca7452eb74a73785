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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings of routing tables, message traces
//! and the topology.

use crate::netsim::network::Network;
use crate::netsim::protocol::RoutingProtocol;
use crate::netsim::topology::Topology;
use crate::netsim::{NetworkError, NodeLabel};

use itertools::Itertools;
use log::*;

/// Get a vector of strings, which represent the routing table of a node. There is one line for
/// every node in the network (in label order), formatted as `destination next_hop distance`, or
/// `destination unreachable` if the node knows no route.
pub fn routing_table<P: RoutingProtocol>(
    net: &Network<P>,
    node: NodeLabel,
) -> Result<Vec<String>, NetworkError> {
    Ok(net
        .get_routing_table(node)?
        .into_iter()
        .map(|(dest, route)| match route {
            Some((next_hop, distance)) => format!("{} {} {}", dest, next_hop, distance),
            None => format!("{} unreachable", dest),
        })
        .collect())
}

/// Returns the routing tables of all nodes (in label order). Every table is followed by an empty
/// line.
pub fn routing_tables<P: RoutingProtocol>(net: &Network<P>) -> Result<String, NetworkError> {
    let mut result = String::new();
    for (node, _) in net.topology().nodes_by_label() {
        for line in routing_table(net, node)? {
            result.push_str(&line);
            result.push('\n');
        }
        result.push('\n');
    }
    Ok(result)
}

/// Returns the formatted trace of a message, as `from S to D hops S A B message TEXT`. The hops
/// contain every node that forwards the message, but not the destination. If the message cannot be
/// delivered, the hops are replaced by `unreachable`, or end with `loop` for a forwarding loop.
pub fn trace<P: RoutingProtocol>(
    net: &Network<P>,
    source: NodeLabel,
    destination: NodeLabel,
    message: &str,
) -> Result<String, NetworkError> {
    let hops = match net.trace(source, destination) {
        Ok(path) => {
            path.iter().take(path.len().saturating_sub(1)).map(|l| format!("{} ", l)).join("")
        }
        Err(NetworkError::NoRoute(_)) => {
            warn!("Message from {} to {} is not delivered: no route", source, destination);
            String::from("unreachable ")
        }
        Err(NetworkError::ForwardingLoop(path)) => {
            let path = net.labels(&path)?;
            warn!("Message from {} to {} is caught in a loop: {:?}", source, destination, path);
            format!("{} loop ", path.iter().join(" "))
        }
        Err(e) => return Err(e),
    };
    Ok(format!("from {} to {} hops {}message {}", source, destination, hops, message))
}

/// Returns one line per node (in label order), listing all neighbors with the link cost, as
/// `label: n1(c1) n2(c2)`.
pub fn topology(topology: &Topology) -> Result<Vec<String>, NetworkError> {
    topology
        .nodes_by_label()
        .map(|(label, id)| {
            let neighbors = topology
                .neighbors(id)
                .into_iter()
                .map(|(n, cost)| Ok((topology.label(n)?, cost)))
                .collect::<Result<Vec<(NodeLabel, _)>, NetworkError>>()?;
            Ok(format!(
                "{}: {}",
                label,
                neighbors.into_iter().sorted().map(|(n, c)| format!("{}({})", n, c)).join(" ")
            ))
        })
        .collect()
}
