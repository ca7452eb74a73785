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


//! # Random Topologies
//!
//! Generators for random connected topologies and random sequences of link changes. Both are
//! seeded, so the same arguments always produce the same result.

use crate::input::LinkRecord;
use crate::netsim::NodeLabel;

use log::*;
use rand::prelude::*;
use std::collections::HashSet;

/// Smallest link cost generated
const MIN_COST: i64 = 0;
/// Largest link cost generated
const MAX_COST: i64 = 10;

/// Generate a connected topology with the nodes `1..=num_nodes`. Every node `n > 1` is connected to
/// a random node with a smaller label, which makes the topology connected. Afterwards, every other
/// pair of nodes is connected with probability `edge_probability`. All costs are chosen uniformly
/// between 0 and 10.
pub fn random_topology(num_nodes: u32, edge_probability: f64, seed: u64) -> Vec<LinkRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let edge_probability = edge_probability.max(0.0).min(1.0);
    let mut links: Vec<LinkRecord> = Vec::new();
    let mut connected: HashSet<(u32, u32)> = HashSet::new();

    // spanning tree
    for node in 2..=num_nodes {
        let other = rng.gen_range(1, node);
        connected.insert((other, node));
        links.push(LinkRecord {
            source: NodeLabel(node),
            target: NodeLabel(other),
            cost: rng.gen_range(MIN_COST, MAX_COST + 1),
        });
    }

    // additional links
    for a in 1..=num_nodes {
        for b in (a + 1)..=num_nodes {
            if !connected.contains(&(a, b)) && rng.gen_bool(edge_probability) {
                connected.insert((a, b));
                links.push(LinkRecord {
                    source: NodeLabel(a),
                    target: NodeLabel(b),
                    cost: rng.gen_range(MIN_COST, MAX_COST + 1),
                });
            }
        }
    }

    debug!("random topology with {} nodes and {} links (seed {})", num_nodes, links.len(), seed);
    links
}

/// Generate `num_changes` random link changes between the nodes `1..=num_nodes`. Every change
/// either sets a new cost between 0 and 10, or removes the link (cost `-1`). The topology may get
/// disconnected by the changes.
pub fn random_changes(num_nodes: u32, num_changes: usize, seed: u64) -> Vec<LinkRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    if num_nodes < 2 {
        return Vec::new();
    }
    (0..num_changes)
        .map(|_| {
            let source = rng.gen_range(1, num_nodes + 1);
            let mut target = rng.gen_range(1, num_nodes);
            if target >= source {
                target += 1;
            }
            let cost = if rng.gen_bool(0.25) { -1 } else { rng.gen_range(MIN_COST, MAX_COST + 1) };
            LinkRecord { source: NodeLabel(source), target: NodeLabel(target), cost }
        })
        .collect()
}
