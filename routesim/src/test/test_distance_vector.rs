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


//! Test the distance-vector protocol, both the update rules of a single node and the convergence
//! of entire networks.

use crate::example_networks::{ExampleNetwork, ScenarioNet, SquareNet, TriangleNet};
use crate::netsim::{
    Convergence, Distance, DistanceVector, DvNode, Network, NetworkError, NodeId, NodeLabel,
    RouteEntry, RoutingProtocol,
};
use lazy_static::lazy_static;
use maplit::hashmap;

lazy_static! {
    static ref N0: NodeId = 0.into();
    static ref N1: NodeId = 1.into();
    static ref N2: NodeId = 2.into();
    static ref N3: NodeId = 3.into();
}

fn entry(distance: u32, next_hop: NodeId) -> RouteEntry {
    RouteEntry { distance: Distance::Finite(distance), next_hop }
}

#[test]
fn test_update_row_new_destinations() {
    let mut node = DvNode::new(*N0);
    let row = hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(3, *N2) };
    assert!(node.update_row(*N1, 2, &row));
    assert_eq!(node.table().get(&*N1), Some(&entry(2, *N1)));
    assert_eq!(node.table().get(&*N2), Some(&entry(5, *N1)));
    assert_eq!(node.table().get(&*N0), Some(&RouteEntry::local(*N0)));
    assert_eq!(node.advertised_row(*N1), Some(&row));
    assert_eq!(node.advertised_row(*N2), None);

    // the same row again changes nothing
    assert!(!node.update_row(*N1, 2, &row));
}

#[test]
fn test_update_row_refresh_from_next_hop() {
    let mut node = DvNode::new(*N0);
    node.update_row(*N1, 2, &hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(3, *N2) });
    // the next hop got worse, and the node follows it
    let row = hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(10, *N2) };
    assert!(node.update_row(*N1, 2, &row));
    assert_eq!(node.table().get(&*N2), Some(&entry(12, *N1)));
}

#[test]
fn test_update_row_poison_reverse() {
    let mut node = DvNode::new(*N0);
    node.update_row(*N1, 2, &hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(10, *N2) });

    // N2 claims to reach N1 with distance 0 over us. Even though this would be shorter, the
    // route must be ignored. The route towards N2 itself is shorter and adopted.
    let row = hashmap! {
        *N2 => RouteEntry::local(*N2),
        *N1 => RouteEntry { distance: Distance::Finite(0), next_hop: *N0 },
    };
    assert!(node.update_row(*N2, 1, &row));
    assert_eq!(node.table().get(&*N1), Some(&entry(2, *N1)));
    assert_eq!(node.table().get(&*N2), Some(&entry(1, *N2)));
}

#[test]
fn test_update_row_only_strictly_shorter() {
    let mut node = DvNode::new(*N0);
    node.update_row(*N1, 1, &hashmap! { *N1 => RouteEntry::local(*N1), *N3 => entry(2, *N3) });
    assert_eq!(node.table().get(&*N3), Some(&entry(3, *N1)));

    // equal distance over N2: keep the old route
    node.update_row(*N2, 3, &hashmap! { *N2 => RouteEntry::local(*N2), *N3 => entry(0, *N3) });
    assert_eq!(node.table().get(&*N2), Some(&entry(3, *N2)));
    assert_eq!(node.table().get(&*N3), Some(&entry(3, *N1)));

    // shorter over N2: switch
    node.update_row(*N2, 1, &hashmap! { *N2 => RouteEntry::local(*N2), *N3 => entry(1, *N3) });
    assert_eq!(node.table().get(&*N3), Some(&entry(2, *N2)));
}

#[test]
fn test_withdraw_stale() {
    let mut node = DvNode::new(*N0);
    node.offer_direct_route(*N1, 1);
    node.offer_direct_route(*N3, 1);
    node.update_row(*N1, 1, &hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(1, *N2) });
    assert_eq!(node.table().get(&*N2), Some(&entry(2, *N1)));

    // N1 does not know N2 anymore
    assert!(node.withdraw_stale(*N1, &hashmap! { *N1 => RouteEntry::local(*N1) }));
    assert_eq!(node.table().get(&*N2), None);
    assert_eq!(node.table().get(&*N1), Some(&entry(1, *N1)));
    assert_eq!(node.table().get(&*N3), Some(&entry(1, *N3)));
    assert_eq!(node.table().get(&*N0), Some(&RouteEntry::local(*N0)));
    assert!(!node.withdraw_stale(*N1, &hashmap! { *N1 => RouteEntry::local(*N1) }));
}

#[test]
fn test_offer_direct_route() {
    let mut node = DvNode::new(*N0);
    node.update_row(*N1, 1, &hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(1, *N2) });
    assert_eq!(node.table().get(&*N2), Some(&entry(2, *N1)));

    // the direct link is more expensive than the known route
    assert!(!node.offer_direct_route(*N2, 5));
    assert_eq!(node.table().get(&*N2), Some(&entry(2, *N1)));

    // the direct link is shorter
    assert!(node.offer_direct_route(*N2, 1));
    assert_eq!(node.table().get(&*N2), Some(&entry(1, *N2)));
    assert!(!node.offer_direct_route(*N2, 1));

    // the route already uses the link, so it follows the new cost
    assert!(node.offer_direct_route(*N2, 0));
    assert_eq!(node.table().get(&*N2), Some(&entry(0, *N2)));
}

#[test]
fn test_cost_increase_forgets_routes() {
    let mut net: Network<DistanceVector> = ScenarioNet::net();
    net.add_link(NodeLabel(3), NodeLabel(4), 6);
    let n3 = net.topology().node_id(NodeLabel(3)).unwrap();
    let n4 = net.topology().node_id(NodeLabel(4)).unwrap();
    // both ends dropped the link, and everything routed over it
    assert_eq!(net.protocol().node(n3).map(|n| n.table().get(&n4)), Some(None));
    assert_eq!(net.protocol().node(n4).map(|n| n.table().len()), Some(1));

    net.converge();
    assert_eq!(
        net.get_route_entry(NodeLabel(3), NodeLabel(4)),
        Ok(Some((NodeLabel(4), Distance::Finite(6))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(2), NodeLabel(4)),
        Ok(Some((NodeLabel(1), Distance::Finite(9))))
    );
}

#[test]
fn test_zero_cost_cost_increase() {
    // 2 -- 6 -- 3 -- 5 -- 2 is a ring of zero-cost links. Increasing the cost of the link between
    // 2 and 4 must not leave the ring routing 4 around in circles.
    let mut net: Network<DistanceVector> = Network::default();
    for (a, b, cost) in [(3, 6, 0), (3, 5, 0), (2, 5, 0), (2, 6, 0), (2, 4, 0)].iter() {
        net.add_link(NodeLabel(*a), NodeLabel(*b), *cost);
    }
    net.converge();
    net.apply_change(NodeLabel(2), NodeLabel(4), 1);
    for label in [2, 3, 5, 6].iter() {
        assert_eq!(
            net.get_route_entry(NodeLabel(*label), NodeLabel(4)).unwrap().map(|(_, d)| d),
            Some(Distance::Finite(1))
        );
        let path = net.trace(NodeLabel(*label), NodeLabel(4)).unwrap();
        assert_eq!(path.last(), Some(&NodeLabel(4)));
        assert_eq!(path[path.len() - 2], NodeLabel(2));
    }
}

#[test]
fn test_remove_neighbor() {
    let mut node = DvNode::new(*N0);
    node.offer_direct_route(*N1, 1);
    node.offer_direct_route(*N3, 4);
    node.update_row(*N1, 1, &hashmap! { *N1 => RouteEntry::local(*N1), *N2 => entry(1, *N2) });
    node.remove_neighbor(*N1);
    assert_eq!(node.table().len(), 2);
    assert_eq!(node.table().get(&*N3), Some(&entry(4, *N3)));
    assert_eq!(node.advertised_row(*N1), None);
}

#[test]
fn test_scenario_a() {
    let net: Network<DistanceVector> = ScenarioNet::net();
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(4)),
        Ok(Some((NodeLabel(3), Distance::Finite(3))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(2), NodeLabel(4)),
        Ok(Some((NodeLabel(1), Distance::Finite(5))))
    );
}

#[test]
fn test_scenario_c() {
    let mut net: Network<DistanceVector> = ScenarioNet::net();
    let convergence = net.apply_change(NodeLabel(1), NodeLabel(3), 5);
    assert!(convergence.changes > 0);
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(4)),
        Ok(Some((NodeLabel(3), Distance::Finite(7))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(4), NodeLabel(2)),
        Ok(Some((NodeLabel(3), Distance::Finite(9))))
    );
}

#[test]
fn test_scenario_d() {
    let mut net: Network<DistanceVector> = ScenarioNet::net();
    net.apply_change(NodeLabel(1), NodeLabel(3), -1);
    let n1 = net.topology().node_id(NodeLabel(1)).unwrap();
    assert_eq!(net.get_route(NodeLabel(1), NodeLabel(4)), Err(NetworkError::NoRoute(vec![n1])));
    assert_eq!(net.get_route_entry(NodeLabel(1), NodeLabel(4)), Ok(None));
    assert_eq!(net.get_route_entry(NodeLabel(2), NodeLabel(3)), Ok(None));
    assert_eq!(net.get_route_entry(NodeLabel(4), NodeLabel(1)), Ok(None));
    assert_eq!(
        net.get_route_entry(NodeLabel(4), NodeLabel(3)),
        Ok(Some((NodeLabel(3), Distance::Finite(2))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(2), NodeLabel(1)),
        Ok(Some((NodeLabel(1), Distance::Finite(2))))
    );

    // adding the link again restores the old routes
    net.apply_change(NodeLabel(1), NodeLabel(3), 1);
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(4)),
        Ok(Some((NodeLabel(3), Distance::Finite(3))))
    );
}

#[test]
fn test_quiescence() {
    let mut net: Network<DistanceVector> = ScenarioNet::net();
    assert_eq!(net.converge(), Convergence { rounds: 1, changes: 0 });
    net.apply_change(NodeLabel(1), NodeLabel(3), -1);
    assert_eq!(net.converge(), Convergence { rounds: 1, changes: 0 });
}

#[test]
fn test_triangle_link_removal() {
    let mut net: Network<DistanceVector> = TriangleNet::net();
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(3)),
        Ok(Some((NodeLabel(2), Distance::Finite(2))))
    );
    net.apply_change(NodeLabel(1), NodeLabel(2), -1);
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(3)),
        Ok(Some((NodeLabel(3), Distance::Finite(5))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(2)),
        Ok(Some((NodeLabel(3), Distance::Finite(6))))
    );
    assert_eq!(
        net.get_route_entry(NodeLabel(2), NodeLabel(1)),
        Ok(Some((NodeLabel(3), Distance::Finite(6))))
    );
}

#[test]
fn test_square_rediscovery() {
    let mut net: Network<DistanceVector> = SquareNet::net();
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(2)),
        Ok(Some((NodeLabel(2), Distance::Finite(1))))
    );
    net.apply_change(NodeLabel(1), NodeLabel(2), -1);
    assert_eq!(
        net.get_route_entry(NodeLabel(1), NodeLabel(2)),
        Ok(Some((NodeLabel(4), Distance::Finite(3))))
    );
    assert_eq!(
        net.trace(NodeLabel(1), NodeLabel(2)),
        Ok(vec![NodeLabel(1), NodeLabel(4), NodeLabel(3), NodeLabel(2)])
    );
}

#[test]
fn test_node_removal() {
    let mut net: Network<DistanceVector> = ScenarioNet::net();
    let n3 = net.topology().node_id(NodeLabel(3)).unwrap();
    assert!(net.remove_node(NodeLabel(3)).is_some());
    assert!(net.remove_node(NodeLabel(3)).is_none());
    assert!(net.protocol().routing_table(n3).is_none());
    assert_eq!(net.protocol().node(*N3).map(|n| n.table().len()), Some(1));

    // the new node gets the identifier of the removed one, without inheriting any route
    net.apply_change(NodeLabel(1), NodeLabel(5), 1);
    assert_eq!(net.topology().node_id(NodeLabel(5)), Ok(n3));
    assert_eq!(
        net.get_route_entry(NodeLabel(2), NodeLabel(5)),
        Ok(Some((NodeLabel(1), Distance::Finite(3))))
    );
    assert_eq!(net.get_route_entry(NodeLabel(4), NodeLabel(5)), Ok(None));
}
