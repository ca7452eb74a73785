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


use routesim::example_networks::random_topology;
use routesim::input::{read_link_records, read_message_records, MessageRecord};
use routesim::netsim::{printer, DistanceVector, LinkState, Network, NetworkError, RoutingProtocol};

use clap::{Args, Parser, Subcommand};
use log::*;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    // match on the action
    match args.cmd {
        MainCommand::DistanceVector { files } => run::<DistanceVector>(files)?,
        MainCommand::LinkState { files } => run::<LinkState>(files)?,
        MainCommand::Generate { num_nodes, edge_probability, seed, output } => {
            let lines: String = random_topology(num_nodes, edge_probability, seed)
                .into_iter()
                .map(|l| format!("{} {} {}\n", l.source, l.target, l.cost))
                .collect();
            std::fs::write(&output, lines)?;
            info!("Random topology written to {}", output);
        }
    }

    Ok(())
}

/// Build the network, let it converge, and write all routing tables and message traces to the
/// output. Then apply every change, each followed by the routing tables and the message traces of
/// the new state.
fn run<P: RoutingProtocol + Default>(files: InputFiles) -> Result<(), Box<dyn Error>> {
    let topology = read_link_records(&files.topology)?;
    let messages = read_message_records(&files.messages)?;
    let changes = read_link_records(&files.changes)?;

    let mut net: Network<P> = Network::from_records(&topology);
    info!("Network with {} nodes built from {}", net.topology().size(), files.topology);

    let mut output = String::new();
    log_topology(&net)?;
    write_state(&net, &messages, &mut output)?;

    for change in changes.iter() {
        let convergence = net.apply_change(change.source, change.target, change.cost);
        debug!("{:?}", convergence);
        log_topology(&net)?;
        write_state(&net, &messages, &mut output)?;
    }

    std::fs::write(&files.output, output)?;
    info!("Output written to {}", files.output);
    Ok(())
}

fn write_state<P: RoutingProtocol>(
    net: &Network<P>,
    messages: &[MessageRecord],
    output: &mut String,
) -> Result<(), NetworkError> {
    output.push_str(&printer::routing_tables(net)?);
    for m in messages {
        match printer::trace(net, m.from, m.to, &m.message) {
            Ok(line) => {
                output.push_str(&line);
                output.push_str("\n\n");
            }
            Err(e) => warn!("Message from {} to {} is skipped: {}", m.from, m.to, e),
        }
    }
    Ok(())
}

fn log_topology<P: RoutingProtocol>(net: &Network<P>) -> Result<(), NetworkError> {
    info!("Topology:\n    {}", printer::topology(net.topology())?.join("\n    "));
    Ok(())
}

/// Simulate distance-vector or link-state routing on a topology. After the initial convergence,
/// and after every change of the topology, the routing tables of all nodes and the path of every
/// message are written to the output file.
#[derive(Parser, Debug)]
#[clap(name = "RouteSim", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Run the distance-vector protocol
    #[clap(name = "distance-vector")]
    DistanceVector {
        /// Input and output files
        #[clap(flatten)]
        files: InputFiles,
    },
    /// Run the link-state protocol
    #[clap(name = "link-state")]
    LinkState {
        /// Input and output files
        #[clap(flatten)]
        files: InputFiles,
    },
    /// Generate a random connected topology file
    #[clap(name = "generate")]
    Generate {
        /// Number of nodes
        num_nodes: u32,
        /// Probability of an additional link between any two nodes
        #[clap(short = 'p', long, default_value = "0.1")]
        edge_probability: f64,
        /// Random seed, to get reproducable topologies
        #[clap(short = 's', long, default_value = "42")]
        seed: u64,
        /// Topology file to write
        #[clap(short = 'o', long, default_value = "topology.txt")]
        output: String,
    },
}

#[derive(Args, Debug)]
struct InputFiles {
    /// Topology file, with one `source target cost` link per line
    topology: String,
    /// Message file, with one `from to text` message per line
    messages: String,
    /// Change file, with one `source target cost` change per line (negative cost removes the link)
    changes: String,
    /// Output file
    #[clap(short = 'o', long, default_value = "output.txt")]
    output: String,
}
