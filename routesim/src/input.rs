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


//! # Input records
//!
//! Parsers for the line based input files. Topology and change files contain one link per line,
//! as `source target cost`. In change files, a negative cost removes the link. Message files
//! contain one message per line, as `from to text`, where the text is the rest of the line.
//! Fields are separated by whitespace, and empty lines are skipped.

use crate::netsim::NodeLabel;

use log::*;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

/// A single undirected link (or link change) read from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRecord {
    /// One end of the link
    pub source: NodeLabel,
    /// Other end of the link
    pub target: NodeLabel,
    /// Cost of the link. Negative values mean that the link is removed.
    pub cost: i64,
}

/// A message that should be sent through the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Node sending the message
    pub from: NodeLabel,
    /// Destination of the message
    pub to: NodeLabel,
    /// Text of the message (may be empty)
    pub message: String,
}

/// Error while parsing an input file. All line numbers start at 1.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Io Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// A line ended before all fields were read
    #[error("Missing field {field} on line {line}")]
    MissingField {
        /// Line number
        line: usize,
        /// Name of the missing field
        field: &'static str,
    },
    /// A field could not be parsed as integer
    #[error("Cannot parse an integer on line {line}: {content}")]
    InvalidInteger {
        /// Line number
        line: usize,
        /// Content of the field
        content: String,
        /// Reason why it could not be parsed
        source: std::num::ParseIntError,
    },
    /// A link record contains more than three fields
    #[error("Unexpected content on line {line}: {content}")]
    TrailingContent {
        /// Line number
        line: usize,
        /// Everything after the last field
        content: String,
    },
}

/// Parse a topology or change file, with one `source target cost` record per line.
pub fn parse_link_records(input: &str) -> Result<Vec<LinkRecord>, ParseError> {
    let mut records = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line_nr = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (source, rest) = next_field(line, line_nr, "source")?;
        let (target, rest) = next_field(rest, line_nr, "target")?;
        let (cost, rest) = next_field(rest, line_nr, "cost")?;
        if !rest.trim().is_empty() {
            return Err(ParseError::TrailingContent {
                line: line_nr,
                content: String::from(rest.trim()),
            });
        }
        records.push(LinkRecord {
            source: NodeLabel(parse_int(source, line_nr)?),
            target: NodeLabel(parse_int(target, line_nr)?),
            cost: parse_int(cost, line_nr)?,
        });
    }
    debug!("parsed {} link records", records.len());
    Ok(records)
}

/// Parse a message file, with one `from to text` record per line.
pub fn parse_message_records(input: &str) -> Result<Vec<MessageRecord>, ParseError> {
    let mut records = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line_nr = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (from, rest) = next_field(line, line_nr, "from")?;
        let (to, rest) = next_field(rest, line_nr, "to")?;
        records.push(MessageRecord {
            from: NodeLabel(parse_int(from, line_nr)?),
            to: NodeLabel(parse_int(to, line_nr)?),
            message: String::from(rest.trim()),
        });
    }
    debug!("parsed {} message records", records.len());
    Ok(records)
}

/// Read and parse a topology or change file.
pub fn read_link_records(path: impl AsRef<Path>) -> Result<Vec<LinkRecord>, ParseError> {
    parse_link_records(&read_to_string(path)?)
}

/// Read and parse a message file.
pub fn read_message_records(path: impl AsRef<Path>) -> Result<Vec<MessageRecord>, ParseError> {
    parse_message_records(&read_to_string(path)?)
}

/// Split off the first whitespace separated field, and return it together with the remainder.
fn next_field<'a>(
    s: &'a str,
    line: usize,
    field: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    let s = s.trim_start();
    if s.is_empty() {
        return Err(ParseError::MissingField { line, field });
    }
    Ok(match s.find(char::is_whitespace) {
        Some(pos) => s.split_at(pos),
        None => (s, ""),
    })
}

fn parse_int<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    s: &str,
    line: usize,
) -> Result<T, ParseError> {
    s.parse().map_err(|source| ParseError::InvalidInteger {
        line,
        content: String::from(s),
        source,
    })
}
