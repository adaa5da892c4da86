//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use nxos_utils::bgp::{Comm, Origin};
use serde::{Deserialize, Serialize};

use crate::model::LineAction;

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct RouteMap {
    pub name: String,
    pub entries: BTreeMap<u16, RouteMapEntry>,
}

#[derive(Debug)]
#[derive(Deserialize, Serialize)]
pub struct RouteMapEntry {
    pub seq: u16,
    pub action: LineAction,
    pub description: Option<String>,
    pub matches: RouteMapMatches,
    pub sets: RouteMapSets,
    pub continue_seq: Option<u16>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct RouteMapMatches {
    pub ip_access_lists: BTreeSet<String>,
    pub ip_prefix_lists: BTreeSet<String>,
    pub ipv6_prefix_lists: BTreeSet<String>,
    pub community_lists: BTreeSet<String>,
    pub community_exact: bool,
    pub as_path_lists: BTreeSet<String>,
    pub interfaces: BTreeSet<String>,
    pub tags: BTreeSet<u32>,
    pub metric: Option<u32>,
    pub source_protocol: Option<String>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct RouteMapSets {
    pub local_preference: Option<u32>,
    pub metric: Option<u32>,
    pub metric_type: Option<MetricType>,
    pub tag: Option<u32>,
    pub weight: Option<u16>,
    pub origin: Option<Origin>,
    pub community: Option<SetCommunity>,
    pub comm_list_delete: Option<String>,
    pub as_path_prepend: Option<AsPathPrepend>,
    pub next_hop: Option<SetNextHop>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum MetricType {
    External,
    Internal,
    Type1,
    Type2,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct SetCommunity {
    pub communities: BTreeSet<Comm>,
    pub additive: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum AsPathPrepend {
    Asns(Vec<u32>),
    LastAs(u8),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SetNextHop {
    Addresses(Vec<IpAddr>),
    PeerAddress,
    Unchanged,
}

// ===== impl RouteMap =====

impl RouteMap {
    pub fn new(name: String) -> RouteMap {
        RouteMap {
            name,
            entries: Default::default(),
        }
    }
}

// ===== impl RouteMapEntry =====

impl RouteMapEntry {
    pub const DEFAULT_SEQ: u16 = 10;

    pub fn new(seq: u16, action: LineAction) -> RouteMapEntry {
        RouteMapEntry {
            seq,
            action,
            description: None,
            matches: Default::default(),
            sets: Default::default(),
            continue_seq: None,
        }
    }
}

impl Default for RouteMapEntry {
    fn default() -> RouteMapEntry {
        RouteMapEntry::new(RouteMapEntry::DEFAULT_SEQ, LineAction::Permit)
    }
}

// ===== impl MetricType =====

impl MetricType {
    pub fn from_keyword(keyword: &str) -> Option<MetricType> {
        match keyword {
            "external" => Some(MetricType::External),
            "internal" => Some(MetricType::Internal),
            "type-1" => Some(MetricType::Type1),
            "type-2" => Some(MetricType::Type2),
            _ => None,
        }
    }
}
