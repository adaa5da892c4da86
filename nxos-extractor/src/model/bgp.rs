//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnetwork::IpNetwork;
use nxos_utils::bgp::AfiSafi;
use nxos_utils::ip::IpNetworkExt;
use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_VRF_NAME, Direction, RedistributionKey};

// The BGP process. NX-OS allows a single one per device.
#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct BgpProcess {
    pub asn: u32,
    pub vrfs: BTreeMap<String, BgpVrf>,
    pub templates: BTreeMap<String, BgpNeighbor>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct BgpVrf {
    pub name: String,
    pub router_id: Option<Ipv4Addr>,
    pub cluster_id: Option<Ipv4Addr>,
    pub log_neighbor_changes: bool,
    pub as_path_multipath_relax: bool,
    pub address_families: BTreeMap<AfiSafi, BgpAddressFamily>,
    // Neighbors are keyed by address, or by prefix for dynamic neighbors.
    #[serde(with = "vectorize")]
    pub neighbors: BTreeMap<IpNetwork, BgpNeighbor>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct BgpAddressFamily {
    // Network -> route-map.
    #[serde(with = "vectorize")]
    pub networks: BTreeMap<IpNetwork, Option<String>>,
    // Redistributed protocol -> route-map.
    #[serde(with = "vectorize")]
    pub redistribute: BTreeMap<RedistributionKey, String>,
    pub maximum_paths: Option<u8>,
    pub maximum_paths_ibgp: Option<u8>,
    #[serde(with = "vectorize")]
    pub aggregates: BTreeMap<IpNetwork, BgpAggregate>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct BgpAggregate {
    pub summary_only: bool,
    pub as_set: bool,
}

// Neighbor or peer template.
#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct BgpNeighbor {
    pub remote_as: Option<u32>,
    pub description: Option<String>,
    pub update_source: Option<String>,
    pub inherit_peer: Option<String>,
    pub shutdown: bool,
    pub ebgp_multihop: Option<u8>,
    pub local_as: Option<u32>,
    pub timers: Option<BgpTimers>,
    pub address_families: BTreeMap<AfiSafi, BgpNeighborAf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct BgpTimers {
    pub keepalive: u16,
    pub holdtime: u16,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct BgpNeighborAf {
    pub route_map_in: Option<String>,
    pub route_map_out: Option<String>,
    pub prefix_list_in: Option<String>,
    pub prefix_list_out: Option<String>,
    pub filter_list_in: Option<String>,
    pub filter_list_out: Option<String>,
    pub send_community: bool,
    pub send_community_extended: bool,
    pub next_hop_self: bool,
    pub route_reflector_client: bool,
    pub allowas_in: Option<u8>,
    pub maximum_prefix: Option<u32>,
    pub default_originate: bool,
    pub default_originate_route_map: Option<String>,
}

// Identifies the neighbor being configured.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BgpNeighborKey {
    Peer(IpNetwork),
    Template(String),
}

// ===== impl BgpProcess =====

impl BgpProcess {
    pub fn new(asn: u32) -> BgpProcess {
        let mut vrfs = BTreeMap::new();
        vrfs.insert(
            DEFAULT_VRF_NAME.to_owned(),
            BgpVrf::new(DEFAULT_VRF_NAME.to_owned()),
        );
        BgpProcess {
            asn,
            vrfs,
            templates: Default::default(),
        }
    }

    pub fn neighbor_mut(
        &mut self,
        vrf: &str,
        key: &BgpNeighborKey,
    ) -> Option<&mut BgpNeighbor> {
        match key {
            BgpNeighborKey::Peer(addr) => {
                self.vrfs.get_mut(vrf)?.neighbors.get_mut(addr)
            }
            BgpNeighborKey::Template(name) => self.templates.get_mut(name),
        }
    }
}

// ===== impl BgpVrf =====

impl BgpVrf {
    pub fn new(name: String) -> BgpVrf {
        BgpVrf {
            name,
            ..Default::default()
        }
    }
}

// ===== impl BgpNeighborAf =====

impl BgpNeighborAf {
    pub fn route_map_mut(&mut self, direction: Direction) -> &mut Option<String> {
        match direction {
            Direction::In => &mut self.route_map_in,
            Direction::Out => &mut self.route_map_out,
        }
    }

    pub fn prefix_list_mut(
        &mut self,
        direction: Direction,
    ) -> &mut Option<String> {
        match direction {
            Direction::In => &mut self.prefix_list_in,
            Direction::Out => &mut self.prefix_list_out,
        }
    }

    pub fn filter_list_mut(
        &mut self,
        direction: Direction,
    ) -> &mut Option<String> {
        match direction {
            Direction::In => &mut self.filter_list_in,
            Direction::Out => &mut self.filter_list_out,
        }
    }
}

// ===== impl BgpNeighborKey =====

impl std::fmt::Display for BgpNeighborKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BgpNeighborKey::Peer(prefix)
                if prefix.prefix() == prefix.address_family().max_prefixlen() =>
            {
                write!(f, "{}", prefix.ip())
            }
            BgpNeighborKey::Peer(prefix) => write!(f, "{}", prefix),
            BgpNeighborKey::Template(name) => write!(f, "template {}", name),
        }
    }
}
