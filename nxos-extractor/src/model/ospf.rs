//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_VRF_NAME, RedistributionKey};

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct OspfProcess {
    pub tag: String,
    pub vrfs: BTreeMap<String, OspfVrf>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct OspfVrf {
    pub name: String,
    pub router_id: Option<Ipv4Addr>,
    pub areas: BTreeMap<u32, OspfArea>,
    pub passive_interface_default: bool,
    // Reference bandwidth in Mbps.
    pub auto_cost_reference_bandwidth: Option<u32>,
    #[serde(with = "vectorize")]
    pub redistribute: BTreeMap<RedistributionKey, String>,
    pub log_adjacency_changes: Option<LogAdjacencyChanges>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct OspfArea {
    pub area_type: OspfAreaType,
    #[serde(with = "vectorize")]
    pub ranges: BTreeMap<IpNetwork, OspfAreaRange>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum OspfAreaType {
    #[default]
    Normal,
    Stub {
        no_summary: bool,
    },
    Nssa {
        no_summary: bool,
    },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct OspfAreaRange {
    pub advertise: bool,
    pub cost: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum LogAdjacencyChanges {
    Brief,
    Detail,
}

// ===== impl OspfProcess =====

impl OspfProcess {
    pub fn new(tag: String) -> OspfProcess {
        let mut vrfs = BTreeMap::new();
        vrfs.insert(
            DEFAULT_VRF_NAME.to_owned(),
            OspfVrf::new(DEFAULT_VRF_NAME.to_owned()),
        );
        OspfProcess { tag, vrfs }
    }
}

// ===== impl OspfVrf =====

impl OspfVrf {
    pub fn new(name: String) -> OspfVrf {
        OspfVrf {
            name,
            ..Default::default()
        }
    }
}
