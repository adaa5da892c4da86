//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use nxos_utils::bgp::RdValue;
use serde::{Deserialize, Serialize};

use crate::model::vrf::RouteTargets;

// Network virtualization edge (VXLAN tunnel endpoint) interface.
#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct Nve {
    pub id: u32,
    pub source_interface: Option<String>,
    pub shutdown: bool,
    pub host_reachability_bgp: bool,
    pub member_vnis: BTreeMap<u32, NveVni>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct NveVni {
    pub vni: u32,
    // Layer-3 VNI associated with a VRF.
    pub associate_vrf: bool,
    pub ingress_replication_bgp: bool,
    pub mcast_group: Option<Ipv4Addr>,
    pub suppress_arp: bool,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct Evpn {
    pub vnis: BTreeMap<u32, EvpnVni>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct EvpnVni {
    pub vni: u32,
    pub rd: Option<RdValue>,
    pub route_targets: RouteTargets,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct Vlan {
    pub id: u16,
    pub name: Option<String>,
    pub vni: Option<u32>,
}

// ===== impl Nve =====

impl Nve {
    pub fn new(id: u32) -> Nve {
        Nve {
            id,
            shutdown: true,
            ..Default::default()
        }
    }
}

// ===== impl NveVni =====

impl NveVni {
    pub fn new(vni: u32, associate_vrf: bool) -> NveVni {
        NveVni {
            vni,
            associate_vrf,
            ..Default::default()
        }
    }
}

// ===== impl EvpnVni =====

impl EvpnVni {
    pub fn new(vni: u32) -> EvpnVni {
        EvpnVni {
            vni,
            ..Default::default()
        }
    }
}

// ===== impl Vlan =====

impl Vlan {
    pub fn new(id: u16) -> Vlan {
        Vlan {
            id,
            ..Default::default()
        }
    }
}
