//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;

use ipnetwork::IpNetwork;
use nxos_utils::bgp::{AfiSafi, RdValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct Vrf {
    pub name: String,
    pub description: Option<String>,
    pub shutdown: bool,
    pub rd: Option<RdValue>,
    pub vni: Option<u32>,
    pub address_families: BTreeMap<AfiSafi, VrfAddressFamily>,
    pub static_routes: Vec<StaticRoute>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct VrfAddressFamily {
    pub route_targets: RouteTargets,
}

// Route targets of a VRF address-family or an EVPN VNI.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct RouteTargets {
    pub import: BTreeSet<RdValue>,
    pub export: BTreeSet<RdValue>,
    pub import_evpn: BTreeSet<RdValue>,
    pub export_evpn: BTreeSet<RdValue>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct StaticRoute {
    pub prefix: IpNetwork,
    pub next_hop_ip: Option<IpAddr>,
    pub next_hop_interface: Option<String>,
    pub next_hop_vrf: Option<String>,
    // Routes pointing to Null0.
    pub discard: bool,
    pub name: Option<String>,
    pub tag: u32,
    pub preference: u8,
    pub track: Option<u16>,
}

// ===== impl Vrf =====

impl Vrf {
    pub fn new(name: String) -> Vrf {
        Vrf {
            name,
            ..Default::default()
        }
    }
}

// ===== impl RouteTargets =====

impl RouteTargets {
    pub fn add(&mut self, import: bool, export: bool, evpn: bool, rt: RdValue) {
        let (import_set, export_set) = if evpn {
            (&mut self.import_evpn, &mut self.export_evpn)
        } else {
            (&mut self.import, &mut self.export)
        };
        if import {
            import_set.insert(rt);
        }
        if export {
            export_set.insert(rt);
        }
    }
}

// ===== impl StaticRoute =====

impl StaticRoute {
    pub const DEFAULT_PREFERENCE: u8 = 1;

    pub fn new(prefix: IpNetwork) -> StaticRoute {
        StaticRoute {
            prefix,
            next_hop_ip: None,
            next_hop_interface: None,
            next_hop_vrf: None,
            discard: false,
            name: None,
            tag: 0,
            preference: Self::DEFAULT_PREFERENCE,
            track: None,
        }
    }
}
