//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use ipnetwork::IpNetwork;
use nxos_utils::range::RangeSet;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum InterfaceKind {
    Ethernet,
    Loopback,
    Mgmt,
    Nve,
    PortChannel,
    Vlan,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SwitchportMode {
    Access,
    Dot1qTunnel,
    FexFabric,
    Monitor,
    Trunk,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum OspfNetworkType {
    Broadcast,
    PointToPoint,
}

#[derive(Debug)]
#[derive(Deserialize, Serialize)]
pub struct Interface {
    pub name: String,
    pub kind: InterfaceKind,
    // Parent interface of a subinterface.
    pub parent: Option<String>,
    pub description: Option<String>,
    pub shutdown: Option<bool>,
    pub mtu: Option<u16>,
    // Bandwidth in kbps.
    pub bandwidth: Option<u32>,
    // Member VRF; `None` stands for the default VRF.
    pub vrf: Option<String>,
    pub address: Option<InterfaceAddress>,
    pub secondary_addresses: Vec<InterfaceAddress>,
    pub access_group_in: Option<String>,
    pub access_group_out: Option<String>,
    pub channel_group: Option<ChannelGroup>,
    // `None` leaves the platform default in place.
    pub switchport: Option<bool>,
    pub switchport_mode: Option<SwitchportMode>,
    pub access_vlan: Option<u16>,
    pub allowed_vlans: Option<RangeSet>,
    pub encapsulation_vlan: Option<u16>,
    pub ospf: InterfaceOspf,
    pub eigrp: Option<String>,
    pub rip: Option<String>,
    pub isis: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct InterfaceAddress {
    pub address: IpNetwork,
    pub tag: Option<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct ChannelGroup {
    pub id: u16,
    pub mode: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct InterfaceOspf {
    pub process: Option<String>,
    pub area: Option<u32>,
    pub cost: Option<u16>,
    pub hello_interval: Option<u16>,
    pub dead_interval: Option<u16>,
    pub passive: Option<bool>,
    pub network: Option<OspfNetworkType>,
}

// ===== impl SwitchportMode =====

impl SwitchportMode {
    pub fn from_keyword(keyword: &str) -> Option<SwitchportMode> {
        match keyword {
            "access" => Some(SwitchportMode::Access),
            "dot1q-tunnel" => Some(SwitchportMode::Dot1qTunnel),
            "fex-fabric" => Some(SwitchportMode::FexFabric),
            "monitor" => Some(SwitchportMode::Monitor),
            "trunk" => Some(SwitchportMode::Trunk),
            _ => None,
        }
    }
}

// ===== impl OspfNetworkType =====

impl OspfNetworkType {
    pub fn from_keyword(keyword: &str) -> Option<OspfNetworkType> {
        match keyword {
            "broadcast" => Some(OspfNetworkType::Broadcast),
            "point-to-point" => Some(OspfNetworkType::PointToPoint),
            _ => None,
        }
    }
}

// ===== impl Interface =====

impl Interface {
    pub fn new(
        name: String,
        kind: InterfaceKind,
        parent: Option<String>,
    ) -> Interface {
        Interface {
            name,
            kind,
            parent,
            description: None,
            shutdown: None,
            mtu: None,
            bandwidth: None,
            vrf: None,
            address: None,
            secondary_addresses: Vec::new(),
            access_group_in: None,
            access_group_out: None,
            channel_group: None,
            switchport: None,
            switchport_mode: None,
            access_vlan: None,
            allowed_vlans: None,
            encapsulation_vlan: None,
            ospf: Default::default(),
            eigrp: None,
            rip: None,
            isis: None,
        }
    }

    // Removes all layer-3 addresses, as done when the interface changes VRF.
    pub fn clear_addresses(&mut self) {
        self.address = None;
        self.secondary_addresses.clear();
    }
}
