//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Vendor-specific configuration model.
//!
//! Everything the extractor learns about a device ends up here. Collections
//! are keyed by canonical name; entities are created on first mention and
//! updated in place by later statements.

pub mod acl;
pub mod bgp;
pub mod igp;
pub mod interface;
pub mod lists;
pub mod object_group;
pub mod ospf;
pub mod overlay;
pub mod route_map;
pub mod system;
pub mod vrf;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::acl::IpAccessList;
use crate::model::bgp::BgpProcess;
use crate::model::igp::{EigrpProcess, IsisProcess, RipProcess};
use crate::model::interface::Interface;
use crate::model::lists::{AsPathAccessList, CommunityList, PrefixList};
use crate::model::object_group::ObjectGroup;
use crate::model::ospf::OspfProcess;
use crate::model::overlay::{Evpn, Nve, Vlan};
use crate::model::route_map::RouteMap;
use crate::model::system::{LoggingServer, NtpServer, SnmpHost, TacacsServer};
use crate::model::vrf::Vrf;
use crate::structures::StructureType;

pub const DEFAULT_VRF_NAME: &str = "default";
pub const MANAGEMENT_VRF_NAME: &str = "management";

// Root of the configuration model of one device.
#[derive(Debug)]
#[derive(Deserialize, Serialize)]
pub struct ConfigurationModel {
    pub hostname: Option<String>,
    pub features: BTreeSet<String>,
    pub ntp_servers: BTreeMap<String, NtpServer>,
    pub logging_servers: BTreeMap<String, LoggingServer>,
    pub tacacs_servers: BTreeMap<String, TacacsServer>,
    pub snmp_hosts: BTreeMap<String, SnmpHost>,
    pub vrfs: BTreeMap<String, Vrf>,
    pub interfaces: BTreeMap<String, Interface>,
    pub ip_access_lists: BTreeMap<String, IpAccessList>,
    pub object_groups: BTreeMap<String, ObjectGroup>,
    pub ip_prefix_lists: BTreeMap<String, PrefixList>,
    pub ipv6_prefix_lists: BTreeMap<String, PrefixList>,
    pub ip_community_lists: BTreeMap<String, CommunityList>,
    pub ip_as_path_access_lists: BTreeMap<String, AsPathAccessList>,
    pub route_maps: BTreeMap<String, RouteMap>,
    pub bgp: Option<BgpProcess>,
    pub ospf_processes: BTreeMap<String, OspfProcess>,
    pub eigrp_processes: BTreeMap<String, EigrpProcess>,
    pub rip_processes: BTreeMap<String, RipProcess>,
    pub isis_processes: BTreeMap<String, IsisProcess>,
    pub nves: BTreeMap<u32, Nve>,
    pub evpn: Option<Evpn>,
    pub vlans: BTreeMap<u16, Vlan>,
    // Set when at least one line of the configuration wasn't recognized.
    pub unrecognized: bool,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum LineAction {
    Permit,
    Deny,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum Direction {
    In,
    Out,
}

// Source protocol of redistributed routes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum RedistributeProtocol {
    Bgp,
    Direct,
    Eigrp,
    Isis,
    Lisp,
    Ospf,
    Rip,
    Static,
}

// Redistribution policy key: the source protocol and its instance, if any.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct RedistributionKey {
    pub protocol: RedistributeProtocol,
    pub instance: Option<String>,
}

// ===== impl ConfigurationModel =====

impl ConfigurationModel {
    // Creates an empty model holding only the built-in VRFs.
    pub fn new() -> ConfigurationModel {
        let vrfs = [DEFAULT_VRF_NAME, MANAGEMENT_VRF_NAME]
            .into_iter()
            .map(|name| (name.to_owned(), Vrf::new(name.to_owned())))
            .collect();
        ConfigurationModel {
            hostname: None,
            features: Default::default(),
            ntp_servers: Default::default(),
            logging_servers: Default::default(),
            tacacs_servers: Default::default(),
            snmp_hosts: Default::default(),
            vrfs,
            interfaces: Default::default(),
            ip_access_lists: Default::default(),
            object_groups: Default::default(),
            ip_prefix_lists: Default::default(),
            ipv6_prefix_lists: Default::default(),
            ip_community_lists: Default::default(),
            ip_as_path_access_lists: Default::default(),
            route_maps: Default::default(),
            bgp: None,
            ospf_processes: Default::default(),
            eigrp_processes: Default::default(),
            rip_processes: Default::default(),
            isis_processes: Default::default(),
            nves: Default::default(),
            evpn: None,
            vlans: Default::default(),
            unrecognized: false,
        }
    }

    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

impl Default for ConfigurationModel {
    fn default() -> ConfigurationModel {
        ConfigurationModel::new()
    }
}

// ===== impl LineAction =====

impl std::fmt::Display for LineAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineAction::Permit => write!(f, "permit"),
            LineAction::Deny => write!(f, "deny"),
        }
    }
}

// ===== impl Direction =====

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

// ===== impl RedistributeProtocol =====

impl RedistributeProtocol {
    pub fn from_keyword(keyword: &str) -> Option<RedistributeProtocol> {
        match keyword {
            "bgp" => Some(RedistributeProtocol::Bgp),
            "direct" => Some(RedistributeProtocol::Direct),
            "eigrp" => Some(RedistributeProtocol::Eigrp),
            "isis" => Some(RedistributeProtocol::Isis),
            "lisp" => Some(RedistributeProtocol::Lisp),
            "ospf" => Some(RedistributeProtocol::Ospf),
            "rip" => Some(RedistributeProtocol::Rip),
            "static" => Some(RedistributeProtocol::Static),
            _ => None,
        }
    }

    // Whether the protocol is qualified by an instance tag.
    pub fn requires_instance(&self) -> bool {
        !matches!(
            self,
            RedistributeProtocol::Direct
                | RedistributeProtocol::Lisp
                | RedistributeProtocol::Static
        )
    }

    // Structure type of the redistributed instance, for those protocols
    // whose instances are named structures.
    pub fn instance_type(&self) -> Option<StructureType> {
        match self {
            RedistributeProtocol::Eigrp => Some(StructureType::RouterEigrp),
            RedistributeProtocol::Isis => Some(StructureType::RouterIsis),
            RedistributeProtocol::Ospf => Some(StructureType::RouterOspf),
            RedistributeProtocol::Rip => Some(StructureType::RouterRip),
            _ => None,
        }
    }
}

impl std::fmt::Display for RedistributeProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedistributeProtocol::Bgp => write!(f, "bgp"),
            RedistributeProtocol::Direct => write!(f, "direct"),
            RedistributeProtocol::Eigrp => write!(f, "eigrp"),
            RedistributeProtocol::Isis => write!(f, "isis"),
            RedistributeProtocol::Lisp => write!(f, "lisp"),
            RedistributeProtocol::Ospf => write!(f, "ospf"),
            RedistributeProtocol::Rip => write!(f, "rip"),
            RedistributeProtocol::Static => write!(f, "static"),
        }
    }
}
