//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Structure cross-reference ledger.
//!
//! Records where every named structure is defined and every place it is
//! referenced, keyed by the precise usage. No resolution happens here: the
//! downstream validator compares both sides to report undefined references
//! and unused structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Kinds of named structures.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum StructureType {
    BgpTemplatePeer,
    Interface,
    IpAccessList,
    IpAsPathAccessList,
    // Used by references only. Matches a definition of either concrete
    // community-list kind.
    IpCommunityList,
    IpCommunityListExpanded,
    IpCommunityListStandard,
    IpPrefixList,
    Ipv6PrefixList,
    ObjectGroupIpAddress,
    ObjectGroupIpPort,
    RouteMap,
    RouteMapEntry,
    RouterEigrp,
    RouterIsis,
    RouterOspf,
    RouterRip,
    Vrf,
}

// Precise usages of a structure reference.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum UsageKind {
    BgpNeighborDefaultOriginateRouteMap,
    BgpNeighborFilterListIn,
    BgpNeighborFilterListOut,
    BgpNeighborInheritPeer,
    BgpNeighborPrefixListIn,
    BgpNeighborPrefixListOut,
    BgpNeighborRouteMapIn,
    BgpNeighborRouteMapOut,
    BgpNeighborUpdateSource,
    BgpNetworkRouteMap,
    BgpRedistributeInstance,
    BgpRedistributeRouteMap,
    BgpVrf,
    EigrpVrf,
    InterfaceChannelGroup,
    InterfaceIpAccessGroupIn,
    InterfaceIpAccessGroupOut,
    InterfaceIpRouterEigrp,
    InterfaceIpRouterIsis,
    InterfaceIpRouterOspf,
    InterfaceIpRouterRip,
    InterfaceSelfReference,
    InterfaceVrfMember,
    IpAccessListDestinationAddrGroup,
    IpAccessListDestinationPortGroup,
    IpAccessListSourceAddrGroup,
    IpAccessListSourcePortGroup,
    IpRouteNextHopInterface,
    IpRouteNextHopVrf,
    LoggingServerUseVrf,
    NtpServerUseVrf,
    NveSourceInterface,
    OspfRedistributeInstance,
    OspfRedistributeRouteMap,
    OspfVrf,
    RipVrf,
    RouteMapContinue,
    RouteMapMatchAsPath,
    RouteMapMatchCommunity,
    RouteMapMatchInterface,
    RouteMapMatchIpAddress,
    RouteMapMatchIpAddressPrefixList,
    RouteMapMatchIpv6AddressPrefixList,
    RouteMapSetCommListDelete,
}

// Structure identity.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub struct StructureKey {
    pub kind: StructureType,
    pub name: String,
}

// Definition and reference ledger.
#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct StructureTable {
    #[serde(with = "vectorize")]
    definitions: BTreeMap<StructureKey, u32>,
    #[serde(with = "vectorize")]
    references: BTreeMap<(StructureKey, UsageKind), Vec<u32>>,
}

// ===== impl StructureType =====

impl StructureType {
    pub fn description(&self) -> &'static str {
        match self {
            StructureType::BgpTemplatePeer => "bgp template peer",
            StructureType::Interface => "interface",
            StructureType::IpAccessList => "ip access-list",
            StructureType::IpAsPathAccessList => "ip as-path access-list",
            StructureType::IpCommunityList => "ip community-list",
            StructureType::IpCommunityListExpanded => {
                "ip community-list expanded"
            }
            StructureType::IpCommunityListStandard => {
                "ip community-list standard"
            }
            StructureType::IpPrefixList => "ip prefix-list",
            StructureType::Ipv6PrefixList => "ipv6 prefix-list",
            StructureType::ObjectGroupIpAddress => "object-group ip address",
            StructureType::ObjectGroupIpPort => "object-group ip port",
            StructureType::RouteMap => "route-map",
            StructureType::RouteMapEntry => "route-map entry",
            StructureType::RouterEigrp => "router eigrp",
            StructureType::RouterIsis => "router isis",
            StructureType::RouterOspf => "router ospf",
            StructureType::RouterRip => "router rip",
            StructureType::Vrf => "vrf",
        }
    }

    // Returns whether a reference of this type resolves to a definition of
    // the given type.
    pub fn matches(&self, definition: StructureType) -> bool {
        match self {
            StructureType::IpCommunityList => matches!(
                definition,
                StructureType::IpCommunityList
                    | StructureType::IpCommunityListExpanded
                    | StructureType::IpCommunityListStandard
            ),
            _ => *self == definition,
        }
    }
}

impl std::fmt::Display for StructureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ===== impl UsageKind =====

impl std::fmt::Display for UsageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            UsageKind::BgpNeighborDefaultOriginateRouteMap => {
                "bgp neighbor default-originate route-map"
            }
            UsageKind::BgpNeighborFilterListIn => "bgp neighbor filter-list in",
            UsageKind::BgpNeighborFilterListOut => {
                "bgp neighbor filter-list out"
            }
            UsageKind::BgpNeighborInheritPeer => "bgp neighbor inherit peer",
            UsageKind::BgpNeighborPrefixListIn => "bgp neighbor prefix-list in",
            UsageKind::BgpNeighborPrefixListOut => {
                "bgp neighbor prefix-list out"
            }
            UsageKind::BgpNeighborRouteMapIn => "bgp neighbor route-map in",
            UsageKind::BgpNeighborRouteMapOut => "bgp neighbor route-map out",
            UsageKind::BgpNeighborUpdateSource => "bgp neighbor update-source",
            UsageKind::BgpNetworkRouteMap => "bgp network route-map",
            UsageKind::BgpRedistributeInstance => "bgp redistribute instance",
            UsageKind::BgpRedistributeRouteMap => {
                "bgp redistribute route-map"
            }
            UsageKind::BgpVrf => "router bgp vrf",
            UsageKind::EigrpVrf => "router eigrp vrf",
            UsageKind::InterfaceChannelGroup => "interface channel-group",
            UsageKind::InterfaceIpAccessGroupIn => {
                "interface ip access-group in"
            }
            UsageKind::InterfaceIpAccessGroupOut => {
                "interface ip access-group out"
            }
            UsageKind::InterfaceIpRouterEigrp => "interface ip router eigrp",
            UsageKind::InterfaceIpRouterIsis => "interface ip router isis",
            UsageKind::InterfaceIpRouterOspf => "interface ip router ospf",
            UsageKind::InterfaceIpRouterRip => "interface ip router rip",
            UsageKind::InterfaceSelfReference => "interface",
            UsageKind::InterfaceVrfMember => "interface vrf member",
            UsageKind::IpAccessListDestinationAddrGroup => {
                "ip access-list destination addrgroup"
            }
            UsageKind::IpAccessListDestinationPortGroup => {
                "ip access-list destination portgroup"
            }
            UsageKind::IpAccessListSourceAddrGroup => {
                "ip access-list source addrgroup"
            }
            UsageKind::IpAccessListSourcePortGroup => {
                "ip access-list source portgroup"
            }
            UsageKind::IpRouteNextHopInterface => "ip route next-hop interface",
            UsageKind::IpRouteNextHopVrf => "ip route next-hop vrf",
            UsageKind::LoggingServerUseVrf => "logging server use-vrf",
            UsageKind::NtpServerUseVrf => "ntp server use-vrf",
            UsageKind::NveSourceInterface => "nve source-interface",
            UsageKind::OspfRedistributeInstance => {
                "router ospf redistribute instance"
            }
            UsageKind::OspfRedistributeRouteMap => {
                "router ospf redistribute route-map"
            }
            UsageKind::OspfVrf => "router ospf vrf",
            UsageKind::RipVrf => "router rip vrf",
            UsageKind::RouteMapContinue => "route-map continue",
            UsageKind::RouteMapMatchAsPath => "route-map match as-path",
            UsageKind::RouteMapMatchCommunity => "route-map match community",
            UsageKind::RouteMapMatchInterface => "route-map match interface",
            UsageKind::RouteMapMatchIpAddress => "route-map match ip address",
            UsageKind::RouteMapMatchIpAddressPrefixList => {
                "route-map match ip address prefix-list"
            }
            UsageKind::RouteMapMatchIpv6AddressPrefixList => {
                "route-map match ipv6 address prefix-list"
            }
            UsageKind::RouteMapSetCommListDelete => {
                "route-map set comm-list delete"
            }
        };
        write!(f, "{}", description)
    }
}

// ===== impl StructureKey =====

impl StructureKey {
    pub fn new(kind: StructureType, name: impl Into<String>) -> StructureKey {
        StructureKey {
            kind,
            name: name.into(),
        }
    }
}

// ===== impl StructureTable =====

impl StructureTable {
    // Records the definition of a structure. Only the first definition of a
    // given structure is kept.
    pub fn define(&mut self, kind: StructureType, name: &str, line: u32) {
        self.definitions
            .entry(StructureKey::new(kind, name))
            .or_insert(line);
    }

    // Records a reference to a structure.
    pub fn reference(
        &mut self,
        kind: StructureType,
        name: &str,
        usage: UsageKind,
        line: u32,
    ) {
        self.references
            .entry((StructureKey::new(kind, name), usage))
            .or_default()
            .push(line);
    }

    pub fn definition_line(&self, kind: StructureType, name: &str) -> Option<u32> {
        self.definitions
            .get(&StructureKey::new(kind, name))
            .copied()
    }

    pub fn is_defined(&self, kind: StructureType, name: &str) -> bool {
        self.definition_line(kind, name).is_some()
    }

    // Returns the lines where the structure is referenced with the given
    // usage.
    pub fn references(
        &self,
        kind: StructureType,
        name: &str,
        usage: UsageKind,
    ) -> &[u32] {
        self.references
            .get(&(StructureKey::new(kind, name), usage))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // Returns the total number of references to a structure, across all
    // usages.
    pub fn reference_count(&self, kind: StructureType, name: &str) -> usize {
        self.references
            .iter()
            .filter(|((key, _), _)| key.kind == kind && key.name == name)
            .map(|(_, lines)| lines.len())
            .sum()
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&StructureKey, u32)> {
        self.definitions.iter().map(|(key, line)| (key, *line))
    }

    pub fn reference_entries(
        &self,
    ) -> impl Iterator<Item = (&StructureKey, UsageKind, &[u32])> {
        self.references
            .iter()
            .map(|((key, usage), lines)| (key, *usage, lines.as_slice()))
    }
}
