//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Scope context.
//!
//! Holds one "current X" cursor per nestable construct. Cursors are set by
//! enter handlers and cleared by the matching exit handlers, so their state
//! always mirrors the position of the walker in the syntax tree.
//!
//! When the name of a scope can't be resolved (invalid name, conflicting
//! structure), the cursor is set to `Cursor::Placeholder`. Statements nested
//! in that scope then operate on a throwaway entity kept in `Placeholders`,
//! which is reset when the scope is exited.

use nxos_utils::bgp::AfiSafi;

use crate::model::DEFAULT_VRF_NAME;
use crate::model::acl::{AclLineBuilder, IpAccessList};
use crate::model::bgp::{
    BgpAddressFamily, BgpNeighbor, BgpNeighborAf, BgpNeighborKey, BgpVrf,
};
use crate::model::igp::{EigrpVrf, IsisProcess, RipProcess};
use crate::model::object_group::{AddressGroup, PortGroup};
use crate::model::ospf::OspfVrf;
use crate::model::overlay::{EvpnVni, Nve, NveVni};
use crate::model::route_map::RouteMapEntry;
use crate::model::vrf::{Vrf, VrfAddressFamily};

// Position of the walker inside a named scope.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cursor<K> {
    // Key of the model entity being configured.
    Entity(K),
    // The scope couldn't be resolved.
    Placeholder,
}

#[derive(Debug, Default)]
pub struct ScopeContext {
    // `vrf context`.
    pub vrf: Option<Cursor<String>>,
    pub vrf_af: Option<Cursor<AfiSafi>>,
    // `interface`, fanned out over every interface of a range.
    pub interfaces: Vec<String>,
    // `ip access-list`.
    pub acl: Option<Cursor<String>>,
    pub acl_line: Option<AclLineBuilder>,
    // `object-group`.
    pub object_group: Option<Cursor<String>>,
    // `route-map NAME ACTION SEQ`.
    pub route_map_entry: Option<Cursor<(String, u16)>>,
    // `router bgp`.
    pub bgp: Option<Cursor<u32>>,
    pub bgp_vrf: Option<Cursor<String>>,
    pub bgp_af: Option<Cursor<AfiSafi>>,
    pub bgp_neighbor: Option<Cursor<BgpNeighborKey>>,
    pub bgp_neighbor_af: Option<Cursor<AfiSafi>>,
    // `router ospf`.
    pub ospf: Option<Cursor<String>>,
    pub ospf_vrf: Option<Cursor<String>>,
    // `router eigrp`.
    pub eigrp: Option<Cursor<String>>,
    pub eigrp_vrf: Option<Cursor<String>>,
    // `router rip`.
    pub rip: Option<Cursor<String>>,
    // `router isis`.
    pub isis: Option<Cursor<String>>,
    // `interface nve`.
    pub nve: Option<Cursor<u32>>,
    pub nve_vni: Option<Cursor<u32>>,
    // `evpn`.
    pub evpn_vni: Option<Cursor<u32>>,
    // `vlan`, fanned out over every VLAN of a list.
    pub vlans: Vec<u16>,
    pub placeholders: Placeholders,
}

// Throwaway entities backing unresolved scopes.
#[derive(Debug, Default)]
pub struct Placeholders {
    pub vrf: Vrf,
    pub vrf_af: VrfAddressFamily,
    pub acl: IpAccessList,
    pub address_group: AddressGroup,
    pub port_group: PortGroup,
    pub route_map_entry: RouteMapEntry,
    pub bgp_vrf: BgpVrf,
    pub bgp_af: BgpAddressFamily,
    pub bgp_neighbor: BgpNeighbor,
    pub bgp_neighbor_af: BgpNeighborAf,
    pub ospf_vrf: OspfVrf,
    pub eigrp_vrf: EigrpVrf,
    pub rip: RipProcess,
    pub isis: IsisProcess,
    pub nve: Nve,
    pub nve_vni: NveVni,
    pub evpn_vni: EvpnVni,
}

// ===== impl ScopeContext =====

impl ScopeContext {
    pub fn exit_vrf(&mut self) {
        self.exit_vrf_af();
        self.vrf = None;
        reset(&mut self.placeholders.vrf);
    }

    pub fn exit_vrf_af(&mut self) {
        self.vrf_af = None;
        reset(&mut self.placeholders.vrf_af);
    }

    pub fn exit_interfaces(&mut self) {
        self.interfaces.clear();
    }

    pub fn exit_acl(&mut self) {
        self.acl_line = None;
        self.acl = None;
        reset(&mut self.placeholders.acl);
    }

    pub fn exit_object_group(&mut self) {
        self.object_group = None;
        reset(&mut self.placeholders.address_group);
        reset(&mut self.placeholders.port_group);
    }

    pub fn exit_route_map_entry(&mut self) {
        self.route_map_entry = None;
        reset(&mut self.placeholders.route_map_entry);
    }

    pub fn enter_bgp(&mut self, cursor: Cursor<u32>) {
        self.bgp = Some(cursor);
        self.bgp_vrf = Some(default_vrf());
    }

    pub fn exit_bgp(&mut self) {
        self.exit_bgp_vrf();
        self.bgp = None;
        self.bgp_vrf = None;
    }

    // Leaves a BGP VRF, falling back to the default VRF.
    pub fn exit_bgp_vrf(&mut self) {
        self.exit_bgp_af();
        self.exit_bgp_neighbor();
        self.bgp_vrf = Some(default_vrf());
        reset(&mut self.placeholders.bgp_vrf);
    }

    pub fn exit_bgp_af(&mut self) {
        self.bgp_af = None;
        reset(&mut self.placeholders.bgp_af);
    }

    pub fn exit_bgp_neighbor(&mut self) {
        self.exit_bgp_neighbor_af();
        self.bgp_neighbor = None;
        reset(&mut self.placeholders.bgp_neighbor);
    }

    pub fn exit_bgp_neighbor_af(&mut self) {
        self.bgp_neighbor_af = None;
        reset(&mut self.placeholders.bgp_neighbor_af);
    }

    pub fn enter_ospf(&mut self, cursor: Cursor<String>) {
        self.ospf = Some(cursor);
        self.ospf_vrf = Some(default_vrf());
    }

    pub fn exit_ospf(&mut self) {
        self.exit_ospf_vrf();
        self.ospf = None;
        self.ospf_vrf = None;
    }

    // Leaves an OSPF VRF, falling back to the default VRF.
    pub fn exit_ospf_vrf(&mut self) {
        self.ospf_vrf = Some(default_vrf());
        reset(&mut self.placeholders.ospf_vrf);
    }

    pub fn enter_eigrp(&mut self, cursor: Cursor<String>) {
        self.eigrp = Some(cursor);
        self.eigrp_vrf = Some(default_vrf());
    }

    pub fn exit_eigrp(&mut self) {
        self.exit_eigrp_vrf();
        self.eigrp = None;
        self.eigrp_vrf = None;
    }

    // Leaves an EIGRP VRF, falling back to the default VRF.
    pub fn exit_eigrp_vrf(&mut self) {
        self.eigrp_vrf = Some(default_vrf());
        reset(&mut self.placeholders.eigrp_vrf);
    }

    pub fn exit_rip(&mut self) {
        self.rip = None;
        reset(&mut self.placeholders.rip);
    }

    pub fn exit_isis(&mut self) {
        self.isis = None;
        reset(&mut self.placeholders.isis);
    }

    pub fn exit_nve(&mut self) {
        self.exit_nve_vni();
        self.nve = None;
        reset(&mut self.placeholders.nve);
    }

    pub fn exit_nve_vni(&mut self) {
        self.nve_vni = None;
        reset(&mut self.placeholders.nve_vni);
    }

    pub fn exit_evpn(&mut self) {
        self.exit_evpn_vni();
    }

    pub fn exit_evpn_vni(&mut self) {
        self.evpn_vni = None;
        reset(&mut self.placeholders.evpn_vni);
    }

    pub fn exit_vlans(&mut self) {
        self.vlans.clear();
    }
}

// ===== helper functions =====

fn default_vrf() -> Cursor<String> {
    Cursor::Entity(DEFAULT_VRF_NAME.to_owned())
}

// Discards everything written to a placeholder.
fn reset<T: Default>(placeholder: &mut T) {
    *placeholder = T::default();
}
