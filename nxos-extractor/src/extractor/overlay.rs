//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::extractor::vrf::rt_direction;
use crate::model::overlay::{Evpn, EvpnVni, Nve, NveVni, Vlan};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::{RtDirection, Token};
use crate::validate;

impl Extractor<'_> {
    fn nve(&mut self) -> &mut Nve {
        if let Some(Cursor::Entity(id)) = &self.scope.nve {
            if let Some(nve) = self.model.nves.get_mut(id) {
                return nve;
            }
        }
        &mut self.scope.placeholders.nve
    }

    fn nve_vni(&mut self) -> &mut NveVni {
        if let (Some(Cursor::Entity(id)), Some(Cursor::Entity(vni))) =
            (&self.scope.nve, &self.scope.nve_vni)
        {
            if let Some(entry) = self
                .model
                .nves
                .get_mut(id)
                .and_then(|nve| nve.member_vnis.get_mut(vni))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.nve_vni
    }

    fn evpn_vni(&mut self) -> &mut EvpnVni {
        if let Some(Cursor::Entity(vni)) = &self.scope.evpn_vni {
            if let Some(entry) = self
                .model
                .evpn
                .as_mut()
                .and_then(|evpn| evpn.vnis.get_mut(vni))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.evpn_vni
    }

    fn for_each_vlan(&mut self, mut f: impl FnMut(&mut Vlan)) {
        for id in &self.scope.vlans {
            if let Some(vlan) = self.model.vlans.get_mut(id) {
                f(vlan);
            }
        }
    }

    fn vni(&mut self, site: &Site<'_>, vni: &Token) -> Option<u32> {
        validate::parse_in_range(&mut self.diagnostics, site, vni, &validate::VNI)
    }

    // ===== NVE =====

    pub(super) fn nve_interface(&mut self, site: &Site<'_>, id: &Token) {
        self.check_feature(site, "nv overlay");
        let Some(id) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            id,
            &validate::NVE_ID,
        ) else {
            self.scope.nve = Some(self.placeholder("interface-nve", site));
            return;
        };
        self.model.nves.entry(id).or_insert_with(|| Nve::new(id));
        self.define(StructureType::Interface, &format!("nve{}", id), site);
        self.scope.nve = Some(Cursor::Entity(id));
    }

    pub(super) fn nve_source_interface(
        &mut self,
        site: &Site<'_>,
        interface: &Token,
    ) {
        if let Some(interface) = self.interface_reference(
            site,
            interface,
            UsageKind::NveSourceInterface,
        ) {
            self.nve().source_interface = Some(interface);
        }
    }

    pub(super) fn nve_shutdown(&mut self, negated: bool) {
        self.nve().shutdown = !negated;
    }

    pub(super) fn nve_host_reachability_bgp(&mut self) {
        self.nve().host_reachability_bgp = true;
    }

    pub(super) fn nve_member_vni(
        &mut self,
        site: &Site<'_>,
        vni: &Token,
        associate_vrf: bool,
    ) {
        let Some(vni) = self.vni(site, vni) else {
            self.scope.nve_vni = Some(self.placeholder("nve-member-vni", site));
            return;
        };
        let member = self
            .nve()
            .member_vnis
            .entry(vni)
            .or_insert_with(|| NveVni::new(vni, associate_vrf));
        member.associate_vrf = associate_vrf;
        self.scope.nve_vni = Some(Cursor::Entity(vni));
    }

    pub(super) fn nve_vni_ingress_replication_bgp(&mut self) {
        self.nve_vni().ingress_replication_bgp = true;
    }

    pub(super) fn nve_vni_mcast_group(&mut self, site: &Site<'_>, group: &Token) {
        let Some(group) = validate::parse_ipv4(
            &mut self.diagnostics,
            site,
            group,
            "multicast group",
        ) else {
            return;
        };
        if !group.is_multicast() {
            self.diagnostics.red_flag(
                site,
                format!("'{}' is not a multicast group address", group),
            );
            return;
        }
        self.nve_vni().mcast_group = Some(group);
    }

    pub(super) fn nve_vni_suppress_arp(&mut self) {
        self.nve_vni().suppress_arp = true;
    }

    // ===== EVPN =====

    pub(super) fn evpn(&mut self) {
        self.model.evpn.get_or_insert_with(Evpn::default);
    }

    pub(super) fn evpn_vni_enter(&mut self, site: &Site<'_>, vni: &Token) {
        let Some(vni) = self.vni(site, vni) else {
            self.scope.evpn_vni = Some(self.placeholder("evpn-vni", site));
            return;
        };
        self.model
            .evpn
            .get_or_insert_with(Evpn::default)
            .vnis
            .entry(vni)
            .or_insert_with(|| EvpnVni::new(vni));
        self.scope.evpn_vni = Some(Cursor::Entity(vni));
    }

    pub(super) fn evpn_vni_rd(&mut self, site: &Site<'_>, rd: &Token) {
        if let Some(rd) = validate::parse_rd(&mut self.diagnostics, site, rd) {
            self.evpn_vni().rd = Some(rd);
        }
    }

    pub(super) fn evpn_vni_route_target(
        &mut self,
        site: &Site<'_>,
        direction: RtDirection,
        value: &Token,
    ) {
        let Some(rt) =
            validate::parse_route_target(&mut self.diagnostics, site, value)
        else {
            return;
        };
        let (import, export) = rt_direction(direction);
        self.evpn_vni().route_targets.add(import, export, false, rt);
    }

    // ===== VLAN =====

    pub(super) fn vlan(&mut self, site: &Site<'_>, vlans: &Token) {
        let Some(set) = validate::parse_range_set(
            &mut self.diagnostics,
            site,
            vlans,
            &validate::VLAN_ID,
        ) else {
            return;
        };
        let ids = set
            .values()
            .filter_map(|id| u16::try_from(id).ok())
            .collect::<Vec<_>>();
        for id in &ids {
            self.model.vlans.entry(*id).or_insert_with(|| Vlan::new(*id));
        }
        self.scope.vlans = ids;
    }

    pub(super) fn vlan_name(&mut self, site: &Site<'_>, name: &Token) {
        if let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::VLAN_NAME,
        ) {
            self.for_each_vlan(|vlan| vlan.name = Some(name.clone()));
        }
    }

    pub(super) fn vlan_vn_segment(&mut self, site: &Site<'_>, vni: &Token) {
        self.check_feature(site, "vn-segment-vlan-based");
        if let Some(vni) = self.vni(site, vni) {
            self.for_each_vlan(|vlan| vlan.vni = Some(vni));
        }
    }
}
