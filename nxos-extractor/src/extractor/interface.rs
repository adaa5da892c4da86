//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use nxos_utils::range::RangeSet;

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::interface::{
    ChannelGroup, Interface, InterfaceAddress, OspfNetworkType, SwitchportMode,
};
use crate::model::{DEFAULT_VRF_NAME, Direction};
use crate::structures::{StructureType, UsageKind};
use crate::tree::{InterfaceRouter, Token};
use crate::validate;

impl Extractor<'_> {
    // Applies a mutation to every interface of the current `interface`
    // statement.
    fn for_each_interface(&mut self, mut f: impl FnMut(&mut Interface)) {
        for name in &self.scope.interfaces {
            if let Some(iface) = self.model.interfaces.get_mut(name) {
                f(iface);
            }
        }
    }

    pub(super) fn interface(&mut self, site: &Site<'_>, names: &[Token]) {
        let vlan_interfaces = self.model.feature_enabled("interface-vlan");
        let mut resolved = vec![];
        for token in names {
            if let Some(names) = validate::parse_interface_names(
                &mut self.diagnostics,
                site,
                token,
                vlan_interfaces,
            ) {
                resolved.extend(names);
            }
        }

        for name in resolved {
            self.model
                .interfaces
                .entry(name.name.clone())
                .or_insert_with(|| {
                    Interface::new(name.name.clone(), name.kind, name.parent)
                });
            self.define(StructureType::Interface, &name.name, site);
            self.reference(
                StructureType::Interface,
                &name.name,
                UsageKind::InterfaceSelfReference,
                site,
            );
            self.scope.interfaces.push(name.name);
        }
    }

    pub(super) fn interface_description(
        &mut self,
        site: &Site<'_>,
        text: &Token,
    ) {
        let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::INTERFACE_DESCRIPTION,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.description = Some(text.clone()));
    }

    pub(super) fn interface_shutdown(&mut self, negated: bool) {
        self.for_each_interface(|iface| iface.shutdown = Some(!negated));
    }

    pub(super) fn interface_mtu(&mut self, site: &Site<'_>, mtu: &Token) {
        let Some(mtu) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            mtu,
            &validate::INTERFACE_MTU,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.mtu = Some(mtu));
    }

    pub(super) fn interface_bandwidth(&mut self, site: &Site<'_>, kbps: &Token) {
        let Some(kbps) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            kbps,
            &validate::INTERFACE_BANDWIDTH,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.bandwidth = Some(kbps));
    }

    pub(super) fn interface_ip_address(
        &mut self,
        site: &Site<'_>,
        address: &Token,
        mask: Option<&Token>,
        secondary: bool,
        tag: Option<&Token>,
    ) {
        let Some(address) = validate::parse_interface_address(
            &mut self.diagnostics,
            site,
            address,
            mask,
        ) else {
            return;
        };
        let tag = tag.and_then(|tag| {
            validate::parse_in_range(
                &mut self.diagnostics,
                site,
                tag,
                &validate::UINT32,
            )
        });

        let address = InterfaceAddress { address, tag };
        self.for_each_interface(|iface| {
            if secondary {
                if !iface.secondary_addresses.contains(&address) {
                    iface.secondary_addresses.push(address.clone());
                }
            } else {
                iface.address = Some(address.clone());
            }
        });
    }

    pub(super) fn interface_vrf_member(&mut self, site: &Site<'_>, name: &Token) {
        let Some(vrf) =
            self.vrf_reference(site, name, UsageKind::InterfaceVrfMember)
        else {
            return;
        };
        let vrf = (vrf != DEFAULT_VRF_NAME).then_some(vrf);
        self.for_each_interface(|iface| {
            iface.clear_addresses();
            iface.vrf = vrf.clone();
        });
    }

    pub(super) fn interface_ip_access_group(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        direction: Direction,
    ) {
        let usage = match direction {
            Direction::In => UsageKind::InterfaceIpAccessGroupIn,
            Direction::Out => UsageKind::InterfaceIpAccessGroupOut,
        };
        let Some(name) = self.named_reference(
            site,
            name,
            &validate::ACL_NAME,
            StructureType::IpAccessList,
            usage,
        ) else {
            return;
        };
        self.for_each_interface(|iface| match direction {
            Direction::In => iface.access_group_in = Some(name.clone()),
            Direction::Out => iface.access_group_out = Some(name.clone()),
        });
    }

    pub(super) fn interface_channel_group(
        &mut self,
        site: &Site<'_>,
        id: &Token,
        mode: Option<&Token>,
    ) {
        let Some(id) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            id,
            &validate::CHANNEL_GROUP,
        ) else {
            return;
        };
        self.reference(
            StructureType::Interface,
            &format!("port-channel{}", id),
            UsageKind::InterfaceChannelGroup,
            site,
        );

        let group = ChannelGroup {
            id,
            mode: mode.map(|mode| mode.text.clone()),
        };
        self.for_each_interface(|iface| {
            iface.channel_group = Some(group.clone());
        });
    }

    pub(super) fn interface_switchport(&mut self, enabled: bool) {
        self.for_each_interface(|iface| iface.switchport = Some(enabled));
    }

    pub(super) fn interface_switchport_mode(
        &mut self,
        site: &Site<'_>,
        mode: &Token,
    ) {
        let Some(mode) = SwitchportMode::from_keyword(mode.as_str()) else {
            self.diagnostics.red_flag(
                site,
                format!("unknown switchport mode '{}'", mode.text),
            );
            return;
        };
        self.for_each_interface(|iface| {
            iface.switchport = Some(true);
            iface.switchport_mode = Some(mode);
        });
    }

    pub(super) fn interface_switchport_access_vlan(
        &mut self,
        site: &Site<'_>,
        vlan: &Token,
    ) {
        let Some(vlan) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            vlan,
            &validate::VLAN_ID,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.access_vlan = Some(vlan));
    }

    // `switchport trunk allowed vlan [add] LIST|none`. An interface with no
    // allowed list carries every VLAN, so adding to it changes nothing.
    pub(super) fn interface_switchport_trunk_allowed_vlans(
        &mut self,
        site: &Site<'_>,
        vlans: Option<&Token>,
        add: bool,
    ) {
        let vlans = match vlans {
            Some(vlans) => {
                let Some(vlans) = validate::parse_range_set(
                    &mut self.diagnostics,
                    site,
                    vlans,
                    &validate::VLAN_ID,
                ) else {
                    return;
                };
                vlans
            }
            None => RangeSet::default(),
        };
        self.for_each_interface(|iface| {
            if !add {
                iface.allowed_vlans = Some(vlans.clone());
            } else if let Some(allowed) = &mut iface.allowed_vlans {
                allowed.union(&vlans);
            }
        });
    }

    pub(super) fn interface_encapsulation_dot1q(
        &mut self,
        site: &Site<'_>,
        vlan: &Token,
    ) {
        let Some(vlan) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            vlan,
            &validate::VLAN_ID,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.encapsulation_vlan = Some(vlan));
    }

    pub(super) fn interface_ip_router_ospf(
        &mut self,
        site: &Site<'_>,
        tag: &Token,
        area: &Token,
    ) {
        let Some(tag) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            tag,
            &validate::OSPF_PROCESS_TAG,
        ) else {
            return;
        };
        let tag = self.names.canonicalize(StructureType::RouterOspf, &tag);
        self.reference(
            StructureType::RouterOspf,
            &tag,
            UsageKind::InterfaceIpRouterOspf,
            site,
        );
        let Some(area) =
            validate::parse_ospf_area(&mut self.diagnostics, site, area)
        else {
            return;
        };
        self.for_each_interface(|iface| {
            iface.ospf.process = Some(tag.clone());
            iface.ospf.area = Some(area);
        });
    }

    pub(super) fn interface_ip_router(
        &mut self,
        site: &Site<'_>,
        protocol: InterfaceRouter,
        tag: &Token,
    ) {
        let Some(tag) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            tag,
            &validate::PROCESS_TAG,
        ) else {
            return;
        };
        let (kind, usage) = match protocol {
            InterfaceRouter::Eigrp => {
                (StructureType::RouterEigrp, UsageKind::InterfaceIpRouterEigrp)
            }
            InterfaceRouter::Isis => {
                (StructureType::RouterIsis, UsageKind::InterfaceIpRouterIsis)
            }
            InterfaceRouter::Rip => {
                (StructureType::RouterRip, UsageKind::InterfaceIpRouterRip)
            }
        };
        let tag = self.names.canonicalize(kind, &tag);
        self.reference(kind, &tag, usage, site);
        self.for_each_interface(|iface| {
            let process = match protocol {
                InterfaceRouter::Eigrp => &mut iface.eigrp,
                InterfaceRouter::Isis => &mut iface.isis,
                InterfaceRouter::Rip => &mut iface.rip,
            };
            *process = Some(tag.clone());
        });
    }

    pub(super) fn interface_ip_ospf_cost(&mut self, site: &Site<'_>, cost: &Token) {
        let Some(cost) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            cost,
            &validate::OSPF_COST,
        ) else {
            return;
        };
        self.for_each_interface(|iface| iface.ospf.cost = Some(cost));
    }

    pub(super) fn interface_ip_ospf_hello_interval(
        &mut self,
        site: &Site<'_>,
        seconds: &Token,
    ) {
        let Some(seconds) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            seconds,
            &validate::OSPF_HELLO_INTERVAL,
        ) else {
            return;
        };
        self.for_each_interface(|iface| {
            iface.ospf.hello_interval = Some(seconds)
        });
    }

    pub(super) fn interface_ip_ospf_dead_interval(
        &mut self,
        site: &Site<'_>,
        seconds: &Token,
    ) {
        let Some(seconds) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            seconds,
            &validate::OSPF_DEAD_INTERVAL,
        ) else {
            return;
        };
        self.for_each_interface(|iface| {
            iface.ospf.dead_interval = Some(seconds)
        });
    }

    pub(super) fn interface_ip_ospf_passive(&mut self, negated: bool) {
        self.for_each_interface(|iface| iface.ospf.passive = Some(!negated));
    }

    pub(super) fn interface_ip_ospf_network(
        &mut self,
        site: &Site<'_>,
        network: &Token,
    ) {
        let Some(network) = OspfNetworkType::from_keyword(network.as_str())
        else {
            self.diagnostics.red_flag(
                site,
                format!("unknown ospf network type '{}'", network.text),
            );
            return;
        };
        self.for_each_interface(|iface| iface.ospf.network = Some(network));
    }
}
