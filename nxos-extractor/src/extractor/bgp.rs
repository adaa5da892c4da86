//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::str::FromStr;

use nxos_utils::bgp::AfiSafi;
use nxos_utils::ip::AddressFamily;

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::bgp::{
    BgpAddressFamily, BgpAggregate, BgpNeighbor, BgpNeighborAf,
    BgpNeighborKey, BgpProcess, BgpTimers, BgpVrf,
};
use crate::model::{Direction, RedistributeProtocol, RedistributionKey};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::Token;
use crate::validate;

// Number of occurrences of the local AS accepted by a bare `allowas-in`.
const BGP_ALLOWAS_IN_DEFAULT: u8 = 3;

impl Extractor<'_> {
    fn bgp_process(&mut self) -> Option<&mut BgpProcess> {
        match &self.scope.bgp {
            Some(Cursor::Entity(_)) => self.model.bgp.as_mut(),
            _ => None,
        }
    }

    // BGP VRF being configured.
    fn bgp_vrf(&mut self) -> &mut BgpVrf {
        if let (Some(Cursor::Entity(_)), Some(Cursor::Entity(vrf))) =
            (&self.scope.bgp, &self.scope.bgp_vrf)
        {
            if let Some(entry) = self
                .model
                .bgp
                .as_mut()
                .and_then(|bgp| bgp.vrfs.get_mut(vrf))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.bgp_vrf
    }

    fn bgp_af(&mut self) -> &mut BgpAddressFamily {
        if let (
            Some(Cursor::Entity(_)),
            Some(Cursor::Entity(vrf)),
            Some(Cursor::Entity(af)),
        ) = (&self.scope.bgp, &self.scope.bgp_vrf, &self.scope.bgp_af)
        {
            if let Some(entry) = self
                .model
                .bgp
                .as_mut()
                .and_then(|bgp| bgp.vrfs.get_mut(vrf))
                .and_then(|vrf| vrf.address_families.get_mut(af))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.bgp_af
    }

    fn bgp_neighbor(&mut self) -> &mut BgpNeighbor {
        if let (
            Some(Cursor::Entity(_)),
            Some(Cursor::Entity(vrf)),
            Some(Cursor::Entity(key)),
        ) = (&self.scope.bgp, &self.scope.bgp_vrf, &self.scope.bgp_neighbor)
        {
            if let Some(entry) = self
                .model
                .bgp
                .as_mut()
                .and_then(|bgp| bgp.neighbor_mut(vrf, key))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.bgp_neighbor
    }

    fn bgp_neighbor_af(&mut self) -> &mut BgpNeighborAf {
        if let (
            Some(Cursor::Entity(_)),
            Some(Cursor::Entity(vrf)),
            Some(Cursor::Entity(key)),
            Some(Cursor::Entity(af)),
        ) = (
            &self.scope.bgp,
            &self.scope.bgp_vrf,
            &self.scope.bgp_neighbor,
            &self.scope.bgp_neighbor_af,
        ) {
            if let Some(entry) = self
                .model
                .bgp
                .as_mut()
                .and_then(|bgp| bgp.neighbor_mut(vrf, key))
                .and_then(|neighbor| neighbor.address_families.get_mut(af))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.bgp_neighbor_af
    }

    pub(super) fn router_bgp(&mut self, site: &Site<'_>, asn: &Token) {
        self.check_feature(site, "bgp");
        let Some(asn) = validate::parse_asn(&mut self.diagnostics, site, asn)
        else {
            let cursor = self.placeholder("router-bgp", site);
            self.scope.enter_bgp(cursor);
            return;
        };

        match &self.model.bgp {
            Some(bgp) if bgp.asn != asn => {
                let running = bgp.asn;
                self.diagnostics.red_flag(
                    site,
                    format!(
                        "cannot configure BGP AS {}: BGP is already running with AS {}",
                        asn, running
                    ),
                );
                let cursor = self.placeholder("router-bgp", site);
                self.scope.enter_bgp(cursor);
                return;
            }
            Some(_) => (),
            None => self.model.bgp = Some(BgpProcess::new(asn)),
        }
        self.scope.enter_bgp(Cursor::Entity(asn));
    }

    pub(super) fn bgp_router_id(&mut self, site: &Site<'_>, id: &Token) {
        if let Some(id) =
            validate::parse_ipv4(&mut self.diagnostics, site, id, "router-id")
        {
            self.bgp_vrf().router_id = Some(id);
        }
    }

    // The cluster-id is given either as an address or as an integer.
    pub(super) fn bgp_cluster_id(&mut self, site: &Site<'_>, id: &Token) {
        let id = match u32::from_str(id.as_str()) {
            Ok(id) => Some(Ipv4Addr::from(id)),
            Err(_) => validate::parse_ipv4(
                &mut self.diagnostics,
                site,
                id,
                "cluster-id",
            ),
        };
        if let Some(id) = id {
            self.bgp_vrf().cluster_id = Some(id);
        }
    }

    pub(super) fn bgp_log_neighbor_changes(&mut self) {
        self.bgp_vrf().log_neighbor_changes = true;
    }

    pub(super) fn bgp_bestpath_as_path_multipath_relax(&mut self) {
        self.bgp_vrf().as_path_multipath_relax = true;
    }

    pub(super) fn bgp_vrf_enter(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = self.vrf_reference(site, name, UsageKind::BgpVrf)
        else {
            self.scope.bgp_vrf = Some(self.placeholder("router-bgp-vrf", site));
            return;
        };
        if let Some(bgp) = self.bgp_process() {
            bgp.vrfs
                .entry(name.clone())
                .or_insert_with(|| BgpVrf::new(name.clone()));
        }
        self.scope.bgp_vrf = Some(Cursor::Entity(name));
    }

    pub(super) fn bgp_address_family(
        &mut self,
        site: &Site<'_>,
        afi: &Token,
        safi: &Token,
    ) {
        let Some(af) = AfiSafi::from_keywords(afi.as_str(), safi.as_str())
        else {
            self.diagnostics.red_flag(
                site,
                format!("unknown address-family '{} {}'", afi.text, safi.text),
            );
            self.scope.bgp_af = Some(self.placeholder("router-bgp-af", site));
            return;
        };
        self.bgp_vrf().address_families.entry(af).or_default();
        self.scope.bgp_af = Some(Cursor::Entity(af));
    }

    pub(super) fn bgp_af_network(
        &mut self,
        site: &Site<'_>,
        prefix: &Token,
        route_map: Option<&Token>,
    ) {
        let Some(prefix) =
            validate::parse_prefix(&mut self.diagnostics, site, prefix, "network")
        else {
            return;
        };
        let route_map = route_map.and_then(|route_map| {
            self.route_map_reference(
                site,
                route_map,
                UsageKind::BgpNetworkRouteMap,
            )
        });
        self.bgp_af().networks.insert(prefix, route_map);
    }

    pub(super) fn bgp_af_redistribute(
        &mut self,
        site: &Site<'_>,
        protocol: &Token,
        tag: Option<&Token>,
        route_map: &Token,
    ) {
        let Some(key) = self.redistribution(
            site,
            protocol,
            tag,
            UsageKind::BgpRedistributeInstance,
        ) else {
            return;
        };
        let Some(route_map) = self.route_map_reference(
            site,
            route_map,
            UsageKind::BgpRedistributeRouteMap,
        ) else {
            return;
        };
        self.bgp_af().redistribute.insert(key, route_map);
    }

    // Resolves the source of a `redistribute` statement. Named instances are
    // canonicalized and referenced.
    pub(super) fn redistribution(
        &mut self,
        site: &Site<'_>,
        protocol: &Token,
        tag: Option<&Token>,
        usage: UsageKind,
    ) -> Option<RedistributionKey> {
        let Some(protocol) = RedistributeProtocol::from_keyword(protocol.as_str())
        else {
            self.diagnostics.red_flag(
                site,
                format!("unknown redistribution source '{}'", protocol.text),
            );
            return None;
        };
        if !protocol.requires_instance() {
            return Some(RedistributionKey {
                protocol,
                instance: None,
            });
        }

        let Some(tag) = tag else {
            self.diagnostics.red_flag(
                site,
                format!("redistribute {} requires an instance tag", protocol),
            );
            return None;
        };
        let instance = match protocol.instance_type() {
            Some(kind) => {
                let tag = validate::parse_in_length(
                    &mut self.diagnostics,
                    site,
                    tag,
                    &validate::PROCESS_TAG,
                )?;
                let tag = self.names.canonicalize(kind, &tag);
                self.reference(kind, &tag, usage, site);
                tag
            }
            // BGP instances are identified by their AS number.
            None => validate::parse_asn(&mut self.diagnostics, site, tag)?
                .to_string(),
        };
        Some(RedistributionKey {
            protocol,
            instance: Some(instance),
        })
    }

    pub(super) fn bgp_af_maximum_paths(
        &mut self,
        site: &Site<'_>,
        ibgp: bool,
        paths: &Token,
    ) {
        let Some(paths) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            paths,
            &validate::BGP_MAXIMUM_PATHS,
        ) else {
            return;
        };
        let af = self.bgp_af();
        if ibgp {
            af.maximum_paths_ibgp = Some(paths);
        } else {
            af.maximum_paths = Some(paths);
        }
    }

    pub(super) fn bgp_af_aggregate_address(
        &mut self,
        site: &Site<'_>,
        prefix: &Token,
        summary_only: bool,
        as_set: bool,
    ) {
        let Some(prefix) = validate::parse_prefix(
            &mut self.diagnostics,
            site,
            prefix,
            "aggregate-address",
        ) else {
            return;
        };
        self.bgp_af().aggregates.insert(
            prefix,
            BgpAggregate {
                summary_only,
                as_set,
            },
        );
    }

    pub(super) fn bgp_neighbor_enter(
        &mut self,
        site: &Site<'_>,
        address: &Token,
        remote_as: Option<&Token>,
    ) {
        let Some(prefix) = validate::parse_ip_or_prefix(
            &mut self.diagnostics,
            site,
            address,
            "neighbor address",
        ) else {
            self.scope.bgp_neighbor =
                Some(self.placeholder("router-bgp-neighbor", site));
            return;
        };
        self.bgp_vrf().neighbors.entry(prefix).or_default();
        self.scope.bgp_neighbor =
            Some(Cursor::Entity(BgpNeighborKey::Peer(prefix)));

        if let Some(remote_as) = remote_as {
            self.bgp_nbr_remote_as(site, remote_as);
        }
    }

    pub(super) fn bgp_template_peer(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::BGP_TEMPLATE_NAME,
        ) else {
            self.scope.bgp_neighbor =
                Some(self.placeholder("router-bgp-template", site));
            return;
        };
        if let Some(bgp) = self.bgp_process() {
            bgp.templates.entry(name.clone()).or_default();
        }
        self.define(StructureType::BgpTemplatePeer, &name, site);
        self.scope.bgp_neighbor =
            Some(Cursor::Entity(BgpNeighborKey::Template(name)));
    }

    pub(super) fn bgp_nbr_remote_as(&mut self, site: &Site<'_>, asn: &Token) {
        if let Some(asn) = validate::parse_asn(&mut self.diagnostics, site, asn)
        {
            self.bgp_neighbor().remote_as = Some(asn);
        }
    }

    pub(super) fn bgp_nbr_description(&mut self, site: &Site<'_>, text: &Token) {
        if let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::BGP_NEIGHBOR_DESCRIPTION,
        ) {
            self.bgp_neighbor().description = Some(text);
        }
    }

    pub(super) fn bgp_nbr_update_source(
        &mut self,
        site: &Site<'_>,
        interface: &Token,
    ) {
        if let Some(interface) = self.interface_reference(
            site,
            interface,
            UsageKind::BgpNeighborUpdateSource,
        ) {
            self.bgp_neighbor().update_source = Some(interface);
        }
    }

    pub(super) fn bgp_nbr_inherit_peer(
        &mut self,
        site: &Site<'_>,
        template: &Token,
    ) {
        if let Some(template) = self.named_reference(
            site,
            template,
            &validate::BGP_TEMPLATE_NAME,
            StructureType::BgpTemplatePeer,
            UsageKind::BgpNeighborInheritPeer,
        ) {
            self.bgp_neighbor().inherit_peer = Some(template);
        }
    }

    pub(super) fn bgp_nbr_shutdown(&mut self) {
        self.bgp_neighbor().shutdown = true;
    }

    pub(super) fn bgp_nbr_ebgp_multihop(&mut self, site: &Site<'_>, ttl: &Token) {
        if let Some(ttl) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            ttl,
            &validate::BGP_EBGP_MULTIHOP,
        ) {
            self.bgp_neighbor().ebgp_multihop = Some(ttl);
        }
    }

    pub(super) fn bgp_nbr_local_as(&mut self, site: &Site<'_>, asn: &Token) {
        if let Some(asn) = validate::parse_asn(&mut self.diagnostics, site, asn)
        {
            self.bgp_neighbor().local_as = Some(asn);
        }
    }

    pub(super) fn bgp_nbr_timers(
        &mut self,
        site: &Site<'_>,
        keepalive: &Token,
        holdtime: &Token,
    ) {
        let keepalive = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            keepalive,
            &validate::BGP_KEEPALIVE,
        );
        let holdtime = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            holdtime,
            &validate::BGP_HOLDTIME,
        );
        if let (Some(keepalive), Some(holdtime)) = (keepalive, holdtime) {
            self.bgp_neighbor().timers = Some(BgpTimers {
                keepalive,
                holdtime,
            });
        }
    }

    pub(super) fn bgp_nbr_address_family(
        &mut self,
        site: &Site<'_>,
        afi: &Token,
        safi: &Token,
    ) {
        let Some(af) = AfiSafi::from_keywords(afi.as_str(), safi.as_str())
        else {
            self.diagnostics.red_flag(
                site,
                format!("unknown address-family '{} {}'", afi.text, safi.text),
            );
            self.scope.bgp_neighbor_af =
                Some(self.placeholder("router-bgp-neighbor-af", site));
            return;
        };
        self.bgp_neighbor().address_families.entry(af).or_default();
        self.scope.bgp_neighbor_af = Some(Cursor::Entity(af));
    }

    pub(super) fn bgp_nbr_af_route_map(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        direction: Direction,
    ) {
        let usage = match direction {
            Direction::In => UsageKind::BgpNeighborRouteMapIn,
            Direction::Out => UsageKind::BgpNeighborRouteMapOut,
        };
        if let Some(name) = self.route_map_reference(site, name, usage) {
            *self.bgp_neighbor_af().route_map_mut(direction) = Some(name);
        }
    }

    // The prefix-list type follows the address family of the neighbor
    // address-family.
    pub(super) fn bgp_nbr_af_prefix_list(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        direction: Direction,
    ) {
        let kind = match &self.scope.bgp_neighbor_af {
            Some(Cursor::Entity(af))
                if af.address_family() == Some(AddressFamily::Ipv6) =>
            {
                StructureType::Ipv6PrefixList
            }
            _ => StructureType::IpPrefixList,
        };
        let usage = match direction {
            Direction::In => UsageKind::BgpNeighborPrefixListIn,
            Direction::Out => UsageKind::BgpNeighborPrefixListOut,
        };
        if let Some(name) = self.named_reference(
            site,
            name,
            &validate::PREFIX_LIST_NAME,
            kind,
            usage,
        ) {
            *self.bgp_neighbor_af().prefix_list_mut(direction) = Some(name);
        }
    }

    pub(super) fn bgp_nbr_af_filter_list(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        direction: Direction,
    ) {
        let usage = match direction {
            Direction::In => UsageKind::BgpNeighborFilterListIn,
            Direction::Out => UsageKind::BgpNeighborFilterListOut,
        };
        if let Some(name) = self.named_reference(
            site,
            name,
            &validate::AS_PATH_LIST_NAME,
            StructureType::IpAsPathAccessList,
            usage,
        ) {
            *self.bgp_neighbor_af().filter_list_mut(direction) = Some(name);
        }
    }

    pub(super) fn bgp_nbr_af_send_community(
        &mut self,
        standard: bool,
        extended: bool,
    ) {
        let af = self.bgp_neighbor_af();
        af.send_community |= standard;
        af.send_community_extended |= extended;
    }

    pub(super) fn bgp_nbr_af_next_hop_self(&mut self) {
        self.bgp_neighbor_af().next_hop_self = true;
    }

    pub(super) fn bgp_nbr_af_route_reflector_client(&mut self) {
        self.bgp_neighbor_af().route_reflector_client = true;
    }

    pub(super) fn bgp_nbr_af_allowas_in(
        &mut self,
        site: &Site<'_>,
        count: Option<&Token>,
    ) {
        let count = match count {
            Some(count) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                count,
                &validate::BGP_ALLOWAS_IN,
            ),
            None => Some(BGP_ALLOWAS_IN_DEFAULT),
        };
        if let Some(count) = count {
            self.bgp_neighbor_af().allowas_in = Some(count);
        }
    }

    pub(super) fn bgp_nbr_af_maximum_prefix(
        &mut self,
        site: &Site<'_>,
        limit: &Token,
    ) {
        if let Some(limit) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            limit,
            &validate::BGP_MAXIMUM_PREFIX,
        ) {
            self.bgp_neighbor_af().maximum_prefix = Some(limit);
        }
    }

    pub(super) fn bgp_nbr_af_default_originate(
        &mut self,
        site: &Site<'_>,
        route_map: Option<&Token>,
    ) {
        let route_map = route_map.and_then(|route_map| {
            self.route_map_reference(
                site,
                route_map,
                UsageKind::BgpNeighborDefaultOriginateRouteMap,
            )
        });
        let af = self.bgp_neighbor_af();
        af.default_originate = true;
        af.default_originate_route_map = route_map;
    }
}
