//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Model mutation handlers.
//!
//! The extractor is driven by [`walk`]: every construct has an enter hook and
//! optionally an exit hook. Hooks never look at children; nesting is tracked
//! by the scope context, whose cursors are set on enter and cleared on exit.
//!
//! Handlers validate first and mutate last. A field that fails validation is
//! reported and skipped; a statement whose required fields fail validation
//! is dropped entirely.

mod acl;
mod bgp;
mod igp;
mod interface;
mod lists;
mod object_group;
mod ospf;
mod overlay;
mod route_map;
mod system;
mod vrf;

use serde::Serialize;
use tracing::debug_span;

use crate::config::ExtractorConfig;
use crate::debug::Debug;
use crate::diagnostics::{Diagnostics, Site};
use crate::error::Error;
use crate::model::{
    ConfigurationModel, DEFAULT_VRF_NAME, MANAGEMENT_VRF_NAME,
};
use crate::names::Canonicalizer;
use crate::scope::{Cursor, ScopeContext};
use crate::structures::{StructureTable, StructureType, UsageKind};
use crate::tree::{Construct, Listener, Node, Token, walk};
use crate::validate::{self, LengthDomain};

// Extraction state of one device configuration.
#[derive(Debug)]
pub struct Extractor<'a> {
    text: &'a str,
    model: ConfigurationModel,
    structures: StructureTable,
    names: Canonicalizer,
    diagnostics: Diagnostics,
    scope: ScopeContext,
}

// Result of an extraction run.
#[derive(Debug)]
#[derive(Serialize)]
pub struct Extraction {
    pub model: ConfigurationModel,
    pub structures: StructureTable,
    pub diagnostics: Diagnostics,
}

// ===== impl Extractor =====

impl<'a> Extractor<'a> {
    pub fn new(
        text: &'a str,
        model: ConfigurationModel,
        diagnostics: Diagnostics,
    ) -> Result<Extractor<'a>, Error> {
        for vrf in [DEFAULT_VRF_NAME, MANAGEMENT_VRF_NAME] {
            if !model.vrfs.contains_key(vrf) {
                return Err(Error::MissingBuiltinVrf(vrf));
            }
        }

        Ok(Extractor {
            text,
            model,
            structures: Default::default(),
            names: Canonicalizer::new(),
            diagnostics,
            scope: Default::default(),
        })
    }

    pub fn model(&self) -> &ConfigurationModel {
        &self.model
    }

    pub fn structures(&self) -> &StructureTable {
        &self.structures
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn finish(self) -> Extraction {
        Debug::ExtractionFinish(&self.diagnostics).log();
        Debug::ModelSnapshot(&self.model).log();

        Extraction {
            model: self.model,
            structures: self.structures,
            diagnostics: self.diagnostics,
        }
    }

    // Source location of a construct. The excerpt is the first line of the
    // construct's text.
    fn site(&self, node: &Node) -> Site<'a> {
        let text: &'a str = self.text;
        let excerpt = text
            .get(node.span.start..node.span.stop)
            .and_then(|text| text.lines().next())
            .unwrap_or_default()
            .trim();
        Site {
            line: node.line,
            excerpt,
        }
    }

    fn placeholder<K>(&self, scope: &'static str, site: &Site<'_>) -> Cursor<K> {
        Debug::PlaceholderInstalled(scope, site.line).log();
        Cursor::Placeholder
    }

    fn unrecognized(&mut self, site: &Site<'_>) {
        Debug::UnrecognizedLine(site.line, site.excerpt).log();
        self.model.unrecognized = true;
        self.diagnostics.red_flag(site, "unrecognized line");
    }

    fn unsupported(&mut self, site: &Site<'_>, what: &str) {
        self.diagnostics
            .unimplemented(site, format!("'{}' is not supported", what));
    }

    // Records a pedantic warning when a feature the statement depends on
    // isn't enabled.
    fn check_feature(&mut self, site: &Site<'_>, feature: &str) {
        if !self.model.feature_enabled(feature) {
            self.diagnostics.pedantic(
                site,
                format!("'feature {}' is not enabled", feature),
            );
        }
    }

    fn define(&mut self, kind: StructureType, name: &str, site: &Site<'_>) {
        self.structures.define(kind, name, site.line);
    }

    fn reference(
        &mut self,
        kind: StructureType,
        name: &str,
        usage: UsageKind,
        site: &Site<'_>,
    ) {
        self.structures.reference(kind, name, usage, site.line);
    }

    // Validates and records a reference to a named structure.
    fn named_reference(
        &mut self,
        site: &Site<'_>,
        token: &Token,
        domain: &LengthDomain,
        kind: StructureType,
        usage: UsageKind,
    ) -> Option<String> {
        let name = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            token,
            domain,
        )?;
        self.reference(kind, &name, usage, site);
        Some(name)
    }

    // Validates, canonicalizes and records a reference to a VRF.
    fn vrf_reference(
        &mut self,
        site: &Site<'_>,
        token: &Token,
        usage: UsageKind,
    ) -> Option<String> {
        let name = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            token,
            &validate::VRF_NAME,
        )?;
        let name = self.names.canonicalize(StructureType::Vrf, &name);
        self.reference(StructureType::Vrf, &name, usage, site);
        Some(name)
    }

    // Validates, canonicalizes and records a reference to a route-map.
    fn route_map_reference(
        &mut self,
        site: &Site<'_>,
        token: &Token,
        usage: UsageKind,
    ) -> Option<String> {
        let name = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            token,
            &validate::ROUTE_MAP_NAME,
        )?;
        let name = self.names.canonicalize(StructureType::RouteMap, &name);
        self.reference(StructureType::RouteMap, &name, usage, site);
        Some(name)
    }

    // Validates and records a reference to an interface.
    fn interface_reference(
        &mut self,
        site: &Site<'_>,
        token: &Token,
        usage: UsageKind,
    ) -> Option<String> {
        let name = validate::parse_interface_reference(
            &mut self.diagnostics,
            site,
            token,
        )?;
        self.reference(StructureType::Interface, &name, usage, site);
        Some(name)
    }

    fn enter_construct(&mut self, site: &Site<'a>, construct: &Construct) {
        match construct {
            Construct::Config => (),
            Construct::Error => self.unrecognized(site),
            Construct::Unsupported { rule } => self.unsupported(site, rule),

            // System.
            Construct::Hostname { name } => self.hostname(site, name),
            Construct::Feature { name, negated } => {
                self.feature(name, *negated)
            }
            Construct::NtpServer {
                host,
                prefer,
                use_vrf,
            } => self.ntp_server(site, host, *prefer, use_vrf.as_ref()),
            Construct::LoggingServer {
                host,
                level,
                use_vrf,
            } => self.logging_server(site, host, level.as_ref(), use_vrf.as_ref()),
            Construct::TacacsServerHost { host, port } => {
                self.tacacs_server_host(site, host, port.as_ref())
            }
            Construct::SnmpServerHost { host, community } => {
                self.snmp_server_host(host, community.as_ref())
            }

            // VRFs and static routes.
            Construct::VrfContext { name } => self.vrf_context(site, name),
            Construct::VrfDescription { text } => {
                self.vrf_description(site, text)
            }
            Construct::VrfShutdown { negated } => self.vrf_shutdown(*negated),
            Construct::VrfRd { rd } => self.vrf_rd(site, rd),
            Construct::VrfVni { vni } => self.vrf_vni(site, vni),
            Construct::VrfAddressFamily { afi, safi } => {
                self.vrf_address_family(site, afi, safi)
            }
            Construct::VrfRouteTarget {
                direction,
                value,
                evpn,
            } => self.vrf_route_target(site, *direction, value, *evpn),
            Construct::IpRoute(stmt) => self.ip_route(site, stmt),

            // Interfaces.
            Construct::Interface { names } => self.interface(site, names),
            Construct::InterfaceDescription { text } => {
                self.interface_description(site, text)
            }
            Construct::InterfaceShutdown { negated } => {
                self.interface_shutdown(*negated)
            }
            Construct::InterfaceMtu { mtu } => self.interface_mtu(site, mtu),
            Construct::InterfaceBandwidth { kbps } => {
                self.interface_bandwidth(site, kbps)
            }
            Construct::InterfaceIpAddress {
                address,
                mask,
                secondary,
                tag,
            } => self.interface_ip_address(
                site,
                address,
                mask.as_ref(),
                *secondary,
                tag.as_ref(),
            ),
            Construct::InterfaceVrfMember { name } => {
                self.interface_vrf_member(site, name)
            }
            Construct::InterfaceIpAccessGroup { name, direction } => {
                self.interface_ip_access_group(site, name, *direction)
            }
            Construct::InterfaceChannelGroup { id, mode } => {
                self.interface_channel_group(site, id, mode.as_ref())
            }
            Construct::InterfaceSwitchport { enabled } => {
                self.interface_switchport(*enabled)
            }
            Construct::InterfaceSwitchportMode { mode } => {
                self.interface_switchport_mode(site, mode)
            }
            Construct::InterfaceSwitchportAccessVlan { vlan } => {
                self.interface_switchport_access_vlan(site, vlan)
            }
            Construct::InterfaceSwitchportTrunkAllowedVlans { vlans, add } => {
                self.interface_switchport_trunk_allowed_vlans(
                    site,
                    vlans.as_ref(),
                    *add,
                )
            }
            Construct::InterfaceEncapsulationDot1q { vlan } => {
                self.interface_encapsulation_dot1q(site, vlan)
            }
            Construct::InterfaceIpRouterOspf { tag, area } => {
                self.interface_ip_router_ospf(site, tag, area)
            }
            Construct::InterfaceIpRouter { protocol, tag } => {
                self.interface_ip_router(site, *protocol, tag)
            }
            Construct::InterfaceIpOspfCost { cost } => {
                self.interface_ip_ospf_cost(site, cost)
            }
            Construct::InterfaceIpOspfHelloInterval { seconds } => {
                self.interface_ip_ospf_hello_interval(site, seconds)
            }
            Construct::InterfaceIpOspfDeadInterval { seconds } => {
                self.interface_ip_ospf_dead_interval(site, seconds)
            }
            Construct::InterfaceIpOspfPassive { negated } => {
                self.interface_ip_ospf_passive(*negated)
            }
            Construct::InterfaceIpOspfNetwork { network } => {
                self.interface_ip_ospf_network(site, network)
            }

            // IP access-lists.
            Construct::IpAccessList { name } => self.ip_access_list(site, name),
            Construct::AclRemark { seq, text } => {
                self.acl_remark(site, seq.as_ref(), text)
            }
            Construct::AclLine { seq, action } => {
                self.acl_line(site, seq.as_ref(), *action)
            }
            Construct::AclProtocol { protocol } => {
                self.acl_protocol(site, protocol)
            }
            Construct::AclSource { address } => {
                self.acl_source(site, address)
            }
            Construct::AclDestination { address } => {
                self.acl_destination(site, address)
            }
            Construct::AclPort { end, spec } => self.acl_port(site, *end, spec),
            Construct::AclPacketLength { op, lengths } => {
                self.acl_packet_length(site, *op, lengths)
            }
            Construct::AclDscp { value } => self.acl_dscp(site, value),
            Construct::AclTtl { value } => self.acl_ttl(site, value),
            Construct::AclEstablished => self.acl_established(),
            Construct::AclFragments => self.acl_fragments(),
            Construct::AclLog => self.acl_log(),
            Construct::AclIcmp { icmp_type, code } => {
                self.acl_icmp(site, icmp_type, code.as_ref())
            }

            // Object-groups.
            Construct::ObjectGroupIpAddress { name } => {
                self.object_group_ip_address(site, name)
            }
            Construct::ObjectGroupIpAddressLine { seq, address } => {
                self.object_group_ip_address_line(site, seq.as_ref(), address)
            }
            Construct::ObjectGroupIpPort { name } => {
                self.object_group_ip_port(site, name)
            }
            Construct::ObjectGroupIpPortLine { seq, op, ports } => {
                self.object_group_ip_port_line(site, seq.as_ref(), *op, ports)
            }

            // Prefix, community and AS-path lists.
            Construct::IpPrefixList(stmt) => self.ip_prefix_list(site, stmt),
            Construct::IpPrefixListDescription { af, name, text } => {
                self.ip_prefix_list_description(site, *af, name, text)
            }
            Construct::IpCommunityListStandard {
                name,
                seq,
                action,
                communities,
            } => self.ip_community_list_standard(
                site,
                name,
                seq.as_ref(),
                *action,
                communities,
            ),
            Construct::IpCommunityListExpanded {
                name,
                seq,
                action,
                regex,
            } => self.ip_community_list_expanded(
                site,
                name,
                seq.as_ref(),
                *action,
                regex,
            ),
            Construct::IpAsPathAccessList {
                name,
                seq,
                action,
                regex,
            } => self.ip_as_path_access_list(
                site,
                name,
                seq.as_ref(),
                *action,
                regex,
            ),

            // Route-maps.
            Construct::RouteMapEntry { name, action, seq } => {
                self.route_map_entry(site, name, *action, seq.as_ref())
            }
            Construct::RouteMapDescription { text } => {
                self.route_map_description(site, text)
            }
            Construct::RouteMapMatchIpAddress { names } => {
                self.route_map_match_ip_address(site, names)
            }
            Construct::RouteMapMatchIpAddressPrefixList { names } => {
                self.route_map_match_ip_address_prefix_list(site, names)
            }
            Construct::RouteMapMatchIpv6AddressPrefixList { names } => {
                self.route_map_match_ipv6_address_prefix_list(site, names)
            }
            Construct::RouteMapMatchCommunity { names, exact } => {
                self.route_map_match_community(site, names, *exact)
            }
            Construct::RouteMapMatchAsPath { names } => {
                self.route_map_match_as_path(site, names)
            }
            Construct::RouteMapMatchInterface { names } => {
                self.route_map_match_interface(site, names)
            }
            Construct::RouteMapMatchTag { tags } => {
                self.route_map_match_tag(site, tags)
            }
            Construct::RouteMapMatchMetric { metric } => {
                self.route_map_match_metric(site, metric)
            }
            Construct::RouteMapMatchSourceProtocol { protocol } => {
                self.route_map_match_source_protocol(protocol)
            }
            Construct::RouteMapSetLocalPreference { value } => {
                self.route_map_set_local_preference(site, value)
            }
            Construct::RouteMapSetMetric { value } => {
                self.route_map_set_metric(site, value)
            }
            Construct::RouteMapSetMetricType { kind } => {
                self.route_map_set_metric_type(site, kind)
            }
            Construct::RouteMapSetTag { value } => {
                self.route_map_set_tag(site, value)
            }
            Construct::RouteMapSetWeight { value } => {
                self.route_map_set_weight(site, value)
            }
            Construct::RouteMapSetOrigin { origin } => {
                self.route_map_set_origin(site, origin)
            }
            Construct::RouteMapSetCommunity {
                communities,
                additive,
            } => self.route_map_set_community(site, communities, *additive),
            Construct::RouteMapSetCommListDelete { name } => {
                self.route_map_set_comm_list_delete(site, name)
            }
            Construct::RouteMapSetAsPathPrepend { asns } => {
                self.route_map_set_as_path_prepend(site, asns)
            }
            Construct::RouteMapSetAsPathPrependLastAs { count } => {
                self.route_map_set_as_path_prepend_last_as(site, count)
            }
            Construct::RouteMapSetIpNextHop { addresses } => {
                self.route_map_set_ip_next_hop(site, addresses)
            }
            Construct::RouteMapSetIpNextHopUnchanged => {
                self.route_map_set_ip_next_hop_unchanged()
            }
            Construct::RouteMapSetIpNextHopPeerAddress => {
                self.route_map_set_ip_next_hop_peer_address()
            }
            Construct::RouteMapContinue { seq } => {
                self.route_map_continue(site, seq)
            }

            // BGP.
            Construct::RouterBgp { asn } => self.router_bgp(site, asn),
            Construct::BgpRouterId { id } => self.bgp_router_id(site, id),
            Construct::BgpClusterId { id } => self.bgp_cluster_id(site, id),
            Construct::BgpLogNeighborChanges => self.bgp_log_neighbor_changes(),
            Construct::BgpBestpathAsPathMultipathRelax => {
                self.bgp_bestpath_as_path_multipath_relax()
            }
            Construct::BgpVrf { name } => self.bgp_vrf_enter(site, name),
            Construct::BgpAddressFamily { afi, safi } => {
                self.bgp_address_family(site, afi, safi)
            }
            Construct::BgpAfNetwork { prefix, route_map } => {
                self.bgp_af_network(site, prefix, route_map.as_ref())
            }
            Construct::BgpAfRedistribute {
                protocol,
                tag,
                route_map,
            } => self.bgp_af_redistribute(site, protocol, tag.as_ref(), route_map),
            Construct::BgpAfMaximumPaths { ibgp, paths } => {
                self.bgp_af_maximum_paths(site, *ibgp, paths)
            }
            Construct::BgpAfAggregateAddress {
                prefix,
                summary_only,
                as_set,
            } => self.bgp_af_aggregate_address(
                site,
                prefix,
                *summary_only,
                *as_set,
            ),
            Construct::BgpNeighbor { address, remote_as } => {
                self.bgp_neighbor_enter(site, address, remote_as.as_ref())
            }
            Construct::BgpTemplatePeer { name } => {
                self.bgp_template_peer(site, name)
            }
            Construct::BgpNbrRemoteAs { asn } => {
                self.bgp_nbr_remote_as(site, asn)
            }
            Construct::BgpNbrDescription { text } => {
                self.bgp_nbr_description(site, text)
            }
            Construct::BgpNbrUpdateSource { interface } => {
                self.bgp_nbr_update_source(site, interface)
            }
            Construct::BgpNbrInheritPeer { template } => {
                self.bgp_nbr_inherit_peer(site, template)
            }
            Construct::BgpNbrShutdown => self.bgp_nbr_shutdown(),
            Construct::BgpNbrEbgpMultihop { ttl } => {
                self.bgp_nbr_ebgp_multihop(site, ttl)
            }
            Construct::BgpNbrLocalAs { asn } => self.bgp_nbr_local_as(site, asn),
            Construct::BgpNbrTimers {
                keepalive,
                holdtime,
            } => self.bgp_nbr_timers(site, keepalive, holdtime),
            Construct::BgpNbrAddressFamily { afi, safi } => {
                self.bgp_nbr_address_family(site, afi, safi)
            }
            Construct::BgpNbrAfRouteMap { name, direction } => {
                self.bgp_nbr_af_route_map(site, name, *direction)
            }
            Construct::BgpNbrAfPrefixList { name, direction } => {
                self.bgp_nbr_af_prefix_list(site, name, *direction)
            }
            Construct::BgpNbrAfFilterList { name, direction } => {
                self.bgp_nbr_af_filter_list(site, name, *direction)
            }
            Construct::BgpNbrAfSendCommunity { standard, extended } => {
                self.bgp_nbr_af_send_community(*standard, *extended)
            }
            Construct::BgpNbrAfNextHopSelf => self.bgp_nbr_af_next_hop_self(),
            Construct::BgpNbrAfRouteReflectorClient => {
                self.bgp_nbr_af_route_reflector_client()
            }
            Construct::BgpNbrAfAllowasIn { count } => {
                self.bgp_nbr_af_allowas_in(site, count.as_ref())
            }
            Construct::BgpNbrAfMaximumPrefix { limit } => {
                self.bgp_nbr_af_maximum_prefix(site, limit)
            }
            Construct::BgpNbrAfDefaultOriginate { route_map } => {
                self.bgp_nbr_af_default_originate(site, route_map.as_ref())
            }
            Construct::BgpNbrAfSoftReconfigurationInbound => {
                self.unsupported(site, "soft-reconfiguration inbound")
            }

            // OSPF.
            Construct::RouterOspf { tag } => self.router_ospf(site, tag),
            Construct::OspfRouterId { id } => self.ospf_router_id(site, id),
            Construct::OspfVrf { name } => self.ospf_vrf_enter(site, name),
            Construct::OspfAreaRange {
                area,
                prefix,
                not_advertise,
                cost,
            } => self.ospf_area_range(
                site,
                area,
                prefix,
                *not_advertise,
                cost.as_ref(),
            ),
            Construct::OspfAreaStub { area, no_summary } => {
                self.ospf_area_stub(site, area, *no_summary)
            }
            Construct::OspfAreaNssa { area, no_summary } => {
                self.ospf_area_nssa(site, area, *no_summary)
            }
            Construct::OspfPassiveInterfaceDefault => {
                self.ospf_passive_interface_default()
            }
            Construct::OspfAutoCost { value, unit } => {
                self.ospf_auto_cost(site, value, *unit)
            }
            Construct::OspfRedistribute {
                protocol,
                tag,
                route_map,
            } => self.ospf_redistribute(site, protocol, tag.as_ref(), route_map),
            Construct::OspfLogAdjacencyChanges { detail } => {
                self.ospf_log_adjacency_changes(*detail)
            }

            // EIGRP, RIP and IS-IS.
            Construct::RouterEigrp { tag } => self.router_eigrp(site, tag),
            Construct::EigrpAutonomousSystem { asn } => {
                self.eigrp_autonomous_system(site, asn)
            }
            Construct::EigrpRouterId { id } => self.eigrp_router_id(site, id),
            Construct::EigrpVrf { name } => self.eigrp_vrf_enter(site, name),
            Construct::RouterRip { tag } => self.router_rip(site, tag),
            Construct::RipVrf { name } => self.rip_vrf(site, name),
            Construct::RouterIsis { tag } => self.router_isis(site, tag),
            Construct::IsisNet { net } => self.isis_net(site, net),
            Construct::IsisIsType { level } => self.isis_is_type(site, level),

            // VXLAN overlay.
            Construct::NveInterface { id } => self.nve_interface(site, id),
            Construct::NveSourceInterface { interface } => {
                self.nve_source_interface(site, interface)
            }
            Construct::NveShutdown { negated } => self.nve_shutdown(*negated),
            Construct::NveHostReachabilityBgp => {
                self.nve_host_reachability_bgp()
            }
            Construct::NveMemberVni { vni, associate_vrf } => {
                self.nve_member_vni(site, vni, *associate_vrf)
            }
            Construct::NveVniIngressReplicationBgp => {
                self.nve_vni_ingress_replication_bgp()
            }
            Construct::NveVniMcastGroup { group } => {
                self.nve_vni_mcast_group(site, group)
            }
            Construct::NveVniSuppressArp => self.nve_vni_suppress_arp(),
            Construct::Evpn => self.evpn(),
            Construct::EvpnVni { vni } => self.evpn_vni_enter(site, vni),
            Construct::EvpnVniRd { rd } => self.evpn_vni_rd(site, rd),
            Construct::EvpnVniRouteTarget { direction, value } => {
                self.evpn_vni_route_target(site, *direction, value)
            }
            Construct::Vlan { vlans } => self.vlan(site, vlans),
            Construct::VlanName { name } => self.vlan_name(site, name),
            Construct::VlanVnSegment { vni } => self.vlan_vn_segment(site, vni),
        }
    }

    fn exit_construct(&mut self, construct: &Construct) {
        match construct {
            Construct::VrfContext { .. } => self.scope.exit_vrf(),
            Construct::VrfAddressFamily { .. } => self.scope.exit_vrf_af(),
            Construct::Interface { .. } => self.scope.exit_interfaces(),
            Construct::IpAccessList { .. } => self.scope.exit_acl(),
            Construct::AclLine { .. } => self.acl_line_exit(),
            Construct::ObjectGroupIpAddress { .. }
            | Construct::ObjectGroupIpPort { .. } => {
                self.scope.exit_object_group()
            }
            Construct::RouteMapEntry { .. } => {
                self.scope.exit_route_map_entry()
            }
            Construct::RouterBgp { .. } => self.scope.exit_bgp(),
            Construct::BgpVrf { .. } => self.scope.exit_bgp_vrf(),
            Construct::BgpAddressFamily { .. } => self.scope.exit_bgp_af(),
            Construct::BgpNeighbor { .. } | Construct::BgpTemplatePeer { .. } => {
                self.scope.exit_bgp_neighbor()
            }
            Construct::BgpNbrAddressFamily { .. } => {
                self.scope.exit_bgp_neighbor_af()
            }
            Construct::RouterOspf { .. } => self.scope.exit_ospf(),
            Construct::OspfVrf { .. } => self.scope.exit_ospf_vrf(),
            Construct::RouterEigrp { .. } => self.scope.exit_eigrp(),
            Construct::EigrpVrf { .. } => self.scope.exit_eigrp_vrf(),
            Construct::RouterRip { .. } => self.scope.exit_rip(),
            Construct::RouterIsis { .. } => self.scope.exit_isis(),
            Construct::NveInterface { .. } => self.scope.exit_nve(),
            Construct::NveMemberVni { .. } => self.scope.exit_nve_vni(),
            Construct::Evpn => self.scope.exit_evpn(),
            Construct::EvpnVni { .. } => self.scope.exit_evpn_vni(),
            Construct::Vlan { .. } => self.scope.exit_vlans(),
            _ => (),
        }
    }
}

impl Listener for Extractor<'_> {
    fn enter(&mut self, node: &Node) {
        let site = self.site(node);
        self.enter_construct(&site, &node.construct);
    }

    fn exit(&mut self, node: &Node) {
        self.exit_construct(&node.construct);
    }
}

// ===== global functions =====

// Extracts the configuration model of one device from its syntax tree.
pub fn extract(
    text: &str,
    tree: &Node,
    config: &ExtractorConfig,
) -> Result<Extraction, Error> {
    if tree.construct != Construct::Config {
        let error = Error::InvalidRoot(format!("{:?}", tree.construct));
        error.log();
        return Err(error);
    }

    let diagnostics = Diagnostics::new(config.diagnostics.clone());
    let mut extractor =
        Extractor::new(text, ConfigurationModel::new(), diagnostics)
            .inspect_err(|error| error.log())?;

    debug_span!("extraction").in_scope(|| {
        Debug::ExtractionStart(text.len()).log();
        walk(tree, &mut extractor);
    });

    Ok(extractor.finish())
}
