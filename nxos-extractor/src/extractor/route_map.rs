//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;
use std::str::FromStr;

use nxos_utils::bgp::Origin;

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::LineAction;
use crate::model::route_map::{
    AsPathPrepend, MetricType, RouteMap, RouteMapEntry, SetCommunity,
    SetNextHop,
};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::Token;
use crate::validate::{self, LengthDomain};

impl Extractor<'_> {
    fn route_map_entry_mut(&mut self) -> &mut RouteMapEntry {
        if let Some(Cursor::Entity((name, seq))) = &self.scope.route_map_entry {
            if let Some(entry) = self
                .model
                .route_maps
                .get_mut(name)
                .and_then(|route_map| route_map.entries.get_mut(seq))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.route_map_entry
    }

    // Validates and references every structure named by a match clause,
    // skipping the invalid names.
    fn match_names(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
        domain: &LengthDomain,
        kind: StructureType,
        usage: UsageKind,
    ) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| {
                self.named_reference(site, name, domain, kind, usage)
            })
            .collect()
    }

    fn uint32(&mut self, site: &Site<'_>, token: &Token) -> Option<u32> {
        validate::parse_in_range(
            &mut self.diagnostics,
            site,
            token,
            &validate::UINT32,
        )
    }

    pub(super) fn route_map_entry(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        action: Option<LineAction>,
        seq: Option<&Token>,
    ) {
        let name = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::ROUTE_MAP_NAME,
        );
        let seq = match seq {
            Some(seq) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                seq,
                &validate::ROUTE_MAP_SEQ,
            ),
            None => Some(RouteMapEntry::DEFAULT_SEQ),
        };
        let (Some(name), Some(seq)) = (name, seq) else {
            self.scope.route_map_entry =
                Some(self.placeholder("route-map", site));
            return;
        };

        let name = self.names.canonicalize(StructureType::RouteMap, &name);
        let route_map = self
            .model
            .route_maps
            .entry(name.clone())
            .or_insert_with(|| RouteMap::new(name.clone()));
        let entry = route_map.entries.entry(seq).or_insert_with(|| {
            RouteMapEntry::new(seq, action.unwrap_or(LineAction::Permit))
        });
        if let Some(action) = action {
            entry.action = action;
        }

        self.define(StructureType::RouteMap, &name, site);
        self.define(
            StructureType::RouteMapEntry,
            &format!("{} {}", name, seq),
            site,
        );
        self.scope.route_map_entry = Some(Cursor::Entity((name, seq)));
    }

    pub(super) fn route_map_description(&mut self, site: &Site<'_>, text: &Token) {
        if let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::ROUTE_MAP_DESCRIPTION,
        ) {
            self.route_map_entry_mut().description = Some(text);
        }
    }

    pub(super) fn route_map_match_ip_address(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
    ) {
        let names = self.match_names(
            site,
            names,
            &validate::ACL_NAME,
            StructureType::IpAccessList,
            UsageKind::RouteMapMatchIpAddress,
        );
        self.route_map_entry_mut()
            .matches
            .ip_access_lists
            .extend(names);
    }

    pub(super) fn route_map_match_ip_address_prefix_list(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
    ) {
        let names = self.match_names(
            site,
            names,
            &validate::PREFIX_LIST_NAME,
            StructureType::IpPrefixList,
            UsageKind::RouteMapMatchIpAddressPrefixList,
        );
        self.route_map_entry_mut()
            .matches
            .ip_prefix_lists
            .extend(names);
    }

    pub(super) fn route_map_match_ipv6_address_prefix_list(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
    ) {
        let names = self.match_names(
            site,
            names,
            &validate::PREFIX_LIST_NAME,
            StructureType::Ipv6PrefixList,
            UsageKind::RouteMapMatchIpv6AddressPrefixList,
        );
        self.route_map_entry_mut()
            .matches
            .ipv6_prefix_lists
            .extend(names);
    }

    pub(super) fn route_map_match_community(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
        exact: bool,
    ) {
        let names = self.match_names(
            site,
            names,
            &validate::COMMUNITY_LIST_NAME,
            StructureType::IpCommunityList,
            UsageKind::RouteMapMatchCommunity,
        );
        let matches = &mut self.route_map_entry_mut().matches;
        matches.community_lists.extend(names);
        matches.community_exact = exact;
    }

    pub(super) fn route_map_match_as_path(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
    ) {
        let names = self.match_names(
            site,
            names,
            &validate::AS_PATH_LIST_NAME,
            StructureType::IpAsPathAccessList,
            UsageKind::RouteMapMatchAsPath,
        );
        self.route_map_entry_mut().matches.as_path_lists.extend(names);
    }

    pub(super) fn route_map_match_interface(
        &mut self,
        site: &Site<'_>,
        names: &[Token],
    ) {
        let names = names
            .iter()
            .filter_map(|name| {
                self.interface_reference(
                    site,
                    name,
                    UsageKind::RouteMapMatchInterface,
                )
            })
            .collect::<Vec<_>>();
        self.route_map_entry_mut().matches.interfaces.extend(names);
    }

    pub(super) fn route_map_match_tag(&mut self, site: &Site<'_>, tags: &[Token]) {
        let tags = tags
            .iter()
            .filter_map(|tag| self.uint32(site, tag))
            .collect::<Vec<_>>();
        self.route_map_entry_mut().matches.tags.extend(tags);
    }

    pub(super) fn route_map_match_metric(&mut self, site: &Site<'_>, metric: &Token) {
        if let Some(metric) = self.uint32(site, metric) {
            self.route_map_entry_mut().matches.metric = Some(metric);
        }
    }

    pub(super) fn route_map_match_source_protocol(&mut self, protocol: &Token) {
        self.route_map_entry_mut().matches.source_protocol =
            Some(protocol.text.clone());
    }

    pub(super) fn route_map_set_local_preference(
        &mut self,
        site: &Site<'_>,
        value: &Token,
    ) {
        if let Some(value) = self.uint32(site, value) {
            self.route_map_entry_mut().sets.local_preference = Some(value);
        }
    }

    pub(super) fn route_map_set_metric(&mut self, site: &Site<'_>, value: &Token) {
        if let Some(value) = self.uint32(site, value) {
            self.route_map_entry_mut().sets.metric = Some(value);
        }
    }

    pub(super) fn route_map_set_metric_type(
        &mut self,
        site: &Site<'_>,
        kind: &Token,
    ) {
        let Some(metric_type) = MetricType::from_keyword(kind.as_str()) else {
            self.diagnostics.red_flag(
                site,
                format!("unknown metric-type '{}'", kind.text),
            );
            return;
        };
        self.route_map_entry_mut().sets.metric_type = Some(metric_type);
    }

    pub(super) fn route_map_set_tag(&mut self, site: &Site<'_>, value: &Token) {
        if let Some(value) = self.uint32(site, value) {
            self.route_map_entry_mut().sets.tag = Some(value);
        }
    }

    pub(super) fn route_map_set_weight(&mut self, site: &Site<'_>, value: &Token) {
        if let Some(weight) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            value,
            &validate::ROUTE_MAP_WEIGHT,
        ) {
            self.route_map_entry_mut().sets.weight = Some(weight);
        }
    }

    pub(super) fn route_map_set_origin(&mut self, site: &Site<'_>, origin: &Token) {
        let Ok(origin) = Origin::from_str(origin.as_str()) else {
            self.diagnostics
                .red_flag(site, format!("invalid origin: '{}'", origin.text));
            return;
        };
        self.route_map_entry_mut().sets.origin = Some(origin);
    }

    pub(super) fn route_map_set_community(
        &mut self,
        site: &Site<'_>,
        communities: &[Token],
        additive: bool,
    ) {
        let mut parsed = BTreeSet::new();
        for community in communities {
            let Some(community) = validate::parse_community(
                &mut self.diagnostics,
                site,
                community,
            ) else {
                return;
            };
            parsed.insert(community);
        }
        self.route_map_entry_mut().sets.community = Some(SetCommunity {
            communities: parsed,
            additive,
        });
    }

    pub(super) fn route_map_set_comm_list_delete(
        &mut self,
        site: &Site<'_>,
        name: &Token,
    ) {
        if let Some(name) = self.named_reference(
            site,
            name,
            &validate::COMMUNITY_LIST_NAME,
            StructureType::IpCommunityList,
            UsageKind::RouteMapSetCommListDelete,
        ) {
            self.route_map_entry_mut().sets.comm_list_delete = Some(name);
        }
    }

    pub(super) fn route_map_set_as_path_prepend(
        &mut self,
        site: &Site<'_>,
        asns: &[Token],
    ) {
        let mut parsed = Vec::with_capacity(asns.len());
        for asn in asns {
            let Some(asn) = validate::parse_asn(&mut self.diagnostics, site, asn)
            else {
                return;
            };
            parsed.push(asn);
        }
        self.route_map_entry_mut().sets.as_path_prepend =
            Some(AsPathPrepend::Asns(parsed));
    }

    pub(super) fn route_map_set_as_path_prepend_last_as(
        &mut self,
        site: &Site<'_>,
        count: &Token,
    ) {
        if let Some(count) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            count,
            &validate::AS_PATH_PREPEND_LAST_AS,
        ) {
            self.route_map_entry_mut().sets.as_path_prepend =
                Some(AsPathPrepend::LastAs(count));
        }
    }

    pub(super) fn route_map_set_ip_next_hop(
        &mut self,
        site: &Site<'_>,
        addresses: &[Token],
    ) {
        let mut parsed = Vec::with_capacity(addresses.len());
        for address in addresses {
            let Some(address) = validate::parse_ip(
                &mut self.diagnostics,
                site,
                address,
                "next-hop",
            ) else {
                return;
            };
            parsed.push(address);
        }
        self.route_map_entry_mut().sets.next_hop =
            Some(SetNextHop::Addresses(parsed));
    }

    pub(super) fn route_map_set_ip_next_hop_unchanged(&mut self) {
        self.route_map_entry_mut().sets.next_hop = Some(SetNextHop::Unchanged);
    }

    pub(super) fn route_map_set_ip_next_hop_peer_address(&mut self) {
        self.route_map_entry_mut().sets.next_hop =
            Some(SetNextHop::PeerAddress);
    }

    // `continue SEQ` must point forward.
    pub(super) fn route_map_continue(&mut self, site: &Site<'_>, seq: &Token) {
        let Some(target) = validate::parse_in_range::<u16>(
            &mut self.diagnostics,
            site,
            seq,
            &validate::ROUTE_MAP_CONTINUE,
        ) else {
            return;
        };
        if let Some(Cursor::Entity((name, current))) =
            self.scope.route_map_entry.clone()
        {
            if target <= current {
                self.diagnostics.red_flag(
                    site,
                    format!(
                        "continue target {} must be greater than the entry sequence {}",
                        target, current
                    ),
                );
                return;
            }
            self.reference(
                StructureType::RouteMapEntry,
                &format!("{} {}", name, target),
                UsageKind::RouteMapContinue,
                site,
            );
        }
        self.route_map_entry_mut().continue_seq = Some(target);
    }
}
