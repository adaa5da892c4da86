//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use nxos_utils::bgp::AfiSafi;

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::DEFAULT_VRF_NAME;
use crate::model::vrf::{StaticRoute, Vrf, VrfAddressFamily};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::{IpRouteStmt, RtDirection, Token};
use crate::validate;

impl Extractor<'_> {
    // VRF being configured. Statements outside `vrf context` apply to the
    // default VRF.
    fn vrf(&mut self) -> &mut Vrf {
        let name = match &self.scope.vrf {
            None => DEFAULT_VRF_NAME,
            Some(Cursor::Entity(name)) => name.as_str(),
            Some(Cursor::Placeholder) => {
                return &mut self.scope.placeholders.vrf;
            }
        };
        match self.model.vrfs.get_mut(name) {
            Some(vrf) => vrf,
            None => &mut self.scope.placeholders.vrf,
        }
    }

    fn vrf_af(&mut self) -> &mut VrfAddressFamily {
        let name = match &self.scope.vrf {
            None => Some(DEFAULT_VRF_NAME),
            Some(Cursor::Entity(name)) => Some(name.as_str()),
            Some(Cursor::Placeholder) => None,
        };
        if let (Some(name), Some(Cursor::Entity(af))) =
            (name, &self.scope.vrf_af)
        {
            if let Some(entry) = self
                .model
                .vrfs
                .get_mut(name)
                .and_then(|vrf| vrf.address_families.get_mut(af))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.vrf_af
    }

    pub(super) fn vrf_context(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::VRF_NAME,
        ) else {
            self.scope.vrf = Some(self.placeholder("vrf", site));
            return;
        };

        let name = self.names.canonicalize(StructureType::Vrf, &name);
        self.model
            .vrfs
            .entry(name.clone())
            .or_insert_with(|| Vrf::new(name.clone()));
        self.define(StructureType::Vrf, &name, site);
        self.scope.vrf = Some(Cursor::Entity(name));
    }

    pub(super) fn vrf_description(&mut self, site: &Site<'_>, text: &Token) {
        if let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::VRF_DESCRIPTION,
        ) {
            self.vrf().description = Some(text);
        }
    }

    pub(super) fn vrf_shutdown(&mut self, negated: bool) {
        self.vrf().shutdown = !negated;
    }

    pub(super) fn vrf_rd(&mut self, site: &Site<'_>, rd: &Token) {
        if let Some(rd) = validate::parse_rd(&mut self.diagnostics, site, rd) {
            self.vrf().rd = Some(rd);
        }
    }

    pub(super) fn vrf_vni(&mut self, site: &Site<'_>, vni: &Token) {
        if let Some(vni) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            vni,
            &validate::VNI,
        ) {
            self.vrf().vni = Some(vni);
        }
    }

    pub(super) fn vrf_address_family(
        &mut self,
        site: &Site<'_>,
        afi: &Token,
        safi: &Token,
    ) {
        match AfiSafi::from_keywords(afi.as_str(), safi.as_str()) {
            Some(af @ (AfiSafi::Ipv4Unicast | AfiSafi::Ipv6Unicast)) => {
                self.vrf().address_families.entry(af).or_default();
                self.scope.vrf_af = Some(Cursor::Entity(af));
            }
            Some(af) => {
                self.unsupported(site, &format!("vrf address-family {}", af));
                self.scope.vrf_af = Some(self.placeholder("vrf-af", site));
            }
            None => {
                self.diagnostics.red_flag(
                    site,
                    format!(
                        "unknown address-family '{} {}'",
                        afi.text, safi.text
                    ),
                );
                self.scope.vrf_af = Some(self.placeholder("vrf-af", site));
            }
        }
    }

    pub(super) fn vrf_route_target(
        &mut self,
        site: &Site<'_>,
        direction: RtDirection,
        value: &Token,
        evpn: bool,
    ) {
        let Some(rt) =
            validate::parse_route_target(&mut self.diagnostics, site, value)
        else {
            return;
        };
        let (import, export) = rt_direction(direction);
        self.vrf_af().route_targets.add(import, export, evpn, rt);
    }

    pub(super) fn ip_route(&mut self, site: &Site<'_>, stmt: &IpRouteStmt) {
        // Required fields: the route is dropped when any of them is invalid.
        let Some(prefix) = validate::parse_prefix(
            &mut self.diagnostics,
            site,
            &stmt.prefix,
            "static route prefix",
        ) else {
            return;
        };
        let mut route = StaticRoute::new(prefix);
        if let Some(interface) = &stmt.next_hop_interface {
            if interface.as_str().eq_ignore_ascii_case("null0") {
                route.discard = true;
            } else {
                let Some(interface) = self.interface_reference(
                    site,
                    interface,
                    UsageKind::IpRouteNextHopInterface,
                ) else {
                    return;
                };
                route.next_hop_interface = Some(interface);
            }
        }
        if let Some(next_hop) = &stmt.next_hop_ip {
            let Some(next_hop) = validate::parse_ip(
                &mut self.diagnostics,
                site,
                next_hop,
                "static route next-hop",
            ) else {
                return;
            };
            route.next_hop_ip = Some(next_hop);
        }
        if let Some(vrf) = &stmt.next_hop_vrf {
            let Some(vrf) =
                self.vrf_reference(site, vrf, UsageKind::IpRouteNextHopVrf)
            else {
                return;
            };
            route.next_hop_vrf = Some(vrf);
        }

        // Optional attributes fall back to their defaults.
        if let Some(name) = &stmt.name {
            route.name = validate::parse_in_length(
                &mut self.diagnostics,
                site,
                name,
                &validate::STATIC_ROUTE_NAME,
            );
        }
        if let Some(tag) = &stmt.tag {
            route.tag = validate::parse_in_range(
                &mut self.diagnostics,
                site,
                tag,
                &validate::STATIC_ROUTE_TAG,
            )
            .unwrap_or(route.tag);
        }
        if let Some(preference) = &stmt.preference {
            route.preference = validate::parse_in_range(
                &mut self.diagnostics,
                site,
                preference,
                &validate::STATIC_ROUTE_PREFERENCE,
            )
            .unwrap_or(route.preference);
        }
        if let Some(track) = &stmt.track {
            route.track = validate::parse_in_range(
                &mut self.diagnostics,
                site,
                track,
                &validate::STATIC_ROUTE_TRACK,
            );
        }

        self.vrf().static_routes.push(route);
    }
}

// ===== helper functions =====

// Whether a route target is imported, exported or both.
pub(super) fn rt_direction(direction: RtDirection) -> (bool, bool) {
    match direction {
        RtDirection::Import => (true, false),
        RtDirection::Export => (false, true),
        RtDirection::Both => (true, true),
    }
}
