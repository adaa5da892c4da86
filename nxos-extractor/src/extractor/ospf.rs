//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::ospf::{
    LogAdjacencyChanges, OspfArea, OspfAreaRange, OspfAreaType, OspfProcess,
    OspfVrf,
};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::{BandwidthUnit, Token};
use crate::validate;

const OSPF_BACKBONE_AREA: u32 = 0;

impl Extractor<'_> {
    fn ospf_vrf(&mut self) -> &mut OspfVrf {
        if let (Some(Cursor::Entity(tag)), Some(Cursor::Entity(vrf))) =
            (&self.scope.ospf, &self.scope.ospf_vrf)
        {
            if let Some(entry) = self
                .model
                .ospf_processes
                .get_mut(tag)
                .and_then(|process| process.vrfs.get_mut(vrf))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.ospf_vrf
    }

    fn ospf_area(&mut self, area: u32) -> &mut OspfArea {
        self.ospf_vrf().areas.entry(area).or_default()
    }

    pub(super) fn router_ospf(&mut self, site: &Site<'_>, tag: &Token) {
        self.check_feature(site, "ospf");
        let Some(tag) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            tag,
            &validate::OSPF_PROCESS_TAG,
        ) else {
            let cursor = self.placeholder("router-ospf", site);
            self.scope.enter_ospf(cursor);
            return;
        };

        let tag = self.names.canonicalize(StructureType::RouterOspf, &tag);
        self.model
            .ospf_processes
            .entry(tag.clone())
            .or_insert_with(|| OspfProcess::new(tag.clone()));
        self.define(StructureType::RouterOspf, &tag, site);
        self.scope.enter_ospf(Cursor::Entity(tag));
    }

    pub(super) fn ospf_router_id(&mut self, site: &Site<'_>, id: &Token) {
        if let Some(id) =
            validate::parse_ipv4(&mut self.diagnostics, site, id, "router-id")
        {
            self.ospf_vrf().router_id = Some(id);
        }
    }

    pub(super) fn ospf_vrf_enter(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = self.vrf_reference(site, name, UsageKind::OspfVrf)
        else {
            self.scope.ospf_vrf = Some(self.placeholder("router-ospf-vrf", site));
            return;
        };
        if let Some(Cursor::Entity(tag)) = &self.scope.ospf {
            if let Some(process) = self.model.ospf_processes.get_mut(tag) {
                process
                    .vrfs
                    .entry(name.clone())
                    .or_insert_with(|| OspfVrf::new(name.clone()));
            }
        }
        self.scope.ospf_vrf = Some(Cursor::Entity(name));
    }

    pub(super) fn ospf_area_range(
        &mut self,
        site: &Site<'_>,
        area: &Token,
        prefix: &Token,
        not_advertise: bool,
        cost: Option<&Token>,
    ) {
        let Some(area) =
            validate::parse_ospf_area(&mut self.diagnostics, site, area)
        else {
            return;
        };
        let Some(prefix) = validate::parse_prefix(
            &mut self.diagnostics,
            site,
            prefix,
            "area range",
        ) else {
            return;
        };
        let cost = cost.and_then(|cost| {
            validate::parse_in_range(
                &mut self.diagnostics,
                site,
                cost,
                &validate::OSPF_AREA_RANGE_COST,
            )
        });
        self.ospf_area(area).ranges.insert(
            prefix,
            OspfAreaRange {
                advertise: !not_advertise,
                cost,
            },
        );
    }

    pub(super) fn ospf_area_stub(
        &mut self,
        site: &Site<'_>,
        area: &Token,
        no_summary: bool,
    ) {
        self.ospf_area_type(site, area, OspfAreaType::Stub { no_summary });
    }

    pub(super) fn ospf_area_nssa(
        &mut self,
        site: &Site<'_>,
        area: &Token,
        no_summary: bool,
    ) {
        self.ospf_area_type(site, area, OspfAreaType::Nssa { no_summary });
    }

    // The backbone area is always a normal area.
    fn ospf_area_type(
        &mut self,
        site: &Site<'_>,
        area: &Token,
        area_type: OspfAreaType,
    ) {
        let Some(area) =
            validate::parse_ospf_area(&mut self.diagnostics, site, area)
        else {
            return;
        };
        if area == OSPF_BACKBONE_AREA {
            self.diagnostics.red_flag(
                site,
                "the backbone area can't be configured as stub or nssa",
            );
            return;
        }
        self.ospf_area(area).area_type = area_type;
    }

    pub(super) fn ospf_passive_interface_default(&mut self) {
        self.ospf_vrf().passive_interface_default = true;
    }

    // Stored in Mbps.
    pub(super) fn ospf_auto_cost(
        &mut self,
        site: &Site<'_>,
        value: &Token,
        unit: BandwidthUnit,
    ) {
        let mbps = match unit {
            BandwidthUnit::Mbps => validate::parse_in_range::<u32>(
                &mut self.diagnostics,
                site,
                value,
                &validate::OSPF_AUTO_COST_MBPS,
            ),
            BandwidthUnit::Gbps => validate::parse_in_range::<u32>(
                &mut self.diagnostics,
                site,
                value,
                &validate::OSPF_AUTO_COST_GBPS,
            )
            .map(|gbps| gbps * 1000),
        };
        if let Some(mbps) = mbps {
            self.ospf_vrf().auto_cost_reference_bandwidth = Some(mbps);
        }
    }

    pub(super) fn ospf_redistribute(
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
            UsageKind::OspfRedistributeInstance,
        ) else {
            return;
        };
        let Some(route_map) = self.route_map_reference(
            site,
            route_map,
            UsageKind::OspfRedistributeRouteMap,
        ) else {
            return;
        };
        self.ospf_vrf().redistribute.insert(key, route_map);
    }

    pub(super) fn ospf_log_adjacency_changes(&mut self, detail: bool) {
        self.ospf_vrf().log_adjacency_changes = Some(if detail {
            LogAdjacencyChanges::Detail
        } else {
            LogAdjacencyChanges::Brief
        });
    }
}
