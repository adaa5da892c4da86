//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::igp::{
    EigrpProcess, EigrpVrf, IsisLevel, IsisProcess, RipProcess,
};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::Token;
use crate::validate;

impl Extractor<'_> {
    fn eigrp_vrf(&mut self) -> &mut EigrpVrf {
        if let (Some(Cursor::Entity(tag)), Some(Cursor::Entity(vrf))) =
            (&self.scope.eigrp, &self.scope.eigrp_vrf)
        {
            if let Some(entry) = self
                .model
                .eigrp_processes
                .get_mut(tag)
                .and_then(|process| process.vrfs.get_mut(vrf))
            {
                return entry;
            }
        }
        &mut self.scope.placeholders.eigrp_vrf
    }

    fn rip(&mut self) -> &mut RipProcess {
        if let Some(Cursor::Entity(tag)) = &self.scope.rip {
            if let Some(process) = self.model.rip_processes.get_mut(tag) {
                return process;
            }
        }
        &mut self.scope.placeholders.rip
    }

    fn isis(&mut self) -> &mut IsisProcess {
        if let Some(Cursor::Entity(tag)) = &self.scope.isis {
            if let Some(process) = self.model.isis_processes.get_mut(tag) {
                return process;
            }
        }
        &mut self.scope.placeholders.isis
    }

    // Validates a routing process tag and returns its canonical form.
    fn process_tag(
        &mut self,
        site: &Site<'_>,
        tag: &Token,
        kind: StructureType,
    ) -> Option<String> {
        let tag = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            tag,
            &validate::PROCESS_TAG,
        )?;
        Some(self.names.canonicalize(kind, &tag))
    }

    // ===== EIGRP =====

    pub(super) fn router_eigrp(&mut self, site: &Site<'_>, tag: &Token) {
        self.check_feature(site, "eigrp");
        let Some(name) = self.process_tag(site, tag, StructureType::RouterEigrp)
        else {
            let cursor = self.placeholder("router-eigrp", site);
            self.scope.enter_eigrp(cursor);
            return;
        };

        // A numeric tag doubles as the autonomous system number.
        let asn = if tag.as_str().bytes().all(|b| b.is_ascii_digit()) {
            validate::parse_in_range(
                &mut self.diagnostics,
                site,
                tag,
                &validate::EIGRP_ASN,
            )
        } else {
            None
        };
        self.model
            .eigrp_processes
            .entry(name.clone())
            .or_insert_with(|| EigrpProcess::new(name.clone(), asn));
        self.define(StructureType::RouterEigrp, &name, site);
        self.scope.enter_eigrp(Cursor::Entity(name));
    }

    pub(super) fn eigrp_autonomous_system(
        &mut self,
        site: &Site<'_>,
        asn: &Token,
    ) {
        if let Some(asn) = validate::parse_in_range(
            &mut self.diagnostics,
            site,
            asn,
            &validate::EIGRP_ASN,
        ) {
            self.eigrp_vrf().asn = Some(asn);
        }
    }

    pub(super) fn eigrp_router_id(&mut self, site: &Site<'_>, id: &Token) {
        if let Some(id) =
            validate::parse_ipv4(&mut self.diagnostics, site, id, "router-id")
        {
            self.eigrp_vrf().router_id = Some(id);
        }
    }

    pub(super) fn eigrp_vrf_enter(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = self.vrf_reference(site, name, UsageKind::EigrpVrf)
        else {
            self.scope.eigrp_vrf = Some(self.placeholder("router-eigrp-vrf", site));
            return;
        };
        if let Some(Cursor::Entity(tag)) = &self.scope.eigrp {
            if let Some(process) = self.model.eigrp_processes.get_mut(tag) {
                process.vrfs.entry(name.clone()).or_insert_with(|| EigrpVrf {
                    name: name.clone(),
                    ..Default::default()
                });
            }
        }
        self.scope.eigrp_vrf = Some(Cursor::Entity(name));
    }

    // ===== RIP =====

    pub(super) fn router_rip(&mut self, site: &Site<'_>, tag: &Token) {
        self.check_feature(site, "rip");
        let Some(tag) = self.process_tag(site, tag, StructureType::RouterRip)
        else {
            self.scope.rip = Some(self.placeholder("router-rip", site));
            return;
        };
        self.model
            .rip_processes
            .entry(tag.clone())
            .or_insert_with(|| RipProcess::new(tag.clone()));
        self.define(StructureType::RouterRip, &tag, site);
        self.scope.rip = Some(Cursor::Entity(tag));
    }

    // RIP keeps no per-VRF settings. The VRF is recorded on the process and
    // opens no scope of its own.
    pub(super) fn rip_vrf(&mut self, site: &Site<'_>, name: &Token) {
        if let Some(name) = self.vrf_reference(site, name, UsageKind::RipVrf) {
            self.rip().vrfs.insert(name);
        }
    }

    // ===== IS-IS =====

    pub(super) fn router_isis(&mut self, site: &Site<'_>, tag: &Token) {
        self.check_feature(site, "isis");
        let Some(tag) = self.process_tag(site, tag, StructureType::RouterIsis)
        else {
            self.scope.isis = Some(self.placeholder("router-isis", site));
            return;
        };
        self.model
            .isis_processes
            .entry(tag.clone())
            .or_insert_with(|| IsisProcess::new(tag.clone()));
        self.define(StructureType::RouterIsis, &tag, site);
        self.scope.isis = Some(Cursor::Entity(tag));
    }

    pub(super) fn isis_net(&mut self, site: &Site<'_>, net: &Token) {
        let Some(net) =
            validate::parse_isis_net(&mut self.diagnostics, site, net)
        else {
            return;
        };
        let isis = self.isis();
        if !isis.nets.contains(&net) {
            isis.nets.push(net);
        }
    }

    pub(super) fn isis_is_type(&mut self, site: &Site<'_>, level: &Token) {
        let Some(level) = IsisLevel::from_keyword(level.as_str()) else {
            self.diagnostics
                .red_flag(site, format!("unknown is-type '{}'", level.text));
            return;
        };
        self.isis().is_type = Some(level);
    }
}
