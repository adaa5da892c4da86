//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use nxos_utils::num::next_sequence;

use crate::debug::Debug;
use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::object_group::{AddressGroup, ObjectGroup, PortGroup};
use crate::scope::Cursor;
use crate::structures::StructureType;
use crate::tree::{AclAddress, MatchOperator, Token};
use crate::validate;

const OBJECT_GROUP_SEQ_FIRST: u32 = 10;
const OBJECT_GROUP_SEQ_STEP: u32 = 10;

impl Extractor<'_> {
    fn address_group(&mut self) -> &mut AddressGroup {
        if let Some(Cursor::Entity(name)) = &self.scope.object_group {
            if let Some(ObjectGroup::IpAddress(group)) =
                self.model.object_groups.get_mut(name)
            {
                return group;
            }
        }
        &mut self.scope.placeholders.address_group
    }

    fn port_group(&mut self) -> &mut PortGroup {
        if let Some(Cursor::Entity(name)) = &self.scope.object_group {
            if let Some(ObjectGroup::IpPort(group)) =
                self.model.object_groups.get_mut(name)
            {
                return group;
            }
        }
        &mut self.scope.placeholders.port_group
    }

    // Enters an object-group of the given kind. A name already used by a
    // group of another kind leaves the existing group untouched.
    fn object_group_enter(
        &mut self,
        site: &Site<'_>,
        name: &Token,
        kind: StructureType,
    ) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::OBJECT_GROUP_NAME,
        ) else {
            self.scope.object_group =
                Some(self.placeholder("object-group", site));
            return;
        };

        if let Some(existing) = self.model.object_groups.get(&name) {
            let existing = existing.structure_type();
            if existing != kind {
                Debug::StructureConflict(&name, existing, kind).log();
                self.diagnostics.red_flag(
                    site,
                    format!(
                        "object-group '{}' is already defined as {}",
                        name,
                        existing.description()
                    ),
                );
                self.scope.object_group =
                    Some(self.placeholder("object-group", site));
                return;
            }
        } else {
            let group = match kind {
                StructureType::ObjectGroupIpPort => {
                    ObjectGroup::IpPort(PortGroup::new(name.clone()))
                }
                _ => ObjectGroup::IpAddress(AddressGroup::new(name.clone())),
            };
            self.model.object_groups.insert(name.clone(), group);
        }

        self.define(kind, &name, site);
        self.scope.object_group = Some(Cursor::Entity(name));
    }

    fn object_group_seq(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        last: Option<u32>,
    ) -> Option<u32> {
        match seq {
            Some(seq) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                seq,
                &validate::OBJECT_GROUP_SEQ,
            ),
            None => Some(next_sequence(
                last,
                OBJECT_GROUP_SEQ_FIRST,
                OBJECT_GROUP_SEQ_STEP,
            )),
        }
    }

    pub(super) fn object_group_ip_address(
        &mut self,
        site: &Site<'_>,
        name: &Token,
    ) {
        self.object_group_enter(site, name, StructureType::ObjectGroupIpAddress);
    }

    pub(super) fn object_group_ip_address_line(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        address: &AclAddress,
    ) {
        let last = self.address_group().lines.keys().next_back().copied();
        let Some(seq) = self.object_group_seq(site, seq, last) else {
            return;
        };
        let Some(spec) = self.address_spec(site, address, None) else {
            return;
        };
        self.address_group().lines.insert(seq, spec);
    }

    pub(super) fn object_group_ip_port(&mut self, site: &Site<'_>, name: &Token) {
        self.object_group_enter(site, name, StructureType::ObjectGroupIpPort);
    }

    pub(super) fn object_group_ip_port_line(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        op: MatchOperator,
        ports: &[Token],
    ) {
        let last = self.port_group().lines.keys().next_back().copied();
        let Some(seq) = self.object_group_seq(site, seq, last) else {
            return;
        };
        let Some(ports) = validate::parse_operator_values(
            &mut self.diagnostics,
            site,
            op,
            ports,
            &validate::PORT_NUMBER,
        ) else {
            return;
        };
        self.port_group().lines.insert(seq, ports);
    }
}
