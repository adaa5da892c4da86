//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use ipnetwork::{IpNetwork, Ipv4Network};
use nxos_utils::ip::{AddressFamily, Ipv4AddrExt, Ipv4NetworkExt};
use nxos_utils::num::next_sequence;

use crate::diagnostics::Site;
use crate::extractor::Extractor;
use crate::model::LineAction;
use crate::model::acl::{
    AclLine, AclLineBuilder, ActionLine, AddressSpec, IpAccessList, PortSpec,
};
use crate::scope::Cursor;
use crate::structures::{StructureType, UsageKind};
use crate::tree::{AclAddress, MatchOperator, PortEnd, PortMatch, Token};
use crate::validate;

const ACL_SEQ_FIRST: u32 = 10;
const ACL_SEQ_STEP: u32 = 10;

impl Extractor<'_> {
    fn acl(&mut self) -> &mut IpAccessList {
        if let Some(Cursor::Entity(name)) = &self.scope.acl {
            if let Some(acl) = self.model.ip_access_lists.get_mut(name) {
                return acl;
            }
        }
        &mut self.scope.placeholders.acl
    }

    // Applies a validated option to the ACL line being built. A failed
    // option makes the whole line unusable.
    fn update_acl_line<T>(
        &mut self,
        value: Option<T>,
        apply: impl FnOnce(&mut ActionLine, T),
    ) {
        let Some(builder) = &mut self.scope.acl_line else {
            return;
        };
        match value {
            Some(value) => apply(&mut builder.line, value),
            None => builder.invalidate(),
        }
    }

    // Sequence number of a new line: explicit, or ten past the last line.
    fn acl_seq(&mut self, site: &Site<'_>, seq: Option<&Token>) -> Option<u32> {
        match seq {
            Some(seq) => validate::parse_in_range(
                &mut self.diagnostics,
                site,
                seq,
                &validate::ACL_SEQ,
            ),
            None => Some(next_sequence(
                self.acl().last_seq(),
                ACL_SEQ_FIRST,
                ACL_SEQ_STEP,
            )),
        }
    }

    pub(super) fn ip_access_list(&mut self, site: &Site<'_>, name: &Token) {
        let Some(name) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            name,
            &validate::ACL_NAME,
        ) else {
            self.scope.acl = Some(self.placeholder("ip-access-list", site));
            return;
        };

        self.model
            .ip_access_lists
            .entry(name.clone())
            .or_insert_with(|| IpAccessList::new(name.clone()));
        self.define(StructureType::IpAccessList, &name, site);
        self.scope.acl = Some(Cursor::Entity(name));
    }

    pub(super) fn acl_remark(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        text: &Token,
    ) {
        let Some(seq) = self.acl_seq(site, seq) else {
            return;
        };
        let Some(text) = validate::parse_in_length(
            &mut self.diagnostics,
            site,
            text,
            &validate::ACL_REMARK,
        ) else {
            return;
        };
        self.acl().lines.insert(seq, AclLine::Remark(text));
    }

    pub(super) fn acl_line(
        &mut self,
        site: &Site<'_>,
        seq: Option<&Token>,
        action: LineAction,
    ) {
        self.scope.acl_line = self.acl_seq(site, seq).map(|seq| {
            AclLineBuilder::new(seq, action, site.excerpt.to_owned())
        });
    }

    pub(super) fn acl_line_exit(&mut self) {
        if let Some(builder) = self.scope.acl_line.take() {
            let (seq, line) = builder.build();
            self.acl().lines.insert(seq, line);
        }
    }

    pub(super) fn acl_protocol(&mut self, site: &Site<'_>, protocol: &Token) {
        // `ip` matches every protocol.
        let protocol = if protocol.as_str() == "ip" {
            Some(None)
        } else {
            validate::parse_keyword_or_number::<u8>(
                &mut self.diagnostics,
                site,
                protocol,
                &validate::IP_PROTOCOL,
            )
            .map(Some)
        };
        self.update_acl_line(protocol, |line, protocol| {
            line.protocol = protocol;
        });
    }

    pub(super) fn acl_source(&mut self, site: &Site<'_>, address: &AclAddress) {
        let spec = self.address_spec(
            site,
            address,
            Some(UsageKind::IpAccessListSourceAddrGroup),
        );
        self.update_acl_line(spec, |line, spec| line.source = spec);
    }

    pub(super) fn acl_destination(
        &mut self,
        site: &Site<'_>,
        address: &AclAddress,
    ) {
        let spec = self.address_spec(
            site,
            address,
            Some(UsageKind::IpAccessListDestinationAddrGroup),
        );
        self.update_acl_line(spec, |line, spec| line.destination = spec);
    }

    pub(super) fn acl_port(
        &mut self,
        site: &Site<'_>,
        end: PortEnd,
        spec: &PortMatch,
    ) {
        let spec = match spec {
            PortMatch::Operator { op, ports } => {
                validate::parse_operator_values(
                    &mut self.diagnostics,
                    site,
                    *op,
                    ports,
                    &validate::PORT_NUMBER,
                )
                .map(PortSpec::Ports)
            }
            PortMatch::PortGroup(name) => {
                let usage = match end {
                    PortEnd::Source => UsageKind::IpAccessListSourcePortGroup,
                    PortEnd::Destination => {
                        UsageKind::IpAccessListDestinationPortGroup
                    }
                };
                self.named_reference(
                    site,
                    name,
                    &validate::OBJECT_GROUP_NAME,
                    StructureType::ObjectGroupIpPort,
                    usage,
                )
                .map(PortSpec::PortGroup)
            }
        };
        self.update_acl_line(spec, |line, spec| match end {
            PortEnd::Source => line.source_ports = Some(spec),
            PortEnd::Destination => line.destination_ports = Some(spec),
        });
    }

    pub(super) fn acl_packet_length(
        &mut self,
        site: &Site<'_>,
        op: MatchOperator,
        lengths: &[Token],
    ) {
        let lengths = validate::parse_operator_numbers(
            &mut self.diagnostics,
            site,
            op,
            lengths,
            &validate::PACKET_LENGTH,
        );
        self.update_acl_line(lengths, |line, lengths| {
            line.packet_length = Some(lengths);
        });
    }

    pub(super) fn acl_dscp(&mut self, site: &Site<'_>, value: &Token) {
        let dscp = validate::parse_keyword_or_number::<u8>(
            &mut self.diagnostics,
            site,
            value,
            &validate::DSCP,
        );
        self.update_acl_line(dscp, |line, dscp| line.dscp = Some(dscp));
    }

    pub(super) fn acl_ttl(&mut self, site: &Site<'_>, value: &Token) {
        let ttl = validate::parse_in_range::<u8>(
            &mut self.diagnostics,
            site,
            value,
            &validate::ACL_TTL,
        );
        self.update_acl_line(ttl, |line, ttl| line.ttl = Some(ttl));
    }

    pub(super) fn acl_established(&mut self) {
        self.update_acl_line(Some(()), |line, _| line.established = true);
    }

    pub(super) fn acl_fragments(&mut self) {
        self.update_acl_line(Some(()), |line, _| line.fragments = true);
    }

    pub(super) fn acl_log(&mut self) {
        self.update_acl_line(Some(()), |line, _| line.log = true);
    }

    pub(super) fn acl_icmp(
        &mut self,
        site: &Site<'_>,
        icmp_type: &Token,
        code: Option<&Token>,
    ) {
        let icmp_type = validate::parse_keyword_or_number::<u8>(
            &mut self.diagnostics,
            site,
            icmp_type,
            &validate::ICMP_TYPE,
        );
        let code = match code {
            Some(code) => validate::parse_in_range::<u8>(
                &mut self.diagnostics,
                site,
                code,
                &validate::ICMP_CODE,
            )
            .map(Some),
            None => Some(None),
        };
        self.update_acl_line(icmp_type.zip(code), |line, (icmp_type, code)| {
            line.icmp_type = Some(icmp_type);
            line.icmp_code = code;
        });
    }

    // Resolves the address matched by an ACL or address object-group line.
    // Address groups are only accepted where a usage is given.
    pub(super) fn address_spec(
        &mut self,
        site: &Site<'_>,
        address: &AclAddress,
        group_usage: Option<UsageKind>,
    ) -> Option<AddressSpec> {
        match address {
            AclAddress::Any => Some(AddressSpec::Any),
            AclAddress::Host(address) => validate::parse_ipv4(
                &mut self.diagnostics,
                site,
                address,
                "host address",
            )
            .map(|address| AddressSpec::Prefix(Ipv4Network::from(address))),
            AclAddress::Prefix(prefix) => {
                match validate::parse_prefix_af(
                    &mut self.diagnostics,
                    site,
                    prefix,
                    AddressFamily::Ipv4,
                    "prefix",
                )? {
                    IpNetwork::V4(prefix) => Some(AddressSpec::Prefix(prefix)),
                    IpNetwork::V6(_) => None,
                }
            }
            AclAddress::Wildcard { address, wildcard } => {
                let (address, wildcard) = validate::parse_wildcard(
                    &mut self.diagnostics,
                    site,
                    address,
                    wildcard,
                )?;
                // Contiguous wildcards are plain prefixes.
                let spec = match wildcard
                    .wildcard_len()
                    .and_then(|len| Ipv4Network::new(address, len).ok())
                {
                    Some(prefix) => AddressSpec::Prefix(prefix.apply_mask()),
                    None => AddressSpec::Wildcard { address, wildcard },
                };
                Some(spec)
            }
            AclAddress::AddrGroup(name) => {
                let Some(usage) = group_usage else {
                    self.diagnostics.red_flag(
                        site,
                        format!("nested address group '{}'", name.text),
                    );
                    return None;
                };
                self.named_reference(
                    site,
                    name,
                    &validate::OBJECT_GROUP_NAME,
                    StructureType::ObjectGroupIpAddress,
                    usage,
                )
                .map(AddressSpec::AddrGroup)
            }
        }
    }
}
