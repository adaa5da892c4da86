//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use enum_as_inner::EnumAsInner;
use ipnetwork::Ipv4Network;
use nxos_utils::range::RangeSet;
use serde::{Deserialize, Serialize};

use crate::model::LineAction;

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct IpAccessList {
    pub name: String,
    pub lines: BTreeMap<u32, AclLine>,
}

#[derive(Clone, Debug, EnumAsInner, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum AclLine {
    Action(ActionLine),
    Remark(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct ActionLine {
    pub action: LineAction,
    // `None` matches any IP protocol.
    pub protocol: Option<u8>,
    pub source: AddressSpec,
    pub destination: AddressSpec,
    pub source_ports: Option<PortSpec>,
    pub destination_ports: Option<PortSpec>,
    pub packet_length: Option<RangeSet>,
    pub dscp: Option<u8>,
    pub ttl: Option<u8>,
    pub established: bool,
    pub fragments: bool,
    pub log: bool,
    pub icmp_type: Option<u8>,
    pub icmp_code: Option<u8>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum AddressSpec {
    Any,
    Prefix(Ipv4Network),
    Wildcard { address: Ipv4Addr, wildcard: Ipv4Addr },
    AddrGroup(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum PortSpec {
    Ports(RangeSet),
    PortGroup(String),
}

// Line under construction. Every layer-4 option of the line updates the
// builder; a line with any unusable option is kept as a remark carrying its
// original text.
#[derive(Debug)]
pub struct AclLineBuilder {
    pub seq: u32,
    pub text: String,
    pub line: ActionLine,
    pub usable: bool,
}

// ===== impl IpAccessList =====

impl IpAccessList {
    pub fn new(name: String) -> IpAccessList {
        IpAccessList {
            name,
            lines: Default::default(),
        }
    }

    pub fn last_seq(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }
}

// ===== impl ActionLine =====

impl ActionLine {
    pub fn new(action: LineAction) -> ActionLine {
        ActionLine {
            action,
            protocol: None,
            source: AddressSpec::Any,
            destination: AddressSpec::Any,
            source_ports: None,
            destination_ports: None,
            packet_length: None,
            dscp: None,
            ttl: None,
            established: false,
            fragments: false,
            log: false,
            icmp_type: None,
            icmp_code: None,
        }
    }
}

// ===== impl AclLineBuilder =====

impl AclLineBuilder {
    pub fn new(seq: u32, action: LineAction, text: String) -> AclLineBuilder {
        AclLineBuilder {
            seq,
            text,
            line: ActionLine::new(action),
            usable: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.usable = false;
    }

    pub fn build(self) -> (u32, AclLine) {
        let line = if self.usable {
            AclLine::Action(self.line)
        } else {
            AclLine::Remark(self.text)
        };
        (self.seq, line)
    }
}
