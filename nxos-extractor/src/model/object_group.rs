//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use enum_as_inner::EnumAsInner;
use nxos_utils::range::RangeSet;
use serde::{Deserialize, Serialize};

use crate::model::acl::AddressSpec;
use crate::structures::StructureType;

// Object-groups share one namespace regardless of their kind.
#[derive(Debug, EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum ObjectGroup {
    IpAddress(AddressGroup),
    IpPort(PortGroup),
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct AddressGroup {
    pub name: String,
    pub lines: BTreeMap<u32, AddressSpec>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct PortGroup {
    pub name: String,
    pub lines: BTreeMap<u32, RangeSet>,
}

// ===== impl ObjectGroup =====

impl ObjectGroup {
    pub fn structure_type(&self) -> StructureType {
        match self {
            ObjectGroup::IpAddress(..) => StructureType::ObjectGroupIpAddress,
            ObjectGroup::IpPort(..) => StructureType::ObjectGroupIpPort,
        }
    }
}

// ===== impl AddressGroup =====

impl AddressGroup {
    pub fn new(name: String) -> AddressGroup {
        AddressGroup {
            name,
            lines: Default::default(),
        }
    }
}

// ===== impl PortGroup =====

impl PortGroup {
    pub fn new(name: String) -> PortGroup {
        PortGroup {
            name,
            lines: Default::default(),
        }
    }
}
