//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};

use enum_as_inner::EnumAsInner;
use ipnetwork::IpNetwork;
use nxos_utils::bgp::Comm;
use nxos_utils::ip::AddressFamily;
use serde::{Deserialize, Serialize};

use crate::model::LineAction;
use crate::structures::StructureType;

#[derive(Debug)]
#[derive(Deserialize, Serialize)]
pub struct PrefixList {
    pub name: String,
    pub af: AddressFamily,
    pub description: Option<String>,
    pub lines: BTreeMap<u32, PrefixListLine>,
}

// Matches prefixes covered by `prefix` whose length lies within
// [masklen_lower, masklen_upper].
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PrefixListLine {
    pub action: LineAction,
    pub prefix: IpNetwork,
    pub masklen_lower: u8,
    pub masklen_upper: u8,
}

#[derive(Debug, EnumAsInner)]
#[derive(Deserialize, Serialize)]
pub enum CommunityList {
    Standard(StandardCommunityList),
    Expanded(ExpandedCommunityList),
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct StandardCommunityList {
    pub name: String,
    pub lines: BTreeMap<u32, StandardCommunityListLine>,
}

// Matches routes carrying all the listed communities.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct StandardCommunityListLine {
    pub action: LineAction,
    pub communities: BTreeSet<Comm>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct ExpandedCommunityList {
    pub name: String,
    pub lines: BTreeMap<u32, RegexLine>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct AsPathAccessList {
    pub name: String,
    pub lines: BTreeMap<u32, RegexLine>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct RegexLine {
    pub action: LineAction,
    pub regex: String,
}

// ===== impl PrefixList =====

impl PrefixList {
    pub fn new(name: String, af: AddressFamily) -> PrefixList {
        PrefixList {
            name,
            af,
            description: None,
            lines: Default::default(),
        }
    }

    pub fn last_seq(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }
}

// ===== impl CommunityList =====

impl CommunityList {
    pub fn structure_type(&self) -> StructureType {
        match self {
            CommunityList::Standard(..) => {
                StructureType::IpCommunityListStandard
            }
            CommunityList::Expanded(..) => {
                StructureType::IpCommunityListExpanded
            }
        }
    }

    pub fn last_seq(&self) -> Option<u32> {
        match self {
            CommunityList::Standard(list) => list.lines.keys().next_back(),
            CommunityList::Expanded(list) => list.lines.keys().next_back(),
        }
        .copied()
    }
}

// ===== impl AsPathAccessList =====

impl AsPathAccessList {
    pub fn new(name: String) -> AsPathAccessList {
        AsPathAccessList {
            name,
            lines: Default::default(),
        }
    }

    pub fn last_seq(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }
}
