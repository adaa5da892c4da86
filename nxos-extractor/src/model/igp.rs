//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_VRF_NAME;

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct EigrpProcess {
    pub tag: String,
    pub vrfs: BTreeMap<String, EigrpVrf>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct EigrpVrf {
    pub name: String,
    // Taken from a numeric process tag unless configured explicitly.
    pub asn: Option<u16>,
    pub router_id: Option<Ipv4Addr>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct RipProcess {
    pub tag: String,
    pub vrfs: BTreeSet<String>,
}

#[derive(Debug, Default)]
#[derive(Deserialize, Serialize)]
pub struct IsisProcess {
    pub tag: String,
    pub nets: Vec<String>,
    pub is_type: Option<IsisLevel>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum IsisLevel {
    Level1,
    Level1And2,
    Level2,
}

// ===== impl EigrpProcess =====

impl EigrpProcess {
    pub fn new(tag: String, asn: Option<u16>) -> EigrpProcess {
        let mut vrfs = BTreeMap::new();
        vrfs.insert(
            DEFAULT_VRF_NAME.to_owned(),
            EigrpVrf {
                name: DEFAULT_VRF_NAME.to_owned(),
                asn,
                router_id: None,
            },
        );
        EigrpProcess { tag, vrfs }
    }
}

// ===== impl RipProcess =====

impl RipProcess {
    pub fn new(tag: String) -> RipProcess {
        RipProcess {
            tag,
            vrfs: [DEFAULT_VRF_NAME.to_owned()].into(),
        }
    }
}

// ===== impl IsisProcess =====

impl IsisProcess {
    pub fn new(tag: String) -> IsisProcess {
        IsisProcess {
            tag,
            ..Default::default()
        }
    }
}

// ===== impl IsisLevel =====

impl IsisLevel {
    pub fn from_keyword(keyword: &str) -> Option<IsisLevel> {
        match keyword {
            "level-1" => Some(IsisLevel::Level1),
            "level-1-2" => Some(IsisLevel::Level1And2),
            "level-2" => Some(IsisLevel::Level2),
            _ => None,
        }
    }
}
