//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::HashMap;

use crate::model::{DEFAULT_VRF_NAME, MANAGEMENT_VRF_NAME};
use crate::structures::StructureType;

// Case-insensitive name registry. The first spelling seen for a given
// structure type becomes the canonical one.
#[derive(Debug)]
pub struct Canonicalizer {
    names: HashMap<(StructureType, String), String>,
}

// ===== impl Canonicalizer =====

impl Canonicalizer {
    pub fn new() -> Canonicalizer {
        let mut canonicalizer = Canonicalizer {
            names: Default::default(),
        };
        for vrf in [DEFAULT_VRF_NAME, MANAGEMENT_VRF_NAME] {
            canonicalizer.canonicalize(StructureType::Vrf, vrf);
        }
        canonicalizer
    }

    // Returns the canonical spelling of the given name, registering it when
    // it's seen for the first time.
    pub fn canonicalize(&mut self, kind: StructureType, raw: &str) -> String {
        self.names
            .entry((kind, raw.to_lowercase()))
            .or_insert_with(|| raw.to_owned())
            .clone()
    }
}

impl Default for Canonicalizer {
    fn default() -> Canonicalizer {
        Canonicalizer::new()
    }
}
