//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![allow(clippy::derivable_impls)]

use serde::Deserialize;

use crate::error::Error;

// Extractor settings, supplied by the outer driver.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub diagnostics: DiagnosticsCfg,
}

// Which diagnostics are recorded, and how they are recorded.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DiagnosticsCfg {
    pub red_flags: bool,
    pub unimplemented: bool,
    pub pedantic: bool,
    // Maximum number of characters of source text kept per diagnostic.
    pub max_excerpt_len: usize,
}

// ===== impl ExtractorConfig =====

impl ExtractorConfig {
    // Parses the settings from a TOML document.
    pub fn from_toml(document: &str) -> Result<ExtractorConfig, Error> {
        toml::from_str(document).map_err(Error::ConfigParse)
    }
}

// ===== impl DiagnosticsCfg =====

impl Default for DiagnosticsCfg {
    fn default() -> DiagnosticsCfg {
        DiagnosticsCfg {
            red_flags: true,
            unimplemented: true,
            pedantic: false,
            max_excerpt_len: 512,
        }
    }
}
