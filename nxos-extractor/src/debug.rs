//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{Level, debug, debug_span, enabled, trace};

use crate::diagnostics::{Diagnostics, Severity};
use crate::model::ConfigurationModel;
use crate::structures::StructureType;

// Extraction debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    ExtractionStart(usize),
    ExtractionFinish(&'a Diagnostics),
    UnrecognizedLine(u32, &'a str),
    PlaceholderInstalled(&'static str, u32),
    StructureConflict(&'a str, StructureType, StructureType),
    ModelSnapshot(&'a ConfigurationModel),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::ExtractionStart(len) => {
                debug!(%len, "{}", self);
            }
            Debug::ExtractionFinish(diagnostics) => {
                let red_flags = diagnostics.count(Severity::RedFlag);
                let unimplemented = diagnostics.count(Severity::Unimplemented);
                let pedantic = diagnostics.count(Severity::Pedantic);
                debug!(%red_flags, %unimplemented, %pedantic, "{}", self);
            }
            Debug::UnrecognizedLine(line, text) => {
                debug_span!("input").in_scope(|| {
                    debug!(%line, %text, "{}", self);
                });
            }
            Debug::PlaceholderInstalled(scope, line) => {
                debug_span!("scope", %scope).in_scope(|| {
                    debug!(%line, "{}", self);
                });
            }
            Debug::StructureConflict(name, existing, requested) => {
                debug!(%name, %existing, %requested, "{}", self);
            }
            Debug::ModelSnapshot(model) => {
                // Skip serialization unless traced.
                if !enabled!(Level::TRACE) {
                    return;
                }
                if let Ok(data) = serde_json::to_string(model) {
                    trace!(%data, "{}", self);
                }
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::ExtractionStart(..) => {
                write!(f, "starting extraction")
            }
            Debug::ExtractionFinish(..) => {
                write!(f, "extraction finished")
            }
            Debug::UnrecognizedLine(..) => {
                write!(f, "unrecognized line")
            }
            Debug::PlaceholderInstalled(..) => {
                write!(f, "placeholder installed")
            }
            Debug::StructureConflict(..) => {
                write!(f, "structure redefined with a different type")
            }
            Debug::ModelSnapshot(..) => {
                write!(f, "configuration model")
            }
        }
    }
}
