//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::config::DiagnosticsCfg;

// Diagnostic severity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum Severity {
    // Invalid or conflicting configuration.
    RedFlag,
    // Valid configuration whose semantics are not modeled.
    Unimplemented,
    // Suspicious but harmless configuration.
    Pedantic,
}

// Recoverable issue found during extraction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub excerpt: String,
    pub line: u32,
}

// Location of the statement being processed.
#[derive(Clone, Copy, Debug)]
pub struct Site<'a> {
    pub line: u32,
    pub excerpt: &'a str,
}

// Append-only diagnostics sink.
#[derive(Debug, Default)]
#[derive(Serialize)]
pub struct Diagnostics {
    #[serde(skip)]
    cfg: DiagnosticsCfg,
    entries: Vec<Diagnostic>,
}

// ===== impl Severity =====

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::RedFlag => write!(f, "red-flag"),
            Severity::Unimplemented => write!(f, "unimplemented"),
            Severity::Pedantic => write!(f, "pedantic"),
        }
    }
}

// ===== impl Diagnostic =====

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}): {} [{}]",
            self.severity, self.line, self.message, self.excerpt
        )
    }
}

// ===== impl Diagnostics =====

impl Diagnostics {
    pub fn new(cfg: DiagnosticsCfg) -> Diagnostics {
        Diagnostics {
            cfg,
            entries: Vec::new(),
        }
    }

    pub fn red_flag(&mut self, site: &Site<'_>, message: impl Into<String>) {
        self.record(Severity::RedFlag, site, message.into());
    }

    pub fn unimplemented(
        &mut self,
        site: &Site<'_>,
        message: impl Into<String>,
    ) {
        self.record(Severity::Unimplemented, site, message.into());
    }

    pub fn pedantic(&mut self, site: &Site<'_>, message: impl Into<String>) {
        self.record(Severity::Pedantic, site, message.into());
    }

    fn record(&mut self, severity: Severity, site: &Site<'_>, message: String) {
        let enabled = match severity {
            Severity::RedFlag => self.cfg.red_flags,
            Severity::Unimplemented => self.cfg.unimplemented,
            Severity::Pedantic => self.cfg.pedantic,
        };
        if !enabled {
            return;
        }

        let excerpt = truncate(site.excerpt, self.cfg.max_excerpt_len);
        self.entries.push(Diagnostic {
            severity,
            message,
            excerpt: excerpt.to_owned(),
            line: site.line,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===== helper functions =====

// Truncates the excerpt on a character boundary.
fn truncate(excerpt: &str, max_len: usize) -> &str {
    match excerpt.char_indices().nth(max_len) {
        Some((idx, _)) => &excerpt[..idx],
        None => excerpt,
    }
}
