//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod acl;
mod bgp;
mod interface;
mod lists;
mod overlay;
mod routing;
mod serialize;

use nxos_extractor::config::{DiagnosticsCfg, ExtractorConfig};
use nxos_extractor::diagnostics::{Diagnostic, Severity};
use nxos_extractor::tree::{Construct, Node, Span, Token};
use nxos_extractor::{Extraction, extract};

//
// Helper functions.
//

// Builds the text of a configuration alongside its syntax tree, the way the
// parser would hand them over.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    text: String,
    line: u32,
    span: Span,
}

impl ConfigBuilder {
    // Appends one line of text and returns the node covering it.
    pub fn node(&mut self, line: &str, construct: Construct) -> Node {
        self.line += 1;
        let start = self.text.len();
        self.text.push_str(line);
        let stop = self.text.len();
        self.text.push('\n');
        self.span = Span { start, stop };
        Node::new(construct, self.line, self.span)
    }

    // Returns a node for an option of the last appended line.
    pub fn option(&self, construct: Construct) -> Node {
        Node::new(construct, self.line, self.span)
    }

    pub fn tree(&self, children: Vec<Node>) -> Node {
        let span = Span {
            start: 0,
            stop: self.text.len(),
        };
        Node::new(Construct::Config, 1, span).with_children(children)
    }

    pub fn extract(self, children: Vec<Node>) -> Extraction {
        self.extract_with(children, &ExtractorConfig::default())
    }

    pub fn extract_with(
        self,
        children: Vec<Node>,
        config: &ExtractorConfig,
    ) -> Extraction {
        let tree = self.tree(children);
        extract(&self.text, &tree, config).unwrap()
    }
}

pub fn tok(text: &str) -> Token {
    Token::from(text)
}

pub fn toks(texts: &[&str]) -> Vec<Token> {
    texts.iter().map(|text| tok(text)).collect()
}

pub fn pedantic_config() -> ExtractorConfig {
    ExtractorConfig {
        diagnostics: DiagnosticsCfg {
            pedantic: true,
            ..Default::default()
        },
    }
}

pub fn diagnostics(
    extraction: &Extraction,
    severity: Severity,
) -> Vec<&Diagnostic> {
    extraction
        .diagnostics
        .iter()
        .filter(|diag| diag.severity == severity)
        .collect()
}

pub fn red_flags(extraction: &Extraction) -> Vec<&Diagnostic> {
    diagnostics(extraction, Severity::RedFlag)
}
