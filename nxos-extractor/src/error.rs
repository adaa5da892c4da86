//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{error, warn};

// Fatal extraction errors. Anything recoverable is reported as a diagnostic
// instead.
#[derive(Debug)]
pub enum Error {
    // The root of the syntax tree is not a configuration.
    InvalidRoot(String),
    // The supplied model lacks a built-in VRF.
    MissingBuiltinVrf(&'static str),
    // The extractor settings could not be parsed.
    ConfigParse(toml::de::Error),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::InvalidRoot(construct) => {
                error!(%construct, "{}", self);
            }
            Error::MissingBuiltinVrf(name) => {
                error!(%name, "{}", self);
            }
            Error::ConfigParse(error) => {
                warn!(error = %with_source(error), "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRoot(..) => {
                write!(f, "syntax tree root is not a configuration")
            }
            Error::MissingBuiltinVrf(..) => {
                write!(f, "configuration model lacks a built-in VRF")
            }
            Error::ConfigParse(..) => {
                write!(f, "failed to parse extractor settings")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigParse(error) => Some(error),
            _ => None,
        }
    }
}

// ===== global functions =====

fn with_source<E: std::error::Error>(error: E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
