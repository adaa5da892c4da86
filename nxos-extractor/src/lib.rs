//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! NX-OS configuration extraction engine.
//!
//! Walks the concrete syntax tree of one device configuration and builds a
//! validated [`model::ConfigurationModel`], a structure cross-reference
//! ledger and a list of diagnostics. Invalid or unsupported input never
//! aborts the run: it is reported and skipped.

#![warn(rust_2018_idioms)]

pub mod config;
mod debug;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod model;
pub mod names;
pub mod scope;
pub mod structures;
pub mod tree;
pub mod validate;

pub use extractor::{Extraction, Extractor, extract};
