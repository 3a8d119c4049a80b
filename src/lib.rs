// Copyright 2026 Loginscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Loginscout library — detect login form elements on live web pages.
//!
//! The core is the adaptive detection pipeline in [`pipeline`]: validate the
//! URL, fetch statically, parse, classify; fall back to a full browser render
//! once when the static page yields no login elements.

#![allow(clippy::new_without_default)]

pub mod classify;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod pipeline;
pub mod renderer;
pub mod rest;
pub mod sink;
pub mod validate;

pub use classify::{FieldKind, LoginElement};
pub use error::{ScanError, ScanResult};
pub use fetch::FetchMode;
pub use pipeline::{DetectionOutcome, Pipeline};
