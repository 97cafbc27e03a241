//! Core utilities for plinth.
//!
//! This crate provides the stateless building blocks used around module
//! resolution: identifier case conversion, idempotent file materialization,
//! JSON encoding with exact decimals, and formatted logging.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod config;
mod file;
mod json;
mod log;
mod naming;
mod utils;

pub use config::{ConfigError, LoggingSettings, OutputSettings, Settings};
// File operations
pub use file::{IterFiles, OpenFile, Overwrite, WriteResult, iter_files, mkdir_p, touch, write};
pub use json::{JsonError, exclude_none, json_dumps, json_loads};
pub use log::{FormattedLogger, Log, Logger};
// Exact decimal type understood by the JSON encoder
pub use rust_decimal::Decimal;
// String utilities
pub use naming::{pascal_to_snake, snake_to_pascal, to_camel_case, to_kebab_case};
pub use utils::{group_by, split_by_chunks};
