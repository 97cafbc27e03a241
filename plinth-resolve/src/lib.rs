//! Resolve `(module, object)` identifiers to live objects.
//!
//! Instead of loading code from dotted paths at runtime, plugins register
//! their modules with a [`Registry`] (usually the [`global`] one) at startup.
//! Lookups by string then behave like imports: modules initialize once, and
//! every failure to resolve an object surfaces as
//! [`Error::ProjectImport`].
//!
//! # Module Organization
//!
//! - [`Registry`] - registration, imports, and package traversal
//! - [`Module`] - a namespace of type-erased objects
//! - [`builtins`] - the `json` and `naming` modules and their function types

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builtins;
mod error;
mod module;
mod registry;

pub use error::{BoxError, Error, Result};
pub use module::{Module, Object};
pub use registry::{Registry, global, import_from, import_submodules, is_importable, register};
