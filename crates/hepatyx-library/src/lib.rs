//! Hepatyx Library — compound data source and dose-response support.
//!
//! Provides the `CompoundSource` abstraction the pipeline resolves compounds
//! through, an in-memory implementation seeded with a realistic demo catalog,
//! and Hill-equation dose-response generation for demos and end-to-end tests.
//! The engines never call into this crate; they receive plain values.

pub mod catalog;
pub mod dose_response;

pub use catalog::{require, CompoundSource, InMemoryCompoundLibrary};
