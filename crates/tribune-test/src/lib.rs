//! Tribune club management - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `tribune::` paths.

pub use tribune_core as core;
pub use tribune_engine as engine;
pub use tribune_model as model;
