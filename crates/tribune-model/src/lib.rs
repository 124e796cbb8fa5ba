//! Data model of the Tribune appointment expander.
//!
//! Plain serde structs mirroring the hosted document store's records. The
//! surrounding application owns persistence; these types only carry the
//! fields the expander reads.

pub mod appointment;
pub mod exception;
pub mod instance;
