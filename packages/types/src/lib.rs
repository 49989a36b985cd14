//! Shared foundation types for the failscope workspace.
//!
//! Every downstream crate pulls its `Result`/`Error` currency and JSON
//! helpers from here so the workspace agrees on one error type at the
//! application seams. Hard domain boundaries (the evaluation core) carry
//! their own typed errors and convert at the edges.

pub use anyhow::{Error, Result, anyhow, bail};
pub use serde_json::Value;

pub mod json {
    //! `serde_json` re-exported under one roof.
    pub use serde_json::{
        Map, Number, from_reader, from_slice, from_str, from_value, json, to_string,
        to_string_pretty, to_value, to_vec, to_writer, to_writer_pretty,
    };
}

/// Create a globally unique identifier.
///
/// Used for transient ids (error reports); never for prediction record ids,
/// which must be deterministic across runs.
pub fn create_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
