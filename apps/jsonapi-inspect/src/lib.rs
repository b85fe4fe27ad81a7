//! # jsonapi-inspect
//!
//! Command-line inspection of JSON:API documents, built on `jsonapi-reader`.
//!
//! The binary is a thin shell around [`cli::execute`]; everything else is
//! exposed here so integration tests can drive commands directly.

pub mod cli;
pub mod config;
pub mod error;

pub use error::InspectError;
