//! # pd-core
//!
//! Core types and utilities for the PayDesk API client.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The client error taxonomy
//! - Result type alias
//! - Client configuration
//! - Pagination envelope types
//! - Shared identifiers and reference-code helpers

pub mod config;
pub mod error;
pub mod pagination;
pub mod result;
pub mod types;

pub use config::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use types::*;
