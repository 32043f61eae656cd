//! Test helpers shared across crates.
//!
//! This crate currently provides a temporary Frappe bench builder.

pub mod bench;
