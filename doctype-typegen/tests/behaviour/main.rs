//! Behavioural tests for `doctype-typegen` using `rstest-bdd`.
//!
//! Step implementations live in [`steps`], while [`scenarios`] binds the
//! feature files under `tests/features` to the shared fixtures.

#[path = "../common/mod.rs"]
mod common;
mod fixtures;
mod scenarios;
mod steps;
