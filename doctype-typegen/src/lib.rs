//! TypeScript declaration generation for Frappe DocTypes.
//!
//! DocType schemas are read through a [`metadata::MetadataStore`], composed
//! into `export interface` declarations by [`typescript`], and written next
//! to each DocType's JSON definition as `<doctype>.types.ts`. The
//! [`generator`] entry points apply the site's gating flags and report a
//! typed [`generator::Outcome`] per DocType.

pub mod config;
pub mod doctype;
pub mod error;
mod flag;
mod fs_helpers;
pub mod gate;
pub mod generator;
pub mod metadata;
pub mod output;
pub mod paths;
pub mod typescript;
