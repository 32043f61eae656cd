//! Shared fixtures for the generation scenarios.

use doctype_typegen::generator::{ModuleReport, Outcome};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::bench::TempBench;

/// Scenario state shared between generation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerationContext {
    /// Bench the scenario generates into.
    pub bench: Slot<TempBench>,
    /// Outcome of the last single-DocType request.
    pub outcome: Slot<Outcome>,
    /// Report of the last module request.
    pub report: Slot<ModuleReport>,
}

/// Provides a clean context for generation scenarios.
#[fixture]
pub fn generation_context() -> GenerationContext {
    GenerationContext::default()
}
