//! Steps for DocType generation scenarios.

use anyhow::{Result, anyhow, ensure};
use doctype_typegen::config::{SiteConfig, before_migrate};
use doctype_typegen::generator::{DoctypeRequest, Generator, Outcome};
use doctype_typegen::metadata::BenchStore;
use doctype_typegen::paths::OutputLocation;
use rstest_bdd_macros::{given, then, when};
use serde_json::json;
use test_helpers::bench::TempBench;

use crate::common;
use crate::fixtures::GenerationContext;

fn declaration(module: &str, doctype: &str) -> String {
    OutputLocation::new("library", module, doctype)
        .relative_path()
        .into_string()
}

fn with_bench<T>(
    generation_context: &GenerationContext,
    f: impl FnOnce(&TempBench) -> Result<T>,
) -> Result<T> {
    generation_context
        .bench
        .with_ref(f)
        .ok_or_else(|| anyhow!("bench not prepared"))?
}

fn generate(generation_context: &GenerationContext, request: &DoctypeRequest) -> Result<()> {
    let outcome = with_bench(generation_context, |bench| {
        let site = SiteConfig::load(&bench.site_config_path())?;
        let store = BenchStore::open(bench.apps_root())?;
        Ok(Generator::new(&store, bench.apps_root(), site).generate_for_doctype(request))
    })?;
    generation_context.outcome.set(outcome);
    Ok(())
}

#[given("a library bench in developer mode")]
fn library_bench(generation_context: &GenerationContext) -> Result<()> {
    generation_context.bench.set(common::library_bench()?);
    Ok(())
}

#[given("a library bench with developer mode disabled")]
fn production_bench(generation_context: &GenerationContext) -> Result<()> {
    let bench = common::library_bench()?;
    bench.write_site_config(&json!({ "developer_mode": 0 }))?;
    generation_context.bench.set(bench);
    Ok(())
}

#[given("generation is paused")]
fn generation_paused(generation_context: &GenerationContext) -> Result<()> {
    with_bench(generation_context, |bench| {
        before_migrate(&bench.site_config_path())?;
        Ok(())
    })
}

#[when("I generate \"{doctype}\" for app \"{app}\"")]
fn generate_doctype(
    generation_context: &GenerationContext,
    doctype: String,
    app: String,
) -> Result<()> {
    generate(generation_context, &DoctypeRequest::new(doctype, app))
}

#[when("I recursively generate \"{doctype}\" for app \"{app}\"")]
fn generate_recursively(
    generation_context: &GenerationContext,
    doctype: String,
    app: String,
) -> Result<()> {
    let request = DoctypeRequest {
        generate_child_tables: true,
        ..DoctypeRequest::new(doctype, app)
    };
    generate(generation_context, &request)
}

#[when("I generate the module \"{module}\" for app \"{app}\"")]
fn generate_module(
    generation_context: &GenerationContext,
    module: String,
    app: String,
) -> Result<()> {
    let report = with_bench(generation_context, |bench| {
        let site = SiteConfig::load(&bench.site_config_path())?;
        let store = BenchStore::open(bench.apps_root())?;
        Ok(Generator::new(&store, bench.apps_root(), site).generate_for_module(&module, &app, false))
    })?;
    generation_context.report.set(report);
    Ok(())
}

#[then("the declaration for \"{doctype}\" in module \"{module}\" exists")]
fn declaration_exists(
    generation_context: &GenerationContext,
    doctype: String,
    module: String,
) -> Result<()> {
    let path = declaration(&module, &doctype);
    let exists = with_bench(generation_context, |bench| Ok(bench.app_file_exists(&path)))?;
    ensure!(exists, "expected {path} to exist");
    Ok(())
}

#[then("no declaration exists for \"{doctype}\" in module \"{module}\"")]
fn declaration_absent(
    generation_context: &GenerationContext,
    doctype: String,
    module: String,
) -> Result<()> {
    let path = declaration(&module, &doctype);
    let exists = with_bench(generation_context, |bench| Ok(bench.app_file_exists(&path)))?;
    ensure!(!exists, "expected no file at {path}");
    Ok(())
}

#[then("the declaration for \"{doctype}\" in module \"{module}\" contains \"{text}\"")]
fn declaration_contains(
    generation_context: &GenerationContext,
    doctype: String,
    module: String,
    text: String,
) -> Result<()> {
    let path = declaration(&module, &doctype);
    let content = with_bench(generation_context, |bench| bench.read_app_file(&path))?;
    ensure!(content.contains(&text), "{path} lacks `{text}`:\n{content}");
    Ok(())
}

#[then("the module outcomes are \"{expected}\"")]
fn module_outcomes(generation_context: &GenerationContext, expected: String) -> Result<()> {
    let actual = generation_context
        .report
        .with_ref(|report| {
            report
                .outcomes
                .iter()
                .map(Outcome::doctype)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .ok_or_else(|| anyhow!("module report not captured"))?;
    ensure!(actual == expected, "expected outcomes {expected}, got {actual}");
    Ok(())
}

#[then("the module run is skipped")]
fn module_skipped(generation_context: &GenerationContext) -> Result<()> {
    let skipped = generation_context
        .report
        .with_ref(|report| report.skipped.is_some() && report.outcomes.is_empty())
        .ok_or_else(|| anyhow!("module report not captured"))?;
    ensure!(skipped, "expected the module run to be skipped");
    Ok(())
}

#[then("the outcome is skipped because \"{reason}\"")]
fn outcome_skipped(generation_context: &GenerationContext, reason: String) -> Result<()> {
    let actual = generation_context
        .outcome
        .with_ref(|outcome| match outcome {
            Outcome::Skipped { reason: skip, .. } => Some(skip.to_string()),
            _ => None,
        })
        .ok_or_else(|| anyhow!("outcome not captured"))?;
    ensure!(
        actual.as_deref() == Some(reason.as_str()),
        "expected skip `{reason}`, got {actual:?}"
    );
    Ok(())
}
