//! CLI entrypoint for `doctype-typegen`.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use doctype_typegen::config::{SiteConfig, after_migrate, before_migrate};
use doctype_typegen::error::TypegenError;
use doctype_typegen::generator::{DoctypeRequest, Generator};
use doctype_typegen::metadata::BenchStore;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> Result<ExitCode, TypegenError> {
    init_tracing();
    run(&Args::parse())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<ExitCode, TypegenError> {
    let site_config = args.site_config_path();
    match &args.command {
        Command::Pause => return before_migrate(&site_config).map(|()| ExitCode::SUCCESS),
        Command::Resume => return after_migrate(&site_config).map(|()| ExitCode::SUCCESS),
        Command::Doctype { .. } | Command::Module { .. } | Command::Saved { .. } => {}
    }

    let site = SiteConfig::load(&site_config)?;
    let apps_root = args.apps_root();
    let store = BenchStore::open(&apps_root)?;
    let generator = Generator::new(&store, apps_root, site).with_phase(args.phase);

    let failed = match &args.command {
        Command::Doctype { name, app, options } => {
            let request = DoctypeRequest {
                generate_child_tables: options.generate_child_tables,
                custom_fields: options.custom_fields,
                ..DoctypeRequest::new(name.as_str(), app.as_str())
            };
            generator.generate_for_doctype(&request).is_failure()
        }
        Command::Module {
            module,
            app,
            generate_child_tables,
        } => generator
            .generate_for_module(module, app, *generate_child_tables)
            .has_failures(),
        Command::Saved { doctype } => generator.on_doctype_saved(doctype).is_failure(),
        Command::Pause | Command::Resume => false,
    };
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
