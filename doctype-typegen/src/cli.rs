//! Command-line interface definitions for `doctype-typegen`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};
use doctype_typegen::generator::LifecyclePhase;

/// Parsed CLI arguments for `doctype-typegen`.
#[derive(Debug, Parser)]
#[command(name = "doctype-typegen")]
#[command(about = "Generate TypeScript declarations for Frappe DocTypes")]
#[command(version)]
pub struct Args {
    /// Bench directory containing `apps/` and `sites/`.
    #[arg(long, value_name = "path", default_value = ".")]
    pub bench: Utf8PathBuf,
    /// Site config file holding `developer_mode` and the pause flag.
    /// Defaults to `<bench>/sites/common_site_config.json`.
    #[arg(long, value_name = "path")]
    pub site_config: Option<Utf8PathBuf>,
    /// Lifecycle operation the bench is running.
    #[arg(long, value_enum, default_value_t = LifecyclePhase::Idle)]
    pub phase: LifecyclePhase,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Apps directory of the bench.
    #[must_use]
    pub fn apps_root(&self) -> Utf8PathBuf {
        self.bench.join("apps")
    }

    /// Site config path, explicit or derived from the bench.
    #[must_use]
    pub fn site_config_path(&self) -> Utf8PathBuf {
        self.site_config
            .clone()
            .unwrap_or_else(|| self.bench.join("sites").join("common_site_config.json"))
    }
}

/// Subcommands of `doctype-typegen`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the declaration for one DocType.
    Doctype {
        /// DocType name, for example `Library Member`.
        name: String,
        /// App whose source tree receives the declaration.
        #[arg(long)]
        app: String,
        /// Generation switches.
        #[command(flatten)]
        options: DoctypeOptions,
    },
    /// Generate declarations for every DocType in a module.
    Module {
        /// Module name.
        module: String,
        /// App that owns the module.
        #[arg(long)]
        app: String,
        /// Generate missing child-table declarations.
        #[arg(long)]
        generate_child_tables: bool,
    },
    /// Regenerate a DocType after it was saved, as the save hook does.
    Saved {
        /// DocType name.
        doctype: String,
    },
    /// Pause generation ahead of a migration.
    Pause,
    /// Resume generation after a migration.
    Resume,
}

/// Switches for single-DocType generation.
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct DoctypeOptions {
    /// Generate missing child-table declarations.
    #[arg(long)]
    pub generate_child_tables: bool,
    /// Include site custom fields.
    #[arg(long)]
    pub custom_fields: bool,
}
