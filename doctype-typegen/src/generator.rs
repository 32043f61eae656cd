//! Generation entry points.
//!
//! Each trigger applies the gates in [`crate::gate`], then composes and
//! writes declarations. Failures are logged and returned as [`Outcome`]
//! values instead of propagating, so a module run always attempts every
//! DocType.

use std::backtrace::Backtrace;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::ValueEnum;
use tracing::{error, info};

use crate::config::SiteConfig;
use crate::error::TypegenError;
use crate::gate::{SkipReason, is_protected_app};
use crate::metadata::MetadataStore;
use crate::output::EmittedFile;
use crate::paths::OutputLocation;
use crate::typescript::TableResolver;

/// Host lifecycle operation in progress when a trigger fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LifecyclePhase {
    /// Normal operation.
    #[default]
    Idle,
    /// Running data patches.
    Patch,
    /// Migrating the schema.
    Migrate,
    /// Installing an app.
    Install,
    /// Running the setup wizard.
    SetupWizard,
}

impl LifecyclePhase {
    /// Whether generation must be skipped during this phase.
    #[must_use]
    pub const fn blocks_generation(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Patch => "patch",
            Self::Migrate => "migrate",
            Self::Install => "install",
            Self::SetupWizard => "setup wizard",
        })
    }
}

/// Parameters of a single-DocType generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctypeRequest {
    /// DocType to generate.
    pub name: String,
    /// App whose source tree receives the declaration.
    pub app: String,
    /// Generate missing child-table declarations instead of typing them as
    /// `any`.
    pub generate_child_tables: bool,
    /// Include site custom fields.
    pub custom_fields: bool,
}

impl DoctypeRequest {
    /// Creates a request with recursion and custom fields disabled.
    pub fn new(name: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app: app.into(),
            generate_child_tables: false,
            custom_fields: false,
        }
    }
}

/// Result of generating one DocType.
#[derive(Debug)]
pub enum Outcome {
    /// The declaration was written or already up to date.
    Generated {
        /// Requested DocType.
        doctype: String,
        /// Declaration of the requested DocType.
        file: EmittedFile,
        /// Child-table declarations generated along the way.
        dependencies: Vec<EmittedFile>,
    },
    /// A gate declined the request.
    Skipped {
        /// Requested DocType.
        doctype: String,
        /// Gate that declined it.
        reason: SkipReason,
    },
    /// Generation failed.
    Failed {
        /// Requested DocType.
        doctype: String,
        /// Cause of the failure.
        error: TypegenError,
    },
}

impl Outcome {
    /// DocType the outcome refers to.
    #[must_use]
    pub fn doctype(&self) -> &str {
        match self {
            Self::Generated { doctype, .. }
            | Self::Skipped { doctype, .. }
            | Self::Failed { doctype, .. } => doctype,
        }
    }

    /// Whether generation failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of a module-level run.
#[derive(Debug)]
pub struct ModuleReport {
    /// Requested module.
    pub module: String,
    /// Set when the whole run was gated.
    pub skipped: Option<SkipReason>,
    /// Set when the module's DocTypes could not be listed.
    pub error: Option<TypegenError>,
    /// One outcome per DocType, child tables first.
    pub outcomes: Vec<Outcome>,
}

impl ModuleReport {
    fn new(module: &str) -> Self {
        Self {
            module: module.to_owned(),
            skipped: None,
            error: None,
            outcomes: Vec::new(),
        }
    }

    /// Whether listing or any DocType failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.error.is_some() || self.outcomes.iter().any(Outcome::is_failure)
    }
}

/// Generates declarations into the apps directory of a bench.
pub struct Generator<'a> {
    store: &'a dyn MetadataStore,
    apps_root: Utf8PathBuf,
    site: SiteConfig,
    phase: LifecyclePhase,
}

impl<'a> Generator<'a> {
    /// Creates a generator writing beneath `apps_root`.
    pub fn new(
        store: &'a dyn MetadataStore,
        apps_root: impl Into<Utf8PathBuf>,
        site: SiteConfig,
    ) -> Self {
        Self {
            store,
            apps_root: apps_root.into(),
            site,
            phase: LifecyclePhase::Idle,
        }
    }

    /// Sets the lifecycle phase the triggers run in.
    #[must_use]
    pub const fn with_phase(mut self, phase: LifecyclePhase) -> Self {
        self.phase = phase;
        self
    }

    /// Apps directory declarations are written beneath.
    #[must_use]
    pub fn apps_root(&self) -> &Utf8Path {
        &self.apps_root
    }

    /// Generates the declaration for one DocType.
    pub fn generate_for_doctype(&self, request: &DoctypeRequest) -> Outcome {
        match self.try_generate(request) {
            Ok(outcome) => {
                log_outcome(&outcome);
                outcome
            }
            Err(err) => failure(&request.name, err),
        }
    }

    /// Generates every DocType in `module`: child tables first, then the
    /// rest, continuing past failures.
    pub fn generate_for_module(
        &self,
        module: &str,
        app: &str,
        generate_child_tables: bool,
    ) -> ModuleReport {
        let mut report = ModuleReport::new(module);
        if let Some(reason) = self.run_gate() {
            info!(module, %reason, "skipping module");
            report.skipped = Some(reason);
            return report;
        }

        for is_table in [true, false] {
            let names = match self.store.doctypes_in_module(module, is_table) {
                Ok(names) => names,
                Err(err) => {
                    let backtrace = Backtrace::force_capture();
                    error!(module, error = %err, %backtrace, "failed to list module DocTypes");
                    report.error = Some(err);
                    return report;
                }
            };
            for name in names {
                let request = DoctypeRequest {
                    generate_child_tables,
                    ..DoctypeRequest::new(name, app)
                };
                report.outcomes.push(self.generate_for_doctype(&request));
            }
        }
        report
    }

    /// Regenerates a DocType after it was saved, into the app owning its
    /// module. Child tables are never generated from this hook.
    pub fn on_doctype_saved(&self, doctype: &str) -> Outcome {
        if let Some(reason) = self.run_gate() {
            let outcome = Outcome::Skipped {
                doctype: doctype.to_owned(),
                reason,
            };
            log_outcome(&outcome);
            return outcome;
        }
        let app = self
            .store
            .doctype(doctype)
            .and_then(|loaded| self.store.module_app(&loaded.module));
        match app {
            Ok(app_name) => self.generate_for_doctype(&DoctypeRequest::new(doctype, app_name)),
            Err(err) => failure(doctype, err),
        }
    }

    fn run_gate(&self) -> Option<SkipReason> {
        if self.site.pause_generation {
            Some(SkipReason::Paused)
        } else if self.phase.blocks_generation() {
            Some(SkipReason::LifecyclePhase(self.phase))
        } else {
            None
        }
    }

    fn try_generate(&self, request: &DoctypeRequest) -> Result<Outcome, TypegenError> {
        let skipped = |reason| Outcome::Skipped {
            doctype: request.name.clone(),
            reason,
        };
        if let Some(reason) = self.run_gate() {
            return Ok(skipped(reason));
        }
        if !self.site.developer_mode {
            return Ok(skipped(SkipReason::DeveloperModeDisabled));
        }

        let doctype = if request.custom_fields {
            self.store.effective_doctype(&request.name)?
        } else {
            self.store.doctype(&request.name)?
        };
        if doctype.custom {
            return Ok(skipped(SkipReason::CustomDoctype));
        }
        if doctype.is_virtual {
            return Ok(skipped(SkipReason::VirtualDoctype));
        }
        let owner = self.store.module_app(&doctype.module)?;
        if let Some(app) = [owner.as_str(), request.app.as_str()]
            .into_iter()
            .find(|app| is_protected_app(app))
        {
            return Ok(skipped(SkipReason::ProtectedApp(app.to_owned())));
        }
        let Some(root) = self.open_app_root(&request.app)? else {
            return Ok(skipped(SkipReason::MissingAppDirectory(
                self.apps_root.join(&request.app),
            )));
        };

        info!(doctype = %doctype.name, app = %request.app, "generating type definition");
        let location = OutputLocation::new(
            request.app.as_str(),
            doctype.module.as_str(),
            doctype.name.as_str(),
        );
        let mut resolver = TableResolver::new(
            self.store,
            &root,
            &self.apps_root,
            request.generate_child_tables,
        )
        .with_module_app(doctype.module.as_str(), request.app.as_str());
        let file = resolver.generate(&doctype, &location)?;
        Ok(Outcome::Generated {
            doctype: request.name.clone(),
            file,
            dependencies: resolver.into_emitted(),
        })
    }

    /// Opens the apps root when it contains a directory for `app`.
    fn open_app_root(&self, app: &str) -> Result<Option<Dir>, TypegenError> {
        let root = match Dir::open_ambient_dir(&self.apps_root, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TypegenError::io(&self.apps_root, err)),
        };
        Ok(root.is_dir(app).then_some(root))
    }
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Generated {
            doctype,
            file,
            dependencies,
        } => info!(
            doctype,
            path = %file.path,
            status = %file.status,
            dependencies = dependencies.len(),
            "generated type definition"
        ),
        Outcome::Skipped { doctype, reason } => info!(doctype, %reason, "skipped type generation"),
        // Logged by `failure`.
        Outcome::Failed { .. } => {}
    }
}

/// Records a failed generation, logging it with a backtrace of the caller.
fn failure(doctype: &str, error: TypegenError) -> Outcome {
    let backtrace = Backtrace::force_capture();
    error!(doctype, %error, %backtrace, "type generation failed");
    Outcome::Failed {
        doctype: doctype.to_owned(),
        error,
    }
}
