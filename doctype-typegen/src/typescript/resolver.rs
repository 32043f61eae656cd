//! Resolution of child-table references to imports.

use std::collections::HashSet;

use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use super::composer::compose;
use super::mapper::UNTYPED;
use crate::doctype::{DocType, interface_name};
use crate::error::TypegenError;
use crate::gate::is_protected_app;
use crate::metadata::MetadataStore;
use crate::output::{EmittedFile, emit_declaration};
use crate::paths::OutputLocation;

/// How a reference field is typed in the referencing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// TypeScript type of the field.
    pub ty: String,
    /// Import statement the type depends on.
    pub import: Option<String>,
}

impl Resolution {
    /// Degraded resolution used when no declaration is available.
    #[must_use]
    pub fn untyped() -> Self {
        Self {
            ty: UNTYPED.to_owned(),
            import: None,
        }
    }

    fn imported(owner: &OutputLocation, target: &OutputLocation, doctype: &str) -> Self {
        let name = interface_name(doctype);
        let import = format!(
            "import {{ {name} }} from '{}'",
            owner.import_specifier(target)
        );
        Self {
            ty: format!("{name}[]"),
            import: Some(import),
        }
    }
}

/// Decides how a table field referencing another DocType is typed.
pub trait ReferenceResolver {
    /// Resolves the reference from the file at `owner` to DocType `target`.
    ///
    /// # Errors
    ///
    /// Fails when the target cannot be loaded or a dependency cannot be
    /// written.
    fn resolve(&mut self, owner: &OutputLocation, target: &str)
    -> Result<Resolution, TypegenError>;
}

/// Resolver backed by a metadata store and the declarations on disk.
///
/// Targets whose declaration already exists are imported. Missing targets
/// are generated first when recursion is enabled, at most once per resolver,
/// and otherwise typed as `any`.
pub struct TableResolver<'a> {
    store: &'a dyn MetadataStore,
    root: &'a Dir,
    apps_root: &'a Utf8Path,
    recurse: bool,
    module_app: Option<(String, String)>,
    visited: HashSet<String>,
    emitted: Vec<EmittedFile>,
}

impl<'a> TableResolver<'a> {
    /// Creates a resolver over `root`, the opened `apps_root` directory.
    #[must_use]
    pub fn new(
        store: &'a dyn MetadataStore,
        root: &'a Dir,
        apps_root: &'a Utf8Path,
        recurse: bool,
    ) -> Self {
        Self {
            store,
            root,
            apps_root,
            recurse,
            module_app: None,
            visited: HashSet::new(),
            emitted: Vec::new(),
        }
    }

    /// Places targets in `module` under `app` instead of the app the store
    /// assigns to the module.
    #[must_use]
    pub fn with_module_app(mut self, module: impl Into<String>, app: impl Into<String>) -> Self {
        self.module_app = Some((module.into(), app.into()));
        self
    }

    /// Composes and writes the declaration for `doctype`, marking it visited
    /// so references back to it are not regenerated.
    ///
    /// # Errors
    ///
    /// Propagates resolution and filesystem failures.
    pub fn generate(
        &mut self,
        doctype: &DocType,
        location: &OutputLocation,
    ) -> Result<EmittedFile, TypegenError> {
        self.visited.insert(doctype.name.clone());
        let content = compose(doctype, location, self)?.render();
        emit_declaration(self.apps_root, location, &doctype.name, &content)
    }

    /// Declarations written while resolving references, in write order.
    #[must_use]
    pub fn into_emitted(self) -> Vec<EmittedFile> {
        self.emitted
    }

    fn can_generate(&self, doctype: &DocType, app: &str) -> bool {
        self.recurse
            && !self.visited.contains(&doctype.name)
            && !doctype.custom
            && !doctype.is_virtual
            && !is_protected_app(app)
            && self.root.is_dir(app)
    }
}

impl ReferenceResolver for TableResolver<'_> {
    fn resolve(
        &mut self,
        owner: &OutputLocation,
        target: &str,
    ) -> Result<Resolution, TypegenError> {
        let doctype = self.store.doctype(target)?;
        let app = match &self.module_app {
            Some((module, app)) if *module == doctype.module => app.clone(),
            _ => self.store.module_app(&doctype.module)?,
        };
        let location = OutputLocation::new(app.as_str(), doctype.module.as_str(), target);

        if self.root.is_file(location.relative_path()) {
            debug!(
                doctype = target,
                path = %location.relative_path(),
                "importing existing declaration"
            );
            return Ok(Resolution::imported(owner, &location, target));
        }
        if !self.can_generate(&doctype, &app) {
            debug!(doctype = target, "declaration unavailable, typing as any");
            return Ok(Resolution::untyped());
        }

        debug!(doctype = target, "generating missing declaration");
        let file = self.generate(&doctype, &location)?;
        self.emitted.push(file);
        Ok(Resolution::imported(owner, &location, target))
    }
}
