//! Canonical output locations and import specifiers.
//!
//! A DocType owned by app `app` in module `mod` is emitted to
//! `<apps-root>/<app>/<app>/<mod>/doctype/<type>/<type>.types.ts`, where the
//! module and type segments are [`scrub`]bed.

use camino::{Utf8Path, Utf8PathBuf};

/// File suffix appended to every generated declaration.
pub const TYPES_EXTENSION: &str = "types.ts";

/// Lower-cases a name and replaces spaces with underscores.
///
/// # Examples
///
/// ```
/// use doctype_typegen::paths::scrub;
///
/// assert_eq!(scrub("Library Member"), "library_member");
/// ```
#[must_use]
pub fn scrub(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Canonical location of one DocType's generated declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    app: String,
    module: String,
    doctype: String,
}

impl OutputLocation {
    /// Creates the location for `doctype` in `module` of `app`.
    pub fn new(
        app: impl Into<String>,
        module: impl Into<String>,
        doctype: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            module: module.into(),
            doctype: doctype.into(),
        }
    }

    /// App that owns the DocType.
    #[must_use]
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Path of the app's Python package, relative to the apps root.
    #[must_use]
    pub fn package_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.app).join(&self.app)
    }

    /// Directory holding the declaration, relative to the apps root.
    #[must_use]
    pub fn dir(&self) -> Utf8PathBuf {
        self.package_dir()
            .join(scrub(&self.module))
            .join("doctype")
            .join(scrub(&self.doctype))
    }

    /// File name of the declaration.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{TYPES_EXTENSION}", scrub(&self.doctype))
    }

    /// Declaration path relative to the apps root.
    #[must_use]
    pub fn relative_path(&self) -> Utf8PathBuf {
        self.dir().join(self.file_name())
    }

    /// Declaration path beneath `apps_root`.
    #[must_use]
    pub fn resolve(&self, apps_root: &Utf8Path) -> Utf8PathBuf {
        apps_root.join(self.relative_path())
    }

    /// Module specifier importing `target` from a file at this location.
    ///
    /// Within one app the specifier climbs to the app package, the parent of
    /// every module directory; across apps it climbs to the apps root. The
    /// `.ts` extension is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use doctype_typegen::paths::OutputLocation;
    ///
    /// let book = OutputLocation::new("library", "Library", "Book");
    /// let member = OutputLocation::new("library", "Members", "Library Member");
    /// assert_eq!(
    ///     book.import_specifier(&member),
    ///     "../../../members/doctype/library_member/library_member.types"
    /// );
    /// ```
    #[must_use]
    pub fn import_specifier(&self, target: &Self) -> String {
        let ancestor = if self.app == target.app {
            self.package_dir()
        } else {
            Utf8PathBuf::new()
        };
        let from_dir = self.dir();
        let target_dir = target.dir();
        let climb = from_dir
            .strip_prefix(&ancestor)
            .map_or(0, |rest| rest.components().count());
        let descend = target_dir
            .strip_prefix(&ancestor)
            .unwrap_or(target_dir.as_path());
        let file_stem = format!("{}.types", scrub(&target.doctype));

        let mut segments: Vec<&str> = std::iter::repeat_n("..", climb).collect();
        segments.extend(descend.components().map(|component| component.as_str()));
        segments.push(&file_stem);
        segments.join("/")
    }
}
