//! Temporary Frappe bench layouts for tests.
//!
//! A [`TempBench`] owns a temporary directory laid out like a bench:
//! `apps/<app>/<app>/` packages with a `modules.txt`, DocType JSON files
//! beneath `<module>/doctype/<doctype>/`, and `sites/common_site_config.json`.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use doctype_typegen_test_helpers::bench::TempBench;
//!
//! let bench = TempBench::new()?;
//! bench.add_app("library", &["Library"])?;
//! bench.add_doctype("library", "Library", &json!({ "name": "Book" }))?;
//! assert!(bench.app_file_exists("library/library/library/doctype/book/book.json"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use tempfile::TempDir;

/// Lower-cases a name and replaces spaces with underscores.
fn scrub(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// A bench directory removed when dropped.
#[derive(Debug)]
pub struct TempBench {
    _tempdir: TempDir,
    root: Utf8PathBuf,
    apps_root: Utf8PathBuf,
    dir: Dir,
}

impl TempBench {
    /// Creates an empty bench with `apps/` and `sites/` directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let tempdir = tempfile::tempdir().context("create temp bench")?;
        let root = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .map_err(|path| anyhow!("non-UTF-8 temp path: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        dir.create_dir_all("apps").context("create apps dir")?;
        dir.create_dir_all("sites").context("create sites dir")?;
        Ok(Self {
            _tempdir: tempdir,
            apps_root: root.join("apps"),
            root,
            dir,
        })
    }

    /// Bench root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The bench's `apps/` directory.
    #[must_use]
    pub fn apps_root(&self) -> &Utf8Path {
        &self.apps_root
    }

    /// Path of `sites/common_site_config.json`.
    #[must_use]
    pub fn site_config_path(&self) -> Utf8PathBuf {
        self.root.join("sites/common_site_config.json")
    }

    /// Adds app `app` declaring `modules` in its `modules.txt`.
    ///
    /// # Errors
    ///
    /// Returns an error when the files cannot be written.
    pub fn add_app(&self, app: &str, modules: &[&str]) -> Result<()> {
        let mut listing = modules.join("\n");
        listing.push('\n');
        self.write_app_file(&format!("{app}/{app}/modules.txt"), &listing)
    }

    /// Writes a DocType JSON file; the DocType name comes from its `name` key.
    ///
    /// # Errors
    ///
    /// Returns an error when `doctype` has no `name` or cannot be written.
    pub fn add_doctype(&self, app: &str, module: &str, doctype: &Value) -> Result<()> {
        let name = doctype
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("DocType JSON needs a name"))?;
        let folder = scrub(name);
        let path = format!("{app}/{app}/{}/doctype/{folder}/{folder}.json", scrub(module));
        self.write_app_file(&path, &serde_json::to_string_pretty(doctype)?)
    }

    /// Writes an exported customisation file for `doctype` into `module`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn add_customization(
        &self,
        app: &str,
        module: &str,
        doctype: &str,
        customization: &Value,
    ) -> Result<()> {
        let path = format!(
            "{app}/{app}/{}/custom/{}.json",
            scrub(module),
            scrub(doctype)
        );
        self.write_app_file(&path, &serde_json::to_string_pretty(customization)?)
    }

    /// Writes the site config.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_site_config(&self, config: &Value) -> Result<()> {
        self.write_file("sites/common_site_config.json", &serde_json::to_string_pretty(config)?)
    }

    /// Writes `content` to `path` relative to the apps root, creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_app_file(&self, path: &str, content: &str) -> Result<()> {
        self.write_file(&format!("apps/{path}"), content)
    }

    /// Reads a file relative to the apps root.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read_app_file(&self, path: &str) -> Result<String> {
        self.dir
            .read_to_string(format!("apps/{path}"))
            .with_context(|| format!("read apps/{path}"))
    }

    /// Whether a file exists relative to the apps root.
    #[must_use]
    pub fn app_file_exists(&self, path: &str) -> bool {
        self.dir.is_file(format!("apps/{path}"))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let relative = Utf8Path::new(path);
        if let Some(parent) = relative.parent().filter(|p| !p.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(relative, content)
            .with_context(|| format!("write {path}"))
    }
}
