//! Metadata store backed by the DocType JSON files of a Frappe bench.
//!
//! Every app under the apps root is a directory `<app>/<app>/` holding a
//! `modules.txt` that lists its module names. DocType definitions live at
//! `<module>/doctype/<doctype>/<doctype>.json` and exported customisations at
//! `<module>/custom/<doctype>.json`, with module and DocType segments
//! scrubbed (lower case, spaces as underscores).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MetadataStore, apply_custom_fields};
use crate::doctype::{DocType, RawDocField, RawDocType};
use crate::error::TypegenError;
use crate::fs_helpers::{open_optional_subdir, read_optional, subdirectory_names};
use crate::paths::scrub;

#[derive(Debug, Clone)]
struct ModuleEntry {
    name: String,
    app: String,
}

#[derive(Debug, Clone)]
struct DoctypeEntry {
    module: String,
    path: Utf8PathBuf,
}

/// Exported customisation file for one DocType.
#[derive(Debug, Default, Deserialize)]
struct CustomizationFile {
    #[serde(default)]
    custom_fields: Vec<RawDocField>,
}

/// Reads DocType metadata from the apps directory of a bench.
#[derive(Debug)]
pub struct BenchStore {
    root: Dir,
    root_path: Utf8PathBuf,
    modules: Vec<ModuleEntry>,
    doctypes: BTreeMap<String, DoctypeEntry>,
}

impl BenchStore {
    /// Indexes the modules and DocType files of every app under `apps_root`.
    ///
    /// Only the directory layout is read here; DocType JSON is parsed on
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns [`TypegenError::Io`] when the apps root cannot be opened or a
    /// directory listing fails.
    pub fn open(apps_root: &Utf8Path) -> Result<Self, TypegenError> {
        let root = Dir::open_ambient_dir(apps_root, ambient_authority())
            .map_err(|err| TypegenError::io(apps_root, err))?;
        let mut store = Self {
            root,
            root_path: apps_root.to_path_buf(),
            modules: Vec::new(),
            doctypes: BTreeMap::new(),
        };

        for app in subdirectory_names(&store.root, apps_root)? {
            store.index_app(&app)?;
        }
        debug!(
            apps_root = %apps_root,
            modules = store.modules.len(),
            doctypes = store.doctypes.len(),
            "indexed bench metadata"
        );
        Ok(store)
    }

    fn index_app(&mut self, app: &str) -> Result<(), TypegenError> {
        let package = Utf8PathBuf::from(app).join(app);
        let modules_txt = package.join("modules.txt");
        let Some(listing) =
            read_optional(&self.root, &modules_txt, &self.root_path.join(&modules_txt))?
        else {
            return Ok(());
        };

        for module in listing.lines().map(str::trim).filter(|line| !line.is_empty()) {
            self.modules.push(ModuleEntry {
                name: module.to_owned(),
                app: app.to_owned(),
            });
            self.index_module(&package, module)?;
        }
        Ok(())
    }

    fn index_module(&mut self, package: &Utf8Path, module: &str) -> Result<(), TypegenError> {
        let doctype_root = package.join(scrub(module)).join("doctype");
        let display = self.root_path.join(&doctype_root);
        let Some(dir) = open_optional_subdir(&self.root, &doctype_root, &display)? else {
            return Ok(());
        };

        for folder in subdirectory_names(&dir, &display)? {
            let path = doctype_root.join(&folder).join(format!("{folder}.json"));
            if !self.root.is_file(&path) {
                continue;
            }
            match self.doctypes.entry(folder) {
                Entry::Occupied(existing) => warn!(
                    doctype = %existing.key(),
                    kept = %self.root_path.join(&existing.get().path),
                    ignored = %self.root_path.join(&path),
                    "duplicate DocType folder"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(DoctypeEntry {
                        module: module.to_owned(),
                        path,
                    });
                }
            }
        }
        Ok(())
    }

    fn read_json<T>(&self, path: &Utf8Path) -> Result<Option<T>, TypegenError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let display = self.root_path.join(path);
        let Some(content) = read_optional(&self.root, path, &display)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| TypegenError::Json {
                path: display,
                source,
            })
    }

    fn raw(&self, name: &str) -> Result<RawDocType, TypegenError> {
        let entry = self
            .doctypes
            .get(&scrub(name))
            .ok_or_else(|| TypegenError::DoctypeNotFound(name.to_owned()))?;
        let mut raw: RawDocType = self
            .read_json(&entry.path)?
            .ok_or_else(|| TypegenError::DoctypeNotFound(name.to_owned()))?;
        if raw.module.is_empty() {
            raw.module.clone_from(&entry.module);
        }
        Ok(raw)
    }

    fn custom_fields(&self, name: &str) -> Result<Vec<RawDocField>, TypegenError> {
        let file_name = format!("{}.json", scrub(name));
        let mut fields = Vec::new();
        for module in &self.modules {
            let path = Utf8PathBuf::from(&module.app)
                .join(&module.app)
                .join(scrub(&module.name))
                .join("custom")
                .join(&file_name);
            if let Some(file) = self.read_json::<CustomizationFile>(&path)? {
                fields.extend(file.custom_fields);
            }
        }
        Ok(fields)
    }

    fn find_module(&self, module: &str) -> Result<&ModuleEntry, TypegenError> {
        self.modules
            .iter()
            .find(|entry| entry.name == module)
            .ok_or_else(|| TypegenError::ModuleNotFound(module.to_owned()))
    }
}

impl MetadataStore for BenchStore {
    fn doctype(&self, name: &str) -> Result<DocType, TypegenError> {
        DocType::try_from(self.raw(name)?)
    }

    fn effective_doctype(&self, name: &str) -> Result<DocType, TypegenError> {
        let raw = self.raw(name)?;
        let custom = self.custom_fields(name)?;
        DocType::try_from(apply_custom_fields(raw, &custom))
    }

    fn doctypes_in_module(
        &self,
        module: &str,
        is_table: bool,
    ) -> Result<Vec<String>, TypegenError> {
        self.find_module(module)?;
        let mut names = Vec::new();
        for (folder, entry) in self.doctypes.iter().filter(|(_, entry)| entry.module == module) {
            match self.read_json::<RawDocType>(&entry.path) {
                Ok(Some(raw)) if raw.istable == is_table => names.push(raw.name),
                Ok(_) => {}
                // Listed with the standalone DocTypes so the failure is
                // reported by the generation attempt.
                Err(err) if !is_table => {
                    warn!(doctype = %folder, error = %err, "unreadable DocType definition");
                    names.push(folder.clone());
                }
                Err(_) => {}
            }
        }
        names.sort();
        Ok(names)
    }

    fn module_app(&self, module: &str) -> Result<String, TypegenError> {
        self.find_module(module).map(|entry| entry.app.clone())
    }
}
