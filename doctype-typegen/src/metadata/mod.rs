//! DocType metadata sources.
//!
//! The generator reads schemas through the [`MetadataStore`] trait. Two
//! implementations ship with the crate: [`MemoryStore`], populated in
//! process, and [`BenchStore`], which reads the DocType JSON files of the
//! apps installed in a Frappe bench.

mod bench;
mod custom;

pub use bench::BenchStore;
pub use custom::apply_custom_fields;

use std::collections::BTreeMap;

use crate::doctype::{DocType, RawDocField, RawDocType};
use crate::error::TypegenError;

/// Lookup operations the generator needs from a schema store.
pub trait MetadataStore {
    /// Fetches the DocType as defined by its app, without customisations.
    fn doctype(&self, name: &str) -> Result<DocType, TypegenError>;

    /// Fetches the DocType with site customisations merged into its fields.
    fn effective_doctype(&self, name: &str) -> Result<DocType, TypegenError>;

    /// Lists DocType names in `module`, keeping only child tables when
    /// `is_table` is set and only standalone DocTypes otherwise.
    fn doctypes_in_module(&self, module: &str, is_table: bool)
    -> Result<Vec<String>, TypegenError>;

    /// Returns the app that owns `module`.
    fn module_app(&self, module: &str) -> Result<String, TypegenError>;
}

/// In-process metadata store.
///
/// # Examples
///
/// ```
/// use doctype_typegen::doctype::RawDocType;
/// use doctype_typegen::metadata::{MemoryStore, MetadataStore};
///
/// let mut store = MemoryStore::new();
/// store.insert_module("Library", "library");
/// store.insert_doctype(RawDocType {
///     name: "Book".to_owned(),
///     module: "Library".to_owned(),
///     ..RawDocType::default()
/// });
///
/// assert_eq!(store.module_app("Library").unwrap(), "library");
/// assert_eq!(store.doctypes_in_module("Library", false).unwrap(), ["Book"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doctypes: BTreeMap<String, RawDocType>,
    modules: BTreeMap<String, String>,
    custom_fields: BTreeMap<String, Vec<RawDocField>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` as belonging to `app`.
    pub fn insert_module(&mut self, module: impl Into<String>, app: impl Into<String>) {
        self.modules.insert(module.into(), app.into());
    }

    /// Adds or replaces a DocType definition.
    pub fn insert_doctype(&mut self, doctype: RawDocType) {
        self.doctypes.insert(doctype.name.clone(), doctype);
    }

    /// Appends site custom fields for `doctype`.
    pub fn insert_custom_fields(
        &mut self,
        doctype: impl Into<String>,
        fields: impl IntoIterator<Item = RawDocField>,
    ) {
        self.custom_fields
            .entry(doctype.into())
            .or_default()
            .extend(fields);
    }

    fn raw(&self, name: &str) -> Result<&RawDocType, TypegenError> {
        self.doctypes
            .get(name)
            .ok_or_else(|| TypegenError::DoctypeNotFound(name.to_owned()))
    }
}

impl MetadataStore for MemoryStore {
    fn doctype(&self, name: &str) -> Result<DocType, TypegenError> {
        DocType::try_from(self.raw(name)?.clone())
    }

    fn effective_doctype(&self, name: &str) -> Result<DocType, TypegenError> {
        let raw = self.raw(name)?.clone();
        let custom = self.custom_fields.get(name).map_or(&[][..], Vec::as_slice);
        DocType::try_from(apply_custom_fields(raw, custom))
    }

    fn doctypes_in_module(
        &self,
        module: &str,
        is_table: bool,
    ) -> Result<Vec<String>, TypegenError> {
        if !self.modules.contains_key(module) {
            return Err(TypegenError::ModuleNotFound(module.to_owned()));
        }
        Ok(self
            .doctypes
            .values()
            .filter(|doctype| doctype.module == module && doctype.istable == is_table)
            .map(|doctype| doctype.name.clone())
            .collect())
    }

    fn module_app(&self, module: &str) -> Result<String, TypegenError> {
        self.modules
            .get(module)
            .cloned()
            .ok_or_else(|| TypegenError::ModuleNotFound(module.to_owned()))
    }
}
