//! DocType descriptors consumed by the generator.
//!
//! Metadata arrives in the JSON shape Frappe stores on disk and in its
//! database ([`RawDocType`] / [`RawDocField`]). It is converted into the
//! kind-tagged [`DocType`] / [`DocField`] records once, at load time, so the
//! generator never inspects untyped option strings.

mod field_type;

pub use field_type::FieldType;

use serde::{Deserialize, Serialize};

use crate::error::TypegenError;
use crate::flag::deserialize_flag;

/// DocType metadata exactly as stored in a `<doctype>.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocType {
    /// Display name, unique across the site.
    pub name: String,
    /// Owning module name.
    #[serde(default)]
    pub module: String,
    /// Naming rule label, for example `Autoincrement`.
    #[serde(default)]
    pub naming_rule: Option<String>,
    /// Legacy naming directive, for example `autoincrement` or `field:title`.
    #[serde(default)]
    pub autoname: Option<String>,
    /// Whether the DocType is a child table.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub istable: bool,
    /// Whether the DocType was created through the UI rather than an app.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub custom: bool,
    /// Whether the DocType has no backing table.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_virtual: bool,
    /// Ordered field definitions.
    #[serde(default)]
    pub fields: Vec<RawDocField>,
}

/// A single field definition as stored in DocType metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocField {
    /// Field identifier.
    pub fieldname: String,
    /// Field type spelling, for example `Small Text`.
    pub fieldtype: String,
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Help text.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether a value is mandatory.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub reqd: bool,
    /// Type-dependent options: choices for `Select`, a DocType for links.
    #[serde(default)]
    pub options: Option<String>,
    /// Anchor field for custom fields; ignored on standard fields.
    #[serde(default)]
    pub insert_after: Option<String>,
}

/// How records of a DocType are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRule {
    /// Auto-incrementing integer identifiers.
    Autoincrement,
    /// Any string-valued naming scheme.
    Text,
}

/// Kind-specific payload of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Layout-only field; never rendered.
    Layout,
    /// Scalar value typed by the field type alone.
    Scalar,
    /// Enumerated choices; empty when no options are configured.
    Select {
        /// Non-blank option values in declaration order.
        options: Vec<String>,
    },
    /// Single reference to another DocType, stored as its name.
    Link {
        /// Referenced DocType.
        target: String,
    },
    /// Collection of child records of another DocType.
    Table {
        /// Child DocType.
        target: String,
    },
}

/// A validated field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocField {
    /// Field identifier; assumed to be a valid TypeScript property name.
    pub fieldname: String,
    /// Declared field type.
    pub fieldtype: FieldType,
    /// Display label.
    pub label: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Whether a value is mandatory.
    pub required: bool,
    /// Kind-specific payload derived from `options`.
    pub kind: FieldKind,
}

impl DocField {
    /// Returns the referenced DocType for `Link` and table fields.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Link { target } | FieldKind::Table { target } => Some(target),
            _ => None,
        }
    }
}

/// A validated, read-only DocType snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocType {
    /// Display name.
    pub name: String,
    /// Owning module name.
    pub module: String,
    /// Identifier scheme.
    pub naming_rule: NamingRule,
    /// Ordered fields, layout fields included.
    pub fields: Vec<DocField>,
    /// Whether the DocType is a child table.
    pub is_table: bool,
    /// Whether the DocType was created through the UI.
    pub custom: bool,
    /// Whether the DocType has no backing table.
    pub is_virtual: bool,
}

impl DocType {
    /// Interface name used in generated code: the name without spaces.
    #[must_use]
    pub fn interface_name(&self) -> String {
        interface_name(&self.name)
    }
}

/// Strips spaces from a DocType name to form a TypeScript identifier.
#[must_use]
pub fn interface_name(doctype: &str) -> String {
    doctype.replace(' ', "")
}

impl TryFrom<RawDocType> for DocType {
    type Error = TypegenError;

    fn try_from(raw: RawDocType) -> Result<Self, Self::Error> {
        let naming_rule = if is_autoincrement(&raw) {
            NamingRule::Autoincrement
        } else {
            NamingRule::Text
        };
        let fields = raw
            .fields
            .into_iter()
            .map(|field| convert_field(&raw.name, field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: raw.name,
            module: raw.module,
            naming_rule,
            fields,
            is_table: raw.istable,
            custom: raw.custom,
            is_virtual: raw.is_virtual,
        })
    }
}

fn is_autoincrement(raw: &RawDocType) -> bool {
    match raw.naming_rule.as_deref() {
        Some(rule) if !rule.is_empty() => rule == "Autoincrement",
        _ => raw
            .autoname
            .as_deref()
            .is_some_and(|autoname| autoname.eq_ignore_ascii_case("autoincrement")),
    }
}

fn convert_field(doctype: &str, raw: RawDocField) -> Result<DocField, TypegenError> {
    let fieldtype = FieldType::parse(&raw.fieldtype);
    let options = raw
        .options
        .map(|options| options.trim().to_owned())
        .filter(|options| !options.is_empty());

    let kind = if fieldtype.is_layout() {
        FieldKind::Layout
    } else if fieldtype.references_doctype() {
        let target = options.ok_or_else(|| {
            TypegenError::invalid_field(
                doctype,
                &raw.fieldname,
                format!("{fieldtype} field does not name a DocType in options"),
            )
        })?;
        if fieldtype == FieldType::Link {
            FieldKind::Link { target }
        } else {
            FieldKind::Table { target }
        }
    } else if fieldtype == FieldType::Select {
        FieldKind::Select {
            options: options.as_deref().map(split_options).unwrap_or_default(),
        }
    } else {
        FieldKind::Scalar
    };

    Ok(DocField {
        fieldname: raw.fieldname,
        fieldtype,
        label: raw.label.filter(|label| !label.is_empty()),
        description: raw.description.filter(|text| !text.is_empty()),
        required: raw.reqd,
        kind,
    })
}

fn split_options(options: &str) -> Vec<String> {
    options
        .split('\n')
        .map(|option| option.trim_end_matches('\r'))
        .filter(|option| !option.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
