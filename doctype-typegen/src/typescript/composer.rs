//! Assembly of a DocType's declaration.

use super::enums::{EnumDecl, EnumNames};
use super::interface::{FieldDecl, GeneratedInterface};
use super::mapper::scalar_type;
use super::resolver::ReferenceResolver;
use crate::doctype::{DocField, DocType, FieldKind};
use crate::error::TypegenError;
use crate::paths::OutputLocation;

/// Builds the declaration for `doctype`, which is emitted at `location`.
///
/// Layout fields are dropped. `Select` fields with options become enums,
/// and table fields are typed through `resolver`.
///
/// # Errors
///
/// Propagates failures from `resolver`.
pub fn compose(
    doctype: &DocType,
    location: &OutputLocation,
    resolver: &mut dyn ReferenceResolver,
) -> Result<GeneratedInterface, TypegenError> {
    let mut interface = GeneratedInterface::new(doctype.interface_name(), doctype.naming_rule);
    let mut enum_names = EnumNames::default();

    for field in &doctype.fields {
        let ty = match &field.kind {
            FieldKind::Layout => continue,
            FieldKind::Scalar | FieldKind::Link { .. } => scalar_type(&field.fieldtype).to_owned(),
            FieldKind::Select { options } if options.is_empty() => "string".to_owned(),
            FieldKind::Select { options } => {
                let name = enum_names.claim(&field.fieldname);
                interface.add_enum(EnumDecl {
                    name: name.clone(),
                    options: options.clone(),
                });
                name
            }
            FieldKind::Table { target } => {
                let resolution = resolver.resolve(location, target)?;
                if let Some(statement) = resolution.import {
                    interface.add_import(statement);
                }
                resolution.ty
            }
        };
        interface.add_field(FieldDecl {
            comment: field_comment(field),
            fieldname: field.fieldname.clone(),
            required: field.required,
            ty,
        });
    }
    Ok(interface)
}

/// Comment text: label, field type and, when present, the referenced
/// DocType and description.
fn field_comment(field: &DocField) -> String {
    let description = field
        .description
        .as_deref()
        .filter(|text| !text.is_empty());
    let detail = match (field.target(), description) {
        (Some(target), Some(text)) => Some(format!("{target} - {text}")),
        (Some(target), None) => Some(target.to_owned()),
        (None, text) => text.map(str::to_owned),
    };
    let label = field.label.as_deref().unwrap_or_default();
    match detail {
        Some(detail) => format!("{label} : {} - {detail}", field.fieldtype),
        None => format!("{label} : {}", field.fieldtype),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctype::{FieldType, NamingRule};
    use crate::typescript::resolver::Resolution;

    #[derive(Default)]
    struct Recording {
        requests: Vec<String>,
    }

    impl ReferenceResolver for Recording {
        fn resolve(
            &mut self,
            _owner: &OutputLocation,
            target: &str,
        ) -> Result<Resolution, TypegenError> {
            self.requests.push(target.to_owned());
            Ok(Resolution {
                ty: format!("{}[]", target.replace(' ', "")),
                import: Some(format!("import {{ {0} }} from './{0}'", target.replace(' ', ""))),
            })
        }
    }

    fn field(fieldname: &str, fieldtype: &str, kind: FieldKind) -> DocField {
        DocField {
            fieldname: fieldname.to_owned(),
            fieldtype: FieldType::parse(fieldtype),
            label: None,
            description: None,
            required: false,
            kind,
        }
    }

    fn doctype(fields: Vec<DocField>) -> DocType {
        DocType {
            name: "Book".to_owned(),
            module: "Library".to_owned(),
            naming_rule: NamingRule::Text,
            fields,
            is_table: false,
            custom: false,
            is_virtual: false,
        }
    }

    fn location() -> OutputLocation {
        OutputLocation::new("library", "Library", "Book")
    }

    #[test]
    fn skips_layout_fields() {
        let book = doctype(vec![
            field("section", "Section Break", FieldKind::Layout),
            field("title", "Data", FieldKind::Scalar),
        ]);

        let interface = compose(&book, &location(), &mut Recording::default()).expect("compose");

        let names: Vec<_> = interface.fields().iter().map(|f| f.fieldname.as_str()).collect();
        assert_eq!(names, ["title"]);
        assert!(!interface.render().contains("Section Break"));
    }

    #[test]
    fn imports_each_table_target_once() {
        let book = doctype(vec![
            field(
                "authors",
                "Table",
                FieldKind::Table {
                    target: "Book Author".to_owned(),
                },
            ),
            field(
                "editors",
                "Table MultiSelect",
                FieldKind::Table {
                    target: "Book Author".to_owned(),
                },
            ),
        ]);
        let mut resolver = Recording::default();

        let interface = compose(&book, &location(), &mut resolver).expect("compose");

        assert_eq!(resolver.requests.len(), 2);
        assert_eq!(interface.imports(), ["import { BookAuthor } from './BookAuthor'"]);
        assert!(interface.fields().iter().all(|f| f.ty == "BookAuthor[]"));
    }

    #[test]
    fn links_are_strings_with_target_in_comment() {
        let mut publisher = field(
            "publisher",
            "Link",
            FieldKind::Link {
                target: "Publisher".to_owned(),
            },
        );
        publisher.label = Some("Publisher".to_owned());
        publisher.description = Some("Imprint owner".to_owned());
        let book = doctype(vec![publisher]);

        let interface = compose(&book, &location(), &mut Recording::default()).expect("compose");
        let decl = interface.fields().first().expect("publisher field");

        assert_eq!(decl.ty, "string");
        assert_eq!(decl.comment, "Publisher : Link - Publisher - Imprint owner");
    }

    #[test]
    fn colliding_select_fields_get_distinct_enums() {
        let options = vec!["A".to_owned()];
        let book = doctype(vec![
            field(
                "status",
                "Select",
                FieldKind::Select {
                    options: options.clone(),
                },
            ),
            field("Status", "Select", FieldKind::Select { options }),
        ]);

        let interface = compose(&book, &location(), &mut Recording::default()).expect("compose");

        let enums: Vec<_> = interface.enums().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(enums, ["Status", "Status2"]);
        let types: Vec<_> = interface.fields().iter().map(|f| f.ty.as_str()).collect();
        assert_eq!(types, ["Status", "Status2"]);
    }

    #[test]
    fn empty_select_is_a_string() {
        let book = doctype(vec![field(
            "status",
            "Select",
            FieldKind::Select { options: vec![] },
        )]);

        let interface = compose(&book, &location(), &mut Recording::default()).expect("compose");

        assert!(interface.enums().is_empty());
        assert_eq!(interface.fields().first().map(|f| f.ty.as_str()), Some("string"));
    }
}
