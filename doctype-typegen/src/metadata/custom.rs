//! Merging of site custom fields into a DocType's field list.

use crate::doctype::{RawDocField, RawDocType};

/// Returns `doctype` with `custom` fields merged into its field list.
///
/// A custom field that shares a fieldname with an existing field replaces it
/// in place. Any other custom field is inserted directly after the field
/// named by its `insert_after`, or appended when that anchor does not exist.
/// Custom fields are applied in order, so later ones may anchor on earlier
/// ones.
#[must_use]
pub fn apply_custom_fields(mut doctype: RawDocType, custom: &[RawDocField]) -> RawDocType {
    for field in custom {
        let fields = &mut doctype.fields;
        if let Some(existing) = fields
            .iter_mut()
            .find(|existing| existing.fieldname == field.fieldname)
        {
            *existing = field.clone();
            continue;
        }

        let anchor = field.insert_after.as_deref().and_then(|anchor| {
            fields
                .iter()
                .position(|existing| existing.fieldname == anchor)
        });
        match anchor {
            Some(index) => fields.insert(index + 1, field.clone()),
            None => fields.push(field.clone()),
        }
    }
    doctype
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn field(name: &str, insert_after: Option<&str>) -> RawDocField {
        RawDocField {
            fieldname: name.to_owned(),
            fieldtype: "Data".to_owned(),
            insert_after: insert_after.map(str::to_owned),
            ..RawDocField::default()
        }
    }

    fn base() -> RawDocType {
        RawDocType {
            name: "Book".to_owned(),
            fields: vec![field("title", None), field("isbn", None)],
            ..RawDocType::default()
        }
    }

    fn names(doctype: &RawDocType) -> Vec<&str> {
        doctype
            .fields
            .iter()
            .map(|field| field.fieldname.as_str())
            .collect()
    }

    #[rstest]
    #[case::after_anchor(vec![field("subtitle", Some("title"))], vec!["title", "subtitle", "isbn"])]
    #[case::missing_anchor(vec![field("shelf", Some("nope"))], vec!["title", "isbn", "shelf"])]
    #[case::no_anchor(vec![field("shelf", None)], vec!["title", "isbn", "shelf"])]
    #[case::chained(
        vec![field("a", Some("title")), field("b", Some("a"))],
        vec!["title", "a", "b", "isbn"]
    )]
    fn inserts_custom_fields(#[case] custom: Vec<RawDocField>, #[case] expected: Vec<&str>) {
        let merged = apply_custom_fields(base(), &custom);
        assert_eq!(names(&merged), expected);
    }

    #[test]
    fn custom_field_overrides_base_field_in_place() {
        let mut isbn = field("isbn", Some("nope"));
        isbn.reqd = true;

        let merged = apply_custom_fields(base(), &[isbn]);

        assert_eq!(names(&merged), ["title", "isbn"]);
        assert!(merged.fields.get(1).is_some_and(|field| field.reqd));
    }
}
