//! Field type to TypeScript type mapping.

use crate::doctype::FieldType;

/// Type used for fields this generator cannot type precisely.
pub const UNTYPED: &str = "any";

/// Maps a scalar field type to its TypeScript type expression.
///
/// Unknown field types map to [`UNTYPED`] so schema additions never abort
/// generation. Layout, `Select` and table fields are handled by the composer
/// and fall through to the same escape hatch if they reach this function.
///
/// # Examples
///
/// ```
/// use doctype_typegen::doctype::FieldType;
/// use doctype_typegen::typescript::mapper::scalar_type;
///
/// assert_eq!(scalar_type(&FieldType::Check), "0 | 1");
/// assert_eq!(scalar_type(&FieldType::Currency), "number");
/// assert_eq!(scalar_type(&FieldType::Other("Geolocation".into())), "any");
/// ```
#[must_use]
pub const fn scalar_type(fieldtype: &FieldType) -> &'static str {
    match fieldtype {
        FieldType::Data
        | FieldType::SmallText
        | FieldType::Text
        | FieldType::LongText
        | FieldType::TextEditor
        | FieldType::HtmlEditor
        | FieldType::MarkdownEditor
        | FieldType::Code
        | FieldType::ReadOnly
        | FieldType::Password
        | FieldType::Attach
        | FieldType::AttachImage
        | FieldType::Image
        | FieldType::Duration
        | FieldType::Date
        | FieldType::Datetime
        | FieldType::Time
        | FieldType::Phone
        | FieldType::Color
        | FieldType::Link
        | FieldType::DynamicLink => "string",
        FieldType::Check => "0 | 1",
        FieldType::Int | FieldType::Float | FieldType::Currency | FieldType::Percent => "number",
        FieldType::SectionBreak
        | FieldType::ColumnBreak
        | FieldType::TabBreak
        | FieldType::Break
        | FieldType::Fold
        | FieldType::Heading
        | FieldType::Html
        | FieldType::Button
        | FieldType::Select
        | FieldType::Table
        | FieldType::TableMultiSelect
        | FieldType::Other(_) => UNTYPED,
    }
}
