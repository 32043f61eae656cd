//! The closed set of Frappe field types.

use std::fmt;

/// Declared type of a DocType field.
///
/// Unrecognised types are preserved in [`FieldType::Other`] so new schema
/// kinds degrade to an untyped declaration instead of failing generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `Section Break` layout marker.
    SectionBreak,
    /// `Column Break` layout marker.
    ColumnBreak,
    /// `Tab Break` layout marker.
    TabBreak,
    /// Generic `Break` layout marker.
    Break,
    /// `Fold` layout marker.
    Fold,
    /// `Heading` display element.
    Heading,
    /// `HTML` display element.
    Html,
    /// `Button` display element.
    Button,
    /// `Data`.
    Data,
    /// `Small Text`.
    SmallText,
    /// `Text`.
    Text,
    /// `Long Text`.
    LongText,
    /// `Text Editor`.
    TextEditor,
    /// `HTML Editor`.
    HtmlEditor,
    /// `Markdown Editor`.
    MarkdownEditor,
    /// `Code`.
    Code,
    /// `Read Only`.
    ReadOnly,
    /// `Password`.
    Password,
    /// `Attach`.
    Attach,
    /// `Attach Image`.
    AttachImage,
    /// `Image`.
    Image,
    /// `Duration`.
    Duration,
    /// `Date`.
    Date,
    /// `Datetime`.
    Datetime,
    /// `Time`.
    Time,
    /// `Phone`.
    Phone,
    /// `Color`.
    Color,
    /// `Link` to another DocType.
    Link,
    /// `Dynamic Link` whose target is named by another field.
    DynamicLink,
    /// `Check` checkbox.
    Check,
    /// `Int`.
    Int,
    /// `Float`.
    Float,
    /// `Currency`.
    Currency,
    /// `Percent`.
    Percent,
    /// `Select` with newline-separated options.
    Select,
    /// `Table` of child records.
    Table,
    /// `Table MultiSelect` of child records.
    TableMultiSelect,
    /// Any field type this generator does not know about.
    Other(String),
}

const NAMED: &[(&str, FieldType)] = &[
    ("Section Break", FieldType::SectionBreak),
    ("Column Break", FieldType::ColumnBreak),
    ("Tab Break", FieldType::TabBreak),
    ("Break", FieldType::Break),
    ("Fold", FieldType::Fold),
    ("Heading", FieldType::Heading),
    ("HTML", FieldType::Html),
    ("Button", FieldType::Button),
    ("Data", FieldType::Data),
    ("Small Text", FieldType::SmallText),
    ("Text", FieldType::Text),
    ("Long Text", FieldType::LongText),
    ("Text Editor", FieldType::TextEditor),
    ("HTML Editor", FieldType::HtmlEditor),
    ("Markdown Editor", FieldType::MarkdownEditor),
    ("Code", FieldType::Code),
    ("Read Only", FieldType::ReadOnly),
    ("Password", FieldType::Password),
    ("Attach", FieldType::Attach),
    ("Attach Image", FieldType::AttachImage),
    ("Image", FieldType::Image),
    ("Duration", FieldType::Duration),
    ("Date", FieldType::Date),
    ("Datetime", FieldType::Datetime),
    ("Time", FieldType::Time),
    ("Phone", FieldType::Phone),
    ("Color", FieldType::Color),
    ("Link", FieldType::Link),
    ("Dynamic Link", FieldType::DynamicLink),
    ("Check", FieldType::Check),
    ("Int", FieldType::Int),
    ("Float", FieldType::Float),
    ("Currency", FieldType::Currency),
    ("Percent", FieldType::Percent),
    ("Select", FieldType::Select),
    ("Table", FieldType::Table),
    ("Table MultiSelect", FieldType::TableMultiSelect),
];

impl FieldType {
    /// Parses the `fieldtype` string stored in DocType metadata.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        NAMED
            .iter()
            .find(|(name, _)| *name == raw)
            .map_or_else(|| Self::Other(raw.to_owned()), |(_, kind)| kind.clone())
    }

    /// Returns the metadata spelling of this field type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        if let Self::Other(raw) = self {
            return raw;
        }
        NAMED
            .iter()
            .find(|(_, kind)| kind == self)
            .map_or("", |(name, _)| *name)
    }

    /// Whether the field only shapes the form layout and carries no data.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::SectionBreak
                | Self::ColumnBreak
                | Self::TabBreak
                | Self::Break
                | Self::Fold
                | Self::Heading
                | Self::Html
                | Self::Button
        )
    }

    /// Whether the field's `options` names another DocType.
    #[must_use]
    pub const fn references_doctype(&self) -> bool {
        matches!(self, Self::Link | Self::Table | Self::TableMultiSelect)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
