//! The declaration file model and its rendering.

use super::enums::EnumDecl;
use crate::doctype::NamingRule;

/// One declared property with its documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Text between the comment delimiters.
    pub comment: String,
    /// Property name.
    pub fieldname: String,
    /// Whether the property is emitted without an optional marker.
    pub required: bool,
    /// TypeScript type expression.
    pub ty: String,
}

impl FieldDecl {
    fn render_into(&self, out: &mut String) {
        let marker = if self.required { "" } else { "?" };
        out.push_str(&format!(
            "\t/**\t{}\t*/\n\t{}{marker}: {}\n",
            self.comment, self.fieldname, self.ty
        ));
    }
}

/// Everything written to one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterface {
    /// Interface identifier.
    pub interface_name: String,
    /// Identifier scheme, selecting the type of `name`.
    pub naming_rule: NamingRule,
    imports: Vec<String>,
    enums: Vec<EnumDecl>,
    fields: Vec<FieldDecl>,
}

impl GeneratedInterface {
    /// Starts an empty declaration.
    #[must_use]
    pub const fn new(interface_name: String, naming_rule: NamingRule) -> Self {
        Self {
            interface_name,
            naming_rule,
            imports: Vec::new(),
            enums: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Records an import statement unless an identical one is present.
    pub fn add_import(&mut self, statement: String) {
        if !self.imports.contains(&statement) {
            self.imports.push(statement);
        }
    }

    /// Appends an enum block.
    pub fn add_enum(&mut self, decl: EnumDecl) {
        self.enums.push(decl);
    }

    /// Appends a property.
    pub fn add_field(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }

    /// Import statements in first-seen order.
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Enum blocks in field order.
    #[must_use]
    pub fn enums(&self) -> &[EnumDecl] {
        &self.enums
    }

    /// Declared properties in schema order, boilerplate excluded.
    #[must_use]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Renders the file: imports, a blank line, enum blocks, then the
    /// interface with its boilerplate properties.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for statement in &self.imports {
            out.push_str(statement);
            out.push('\n');
        }
        out.push('\n');
        for decl in &self.enums {
            out.push_str(&decl.render());
        }

        let id_type = match self.naming_rule {
            NamingRule::Autoincrement => "number",
            NamingRule::Text => "string",
        };
        out.push_str(&format!(
            "export interface {} {{\n\tname: {id_type}\n",
            self.interface_name
        ));
        out.push_str(BOILERPLATE);
        for field in &self.fields {
            field.render_into(&mut out);
        }
        out.push_str("}\n");
        out
    }
}

const BOILERPLATE: &str = "\tcreation: string\n\
\tmodified: string\n\
\towner: string\n\
\tmodified_by: string\n\
\tdocstatus: 0 | 1 | 2\n\
\tparent?: string\n\
\tparentfield?: string\n\
\tparenttype?: string\n\
\tidx?: number\n";
