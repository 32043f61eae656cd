//! Enum declarations synthesised from `Select` fields.

use std::collections::HashMap;

/// A standalone `export enum` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Identifier the field declaration refers to.
    pub name: String,
    /// Option values in declaration order.
    pub options: Vec<String>,
}

impl EnumDecl {
    /// Renders the declaration followed by a blank line.
    ///
    /// # Examples
    ///
    /// ```
    /// use doctype_typegen::typescript::enums::EnumDecl;
    ///
    /// let decl = EnumDecl {
    ///     name: "Status".to_owned(),
    ///     options: vec!["On Loan".to_owned()],
    /// };
    /// assert_eq!(
    ///     decl.render(),
    ///     "export enum Status {\n    \"ON_LOAN\" = \"On Loan\",\n}\n\n"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("export enum {} {{\n", self.name);
        for option in &self.options {
            out.push_str(&format!(
                "    \"{}\" = \"{}\",\n",
                escape(&member_name(option)),
                escape(option)
            ));
        }
        out.push_str("}\n\n");
        out
    }
}

/// Derives an enum name from a fieldname.
///
/// Spaces are removed, the first character is upper-cased and the rest
/// lower-cased.
///
/// # Examples
///
/// ```
/// use doctype_typegen::typescript::enums::enum_name;
///
/// assert_eq!(enum_name("status"), "Status");
/// assert_eq!(enum_name("loan_Status"), "Loan_status");
/// ```
#[must_use]
pub fn enum_name(fieldname: &str) -> String {
    let mut chars = fieldname.chars().filter(|ch| *ch != ' ');
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Derives an enum member identifier from an option value.
#[must_use]
pub fn member_name(option: &str) -> String {
    option.replace([' ', '-'], "_").to_uppercase()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Hands out enum names that are unique within one declaration file.
#[derive(Debug, Default)]
pub struct EnumNames {
    seen: HashMap<String, usize>,
}

impl EnumNames {
    /// Returns the enum name for `fieldname`, suffixed with a counter when a
    /// previous field already claimed it.
    pub fn claim(&mut self, fieldname: &str) -> String {
        let base = enum_name(fieldname);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}{count}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("status", "Status")]
    #[case("STATUS", "Status")]
    #[case("loan status", "Loanstatus")]
    #[case("", "")]
    fn derives_enum_names(#[case] fieldname: &str, #[case] expected: &str) {
        assert_eq!(enum_name(fieldname), expected);
    }

    #[rstest]
    #[case("Available", "AVAILABLE")]
    #[case("On Loan", "ON_LOAN")]
    #[case("Re-shelved", "RE_SHELVED")]
    fn derives_member_names(#[case] option: &str, #[case] expected: &str) {
        assert_eq!(member_name(option), expected);
    }

    #[test]
    fn escapes_quotes_in_values() {
        let decl = EnumDecl {
            name: "Size".to_owned(),
            options: vec!["12\" Vinyl".to_owned()],
        };
        assert_eq!(
            decl.render(),
            "export enum Size {\n    \"12\\\"_VINYL\" = \"12\\\" Vinyl\",\n}\n\n"
        );
    }

    #[test]
    fn suffixes_colliding_names() {
        let mut names = EnumNames::default();
        assert_eq!(names.claim("status"), "Status");
        assert_eq!(names.claim("Status"), "Status2");
        assert_eq!(names.claim("kind"), "Kind");
        assert_eq!(names.claim("STATUS"), "Status3");
    }
}
