//! Shared helpers for `doctype-typegen` integration tests.

use anyhow::Result;
use serde_json::json;
use test_helpers::bench::TempBench;

/// Builds a bench with a `library` app holding the `Library` and `Members`
/// modules, with developer mode enabled.
pub fn library_bench() -> Result<TempBench> {
    let bench = TempBench::new()?;
    bench.add_app("library", &["Library", "Members"])?;
    bench.write_site_config(&json!({ "developer_mode": 1 }))?;
    bench.add_doctype(
        "library",
        "Library",
        &json!({
            "name": "Book",
            "module": "Library",
            "naming_rule": "By fieldname",
            "autoname": "field:isbn",
            "fields": [
                { "fieldname": "title", "fieldtype": "Data", "label": "Title", "reqd": 1 },
                { "fieldname": "details_section", "fieldtype": "Section Break", "label": "Details" },
                {
                    "fieldname": "isbn",
                    "fieldtype": "Data",
                    "label": "ISBN",
                    "description": "Thirteen digit identifier"
                },
                { "fieldname": "cover", "fieldtype": "Column Break" },
                {
                    "fieldname": "status",
                    "fieldtype": "Select",
                    "label": "Status",
                    "options": "Available\nLoaned",
                    "reqd": 1
                }
            ]
        }),
    )?;
    bench.add_doctype(
        "library",
        "Members",
        &json!({
            "name": "Library Member",
            "module": "Members",
            "naming_rule": "Autoincrement",
            "fields": [
                { "fieldname": "full_name", "fieldtype": "Data", "label": "Full Name", "reqd": 1 },
                { "fieldname": "membership_tab", "fieldtype": "Tab Break", "label": "Membership" },
                { "fieldname": "active", "fieldtype": "Check", "label": "Active", "reqd": 0 },
                { "fieldname": "loans", "fieldtype": "Table", "label": "Loans", "options": "Book Loan" },
                {
                    "fieldname": "favourite_book",
                    "fieldtype": "Link",
                    "label": "Favourite Book",
                    "options": "Book",
                    "description": "Shown on the member card"
                }
            ]
        }),
    )?;
    bench.add_doctype(
        "library",
        "Members",
        &json!({
            "name": "Book Loan",
            "module": "Members",
            "istable": 1,
            "fields": [
                { "fieldname": "book", "fieldtype": "Link", "label": "Book", "options": "Book", "reqd": 1 },
                { "fieldname": "due_date", "fieldtype": "Date", "label": "Due Date" },
                { "fieldname": "fine", "fieldtype": "Currency", "label": "Fine" }
            ]
        }),
    )?;
    Ok(bench)
}
