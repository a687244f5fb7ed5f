//! Printable HTML views.
//!
//! Both documents are standalone pages meant for a browser's print dialog.
//! They are a byproduct view and carry no compatibility guarantee.

use crate::employee::Employee;
use crate::table::{self, Avatar, TableRow};

const RECORD_STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 40px; }
.header { text-align: center; margin-bottom: 30px; }
.avatar { width: 100px; height: 100px; border-radius: 50%; margin: 0 auto 20px; display: block; object-fit: cover; }
.info { margin: 10px 0; }
.label { font-weight: bold; color: #666; }";

const LIST_STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f4f4f4; }
img { width: 40px; height: 40px; border-radius: 50%; object-fit: cover; }";

/// Printable page for a single record.
#[must_use]
pub fn render_record(employee: &Employee) -> String {
    let row = TableRow::new(employee);
    let name = escape(&employee.full_name);

    let mut body = String::from("<div class=\"header\">\n");
    if let Avatar::Image(src) = &row.avatar {
        body.push_str(&format!("<img src=\"{}\" class=\"avatar\" />\n", escape(src)));
    }
    body.push_str(&format!("<h1>{name}</h1>\n"));
    body.push_str(&format!(
        "<p>Employee ID: {}</p>\n",
        escape(&employee.id.to_string())
    ));
    body.push_str("</div>\n");
    for (label, value) in [
        ("Gender", row.gender),
        ("Date of Birth", row.dob.as_str()),
        ("State", row.state),
        ("Status", row.status),
    ] {
        body.push_str(&format!(
            "<div class=\"info\"><span class=\"label\">{label}:</span> {}</div>\n",
            escape(value)
        ));
    }

    page(&format!("Employee Details - {name}"), RECORD_STYLE, &body)
}

/// Printable page listing `employees` as a table.
#[must_use]
pub fn render_list(employees: &[Employee]) -> String {
    let mut body = String::from("<h1>Employee List</h1>\n");

    if employees.is_empty() {
        body.push_str(&format!(
            "<p>{}</p>\n<p>{}</p>\n",
            table::EMPTY_TITLE,
            table::EMPTY_HINT
        ));
        return page("Employee List", LIST_STYLE, &body);
    }

    let headers: String = table::HEADERS
        .iter()
        .map(|header| format!("<th>{header}</th>"))
        .collect();
    body.push_str(&format!("<table>\n<thead>\n<tr>{headers}</tr>\n</thead>\n<tbody>\n"));

    for row in table::rows(employees) {
        let avatar = match &row.avatar {
            Avatar::Image(src) => {
                format!("<img src=\"{}\" alt=\"{}\" />", escape(src), escape(&row.full_name))
            }
            Avatar::Initials(initials) => escape(initials),
        };
        body.push_str(&format!(
            "<tr><td>{}</td><td>{avatar}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.id.to_string()),
            escape(&row.full_name),
            row.gender,
            escape(&row.dob),
            escape(row.state),
            row.status,
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    page("Employee List", LIST_STYLE, &body)
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{title}</title>\n<style>\n{style}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Escape text for HTML element and attribute content.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{EmployeeId, Gender, State};
    use chrono::NaiveDate;

    fn employee(name: &str, image: &str) -> Employee {
        Employee {
            id: EmployeeId::Numeric(24680),
            full_name: name.to_string(),
            gender: Gender::Male,
            dob: NaiveDate::from_ymd_opt(1988, 2, 29).unwrap(),
            profile_image: image.to_string(),
            state: State::JammuAndKashmir,
            is_active: true,
        }
    }

    #[test]
    fn test_record_shows_visible_fields() {
        let html = render_record(&employee("Ravi Kumar", ""));

        assert!(html.contains("<title>Employee Details - Ravi Kumar</title>"));
        assert!(html.contains("<h1>Ravi Kumar</h1>"));
        assert!(html.contains("Employee ID: 24680"));
        assert!(html.contains("Male"));
        assert!(html.contains("Feb 29, 1988"));
        assert!(html.contains("Jammu and Kashmir"));
        assert!(html.contains("Active"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_record_with_image() {
        let html = render_record(&employee("Ravi", "data:image/png;base64,AA=="));
        assert!(html.contains("<img src=\"data:image/png;base64,AA==\" class=\"avatar\" />"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_record(&employee("<script>alert(1)</script>", ""));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_list_has_row_per_employee() {
        let list = vec![employee("Ravi Kumar", ""), employee("Asha Rao", "")];
        let html = render_list(&list);

        assert!(html.contains("<h1>Employee List</h1>"));
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<td>RK</td>"));
        assert!(html.contains("<th>Full Name</th>"));
    }

    #[test]
    fn test_empty_list() {
        let html = render_list(&[]);
        assert!(html.contains(table::EMPTY_TITLE));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_legacy_id_is_escaped() {
        let mut legacy = employee("Old Timer", "");
        legacy.id = EmployeeId::Other(serde_json::json!("<b>7</b>"));
        let html = render_record(&legacy);
        assert!(html.contains("Employee ID: &lt;b&gt;7&lt;/b&gt;"));
        assert!(render_list(&[legacy]).contains("<tr><td>&lt;b&gt;7&lt;/b&gt;</td>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#39;d&#39;");
    }
}
