//! Employee table rendering.
//!
//! Turns a filtered slice of employees into display rows and a plain-text
//! table. Row actions are described by [`RowAction`] and carried out by the
//! dashboard.

use chrono::NaiveDate;

use crate::employee::{Employee, EmployeeId};

/// Headline of the empty state.
pub const EMPTY_TITLE: &str = "No employees found";

/// Hint under the empty state headline.
pub const EMPTY_HINT: &str = "Add your first employee or adjust filters";

/// Column headers, in display order.
pub const HEADERS: [&str; 7] = ["ID", "Profile", "Full Name", "Gender", "DOB", "State", "Status"];

/// What a row shows in its avatar slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// A data URI image.
    Image(String),
    /// Name initials, shown when there is no image.
    Initials(String),
}

impl Avatar {
    /// Avatar for `employee`.
    #[must_use]
    pub fn for_employee(employee: &Employee) -> Self {
        if employee.has_image() {
            Self::Image(employee.profile_image.clone())
        } else {
            Self::Initials(employee.initials())
        }
    }

    /// Short text form for terminal output.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Image(_) => "[img]",
            Self::Initials(initials) => initials,
        }
    }
}

/// An action offered on every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Open the form seeded with this record.
    Edit(EmployeeId),
    /// Ask to delete this record; needs confirmation.
    RequestDelete(EmployeeId),
    /// Flip the active flag immediately.
    ToggleStatus(EmployeeId),
    /// Print this record on its own.
    Print(EmployeeId),
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Record id.
    pub id: EmployeeId,
    /// Avatar slot.
    pub avatar: Avatar,
    /// Full name.
    pub full_name: String,
    /// Gender label.
    pub gender: &'static str,
    /// Formatted date of birth.
    pub dob: String,
    /// State label.
    pub state: &'static str,
    /// Status switch position.
    pub is_active: bool,
    /// `Active` or `Inactive`.
    pub status: &'static str,
}

impl TableRow {
    /// Row for `employee`.
    #[must_use]
    pub fn new(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            avatar: Avatar::for_employee(employee),
            full_name: employee.full_name.clone(),
            gender: employee.gender.as_str(),
            dob: format_dob(employee.dob),
            state: employee.state.as_str(),
            is_active: employee.is_active,
            status: employee.status_label(),
        }
    }

    /// The actions this row offers.
    #[must_use]
    pub fn actions(&self) -> [RowAction; 4] {
        [
            RowAction::Edit(self.id.clone()),
            RowAction::RequestDelete(self.id.clone()),
            RowAction::ToggleStatus(self.id.clone()),
            RowAction::Print(self.id.clone()),
        ]
    }

    fn cells(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.avatar.label().to_string(),
            self.full_name.clone(),
            self.gender.to_string(),
            self.dob.clone(),
            self.state.to_string(),
            self.status.to_string(),
        ]
    }
}

/// Medium date format, e.g. `Jan 1, 1990`.
#[must_use]
pub fn format_dob(dob: NaiveDate) -> String {
    dob.format("%b %-d, %Y").to_string()
}

/// Rows for `employees`, in order.
#[must_use]
pub fn rows(employees: &[Employee]) -> Vec<TableRow> {
    employees.iter().map(TableRow::new).collect()
}

/// Render `employees` as an aligned plain-text table.
///
/// An empty slice renders the empty state instead.
#[must_use]
pub fn render_text(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n");
    }

    let cells: Vec<[String; 7]> = employees.iter().map(|e| TableRow::new(e).cells()).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = line(&HEADERS.map(str::to_string), &widths);
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row, &widths));
    }
    out
}

fn line(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Gender, State};

    fn employee(id: u32, name: &str, image: &str, active: bool) -> Employee {
        Employee {
            id: id.into(),
            full_name: name.to_string(),
            gender: Gender::Female,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            profile_image: image.to_string(),
            state: State::TamilNadu,
            is_active: active,
        }
    }

    #[test]
    fn test_format_dob() {
        assert_eq!(format_dob(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()), "Jan 1, 1990");
        assert_eq!(format_dob(NaiveDate::from_ymd_opt(2001, 12, 25).unwrap()), "Dec 25, 2001");
    }

    #[test]
    fn test_row_fields() {
        let row = TableRow::new(&employee(12345, "Asha Rao", "", false));
        assert_eq!(row.id, EmployeeId::Numeric(12345));
        assert_eq!(row.avatar, Avatar::Initials("AR".to_string()));
        assert_eq!(row.gender, "Female");
        assert_eq!(row.dob, "Jan 1, 1990");
        assert_eq!(row.state, "Tamil Nadu");
        assert_eq!(row.status, "Inactive");
        assert!(!row.is_active);
    }

    #[test]
    fn test_image_avatar() {
        let row = TableRow::new(&employee(1, "Asha Rao", "data:image/png;base64,AA==", true));
        assert_eq!(row.avatar.label(), "[img]");
    }

    #[test]
    fn test_row_actions_target_row() {
        let row = TableRow::new(&employee(777, "X Y", "", true));
        assert_eq!(
            row.actions(),
            [
                RowAction::Edit(EmployeeId::Numeric(777)),
                RowAction::RequestDelete(EmployeeId::Numeric(777)),
                RowAction::ToggleStatus(EmployeeId::Numeric(777)),
                RowAction::Print(EmployeeId::Numeric(777)),
            ]
        );
    }

    #[test]
    fn test_render_empty_state() {
        let text = render_text(&[]);
        assert!(text.contains(EMPTY_TITLE));
        assert!(text.contains(EMPTY_HINT));
    }

    #[test]
    fn test_render_one_line_per_employee() {
        let list = vec![
            employee(10001, "Asha Rao", "", true),
            employee(10002, "Meera", "", false),
        ];
        let text = render_text(&list);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].starts_with("10001"));
        assert!(lines[2].contains("Asha Rao"));
        assert!(lines[3].contains("Inactive"));
    }

    #[test]
    fn test_rows_preserve_order() {
        let list = vec![employee(3, "C c", "", true), employee(1, "A a", "", true)];
        let ids: Vec<Option<u32>> = rows(&list).iter().map(|r| r.id.as_number()).collect();
        assert_eq!(ids, vec![Some(3), Some(1)]);
    }

    #[test]
    fn test_legacy_id_cell() {
        let mut legacy = employee(1, "Old Timer", "", true);
        legacy.id = EmployeeId::Other(serde_json::json!("emp-1"));
        let text = render_text(&[legacy.clone()]);
        assert!(text.lines().nth(2).unwrap().starts_with("emp-1"));
        assert_eq!(TableRow::new(&legacy).actions()[2], RowAction::ToggleStatus(legacy.id.clone()));
    }
}
