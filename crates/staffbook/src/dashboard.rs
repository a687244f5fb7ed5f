//! The signed-in view over the employee list.
//!
//! [`Dashboard`] owns the in-memory list, mirrors every change to the
//! [`RecordStore`], and derives filtered views and counts on demand. It can
//! only be opened with a [`Session`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::employee::{Employee, EmployeeDraft, EmployeeId, Gender};
use crate::error::{Error, Result};
use crate::form::{EmployeeForm, Submission, SubmitError};
use crate::id::generate_id;
use crate::notice::Notice;
use crate::print;
use crate::records::RecordStore;
use crate::session::Session;
use crate::storage::Storage;
use crate::table::RowAction;

/// Shown after a record is added.
pub const EMPLOYEE_ADDED: Notice = Notice::new("Success", "Employee added successfully!");

/// Shown after a record is edited.
pub const EMPLOYEE_UPDATED: Notice = Notice::new("Success", "Employee updated successfully!");

/// Shown after a record is deleted.
pub const EMPLOYEE_REMOVED: Notice = Notice::new("Deleted", "Employee removed successfully.");

/// Gender criterion of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderFilter {
    /// Any gender.
    #[default]
    All,
    /// Exactly this gender.
    Is(Gender),
}

impl FromStr for GenderFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Is)
        }
    }
}

/// Status criterion of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Active and inactive.
    #[default]
    All,
    /// Active only.
    Active,
    /// Inactive only.
    Inactive,
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(Error::invalid_field(
                "status",
                "expected all, active or inactive",
            )),
        }
    }
}

/// Criteria for the visible list. All three must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Case-insensitive substring of the full name; empty matches all.
    pub search: String,
    /// Gender criterion.
    pub gender: GenderFilter,
    /// Status criterion.
    pub status: StatusFilter,
}

impl Filter {
    /// Whether `employee` passes every criterion.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        let matches_search = employee
            .full_name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_gender = match self.gender {
            GenderFilter::All => true,
            GenderFilter::Is(gender) => employee.gender == gender,
        };
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => employee.is_active,
            StatusFilter::Inactive => !employee.is_active,
        };
        matches_search && matches_gender && matches_status
    }
}

/// Totals over the whole list, ignoring any filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Counts {
    /// All records.
    pub total: usize,
    /// Active records.
    pub active: usize,
    /// Inactive records.
    pub inactive: usize,
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {}  Active: {}  Inactive: {}",
            self.total, self.active, self.inactive
        )
    }
}

/// A delete awaiting confirmation.
///
/// Dropping it cancels the delete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete {
    id: EmployeeId,
    full_name: String,
}

impl PendingDelete {
    /// Id of the record to delete.
    #[must_use]
    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// Name of the record to delete, for the confirmation prompt.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Abandon the delete.
    pub fn cancel(self) {
        debug!(id = %self.id, "Delete cancelled");
    }
}

/// What a dispatched row action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The form is now open for editing this record.
    Editing(EmployeeId),
    /// A delete needs confirmation.
    ConfirmDelete(PendingDelete),
    /// The record's status was flipped.
    Toggled(Employee),
    /// A printable page for the record.
    Printed(String),
}

/// The signed-in employee list.
#[derive(Debug)]
pub struct Dashboard<'a> {
    store: RecordStore<'a>,
    session: &'a Session,
    employees: Vec<Employee>,
    form: EmployeeForm,
}

impl<'a> Dashboard<'a> {
    /// Open the dashboard and load the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] without a session, or an error if
    /// the storage read fails.
    pub fn open(storage: &'a Storage, session: Option<&'a Session>) -> Result<Self> {
        let session = session.ok_or(Error::NotAuthenticated)?;
        let store = RecordStore::new(storage);
        let employees = store.load()?;
        debug!(email = %session.email, count = employees.len(), "Dashboard opened");

        Ok(Self {
            store,
            session,
            employees,
            form: EmployeeForm::new(),
        })
    }

    /// Override the largest image the form accepts.
    #[must_use]
    pub fn with_max_image_bytes(mut self, max: u64) -> Self {
        self.form = self.form.with_max_image_bytes(max);
        self
    }

    /// The session this dashboard was opened with.
    #[must_use]
    pub fn session(&self) -> &Session {
        self.session
    }

    /// Every record, in stored order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Records passing `filter`, in stored order.
    #[must_use]
    pub fn filtered(&self, filter: &Filter) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Totals over the unfiltered list.
    #[must_use]
    pub fn counts(&self) -> Counts {
        let total = self.employees.len();
        let active = self.employees.iter().filter(|e| e.is_active).count();
        Counts {
            total,
            active,
            inactive: total - active,
        }
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] if no record has `id`.
    pub fn get(&self, id: &EmployeeId) -> Result<&Employee> {
        let index = self.position(id)?;
        Ok(&self.employees[index])
    }

    fn position(&self, id: &EmployeeId) -> Result<usize> {
        self.employees
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| Error::EmployeeNotFound { id: id.clone() })
    }

    /// Persist `updated` and adopt it as the current list.
    fn commit(&mut self, updated: Vec<Employee>) -> Result<()> {
        self.store.save(&updated)?;
        self.employees = updated;
        Ok(())
    }

    /// Add a record with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn add(&mut self, draft: EmployeeDraft) -> Result<(Employee, Notice)> {
        let employee = Employee::from_draft(generate_id(&self.employees), draft);
        let mut updated = self.employees.clone();
        updated.push(employee.clone());
        self.commit(updated)?;
        self.form.close();

        info!(id = %employee.id, "Employee added");
        Ok((employee, EMPLOYEE_ADDED))
    }

    /// Replace the fields of record `id`, keeping the id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id, or an error if
    /// the storage write fails.
    pub fn edit(&mut self, id: &EmployeeId, draft: EmployeeDraft) -> Result<(Employee, Notice)> {
        let index = self.position(id)?;
        let employee = Employee::from_draft(id.clone(), draft);
        let mut updated = self.employees.clone();
        updated[index] = employee.clone();
        self.commit(updated)?;
        self.form.close();

        info!(id = %employee.id, "Employee updated");
        Ok((employee, EMPLOYEE_UPDATED))
    }

    /// Start deleting record `id`. Nothing changes until confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id.
    pub fn request_delete(&self, id: &EmployeeId) -> Result<PendingDelete> {
        let employee = self.get(id)?;
        Ok(PendingDelete {
            id: employee.id.clone(),
            full_name: employee.full_name.clone(),
        })
    }

    /// Carry out a requested delete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] if the record vanished since the
    /// request, or an error if the storage write fails.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> Result<(Employee, Notice)> {
        let index = self.position(&pending.id)?;
        let mut updated = self.employees.clone();
        let removed = updated.remove(index);
        self.commit(updated)?;

        info!(id = %removed.id, "Employee removed");
        Ok((removed, EMPLOYEE_REMOVED))
    }

    /// Flip the active flag of record `id` and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id, or an error if
    /// the storage write fails.
    pub fn toggle_status(&mut self, id: &EmployeeId) -> Result<Employee> {
        let index = self.position(id)?;
        let mut updated = self.employees.clone();
        updated[index].is_active = !updated[index].is_active;
        let employee = updated[index].clone();
        self.commit(updated)?;

        info!(id = %employee.id, active = employee.is_active, "Employee status toggled");
        Ok(employee)
    }

    /// The employee form.
    #[must_use]
    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    /// The employee form, for entering values.
    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    /// Open the form for a new record.
    pub fn open_create_form(&mut self) {
        self.form.open_create();
    }

    /// Open the form seeded with record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id.
    pub fn open_edit_form(&mut self, id: &EmployeeId) -> Result<()> {
        let index = self.position(id)?;
        self.form.open_edit(&self.employees[index]);
        Ok(())
    }

    /// Submit the open form and apply it.
    ///
    /// On validation failure the form stays open with its field errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormRejected`] if the form is closed or invalid, or
    /// any error from [`add`](Self::add) or [`edit`](Self::edit).
    pub fn submit_form(&mut self, now: DateTime<Utc>) -> Result<(Employee, Notice)> {
        match self.form.submit(now) {
            Ok(Submission::Create(draft)) => self.add(draft),
            Ok(Submission::Edit { id, draft }) => self.edit(&id, draft),
            Err(e @ SubmitError::NotOpen) => Err(Error::FormRejected(e.to_string())),
            Err(SubmitError::Invalid(errors)) => {
                debug!(fields = errors.len(), "Employee form rejected");
                Err(Error::FormRejected(errors.to_string()))
            }
        }
    }

    /// Carry out a row action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id, or an error if
    /// a storage write fails.
    pub fn dispatch(&mut self, action: RowAction) -> Result<ActionOutcome> {
        match action {
            RowAction::Edit(id) => {
                self.open_edit_form(&id)?;
                Ok(ActionOutcome::Editing(id))
            }
            RowAction::RequestDelete(id) => {
                self.request_delete(&id).map(ActionOutcome::ConfirmDelete)
            }
            RowAction::ToggleStatus(id) => self.toggle_status(&id).map(ActionOutcome::Toggled),
            RowAction::Print(id) => self.print_one(&id).map(ActionOutcome::Printed),
        }
    }

    /// Printable page of every record passing `filter`.
    #[must_use]
    pub fn print_all(&self, filter: &Filter) -> String {
        print::render_list(&self.filtered(filter))
    }

    /// Printable page of record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown id.
    pub fn print_one(&self, id: &EmployeeId) -> Result<String> {
        self.get(id).map(print::render_record)
    }
}
