//! Durable mirror of the employee list.
//!
//! The whole list lives under one key as a JSON array and is rewritten on
//! every save. There is no merge: the last writer wins.

use tracing::{debug, warn};

use crate::employee::Employee;
use crate::error::Result;
use crate::storage::Storage;

/// Storage key holding the employee list.
pub const EMPLOYEES_KEY: &str = "employees_data";

/// Typed access to the stored employee list.
#[derive(Debug, Clone, Copy)]
pub struct RecordStore<'a> {
    storage: &'a Storage,
}

impl<'a> RecordStore<'a> {
    /// Wrap a storage handle.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Load the stored list.
    ///
    /// An absent key or an undecodable value both yield an empty list; the
    /// decode failure is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying storage read fails.
    pub fn load(&self) -> Result<Vec<Employee>> {
        let Some(raw) = self.storage.get_item(EMPLOYEES_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Employee>>(&raw) {
            Ok(employees) => {
                debug!(count = employees.len(), "Loaded employee records");
                Ok(employees)
            }
            Err(e) => {
                warn!(error = %e, "Stored employee list is unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the stored list with `employees`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails. Nothing
    /// is retried.
    pub fn save(&self, employees: &[Employee]) -> Result<()> {
        let json = serde_json::to_string(employees)?;
        self.storage.set_item(EMPLOYEES_KEY, &json)?;
        debug!(count = employees.len(), "Saved employee records");
        Ok(())
    }
}
