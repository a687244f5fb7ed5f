//! `staffbook` - A local book of employee records
//!
//! This library provides account sign-up and login, a session that gates
//! access, and a dashboard for adding, editing, filtering, toggling, deleting
//! and printing employee records. Everything is kept in a small SQLite
//! key-value store on the local machine.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod employee;
pub mod error;
pub mod form;
pub mod id;
pub mod logging;
pub mod notice;
pub mod print;
pub mod records;
pub mod session;
pub mod storage;
pub mod table;

pub use auth::{AuthError, AuthMode, AuthService};
pub use config::Config;
pub use dashboard::{Counts, Dashboard, Filter};
pub use employee::{Employee, EmployeeDraft, EmployeeId, Gender, State};
pub use error::{Error, Result};
pub use form::EmployeeForm;
pub use logging::init_logging;
pub use notice::Notice;
pub use records::RecordStore;
pub use session::{Session, SessionStore};
pub use storage::{Storage, StorageStats};
