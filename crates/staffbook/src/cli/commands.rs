//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::dashboard::{Filter, GenderFilter, StatusFilter};
use crate::employee::{EmployeeId, Gender};

/// Sign-up arguments.
#[derive(Debug, Args)]
pub struct SignupCommand {
    /// Email to register
    #[arg(short, long)]
    pub email: String,

    /// Password for the new account
    #[arg(short, long)]
    pub password: String,

    /// Password again, to confirm
    #[arg(long)]
    pub confirm: String,
}

/// Login arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Registered email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for commands with an optional JSON rendering.
#[derive(Debug, Args)]
pub struct JsonFlag {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Employee record commands.
#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Add a new employee
    Add(AddCommand),

    /// Edit an existing employee
    Edit(EditCommand),

    /// List employees
    List(ListCommand),

    /// Show one employee
    Show {
        /// Employee id
        id: EmployeeId,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Flip an employee between active and inactive
    Toggle {
        /// Employee id
        id: EmployeeId,
    },

    /// Delete an employee
    Delete {
        /// Employee id
        id: EmployeeId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write a printable HTML page of one or all employees
    Print(PrintCommand),
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Full name
    #[arg(short, long)]
    pub name: String,

    /// Gender
    #[arg(short, long, value_enum, ignore_case = true)]
    pub gender: GenderArg,

    /// Date of birth (YYYY-MM-DD)
    #[arg(short, long)]
    pub dob: String,

    /// State, e.g. "Tamil Nadu" (see `staffbook states`)
    #[arg(short, long)]
    pub state: String,

    /// Profile image file
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Add the employee as inactive
    #[arg(long)]
    pub inactive: bool,
}

/// Edit command arguments. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Employee id
    pub id: EmployeeId,

    /// Full name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Gender
    #[arg(short, long, value_enum, ignore_case = true)]
    pub gender: Option<GenderArg>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(short, long)]
    pub dob: Option<String>,

    /// State
    #[arg(short, long)]
    pub state: Option<String>,

    /// Replace the profile image
    #[arg(short, long, value_name = "PATH", conflicts_with = "remove_image")]
    pub image: Option<PathBuf>,

    /// Remove the profile image
    #[arg(long)]
    pub remove_image: bool,

    /// Set the active flag
    #[arg(long, value_name = "BOOL")]
    pub active: Option<bool>,
}

/// Filter arguments shared by `list` and `print`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Gender to show
    #[arg(short, long, value_enum, ignore_case = true, default_value = "all")]
    pub gender: GenderFilterArg,

    /// Status to show
    #[arg(long, value_enum, ignore_case = true, default_value = "all")]
    pub status: StatusArg,
}

impl FilterArgs {
    /// The dashboard filter these arguments describe.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        Filter {
            search: self.search.clone(),
            gender: self.gender.into(),
            status: self.status.into(),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter criteria
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Print command arguments.
#[derive(Debug, Args)]
pub struct PrintCommand {
    /// Print only this employee
    pub id: Option<EmployeeId>,

    /// Filter criteria, used when no id is given
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Gender argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum GenderArg {
    /// Male
    Male,
    /// Female
    Female,
    /// Other
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
            GenderArg::Other => Self::Other,
        }
    }
}

/// Gender filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderFilterArg {
    /// Every gender
    All,
    /// Male only
    #[value(name = "Male")]
    Male,
    /// Female only
    #[value(name = "Female")]
    Female,
    /// Other only
    #[value(name = "Other")]
    Other,
}

impl From<GenderFilterArg> for GenderFilter {
    fn from(arg: GenderFilterArg) -> Self {
        match arg {
            GenderFilterArg::All => Self::All,
            GenderFilterArg::Male => Self::Is(Gender::Male),
            GenderFilterArg::Female => Self::Is(Gender::Female),
            GenderFilterArg::Other => Self::Is(Gender::Other),
        }
    }
}

/// Status filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Active and inactive
    All,
    /// Active only
    Active,
    /// Inactive only
    Inactive,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => Self::All,
            StatusArg::Active => Self::Active,
            StatusArg::Inactive => Self::Inactive,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
