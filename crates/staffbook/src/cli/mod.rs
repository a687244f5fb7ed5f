//! Command-line interface for staffbook.
//!
//! This module provides the CLI structure for the `staffbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, EditCommand, EmployeeCommand, FilterArgs, GenderArg,
    GenderFilterArg, JsonFlag, ListCommand, LoginCommand, OutputFormat, PrintCommand,
    SignupCommand, StatusArg,
};

/// staffbook - Keep a local book of employee records
///
/// Sign up or log in, then add, edit, filter, toggle, delete and print
/// employee records stored in a local database.
#[derive(Debug, Parser)]
#[command(name = "staffbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and log in
    Signup(SignupCommand),

    /// Log in with an existing account
    Login(LoginCommand),

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami(JsonFlag),

    /// Show record counts and storage usage
    Stats(JsonFlag),

    /// Manage employee records
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// List the states an employee can belong to
    States,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::EmployeeId;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Logout,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "staffbook");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_signup() {
        let args = [
            "staffbook", "signup", "-e", "a@b.co", "-p", "secret", "--confirm", "secret",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Signup(cmd) => {
                assert_eq!(cmd.email, "a@b.co");
                assert_eq!(cmd.password, "secret");
                assert_eq!(cmd.confirm, "secret");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_employee_add() {
        let args = [
            "staffbook",
            "employee",
            "add",
            "--name",
            "Asha Rao",
            "--gender",
            "female",
            "--dob",
            "1990-01-01",
            "--state",
            "Tamil Nadu",
            "--inactive",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::Add(cmd)) => {
                assert_eq!(cmd.name, "Asha Rao");
                assert_eq!(cmd.gender, GenderArg::Female);
                assert_eq!(cmd.state, "Tamil Nadu");
                assert!(cmd.inactive);
                assert!(cmd.image.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_employee_edit_active() {
        let args = ["staffbook", "employee", "edit", "12345", "--active", "false"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::Edit(cmd)) => {
                assert_eq!(cmd.id, EmployeeId::Numeric(12345));
                assert_eq!(cmd.active, Some(false));
                assert!(cmd.name.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_edit_image_conflicts_with_remove() {
        let args = [
            "staffbook",
            "employee",
            "edit",
            "12345",
            "--image",
            "a.png",
            "--remove-image",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["staffbook", "employee", "list"]).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::List(cmd)) => {
                assert_eq!(cmd.format, OutputFormat::Table);
                assert_eq!(cmd.filter.search, "");
                assert_eq!(cmd.filter.gender, GenderFilterArg::All);
                assert_eq!(cmd.filter.status, StatusArg::All);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let args = [
            "staffbook", "employee", "list", "-s", "ash", "-g", "Male", "--status", "inactive",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::List(cmd)) => {
                assert_eq!(cmd.filter.search, "ash");
                assert_eq!(cmd.filter.gender, GenderFilterArg::Male);
                assert_eq!(cmd.filter.status, StatusArg::Inactive);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["staffbook", "employee", "delete", "10001", "-y"]).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::Delete { id, yes }) => {
                assert_eq!(id, EmployeeId::Numeric(10001));
                assert!(yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_print_all_to_file() {
        let cli =
            Cli::try_parse_from(["staffbook", "employee", "print", "-o", "out.html"]).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::Print(cmd)) => {
                assert!(cmd.id.is_none());
                assert_eq!(cmd.output, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_numeric_id() {
        let cli = Cli::try_parse_from(["staffbook", "employee", "toggle", "emp-1"]).unwrap();
        match cli.command {
            Command::Employee(EmployeeCommand::Toggle { id }) => {
                assert_eq!(id, EmployeeId::Other(serde_json::json!("emp-1")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["staffbook", "-c", "/custom/config.toml", "whoami"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["staffbook", "-v", "stats"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["staffbook", "-q", "states"]).unwrap();
        assert!(cli.quiet);
    }
}
