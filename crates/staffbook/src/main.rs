//! `staffbook` - CLI for the local employee book
//!
//! This binary provides the command-line interface for signing in and
//! managing employee records.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use chrono::Utc;
use clap::Parser;

use staffbook::auth::{AuthMode, AuthService};
use staffbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, EmployeeCommand, ListCommand,
    OutputFormat, PrintCommand,
};
use staffbook::dashboard::Dashboard;
use staffbook::employee::{Gender, State};
use staffbook::form::Field;
use staffbook::session::SessionStore;
use staffbook::{init_logging, table, Config, Error, Storage};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    if let Err(e) = run(&config, cli.command) {
        match e.downcast_ref::<Error>() {
            Some(Error::Auth(auth)) => eprintln!("{}: {auth}", auth.title()),
            Some(err) => eprintln!("Error: {err}"),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
    Ok(())
}

fn run(config: &Config, command: Command) -> CliResult {
    let open_storage = || Storage::open(config.database_path());

    match command {
        Command::Signup(cmd) => handle_auth(
            config,
            &open_storage()?,
            AuthMode::SignUp,
            &cmd.email,
            &cmd.password,
            &cmd.confirm,
        ),
        Command::Login(cmd) => handle_auth(
            config,
            &open_storage()?,
            AuthMode::SignIn,
            &cmd.email,
            &cmd.password,
            "",
        ),
        Command::Logout => handle_logout(&open_storage()?),
        Command::Whoami(flag) => handle_whoami(&open_storage()?, flag.json),
        Command::Stats(flag) => handle_stats(&open_storage()?, flag.json),
        Command::Employee(employee_cmd) => {
            handle_employee(config, &open_storage()?, employee_cmd)
        }
        Command::States => {
            handle_states();
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(config, config_cmd),
    }
}

fn handle_auth(
    config: &Config,
    storage: &Storage,
    mode: AuthMode,
    email: &str,
    password: &str,
    confirm: &str,
) -> CliResult {
    let service =
        AuthService::new(storage).with_min_password_length(config.auth.min_password_length);
    let (session, notice) = service.submit(mode, email, password, confirm)?;
    println!("{notice}");
    println!("Logged in as {}", session.email);
    Ok(())
}

fn handle_logout(storage: &Storage) -> CliResult {
    if SessionStore::new(storage).end()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn handle_whoami(storage: &Storage, json: bool) -> CliResult {
    let session = SessionStore::new(storage)
        .restore()?
        .ok_or(Error::NotAuthenticated)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!("{}", session.email);
    }
    Ok(())
}

fn handle_stats(storage: &Storage, json: bool) -> CliResult {
    let stats = storage.stats()?;
    let session = SessionStore::new(storage).restore()?;
    let counts = match &session {
        Some(session) => Some(Dashboard::open(storage, Some(session))?.counts()),
        None => None,
    };

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "storage": stats,
            "employees": counts,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("staffbook stats");
        println!("---------------");
        println!("Database:      {}", storage.path().display());
        println!("Items:         {}", stats.item_count);
        println!("Value bytes:   {}", stats.value_bytes);
        println!("File size:     {}", stats.db_size_bytes);
        match counts {
            Some(counts) => {
                println!("Employees:     {}", counts.total);
                println!("  Active:      {}", counts.active);
                println!("  Inactive:    {}", counts.inactive);
            }
            None => println!("Employees:     (log in to see counts)"),
        }
    }
    Ok(())
}

fn handle_states() {
    for state in State::ALL {
        println!("{state}");
    }
}

fn handle_employee(config: &Config, storage: &Storage, cmd: EmployeeCommand) -> CliResult {
    let session = SessionStore::new(storage).restore()?;
    let mut dashboard =
        Dashboard::open(storage, session.as_ref())?.with_max_image_bytes(config.form.max_image_bytes);

    match cmd {
        EmployeeCommand::Add(args) => handle_add(&mut dashboard, args),
        EmployeeCommand::Edit(args) => handle_edit(&mut dashboard, args),
        EmployeeCommand::List(args) => handle_list(&dashboard, &args),
        EmployeeCommand::Show { id, json } => {
            let employee = dashboard.get(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(employee)?);
            } else {
                let row = table::TableRow::new(employee);
                println!("ID:            {}", row.id);
                println!("Full name:     {}", row.full_name);
                println!("Gender:        {}", row.gender);
                println!("Date of birth: {}", row.dob);
                println!("State:         {}", row.state);
                println!("Status:        {}", row.status);
                println!(
                    "Image:         {}",
                    if employee.has_image() { "yes" } else { "no" }
                );
            }
            Ok(())
        }
        EmployeeCommand::Toggle { id } => {
            let employee = dashboard.toggle_status(&id)?;
            println!(
                "{} ({}) is now {}",
                employee.full_name,
                employee.id,
                employee.status_label()
            );
            Ok(())
        }
        EmployeeCommand::Delete { id, yes } => {
            let pending = dashboard.request_delete(&id)?;
            if !yes && !confirm(&format!(
                "Delete {} ({})? This action cannot be undone.",
                pending.full_name(),
                pending.id()
            ))? {
                pending.cancel();
                println!("Cancelled.");
                return Ok(());
            }
            let (_, notice) = dashboard.confirm_delete(pending)?;
            println!("{notice}");
            Ok(())
        }
        EmployeeCommand::Print(args) => handle_print(&dashboard, &args),
    }
}

fn handle_add(dashboard: &mut Dashboard<'_>, args: AddCommand) -> CliResult {
    let state: State = args.state.parse()?;
    dashboard.open_create_form();
    {
        let data = dashboard.form_mut().data_mut();
        data.full_name = args.name;
        data.gender = Some(Gender::from(args.gender));
        data.dob = args.dob;
        data.state = Some(state);
        data.is_active = !args.inactive;
    }
    if let Some(path) = &args.image {
        attach_image(dashboard, path)?;
    }

    let (employee, notice) = dashboard.submit_form(Utc::now())?;
    println!("{notice}");
    println!("ID: {}", employee.id);
    Ok(())
}

fn handle_edit(dashboard: &mut Dashboard<'_>, args: EditCommand) -> CliResult {
    let state = args.state.as_deref().map(str::parse::<State>).transpose()?;
    dashboard.open_edit_form(&args.id)?;
    {
        let form = dashboard.form_mut();
        if args.remove_image {
            form.clear_image();
        }
        let data = form.data_mut();
        if let Some(name) = args.name {
            data.full_name = name;
        }
        if let Some(gender) = args.gender {
            data.gender = Some(gender.into());
        }
        if let Some(dob) = args.dob {
            data.dob = dob;
        }
        if state.is_some() {
            data.state = state;
        }
        if let Some(active) = args.active {
            data.is_active = active;
        }
    }
    if let Some(path) = &args.image {
        attach_image(dashboard, path)?;
    }

    let (_, notice) = dashboard.submit_form(Utc::now())?;
    println!("{notice}");
    Ok(())
}

fn attach_image(dashboard: &mut Dashboard<'_>, path: &std::path::Path) -> CliResult {
    let form = dashboard.form_mut();
    if !form.attach_image(path)? {
        if let Some(message) = form.errors().get(Field::ProfileImage) {
            eprintln!("Warning: {message}; keeping the current image");
        }
    }
    Ok(())
}

fn handle_list(dashboard: &Dashboard<'_>, args: &ListCommand) -> CliResult {
    let employees = dashboard.filtered(&args.filter.to_filter());
    match args.format {
        OutputFormat::Table => {
            print!("{}", table::render_text(&employees));
            let counts = dashboard.counts();
            println!();
            println!("{counts}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&employees)?);
        }
        OutputFormat::Plain => {
            for row in table::rows(&employees) {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.id, row.full_name, row.gender, row.dob, row.state, row.status
                );
            }
        }
    }
    Ok(())
}

fn handle_print(dashboard: &Dashboard<'_>, args: &PrintCommand) -> CliResult {
    let html = match &args.id {
        Some(id) => dashboard.print_one(id)?,
        None => dashboard.print_all(&args.filter.to_filter()),
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, html)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:        {}", config.database_path().display());
                println!();
                println!("[Auth]");
                println!(
                    "  Min password length:  {}",
                    config.auth.min_password_length
                );
                println!();
                println!("[Form]");
                println!("  Max image bytes:      {}", config.form.max_image_bytes);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
