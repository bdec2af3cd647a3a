//! Command-line front end over the record operation surface.
//!
//! Each subcommand maps to one `SocialNetwork` operation; the exit code
//! reflects its boolean result.

use anyhow::Context;
use clap::{Parser, Subcommand};
use socialnet_core::db::open_db;
use socialnet_core::{init_logging, load_config, SocialNetwork, SqliteSocialStore, Status, User};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "socialnet", version)]
#[command(about = "Manage users and status updates in a local SQLite store")]
struct Cli {
    /// Config file (defaults to ./socialnet.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides the config value
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for log files; logs go to stderr otherwise
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load users from a CSV file (USER_ID,EMAIL,NAME,LASTNAME)
    LoadUsers { file: PathBuf },
    /// Load status updates from a CSV file (STATUS_ID,USER_ID,STATUS_TEXT)
    LoadStatuses { file: PathBuf },
    AddUser {
        user_id: String,
        email: String,
        name: String,
        last_name: String,
    },
    UpdateUser {
        user_id: String,
        email: String,
        name: String,
        last_name: String,
    },
    SearchUser { user_id: String },
    /// Delete a user and every status it owns
    DeleteUser { user_id: String },
    AddStatus {
        status_id: String,
        user_id: String,
        text: String,
    },
    UpdateStatus {
        status_id: String,
        user_id: String,
        text: String,
    },
    SearchStatus { status_id: String },
    DeleteStatus { status_id: String },
    /// Delete statuses whose owner no longer exists
    PruneOrphans,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }

    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.database_path).with_context(|| {
        format!(
            "failed to open database {}",
            config.database_path.display()
        )
    })?;
    let network = SocialNetwork::new(SqliteSocialStore::try_new(&conn)?);

    Ok(dispatch(&network, cli.command))
}

fn dispatch(network: &SocialNetwork<SqliteSocialStore<'_>>, command: Command) -> bool {
    match command {
        Command::LoadUsers { file } => confirm(
            network.load_users(&file),
            "Accounts loaded successfully.",
            "An error occurred while loading users.",
        ),
        Command::LoadStatuses { file } => confirm(
            network.load_status_updates(&file),
            "Status updates loaded successfully.",
            "An error occurred while loading status updates.",
        ),
        Command::AddUser {
            user_id,
            email,
            name,
            last_name,
        } => confirm(
            network.add_user(&user_id, &email, &name, &last_name),
            "User added successfully.",
            "Failed to add user.",
        ),
        Command::UpdateUser {
            user_id,
            email,
            name,
            last_name,
        } => confirm(
            network.update_user(&user_id, &email, &name, &last_name),
            "User was successfully updated.",
            "An error occurred while trying to update user; check user id.",
        ),
        Command::SearchUser { user_id } => match network.search_user(&user_id) {
            Some(user) => {
                print_user(&user);
                true
            }
            None => {
                println!("User not found");
                false
            }
        },
        Command::DeleteUser { user_id } => confirm(
            network.delete_user(&user_id),
            "User was successfully deleted.",
            "An error occurred while trying to delete user; check user id.",
        ),
        Command::AddStatus {
            status_id,
            user_id,
            text,
        } => confirm(
            network.add_status(&status_id, &user_id, &text),
            "New status was successfully added.",
            "An error occurred while trying to add new status.",
        ),
        Command::UpdateStatus {
            status_id,
            user_id,
            text,
        } => confirm(
            network.update_status(&status_id, &user_id, &text),
            "Status was successfully updated.",
            "An error occurred while trying to update status; check user and status ids.",
        ),
        Command::SearchStatus { status_id } => match network.search_status(&status_id) {
            Some(status) => {
                print_status(&status);
                true
            }
            None => {
                println!("Status not found");
                false
            }
        },
        Command::DeleteStatus { status_id } => confirm(
            network.delete_status(&status_id),
            "Status was successfully deleted.",
            "An error occurred while trying to delete status; check status id.",
        ),
        Command::PruneOrphans => match network.prune_orphaned_statuses() {
            Some(removed) => {
                println!("Removed {removed} orphaned statuses.");
                true
            }
            None => {
                println!("An error occurred while removing orphaned statuses.");
                false
            }
        },
    }
}

fn confirm(ok: bool, success: &str, failure: &str) -> bool {
    println!("{}", if ok { success } else { failure });
    ok
}

fn print_user(user: &User) {
    println!("User ID: {}", user.user_id);
    println!("Email: {}", user.email);
    println!("Name: {}", user.name);
    println!("Last name: {}", user.last_name);
}

fn print_status(status: &Status) {
    println!("User ID: {}", status.user_id);
    println!("Status ID: {}", status.status_id);
    println!("Status text: {}", status.text);
}
