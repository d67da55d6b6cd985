// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod errors;
mod output;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand};
use errors::CliError;
use hanzi_explorer_core::{resolve_database_path, ExitCode, MachineError};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::EnvFilter;

pub const CRATE_NAME: &str = "hanzi-explorer-cli";
pub const ENV_HANZI_ADMIN_PASSWORD: &str = "HANZI_ADMIN_PASSWORD";

#[derive(Parser)]
#[command(name = "hanzi-explorer")]
#[command(about = "Heisig hanzi catalog operations CLI")]
#[command(version)]
#[command(
    after_help = "Environment:\n  HANZI_DATA_DIR         Data directory\n  HANZI_DATABASE_PATH    Catalog database file\n  HANZI_LOG_LEVEL        Log verbosity override\n  HANZI_PASSWORD_ROUNDS  PBKDF2 rounds for new passwords"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Catalog database file; defaults to the data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and apply migrations.
    InitDb,
    /// Two-pass bulk import of a catalog JSON document.
    ImportJson {
        #[arg(long)]
        path: PathBuf,
        /// Delete characters, primitives and keywords before importing.
        #[arg(long, default_value_t = false)]
        replace: bool,
    },
    /// Write the catalog as an importable JSON document.
    ExportJson {
        #[arg(long)]
        out: PathBuf,
    },
    /// Create an administrator account.
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Falls back to HANZI_ADMIN_PASSWORD.
        #[arg(long)]
        password: Option<String>,
        /// Grant admin to an existing account instead of failing.
        #[arg(long, default_value_t = false)]
        promote_existing: bool,
    },
    /// Entity counts and the most recently added characters.
    Stats,
    /// Search glyphs, keywords, stories and primitives.
    Search {
        q: String,
        #[arg(long)]
        volume: Option<i64>,
        #[arg(long)]
        chapter: Option<i64>,
    },
    /// Primitive to character graph as nodes and edges.
    Graph,
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

fn init_logging(flags: LogFlags) {
    let default_level = if flags.quiet {
        "error"
    } else {
        match flags.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env(hanzi_explorer_core::ENV_HANZI_LOG_LEVEL)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            errors::emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::new(
                    ExitCode::Usage,
                    MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                ));
            }
        },
    };
    init_logging(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });
    let output_mode = OutputMode { json: cli.json };
    let db_path = cli.db.unwrap_or_else(resolve_database_path);
    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;

    let payload = match command {
        Commands::InitDb => commands::init_db(&db_path)?,
        Commands::ImportJson { path, replace } => commands::import_json(&db_path, &path, replace)?,
        Commands::ExportJson { out } => commands::export_json(&db_path, &out)?,
        Commands::CreateAdmin {
            username,
            email,
            password,
            promote_existing,
        } => {
            let password = password
                .or_else(|| std::env::var(ENV_HANZI_ADMIN_PASSWORD).ok())
                .ok_or_else(|| {
                    CliError::usage("a password is required (--password or HANZI_ADMIN_PASSWORD)")
                })?;
            commands::create_admin(
                &db_path,
                commands::AdminRequest {
                    username,
                    email,
                    password,
                    promote_existing,
                },
                commands::password_rounds(),
            )?
        }
        Commands::Stats => commands::stats(&db_path)?,
        Commands::Search { q, volume, chapter } => commands::search(&db_path, &q, volume, chapter)?,
        Commands::Graph => commands::graph(&db_path)?,
    };
    output::emit_ok(output_mode, &payload).map_err(CliError::internal)
}
