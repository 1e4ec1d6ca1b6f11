use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

use clap::{ArgAction, Args, Parser, Subcommand};
use plainenv::{EnvLoader, Entry, Error};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILE: &str = ".env";

/// Run commands with variables loaded from plain `NAME=VALUE` env files.
#[derive(Debug, Parser)]
#[command(name = "plainenv", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Load env files and execute a command with the variables applied.
    Run(RunArgs),
    /// Parse env files and report how many entries they hold.
    Check(FileArgs),
}

#[derive(Debug, Args)]
struct FileArgs {
    /// Env file path(s). Repeat or pass comma-separated paths.
    #[arg(short, long = "file", value_name = "PATHS", value_delimiter = ',')]
    files: Vec<PathBuf>,
}

impl FileArgs {
    fn effective_files(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            vec![PathBuf::from(DEFAULT_FILE)]
        } else {
            self.files.clone()
        }
    }
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    files: FileArgs,

    /// Command to execute, followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, value_name = "COMMAND")]
    command: Vec<OsString>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        CliCommand::Run(args) => execute_run(args),
        CliCommand::Check(args) => execute_check(&args),
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("plainenv: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_entries(files: &FileArgs) -> Result<Vec<Entry>, Error> {
    EnvLoader::new().paths(files.effective_files()).parse_only()
}

fn execute_check(args: &FileArgs) -> Result<ExitCode, String> {
    let entries = load_entries(args).map_err(|err| err.to_string())?;
    println!("{} entries", entries.len());
    Ok(ExitCode::SUCCESS)
}

fn execute_run(args: RunArgs) -> Result<ExitCode, String> {
    let entries = load_entries(&args.files).map_err(|err| err.to_string())?;
    let Some((program, program_args)) = args.command.split_first() else {
        return Err("missing command after `run`".to_owned());
    };

    let mut command = Command::new(program);
    command.args(program_args);
    for entry in entries {
        tracing::trace!(key = %entry.key, line = entry.line, "passing entry to command");
        command.env(entry.key, entry.value);
    }

    execute_command(command, program)
}

#[cfg(unix)]
fn execute_command(mut command: Command, program: &OsString) -> Result<ExitCode, String> {
    let err = command.exec();
    Err(format!(
        "failed to execute `{}`: {err}",
        program.to_string_lossy()
    ))
}

#[cfg(not(unix))]
fn execute_command(mut command: Command, program: &OsString) -> Result<ExitCode, String> {
    let status = command
        .status()
        .map_err(|err| format!("failed to execute `{}`: {err}", program.to_string_lossy()))?;
    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
