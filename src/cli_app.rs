//! Top-level CLI definition and dispatch.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use dashkit::core::config::Config;
use dashkit::core::errors::DashError;
use dashkit::display::currency::format_currency;
use dashkit::display::date::format_date;
use dashkit::input::phone::format_phone;
use dashkit::input::validate::{FieldKind, validate_field};
use dashkit::logger::activity::{ActivityEvent, ActivityLog};
use dashkit::table::engine::{SortDirection, SortEngine, SortKind};
use dashkit::table::keys::DateParser;
use dashkit::table::rows::{Row, read_delimited};

/// dashkit: table sorting, masked phone input and field validation.
#[derive(Debug, Parser)]
#[command(
    name = "dashkit",
    author,
    version,
    about = "Dashboard presentation toolkit",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Append activity events to this JSONL file.
    #[arg(long, global = true, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Sort delimited rows by one column.
    Sort(SortArgs),
    /// Apply the phone mask to raw input.
    Phone(PhoneArgs),
    /// Check a phone number or e-mail address.
    Validate(ValidateArgs),
    /// Format an amount as tenge.
    Currency(CurrencyArgs),
    /// Reformat a date as dd.mm.yyyy.
    Date(DateArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args)]
struct SortArgs {
    /// Zero-based column index to sort by.
    #[arg(long, value_name = "N")]
    column: usize,
    /// How cell text is compared.
    #[arg(long, value_enum, default_value_t = KindArg::Text)]
    kind: KindArg,
    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,
    /// Read rows from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Cell delimiter.
    #[arg(long, default_value_t = ',', value_name = "CHAR")]
    delimiter: char,
    /// Treat the first line as a header that stays on top.
    #[arg(long)]
    header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Text,
    Number,
    Date,
}

impl From<KindArg> for SortKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Text => Self::Text,
            KindArg::Number => Self::Number,
            KindArg::Date => Self::Date,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct PhoneArgs {
    /// Field content after the edit.
    #[arg(value_name = "RAW", allow_hyphen_values = true)]
    raw: String,
    /// Field content before the edit.
    #[arg(long, default_value = "", value_name = "TEXT")]
    previous: String,
}

#[derive(Debug, Clone, Args)]
struct ValidateArgs {
    /// Validator to apply.
    #[arg(value_enum)]
    field: FieldArg,
    /// Value to check.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FieldArg {
    Phone,
    Email,
}

impl From<FieldArg> for FieldKind {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Phone => Self::Phone,
            FieldArg::Email => Self::Email,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct CurrencyArgs {
    /// Amount to format.
    #[arg(value_name = "AMOUNT", allow_negative_numbers = true)]
    amount: f64,
}

#[derive(Debug, Clone, Args)]
struct DateArgs {
    /// Date text in any configured format.
    #[arg(value_name = "TEXT")]
    text: String,
    /// Include hours and minutes.
    #[arg(long)]
    time: bool,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print the config file path.
    Path,
    /// Print the effective configuration.
    Show,
    /// Load and validate the configuration.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Failure reported by the library.
    #[error(transparent)]
    Dash(#[from] DashError),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI: 1 user, 2 runtime, 3 internal.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Dash(err) if err.is_user_error() => 1,
            Self::Dash(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
        }
    }
}

/// Per-invocation state shared by command handlers.
struct Session {
    mode: OutputMode,
    config: Config,
    log: ActivityLog,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self, CliError> {
        let config = Config::load(cli.config.as_deref())?;
        let mut log = ActivityLog::from_config(&config.logging, cli.log.clone());
        log.record(ActivityEvent::ConfigLoaded {
            config_hash: config.stable_hash()?,
        });
        Ok(Self {
            mode: output_mode(cli),
            config,
            log,
        })
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
        command => {
            let mut session = Session::open(cli)?;
            let result = match command {
                Command::Sort(args) => run_sort(&mut session, args),
                Command::Phone(args) => run_phone(&mut session, args),
                Command::Validate(args) => run_validate(&mut session, args),
                Command::Currency(args) => run_currency(&session, args),
                Command::Date(args) => run_date(&session, args),
                Command::Config(_) | Command::Completions(_) => Ok(()),
            };
            if let Err(CliError::Dash(err)) = &result {
                session.log.record(ActivityEvent::from_error(err));
            }
            session.log.flush();
            result
        }
    }
}

fn run_sort(session: &mut Session, args: &SortArgs) -> Result<(), CliError> {
    let table = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| DashError::io(path, source))?;
            read_delimited(BufReader::new(file), args.delimiter, args.header)?
        }
        None => read_delimited(io::stdin().lock(), args.delimiter, args.header)?,
    };

    let width = table
        .header
        .as_ref()
        .or_else(|| table.rows.first())
        .map_or(0, Row::len);
    if width > 0 && args.column >= width {
        return Err(CliError::User(format!(
            "column {} is out of range for a table with {width} columns",
            args.column
        )));
    }

    let kind = SortKind::from(args.kind);
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let engine = SortEngine::new(&session.config.table)?;
    let started = Instant::now();
    let row_count = table.rows.len();
    let sorted = engine.sort(table.rows, args.column, kind, direction);
    session.log.record(ActivityEvent::TableSorted {
        column: args.column,
        kind: kind.label(),
        direction: direction.label(),
        rows: row_count,
        duration_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    });

    match session.mode {
        OutputMode::Human => {
            let mut stdout = io::stdout().lock();
            if let Some(header) = &table.header {
                writeln!(stdout, "{}", header.to_delimited(args.delimiter))?;
            }
            for row in &sorted {
                writeln!(stdout, "{}", row.to_delimited(args.delimiter))?;
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "sort",
                "column": args.column,
                "kind": kind.label(),
                "direction": direction.label(),
                "header": table.header,
                "rows": sorted,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_phone(session: &mut Session, args: &PhoneArgs) -> Result<(), CliError> {
    let formatted = format_phone(&args.previous, &args.raw);
    session.log.record(if formatted.rejected {
        ActivityEvent::PhoneRejected {
            digits: formatted.digit_count,
        }
    } else {
        ActivityEvent::PhoneFormatted {
            digits: formatted.digit_count,
            complete: formatted.is_complete,
        }
    });

    match session.mode {
        OutputMode::Human => {
            println!("{}", formatted.display_text);
            if formatted.rejected {
                eprintln!("{}", "edit rejected: too many digits".yellow());
            }
        }
        OutputMode::Json => {
            let mut payload = serde_json::to_value(&formatted)?;
            if let Value::Object(map) = &mut payload {
                map.insert("command".to_string(), json!("phone"));
            }
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_validate(session: &mut Session, args: &ValidateArgs) -> Result<(), CliError> {
    let kind = FieldKind::from(args.field);
    let validity = validate_field(kind, &args.value);

    match session.mode {
        OutputMode::Human => {
            if validity.is_valid() {
                println!("{} {}", "valid".green(), kind.label());
            } else {
                println!("{} {}", "invalid".red().bold(), kind.label());
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "validate",
                "field": kind.label(),
                "value": args.value,
                "valid": validity.is_valid(),
            });
            write_json_line(&payload)?;
        }
    }

    if validity.is_valid() {
        Ok(())
    } else {
        session.log.record(ActivityEvent::ValidationFailed {
            field: kind.label(),
        });
        Err(CliError::User(format!("invalid {}: {:?}", kind.label(), args.value)))
    }
}

fn run_currency(session: &Session, args: &CurrencyArgs) -> Result<(), CliError> {
    let formatted = format_currency(args.amount)
        .ok_or_else(|| CliError::User(format!("not a finite amount: {}", args.amount)))?;

    match session.mode {
        OutputMode::Human => println!("{formatted}"),
        OutputMode::Json => {
            let payload = json!({
                "command": "currency",
                "amount": args.amount,
                "formatted": formatted,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_date(session: &Session, args: &DateArgs) -> Result<(), CliError> {
    let parser = DateParser::new(session.config.table.date_formats.clone());
    let formatted = format_date(&parser, &args.text, args.time)
        .ok_or_else(|| CliError::User(format!("unrecognised date: {:?}", args.text)))?;

    match session.mode {
        OutputMode::Human => println!("{formatted}"),
        OutputMode::Json => {
            let payload = json!({
                "command": "date",
                "input": args.text,
                "formatted": formatted,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    let mode = output_mode(cli);
    match &args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match mode {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = Config::load(cli.config.as_deref())?;

            match mode {
                OutputMode::Human => println!("{}", config.to_toml()?),
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config show",
                        "config": serde_json::to_value(&config)?,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Validate) => match Config::load(cli.config.as_deref()) {
            Ok(config) => {
                let hash = config.stable_hash()?;

                match mode {
                    OutputMode::Human => {
                        println!("{}", "Configuration is valid.".green());
                        println!("  Source: {}", config.paths.config_file.display());
                        println!("  Hash: {hash}");
                    }
                    OutputMode::Json => {
                        let payload = json!({
                            "command": "config validate",
                            "valid": true,
                            "path": config.paths.config_file.to_string_lossy(),
                            "hash": hash,
                        });
                        write_json_line(&payload)?;
                    }
                }
                Ok(())
            }
            Err(e) => {
                match mode {
                    OutputMode::Human => {
                        eprintln!("{} {e}", "Configuration is INVALID:".red().bold());
                    }
                    OutputMode::Json => {
                        let payload = json!({
                            "command": "config validate",
                            "valid": false,
                            "code": e.code(),
                            "error": e.to_string(),
                        });
                        write_json_line(&payload)?;
                    }
                }
                Err(CliError::Dash(e))
            }
        },
    }
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("DASHKIT_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        Some(_) | None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_before_and_after_subcommand() {
        let before = Cli::try_parse_from([
            "dashkit",
            "--config",
            "/tmp/dashkit.toml",
            "--json",
            "--no-color",
            "phone",
            "8701",
        ]);
        assert!(before.is_ok());

        let after = Cli::try_parse_from(["dashkit", "phone", "8701", "--json", "--no-color"]);
        assert!(after.is_ok());
    }

    #[test]
    fn parses_all_subcommands() {
        let cases = [
            vec!["dashkit", "sort", "--column", "2", "--kind", "number", "--desc"],
            vec!["dashkit", "sort", "--column", "0", "--delimiter", ";", "--header"],
            vec!["dashkit", "phone", "87012345678", "--previous", "+7 (701)"],
            vec!["dashkit", "validate", "phone", "+7 (701) 234-56-78"],
            vec!["dashkit", "validate", "email", "a@b.kz"],
            vec!["dashkit", "currency", "-2500.5"],
            vec!["dashkit", "date", "2024-03-05", "--time"],
            vec!["dashkit", "config", "path"],
            vec!["dashkit", "config", "show"],
            vec!["dashkit", "config", "validate"],
            vec!["dashkit", "completions", "bash"],
            vec!["dashkit", "--log", "/tmp/a.jsonl", "phone", "8"],
        ];

        for case in cases {
            let parsed = Cli::try_parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse case: {case:?}");
        }
    }

    #[test]
    fn rejects_unknown_sort_kind() {
        let parsed = Cli::try_parse_from(["dashkit", "sort", "--column", "0", "--kind", "money"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn json_flag_wins_over_env() {
        assert_eq!(
            resolve_output_mode(true, Some("human"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode(false, Some("HUMAN"), false),
            OutputMode::Human
        );
        assert_eq!(resolve_output_mode(false, None, true), OutputMode::Human);
        assert_eq!(resolve_output_mode(false, Some("auto"), false), OutputMode::Json);
    }

    #[test]
    fn exit_codes_follow_contract() {
        assert_eq!(CliError::User(String::new()).exit_code(), 1);
        assert_eq!(CliError::Io(io::Error::other("closed")).exit_code(), 2);
        let user = CliError::Dash(DashError::TableInput {
            line: 1,
            details: String::new(),
        });
        assert_eq!(user.exit_code(), 1);
        let env = CliError::Dash(DashError::io("/x", io::Error::other("boom")));
        assert_eq!(env.exit_code(), 2);
    }

    #[test]
    fn kind_args_map_to_sort_kinds() {
        assert_eq!(SortKind::from(KindArg::Number), SortKind::Number);
        assert_eq!(SortKind::from(KindArg::Date), SortKind::Date);
        assert_eq!(FieldKind::from(FieldArg::Email), FieldKind::Email);
    }
}
