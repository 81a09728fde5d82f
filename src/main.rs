//! Purpose: `monsterbuf` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits JSON or text on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs go to stderr only; stdout carries command output.
#![allow(clippy::result_large_err)]
use std::error::Error as StdError;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use monsterbuf::api::{Error, ErrorKind, Framing, VerifyLimits, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `monsterbuf --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing(cli.verbose);
    let color_mode = cli.color;

    command_dispatch::dispatch_command(cli.command)
        .map_err(add_corrupt_hint)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "monsterbuf",
    version,
    about = "Build, verify and read FlatBuffers Monster buffers",
    long_about = None,
    after_help = r#"EXAMPLES
  $ monsterbuf demo
  $ monsterbuf build --out orc.bin
  $ monsterbuf read orc.bin
  $ monsterbuf check orc.bin
  $ monsterbuf build --input imp.json --size-prefixed --out imp.bin"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        global = true,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(
        short,
        long,
        global = true,
        help = "Log debug detail to stderr (RUST_LOG overrides)"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Build the sample monster, read it back and check every field",
        after_help = r#"EXAMPLES
  $ monsterbuf demo
  $ monsterbuf demo --json"#
    )]
    Demo {
        #[arg(long, help = "Emit a JSON report instead of the text summary")]
        json: bool,
    },
    #[command(
        about = "Encode a monster (the sample, or JSON input) into a buffer",
        after_help = r#"EXAMPLES
  $ monsterbuf build --out orc.bin
  $ monsterbuf build --input imp.json --out imp.bin
  $ monsterbuf build                  # report size and digest only"#
    )]
    Build {
        #[arg(
            long,
            help = "Monster JSON to encode (default: the sample orc)",
            value_hint = ValueHint::FilePath
        )]
        input: Option<PathBuf>,
        #[arg(long, help = "Write the buffer to this file", value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        #[arg(long, help = "Prefix the buffer with its u32 length")]
        size_prefixed: bool,
    },
    #[command(
        about = "Verify a buffer file and print its contents as JSON",
        after_help = r#"EXAMPLES
  $ monsterbuf read orc.bin
  $ monsterbuf read imp.bin --size-prefixed --max-tables 16"#
    )]
    Read {
        #[arg(help = "Buffer file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[command(flatten)]
        verify: VerifyArgs,
    },
    #[command(
        about = "Check a buffer file against the sample monster",
        long_about = r#"Check a buffer file against the sample monster.

Prints a JSON report on stdout. Exits 7 when any field differs."#
    )]
    Check {
        #[arg(help = "Buffer file", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[command(flatten)]
        verify: VerifyArgs,
    },
    #[command(about = "Print version info")]
    Version,
    #[command(
        about = "Generate shell completion scripts",
        after_help = r#"EXAMPLES
  $ monsterbuf completion bash > ~/.local/share/bash-completion/completions/monsterbuf"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Args, Clone, Copy, Debug)]
struct VerifyArgs {
    #[arg(long, help = "Buffer starts with a u32 length prefix")]
    size_prefixed: bool,
    #[arg(long, help = "Maximum table nesting depth while verifying")]
    max_depth: Option<usize>,
    #[arg(long, help = "Maximum number of tables visited while verifying")]
    max_tables: Option<usize>,
    #[arg(long, help = "Maximum apparent buffer size in bytes while verifying")]
    max_size: Option<usize>,
}

impl VerifyArgs {
    fn framing(&self) -> Framing {
        Framing::from_flag(self.size_prefixed)
    }

    fn limits(&self) -> VerifyLimits {
        let defaults = VerifyLimits::default();
        VerifyLimits {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_tables: self.max_tables.unwrap_or(defaults.max_tables),
            max_apparent_size: self.max_size.unwrap_or(defaults.max_apparent_size),
        }
    }
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => {
            err.with_hint("Check the path, or create the file with `monsterbuf build --out`.")
        }
        ErrorKind::Permission => {
            err.with_hint("Permission denied. Check file permissions or write somewhere else.")
        }
        ErrorKind::Io => err.with_hint("I/O error. Check the path, filesystem, and disk space."),
        _ => err,
    }
}

fn add_corrupt_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Corrupt || err.hint().is_some() {
        return err;
    }
    err.with_hint("The buffer does not hold a valid Monster. Rebuild it with `monsterbuf build`.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_BACKTRACE=1 and share command/context if it persists.",
    )
}

fn emit_json(value: Value) {
    let json = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_version_output() {
    if io::stdout().is_terminal() {
        println!("monsterbuf {}", env!("CARGO_PKG_VERSION"));
    } else {
        emit_json(json!({
            "name": "monsterbuf",
            "version": env!("CARGO_PKG_VERSION"),
        }));
    }
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Corrupt => "corrupt buffer".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, VerifyArgs, add_corrupt_hint, error_json, error_text};
    use clap::{CommandFactory, Parser};
    use monsterbuf::api::{Error, ErrorKind, Framing, VerifyLimits};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verify_args_fall_back_to_library_limits() {
        let args = VerifyArgs {
            size_prefixed: true,
            max_depth: None,
            max_tables: Some(8),
            max_size: None,
        };
        let limits = args.limits();
        assert_eq!(args.framing(), Framing::SizePrefixed);
        assert_eq!(limits.max_tables, 8);
        assert_eq!(limits.max_depth, VerifyLimits::default().max_depth);
    }

    #[test]
    fn read_accepts_verifier_flags() {
        let cli = Cli::try_parse_from(["monsterbuf", "read", "orc.bin", "--max-depth", "4"])
            .expect("parse");
        match cli.command {
            Command::Read { file, verify } => {
                assert_eq!(file.to_str(), Some("orc.bin"));
                assert_eq!(verify.max_depth, Some(4));
                assert!(!verify.size_prefixed);
            }
            _ => panic!("expected read"),
        }
    }

    #[test]
    fn corrupt_errors_get_a_default_hint() {
        let err = add_corrupt_hint(Error::new(ErrorKind::Corrupt).with_message("bad"));
        assert!(err.hint().is_some());

        let json = error_json(&err);
        assert_eq!(json["error"]["kind"], "Corrupt");
        assert_eq!(json["error"]["message"], "bad");
    }

    #[test]
    fn plain_error_text_has_no_escapes() {
        let err = Error::new(ErrorKind::NotFound).with_path("orc.bin");
        let text = error_text(&err, false);
        assert!(text.starts_with("error: not found"));
        assert!(text.contains("path: orc.bin"));
        assert!(!text.contains('\u{1b}'));
    }
}
