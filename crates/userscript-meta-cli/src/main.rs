//! Userscript Metadata CLI
//!
//! A command-line tool for checking, extracting and formatting userscript
//! metadata blocks.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::config::{CliError, ExitCode, parse_metadata_json, read_file, read_input};
use cli::output::{CheckResults, HumanOutput, Outcome, write_json};
use cli::walk::{WalkConfig, find_userscripts};
use cli::{Args, CheckArgs, Command, ExtractArgs, FormatArgs};
use userscript_meta_core::{read_and_validate, validate_and_stringify};

fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose, args.json);

    StdExitCode::from(run(args))
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run the selected command.
fn run(args: Args) -> ExitCode {
    let json = args.json;
    let use_colors = !json && io::stdout().is_terminal();

    let result = match &args.command {
        Command::Check(check) => run_check(check, json, use_colors),
        Command::Format(format) => run_format(format, json, use_colors),
        Command::Extract(extract) => run_extract(extract, json, use_colors),
    };

    result.unwrap_or_else(|e| {
        debug!("Command failed: {:?}", e);
        write_error(&mut io::stderr().lock(), &e.to_string(), use_colors);
        ExitCode::StartupFailure
    })
}

/// Check every userscript under the given paths.
fn run_check(args: &CheckArgs, json: bool, use_colors: bool) -> Result<ExitCode, CliError> {
    let options = args.options();
    let walk = WalkConfig::new()
        .with_hidden(args.hidden)
        .with_gitignore(args.gitignore);

    let files = find_userscripts(&args.paths, &walk)?;
    info!("Checking {} userscript(s)", files.len());

    let mut results = CheckResults::new();
    for path in &files {
        let text = read_file(path)?;
        let outcome = match read_and_validate(&text, &options) {
            Ok(read) => Outcome::Valid {
                warnings: read.warnings,
            },
            Err(error) => Outcome::Invalid { error },
        };
        debug!("{}: {:?}", path.display(), outcome);
        results.add(path, outcome);
    }

    let mut stdout = io::stdout().lock();
    if json {
        results.write_json(&mut stdout)?;
    } else {
        results.write_human(&mut stdout, use_colors)?;
    }

    Ok(ExitCode::for_results(
        results.has_failures(),
        results.has_warnings(),
        args.fail_on_warnings,
    ))
}

/// Render JSON metadata as a metadata block.
fn run_format(args: &FormatArgs, json: bool, use_colors: bool) -> Result<ExitCode, CliError> {
    let input = read_input(args.file.as_deref(), io::stdin().lock())?;
    let metadata = parse_metadata_json(&input)?;
    debug!("Formatting {} key(s)", metadata.len());

    let mut stdout = io::stdout().lock();
    match validate_and_stringify(&metadata, &args.options()) {
        Ok(written) if json => {
            write_json(&mut stdout, &written)?;
            Ok(ExitCode::Success)
        }
        Ok(written) => {
            writeln!(stdout, "{}", written.stringified)?;
            HumanOutput::new(io::stderr().lock(), use_colors).write_warnings(&written.warnings)?;
            Ok(ExitCode::Success)
        }
        Err(errors) if json => {
            write_json(&mut stdout, &errors)?;
            Ok(ExitCode::ValidationFailed)
        }
        Err(errors) => {
            HumanOutput::new(io::stderr().lock(), use_colors).write_validation_errors(&errors)?;
            Ok(ExitCode::ValidationFailed)
        }
    }
}

/// Print the metadata of a userscript as JSON.
///
/// With `--json` the warnings are included alongside the metadata.
fn run_extract(args: &ExtractArgs, json: bool, use_colors: bool) -> Result<ExitCode, CliError> {
    let text = read_file(&args.file)?;

    let mut stdout = io::stdout().lock();
    match read_and_validate(&text, &args.options()) {
        Ok(read) if json => {
            write_json(&mut stdout, &read)?;
            Ok(ExitCode::Success)
        }
        Ok(read) => {
            write_json(&mut stdout, &read.metadata)?;
            HumanOutput::new(io::stderr().lock(), use_colors).write_warnings(&read.warnings)?;
            Ok(ExitCode::Success)
        }
        Err(error) if json => {
            write_json(&mut stdout, &error)?;
            Ok(ExitCode::ValidationFailed)
        }
        Err(error) => {
            HumanOutput::new(io::stderr().lock(), use_colors).write_read_error(&error)?;
            Ok(ExitCode::ValidationFailed)
        }
    }
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    let _ = HumanOutput::new(writer, use_colors).write_error(message);
}
