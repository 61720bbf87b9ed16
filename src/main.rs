//! CLI for bbl2bib - Convert `thebibliography` entries into BibTeX.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bbl2bib::{
    count_entries, parse_bbl, run_self_test, BibitemPattern, ConvertOptions, MismatchPolicy,
    OutputFormat,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Bibitem to bib converter: reads a .bbl/.tex file (or stdin) and writes the
/// parsed entries in .bib format to stdout
#[derive(Parser, Debug)]
#[command(name = "bbl2bib")]
#[command(version)]
#[command(after_help = "\
Examples:
  bbl2bib paper.bbl > paper.bib
  cat paper.bbl | bbl2bib --debug
  bbl2bib paper.bbl --on-mismatch keep -o paper.bib
  bbl2bib paper.bbl --format json")]
struct Cli {
    /// Input file (stdin if omitted or '-')
    input: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, visible_alias = "verbose")]
    debug: bool,

    /// Run the embedded self-check and exit
    #[arg(short = 't', long, visible_alias = "test")]
    self_test: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Bibtex)]
    format: FormatArg,

    /// What to do with entries that do not match the expected shape
    #[arg(long, value_enum, default_value_t = MismatchArg::Skip)]
    on_mismatch: MismatchArg,

    /// Exit with an error status if any entry did not match
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Bibtex,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bibtex => OutputFormat::Bibtex,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MismatchArg {
    /// Leave the entry out and report it
    Skip,
    /// Emit the entry with empty key, author and year fields
    Keep,
}

impl From<MismatchArg> for MismatchPolicy {
    fn from(arg: MismatchArg) -> Self {
        match arg {
            MismatchArg::Skip => MismatchPolicy::Skip,
            MismatchArg::Keep => MismatchPolicy::Keep,
        }
    }
}

// ---------------------------------------------------------------------------
// AppError: semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10: input file not found / unreadable
    InputFile(String),
    /// Exit 11: entry pattern failed to compile
    Pattern(String),
    /// Exit 12: cannot write output
    OutputFile(String),
    /// Exit 13: embedded self-check failed
    SelfTest(usize),
    /// Exit 14: strict mode and some entries did not match
    Strict(usize),
    /// Exit 15: JSON rendering failed
    Render(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::Pattern(_) => 11,
            AppError::OutputFile(_) => 12,
            AppError::SelfTest(_) => 13,
            AppError::Strict(_) => 14,
            AppError::Render(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::Pattern(msg) => {
                write!(f, "invalid bibitem pattern: {}", msg)
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
            AppError::SelfTest(failed) => {
                write!(
                    f,
                    "self-test failed: {} check(s) did not pass\n  hint: rerun with --debug for details",
                    failed
                )
            }
            AppError::Strict(count) => {
                write!(
                    f,
                    "{} entr{} did not match the expected bibitem shape\n  hint: rerun with --debug to see each normalized line, or drop --strict",
                    count,
                    if *count == 1 { "y" } else { "ies" }
                )
            }
            AppError::Render(msg) => {
                write!(f, "failed to render output: {}", msg)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_tracing(debug: bool) {
    let env_filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let pattern = BibitemPattern::new().map_err(|e| AppError::Pattern(e.to_string()))?;
    debug!(pattern = pattern.as_str(), "compiled bibitem pattern");

    if cli.self_test {
        return self_test_command(&pattern);
    }

    let options = ConvertOptions {
        on_mismatch: cli.on_mismatch.into(),
    };
    convert_command(
        &pattern,
        cli.input.as_deref(),
        cli.output.as_deref(),
        cli.format.into(),
        &options,
        cli.strict,
    )
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Convert one `.bbl` document.
fn convert_command(
    pattern: &BibitemPattern,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    options: &ConvertOptions,
    strict: bool,
) -> Result<(), AppError> {
    // 1. Read the whole input (file, or stdin when omitted or '-')
    let text = read_input(input)?;
    debug!(bytes = text.len(), "read bbl text");
    tracing::trace!(text = %text, "bbl text");

    // 2. Split, extract and apply the mismatch policy
    let bibliography = parse_bbl(pattern, &text, options);

    // 3. Render
    let rendered = bibliography
        .render(format)
        .map_err(|e| AppError::Render(e.to_string()))?;

    // 4. Write to file or stdout
    if let Some(output_path) = output {
        fs::write(output_path, &rendered).map_err(|e| {
            AppError::OutputFile(format!("'{}': {}", output_path.display(), e))
        })?;
        info!(
            entries = bibliography.entries.len(),
            path = %output_path.display(),
            "wrote bibliography"
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{}", rendered)
            .and_then(|_| handle.flush())
            .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    }

    // 5. Report mismatches
    let mismatched = bibliography.mismatches.len();
    if mismatched > 0 {
        warn!(
            mismatched,
            total = count_entries(&text),
            "some entries did not match the expected bibitem shape"
        );
        if strict {
            return Err(AppError::Strict(mismatched));
        }
    }

    Ok(())
}

/// Run the embedded self-check.
fn self_test_command(pattern: &BibitemPattern) -> Result<(), AppError> {
    let failures = run_self_test(pattern);
    if failures.is_empty() {
        println!("self-test passed");
        Ok(())
    } else {
        for failure in &failures {
            eprintln!("FAILED {}: {}", failure.check, failure.detail);
        }
        Err(AppError::SelfTest(failures.len()))
    }
}

/// Reads the whole input into memory.
fn read_input(input: Option<&Path>) -> Result<String, AppError> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .map_err(|e| AppError::InputFile(format!("'{}': {}", path.display(), e))),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| AppError::InputFile(format!("failed to read from stdin: {}", e)))?;
            Ok(buf)
        }
    }
}
