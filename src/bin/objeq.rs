//! objeq - Object equality CLI tool
//!
//! Compares, diffs and patches YAML/JSON documents with merge-patch semantics.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};

use object_equality::encode::omit_empty;
use object_equality::{value, AbsentFields, CompareOptions, Comparator, Patch, Value};

#[derive(Debug, Parser)]
#[command(
    name = "objeq",
    about = "Decide whether a desired document would change a baseline document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report whether NEW would change OLD
    Compare(CompareArgs),
    /// Print the merge patch that turns OLD into NEW
    Diff(DiffArgs),
    /// Apply a merge patch to a document
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
struct Documents {
    /// Baseline document (YAML or JSON, '-' for stdin)
    old: PathBuf,
    /// Desired document (YAML or JSON, '-' for stdin)
    new: PathBuf,
    /// Drop zero-valued fields (null, false, 0, "", [], {}) before comparing
    #[arg(long)]
    omit_empty: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    #[command(flatten)]
    documents: Documents,
    /// Count fields present only in OLD as removed
    #[arg(long)]
    strict: bool,
    /// Print the added, modified and removed fields
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct DiffArgs {
    #[command(flatten)]
    documents: Documents,
    /// Leave fields present only in OLD out of the patch
    #[arg(long)]
    keep_absent: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// Document to patch (YAML or JSON, '-' for stdin)
    target: PathBuf,
    /// Merge patch (YAML or JSON, '-' for stdin)
    patch: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// Exit status when the documents differ.
const EXIT_DIFFERENT: u8 = 1;
/// Exit status when the command failed.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut stdout = io::stdout().lock();
    match run(cli.command, &mut stdout) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, output: &mut dyn Write) -> anyhow::Result<ExitCode> {
    match command {
        Command::Compare(args) => compare(args, output),
        Command::Diff(args) => {
            diff(args, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Apply(args) => {
            apply(args, output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn compare(args: CompareArgs, output: &mut dyn Write) -> anyhow::Result<ExitCode> {
    let (old, new) = read_documents(&args.documents)?;

    let absent = if args.strict {
        AbsentFields::Remove
    } else {
        AbsentFields::Keep
    };
    let comparator = Comparator::new(CompareOptions::new().absent_fields(absent));
    let comparison = comparator
        .compare_values(&old, &new)
        .context("Compare failed")?;

    if comparison.is_same() {
        writeln!(output, "equivalent")?;
        return Ok(ExitCode::SUCCESS);
    }

    writeln!(output, "different")?;
    if args.report {
        writeln!(output, "{}", comparison)?;
    }
    Ok(ExitCode::from(EXIT_DIFFERENT))
}

fn diff(args: DiffArgs, output: &mut dyn Write) -> anyhow::Result<()> {
    let (old, new) = read_documents(&args.documents)?;

    let absent = if args.keep_absent {
        AbsentFields::Keep
    } else {
        AbsentFields::Remove
    };
    let patch = object_equality::diff_with(&old, &new, absent);
    write_value(output, patch.as_value(), args.format)
}

fn apply(args: ApplyArgs, output: &mut dyn Write) -> anyhow::Result<()> {
    let target = read_document(&args.target)?;
    let patch = Patch::from_value(read_document(&args.patch)?);

    let patched = object_equality::apply(&target, &patch).context("Failed to apply patch")?;
    write_value(output, &patched, args.format)
}

fn read_documents(documents: &Documents) -> anyhow::Result<(Value, Value)> {
    if is_stdin(&documents.old) && is_stdin(&documents.new) {
        anyhow::bail!("Only one of OLD and NEW can be read from stdin");
    }

    let mut old = read_document(&documents.old)?;
    let mut new = read_document(&documents.new)?;
    if documents.omit_empty {
        debug!("dropping zero-valued fields");
        old = omit_empty(old);
        new = omit_empty(new);
    }
    Ok((old, new))
}

fn read_document(path: &Path) -> anyhow::Result<Value> {
    let content = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))?
    };

    debug!(path = %path.display(), bytes = content.len(), "read document");
    value::from_yaml(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn write_value(output: &mut dyn Write, doc: &Value, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => {
            let json = value::to_json_pretty(doc).context("Failed to serialize result")?;
            writeln!(output, "{}", json)?;
        }
        Format::Yaml => {
            let yaml = value::to_yaml(doc).context("Failed to serialize result")?;
            write!(output, "{}", yaml)?;
        }
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::parse_from(["objeq", "-vv", "compare", "old.yaml", "new.yaml", "--strict"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Compare(args) => {
                assert!(args.strict);
                assert!(!args.report);
                assert_eq!(args.documents.old, PathBuf::from("old.yaml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compare_writes_verdict() {
        let dir = std::env::temp_dir().join(format!("objeq-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let old = dir.join("old.yaml");
        let new = dir.join("new.json");
        fs::write(&old, "name: pod1\nimage: nginx\ntimestamp: '2024-01-01'\n").unwrap();
        fs::write(&new, r#"{"name": "pod1", "image": "nginx"}"#).unwrap();

        let mut out = Vec::new();
        let args = CompareArgs {
            documents: Documents {
                old: old.clone(),
                new: new.clone(),
                omit_empty: false,
            },
            strict: false,
            report: false,
        };
        compare(args, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "equivalent\n");

        let mut out = Vec::new();
        let args = CompareArgs {
            documents: Documents {
                old,
                new,
                omit_empty: false,
            },
            strict: true,
            report: true,
        };
        compare(args, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "different\n- Removed Fields:\n  .timestamp\n"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_value_json() {
        let mut out = Vec::new();
        let doc = value::from_json(r#"{"a": null}"#).unwrap();
        write_value(&mut out, &doc, Format::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": null\n}\n");
    }
}
