mod error_formatter;
mod formatter;
mod repl;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formatter::Formatter;
use horn::{Consult, Engine};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "horn")]
#[command(about = "A minimal Prolog-flavored logic engine.")]
#[command(
    long_about = "Horn stores facts and rules and answers queries against them.\nThe CLI consults .horn/.pl program files, answers one-shot goals, and runs an interactive prompt."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt
    ///
    /// Optionally consults a program file or directory first, then reads
    /// input from the terminal. Lines ending in a period are stored as
    /// facts or rules; anything else resolves as a query.
    Repl {
        /// Program file or directory to consult before the first prompt
        path: Option<PathBuf>,
    },
    /// Consult a program and report what was loaded
    ///
    /// Loads one file, or every .horn/.pl file under a directory, asserts
    /// its clauses, and answers any queries embedded in the program.
    /// Malformed lines are reported and skipped.
    Consult {
        /// Program file or directory to load
        path: PathBuf,
        /// Resolve one goal after loading (format: functor(arg, ...))
        #[arg(short, long)]
        query: Option<String>,
        /// Emit answers as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the stored program as a table
    ///
    /// Consults the given path and renders every entry in assertion order,
    /// facts merged by functor and rules one per row.
    List {
        /// Program file or directory to load
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Repl { path } => repl_command(path.as_deref()),
        Commands::Consult { path, query, json } => consult_command(path, query.as_deref(), *json),
        Commands::List { path } => list_command(path),
    };

    if let Err(e) = result {
        // Render engine errors with the annotated report, anything else plainly
        if let Some(horn_err) = e.downcast_ref::<horn::HornError>() {
            eprintln!("{}", error_formatter::format_error(horn_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn repl_command(path: Option<&Path>) -> Result<()> {
    let mut engine = Engine::new();
    if let Some(path) = path {
        let report = load_path(&mut engine, path)?;
        report_skipped(&report);
        print!("{}", Formatter::default().format_consult(&report));
    }
    repl::run(&mut engine)
}

fn consult_command(path: &Path, query: Option<&str>, json: bool) -> Result<()> {
    let mut engine = Engine::new();
    let report = load_path(&mut engine, path)?;
    report_skipped(&report);

    let formatter = Formatter::default();
    print!("{}", formatter.format_consult(&report));
    for answer in &report.answers {
        if json {
            println!("{}", answer.to_json()?);
        } else {
            println!("{}", formatter.format_resolution(answer));
        }
    }

    if let Some(goal) = query {
        let answer = engine.query(goal)?;
        if json {
            println!("{}", answer.to_json()?);
        } else {
            println!("{}", formatter.format_resolution(&answer));
        }
    }

    Ok(())
}

fn list_command(path: &Path) -> Result<()> {
    let mut engine = Engine::new();
    let report = load_path(&mut engine, path)?;
    report_skipped(&report);

    let formatter = Formatter::default();
    print!("{}", formatter.format_consult(&report));
    println!("{}", formatter.format_listing(engine.knowledge().entries()));

    Ok(())
}

/// Consult one file, or every program file under a directory, merging the
/// per-file reports
fn load_path(engine: &mut Engine, path: &Path) -> Result<Consult> {
    let mut report = Consult::default();
    for file in program_files(path)? {
        let source = file.to_string_lossy().to_string();
        let loaded = engine.consult(&fs::read_to_string(&file)?, &source)?;
        report.facts += loaded.facts;
        report.rules += loaded.rules;
        report.answers.extend(loaded.answers);
        report.skipped.extend(loaded.skipped);
    }
    Ok(report)
}

/// Program files at the path; directories are walked and sorted so load
/// order is stable
fn program_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        let extension = entry.path().extension().and_then(|s| s.to_str());
        if matches!(extension, Some("horn") | Some("pl")) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn report_skipped(report: &Consult) {
    for error in &report.skipped {
        eprintln!("{}", error_formatter::format_error(error));
    }
}
