//! vxd - diff, patch and dump element trees stored as XML

use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use voltxml::{compute_diff, parse_file, Element, XmlPrinter};

/// Identity-keyed diff and patch for element trees
#[derive(Parser)]
#[command(name = "vxd")]
#[command(version)]
#[command(about = "Diff and patch attributed element trees", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the changes that turn one tree into another
    #[command(visible_alias = "d")]
    Diff {
        /// Tree before the change
        before: String,
        /// Tree after the change
        after: String,
    },

    /// Diff two trees and patch the first one with the result
    #[command(visible_alias = "a")]
    Apply {
        /// Tree to patch
        before: String,
        /// Tree to reproduce
        after: String,
        /// Output file (default: stdout)
        output: Option<String>,
    },

    /// Print a tree as XML or as its minimal string
    Dump {
        /// Tree to print
        file: String,
        /// Print the minimal string instead of XML
        #[arg(long)]
        min: bool,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Diff { before, after } => run_diff(&before, &after),
        Commands::Apply {
            before,
            after,
            output,
        } => run_apply(&before, &after, output.as_deref()),
        Commands::Dump { file, min } => run_dump(&file, min),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    })
}

/// Prints the diff between two trees.
fn run_diff(before_path: &str, after_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let before = parse_file(before_path)?;
    let after = parse_file(after_path)?;

    let mut out = io::stdout().lock();
    match compute_diff(&before, &after) {
        Some(diff) if diff.is_empty() => writeln!(out, "No changes.")?,
        Some(diff) => write!(out, "{}", diff)?,
        None => writeln!(
            out,
            "Root elements differ: {} vs {}",
            before.unique_name(),
            after.unique_name()
        )?,
    }
    Ok(())
}

/// Patches the before tree into the after tree and writes the result.
fn run_apply(
    before_path: &str,
    after_path: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut before = parse_file(before_path)?;
    let after = parse_file(after_path)?;

    let result: Element = match compute_diff(&before, &after) {
        Some(diff) => {
            info!(kinds = ?diff.change_kinds(), "applying diff");
            before.apply_diff(diff)?;
            before
        }
        None => {
            info!(
                before = %before.unique_name(),
                after = %after.unique_name(),
                "root elements differ, replacing tree"
            );
            after
        }
    };

    XmlPrinter::new(open_output(output_path)?).print(&result)?;
    Ok(())
}

/// Prints one tree.
fn run_dump(path: &str, min: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = parse_file(path)?;
    let mut out = io::stdout().lock();
    if min {
        writeln!(out, "{}", tree.to_min_string().escape_debug())?;
    } else {
        XmlPrinter::new(&mut out).print(&tree)?;
    }
    Ok(())
}
