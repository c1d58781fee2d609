use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use tracing::debug;
use wcstat_status::{check_moves, group_by_changelist, FileStatus, MoveMismatch};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Status(args) => cmd_status(args, &cli.format).await,
        Command::Moves(args) => cmd_moves(args, &cli.format),
    }
}

async fn cmd_status(args: StatusArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let text = read_input(args.input.as_deref())?;
    let mut records = wcstat_status::parse_status_xml(text)
        .await
        .context("failed to parse status report")?;
    if let Some(name) = &args.changelist {
        records.retain(|r| r.changelist.as_deref() == Some(name.as_str()));
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => print_records(&records),
    }
    Ok(())
}

fn cmd_moves(args: MovesArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let text = read_input(args.input.as_deref())?;
    let document = wcstat_status::parse_document(&text).context("failed to parse status report")?;
    let mismatches = check_moves(&document);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&mismatches)?),
        OutputFormat::Text => print_mismatches(&mismatches),
    }
    if args.strict && !mismatches.is_empty() {
        anyhow::bail!("{} unpaired move(s) in status report", mismatches.len());
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading status report");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            debug!("reading status report from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(text)
        }
    }
}

fn print_records(records: &[FileStatus]) {
    if records.is_empty() {
        println!("No changes.");
        return;
    }
    for (changelist, members) in group_by_changelist(records) {
        if let Some(name) = changelist {
            println!("\n--- Changelist '{}':", name.bold());
        }
        for record in members {
            let line = status_line(record);
            let (columns, rest) = line.split_at(COLUMNS);
            println!("{}{}", paint(columns, &record.status), rest);
        }
    }
}

fn print_mismatches(mismatches: &[MoveMismatch]) {
    if mismatches.is_empty() {
        println!("{} All moves paired.", "✓".green().bold());
        return;
    }
    for mismatch in mismatches {
        println!("{} {}", "!".red().bold(), mismatch);
    }
}

/// Width of the status column block preceding the path.
const COLUMNS: usize = 8;

/// One `svn status`-style line: item, props, lock and switch columns, path.
fn status_line(record: &FileStatus) -> String {
    let mut line = String::with_capacity(COLUMNS + record.path.len());
    line.push(item_code(&record.status));
    line.push(props_code(&record.props));
    line.push(' ');
    line.push(if record.wc_status.switched { 'S' } else { ' ' });
    line.push(' ');
    line.push(if record.wc_status.locked { 'L' } else { ' ' });
    line.push_str("  ");
    line.push_str(&record.path);
    if let Some(from) = &record.rename {
        line.push_str(&format!(" (moved from {from})"));
    }
    line
}

fn item_code(item: &str) -> char {
    match item {
        "added" => 'A',
        "conflicted" => 'C',
        "deleted" => 'D',
        "external" => 'X',
        "ignored" => 'I',
        "incomplete" | "missing" => '!',
        "modified" => 'M',
        "obstructed" => '~',
        "replaced" => 'R',
        "unversioned" => '?',
        _ => ' ',
    }
}

fn props_code(props: &str) -> char {
    match props {
        "modified" => 'M',
        "conflicted" => 'C',
        _ => ' ',
    }
}

fn paint(columns: &str, item: &str) -> ColoredString {
    match item {
        "added" => columns.green(),
        "deleted" | "missing" | "incomplete" => columns.red(),
        "conflicted" | "obstructed" => columns.red().bold(),
        "modified" | "replaced" => columns.yellow(),
        "unversioned" | "ignored" => columns.dimmed(),
        _ => columns.normal(),
    }
}
