//! RelDB - interactive shell
//!
//! Usage: `reldb-cli [--data-dir <dir>] [--json] [-c <statement>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reldb::config::DEFAULT_DATA_DIR;
use reldb::{parse, Catalog, Config, Executor, QueryResult, Row};

/// RelDB interactive shell
#[derive(Parser, Debug)]
#[command(
    name = "reldb-cli",
    version,
    about = "Interactive shell for RelDB",
    long_about = "Runs statements against a RelDB data directory, either one at a time\n\
                  from the prompt or a single statement given with -c."
)]
struct Args {
    /// Directory holding the catalog and table files
    #[arg(short = 'd', long, env = "RELDB_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Execute a single statement and exit
    #[arg(short = 'c', long)]
    command: Option<String>,
}

/// Print welcome banner
fn print_banner(config: &Config) {
    println!(
        r#"
 ____      _ ____  ____
|  _ \ ___| |  _ \| __ )
| |_) / _ \ | | | |  _ \
|  _ <  __/ | |_| | |_) |
|_| \_\___|_|____/|____/

 A minimal relational data engine in Rust
 Data directory: {}
 Type 'help' for help, 'exit' to quit
"#,
        config.data_dir.display()
    );
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  help, .help              Show this help message
  exit, quit, .quit        Exit RelDB
  tables, .tables          List all tables
  desc <table>             Show table layout (also .schema <table>)

Statements:
  CREATE TABLE t (id INT, name VARCHAR(50), PRIMARY KEY(id), UNIQUE(name))
  INSERT INTO t (name) VALUES ('Ann')
  SELECT * FROM t WHERE name = 'Ann' ORDER BY id DESC LIMIT 10
  SELECT * FROM t LEFT JOIN u ON t.id = u.t_id
  UPDATE t SET name = 'Annie' WHERE id = 1
  DELETE FROM t WHERE id = 1
  DROP TABLE [IF EXISTS] t
"#
    );
}

/// Format rows as a table. Headers are every column name, in first-seen order.
fn format_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No rows found\n".to_string();
    }
    let mut columns: Vec<&String> = Vec::new();
    for name in rows.iter().flat_map(|row| row.keys()) {
        if !columns.contains(&name) {
            columns.push(name);
        }
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(*c).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    // Calculate column widths
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator: String = widths
        .iter()
        .map(|w| "-".repeat(*w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{}+\n", separator);

    let mut output = String::new();
    output.push_str(&separator);
    let header: String = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!(" {:^width$} ", c, width = *w))
        .collect::<Vec<_>>()
        .join("|");
    output.push_str(&format!("|{}|\n", header));
    output.push_str(&separator);

    for row in &cells {
        let line: String = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!(" {:<width$} ", v, width = *w))
            .collect::<Vec<_>>()
            .join("|");
        output.push_str(&format!("|{}|\n", line));
    }
    output.push_str(&separator);
    output.push_str(&format!("{} row(s) returned\n", rows.len()));

    output
}

/// Print a statement result
fn print_result(result: &QueryResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result {
        QueryResult::Status(message) => println!("{}", message),
        QueryResult::Rows(rows) => print!("{}", format_rows(rows)),
    }
    Ok(())
}

/// Parse and execute one statement
fn execute_sql(executor: &mut Executor, sql: &str, json: bool) -> Result<()> {
    let query = parse(sql)?;
    let result = executor.execute(query)?;
    print_result(&result, json)
}

/// Shell commands handled outside the statement grammar.
/// Returns `None` when the line is not a shell command.
fn handle_command(executor: &Executor, line: &str) -> Option<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = parts.first()?.to_ascii_lowercase();
    let catalog = executor.catalog();

    match (command.as_str(), parts.get(1)) {
        ("exit" | "quit" | ".quit" | ".exit", None) => return Some(true),
        ("help" | ".help", None) => print_help(),
        ("tables" | ".tables", None) => {
            let tables = catalog.list_tables();
            if tables.is_empty() {
                println!("No tables exist");
            } else {
                println!("Tables:");
                for table in tables {
                    println!("  - {}", table);
                }
            }
        }
        ("desc" | ".schema", Some(table)) => match catalog.describe(table) {
            Ok(info) => print!("{}", info),
            Err(_) => println!("Table '{}' not found", table),
        },
        ("desc" | ".schema", None) => println!("Usage: desc <table_name>"),
        _ => return None,
    }

    Some(false)
}

/// Main REPL loop
fn run_repl(executor: &mut Executor, json: bool) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;

    loop {
        match editor.readline("reldb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    debug!(error = %e, "history entry not recorded");
                }

                match handle_command(executor, line) {
                    Some(true) => break,
                    Some(false) => continue,
                    None => {}
                }

                if let Err(e) = execute_sql(executor, line, json) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read input"),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reldb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = Config::new().data_dir(&args.data_dir);

    let catalog = Catalog::open(&config)
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;
    let mut executor = Executor::new(catalog);

    match &args.command {
        Some(sql) => {
            let outcome = execute_sql(&mut executor, sql, args.json);
            executor.into_catalog().close()?;
            outcome?;
        }
        None => {
            if !args.json {
                print_banner(&config);
            }
            run_repl(&mut executor, args.json)?;
            executor.into_catalog().close()?;
        }
    }

    Ok(())
}
