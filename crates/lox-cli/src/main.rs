use clap::{Parser, Subcommand};
use lox_lexer::{ScanError, Scanner, Token};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

/// Exit code for malformed input (sysexits `EX_DATAERR`).
const EXIT_DATA_ERR: i32 = 65;
/// Exit code for unreadable input (sysexits `EX_IOERR`).
const EXIT_IO_ERR: i32 = 74;

#[derive(Parser)]
#[command(name = "lox")]
#[command(about = "Lox tokenizer: scan source text and print its tokens")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tokens of a .lox file, one per line
    Tokens {
        /// Input .lox file; `-` or nothing reads stdin
        path: Option<String>,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Scan a .lox file and report faults without printing tokens
    Check {
        /// Input .lox file
        path: String,
    },

    /// Scan lines read interactively from stdin
    Repl,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Tokens { path, json } => cmd_tokens(path.as_deref(), json),
        Command::Check { path } => cmd_check(&path),
        Command::Repl => cmd_repl(),
    }
}

/// Install a subscriber only when `RUST_LOG` is set, e.g. `RUST_LOG=lox_lexer=debug`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_source(path: Option<&str>) -> String {
    tracing::debug!(path = path.unwrap_or("-"), "reading source");
    match path {
        None | Some("-") => {
            let mut source = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut source) {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(EXIT_IO_ERR);
            }
            source
        }
        Some(path) => {
            let p = Path::new(path);
            if !p.exists() {
                eprintln!("Error: file not found: {path}");
                std::process::exit(EXIT_IO_ERR);
            }
            match std::fs::read_to_string(p) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error reading {path}: {e}");
                    std::process::exit(EXIT_IO_ERR);
                }
            }
        }
    }
}

fn report_errors(errors: &[ScanError]) {
    for error in errors {
        eprintln!("[line {}] Error: {error}", error.line());
    }
}

fn print_tokens(tokens: &[Token]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for token in tokens {
        // A closed pipe just ends the listing
        if writeln!(out, "{token}").is_err() {
            return;
        }
    }
}

fn cmd_tokens(path: Option<&str>, json: bool) {
    let source = read_source(path);
    let output = Scanner::tokenize(&source);

    if json {
        match serde_json::to_string_pretty(&output.tokens) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error encoding tokens: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_tokens(&output.tokens);
    }

    report_errors(&output.errors);
    if output.has_errors() {
        std::process::exit(EXIT_DATA_ERR);
    }
}

fn cmd_check(path: &str) {
    let source = read_source(Some(path));
    let output = Scanner::tokenize(&source);

    if output.has_errors() {
        report_errors(&output.errors);
        std::process::exit(EXIT_DATA_ERR);
    }

    eprintln!("OK: {path} ({} tokens)", output.tokens.len());
}

fn cmd_repl() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(EXIT_IO_ERR);
            }
            None => {
                println!();
                return;
            }
        };

        // Faults on one line don't end the session
        let output = Scanner::tokenize(&line);
        print_tokens(&output.tokens);
        report_errors(&output.errors);
    }
}
