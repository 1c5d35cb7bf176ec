//! CLI tool to dump and check the item stream of stylesheet files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sprite_lex::{Lexer, tokenize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "spritelex", version, about = "Tokenize Sass-like stylesheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every item as `pos: TYPE value`
    Tokens {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that file(s) tokenize without errors
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (files, dump) = match cli.command {
        Command::Tokens { files } => (files, true),
        Command::Check { files } => (files, false),
    };

    let mut had_error = false;

    for path in &files {
        let path_str = path.display();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path_str}: {e}");
                had_error = true;
                continue;
            }
        };

        if dump {
            for item in Lexer::new(&content) {
                println!("{:4}: {} {}", item.pos, item.kind, item.value);
                if let Some(err) = item.error() {
                    eprintln!("{path_str}: {err}");
                    had_error = true;
                }
            }
        } else {
            match tokenize(&content) {
                Ok(items) => {
                    let count = items.len();
                    eprintln!("{path_str}: valid ({count} item(s))");
                }
                Err(e) => {
                    eprintln!("{path_str}: {e}");
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
