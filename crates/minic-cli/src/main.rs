use clap::{Parser, Subcommand};
use std::path::Path;

use minic_lexer::Scanner;

#[derive(Parser)]
#[command(name = "minic")]
#[command(about = "MiniC — frontend for the MiniC teaching language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream and any lexical errors, one per line
    Tokens {
        /// Input source file
        path: String,
    },

    /// Print the syntax tree (parse faults appear in its Errors subtree)
    Tree {
        /// Input source file
        path: String,
    },

    /// Export the syntax tree as a Graphviz digraph
    Dot {
        /// Input source file
        path: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run both passes and report every recorded error
    Check {
        /// Input source file
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Tokens { path } => cmd_tokens(&path),
        Command::Tree { path } => cmd_tree(&path),
        Command::Dot { path, output } => cmd_dot(&path, output.as_deref()),
        Command::Check { path } => cmd_check(&path),
    }
}

fn read_source(path: &str) -> Option<String> {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        return None;
    }
    match std::fs::read_to_string(p) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            None
        }
    }
}

fn cmd_tokens(path: &str) {
    let Some(source) = read_source(path) else {
        return;
    };

    let (tokens, errors) = Scanner::analyze(&source);
    for token in &tokens {
        println!("{token}");
    }
    for error in &errors {
        println!("{error}");
    }
}

fn cmd_tree(path: &str) {
    let Some(source) = read_source(path) else {
        return;
    };

    let (tokens, lex_errors) = Scanner::analyze(&source);
    let (root, _) = minic_parser::Parser::new(tokens).parse();
    print!("{}", minic_render::render(&root));

    // Parse faults are already in the tree; lexical ones are not.
    for error in &lex_errors {
        println!("{error}");
    }
}

fn cmd_dot(path: &str, output: Option<&str>) {
    let Some(source) = read_source(path) else {
        return;
    };

    let (tokens, _) = Scanner::analyze(&source);
    let (root, _) = minic_parser::Parser::new(tokens).parse();
    let dot = minic_render::to_dot(&root);

    match output {
        Some(out_path) => {
            if let Err(e) = std::fs::write(out_path, &dot) {
                eprintln!("Error writing {out_path}: {e}");
                return;
            }
            eprintln!("Wrote: {out_path}");
        }
        None => print!("{dot}"),
    }
}

fn cmd_check(path: &str) {
    let Some(source) = read_source(path) else {
        return;
    };

    let (tokens, lex_errors) = Scanner::analyze(&source);
    let (_, parse_errors) = minic_parser::Parser::new(tokens).parse();

    if lex_errors.is_empty() && parse_errors.is_empty() {
        eprintln!("OK: {path}");
        return;
    }
    for error in &lex_errors {
        println!("{error}");
    }
    for error in &parse_errors {
        println!("{error}");
    }
}
