use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser as ClapParser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kiss_lang::lexer::tokens::Token;

#[derive(ClapParser)]
#[command(name = "kiss", version, about = "The KISS scripting language interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the token stream (debug)
    Tokenize {
        /// Path to .kiss file
        file: PathBuf,
        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse and display the AST
    Parse {
        /// Path to .kiss file
        file: PathBuf,
        /// Print the AST as JSON
        #[arg(long)]
        json: bool,
    },
    /// Execute a program
    Run {
        /// Path to .kiss file
        #[arg(required_unless_present = "eval", conflicts_with = "eval")]
        file: Option<PathBuf>,
        /// Program source given inline instead of a file
        #[arg(short, long)]
        eval: Option<String>,
        /// Print every variable binding to stderr after the run
        #[arg(long)]
        dump_vars: bool,
    },
}

/// Log filter comes from `KISS_LOG`, then `RUST_LOG`; with neither set nothing is logged.
fn init_tracing() {
    let filter = std::env::var("KISS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok());

    if let Some(filter) = filter {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Tokenize { file, json } => cmd_tokenize(&file, json),
        Commands::Parse { file, json } => cmd_parse(&file, json),
        Commands::Run {
            file,
            eval,
            dump_vars,
        } => match (eval, file) {
            (Some(source), _) => cmd_run(&source, dump_vars),
            (None, Some(file)) => match read_source(&file) {
                Ok(source) => cmd_run(&source, dump_vars),
                Err(code) => code,
            },
            (None, None) => {
                eprintln!("Error: no program given");
                2
            }
        },
    };
    process::exit(exit_code);
}

const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

fn read_source(path: &Path) -> Result<String, i32> {
    let filename = path.display();

    match std::fs::metadata(path) {
        Ok(meta) => {
            if meta.len() > MAX_SOURCE_SIZE {
                eprintln!(
                    "Error: file {} is too large ({} bytes, max {} bytes)",
                    filename,
                    meta.len(),
                    MAX_SOURCE_SIZE
                );
                return Err(1);
            }
        }
        Err(e) => {
            eprintln!("Error: cannot read file {}: {}", filename, e);
            return Err(1);
        }
    }

    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: cannot read file {}: {}", filename, e);
        1
    })
}

fn lex(source: &str) -> Result<Vec<Token>, i32> {
    kiss_lang::tokenize(source).map_err(|e| {
        eprintln!("Lexer error: {}", e);
        1
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: cannot serialize output: {}", e);
            1
        }
    }
}

fn cmd_tokenize(path: &Path, json: bool) -> i32 {
    let tokens = match read_source(path).and_then(|source| lex(&source)) {
        Ok(t) => t,
        Err(code) => return code,
    };

    if json {
        return print_json(&tokens);
    }
    for tok in &tokens {
        println!("{}", tok);
    }
    0
}

fn cmd_parse(path: &Path, json: bool) -> i32 {
    let tokens = match read_source(path).and_then(|source| lex(&source)) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let program = match kiss_lang::parse(tokens) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return 1;
        }
    };

    if json {
        return print_json(&program);
    }
    print!("{}", program);
    0
}

fn cmd_run(source: &str, dump_vars: bool) -> i32 {
    let stdout = io::stdout();
    match kiss_lang::run(source, stdout.lock()) {
        Ok(interpreter) => {
            if dump_vars {
                for (key, value) in interpreter.variables().sorted() {
                    eprintln!("{} = {}", key.name, value);
                }
            }
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}
