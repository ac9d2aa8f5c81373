use clap::{Parser, Subcommand};
use hamlite_parser::{ParserOptions, Root};
use std::path::Path;

#[derive(Parser)]
#[command(name = "hamlite")]
#[command(about = "hamlite: indentation-sensitive HTML template parser")]
#[command(version)]
struct Cli {
    /// Log parser decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Parser option as key=value (may be repeated)
    #[arg(short = 'o', long = "option", value_parser = parse_key_val, global = true)]
    options: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a template for errors without printing the tree
    Check {
        /// Input template file
        path: String,
    },

    /// Print the parsed tree of a template
    Tree {
        /// Input template file
        path: String,

        /// Print the tree as JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParserOptions::from_pairs(cli.options);

    match cli.command {
        Command::Check { path } => cmd_check(&path, options),
        Command::Tree { path, json } => cmd_tree(&path, options, json),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid option '{s}': expected key=value"))?;
    if key.is_empty() {
        return Err(format!("invalid option '{s}': empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(path: &str, options: ParserOptions) -> Root {
    let source = read_source(path);
    log::debug!("read {} byte(s) from {path}", source.len());

    match hamlite_parser::Parser::with_options(options).parse(&source) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(path: &str, options: ParserOptions) {
    parse_or_exit(path, options);
    eprintln!("OK: {path}");
}

fn cmd_tree(path: &str, options: ParserOptions, json: bool) {
    let root = parse_or_exit(path, options);

    if json {
        match serde_json::to_string_pretty(&root) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing tree: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{root}");
    }
}
