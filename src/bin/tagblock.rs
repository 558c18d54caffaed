//! Command-line interface for tagblock
//! This binary compiles tag patterns, classifies text files line by line and groups them into blocks.
//!
//! Usage:
//!   tagblock compile `<program>`          - Compile a pattern program and print its renderings
//!   tagblock check                        - Compile the standard blocks and run the self-check
//!   tagblock classify `<path>`            - Print the tag of every line of a file
//!   tagblock group `<path>` [--json]      - Group a file into structural blocks
//!
//! Global options: `--config <file>` layers a TOML file over the defaults, `--trace` logs every
//! matcher step (also enabled with `RUST_LOG`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use tagblock::tagblock::classify::Classifier;
use tagblock::tagblock::config::{Loader, TagblockConfig};
use tagblock::tagblock::grouping::group_tokens;
use tagblock::tagblock::pattern::compile;
use tagblock::tagblock::registry::Registry;
use tagblock::tagblock::token::Token;

fn main() {
    let matches = Command::new("tagblock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Match classified lines against tag patterns")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every matcher step at trace level"),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile a pattern program and print its renderings")
                .arg(
                    Arg::new("program")
                        .help("Short-form or long-form pattern program")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("check").about("Compile the standard blocks and self-check them"))
        .subcommand(
            Command::new("classify")
                .about("Print the tag of every line")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("group")
                .about("Group a file into structural blocks")
                .arg(
                    Arg::new("path")
                        .help("Path to the text file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print blocks as JSON"),
                ),
        )
        .get_matches();

    let trace = matches.get_flag("trace");
    init_tracing(trace);
    let config = load_config(&matches, trace);

    match matches.subcommand() {
        Some(("compile", compile_matches)) => {
            let program = required(compile_matches, "program");
            handle_compile_command(program);
        }
        Some(("check", _)) => handle_check_command(),
        Some(("classify", classify_matches)) => {
            let path = required(classify_matches, "path");
            handle_classify_command(path, &config);
        }
        Some(("group", group_matches)) => {
            let path = required(group_matches, "path");
            handle_group_command(path, group_matches.get_flag("json"), &config);
        }
        _ => unreachable!(),
    }
}

/// Install a subscriber when `RUST_LOG` is set or `--trace` was given
fn init_tracing(trace: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if trace {
        EnvFilter::new("tagblock=trace")
    } else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(matches: &ArgMatches, trace: bool) -> TagblockConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if trace {
        loader = loader
            .set_override("matching.trace", true)
            .unwrap_or_else(|e| fail("Invalid override", e));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail("Error loading configuration", e))
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| fail("Missing argument", name))
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}

/// Handle the compile command
fn handle_compile_command(program: &str) {
    let node = compile(program).unwrap_or_else(|e| fail("Compile error", e));
    println!("{}", node.pattern());
    println!("regexp: {}", node.regexp());
}

/// Handle the check command
fn handle_check_command() {
    let registry = Registry::standard().unwrap_or_else(|e| fail("Self-check failed", e));
    for block in registry.blocks() {
        println!("{:<12} {}", block.name(), block.regexp());
    }
    println!("{} blocks ok", registry.len());
}

fn read_tokens(path: &str, config: &TagblockConfig) -> Vec<Token> {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| fail("Error reading file", e));
    Classifier::standard(&config.classify).classify(&source)
}

/// Handle the classify command
fn handle_classify_command(path: &str, config: &TagblockConfig) {
    for token in read_tokens(path, config) {
        println!("{:>4}  {:<10} {}", token.line + 1, token.tag.name(), token.text);
    }
}

/// Handle the group command
fn handle_group_command(path: &str, json: bool, config: &TagblockConfig) {
    let tokens = read_tokens(path, config);
    let registry = Registry::standard().unwrap_or_else(|e| fail("Self-check failed", e));
    let blocks = group_tokens(&registry, &tokens, config);

    if json {
        let output =
            serde_json::to_string_pretty(&blocks).unwrap_or_else(|e| fail("Serialization error", e));
        println!("{}", output);
        return;
    }

    for block in &blocks {
        let first = tokens[block.start].line + 1;
        let last = tokens[block.end - 1].line + 1;
        println!(
            "{:<12} lines {}-{} ({:?})",
            block.name, first, last, block.state
        );
    }
}
