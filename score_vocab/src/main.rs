// Vocabulary inspection CLI.
//
// Builds a vocabulary and prints either a per-category summary or the full
// id table as JSON, for checking id layouts against a trained model.
//
// Usage:
//   cargo run -p score_vocab --bin vocab-dump -- [--config PATH]
//     [--controls key,density,...] [--mode NAME] [--json]
//
// `--controls` and `--mode` override the corresponding config fields.
// Set RUST_LOG=debug to see construction details.

use std::path::Path;
use std::process;

use score_vocab::{ControlCategory, VocabConfig, Vocabulary};

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<String>,
    mode: Option<String>,
    controls: Option<Vec<ControlCategory>>,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let raw: Vec<String> = std::env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => match VocabConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                process::exit(1);
            }
        },
        None => VocabConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(controls) = args.controls {
        config.control_list = controls;
    }

    let vocab = Vocabulary::from_config(&config);

    if args.json {
        match serde_json::to_string_pretty(&vocab.entries()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize vocabulary: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("Mode: {}", vocab.mode());
    println!("Vocab size: {}", vocab.vocab_size());
    let controls: Vec<&str> = vocab.controls().iter().map(|c| c.as_str()).collect();
    let controls = if controls.is_empty() {
        "(none)".to_string()
    } else {
        controls.join(", ")
    };
    println!("Controls: {controls}");
    println!();
    for category in vocab.class_names() {
        let ids = vocab.indices_of(category);
        let tokens = vocab.tokens_of(category);
        match (ids.first(), ids.last()) {
            (Some(first), Some(last)) => println!(
                "  {:<15} {:>4} tokens  ids {:>3}..={:<3}  {} .. {}",
                category.as_str(),
                ids.len(),
                first,
                last,
                tokens[0],
                tokens[tokens.len() - 1],
            ),
            _ => println!("  {:<15} (empty)", category.as_str()),
        }
    }
}

/// Parse the full argv (program name first). Errors are ready to print.
fn parse_args(args: &[String]) -> Result<Args, String> {
    let controls = match flag_value(args, "--controls")? {
        Some(list) => Some(parse_controls(list).map_err(|e| format!("--controls: {e}"))?),
        None => None,
    };
    Ok(Args {
        config: flag_value(args, "--config")?.map(str::to_string),
        mode: flag_value(args, "--mode")?.map(str::to_string),
        controls,
        json: args.iter().any(|a| a == "--json"),
    })
}

/// Comma-separated control names, e.g. `key,tensile`.
fn parse_controls(list: &str) -> score_vocab::Result<Vec<ControlCategory>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<ControlCategory>)
        .collect()
}

/// Value following `flag`. A flag given with nothing after it, or followed
/// by another `--flag`, is an error rather than silently ignored.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => Err(format!("{flag} requires a value")),
    }
}
