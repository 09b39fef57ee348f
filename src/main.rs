//! markdeco - decorate a markdown file and print the result
//!
//! Loads the file (or stdin) into a line buffer, runs one decoration pass
//! and prints painted text, token trees, ranges or JSON.

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use markdeco::display::paint;
use markdeco::syntax::{Theme, TokenTree};
use markdeco::{tokenize, Buffer, Config, Decorator, Document, Registry, Result};

const DEFAULT_GRAMMAR: &str = "markdown";

/// What to print after decorating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Painted,
    Tokens,
    Ranges,
    Json,
}

#[derive(Debug)]
struct Options {
    output: Output,
    grammar: Option<String>,
    file: Option<PathBuf>,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let Some(options) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };

    let config = Config::load();
    let registry = Registry::new()?;

    let name = options
        .grammar
        .clone()
        .or_else(|| {
            options
                .file
                .as_deref()
                .and_then(|f| registry.detect_language(f))
                .map(str::to_string)
        })
        .or_else(|| config.grammar.clone())
        .unwrap_or_else(|| DEFAULT_GRAMMAR.to_string());
    tracing::debug!(grammar = %name, "selected grammar");

    let decorator = build_decorator(&registry, &config, &name)?;

    let buffer = match &options.file {
        Some(path) if path != Path::new("-") => Buffer::from_file(path)?,
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Buffer::from_text("*stdin*", &text)
        }
    };
    tracing::debug!(buffer = buffer.name(), lines = buffer.line_count(), "loaded buffer");

    match options.output {
        Output::Painted => {
            let theme = Theme::markdown();
            for node in buffer.text_nodes() {
                let ranges = decorator.decorate_node(&node.path, node.text);
                println!("{}", paint(node.text, &ranges, &theme));
            }
        }
        Output::Tokens => {
            for node in buffer.text_nodes() {
                println!("{}", node.path);
                print!("{}", TokenTree(&tokenize(node.text, decorator.grammar())));
            }
        }
        Output::Ranges => {
            for range in decorator.decorate(&buffer) {
                let tags: Vec<&str> = range.tags.iter().map(String::as_str).collect();
                println!(
                    "{} {}..{} ({}) {}",
                    range.path,
                    range.start,
                    range.end,
                    range.len(),
                    tags.join(",")
                );
            }
        }
        Output::Json => {
            let ranges = decorator.decorate(&buffer);
            println!("{}", serde_json::to_string_pretty(&ranges)?);
        }
    }

    Ok(())
}

/// Resolve a grammar by name and layer the configured rules on top
fn build_decorator(registry: &Registry, config: &Config, name: &str) -> Result<Decorator> {
    let base = registry.resolve(name)?;
    let grammar = config.apply(&base)?;
    Ok(Decorator::new(Arc::new(grammar)).with_policy(config.nested_tags))
}

/// Parse command line arguments. `None` means nothing left to do.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        output: Output::Painted,
        grammar: None,
        file: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("markdeco {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--tokens" => options.output = Output::Tokens,
            "--ranges" => options.output = Output::Ranges,
            "--json" => options.output = Output::Json,
            "--grammar" | "-g" => match args.next() {
                Some(name) => options.grammar = Some(name),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "--grammar needs a name",
                    )
                    .into())
                }
            },
            "-" => options.file = Some(PathBuf::from(arg)),
            flag if flag.starts_with('-') => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown option: {}", flag),
                )
                .into());
            }
            _ => options.file = Some(PathBuf::from(arg)),
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("markdeco {} - markdown decoration engine", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: markdeco [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin) and prints it decorated.");
    println!();
    println!("Options:");
    println!("  --tokens           Print the token tree of each line");
    println!("  --ranges           Print decorated ranges");
    println!("  --json             Print decorated ranges as JSON");
    println!("  -g, --grammar NAME Grammar to use (default: {})", DEFAULT_GRAMMAR);
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    if let Ok(registry) = Registry::new() {
        println!("Grammars: {}", registry.list_languages().join(", "));
    }
    println!("Config: ~/.markdeco.toml (override with MARKDECO_CONFIG)");
    println!("Logging: RUST_LOG=debug markdeco FILE");
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdeco::{NodePath, TagPolicy};

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["--ranges", "-g", "markup", "notes.md"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.output, Output::Ranges);
        assert_eq!(options.grammar.as_deref(), Some("markup"));
        assert_eq!(options.file, Some(PathBuf::from("notes.md")));
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(args(&[])).unwrap().unwrap();
        assert_eq!(options.output, Output::Painted);
        assert!(options.grammar.is_none());
        assert!(options.file.is_none());
    }

    #[test]
    fn test_build_decorator() {
        let registry = Registry::new().unwrap();
        let config = Config::parse(
            r#"
nested-tags = "nested"

[[rule]]
category = "mention"
pattern = '@\w+'
before = "bold"
"#,
        )
        .unwrap();

        let decorator = build_decorator(&registry, &config, "markdown").unwrap();
        assert_eq!(decorator.policy(), TagPolicy::Nested);
        let ranges = decorator.decorate_node(&NodePath(vec![0, 0]), "**hi** @ann");
        assert_eq!(ranges.len(), 2);
        assert!(ranges[0].is("bold"));
        assert!(ranges[1].is("mention"));

        assert!(build_decorator(&registry, &config, "nope").is_err());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--grammar"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
