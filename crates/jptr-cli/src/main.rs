//! `jptr` CLI — read and edit JSON documents with RFC 6901 pointers.
//!
//! ## Usage
//!
//! ```sh
//! # Read a value (stdin → stdout)
//! echo '{"a":[1,2,3]}' | jptr get /a/1
//!
//! # Insert into an array, from file to file
//! jptr add /a/1 9 -i doc.json -o out.json
//!
//! # Append with the "-" token
//! jptr add /a/- '{"k":true}' -i doc.json
//!
//! # Overwrite or delete an existing value
//! jptr replace /a/0 '"x"' -i doc.json --compact
//! jptr remove /a/0 -i doc.json
//!
//! # Inspect pointer encoding
//! jptr tokens '/a~1b/m~0n'     # ["a/b","m~n"]
//! jptr escape a/b m~n          # /a~1b/m~0n
//! ```
//!
//! Logging goes to stderr. `-v` raises the level (info, debug, trace);
//! `RUST_LOG` overrides it.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use jptr_core::{JsonValue, Pointer};
use log::info;
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jptr",
    version,
    about = "Read and edit JSON documents with RFC 6901 JSON Pointers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a pointer
    Get {
        /// JSON Pointer, e.g. "/a/0" ("" for the whole document)
        pointer: String,
        #[command(flatten)]
        doc: DocumentArgs,
    },
    /// Add a value: insert into an array, or insert/overwrite an object member
    Add {
        /// JSON Pointer to the new location ("-" as last token appends)
        pointer: String,
        #[command(flatten)]
        value: ValueArgs,
        #[command(flatten)]
        doc: DocumentArgs,
    },
    /// Overwrite an existing value
    Replace {
        /// JSON Pointer to an existing value
        pointer: String,
        #[command(flatten)]
        value: ValueArgs,
        #[command(flatten)]
        doc: DocumentArgs,
    },
    /// Remove an existing value
    Remove {
        /// JSON Pointer to an existing value
        pointer: String,
        #[command(flatten)]
        doc: DocumentArgs,
    },
    /// Print the decoded reference tokens of a pointer as a JSON array
    Tokens {
        /// JSON Pointer to decode
        pointer: String,
    },
    /// Build a pointer from raw tokens, escaping '~' and '/'
    Escape {
        /// Unescaped reference tokens, outermost first
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

#[derive(Args)]
struct DocumentArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Args)]
struct ValueArgs {
    /// New value as JSON text (e.g. 42, '"text"', '{"k":[1]}')
    #[arg(
        required_unless_present = "value_file",
        conflicts_with = "value_file",
        allow_hyphen_values = true
    )]
    value: Option<String>,
    /// Read the new value from a JSON file instead
    #[arg(long)]
    value_file: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get { pointer, doc } => {
            let pointer = parse_pointer(&pointer)?;
            let document = read_document(doc.input.as_deref())?;
            let value = jptr_core::get(&pointer, &document)
                .with_context(|| format!("Failed to get '{pointer}'"))?;
            write_value(&doc, &value)?;
        }
        Commands::Add { pointer, value, doc } => {
            let pointer = parse_pointer(&pointer)?;
            let new_value = read_new_value(&value)?;
            let document = read_document(doc.input.as_deref())?;
            let result = jptr_core::add(&pointer, &document, new_value)
                .with_context(|| format!("Failed to add at '{pointer}'"))?;
            write_value(&doc, &result)?;
        }
        Commands::Replace { pointer, value, doc } => {
            let pointer = parse_pointer(&pointer)?;
            let new_value = read_new_value(&value)?;
            let document = read_document(doc.input.as_deref())?;
            let result = jptr_core::replace(&pointer, &document, new_value)
                .with_context(|| format!("Failed to replace '{pointer}'"))?;
            write_value(&doc, &result)?;
        }
        Commands::Remove { pointer, doc } => {
            let pointer = parse_pointer(&pointer)?;
            let document = read_document(doc.input.as_deref())?;
            let result = jptr_core::remove(&pointer, &document)
                .with_context(|| format!("Failed to remove '{pointer}'"))?;
            write_value(&doc, &result)?;
        }
        Commands::Tokens { pointer } => {
            let pointer = parse_pointer(&pointer)?;
            println!("{}", serde_json::to_string(pointer.tokens())?);
        }
        Commands::Escape { tokens } => {
            println!("{}", Pointer::from_tokens(&tokens));
        }
    }

    Ok(())
}

/// Install the stderr logger. `RUST_LOG`, when set, wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_pointer(text: &str) -> Result<Pointer> {
    Pointer::parse(text).with_context(|| format!("Invalid JSON pointer: {text:?}"))
}

fn read_document(path: Option<&str>) -> Result<JsonValue> {
    let text = read_input(path)?;
    info!(
        "read {} bytes from {}",
        text.len(),
        path.unwrap_or("<stdin>")
    );
    serde_json::from_str(&text).context("Input document is not valid JSON")
}

fn read_new_value(args: &ValueArgs) -> Result<JsonValue> {
    match (&args.value, &args.value_file) {
        (_, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read value file: {}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Value file is not valid JSON: {}", path))
        }
        (Some(text), None) => serde_json::from_str(text)
            .with_context(|| format!("Value is not valid JSON: {text}")),
        // clap enforces one of the two.
        (None, None) => anyhow::bail!("A value or --value-file is required"),
    }
}

fn write_value(args: &DocumentArgs, value: &JsonValue) -> Result<()> {
    let text = if args.compact {
        format!("{value}\n")
    } else {
        format!("{value:#}\n")
    };
    write_output(args.output.as_deref(), &text)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            info!("wrote {} bytes to {}", content.len(), path);
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
