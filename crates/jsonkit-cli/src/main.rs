//! `jsonkit` CLI: encode, decode, compress and analyze JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Minify keys and compress (stdin → stdout)
//! echo '[{"temperature":20},{"temperature":21}]' | jsonkit encode --minify --compress
//!
//! # Keep `$date` / `$binary` wrappers in the input as typed values
//! jsonkit encode --extended --minify -i data.json -o data.jk
//!
//! # Minify with a fixed key map (original → short)
//! jsonkit encode --minify --key-map keys.json -i data.json
//!
//! # Decode back to pretty-printed JSON
//! jsonkit decode -i data.jk
//!
//! # Raw text compression only
//! jsonkit compress -i notes.txt
//!
//! # Show size statistics for each transform
//! jsonkit stats -i data.json
//! ```
//!
//! Logging goes to stderr. `RUST_LOG` overrides the level; `-v` sets it to debug.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use jsonkit_core::{
    DecodeOptions, EncodeOptions, ExtendedCodec, ExtendedOption, KeyMapOption, Value,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonkit",
    version,
    about = "JSON codec with extended types, key minification and compression"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Io {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct ExtendedFlags {
    /// Use the extended JSON codec (relaxed mode)
    #[arg(long)]
    extended: bool,
    /// Use the extended JSON codec in canonical mode (implies --extended)
    #[arg(long)]
    canonical: bool,
}

impl ExtendedFlags {
    fn enabled(&self) -> bool {
        self.extended || self.canonical
    }

    fn codec(&self) -> ExtendedCodec {
        ExtendedCodec::new(!self.canonical)
    }

    fn option(&self) -> ExtendedOption {
        ExtendedOption::Detailed {
            enable: self.enabled(),
            relaxed: Some(!self.canonical),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON through the selected transforms
    Encode {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        extended: ExtendedFlags,
        /// Replace long repeated keys with short identifiers
        #[arg(long)]
        minify: bool,
        /// JSON object file mapping original keys to short keys (implies --minify)
        #[arg(long)]
        key_map: Option<String>,
        /// Compress the output (LZ4 + URL-safe base64)
        #[arg(long)]
        compress: bool,
        /// Pretty-print the JSON text
        #[arg(long)]
        pretty: bool,
    },
    /// Decode text produced by `encode` back to JSON
    Decode {
        #[command(flatten)]
        io: Io,
        #[command(flatten)]
        extended: ExtendedFlags,
        /// JSON object file mapping short keys to original keys
        #[arg(long)]
        key_map: Option<String>,
        /// Leave a minified envelope as is
        #[arg(long)]
        no_unminify: bool,
        /// Treat the input as uncompressed text
        #[arg(long)]
        no_decompress: bool,
        /// Print compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
    /// Compress arbitrary text
    Compress {
        #[command(flatten)]
        io: Io,
    },
    /// Decompress text produced by `compress` (other input passes through)
    Decompress {
        #[command(flatten)]
        io: Io,
    },
    /// Show output sizes for each transform
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        extended: ExtendedFlags,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode {
            io,
            extended,
            minify,
            key_map,
            compress,
            pretty,
        } => {
            let text = read_input(io.input.as_deref())?;
            let value = parse_value(&text, &extended)?;
            let minify = match key_map {
                Some(path) => KeyMapOption::Detailed {
                    enable: true,
                    key_map: Some(read_key_map(&path)?),
                },
                None => KeyMapOption::Flag(minify),
            };
            let options = EncodeOptions::new()
                .extended(extended.option())
                .minify(minify)
                .compress(compress)
                .pretty(pretty);
            let encoded = jsonkit_core::encode(&value, &options).context("Failed to encode JSON")?;
            write_output(io.output.as_deref(), &encoded)?;
        }
        Commands::Decode {
            io,
            extended,
            key_map,
            no_unminify,
            no_decompress,
            compact,
        } => {
            let text = read_input(io.input.as_deref())?;
            let unminify = match key_map {
                Some(path) => KeyMapOption::Detailed {
                    enable: !no_unminify,
                    key_map: Some(read_key_map(&path)?),
                },
                None => KeyMapOption::Flag(!no_unminify),
            };
            let options = DecodeOptions::new()
                .extended(extended.option())
                .unminify(unminify)
                .decompress(!no_decompress);
            let value = jsonkit_core::decode(&text, &options).context("Failed to decode input")?;
            let json = render_value(&value, &extended);
            let rendered = if compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };
            write_output(io.output.as_deref(), &rendered)?;
        }
        Commands::Compress { io } => {
            let text = read_input(io.input.as_deref())?;
            write_output(io.output.as_deref(), &jsonkit_core::compress_text(&text))?;
        }
        Commands::Decompress { io } => {
            let text = read_input(io.input.as_deref())?;
            write_output(io.output.as_deref(), &jsonkit_core::decompress_text(&text))?;
        }
        Commands::Stats { input, extended } => {
            let text = read_input(input.as_deref())?;
            let value = parse_value(&text, &extended)?;
            print_stats(&value, &extended)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .init();
}

/// Parse input JSON, lifting extended wrappers to typed values when requested.
fn parse_value(text: &str, extended: &ExtendedFlags) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    if extended.enabled() {
        extended
            .codec()
            .from_json(json)
            .context("Input contains malformed extended JSON")
    } else {
        Ok(Value::from(json))
    }
}

/// Lower a decoded value for printing, keeping typed values as wrappers when
/// extended mode is on.
fn render_value(value: &Value, extended: &ExtendedFlags) -> serde_json::Value {
    if extended.enabled() {
        extended.codec().to_json(value)
    } else {
        serde_json::Value::from(value)
    }
}

fn read_key_map(path: &str) -> Result<IndexMap<String, String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key map: {}", path))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Key map {} must be a JSON object of strings", path))
}

fn print_stats(value: &Value, extended: &ExtendedFlags) -> Result<()> {
    let base = EncodeOptions::new().extended(extended.option());
    let plain = jsonkit_core::encode(value, &base)?;
    let minified = jsonkit_core::encode(value, &base.clone().minify(true))?;
    let compressed = jsonkit_core::encode(value, &base.clone().compress(true))?;
    let both = jsonkit_core::encode(value, &base.minify(true).compress(true))?;
    let legend = jsonkit_core::minify(value).legend;

    let json_bytes = plain.len();
    println!("JSON size:            {} bytes", json_bytes);
    println!(
        "Minified size:        {} bytes ({})",
        minified.len(),
        reduction(json_bytes, minified.len())
    );
    println!(
        "Compressed size:      {} bytes ({})",
        compressed.len(),
        reduction(json_bytes, compressed.len())
    );
    println!(
        "Minified+compressed:  {} bytes ({})",
        both.len(),
        reduction(json_bytes, both.len())
    );
    println!("Keys substituted:     {}", legend.len());
    Ok(())
}

fn reduction(before: usize, after: usize) -> String {
    if before == 0 {
        return "0.0%".to_string();
    }
    let ratio = (1.0 - (after as f64 / before as f64)) * 100.0;
    format!("{:.1}%", ratio)
}

fn read_input(path: Option<&str>) -> Result<String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    tracing::debug!(source = path.unwrap_or("stdin"), bytes = text.len(), "read input");
    Ok(text)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
