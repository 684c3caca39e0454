use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use siteprint_core::{
    Extractor, ExtractorConfig, JsonConfig, Origin, PlainTextConfig, convert_to_json, convert_to_text,
};
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{
    format_size, print_banner, print_extraction_details, print_info, print_step, print_success, print_timing_summary,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the extraction summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Condense a web page into its title, description, copy, images and brand colors
#[derive(Parser, Debug)]
#[command(name = "siteprint")]
#[command(author = "Siteprint Contributors")]
#[command(version)]
#[command(about = "Condense web pages into titles, copy, images and colors", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// URL the markup was fetched from (used to resolve relative images)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Extractor configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of text snippets
    #[arg(long, value_name = "NUM")]
    max_texts: Option<usize>,

    /// Maximum number of images
    #[arg(long, value_name = "NUM")]
    max_images: Option<usize>,

    /// Maximum number of colors
    #[arg(long, value_name = "NUM")]
    max_colors: Option<usize>,

    /// Wrap text snippets at this width (text format only)
    #[arg(long, default_value = "0", value_name = "COLS")]
    line_width: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "siteprint_core=debug,siteprint=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<ExtractorConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ExtractorConfig::load_default().context("Failed to load default config")?,
    };

    if let Some(max) = args.max_texts {
        config.text.max_snippets = max;
    }
    if let Some(max) = args.max_images {
        config.images.max_images = max;
    }
    if let Some(max) = args.max_colors {
        config.colors.max_colors = max;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let started = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let source_url = args.url.clone().unwrap_or_default();
    if source_url.is_empty() {
        print_warning("No --url given, relative image references will be dropped");
    } else if Origin::try_from_source(&source_url).is_err() {
        print_warning(&format!(
            "Could not derive an origin from {}, relative images will be dropped",
            source_url
        ));
    }

    let step = Instant::now();
    let html = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };
    timings.push(("Read".to_string(), step.elapsed()));

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
        eprintln!();
        print_step(2, 3, "Extracting summary");
    }

    let step = Instant::now();
    let extractor = Extractor::with_config(load_config(&args)?);
    let result = extractor.extract(&html, &source_url);
    timings.push(("Extract".to_string(), step.elapsed()));

    if args.verbose {
        print_extraction_details(&result);
        print_step(3, 3, "Writing output");
        eprintln!(
            "  {} {}",
            "Format:".dimmed(),
            format!("{:?}", args.format).bright_white()
        );
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Json => {
            convert_to_json(&result, &JsonConfig { pretty: args.pretty }).context("Failed to serialize result")?
        }
        OutputFormat::Text => {
            let config = PlainTextConfig { line_width: args.line_width, ..Default::default() };
            convert_to_text(&result, &config)
        }
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    if args.verbose {
        print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}
