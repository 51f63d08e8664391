mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use cleanreader_core::{
    Article, InboundMessage, JsonConfig, MarkdownConfig, OutboundMessage, Page, Reader, ReaderConfig,
    ReaderController, TextConfig, read_file, read_stdin, run_bridge,
};
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What to write once reader mode is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// The whole page with the reader view swapped into its body
    View,
    Html,
    Markdown,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" | "page" => Ok(Self::View),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: view, html, markdown, text, json", s)),
        }
    }
}

/// Render a saved web page in reader mode
#[derive(Parser, Debug)]
#[command(name = "cleanreader")]
#[command(version)]
#[command(about = "Render a saved web page in distraction-free reader mode", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (view, html, markdown, text, json)
    #[arg(short, long, default_value = "view", value_name = "FORMAT")]
    format: OutputFormat,

    /// Write only the table of contents
    #[arg(long)]
    toc: bool,

    /// Print reading stats to stderr
    #[arg(long)]
    stats: bool,

    /// Toggle reader mode on and off and check the page comes back unchanged
    #[arg(long)]
    roundtrip: bool,

    /// URL the page was saved from, used to resolve relative links
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Content selector to try, in order (repeatable; replaces the defaults)
    #[arg(long = "selector", value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Reading speed for the time estimate
    #[arg(long, default_value = "400", value_name = "NUM")]
    chars_per_minute: usize,

    /// TOC indentation per heading level, in pixels
    #[arg(long, default_value = "20", value_name = "PX")]
    toc_indent: u32,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Strip images from output (Markdown only)
    #[arg(long)]
    no_images: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn reader_config(&self) -> anyhow::Result<ReaderConfig> {
        let mut builder = ReaderConfig::builder()
            .chars_per_minute(self.chars_per_minute)
            .toc_indent_unit(self.toc_indent);

        if !self.selectors.is_empty() {
            builder = builder.content_selectors(self.selectors.iter().cloned());
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url_str(url).context("Invalid --base-url")?;
        }

        Ok(builder.build())
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "cleanreader_core=debug,cleanreader=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render(article: &Article, page: &Page, args: &Args) -> anyhow::Result<String> {
    if args.toc {
        return Ok(article.toc(args.toc_indent).to_markdown(args.toc_indent));
    }

    let output = match args.format {
        OutputFormat::View => page.to_html(),
        OutputFormat::Html => article.content.clone(),
        OutputFormat::Markdown => {
            let config = MarkdownConfig {
                include_frontmatter: args.frontmatter,
                strip_images: args.no_images,
                toc_indent_unit: args.toc_indent,
                ..Default::default()
            };
            article.to_markdown_with_config(&config).context("Failed to convert to Markdown")?
        }
        OutputFormat::Text => article
            .to_text_with_config(&TextConfig { preserve_paragraphs: true, ..Default::default() })
            .context("Failed to convert to text")?,
        OutputFormat::Json => {
            let config = JsonConfig { pretty: args.pretty, toc_indent_unit: args.toc_indent, ..Default::default() };
            article.to_json_with_config(&config).context("Failed to convert to JSON")?
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
    }

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        read_stdin().context("Failed to read from stdin")?
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        read_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
    }

    let config = args.reader_config()?;
    let page = match &args.base_url {
        Some(url) => Page::from_html_with_url(&html, url),
        None => Page::from_html(&html),
    }
    .context("Failed to load page")?;
    let original = page.body_html().to_string();

    if args.verbose {
        echo::print_step(2, 3, "Toggling reader mode");
    }

    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let mut controller = ReaderController::with_notifier(page, notify_tx).with_reader(Reader::with_config(config));

    let (toggle_tx, toggle_rx) = mpsc::unbounded_channel();
    let toggles = if args.roundtrip { 2 } else { 1 };
    for _ in 0..toggles {
        toggle_tx.send(InboundMessage::ToggleReader).context("Host channel closed")?;
    }
    drop(toggle_tx);
    run_bridge(&mut controller, toggle_rx).await;

    while let Ok(message) = notify_rx.try_recv() {
        if args.verbose {
            echo::print_message(&message);
        }
    }

    if args.roundtrip {
        if controller.page().body_html() != original {
            bail!("Round trip changed the page body");
        }
        echo::print_success("Round trip restored the original page");
        return Ok(());
    }

    let Some(article) = controller.article() else {
        bail!("Reader mode did not turn on");
    };

    if args.stats {
        echo::print_stats(article);
    }
    if article.content.is_empty() {
        echo::print_warning("No readable content found");
    }

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        echo::print_info(&format!("Format: {:?}", args.format));
    }

    let output = render(article, controller.page(), &args)?;
    tracing::debug!(bytes = output.len(), format = ?args.format, "rendered output");

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
