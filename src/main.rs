//! # scrapedocs CLI Application
//!
//! This module implements the command-line interface for scrapedocs, turning a
//! documentation site into offline text, HTML, PDF and Markdown.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands:
//!   - `crawl`: Same-domain crawl, printing links or exporting page text
//!   - `scrape-and-save`: Save the table of contents and the HTML of its pages
//!   - `convert-and-concatenate`: Render saved HTML to PDF and merge the result
//!   - `pdf-to-md`: Convert a PDF to page-sectioned Markdown
//!   - `generate`: Generate text, JSON or HTML with a chat model
//!
//! Individual fetch and export failures are logged and skipped; errors are also
//! written to `cli_errors.log` in the log directory.

mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use scrapedocs::crawler::{
    CrawlRequest, CrawlerConfig, DEFAULT_MAX_DEPTH, HttpFetcher, Storage, crawl_site,
    save_html_from_toc, save_toc, scrape_toc,
};
use scrapedocs::llm::{Assistant, ChatClient, DEFAULT_TOPIC, OutputFormat};
use scrapedocs::pdf::{PdfTools, convert_and_concatenate, pdf_to_markdown};
use telemetry::ConsoleWriter;
use tracing::{info, instrument};

#[derive(Parser)]
#[command(author, version, about = "Crawl documentation sites and turn them into offline text, PDF and Markdown", long_about = None)]
struct Cli {
    /// Directory for the error log file
    #[arg(long, global = true, default_value = ".")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a website and save the text of every page found
    Crawl(CrawlArgs),

    /// Scrape the table of contents and save the HTML of every entry
    ScrapeAndSave(ScrapeAndSaveArgs),

    /// Convert saved HTML pages to PDF and concatenate them
    ConvertAndConcatenate(ConvertArgs),

    /// Convert a PDF to Markdown
    PdfToMd(PdfToMdArgs),

    /// Generate text, JSON or HTML with a language model
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Base URL to crawl
    #[arg(long, default_value = "https://docs.prefect.io/")]
    url: String,

    /// Maximum depth to crawl
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Directory to save the page text to
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,

    /// Only follow links containing this keyword
    #[arg(long, default_value = "")]
    keyword: String,

    /// Print the links instead of saving the pages
    #[arg(long)]
    print_links_only: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Args, Debug)]
struct ScrapeAndSaveArgs {
    /// Documentation root holding the table of contents
    url: String,

    /// File to write the table of contents to (JSON)
    output_toc: PathBuf,

    /// Directory to save the HTML pages to
    output_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Directory holding the saved HTML pages
    output_dir: PathBuf,

    /// Path of the merged PDF
    output_pdf: PathBuf,
}

#[derive(Args, Debug)]
struct PdfToMdArgs {
    /// PDF to convert
    input_pdf: PathBuf,

    /// Markdown file to write
    output_md: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Prompt to send
    #[arg(required = true)]
    prompt: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: FormatArg,

    /// Topic the assistant knows about
    #[arg(short, long, default_value = DEFAULT_TOPIC)]
    topic: String,

    /// System prompt replacing the default for the format
    #[arg(short, long)]
    system_prompt: Option<String>,

    /// Model to use (default: gpt-4 for html, gpt-3.5-turbo otherwise)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let console = ConsoleWriter::default();
    let _guard = telemetry::init_tracing_subscriber(&cli.log_dir, console.clone())?;

    // Execute the appropriate command
    match cli.command {
        Some(Commands::Crawl(args)) => {
            crawl_command(args, &console).await?;
        }
        Some(Commands::ScrapeAndSave(args)) => {
            scrape_and_save_command(args).await?;
        }
        Some(Commands::ConvertAndConcatenate(args)) => {
            convert_command(args, &console).await?;
        }
        Some(Commands::PdfToMd(args)) => {
            pdf_to_md_command(args).await?;
        }
        Some(Commands::Generate(args)) => {
            generate_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["scrapedocs", "--help"]);
        }
    }

    Ok(())
}

fn spinner(
    console: &ConsoleWriter,
    message: impl Into<std::borrow::Cow<'static, str>>,
) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    console.attach(&spinner);
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

#[instrument(skip(console))]
async fn crawl_command(args: CrawlArgs, console: &ConsoleWriter) -> anyhow::Result<()> {
    let mut builder = CrawlerConfig::builder()
        .max_depth(args.max_depth)
        .keyword(args.keyword.clone());
    if let Some(secs) = args.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    let config = builder.build();

    let fetcher = HttpFetcher::new(&config)?;
    let request = CrawlRequest::from_config(&args.url, &config)?;

    let progress = spinner(console, format!("Crawling {}...", args.url));
    let visited = crawl_site(&fetcher, &request).await?;
    progress.finish_with_message(format!("Found {} links", visited.len()));

    if args.print_links_only {
        for target in visited.iter() {
            println!("{}", target);
        }
        return Ok(());
    }

    let storage = Storage::at(&args.output_dir);
    let saved = storage
        .export_all(&fetcher, visited.iter().map(|target| target.as_str()))
        .await;

    println!(
        "Saved {} of {} pages to {}",
        saved.len(),
        visited.len(),
        args.output_dir.display()
    );
    Ok(())
}

#[instrument]
async fn scrape_and_save_command(args: ScrapeAndSaveArgs) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&CrawlerConfig::default())?;

    let entries = scrape_toc(&fetcher, &args.url).await?;
    save_toc(&entries, &args.output_toc).await?;
    info!(
        "Saved {} table of contents entries to {}",
        entries.len(),
        args.output_toc.display()
    );

    let saved = save_html_from_toc(&fetcher, &entries, &args.output_dir, &args.url).await?;
    println!(
        "Saved {} of {} pages to {}",
        saved.len(),
        entries.len(),
        args.output_dir.display()
    );
    Ok(())
}

#[instrument(skip(console))]
async fn convert_command(args: ConvertArgs, console: &ConsoleWriter) -> anyhow::Result<()> {
    let tools = PdfTools::default();

    let progress = spinner(console, "Rendering and merging PDFs...");
    let merged = convert_and_concatenate(&tools, &args.output_dir, &args.output_pdf).await?;
    progress.finish_with_message(format!("Merged {} PDFs", merged));

    if merged > 0 {
        println!("Concatenated {} PDFs into {}", merged, args.output_pdf.display());
    }
    Ok(())
}

#[instrument]
async fn pdf_to_md_command(args: PdfToMdArgs) -> anyhow::Result<()> {
    let pages = pdf_to_markdown(&args.input_pdf, &args.output_md).await?;
    println!(
        "Converted {} pages of {} to {}",
        pages,
        args.input_pdf.display(),
        args.output_md.display()
    );
    Ok(())
}

#[instrument(skip(args), fields(format = ?args.format, topic = %args.topic))]
async fn generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::from(args.format);
    let model_name = args
        .model
        .unwrap_or_else(|| format.default_model().to_string());

    let client = ChatClient::from_env()?;
    let model = client.model(model_name);
    info!("Generating {} with {}", format, model.name());
    let assistant = Assistant::with_topic(model, args.topic);
    let system_prompt = args.system_prompt.as_deref();

    match format {
        OutputFormat::Json => {
            let value = assistant.generate_json(&args.prompt, system_prompt).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text | OutputFormat::Html => {
            let text = assistant.generate(format, &args.prompt, system_prompt).await?;
            println!("{}", text);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["scrapedocs", "crawl"]).unwrap();
        assert_eq!(cli.log_dir, PathBuf::from("."));

        let Some(Commands::Crawl(args)) = cli.command else {
            panic!("expected the crawl command");
        };
        assert_eq!(args.url, "https://docs.prefect.io/");
        assert_eq!(args.max_depth, 2);
        assert_eq!(args.output_dir, PathBuf::from("./output"));
        assert_eq!(args.keyword, "");
        assert!(!args.print_links_only);
        assert_eq!(args.timeout, None);
    }

    #[test]
    fn test_crawl_flags() {
        let cli = Cli::try_parse_from([
            "scrapedocs",
            "crawl",
            "--url",
            "https://example.com/",
            "--max-depth",
            "0",
            "--keyword",
            "guide",
            "--print-links-only",
            "--log-dir",
            "logs",
        ])
        .unwrap();
        assert_eq!(cli.log_dir, PathBuf::from("logs"));

        let Some(Commands::Crawl(args)) = cli.command else {
            panic!("expected the crawl command");
        };
        assert_eq!(args.url, "https://example.com/");
        assert_eq!(args.max_depth, 0);
        assert_eq!(args.keyword, "guide");
        assert!(args.print_links_only);
    }

    #[test]
    fn test_generate_defaults_and_formats() {
        let cli = Cli::try_parse_from(["scrapedocs", "generate", "What is a flow?"]).unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected the generate command");
        };
        assert_eq!(args.prompt, "What is a flow?");
        assert_eq!(OutputFormat::from(args.format), OutputFormat::Text);
        assert_eq!(args.topic, DEFAULT_TOPIC);
        assert_eq!(args.model, None);

        let cli =
            Cli::try_parse_from(["scrapedocs", "generate", "x", "--format", "html"]).unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected the generate command");
        };
        assert_eq!(OutputFormat::from(args.format), OutputFormat::Html);

        assert!(Cli::try_parse_from(["scrapedocs", "generate", "x", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_positional_commands() {
        let cli = Cli::try_parse_from(["scrapedocs", "convert-and-concatenate", "out", "docs.pdf"])
            .unwrap();
        let Some(Commands::ConvertAndConcatenate(args)) = cli.command else {
            panic!("expected the convert-and-concatenate command");
        };
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.output_pdf, PathBuf::from("docs.pdf"));

        assert!(Cli::try_parse_from(["scrapedocs", "scrape-and-save", "https://example.com/"]).is_err());
    }
}
