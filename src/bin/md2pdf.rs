//! CLI binary for md2pdf-report.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `RenderConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf_report::{
    convert_to_file, default_output_path, inspect, ConversionProgressCallback, HeaderMode,
    PageSize, ProgressCallback, RenderConfig, TruncationLimits,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar over source lines plus one log line per
/// finished page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading Markdown…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>5}/{len} lines  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_lines: usize) {
        self.activate_bar(total_lines);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Rendering {total_lines} lines…"))
        ));
    }

    fn on_page_complete(&self, page_num: usize, lines_done: usize) {
        self.bar.println(format!(
            "  {} Page {:>3}  {}",
            green("✓"),
            page_num,
            dim(&format!("through line {lines_done}")),
        ));
        self.bar.set_position(lines_done as u64);
    }

    fn on_conversion_complete(&self, total_pages: usize, pdf_bytes: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages rendered  {}",
            green("✔"),
            bold(&total_pages.to_string()),
            dim(&format!("{:.1} KiB", pdf_bytes as f64 / 1024.0)),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes SPEC.pdf next to SPEC.md)
  md2pdf SPEC.md

  # Explicit output path and cover subtitle
  md2pdf SPEC.md -o out/spec.pdf --subtitle "Product Specification"

  # Cover taglines (repeatable)
  md2pdf SPEC.md --tagline "Prepared for the board" --tagline "Confidential"

  # US Letter, no cover page
  md2pdf --page-size letter --no-cover notes.md

  # Convert from URL
  md2pdf https://example.com/docs/ROADMAP.md

  # Show headings and block counts without rendering
  md2pdf --inspect-only SPEC.md

  # Machine-readable stats
  md2pdf --json SPEC.md > stats.json

MARKDOWN SUPPORT:
  # / ## / ### / ####     headings (levels 4-6 share one style)
  - item, * item, + item  bullets
  1. item                 numbered items
  - [ ] / - [x]           checkboxes
  | a | b |               table rows (monospace, one line each)
  ```                     fenced code blocks
  ---                     horizontal rule
  **Key:** value          cover details when placed before the first ##

ENVIRONMENT VARIABLES:
  Every flag reads an MD2PDF_* variable, e.g. MD2PDF_SUBTITLE, MD2PDF_PAGE_SIZE.
  RUST_LOG                Override the log filter (e.g. md2pdf_report=debug)
"#;

/// Render Markdown files and URLs as PDF reports.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Render Markdown files and URLs as PDF reports",
    long_about = "Render Markdown documents (local files or URLs) as print-ready PDF reports \
with a cover page, running header and page-numbered footer. Uses the PDF built-in fonts, so \
no font files are needed.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local Markdown file path or HTTP/HTTPS URL.
    input: String,

    /// Write the PDF here instead of `<stem>.pdf` next to the input.
    #[arg(short, long, env = "MD2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Document title (default: the first `# ` heading).
    #[arg(long, env = "MD2PDF_TITLE")]
    title: Option<String>,

    /// Cover subtitle, also appended to the running header.
    #[arg(long, env = "MD2PDF_SUBTITLE")]
    subtitle: Option<String>,

    /// Italic line at the bottom of the cover. Repeatable.
    #[arg(long = "tagline", env = "MD2PDF_TAGLINE")]
    taglines: Vec<String>,

    /// Fixed running-header text.
    #[arg(long, env = "MD2PDF_HEADER", conflicts_with = "no_header")]
    header: Option<String>,

    /// Disable the running header.
    #[arg(long, env = "MD2PDF_NO_HEADER")]
    no_header: bool,

    /// Do not render a cover page.
    #[arg(long, env = "MD2PDF_NO_COVER")]
    no_cover: bool,

    /// Do not draw the `Page N/M` footer.
    #[arg(long, env = "MD2PDF_NO_FOOTER")]
    no_footer: bool,

    /// Page size.
    #[arg(long, env = "MD2PDF_PAGE_SIZE", value_enum, default_value = "a4")]
    page_size: PageSizeArg,

    /// Maximum characters per code line.
    #[arg(long, env = "MD2PDF_CODE_LIMIT", default_value_t = 110)]
    code_limit: usize,

    /// Maximum characters per table row.
    #[arg(long, env = "MD2PDF_TABLE_LIMIT", default_value_t = 130)]
    table_limit: usize,

    /// Maximum characters per bullet item.
    #[arg(long, env = "MD2PDF_BULLET_LIMIT", default_value_t = 160)]
    bullet_limit: usize,

    /// Print conversion stats (or the outline with --inspect-only) as JSON.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Print the document outline only, no rendering.
    #[arg(long)]
    inspect_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "MD2PDF_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PageSizeArg {
    A4,
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let config = build_config(&cli, None)?;
        let outline = inspect(&cli.input, &config)
            .await
            .context("Failed to inspect Markdown")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outline).context("Failed to serialize outline")?
            );
        } else {
            println!("File:         {}", cli.input);
            if let Some(ref t) = outline.cover.title {
                println!("Title:        {}", t);
            }
            for detail in &outline.cover.details {
                println!("Detail:       {}", detail);
            }
            println!("Lines:        {}", outline.source_lines);
            println!("Headings:     {}", outline.headings.len());
            println!("Code blocks:  {}", outline.blocks.code_blocks);
            println!("Table rows:   {}", outline.blocks.table_rows);
            println!(
                "Checkboxes:   {} ({} done)",
                outline.blocks.checkboxes, outline.blocks.checked
            );
            println!();
            for h in &outline.headings {
                let indent = "  ".repeat(usize::from(h.level.saturating_sub(1)));
                println!("{:>5}  {}{}", dim(&h.line.to_string()), indent, h.text);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let stats = convert_to_file(&cli.input, &output_path, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?;
        println!("{json}");
    }

    if !cli.quiet {
        if !show_progress && !cli.json {
            eprintln!(
                "Rendered {} pages from {} lines in {}ms",
                stats.total_pages, stats.source_lines, stats.total_duration_ms
            );
        }
        if stats.replaced_chars > 0 || stats.truncated_lines > 0 {
            eprintln!(
                "   {} characters replaced  /  {} lines truncated",
                dim(&stats.replaced_chars.to_string()),
                dim(&stats.truncated_lines.to_string()),
            );
        }
        eprintln!("PDF saved to: {}", bold(&output_path.display().to_string()));
    }

    Ok(())
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<RenderConfig> {
    let header = if cli.no_header {
        HeaderMode::Off
    } else if let Some(ref text) = cli.header {
        HeaderMode::Custom(text.clone())
    } else {
        HeaderMode::Auto
    };

    let mut builder = RenderConfig::builder()
        .page_size(cli.page_size.clone().into())
        .cover(!cli.no_cover)
        .header(header)
        .show_footer(!cli.no_footer)
        .limits(TruncationLimits {
            code_line: cli.code_limit,
            table_row: cli.table_limit,
            bullet: cli.bullet_limit,
        })
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(ref subtitle) = cli.subtitle {
        builder = builder.subtitle(subtitle.clone());
    }
    for line in &cli.taglines {
        builder = builder.tagline(line.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_map_to_config() {
        let cli = Cli::parse_from([
            "md2pdf",
            "doc.md",
            "--subtitle",
            "Review",
            "--tagline",
            "one",
            "--tagline",
            "two",
            "--no-header",
            "--page-size",
            "letter",
            "--code-limit",
            "90",
        ]);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.cover.subtitle.as_deref(), Some("Review"));
        assert_eq!(config.cover.taglines, vec!["one", "two"]);
        assert_eq!(config.header, HeaderMode::Off);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.limits.code_line, 90);
        assert!(config.cover.enabled);
    }

    #[test]
    fn tagline_keeps_semicolons() {
        let cli = Cli::parse_from(["md2pdf", "doc.md", "--tagline", "Draft; do not share"]);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.cover.taglines, vec!["Draft; do not share"]);
    }

    #[test]
    fn download_timeout_reaches_config() {
        let cli = Cli::parse_from(["md2pdf", "https://example.com/a.md", "--download-timeout", "7"]);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.download_timeout_secs, 7);
    }

    #[test]
    fn custom_header_and_no_cover() {
        let cli = Cli::parse_from(["md2pdf", "doc.md", "--header", "ACME", "--no-cover"]);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.header, HeaderMode::Custom("ACME".into()));
        assert!(!config.cover.enabled);
    }

    #[test]
    fn tiny_limit_is_rejected() {
        let cli = Cli::parse_from(["md2pdf", "doc.md", "--table-limit", "3"]);
        assert!(build_config(&cli, None).is_err());
    }
}
