//! Folio CLI - report export and encoding tool

mod outline;

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use folio::prelude::*;
use folio::{
    cell_reference, column_index, column_name, zlib_deflate, CurrencyNegativePattern,
    CurrencyPositivePattern, NumberNegativePattern, PageSelector,
};

use crate::outline::OutlineHtml;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Report export and encoding tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    All,
    Current,
    Numbers,
}

impl From<Mode> for PageRange {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::All => PageRange::All,
            Mode::Current => PageRange::Current,
            Mode::Numbers => PageRange::PageNumbers,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Dialect {
    Html,
    Xml,
    Odt,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatKind {
    Number,
    Currency,
    Date,
    Percent,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a page selection to zero-based page indices
    Pages {
        /// Page-number expression, e.g. "1,3-5,8-"
        #[arg(default_value = "")]
        expression: String,

        /// Total number of prepared pages
        #[arg(short, long)]
        total: usize,

        /// One-based current page
        #[arg(short, long, default_value = "1")]
        current: usize,

        /// Selection mode
        #[arg(short, long, value_enum, default_value = "numbers")]
        mode: Mode,
    },

    /// Encode text for a markup dialect
    Encode {
        /// Text to encode
        text: String,

        /// Target dialect
        #[arg(short, long, value_enum, default_value = "html")]
        dialect: Dialect,

        /// Keep inline HTML tags instead of escaping them
        #[arg(long)]
        tags: bool,

        /// Use the Office 2007+ escaping profile
        #[arg(long)]
        excel2007: bool,
    },

    /// Print the spreadsheet format pattern for a value format
    Format {
        /// Kind of value
        #[arg(value_enum)]
        kind: FormatKind,

        /// Decimal digits
        #[arg(short, long, default_value = "2")]
        digits: u8,

        /// Currency symbol
        #[arg(short, long, default_value = "$")]
        symbol: String,

        /// Date token (d, D, f, F, "MMMM yyyy") or literal pattern
        #[arg(short, long, default_value = "d")]
        pattern: String,

        /// Positive currency pattern id (0-3)
        #[arg(long, default_value = "0")]
        positive: u8,

        /// Negative pattern id (0-15 for currency, 0-4 for numbers)
        #[arg(long)]
        negative: Option<u8>,

        /// Locale preset (invariant, en-US, ru-RU, de-DE)
        #[arg(short, long, default_value = "invariant")]
        locale: String,

        /// Take digits and arrangements from the locale
        #[arg(long)]
        use_locale: bool,

        /// Emit currency as an accounting format
        #[arg(long)]
        accounting: bool,
    },

    /// Wrap a file in a zlib envelope
    Deflate {
        /// Input file
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Print the A1 reference of a one-based column and row
    Cell {
        column: u32,
        row: u32,
    },

    /// Convert a column name to its one-based index, or an index to its name
    Column {
        /// Column letters (e.g. "AB") or a one-based index (e.g. 28)
        value: String,
    },

    /// Export a JSON page snapshot to an HTML outline
    Export {
        /// JSON file holding an array of pages
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file holding export options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Page-number expression, overriding the options file
        #[arg(short, long)]
        pages: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pages {
            expression,
            total,
            current,
            mode,
        } => resolve_pages(&expression, total, current, mode),
        Commands::Encode {
            text,
            dialect,
            tags,
            excel2007,
        } => encode(&text, dialect, tags, excel2007),
        Commands::Format {
            kind,
            digits,
            symbol,
            pattern,
            positive,
            negative,
            locale,
            use_locale,
            accounting,
        } => {
            let format = build_format(kind, digits, symbol, pattern, positive, negative)?;
            let locale = LocaleInfo::from_tag(&locale)
                .with_context(|| format!("Unknown locale '{}'", locale))?;
            let synthesizer = NumberFormatSynthesizer::new(locale)
                .use_locale(use_locale)
                .accounting(accounting);
            println!("{}", synthesizer.synthesize(&format));
            Ok(())
        }
        Commands::Deflate { input, output } => deflate(&input, &output),
        Commands::Cell { column, row } => {
            println!("{}", cell_reference(column, row)?);
            Ok(())
        }
        Commands::Column { value } => {
            match value.parse::<u32>() {
                Ok(index) => println!("{}", column_name(index)?),
                Err(_) => println!("{}", column_index(&value)?),
            }
            Ok(())
        }
        Commands::Export {
            input,
            output,
            options,
            pages,
        } => export(&input, &output, options.as_deref(), pages),
    }
}

fn resolve_pages(expression: &str, total: usize, current: usize, mode: Mode) -> Result<()> {
    let pages = PageSelector::new(mode.into())
        .with_page_numbers(expression)
        .with_current_page(current)
        .resolve(total)?;
    let line: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
    println!("{}", line.join(","));
    Ok(())
}

fn encode(text: &str, dialect: Dialect, tags: bool, excel2007: bool) -> Result<()> {
    let dialect = match dialect {
        Dialect::Html => MarkupDialect::PlainHtml,
        Dialect::Xml => MarkupDialect::Xml,
        Dialect::Odt => MarkupDialect::OpenDocumentText,
    };
    let mode = if tags {
        TextRenderMode::HtmlTagsPassthrough
    } else {
        TextRenderMode::Default
    };
    let encoded = MarkupTranscoder::new(dialect)
        .with_render_mode(mode)
        .with_excel2007(excel2007)
        .encode(text);
    println!("{}", encoded);
    Ok(())
}

fn build_format(
    kind: FormatKind,
    digits: u8,
    symbol: String,
    pattern: String,
    positive: u8,
    negative: Option<u8>,
) -> Result<ValueFormat> {
    let format = match kind {
        FormatKind::Number => ValueFormat::Number {
            decimal_digits: digits,
            negative_pattern: match negative {
                Some(id) => NumberNegativePattern::from_id(id)
                    .with_context(|| format!("Number negative pattern {} out of range 0-4", id))?,
                None => NumberNegativePattern::default(),
            },
        },
        FormatKind::Currency => ValueFormat::Currency {
            decimal_digits: digits,
            positive_pattern: CurrencyPositivePattern::from_id(positive)
                .with_context(|| format!("Currency positive pattern {} out of range 0-3", positive))?,
            negative_pattern: match negative {
                Some(id) => CurrencyNegativePattern::from_id(id)
                    .with_context(|| format!("Currency negative pattern {} out of range 0-15", id))?,
                None => CurrencyNegativePattern::default(),
            },
            symbol,
        },
        FormatKind::Date => ValueFormat::Date { pattern },
        FormatKind::Percent => ValueFormat::Percent {
            decimal_digits: digits,
        },
    };
    Ok(format)
}

fn deflate(input: &Path, output: &Path) -> Result<()> {
    let src = File::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    let dst = File::create(output).with_context(|| format!("Failed to create '{}'", output.display()))?;
    let mut dst = BufWriter::new(dst);
    let checksum = zlib_deflate(BufReader::new(src), &mut dst)
        .with_context(|| format!("Failed to compress '{}'", input.display()))?;
    dst.flush().context("Failed to flush output")?;
    eprintln!("Wrote '{}' (adler32 {:08x})", output.display(), checksum);
    Ok(())
}

fn export(input: &Path, output: &Path, options: Option<&Path>, pages: Option<String>) -> Result<()> {
    let snapshot = fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let pages_json: Vec<Page> = serde_json::from_str(&snapshot)
        .with_context(|| format!("Failed to parse page snapshot '{}'", input.display()))?;

    let mut export_options = match options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            serde_json::from_str::<ExportOptions>(&text)
                .with_context(|| format!("Failed to parse options '{}'", path.display()))?
        }
        None => ExportOptions::default(),
    };
    if let Some(expression) = pages {
        export_options.page_range = PageRange::PageNumbers;
        export_options.page_numbers = expression;
    }

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if pages_json.is_empty() {
        bail!("Snapshot '{}' contains no pages", input.display());
    }
    let mut report = Report::new(MemoryPages::new(pages_json)).with_name(name.clone());

    let mut engine = ExportEngine::new(OutlineHtml::new(name)).with_options(export_options);
    let stats = engine
        .export_to_file(&mut report, output)
        .with_context(|| format!("Failed to export to '{}'", output.display()))?;

    if stats.is_empty() {
        eprintln!("No pages selected, nothing written");
    } else {
        eprintln!(
            "Exported {} page(s) to '{}' ({} empty, {} failed) in {:?}",
            stats.pages_exported,
            output.display(),
            stats.pages_skipped_empty,
            stats.pages_failed,
            stats.elapsed
        );
    }
    Ok(())
}
