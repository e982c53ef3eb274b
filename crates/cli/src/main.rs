//! # sheetblog-cli
//!
//! Command-line reader for a blog published from a spreadsheet.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use render::Accent;
use sheetblog_core::{
    BlogError, FileStore, Post, PostCollection, PreferenceContext, Preferences, SiteConfig,
    ThemeColor, DEFAULT_RELATED_LIMIT,
};
use sheetblog_http::SheetClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sheetblog - read a blog whose posts live in a published spreadsheet
#[derive(Parser, Debug)]
#[command(name = "sheetblog")]
#[command(author, version, about = "Spreadsheet-backed blog reader", long_about = None)]
struct Cli {
    /// Published CSV export URL
    #[arg(long, env = "SHEETBLOG_CSV_URL", global = true)]
    url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short = 'f', long = "format", default_value = "table", global = true)]
    format: OutputFormat,

    /// Preference file (defaults to the user data directory)
    #[arg(long, value_name = "PATH", global = true)]
    prefs: Option<PathBuf>,

    /// Give up on the fetch after this many seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List blog posts, one page at a time
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one post or page by slug
    Show { slug: String },
    /// List posts carrying a label
    Label { name: String },
    /// List static pages
    Pages,
    /// Validate the sheet strictly and report every issue
    Check {
        /// Validate a local CSV file instead of fetching
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Write published records as CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change reader preferences
    Prefs {
        /// Use dark mode
        #[arg(long, conflicts_with = "light")]
        dark: bool,
        /// Use light mode
        #[arg(long)]
        light: bool,
        /// Accent color (blue, red, green, purple, orange, pink, emerald, slate)
        #[arg(long)]
        color: Option<ThemeColor>,
        /// Grid columns (1-3)
        #[arg(long)]
        columns: Option<u8>,
    },
}

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Terminal view (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = site_config(&cli)?;
    let prefs_path = cli.prefs.clone().unwrap_or_else(default_prefs_path);
    let loaded = PreferenceContext::load(FileStore::new(&prefs_path), false);
    let current = match &loaded {
        Ok(ctx) => ctx.preferences(),
        Err(e) => {
            tracing::warn!(error = %e, "using default preferences");
            Preferences::default()
        }
    };
    let accent = Accent::from_preferences(&current);
    let columns = current.columns;

    match cli.command {
        Command::Prefs {
            dark,
            light,
            color,
            columns,
        } => {
            let mut prefs = loaded.with_context(|| {
                format!("Failed to read preferences: {}", prefs_path.display())
            })?;
            if dark || light {
                prefs.set_dark_mode(dark)?;
            }
            if let Some(color) = color {
                prefs.set_theme_color(color)?;
            }
            if let Some(columns) = columns {
                prefs.set_columns(columns)?;
            }
            let current = prefs.preferences();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&current)?),
                OutputFormat::Csv | OutputFormat::Table => {
                    println!("dark mode: {}", current.dark_mode);
                    println!("color:     {}", current.theme_color);
                    println!("columns:   {}", current.columns);
                    println!("file:      {}", prefs_path.display());
                }
            }
        }
        Command::Check { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?,
                None => client(&config)?
                    .fetch_csv()
                    .await
                    .context("Failed to fetch sheet")?,
            };
            let issues = sheetblog_sheet::validate_document(&text);
            print!("{}", render::issues_view(&issues));
            if !issues.is_empty() {
                std::process::exit(1);
            }
        }
        Command::List { page } => {
            let posts = load(&config).await;
            let page = posts.paginate(page, config.posts_per_page);
            match cli.format {
                OutputFormat::Table => print!(
                    "{}",
                    render::list_view(&config.site_name, &page, columns, accent)
                ),
                _ => print_posts(&page.items, cli.format)?,
            }
        }
        Command::Show { slug } => {
            let posts = load(&config).await;
            let Some(post) = posts.find_by_slug(&slug) else {
                return Err(BlogError::NotFound(slug).into());
            };
            let related = posts.related(post, DEFAULT_RELATED_LIMIT);
            match cli.format {
                OutputFormat::Table => print!("{}", render::detail_view(post, &related, accent)),
                _ => print_posts(&[post], cli.format)?,
            }
        }
        Command::Label { name } => {
            let posts = load(&config).await;
            let tagged = posts.with_label(&name);
            match cli.format {
                OutputFormat::Table => {
                    print!("{}", render::label_view(&name, &tagged, columns, accent));
                }
                _ => print_posts(&tagged, cli.format)?,
            }
        }
        Command::Pages => {
            let posts = load(&config).await;
            let pages = posts.pages();
            match cli.format {
                OutputFormat::Table => print!("{}", render::page_index(&pages, accent)),
                _ => print_posts(&pages, cli.format)?,
            }
        }
        Command::Export { output } => {
            let posts = load(&config).await;
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create file: {}", path.display()))?;
                    sheetblog_sheet::write_csv(posts.as_slice(), std::io::BufWriter::new(file))?;
                    eprintln!("Wrote {} records to {}", posts.len(), path.display());
                }
                None => print!("{}", sheetblog_sheet::to_csv_string(posts.as_slice())?),
            }
        }
    }

    Ok(())
}

/// Environment-derived config with command-line overrides.
fn site_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::from_env().context("Invalid environment configuration")?;
    if let Some(url) = &cli.url {
        config = config.with_csv_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }
    Ok(config)
}

fn client(config: &SiteConfig) -> Result<SheetClient> {
    SheetClient::from_config(config).context("Failed to create HTTP client")
}

/// Fetch the collection. Failures are logged and produce an empty collection.
async fn load(config: &SiteConfig) -> PostCollection {
    tracing::debug!(url = %config.csv_url, "loading posts");
    PostCollection::new(sheetblog_http::load_posts(config).await)
}

/// Get the preference file path.
fn default_prefs_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|mut p| {
            p.push("sheetblog");
            p.push("preferences.json");
            p
        })
        .unwrap_or_else(|| PathBuf::from("sheetblog-preferences.json"))
}

/// Print records as JSON or CSV.
fn print_posts(posts: &[&Post], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(posts)?),
        OutputFormat::Csv | OutputFormat::Table => {
            let mut buffer = Vec::new();
            sheetblog_sheet::write_csv(posts.iter().copied(), &mut buffer)?;
            print!("{}", String::from_utf8_lossy(&buffer));
        }
    }
    Ok(())
}
