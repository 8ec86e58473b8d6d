use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use research_rank::config::{
    default_config_path, find_config_file, get_config, load_config, write_default_config, Config,
    LoggingConfig,
};
use research_rank::dashboard::{Dashboard, DashboardError};
use research_rank::models::Dataset;
use research_rank::print_status;
use research_rank::ui;
use research_rank::utils::{is_terminal, terminal_width};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Rank - Rank research institutions by fractional paper contribution
#[derive(Parser, Debug)]
#[command(name = "research-rank")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Rank research institutions by fractional paper contribution", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only rank papers in this field (repeatable; default: every field in the dataset)
    #[arg(long = "field", global = true, value_name = "FIELD")]
    fields: Vec<String>,

    /// Select no fields at all (produces an empty ranking)
    #[arg(long, global = true, conflicts_with = "fields")]
    no_fields: bool,

    /// Never use the journal/venue name as a pseudo-institution
    #[arg(long, global = true)]
    no_venue_fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self) -> Self {
        match self {
            OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
            OutputFormat::Auto => OutputFormat::Json,
            other => other,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the institution ranking table
    #[command(alias = "r")]
    Rank {
        /// Paper dataset (JSON)
        dataset: PathBuf,

        /// Page to show (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Rows per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show the ranked contribution bar chart
    #[command(alias = "c")]
    Chart {
        /// Paper dataset (JSON)
        dataset: PathBuf,

        /// Page to show (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,
    },

    /// Show authors and fields behind one institution's contribution
    #[command(alias = "i")]
    Institution {
        /// Paper dataset (JSON)
        dataset: PathBuf,

        /// Institution name (case-insensitive)
        name: String,
    },

    /// List the fields of study in a dataset
    #[command(alias = "f")]
    Fields {
        /// Paper dataset (JSON)
        dataset: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Target path (default: the per-user config location)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_path) = load_settings(cli.config.as_deref())?;
    init_tracing(cli.verbose, cli.quiet, &config.logging);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    if cli.no_venue_fallback {
        config.extraction.venue_fallback = false;
    }

    let format = cli.output.resolve();
    let colored = format == OutputFormat::Table && is_terminal();

    match cli.command {
        Commands::Rank {
            dataset,
            page,
            page_size,
        } => {
            if let Some(size) = page_size {
                config.display.table_page_size = size;
            }
            let mut dashboard = open_dashboard(&dataset, &config, &cli.fields, cli.no_fields)?;
            dashboard.go_to_table_page(page.saturating_sub(1));

            let pagination = *dashboard.table_pagination();
            let first_rank = pagination.range().start + 1;
            let rows = dashboard.table_rows();

            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "page": pagination.page() + 1,
                    "totalPages": pagination.total_pages(),
                    "includedPapers": dashboard.report().included_papers,
                    "excludedPapers": dashboard.report().excluded_papers,
                    "ranking": rows,
                }))?,
                OutputFormat::Plain => {
                    if !rows.is_empty() {
                        println!("{}", ui::ranking_plain(rows, first_rank));
                    }
                }
                _ => {
                    if !cli.quiet {
                        ui::print_section("Institution ranking", colored);
                        println!("{}", ui::summary(dashboard.report(), &dashboard.filter()));
                        println!(
                            "{}",
                            ui::samples(dashboard.unique_fields(), dashboard.report())
                        );
                    }
                    println!("{}", ui::ranking_table(rows, first_rank, terminal_width()));
                    if pagination.total_pages() > 1 {
                        println!(
                            "{}",
                            ui::page_links(&pagination, dashboard.display().page_links)
                        );
                    }
                }
            }
        }

        Commands::Chart { dataset, page } => {
            let mut dashboard = open_dashboard(&dataset, &config, &cli.fields, cli.no_fields)?;
            dashboard.go_to_chart_page(page.saturating_sub(1));
            let chart = dashboard.chart_page();

            match format {
                OutputFormat::Json => print_json(&chart)?,
                _ => {
                    let label_width = terminal_width().saturating_sub(24).clamp(20, 80);
                    println!(
                        "{}",
                        ui::chart(&chart, dashboard.display().bar_width, label_width, colored)
                    );
                    if chart.total_pages > 1 {
                        println!(
                            "{}",
                            ui::page_links(
                                dashboard.chart_pagination(),
                                dashboard.display().page_links
                            )
                        );
                    }
                }
            }
        }

        Commands::Institution { dataset, name } => {
            let mut dashboard = open_dashboard(&dataset, &config, &cli.fields, cli.no_fields)?;

            match dashboard.select_institution(&name) {
                Ok(_) => {}
                Err(DashboardError::UnknownInstitution { name, suggestions }) => {
                    print_status!(
                        ui::Status::Error,
                        format!("Institution '{}' is not in the current ranking", name)
                    );
                    if !suggestions.is_empty() {
                        eprintln!("Did you mean:");
                        for suggestion in &suggestions {
                            eprintln!("  {}", suggestion);
                        }
                    }
                    bail!("Unknown institution: {}", name);
                }
            }

            let Some(detail) = dashboard.detail() else {
                bail!("No institution selected");
            };

            match format {
                OutputFormat::Json => print_json(&detail)?,
                _ => println!(
                    "{}",
                    ui::detail(&detail, dashboard.display().top_fields, colored)
                ),
            }
        }

        Commands::Fields { dataset } => {
            let dashboard = open_dashboard(&dataset, &config, &cli.fields, cli.no_fields)?;
            let counts = dashboard.field_paper_counts();
            let selection = dashboard.selection();

            match format {
                OutputFormat::Json => {
                    let fields: Vec<_> = selection
                        .available()
                        .iter()
                        .map(|field| {
                            serde_json::json!({
                                "field": field,
                                "papers": counts.get(field).copied().unwrap_or_default(),
                                "selected": selection.is_selected(field),
                            })
                        })
                        .collect();
                    print_json(&fields)?;
                }
                OutputFormat::Plain => {
                    for field in selection.available() {
                        println!("{}\t{}", field, counts.get(field).copied().unwrap_or_default());
                    }
                }
                _ => {
                    if !cli.quiet {
                        ui::print_section("Fields of study", colored);
                    }
                    println!("{}", ui::fields_table(selection, &counts));
                }
            }
        }

        Commands::InitConfig { path, force } => {
            let path = path
                .or_else(default_config_path)
                .context("No config directory available on this platform; pass a path")?;
            write_default_config(&path, force)
                .with_context(|| format!("Failed to write config file {}", path.display()))?;
            if !cli.quiet {
                print_status!(
                    ui::Status::Success,
                    format!("Wrote default configuration to {}", path.display())
                );
            }
        }
    }

    Ok(())
}

/// Load configuration from an explicit file, a default location, or the
/// environment alone
fn load_settings(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let path = explicit.map(Path::to_path_buf).or_else(find_config_file);
    match path {
        Some(path) => {
            let config = load_config(&path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            Ok((config, Some(path)))
        }
        None => Ok((
            get_config().context("Invalid configuration in environment")?,
            None,
        )),
    }
}

fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("research_rank={}", level)),
    );
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_dashboard(
    path: &Path,
    config: &Config,
    fields: &[String],
    no_fields: bool,
) -> Result<Dashboard> {
    let dataset = Dataset::load(path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    let mut dashboard = Dashboard::from_config(&dataset, config);

    if no_fields {
        dashboard.clear_fields();
    } else if !fields.is_empty() {
        let unknown = dashboard.select_fields(fields);
        if unknown.len() == fields.len() {
            tracing::warn!("None of the requested fields occur in the dataset");
        }
    }

    Ok(dashboard)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
