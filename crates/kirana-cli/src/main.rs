mod analysis;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use kirana_core::{load_app_config, load_categories, Category};
use kirana_scraper::{Catalog, CatalogFetcher};

use crate::analysis::CatalogSummary;

#[derive(Debug, Parser)]
#[command(name = "kirana")]
#[command(about = "Grocery catalog fetcher: pulls paginated product listings and exports them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the given categories and write CSV/JSON exports.
    Fetch {
        /// Category slugs from the registry, e.g. `fruits dairy`.
        #[arg(short, long, num_args = 1.., required = true)]
        category: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
        format: OutputFormat,

        /// Override the configured output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured per-category page cap.
        #[arg(long)]
        max_pages: Option<usize>,

        /// Override the configured inter-request delay in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print summary statistics after fetching.
        #[arg(long)]
        analyze: bool,
    },
    /// List the categories available in the registry.
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Both,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch {
            category,
            format,
            output,
            max_pages,
            delay_ms,
            analyze,
        } => fetch(category, format, output, max_pages, delay_ms, analyze).await,
        Commands::Categories => list_categories(),
    }
}

async fn fetch(
    slugs: Vec<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    max_pages: Option<usize>,
    delay_ms: Option<u64>,
    analyze: bool,
) -> anyhow::Result<()> {
    let mut config = load_app_config().context("failed to load configuration")?;
    if let Some(max_pages) = max_pages {
        config.max_pages = max_pages;
    }
    if let Some(delay_ms) = delay_ms {
        config.min_request_interval_ms = delay_ms;
    }
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    let registry = load_categories(&config.categories_path)
        .with_context(|| format!("failed to load {}", config.categories_path.display()))?;

    let categories: Vec<Category> = slugs
        .iter()
        .map(|slug| {
            registry
                .by_slug(slug)
                .cloned()
                .with_context(|| format!("unknown category '{slug}'; see `kirana categories`"))
        })
        .collect::<anyhow::Result<_>>()?;

    let fetcher = CatalogFetcher::new(&config).context("failed to build catalog fetcher")?;
    let catalog = fetcher.fetch(&categories).await?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    write_outputs(&catalog, &categories, format, &output_dir)?;

    print_manifest(&catalog);

    if analyze {
        if let Some(summary) = CatalogSummary::from_products(&catalog.products) {
            println!("\n{}", summary.render());
        }
    }

    Ok(())
}

/// Writes one file set per category that produced at least one product.
fn write_outputs(
    catalog: &Catalog,
    categories: &[Category],
    format: OutputFormat,
    output_dir: &std::path::Path,
) -> anyhow::Result<()> {
    let stamp = Utc::now();

    for category in categories {
        let products: Vec<_> = catalog
            .products
            .iter()
            .filter(|p| p.category == category.slug)
            .cloned()
            .collect();
        if products.is_empty() {
            continue;
        }

        if matches!(format, OutputFormat::Csv | OutputFormat::Both) {
            let path = output::output_path(output_dir, &category.slug, stamp, "csv");
            output::write_csv(&products, &path)?;
        }
        if matches!(format, OutputFormat::Json | OutputFormat::Both) {
            let path = output::output_path(output_dir, &category.slug, stamp, "json");
            output::write_json(&products, &path)?;
        }
    }

    Ok(())
}

fn print_manifest(catalog: &Catalog) {
    println!("\nRun manifest:");
    for report in &catalog.manifest {
        match &report.error {
            Some(error) => println!(
                "  {}: {} products over {} pages, {} skipped, FAILED: {error}",
                report.category, report.fetched, report.pages, report.skipped
            ),
            None => println!(
                "  {}: {} products over {} pages, {} skipped",
                report.category, report.fetched, report.pages, report.skipped
            ),
        }
    }
    println!("Total products: {}", catalog.products.len());
}

fn list_categories() -> anyhow::Result<()> {
    let config = load_app_config().context("failed to load configuration")?;
    let registry = load_categories(&config.categories_path)
        .with_context(|| format!("failed to load {}", config.categories_path.display()))?;

    println!("Available categories:");
    for category in &registry.categories {
        match &category.name {
            Some(name) => println!("  {} ({name})", category.slug),
            None => println!("  {}", category.slug),
        }
    }
    println!("Total: {}", registry.categories.len());
    Ok(())
}
