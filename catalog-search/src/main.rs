//! Catalog Search Main Entry Point
//!
//! Command-line front end for the catalog product search. It provisions the
//! search index, re-indexes the catalog snapshot and runs single product
//! searches, upserts and removals against the engine.

use std::path::PathBuf;

use catalog_search::catalog::read_products_file;
use catalog_search::{CatalogSearchError, Dependencies};
use catalog_search_shared::{ProductDocument, ProductFilter, ProductId};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(author, version, about = "Catalog product search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the search index if missing and re-index the catalog snapshot
    Provision,

    /// Search products by free text
    Search(SearchArgs),

    /// Index or replace the products in a JSON file
    Upsert {
        /// JSON file holding one product or an array of products
        file: PathBuf,
    },

    /// Remove a product from the index
    Remove {
        /// Catalog product id
        id: ProductId,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Search text
    #[arg(required = true)]
    query: Vec<String>,

    /// Only return products in this category
    #[arg(long)]
    category: Option<i32>,

    /// Only return products from this brand
    #[arg(long)]
    brand: Option<i32>,
}

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_search=info,catalog_search_repository=info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        // Logs go to stderr so command output on stdout stays parseable
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "catalog-search",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CatalogSearchError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CatalogSearchError::config(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

async fn run(deps: &Dependencies, command: Commands) -> Result<(), CatalogSearchError> {
    match command {
        Commands::Provision => {
            let summary = deps.sync.startup(deps.catalog.as_ref()).await?;
            info!(
                total = summary.total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Provisioning finished"
            );
            if summary.failed > 0 {
                warn!("Some products could not be indexed");
            }
        }
        Commands::Search(args) => {
            let mut filter = ProductFilter::none();
            if let Some(category) = args.category {
                filter = filter.with_category(category);
            }
            if let Some(brand) = args.brand {
                filter = filter.with_brand(brand);
            }

            let term = args.query.join(" ");
            let products = deps.listing.list_products(Some(&term), filter).await?;
            print_json(&products)?;
        }
        Commands::Upsert { file } => {
            let products: Vec<ProductDocument> = read_products_file(&file).await?;
            for product in &products {
                deps.sync.product_updated(product).await?;
            }
            info!(count = products.len(), "Products indexed");
        }
        Commands::Remove { id } => {
            deps.sync.product_deleted(id).await?;
            info!(product_id = id, "Product removed");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CatalogSearchError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    init_tracing();

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let result = run(&deps, cli.command).await;

    if let Err(e) = deps.search.close().await {
        warn!(error = %e, "Failed to close search client");
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
