use analytics::AnalyticsEngine;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::{OrderRecord, ProductRecord, ReviewRecord, TimeRange};
use database::connection::{connect, run_migrations};
use database::repository::StoreRepository;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::net::{IpAddr, SocketAddr};
use uuid::Uuid;

/// The main entry point for the Shopfront analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Seed(args) => {
            let db_pool = connect().await?;
            run_migrations(&db_pool).await?;
            handle_seed(args, db_pool).await
        }
        Commands::Report(args) => {
            let db_pool = connect().await?;
            run_migrations(&db_pool).await?;
            handle_report(args, db_pool).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A storefront analytics service for a dropshipping catalog.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
    /// Populate the database with a deterministic sample catalog.
    Seed(SeedArgs),
    /// Build an analytics report and render it in the terminal.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the port configured in config.toml.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SeedArgs {
    /// Number of catalog products to create.
    #[arg(long, default_value_t = 40)]
    products: usize,

    /// Number of orders to create.
    #[arg(long, default_value_t = 200)]
    orders: usize,

    /// Number of reviews to create.
    #[arg(long, default_value_t = 120)]
    reviews: usize,
}

#[derive(Parser)]
struct ReportArgs {
    /// The reporting window (1d, 7d, 30d, 90d).
    #[arg(long, default_value = "7d")]
    time_range: TimeRange,

    /// Emit the full report as pretty-printed JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let host: IpAddr = config.server.host.parse()?;
    let port = args.port.unwrap_or(config.server.port);
    let addr = SocketAddr::new(host, port);

    web_server::run_server(addr, config.analytics.default_time_range).await
}

// ==============================================================================
// Seed Command Logic
// ==============================================================================

/// Handles the orchestration of the seeding process: generate a fixed sample
/// catalog, then insert it concurrently with a progress bar. All inserts are
/// idempotent, so re-running the command is safe.
async fn handle_seed(args: SeedArgs, db_pool: sqlx::PgPool) -> anyhow::Result<()> {
    println!(
        "Seeding {} products, {} orders and {} reviews",
        args.products, args.orders, args.reviews
    );

    let db_repo = StoreRepository::new(db_pool);

    let products = sample_products(args.products);
    let orders = sample_orders(args.orders);
    let reviews = sample_reviews(args.reviews, &products);

    // Set up the progress bar
    let total = products.len() + orders.len() + reviews.len();
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    // Products go first so review foreign keys resolve.
    progress_bar.set_message("Seeding products...");
    let tasks: Vec<_> = products
        .iter()
        .cloned()
        .map(|product| {
            let repo = db_repo.clone();
            let pb = progress_bar.clone();
            tokio::spawn(async move {
                repo.save_product(&product).await?;
                pb.inc(1);
                Ok::<(), anyhow::Error>(())
            })
        })
        .collect();
    for result in join_all(tasks).await {
        result??;
    }

    progress_bar.set_message("Seeding orders and reviews...");
    let mut tasks = Vec::new();
    for order in orders.iter().cloned() {
        let repo = db_repo.clone();
        let pb = progress_bar.clone();
        tasks.push(tokio::spawn(async move {
            repo.save_order(&order).await?;
            pb.inc(1);
            Ok::<(), anyhow::Error>(())
        }));
    }
    for review in reviews.iter().cloned() {
        let repo = db_repo.clone();
        let pb = progress_bar.clone();
        tasks.push(tokio::spawn(async move {
            repo.save_review(&review).await?;
            pb.inc(1);
            Ok::<(), anyhow::Error>(())
        }));
    }
    for result in join_all(tasks).await {
        result??;
    }

    progress_bar.finish_with_message("Seed complete!");
    tracing::info!(total, "sample catalog seeded");
    Ok(())
}

const CATEGORIES: &[&str] = &[
    "Electronics",
    "Accessories",
    "Home",
    "Outdoor",
    "Fitness",
    "Beauty",
];
const ADJECTIVES: &[&str] = &[
    "Wireless", "Portable", "Smart", "Cozy", "Compact", "Premium", "Foldable",
];
const NOUNS: &[&str] = &[
    "Headphones",
    "Charger",
    "Blanket",
    "Watch",
    "Lamp",
    "Organizer",
    "Bottle",
];
const TAG_POOL: &[&str] = &[
    "featured", "outdoor", "cozy", "fresh", "beach", "winter", "garden", "vacation",
];
const STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered"];

/// Generates a fixed product set. Identifiers and figures derive from the
/// index, so repeated runs produce the same rows.
fn sample_products(count: usize) -> Vec<ProductRecord> {
    let now = Utc::now();
    (0..count)
        .map(|i| ProductRecord {
            id: Uuid::from_u128(0x5EED_0000 + i as u128),
            title: format!(
                "{} {} {}",
                ADJECTIVES[i % ADJECTIVES.len()],
                NOUNS[i % NOUNS.len()],
                i + 1
            ),
            category: Some(CATEGORIES[i % CATEGORIES.len()].to_string()),
            price: dec!(4.99) + Decimal::from((i % 20) as u32) * dec!(5),
            sold_count: ((i * 7) % 120) as i32,
            rating: Some(3.0 + (i % 21) as f64 * 0.1),
            review_count: ((i * 3) % 40) as i32,
            profit_margin: Some(Decimal::from((10 + (i % 8) * 5) as u32)),
            tags: vec![
                TAG_POOL[i % TAG_POOL.len()].to_string(),
                TAG_POOL[(i + 3) % TAG_POOL.len()].to_string(),
            ],
            created_at: now - Duration::days(i as i64),
        })
        .collect()
}

/// Generates fixed orders spread over the trailing 90 days, attributed to a
/// small pool of repeat customers (plus the occasional guest checkout).
fn sample_orders(count: usize) -> Vec<OrderRecord> {
    let now = Utc::now();
    (0..count)
        .map(|i| OrderRecord {
            id: Uuid::from_u128(0x0DE4_0000 + i as u128),
            customer_id: if i % 9 == 0 {
                None
            } else {
                Some(Uuid::from_u128(0xC057_0000 + (i % 25) as u128))
            },
            total: dec!(15) + Decimal::from((i % 12) as u32) * dec!(7.50),
            status: STATUSES[i % STATUSES.len()].to_string(),
            created_at: now - Duration::hours(((i * 7) % (90 * 24)) as i64),
        })
        .collect()
}

/// Generates fixed reviews cycling over the seeded products.
fn sample_reviews(count: usize, products: &[ProductRecord]) -> Vec<ReviewRecord> {
    let now = Utc::now();
    (0..count)
        .filter_map(|i| {
            let product = products.get(i % products.len().max(1))?;
            Some(ReviewRecord {
                id: Uuid::from_u128(0x4E71_0000 + i as u128),
                product_id: product.id,
                rating: 2.0 + (i % 7) as f64 * 0.5,
                created_at: now - Duration::hours(((i * 11) % (90 * 24)) as i64),
            })
        })
        .collect()
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Fetches a snapshot, builds a report, and renders it in the terminal.
async fn handle_report(args: ReportArgs, db_pool: sqlx::PgPool) -> anyhow::Result<()> {
    let db_repo = StoreRepository::new(db_pool);

    let window_start = args.time_range.window_start(Utc::now());
    let products = db_repo.get_active_products().await?;
    let orders = db_repo.get_orders_since(window_start).await?;
    let reviews = db_repo.get_reviews_since(window_start).await?;

    let report = AnalyticsEngine::new().build_report(&products, &orders, &reviews, window_start);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Analytics report for the last {}", args.time_range);

    let mut overview = Table::new();
    overview.set_header(vec!["Metric", "Value"]);
    overview.add_row(vec![
        "Active products".to_string(),
        report.overview.total_products.to_string(),
    ]);
    overview.add_row(vec![
        "Orders".to_string(),
        report.overview.total_orders.to_string(),
    ]);
    overview.add_row(vec![
        "Revenue".to_string(),
        report.overview.total_revenue.to_string(),
    ]);
    overview.add_row(vec![
        "Customers".to_string(),
        report.overview.total_customers.to_string(),
    ]);
    overview.add_row(vec![
        "Average rating".to_string(),
        format!("{:.2}", report.overview.average_rating),
    ]);
    overview.add_row(vec![
        "Reviews".to_string(),
        report.overview.total_reviews.to_string(),
    ]);
    println!("{overview}");

    let mut categories = Table::new();
    categories.set_header(vec!["Category", "Products", "Revenue"]);
    for category in &report.trends.top_categories {
        categories.add_row(vec![
            category.category.clone(),
            category.count.to_string(),
            category.revenue.to_string(),
        ]);
    }
    println!("{categories}");

    if !report.recommendations.is_empty() {
        let mut recommendations = Table::new();
        recommendations.set_header(vec!["Type", "Impact", "Recommendation"]);
        for rec in &report.recommendations {
            recommendations.add_row(vec![
                format!("{:?}", rec.kind).to_lowercase(),
                format!("{:?}", rec.impact).to_lowercase(),
                format!("{}: {}", rec.title, rec.description),
            ]);
        }
        println!("{recommendations}");
    }

    Ok(())
}
