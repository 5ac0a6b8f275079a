mod fetch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopintel-cli")]
#[command(about = "Storefront insights command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a storefront and print its brand context as JSON
    Fetch {
        /// Storefront root URL, e.g. https://memy.co.in
        url: String,

        /// Also discover and scrape up to three competitor storefronts
        #[arg(long)]
        competitors: bool,

        /// Store the results in the database
        #[arg(long)]
        persist: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so fetch output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Fetch {
            url,
            competitors,
            persist,
        }) => {
            let options = fetch::FetchOptions {
                competitors,
                persist,
            };
            fetch::run_fetch(&config, &url, options).await?;
        }
        Some(Commands::Migrate) => {
            let pool = connect(&config).await?;
            let applied = shopintel_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        None => println!("shopintel-cli: try `shopintel-cli fetch <url>`"),
    }

    Ok(())
}

pub(crate) async fn connect(config: &shopintel_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = shopintel_db::PoolConfig::from_app_config(config);
    Ok(shopintel_db::connect_pool(&config.database_url, pool_config).await?)
}
