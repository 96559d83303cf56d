use clap::{Parser, Subcommand};

use publixad_connector::{SaleConnector, SaleFilter, StoreConfig, StoreConnector, WeeklyAdClient};

const USER_AGENT: &str = "publixad/0.1 (weekly-ad-connector)";

#[derive(Debug, Parser)]
#[command(name = "publixad")]
#[command(about = "Publix weekly-ad connector command line interface")]
struct Cli {
    /// HTTP timeout in seconds for requests to the weekly-ad site.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up stores near a ZIP code.
    Stores {
        #[arg(long)]
        zip: String,

        /// Parse raw store addresses into components via geocod.io.
        /// Has no effect without an API key.
        #[arg(long)]
        parse_addresses: bool,

        /// geocod.io API key.
        #[arg(long, env = "GEOCODIO_API_KEY")]
        geocodio_api_key: Option<String>,
    },
    /// List on-sale products for a store.
    Sales {
        #[arg(long)]
        store_id: String,

        /// Department names to query (comma-separated). Queries every
        /// department when omitted.
        #[arg(long, value_delimiter = ',')]
        departments: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = WeeklyAdClient::new(cli.timeout_secs, USER_AGENT)?;

    match cli.command {
        Commands::Stores {
            zip,
            parse_addresses,
            geocodio_api_key,
        } => {
            let config = StoreConfig {
                parse_addresses,
                geocodio_api_key,
            };
            let connector = StoreConnector::new(client, config)?;
            let stores = connector.get_stores(&zip).await?;
            println!("{}", serde_json::to_string_pretty(&stores)?);
        }
        Commands::Sales {
            store_id,
            departments,
        } => {
            let connector = SaleConnector::new(client);
            let sales = connector
                .get_sales(&store_id, &SaleFilter { departments })
                .await;
            println!("{}", serde_json::to_string_pretty(&sales)?);
        }
    }

    Ok(())
}
