use anyhow::{Context, Result};
use autobnb::config::{
    ClientConfig, ServerConfig, DEFAULT_GENERATE_QUERY_ENDPOINT, DEFAULT_PREVIEW_ENDPOINT,
    DEFAULT_SEARCH_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};
use autobnb::models::{PreviewState, SearchPreferences};
use autobnb::search::{build, HttpSearchClient, SearchSession, SearchState};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autobnb", version, about = "Travel-search query builder and submitter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the search request built from the given preferences
    Query(PrefsArgs),
    /// Build a request, submit it and print the listings
    Search {
        #[command(flatten)]
        prefs: PrefsArgs,
        #[command(flatten)]
        client: ClientArgs,
        /// Also fetch preview images for each listing
        #[arg(long)]
        previews: bool,
        /// Save the listings as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask the backend for an example query
    Example {
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Run the echo backend stub
    Serve {
        #[arg(long, env = "AUTOBNB_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, env = "AUTOBNB_PORT", default_value_t = 5001)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct ClientArgs {
    /// Search endpoint
    #[arg(long, env = "AUTOBNB_SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT)]
    search_endpoint: String,
    /// Example query endpoint
    #[arg(long, env = "AUTOBNB_GENERATE_QUERY_ENDPOINT", default_value = DEFAULT_GENERATE_QUERY_ENDPOINT)]
    generate_query_endpoint: String,
    /// Preview endpoint
    #[arg(long, env = "AUTOBNB_PREVIEW_ENDPOINT", default_value = DEFAULT_PREVIEW_ENDPOINT)]
    preview_endpoint: String,
    /// Request timeout in seconds
    #[arg(
        long,
        env = "AUTOBNB_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,
}

impl From<ClientArgs> for ClientConfig {
    fn from(args: ClientArgs) -> Self {
        Self {
            search_endpoint: args.search_endpoint,
            generate_query_endpoint: args.generate_query_endpoint,
            preview_endpoint: args.preview_endpoint,
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}

#[derive(Args, Debug)]
struct PrefsArgs {
    /// Preferences as a JSON file; other preference flags are ignored when set
    #[arg(long)]
    prefs: Option<PathBuf>,
    #[arg(short, long, default_value = "")]
    location: String,
    /// YYYY-MM-DD
    #[arg(long)]
    check_in: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    check_out: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    #[arg(long, default_value_t = 0)]
    infants: u32,
    #[arg(long, default_value_t = 0)]
    pets: u32,
    #[arg(long)]
    price_min: Option<u32>,
    #[arg(long)]
    price_max: Option<u32>,
    #[arg(long, default_value_t = 1)]
    bedrooms: u32,
    #[arg(long, default_value_t = 1)]
    bathrooms: u32,
    /// Repeatable, e.g. --amenity WiFi --amenity "Free Parking"
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Free-text notes passed along with the preferences
    #[arg(long)]
    info: Option<String>,
}

impl PrefsArgs {
    async fn into_preferences(self) -> Result<SearchPreferences> {
        if let Some(path) = self.prefs {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("Invalid preferences in {}", path.display()));
        }

        let mut prefs = SearchPreferences::new(self.location);
        prefs.check_in = self.check_in;
        prefs.check_out = self.check_out;
        prefs.guests.adults = self.adults;
        prefs.guests.children = self.children;
        prefs.guests.infants = self.infants;
        prefs.guests.pets = self.pets;
        prefs.price_min = self.price_min;
        prefs.price_max = self.price_max;
        prefs.bedrooms = self.bedrooms;
        prefs.bathrooms = self.bathrooms;
        prefs.amenities = self.amenities.into_iter().collect();
        prefs.additional_info = self.info;
        Ok(prefs)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Query(prefs) => {
            let prefs = prefs.into_preferences().await?;
            let request = build(&prefs)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Search {
            prefs,
            client,
            previews,
            output,
        } => {
            let prefs = prefs.into_preferences().await?;
            run_search(prefs, client.into(), previews, output).await?;
        }
        Command::Example { client } => {
            let client = HttpSearchClient::with_config(client.into())?;
            let example = client.example_query().await?;
            println!("{example}");
        }
        Command::Serve { host, port } => {
            autobnb::server::serve(&ServerConfig { host, port }).await?;
        }
    }

    Ok(())
}

async fn run_search(
    prefs: SearchPreferences,
    config: ClientConfig,
    previews: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    info!("🏠 AutoBnb search");
    info!("==========================================");

    let client = HttpSearchClient::with_config(config)?;
    let mut session = SearchSession::new(client.clone());

    if let SearchState::Failed(e) = session.search(&prefs).await {
        anyhow::bail!("{e}");
    }

    if previews {
        if let Some(items) = session.results_mut() {
            client.load_previews(items).await;
        }
    }

    let items = session.state().results().unwrap_or_default();
    info!("✅ Found {} matching listings", items.len());

    for (i, item) in items.iter().enumerate() {
        println!("{}. Listing {}", i + 1, i + 1);
        println!("   URL: {}", item.url);
        if let Some(summary) = &item.summary {
            println!("   {}", summary);
        }
        match &item.preview {
            PreviewState::Loaded(images) => println!("   Previews: {}", images.join(", ")),
            PreviewState::Failed(reason) => println!("   Preview unavailable: {}", reason),
            PreviewState::NotRequested => {}
        }
        println!();
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} listings to {}", items.len(), path.display());
    }

    Ok(())
}
