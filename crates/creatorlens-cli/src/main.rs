use clap::{Parser, Subcommand};

use creatorlens_core::{validate_username, Platform, StandardizedProfile};
use creatorlens_providers::ProviderManager;

#[derive(Debug, Parser)]
#[command(name = "creatorlens-cli")]
#[command(about = "CreatorLens command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a creator profile through the provider fallback chain.
    Lookup {
        /// One of: instagram, tiktok, youtube.
        platform: Platform,
        /// Creator handle; a leading @ is accepted and stripped.
        username: String,
        /// Adapter to try first; unknown names fall back to default order.
        #[arg(long)]
        provider: Option<String>,
        /// Print the full profile as pretty JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Show every configured provider adapter and its priority.
    Providers,
    /// Check which adapters are currently available.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = creatorlens_core::load_app_config()?;
    let manager = ProviderManager::from_config(&config)?;

    match cli.command {
        Commands::Lookup {
            platform,
            username,
            provider,
            json,
        } => {
            let username = validate_username(&username)?;
            let profile = manager
                .fetch_profile(username, platform, provider.as_deref())
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{}", summarize(&profile));
            }
        }
        Commands::Providers => {
            for status in manager.providers_status() {
                let platforms: Vec<&str> = status
                    .supported_platforms
                    .iter()
                    .map(|p| p.as_str())
                    .collect();
                println!(
                    "{:<16} priority={:<3} available={:<5} platforms={}",
                    status.name,
                    status.priority,
                    status.available,
                    platforms.join(",")
                );
            }
        }
        Commands::Health => {
            for (name, available) in manager.health_check() {
                println!("{name}: {}", if available { "ok" } else { "unavailable" });
            }
        }
    }

    Ok(())
}

fn summarize(profile: &StandardizedProfile) -> String {
    format!(
        "@{} ({}) on {} via {}\n  followers: {}  following: {}  engagement: {:.2}%\n  verified: {}  url: {}",
        profile.username,
        if profile.name.is_empty() {
            "unknown"
        } else {
            &profile.name
        },
        profile.platform,
        profile.provider_source,
        profile.followers,
        profile.following_count,
        profile.engagement_rate,
        profile.is_verified,
        profile.url,
    )
}
