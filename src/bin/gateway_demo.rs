use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use cardarena_client::{ApiGateway, GatewayConfig, Session};

const LOG_TARGET: &str = "bin::gateway_demo";

#[derive(Debug, Parser)]
#[command(name = "gateway_demo")]
#[command(about = "Fetch the public game list and favorite decks through the gateway", long_about = None)]
struct Args {
    /// Development cluster base URL (trailing slash)
    #[arg(long, env = "GATEWAY_DEV_URL")]
    dev_url: String,

    /// Beta cluster base URL (trailing slash)
    #[arg(long, env = "GATEWAY_BETA_URL")]
    beta_url: String,

    /// Production cluster base URL (trailing slash)
    #[arg(long, env = "GATEWAY_LIVE_URL")]
    live_url: String,

    /// Route the zero sentinel and the game list through local development
    #[arg(long, env = "GATEWAY_DEV_MODE", default_value_t = false)]
    dev_mode: bool,

    /// Toggle structured (JSON) logs
    #[arg(long, env = "GATEWAY_LOG_JSON", default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let args = Args::parse();
    init_tracing(args.json);

    let config = build_config(&args).context("failed to build gateway config")?;
    let (gateway, mut toasts) =
        ApiGateway::with_toast_channel(config, Session::new()).context("failed to build gateway")?;

    tokio::spawn(async move {
        while let Ok(note) = toasts.recv().await {
            warn!(target = LOG_TARGET, toast = %note, "server-side rejection");
        }
    });

    let games = gateway.get_game_list();
    let decks = gateway.get_favorite_decks();
    let (games, decks) = futures::join!(games.outcome(), decks.outcome());

    match games {
        Ok(list) => info!(
            target = LOG_TARGET,
            open = list.open_games.len(),
            in_progress = list.games_in_progress.len(),
            "game list fetched"
        ),
        Err(err) => warn!(target = LOG_TARGET, error = %err, "game list fetch failed"),
    }

    match decks {
        Ok(decks) => info!(
            target = LOG_TARGET,
            favorites = decks.favorite_decks.len(),
            "favorite decks fetched"
        ),
        Err(err) => warn!(target = LOG_TARGET, error = %err, "favorite decks fetch failed"),
    }

    Ok(())
}

fn load_dotenv() {
    let manifest_env = env!("CARGO_MANIFEST_DIR");
    let manifest_env_path = PathBuf::from(manifest_env).join(".env");
    dotenv::from_filename(manifest_env_path).ok();
    dotenv::dotenv().ok();
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::fmt().with_env_filter(filter).with_target(false);

    if json {
        builder.json().flatten_event(true).init();
    } else {
        builder.compact().init();
    }
}

fn build_config(args: &Args) -> Result<GatewayConfig> {
    let dev_base = Url::parse(&args.dev_url).context("invalid GATEWAY_DEV_URL")?;
    let beta_base = Url::parse(&args.beta_url).context("invalid GATEWAY_BETA_URL")?;
    let live_base = Url::parse(&args.live_url).context("invalid GATEWAY_LIVE_URL")?;

    let mut config = GatewayConfig::new(dev_base, beta_base, live_base);
    config.dev_mode = args.dev_mode;
    config.validate()?;
    Ok(config)
}
