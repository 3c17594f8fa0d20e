use clap::Parser;
use fontsheet::{
    EARLY_ACCESS_ROUTE, ICONS_ROUTE, build_router,
    config::Config,
    state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "fontsheet", version, about = "Web font stylesheet API")]
struct Cli {
    /// Config file to load instead of config/default.toml
    #[arg(short, long, env = "FONTSHEET_CONFIG")]
    config: Option<String>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    tracing::info!("Starting fontsheet...");

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!("Configuration loaded (upstream {})", config.upstream.base_url);

    let api_key = Config::api_key();
    if api_key.is_none() {
        tracing::warn!("FONTSHEET_API_KEY is not set; cache invalidation is disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::from_config(&config, api_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize service: {}", e))?;
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("fontsheet listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET    {}?stylesheet=&ver=", EARLY_ACCESS_ROUTE);
    tracing::info!("  - GET    {}?stylesheet=&ver=", ICONS_ROUTE);
    tracing::info!("  - DELETE {} (API key)", EARLY_ACCESS_ROUTE);
    tracing::info!("  - DELETE {} (API key)", ICONS_ROUTE);
    tracing::info!("  - GET    /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fontsheet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
