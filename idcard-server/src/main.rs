//! ID-Card Request Service
//!
//! Serves the marketing site, the ID-card request pipeline, the
//! contact form and the admin read path.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idcard_server::{
    load_or_generate_keypair, routes, AppState, Config, ConsoleMailer, EmailSender,
    InMemoryRequestStore, SmtpConfig, SmtpMailer, SqliteStore, UrlSigner,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idcard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    // Load or generate the upload-URL signing keypair
    let keypair = load_or_generate_keypair(&config.key_file)?;

    let signer = UrlSigner::new(
        keypair,
        config.storage.endpoint.clone(),
        config.storage.public_base.clone(),
        config.storage.bucket.clone(),
    );

    // SMTP when configured, console otherwise
    let mailer: Box<dyn EmailSender> = match SmtpConfig::from_env() {
        Some(smtp) => Box::new(SmtpMailer::new(smtp).map_err(anyhow::Error::msg)?),
        None => {
            tracing::warn!("SMTP not configured; contact mail goes to the console");
            Box::new(ConsoleMailer::new())
        }
    };

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set; the admin read path will refuse all requests");
    }

    // Create router over the configured store
    let app = match &config.database_path {
        Some(path) => {
            let store = SqliteStore::open(path)?;
            tracing::info!(path = %path, "Using SQLite store");
            let state = Arc::new(AppState::new(
                store,
                signer,
                mailer,
                config.admin_token.clone(),
                config.reject_duplicate_identifiers,
            ));
            routes::create_router_with_static_path(state, &config.static_dir)
        }
        None => {
            tracing::warn!("DATABASE_PATH not set; requests are stored in memory only");
            let state = Arc::new(AppState::new(
                InMemoryRequestStore::new(),
                signer,
                mailer,
                config.admin_token.clone(),
                config.reject_duplicate_identifiers,
            ));
            routes::create_router_with_static_path(state, &config.static_dir)
        }
    };

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("ID-card service listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
