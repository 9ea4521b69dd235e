use article_api::{
    api::{AppState, create_router},
    auth::{FirebaseVerifier, IdentityVerifier},
    config::Settings,
    db::DbClient,
    repositories::ArticleRepository,
    services::ArticleService,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Article API server. Flags override the matching environment variables.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Address to bind (SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Directory of the built web app (STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut settings =
        Settings::from_env().map_err(|e| format!("Failed to load settings: {}", e))?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        settings.server.static_dir = static_dir;
    }

    tracing::info!("Starting Article API");

    let verifier = FirebaseVerifier::from_config(&settings.firebase)
        .await
        .map_err(|e| format!("Failed to initialize identity verifier: {}", e))?;
    tracing::info!(
        "Verifying ID tokens for Firebase project '{}'",
        verifier.project_id()
    );
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(verifier);

    tracing::info!("Connecting to ScyllaDB at: {:?}", settings.scylla.nodes);

    // The listener is only bound once the store is reachable.
    let db_client = DbClient::new(&settings.scylla)
        .await
        .map_err(|e| format!("Failed to connect to ScyllaDB: {}", e))?;

    tracing::info!(
        "Successfully connected to ScyllaDB, keyspace '{}'",
        db_client.keyspace()
    );

    let article_repo = ArticleRepository::new(db_client);
    let article_service = Arc::new(ArticleService::new(Arc::new(article_repo)));

    let app_state = AppState {
        article_service,
        verifier,
        static_dir: settings.server.static_dir.clone(),
    };

    // Build router
    let app = create_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(tower_http::catch_panic::CatchPanicLayer::new());

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Server is listening on {}", addr);
    tracing::info!(
        "Serving web app from {}",
        settings.server.static_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut terminate_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for Ctrl+C: {}", err);
                }
                return;
            }
        };

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(err) = res {
                    tracing::error!("Failed to listen for Ctrl+C: {}", err);
                }
            },
            _ = terminate_signal.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
        }
    }

    tracing::info!("Shutdown signal received, commencing graceful shutdown");
}
