use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::{MongoDb, PostStore, QuoteClient};
use axum::{
    routing::{get, put},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn PostStore>,
    pub quotes: QuoteClient,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Wire the real collaborators: the hosted document store and the external
    /// quote service named in the configuration.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        let quotes = QuoteClient::new(config.quote_api.url.as_str());

        Self::with_dependencies(config, Arc::new(db), quotes).await
    }

    /// Assemble the server around injected collaborators. Tests use this to
    /// substitute store and upstream doubles.
    pub async fn with_dependencies(
        config: AppConfig,
        store: Arc<dyn PostStore>,
        quotes: QuoteClient,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
            quotes,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/posts",
                get(handlers::list_posts).post(handlers::create_post),
            )
            .route(
                "/posts/:id",
                put(handlers::replace_post).delete(handlers::delete_post),
            )
            .route("/motive", get(handlers::get_motive))
            .layer(TraceLayer::new_for_http())
            // Any origin may call this API, mirroring its public read-write use
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on port {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
