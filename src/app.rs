use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::services::DrawService;

/// Application with the spawned HTTP server
///
/// Draws are read straight from disk on each request, so there are no
/// background tasks to manage besides the server itself.
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build the draw service and spawn the HTTP API server (Axum)
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        if !config.winners_dir.is_dir() {
            return Err(format!(
                "Winners directory {} does not exist",
                config.winners_dir.display()
            )
            .into());
        }

        let draw_service = DrawService::new(
            config.winners_dir.clone(),
            config.top_locations,
            config.currency(),
        );
        info!(
            "Serving draws from {} (top {} locations, {})",
            config.winners_dir.display(),
            config.top_locations,
            config.currency_code
        );

        let app_state = AppState { draw_service };
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting HTTP server on {}", addr);

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");

        Ok(Self { server_handle })
    }

    /// Run until the server stops (which runs indefinitely unless error)
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
