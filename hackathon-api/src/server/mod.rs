// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use self::handlers::{analytics, data, health, nosql, submissions, workshops};
use self::state::AppState;
use crate::config::create_cors_layer;

/// Create the Axum application router with all routes and middleware.
///
/// Static segments (`events`, `participants`, `by-event`) are matched before
/// the `:id` captures on the same level.
pub fn create_app(state: AppState) -> Router {
    let submission_routes = Router::new()
        .route(
            "/",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route("/events/available", get(submissions::available_events))
        .route("/participants", get(submissions::list_participants))
        .route("/participants/:event_id", get(submissions::event_participants))
        .route(
            "/:id",
            get(submissions::get_submission).delete(submissions::delete_submission),
        );

    let workshop_routes = Router::new()
        .route(
            "/",
            get(workshops::list_workshops).post(workshops::create_workshop),
        )
        .route("/events", get(workshops::list_events))
        .route("/by-event/:event_id", get(workshops::workshops_by_event))
        .route(
            "/:event_id/:workshop_number",
            get(workshops::get_workshop)
                .put(workshops::update_workshop)
                .delete(workshops::delete_workshop),
        );

    let analytics_routes = Router::new()
        .route("/submissions", get(analytics::submission_activity))
        .route("/registrations", get(analytics::registration_overview))
        .route("/workshops", get(analytics::workshop_overview))
        .route("/summary", get(analytics::summary));

    let data_routes = Router::new()
        .route("/import", post(data::import_data))
        .route("/stats", get(data::table_stats));

    let nosql_routes = Router::new()
        .route("/migrate", post(nosql::migrate))
        .route("/stats", get(nosql::stats))
        .route(
            "/workshops",
            get(nosql::list_workshops).post(nosql::create_workshop),
        )
        .route("/workshops/events", get(nosql::list_events))
        .route(
            "/workshops/:event_id/:workshop_number",
            get(nosql::get_workshop)
                .put(nosql::update_workshop)
                .delete(nosql::delete_workshop),
        )
        .route("/indexes/create", post(nosql::create_indexes))
        .route("/indexes/list", get(nosql::list_indexes))
        .route("/analytics/workshops", get(nosql::workshop_analytics))
        .route(
            "/analytics/workshops/explain",
            get(nosql::explain_workshop_analytics),
        );

    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/submissions", submission_routes)
        .nest("/api/workshops", workshop_routes)
        .nest("/api/analytics", analytics_routes)
        .nest("/api/data", data_routes)
        .nest("/api/nosql", nosql_routes)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address until Ctrl+C or SIGTERM.
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- Health endpoint: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
