use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::models::{
    DrawEntry, DrawListResponse, DrawSummary, LocationCount, LowestHolding, PrizeRecord,
    RecordView,
};
use crate::services::{DrawService, DrawServiceError};

#[derive(Clone)]
pub struct AppState {
    pub draw_service: DrawService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DrawQuery {
    /// Number of top locations to include (defaults to the configured value)
    pub top: Option<usize>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_draws, get_draw),
    components(schemas(
        HealthResponse,
        DrawListResponse,
        DrawEntry,
        DrawSummary,
        LocationCount,
        LowestHolding,
        RecordView,
        PrizeRecord
    )),
    tags((name = "draws", description = "Prize draw summaries"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi))
        .route("/draws", get(list_draws))
        .route("/draws/{name}", get(get_draw))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(generate_openapi_spec())
}

#[utoipa::path(
    get,
    path = "/api/v1/draws",
    tag = "draws",
    responses(
        (status = 200, description = "Draw files in the winners directory", body = DrawListResponse),
        (status = 500, description = "Winners directory could not be read")
    )
)]
#[instrument(skip(state))]
async fn list_draws(
    State(state): State<AppState>,
) -> Result<Json<DrawListResponse>, StatusCode> {
    debug!("Listing draws");
    let draws = state.draw_service.list_draws().await.map_err(|e| {
        error!("Failed to list draws: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Listed {} draws", draws.len());

    Ok(Json(DrawListResponse {
        total_draws: draws.len(),
        draws,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/draws/{name}",
    tag = "draws",
    params(
        ("name" = String, Path, description = "Draw file name, e.g. `March 2024.xlsx`"),
        DrawQuery
    ),
    responses(
        (status = 200, description = "Summary of the draw", body = DrawSummary),
        (status = 400, description = "Draw name is not a plain file name"),
        (status = 404, description = "No such draw"),
        (status = 500, description = "Draw file could not be read")
    )
)]
#[instrument(skip(state), fields(name = %name))]
async fn get_draw(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<DrawQuery>,
) -> Result<Json<DrawSummary>, StatusCode> {
    debug!("Fetching summary for draw {}", name);
    let summary = state
        .draw_service
        .get_draw_summary(&name, params.top)
        .await
        .map_err(|e| match e {
            DrawServiceError::NotFound(_) => {
                warn!("Draw {} not found", name);
                StatusCode::NOT_FOUND
            }
            DrawServiceError::InvalidName(_) => {
                warn!("Invalid draw name {:?}", name);
                StatusCode::BAD_REQUEST
            }
            other => {
                error!("Failed to summarize draw {}: {}", name, other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    info!(
        "Retrieved draw {} with {} records, total won: {}",
        name, summary.record_count, summary.total_money_won_display
    );

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_draw_paths() {
        let spec = generate_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v1/health"));
        assert!(spec.paths.paths.contains_key("/api/v1/draws"));
        assert!(spec.paths.paths.contains_key("/api/v1/draws/{name}"));
    }
}
