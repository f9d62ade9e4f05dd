use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;

use super::domain::{BuildItem, HeroId, RecommendationRequest};
use super::repository::BuildRepository;
use super::service::{AdvisorError, AdvisorService};

/// Router builder exposing recommendation and build list endpoints.
pub fn advisor_router<R>(service: Arc<AdvisorService<R>>) -> Router
where
    R: BuildRepository + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<R>))
        .route(
            "/api/v1/builds/:hero_id",
            get(build_handler::<R>).delete(clear_build_handler::<R>),
        )
        .route(
            "/api/v1/builds/:hero_id/items",
            post(add_item_handler::<R>),
        )
        .route(
            "/api/v1/builds/:hero_id/items/:item_id",
            delete(remove_item_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: BuildRepository + 'static,
{
    match service.recommend(request) {
        Ok(output) => (StatusCode::OK, axum::Json(output)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn build_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(hero_id): Path<String>,
) -> Response
where
    R: BuildRepository + 'static,
{
    match service.build(&HeroId(hero_id)) {
        Ok(build) => (StatusCode::OK, axum::Json(build)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn add_item_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(hero_id): Path<String>,
    axum::Json(item): axum::Json<BuildItem>,
) -> Response
where
    R: BuildRepository + 'static,
{
    match service.add_item(&HeroId(hero_id), item) {
        Ok(build) => (StatusCode::OK, axum::Json(build)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_item_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path((hero_id, item_id)): Path<(String, String)>,
) -> Response
where
    R: BuildRepository + 'static,
{
    match service.remove_item(&HeroId(hero_id), &item_id) {
        Ok(build) => (StatusCode::OK, axum::Json(build)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clear_build_handler<R>(
    State(service): State<Arc<AdvisorService<R>>>,
    Path(hero_id): Path<String>,
) -> Response
where
    R: BuildRepository + 'static,
{
    match service.clear_build(&HeroId(hero_id)) {
        Ok(build) => (StatusCode::OK, axum::Json(build)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AdvisorError) -> Response {
    let status = match err {
        AdvisorError::InvalidBuildItem => StatusCode::UNPROCESSABLE_ENTITY,
        AdvisorError::Build(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
