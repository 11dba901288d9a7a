use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::logic::PlanetService;
use crate::model::{NewPlanet, Planet, PlanetId};
use crate::store::traits::PlanetStore;

pub type AppState<S> = Arc<PlanetService<S>>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PlanetListQuery {
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

/// POST /planets
pub async fn create_planet<S: PlanetStore>(
    State(service): State<AppState<S>>,
    payload: Result<RequestJson<NewPlanet>, JsonRejection>,
) -> Result<(StatusCode, Json<Planet>), ApiError> {
    let RequestJson(new_planet) = payload?;
    let planet = new_planet.into_planet()?;

    let created = service.create(planet).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /planets/{id}
pub async fn get_planet<S: PlanetStore>(
    State(service): State<AppState<S>>,
    Path(id): Path<PlanetId>,
) -> Result<Json<Planet>, ApiError> {
    match service.get(id).await? {
        Some(planet) => Ok(Json(planet)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /planets/name/{name}
pub async fn get_planet_by_name<S: PlanetStore>(
    State(service): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<Planet>, ApiError> {
    match service.get_by_name(&name).await? {
        Some(planet) => Ok(Json(planet)),
        None => Err(ApiError::NotFound),
    }
}

/// GET /planets?climate=&terrain=
pub async fn list_planets<S: PlanetStore>(
    State(service): State<AppState<S>>,
    Query(query): Query<PlanetListQuery>,
) -> Result<Json<Vec<Planet>>, ApiError> {
    let planets = service.list(query.climate, query.terrain).await?;
    Ok(Json(planets))
}

/// PUT /planets/{id}
pub async fn update_planet<S: PlanetStore>(
    State(service): State<AppState<S>>,
    Path(id): Path<PlanetId>,
    payload: Result<RequestJson<NewPlanet>, JsonRejection>,
) -> Result<Json<Planet>, ApiError> {
    let RequestJson(new_planet) = payload?;
    let planet = new_planet.into_planet()?;

    let updated = service.update(id, planet).await?;
    Ok(Json(updated))
}

/// DELETE /planets/{id}
pub async fn delete_planet<S: PlanetStore>(
    State(service): State<AppState<S>>,
    Path(id): Path<PlanetId>,
) -> Result<StatusCode, ApiError> {
    if let Err(e) = service.remove(id).await {
        log::warn!("Failed to remove planet {}: {}", id, e);
        return Err(e.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
