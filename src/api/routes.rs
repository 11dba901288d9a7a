use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{self, AppState};
use crate::logic::PlanetService;
use crate::store::traits::PlanetStore;

pub fn create_router<S: PlanetStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Planets
        .route(
            "/planets",
            get(handlers::list_planets::<S>).post(handlers::create_planet::<S>),
        )
        .route(
            "/planets/:id",
            get(handlers::get_planet::<S>)
                .put(handlers::update_planet::<S>)
                .delete(handlers::delete_planet::<S>),
        )
        .route(
            "/planets/name/:name",
            get(handlers::get_planet_by_name::<S>),
        )
}

/// Router with its state attached, ready to serve.
pub fn build_app<S: PlanetStore + 'static>(store: S) -> Router {
    create_router::<S>().with_state(Arc::new(PlanetService::new(store)))
}
