use crate::model::{Planet, PlanetFilter, PlanetId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Planet not found")]
    NotFound,

    /// Unique, not-null or non-empty constraint rejected the write.
    #[error("{0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence boundary for planets. Nothing else talks to the store.
#[async_trait::async_trait]
pub trait PlanetStore: Send + Sync {
    async fn find_by_id(&self, id: PlanetId) -> StoreResult<Option<Planet>>;
    /// Exact, case-sensitive lookup on the unique name
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Planet>>;
    /// Insert when `planet.id` is `None`, otherwise update that row
    async fn save(&self, planet: Planet) -> StoreResult<Planet>;
    /// All planets matching `filter`, in id order
    async fn find_all(&self, filter: &PlanetFilter) -> StoreResult<Vec<Planet>>;
    async fn delete_by_id(&self, id: PlanetId) -> StoreResult<()>;
}
