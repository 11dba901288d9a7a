use crate::model::{Planet, PlanetFilter, PlanetId};
use crate::store::traits::{PlanetStore, StoreError, StoreResult};

/// Planet operations on top of a [`PlanetStore`].
///
/// Store errors are passed through untouched; translating them is the HTTP
/// layer's job.
pub struct PlanetService<S> {
    store: S,
}

impl<S: PlanetStore> PlanetService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a new planet. Any id on the input is discarded.
    pub async fn create(&self, planet: Planet) -> StoreResult<Planet> {
        let created = self.store.save(Planet { id: None, ..planet }).await?;
        log::info!("Created planet {:?} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn get(&self, id: PlanetId) -> StoreResult<Option<Planet>> {
        self.store.find_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> StoreResult<Option<Planet>> {
        self.store.find_by_name(name).await
    }

    /// List planets, treating empty or absent arguments as wildcards.
    pub async fn list(
        &self,
        climate: Option<String>,
        terrain: Option<String>,
    ) -> StoreResult<Vec<Planet>> {
        let filter = PlanetFilter::new(climate, terrain);
        self.store.find_all(&filter).await
    }

    /// Replace the fields of an existing planet.
    pub async fn update(&self, id: PlanetId, planet: Planet) -> StoreResult<Planet> {
        let updated = self
            .store
            .save(Planet {
                id: Some(id),
                ..planet
            })
            .await?;
        log::info!("Updated planet {} ({})", id, updated.name);
        Ok(updated)
    }

    /// Delete a planet, failing with `NotFound` when no such id exists.
    pub async fn remove(&self, id: PlanetId) -> StoreResult<()> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(StoreError::NotFound);
        }

        self.store.delete_by_id(id).await?;
        log::info!("Removed planet {}", id);
        Ok(())
    }
}
