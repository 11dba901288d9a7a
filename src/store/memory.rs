use parking_lot::RwLock;

use crate::model::{Planet, PlanetFilter, PlanetId};
use crate::store::traits::{PlanetStore, StoreError, StoreResult};

#[derive(Debug)]
struct Table {
    /// Rows in insertion order, which is also id order
    rows: Vec<Planet>,
    next_id: PlanetId,
}

/// Process-local planet store with the same constraints as the `planets` table.
#[derive(Debug)]
pub struct InMemoryPlanetStore {
    table: RwLock<Table>,
}

impl InMemoryPlanetStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPlanetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    fn check_constraints(&self, planet: &Planet) -> StoreResult<()> {
        if let Some(field) = planet.empty_fields().first() {
            return Err(StoreError::ConstraintViolation(format!(
                "new row for relation \"planets\" violates check constraint \"planets_{}_check\"",
                field
            )));
        }

        let clash = self
            .rows
            .iter()
            .any(|row| row.name == planet.name && row.id != planet.id);
        if clash {
            return Err(StoreError::ConstraintViolation(
                "duplicate key value violates unique constraint \"planets_name_key\"".to_string(),
            ));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl PlanetStore for InMemoryPlanetStore {
    async fn find_by_id(&self, id: PlanetId) -> StoreResult<Option<Planet>> {
        let table = self.table.read();
        Ok(table.rows.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Planet>> {
        let table = self.table.read();
        Ok(table.rows.iter().find(|p| p.name == name).cloned())
    }

    async fn save(&self, mut planet: Planet) -> StoreResult<Planet> {
        let mut table = self.table.write();

        match planet.id {
            None => {
                table.check_constraints(&planet)?;
                planet.id = Some(table.next_id);
                table.next_id += 1;
                table.rows.push(planet.clone());
            }
            Some(id) => {
                // An update touching no row is NotFound, whatever the payload
                let index = table
                    .rows
                    .iter()
                    .position(|p| p.id == Some(id))
                    .ok_or(StoreError::NotFound)?;
                table.check_constraints(&planet)?;
                table.rows[index] = planet.clone();
            }
        }

        Ok(planet)
    }

    async fn find_all(&self, filter: &PlanetFilter) -> StoreResult<Vec<Planet>> {
        let table = self.table.read();
        Ok(table
            .rows
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: PlanetId) -> StoreResult<()> {
        let mut table = self.table.write();
        let before = table.rows.len();
        table.rows.retain(|p| p.id != Some(id));

        if table.rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
