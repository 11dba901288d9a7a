use anyhow::Context;
use sqlx::{
    error::ErrorKind,
    postgres::{PgPoolOptions, PgRow},
    PgPool, Postgres, QueryBuilder, Row,
};

use crate::model::{Planet, PlanetFilter, PlanetId};
use crate::store::traits::{PlanetStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded database migrations
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn planet_from_row(row: &PgRow) -> Result<Planet, sqlx::Error> {
    Ok(Planet {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        climate: row.try_get("climate")?,
        terrain: row.try_get("terrain")?,
    })
}

/// Build the list query with one bound parameter per populated filter field.
fn select_planets(filter: &PlanetFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, name, climate, terrain FROM planets");

    for (i, (column, value)) in filter.conditions().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        query.push(column).push(" = ").push_bind(value);
    }

    query.push(" ORDER BY id");
    query
}

/// Split constraint violations from other database failures.
fn classify_write_error(err: sqlx::Error, context: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return StoreError::ConstraintViolation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    StoreError::Backend(anyhow::Error::new(err).context(context))
}

#[async_trait::async_trait]
impl PlanetStore for PostgresStore {
    async fn find_by_id(&self, id: PlanetId) -> StoreResult<Option<Planet>> {
        let row = sqlx::query("SELECT id, name, climate, terrain FROM planets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch planet")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(
            planet_from_row(&row).context("Failed to decode planet row")?,
        ))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Planet>> {
        let row = sqlx::query("SELECT id, name, climate, terrain FROM planets WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch planet by name")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(
            planet_from_row(&row).context("Failed to decode planet row")?,
        ))
    }

    async fn save(&self, planet: Planet) -> StoreResult<Planet> {
        match planet.id {
            None => {
                let row = sqlx::query(
                    "INSERT INTO planets (name, climate, terrain) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&planet.name)
                .bind(&planet.climate)
                .bind(&planet.terrain)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, "Failed to insert planet"))?;

                let id: PlanetId = row.try_get("id").context("Failed to read new planet id")?;
                Ok(Planet {
                    id: Some(id),
                    ..planet
                })
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE planets SET name = $2, climate = $3, terrain = $4 WHERE id = $1",
                )
                .bind(id)
                .bind(&planet.name)
                .bind(&planet.climate)
                .bind(&planet.terrain)
                .execute(&self.pool)
                .await
                .map_err(|e| classify_write_error(e, "Failed to update planet"))?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::NotFound);
                }
                Ok(planet)
            }
        }
    }

    async fn find_all(&self, filter: &PlanetFilter) -> StoreResult<Vec<Planet>> {
        let mut query = select_planets(filter);
        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list planets")?;

        let planets = rows
            .iter()
            .map(planet_from_row)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to decode planet row")?;

        Ok(planets)
    }

    async fn delete_by_id(&self, id: PlanetId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete planet")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_without_filter_has_no_where_clause() {
        let filter = PlanetFilter::default();
        let query = select_planets(&filter);
        assert_eq!(
            query.sql(),
            "SELECT id, name, climate, terrain FROM planets ORDER BY id"
        );
    }

    #[test]
    fn test_select_binds_only_populated_fields() {
        let filter = PlanetFilter::new(Some("temperate".into()), Some("jungle".into()));
        let query = select_planets(&filter);
        assert_eq!(
            query.sql(),
            "SELECT id, name, climate, terrain FROM planets WHERE climate = $1 AND terrain = $2 ORDER BY id"
        );

        let filter = PlanetFilter::new(None, Some("desert".into()));
        let query = select_planets(&filter);
        assert_eq!(
            query.sql(),
            "SELECT id, name, climate, terrain FROM planets WHERE terrain = $1 ORDER BY id"
        );
    }

    async fn connect() -> PostgresStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresStore::new(&url, 2).await.unwrap();
        store.migrate().await.unwrap();
        sqlx::query("TRUNCATE planets RESTART IDENTITY")
            .execute(store.pool())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_postgres_constraints() {
        let store = connect().await;

        let saved = store
            .save(Planet::new("Tatooine", "arid", "desert").unwrap())
            .await
            .unwrap();
        assert!(saved.id.is_some());

        let duplicate = store
            .save(Planet::new("Tatooine", "temperate", "jungle").unwrap())
            .await;
        assert!(matches!(duplicate, Err(StoreError::ConstraintViolation(_))));

        let empty = Planet {
            id: None,
            name: String::new(),
            climate: String::new(),
            terrain: String::new(),
        };
        assert!(matches!(
            store.save(empty).await,
            Err(StoreError::ConstraintViolation(_))
        ));

        let mut renamed = saved.clone();
        renamed.terrain = "dunes".to_string();
        assert_eq!(store.save(renamed.clone()).await.unwrap(), renamed);
        assert_eq!(store.find_by_id(saved.id.unwrap()).await.unwrap(), Some(renamed));

        let ghost = Planet {
            id: Some(99),
            ..Planet::new("Tatooine", "arid", "desert").unwrap()
        };
        assert!(matches!(store.save(ghost).await, Err(StoreError::NotFound)));

        assert!(matches!(
            store.delete_by_id(99).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_postgres_filtered_listing() {
        let store = connect().await;
        for (name, climate, terrain) in [
            ("Tatooine", "arid", "desert"),
            ("Alderaan", "temperate", "grasslands"),
            ("Yavin IV", "temperate", "jungle"),
        ] {
            store
                .save(Planet::new(name, climate, terrain).unwrap())
                .await
                .unwrap();
        }

        let all = store.find_all(&PlanetFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let temperate = store
            .find_all(&PlanetFilter::new(Some("temperate".into()), None))
            .await
            .unwrap();
        let names: Vec<_> = temperate.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alderaan", "Yavin IV"]);
    }
}
