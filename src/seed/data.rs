use crate::model::Planet;
use crate::store::traits::PlanetStore;
use anyhow::Result;

/// Demo planets as (name, climate, terrain)
pub const SEED_PLANETS: [(&str, &str, &str); 3] = [
    ("Tatooine", "arid", "desert"),
    ("Alderaan", "temperate", "grasslands"),
    ("Yavin IV", "temperate", "jungle"),
];

/// Insert the demo planets, skipping any whose name is already taken.
/// Returns how many were inserted.
pub async fn load_seed_data<S: PlanetStore>(store: &S) -> Result<usize> {
    let mut inserted = 0;

    for (name, climate, terrain) in SEED_PLANETS {
        if store.find_by_name(name).await?.is_some() {
            log::debug!("Seed planet {} already present", name);
            continue;
        }

        store.save(Planet::new(name, climate, terrain)?).await?;
        inserted += 1;
    }

    Ok(inserted)
}
