use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PlanetId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlanetId>, // Assigned by the store on first save
    pub name: String,
    pub climate: String,
    pub terrain: String,
}

/// Raised when a planet is built with empty or missing required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} must not be empty", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

impl Planet {
    /// Build an unsaved planet, rejecting empty fields.
    pub fn new(
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        NewPlanet {
            name: Some(name.into()),
            climate: Some(climate.into()),
            terrain: Some(terrain.into()),
        }
        .into_planet()
    }

    /// Names of required fields that are currently empty.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("climate", &self.climate),
            ("terrain", &self.terrain),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Request payload for creating or replacing a planet.
///
/// Every field is optional at the wire level so that missing and empty
/// values are reported together by [`NewPlanet::into_planet`]. An `id` sent
/// by the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlanet {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

impl NewPlanet {
    pub fn into_planet(self) -> Result<Planet, ValidationError> {
        let mut fields = Vec::new();
        let mut take = |field: &'static str, value: Option<String>| match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                fields.push(field);
                String::new()
            }
        };

        let name = take("name", self.name);
        let climate = take("climate", self.climate);
        let terrain = take("terrain", self.terrain);

        if !fields.is_empty() {
            return Err(ValidationError { fields });
        }

        Ok(Planet {
            id: None,
            name,
            climate,
            terrain,
        })
    }
}
