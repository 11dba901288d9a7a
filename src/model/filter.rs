use crate::model::Planet;

/// Query-by-example filter over planets.
///
/// Populated fields must match the stored value exactly (case-sensitive);
/// `None` places no constraint on that column. The id never takes part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetFilter {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
}

impl PlanetFilter {
    pub fn new(climate: Option<String>, terrain: Option<String>) -> Self {
        Self {
            name: None,
            climate: non_empty(climate),
            terrain: non_empty(terrain),
        }
    }

    /// Filter on every non-empty field of `example`.
    pub fn from_example(example: &Planet) -> Self {
        Self {
            name: non_empty(Some(example.name.clone())),
            climate: non_empty(Some(example.climate.clone())),
            terrain: non_empty(Some(example.terrain.clone())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions().next().is_none()
    }

    /// Column/value pairs for the populated fields.
    pub fn conditions(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("climate", self.climate.as_deref()),
            ("terrain", self.terrain.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
    }

    pub fn matches(&self, planet: &Planet) -> bool {
        self.conditions().all(|(column, value)| match column {
            "name" => planet.name == value,
            "climate" => planet.climate == value,
            "terrain" => planet.terrain == value,
            _ => false,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tatooine() -> Planet {
        Planet {
            id: Some(1),
            name: "Tatooine".to_string(),
            climate: "arid".to_string(),
            terrain: "desert".to_string(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PlanetFilter::new(None, Some(String::new()));

        assert!(filter.is_empty());
        assert!(filter.matches(&tatooine()));
    }

    #[test]
    fn test_populated_fields_must_all_match() {
        let planet = tatooine();

        assert!(PlanetFilter::new(Some("arid".into()), Some("desert".into())).matches(&planet));
        assert!(PlanetFilter::new(None, Some("desert".into())).matches(&planet));
        assert!(!PlanetFilter::new(Some("arid".into()), Some("jungle".into())).matches(&planet));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = PlanetFilter::new(Some("Arid".into()), None);
        assert!(!filter.matches(&tatooine()));
    }

    #[test]
    fn test_from_example_ignores_id_and_empty_fields() {
        let example = Planet {
            id: Some(99),
            name: String::new(),
            climate: "arid".to_string(),
            terrain: "desert".to_string(),
        };

        let filter = PlanetFilter::from_example(&example);
        assert_eq!(filter.name, None);
        assert_eq!(
            filter.conditions().collect::<Vec<_>>(),
            vec![("climate", "arid"), ("terrain", "desert")]
        );
        assert!(filter.matches(&tatooine()));
    }
}
