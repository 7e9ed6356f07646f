//! Built-in recipe and quest catalogs, embedded as JSON data files.

use skyisle_logic::economy::{Quest, Recipe};
use thiserror::Error;

const RECIPES_JSON: &str = include_str!("../../../data/recipes.json");
const QUESTS_JSON: &str = include_str!("../../../data/quests.json");

/// Catalog data failed to parse. Only reachable if the embedded JSON is
/// edited into an invalid state.
#[derive(Debug, Error)]
#[error("invalid {catalog} catalog: {source}")]
pub struct CatalogError {
    catalog: &'static str,
    #[source]
    source: serde_json::Error,
}

/// The shipped crafting recipes.
pub fn builtin_recipes() -> Result<Vec<Recipe>, CatalogError> {
    serde_json::from_str(RECIPES_JSON).map_err(|source| CatalogError {
        catalog: "recipe",
        source,
    })
}

/// The shipped quest definitions. All start incomplete.
pub fn builtin_quests() -> Result<Vec<Quest>, CatalogError> {
    serde_json::from_str(QUESTS_JSON).map_err(|source| CatalogError {
        catalog: "quest",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_parse() {
        let recipes = builtin_recipes().unwrap();
        assert_eq!(recipes.len(), 3);
        let axe = recipes.iter().find(|r| r.id == "axe").unwrap();
        assert_eq!(axe.cost.get("wood"), Some(&3));
        assert_eq!(axe.cost.get("stone"), Some(&1));
        assert_eq!(axe.output.get("axe"), Some(&1));
    }

    #[test]
    fn test_quests_parse_incomplete() {
        let quests = builtin_quests().unwrap();
        assert_eq!(quests.len(), 3);
        assert!(quests.iter().all(|q| !q.completed));
        let wood = quests.iter().find(|q| q.id == "gather_wood").unwrap();
        assert_eq!(wood.requirements.get("wood"), Some(&5));
        assert_eq!(wood.rewards.get("crystal"), Some(&2));
    }
}
