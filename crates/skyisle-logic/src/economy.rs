//! Resource economy — inventory ledger, crafting, quest completion.
//!
//! The [`Economy`] is the single source of truth for inventory contents.
//! Every mutation goes through one of its operations; callers only ever
//! see read-only snapshots. All failures leave the ledger untouched —
//! craft and quest checks validate everything before the first write, so
//! the deduct/credit pair is one logical transaction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource kind → quantity. BTreeMap keeps snapshots deterministically
/// ordered for display and tests.
pub type ResourceMap = BTreeMap<String, u64>;

/// Economy operation failures. All recoverable: the caller retries with
/// different state (e.g. after gathering more resources).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("resource amount must be a positive integer")]
    InvalidAmount,
    #[error("unknown recipe `{0}`")]
    RecipeNotFound(String),
    #[error("insufficient resources for recipe `{0}`")]
    InsufficientResources(String),
    #[error("unknown quest `{0}`")]
    QuestNotFound(String),
    #[error("quest `{0}` already completed")]
    QuestAlreadyCompleted(String),
    #[error("requirements for quest `{0}` not met")]
    QuestRequirementsNotMet(String),
}

/// A static crafting rule: consume `cost`, produce `output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub cost: ResourceMap,
    pub output: ResourceMap,
}

/// A one-time reward grant gated on current holdings. Requirements are a
/// gate, not a cost — holding the required amount does not consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub requirements: ResourceMap,
    pub rewards: ResourceMap,
    #[serde(default)]
    pub completed: bool,
}

/// Sole owner and mutator of the inventory ledger, plus the static recipe
/// and quest catalogs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Economy {
    ledger: ResourceMap,
    recipes: Vec<Recipe>,
    quests: Vec<Quest>,
}

impl Economy {
    pub fn new(starting_inventory: ResourceMap, recipes: Vec<Recipe>, quests: Vec<Quest>) -> Self {
        Self {
            ledger: starting_inventory,
            recipes,
            quests,
        }
    }

    /// Read-only ledger snapshot.
    pub fn ledger(&self) -> &ResourceMap {
        &self.ledger
    }

    /// Current holdings of one kind (zero if never seen).
    pub fn quantity(&self, resource: &str) -> u64 {
        self.ledger.get(resource).copied().unwrap_or(0)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Credit a harvested resource. Unknown kinds are auto-registered.
    pub fn apply_collection(&mut self, resource: &str, amount: u64) -> Result<(), EconomyError> {
        if amount == 0 {
            return Err(EconomyError::InvalidAmount);
        }
        *self.ledger.entry(resource.to_string()).or_insert(0) += amount;
        Ok(())
    }

    /// Credit every entry of a reward set (container opens, quest rewards).
    /// Catalog amounts are trusted to be positive.
    pub fn credit_rewards(&mut self, rewards: &ResourceMap) {
        for (resource, amount) in rewards {
            *self.ledger.entry(resource.clone()).or_insert(0) += amount;
        }
    }

    /// Craft a recipe: all-or-nothing. Either every cost is deducted and
    /// every output credited, or the ledger is left byte-for-byte
    /// unchanged. Returns the crafted recipe for event reporting.
    pub fn craft(&mut self, recipe_id: &str) -> Result<Recipe, EconomyError> {
        let recipe = self
            .recipes
            .iter()
            .find(|r| r.id == recipe_id)
            .cloned()
            .ok_or_else(|| EconomyError::RecipeNotFound(recipe_id.to_string()))?;

        let affordable = recipe
            .cost
            .iter()
            .all(|(resource, required)| self.quantity(resource) >= *required);
        if !affordable {
            return Err(EconomyError::InsufficientResources(recipe_id.to_string()));
        }

        // Validated above; from here the transaction cannot fail.
        for (resource, required) in &recipe.cost {
            if let Some(held) = self.ledger.get_mut(resource) {
                *held -= required;
            }
        }
        self.credit_rewards(&recipe.output);
        Ok(recipe)
    }

    /// Complete a quest: gate on current holdings, flip `completed`
    /// irreversibly, credit rewards. The flag flip and the crediting are
    /// atomic together; a second call reports `QuestAlreadyCompleted` and
    /// changes nothing.
    pub fn complete_quest(&mut self, quest_id: &str) -> Result<Quest, EconomyError> {
        let index = self
            .quests
            .iter()
            .position(|q| q.id == quest_id)
            .ok_or_else(|| EconomyError::QuestNotFound(quest_id.to_string()))?;

        if self.quests[index].completed {
            return Err(EconomyError::QuestAlreadyCompleted(quest_id.to_string()));
        }

        let met = self.quests[index]
            .requirements
            .iter()
            .all(|(resource, required)| self.quantity(resource) >= *required);
        if !met {
            return Err(EconomyError::QuestRequirementsNotMet(quest_id.to_string()));
        }

        self.quests[index].completed = true;
        let rewards = self.quests[index].rewards.clone();
        self.credit_rewards(&rewards);
        Ok(self.quests[index].clone())
    }
}
