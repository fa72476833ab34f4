//! Recipes and their ingredient composition.
//!
//! A stored [`Recipe`] references ingredients by identity only. Reads go through
//! [`Recipe::resolve`], which substitutes each reference with the full
//! [`Ingredient`] (or `null` when the ingredient no longer exists).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{DocumentId, Ingredient, Timestamp};

/// One line of a recipe: an ingredient reference plus the weight and cost recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    #[serde(rename = "_id")]
    pub entry_id: DocumentId,
    #[serde(rename = "ingrediente", default)]
    pub ingredient_id: Option<DocumentId>,
    #[serde(rename = "gr", default)]
    pub weight_grams: f64,
    #[serde(rename = "valor", default)]
    pub cost: f64,
}

/// A named composition of ingredients, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub recipe_id: DocumentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raciones", default)]
    pub servings: f64,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "composicion", default)]
    pub composition: Vec<CompositionEntry>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
}

/// Replacement values for a recipe's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeChanges {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raciones")]
    pub servings: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "composicion")]
    pub composition: Vec<CompositionEntry>,
}

/// A composition entry with its ingredient reference expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry {
    #[serde(rename = "_id")]
    pub entry_id: DocumentId,
    #[serde(rename = "ingrediente")]
    pub ingredient: Option<Ingredient>,
    #[serde(rename = "gr")]
    pub weight_grams: f64,
    #[serde(rename = "valor")]
    pub cost: f64,
}

/// A recipe as returned to clients: every composition entry carries the full ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRecipe {
    #[serde(rename = "_id")]
    pub recipe_id: DocumentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raciones")]
    pub servings: f64,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "composicion")]
    pub composition: Vec<ResolvedEntry>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
}

impl Recipe {
    /// Creates a recipe from validated field values.
    #[must_use]
    pub fn new(recipe_id: DocumentId, fields: RecipeChanges, created_at: Timestamp) -> Self {
        Self {
            recipe_id,
            name: fields.name,
            servings: fields.servings,
            description: fields.description,
            composition: fields.composition,
            created_at,
        }
    }

    /// Ingredient identities referenced by this recipe, in composition order.
    pub fn ingredient_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.composition
            .iter()
            .filter_map(|entry| entry.ingredient_id)
    }

    /// Substitutes every ingredient reference using `ingredients`.
    ///
    /// References missing from the lookup resolve to `None`.
    #[must_use]
    pub fn resolve(&self, ingredients: &HashMap<DocumentId, Ingredient>) -> ResolvedRecipe {
        ResolvedRecipe {
            recipe_id: self.recipe_id,
            name: self.name.clone(),
            servings: self.servings,
            description: self.description.clone(),
            composition: self
                .composition
                .iter()
                .map(|entry| ResolvedEntry {
                    entry_id: entry.entry_id,
                    ingredient: entry
                        .ingredient_id
                        .and_then(|ingredient_id| ingredients.get(&ingredient_id).cloned()),
                    weight_grams: entry.weight_grams,
                    cost: entry.cost,
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

/// Collects the distinct ingredient identities referenced across `recipes`.
#[must_use]
pub fn referenced_ingredients<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<DocumentId> {
    recipes
        .into_iter()
        .flat_map(Recipe::ingredient_ids)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
