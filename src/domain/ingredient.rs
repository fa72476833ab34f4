//! Ingredient catalog entries.

use serde::{Deserialize, Serialize};

use super::{DocumentId, Timestamp};

/// A purchasable item with its unit cost and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub ingredient_id: DocumentId,
    #[serde(rename = "proveedor", default)]
    pub supplier: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "valor", default)]
    pub unit_cost: f64,
    #[serde(rename = "gr", default)]
    pub weight_grams: f64,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
}

/// Replacement values for an ingredient's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientChanges {
    #[serde(rename = "proveedor")]
    pub supplier: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "valor")]
    pub unit_cost: f64,
    #[serde(rename = "gr")]
    pub weight_grams: f64,
}

impl Ingredient {
    /// Creates an ingredient from validated field values.
    #[must_use]
    pub fn new(ingredient_id: DocumentId, fields: IngredientChanges, created_at: Timestamp) -> Self {
        Self {
            ingredient_id,
            supplier: fields.supplier,
            name: fields.name,
            unit_cost: fields.unit_cost,
            weight_grams: fields.weight_grams,
            created_at,
        }
    }
}
