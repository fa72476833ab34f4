//! Domain module for ledger, contact, ingredient and recipe documents.
//!
//! This module contains the document models, their embedded children and the
//! identity and timestamp value objects they share.

pub mod contact;
pub mod identifier;
pub mod ingredient;
pub mod ledger;
pub mod recipe;
pub mod timestamp;

pub use contact::{Contact, ContactChanges, Email, EmailKind, Phone, PhoneKind};
pub use identifier::{DocumentId, InvalidIdentifier};
pub use ingredient::{Ingredient, IngredientChanges};
pub use ledger::{DailyRecord, Record, Transaction, TransactionKind, TransactionPatch};
pub use recipe::{
    CompositionEntry, Recipe, RecipeChanges, ResolvedEntry, ResolvedRecipe, referenced_ingredients,
};
pub use timestamp::{InvalidTimestamp, Timestamp};
