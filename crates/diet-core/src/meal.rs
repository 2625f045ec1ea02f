//! Meal records.
//!
//! A meal belongs to exactly one user for its whole lifetime. Everything else
//! about it (name, description, on-diet flag, date) can be replaced wholesale
//! through [`crate::repository::MealRepository::update`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since the Unix epoch. Meals are ordered by this value; it is
/// supplied by the caller, never read from the server clock.
pub type Timestamp = i64;

// ─── MealFields ──────────────────────────────────────────────────────────────

/// The mutable part of a meal. Create and update both take a full set; there
/// is no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealFields {
  pub name:        String,
  pub description: String,
  pub is_on_diet:  bool,
  pub date:        Timestamp,
}

// ─── Meal ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
  #[serde(rename = "id")]
  pub meal_id:     Uuid,
  /// The owning user; set at creation and never changed.
  pub user_id:     Uuid,
  pub name:        String,
  pub description: String,
  pub is_on_diet:  bool,
  pub date:        Timestamp,
}

impl Meal {
  /// Build a meal with a freshly generated id.
  pub fn new(user_id: Uuid, fields: MealFields) -> Self {
    Self {
      meal_id: Uuid::new_v4(),
      user_id,
      name: fields.name,
      description: fields.description,
      is_on_diet: fields.is_on_diet,
      date: fields.date,
    }
  }

  pub fn fields(&self) -> MealFields {
    MealFields {
      name:        self.name.clone(),
      description: self.description.clone(),
      is_on_diet:  self.is_on_diet,
      date:        self.date,
    }
  }

  pub fn is_owned_by(&self, user_id: Uuid) -> bool { self.user_id == user_id }
}
