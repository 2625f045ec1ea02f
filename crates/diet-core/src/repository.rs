//! Owner-scoped CRUD over meal records.
//!
//! Listing and creation are always scoped to the resolved owner. Whether
//! get, update and delete also check ownership is governed by
//! [`RepositoryPolicy::strict_ownership`]; with it off, any authenticated
//! user can reach any meal by id.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  meal::{Meal, MealFields},
  metrics::{self, Metrics},
  session::UserIdentity,
  store::RecordStore,
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Authorization and missing-row behaviour of a [`MealRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepositoryPolicy {
  /// Require `meal.user_id == owner` for get, update and delete. A meal
  /// owned by someone else is treated exactly like a missing one.
  pub strict_ownership:       bool,
  /// Report [`Error::MealNotFound`] when an update matches no row. When
  /// `false` the affected count is ignored and the update always succeeds.
  pub report_missing_updates: bool,
}

impl RepositoryPolicy {
  /// Id-only access and silent no-op updates.
  pub const PERMISSIVE: Self = Self {
    strict_ownership:       false,
    report_missing_updates: false,
  };
}

impl Default for RepositoryPolicy {
  fn default() -> Self {
    Self {
      strict_ownership:       true,
      report_missing_updates: true,
    }
  }
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// Meal operations on behalf of a resolved [`UserIdentity`].
///
/// Cloning is cheap — the store is reference-counted.
pub struct MealRepository<S> {
  store:  Arc<S>,
  policy: RepositoryPolicy,
}

impl<S> Clone for MealRepository<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      policy: self.policy,
    }
  }
}

impl<S: RecordStore> MealRepository<S> {
  pub fn new(store: Arc<S>, policy: RepositoryPolicy) -> Self { Self { store, policy } }

  pub fn policy(&self) -> RepositoryPolicy { self.policy }

  pub fn store(&self) -> &S { &self.store }

  /// The owner's meals, newest first; empty when they have none.
  pub async fn list(&self, owner: UserIdentity) -> Result<Vec<Meal>> {
    self
      .store
      .list_meals_by_owner(owner.user_id)
      .await
      .map_err(Error::store)
  }

  pub async fn get(&self, meal_id: Uuid, owner: UserIdentity) -> Result<Meal> {
    self
      .find_visible(meal_id, owner)
      .await?
      .ok_or(Error::MealNotFound(meal_id))
  }

  pub async fn create(&self, owner: UserIdentity, fields: MealFields) -> Result<Meal> {
    let meal = Meal::new(owner.user_id, fields);
    self
      .store
      .insert_meal(meal.clone())
      .await
      .map_err(Error::store)?;
    tracing::debug!(meal_id = %meal.meal_id, user_id = %owner.user_id, "created meal");
    Ok(meal)
  }

  /// Replace every mutable field of a meal. Ownership never changes.
  pub async fn update(
    &self,
    meal_id: Uuid,
    owner: UserIdentity,
    fields: MealFields,
  ) -> Result<()> {
    if self.policy.strict_ownership && self.find_visible(meal_id, owner).await?.is_none() {
      return self.missing_update(meal_id);
    }

    let affected = self
      .store
      .update_meal_fields(meal_id, fields)
      .await
      .map_err(Error::store)?;

    if affected == 0 {
      return self.missing_update(meal_id);
    }
    tracing::debug!(%meal_id, "updated meal");
    Ok(())
  }

  /// Idempotent: deleting an unknown id succeeds. Under strict ownership a
  /// meal owned by someone else is left alone, and that also succeeds.
  pub async fn delete(&self, meal_id: Uuid, owner: UserIdentity) -> Result<()> {
    if self.policy.strict_ownership {
      match self.find_meal(meal_id).await? {
        Some(meal) if meal.is_owned_by(owner.user_id) => {}
        Some(_) => {
          tracing::debug!(%meal_id, "ignored delete of a meal owned by another user");
          return Ok(());
        }
        None => return Ok(()),
      }
    }

    let affected = self
      .store
      .delete_meal_by_id(meal_id)
      .await
      .map_err(Error::store)?;
    tracing::debug!(%meal_id, affected, "deleted meal");
    Ok(())
  }

  /// Aggregate statistics over the owner's history.
  pub async fn metrics(&self, owner: UserIdentity) -> Result<Metrics> {
    metrics::compute(self.store.as_ref(), owner).await
  }

  async fn find_meal(&self, meal_id: Uuid) -> Result<Option<Meal>> {
    self
      .store
      .find_meal_by_id(meal_id)
      .await
      .map_err(Error::store)
  }

  async fn find_visible(&self, meal_id: Uuid, owner: UserIdentity) -> Result<Option<Meal>> {
    let meal = self.find_meal(meal_id).await?;
    if self.policy.strict_ownership {
      Ok(meal.filter(|m| m.is_owned_by(owner.user_id)))
    } else {
      Ok(meal)
    }
  }

  fn missing_update(&self, meal_id: Uuid) -> Result<()> {
    if self.policy.report_missing_updates {
      Err(Error::MealNotFound(meal_id))
    } else {
      tracing::debug!(%meal_id, "update matched no meal");
      Ok(())
    }
  }
}
