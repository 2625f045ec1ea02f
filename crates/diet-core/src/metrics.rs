//! Aggregate statistics over a user's meal history.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, meal::Meal, session::UserIdentity, store::RecordStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
  #[serde(rename = "totalMeals")]
  pub total_meals:         usize,
  #[serde(rename = "totalMealsOnDiet")]
  pub total_on_diet:       usize,
  #[serde(rename = "totalMealsOffDiet")]
  pub total_off_diet:      usize,
  /// Longest run of consecutive on-diet meals in list order.
  #[serde(rename = "bestOnDietSequence")]
  pub best_on_diet_streak: usize,
}

impl Metrics {
  /// Summarise `meals`, which must already be in list order (newest first,
  /// ties in insertion order).
  pub fn from_history(meals: &[Meal]) -> Self {
    let total_on_diet = meals.iter().filter(|m| m.is_on_diet).count();
    Self {
      total_meals: meals.len(),
      total_on_diet,
      total_off_diet: meals.len() - total_on_diet,
      best_on_diet_streak: best_streak(meals.iter().map(|m| m.is_on_diet)),
    }
  }
}

/// Length of the longest run of `true` in `flags`.
pub fn best_streak(flags: impl IntoIterator<Item = bool>) -> usize {
  let mut best: usize = 0;
  let mut current: usize = 0;
  for on_diet in flags {
    current = if on_diet { current + 1 } else { 0 };
    best = best.max(current);
  }
  best
}

/// Fetch the owner's history in list order and summarise it.
pub async fn compute<S>(store: &S, owner: UserIdentity) -> Result<Metrics>
where
  S: RecordStore,
{
  let meals = store
    .list_meals_by_owner(owner.user_id)
    .await
    .map_err(Error::store)?;
  let metrics = Metrics::from_history(&meals);
  tracing::debug!(user_id = %owner.user_id, ?metrics, "computed metrics");
  Ok(metrics)
}
