//! In-memory [`RecordStore`] used by the unit tests in this crate.

use std::{
  convert::Infallible,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use uuid::Uuid;

use crate::{
  meal::{Meal, MealFields},
  store::RecordStore,
  user::User,
};

/// Users and meals kept in insertion order behind a mutex.
#[derive(Default)]
pub struct MemoryStore {
  users:         Mutex<Vec<User>>,
  meals:         Mutex<Vec<Meal>>,
  token_lookups: AtomicUsize,
}

impl MemoryStore {
  /// How many times `find_user_by_token` has been called.
  pub fn token_lookups(&self) -> usize { self.token_lookups.load(Ordering::SeqCst) }
}

impl RecordStore for MemoryStore {
  type Error = Infallible;

  async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, Infallible> {
    self.token_lookups.fetch_add(1, Ordering::SeqCst);
    let users = self.users.lock().unwrap();
    Ok(
      users
        .iter()
        .find(|u| u.session_token.as_deref() == Some(token))
        .cloned(),
    )
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, Infallible> {
    let users = self.users.lock().unwrap();
    Ok(users.iter().find(|u| u.email == email).cloned())
  }

  async fn insert_user(&self, user: User) -> Result<(), Infallible> {
    self.users.lock().unwrap().push(user);
    Ok(())
  }

  async fn set_session_token(&self, user_id: Uuid, token: &str) -> Result<usize, Infallible> {
    let mut users = self.users.lock().unwrap();
    let mut affected = 0;
    for user in users.iter_mut().filter(|u| u.user_id == user_id) {
      user.session_token = Some(token.to_owned());
      affected += 1;
    }
    Ok(affected)
  }

  async fn find_meal_by_id(&self, meal_id: Uuid) -> Result<Option<Meal>, Infallible> {
    let meals = self.meals.lock().unwrap();
    Ok(meals.iter().find(|m| m.meal_id == meal_id).cloned())
  }

  async fn list_meals_by_owner(&self, user_id: Uuid) -> Result<Vec<Meal>, Infallible> {
    let meals = self.meals.lock().unwrap();
    let mut owned: Vec<Meal> = meals
      .iter()
      .filter(|m| m.user_id == user_id)
      .cloned()
      .collect();
    // Stable sort keeps insertion order among equal dates.
    owned.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(owned)
  }

  async fn insert_meal(&self, meal: Meal) -> Result<(), Infallible> {
    self.meals.lock().unwrap().push(meal);
    Ok(())
  }

  async fn update_meal_fields(
    &self,
    meal_id: Uuid,
    fields: MealFields,
  ) -> Result<usize, Infallible> {
    let mut meals = self.meals.lock().unwrap();
    let Some(meal) = meals.iter_mut().find(|m| m.meal_id == meal_id) else {
      return Ok(0);
    };
    meal.name = fields.name;
    meal.description = fields.description;
    meal.is_on_diet = fields.is_on_diet;
    meal.date = fields.date;
    Ok(1)
  }

  async fn delete_meal_by_id(&self, meal_id: Uuid) -> Result<usize, Infallible> {
    let mut meals = self.meals.lock().unwrap();
    let before = meals.len();
    meals.retain(|m| m.meal_id != meal_id);
    Ok(before - meals.len())
  }
}
