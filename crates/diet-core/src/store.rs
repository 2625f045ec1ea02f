//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `diet-store-sqlite`). The session
//! resolver, meal repository and metrics engine depend on this abstraction,
//! not on any concrete backend.
//!
//! Every method is a single read or write; callers never need two of them to
//! be atomic together.

use std::future::Future;

use uuid::Uuid;

use crate::{
  meal::{Meal, MealFields},
  user::User,
};

/// Abstraction over a daily-diet storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Look up the user currently bound to `token`.
  fn find_user_by_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn insert_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Bind `token` to `user_id`, replacing any previous token. Returns the
  /// number of rows affected.
  fn set_session_token<'a>(
    &'a self,
    user_id: Uuid,
    token: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Meals ─────────────────────────────────────────────────────────────

  fn find_meal_by_id(
    &self,
    meal_id: Uuid,
  ) -> impl Future<Output = Result<Option<Meal>, Self::Error>> + Send + '_;

  /// All meals owned by `user_id`, newest `date` first. Meals with equal
  /// dates come back in insertion order.
  fn list_meals_by_owner(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Meal>, Self::Error>> + Send + '_;

  fn insert_meal(
    &self,
    meal: Meal,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the mutable fields of a meal. Returns the number of rows
  /// affected (0 when the id is unknown).
  fn update_meal_fields(
    &self,
    meal_id: Uuid,
    fields: MealFields,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Returns the number of rows affected (0 when the id is unknown).
  fn delete_meal_by_id(
    &self,
    meal_id: Uuid,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
