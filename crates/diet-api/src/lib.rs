//! JSON REST API for daily-diet.
//!
//! Exposes an axum [`Router`] backed by any [`diet_core::store::RecordStore`].
//! Meal routes are gated by the `sessionId` cookie; TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, diet_api::api_router(state)).await?;
//! ```

pub mod error;
pub mod meals;
pub mod session;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use diet_core::{
  repository::{MealRepository, RepositoryPolicy},
  store::RecordStore,
};

pub use error::ApiError;
pub use session::{CurrentUser, SessionCookie};

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub meals:  MealRepository<S>,
  pub cookie: SessionCookie,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      meals:  self.meals.clone(),
      cookie: self.cookie,
    }
  }
}

impl<S: RecordStore> ApiState<S> {
  pub fn new(store: Arc<S>, policy: RepositoryPolicy, cookie: SessionCookie) -> Self {
    Self {
      meals: MealRepository::new(store, policy),
      cookie,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::register::<S>))
    // Meals
    .route("/meals", get(meals::list::<S>).post(meals::create::<S>))
    .route("/meals/metrics", get(meals::metrics::<S>))
    .route(
      "/meals/{id}",
      get(meals::get_one::<S>)
        .put(meals::update::<S>)
        .delete(meals::delete::<S>),
    )
    .with_state(state)
}
