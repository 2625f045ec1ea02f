//! Handlers for `/meals` endpoints. Every handler requires a session.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/meals` | `{"meals": [...]}`, newest first |
//! | `POST`   | `/meals` | Body: [`MealBody`]; returns 201 + `{"meal": ...}` |
//! | `GET`    | `/meals/metrics` | Aggregate statistics |
//! | `GET`    | `/meals/:id` | `{"meal": ...}`; 404 if not found |
//! | `PUT`    | `/meals/:id` | Body: [`MealBody`]; returns 204 |
//! | `DELETE` | `/meals/:id` | Returns 204, also for unknown ids |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use diet_core::{
  meal::{Meal, MealFields, Timestamp},
  metrics::Metrics,
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, session::CurrentUser};

// ─── Bodies ───────────────────────────────────────────────────────────────────

/// A meal date as clients send it: epoch milliseconds, an RFC 3339 instant,
/// or a bare calendar date (taken as midnight UTC).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
  Millis(Timestamp),
  Instant(DateTime<Utc>),
  Date(NaiveDate),
}

impl DateInput {
  pub fn to_millis(self) -> Timestamp {
    match self {
      Self::Millis(ms) => ms,
      Self::Instant(dt) => dt.timestamp_millis(),
      Self::Date(d) => d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp_millis(),
    }
  }
}

/// JSON body accepted by `POST /meals` and `PUT /meals/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealBody {
  pub name:        String,
  pub description: String,
  pub is_on_diet:  bool,
  pub date:        DateInput,
}

impl From<MealBody> for MealFields {
  fn from(b: MealBody) -> Self {
    MealFields {
      name:        b.name,
      description: b.description,
      is_on_diet:  b.is_on_diet,
      date:        b.date.to_millis(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct MealList {
  pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct MealEnvelope {
  pub meal: Meal,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /meals`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
) -> Result<Json<MealList>, ApiError>
where
  S: RecordStore + 'static,
{
  let meals = state.meals.list(owner).await?;
  Ok(Json(MealList { meals }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /meals/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<Json<MealEnvelope>, ApiError>
where
  S: RecordStore + 'static,
{
  let meal = state.meals.get(id, owner).await?;
  Ok(Json(MealEnvelope { meal }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /meals` — returns 201 + the stored [`Meal`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
  Json(body): Json<MealBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let meal = state.meals.create(owner, MealFields::from(body)).await?;
  Ok((StatusCode::CREATED, Json(MealEnvelope { meal })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /meals/:id` — replaces every mutable field.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
  Path(id): Path<Uuid>,
  Json(body): Json<MealBody>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + 'static,
{
  state.meals.update(id, owner, MealFields::from(body)).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /meals/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore + 'static,
{
  state.meals.delete(id, owner).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Metrics ──────────────────────────────────────────────────────────────────

/// `GET /meals/metrics`
pub async fn metrics<S>(
  State(state): State<ApiState<S>>,
  CurrentUser(owner): CurrentUser,
) -> Result<Json<Metrics>, ApiError>
where
  S: RecordStore + 'static,
{
  Ok(Json(state.meals.metrics(owner).await?))
}
