//! Handler for `POST /users`.
//!
//! Registration issues a fresh session token in a `Set-Cookie` header. A new
//! email answers 201; a known email has its token rotated and answers 200.

use axum::{
  Json,
  extract::State,
  http::{StatusCode, header},
  response::IntoResponse,
};
use diet_core::{
  store::RecordStore,
  user::{self, User},
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:  String,
  pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
  pub user: User,
}

/// `POST /users` — body: `{"name":"...","email":"..."}`
pub async fn register<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
{
  let registration = user::register(state.meals.store(), body.name, body.email).await?;

  let cookie = state.cookie.header_value(&registration.token)?;
  let status = if registration.created {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };

  Ok((
    status,
    [(header::SET_COOKIE, cookie)],
    Json(UserEnvelope { user: registration.user }),
  ))
}
