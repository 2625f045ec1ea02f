//! Session-cookie extractor.
//!
//! Every `/meals` handler takes a [`CurrentUser`], so a request without a
//! valid `sessionId` cookie is rejected with 401 before the handler runs.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, HeaderValue, header, request::Parts},
};
use diet_core::{
  session::{self, UserIdentity},
  store::RecordStore,
};

use crate::{ApiState, error::ApiError};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sessionId";

/// Cookie attributes used when issuing a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
  pub max_age_secs: u64,
}

impl Default for SessionCookie {
  fn default() -> Self {
    Self {
      max_age_secs: 60 * 60 * 24 * 7,
    }
  }
}

impl SessionCookie {
  /// The `Set-Cookie` value binding the client to `token`.
  pub fn header_value(&self, token: &str) -> Result<HeaderValue, ApiError> {
    let cookie = format!(
      "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
      self.max_age_secs
    );
    HeaderValue::from_str(&cookie).map_err(|e| ApiError::Internal(e.to_string()))
  }
}

/// Pull the session token out of the request's `Cookie` header(s).
///
/// Only the first `sessionId` pair counts. Unparseable headers are skipped.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(name, _)| *name == SESSION_COOKIE)
    .map(|(_, value)| value.trim_matches('"'))
}

/// The owner resolved from the request's session cookie.
pub struct CurrentUser(pub UserIdentity);

impl<S> FromRequestParts<ApiState<S>> for CurrentUser
where
  S: RecordStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &ApiState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = session_token(&parts.headers);
    let identity = session::resolve(state.meals.store(), token).await?;
    Ok(CurrentUser(identity))
  }
}
