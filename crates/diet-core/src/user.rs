//! Users and registration.
//!
//! There is no password: a user is whoever holds the session token currently
//! stored on their row. Registering again with the same email rotates that
//! token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, store::RecordStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  #[serde(rename = "id")]
  pub user_id:       Uuid,
  pub name:          String,
  pub email:         String,
  /// Never serialised; it only travels in the session cookie.
  #[serde(skip)]
  pub session_token: Option<String>,
  pub created_at:    DateTime<Utc>,
}

/// Result of [`register`]: the user row and the token now bound to it.
#[derive(Debug, Clone)]
pub struct Registration {
  pub user:    User,
  pub token:   String,
  /// `false` when an existing user had their token rotated.
  pub created: bool,
}

/// Generate a fresh opaque session token.
pub fn new_session_token() -> String { Uuid::new_v4().to_string() }

/// Register `email`, or re-register it if a user already exists.
///
/// A new token is issued either way, so any previous token for that user
/// stops resolving.
pub async fn register<S>(store: &S, name: String, email: String) -> Result<Registration>
where
  S: RecordStore,
{
  let token = new_session_token();

  let existing = store
    .find_user_by_email(&email)
    .await
    .map_err(Error::store)?;

  if let Some(mut user) = existing {
    store
      .set_session_token(user.user_id, &token)
      .await
      .map_err(Error::store)?;
    user.session_token = Some(token.clone());
    tracing::debug!(user_id = %user.user_id, "rotated session token");
    return Ok(Registration { user, token, created: false });
  }

  let user = User {
    user_id: Uuid::new_v4(),
    name,
    email,
    session_token: Some(token.clone()),
    created_at: Utc::now(),
  };
  store.insert_user(user.clone()).await.map_err(Error::store)?;
  tracing::debug!(user_id = %user.user_id, "registered user");

  Ok(Registration { user, token, created: true })
}
