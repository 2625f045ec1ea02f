//! Session resolution — the gate in front of every meal operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, store::RecordStore};

/// The identity a valid session token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
  pub user_id: Uuid,
}

/// Resolve an optional session token into the owning user.
///
/// A missing token fails without touching the store. Any present string is a
/// valid lookup key; only whether a user is bound to it decides the outcome.
/// Missing and unknown tokens both yield [`Error::Unauthorized`].
pub async fn resolve<S>(store: &S, token: Option<&str>) -> Result<UserIdentity>
where
  S: RecordStore,
{
  let Some(token) = token else {
    tracing::debug!("rejected request without session token");
    return Err(Error::Unauthorized);
  };

  let user = store
    .find_user_by_token(token)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      tracing::debug!("rejected request with unknown session token");
      Error::Unauthorized
    })?;

  Ok(UserIdentity { user_id: user.user_id })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{testing::MemoryStore, user::register};

  #[tokio::test]
  async fn missing_token_is_unauthorized() {
    let store = MemoryStore::default();
    assert!(matches!(resolve(&store, None).await, Err(Error::Unauthorized)));
    assert_eq!(store.token_lookups(), 0);
  }

  #[tokio::test]
  async fn unknown_tokens_are_unauthorized() {
    let store = MemoryStore::default();
    register(&store, "Ana".into(), "ana@example.com".into())
      .await
      .unwrap();

    for token in ["", "not-a-token", "00000000-0000-0000-0000-000000000000"] {
      assert!(
        matches!(resolve(&store, Some(token)).await, Err(Error::Unauthorized)),
        "token {token:?} should be rejected"
      );
    }
  }

  #[tokio::test]
  async fn bound_token_resolves_to_its_user() {
    let store = MemoryStore::default();
    let ana = register(&store, "Ana".into(), "ana@example.com".into())
      .await
      .unwrap();
    let bo = register(&store, "Bo".into(), "bo@example.com".into())
      .await
      .unwrap();

    let a = resolve(&store, Some(ana.token.as_str())).await.unwrap();
    let b = resolve(&store, Some(bo.token.as_str())).await.unwrap();
    assert_eq!(a.user_id, ana.user.user_id);
    assert_eq!(b.user_id, bo.user.user_id);
  }
}
