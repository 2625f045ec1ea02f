//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::Utc;
use diet_core::{
  meal::{Meal, MealFields},
  metrics::Metrics,
  repository::{MealRepository, RepositoryPolicy},
  session::{self, UserIdentity},
  store::RecordStore,
  user::{User, register},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn add_user(s: &SqliteStore, email: &str, token: Option<&str>) -> User {
  let user = User {
    user_id:       Uuid::new_v4(),
    name:          "Test".into(),
    email:         email.into(),
    session_token: token.map(str::to_owned),
    created_at:    Utc::now(),
  };
  s.insert_user(user.clone()).await.unwrap();
  user
}

fn meal(user_id: Uuid, name: &str, is_on_diet: bool, date: i64) -> Meal {
  Meal::new(user_id, MealFields {
    name: name.into(),
    description: format!("It's a {name}"),
    is_on_diet,
    date,
  })
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_user_by_token() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", Some("tok-a")).await;
  add_user(&s, "b@example.com", None).await;

  let found = s.find_user_by_token("tok-a").await.unwrap().unwrap();
  assert_eq!(found.user_id, user.user_id);
  assert_eq!(found.email, "a@example.com");
  assert_eq!(found.session_token.as_deref(), Some("tok-a"));

  assert!(s.find_user_by_token("tok-b").await.unwrap().is_none());
  assert!(s.find_user_by_token("").await.unwrap().is_none());
}

#[tokio::test]
async fn set_session_token_rebinds() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", Some("old")).await;

  let affected = s.set_session_token(user.user_id, "new").await.unwrap();
  assert_eq!(affected, 1);
  assert!(s.find_user_by_token("old").await.unwrap().is_none());
  assert_eq!(
    s.find_user_by_token("new").await.unwrap().unwrap().user_id,
    user.user_id
  );

  assert_eq!(s.set_session_token(Uuid::new_v4(), "x").await.unwrap(), 0);
}

#[tokio::test]
async fn session_token_is_unique() {
  let s = store().await;
  add_user(&s, "a@example.com", Some("shared")).await;
  let other = add_user(&s, "b@example.com", None).await;

  assert!(s.set_session_token(other.user_id, "shared").await.is_err());
}

#[tokio::test]
async fn find_user_by_email() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", None).await;

  let found = s.find_user_by_email("a@example.com").await.unwrap().unwrap();
  assert_eq!(found.user_id, user.user_id);
  assert!(found.session_token.is_none());
  assert!(s.find_user_by_email("nobody@example.com").await.unwrap().is_none());
}

// ─── Meals ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_meal() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", None).await;

  let m = meal(user.user_id, "breakfast", true, 1_700_000_000_000);
  s.insert_meal(m.clone()).await.unwrap();

  let fetched = s.find_meal_by_id(m.meal_id).await.unwrap().unwrap();
  assert_eq!(fetched, m);
  assert!(s.find_meal_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_orders_by_date_desc_then_insertion() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", None).await;

  for (name, date) in [("a", 10), ("b", 30), ("c", 20), ("d", 30), ("e", 30)] {
    s.insert_meal(meal(user.user_id, name, true, date)).await.unwrap();
  }

  let names: Vec<_> = s
    .list_meals_by_owner(user.user_id)
    .await
    .unwrap()
    .into_iter()
    .map(|m| m.name)
    .collect();
  assert_eq!(names, ["b", "d", "e", "c", "a"]);
}

#[tokio::test]
async fn list_is_scoped_to_owner() {
  let s = store().await;
  let a = add_user(&s, "a@example.com", None).await;
  let b = add_user(&s, "b@example.com", None).await;

  s.insert_meal(meal(a.user_id, "mine", true, 1)).await.unwrap();
  s.insert_meal(meal(b.user_id, "theirs", false, 2)).await.unwrap();

  let meals = s.list_meals_by_owner(a.user_id).await.unwrap();
  assert_eq!(meals.len(), 1);
  assert_eq!(meals[0].name, "mine");
  assert!(s.list_meals_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_fields_but_not_owner() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", None).await;
  let m = meal(user.user_id, "lunch", true, 5);
  s.insert_meal(m.clone()).await.unwrap();

  let fields = MealFields {
    name:        "late lunch".into(),
    description: "pizza".into(),
    is_on_diet:  false,
    date:        6,
  };
  assert_eq!(s.update_meal_fields(m.meal_id, fields.clone()).await.unwrap(), 1);

  let updated = s.find_meal_by_id(m.meal_id).await.unwrap().unwrap();
  assert_eq!(updated.fields(), fields);
  assert_eq!(updated.user_id, user.user_id);

  assert_eq!(s.update_meal_fields(Uuid::new_v4(), fields).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_reports_affected_rows() {
  let s = store().await;
  let user = add_user(&s, "a@example.com", None).await;
  let m = meal(user.user_id, "dinner", false, 9);
  s.insert_meal(m.clone()).await.unwrap();

  assert_eq!(s.delete_meal_by_id(m.meal_id).await.unwrap(), 1);
  assert_eq!(s.delete_meal_by_id(m.meal_id).await.unwrap(), 0);
  assert!(s.find_meal_by_id(m.meal_id).await.unwrap().is_none());
}

#[tokio::test]
async fn meal_requires_existing_owner() {
  let s = store().await;
  assert!(s.insert_meal(meal(Uuid::new_v4(), "orphan", true, 1)).await.is_err());
}

// ─── End to end through the core services ────────────────────────────────────

#[tokio::test]
async fn registered_session_drives_repository_and_metrics() {
  let s = Arc::new(store().await);
  let reg = register(s.as_ref(), "Test".into(), "test@example.com".into())
    .await
    .unwrap();

  let owner: UserIdentity = session::resolve(s.as_ref(), Some(reg.token.as_str()))
    .await
    .unwrap();
  let repo = MealRepository::new(Arc::clone(&s), RepositoryPolicy::default());

  let day = 24 * 60 * 60 * 1000;
  let start = 1_700_000_000_000_i64;
  for (i, on_diet) in [true, false, true, true, true].into_iter().enumerate() {
    repo
      .create(owner, MealFields {
        name:        format!("meal {i}"),
        description: String::new(),
        is_on_diet:  on_diet,
        date:        start + day * i as i64,
      })
      .await
      .unwrap();
  }

  assert_eq!(repo.metrics(owner).await.unwrap(), Metrics {
    total_meals:         5,
    total_on_diet:       4,
    total_off_diet:      1,
    best_on_diet_streak: 3,
  });
}
