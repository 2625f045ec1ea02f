//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use diet_core::{
  meal::{Meal, MealFields},
  store::RecordStore,
  user::User,
};

use crate::{
  encode::{MEAL_COLUMNS, RawMeal, RawUser, USER_COLUMNS, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A daily-diet record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_user_where(&self, column: &'static str, value: String) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?1"),
            rusqlite::params![value],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn find_user_by_token(&self, token: &str) -> Result<Option<User>> {
    self.find_user_where("session_token", token.to_owned()).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    self.find_user_where("email", email.to_owned()).await
  }

  async fn insert_user(&self, user: User) -> Result<()> {
    let id_str = encode_uuid(user.user_id);
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, name, email, session_token, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, user.name, user.email, user.session_token, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_session_token(&self, user_id: Uuid, token: &str) -> Result<usize> {
    let id_str = encode_uuid(user_id);
    let token  = token.to_owned();

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET session_token = ?1 WHERE user_id = ?2",
          rusqlite::params![token, id_str],
        )?)
      })
      .await?;
    Ok(affected)
  }

  // ── Meals ─────────────────────────────────────────────────────────────────

  async fn find_meal_by_id(&self, meal_id: Uuid) -> Result<Option<Meal>> {
    let id_str = encode_uuid(meal_id);

    let raw: Option<RawMeal> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {MEAL_COLUMNS} FROM meals WHERE meal_id = ?1"),
            rusqlite::params![id_str],
            RawMeal::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMeal::into_meal).transpose()
  }

  async fn list_meals_by_owner(&self, user_id: Uuid) -> Result<Vec<Meal>> {
    let id_str = encode_uuid(user_id);

    let raws: Vec<RawMeal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MEAL_COLUMNS} FROM meals
           WHERE user_id = ?1
           ORDER BY date DESC, seq ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawMeal::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMeal::into_meal).collect()
  }

  async fn insert_meal(&self, meal: Meal) -> Result<()> {
    let meal_id_str = encode_uuid(meal.meal_id);
    let user_id_str = encode_uuid(meal.user_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO meals (meal_id, user_id, name, description, is_on_diet, date)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            meal_id_str,
            user_id_str,
            meal.name,
            meal.description,
            meal.is_on_diet,
            meal.date,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_meal_fields(&self, meal_id: Uuid, fields: MealFields) -> Result<usize> {
    let id_str = encode_uuid(meal_id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE meals
           SET name = ?1, description = ?2, is_on_diet = ?3, date = ?4
           WHERE meal_id = ?5",
          rusqlite::params![
            fields.name,
            fields.description,
            fields.is_on_diet,
            fields.date,
            id_str,
          ],
        )?)
      })
      .await?;
    Ok(affected)
  }

  async fn delete_meal_by_id(&self, meal_id: Uuid) -> Result<usize> {
    let id_str = encode_uuid(meal_id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM meals WHERE meal_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(affected)
  }
}
