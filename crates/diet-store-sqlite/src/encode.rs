//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings and `created_at` as an
//! RFC 3339 string. Meal dates stay integers end to end.

use chrono::{DateTime, Utc};
use diet_core::{meal::Meal, user::User};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str = "user_id, name, email, session_token, created_at";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub name:          String,
  pub email:         String,
  pub session_token: Option<String>,
  pub created_at:    String,
}

impl RawUser {
  /// Map a row selected with [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:       row.get(0)?,
      name:          row.get(1)?,
      email:         row.get(2)?,
      session_token: row.get(3)?,
      created_at:    row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      name:          self.name,
      email:         self.email,
      session_token: self.session_token,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

pub const MEAL_COLUMNS: &str = "meal_id, user_id, name, description, is_on_diet, date";

/// Raw values read directly from a `meals` row.
pub struct RawMeal {
  pub meal_id:     String,
  pub user_id:     String,
  pub name:        String,
  pub description: String,
  pub is_on_diet:  bool,
  pub date:        i64,
}

impl RawMeal {
  /// Map a row selected with [`MEAL_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      meal_id:     row.get(0)?,
      user_id:     row.get(1)?,
      name:        row.get(2)?,
      description: row.get(3)?,
      is_on_diet:  row.get(4)?,
      date:        row.get(5)?,
    })
  }

  pub fn into_meal(self) -> Result<Meal> {
    Ok(Meal {
      meal_id:     decode_uuid(&self.meal_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      name:        self.name,
      description: self.description,
      is_on_diet:  self.is_on_diet,
      date:        self.date,
    })
  }
}
