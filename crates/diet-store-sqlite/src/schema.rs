//! SQL schema for the daily-diet SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- At most one user per session token; NULL until the first token is issued.
CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    session_token TEXT UNIQUE,
    created_at    TEXT NOT NULL    -- ISO 8601 UTC
);

-- `seq` is insertion order; it breaks ties between meals with equal dates.
CREATE TABLE IF NOT EXISTS meals (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    meal_id     TEXT NOT NULL UNIQUE,
    user_id     TEXT NOT NULL REFERENCES users(user_id),
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    is_on_diet  INTEGER NOT NULL CHECK (is_on_diet IN (0, 1)),
    date        INTEGER NOT NULL   -- milliseconds since the Unix epoch
);

CREATE INDEX IF NOT EXISTS meals_owner_date_idx ON meals(user_id, date DESC, seq);

PRAGMA user_version = 1;
";
