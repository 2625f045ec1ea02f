//! Server assembly for daily-diet: configuration and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use diet_api::{ApiState, SessionCookie, api_router};
use diet_core::{repository::RepositoryPolicy, store::RecordStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DIET_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub store_path:             PathBuf,
  /// Check meal ownership on get, update and delete.
  pub strict_ownership:       bool,
  /// Answer 404 when an update matches no meal.
  pub report_missing_updates: bool,
  pub session_max_age_secs:   u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let policy = RepositoryPolicy::default();
    Self {
      host:                   "127.0.0.1".to_string(),
      port:                   3333,
      store_path:             PathBuf::from("diet.db"),
      strict_ownership:       policy.strict_ownership,
      report_missing_updates: policy.report_missing_updates,
      session_max_age_secs:   SessionCookie::default().max_age_secs,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `DIET_*` environment
  /// variables. Missing keys fall back to [`ServerConfig::default`].
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DIET"))
      .build()?
      .try_deserialize()
  }

  pub fn policy(&self) -> RepositoryPolicy {
    RepositoryPolicy {
      strict_ownership:       self.strict_ownership,
      report_missing_updates: self.report_missing_updates,
    }
  }

  pub fn cookie(&self) -> SessionCookie {
    SessionCookie {
      max_age_secs: self.session_max_age_secs,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing applied.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: RecordStore + 'static,
{
  if !config.strict_ownership {
    tracing::warn!("strict_ownership is off: any session can read, edit or delete any meal by id");
  }
  api_router(ApiState::new(store, config.policy(), config.cookie()))
    .layer(TraceLayer::new_for_http())
}
