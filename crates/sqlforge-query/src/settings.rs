//! Builder settings
//!
//! Selects the target engine and whether literals become bind parameters.
//! Settings are read from TOML and can be overridden from the environment:
//!
//! ```toml
//! engine = "postgres"
//! param_mode = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
	backend::{self, Dialect, SqlEngine},
	error::{SqlError, SqlResult},
	query::IsSql,
	value::Values,
};

/// Environment variable overriding [`BuilderSettings::engine`].
pub const ENGINE_ENV: &str = "SQLFORGE_ENGINE";
/// Environment variable overriding [`BuilderSettings::param_mode`].
pub const PARAM_MODE_ENV: &str = "SQLFORGE_PARAM_MODE";

fn default_param_mode() -> bool {
	true
}

fn parse_flag(name: &'static str, value: &str) -> SqlResult<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(SqlError::InvalidSetting {
			name,
			value: value.to_string(),
		}),
	}
}

/// Statement rendering configuration
///
/// # Examples
///
/// ```
/// use sqlforge_query::prelude::*;
///
/// let settings = BuilderSettings::from_toml_str("engine = \"MySQL\"").unwrap();
/// assert_eq!(settings.engine, SqlEngine::MySql);
/// assert!(settings.param_mode);
///
/// let (sql, values) = settings.render(&sql_utils::drop_table("Users")).unwrap();
/// assert_eq!(sql, "DROP TABLE `Users`");
/// assert!(values.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSettings {
	/// Target database engine
	#[serde(default)]
	pub engine: SqlEngine,

	/// Render non-NULL literals as `?` placeholders
	#[serde(default = "default_param_mode")]
	pub param_mode: bool,
}

impl Default for BuilderSettings {
	fn default() -> Self {
		Self {
			engine: SqlEngine::default(),
			param_mode: default_param_mode(),
		}
	}
}

impl BuilderSettings {
	pub fn new(engine: SqlEngine) -> Self {
		Self {
			engine,
			..Self::default()
		}
	}

	/// Inline every literal instead of binding it.
	#[must_use]
	pub fn with_param_mode(mut self, param_mode: bool) -> Self {
		self.param_mode = param_mode;
		self
	}

	/// Parse settings from TOML text.
	pub fn from_toml_str(contents: &str) -> SqlResult<Self> {
		let settings: Self = toml::from_str(contents)?;
		debug!(engine = %settings.engine, param_mode = settings.param_mode, "loaded builder settings");
		Ok(settings)
	}

	/// Load settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> SqlResult<Self> {
		let path = path.as_ref();
		debug!(path = %path.display(), "reading builder settings");
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml_str(&contents)
	}

	/// Apply `SQLFORGE_ENGINE` and `SQLFORGE_PARAM_MODE` when set.
	pub fn with_env_overrides(self) -> SqlResult<Self> {
		self.with_overrides(
			std::env::var(ENGINE_ENV).ok().as_deref(),
			std::env::var(PARAM_MODE_ENV).ok().as_deref(),
		)
	}

	fn with_overrides(mut self, engine: Option<&str>, param_mode: Option<&str>) -> SqlResult<Self> {
		if let Some(engine) = engine {
			self.engine = engine.parse()?;
			debug!(engine = %self.engine, "engine overridden from environment");
		}
		if let Some(param_mode) = param_mode {
			self.param_mode = parse_flag(PARAM_MODE_ENV, param_mode)?;
			debug!(param_mode = self.param_mode, "param mode overridden from environment");
		}
		Ok(self)
	}

	/// The renderer for the configured engine.
	pub fn dialect(&self) -> &'static dyn Dialect {
		self.engine.dialect()
	}

	/// Render `stmt` with the configured engine and parameter mode.
	pub fn render<S: IsSql + ?Sized>(&self, stmt: &S) -> SqlResult<(String, Values)> {
		backend::render(stmt, self.dialect(), self.param_mode)
	}
}
