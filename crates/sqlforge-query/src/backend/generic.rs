//! Generic SQL dialect
//!
//! Identifiers are written unquoted and every hook keeps its default. Used
//! for logging, tests and databases without a dedicated dialect.

use super::{Dialect, SqlEngine};

/// Generic SQL dialect
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let cmd = sql_utils::drop_foreign_key("Table1", "foreignkey_name");
/// assert_eq!(
///     cmd.sql_string(&GenericDialect, false).unwrap(),
///     "ALTER TABLE Table1 DROP CONSTRAINT foreignkey_name"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
	fn engine(&self) -> SqlEngine {
		SqlEngine::Generic
	}

	fn sql_quote(&self, name: &str) -> String {
		name.to_string()
	}
}
