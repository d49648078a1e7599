//! Administrative and introspection commands.

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::SqlResult,
	types::{Keyword, KeywordParam, KeywordParams},
	value::Values,
};

use super::traits::IsSql;

/// A statement described entirely by a dialect keyword.
///
/// Covers DDL (indexes, constraints, drops, renames) and catalog queries
/// that differ too much between databases to be modelled as statement
/// trees. Expression and condition parameters are rendered inline before
/// the dialect sees them, so a command never has bind parameters.
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let cmd = sql_utils::drop_table("Users");
/// assert_eq!(cmd.sql_string(&MySqlDialect, false).unwrap(), "DROP TABLE `Users`");
/// assert!(cmd.sql_params().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCommand {
	pub(crate) keyword: Keyword,
	pub(crate) params: KeywordParams,
}

impl SqlCommand {
	pub fn new(keyword: Keyword, params: KeywordParams) -> Self {
		Self { keyword, params }
	}

	pub fn keyword(&self) -> Keyword {
		self.keyword
	}

	pub fn params(&self) -> &KeywordParams {
		&self.params
	}
}

impl IsSql for SqlCommand {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_command(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		Values::new()
	}

	fn is_empty(&self) -> bool {
		false
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::new();
		for (_, param) in self.params.iter() {
			match param {
				KeywordParam::Expression(expr) => sources.extend(expr.sources()),
				KeywordParam::Condition(condition) => sources.extend(condition.sources()),
				_ => {}
			}
		}
		sources
	}
}
