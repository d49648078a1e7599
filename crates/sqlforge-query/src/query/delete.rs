//! DELETE statement builder

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::SqlResult,
	expr::{Condition, FromClause},
	types::JoinMode,
	value::Values,
};

use super::traits::IsSql;

/// DELETE statement builder
///
/// A DELETE without a non-empty WHERE condition is empty and refuses to
/// render. Deleting every row takes an explicit condition that always
/// holds, e.g. [`sql_utils::always`](crate::sql_utils::always).
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut delete = SqlDelete::new("Users");
/// assert!(delete.is_empty());
///
/// delete.set_where(sql_utils::equal("Users", "Id", 7));
/// assert_eq!(
///     delete.sql_string(&GenericDialect, true).unwrap(),
///     "DELETE FROM Users WHERE Users.Id = ?"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SqlDelete {
	pub(crate) target: String,
	pub(crate) alias: Option<String>,
	pub(crate) from: Vec<FromClause>,
	pub(crate) where_clause: Option<Condition>,
}

impl SqlDelete {
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			alias: None,
			from: Vec::new(),
			where_clause: None,
		}
	}

	/// Alias the target table.
	pub fn set_alias(&mut self, alias: &str) -> &mut Self {
		self.alias = Some(alias.to_string());
		self
	}

	/// Add a source the WHERE condition may reference.
	pub fn add_from(&mut self, table: &str, alias: Option<&str>) -> &mut Self {
		self.from.push(FromClause::table(table, alias));
		self
	}

	pub fn add_from_inner(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.from
			.push(FromClause::table(table, Some(alias)).join(JoinMode::Inner, on));
		self
	}

	pub fn set_where(&mut self, condition: impl Into<Option<Condition>>) -> &mut Self {
		self.where_clause = condition.into();
		self
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn alias(&self) -> Option<&str> {
		self.alias.as_deref()
	}

	pub fn from_clauses(&self) -> &[FromClause] {
		&self.from
	}

	pub fn where_clause(&self) -> Option<&Condition> {
		self.where_clause.as_ref()
	}
}

impl IsSql for SqlDelete {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_delete(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		for from in &self.from {
			values.extend(from.sql_params());
		}
		if let Some(condition) = &self.where_clause {
			values.extend(condition.sql_params());
		}
		values
	}

	fn is_empty(&self) -> bool {
		self.target.is_empty()
			|| self
				.where_clause
				.as_ref()
				.is_none_or(|condition| condition.is_empty())
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::from([self.target.clone()]);
		for from in &self.from {
			sources.extend(from.sources());
		}
		if let Some(condition) = &self.where_clause {
			sources.extend(condition.sources());
		}
		sources
	}
}
