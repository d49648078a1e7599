//! UPDATE statement builder

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::SqlResult,
	expr::{Condition, Expression, FromClause},
	types::JoinMode,
	value::{Value, Values},
};

use super::{select::SqlSelect, traits::IsSql};

/// UPDATE statement builder
///
/// SET entries keep insertion order. A [`SqlSelect`] value renders as a
/// parenthesized subquery.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlUpdate {
	pub(crate) target: String,
	pub(crate) alias: Option<String>,
	pub(crate) updates: Vec<(String, Expression)>,
	pub(crate) from: Vec<FromClause>,
	pub(crate) where_clause: Option<Condition>,
}

impl SqlUpdate {
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			alias: None,
			updates: Vec::new(),
			from: Vec::new(),
			where_clause: None,
		}
	}

	/// Alias the target table.
	pub fn set_alias(&mut self, alias: &str) -> &mut Self {
		self.alias = Some(alias.to_string());
		self
	}

	/// `SET field=value` with a literal.
	pub fn add_constant(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
		self.add_expression(field, Expression::Constant(value.into()))
	}

	/// `SET field=expr`.
	pub fn add_expression(&mut self, field: &str, expr: Expression) -> &mut Self {
		self.updates.push((field.to_string(), expr));
		self
	}

	/// `SET field=(SELECT ..)`.
	pub fn add_query(&mut self, field: &str, query: SqlSelect) -> &mut Self {
		self.add_expression(field, Expression::query(query))
	}

	pub fn add_from(&mut self, table: &str, alias: Option<&str>) -> &mut Self {
		self.from.push(FromClause::table(table, alias));
		self
	}

	pub fn add_from_inner(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.from
			.push(FromClause::table(table, Some(alias)).join(JoinMode::Inner, on));
		self
	}

	pub fn add_from_clause(&mut self, from: FromClause) -> &mut Self {
		self.from.push(from);
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

	pub fn updates(&self) -> &[(String, Expression)] {
		&self.updates
	}

	pub fn from_clauses(&self) -> &[FromClause] {
		&self.from
	}

	pub fn where_clause(&self) -> Option<&Condition> {
		self.where_clause.as_ref()
	}
}

impl IsSql for SqlUpdate {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_update(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		for (_, expr) in &self.updates {
			values.extend(expr.sql_params());
		}
		for from in &self.from {
			values.extend(from.sql_params());
		}
		if let Some(condition) = &self.where_clause {
			values.extend(condition.sql_params());
		}
		values
	}

	fn is_empty(&self) -> bool {
		self.target.is_empty() || self.updates.is_empty()
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::from([self.target.clone()]);
		for (_, expr) in &self.updates {
			sources.extend(expr.sources());
		}
		for from in &self.from {
			sources.extend(from.sources());
		}
		if let Some(condition) = &self.where_clause {
			sources.extend(condition.sources());
		}
		sources
	}
}
