//! SELECT statement builder
//!
//! This module provides the `SqlSelect` type for building SQL SELECT queries.

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::{SqlError, SqlResult},
	expr::{Condition, Expression, FromClause},
	types::{JoinMode, SqlFunction},
	value::Values,
};

use super::traits::IsSql;

/// One entry of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectField {
	pub expr: Expression,
	pub alias: Option<String>,
}

/// One ORDER BY entry.
///
/// Rendered as `source.field`, or as the bare `field` when the source is
/// empty or the query has UNION branches.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
	pub source: String,
	pub field: String,
	pub desc: bool,
}

/// SELECT statement builder
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut select = SqlSelect::new();
/// select
///     .add_fields("Users", ["Id", "Name"])
///     .add_from("Users")
///     .set_where(sql_utils::equal("Users", "Active", true));
///
/// assert_eq!(
///     select.sql_string(&GenericDialect, false).unwrap(),
///     "SELECT Users.Id, Users.Name FROM Users WHERE Users.Active = 1"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlSelect {
	pub(crate) distinct: bool,
	pub(crate) fields: Vec<SelectField>,
	pub(crate) from: Vec<FromClause>,
	pub(crate) where_clause: Option<Condition>,
	pub(crate) group_by: Vec<Expression>,
	pub(crate) having: Option<Condition>,
	pub(crate) unions: Vec<SqlSelect>,
	pub(crate) union_all: bool,
	pub(crate) order_by: Vec<OrderEntry>,
	pub(crate) limit: Option<u64>,
	pub(crate) offset: Option<u64>,
}

impl SqlSelect {
	/// Create a new SELECT statement
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_distinct(&mut self, distinct: bool) -> &mut Self {
		self.distinct = distinct;
		self
	}

	/// Add `source.name` for every name.
	pub fn add_fields<I, S>(&mut self, source: &str, names: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for name in names {
			self.add_expr(Expression::field(source, name), None);
		}
		self
	}

	/// Add `source.name AS alias`.
	pub fn add_field(&mut self, source: &str, name: &str, alias: &str) -> &mut Self {
		self.add_expr(Expression::field(source, name), Some(alias))
	}

	/// Add `source.*`.
	pub fn add_all_fields(&mut self, source: &str) -> &mut Self {
		self.add_expr(Expression::field(source, "*"), None)
	}

	/// Add an arbitrary expression, optionally aliased.
	pub fn add_expr(&mut self, expr: Expression, alias: Option<&str>) -> &mut Self {
		self.fields.push(SelectField {
			expr,
			alias: alias.map(str::to_string),
		});
		self
	}

	fn add_aggregate(
		&mut self,
		function: SqlFunction,
		source: &str,
		name: &str,
		alias: &str,
	) -> &mut Self {
		self.add_expr(
			Expression::function(function, vec![Expression::field(source, name)]),
			Some(alias),
		)
	}

	pub fn add_sum(&mut self, source: &str, name: &str, alias: &str) -> &mut Self {
		self.add_aggregate(SqlFunction::Sum, source, name, alias)
	}

	pub fn add_min(&mut self, source: &str, name: &str, alias: &str) -> &mut Self {
		self.add_aggregate(SqlFunction::Min, source, name, alias)
	}

	pub fn add_max(&mut self, source: &str, name: &str, alias: &str) -> &mut Self {
		self.add_aggregate(SqlFunction::Max, source, name, alias)
	}

	pub fn add_avg(&mut self, source: &str, name: &str, alias: &str) -> &mut Self {
		self.add_aggregate(SqlFunction::Avg, source, name, alias)
	}

	/// Add `COUNT(*) AS alias`.
	pub fn add_count(&mut self, alias: &str) -> &mut Self {
		self.add_expr(Expression::function(SqlFunction::Count, Vec::new()), Some(alias))
	}

	/// Add a table source.
	pub fn add_from(&mut self, table: &str) -> &mut Self {
		self.add_from_clause(FromClause::table(table, None))
	}

	/// Add an aliased table source.
	pub fn add_from_as(&mut self, table: &str, alias: &str) -> &mut Self {
		self.add_from_clause(FromClause::table(table, Some(alias)))
	}

	/// Add an aliased subquery source.
	pub fn add_from_subquery(&mut self, query: SqlSelect, alias: &str) -> &mut Self {
		self.add_from_clause(FromClause::query(query, alias))
	}

	pub fn add_from_inner(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.add_join(JoinMode::Inner, table, alias, on)
	}

	pub fn add_from_left(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.add_join(JoinMode::Left, table, alias, on)
	}

	pub fn add_from_right(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.add_join(JoinMode::Right, table, alias, on)
	}

	pub fn add_from_full(&mut self, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.add_join(JoinMode::Full, table, alias, on)
	}

	fn add_join(&mut self, mode: JoinMode, table: &str, alias: &str, on: Condition) -> &mut Self {
		self.add_from_clause(FromClause::table(table, Some(alias)).join(mode, on))
	}

	pub fn add_from_clause(&mut self, from: FromClause) -> &mut Self {
		self.from.push(from);
		self
	}

	/// Set the WHERE condition; `None` leaves the clause out.
	pub fn set_where(&mut self, condition: impl Into<Option<Condition>>) -> &mut Self {
		self.where_clause = condition.into();
		self
	}

	/// Add `source.name` for every name to GROUP BY.
	pub fn add_group<I, S>(&mut self, source: &str, names: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for name in names {
			self.group_by.push(Expression::field(source, name));
		}
		self
	}

	pub fn add_group_expr(&mut self, expr: Expression) -> &mut Self {
		self.group_by.push(expr);
		self
	}

	pub fn set_having(&mut self, condition: impl Into<Option<Condition>>) -> &mut Self {
		self.having = condition.into();
		self
	}

	/// Add a UNION branch.
	pub fn add_union(&mut self, query: SqlSelect) -> &mut Self {
		self.unions.push(query);
		self
	}

	/// Use `UNION ALL` instead of `UNION` for every branch.
	pub fn set_union_all(&mut self, union_all: bool) -> &mut Self {
		self.union_all = union_all;
		self
	}

	/// Order by `source.field` ascending; pass an empty source for an alias.
	pub fn add_order(&mut self, source: &str, field: &str) -> &mut Self {
		self.push_order(source, field, false)
	}

	pub fn add_order_desc(&mut self, source: &str, field: &str) -> &mut Self {
		self.push_order(source, field, true)
	}

	fn push_order(&mut self, source: &str, field: &str, desc: bool) -> &mut Self {
		self.order_by.push(OrderEntry {
			source: source.to_string(),
			field: field.to_string(),
			desc,
		});
		self
	}

	pub fn set_limit(&mut self, limit: u64) -> &mut Self {
		self.limit = Some(limit);
		self
	}

	pub fn set_offset(&mut self, offset: u64) -> &mut Self {
		self.offset = Some(offset);
		self
	}

	/// The field at `index`.
	pub fn field(&self, index: usize) -> SqlResult<&SelectField> {
		self.fields.get(index).ok_or(SqlError::InvalidIndex {
			index,
			size: self.fields.len(),
		})
	}

	pub fn fields(&self) -> &[SelectField] {
		&self.fields
	}

	pub fn from_clauses(&self) -> &[FromClause] {
		&self.from
	}

	pub fn where_clause(&self) -> Option<&Condition> {
		self.where_clause.as_ref()
	}

	pub fn group_by(&self) -> &[Expression] {
		&self.group_by
	}

	pub fn having(&self) -> Option<&Condition> {
		self.having.as_ref()
	}

	pub fn unions(&self) -> &[SqlSelect] {
		&self.unions
	}

	pub fn is_union_all(&self) -> bool {
		self.union_all
	}

	pub fn order_by(&self) -> &[OrderEntry] {
		&self.order_by
	}

	pub fn is_distinct(&self) -> bool {
		self.distinct
	}

	pub fn limit(&self) -> Option<u64> {
		self.limit
	}

	pub fn offset(&self) -> Option<u64> {
		self.offset
	}
}

impl IsSql for SqlSelect {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_query(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		for field in &self.fields {
			values.extend(field.expr.sql_params());
		}
		for from in &self.from {
			values.extend(from.sql_params());
		}
		if let Some(condition) = &self.where_clause {
			values.extend(condition.sql_params());
		}
		for group in &self.group_by {
			values.extend(group.sql_params());
		}
		if let Some(condition) = &self.having {
			values.extend(condition.sql_params());
		}
		for union in &self.unions {
			values.extend(union.sql_params());
		}
		values
	}

	fn is_empty(&self) -> bool {
		self.fields.is_empty() || self.from.is_empty()
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::new();
		for field in &self.fields {
			sources.extend(field.expr.sources());
		}
		for from in &self.from {
			sources.extend(from.sources());
		}
		if let Some(condition) = &self.where_clause {
			sources.extend(condition.sources());
		}
		if let Some(condition) = &self.having {
			sources.extend(condition.sources());
		}
		for union in &self.unions {
			sources.extend(union.sources());
		}
		sources
	}
}
