//! INSERT statement builder
//!
//! This module provides the `SqlInsert` type for building SQL INSERT queries.

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::{SqlError, SqlResult},
	expr::Expression,
	value::{Value, Values},
};

use super::{select::SqlSelect, traits::IsSql};

/// INSERT statement builder
///
/// Rows come either from field/value pairs or from a SELECT data source
/// paired with a field list.
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut insert = SqlInsert::new("Users");
/// insert.add_constant("Name", "Ann").add_constant("Age", 30);
/// assert_eq!(insert.sql_params(), Values(vec![Value::from("Ann"), Value::from(30)]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SqlInsert {
	pub(crate) target: String,
	pub(crate) fields: Vec<String>,
	pub(crate) values: Vec<Expression>,
	pub(crate) data_source: Option<Box<SqlSelect>>,
}

impl SqlInsert {
	/// Create a new INSERT statement
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			fields: Vec::new(),
			values: Vec::new(),
			data_source: None,
		}
	}

	/// Insert a literal into `field`.
	pub fn add_constant(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
		self.add_expression(field, Expression::Constant(value.into()))
	}

	/// Insert an expression into `field`.
	pub fn add_expression(&mut self, field: &str, expr: Expression) -> &mut Self {
		self.fields.push(field.to_string());
		self.values.push(expr);
		self
	}

	/// Add target fields filled by the data source.
	pub fn add_fields<I, S>(&mut self, fields: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields.extend(fields.into_iter().map(Into::into));
		self
	}

	/// Take rows from `query` instead of a VALUES list.
	pub fn set_data_source(&mut self, query: SqlSelect) -> &mut Self {
		self.data_source = Some(Box::new(query));
		self
	}

	/// The value inserted at `index`.
	pub fn value(&self, index: usize) -> SqlResult<&Expression> {
		self.values.get(index).ok_or(SqlError::InvalidIndex {
			index,
			size: self.values.len(),
		})
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn fields(&self) -> &[String] {
		&self.fields
	}

	pub fn values(&self) -> &[Expression] {
		&self.values
	}

	pub fn data_source(&self) -> Option<&SqlSelect> {
		self.data_source.as_deref()
	}
}

impl IsSql for SqlInsert {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_insert(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		let mut params = Values::new();
		match &self.data_source {
			Some(query) => params.extend(query.sql_params()),
			None => {
				for value in &self.values {
					params.extend(value.sql_params());
				}
			}
		}
		params
	}

	fn is_empty(&self) -> bool {
		if self.target.is_empty() || self.fields.is_empty() {
			return true;
		}
		match &self.data_source {
			Some(query) => query.is_empty(),
			None => self.values.len() != self.fields.len(),
		}
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::from([self.target.clone()]);
		if let Some(query) = &self.data_source {
			sources.extend(query.sources());
		}
		for value in &self.values {
			sources.extend(value.sources());
		}
		sources
	}
}
