//! FROM clause entries.

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::SqlResult,
	query::{IsSql, SqlSelect},
	types::JoinMode,
	value::Values,
};

use super::Condition;

/// What a FROM entry reads from.
#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
	/// Table, optionally aliased
	Table { name: String, alias: Option<String> },
	/// Aliased subquery
	Query { query: Box<SqlSelect>, alias: String },
}

/// One entry of a statement's source list.
///
/// The join mode prefix is written by the statement that owns the list,
/// since only it knows whether the entry comes first.
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
	pub(crate) mode: JoinMode,
	pub(crate) source: FromSource,
	pub(crate) on: Option<Condition>,
}

impl FromClause {
	/// A plain table entry.
	pub fn table(name: impl Into<String>, alias: Option<&str>) -> Self {
		Self {
			mode: JoinMode::Plain,
			source: FromSource::Table {
				name: name.into(),
				alias: alias.map(str::to_string),
			},
			on: None,
		}
	}

	/// A plain subquery entry.
	pub fn query(query: SqlSelect, alias: impl Into<String>) -> Self {
		Self {
			mode: JoinMode::Plain,
			source: FromSource::Query {
				query: Box::new(query),
				alias: alias.into(),
			},
			on: None,
		}
	}

	/// Attach this entry with `mode` on `on`.
	#[must_use]
	pub fn join(mut self, mode: JoinMode, on: Condition) -> Self {
		self.mode = mode;
		self.on = Some(on);
		self
	}

	pub fn mode(&self) -> JoinMode {
		self.mode
	}

	pub fn source(&self) -> &FromSource {
		&self.source
	}

	pub fn on(&self) -> Option<&Condition> {
		self.on.as_ref()
	}
}

impl IsSql for FromClause {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		let mut sql = match &self.source {
			FromSource::Table { name, alias } => match alias {
				Some(alias) => format!("{} {}", dialect.sql_name(name), dialect.sql_quote(alias)),
				None => dialect.sql_name(name),
			},
			FromSource::Query { query, alias } => format!(
				"({}) {}",
				query.sql_string(dialect, param_mode)?,
				dialect.sql_quote(alias)
			),
		};
		if let Some(on) = self.on.as_ref().filter(|c| !c.is_empty()) {
			sql.push_str(" ON ");
			sql.push_str(&on.sql_string(dialect, param_mode)?);
		}
		Ok(sql)
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		if let FromSource::Query { query, .. } = &self.source {
			values.extend(query.sql_params());
		}
		if let Some(on) = &self.on {
			values.extend(on.sql_params());
		}
		values
	}

	fn is_empty(&self) -> bool {
		match &self.source {
			FromSource::Table { name, .. } => name.is_empty(),
			FromSource::Query { query, .. } => query.is_empty(),
		}
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = match &self.source {
			FromSource::Table { name, .. } => BTreeSet::from([name.clone()]),
			FromSource::Query { query, .. } => query.sources(),
		};
		if let Some(on) = &self.on {
			sources.extend(on.sources());
		}
		sources
	}
}
