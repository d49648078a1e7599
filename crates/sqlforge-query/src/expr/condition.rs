//! Condition nodes for WHERE, HAVING and join clauses.
//!
//! Compound conditions with no non-empty children are themselves empty and
//! render as an empty string, so optional filters can be combined without
//! checking each one first:
//!
//! ```rust
//! use sqlforge_query::prelude::*;
//!
//! let active = sql_utils::equal("Users", "Active", true);
//! let cond = Condition::all().add(active.clone()).add(Condition::any());
//!
//! let dialect = GenericDialect;
//! assert_eq!(
//!     cond.sql_string(&dialect, false).unwrap(),
//!     active.sql_string(&dialect, false).unwrap()
//! );
//! ```

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::{SqlError, SqlResult},
	query::{IsSql, SqlSelect},
	types::{Keyword, KeywordParams, Operator},
	value::Values,
};

use super::Expression;

/// A boolean node.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
	/// `left op right`
	Comparison {
		left: Expression,
		op: Operator,
		right: Expression,
	},
	/// `expr LIKE pattern [ESCAPE 'c']`
	Like {
		expr: Expression,
		pattern: Expression,
		escape: Option<char>,
	},
	/// `expr IN (v1, v2, ..)`
	InList {
		expr: Expression,
		values: Vec<Expression>,
	},
	/// `expr IN (SELECT ..)`
	InQuery {
		expr: Expression,
		query: Box<SqlSelect>,
	},
	IsNull(Expression),
	NotNull(Expression),
	/// Conjunction; empty children are skipped
	And(Vec<Condition>),
	/// Disjunction; empty children are skipped
	Or(Vec<Condition>),
	Not(Box<Condition>),
}

impl Condition {
	/// Create an empty conjunction.
	pub fn all() -> Self {
		Self::And(Vec::new())
	}

	/// Create an empty disjunction.
	pub fn any() -> Self {
		Self::Or(Vec::new())
	}

	/// Append a condition.
	///
	/// Children of the same combinator are flattened into this one. Adding
	/// to a leaf wraps both in a conjunction.
	#[must_use]
	// Intentional builder-pattern method, not std::ops::Add
	#[allow(clippy::should_implement_trait)]
	pub fn add(self, condition: Condition) -> Self {
		match (self, condition) {
			(Self::And(mut items), Self::And(more)) => {
				items.extend(more);
				Self::And(items)
			}
			(Self::Or(mut items), Self::Or(more)) => {
				items.extend(more);
				Self::Or(items)
			}
			(Self::And(mut items), other) => {
				items.push(other);
				Self::And(items)
			}
			(Self::Or(mut items), other) => {
				items.push(other);
				Self::Or(items)
			}
			(leaf, other) => Self::And(vec![leaf, other]),
		}
	}

	/// Append a condition only if the option is Some.
	#[must_use]
	pub fn add_option(self, condition: Option<Condition>) -> Self {
		match condition {
			Some(c) => self.add(c),
			None => self,
		}
	}

	/// Negate this condition.
	#[must_use]
	// Intentional builder-pattern method, not std::ops::Not
	#[allow(clippy::should_implement_trait)]
	pub fn not(self) -> Self {
		Self::Not(Box::new(self))
	}

	fn children(&self) -> Option<impl Iterator<Item = &Condition>> {
		match self {
			Self::And(items) | Self::Or(items) => Some(items.iter().filter(|c| !c.is_empty())),
			_ => None,
		}
	}

	/// Whether this compound would render more than one child.
	fn is_multi(&self) -> bool {
		self.children().is_some_and(|mut c| c.nth(1).is_some())
	}

	fn render_compound<D: Dialect + ?Sized>(
		&self,
		dialect: &D,
		param_mode: bool,
	) -> SqlResult<String> {
		let separator = match self {
			Self::Or(_) => " OR ",
			_ => " AND ",
		};
		let mut parts = Vec::new();
		if let Some(children) = self.children() {
			for child in children {
				let sql = child.sql_string(dialect, param_mode)?;
				let nested = matches!(
					(self, child),
					(Self::And(_), Self::Or(_)) | (Self::Or(_), Self::And(_))
				);
				if nested && child.is_multi() {
					parts.push(format!("({})", sql));
				} else {
					parts.push(sql);
				}
			}
		}
		Ok(parts.join(separator))
	}
}

impl IsSql for Condition {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		match self {
			Self::Comparison { left, op, right } => Ok(format!(
				"{} {} {}",
				left.sql_string(dialect, param_mode)?,
				op.as_str(),
				right.sql_string(dialect, param_mode)?
			)),
			Self::Like {
				expr,
				pattern,
				escape,
			} => {
				let mut sql = format!(
					"{} {} {}",
					expr.sql_string(dialect, param_mode)?,
					dialect.sql_keyword(Keyword::Like, &KeywordParams::new())?,
					pattern.sql_string(dialect, param_mode)?
				);
				if let Some(escape) = escape {
					sql.push_str(&format!(" ESCAPE '{}'", escape));
				}
				Ok(sql)
			}
			Self::InList { expr, values } => {
				if values.is_empty() {
					return Err(SqlError::EmptyInList);
				}
				let items = values
					.iter()
					.map(|v| v.sql_string(dialect, param_mode))
					.collect::<SqlResult<Vec<_>>>()?;
				Ok(format!(
					"{} IN ({})",
					expr.sql_string(dialect, param_mode)?,
					items.join(", ")
				))
			}
			Self::InQuery { expr, query } => Ok(format!(
				"{} IN ({})",
				expr.sql_string(dialect, param_mode)?,
				query.sql_string(dialect, param_mode)?
			)),
			Self::IsNull(expr) => Ok(format!("{} IS NULL", expr.sql_string(dialect, param_mode)?)),
			Self::NotNull(expr) => Ok(format!(
				"{} IS NOT NULL",
				expr.sql_string(dialect, param_mode)?
			)),
			Self::And(_) | Self::Or(_) => self.render_compound(dialect, param_mode),
			Self::Not(inner) => {
				if inner.is_empty() {
					Ok(String::new())
				} else {
					Ok(format!("NOT ({})", inner.sql_string(dialect, param_mode)?))
				}
			}
		}
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		match self {
			Self::Comparison { left, right, .. } => {
				values.extend(left.sql_params());
				values.extend(right.sql_params());
			}
			Self::Like { expr, pattern, .. } => {
				values.extend(expr.sql_params());
				values.extend(pattern.sql_params());
			}
			Self::InList { expr, values: items } => {
				values.extend(expr.sql_params());
				for item in items {
					values.extend(item.sql_params());
				}
			}
			Self::InQuery { expr, query } => {
				values.extend(expr.sql_params());
				values.extend(query.sql_params());
			}
			Self::IsNull(expr) | Self::NotNull(expr) => values.extend(expr.sql_params()),
			Self::And(items) | Self::Or(items) => {
				for item in items.iter().filter(|c| !c.is_empty()) {
					values.extend(item.sql_params());
				}
			}
			Self::Not(inner) => values.extend(inner.sql_params()),
		}
		values
	}

	fn is_empty(&self) -> bool {
		match self {
			Self::And(items) | Self::Or(items) => items.iter().all(Condition::is_empty),
			Self::Not(inner) => inner.is_empty(),
			_ => false,
		}
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::new();
		match self {
			Self::Comparison { left, right, .. } => {
				sources.extend(left.sources());
				sources.extend(right.sources());
			}
			Self::Like { expr, pattern, .. } => {
				sources.extend(expr.sources());
				sources.extend(pattern.sources());
			}
			Self::InList { expr, values } => {
				sources.extend(expr.sources());
				for value in values {
					sources.extend(value.sources());
				}
			}
			Self::InQuery { expr, query } => {
				sources.extend(expr.sources());
				sources.extend(query.sources());
			}
			Self::IsNull(expr) | Self::NotNull(expr) => sources.extend(expr.sources()),
			Self::And(items) | Self::Or(items) => {
				for item in items {
					sources.extend(item.sources());
				}
			}
			Self::Not(inner) => sources.extend(inner.sources()),
		}
		sources
	}
}
