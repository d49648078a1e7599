//! Value producing expression nodes.

use std::collections::BTreeSet;

use crate::{
	backend::Dialect,
	error::{SqlError, SqlResult},
	query::{IsSql, SqlSelect},
	types::{DataType, Keyword, KeywordParam, KeywordParams, ParamKey, SqlFunction},
	value::{Value, Values},
};

use super::Condition;

/// A value producing node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	/// `source.name`; a `*` name selects every column of the source
	Field { source: String, name: String },
	/// Bare, possibly dotted, identifier
	Name(String),
	/// Literal; a placeholder in parameter mode unless NULL
	Constant(Value),
	/// SQL text inserted verbatim
	Raw(String),
	/// Function call rendered by the dialect
	Function {
		function: SqlFunction,
		args: Vec<Expression>,
	},
	/// `CASE WHEN condition THEN .. ELSE .. END`
	If {
		condition: Box<Condition>,
		then: Box<Expression>,
		otherwise: Box<Expression>,
	},
	/// Bitwise and of two expressions
	BitAnd {
		expr: Box<Expression>,
		mask: Box<Expression>,
	},
	/// Parenthesized scalar subquery
	Query(Box<SqlSelect>),
}

impl Expression {
	pub fn field(source: impl Into<String>, name: impl Into<String>) -> Self {
		Self::Field {
			source: source.into(),
			name: name.into(),
		}
	}

	pub fn name(name: impl Into<String>) -> Self {
		Self::Name(name.into())
	}

	pub fn constant(value: impl Into<Value>) -> Self {
		Self::Constant(value.into())
	}

	pub fn raw(sql: impl Into<String>) -> Self {
		Self::Raw(sql.into())
	}

	pub fn function(function: SqlFunction, args: Vec<Expression>) -> Self {
		Self::Function { function, args }
	}

	/// `CAST(expr AS type)` with the dialect's DDL type name.
	pub fn cast(expr: Expression, data_type: DataType, precision: u32, scale: u32) -> Self {
		Self::function(
			SqlFunction::Cast {
				data_type,
				precision,
				scale,
			},
			vec![expr],
		)
	}

	pub fn query(select: SqlSelect) -> Self {
		Self::Query(Box::new(select))
	}
}

impl From<Value> for Expression {
	fn from(value: Value) -> Self {
		Self::Constant(value)
	}
}

impl From<SqlSelect> for Expression {
	fn from(select: SqlSelect) -> Self {
		Self::query(select)
	}
}

impl IsSql for Expression {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		match self {
			Self::Field { source, name } => {
				let column = if name == "*" {
					name.clone()
				} else {
					dialect.sql_quote(name)
				};
				if source.is_empty() {
					Ok(column)
				} else {
					Ok(format!("{}.{}", dialect.sql_name(source), column))
				}
			}
			Self::Name(name) => Ok(dialect.sql_name(name)),
			Self::Constant(value) => {
				if param_mode && !value.is_null() {
					Ok("?".to_string())
				} else {
					Ok(dialect.sql_transform(value))
				}
			}
			Self::Raw(sql) => Ok(sql.clone()),
			Self::Function { function, args } => {
				let rendered = args
					.iter()
					.map(|arg| arg.sql_string(dialect, param_mode))
					.collect::<SqlResult<Vec<_>>>()?;
				dialect.sql_function(*function, &rendered)
			}
			Self::If {
				condition,
				then,
				otherwise,
			} => {
				if condition.is_empty() {
					return Err(SqlError::EmptyStatement { kind: "CASE WHEN" });
				}
				let params = KeywordParams::new()
					.with(
						ParamKey::Condition,
						KeywordParam::Sql(condition.sql_string(dialect, param_mode)?),
					)
					.with(
						ParamKey::IfTrue,
						KeywordParam::Sql(then.sql_string(dialect, param_mode)?),
					)
					.with(
						ParamKey::IfFalse,
						KeywordParam::Sql(otherwise.sql_string(dialect, param_mode)?),
					);
				dialect.sql_keyword(Keyword::If, &params)
			}
			Self::BitAnd { expr, mask } => {
				let params = KeywordParams::new()
					.with(
						ParamKey::Expression,
						KeywordParam::Sql(expr.sql_string(dialect, param_mode)?),
					)
					.with(
						ParamKey::Value,
						KeywordParam::Sql(mask.sql_string(dialect, param_mode)?),
					);
				dialect.sql_keyword(Keyword::BitAnd, &params)
			}
			Self::Query(select) => Ok(format!("({})", select.sql_string(dialect, param_mode)?)),
		}
	}

	fn sql_params(&self) -> Values {
		let mut values = Values::new();
		match self {
			Self::Constant(value) if !value.is_null() => values.push(value.clone()),
			Self::Function { args, .. } => {
				for arg in args {
					values.extend(arg.sql_params());
				}
			}
			Self::If {
				condition,
				then,
				otherwise,
			} => {
				values.extend(condition.sql_params());
				values.extend(then.sql_params());
				values.extend(otherwise.sql_params());
			}
			Self::BitAnd { expr, mask } => {
				values.extend(expr.sql_params());
				values.extend(mask.sql_params());
			}
			Self::Query(select) => values.extend(select.sql_params()),
			_ => {}
		}
		values
	}

	fn is_empty(&self) -> bool {
		match self {
			Self::Field { name, .. } | Self::Name(name) => name.is_empty(),
			Self::Raw(sql) => sql.trim().is_empty(),
			Self::Query(select) => select.is_empty(),
			_ => false,
		}
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::new();
		match self {
			Self::Field { source, .. } if !source.is_empty() => {
				sources.insert(source.clone());
			}
			Self::Function { args, .. } => {
				for arg in args {
					sources.extend(arg.sources());
				}
			}
			Self::If {
				condition,
				then,
				otherwise,
			} => {
				sources.extend(condition.sources());
				sources.extend(then.sources());
				sources.extend(otherwise.sources());
			}
			Self::BitAnd { expr, mask } => {
				sources.extend(expr.sources());
				sources.extend(mask.sources());
			}
			Self::Query(select) => sources.extend(select.sources()),
			_ => {}
		}
		sources
	}
}
