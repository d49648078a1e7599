//! Closed enumerations shared by statement nodes and dialects.
//!
//! - [`DataType`]: logical column types for DDL
//! - [`JoinMode`]: how a FROM entry attaches to the previous one
//! - [`Operator`]: comparison operators
//! - [`SqlFunction`]: functions a dialect renders through
//!   [`Dialect::sql_function`](crate::backend::Dialect::sql_function)
//! - [`Keyword`], [`ParamKey`], [`KeywordParams`]: dialect fragments and
//!   their typed parameter map

mod keyword;

pub use keyword::{Keyword, KeywordParam, KeywordParams, ParamKey};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical column type used in CREATE TABLE and CAST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
	Boolean,
	Integer,
	Long,
	Float,
	Double,
	/// `NUMERIC(precision, scale)`
	Numeric,
	/// `CHAR(precision)`
	Char,
	/// `VARCHAR(precision)`
	String,
	/// Unbounded character data
	Text,
	Date,
	DateTime,
}

impl DataType {
	/// Upper-case name used in error messages.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Boolean => "BOOLEAN",
			Self::Integer => "INTEGER",
			Self::Long => "LONG",
			Self::Float => "FLOAT",
			Self::Double => "DOUBLE",
			Self::Numeric => "NUMERIC",
			Self::Char => "CHAR",
			Self::String => "STRING",
			Self::Text => "TEXT",
			Self::Date => "DATE",
			Self::DateTime => "DATETIME",
		}
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Join mode of a FROM entry.
///
/// `Plain` entries are comma separated (or lead the list); the others carry
/// a join condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinMode {
	#[default]
	Plain,
	Inner,
	Left,
	Right,
	Full,
}

impl JoinMode {
	/// Text placed in front of the entry; empty for the first entry.
	pub fn prefix(&self, first: bool) -> &'static str {
		match self {
			Self::Plain if first => "",
			Self::Plain => ", ",
			Self::Inner => " INNER JOIN ",
			Self::Left => " LEFT JOIN ",
			Self::Right => " RIGHT JOIN ",
			Self::Full => " FULL JOIN ",
		}
	}
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Eq,
	Ne,
	Lt,
	Gt,
	Le,
	Ge,
}

impl Operator {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Ne => "<>",
			Self::Lt => "<",
			Self::Gt => ">",
			Self::Le => "<=",
			Self::Ge => ">=",
		}
	}
}

/// Function rendered by the dialect.
///
/// Each function consumes its rendered arguments exactly once and in order,
/// so placeholders line up with the parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlFunction {
	Min,
	Max,
	Sum,
	Avg,
	/// `COUNT(*)` without an argument
	Count,
	SumDistinct,
	AvgDistinct,
	CountDistinct,
	Plus,
	Minus,
	Multiply,
	Divide,
	/// Arguments juxtaposed without a separator
	Bulk,
	/// `COALESCE(..)`
	Nvl,
	Concat,
	Length,
	/// `(expr, pos[, len])`
	Substring,
	/// `(expr, len)`
	Left,
	/// `(expr, len)`
	Right,
	/// `(expr, when, then, .., else)`
	Case,
	Cast {
		data_type: DataType,
		precision: u32,
		scale: u32,
	},
}

impl fmt::Display for SqlFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Min => "MIN",
			Self::Max => "MAX",
			Self::Sum => "SUM",
			Self::Avg => "AVG",
			Self::Count => "COUNT",
			Self::SumDistinct => "SUM_DISTINCT",
			Self::AvgDistinct => "AVG_DISTINCT",
			Self::CountDistinct => "COUNT_DISTINCT",
			Self::Plus => "PLUS",
			Self::Minus => "MINUS",
			Self::Multiply => "MULTIPLY",
			Self::Divide => "DIVIDE",
			Self::Bulk => "BULK",
			Self::Nvl => "NVL",
			Self::Concat => "CONCAT",
			Self::Length => "LENGTH",
			Self::Substring => "SUBSTRING",
			Self::Left => "LEFT",
			Self::Right => "RIGHT",
			Self::Case => "CASE",
			Self::Cast { .. } => "CAST",
		};
		f.write_str(name)
	}
}
