//! Error types for statement building and rendering.
//!
//! Every failure in this crate is either a precondition violation (an
//! incomplete statement, a missing keyword parameter, an out-of-range index)
//! or a dialect that cannot express the requested construct. Empty
//! conditions and unset optional clauses are not errors; they simply omit
//! the corresponding SQL.

use thiserror::Error;

use crate::{
	backend::SqlEngine,
	types::{DataType, Keyword, ParamKey, SqlFunction},
};

/// Errors that can occur while building or rendering SQL.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqlError {
	/// A statement was rendered before its mandatory clauses were set.
	#[error("Statement is empty: {kind}")]
	EmptyStatement {
		/// Statement kind, e.g. `SELECT`.
		kind: &'static str,
	},

	/// An IN condition was rendered with no values.
	#[error("IN list is empty")]
	EmptyInList,

	/// A positional accessor was called outside the stored range.
	#[error("Invalid index: {index} (size {size})")]
	InvalidIndex {
		/// Requested index.
		index: usize,
		/// Number of stored entries.
		size: usize,
	},

	/// A keyword fragment was requested without one of its mandatory parameters.
	#[error("Missing parameter `{param}` for keyword {keyword}")]
	MissingParameter {
		/// Keyword being rendered.
		keyword: Keyword,
		/// Missing parameter.
		param: ParamKey,
	},

	/// The dialect has no mapping for this logical data type.
	#[error("Unsupported data type: {0}")]
	UnsupportedDataType(DataType),

	/// The dialect cannot render this keyword.
	#[error("Unsupported keyword: {0}")]
	UnsupportedKeyword(Keyword),

	/// The statement has a shape the engine has no syntax for.
	#[error("{engine} cannot render this statement: {reason}")]
	UnsupportedStatement {
		/// Engine being rendered for.
		engine: SqlEngine,
		/// What the engine lacks.
		reason: &'static str,
	},

	/// A function was called with an argument count it does not accept.
	#[error("Invalid argument count for {function}: {count}")]
	InvalidArguments {
		/// Function being rendered.
		function: SqlFunction,
		/// Number of arguments supplied.
		count: usize,
	},

	/// The configured engine name is not known.
	#[error("Unknown SQL engine: {0}")]
	UnknownEngine(String),

	/// A setting override holds a value that is not understood.
	#[error("Invalid value for {name}: {value}")]
	InvalidSetting {
		/// Setting or environment variable name.
		name: &'static str,
		/// Rejected value.
		value: String,
	},

	/// Builder settings could not be parsed.
	#[error("Settings error: {0}")]
	Settings(#[from] toml::de::Error),

	/// Builder settings could not be read.
	#[error("Failed to read settings: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for statement building and rendering.
pub type SqlResult<T> = Result<T, SqlError>;
