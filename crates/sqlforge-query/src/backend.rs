//! SQL dialect implementations
//!
//! This module provides the [`Dialect`] trait and one renderer per supported
//! database: generic SQL, PostgreSQL, MySQL, MS SQL Server and Oracle.
//!
//! Every hook of the trait has a default built from the shared pieces in
//! [`render`], [`keyword`] and [`function`]; a dialect overrides only what its
//! database spells differently.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
	error::{SqlError, SqlResult},
	query::{IsSql, SqlCommand, SqlCreate, SqlDelete, SqlInsert, SqlSelect, SqlUpdate},
	types::{DataType, Keyword, KeywordParams, SqlFunction},
	value::{Value, Values},
};

pub mod function;
pub mod keyword;
pub mod render;

mod generic;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sql_writer;

pub use generic::GenericDialect;
pub use mssql::MsSqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sql_writer::SqlWriter;

/// Database specific SQL generation
///
/// Implementations are stateless and shareable between threads. Statement
/// nodes call back into the dialect through the `get_*` methods, so an
/// override of, say, [`get_query`](Self::get_query) also applies to every
/// subquery nested inside other statements.
///
/// # Implementations
///
/// - [`GenericDialect`] - unquoted ANSI-style SQL
/// - [`PostgresDialect`] - PostgreSQL
/// - [`MySqlDialect`] - MySQL
/// - [`MsSqlDialect`] - Microsoft SQL Server
/// - [`OracleDialect`] - Oracle
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut select = SqlSelect::new();
/// select.add_fields("t", ["id"]).add_from_as("users", "t");
///
/// assert_eq!(
///     select.sql_string(&PostgresDialect, false).unwrap(),
///     r#"SELECT "t"."id" FROM "users" "t""#
/// );
/// assert_eq!(
///     select.sql_string(&MsSqlDialect, false).unwrap(),
///     "SELECT [t].[id] FROM [users] [t]"
/// );
/// ```
pub trait Dialect: Send + Sync {
	/// The engine this dialect renders for.
	fn engine(&self) -> SqlEngine;

	/// Quote a single identifier segment.
	fn sql_quote(&self, name: &str) -> String;

	/// Quote a possibly dotted name segment by segment.
	fn sql_name(&self, name: &str) -> String {
		name.split('.')
			.map(|part| self.sql_quote(part))
			.collect::<Vec<_>>()
			.join(".")
	}

	/// Inline literal for `value`.
	fn sql_transform(&self, value: &Value) -> String {
		value.to_sql_literal()
	}

	/// DDL type name.
	fn sql_type(&self, data_type: DataType, precision: u32, scale: u32) -> SqlResult<String> {
		standard_type(self, data_type, precision, scale)
	}

	/// Dialect fragment for `keyword`.
	fn sql_keyword(&self, keyword: Keyword, params: &KeywordParams) -> SqlResult<String> {
		keyword::standard_keyword(self, keyword, params)
	}

	/// Function call over already rendered arguments.
	fn sql_function(&self, function: SqlFunction, args: &[String]) -> SqlResult<String> {
		function::standard_function(self, function, args)
	}

	/// Apply LIMIT/OFFSET of `select` to its rendered body.
	fn sql_paging(&self, sql: String, select: &SqlSelect) -> String {
		render::limit_offset(sql, select)
	}

	fn get_query(&self, select: &SqlSelect, param_mode: bool) -> SqlResult<String> {
		render::query(self, select, param_mode)
	}

	fn get_insert(&self, insert: &SqlInsert, param_mode: bool) -> SqlResult<String> {
		render::insert(self, insert, param_mode)
	}

	fn get_update(&self, update: &SqlUpdate, param_mode: bool) -> SqlResult<String> {
		render::update(self, update, param_mode)
	}

	fn get_delete(&self, delete: &SqlDelete, param_mode: bool) -> SqlResult<String> {
		render::delete(self, delete, param_mode)
	}

	fn get_create(&self, create: &SqlCreate, param_mode: bool) -> SqlResult<String> {
		render::create(self, create, param_mode)
	}

	fn get_command(&self, command: &SqlCommand, param_mode: bool) -> SqlResult<String> {
		render::command(self, command, param_mode)
	}
}

/// Render `stmt` and collect its bind values.
///
/// Without `param_mode` every literal is inlined and the value list is empty.
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut delete = SqlDelete::new("Users");
/// delete.set_where(sql_utils::equal("Users", "Id", 7));
///
/// let (sql, values) = render(&delete, &GenericDialect, true).unwrap();
/// assert_eq!(sql, "DELETE FROM Users WHERE Users.Id = ?");
/// assert_eq!(values.len(), 1);
/// ```
pub fn render<S, D>(stmt: &S, dialect: &D, param_mode: bool) -> SqlResult<(String, Values)>
where
	S: IsSql + ?Sized,
	D: Dialect + ?Sized,
{
	let sql = stmt.sql_string(dialect, param_mode)?;
	let values = if param_mode {
		stmt.sql_params()
	} else {
		Values::new()
	};
	Ok((sql, values))
}

/// Type names understood by most databases.
///
/// `precision` is the length for character types; `scale` is only used by
/// `NUMERIC`. TEXT and the temporal types have no portable spelling and are
/// left to the dialects.
pub fn standard_type<D: Dialect + ?Sized>(
	dialect: &D,
	data_type: DataType,
	precision: u32,
	scale: u32,
) -> SqlResult<String> {
	match data_type {
		DataType::Boolean => Ok("BIT".to_string()),
		DataType::Integer => Ok("INTEGER".to_string()),
		DataType::Long => Ok("BIGINT".to_string()),
		DataType::Float => Ok("FLOAT".to_string()),
		DataType::Double => Ok("DOUBLE".to_string()),
		DataType::Numeric => Ok(format!("NUMERIC({}, {})", precision, scale)),
		DataType::Char => Ok(format!("CHAR({})", precision)),
		DataType::String => Ok(format!("VARCHAR({})", precision)),
		DataType::Text | DataType::Date | DataType::DateTime => {
			warn!(engine = %dialect.engine(), %data_type, "unsupported data type");
			Err(SqlError::UnsupportedDataType(data_type))
		}
	}
}

/// Supported database engines.
///
/// Parsed case-insensitively from configuration; common aliases such as
/// `postgres` or `sqlserver` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SqlEngine {
	#[default]
	Generic,
	PostgreSql,
	MySql,
	MsSql,
	Oracle,
}

impl SqlEngine {
	pub const ALL: [SqlEngine; 5] = [
		SqlEngine::Generic,
		SqlEngine::PostgreSql,
		SqlEngine::MySql,
		SqlEngine::MsSql,
		SqlEngine::Oracle,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Generic => "generic",
			Self::PostgreSql => "postgresql",
			Self::MySql => "mysql",
			Self::MsSql => "mssql",
			Self::Oracle => "oracle",
		}
	}

	/// The renderer for this engine.
	pub fn dialect(&self) -> &'static dyn Dialect {
		match self {
			Self::Generic => &GenericDialect,
			Self::PostgreSql => &PostgresDialect,
			Self::MySql => &MySqlDialect,
			Self::MsSql => &MsSqlDialect,
			Self::Oracle => &OracleDialect,
		}
	}
}

impl fmt::Display for SqlEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SqlEngine {
	type Err = SqlError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"generic" | "sql" => Ok(Self::Generic),
			"postgresql" | "postgres" | "pgsql" => Ok(Self::PostgreSql),
			"mysql" => Ok(Self::MySql),
			"mssql" | "sqlserver" => Ok(Self::MsSql),
			"oracle" => Ok(Self::Oracle),
			_ => Err(SqlError::UnknownEngine(s.to_string())),
		}
	}
}

impl TryFrom<String> for SqlEngine {
	type Error = SqlError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
