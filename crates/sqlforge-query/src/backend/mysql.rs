//! MySQL dialect
//!
//! This module implements the SQL generation backend for MySQL.

use tracing::trace;

use super::{
	Dialect, SqlEngine, function::standard_function, keyword::filters, keyword::standard_keyword,
	render, standard_type,
};
use crate::{
	error::{SqlError, SqlResult},
	expr::Condition,
	query::{IsSql, SqlDelete, SqlSelect, SqlUpdate},
	types::{DataType, Keyword, KeywordParams, ParamKey, SqlFunction},
};

/// MySQL dialect
///
/// This struct implements SQL generation for MySQL, using the following conventions:
/// - Identifiers: Backticks (`` `table_name` ``)
/// - String concatenation: `CONCAT(a, b)`
/// - Foreign keys are dropped with `DROP FOREIGN KEY`
/// - Multi-table UPDATE: `UPDATE t, s SET ..`; DELETE: `DELETE t FROM t, s ..`
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let cmd = sql_utils::rename_table("old_users", "users");
/// assert_eq!(
///     cmd.sql_string(&MySqlDialect, false).unwrap(),
///     "RENAME TABLE `old_users` TO `users`"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
	fn db_indexes(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.set_distinct(true)
			.add_field("i", "table_name", "tblName")
			.add_field("i", "index_name", "keyName")
			.add_from_as("information_schema.statistics", "i")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbName, "i", "table_schema"),
					(ParamKey::DbSchema, "i", "table_schema"),
					(ParamKey::Table, "i", "table_name"),
				],
			));
		select.sql_string(self, false)
	}

	fn where_clause(&self, condition: Option<&Condition>, param_mode: bool) -> SqlResult<String> {
		match condition {
			Some(condition) => {
				let body = condition.sql_string(self, param_mode)?;
				if body.trim().is_empty() {
					Ok(String::new())
				} else {
					Ok(format!(" WHERE {}", body))
				}
			}
			None => Ok(String::new()),
		}
	}
}

impl Dialect for MySqlDialect {
	fn engine(&self) -> SqlEngine {
		SqlEngine::MySql
	}

	fn sql_quote(&self, name: &str) -> String {
		// Escape backticks within the identifier
		format!("`{}`", name.replace('`', "``"))
	}

	fn sql_type(&self, data_type: DataType, precision: u32, scale: u32) -> SqlResult<String> {
		match data_type {
			DataType::Text => Ok("TEXT".to_string()),
			DataType::Date => Ok("DATE".to_string()),
			DataType::DateTime => Ok("DATETIME".to_string()),
			_ => standard_type(self, data_type, precision, scale),
		}
	}

	fn sql_keyword(&self, keyword: Keyword, params: &KeywordParams) -> SqlResult<String> {
		match keyword {
			Keyword::DropForeignKey => Ok(format!(
				"ALTER TABLE {} DROP FOREIGN KEY {}",
				self.sql_name(params.ident(keyword, ParamKey::Table)?),
				self.sql_name(params.ident(keyword, ParamKey::Name)?)
			)),
			Keyword::RenameTable => Ok(format!(
				"RENAME TABLE {} TO {}",
				self.sql_name(params.ident(keyword, ParamKey::NameFrom)?),
				self.sql_name(params.ident(keyword, ParamKey::NameTo)?)
			)),
			Keyword::DbName => Ok(format!("SELECT DATABASE() AS {}", self.sql_quote("dbName"))),
			Keyword::DbSchema => Ok(format!(
				"SELECT DATABASE() AS {}",
				self.sql_quote("dbSchema")
			)),
			Keyword::DbIndexes => self.db_indexes(params),
			_ => standard_keyword(self, keyword, params),
		}
	}

	fn sql_function(&self, function: SqlFunction, args: &[String]) -> SqlResult<String> {
		match function {
			SqlFunction::Concat => {
				if args.is_empty() {
					return Err(SqlError::InvalidArguments { function, count: 0 });
				}
				Ok(format!("CONCAT({})", args.join(", ")))
			}
			_ => standard_function(self, function, args),
		}
	}

	fn get_update(&self, update: &SqlUpdate, param_mode: bool) -> SqlResult<String> {
		if update.from_clauses().is_empty() {
			return render::update(self, update, param_mode);
		}
		render::ensure_not_empty(update, "UPDATE")?;
		// Sources precede SET here, so bound values there would reorder
		let set_values = update
			.updates()
			.iter()
			.any(|(_, value)| !value.sql_params().is_empty());
		let source_values = update
			.from_clauses()
			.iter()
			.any(|from| !from.sql_params().is_empty());
		if param_mode && set_values && source_values {
			return Err(SqlError::UnsupportedStatement {
				engine: self.engine(),
				reason: "bound values in both SET and joined sources",
			});
		}
		trace!(engine = %self.engine(), kind = "UPDATE", param_mode, "rendering multi-table statement");

		Ok(format!(
			"UPDATE {} SET {}{}",
			render::target_with_sources(
				self,
				update.target(),
				update.alias(),
				update.from_clauses(),
				param_mode
			)?,
			render::set_list(self, update, param_mode)?,
			self.where_clause(update.where_clause(), param_mode)?
		))
	}

	fn get_delete(&self, delete: &SqlDelete, param_mode: bool) -> SqlResult<String> {
		if delete.from_clauses().is_empty() {
			return render::delete(self, delete, param_mode);
		}
		render::ensure_not_empty(delete, "DELETE")?;
		trace!(engine = %self.engine(), kind = "DELETE", param_mode, "rendering multi-table statement");

		let deleted = match delete.alias() {
			Some(alias) => self.sql_quote(alias),
			None => self.sql_name(delete.target()),
		};
		Ok(format!(
			"DELETE {} FROM {}{}",
			deleted,
			render::target_with_sources(
				self,
				delete.target(),
				delete.alias(),
				delete.from_clauses(),
				param_mode
			)?,
			self.where_clause(delete.where_clause(), param_mode)?
		))
	}
}
