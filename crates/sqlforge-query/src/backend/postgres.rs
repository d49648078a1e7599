//! PostgreSQL dialect
//!
//! This module implements the SQL generation backend for PostgreSQL.

use super::{Dialect, SqlEngine, keyword::filters, keyword::standard_keyword, standard_type};
use crate::{
	error::SqlResult,
	query::{IsSql, SqlSelect},
	sql_utils,
	types::{DataType, Keyword, KeywordParams, ParamKey},
};

/// PostgreSQL dialect
///
/// This struct implements SQL generation for PostgreSQL, using the following conventions:
/// - Identifiers: Double quotes (`"table_name"`)
/// - Multi-table DELETE: `DELETE FROM t USING s WHERE ..`
/// - Paging: `LIMIT n OFFSET m`
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let cmd = sql_utils::db_name();
/// assert_eq!(
///     cmd.sql_string(&PostgresDialect, false).unwrap(),
///     r#"SELECT current_database() as "dbName""#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
	/// Row counts come from the statistics collector, so they are estimates.
	fn db_tables(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("t", "table_name", "tblName")
			.add_field("s", "n_live_tup", "rowCount")
			.add_from_as("information_schema.tables", "t")
			.add_from_left(
				"pg_stat_user_tables",
				"s",
				sql_utils::join("s", "schemaname", "t", "table_schema")
					.add(sql_utils::join("s", "relname", "t", "table_name")),
			)
			.set_where(filters(
				params,
				&[
					(ParamKey::DbName, "t", "table_catalog"),
					(ParamKey::DbSchema, "t", "table_schema"),
					(ParamKey::Table, "t", "table_name"),
				],
			));
		select.sql_string(self, false)
	}

	fn db_indexes(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("i", "tablename", "tblName")
			.add_field("i", "indexname", "keyName")
			.add_from_as("pg_indexes", "i")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbSchema, "i", "schemaname"),
					(ParamKey::Table, "i", "tablename"),
				],
			));
		select.sql_string(self, false)
	}
}

impl Dialect for PostgresDialect {
	fn engine(&self) -> SqlEngine {
		SqlEngine::PostgreSql
	}

	fn sql_quote(&self, name: &str) -> String {
		// Escape double quotes within the identifier
		format!("\"{}\"", name.replace('"', "\"\""))
	}

	fn sql_type(&self, data_type: DataType, precision: u32, scale: u32) -> SqlResult<String> {
		match data_type {
			DataType::Boolean => Ok("NUMERIC(1)".to_string()),
			DataType::Double => Ok("DOUBLE PRECISION".to_string()),
			DataType::Text => Ok("TEXT".to_string()),
			DataType::Date => Ok("DATE".to_string()),
			DataType::DateTime => Ok("TIMESTAMP".to_string()),
			_ => standard_type(self, data_type, precision, scale),
		}
	}

	fn sql_keyword(&self, keyword: Keyword, params: &KeywordParams) -> SqlResult<String> {
		match keyword {
			Keyword::DbName => Ok(format!(
				"SELECT current_database() as {}",
				self.sql_quote("dbName")
			)),
			Keyword::DbSchema => Ok(format!(
				"SELECT current_schema() as {}",
				self.sql_quote("dbSchema")
			)),
			Keyword::DbTables => self.db_tables(params),
			Keyword::DbIndexes => self.db_indexes(params),
			_ => standard_keyword(self, keyword, params),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::{SqlCreate, SqlDelete};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case::plain("user", "\"user\"")]
	#[case::embedded_quote("we\"ird", "\"we\"\"ird\"")]
	fn test_sql_quote(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(PostgresDialect.sql_quote(name), expected);
	}

	#[rstest]
	fn test_db_tables() {
		let cmd = sql_utils::db_tables(Some("MyDB"), Some("MyDbSchema"), Some("Table1"));
		assert_eq!(
			cmd.sql_string(&PostgresDialect, false).unwrap(),
			concat!(
				r#"SELECT "t"."table_name" AS "tblName", "s"."n_live_tup" AS "rowCount" "#,
				r#"FROM "information_schema"."tables" "t" LEFT JOIN "pg_stat_user_tables" "s" "#,
				r#"ON "s"."schemaname" = "t"."table_schema" AND "s"."relname" = "t"."table_name" "#,
				r#"WHERE "t"."table_catalog" = 'MyDB' AND "t"."table_schema" = 'MyDbSchema' AND "t"."table_name" = 'Table1'"#
			)
		);
	}

	#[rstest]
	fn test_db_indexes() {
		let cmd = sql_utils::db_indexes(Some("MyDB"), Some("public"), Some("users"));
		assert_eq!(
			cmd.sql_string(&PostgresDialect, false).unwrap(),
			r#"SELECT "i"."tablename" AS "tblName", "i"."indexname" AS "keyName" FROM "pg_indexes" "i" WHERE "i"."schemaname" = 'public' AND "i"."tablename" = 'users'"#
		);
	}

	#[rstest]
	fn test_db_schemas_and_create_schema() {
		assert_eq!(
			sql_utils::db_schemas(None, Some("sales"))
				.sql_string(&PostgresDialect, false)
				.unwrap(),
			r#"SELECT "s"."schema_name" AS "schemaName" FROM "information_schema"."schemata" "s" WHERE "s"."schema_name" = 'sales'"#
		);
		assert_eq!(
			sql_utils::create_schema("sales")
				.sql_string(&PostgresDialect, false)
				.unwrap(),
			r#"CREATE SCHEMA "sales""#
		);
	}

	#[rstest]
	fn test_db_schema() {
		assert_eq!(
			sql_utils::db_schema()
				.sql_string(&PostgresDialect, false)
				.unwrap(),
			r#"SELECT current_schema() as "dbSchema""#
		);
	}

	#[rstest]
	#[case::boolean(DataType::Boolean, "NUMERIC(1)")]
	#[case::double(DataType::Double, "DOUBLE PRECISION")]
	#[case::text(DataType::Text, "TEXT")]
	#[case::date_time(DataType::DateTime, "TIMESTAMP")]
	#[case::string(DataType::String, "VARCHAR(30)")]
	fn test_sql_type(#[case] data_type: DataType, #[case] expected: &str) {
		assert_eq!(
			PostgresDialect.sql_type(data_type, 30, 0).unwrap(),
			expected
		);
	}

	#[rstest]
	fn test_create_temporary() {
		let mut create = SqlCreate::new("tmp");
		create
			.set_temporary(true)
			.add_integer("id", true)
			.add_text("note", false);

		assert_eq!(
			create.sql_string(&PostgresDialect, false).unwrap(),
			r#"CREATE TEMPORARY TABLE "tmp" ("id" INTEGER NOT NULL, "note" TEXT)"#
		);
	}

	#[rstest]
	fn test_delete_using() {
		let mut delete = SqlDelete::new("orders");
		delete
			.set_alias("o")
			.add_from("customers", Some("c"))
			.set_where(
				sql_utils::join("o", "customer_id", "c", "id")
					.add(sql_utils::equal("c", "blocked", true)),
			);

		assert_eq!(
			delete.sql_string(&PostgresDialect, true).unwrap(),
			r#"DELETE FROM "orders" "o" USING "customers" "c" WHERE "o"."customer_id" = "c"."id" AND "c"."blocked" = ?"#
		);
		assert_eq!(delete.sql_params().len(), 1);
	}
}
