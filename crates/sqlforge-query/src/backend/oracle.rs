//! Oracle dialect
//!
//! This module implements the SQL generation backend for Oracle. Catalog
//! queries read the `ALL_*` dictionary views, where the schema is the owner
//! and there is no separate database name.

use std::collections::BTreeSet;

use tracing::trace;

use super::{
	Dialect, SqlEngine, function::standard_function, keyword::filters, keyword::standard_keyword,
	render,
};
use crate::{
	error::{SqlError, SqlResult},
	expr::{Condition, FromClause, FromSource},
	query::{IsSql, SqlDelete, SqlSelect, SqlUpdate},
	sql_utils,
	types::{DataType, JoinMode, Keyword, KeywordParams, ParamKey, SqlFunction},
};

/// Oracle dialect
///
/// This struct implements SQL generation for Oracle, using the following conventions:
/// - Identifiers: Double quotes (`"TABLE_NAME"`)
/// - Temporary tables: `CREATE GLOBAL TEMPORARY TABLE`
/// - Paging: `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
/// - Multi-table UPDATE/DELETE: extra sources move into `WHERE EXISTS (..)`
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let cmd = sql_utils::db_schema();
/// assert_eq!(
///     cmd.sql_string(&OracleDialect, false).unwrap(),
///     r#"SELECT sys_context('USERENV', 'CURRENT_SCHEMA') AS "dbSchema" FROM dual"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl OracleDialect {
	fn db_tables(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("t", "TABLE_NAME", "tblName")
			.add_field("t", "NUM_ROWS", "rowCount")
			.add_from_as("ALL_TABLES", "t")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbSchema, "t", "OWNER"),
					(ParamKey::Table, "t", "TABLE_NAME"),
				],
			));
		select.sql_string(self, false)
	}

	fn db_fields(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("c", "TABLE_NAME", "tblName")
			.add_field("c", "COLUMN_NAME", "fldName")
			.add_field("c", "NULLABLE", "fldNull")
			.add_field("c", "DATA_TYPE", "fldType")
			.add_field("c", "CHAR_LENGTH", "fldLength")
			.add_field("c", "DATA_PRECISION", "fldPrecision")
			.add_field("c", "DATA_SCALE", "fldScale")
			.add_from_as("ALL_TAB_COLUMNS", "c")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbSchema, "c", "OWNER"),
					(ParamKey::Table, "c", "TABLE_NAME"),
				],
			))
			.add_order("c", "COLUMN_ID");
		select.sql_string(self, false)
	}

	fn db_keys(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut types = Condition::any();
		for kind in params.keywords(ParamKey::KeyTypes) {
			let code = match kind {
				Keyword::PrimaryKey => "P",
				Keyword::ForeignKey => "R",
				Keyword::Unique => "U",
				_ => continue,
			};
			types = types.add(sql_utils::equal("k", "CONSTRAINT_TYPE", code));
		}
		let wh = filters(
			params,
			&[
				(ParamKey::DbSchema, "k", "OWNER"),
				(ParamKey::Table, "k", "TABLE_NAME"),
			],
		)
		.add(types);

		let mut select = SqlSelect::new();
		select
			.add_field("k", "TABLE_NAME", "tblName")
			.add_field("k", "CONSTRAINT_NAME", "keyName")
			.add_field("k", "CONSTRAINT_TYPE", "keyType")
			.add_from_as("ALL_CONSTRAINTS", "k")
			.set_where(wh);
		select.sql_string(self, false)
	}

	fn db_foreign_keys(&self, params: &KeywordParams) -> SqlResult<String> {
		let wh = sql_utils::equal("c", "CONSTRAINT_TYPE", "R").add(filters(
			params,
			&[
				(ParamKey::DbSchema, "c", "OWNER"),
				(ParamKey::DbSchema, "r", "OWNER"),
				(ParamKey::Table, "c", "TABLE_NAME"),
				(ParamKey::RefTable, "r", "TABLE_NAME"),
			],
		));

		let mut select = SqlSelect::new();
		select
			.add_field("c", "CONSTRAINT_NAME", "keyName")
			.add_field("c", "TABLE_NAME", "tblName")
			.add_field("r", "TABLE_NAME", "fkRefTable")
			.add_from_as("ALL_CONSTRAINTS", "c")
			.add_from_inner(
				"ALL_CONSTRAINTS",
				"r",
				sql_utils::join("c", "R_CONSTRAINT_NAME", "r", "CONSTRAINT_NAME"),
			)
			.set_where(wh);
		select.sql_string(self, false)
	}

	fn db_schemas(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("u", "USERNAME", "schemaName")
			.add_from_as("ALL_USERS", "u")
			.set_where(filters(params, &[(ParamKey::Schema, "u", "USERNAME")]));
		select.sql_string(self, false)
	}

	fn db_indexes(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("i", "TABLE_NAME", "tblName")
			.add_field("i", "INDEX_NAME", "keyName")
			.add_from_as("ALL_INDEXES", "i")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbSchema, "i", "OWNER"),
					(ParamKey::Table, "i", "TABLE_NAME"),
				],
			));
		select.sql_string(self, false)
	}

	fn db_triggers(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("t", "TABLE_NAME", "tblName")
			.add_field("t", "TRIGGER_NAME", "trgName")
			.add_from_as("ALL_TRIGGERS", "t")
			.set_where(filters(
				params,
				&[
					(ParamKey::DbSchema, "t", "OWNER"),
					(ParamKey::Table, "t", "TABLE_NAME"),
				],
			));
		select.sql_string(self, false)
	}

	/// `WHERE EXISTS (SELECT 1 FROM <sources> WHERE <condition>)`.
	fn exists_clause(
		&self,
		from: &[FromClause],
		condition: Option<&Condition>,
		param_mode: bool,
	) -> SqlResult<String> {
		if from.first().is_some_and(|entry| entry.mode() != JoinMode::Plain) {
			return Err(SqlError::UnsupportedStatement {
				engine: self.engine(),
				reason: "joined sources need a plain leading source",
			});
		}
		let mut sql = format!("SELECT 1 FROM {}", render::from_list(self, from, param_mode)?);
		if let Some(condition) = condition {
			let body = condition.sql_string(self, param_mode)?;
			if !body.trim().is_empty() {
				sql.push_str(" WHERE ");
				sql.push_str(&body);
			}
		}
		Ok(format!(" WHERE EXISTS ({})", sql))
	}

	fn sys_context(&self, parameter: &str, alias: &str) -> String {
		format!(
			"SELECT sys_context('USERENV', '{}') AS {} FROM dual",
			parameter,
			self.sql_quote(alias)
		)
	}
}

impl Dialect for OracleDialect {
	fn engine(&self) -> SqlEngine {
		SqlEngine::Oracle
	}

	fn sql_quote(&self, name: &str) -> String {
		format!("\"{}\"", name.replace('"', "\"\""))
	}

	fn sql_type(&self, data_type: DataType, precision: u32, scale: u32) -> SqlResult<String> {
		Ok(match data_type {
			DataType::Boolean => "NUMBER(1)".to_string(),
			DataType::Integer => "NUMBER(10)".to_string(),
			DataType::Long => "NUMBER(19)".to_string(),
			DataType::Float => "BINARY_FLOAT".to_string(),
			DataType::Double => "BINARY_DOUBLE".to_string(),
			DataType::Numeric => format!("NUMBER({}, {})", precision, scale),
			DataType::Char => format!("CHAR({})", precision),
			DataType::String => format!("VARCHAR2({})", precision),
			DataType::Text => "CLOB".to_string(),
			DataType::Date => "DATE".to_string(),
			DataType::DateTime => "TIMESTAMP".to_string(),
		})
	}

	fn sql_keyword(&self, keyword: Keyword, params: &KeywordParams) -> SqlResult<String> {
		match keyword {
			Keyword::Temporary => Ok("GLOBAL TEMPORARY".to_string()),
			Keyword::BitAnd => Ok(format!(
				"BITAND({}, {})",
				params.sql(keyword, ParamKey::Expression)?,
				params.sql(keyword, ParamKey::Value)?
			)),
			Keyword::DbName => Ok(self.sys_context("DB_NAME", "dbName")),
			Keyword::DbSchema => Ok(self.sys_context("CURRENT_SCHEMA", "dbSchema")),
			Keyword::DbTables => self.db_tables(params),
			Keyword::DbFields => self.db_fields(params),
			Keyword::DbKeys => self.db_keys(params),
			Keyword::DbForeignKeys => self.db_foreign_keys(params),
			Keyword::DbSchemas => self.db_schemas(params),
			Keyword::DbIndexes => self.db_indexes(params),
			Keyword::DbTriggers => self.db_triggers(params),
			_ => standard_keyword(self, keyword, params),
		}
	}

	fn sql_function(&self, function: SqlFunction, args: &[String]) -> SqlResult<String> {
		match function {
			SqlFunction::Left | SqlFunction::Right if args.len() != 2 => {
				Err(SqlError::InvalidArguments {
					function,
					count: args.len(),
				})
			}
			SqlFunction::Left => Ok(format!("SUBSTR({},1,{})", args[0], args[1])),
			SqlFunction::Right => Ok(format!("SUBSTR({},-({}))", args[0], args[1])),
			_ => standard_function(self, function, args),
		}
	}

	fn sql_paging(&self, sql: String, select: &SqlSelect) -> String {
		render::offset_fetch(sql, select)
	}

	fn get_update(&self, update: &SqlUpdate, param_mode: bool) -> SqlResult<String> {
		if update.from_clauses().is_empty() {
			return render::update(self, update, param_mode);
		}
		render::ensure_not_empty(update, "UPDATE")?;

		// SET cannot see the sources inside EXISTS
		let mut names = BTreeSet::new();
		for from in update.from_clauses() {
			match from.source() {
				FromSource::Table { name, alias } => {
					names.insert(name.as_str());
					names.extend(alias.as_deref());
				}
				FromSource::Query { alias, .. } => {
					names.insert(alias.as_str());
				}
			}
		}
		let reads_sources = update
			.updates()
			.iter()
			.flat_map(|(_, value)| value.sources())
			.any(|source| names.contains(source.as_str()));
		if reads_sources {
			return Err(SqlError::UnsupportedStatement {
				engine: self.engine(),
				reason: "UPDATE .. FROM with SET values read from the sources",
			});
		}
		trace!(engine = %self.engine(), kind = "UPDATE", param_mode, "rendering multi-table statement");

		Ok(format!(
			"UPDATE {} SET {}{}",
			render::target(self, update.target(), update.alias()),
			render::set_list(self, update, param_mode)?,
			self.exists_clause(update.from_clauses(), update.where_clause(), param_mode)?
		))
	}

	fn get_delete(&self, delete: &SqlDelete, param_mode: bool) -> SqlResult<String> {
		if delete.from_clauses().is_empty() {
			return render::delete(self, delete, param_mode);
		}
		render::ensure_not_empty(delete, "DELETE")?;
		trace!(engine = %self.engine(), kind = "DELETE", param_mode, "rendering multi-table statement");

		Ok(format!(
			"DELETE FROM {}{}",
			render::target(self, delete.target(), delete.alias()),
			self.exists_clause(delete.from_clauses(), delete.where_clause(), param_mode)?
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{expr::Expression, query::SqlCreate, types::Operator, value::Values};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	fn test_db_tables_ignores_db_name() {
		let cmd = sql_utils::db_tables(Some("MyDB"), Some("MyDBSchema"), Some("table1"));
		assert_eq!(
			cmd.sql_string(&OracleDialect, false).unwrap(),
			concat!(
				r#"SELECT "t"."TABLE_NAME" AS "tblName", "t"."NUM_ROWS" AS "rowCount" FROM "ALL_TABLES" "t" "#,
				r#"WHERE "t"."OWNER" = 'MyDBSchema' AND "t"."TABLE_NAME" = 'table1'"#
			)
		);
	}

	#[rstest]
	fn test_db_foreign_keys() {
		let cmd = sql_utils::db_foreign_keys(
			Some("MyDB"),
			Some("MyDbSchema"),
			Some("Table1"),
			Some("RefTable1"),
		);
		assert_eq!(
			cmd.sql_string(&OracleDialect, false).unwrap(),
			concat!(
				r#"SELECT "c"."CONSTRAINT_NAME" AS "keyName", "c"."TABLE_NAME" AS "tblName", "r"."TABLE_NAME" AS "fkRefTable" "#,
				r#"FROM "ALL_CONSTRAINTS" "c" INNER JOIN "ALL_CONSTRAINTS" "r" ON "c"."R_CONSTRAINT_NAME" = "r"."CONSTRAINT_NAME" "#,
				r#"WHERE "c"."CONSTRAINT_TYPE" = 'R' AND "c"."OWNER" = 'MyDbSchema' AND "r"."OWNER" = 'MyDbSchema' "#,
				r#"AND "c"."TABLE_NAME" = 'Table1' AND "r"."TABLE_NAME" = 'RefTable1'"#
			)
		);
	}

	#[rstest]
	fn test_db_keys_uses_constraint_codes() {
		let cmd = sql_utils::db_keys(None, Some("HR"), None, [Keyword::PrimaryKey]);
		assert_eq!(
			cmd.sql_string(&OracleDialect, false).unwrap(),
			r#"SELECT "k"."TABLE_NAME" AS "tblName", "k"."CONSTRAINT_NAME" AS "keyName", "k"."CONSTRAINT_TYPE" AS "keyType" FROM "ALL_CONSTRAINTS" "k" WHERE "k"."OWNER" = 'HR' AND "k"."CONSTRAINT_TYPE" = 'P'"#
		);
	}

	#[rstest]
	fn test_db_name() {
		assert_eq!(
			sql_utils::db_name().sql_string(&OracleDialect, false).unwrap(),
			r#"SELECT sys_context('USERENV', 'DB_NAME') AS "dbName" FROM dual"#
		);
	}

	#[rstest]
	fn test_global_temporary_table() {
		let mut create = SqlCreate::new("TMP_IDS");
		create
			.set_temporary(true)
			.add_long("ID", true)
			.add_string("NAME", 40, false)
			.add_boolean("ACTIVE", false);

		assert_eq!(
			create.sql_string(&OracleDialect, false).unwrap(),
			r#"CREATE GLOBAL TEMPORARY TABLE "TMP_IDS" ("ID" NUMBER(19) NOT NULL, "NAME" VARCHAR2(40), "ACTIVE" NUMBER(1))"#
		);
	}

	#[rstest]
	fn test_bit_and_and_paging() {
		let mut select = SqlSelect::new();
		select
			.add_fields("u", ["ID"])
			.add_from_as("USERS", "u")
			.set_where(sql_utils::compare(
				sql_utils::bit_and(Expression::field("u", "FLAGS"), 4),
				Operator::Gt,
				Expression::constant(0),
			))
			.set_limit(10);

		let sql = select.sql_string(&OracleDialect, true).unwrap();
		assert!(sql.contains(r#"BITAND("u"."FLAGS", ?) > ?"#), "{}", sql);
		assert!(sql.ends_with(" OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"), "{}", sql);
	}

	#[rstest]
	#[case::left(SqlFunction::Left, "SUBSTR(x,1,3)")]
	#[case::right(SqlFunction::Right, "SUBSTR(x,-(3))")]
	fn test_left_right(#[case] function: SqlFunction, #[case] expected: &str) {
		let args = vec!["x".to_string(), "3".to_string()];
		assert_eq!(OracleDialect.sql_function(function, &args).unwrap(), expected);
	}

	#[rstest]
	fn test_delete_requires_condition() {
		let delete = SqlDelete::new("USERS");
		let err = delete.sql_string(&OracleDialect, false).unwrap_err();
		assert!(matches!(err, SqlError::EmptyStatement { kind: "DELETE" }));
	}

	#[rstest]
	fn test_delete_with_sources_uses_exists() {
		let mut delete = SqlDelete::new("ORDERS");
		delete
			.set_alias("o")
			.add_from("CUSTOMERS", Some("c"))
			.set_where(
				sql_utils::join("o", "CUSTOMER_ID", "c", "ID")
					.add(sql_utils::equal("c", "BLOCKED", true)),
			);

		assert_eq!(
			delete.sql_string(&OracleDialect, true).unwrap(),
			concat!(
				r#"DELETE FROM "ORDERS" "o" WHERE EXISTS (SELECT 1 FROM "CUSTOMERS" "c" "#,
				r#"WHERE "o"."CUSTOMER_ID" = "c"."ID" AND "c"."BLOCKED" = ?)"#
			)
		);
		assert_eq!(delete.sql_params(), Values(vec![true.into()]));
	}

	#[rstest]
	fn test_update_with_sources_uses_exists() {
		let mut update = SqlUpdate::new("ORDERS");
		update
			.set_alias("o")
			.add_constant("STATUS", "HOLD")
			.add_from("CUSTOMERS", Some("c"))
			.set_where(
				sql_utils::join("o", "CUSTOMER_ID", "c", "ID")
					.add(sql_utils::equal("c", "BLOCKED", true)),
			);

		assert_eq!(
			update.sql_string(&OracleDialect, true).unwrap(),
			concat!(
				r#"UPDATE "ORDERS" "o" SET "STATUS"=? WHERE EXISTS (SELECT 1 FROM "CUSTOMERS" "c" "#,
				r#"WHERE "o"."CUSTOMER_ID" = "c"."ID" AND "c"."BLOCKED" = ?)"#
			)
		);
		assert_eq!(update.sql_params(), Values(vec!["HOLD".into(), true.into()]));
	}

	#[rstest]
	fn test_update_reading_sources_is_rejected() {
		let mut update = SqlUpdate::new("ORDERS");
		update
			.set_alias("o")
			.add_expression("STATUS", Expression::field("c", "STATUS"))
			.add_from("CUSTOMERS", Some("c"))
			.set_where(sql_utils::join("o", "CUSTOMER_ID", "c", "ID"));

		let err = update.sql_string(&OracleDialect, false).unwrap_err();
		assert!(matches!(
			err,
			SqlError::UnsupportedStatement { engine: SqlEngine::Oracle, .. }
		));
	}

	#[rstest]
	fn test_delete_with_leading_join_is_rejected() {
		let mut delete = SqlDelete::new("ORDERS");
		delete
			.add_from_inner("CUSTOMERS", "c", sql_utils::join("ORDERS", "CUSTOMER_ID", "c", "ID"))
			.set_where(sql_utils::equal("c", "BLOCKED", true));

		assert!(delete.sql_string(&OracleDialect, false).is_err());
	}

	#[rstest]
	#[case::schemas(
		sql_utils::db_schemas(Some("ignored"), Some("HR")),
		r#"SELECT "u"."USERNAME" AS "schemaName" FROM "ALL_USERS" "u" WHERE "u"."USERNAME" = 'HR'"#
	)]
	#[case::indexes(
		sql_utils::db_indexes(None, Some("HR"), Some("EMP")),
		concat!(
			r#"SELECT "i"."TABLE_NAME" AS "tblName", "i"."INDEX_NAME" AS "keyName" FROM "ALL_INDEXES" "i" "#,
			r#"WHERE "i"."OWNER" = 'HR' AND "i"."TABLE_NAME" = 'EMP'"#
		)
	)]
	#[case::triggers(
		sql_utils::db_triggers(None, None, Some("EMP")),
		r#"SELECT "t"."TABLE_NAME" AS "tblName", "t"."TRIGGER_NAME" AS "trgName" FROM "ALL_TRIGGERS" "t" WHERE "t"."TABLE_NAME" = 'EMP'"#
	)]
	fn test_catalog_views(#[case] cmd: crate::query::SqlCommand, #[case] expected: &str) {
		assert_eq!(cmd.sql_string(&OracleDialect, false).unwrap(), expected);
	}
}
