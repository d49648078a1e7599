//! Keyword fragments shared by every dialect.
//!
//! Dialects override [`Dialect::sql_keyword`] for the keywords they render
//! differently and delegate everything else to [`standard_keyword`].
//! Catalog queries are built as [`SqlSelect`] trees and rendered with the
//! calling dialect, so quoting follows it automatically.

use tracing::warn;

use crate::{
	error::{SqlError, SqlResult},
	expr::Condition,
	query::{IsSql, SqlSelect},
	sql_utils,
	types::{Keyword, KeywordParams, ParamKey},
};

use super::Dialect;

/// Quote every identifier of a list and join with `", "`.
pub fn ident_list<D: Dialect + ?Sized>(dialect: &D, names: &[&str]) -> String {
	names
		.iter()
		.map(|name| dialect.sql_name(name))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Field list of an index or key, defaulting to the key name itself.
pub fn key_fields<D: Dialect + ?Sized>(
	dialect: &D,
	keyword: Keyword,
	params: &KeywordParams,
) -> SqlResult<String> {
	let fields = params.idents(ParamKey::Fields);
	if fields.is_empty() {
		let name = params.ident(keyword, ParamKey::Name)?;
		Ok(dialect.sql_name(name))
	} else {
		Ok(ident_list(dialect, &fields))
	}
}

/// Render `keyword` the way most databases spell it.
pub fn standard_keyword<D: Dialect + ?Sized>(
	dialect: &D,
	keyword: Keyword,
	params: &KeywordParams,
) -> SqlResult<String> {
	match keyword {
		Keyword::NotNull => Ok("NOT NULL".to_string()),
		Keyword::CreateSchema => Ok(format!(
			"CREATE SCHEMA {}",
			dialect.sql_name(params.ident(keyword, ParamKey::Schema)?)
		)),
		Keyword::CreateIndex => {
			let name = params.ident(keyword, ParamKey::Name)?;
			let table = params.ident(keyword, ParamKey::Table)?;
			Ok(format!(
				"CREATE {}INDEX {} ON {} ({})",
				if params.flag(ParamKey::Unique) {
					"UNIQUE "
				} else {
					""
				},
				dialect.sql_name(name),
				dialect.sql_name(table),
				key_fields(dialect, keyword, params)?
			))
		}
		Keyword::AddConstraint => {
			let table = params.ident(keyword, ParamKey::Table)?;
			let name = params.ident(keyword, ParamKey::Name)?;
			let kind = params
				.keyword(ParamKey::Type)
				.ok_or(SqlError::MissingParameter {
					keyword,
					param: ParamKey::Type,
				})?;
			if !matches!(
				kind,
				Keyword::PrimaryKey | Keyword::Unique | Keyword::ForeignKey
			) {
				warn!(constraint = %kind, "unsupported constraint type");
				return Err(SqlError::UnsupportedKeyword(kind));
			}
			Ok(format!(
				"ALTER TABLE {} ADD CONSTRAINT {} {}",
				dialect.sql_name(table),
				dialect.sql_name(name),
				dialect.sql_keyword(kind, params)?
			))
		}
		Keyword::PrimaryKey => Ok(format!(
			"PRIMARY KEY ({})",
			key_fields(dialect, keyword, params)?
		)),
		Keyword::Unique => Ok(format!("UNIQUE ({})", key_fields(dialect, keyword, params)?)),
		Keyword::ForeignKey => {
			let ref_table = params.ident(keyword, ParamKey::RefTable)?;
			let mut sql = format!(
				"FOREIGN KEY ({}) REFERENCES {}",
				key_fields(dialect, keyword, params)?,
				dialect.sql_name(ref_table)
			);
			let ref_fields = params.idents(ParamKey::RefFields);
			if !ref_fields.is_empty() {
				sql.push_str(&format!(" ({})", ident_list(dialect, &ref_fields)));
			}
			if let Some(action) = params.keyword(ParamKey::Cascade) {
				if !matches!(action, Keyword::Cascade | Keyword::SetNull) {
					warn!(action = %action, "unsupported ON DELETE action");
					return Err(SqlError::UnsupportedKeyword(action));
				}
				sql.push_str(" ON DELETE ");
				sql.push_str(&dialect.sql_keyword(action, params)?);
			}
			Ok(sql)
		}
		Keyword::Cascade => Ok("CASCADE".to_string()),
		Keyword::SetNull => Ok("SET NULL".to_string()),
		Keyword::DropTable => Ok(format!(
			"DROP TABLE {}",
			dialect.sql_name(params.ident(keyword, ParamKey::Table)?)
		)),
		Keyword::DropForeignKey => Ok(format!(
			"ALTER TABLE {} DROP CONSTRAINT {}",
			dialect.sql_name(params.ident(keyword, ParamKey::Table)?),
			dialect.sql_name(params.ident(keyword, ParamKey::Name)?)
		)),
		Keyword::RenameTable => Ok(format!(
			"ALTER TABLE {} RENAME TO {}",
			dialect.sql_name(params.ident(keyword, ParamKey::NameFrom)?),
			dialect.sql_name(params.ident(keyword, ParamKey::NameTo)?)
		)),
		Keyword::Temporary => Ok("TEMPORARY".to_string()),
		Keyword::TemporaryName => Ok(params.ident(keyword, ParamKey::Name)?.to_string()),
		Keyword::BitAnd => Ok(format!(
			"({} & {})",
			params.sql(keyword, ParamKey::Expression)?,
			params.sql(keyword, ParamKey::Value)?
		)),
		Keyword::If => Ok(format!(
			"CASE WHEN {} THEN {} ELSE {} END",
			params.sql(keyword, ParamKey::Condition)?,
			params.sql(keyword, ParamKey::IfTrue)?,
			params.sql(keyword, ParamKey::IfFalse)?
		)),
		Keyword::Like => Ok("LIKE".to_string()),
		Keyword::DbName | Keyword::DbSchema => Ok(String::new()),
		Keyword::DbSchemas => db_schemas(dialect, params),
		Keyword::DbTables => db_tables(dialect, params),
		Keyword::DbFields => db_fields(dialect, params),
		Keyword::DbKeys => db_keys(dialect, params),
		Keyword::DbForeignKeys => db_foreign_keys(dialect, params),
		Keyword::DbTriggers => db_triggers(dialect, params),
		// information_schema has no portable index view
		Keyword::DbIndexes => {
			warn!(engine = %dialect.engine(), %keyword, "unsupported keyword");
			Err(SqlError::UnsupportedKeyword(keyword))
		}
	}
}

/// `source.field = value` for each given filter, in order.
pub fn filters(params: &KeywordParams, filters: &[(ParamKey, &str, &str)]) -> Condition {
	let mut wh = Condition::all();
	for (key, source, field) in filters {
		if let Some(value) = params.filter(*key) {
			wh = wh.add(sql_utils::equal(source, field, value.clone()));
		}
	}
	wh
}

fn db_schemas<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let mut select = SqlSelect::new();
	select
		.add_field("s", "schema_name", "schemaName")
		.add_from_as("information_schema.schemata", "s")
		.set_where(filters(
			params,
			&[
				(ParamKey::DbName, "s", "catalog_name"),
				(ParamKey::Schema, "s", "schema_name"),
			],
		));
	select.sql_string(dialect, false)
}

fn db_tables<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let mut select = SqlSelect::new();
	select
		.add_field("t", "table_name", "tblName")
		.add_field("t", "table_rows", "rowCount")
		.add_from_as("information_schema.tables", "t")
		.set_where(filters(
			params,
			&[
				(ParamKey::DbName, "t", "table_catalog"),
				(ParamKey::DbSchema, "t", "table_schema"),
				(ParamKey::Table, "t", "table_name"),
			],
		));
	select.sql_string(dialect, false)
}

fn db_fields<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let mut select = SqlSelect::new();
	select
		.add_field("c", "table_name", "tblName")
		.add_field("c", "column_name", "fldName")
		.add_field("c", "is_nullable", "fldNull")
		.add_field("c", "data_type", "fldType")
		.add_field("c", "character_maximum_length", "fldLength")
		.add_field("c", "numeric_precision", "fldPrecision")
		.add_field("c", "numeric_scale", "fldScale")
		.add_from_as("information_schema.columns", "c")
		.set_where(filters(
			params,
			&[
				(ParamKey::DbName, "c", "table_catalog"),
				(ParamKey::DbSchema, "c", "table_schema"),
				(ParamKey::Table, "c", "table_name"),
			],
		))
		.add_order("c", "ordinal_position");
	select.sql_string(dialect, false)
}

/// Constraint type names as stored in `information_schema.table_constraints`.
fn key_type_condition(params: &KeywordParams, source: &str, field: &str) -> Condition {
	let mut types = Condition::any();
	for kind in params.keywords(ParamKey::KeyTypes) {
		let name = match kind {
			Keyword::PrimaryKey => "PRIMARY KEY",
			Keyword::ForeignKey => "FOREIGN KEY",
			Keyword::Unique => "UNIQUE",
			_ => continue,
		};
		types = types.add(sql_utils::equal(source, field, name));
	}
	types
}

fn db_keys<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let wh = filters(
		params,
		&[
			(ParamKey::DbName, "k", "constraint_catalog"),
			(ParamKey::DbSchema, "k", "constraint_schema"),
			(ParamKey::Table, "k", "table_name"),
		],
	)
	.add(key_type_condition(params, "k", "constraint_type"));

	let mut select = SqlSelect::new();
	select
		.add_field("k", "table_name", "tblName")
		.add_field("k", "constraint_name", "keyName")
		.add_field("k", "constraint_type", "keyType")
		.add_from_as("information_schema.table_constraints", "k")
		.set_where(wh);
	select.sql_string(dialect, false)
}

fn db_foreign_keys<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let wh = filters(
		params,
		&[
			(ParamKey::DbName, "c", "constraint_catalog"),
			(ParamKey::DbName, "t", "table_catalog"),
			(ParamKey::DbSchema, "c", "constraint_schema"),
			(ParamKey::DbSchema, "t", "table_schema"),
			(ParamKey::Table, "t", "table_name"),
			(ParamKey::RefTable, "r", "table_name"),
		],
	);

	let mut select = SqlSelect::new();
	select
		.add_field("c", "constraint_name", "keyName")
		.add_field("t", "table_name", "tblName")
		.add_field("r", "table_name", "fkRefTable")
		.add_from_as("information_schema.referential_constraints", "c")
		.add_from_inner(
			"information_schema.table_constraints",
			"t",
			sql_utils::join_using("c", "t", "constraint_name"),
		)
		.add_from_inner(
			"information_schema.table_constraints",
			"r",
			sql_utils::join("c", "unique_constraint_name", "r", "constraint_name"),
		)
		.set_where(wh);
	select.sql_string(dialect, false)
}

fn db_triggers<D: Dialect + ?Sized>(dialect: &D, params: &KeywordParams) -> SqlResult<String> {
	let mut select = SqlSelect::new();
	select
		.add_field("t", "event_object_table", "tblName")
		.add_field("t", "trigger_name", "trgName")
		.add_from_as("information_schema.triggers", "t")
		.set_where(filters(
			params,
			&[
				(ParamKey::DbName, "t", "trigger_catalog"),
				(ParamKey::DbName, "t", "event_object_catalog"),
				(ParamKey::DbSchema, "t", "trigger_schema"),
				(ParamKey::DbSchema, "t", "event_object_schema"),
				(ParamKey::Table, "t", "event_object_table"),
			],
		));
	select.sql_string(dialect, false)
}
