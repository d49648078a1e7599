//! Microsoft SQL Server dialect
//!
//! This module implements the SQL generation backend for MS SQL Server.

use tracing::trace;

use super::{
	Dialect, SqlEngine, function::standard_function, keyword::standard_keyword, render,
	standard_type,
};
use crate::{
	error::{SqlError, SqlResult},
	query::{IsSql, SqlCreate, SqlDelete, SqlSelect},
	sql_utils,
	types::{DataType, Keyword, KeywordParams, ParamKey, SqlFunction},
};

/// Length passed to `SUBSTRING` when the caller gives none.
const SUBSTRING_TAIL: u32 = 1_000_000;

/// MS SQL Server dialect
///
/// This struct implements SQL generation for SQL Server, using the following conventions:
/// - Identifiers: Square brackets (`[table_name]`)
/// - Temporary tables: `#name`, created with `SELECT .. INTO`
/// - Paging: `TOP n`, or `OFFSET .. FETCH` when an offset is set
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut select = SqlSelect::new();
/// select.add_fields("u", ["id"]).add_from_as("users", "u").set_limit(5);
///
/// assert_eq!(
///     select.sql_string(&MsSqlDialect, false).unwrap(),
///     "SELECT TOP 5 [u].[id] FROM [users] [u]"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsSqlDialect;

impl MsSqlDialect {
	fn db_tables(&self, params: &KeywordParams) -> SqlResult<String> {
		let wh = sql_utils::and([
			sql_utils::equal("o", "type", "U"),
			sql_utils::equal("o", "is_ms_shipped", 0),
			sql_utils::less("p", "index_id", 2),
		])
		.add(super::keyword::filters(
			params,
			&[(ParamKey::DbSchema, "s", "name"), (ParamKey::Table, "o", "name")],
		));

		let mut select = SqlSelect::new();
		select
			.add_field("o", "name", "tblName")
			.add_sum("p", "rows", "rowCount")
			.add_from_as("sys.objects", "o")
			.add_from_inner("sys.partitions", "p", sql_utils::join_using("o", "p", "object_id"))
			.add_from_inner("sys.schemas", "s", sql_utils::join_using("o", "s", "schema_id"))
			.set_where(wh)
			.add_group("o", ["name"]);
		select.sql_string(self, false)
	}

	fn db_indexes(&self, params: &KeywordParams) -> SqlResult<String> {
		let wh = sql_utils::and([
			sql_utils::not_null("i", "name"),
			sql_utils::equal("o", "type", "U"),
			sql_utils::equal("o", "is_ms_shipped", 0),
		])
		.add(super::keyword::filters(
			params,
			&[(ParamKey::DbSchema, "s", "name"), (ParamKey::Table, "o", "name")],
		));

		let mut select = SqlSelect::new();
		select
			.add_field("o", "name", "tblName")
			.add_field("i", "name", "keyName")
			.add_from_as("sys.indexes", "i")
			.add_from_inner("sys.objects", "o", sql_utils::join_using("i", "o", "object_id"))
			.add_from_inner("sys.schemas", "s", sql_utils::join_using("o", "s", "schema_id"))
			.set_where(wh);
		select.sql_string(self, false)
	}

	fn db_triggers(&self, params: &KeywordParams) -> SqlResult<String> {
		let mut select = SqlSelect::new();
		select
			.add_field("o", "name", "tblName")
			.add_field("t", "name", "trgName")
			.add_from_as("sys.triggers", "t")
			.add_from_inner("sys.objects", "o", sql_utils::join("t", "parent_id", "o", "object_id"))
			.add_from_inner("sys.schemas", "s", sql_utils::join_using("o", "s", "schema_id"))
			.set_where(super::keyword::filters(
				params,
				&[(ParamKey::DbSchema, "s", "name"), (ParamKey::Table, "o", "name")],
			));
		select.sql_string(self, false)
	}

	/// Paging that `TOP` cannot express.
	fn needs_offset_fetch(select: &SqlSelect) -> bool {
		select.offset().is_some() || (select.limit().is_some() && !select.unions().is_empty())
	}

	/// Page a UNION as a derived table, since its ORDER BY may only name
	/// projected columns.
	fn paged_union(
		&self,
		select: &SqlSelect,
		param_mode: bool,
		into: Option<&str>,
	) -> SqlResult<String> {
		let core = render::select_core(self, select, param_mode, None)?;
		let mut sql = String::from("SELECT *");
		if let Some(into) = into {
			sql.push_str(" INTO ");
			sql.push_str(into);
		}
		sql.push_str(&format!(" FROM ({}) {}", core, self.sql_quote("q")));

		let order = render::order_by(self, select, param_mode)?;
		if order.is_empty() {
			sql.push_str(" ORDER BY (SELECT 0)");
		} else {
			sql.push_str(&order);
		}
		Ok(render::offset_fetch(sql, select))
	}
}

impl Dialect for MsSqlDialect {
	fn engine(&self) -> SqlEngine {
		SqlEngine::MsSql
	}

	fn sql_quote(&self, name: &str) -> String {
		format!("[{}]", name.replace(']', "]]"))
	}

	fn sql_type(&self, data_type: DataType, precision: u32, scale: u32) -> SqlResult<String> {
		match data_type {
			DataType::Double => Ok("FLOAT".to_string()),
			DataType::Text => Ok("VARCHAR(MAX)".to_string()),
			DataType::Date => Ok("DATE".to_string()),
			DataType::DateTime => Ok("DATETIME2".to_string()),
			_ => standard_type(self, data_type, precision, scale),
		}
	}

	fn sql_keyword(&self, keyword: Keyword, params: &KeywordParams) -> SqlResult<String> {
		match keyword {
			Keyword::CreateIndex => {
				let mut sql = standard_keyword(self, keyword, params)?;
				let fields = params.idents(ParamKey::Fields);
				// Unique indexes would otherwise allow a single NULL only
				if params.flag(ParamKey::Unique) && fields.len() == 1 {
					sql.push_str(&format!(" WHERE {} IS NOT NULL", self.sql_name(fields[0])));
				}
				Ok(sql)
			}
			Keyword::RenameTable => Ok(format!(
				"EXEC sp_rename '{}', '{}'",
				params.ident(keyword, ParamKey::NameFrom)?.replace('\'', "''"),
				params.ident(keyword, ParamKey::NameTo)?.replace('\'', "''")
			)),
			Keyword::Temporary => Ok(String::new()),
			Keyword::TemporaryName => Ok(format!("#{}", params.ident(keyword, ParamKey::Name)?)),
			Keyword::DbName => Ok(format!("SELECT db_name() AS {}", self.sql_quote("dbName"))),
			Keyword::DbSchema => Ok(format!(
				"SELECT schema_name() AS {}",
				self.sql_quote("dbSchema")
			)),
			Keyword::DbTables => self.db_tables(params),
			Keyword::DbIndexes => self.db_indexes(params),
			Keyword::DbTriggers => self.db_triggers(params),
			_ => standard_keyword(self, keyword, params),
		}
	}

	fn sql_function(&self, function: SqlFunction, args: &[String]) -> SqlResult<String> {
		match function {
			SqlFunction::Concat => {
				if args.is_empty() {
					return Err(SqlError::InvalidArguments { function, count: 0 });
				}
				Ok(args.join(" + "))
			}
			SqlFunction::Length if args.len() == 1 => Ok(format!("LEN({})", args[0])),
			SqlFunction::Substring if matches!(args.len(), 2 | 3) => {
				let len = args
					.get(2)
					.cloned()
					.unwrap_or_else(|| SUBSTRING_TAIL.to_string());
				Ok(format!("SUBSTRING({},{},{})", args[0], args[1], len))
			}
			_ => standard_function(self, function, args),
		}
	}

	fn sql_paging(&self, sql: String, select: &SqlSelect) -> String {
		match (select.limit(), select.offset()) {
			(None, None) => sql,
			(Some(limit), None) if select.unions().is_empty() => {
				let head = if select.is_distinct() {
					"SELECT DISTINCT "
				} else {
					"SELECT "
				};
				match sql.strip_prefix(head) {
					Some(rest) => format!("{}TOP {} {}", head, limit, rest),
					None => sql,
				}
			}
			_ => {
				let mut sql = sql;
				// OFFSET requires an ORDER BY; unions are wrapped by get_query first
				if select.order_by().is_empty() {
					sql.push_str(" ORDER BY (SELECT 0)");
				}
				render::offset_fetch(sql, select)
			}
		}
	}

	fn get_query(&self, select: &SqlSelect, param_mode: bool) -> SqlResult<String> {
		if !select.unions().is_empty() && Self::needs_offset_fetch(select) {
			return self.paged_union(select, param_mode, None);
		}
		render::query(self, select, param_mode)
	}

	fn get_create(&self, create: &SqlCreate, param_mode: bool) -> SqlResult<String> {
		let Some(query) = create.data_source() else {
			return render::create(self, create, param_mode);
		};
		if create.is_empty() {
			return Err(SqlError::EmptyStatement { kind: "CREATE" });
		}
		trace!(engine = %self.engine(), kind = "CREATE", param_mode, "rendering SELECT INTO");

		let target = self.sql_name(create.target());
		if !query.unions().is_empty() && Self::needs_offset_fetch(query) {
			return self.paged_union(query, param_mode, Some(&target));
		}
		let mut sql = render::select_core(self, query, param_mode, Some(&target))?;
		sql.push_str(&render::order_by(self, query, param_mode)?);
		Ok(self.sql_paging(sql, query))
	}

	fn get_delete(&self, delete: &SqlDelete, param_mode: bool) -> SqlResult<String> {
		render::delete_with(self, delete, param_mode, "FROM")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{expr::Expression, query::SqlUpdate};
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	fn test_temporary_name_in_like() {
		let name = sql_utils::temporary_name(&MsSqlDialect, "temp value").unwrap();
		let mut select = SqlSelect::new();
		select
			.add_fields("Source_table", ["name"])
			.add_from("Source_table")
			.set_where(sql_utils::contains(sql_utils::constant(name), "5"));

		assert_eq!(
			select.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT [Source_table].[name] FROM [Source_table] WHERE '#temp value' LIKE '%5%' ESCAPE '|'"
		);
	}

	#[rstest]
	fn test_create_temporary_as_select_into() {
		let mut source = SqlSelect::new();
		source
			.add_fields("u", ["id", "name"])
			.add_from_as("users", "u")
			.set_where(sql_utils::equal("u", "active", true));

		let target = sql_utils::temporary_name(&MsSqlDialect, "tmp").unwrap();
		let mut create = SqlCreate::new(target);
		create.set_temporary(true).set_data_source(source);

		assert_eq!(
			create.sql_string(&MsSqlDialect, true).unwrap(),
			"SELECT [u].[id], [u].[name] INTO [#tmp] FROM [users] [u] WHERE [u].[active] = ?"
		);
		assert_eq!(create.sql_params().len(), 1);
	}

	#[rstest]
	fn test_select_into_follows_outer_select_list() {
		let mut last_order = SqlSelect::new();
		last_order
			.add_max("o", "Id", "m")
			.add_from_as("Orders", "o")
			.set_where(sql_utils::join("o", "UserId", "u", "Id"));

		let mut source = SqlSelect::new();
		source
			.add_expr(Expression::query(last_order), Some("lastOrder"))
			.add_expr(sql_utils::constant("a FROM b"), Some("label"))
			.add_fields("u", ["Id"])
			.add_from_as("Users", "u");

		let mut create = SqlCreate::new("#tmp");
		create.set_temporary(true).set_data_source(source);

		assert_eq!(
			create.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT (SELECT MAX([o].[Id]) AS [m] FROM [Orders] [o] WHERE [o].[UserId] = [u].[Id]) AS [lastOrder], \
			 'a FROM b' AS [label], [u].[Id] INTO [#tmp] FROM [Users] [u]"
		);
		assert_eq!(
			create.sql_string(&MsSqlDialect, true).unwrap(),
			"SELECT (SELECT MAX([o].[Id]) AS [m] FROM [Orders] [o] WHERE [o].[UserId] = [u].[Id]) AS [lastOrder], \
			 ? AS [label], [u].[Id] INTO [#tmp] FROM [Users] [u]"
		);
		assert_eq!(create.sql_params(), crate::Values(vec!["a FROM b".into()]));
	}

	#[rstest]
	fn test_select_into_with_top() {
		let mut source = SqlSelect::new();
		source
			.add_fields("u", ["Id"])
			.add_from_as("Users", "u")
			.add_order("u", "Id")
			.set_limit(5);

		let mut create = SqlCreate::new("Top5");
		create.set_data_source(source);

		assert_eq!(
			create.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT TOP 5 [u].[Id] INTO [Top5] FROM [Users] [u] ORDER BY [u].[Id]"
		);
	}

	fn names_union() -> SqlSelect {
		let mut people = SqlSelect::new();
		people.add_field("p", "Name", "name").add_from_as("People", "p");
		let mut users = SqlSelect::new();
		users
			.add_field("u", "Name", "name")
			.add_from_as("Users", "u")
			.add_union(people);
		users
	}

	#[rstest]
	fn test_union_offset_pages_derived_table() {
		let mut select = names_union();
		select.set_offset(5);

		assert_eq!(
			select.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT * FROM (SELECT [u].[Name] AS [name] FROM [Users] [u] \
			 UNION (SELECT [p].[Name] AS [name] FROM [People] [p])) [q] \
			 ORDER BY (SELECT 0) OFFSET 5 ROWS"
		);
	}

	#[rstest]
	fn test_union_limit_keeps_alias_order() {
		let mut select = names_union();
		select.add_order("u", "name").set_limit(10);

		assert_eq!(
			select.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT * FROM (SELECT [u].[Name] AS [name] FROM [Users] [u] \
			 UNION (SELECT [p].[Name] AS [name] FROM [People] [p])) [q] \
			 ORDER BY [name] OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
		);
	}

	#[rstest]
	fn test_union_into_with_offset() {
		let mut source = names_union();
		source.set_offset(1);
		let mut create = SqlCreate::new("Names");
		create.set_data_source(source);

		assert_eq!(
			create.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT * INTO [Names] FROM (SELECT [u].[Name] AS [name] FROM [Users] [u] \
			 UNION (SELECT [p].[Name] AS [name] FROM [People] [p])) [q] \
			 ORDER BY (SELECT 0) OFFSET 1 ROWS"
		);
	}

	#[rstest]
	fn test_create_temporary_columns_skip_keyword() {
		let mut create = SqlCreate::new("#tmp");
		create.set_temporary(true).add_text("note", false);

		assert_eq!(
			create.sql_string(&MsSqlDialect, false).unwrap(),
			"CREATE TABLE [#tmp] ([note] VARCHAR(MAX))"
		);
	}

	#[rstest]
	#[case::top(Some(10), None, false, "SELECT TOP 10 [u].[id] FROM [users] [u]")]
	#[case::offset_unordered(
		Some(10),
		Some(20),
		false,
		"SELECT [u].[id] FROM [users] [u] ORDER BY (SELECT 0) OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
	)]
	#[case::offset_ordered(
		None,
		Some(5),
		true,
		"SELECT [u].[id] FROM [users] [u] ORDER BY [u].[id] OFFSET 5 ROWS"
	)]
	fn test_paging(
		#[case] limit: Option<u64>,
		#[case] offset: Option<u64>,
		#[case] ordered: bool,
		#[case] expected: &str,
	) {
		let mut select = SqlSelect::new();
		select.add_fields("u", ["id"]).add_from_as("users", "u");
		if let Some(limit) = limit {
			select.set_limit(limit);
		}
		if let Some(offset) = offset {
			select.set_offset(offset);
		}
		if ordered {
			select.add_order("u", "id");
		}

		assert_eq!(select.sql_string(&MsSqlDialect, false).unwrap(), expected);
	}

	#[rstest]
	fn test_top_after_distinct() {
		let mut select = SqlSelect::new();
		select
			.set_distinct(true)
			.add_fields("u", ["city"])
			.add_from_as("users", "u")
			.set_limit(3);

		assert_eq!(
			select.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT DISTINCT TOP 3 [u].[city] FROM [users] [u]"
		);
	}

	#[rstest]
	#[case::concat(SqlFunction::Concat, &["[a]", "[b]"], "[a] + [b]")]
	#[case::length(SqlFunction::Length, &["[a]"], "LEN([a])")]
	#[case::substring_tail(SqlFunction::Substring, &["[a]", "2"], "SUBSTRING([a],2,1000000)")]
	#[case::substring(SqlFunction::Substring, &["[a]", "2", "4"], "SUBSTRING([a],2,4)")]
	#[case::left(SqlFunction::Left, &["[a]", "4"], "LEFT([a],4)")]
	fn test_sql_function(#[case] function: SqlFunction, #[case] args: &[&str], #[case] expected: &str) {
		let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
		assert_eq!(MsSqlDialect.sql_function(function, &args).unwrap(), expected);
	}

	#[rstest]
	fn test_unique_single_field_index_skips_nulls() {
		let params = KeywordParams::new()
			.with(ParamKey::Table, crate::types::KeywordParam::Ident("Users".into()))
			.with(ParamKey::Name, crate::types::KeywordParam::Ident("ux_email".into()))
			.with(
				ParamKey::Fields,
				crate::types::KeywordParam::Idents(vec!["email".into()]),
			)
			.with(ParamKey::Unique, crate::types::KeywordParam::Flag(true));

		assert_eq!(
			MsSqlDialect
				.sql_keyword(Keyword::CreateIndex, &params)
				.unwrap(),
			"CREATE UNIQUE INDEX [ux_email] ON [Users] ([email]) WHERE [email] IS NOT NULL"
		);
	}

	#[rstest]
	fn test_unique_index_factory_skips_nulls() {
		let cmd = sql_utils::create_index("Users", "ux_email", ["email"], true);
		assert_eq!(
			cmd.sql_string(&MsSqlDialect, false).unwrap(),
			"CREATE UNIQUE INDEX [ux_email] ON [Users] ([email]) WHERE [email] IS NOT NULL"
		);
	}

	#[rstest]
	fn test_db_indexes() {
		let cmd = sql_utils::db_indexes(None, Some("dbo"), Some("Users"));
		assert_eq!(
			cmd.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT [o].[name] AS [tblName], [i].[name] AS [keyName] \
			 FROM [sys].[indexes] [i] \
			 INNER JOIN [sys].[objects] [o] ON [i].[object_id] = [o].[object_id] \
			 INNER JOIN [sys].[schemas] [s] ON [o].[schema_id] = [s].[schema_id] \
			 WHERE [i].[name] IS NOT NULL AND [o].[type] = 'U' AND [o].[is_ms_shipped] = 0 \
			 AND [s].[name] = 'dbo' AND [o].[name] = 'Users'"
		);
	}

	#[rstest]
	fn test_db_triggers() {
		let cmd = sql_utils::db_triggers(Some("ignored"), None, Some("Users"));
		assert_eq!(
			cmd.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT [o].[name] AS [tblName], [t].[name] AS [trgName] \
			 FROM [sys].[triggers] [t] \
			 INNER JOIN [sys].[objects] [o] ON [t].[parent_id] = [o].[object_id] \
			 INNER JOIN [sys].[schemas] [s] ON [o].[schema_id] = [s].[schema_id] \
			 WHERE [o].[name] = 'Users'"
		);
	}

	#[rstest]
	fn test_rename_table() {
		assert_eq!(
			sql_utils::rename_table("Old", "New")
				.sql_string(&MsSqlDialect, false)
				.unwrap(),
			"EXEC sp_rename 'Old', 'New'"
		);
	}

	#[rstest]
	fn test_db_tables() {
		let cmd = sql_utils::db_tables(Some("ignored"), Some("dbo"), Some("Users"));
		assert_eq!(
			cmd.sql_string(&MsSqlDialect, false).unwrap(),
			"SELECT [o].[name] AS [tblName], SUM([p].[rows]) AS [rowCount] \
			 FROM [sys].[objects] [o] \
			 INNER JOIN [sys].[partitions] [p] ON [o].[object_id] = [p].[object_id] \
			 INNER JOIN [sys].[schemas] [s] ON [o].[schema_id] = [s].[schema_id] \
			 WHERE [o].[type] = 'U' AND [o].[is_ms_shipped] = 0 AND [p].[index_id] < 2 \
			 AND [s].[name] = 'dbo' AND [o].[name] = 'Users' \
			 GROUP BY [o].[name]"
		);
	}

	#[rstest]
	fn test_delete_from_sources() {
		let mut delete = SqlDelete::new("orders");
		delete.add_from("customers", Some("c")).set_where(
			sql_utils::join("orders", "customer_id", "c", "id")
				.add(sql_utils::equal("c", "blocked", true)),
		);

		assert_eq!(
			delete.sql_string(&MsSqlDialect, false).unwrap(),
			"DELETE FROM [orders] FROM [customers] [c] \
			 WHERE [orders].[customer_id] = [c].[id] AND [c].[blocked] = 1"
		);
	}

	#[rstest]
	fn test_update_with_subquery() {
		let mut totals = SqlSelect::new();
		totals
			.add_sum("o", "amount", "total")
			.add_from_as("orders", "o")
			.set_where(sql_utils::join("o", "customer_id", "customers", "id"));

		let mut update = SqlUpdate::new("customers");
		update
			.add_query("total", totals)
			.add_expression("touched", Expression::raw("GETDATE()"));

		assert_eq!(
			update.sql_string(&MsSqlDialect, false).unwrap(),
			"UPDATE [customers] SET [total]=(SELECT SUM([o].[amount]) AS [total] FROM [orders] [o] \
			 WHERE [o].[customer_id] = [customers].[id]), [touched]=GETDATE()"
		);
	}
}
