//! The same statement trees rendered by every dialect

use pretty_assertions::assert_eq;
use rstest::*;
use sqlforge_query::prelude::*;

#[fixture]
fn paged_names() -> SqlSelect {
	let mut select = Query::select();
	select
		.add_fields("u", ["Id"])
		.add_expr(
			sql_utils::concat([
				sql_utils::field("u", "First"),
				sql_utils::constant(" "),
				sql_utils::field("u", "Last"),
			]),
			Some("full"),
		)
		.add_from_as("Users", "u")
		.set_where(sql_utils::equal("u", "Active", true))
		.add_order("u", "Id")
		.set_limit(10)
		.set_offset(20);
	select
}

/// Quoting, concatenation and paging per dialect
#[rstest]
#[case::generic(
	SqlEngine::Generic,
	"SELECT u.Id, u.First || ' ' || u.Last AS full FROM Users u WHERE u.Active = 1 \
	 ORDER BY u.Id LIMIT 10 OFFSET 20"
)]
#[case::postgres(
	SqlEngine::PostgreSql,
	r#"SELECT "u"."Id", "u"."First" || ' ' || "u"."Last" AS "full" FROM "Users" "u" WHERE "u"."Active" = 1 ORDER BY "u"."Id" LIMIT 10 OFFSET 20"#
)]
#[case::mysql(
	SqlEngine::MySql,
	"SELECT `u`.`Id`, CONCAT(`u`.`First`, ' ', `u`.`Last`) AS `full` FROM `Users` `u` \
	 WHERE `u`.`Active` = 1 ORDER BY `u`.`Id` LIMIT 10 OFFSET 20"
)]
#[case::mssql(
	SqlEngine::MsSql,
	"SELECT [u].[Id], [u].[First] + ' ' + [u].[Last] AS [full] FROM [Users] [u] \
	 WHERE [u].[Active] = 1 ORDER BY [u].[Id] OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
)]
#[case::oracle(
	SqlEngine::Oracle,
	r#"SELECT "u"."Id", "u"."First" || ' ' || "u"."Last" AS "full" FROM "Users" "u" WHERE "u"."Active" = 1 ORDER BY "u"."Id" OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"#
)]
fn test_paged_select(paged_names: SqlSelect, #[case] engine: SqlEngine, #[case] expected: &str) {
	let settings = BuilderSettings::new(engine).with_param_mode(false);
	let (sql, values) = settings.render(&paged_names).unwrap();

	assert_eq!(sql, expected);
	assert!(values.is_empty());
}

/// Temporary tables: prefix keyword and table name both vary
#[rstest]
#[case::generic(SqlEngine::Generic, "CREATE TEMPORARY TABLE Scratch (Id INTEGER NOT NULL)")]
#[case::postgres(
	SqlEngine::PostgreSql,
	r#"CREATE TEMPORARY TABLE "Scratch" ("Id" INTEGER NOT NULL)"#
)]
#[case::mysql(SqlEngine::MySql, "CREATE TEMPORARY TABLE `Scratch` (`Id` INTEGER NOT NULL)")]
#[case::mssql(SqlEngine::MsSql, "CREATE TABLE [#Scratch] ([Id] INTEGER NOT NULL)")]
#[case::oracle(
	SqlEngine::Oracle,
	r#"CREATE GLOBAL TEMPORARY TABLE "Scratch" ("Id" NUMBER(10) NOT NULL)"#
)]
fn test_temporary_table(#[case] engine: SqlEngine, #[case] expected: &str) {
	let dialect = engine.dialect();
	let name = sql_utils::temporary_name(dialect, "Scratch").unwrap();

	let mut create = Query::create(name.as_str());
	create.set_temporary(true).add_integer("Id", true);

	assert_eq!(create.sql_string(dialect, false).unwrap(), expected);
}

/// DDL commands through the keyword map
#[rstest]
#[case::generic(SqlEngine::Generic, "ALTER TABLE Users RENAME TO People")]
#[case::postgres(SqlEngine::PostgreSql, r#"ALTER TABLE "Users" RENAME TO "People""#)]
#[case::mysql(SqlEngine::MySql, "RENAME TABLE `Users` TO `People`")]
#[case::mssql(SqlEngine::MsSql, "EXEC sp_rename 'Users', 'People'")]
#[case::oracle(SqlEngine::Oracle, r#"ALTER TABLE "Users" RENAME TO "People""#)]
fn test_rename_table(#[case] engine: SqlEngine, #[case] expected: &str) {
	let cmd = sql_utils::rename_table("Users", "People");
	assert_eq!(cmd.sql_string(engine.dialect(), false).unwrap(), expected);
}

/// Foreign keys share one spelling across dialects apart from quoting
#[rstest]
fn test_foreign_key_with_cascade() {
	let cmd = sql_utils::create_foreign_key(
		"Orders",
		"FK_Orders_Users",
		["UserId"],
		"Users",
		["Id"],
		Some(Keyword::Cascade),
	);

	assert_eq!(
		cmd.sql_string(&PostgresDialect, false).unwrap(),
		r#"ALTER TABLE "Orders" ADD CONSTRAINT "FK_Orders_Users" FOREIGN KEY ("UserId") REFERENCES "Users" ("Id") ON DELETE CASCADE"#
	);
	assert_eq!(
		cmd.sql_string(&MySqlDialect, false).unwrap(),
		"ALTER TABLE `Orders` ADD CONSTRAINT `FK_Orders_Users` FOREIGN KEY (`UserId`) REFERENCES `Users` (`Id`) ON DELETE CASCADE"
	);
}

/// Bitwise and is an operator everywhere but Oracle
#[rstest]
#[case::generic(SqlEngine::Generic, "(t.flags & 4) <> 0")]
#[case::mssql(SqlEngine::MsSql, "([t].[flags] & 4) <> 0")]
#[case::oracle(SqlEngine::Oracle, r#"BITAND("t"."flags", 4) <> 0"#)]
fn test_bit_and(#[case] engine: SqlEngine, #[case] expected: &str) {
	let condition = sql_utils::compare(
		sql_utils::bit_and(sql_utils::field("t", "flags"), 4),
		Operator::Ne,
		sql_utils::constant(0),
	);
	assert_eq!(condition.sql_string(engine.dialect(), false).unwrap(), expected);
}

/// A subquery nested in a condition is paged by its own dialect
#[rstest]
fn test_nested_subquery_uses_dialect_paging() {
	let mut latest = Query::select();
	latest
		.add_fields("o", ["UserId"])
		.add_from_as("Orders", "o")
		.add_order_desc("o", "Created")
		.set_limit(5);

	let mut select = Query::select();
	select
		.add_fields("u", ["Name"])
		.add_from_as("Users", "u")
		.set_where(sql_utils::in_query("u", "Id", latest));

	assert_eq!(
		select.sql_string(&MsSqlDialect, false).unwrap(),
		"SELECT [u].[Name] FROM [Users] [u] WHERE [u].[Id] IN \
		 (SELECT TOP 5 [o].[UserId] FROM [Orders] [o] ORDER BY [o].[Created] DESC)"
	);
	assert_eq!(
		select.sql_string(&MySqlDialect, false).unwrap(),
		"SELECT `u`.`Name` FROM `Users` `u` WHERE `u`.`Id` IN \
		 (SELECT `o`.`UserId` FROM `Orders` `o` ORDER BY `o`.`Created` DESC LIMIT 5)"
	);
}

/// Table listings expose the same column aliases on every engine
#[rstest]
fn test_db_tables_aliases() {
	let cmd = sql_utils::db_tables(None, Some("app"), Some("Users"));
	for engine in SqlEngine::ALL {
		let dialect = engine.dialect();
		let sql = cmd.sql_string(dialect, false).unwrap();
		for alias in ["tblName", "rowCount"] {
			let column = format!(" AS {}", dialect.sql_quote(alias));
			assert!(sql.contains(&column), "{}: {}", engine, sql);
		}
	}
}

/// Unique indexes stay indexes, so SQL Server can filter out NULLs
#[rstest]
#[case::generic(SqlEngine::Generic, "CREATE UNIQUE INDEX ux_email ON Users (email)")]
#[case::postgres(SqlEngine::PostgreSql, r#"CREATE UNIQUE INDEX "ux_email" ON "Users" ("email")"#)]
#[case::mysql(SqlEngine::MySql, "CREATE UNIQUE INDEX `ux_email` ON `Users` (`email`)")]
#[case::mssql(
	SqlEngine::MsSql,
	"CREATE UNIQUE INDEX [ux_email] ON [Users] ([email]) WHERE [email] IS NOT NULL"
)]
fn test_unique_index(#[case] engine: SqlEngine, #[case] expected: &str) {
	let cmd = sql_utils::create_index("Users", "ux_email", ["email"], true);
	assert_eq!(cmd.sql_string(engine.dialect(), false).unwrap(), expected);
}
