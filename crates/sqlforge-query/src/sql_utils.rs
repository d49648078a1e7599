//! Shorthand constructors for expressions, conditions and commands.
//!
//! Most statement trees are written with these helpers rather than the node
//! enums directly:
//!
//! ```rust
//! use sqlforge_query::prelude::*;
//!
//! let mut select = SqlSelect::new();
//! select
//!     .add_fields("o", ["Id"])
//!     .add_from_as("Orders", "o")
//!     .set_where(sql_utils::and([
//!         sql_utils::more_equal("o", "Total", 100),
//!         sql_utils::or([
//!             sql_utils::is_null("o", "Closed"),
//!             sql_utils::starts_with(sql_utils::field("o", "Code"), "A_"),
//!         ]),
//!     ]));
//!
//! assert_eq!(
//!     select.sql_string(&GenericDialect, false).unwrap(),
//!     "SELECT o.Id FROM Orders o WHERE o.Total >= 100 \
//!      AND (o.Closed IS NULL OR o.Code LIKE 'A|_%' ESCAPE '|')"
//! );
//! ```

use crate::{
	backend::Dialect,
	error::SqlResult,
	expr::{Condition, Expression},
	query::{SqlCommand, SqlSelect},
	types::{DataType, Keyword, KeywordParam, KeywordParams, Operator, ParamKey, SqlFunction},
	value::Value,
};

/// Escape character used by [`contains`], [`starts_with`] and [`ends_with`].
pub const LIKE_ESCAPE: char = '|';

pub fn field(source: &str, name: &str) -> Expression {
	Expression::field(source, name)
}

pub fn name(name: &str) -> Expression {
	Expression::name(name)
}

pub fn constant(value: impl Into<Value>) -> Expression {
	Expression::constant(value)
}

/// Parts juxtaposed without a separator.
pub fn expression(parts: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Bulk, parts.into_iter().collect())
}

pub fn compare(left: Expression, op: Operator, right: Expression) -> Condition {
	Condition::Comparison { left, op, right }
}

fn compare_field(source: &str, name: &str, op: Operator, value: impl Into<Value>) -> Condition {
	compare(field(source, name), op, constant(value))
}

/// `source.name = value`
pub fn equal(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Eq, value)
}

pub fn not_equal(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Ne, value)
}

pub fn less(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Lt, value)
}

pub fn less_equal(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Le, value)
}

pub fn more(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Gt, value)
}

pub fn more_equal(source: &str, name: &str, value: impl Into<Value>) -> Condition {
	compare_field(source, name, Operator::Ge, value)
}

/// Conjunction of `conditions`; empty ones are skipped when rendering.
pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Condition {
	conditions.into_iter().fold(Condition::all(), Condition::add)
}

/// Disjunction of `conditions`; empty ones are skipped when rendering.
pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Condition {
	conditions.into_iter().fold(Condition::any(), Condition::add)
}

pub fn not(condition: Condition) -> Condition {
	condition.not()
}

/// A condition that always holds.
///
/// DELETE refuses to render without a WHERE clause; pass this to remove
/// every row on purpose.
pub fn always() -> Condition {
	compare(Expression::raw("1"), Operator::Eq, Expression::raw("1"))
}

/// `source.name IN (v1, v2, ..)`
pub fn in_list<I, V>(source: &str, name: &str, values: I) -> Condition
where
	I: IntoIterator<Item = V>,
	V: Into<Value>,
{
	Condition::InList {
		expr: field(source, name),
		values: values.into_iter().map(constant).collect(),
	}
}

/// `source.name IN (SELECT ..)`
pub fn in_query(source: &str, name: &str, query: SqlSelect) -> Condition {
	Condition::InQuery {
		expr: field(source, name),
		query: Box::new(query),
	}
}

pub fn is_null(source: &str, name: &str) -> Condition {
	Condition::IsNull(field(source, name))
}

pub fn not_null(source: &str, name: &str) -> Condition {
	Condition::NotNull(field(source, name))
}

/// `expr LIKE pattern`, with the pattern passed through unchanged.
pub fn like(expr: Expression, pattern: impl Into<Value>) -> Condition {
	Condition::Like {
		expr,
		pattern: constant(pattern),
		escape: None,
	}
}

/// Escape LIKE wildcards (and the escape character itself) in `value`.
pub fn escape_like(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
			escaped.push(LIKE_ESCAPE);
		}
		escaped.push(c);
	}
	escaped
}

fn like_escaped(expr: Expression, pattern: String) -> Condition {
	Condition::Like {
		expr,
		pattern: constant(pattern),
		escape: Some(LIKE_ESCAPE),
	}
}

/// `expr` contains `value` literally.
pub fn contains(expr: Expression, value: &str) -> Condition {
	like_escaped(expr, format!("%{}%", escape_like(value)))
}

/// `expr` starts with `value` literally.
pub fn starts_with(expr: Expression, value: &str) -> Condition {
	like_escaped(expr, format!("{}%", escape_like(value)))
}

/// `expr` ends with `value` literally.
pub fn ends_with(expr: Expression, value: &str) -> Condition {
	like_escaped(expr, format!("%{}", escape_like(value)))
}

/// `expr` matches a shell-style `pattern` where `*` is any run of
/// characters and `?` a single one; SQL wildcards in it are literal.
pub fn matches(expr: Expression, pattern: &str) -> Condition {
	let pattern = escape_like(pattern)
		.chars()
		.map(|c| match c {
			'*' => '%',
			'?' => '_',
			c => c,
		})
		.collect();
	like_escaped(expr, pattern)
}

/// `src1.fld1 = src2.fld2`
pub fn join(src1: &str, fld1: &str, src2: &str, fld2: &str) -> Condition {
	compare(field(src1, fld1), Operator::Eq, field(src2, fld2))
}

/// `src1.fld = src2.fld`
pub fn join_using(src1: &str, src2: &str, fld: &str) -> Condition {
	join(src1, fld, src2, fld)
}

/// Bitwise and of `expr` with `mask`.
pub fn bit_and(expr: Expression, mask: impl Into<Value>) -> Expression {
	Expression::BitAnd {
		expr: Box::new(expr),
		mask: Box::new(constant(mask)),
	}
}

/// `CASE WHEN condition THEN then ELSE otherwise END`
pub fn sql_if(condition: Condition, then: Expression, otherwise: Expression) -> Expression {
	Expression::If {
		condition: Box::new(condition),
		then: Box::new(then),
		otherwise: Box::new(otherwise),
	}
}

/// `CASE expr WHEN .. THEN .. ELSE otherwise END`
pub fn sql_case(
	expr: Expression,
	branches: impl IntoIterator<Item = (Expression, Expression)>,
	otherwise: Expression,
) -> Expression {
	let mut args = vec![expr];
	for (when, then) in branches {
		args.push(when);
		args.push(then);
	}
	args.push(otherwise);
	Expression::function(SqlFunction::Case, args)
}

/// First non-NULL argument.
pub fn nvl(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Nvl, args.into_iter().collect())
}

pub fn concat(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Concat, args.into_iter().collect())
}

pub fn plus(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Plus, args.into_iter().collect())
}

pub fn minus(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Minus, args.into_iter().collect())
}

pub fn multiply(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Multiply, args.into_iter().collect())
}

pub fn divide(args: impl IntoIterator<Item = Expression>) -> Expression {
	Expression::function(SqlFunction::Divide, args.into_iter().collect())
}

pub fn length(expr: Expression) -> Expression {
	Expression::function(SqlFunction::Length, vec![expr])
}

/// Substring from 1-based `pos`, to the end when `len` is `None`.
pub fn substring(expr: Expression, pos: u32, len: Option<u32>) -> Expression {
	let mut args = vec![expr, constant(i64::from(pos))];
	if let Some(len) = len {
		args.push(constant(i64::from(len)));
	}
	Expression::function(SqlFunction::Substring, args)
}

pub fn left(expr: Expression, len: u32) -> Expression {
	Expression::function(SqlFunction::Left, vec![expr, constant(i64::from(len))])
}

pub fn right(expr: Expression, len: u32) -> Expression {
	Expression::function(SqlFunction::Right, vec![expr, constant(i64::from(len))])
}

pub fn cast(expr: Expression, data_type: DataType, precision: u32, scale: u32) -> Expression {
	Expression::cast(expr, data_type, precision, scale)
}

fn idents<I, S>(names: I) -> KeywordParam
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	KeywordParam::Idents(names.into_iter().map(Into::into).collect())
}

fn ident(name: &str) -> KeywordParam {
	KeywordParam::Ident(name.to_string())
}

fn filter(value: Option<&str>) -> Option<KeywordParam> {
	value.map(|v| KeywordParam::Value(Value::from(v)))
}

/// `CREATE [UNIQUE] INDEX`; see [`create_unique`] for the constraint form.
///
/// An empty field list indexes the column named like the index.
pub fn create_index<I, S>(table: &str, name: &str, fields: I, unique: bool) -> SqlCommand
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	SqlCommand::new(
		Keyword::CreateIndex,
		KeywordParams::new()
			.with(ParamKey::Table, ident(table))
			.with(ParamKey::Name, ident(name))
			.with(ParamKey::Fields, idents(fields))
			.with(ParamKey::Unique, KeywordParam::Flag(unique)),
	)
}

fn add_constraint<I, S>(kind: Keyword, table: &str, name: &str, fields: I) -> KeywordParams
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	KeywordParams::new()
		.with(ParamKey::Table, ident(table))
		.with(ParamKey::Name, ident(name))
		.with(ParamKey::Type, KeywordParam::Keyword(kind))
		.with(ParamKey::Fields, idents(fields))
}

pub fn create_primary_key<I, S>(table: &str, name: &str, fields: I) -> SqlCommand
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	SqlCommand::new(
		Keyword::AddConstraint,
		add_constraint(Keyword::PrimaryKey, table, name, fields),
	)
}

pub fn create_unique<I, S>(table: &str, name: &str, fields: I) -> SqlCommand
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	SqlCommand::new(
		Keyword::AddConstraint,
		add_constraint(Keyword::Unique, table, name, fields),
	)
}

/// Foreign key constraint; `action` is [`Keyword::Cascade`] or
/// [`Keyword::SetNull`] for an `ON DELETE` clause.
pub fn create_foreign_key<I, S, R, T>(
	table: &str,
	name: &str,
	fields: I,
	ref_table: &str,
	ref_fields: R,
	action: Option<Keyword>,
) -> SqlCommand
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
	R: IntoIterator<Item = T>,
	T: Into<String>,
{
	let params = add_constraint(Keyword::ForeignKey, table, name, fields)
		.with(ParamKey::RefTable, ident(ref_table))
		.with(ParamKey::RefFields, idents(ref_fields))
		.with_option(ParamKey::Cascade, action.map(KeywordParam::Keyword));
	SqlCommand::new(Keyword::AddConstraint, params)
}

pub fn drop_table(table: &str) -> SqlCommand {
	SqlCommand::new(
		Keyword::DropTable,
		KeywordParams::new().with(ParamKey::Table, ident(table)),
	)
}

pub fn drop_foreign_key(table: &str, name: &str) -> SqlCommand {
	SqlCommand::new(
		Keyword::DropForeignKey,
		KeywordParams::new()
			.with(ParamKey::Table, ident(table))
			.with(ParamKey::Name, ident(name)),
	)
}

pub fn rename_table(from: &str, to: &str) -> SqlCommand {
	SqlCommand::new(
		Keyword::RenameTable,
		KeywordParams::new()
			.with(ParamKey::NameFrom, ident(from))
			.with(ParamKey::NameTo, ident(to)),
	)
}

pub fn create_schema(schema: &str) -> SqlCommand {
	SqlCommand::new(
		Keyword::CreateSchema,
		KeywordParams::new().with(ParamKey::Schema, ident(schema)),
	)
}

/// Query returning the current database name as `dbName`.
pub fn db_name() -> SqlCommand {
	SqlCommand::new(Keyword::DbName, KeywordParams::new())
}

/// Query returning the current schema as `dbSchema`.
pub fn db_schema() -> SqlCommand {
	SqlCommand::new(Keyword::DbSchema, KeywordParams::new())
}

fn catalog_params(
	db_name: Option<&str>,
	db_schema: Option<&str>,
	table: Option<&str>,
) -> KeywordParams {
	KeywordParams::new()
		.with_option(ParamKey::DbName, filter(db_name))
		.with_option(ParamKey::DbSchema, filter(db_schema))
		.with_option(ParamKey::Table, filter(table))
}

/// Schema names as `schemaName`, optionally filtered by database and name.
pub fn db_schemas(db_name: Option<&str>, schema: Option<&str>) -> SqlCommand {
	SqlCommand::new(
		Keyword::DbSchemas,
		KeywordParams::new()
			.with_option(ParamKey::DbName, filter(db_name))
			.with_option(ParamKey::Schema, filter(schema)),
	)
}

/// Tables as `tblName` with an engine row estimate as `rowCount`;
/// `None` or blank filters are ignored.
pub fn db_tables(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
	SqlCommand::new(Keyword::DbTables, catalog_params(db_name, db_schema, table))
}

/// Column metadata in ordinal order.
pub fn db_fields(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
	SqlCommand::new(Keyword::DbFields, catalog_params(db_name, db_schema, table))
}

/// Keys of the given kinds ([`Keyword::PrimaryKey`], [`Keyword::ForeignKey`]
/// or [`Keyword::Unique`]).
pub fn db_keys(
	db_name: Option<&str>,
	db_schema: Option<&str>,
	table: Option<&str>,
	key_types: impl IntoIterator<Item = Keyword>,
) -> SqlCommand {
	let params = catalog_params(db_name, db_schema, table).with(
		ParamKey::KeyTypes,
		KeywordParam::Keywords(key_types.into_iter().collect()),
	);
	SqlCommand::new(Keyword::DbKeys, params)
}

/// Foreign keys with their owning and referenced tables.
pub fn db_foreign_keys(
	db_name: Option<&str>,
	db_schema: Option<&str>,
	table: Option<&str>,
	ref_table: Option<&str>,
) -> SqlCommand {
	let params = catalog_params(db_name, db_schema, table)
		.with_option(ParamKey::RefTable, filter(ref_table));
	SqlCommand::new(Keyword::DbForeignKeys, params)
}

/// Indexes as `tblName` and `keyName`.
pub fn db_indexes(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
	SqlCommand::new(Keyword::DbIndexes, catalog_params(db_name, db_schema, table))
}

/// Triggers as `tblName` and `trgName`.
pub fn db_triggers(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
	SqlCommand::new(Keyword::DbTriggers, catalog_params(db_name, db_schema, table))
}

/// Name under which `dialect` stores a temporary table called `name`.
pub fn temporary_name<D: Dialect + ?Sized>(dialect: &D, name: &str) -> SqlResult<String> {
	dialect.sql_keyword(
		Keyword::TemporaryName,
		&KeywordParams::new().with(ParamKey::Name, ident(name)),
	)
}
