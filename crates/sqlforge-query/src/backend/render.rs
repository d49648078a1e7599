//! Statement rendering shared by every dialect.
//!
//! The [`Dialect`] statement methods default to these functions; a dialect
//! overrides a statement method only where its syntax differs and can still
//! call back into the pieces here.

use tracing::trace;

use crate::{
	error::{SqlError, SqlResult},
	expr::{Expression, FromClause},
	query::{IsSql, SqlCommand, SqlCreate, SqlDelete, SqlInsert, SqlSelect, SqlUpdate},
	types::{JoinMode, Keyword, KeywordParam, KeywordParams},
};

use super::{Dialect, SqlWriter};

pub(crate) fn ensure_not_empty<S: IsSql>(stmt: &S, kind: &'static str) -> SqlResult<()> {
	if stmt.is_empty() {
		return Err(SqlError::EmptyStatement { kind });
	}
	Ok(())
}

/// Render a source list, prefixing each entry with its join mode.
pub fn from_list<D: Dialect + ?Sized>(
	dialect: &D,
	from: &[FromClause],
	param_mode: bool,
) -> SqlResult<String> {
	let mut sql = String::new();
	for (i, entry) in from.iter().enumerate() {
		sql.push_str(entry.mode().prefix(i == 0));
		sql.push_str(&entry.sql_string(dialect, param_mode)?);
	}
	Ok(sql)
}

/// Target table with an optional alias.
pub fn target<D: Dialect + ?Sized>(dialect: &D, name: &str, alias: Option<&str>) -> String {
	match alias {
		Some(alias) => format!("{} {}", dialect.sql_name(name), dialect.sql_quote(alias)),
		None => dialect.sql_name(name),
	}
}

/// SELECT through its UNION branches, without ORDER BY or paging.
///
/// `into` is written right after the select list, for dialects that create
/// tables with `SELECT .. INTO`.
pub fn select_core<D: Dialect + ?Sized>(
	dialect: &D,
	select: &SqlSelect,
	param_mode: bool,
	into: Option<&str>,
) -> SqlResult<String> {
	ensure_not_empty(select, "SELECT")?;
	trace!(engine = %dialect.engine(), kind = "SELECT", param_mode, "rendering statement");

	let mut w = SqlWriter::new();
	w.push("SELECT ");
	if select.is_distinct() {
		w.push("DISTINCT ");
	}
	w.push_list(select.fields(), ", ", |w, field| {
		w.push(&field.expr.sql_string(dialect, param_mode)?);
		if let Some(alias) = &field.alias {
			w.push(" AS ");
			w.push_identifier(alias, |a| dialect.sql_quote(a));
		}
		Ok(())
	})?;
	if let Some(into) = into {
		w.push(" INTO ");
		w.push(into);
	}

	w.push(" FROM ");
	w.push(&from_list(dialect, select.from_clauses(), param_mode)?);

	if let Some(condition) = select.where_clause() {
		w.push_clause("WHERE", &condition.sql_string(dialect, param_mode)?);
	}
	if !select.group_by().is_empty() {
		w.push(" GROUP BY ");
		w.push_list(select.group_by(), ", ", |w, expr| {
			w.push(&expr.sql_string(dialect, param_mode)?);
			Ok(())
		})?;
	}
	if let Some(condition) = select.having() {
		w.push_clause("HAVING", &condition.sql_string(dialect, param_mode)?);
	}
	for union in select.unions() {
		w.push(if select.is_union_all() {
			" UNION ALL "
		} else {
			" UNION "
		});
		w.push("(");
		w.push(&union.sql_string(dialect, param_mode)?);
		w.push(")");
	}
	Ok(w.into_string())
}

/// ` ORDER BY ..` of `select`, or an empty string when it is unordered.
pub fn order_by<D: Dialect + ?Sized>(
	dialect: &D,
	select: &SqlSelect,
	param_mode: bool,
) -> SqlResult<String> {
	let mut w = SqlWriter::new();
	if select.order_by().is_empty() {
		return Ok(w.into_string());
	}
	// UNION branches hide their source aliases; order by the projection name
	let by_alias = !select.unions().is_empty();
	w.push(" ORDER BY ");
	w.push_list(select.order_by(), ", ", |w, entry| {
		if by_alias || entry.source.is_empty() {
			w.push_identifier(&entry.field, |f| dialect.sql_quote(f));
		} else {
			let field = Expression::field(entry.source.as_str(), entry.field.as_str());
			w.push(&field.sql_string(dialect, param_mode)?);
		}
		if entry.desc {
			w.push(" DESC");
		}
		Ok(())
	})?;
	Ok(w.into_string())
}

/// SELECT without paging.
pub fn query_body<D: Dialect + ?Sized>(
	dialect: &D,
	select: &SqlSelect,
	param_mode: bool,
) -> SqlResult<String> {
	let mut sql = select_core(dialect, select, param_mode, None)?;
	sql.push_str(&order_by(dialect, select, param_mode)?);
	Ok(sql)
}

/// `LIMIT`/`OFFSET` suffix used by the generic, PostgreSQL and MySQL dialects.
pub fn limit_offset(mut sql: String, select: &SqlSelect) -> String {
	if let Some(limit) = select.limit() {
		sql.push_str(&format!(" LIMIT {}", limit));
	}
	if let Some(offset) = select.offset() {
		sql.push_str(&format!(" OFFSET {}", offset));
	}
	sql
}

/// `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY` suffix.
pub fn offset_fetch(mut sql: String, select: &SqlSelect) -> String {
	if select.limit().is_none() && select.offset().is_none() {
		return sql;
	}
	sql.push_str(&format!(" OFFSET {} ROWS", select.offset().unwrap_or(0)));
	if let Some(limit) = select.limit() {
		sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit));
	}
	sql
}

pub fn query<D: Dialect + ?Sized>(
	dialect: &D,
	select: &SqlSelect,
	param_mode: bool,
) -> SqlResult<String> {
	let sql = query_body(dialect, select, param_mode)?;
	Ok(dialect.sql_paging(sql, select))
}

pub fn insert<D: Dialect + ?Sized>(
	dialect: &D,
	insert: &SqlInsert,
	param_mode: bool,
) -> SqlResult<String> {
	ensure_not_empty(insert, "INSERT")?;
	trace!(engine = %dialect.engine(), kind = "INSERT", param_mode, "rendering statement");

	let mut w = SqlWriter::new();
	w.push("INSERT INTO ");
	w.push(&dialect.sql_name(insert.target()));
	w.push(" (");
	w.push_list(insert.fields(), ", ", |w, field| {
		w.push_identifier(field, |f| dialect.sql_name(f));
		Ok(())
	})?;
	w.push(") ");

	match insert.data_source() {
		Some(query) => w.push(&query.sql_string(dialect, param_mode)?),
		None => {
			w.push("VALUES (");
			w.push_list(insert.values(), ", ", |w, value| {
				w.push(&value.sql_string(dialect, param_mode)?);
				Ok(())
			})?;
			w.push(")");
		}
	}
	Ok(w.into_string())
}

/// `field=value, ..` assignments of an UPDATE.
pub fn set_list<D: Dialect + ?Sized>(
	dialect: &D,
	update: &SqlUpdate,
	param_mode: bool,
) -> SqlResult<String> {
	let mut w = SqlWriter::new();
	w.push_list(update.updates(), ", ", |w, (field, value)| {
		w.push_identifier(field, |f| dialect.sql_name(f));
		w.push("=");
		w.push(&value.sql_string(dialect, param_mode)?);
		Ok(())
	})?;
	Ok(w.into_string())
}

/// Target followed by extra sources, as in `t a, s b` or `t a INNER JOIN s ON ..`.
pub fn target_with_sources<D: Dialect + ?Sized>(
	dialect: &D,
	name: &str,
	alias: Option<&str>,
	from: &[FromClause],
	param_mode: bool,
) -> SqlResult<String> {
	let mut sql = target(dialect, name, alias);
	if let Some(first) = from.first() {
		if first.mode() == JoinMode::Plain {
			sql.push_str(", ");
		}
		sql.push_str(&from_list(dialect, from, param_mode)?);
	}
	Ok(sql)
}

pub fn update<D: Dialect + ?Sized>(
	dialect: &D,
	update: &SqlUpdate,
	param_mode: bool,
) -> SqlResult<String> {
	ensure_not_empty(update, "UPDATE")?;
	trace!(engine = %dialect.engine(), kind = "UPDATE", param_mode, "rendering statement");

	let mut w = SqlWriter::new();
	w.push("UPDATE ");
	w.push(&target(dialect, update.target(), update.alias()));
	w.push(" SET ");
	w.push(&set_list(dialect, update, param_mode)?);
	if !update.from_clauses().is_empty() {
		w.push(" FROM ");
		w.push(&from_list(dialect, update.from_clauses(), param_mode)?);
	}
	if let Some(condition) = update.where_clause() {
		w.push_clause("WHERE", &condition.sql_string(dialect, param_mode)?);
	}
	Ok(w.into_string())
}

/// DELETE whose extra sources follow `sources_keyword`.
pub fn delete_with<D: Dialect + ?Sized>(
	dialect: &D,
	delete: &SqlDelete,
	param_mode: bool,
	sources_keyword: &str,
) -> SqlResult<String> {
	ensure_not_empty(delete, "DELETE")?;
	trace!(engine = %dialect.engine(), kind = "DELETE", param_mode, "rendering statement");

	let mut w = SqlWriter::new();
	w.push("DELETE FROM ");
	w.push(&target(dialect, delete.target(), delete.alias()));
	if !delete.from_clauses().is_empty() {
		w.push_keyword(sources_keyword);
		w.push(" ");
		w.push(&from_list(dialect, delete.from_clauses(), param_mode)?);
	}
	if let Some(condition) = delete.where_clause() {
		w.push_clause("WHERE", &condition.sql_string(dialect, param_mode)?);
	}
	Ok(w.into_string())
}

pub fn delete<D: Dialect + ?Sized>(
	dialect: &D,
	delete: &SqlDelete,
	param_mode: bool,
) -> SqlResult<String> {
	delete_with(dialect, delete, param_mode, "USING")
}

pub fn create<D: Dialect + ?Sized>(
	dialect: &D,
	create: &SqlCreate,
	param_mode: bool,
) -> SqlResult<String> {
	ensure_not_empty(create, "CREATE")?;
	trace!(engine = %dialect.engine(), kind = "CREATE", param_mode, "rendering statement");

	let mut w = SqlWriter::new();
	w.push("CREATE ");
	if create.is_temporary() {
		let temporary = dialect.sql_keyword(Keyword::Temporary, &KeywordParams::new())?;
		if !temporary.is_empty() {
			w.push(&temporary);
			w.push(" ");
		}
	}
	w.push("TABLE ");
	w.push(&dialect.sql_name(create.target()));

	match create.data_source() {
		Some(query) => {
			w.push(" AS ");
			w.push(&query.sql_string(dialect, param_mode)?);
		}
		None => {
			let not_null = dialect.sql_keyword(Keyword::NotNull, &KeywordParams::new())?;
			w.push(" (");
			w.push_list(create.fields(), ", ", |w, column| {
				w.push_identifier(&column.name, |n| dialect.sql_quote(n));
				w.push(" ");
				w.push(&dialect.sql_type(column.data_type, column.precision, column.scale)?);
				if column.not_null {
					w.push(" ");
					w.push(&not_null);
				}
				Ok(())
			})?;
			w.push(")");
		}
	}
	Ok(w.into_string())
}

/// Render SQL node parameters inline, then hand the map to the dialect.
pub fn command<D: Dialect + ?Sized>(
	dialect: &D,
	command: &SqlCommand,
	_param_mode: bool,
) -> SqlResult<String> {
	trace!(engine = %dialect.engine(), keyword = %command.keyword(), "rendering command");

	let mut params = KeywordParams::new();
	for (key, param) in command.params().iter() {
		let resolved = match param {
			KeywordParam::Expression(expr) => KeywordParam::Sql(expr.sql_string(dialect, false)?),
			KeywordParam::Condition(condition) => {
				KeywordParam::Sql(condition.sql_string(dialect, false)?)
			}
			other => other.clone(),
		};
		params.insert(*key, resolved);
	}
	dialect.sql_keyword(command.keyword(), &params)
}
