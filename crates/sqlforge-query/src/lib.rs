//! # sqlforge-query
//!
//! Dialect-independent SQL statement trees rendered to SQL text and bind
//! parameters.
//!
//! Statements are assembled as in-memory trees of expressions, conditions
//! and FROM entries, then rendered on demand for one of several database
//! dialects. Rendering is pure: it never touches a connection and never
//! mutates the tree, so a finished statement can be rendered repeatedly,
//! from several threads, against several dialects.
//!
//! ## Features
//!
//! - **Statement builders** - SELECT, INSERT, UPDATE, DELETE, CREATE TABLE
//!   and keyword driven DDL/introspection commands
//! - **Composable conditions** - empty AND/OR/NOT nodes collapse instead of
//!   producing broken SQL, so optional filters need no null checks
//! - **Two rendering modes** - `?` placeholders with an ordered parameter
//!   list, or every literal inlined and escaped
//! - **Safe deletes** - a DELETE without a WHERE condition cannot be rendered
//! - **Catalog queries** - list tables, columns, keys and foreign keys with
//!   optional database/schema/table filters
//!
//! ## Architecture
//!
//! - [`value`]: literals ([`Value`]) and the ordered parameter list ([`Values`])
//! - [`types`]: closed enums for data types, operators, functions and keywords
//! - [`expr`]: [`Expression`], [`Condition`] and [`FromClause`] nodes
//! - [`query`]: statement nodes ([`SqlSelect`], [`SqlInsert`], [`SqlUpdate`],
//!   [`SqlDelete`], [`SqlCreate`], [`SqlCommand`]) and the [`IsSql`] contract
//! - [`backend`]: the [`Dialect`] trait and its implementations
//! - [`sql_utils`]: shorthand constructors for nodes and commands
//! - [`jdbc`]: JDBC type code mapping for result columns
//! - [`settings`]: engine selection from TOML and the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlforge_query::prelude::*;
//!
//! let mut select = Query::select();
//! select
//!     .add_fields("Users", ["Id", "Name"])
//!     .add_from("Users")
//!     .set_where(sql_utils::and([
//!         sql_utils::equal("Users", "Active", true),
//!         sql_utils::more("Users", "Age", 18),
//!     ]))
//!     .add_order("Users", "Name");
//!
//! let (sql, values) = render(&select, &PostgresDialect, true).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "Users"."Id", "Users"."Name" FROM "Users" WHERE "Users"."Active" = ? AND "Users"."Age" > ? ORDER BY "Users"."Name""#
//! );
//! assert_eq!(values, Values(vec![Value::from(true), Value::from(18)]));
//! ```
//!
//! ## Backend Differences
//!
//! | Feature | Generic | PostgreSQL | MySQL | MS SQL Server | Oracle |
//! |---------|---------|------------|-------|---------------|--------|
//! | Identifier quoting | `name` | `"name"` | `` `name` `` | `[name]` | `"name"` |
//! | Paging | `LIMIT`/`OFFSET` | `LIMIT`/`OFFSET` | `LIMIT`/`OFFSET` | `TOP` or `OFFSET`/`FETCH` | `OFFSET`/`FETCH` |
//! | String concatenation | `\|\|` | `\|\|` | `CONCAT()` | `+` | `\|\|` |
//! | Temporary tables | `TEMPORARY` | `TEMPORARY` | `TEMPORARY` | `#name` | `GLOBAL TEMPORARY` |
//! | Bitwise and | `&` | `&` | `&` | `&` | `BITAND()` |
//! | Multi-table DELETE | `USING` | `USING` | `DELETE t FROM t, s` | `FROM` | `WHERE EXISTS` |
//! | TEXT/DATE/DATETIME columns | ❌ | ✅ | ✅ | ✅ | ✅ |

pub mod backend;
pub mod error;
pub mod expr;
pub mod jdbc;
pub mod query;
pub mod settings;
pub mod sql_utils;
pub mod types;
pub mod value;

/// Prelude module for convenient imports.
///
/// ```rust
/// use sqlforge_query::prelude::*;
/// ```
pub mod prelude {
	// Dialects
	pub use crate::backend::{
		Dialect, GenericDialect, MsSqlDialect, MySqlDialect, OracleDialect, PostgresDialect,
		SqlEngine, render,
	};
	pub use crate::settings::BuilderSettings;
	// Errors
	pub use crate::error::{SqlError, SqlResult};
	// Expression nodes
	pub use crate::expr::{Condition, Expression, FromClause, FromSource};
	// Statements
	pub use crate::query::{
		ColumnDef, IsSql, Query, SqlCommand, SqlCreate, SqlDelete, SqlInsert, SqlSelect,
		SqlUpdate,
	};
	pub use crate::sql_utils;
	// Type system
	pub use crate::types::{
		DataType, JoinMode, Keyword, KeywordParam, KeywordParams, Operator, ParamKey, SqlFunction,
	};
	// Value system
	pub use crate::value::{IntoValue, Value, ValueType, Values};
}

// Re-export commonly used types at crate root
pub use prelude::*;
