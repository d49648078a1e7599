//! # sqlforge
//!
//! Dialect-independent SQL statement trees rendered to SQL text and bind
//! parameters.
//!
//! Statements (SELECT, INSERT, UPDATE, DELETE, CREATE TABLE and keyword
//! driven DDL/introspection commands) are built as in-memory trees and
//! rendered on demand for generic SQL, PostgreSQL, MySQL, MS SQL Server or
//! Oracle. Rendering performs no I/O: executing the text and binding the
//! parameters is left to the caller's database layer.
//!
//! ## Feature Flags
//!
//! - `query` (default) - statement builders and dialect renderers
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "query")]
//! # {
//! use sqlforge::prelude::*;
//!
//! let mut insert = SqlInsert::new("Users");
//! insert.add_constant("Name", "Ann").add_constant("Age", 30);
//!
//! let settings = BuilderSettings::new(SqlEngine::PostgreSql);
//! let (sql, values) = settings.render(&insert).unwrap();
//! assert_eq!(sql, r#"INSERT INTO "Users" ("Name", "Age") VALUES (?, ?)"#);
//! assert_eq!(values.len(), 2);
//! # }
//! ```

pub mod query;

/// Convenience re-exports of the most used types.
#[cfg(feature = "query")]
pub mod prelude {
	pub use sqlforge_query::prelude::*;
}

#[cfg(feature = "query")]
pub use sqlforge_query::{
	BuilderSettings, Condition, Dialect, Expression, IsSql, Query, SqlEngine, SqlError, SqlResult,
	Value, Values, render, sql_utils,
};
