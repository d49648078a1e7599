//! The renderable contract shared by every node.

use std::collections::BTreeSet;

use crate::{backend::Dialect, error::SqlResult, value::Values};

/// A node that renders to SQL text and bind parameters.
///
/// The text pass and the parameter pass walk the tree independently but in
/// the same order: every `?` written by `sql_string(dialect, true)` matches,
/// in order, one entry of `sql_params()`. NULL constants are always inlined
/// and never contribute a parameter.
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut insert = SqlInsert::new("Users");
/// insert.add_constant("Name", "Ann").add_constant("Age", 30);
///
/// let sql = insert.sql_string(&GenericDialect, true).unwrap();
/// assert_eq!(sql, "INSERT INTO Users (Name, Age) VALUES (?, ?)");
/// assert_eq!(insert.sql_params().len(), 2);
/// ```
pub trait IsSql {
	/// Render this node for `dialect`.
	///
	/// With `param_mode` set, non-NULL literals become `?` placeholders;
	/// otherwise they are inlined through
	/// [`Dialect::sql_transform`](crate::backend::Dialect::sql_transform).
	/// Statements fail with [`SqlError::EmptyStatement`](crate::SqlError::EmptyStatement)
	/// when [`is_empty`](Self::is_empty) holds.
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String>;

	/// Bind values in placeholder order.
	fn sql_params(&self) -> Values;

	/// Whether this node renders nothing (or, for statements, cannot render).
	fn is_empty(&self) -> bool;

	/// Names of the tables this node reads or writes.
	fn sources(&self) -> BTreeSet<String>;
}
