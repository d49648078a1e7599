//! SQL Writer helper for constructing SQL strings
//!
//! `SqlWriter` assembles statement text clause by clause. Bind parameters
//! are not collected here; they come from the independent
//! [`IsSql::sql_params`](crate::IsSql::sql_params) walk.

use crate::error::SqlResult;

/// SQL Writer for constructing SQL strings
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::backend::SqlWriter;
///
/// let mut writer = SqlWriter::new();
/// writer.push("SELECT");
/// writer.push_space();
/// writer.push_identifier("id", |s| format!("\"{}\"", s));
/// writer.push_comma();
/// writer.push_identifier("name", |s| format!("\"{}\"", s));
///
/// assert_eq!(writer.into_string(), "SELECT \"id\", \"name\"");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlWriter {
	sql: String,
}

impl SqlWriter {
	/// Create a new SQL writer
	pub fn new() -> Self {
		Self { sql: String::new() }
	}

	/// Push a string to SQL
	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Push a space unless the text already ends with one
	pub fn push_space(&mut self) {
		if !self.sql.is_empty() && !self.sql.ends_with(' ') {
			self.sql.push(' ');
		}
	}

	/// Push an identifier through the dialect's escape function
	pub fn push_identifier<F>(&mut self, ident: &str, escape_fn: F)
	where
		F: FnOnce(&str) -> String,
	{
		self.sql.push_str(&escape_fn(ident));
	}

	/// Push a comma separator
	pub fn push_comma(&mut self) {
		self.sql.push_str(", ");
	}

	/// Push a keyword (with automatic spacing)
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.sql.push_str(keyword);
	}

	/// Push ` KEYWORD body` when `body` is not blank.
	///
	/// Used for optional clauses whose condition may render empty.
	pub fn push_clause(&mut self, keyword: &str, body: &str) {
		if !body.trim().is_empty() {
			self.push_keyword(keyword);
			self.sql.push(' ');
			self.sql.push_str(body);
		}
	}

	/// Push a list of items with a separator; the first error aborts.
	pub fn push_list<I, T, F>(&mut self, items: I, separator: &str, mut f: F) -> SqlResult<()>
	where
		I: IntoIterator<Item = T>,
		F: FnMut(&mut Self, T) -> SqlResult<()>,
	{
		let mut first = true;
		for item in items {
			if !first {
				self.sql.push_str(separator);
			}
			f(self, item)?;
			first = false;
		}
		Ok(())
	}

	/// Get current SQL string
	pub fn sql(&self) -> &str {
		&self.sql
	}

	/// Check if SQL is empty
	pub fn is_empty(&self) -> bool {
		self.sql.is_empty()
	}

	/// Convert to string (consuming self).
	pub fn into_string(self) -> String {
		self.sql
	}
}
