//! CREATE TABLE statement builder

use std::collections::BTreeSet;

use crate::{backend::Dialect, error::SqlResult, types::DataType, value::Values};

use super::{select::SqlSelect, traits::IsSql};

/// Column definition of a CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
	pub name: String,
	pub data_type: DataType,
	pub precision: u32,
	pub scale: u32,
	pub not_null: bool,
}

/// CREATE TABLE statement builder
///
/// The table is described either by column definitions or by a SELECT data
/// source ("create as select"). The temporary flag only changes the DDL
/// prefix; use [`sql_utils::temporary_name`](crate::sql_utils::temporary_name)
/// for dialects that also mangle the table name.
///
/// # Examples
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut create = SqlCreate::new("Users");
/// create
///     .add_integer("Id", true)
///     .add_string("Name", 50, false);
///
/// assert_eq!(
///     create.sql_string(&GenericDialect, false).unwrap(),
///     "CREATE TABLE Users (Id INTEGER NOT NULL, Name VARCHAR(50))"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCreate {
	pub(crate) target: String,
	pub(crate) temporary: bool,
	pub(crate) fields: Vec<ColumnDef>,
	pub(crate) data_source: Option<Box<SqlSelect>>,
}

impl SqlCreate {
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			temporary: false,
			fields: Vec::new(),
			data_source: None,
		}
	}

	pub fn set_temporary(&mut self, temporary: bool) -> &mut Self {
		self.temporary = temporary;
		self
	}

	pub fn add_field(
		&mut self,
		name: &str,
		data_type: DataType,
		precision: u32,
		scale: u32,
		not_null: bool,
	) -> &mut Self {
		self.fields.push(ColumnDef {
			name: name.to_string(),
			data_type,
			precision,
			scale,
			not_null,
		});
		self
	}

	pub fn add_boolean(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Boolean, 0, 0, not_null)
	}

	pub fn add_integer(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Integer, 0, 0, not_null)
	}

	pub fn add_long(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Long, 0, 0, not_null)
	}

	pub fn add_double(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Double, 0, 0, not_null)
	}

	pub fn add_numeric(&mut self, name: &str, precision: u32, scale: u32, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Numeric, precision, scale, not_null)
	}

	pub fn add_char(&mut self, name: &str, length: u32, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Char, length, 0, not_null)
	}

	pub fn add_string(&mut self, name: &str, length: u32, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::String, length, 0, not_null)
	}

	pub fn add_text(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Text, 0, 0, not_null)
	}

	pub fn add_date(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::Date, 0, 0, not_null)
	}

	pub fn add_date_time(&mut self, name: &str, not_null: bool) -> &mut Self {
		self.add_field(name, DataType::DateTime, 0, 0, not_null)
	}

	/// Create the table from the rows of `query`.
	pub fn set_data_source(&mut self, query: SqlSelect) -> &mut Self {
		self.data_source = Some(Box::new(query));
		self
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn is_temporary(&self) -> bool {
		self.temporary
	}

	pub fn fields(&self) -> &[ColumnDef] {
		&self.fields
	}

	pub fn data_source(&self) -> Option<&SqlSelect> {
		self.data_source.as_deref()
	}
}

impl IsSql for SqlCreate {
	fn sql_string<D: Dialect + ?Sized>(&self, dialect: &D, param_mode: bool) -> SqlResult<String> {
		dialect.get_create(self, param_mode)
	}

	fn sql_params(&self) -> Values {
		self.data_source
			.as_ref()
			.map(|query| query.sql_params())
			.unwrap_or_default()
	}

	fn is_empty(&self) -> bool {
		if self.target.is_empty() {
			return true;
		}
		match &self.data_source {
			Some(query) => query.is_empty(),
			None => self.fields.is_empty(),
		}
	}

	fn sources(&self) -> BTreeSet<String> {
		let mut sources = BTreeSet::from([self.target.clone()]);
		if let Some(query) = &self.data_source {
			sources.extend(query.sources());
		}
		sources
	}
}
