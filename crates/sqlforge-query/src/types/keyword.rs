//! Dialect keywords and their typed parameter map.

use std::{collections::BTreeMap, fmt};

use crate::{
	error::{SqlError, SqlResult},
	expr::{Condition, Expression},
	value::Value,
};

/// A dialect fragment rendered by
/// [`Dialect::sql_keyword`](crate::backend::Dialect::sql_keyword).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
	NotNull,
	CreateSchema,
	CreateIndex,
	AddConstraint,
	PrimaryKey,
	Unique,
	ForeignKey,
	/// `ON DELETE CASCADE` action
	Cascade,
	/// `ON DELETE SET NULL` action
	SetNull,
	DropTable,
	DropForeignKey,
	RenameTable,
	Temporary,
	TemporaryName,
	BitAnd,
	If,
	Like,
	DbName,
	DbSchema,
	DbSchemas,
	DbTables,
	DbFields,
	DbKeys,
	DbForeignKeys,
	DbIndexes,
	DbTriggers,
}

impl Keyword {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::NotNull => "NOT_NULL",
			Self::CreateSchema => "CREATE_SCHEMA",
			Self::CreateIndex => "CREATE_INDEX",
			Self::AddConstraint => "ADD_CONSTRAINT",
			Self::PrimaryKey => "PRIMARY_KEY",
			Self::Unique => "UNIQUE",
			Self::ForeignKey => "FOREIGN_KEY",
			Self::Cascade => "CASCADE",
			Self::SetNull => "SET_NULL",
			Self::DropTable => "DROP_TABLE",
			Self::DropForeignKey => "DROP_FOREIGNKEY",
			Self::RenameTable => "RENAME_TABLE",
			Self::Temporary => "TEMPORARY",
			Self::TemporaryName => "TEMPORARY_NAME",
			Self::BitAnd => "BITAND",
			Self::If => "IF",
			Self::Like => "LIKE",
			Self::DbName => "DB_NAME",
			Self::DbSchema => "DB_SCHEMA",
			Self::DbSchemas => "DB_SCHEMAS",
			Self::DbTables => "DB_TABLES",
			Self::DbFields => "DB_FIELDS",
			Self::DbKeys => "DB_KEYS",
			Self::DbForeignKeys => "DB_FOREIGNKEYS",
			Self::DbIndexes => "DB_INDEXES",
			Self::DbTriggers => "DB_TRIGGERS",
		}
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Name of a keyword parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
	Table,
	Name,
	Fields,
	Unique,
	Type,
	RefTable,
	RefFields,
	Cascade,
	DbName,
	DbSchema,
	Schema,
	KeyTypes,
	NameFrom,
	NameTo,
	Expression,
	Value,
	Condition,
	IfTrue,
	IfFalse,
}

impl ParamKey {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Table => "table",
			Self::Name => "name",
			Self::Fields => "fields",
			Self::Unique => "isUnique",
			Self::Type => "type",
			Self::RefTable => "refTable",
			Self::RefFields => "refFields",
			Self::Cascade => "cascade",
			Self::DbName => "dbName",
			Self::DbSchema => "dbSchema",
			Self::Schema => "schema",
			Self::KeyTypes => "keyTypes",
			Self::NameFrom => "nameFrom",
			Self::NameTo => "nameTo",
			Self::Expression => "expression",
			Self::Value => "value",
			Self::Condition => "condition",
			Self::IfTrue => "ifTrue",
			Self::IfFalse => "ifFalse",
		}
	}
}

impl fmt::Display for ParamKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One keyword parameter.
///
/// `Ident`/`Idents` are quoted by the dialect, `Sql` is inserted verbatim,
/// `Value` is inlined through
/// [`Dialect::sql_transform`](crate::backend::Dialect::sql_transform).
/// `Expression` and `Condition` are rendered into `Sql` by the command
/// renderer before the keyword sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordParam {
	Ident(String),
	Idents(Vec<String>),
	Sql(String),
	Flag(bool),
	Keyword(Keyword),
	Keywords(Vec<Keyword>),
	Value(Value),
	Expression(Expression),
	Condition(Condition),
}

/// Typed parameter map handed to
/// [`Dialect::sql_keyword`](crate::backend::Dialect::sql_keyword).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordParams {
	entries: BTreeMap<ParamKey, KeywordParam>,
}

impl KeywordParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a parameter, replacing any previous value under `key`.
	#[must_use]
	pub fn with(mut self, key: ParamKey, param: KeywordParam) -> Self {
		self.entries.insert(key, param);
		self
	}

	/// Add `param` only when it is `Some`.
	#[must_use]
	pub fn with_option(self, key: ParamKey, param: Option<KeywordParam>) -> Self {
		match param {
			Some(param) => self.with(key, param),
			None => self,
		}
	}

	pub fn insert(&mut self, key: ParamKey, param: KeywordParam) {
		self.entries.insert(key, param);
	}

	pub fn get(&self, key: ParamKey) -> Option<&KeywordParam> {
		self.entries.get(&key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &KeywordParam)> {
		self.entries.iter()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Mandatory identifier.
	pub fn ident(&self, keyword: Keyword, key: ParamKey) -> SqlResult<&str> {
		match self.get(key) {
			Some(KeywordParam::Ident(name)) if !name.is_empty() => Ok(name),
			_ => Err(SqlError::MissingParameter {
				keyword,
				param: key,
			}),
		}
	}

	/// Identifier list; an `Ident` counts as a one element list.
	pub fn idents(&self, key: ParamKey) -> Vec<&str> {
		match self.get(key) {
			Some(KeywordParam::Idents(names)) => names.iter().map(String::as_str).collect(),
			Some(KeywordParam::Ident(name)) => vec![name.as_str()],
			_ => Vec::new(),
		}
	}

	/// Mandatory pre-rendered SQL.
	pub fn sql(&self, keyword: Keyword, key: ParamKey) -> SqlResult<&str> {
		match self.get(key) {
			Some(KeywordParam::Sql(sql)) => Ok(sql),
			_ => Err(SqlError::MissingParameter {
				keyword,
				param: key,
			}),
		}
	}

	pub fn flag(&self, key: ParamKey) -> bool {
		matches!(self.get(key), Some(KeywordParam::Flag(true)))
	}

	pub fn keyword(&self, key: ParamKey) -> Option<Keyword> {
		match self.get(key) {
			Some(KeywordParam::Keyword(keyword)) => Some(*keyword),
			_ => None,
		}
	}

	pub fn keywords(&self, key: ParamKey) -> &[Keyword] {
		match self.get(key) {
			Some(KeywordParam::Keywords(keywords)) => keywords,
			_ => &[],
		}
	}

	/// Introspection filter; NULL and blank values count as absent.
	pub fn filter(&self, key: ParamKey) -> Option<&Value> {
		match self.get(key) {
			Some(KeywordParam::Value(value)) if !value.is_blank() => Some(value),
			_ => None,
		}
	}
}
