//! Core Value enum definition.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::ValueType;

/// A literal carried by a statement tree.
///
/// Every variant wraps an `Option`; `None` is SQL `NULL`. Heap types are
/// boxed to keep the enum pointer sized.
///
/// ## Null Values
///
/// NULL literals are always inlined as `null` and never become bind
/// parameters, in either rendering mode.
///
/// ## Example
///
/// ```rust
/// use sqlforge_query::Value;
///
/// let int_val = Value::Int(Some(42));
/// let null_int = Value::Int(None);
/// let string_val = Value::String(Some(Box::new("hello".to_string())));
/// assert!(null_int.is_null());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// Boolean value
	Bool(Option<bool>),
	/// 32-bit signed integer
	Int(Option<i32>),
	/// 64-bit signed integer
	BigInt(Option<i64>),
	/// 64-bit floating point
	Double(Option<f64>),
	/// Fixed-point decimal
	Decimal(Option<Box<Decimal>>),
	/// Character data
	String(Option<Box<String>>),
	/// Calendar date
	Date(Option<Box<NaiveDate>>),
	/// Time of day
	Time(Option<Box<NaiveTime>>),
	/// Date and time without zone
	DateTime(Option<Box<NaiveDateTime>>),
}

impl Value {
	/// Returns `true` if this value is null.
	///
	/// ```rust
	/// use sqlforge_query::Value;
	///
	/// assert!(Value::Int(None).is_null());
	/// assert!(!Value::Int(Some(42)).is_null());
	/// ```
	#[must_use]
	pub fn is_null(&self) -> bool {
		match self {
			Self::Bool(v) => v.is_none(),
			Self::Int(v) => v.is_none(),
			Self::BigInt(v) => v.is_none(),
			Self::Double(v) => v.is_none(),
			Self::Decimal(v) => v.is_none(),
			Self::String(v) => v.is_none(),
			Self::Date(v) => v.is_none(),
			Self::Time(v) => v.is_none(),
			Self::DateTime(v) => v.is_none(),
		}
	}

	/// Returns `true` for NULL and for blank strings.
	///
	/// Introspection filters treat both as "not given".
	#[must_use]
	pub fn is_blank(&self) -> bool {
		match self {
			Self::String(Some(s)) => s.trim().is_empty(),
			other => other.is_null(),
		}
	}

	/// Logical type of this value, used when mapping result columns.
	#[must_use]
	pub fn value_type(&self) -> ValueType {
		match self {
			Self::Bool(_) => ValueType::Boolean,
			Self::Int(_) => ValueType::Integer,
			Self::BigInt(_) => ValueType::Long,
			Self::Double(_) => ValueType::Number,
			Self::Decimal(_) => ValueType::Decimal,
			Self::String(_) => ValueType::Text,
			Self::Date(_) => ValueType::Date,
			Self::Time(_) => ValueType::TimeOfDay,
			Self::DateTime(_) => ValueType::DateTime,
		}
	}

	/// Convert this value to a SQL literal suitable for inlining.
	///
	/// Booleans become `1`/`0`, numbers lose trailing zeros, character data
	/// is single-quoted with embedded quotes doubled, and temporal values
	/// are quoted ISO text.
	///
	/// ```rust
	/// use sqlforge_query::Value;
	///
	/// assert_eq!(Value::Int(Some(42)).to_sql_literal(), "42");
	/// assert_eq!(Value::Int(None).to_sql_literal(), "null");
	/// assert_eq!(Value::Bool(Some(true)).to_sql_literal(), "1");
	/// assert_eq!(Value::Double(Some(2.50)).to_sql_literal(), "2.5");
	/// assert_eq!(
	///     Value::String(Some(Box::new("it's".to_string()))).to_sql_literal(),
	///     "'it''s'"
	/// );
	/// ```
	#[must_use]
	pub fn to_sql_literal(&self) -> String {
		if self.is_null() {
			return "null".to_string();
		}
		match self {
			Self::Bool(Some(v)) => (if *v { "1" } else { "0" }).to_string(),
			Self::Int(Some(v)) => v.to_string(),
			Self::BigInt(Some(v)) => v.to_string(),
			// `Display` for f64 already omits trailing zeros ("2.5", "3")
			Self::Double(Some(v)) => v.to_string(),
			Self::Decimal(Some(v)) => v.normalize().to_string(),
			Self::String(Some(v)) => format!("'{}'", v.replace('\'', "''")),
			Self::Date(Some(v)) => format!("'{}'", v.format("%Y-%m-%d")),
			Self::Time(Some(v)) => format!("'{}'", v.format("%H:%M:%S")),
			Self::DateTime(Some(v)) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S")),
			_ => "null".to_string(),
		}
	}
}

impl Default for Value {
	/// Returns the default value, which is a null string.
	fn default() -> Self {
		Self::String(None)
	}
}
