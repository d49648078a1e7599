//! Literal values and the ordered bind-parameter list.
//!
//! [`Value`] is what constant expressions carry and what
//! [`IsSql::sql_params`](crate::IsSql::sql_params) returns, wrapped in
//! [`Values`]. [`ValueType`] is the coarse logical type the execution layer
//! uses to interpret result columns (see [`crate::jdbc`]).

mod core;

pub use self::core::Value;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Logical type of a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
	Boolean,
	Text,
	Integer,
	Long,
	Decimal,
	Number,
	Date,
	TimeOfDay,
	DateTime,
}

/// Ordered bind parameters produced alongside parameterized SQL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values(pub Vec<Value>);

impl Values {
	/// Create an empty parameter list.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Append one value.
	pub fn push(&mut self, value: Value) {
		self.0.push(value);
	}

	/// Append every value of `other`, preserving order.
	pub fn extend(&mut self, other: Values) {
		self.0.extend(other.0);
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the list holds no parameters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the parameters in placeholder order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.0.iter()
	}
}

impl IntoIterator for Values {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Values {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl FromIterator<Value> for Values {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Conversion into a [`Value`].
pub trait IntoValue {
	fn into_value(self) -> Value;
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

macro_rules! impl_value_from {
	($ty:ty, $variant:ident) => {
		impl From<$ty> for Value {
			fn from(v: $ty) -> Self {
				Value::$variant(Some(v))
			}
		}

		impl From<Option<$ty>> for Value {
			fn from(v: Option<$ty>) -> Self {
				Value::$variant(v)
			}
		}

		impl IntoValue for $ty {
			fn into_value(self) -> Value {
				Value::from(self)
			}
		}

		impl IntoValue for Option<$ty> {
			fn into_value(self) -> Value {
				Value::from(self)
			}
		}
	};
}

macro_rules! impl_boxed_value_from {
	($ty:ty, $variant:ident) => {
		impl From<$ty> for Value {
			fn from(v: $ty) -> Self {
				Value::$variant(Some(Box::new(v)))
			}
		}

		impl From<Option<$ty>> for Value {
			fn from(v: Option<$ty>) -> Self {
				Value::$variant(v.map(Box::new))
			}
		}

		impl IntoValue for $ty {
			fn into_value(self) -> Value {
				Value::from(self)
			}
		}

		impl IntoValue for Option<$ty> {
			fn into_value(self) -> Value {
				Value::from(self)
			}
		}
	};
}

impl_value_from!(bool, Bool);
impl_value_from!(i32, Int);
impl_value_from!(i64, BigInt);
impl_value_from!(f64, Double);
impl_boxed_value_from!(Decimal, Decimal);
impl_boxed_value_from!(String, String);
impl_boxed_value_from!(NaiveDate, Date);
impl_boxed_value_from!(NaiveTime, Time);
impl_boxed_value_from!(NaiveDateTime, DateTime);

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(Some(Box::new(v.to_string())))
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::from(self)
	}
}
