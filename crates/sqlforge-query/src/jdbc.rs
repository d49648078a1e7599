//! JDBC type codes and their correspondence with [`ValueType`].
//!
//! Result-set metadata reports column types as the integer codes of
//! `java.sql.Types`. The mapping to [`ValueType`] is total: codes without a
//! dedicated value type read as text.

use crate::{types::DataType, value::ValueType};

pub const BIT: i32 = -7;
pub const TINYINT: i32 = -6;
pub const SMALLINT: i32 = 5;
pub const INTEGER: i32 = 4;
pub const BIGINT: i32 = -5;
pub const FLOAT: i32 = 6;
pub const REAL: i32 = 7;
pub const DOUBLE: i32 = 8;
pub const NUMERIC: i32 = 2;
pub const DECIMAL: i32 = 3;
pub const CHAR: i32 = 1;
pub const VARCHAR: i32 = 12;
pub const LONGVARCHAR: i32 = -1;
pub const DATE: i32 = 91;
pub const TIME: i32 = 92;
pub const TIMESTAMP: i32 = 93;
pub const BINARY: i32 = -2;
pub const VARBINARY: i32 = -3;
pub const LONGVARBINARY: i32 = -4;
pub const NULL: i32 = 0;
pub const OTHER: i32 = 1111;
pub const BLOB: i32 = 2004;
pub const CLOB: i32 = 2005;
pub const BOOLEAN: i32 = 16;
pub const NCHAR: i32 = -15;
pub const NVARCHAR: i32 = -9;
pub const NCLOB: i32 = 2011;

const TYPE_NAMES: &[(i32, &str)] = &[
	(BIT, "BIT"),
	(TINYINT, "TINYINT"),
	(SMALLINT, "SMALLINT"),
	(INTEGER, "INTEGER"),
	(BIGINT, "BIGINT"),
	(FLOAT, "FLOAT"),
	(REAL, "REAL"),
	(DOUBLE, "DOUBLE"),
	(NUMERIC, "NUMERIC"),
	(DECIMAL, "DECIMAL"),
	(CHAR, "CHAR"),
	(VARCHAR, "VARCHAR"),
	(LONGVARCHAR, "LONGVARCHAR"),
	(DATE, "DATE"),
	(TIME, "TIME"),
	(TIMESTAMP, "TIMESTAMP"),
	(BINARY, "BINARY"),
	(VARBINARY, "VARBINARY"),
	(LONGVARBINARY, "LONGVARBINARY"),
	(NULL, "NULL"),
	(OTHER, "OTHER"),
	(BLOB, "BLOB"),
	(CLOB, "CLOB"),
	(BOOLEAN, "BOOLEAN"),
	(NCHAR, "NCHAR"),
	(NVARCHAR, "NVARCHAR"),
	(NCLOB, "NCLOB"),
];

/// Name of a JDBC type code, for diagnostics.
pub fn type_name(code: i32) -> Option<&'static str> {
	TYPE_NAMES
		.iter()
		.find(|(c, _)| *c == code)
		.map(|(_, name)| *name)
}

/// Value type of a result column reported with JDBC type `code`.
pub fn sql_type_to_value_type(code: i32) -> ValueType {
	match code {
		BOOLEAN | BIT => ValueType::Boolean,
		CHAR | VARCHAR => ValueType::Text,
		INTEGER | SMALLINT | TINYINT => ValueType::Integer,
		BIGINT => ValueType::Long,
		DECIMAL | NUMERIC => ValueType::Decimal,
		REAL | DOUBLE | FLOAT => ValueType::Number,
		DATE => ValueType::Date,
		TIME => ValueType::TimeOfDay,
		TIMESTAMP => ValueType::DateTime,
		_ => ValueType::Text,
	}
}

/// JDBC type code used to bind a value of `value_type`.
pub fn value_type_to_sql_type(value_type: ValueType) -> i32 {
	match value_type {
		ValueType::Boolean => BOOLEAN,
		ValueType::Text => VARCHAR,
		ValueType::Integer => INTEGER,
		ValueType::Long => BIGINT,
		ValueType::Decimal => DECIMAL,
		ValueType::Number => DOUBLE,
		ValueType::Date => DATE,
		ValueType::TimeOfDay => TIME,
		ValueType::DateTime => TIMESTAMP,
	}
}

/// JDBC type code of a DDL column type.
pub fn data_type_to_sql_type(data_type: DataType) -> i32 {
	match data_type {
		DataType::Boolean => BOOLEAN,
		DataType::Integer => INTEGER,
		DataType::Long => BIGINT,
		DataType::Float => FLOAT,
		DataType::Double => DOUBLE,
		DataType::Numeric => NUMERIC,
		DataType::Char => CHAR,
		DataType::String => VARCHAR,
		DataType::Text => LONGVARCHAR,
		DataType::Date => DATE,
		DataType::DateTime => TIMESTAMP,
	}
}
