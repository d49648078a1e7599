//! Function templates shared by every dialect.

use crate::{
	error::{SqlError, SqlResult},
	types::SqlFunction,
};

use super::Dialect;

fn arity(function: SqlFunction, args: &[String], ok: bool) -> SqlResult<()> {
	if ok {
		Ok(())
	} else {
		Err(SqlError::InvalidArguments {
			function,
			count: args.len(),
		})
	}
}

/// Render `function` over already rendered `args`.
///
/// Each argument appears exactly once and in order.
pub fn standard_function<D: Dialect + ?Sized>(
	dialect: &D,
	function: SqlFunction,
	args: &[String],
) -> SqlResult<String> {
	match function {
		SqlFunction::Min | SqlFunction::Max | SqlFunction::Sum | SqlFunction::Avg => {
			arity(function, args, args.len() == 1)?;
			Ok(format!("{}({})", function, args[0]))
		}
		SqlFunction::Count => {
			arity(function, args, args.len() <= 1)?;
			let expr = args.first().map(String::as_str).unwrap_or("*");
			Ok(format!("COUNT({})", expr))
		}
		SqlFunction::SumDistinct | SqlFunction::AvgDistinct | SqlFunction::CountDistinct => {
			arity(function, args, args.len() == 1)?;
			let name = match function {
				SqlFunction::SumDistinct => "SUM",
				SqlFunction::AvgDistinct => "AVG",
				_ => "COUNT",
			};
			Ok(format!("{}(DISTINCT {})", name, args[0]))
		}
		SqlFunction::Plus | SqlFunction::Minus | SqlFunction::Multiply | SqlFunction::Divide => {
			arity(function, args, args.len() >= 2)?;
			let op = match function {
				SqlFunction::Plus => " + ",
				SqlFunction::Minus => " - ",
				SqlFunction::Multiply => " * ",
				_ => " / ",
			};
			Ok(format!("({})", args.join(op)))
		}
		SqlFunction::Bulk => {
			arity(function, args, !args.is_empty())?;
			Ok(args.concat())
		}
		SqlFunction::Nvl => {
			arity(function, args, !args.is_empty())?;
			Ok(format!("COALESCE({})", args.join(", ")))
		}
		SqlFunction::Concat => {
			arity(function, args, !args.is_empty())?;
			Ok(args.join(" || "))
		}
		SqlFunction::Length => {
			arity(function, args, args.len() == 1)?;
			Ok(format!("LENGTH({})", args[0]))
		}
		SqlFunction::Substring => {
			arity(function, args, matches!(args.len(), 2 | 3))?;
			Ok(format!("SUBSTR({})", args.join(",")))
		}
		SqlFunction::Left | SqlFunction::Right => {
			arity(function, args, args.len() == 2)?;
			Ok(format!("{}({},{})", function, args[0], args[1]))
		}
		SqlFunction::Case => {
			arity(function, args, args.len() >= 3 && args.len() % 2 == 1)?;
			let mut sql = format!("CASE {}", args[0]);
			for pair in args[1..args.len() - 1].chunks(2) {
				sql.push_str(&format!(" WHEN {} THEN {}", pair[0], pair[1]));
			}
			sql.push_str(&format!(" ELSE {} END", args[args.len() - 1]));
			Ok(sql)
		}
		SqlFunction::Cast {
			data_type,
			precision,
			scale,
		} => {
			arity(function, args, args.len() == 1)?;
			Ok(format!(
				"CAST({} AS {})",
				args[0],
				dialect.sql_type(data_type, precision, scale)?
			))
		}
	}
}
