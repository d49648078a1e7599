//! Expression, condition and FROM-clause nodes.
//!
//! These are the leaves and inner nodes of every statement tree:
//!
//! - [`Expression`]: value producing nodes (fields, constants, functions,
//!   scalar subqueries)
//! - [`Condition`]: boolean nodes (comparisons, LIKE, IN, NULL checks and
//!   AND/OR/NOT combinators)
//! - [`FromClause`]: a table or subquery source, optionally joined
//!
//! All of them implement [`IsSql`](crate::query::IsSql).

mod condition;
mod expression;
mod from;

pub use condition::Condition;
pub use expression::Expression;
pub use from::{FromClause, FromSource};

#[cfg(test)]
mod tests;
