//! Statement nodes.
//!
//! Each statement is assembled through `&mut self` methods that only append
//! (or set) clauses and is rendered through a [`Dialect`](crate::backend::Dialect).
//!
//! | Statement | Empty when |
//! |-----------|------------|
//! | [`SqlSelect`] | no fields or no sources |
//! | [`SqlInsert`] | no target, no fields, or neither values nor a data source |
//! | [`SqlUpdate`] | no target or no SET entries |
//! | [`SqlDelete`] | no target or no (non-empty) WHERE condition |
//! | [`SqlCreate`] | no target, or neither fields nor a data source |
//! | [`SqlCommand`] | never |

mod command;
mod create;
mod delete;
mod insert;
mod select;
mod traits;
mod update;

pub use command::SqlCommand;
pub use create::{ColumnDef, SqlCreate};
pub use delete::SqlDelete;
pub use insert::SqlInsert;
pub use select::{OrderEntry, SelectField, SqlSelect};
pub use traits::IsSql;
pub use update::SqlUpdate;

use crate::types::{Keyword, KeywordParams};

/// Entry point for creating statements.
///
/// ```rust
/// use sqlforge_query::prelude::*;
///
/// let mut select = Query::select();
/// select.add_fields("Users", ["Id", "Name"]).add_from("Users");
/// assert!(!select.is_empty());
/// ```
pub struct Query;

impl Query {
	pub fn select() -> SqlSelect {
		SqlSelect::new()
	}

	pub fn insert(target: impl Into<String>) -> SqlInsert {
		SqlInsert::new(target)
	}

	pub fn update(target: impl Into<String>) -> SqlUpdate {
		SqlUpdate::new(target)
	}

	pub fn delete(target: impl Into<String>) -> SqlDelete {
		SqlDelete::new(target)
	}

	pub fn create(target: impl Into<String>) -> SqlCreate {
		SqlCreate::new(target)
	}

	pub fn command(keyword: Keyword, params: KeywordParams) -> SqlCommand {
		SqlCommand::new(keyword, params)
	}
}
