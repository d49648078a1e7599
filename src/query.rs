//! Statement trees and dialect renderers.
//!
//! This module provides access to the statement builders, the dialect
//! implementations and the shorthand constructors in `sql_utils`.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "query")]
//! # {
//! use sqlforge::query::prelude::*;
//!
//! let mut select = Query::select();
//! select.add_fields("Users", ["Id"]).add_from("Users");
//! assert_eq!(
//!     select.sql_string(&MySqlDialect, false).unwrap(),
//!     "SELECT `Users`.`Id` FROM `Users`"
//! );
//! # }
//! ```

#[cfg(feature = "query")]
pub use sqlforge_query::*;
