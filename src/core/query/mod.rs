//! Typed query model. Predicates are built as trees and lowered to SQL
//! text with named placeholders; values never appear in the text.

pub mod expr;
pub mod select;
pub mod table;
pub mod value;

pub use expr::{Expr, Operand, Subquery};
pub use select::{QueryParam, SelectQuery};
pub use table::{ColumnRef, Table};
pub use value::{Row, SqlValue};
