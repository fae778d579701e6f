//! `SeaORM` entity definitions.

pub mod prelude;

pub mod expense_splits;
pub mod expenses;
pub mod group_members;
pub mod groups;
pub mod settlements;
pub mod users;
