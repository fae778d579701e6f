//! Entity re-exports.

pub use super::expense_splits::Entity as ExpenseSplits;
pub use super::expenses::Entity as Expenses;
pub use super::group_members::Entity as GroupMembers;
pub use super::groups::Entity as Groups;
pub use super::settlements::Entity as Settlements;
pub use super::users::Entity as Users;
