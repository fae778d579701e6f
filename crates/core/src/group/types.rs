//! Group domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::{ExpenseId, GroupId, UserId};

/// An expense-sharing group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// The group ID.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// The user who created the group (always its first member).
    pub created_by: UserId,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a group.
#[derive(Debug, Clone)]
pub struct CreateGroupInput {
    /// Validated, trimmed group name.
    pub name: String,
    /// The creator, who becomes the first member.
    pub created_by: UserId,
}

/// A registered user as shown in member lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// The user ID.
    pub user_id: UserId,
    /// Email address.
    pub email: String,
    /// Display username.
    pub username: String,
}

/// An expense as shown in group details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupExpense {
    /// The expense ID.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// Total amount paid.
    pub total_amount: Decimal,
    /// The member who paid.
    pub paid_by: UserId,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

/// A group with its members and expenses, newest expense first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDetails {
    /// The group.
    #[serde(flatten)]
    pub group: Group,
    /// Current members.
    pub members: Vec<UserSummary>,
    /// Expenses, ordered by `created_at` descending.
    pub expenses: Vec<GroupExpense>,
}

impl GroupDetails {
    /// Returns true if the user is one of the listed members.
    #[must_use]
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}
