//! Ledger records and balance results.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{ExpenseId, GroupId, UserId};

/// An expense as seen by the aggregator: who paid and how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    /// The expense ID.
    pub id: ExpenseId,
    /// The member who paid.
    pub paid_by: UserId,
    /// Total amount paid (positive).
    pub total_amount: Decimal,
}

/// A member's share of one expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord {
    /// The parent expense.
    pub expense_id: ExpenseId,
    /// The member who owes this share.
    pub user_id: UserId,
    /// The share amount.
    pub amount: Decimal,
}

/// A recorded transfer from one member to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRecord {
    /// The member who paid.
    pub from_user: UserId,
    /// The member who received.
    pub to_user: UserId,
    /// Amount transferred (positive).
    pub amount: Decimal,
}

/// Everything the aggregator needs for one group, read from a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// The group these records belong to.
    pub group_id: GroupId,
    /// Current members.
    pub members: Vec<UserId>,
    /// Expenses recorded for the group.
    pub expenses: Vec<ExpenseRecord>,
    /// Splits of the group's expenses.
    pub splits: Vec<SplitRecord>,
    /// Settlements recorded for the group.
    pub settlements: Vec<SettlementRecord>,
}

/// An expense whose splits do not add up to its total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMismatch {
    /// The expense ID.
    pub expense_id: ExpenseId,
    /// The expense total.
    pub total_amount: Decimal,
    /// Sum of the expense's split amounts.
    pub split_total: Decimal,
}

impl LedgerSnapshot {
    /// Creates an empty snapshot for a group with the given members.
    #[must_use]
    pub fn new(group_id: GroupId, members: Vec<UserId>) -> Self {
        Self {
            group_id,
            members,
            expenses: Vec::new(),
            splits: Vec::new(),
            settlements: Vec::new(),
        }
    }

    /// Returns the expenses whose splits do not sum to the expense total.
    ///
    /// Balances stay zero-sum only when this is empty. Split rows of
    /// expenses outside the snapshot are ignored.
    #[must_use]
    pub fn split_mismatches(&self) -> Vec<SplitMismatch> {
        let mut split_totals: HashMap<ExpenseId, Decimal> = HashMap::new();
        for split in &self.splits {
            *split_totals.entry(split.expense_id).or_default() += split.amount;
        }

        self.expenses
            .iter()
            .filter_map(|expense| {
                let split_total = split_totals
                    .get(&expense.id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                (split_total != expense.total_amount).then_some(SplitMismatch {
                    expense_id: expense.id,
                    total_amount: expense.total_amount,
                    split_total,
                })
            })
            .collect()
    }
}

/// A single member's net balance.
///
/// Positive means the member is owed money, negative means they owe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// The member.
    pub user_id: UserId,
    /// Signed net amount.
    pub amount: Decimal,
}

/// Net balances of every current member of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBalances {
    group_id: GroupId,
    balances: BTreeMap<UserId, Decimal>,
}

impl GroupBalances {
    pub(crate) fn new(group_id: GroupId, balances: BTreeMap<UserId, Decimal>) -> Self {
        Self { group_id, balances }
    }

    /// The group these balances belong to.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns a member's balance, or `None` if they are not a member.
    #[must_use]
    pub fn get(&self, user_id: UserId) -> Option<Decimal> {
        self.balances.get(&user_id).copied()
    }

    /// Sum of all balances. Zero whenever every expense is fully split.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Returns true if every member's balance is zero.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.balances.values().all(Decimal::is_zero)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterates over balances in user ID order.
    pub fn iter(&self) -> impl Iterator<Item = MemberBalance> + '_ {
        self.balances
            .iter()
            .map(|(&user_id, &amount)| MemberBalance { user_id, amount })
    }

    /// Converts into a list of `{user_id, amount}` pairs.
    #[must_use]
    pub fn into_member_balances(self) -> Vec<MemberBalance> {
        self.balances
            .into_iter()
            .map(|(user_id, amount)| MemberBalance { user_id, amount })
            .collect()
    }
}
