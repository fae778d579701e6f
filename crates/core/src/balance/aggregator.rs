//! Folding a ledger snapshot into per-member net balances.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use tally_shared::types::{ExpenseId, GroupId, UserId};

use super::types::{ExpenseRecord, GroupBalances, LedgerSnapshot, SettlementRecord, SplitRecord};

/// Running totals for one balance computation.
///
/// Only current members carry a balance. Amounts attributed to anyone
/// else are dropped rather than failing the computation.
#[derive(Debug, Clone, Default)]
pub struct BalanceAccumulator {
    balances: BTreeMap<UserId, Decimal>,
}

impl BalanceAccumulator {
    /// Starts every member at zero.
    pub fn new(members: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            balances: members
                .into_iter()
                .map(|user_id| (user_id, Decimal::ZERO))
                .collect(),
        }
    }

    /// Returns true if the user has a running balance.
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.balances.contains_key(&user_id)
    }

    /// Adds `amount` to a member's balance. Returns false if not a member.
    pub fn credit(&mut self, user_id: UserId, amount: Decimal) -> bool {
        self.balances
            .get_mut(&user_id)
            .map(|balance| *balance += amount)
            .is_some()
    }

    /// Subtracts `amount` from a member's balance. Returns false if not a member.
    pub fn debit(&mut self, user_id: UserId, amount: Decimal) -> bool {
        self.balances
            .get_mut(&user_id)
            .map(|balance| *balance -= amount)
            .is_some()
    }

    /// The payer is owed the full total.
    pub fn apply_expense(&mut self, expense: &ExpenseRecord) -> bool {
        self.credit(expense.paid_by, expense.total_amount)
    }

    /// The participant owes their share.
    pub fn apply_split(&mut self, split: &SplitRecord) -> bool {
        self.debit(split.user_id, split.amount)
    }

    /// The sender has paid down their debt; the receiver is owed less.
    ///
    /// Each side is applied independently, so a settlement with one
    /// non-member party still moves the other party's balance.
    pub fn apply_settlement(&mut self, settlement: &SettlementRecord) {
        self.debit(settlement.from_user, settlement.amount);
        self.credit(settlement.to_user, settlement.amount);
    }

    /// Current balance of a member.
    #[must_use]
    pub fn balance_of(&self, user_id: UserId) -> Option<Decimal> {
        self.balances.get(&user_id).copied()
    }

    /// Finishes the fold.
    #[must_use]
    pub fn finish(self, group_id: GroupId) -> GroupBalances {
        GroupBalances::new(group_id, self.balances)
    }
}

/// Computes every member's net balance from one snapshot of the group's ledger.
///
/// 1. Every member starts at zero
/// 2. Each expense credits its payer with the total
/// 3. Each split of one of the group's expenses debits its participant
/// 4. Each settlement debits the sender and credits the receiver
///
/// Arithmetic is exact; nothing is rounded. The result depends only on the
/// snapshot, so the same rows always give the same balances.
#[must_use]
pub fn compute_balances(snapshot: &LedgerSnapshot) -> GroupBalances {
    let mut acc = BalanceAccumulator::new(snapshot.members.iter().copied());

    for expense in &snapshot.expenses {
        acc.apply_expense(expense);
    }

    let group_expenses: HashSet<ExpenseId> = snapshot.expenses.iter().map(|e| e.id).collect();
    for split in snapshot
        .splits
        .iter()
        .filter(|split| group_expenses.contains(&split.expense_id))
    {
        acc.apply_split(split);
    }

    for settlement in &snapshot.settlements {
        acc.apply_settlement(settlement);
    }

    acc.finish(snapshot.group_id)
}
