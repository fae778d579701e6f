//! Property-based tests for balance aggregation.
//!
//! - Zero-sum: fully split expenses leave balances summing to zero
//! - Settlement neutrality: a settlement moves two balances by the same amount
//! - Determinism: the same snapshot always yields the same balances

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{ExpenseId, GroupId, UserId};

use super::aggregator::compute_balances;
use super::types::{ExpenseRecord, LedgerSnapshot, SettlementRecord, SplitRecord};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// An expense described by indices into the member list.
#[derive(Debug, Clone)]
struct ExpensePlan {
    payer: usize,
    shares: Vec<(usize, Decimal)>,
}

fn expense_plan(member_count: usize) -> impl Strategy<Value = ExpensePlan> {
    (
        0..member_count,
        prop::collection::vec((0..member_count, positive_amount()), 1..=member_count),
    )
        .prop_map(|(payer, shares)| ExpensePlan { payer, shares })
}

fn settlement_plan(member_count: usize) -> impl Strategy<Value = (usize, usize, Decimal)> {
    (0..member_count, 0..member_count, positive_amount())
}

/// Builds a snapshot whose expense totals equal the sum of their splits.
fn build_snapshot(
    member_count: usize,
    expenses: &[ExpensePlan],
    settlements: &[(usize, usize, Decimal)],
) -> (LedgerSnapshot, Vec<UserId>) {
    let members: Vec<UserId> = (0..member_count).map(|_| UserId::new()).collect();
    let mut snapshot = LedgerSnapshot::new(GroupId::new(), members.clone());

    for plan in expenses {
        let id = ExpenseId::new();
        let total: Decimal = plan.shares.iter().map(|(_, amount)| *amount).sum();
        snapshot.expenses.push(ExpenseRecord {
            id,
            paid_by: members[plan.payer],
            total_amount: total,
        });
        for (member, amount) in &plan.shares {
            snapshot.splits.push(SplitRecord {
                expense_id: id,
                user_id: members[*member],
                amount: *amount,
            });
        }
    }

    for (from, to, amount) in settlements {
        snapshot.settlements.push(SettlementRecord {
            from_user: members[*from],
            to_user: members[*to],
            amount: *amount,
        });
    }

    (snapshot, members)
}

fn ledger_strategy() -> impl Strategy<
    Value = (
        usize,
        Vec<ExpensePlan>,
        Vec<(usize, usize, Decimal)>,
    ),
> {
    (2usize..8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(expense_plan(n), 0..20),
            prop::collection::vec(settlement_plan(n), 0..10),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* group whose expenses are fully split, balances sum to zero.
    #[test]
    fn prop_balances_sum_to_zero((n, expenses, settlements) in ledger_strategy()) {
        let (snapshot, _) = build_snapshot(n, &expenses, &settlements);
        let balances = compute_balances(&snapshot);

        prop_assert_eq!(balances.total(), Decimal::ZERO);
        prop_assert_eq!(balances.len(), n);
        prop_assert!(snapshot.split_mismatches().is_empty());
    }

    /// *For any* ledger, adding a settlement of A from X to Y moves X by -A,
    /// Y by +A, and leaves the sum unchanged.
    #[test]
    fn prop_settlement_is_neutral(
        (n, expenses, settlements) in ledger_strategy(),
        amount in positive_amount(),
        from_seed in any::<prop::sample::Index>(),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let (mut snapshot, members) = build_snapshot(n, &expenses, &settlements);
        let before = compute_balances(&snapshot);

        let from = members[from_seed.index(n)];
        let to = members[to_seed.index(n)];
        prop_assume!(from != to);

        snapshot.settlements.push(SettlementRecord { from_user: from, to_user: to, amount });
        let after = compute_balances(&snapshot);

        prop_assert_eq!(after.total(), before.total());
        prop_assert_eq!(after.get(from).unwrap(), before.get(from).unwrap() - amount);
        prop_assert_eq!(after.get(to).unwrap(), before.get(to).unwrap() + amount);
        for member in members.iter().filter(|m| **m != from && **m != to) {
            prop_assert_eq!(after.get(*member), before.get(*member));
        }
    }

    /// *For any* snapshot, computing twice yields identical balances.
    #[test]
    fn prop_computation_is_deterministic((n, expenses, settlements) in ledger_strategy()) {
        let (snapshot, _) = build_snapshot(n, &expenses, &settlements);

        let first = compute_balances(&snapshot);
        let second = compute_balances(&snapshot);

        prop_assert_eq!(
            first.iter().collect::<Vec<_>>(),
            second.iter().collect::<Vec<_>>()
        );
    }

    /// *For any* snapshot, the order in which rows were read does not matter.
    #[test]
    fn prop_row_order_does_not_matter((n, expenses, settlements) in ledger_strategy()) {
        let (snapshot, _) = build_snapshot(n, &expenses, &settlements);

        let mut reversed = snapshot.clone();
        reversed.expenses.reverse();
        reversed.splits.reverse();
        reversed.settlements.reverse();
        reversed.members.reverse();

        prop_assert_eq!(compute_balances(&snapshot), compute_balances(&reversed));
    }
}
