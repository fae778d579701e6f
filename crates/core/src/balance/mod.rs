//! Net balance aggregation.
//!
//! A member's net balance is derived, never stored: every expense credits
//! its payer with the total and debits each split participant with their
//! share; every settlement debits the sender and credits the receiver.
//! Each event is a balanced transfer, so the balances of a group sum to zero.

pub mod aggregator;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::{BalanceAccumulator, compute_balances};
pub use types::{
    ExpenseRecord, GroupBalances, LedgerSnapshot, MemberBalance, SettlementRecord, SplitMismatch,
    SplitRecord,
};
