//! Snapshot-isolated read transactions.
//!
//! Reads that must agree with each other (a group's members, expenses,
//! splits, and settlements) run inside one `REPEATABLE READ` transaction.
//! In `PostgreSQL` that level gives every statement in the transaction the
//! same snapshot, so rows committed by concurrent writers after the first
//! read are invisible to the rest.
//!
//! # Usage
//!
//! ```ignore
//! use tally_db::snapshot::SnapshotConnection;
//!
//! let snapshot = SnapshotConnection::begin(&db).await?;
//! let members = GroupMembers::find().all(snapshot.transaction()).await?;
//! let expenses = Expenses::find().all(snapshot.transaction()).await?;
//! snapshot.finish().await?;
//! ```

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, DbErr, IsolationLevel, TransactionTrait,
};

/// A read-only transaction in which every query sees the same snapshot.
///
/// Dropping it without calling `finish` rolls the transaction back and
/// returns the connection to the pool.
pub struct SnapshotConnection {
    txn: DatabaseTransaction,
}

impl SnapshotConnection {
    /// Begins a `REPEATABLE READ`, `READ ONLY` transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the transaction
    /// cannot be started.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        Ok(Self { txn })
    }

    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Ends the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn finish(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }
}

