//! Group repository for database operations.
//!
//! Implements the core group persistence trait using `SeaORM`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
    TransactionTrait,
};
use tally_core::balance::{ExpenseRecord, LedgerSnapshot, SettlementRecord, SplitRecord};
use tally_core::group::{
    CreateGroupInput, Group, GroupDetails, GroupError, GroupExpense,
    GroupRepository as GroupRepoTrait, UserSummary,
};
use tally_shared::types::{ExpenseId, GroupId, UserId};
use tracing::{debug, info, warn};

use crate::entities::{expense_splits, expenses, group_members, groups, settlements, users};
use crate::snapshot::SnapshotConnection;

/// Group repository implementation.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Create a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl GroupRepoTrait for GroupRepository {
    async fn is_member(&self, group_id: GroupId, user_id: UserId) -> Result<bool, GroupError> {
        let count = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(group_id.into_inner()))
            .filter(group_members::Column::UserId.eq(user_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(count > 0)
    }

    async fn group_exists(&self, group_id: GroupId) -> Result<bool, GroupError> {
        let count = groups::Entity::find()
            .filter(groups::Column::Id.eq(group_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(count > 0)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserSummary>, GroupError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(user.map(to_user_summary))
    }

    async fn create_group_with_creator(
        &self,
        input: CreateGroupInput,
    ) -> Result<Group, GroupError> {
        let txn = self.db.begin().await.map_err(repository_error)?;

        let now = Utc::now().into();
        let group_id = GroupId::new();

        let group = groups::ActiveModel {
            id: Set(group_id.into_inner()),
            name: Set(input.name),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(repository_error)?;

        // Creator becomes the first member in the same transaction
        group_members::ActiveModel {
            group_id: Set(group_id.into_inner()),
            user_id: Set(input.created_by.into_inner()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(repository_error)?;

        txn.commit().await.map_err(repository_error)?;

        info!(group_id = %group_id, created_by = %input.created_by, "Group created");
        Ok(to_group(group))
    }

    async fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), GroupError> {
        let membership = group_members::ActiveModel {
            group_id: Set(group_id.into_inner()),
            user_id: Set(user_id.into_inner()),
            created_at: Set(Utc::now().into()),
        };

        match membership.insert(&self.db).await {
            Ok(_) => {
                info!(group_id = %group_id, user_id = %user_id, "Member added");
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => {
                debug!(group_id = %group_id, user_id = %user_id, "Membership already exists");
                Err(GroupError::AlreadyMember { group_id, user_id })
            }
            Err(e) => Err(repository_error(e)),
        }
    }

    async fn load_ledger(&self, group_id: GroupId) -> Result<Option<LedgerSnapshot>, GroupError> {
        let snapshot = SnapshotConnection::begin(&self.db)
            .await
            .map_err(repository_error)?;
        let txn = snapshot.transaction();
        let gid = group_id.into_inner();

        let Some(_group) = groups::Entity::find_by_id(gid)
            .one(txn)
            .await
            .map_err(repository_error)?
        else {
            return Ok(None);
        };

        let members = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(gid))
            .all(txn)
            .await
            .map_err(repository_error)?;

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(gid))
            .all(txn)
            .await
            .map_err(repository_error)?;

        let splits = expense_splits::Entity::find()
            .join(JoinType::InnerJoin, expense_splits::Relation::Expenses.def())
            .filter(expenses::Column::GroupId.eq(gid))
            .all(txn)
            .await
            .map_err(repository_error)?;

        let settlements = settlements::Entity::find()
            .filter(settlements::Column::GroupId.eq(gid))
            .all(txn)
            .await
            .map_err(repository_error)?;

        snapshot.finish().await.map_err(repository_error)?;

        let mut ledger = LedgerSnapshot::new(
            group_id,
            members
                .into_iter()
                .map(|m| UserId::from_uuid(m.user_id))
                .collect(),
        );
        ledger.expenses = expenses
            .into_iter()
            .map(|e| ExpenseRecord {
                id: ExpenseId::from_uuid(e.id),
                paid_by: UserId::from_uuid(e.paid_by),
                total_amount: e.total_amount,
            })
            .collect();
        ledger.splits = splits
            .into_iter()
            .map(|s| SplitRecord {
                expense_id: ExpenseId::from_uuid(s.expense_id),
                user_id: UserId::from_uuid(s.user_id),
                amount: s.amount,
            })
            .collect();
        ledger.settlements = settlements
            .into_iter()
            .map(|s| SettlementRecord {
                from_user: UserId::from_uuid(s.from_user),
                to_user: UserId::from_uuid(s.to_user),
                amount: s.amount,
            })
            .collect();

        for mismatch in ledger.split_mismatches() {
            warn!(
                group_id = %group_id,
                expense_id = %mismatch.expense_id,
                total_amount = %mismatch.total_amount,
                split_total = %mismatch.split_total,
                "Expense splits do not sum to the expense total"
            );
        }

        debug!(
            group_id = %group_id,
            members = ledger.members.len(),
            expenses = ledger.expenses.len(),
            settlements = ledger.settlements.len(),
            "Ledger snapshot loaded"
        );

        Ok(Some(ledger))
    }

    async fn find_group_details(
        &self,
        group_id: GroupId,
    ) -> Result<Option<GroupDetails>, GroupError> {
        let gid = group_id.into_inner();

        let Some(group) = groups::Entity::find_by_id(gid)
            .one(&self.db)
            .await
            .map_err(repository_error)?
        else {
            return Ok(None);
        };

        let members = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(gid))
            .order_by_asc(group_members::Column::CreatedAt)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .map_err(repository_error)?
            .into_iter()
            .filter_map(|(_, user)| user.map(to_user_summary))
            .collect();

        let expenses = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(gid))
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repository_error)?
            .into_iter()
            .map(to_group_expense)
            .collect();

        Ok(Some(GroupDetails {
            group: to_group(group),
            members,
            expenses,
        }))
    }

    async fn list_groups_for_user(&self, user_id: UserId) -> Result<Vec<Group>, GroupError> {
        let groups = groups::Entity::find()
            .join(JoinType::InnerJoin, groups::Relation::GroupMembers.def())
            .filter(group_members::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(groups::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(groups.into_iter().map(to_group).collect())
    }
}

fn repository_error(e: DbErr) -> GroupError {
    GroupError::repository(e.to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn to_group(model: groups::Model) -> Group {
    Group {
        id: GroupId::from_uuid(model.id),
        name: model.name,
        created_by: UserId::from_uuid(model.created_by),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn to_user_summary(model: users::Model) -> UserSummary {
    UserSummary {
        user_id: UserId::from_uuid(model.id),
        email: model.email,
        username: model.username,
    }
}

fn to_group_expense(model: expenses::Model) -> GroupExpense {
    GroupExpense {
        id: ExpenseId::from_uuid(model.id),
        description: model.description,
        total_amount: model.total_amount,
        paid_by: UserId::from_uuid(model.paid_by),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
