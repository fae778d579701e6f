//! Group service implementation.

use std::future::Future;
use std::sync::Arc;

use tally_shared::types::{GroupId, UserId};

use super::context::Caller;
use super::error::GroupError;
use super::types::{CreateGroupInput, Group, GroupDetails, UserSummary};
use super::validation::{normalize_email, validate_group_name};
use crate::balance::{GroupBalances, LedgerSnapshot, compute_balances};

/// Repository trait for group persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait GroupRepository: Send + Sync {
    /// Check whether a user belongs to a group.
    fn is_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, GroupError>> + Send;

    /// Check whether a group exists.
    fn group_exists(&self, group_id: GroupId)
    -> impl Future<Output = Result<bool, GroupError>> + Send;

    /// Find a registered user by normalized email.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserSummary>, GroupError>> + Send;

    /// Insert a group and its creator's membership as one atomic unit.
    ///
    /// If either insert fails, neither is persisted.
    fn create_group_with_creator(
        &self,
        input: CreateGroupInput,
    ) -> impl Future<Output = Result<Group, GroupError>> + Send;

    /// Insert one membership row.
    ///
    /// Must return `GroupError::AlreadyMember` when the pair already exists,
    /// including when a concurrent insert won the race.
    fn add_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), GroupError>> + Send;

    /// Read members, expenses, splits, and settlements of a group from one
    /// consistent snapshot. Returns `None` if the group does not exist.
    fn load_ledger(
        &self,
        group_id: GroupId,
    ) -> impl Future<Output = Result<Option<LedgerSnapshot>, GroupError>> + Send;

    /// Load a group with its members and expenses.
    fn find_group_details(
        &self,
        group_id: GroupId,
    ) -> impl Future<Output = Result<Option<GroupDetails>, GroupError>> + Send;

    /// List the groups a user belongs to, newest first.
    fn list_groups_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Group>, GroupError>> + Send;
}

/// Group service: every read and write of group data goes through here.
///
/// Each operation checks its inputs and the caller's membership before
/// touching anything, and stops early when the caller cancels.
pub struct GroupService<R: GroupRepository> {
    repo: Arc<R>,
}

impl<R: GroupRepository> Clone for GroupService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: GroupRepository> GroupService<R> {
    /// Create a new group service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns true if the user is a member of the group.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository read fails or the caller cancels.
    pub async fn is_member(
        &self,
        caller: &Caller,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<bool, GroupError> {
        caller.run(self.repo.is_member(group_id, user_id)).await
    }

    /// Fails unless the caller belongs to the group.
    ///
    /// A missing group is reported as `GroupNotFound` rather than `NotMember`.
    async fn ensure_member(&self, caller: &Caller, group_id: GroupId) -> Result<(), GroupError> {
        if self.repo.is_member(group_id, caller.user_id()).await? {
            return Ok(());
        }
        if self.repo.group_exists(group_id).await? {
            Err(GroupError::NotMember(group_id))
        } else {
            Err(GroupError::GroupNotFound(group_id))
        }
    }

    /// Create a group with the caller as its first member.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty or too long
    /// - Either insert fails (nothing is persisted)
    pub async fn create_group(&self, caller: &Caller, name: &str) -> Result<Group, GroupError> {
        let name = validate_group_name(name)?;
        let input = CreateGroupInput {
            name,
            created_by: caller.user_id(),
        };
        caller
            .run(self.repo.create_group_with_creator(input))
            .await
    }

    /// Add a registered user to a group by email.
    ///
    /// Checks run in order, each with its own failure: the caller must be a
    /// member, the email must be well formed and belong to a user, and that
    /// user must not already be a member.
    ///
    /// # Errors
    ///
    /// Returns `NotMember`, `GroupNotFound`, `InvalidEmail`, `UserNotFound`,
    /// `AlreadyMember`, or a repository error.
    pub async fn add_member(
        &self,
        caller: &Caller,
        group_id: GroupId,
        email: &str,
    ) -> Result<UserSummary, GroupError> {
        caller
            .run(async {
                self.ensure_member(caller, group_id).await?;

                let email = normalize_email(email)?;
                let user = self
                    .repo
                    .find_user_by_email(&email)
                    .await?
                    .ok_or(GroupError::UserNotFound(email))?;

                if self.repo.is_member(group_id, user.user_id).await? {
                    return Err(GroupError::AlreadyMember {
                        group_id,
                        user_id: user.user_id,
                    });
                }

                self.repo.add_member(group_id, user.user_id).await?;
                Ok(user)
            })
            .await
    }

    /// Compute every member's net balance in a group.
    ///
    /// # Errors
    ///
    /// Returns `NotMember` or `GroupNotFound` before reading the ledger, or a
    /// repository error if any read fails. Partial balances are never returned.
    pub async fn compute_balances(
        &self,
        caller: &Caller,
        group_id: GroupId,
    ) -> Result<GroupBalances, GroupError> {
        caller
            .run(async {
                self.ensure_member(caller, group_id).await?;

                let snapshot = self
                    .repo
                    .load_ledger(group_id)
                    .await?
                    .ok_or(GroupError::GroupNotFound(group_id))?;

                Ok(compute_balances(&snapshot))
            })
            .await
    }

    /// Get a group with its members and expenses.
    ///
    /// # Errors
    ///
    /// Returns `NotMember`, `GroupNotFound`, or a repository error.
    pub async fn get_group(
        &self,
        caller: &Caller,
        group_id: GroupId,
    ) -> Result<GroupDetails, GroupError> {
        caller
            .run(async {
                self.ensure_member(caller, group_id).await?;

                self.repo
                    .find_group_details(group_id)
                    .await?
                    .ok_or(GroupError::GroupNotFound(group_id))
            })
            .await
    }

    /// List the caller's groups, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the read fails.
    pub async fn list_groups(&self, caller: &Caller) -> Result<Vec<Group>, GroupError> {
        caller
            .run(self.repo.list_groups_for_user(caller.user_id()))
            .await
    }
}
