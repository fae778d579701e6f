//! Groups and their membership.
//!
//! This module provides:
//! - Domain types for groups, members, and group details
//! - Input validation for group names and member emails
//! - The membership guard that gates every group read and write
//! - `GroupService`, which runs the group operations against a repository

mod context;
mod error;
mod service;
mod types;
pub mod validation;


pub use context::Caller;
pub use error::GroupError;
pub use service::{GroupRepository, GroupService};
pub use types::{CreateGroupInput, Group, GroupDetails, GroupExpense, UserSummary};
