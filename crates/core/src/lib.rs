//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `balance` - Folding expenses, splits, and settlements into net balances
//! - `group` - Group membership rules and the group service

pub mod balance;
pub mod group;
