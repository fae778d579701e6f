//! Database seeder for Tally development and testing.
//!
//! Seeds two users who share a group with one dinner expense split evenly,
//! then prints the resulting balances and an access token for each user.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tally_core::group::{Caller, GroupService};
use tally_db::entities::{expense_splits, expenses, users};
use tally_db::{GroupRepository, UserRepository};
use tally_shared::types::{GroupId, UserId};
use tally_shared::{AppConfig, JwtConfig, JwtService};
use uuid::Uuid;

const ALICE_EMAIL: &str = "alice@example.com";
const BOB_EMAIL: &str = "bob@example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = tally_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding users...");
    let alice = seed_user(&db, ALICE_EMAIL).await?;
    let bob = seed_user(&db, BOB_EMAIL).await?;

    let service = GroupService::new(Arc::new(GroupRepository::new(db.clone())));
    let caller = Caller::new(UserId::from_uuid(alice.id));

    println!("Seeding group...");
    let group = service.create_group(&caller, "Weekend trip").await?;
    service.add_member(&caller, group.id, &bob.email).await?;

    println!("Seeding dinner expense...");
    seed_even_split(&db, group.id, alice.id, &[alice.id, bob.id], Decimal::new(10000, 2)).await?;

    let balances = service.compute_balances(&caller, group.id).await?;
    println!("Balances for group {}:", group.id);
    for balance in balances.iter() {
        println!("  {}  {}", balance.user_id, balance.amount);
    }

    let jwt = JwtService::new(JwtConfig::from(&config.jwt));
    println!("Access tokens:");
    for user in [&alice, &bob] {
        let token = jwt.generate_access_token(user.id)?;
        println!("  {}: {token}", user.email);
    }

    println!("Seeding complete!");
    Ok(())
}

async fn seed_user(db: &DatabaseConnection, email: &str) -> anyhow::Result<users::Model> {
    let repo = UserRepository::new(db.clone());
    if let Some(user) = repo.find_by_email(email).await? {
        println!("  {email} already exists");
        return Ok(user);
    }
    Ok(repo.create(email, None).await?)
}

/// Records an expense paid by `payer` and split evenly across `members`.
async fn seed_even_split(
    db: &DatabaseConnection,
    group_id: GroupId,
    payer: Uuid,
    members: &[Uuid],
    total: Decimal,
) -> anyhow::Result<()> {
    let share = total / Decimal::from(members.len());
    let txn = db.begin().await?;
    let expense_id = Uuid::now_v7();

    expenses::ActiveModel {
        id: Set(expense_id),
        group_id: Set(group_id.into_inner()),
        description: Set("Dinner".to_string()),
        total_amount: Set(total),
        paid_by: Set(payer),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    for member in members {
        expense_splits::ActiveModel {
            expense_id: Set(expense_id),
            user_id: Set(*member),
            amount: Set(share),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(())
}
