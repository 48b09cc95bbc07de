//! Shared test utilities for the transfer market.
//!
//! This module provides an in-memory database with the schema applied, plus helpers
//! that insert users, teams, players and listings directly with sensible defaults.
//! The helpers bypass the marketplace operations so tests of one operation do not
//! depend on another.

use crate::{
    entities::{PermissionLevel, player, team, transfer, user},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
///
/// The pool is pinned to a single connection: every connection to `sqlite::memory:`
/// opens its own private database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a regular user that only exists in memory, for paths that must fail before
/// touching storage.
pub fn test_user(id: i64) -> user::Model {
    user::Model {
        id,
        email: format!("user{id}@example.com"),
        password_hash: Vec::new(),
        permission_level: PermissionLevel::Regular,
    }
}

async fn insert_user(
    db: &DatabaseConnection,
    email: &str,
    permission_level: PermissionLevel,
) -> Result<user::Model> {
    user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(b"test-hash".to_vec()),
        permission_level: Set(permission_level),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a regular user owning an empty team.
///
/// # Defaults
/// * team name: `"Team {email}"`
/// * country: `"Testland"`
pub async fn create_test_team(
    db: &DatabaseConnection,
    email: &str,
    budget: i64,
) -> Result<(user::Model, team::Model)> {
    let user = insert_user(db, email, PermissionLevel::Regular).await?;
    let team = team::ActiveModel {
        name: Set(format!("Team {email}")),
        country: Set("Testland".to_string()),
        budget: Set(budget),
        user_id: Set(user.id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((user, team))
}

/// Creates an admin user without a team.
pub async fn create_test_admin(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    insert_user(db, email, PermissionLevel::Admin).await
}

/// Creates a player on `team_id`.
///
/// # Defaults
/// * name: `"Test Player"`
/// * country: `"Testland"`
/// * age: 25
/// * position: attacker
pub async fn create_test_player(
    db: &DatabaseConnection,
    team_id: i64,
    market_value: i64,
) -> Result<player::Model> {
    player::ActiveModel {
        first_name: Set("Test".to_string()),
        last_name: Set("Player".to_string()),
        country: Set("Testland".to_string()),
        age: Set(25),
        market_value: Set(market_value),
        position: Set(crate::entities::Position::Attacker),
        team_id: Set(team_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a listing directly, without authorization or duplicate checks.
///
/// A second listing for the same player surfaces the unique index violation as
/// `Error::Database`.
pub async fn create_test_listing(
    db: &DatabaseConnection,
    player_id: i64,
    ask: i64,
) -> Result<transfer::Model> {
    transfer::ActiveModel {
        player_id: Set(player_id),
        ask: Set(ask),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
