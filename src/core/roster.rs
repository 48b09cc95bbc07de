//! Users, teams and their squads.
//!
//! Registration forms a user together with a team and a generated squad; deleting a
//! user tears all of that down again. Both are single transactions.

use crate::{
    core::{access, store},
    entities::{PermissionLevel, Player, Team, Transfer, User, player, team, transfer, user},
    errors::{Error, Result},
    models::{NewPlayer, NewTeam},
};
use sea_orm::{QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

fn validate_new_player(new_player: &NewPlayer) -> Result<()> {
    if new_player.market_value < 0 {
        return Err(Error::InvalidAmount {
            amount: new_player.market_value,
        });
    }
    if new_player.age < 0 {
        return Err(Error::InvalidAge {
            age: new_player.age,
        });
    }
    Ok(())
}

fn player_active_model(new_player: NewPlayer, team_id: i64) -> player::ActiveModel {
    player::ActiveModel {
        first_name: Set(new_player.first_name),
        last_name: Set(new_player.last_name),
        country: Set(new_player.country),
        age: Set(new_player.age),
        market_value: Set(new_player.market_value),
        position: Set(new_player.position),
        team_id: Set(team_id),
        ..Default::default()
    }
}

/// Registers a user and forms their team with the given squad.
///
/// `password_hash` is stored as-is; hashing belongs to the authentication layer.
///
/// # Errors
/// - `InvalidOperation` if the email is blank or already registered
/// - `InvalidAmount` if the team budget or a player's market value is negative
/// - `InvalidAge` if a player's age is negative
#[instrument(skip(db, password_hash, new_team, players))]
pub async fn register_user(
    db: &DatabaseConnection,
    email: &str,
    password_hash: Vec<u8>,
    permission_level: PermissionLevel,
    new_team: NewTeam,
    players: Vec<NewPlayer>,
) -> Result<(user::Model, team::Model)> {
    let email = email.trim();
    if email.is_empty() {
        return Err(Error::InvalidOperation {
            message: "Email cannot be empty".to_string(),
        });
    }
    if new_team.budget < 0 {
        return Err(Error::InvalidAmount {
            amount: new_team.budget,
        });
    }
    players.iter().try_for_each(validate_new_player)?;

    let duplicate = || Error::InvalidOperation {
        message: format!("Email {email} is already registered"),
    };

    let txn = db.begin().await?;

    if store::find_user_by_email(&txn, email).await?.is_some() {
        return Err(duplicate());
    }

    let user = user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        permission_level: Set(permission_level),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| {
        if store::is_unique_violation(&e) {
            duplicate()
        } else {
            Error::from(e)
        }
    })?;

    let team = team::ActiveModel {
        name: Set(new_team.name),
        country: Set(new_team.country),
        budget: Set(new_team.budget),
        user_id: Set(user.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let squad_size = players.len();
    if !players.is_empty() {
        Player::insert_many(players.into_iter().map(|p| player_active_model(p, team.id)))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    info!(
        "Registered user {} with team {} ({}) and {} players",
        user.id, team.id, team.name, squad_size
    );
    Ok((user, team))
}

/// Deletes a user along with their team, its players and their open listings.
///
/// # Errors
/// - `NotFound` if the user does not exist
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    store::get_user(&txn, user_id).await?;

    if let Some(team) = store::find_team_for_user(&txn, user_id).await? {
        let player_ids: Vec<i64> = Player::find()
            .select_only()
            .column(player::Column::Id)
            .filter(player::Column::TeamId.eq(team.id))
            .into_tuple()
            .all(&txn)
            .await?;

        let listings = Transfer::delete_many()
            .filter(transfer::Column::PlayerId.is_in(player_ids))
            .exec(&txn)
            .await?;
        let players = Player::delete_many()
            .filter(player::Column::TeamId.eq(team.id))
            .exec(&txn)
            .await?;
        Team::delete_by_id(team.id).exec(&txn).await?;

        info!(
            "Removed team {} of user {}: {} players, {} listings",
            team.id, user_id, players.rows_affected, listings.rows_affected
        );
    }

    User::delete_by_id(user_id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted user {}", user_id);
    Ok(())
}

/// Adds a player to an existing team. Admin only.
///
/// # Errors
/// - `Unauthorized` if `requester` is not an admin
/// - `InvalidAmount` if the market value is negative
/// - `InvalidAge` if the age is negative
/// - `NotFound` if the team does not exist
#[instrument(skip(db, new_player, requester), fields(requester = requester.id))]
pub async fn create_player_on_team(
    db: &DatabaseConnection,
    team_id: i64,
    new_player: NewPlayer,
    requester: &user::Model,
) -> Result<player::Model> {
    access::ensure_admin(requester, "create players")?;
    validate_new_player(&new_player)?;

    let team = store::get_team(db, team_id).await?;
    let player = player_active_model(new_player, team.id).insert(db).await?;

    info!("Created player {} on team {}", player.id, team.id);
    Ok(player)
}

/// Deletes a player that is not on the market.
///
/// # Errors
/// - `NotFound` if the player does not exist
/// - `Unauthorized` if `requester` is neither an admin nor the player's owner
/// - `Conflict` while the player has an open listing
#[instrument(skip(db, requester), fields(requester = requester.id))]
pub async fn delete_player(
    db: &DatabaseConnection,
    player_id: i64,
    requester: &user::Model,
) -> Result<()> {
    let txn = db.begin().await?;

    let player = store::get_player(&txn, player_id).await?;
    access::ensure_can_manage_player(&txn, requester, &player, "delete a player").await?;

    if store::find_listing_for_player(&txn, player_id).await?.is_some() {
        warn!("Refusing to delete listed player {}", player_id);
        return Err(Error::Conflict { player_id });
    }

    Player::delete_by_id(player_id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted player {} from team {}", player_id, player.team_id);
    Ok(())
}

/// Sum of the market values of a team's players.
///
/// # Errors
/// - `NotFound` if the team does not exist
pub async fn team_market_value<C>(db: &C, team_id: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let team = store::get_team(db, team_id).await?;
    let players = store::players_for_team(db, team.id).await?;
    Ok(players
        .iter()
        .fold(0_i64, |total, p| total.saturating_add(p.market_value)))
}
