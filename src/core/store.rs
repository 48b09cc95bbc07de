//! Typed entity lookups shared by the marketplace operations.
//!
//! Each entity gets its own point lookup (`get_*`, failing with `Error::NotFound`) and,
//! where the marketplace needs it, a secondary-key lookup (`find_*`, returning `None`).
//! Everything is generic over [`ConnectionTrait`] so the same function runs against the
//! plain connection or inside an open transaction. Multi-record mutations begin a
//! transaction with [`sea_orm::TransactionTrait::begin`]; dropping it without `commit`
//! rolls back every write performed through it.

use crate::{
    entities::{Player, Team, Transfer, User, player, team, transfer, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, SqlErr, prelude::*};

/// Finds a user by ID.
pub async fn get_user<C>(db: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "user",
            id: user_id,
        })
}

/// Finds a team by ID.
pub async fn get_team<C>(db: &C, team_id: i64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "team",
            id: team_id,
        })
}

/// Finds a player by ID.
pub async fn get_player<C>(db: &C, player_id: i64) -> Result<player::Model>
where
    C: ConnectionTrait,
{
    Player::find_by_id(player_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "player",
            id: player_id,
        })
}

/// Finds a transfer listing by ID.
pub async fn get_listing<C>(db: &C, listing_id: i64) -> Result<transfer::Model>
where
    C: ConnectionTrait,
{
    Transfer::find_by_id(listing_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "transfer",
            id: listing_id,
        })
}

/// Finds the team owned by a user, if any.
pub async fn find_team_for_user<C>(db: &C, user_id: i64) -> Result<Option<team::Model>>
where
    C: ConnectionTrait,
{
    Team::find()
        .filter(team::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the team owned by a user, failing when the user has none.
pub async fn get_team_for_user<C>(db: &C, user_id: i64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    find_team_for_user(db, user_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "team for user",
            id: user_id,
        })
}

/// Finds the open listing of a player, if any.
pub async fn find_listing_for_player<C>(db: &C, player_id: i64) -> Result<Option<transfer::Model>>
where
    C: ConnectionTrait,
{
    Transfer::find()
        .filter(transfer::Column::PlayerId.eq(player_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by email, if registered.
pub async fn find_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the players of a team ordered by position, then ID.
pub async fn players_for_team<C>(db: &C, team_id: i64) -> Result<Vec<player::Model>>
where
    C: ConnectionTrait,
{
    Player::find()
        .filter(player::Column::TeamId.eq(team_id))
        .order_by_asc(player::Column::Position)
        .order_by_asc(player::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether a storage error is a violated unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
