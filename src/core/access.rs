//! Ownership-based authorization.
//!
//! Ownership is dynamic: a user may act on a player (or its listing) only while their
//! team currently owns it, so every check re-reads the player's team. Admins pass
//! unconditionally.

use crate::{
    core::store,
    entities::{player, user},
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::warn;

/// Ensures `requester` may manage `player`, i.e. is an admin or owns its team.
///
/// `action` completes the rejection message, e.g. `"update a transfer"`.
pub async fn ensure_can_manage_player<C>(
    db: &C,
    requester: &user::Model,
    player: &player::Model,
    action: &str,
) -> Result<()>
where
    C: ConnectionTrait,
{
    if requester.is_admin() {
        return Ok(());
    }

    let team = store::get_team(db, player.team_id).await?;
    if team.user_id == requester.id {
        return Ok(());
    }

    warn!(
        "User {} attempted to {} for player {} owned by team {}. Denied.",
        requester.id, action, player.id, team.id
    );
    Err(Error::Unauthorized {
        message: format!("Trying to {action} on a player not owned"),
    })
}

/// Ensures `requester` is an admin.
pub fn ensure_admin(requester: &user::Model, action: &str) -> Result<()> {
    if requester.is_admin() {
        Ok(())
    } else {
        warn!("Non-admin user {} attempted to {}. Denied.", requester.id, action);
        Err(Error::Unauthorized {
            message: format!("Only admins may {action}"),
        })
    }
}
