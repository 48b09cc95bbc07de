//! Transfer lifecycle - opening, repricing, cancelling and browsing listings.
//!
//! A player is either unlisted or has exactly one open listing. Listings are never
//! archived: cancelling one, or completing a purchase (see [`crate::core::purchase`]),
//! deletes the row and the player can be listed again.

use crate::{
    core::{access, filter::ListingFilter, store},
    entities::{Player, Team, Transfer, team, transfer, user},
    errors::{Error, Result},
    models::ListingView,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

fn validate_ask(ask: i64) -> Result<()> {
    if ask < 0 {
        return Err(Error::InvalidAmount { amount: ask });
    }
    Ok(())
}

/// Opens a listing for `player_id` at `ask`.
///
/// The existence check and the insert run inside one transaction, and the unique
/// index on `transfers.player_id` rejects a concurrent creator that slipped past the
/// check; both paths report `Error::Conflict`.
///
/// # Errors
/// - `InvalidAmount` if `ask` is negative
/// - `NotFound` if the player does not exist
/// - `Unauthorized` if `requester` is neither an admin nor the player's owner
/// - `Conflict` if the player already has an open listing
#[instrument(skip(db, requester), fields(requester = requester.id))]
pub async fn create_listing(
    db: &DatabaseConnection,
    player_id: i64,
    ask: i64,
    requester: &user::Model,
) -> Result<transfer::Model> {
    validate_ask(ask)?;

    let txn = db.begin().await?;

    let player = store::get_player(&txn, player_id).await?;
    access::ensure_can_manage_player(&txn, requester, &player, "create a transfer").await?;

    if store::find_listing_for_player(&txn, player_id).await?.is_some() {
        return Err(Error::Conflict { player_id });
    }

    let listing = transfer::ActiveModel {
        player_id: Set(player_id),
        ask: Set(ask),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let listing = listing.insert(&txn).await.map_err(|e| {
        if store::is_unique_violation(&e) {
            Error::Conflict { player_id }
        } else {
            Error::from(e)
        }
    })?;

    txn.commit().await?;

    info!(
        "Opened transfer {} for player {} at ask {}",
        listing.id, player_id, ask
    );
    Ok(listing)
}

/// Replaces the asking price of an open listing. Ownership does not change.
///
/// # Errors
/// - `InvalidAmount` if `new_ask` is negative
/// - `NotFound` if the listing (or its player) does not exist
/// - `Unauthorized` if `requester` is neither an admin nor the player's owner
#[instrument(skip(db, requester), fields(requester = requester.id))]
pub async fn update_listing(
    db: &DatabaseConnection,
    listing_id: i64,
    new_ask: i64,
    requester: &user::Model,
) -> Result<transfer::Model> {
    validate_ask(new_ask)?;

    let listing = store::get_listing(db, listing_id).await?;
    let player = store::get_player(db, listing.player_id).await?;
    access::ensure_can_manage_player(db, requester, &player, "update a transfer").await?;

    let old_ask = listing.ask;
    let mut active: transfer::ActiveModel = listing.into();
    active.ask = Set(new_ask);
    let updated = active.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => Error::NotFound {
            entity: "transfer",
            id: listing_id,
        },
        other => Error::from(other),
    })?;

    info!(
        "Repriced transfer {} from {} to {}",
        listing_id, old_ask, new_ask
    );
    Ok(updated)
}

/// Cancels an open listing. Neither the player nor any budget is touched.
///
/// # Errors
/// - `NotFound` if the listing (or its player) does not exist
/// - `Unauthorized` if `requester` is neither an admin nor the player's owner
#[instrument(skip(db, requester), fields(requester = requester.id))]
pub async fn delete_listing(
    db: &DatabaseConnection,
    listing_id: i64,
    requester: &user::Model,
) -> Result<()> {
    let listing = store::get_listing(db, listing_id).await?;
    let player = store::get_player(db, listing.player_id).await?;
    access::ensure_can_manage_player(db, requester, &player, "delete a transfer").await?;

    let result = Transfer::delete_by_id(listing_id).exec(db).await?;
    if result.rows_affected == 0 {
        // Bought or cancelled by someone else since the lookup
        return Err(Error::NotFound {
            entity: "transfer",
            id: listing_id,
        });
    }

    info!("Cancelled transfer {} for player {}", listing_id, player.id);
    Ok(())
}

/// Returns a single open listing with its player snapshot.
///
/// # Errors
/// `NotFound` if the listing, its player or the owning team does not exist.
pub async fn get_listing(db: &DatabaseConnection, listing_id: i64) -> Result<ListingView> {
    let snapshot = db.begin().await?;
    let listing = store::get_listing(&snapshot, listing_id).await?;
    let player = store::get_player(&snapshot, listing.player_id).await?;
    let team = store::get_team(&snapshot, player.team_id).await?;
    snapshot.commit().await?;
    Ok(ListingView::new(&listing, &player, &team))
}

/// Returns every open listing that matches `filter`, oldest first.
///
/// Listings, their players and the owning teams are read in one transaction so a
/// purchase committing in between cannot pair a closed listing with its new owner.
/// Filtering happens in memory.
#[instrument(skip(db))]
pub async fn list_listings(
    db: &DatabaseConnection,
    filter: &ListingFilter,
) -> Result<Vec<ListingView>> {
    let snapshot = db.begin().await?;

    let rows = Transfer::find()
        .find_also_related(Player)
        .order_by_asc(transfer::Column::Id)
        .all(&snapshot)
        .await?;

    let team_ids: Vec<i64> = rows
        .iter()
        .filter_map(|(_, player)| player.as_ref().map(|p| p.team_id))
        .collect();
    let teams: HashMap<i64, _> = Team::find()
        .filter(team::Column::Id.is_in(team_ids))
        .all(&snapshot)
        .await?
        .into_iter()
        .map(|team| (team.id, team))
        .collect();

    snapshot.commit().await?;

    let views: Vec<ListingView> = rows
        .iter()
        .filter_map(|(listing, player)| {
            let player = player.as_ref()?;
            let team = teams.get(&player.team_id)?;
            Some(ListingView::new(listing, player, team))
        })
        .collect();

    let total = views.len();
    let matching = filter.apply(views);
    debug!("{} of {} open listings match the filter", matching.len(), total);
    Ok(matching)
}
