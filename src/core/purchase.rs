//! Buy engine - executes a purchase as one atomic unit of work.
//!
//! A purchase touches four records: the player changes owner and value, the buyer is
//! debited, the seller is credited and the listing is deleted. All four writes share
//! one transaction, so either every change is committed or none is visible.
//!
//! Preconditions are re-validated inside that transaction, and every write is guarded
//! so it only applies to the state that was validated:
//!
//! * the listing delete must remove exactly one row, so of two concurrent buyers only
//!   the first committer wins and the other sees `NotFound`;
//! * the buyer debit only applies while `budget >= ask`;
//! * the seller credit only applies while it cannot overflow the budget;
//! * the player only moves while still owned by the seller.
//!
//! Dropping the returned future before it completes drops the open transaction, which
//! rolls it back.

use crate::{
    config::market::ValuationConfig,
    core::store,
    entities::{Player, Team, Transfer, player, team, transfer, user},
    errors::{Error, Result},
    models::PurchaseReceipt,
};
use rand::Rng;
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument, warn};

const BASIS_POINTS: i64 = 10_000;

/// Factor applied to a player's market value after a purchase, in basis points
/// (`10_000` is `1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMultiplier {
    basis_points: i64,
}

impl ValueMultiplier {
    /// Builds a multiplier from basis points, e.g. `15_000` for `1.5`.
    #[must_use]
    pub const fn from_basis_points(basis_points: i64) -> Self {
        Self { basis_points }
    }

    #[must_use]
    pub const fn basis_points(self) -> i64 {
        self.basis_points
    }

    /// Draws a multiplier uniformly from `[min_multiplier, max_multiplier)` at
    /// basis-point resolution.
    pub fn draw<R>(config: &ValuationConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let low = to_basis_points(config.min_multiplier);
        let high = to_basis_points(config.max_multiplier);
        if high <= low {
            return Self::from_basis_points(low);
        }
        Self::from_basis_points(rng.random_range(low..high))
    }

    /// `floor(value * multiplier)`, saturating at `i64::MAX`.
    #[must_use]
    pub fn apply(self, value: i64) -> i64 {
        let scaled =
            i128::from(value) * i128::from(self.basis_points) / i128::from(BASIS_POINTS);
        i64::try_from(scaled).unwrap_or(i64::MAX)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_basis_points(multiplier: f64) -> i64 {
    (multiplier * BASIS_POINTS as f64).round() as i64
}

/// Buys `listing_id` for the team owned by `buyer`.
///
/// `multiplier` is the post-transfer value adjustment, drawn by the caller with
/// [`ValueMultiplier::draw`].
///
/// # Errors
/// - `NotFound` if the listing, its player or the buyer's team does not exist, including
///   when a concurrent purchase closed the listing first
/// - `InvalidOperation` if the buyer already owns the player
/// - `InsufficientFunds` if the buyer's budget is below the ask
/// - `InternalFailure` if any of the four writes (or the commit) fails; nothing is applied
#[instrument(skip(db, buyer), fields(buyer = buyer.id))]
pub async fn buy_listing(
    db: &DatabaseConnection,
    listing_id: i64,
    buyer: &user::Model,
    multiplier: ValueMultiplier,
) -> Result<PurchaseReceipt> {
    let txn = db.begin().await?;

    let listing = store::get_listing(&txn, listing_id).await?;
    let player = store::get_player(&txn, listing.player_id).await?;
    let buyer_team = store::get_team_for_user(&txn, buyer.id).await?;

    if player.team_id == buyer_team.id {
        warn!(
            "Team {} tried to buy its own player {}",
            buyer_team.id, player.id
        );
        return Err(Error::InvalidOperation {
            message: "Cannot buy your own player".to_string(),
        });
    }

    if buyer_team.budget < listing.ask {
        return Err(Error::InsufficientFunds {
            budget: buyer_team.budget,
            ask: listing.ask,
        });
    }

    let receipt = PurchaseReceipt {
        listing_id: listing.id,
        player_id: player.id,
        buyer_team_id: buyer_team.id,
        seller_team_id: player.team_id,
        price: listing.ask,
        old_market_value: player.market_value,
        new_market_value: multiplier.apply(player.market_value),
    };

    execute_transfer(&txn, &receipt, buyer_team.budget).await?;

    txn.commit()
        .await
        .map_err(|e| Error::internal("Failed to commit purchase", &e))?;

    info!(
        "Transfer {} completed: player {} moved from team {} to team {} for {} (value {} -> {})",
        receipt.listing_id,
        receipt.player_id,
        receipt.seller_team_id,
        receipt.buyer_team_id,
        receipt.price,
        receipt.old_market_value,
        receipt.new_market_value
    );
    Ok(receipt)
}

/// Applies the four writes of a purchase through `txn`.
///
/// Returns early on the first write that fails or matches no row; the caller must then
/// drop the transaction without committing.
async fn execute_transfer<C>(txn: &C, receipt: &PurchaseReceipt, buyer_budget: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let closed = Transfer::delete_many()
        .filter(transfer::Column::Id.eq(receipt.listing_id))
        .exec(txn)
        .await
        .map_err(|e| Error::internal("Failed to close listing", &e))?;
    if closed.rows_affected != 1 {
        return Err(Error::NotFound {
            entity: "transfer",
            id: receipt.listing_id,
        });
    }

    let moved = Player::update_many()
        .col_expr(player::Column::TeamId, Expr::value(receipt.buyer_team_id))
        .col_expr(
            player::Column::MarketValue,
            Expr::value(receipt.new_market_value),
        )
        .filter(player::Column::Id.eq(receipt.player_id))
        .filter(player::Column::TeamId.eq(receipt.seller_team_id))
        .exec(txn)
        .await
        .map_err(|e| Error::internal("Failed to move player", &e))?;
    if moved.rows_affected != 1 {
        return Err(Error::InternalFailure {
            message: format!(
                "Player {} changed owner during the purchase",
                receipt.player_id
            ),
        });
    }

    let debited = Team::update_many()
        .col_expr(
            team::Column::Budget,
            Expr::col(team::Column::Budget).sub(receipt.price),
        )
        .filter(team::Column::Id.eq(receipt.buyer_team_id))
        .filter(team::Column::Budget.gte(receipt.price))
        .exec(txn)
        .await
        .map_err(|e| Error::internal("Failed to debit buyer", &e))?;
    if debited.rows_affected != 1 {
        return Err(Error::InsufficientFunds {
            budget: buyer_budget,
            ask: receipt.price,
        });
    }

    let credited = Team::update_many()
        .col_expr(
            team::Column::Budget,
            Expr::col(team::Column::Budget).add(receipt.price),
        )
        .filter(team::Column::Id.eq(receipt.seller_team_id))
        .filter(team::Column::Budget.lte(i64::MAX - receipt.price))
        .exec(txn)
        .await
        .map_err(|e| Error::internal("Failed to credit seller", &e))?;
    if credited.rows_affected != 1 {
        return Err(Error::InternalFailure {
            message: format!(
                "Seller team {} is missing or its budget cannot hold another {}",
                receipt.seller_team_id, receipt.price
            ),
        });
    }

    Ok(())
}
