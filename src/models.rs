//! Plain data types exchanged with callers.
//!
//! These are projections and inputs, not tables: a [`ListingView`] is assembled from a
//! transfer row, its player and the player's team, and never written back.

use crate::entities::{PlayerModel, Position, TeamModel, TransferModel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of a listed player, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub age: i32,
    pub market_value: i64,
    pub position: Position,
}

impl PlayerSnapshot {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&PlayerModel> for PlayerSnapshot {
    fn from(player: &PlayerModel) -> Self {
        Self {
            id: player.id,
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            country: player.country.clone(),
            age: player.age,
            market_value: player.market_value,
            position: player.position,
        }
    }
}

/// An open listing together with what a buyer needs to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingView {
    /// Listing ID
    pub id: i64,
    /// Asking price
    pub ask: i64,
    pub created_at: DateTime<Utc>,
    pub player: PlayerSnapshot,
    /// Team currently owning the player
    pub team_id: i64,
    pub team_name: String,
}

impl ListingView {
    /// Assembles a view from a listing, its player and the owning team.
    #[must_use]
    pub fn new(listing: &TransferModel, player: &PlayerModel, team: &TeamModel) -> Self {
        Self {
            id: listing.id,
            ask: listing.ask,
            created_at: listing.created_at,
            player: PlayerSnapshot::from(player),
            team_id: team.id,
            team_name: team.name.clone(),
        }
    }
}

/// Outcome of a completed purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    /// The listing that was closed by the purchase
    pub listing_id: i64,
    pub player_id: i64,
    pub buyer_team_id: i64,
    pub seller_team_id: i64,
    /// Amount moved from buyer to seller
    pub price: i64,
    pub old_market_value: i64,
    pub new_market_value: i64,
}

/// Attributes of a player that is about to be created
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub age: i32,
    pub market_value: i64,
    pub position: Position,
}

/// Attributes of a team that is about to be formed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub country: String,
    pub budget: i64,
}
