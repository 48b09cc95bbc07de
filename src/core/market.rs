//! `TransferMarket` - the entry point callers hold on to.
//!
//! Bundles the database connection with the market configuration and exposes every
//! marketplace operation. Random draws (squad generation, post-transfer valuation) happen
//! here, before any storage work begins, so the engine functions stay deterministic for a
//! given input.

use crate::{
    config::market::MarketConfig,
    core::{filter::ListingFilter, listing, purchase, purchase::ValueMultiplier, roster, squad, store},
    entities::{PermissionLevel, player, team, transfer, user},
    errors::Result,
    models::{ListingView, NewPlayer, PurchaseReceipt},
};
use sea_orm::DatabaseConnection;

/// The transfer marketplace over one database
#[derive(Debug)]
pub struct TransferMarket {
    db: DatabaseConnection,
    config: MarketConfig,
}

impl TransferMarket {
    /// Creates a market over an already migrated database.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: MarketConfig) -> Self {
        Self { db, config }
    }

    /// Underlying connection, e.g. for creating tables.
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    #[must_use]
    pub const fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// See [`listing::create_listing`].
    pub async fn create_listing(
        &self,
        player_id: i64,
        ask: i64,
        requester: &user::Model,
    ) -> Result<transfer::Model> {
        listing::create_listing(&self.db, player_id, ask, requester).await
    }

    /// See [`listing::update_listing`].
    pub async fn update_listing(
        &self,
        listing_id: i64,
        new_ask: i64,
        requester: &user::Model,
    ) -> Result<transfer::Model> {
        listing::update_listing(&self.db, listing_id, new_ask, requester).await
    }

    /// See [`listing::delete_listing`].
    pub async fn delete_listing(&self, listing_id: i64, requester: &user::Model) -> Result<()> {
        listing::delete_listing(&self.db, listing_id, requester).await
    }

    /// A single listing with its player snapshot.
    pub async fn get_listing(&self, listing_id: i64) -> Result<ListingView> {
        listing::get_listing(&self.db, listing_id).await
    }

    /// Every open listing matching `filter`, in listing order.
    pub async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<ListingView>> {
        listing::list_listings(&self.db, filter).await
    }

    /// Buys a listing for the buyer's team, revaluing the player with a freshly drawn
    /// multiplier. See [`purchase::buy_listing`].
    pub async fn buy_listing(
        &self,
        listing_id: i64,
        buyer: &user::Model,
    ) -> Result<PurchaseReceipt> {
        let multiplier = {
            let mut rng = rand::rng();
            ValueMultiplier::draw(&self.config.valuation, &mut rng)
        };
        purchase::buy_listing(&self.db, listing_id, buyer, multiplier).await
    }

    /// Registers a user with a freshly generated team and squad.
    pub async fn register_user(
        &self,
        email: &str,
        password_hash: Vec<u8>,
        permission_level: PermissionLevel,
    ) -> Result<(user::Model, team::Model)> {
        let (new_team, players) = {
            let mut rng = rand::rng();
            squad::generate_squad(&mut rng, &self.config)
        };
        roster::register_user(
            &self.db,
            email,
            password_hash,
            permission_level,
            new_team,
            players,
        )
        .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        roster::delete_user(&self.db, user_id).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<user::Model> {
        store::get_user(&self.db, user_id).await
    }

    pub async fn get_team_for_user(&self, user_id: i64) -> Result<team::Model> {
        store::get_team_for_user(&self.db, user_id).await
    }

    pub async fn get_player(&self, player_id: i64) -> Result<player::Model> {
        store::get_player(&self.db, player_id).await
    }

    /// Roster of an existing team.
    pub async fn players_for_team(&self, team_id: i64) -> Result<Vec<player::Model>> {
        store::get_team(&self.db, team_id).await?;
        store::players_for_team(&self.db, team_id).await
    }

    pub async fn team_market_value(&self, team_id: i64) -> Result<i64> {
        roster::team_market_value(&self.db, team_id).await
    }

    pub async fn create_player_on_team(
        &self,
        team_id: i64,
        new_player: NewPlayer,
        requester: &user::Model,
    ) -> Result<player::Model> {
        roster::create_player_on_team(&self.db, team_id, new_player, requester).await
    }

    pub async fn delete_player(&self, player_id: i64, requester: &user::Model) -> Result<()> {
        roster::delete_player(&self.db, player_id, requester).await
    }
}
