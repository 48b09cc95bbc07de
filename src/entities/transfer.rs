//! Transfer entity - An open offer to sell a player at an asking price.
//!
//! A listing only exists while it is open. Cancelling it or completing a purchase
//! deletes the row; there is no archived state. `player_id` is unique, which backs
//! the one-open-listing-per-player rule at the storage level.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transfer listing database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    /// Unique identifier for the listing
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The player being offered
    #[sea_orm(unique)]
    pub player_id: i64,
    /// Asking price set by the seller
    pub ask: i64,
    /// When the listing was opened
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transfer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each listing offers one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
