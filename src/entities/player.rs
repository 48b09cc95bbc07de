//! Player entity - A footballer owned by exactly one team.
//!
//! Ownership is the `team_id` back-reference; reassigning it *is* the transfer.
//! `market_value` is the player's valuation and is bumped on every completed purchase.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Playing position, stored as its numeric identifier
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[sea_orm(num_value = 0)]
    Goalkeeper,
    #[sea_orm(num_value = 1)]
    Defender,
    #[sea_orm(num_value = 2)]
    Midfielder,
    #[sea_orm(num_value = 3)]
    Attacker,
}

/// Player database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Unique identifier for the player
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub age: i32,
    /// Current valuation, distinct from any asking price
    pub market_value: i64,
    pub position: Position,
    /// ID of the owning team
    pub team_id: i64,
}

impl Model {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each player belongs to one team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
    /// A player has at most one open transfer listing
    #[sea_orm(has_one = "super::transfer::Entity")]
    Transfer,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::transfer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
