//! Team entity - A user's squad and its spendable budget.
//!
//! The owning user is a back-reference (`user_id`), unique so that every user has at
//! most one team. The budget is debited on purchase and credited on sale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Unique identifier for the team
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the team
    pub name: String,
    /// Country the team plays in
    pub country: String,
    /// Spendable balance
    pub budget: i64,
    /// ID of the owning user
    #[sea_orm(unique)]
    pub user_id: i64,
}

/// Defines relationships between Team and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each team belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One team has many players
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
