//! User entity - An account that owns exactly one team.
//!
//! Credentials are stored as an opaque hash produced by the authentication layer;
//! this crate never inspects them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access level of a user
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PermissionLevel {
    /// Can only manage their own team
    #[sea_orm(num_value = 0)]
    Regular,
    /// Can act on behalf of any team
    #[sea_orm(num_value = 1)]
    Admin,
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across users
    #[sea_orm(unique)]
    pub email: String,
    /// Password hash as produced by the authentication collaborator
    #[serde(skip_serializing)]
    pub password_hash: Vec<u8>,
    /// Regular user or admin
    pub permission_level: PermissionLevel,
}

impl Model {
    /// Admins may manage listings and players of any team.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.permission_level == PermissionLevel::Admin
    }
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns one team
    #[sea_orm(has_one = "super::team::Entity")]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
