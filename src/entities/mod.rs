//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod player;
pub mod team;
pub mod transfer;
pub mod user;

// Re-export specific types to avoid conflicts
pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel, Position};
pub use team::{Column as TeamColumn, Entity as Team, Model as TeamModel};
pub use transfer::{Column as TransferColumn, Entity as Transfer, Model as TransferModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, PermissionLevel};
