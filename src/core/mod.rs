/// Ownership and admin checks
pub mod access;

/// Listing filter parsed from query parameters
pub mod filter;

/// Creating, repricing, cancelling and browsing listings
pub mod listing;

/// The `TransferMarket` facade
pub mod market;

/// Atomic purchase of a listing
pub mod purchase;

/// Users, teams and squads
pub mod roster;

/// Random squad generation
pub mod squad;

/// Typed lookups shared by every operation
pub mod store;
