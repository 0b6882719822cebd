//! Data models for teamdex records.
//!
//! - `CatalogEntry`, `EntityKind`: cached creatures and items
//! - `FavoriteEntry`: favorited snapshots
//! - `RosterMember`: customized team members
//! - `BattleRequest`: payload for the battle-evaluation service
//! - `CatalogSyncState`: resumable sync checkpoint

pub mod battle;
pub mod catalog;
pub mod favorite;
pub mod roster;
pub mod stats;
pub mod sync;

pub use battle::{Algorithm, BattleMember, BattleRequest, BossTrainer};
pub use catalog::{
    CatalogEntry, CatalogKind, CreaturePageResponse, CreaturePayload, EntityKind, ItemCategory,
    ItemPageResponse, ItemPayload, RemoteCreature, RemoteItem, Sprites,
};
pub use favorite::FavoriteEntry;
pub use roster::{MemberState, RosterMember, MAX_DV, MAX_LEVEL, MIN_LEVEL, MOVE_SLOTS};
pub use stats::{Stat, StatBlock};
pub use sync::CatalogSyncState;
