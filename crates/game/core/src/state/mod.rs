//! Account state types.
//!
//! Everything persisted per player lives under [`Account`]. The store owns
//! instances; the rules in this crate only read snapshots and describe changes
//! through [`crate::update::Mutation`].
mod account;
mod inventory;
mod item;
mod quest;
mod records;

pub use account::{Account, AccountDefaults, AccountId};
pub use inventory::{Inventory, InventoryEntry, InventoryError};
pub use item::{CreatureRef, ItemKey, Rarity};
pub use quest::{
    ClaimError, DailyBoard, Difficulty, Quest, QuestBoard, QuestId, QuestKind, QuestPeriod,
    QuestReward, WeeklyBoard,
};
pub use records::{BattleRecord, GiftLedger, PetCare};
