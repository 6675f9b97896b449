//! Pure rules of the creature economy.
//!
//! `economy-core` defines the account model, the conditional update primitive,
//! the probability engine, quest periods and the level curve. It performs no
//! I/O: every rule reads an account snapshot and describes its effect as a
//! [`update::Predicate`] and [`update::Mutation`] that a store applies
//! atomically. The runtime crate wires these rules to storage and time.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod probability;
pub mod progression;
pub mod quest;
pub mod state;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    ActionError, ActionKind, ActionOutcome, ActionParams, ActionPlan, ActionRequest, OpenCount,
    PlanContext, Target, TargetError, plan,
};
pub use config::{AmountRange, CooldownConfig, EconomyConfig, LevelDiscount};
pub use env::{
    CreatureDefinition, CreatureOracle, Env, FoodKind, OracleError, QuestOracle, RewardTables,
    TablesOracle, account_fingerprint, compute_seed,
};
pub use error::{EconomyError, ErrorSeverity};
pub use progression::{LevelChange, LevelCurve};
pub use quest::{QuestRefresh, QuestTemplate, ensure_current_period, plan_refresh};
pub use state::{
    Account, AccountDefaults, AccountId, ClaimError, CreatureRef, Inventory, ItemKey, Quest,
    QuestId, QuestKind, QuestPeriod, QuestReward, Rarity,
};
pub use update::{
    Change, Condition, ConditionalUpdate, Mutation, MutationError, Predicate, UpdateRejection,
};
