//! Per-request random number generators.

use chrono::{DateTime, Utc};
use economy_core::{ActionKind, AccountId, account_fingerprint, compute_seed};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Chooses between entropy and a deterministic seed for each request.
#[derive(Clone, Copy, Debug, Default)]
pub struct RngSource {
    base_seed: Option<u64>,
}

impl RngSource {
    /// Context tag for quest draws; action kinds use their codes.
    const QUEST_CONTEXT: u32 = 0x5155;

    pub fn entropy() -> Self {
        Self { base_seed: None }
    }

    pub fn seeded(base_seed: u64) -> Self {
        Self {
            base_seed: Some(base_seed),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        self.base_seed.is_some()
    }

    /// Generator for one action. With a base seed the stream depends only on the
    /// seed, the request time, the account and the action kind.
    pub fn for_action(&self, account: &AccountId, kind: ActionKind, now: DateTime<Utc>) -> StdRng {
        self.derive(account, kind.code(), now)
    }

    /// Generator for quest board regeneration.
    pub fn for_quests(&self, account: &AccountId, now: DateTime<Utc>) -> StdRng {
        self.derive(account, Self::QUEST_CONTEXT, now)
    }

    fn derive(&self, account: &AccountId, context: u32, now: DateTime<Utc>) -> StdRng {
        match self.base_seed {
            Some(base) => {
                let nonce = u64::try_from(now.timestamp_millis()).unwrap_or_default();
                StdRng::seed_from_u64(compute_seed(
                    base,
                    nonce,
                    account_fingerprint(account),
                    context,
                ))
            }
            None => StdRng::from_entropy(),
        }
    }
}
