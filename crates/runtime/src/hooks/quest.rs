//! Quest progress after a committed action.

use std::sync::Arc;

use async_trait::async_trait;

use super::{HookContext, HookError, PostCommitHook};
use crate::quests::QuestTracker;

/// Advances the live quests matching the action's quest kind.
///
/// Boards from an earlier period are regenerated first so the action counts
/// toward today's quests.
pub struct QuestProgressHook {
    tracker: Arc<QuestTracker>,
}

impl QuestProgressHook {
    pub fn new(tracker: Arc<QuestTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl PostCommitHook for QuestProgressHook {
    fn name(&self) -> &'static str {
        "quest_progress"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.plan.quest_progress.is_some()
    }

    async fn run(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let Some((kind, amount)) = ctx.plan.quest_progress else {
            return Ok(());
        };
        let id = &ctx.request.account_id;
        self.tracker.ensure_current_period(id, ctx.now).await?;
        self.tracker.advance(id, kind, amount, ctx.now).await?;
        Ok(())
    }
}
