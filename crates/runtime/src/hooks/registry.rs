//! Hook registry for managing and executing post-commit hooks.

use std::sync::Arc;

use tracing::{debug, error};

use super::{HookContext, HookCriticality, HookError, PostCommitHook};

/// Ordered set of post-commit hooks.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn PostCommitHook>>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn PostCommitHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        Self { hooks }
    }

    pub fn with(mut self, hook: Arc<dyn PostCommitHook>) -> Self {
        self.hooks.push(hook);
        self.hooks.sort_by_key(|hook| hook.priority());
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns hook names and priorities in execution order (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|hook| (hook.name(), hook.priority()))
    }

    /// Runs every triggered hook. Failures are logged, never returned.
    pub async fn execute_hooks(&self, ctx: &HookContext<'_>) {
        for hook in &self.hooks {
            if !hook.should_trigger(ctx) {
                continue;
            }
            if let Err(e) = hook.run(ctx).await {
                Self::report(hook.as_ref(), ctx, &e);
            }
        }
    }

    fn report(hook: &dyn PostCommitHook, ctx: &HookContext<'_>, error: &HookError) {
        match hook.criticality() {
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                account = %ctx.request.account_id,
                action = %ctx.plan.kind,
                error = ?error,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                account = %ctx.request.account_id,
                action = %ctx.plan.kind,
                error = ?error,
                "Optional hook failed"
            ),
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|hook| hook.name()))
            .finish()
    }
}
