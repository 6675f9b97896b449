mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use common::{Fault, FaultyStore, account, account_with_rabbits, harness, harness_with_store, noon};
use economy_core::{
    AccountId, ActionError, ActionKind, ActionOutcome, ActionParams, ActionRequest, CreatureRef,
    EconomyError, FoodKind, ItemKey, Rarity, Target, TargetError, UpdateRejection,
};
use economy_runtime::{
    Economy, HookContext, HookError, InMemoryAccountStore, ManualClock, PostCommitHook,
    ResolveError, StoreError,
};

fn request(id: &str, params: ActionParams) -> ActionRequest {
    ActionRequest::new(AccountId::new(id), params)
}

#[tokio::test]
async fn battle_costing_more_than_the_balance_is_rejected() {
    let mut poor = account_with_rabbits("p1", 1);
    poor.balance = 100;
    let h = harness([poor.clone()]);

    let err = h
        .economy
        .resolve(request("p1", ActionParams::Battle { opponent: None }))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Action(ActionError::InsufficientFunds {
            required: 150,
            available: 100,
        })
    );
    let stored = h.economy.account(&poor.id).await.unwrap().unwrap();
    assert_eq!(stored, poor);
}

#[tokio::test]
async fn feeding_seven_hours_after_the_last_feed_waits_an_hour() {
    let mut fed = account_with_rabbits("p1", 1);
    fed.last_action_at
        .insert(ActionKind::Feed, noon() - TimeDelta::hours(7));
    let h = harness([fed]);

    let err = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::Feed {
                food: FoodKind::Basic,
            },
        ))
        .await
        .unwrap_err();
    let ResolveError::Action(ActionError::OnCooldown { kind, remaining }) = err else {
        panic!("expected a cooldown, got {err:?}");
    };
    assert_eq!(kind, ActionKind::Feed);
    assert_eq!(remaining, Duration::from_secs(60 * 60));
}

#[tokio::test]
async fn cooldown_ends_exactly_at_the_boundary() {
    let h = harness([account("p1")]);

    h.economy
        .resolve(request("p1", ActionParams::Hunt))
        .await
        .unwrap();

    h.clock.advance(TimeDelta::seconds(20) - TimeDelta::milliseconds(1));
    let early = h.economy.resolve(request("p1", ActionParams::Hunt)).await;
    assert!(matches!(
        early,
        Err(ResolveError::Action(ActionError::OnCooldown { .. }))
    ));

    h.clock.advance(TimeDelta::milliseconds(1));
    assert!(
        h.economy
            .resolve(request("p1", ActionParams::Hunt))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn only_open_actions_enroll_new_accounts() {
    let h = harness([]);

    let err = h
        .economy
        .resolve(request("newcomer", ActionParams::Play))
        .await
        .unwrap_err();
    assert_eq!(err, ResolveError::AccountNotFound(AccountId::new("newcomer")));
    assert!(
        h.economy
            .account(&AccountId::new("newcomer"))
            .await
            .unwrap()
            .is_none()
    );

    let hunt = h
        .economy
        .resolve(request("newcomer", ActionParams::Hunt))
        .await
        .unwrap();
    assert_eq!(hunt.cost, 100);
    let ActionOutcome::Hunt(outcome) = &hunt.outcome else {
        panic!("expected a hunt outcome");
    };

    let stored = h
        .economy
        .account(&AccountId::new("newcomer"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.balance, hunt.new_balance);
    assert_eq!(
        stored
            .inventory
            .count(&ItemKey::Creature(outcome.creature.clone())),
        1
    );
}

#[tokio::test]
async fn losing_a_bet_is_a_successful_result() {
    let h = harness([account("p1")]);
    let mut balance = 1_000u64;
    let mut losses = 0;

    for _ in 0..20 {
        let result = h
            .economy
            .resolve(request(
                "p1",
                ActionParams::Dice {
                    bet: Some(50),
                    prediction: 12,
                },
            ))
            .await
            .unwrap();
        let ActionOutcome::Dice(dice) = result.outcome else {
            panic!("expected a dice outcome");
        };
        if dice.total() != 12 {
            losses += 1;
            assert_eq!(result.reward, 0);
        }
        balance = balance - 50 + result.reward + result.level_up_reward;
        assert_eq!(result.new_balance, balance);
        h.clock.advance(TimeDelta::seconds(1));
    }
    assert!(losses > 0);
}

#[tokio::test]
async fn balance_is_conserved_across_actions() {
    let h = harness([account("p1")]);
    let mut expected = 1_000i64;

    for round in 0..30 {
        let params = match round % 3 {
            0 => ActionParams::Hunt,
            1 => ActionParams::Dice {
                bet: Some(40),
                prediction: 7,
            },
            _ => ActionParams::Wheel { bet: Some(60) },
        };
        match h.economy.resolve(request("p1", params)).await {
            Ok(result) => {
                expected += result.net() + i64::try_from(result.level_up_reward).unwrap();
                assert_eq!(i64::try_from(result.new_balance).unwrap(), expected);
            }
            Err(ResolveError::Action(ActionError::InsufficientFunds { .. })) => {}
            Err(other) => panic!("unexpected failure: {other:?}"),
        }
        h.clock.advance(TimeDelta::seconds(21));
    }

    let stored = h
        .economy
        .account(&AccountId::new("p1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(i64::try_from(stored.balance).unwrap(), expected);
}

#[tokio::test]
async fn gifts_move_creatures_to_a_provisioned_receiver() {
    let h = harness([account_with_rabbits("p1", 3)]);
    let rabbit = CreatureRef::new(Rarity::Common, "rabbit");

    let to_self = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::Give {
                target: Target::player("p1"),
                creature: rabbit.clone(),
                amount: 1,
            },
        ))
        .await;
    assert_eq!(
        to_self,
        Err(ResolveError::Action(ActionError::InvalidTarget(
            TargetError::SelfTarget
        )))
    );

    h.economy
        .resolve(request(
            "p1",
            ActionParams::Give {
                target: Target::player("friend"),
                creature: rabbit.clone(),
                amount: 2,
            },
        ))
        .await
        .unwrap();

    let item = ItemKey::Creature(rabbit);
    let giver = h.economy.account(&AccountId::new("p1")).await.unwrap().unwrap();
    let receiver = h
        .economy
        .account(&AccountId::new("friend"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(giver.inventory.count(&item), 1);
    assert_eq!(receiver.inventory.count(&item), 2);
    assert_eq!(receiver.balance, 1_000);
}

#[tokio::test]
async fn selling_and_lootboxes_need_inventory() {
    let mut owner = account_with_rabbits("p1", 4);
    owner.inventory.add(ItemKey::Lootbox, 2).unwrap();
    let h = harness([owner]);

    let sale = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::Sell {
                rarity: Rarity::Common,
                amount: None,
            },
        ))
        .await
        .unwrap();
    // Rabbits are worth 5 in the shipped catalog.
    assert_eq!(sale.reward, 20);
    assert_eq!(sale.xp_gained, 2);

    let again = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::Sell {
                rarity: Rarity::Common,
                amount: None,
            },
        ))
        .await;
    assert!(matches!(
        again,
        Err(ResolveError::Action(ActionError::InsufficientInventory { .. }))
    ));

    let opened = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::OpenLootbox {
                fabled: false,
                count: economy_core::OpenCount::All,
            },
        ))
        .await
        .unwrap();
    assert!(opened.reward >= 2 * 50);
    let stored = h.economy.account(&AccountId::new("p1")).await.unwrap().unwrap();
    assert_eq!(stored.inventory.count(&ItemKey::Lootbox), 0);
}

#[tokio::test]
async fn failed_gift_delivery_refunds_the_giver() {
    let store = InMemoryAccountStore::with_accounts([account_with_rabbits("p1", 3)]);
    let h = harness_with_store(Arc::new(FaultyStore::new(
        store,
        Fault::Unavailable(AccountId::new("friend")),
    )));
    let rabbit = CreatureRef::new(Rarity::Common, "rabbit");

    let err = h
        .economy
        .resolve(request(
            "p1",
            ActionParams::Give {
                target: Target::player("friend"),
                creature: rabbit.clone(),
                amount: 2,
            },
        ))
        .await
        .unwrap_err();
    let ResolveError::TransferFailed { to, source } = err else {
        panic!("expected a failed transfer, got {err:?}");
    };
    assert_eq!(to, AccountId::new("friend"));
    assert!(matches!(source, StoreError::Unavailable(_)));

    let item = ItemKey::Creature(rabbit);
    let giver = h.economy.account(&AccountId::new("p1")).await.unwrap().unwrap();
    assert_eq!(giver.inventory.count(&item), 3);
    let receiver = h
        .economy
        .account(&AccountId::new("friend"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(receiver.inventory.count(&item), 0);
}

#[tokio::test]
async fn side_effect_failures_keep_the_committed_action() {
    let store = InMemoryAccountStore::with_accounts([account("p1")]);
    // Only the action's own update gets through; progression and quests fail.
    let h = harness_with_store(Arc::new(FaultyStore::new(store, Fault::AfterUpdates(1))));

    let result = h
        .economy
        .resolve(request("p1", ActionParams::Hunt))
        .await
        .unwrap();
    assert!(result.xp_gained > 0);
    assert!(!result.leveled_up);

    let stored = h.economy.account(&AccountId::new("p1")).await.unwrap().unwrap();
    assert_eq!(stored.balance, 1_000 - result.cost + result.reward);
    assert_eq!(result.new_balance, stored.balance);
    assert_eq!(stored.experience, 0);
    assert_eq!(stored.last_action(ActionKind::Hunt), Some(noon()));
}

struct BrokenHook {
    runs: AtomicUsize,
}

#[async_trait]
impl PostCommitHook for BrokenHook {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn should_trigger(&self, _ctx: &HookContext<'_>) -> bool {
        true
    }

    async fn run(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Err(HookError::Other("hook exploded".to_string()))
    }
}

#[tokio::test]
async fn failing_hooks_do_not_change_the_result() {
    common::init_tracing();
    let hook = Arc::new(BrokenHook {
        runs: AtomicUsize::new(0),
    });
    let economy = Economy::builder()
        .store(Arc::new(InMemoryAccountStore::with_accounts([account("p1")])))
        .clock(Arc::new(ManualClock::new(noon())))
        .rng_seed(7)
        .add_hook(hook.clone())
        .build()
        .unwrap();

    let result = economy
        .resolve(request("p1", ActionParams::Wheel { bet: Some(100) }))
        .await
        .unwrap();
    assert_eq!(hook.runs.load(Ordering::SeqCst), 1);

    let stored = economy.account(&AccountId::new("p1")).await.unwrap().unwrap();
    assert_eq!(stored.balance, result.new_balance);
    assert_eq!(stored.last_action(ActionKind::Wheel), Some(noon()));
}

#[tokio::test]
async fn broken_updates_are_not_reported_as_races() {
    let store = InMemoryAccountStore::with_accounts([account("p1")]);
    let h = harness_with_store(Arc::new(FaultyStore::new(
        store,
        Fault::Reject(UpdateRejection::InvariantViolated("balance overflow")),
    )));

    let err = h
        .economy
        .resolve(request("p1", ActionParams::Hunt))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Rejected {
            kind: ActionKind::Hunt,
            ..
        }
    ));
    assert!(!err.is_retryable());
}
