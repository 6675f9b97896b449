mod common;

use chrono::TimeDelta;
use common::{account, harness};
use economy_core::{
    AccountId, ActionParams, ActionRequest, Change, ClaimError, Mutation, Predicate, QuestId,
    QuestKind,
};
use economy_runtime::{Clock, QuestError, UpdateOutcome};

fn p1() -> AccountId {
    AccountId::new("p1")
}

#[tokio::test]
async fn boards_are_generated_once_per_period() {
    let h = harness([account("p1")]);

    let first = h.economy.get_quests(&p1()).await.unwrap();
    assert_eq!(first.daily.len(), 3);
    assert_eq!(first.weekly.len(), 2);
    assert!(first.daily[0].id.as_str().starts_with("daily:"));
    assert!(first.daily[0].id.as_str().ends_with(":2026-10-16"));
    assert!(first.weekly[0].id.as_str().ends_with(":2026-W42"));

    h.clock.advance(TimeDelta::hours(6));
    assert_eq!(h.economy.get_quests(&p1()).await.unwrap(), first);

    // Friday to Saturday stays in the same week.
    h.clock.advance(TimeDelta::days(1));
    let next_day = h.economy.get_quests(&p1()).await.unwrap();
    assert!(next_day.daily[0].id.as_str().ends_with(":2026-10-17"));
    assert_eq!(next_day.weekly, first.weekly);
}

#[tokio::test]
async fn hunting_advances_hunt_quests_only() {
    let h = harness([account("p1")]);

    for _ in 0..3 {
        h.economy
            .resolve(ActionRequest::new(p1(), ActionParams::Hunt))
            .await
            .unwrap();
        h.clock.advance(TimeDelta::seconds(20));
    }

    let quests = h.economy.get_quests(&p1()).await.unwrap();
    for quest in quests.iter() {
        if quest.kind == QuestKind::Hunt {
            assert_eq!(quest.progress, 3.min(quest.target));
        } else {
            assert_eq!(quest.progress, 0);
        }
    }
}

#[tokio::test]
async fn completed_quests_pay_once() {
    let h = harness([account("p1")]);
    let quests = h.economy.get_quests(&p1()).await.unwrap();
    let quest = quests.daily[0].clone();

    let early = h.economy.claim_quest(&p1(), &quest.id).await;
    assert_eq!(
        early,
        Err(QuestError::Claim(ClaimError::NotCompleted(quest.id.clone())))
    );

    let finish = Mutation::new().with(Change::AdvanceQuests {
        kind: quest.kind,
        amount: quest.target,
        now: h.clock.now(),
    });
    let outcome = h
        .store
        .conditional_update(&p1(), &Predicate::always(), &finish)
        .await
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Applied(_)));

    let claim = h.economy.claim_quest(&p1(), &quest.id).await.unwrap();
    assert_eq!(claim.reward, quest.reward);
    let stored = h.economy.account(&p1()).await.unwrap().unwrap();
    assert_eq!(stored.balance, claim.new_balance);
    assert!(stored.balance >= 1_000 + quest.reward.currency);
    assert_eq!(stored.experience, quest.reward.xp);

    let twice = h.economy.claim_quest(&p1(), &quest.id).await;
    assert_eq!(
        twice,
        Err(QuestError::Claim(ClaimError::AlreadyClaimed(quest.id.clone())))
    );

    let unknown = QuestId::new("daily:nothing:2026-10-16");
    assert_eq!(
        h.economy.claim_quest(&p1(), &unknown).await,
        Err(QuestError::Claim(ClaimError::NotFound(unknown.clone())))
    );
}

#[tokio::test]
async fn completed_quests_expire_with_their_period() {
    let h = harness([account("p1")]);
    let quests = h.economy.get_quests(&p1()).await.unwrap();
    let quest = quests.daily[0].clone();

    let finish = Mutation::new().with(Change::AdvanceQuests {
        kind: quest.kind,
        amount: quest.target,
        now: h.clock.now(),
    });
    h.store
        .conditional_update(&p1(), &Predicate::always(), &finish)
        .await
        .unwrap();

    // Nothing regenerates the board while the clock moves on.
    h.clock.advance(TimeDelta::days(3));
    let late = h.economy.claim_quest(&p1(), &quest.id).await;
    assert_eq!(
        late,
        Err(QuestError::Claim(ClaimError::NotFound(quest.id.clone())))
    );

    let stored = h.economy.account(&p1()).await.unwrap().unwrap();
    assert_eq!(stored.balance, 1_000);
    assert_eq!(stored.experience, 0);
    assert!(!stored.find_quest(&quest.id).unwrap().claimed);
}

#[tokio::test]
async fn quests_of_unknown_accounts_are_not_created() {
    let h = harness([]);
    assert_eq!(
        h.economy.get_quests(&p1()).await,
        Err(QuestError::AccountNotFound(p1()))
    );
}
