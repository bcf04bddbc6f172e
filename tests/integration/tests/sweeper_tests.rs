//! Expiry sweeper scenarios
//!
//! Run with: cargo test -p integration-tests --test sweeper_tests

use chrono::{Duration, Utc};
use integration_tests::{harness, PlatformCall, ALICE, BOB, CAROL, GUILD, MOD};
use warden_core::{DivorceRequest, MuteRecord, Proposal};
use warden_service::{MuteSweeper, RequestSweeper};

// ============================================================================
// Mute expiry
// ============================================================================

#[tokio::test]
async fn expired_mute_is_released_and_removed_in_one_sweep() {
    let h = harness();
    let muted_at = Utc::now() - Duration::minutes(61);
    let record = MuteRecord::new(GUILD, "spam".into(), 60, MOD, muted_at);
    h.ctx.mute_store().put(ALICE, &record).await.unwrap();

    // ALICE is still present and still restricted platform-side
    h.platform
        .add_member(ALICE, Some(Utc::now() + Duration::minutes(5)))
        .await;

    let released = MuteSweeper::new(h.ctx.clone())
        .sweep_once(Utc::now())
        .await
        .unwrap();

    assert_eq!(released, 1);
    assert!(h.ctx.mute_store().get(ALICE).await.unwrap().is_none());
    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::ClearTimeout { member } if *member == ALICE))
            .await,
        1
    );
    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::Dm { member, .. } if *member == ALICE))
            .await,
        1
    );
}

#[tokio::test]
async fn expired_mute_is_removed_even_when_lookup_fails() {
    let h = harness();
    let muted_at = Utc::now() - Duration::minutes(61);
    let record = MuteRecord::new(GUILD, "spam".into(), 60, MOD, muted_at);
    h.ctx.mute_store().put(ALICE, &record).await.unwrap();
    h.platform.fail_lookups();

    let released = MuteSweeper::new(h.ctx.clone())
        .sweep_once(Utc::now())
        .await
        .unwrap();

    // The record must not be retried forever
    assert_eq!(released, 1);
    assert!(h.ctx.mute_store().get(ALICE).await.unwrap().is_none());
}

#[tokio::test]
async fn expired_mute_is_removed_when_the_member_left() {
    let h = harness();
    let muted_at = Utc::now() - Duration::minutes(61);
    let record = MuteRecord::new(GUILD, "spam".into(), 60, MOD, muted_at);
    h.ctx.mute_store().put(ALICE, &record).await.unwrap();
    // No add_member: the lookup returns absent

    let released = MuteSweeper::new(h.ctx.clone())
        .sweep_once(Utc::now())
        .await
        .unwrap();

    assert_eq!(released, 1);
    assert!(h.ctx.mute_store().get(ALICE).await.unwrap().is_none());
    // Nothing to notify or lift for an absent member
    assert!(h.platform.calls().await.is_empty());
}

#[tokio::test]
async fn unexpired_mute_is_left_alone() {
    let h = harness();
    let record = MuteRecord::new(GUILD, "spam".into(), 60, MOD, Utc::now());
    h.ctx.mute_store().put(ALICE, &record).await.unwrap();

    let released = MuteSweeper::new(h.ctx.clone())
        .sweep_once(Utc::now())
        .await
        .unwrap();

    assert_eq!(released, 0);
    assert!(h.ctx.mute_store().get(ALICE).await.unwrap().is_some());
}

// ============================================================================
// Proposal and divorce request expiry
// ============================================================================

#[tokio::test]
async fn stale_requests_are_reaped_and_fresh_ones_kept() {
    let h = harness();
    let now = Utc::now();

    let stale = Proposal::new(ALICE, BOB, GUILD, now - Duration::minutes(31));
    let fresh = Proposal::new(BOB, CAROL, GUILD, now - Duration::minutes(5));
    h.ctx.proposal_store().put(&stale).await.unwrap();
    h.ctx.proposal_store().put(&fresh).await.unwrap();

    let stale_divorce = DivorceRequest::new(ALICE, BOB, GUILD, now - Duration::minutes(45));
    h.ctx.divorce_store().put(&stale_divorce).await.unwrap();

    let reaped = RequestSweeper::new(h.ctx.clone())
        .sweep_once(now)
        .await
        .unwrap();

    assert_eq!(reaped, 2);
    assert!(h.ctx.proposal_store().get(&stale.id()).await.unwrap().is_none());
    assert!(h.ctx.proposal_store().get(&fresh.id()).await.unwrap().is_some());
    assert!(h
        .ctx
        .divorce_store()
        .get(&stale_divorce.id())
        .await
        .unwrap()
        .is_none());

    // Expiry owes no notification
    assert!(h.platform.calls().await.is_empty());
}

#[tokio::test]
async fn sweep_after_timeout_makes_the_proposal_unanswerable() {
    let h = harness();
    let now = Utc::now();

    let proposal = Proposal::new(ALICE, BOB, GUILD, now - Duration::minutes(31));
    h.ctx.proposal_store().put(&proposal).await.unwrap();

    RequestSweeper::new(h.ctx.clone())
        .sweep_once(now)
        .await
        .unwrap();

    let err = warden_service::RelationshipService::new(&h.ctx)
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        warden_service::ServiceError::Domain(warden_core::DomainError::ProposalNotFound)
    ));
    // No marriage came out of the dead proposal
    assert!(h
        .ctx
        .marriage_store()
        .get(ALICE)
        .await
        .unwrap()
        .is_none());
}
