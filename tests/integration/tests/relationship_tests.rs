//! Relationship workflow scenarios
//!
//! Run with: cargo test -p integration-tests --test relationship_tests

use chrono::Utc;
use integration_tests::{harness, harness_with, ALICE, BOB, CAROL, GUILD};
use warden_common::DivorcePolicy;
use warden_core::{DomainError, Thresholds};
use warden_service::{DivorceOutcome, RelationshipService, ServiceError};

fn mutual() -> integration_tests::Harness {
    harness_with(Thresholds::default(), DivorcePolicy::Mutual)
}

// ============================================================================
// Proposals
// ============================================================================

#[tokio::test]
async fn propose_then_accept_creates_a_symmetric_marriage() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let alice = relationships.marriage_status(ALICE).await.unwrap().unwrap();
    let bob = relationships.marriage_status(BOB).await.unwrap().unwrap();
    assert_eq!(alice.spouse, BOB);
    assert_eq!(bob.spouse, ALICE);

    // The proposal record is gone
    assert!(h
        .ctx
        .proposal_store()
        .get(&proposal.id())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn reject_drops_the_proposal_without_a_marriage() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .reject_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    assert!(h
        .ctx
        .proposal_store()
        .get(&proposal.id())
        .await
        .unwrap()
        .is_none());
    assert!(relationships.marriage_status(ALICE).await.unwrap().is_none());
    assert!(relationships.marriage_status(BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn self_proposal_is_rejected_without_a_record() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let err = relationships.propose(ALICE, ALICE, GUILD).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::SelfTarget)));
    assert!(h.ctx.proposal_store().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn double_proposal_conflicts_and_leaves_state_untouched() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    let before = h.ctx.proposal_store().all().await.unwrap();

    let err = relationships.propose(ALICE, CAROL, GUILD).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ProposalConflict)
    ));

    // State after is identical to after the first call alone
    let after = h.ctx.proposal_store().all().await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn a_pending_target_cannot_propose_elsewhere() {
    // The strict guard: BOB is only the target of ALICE's proposal, but
    // that still blocks BOB from proposing to CAROL.
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    let err = relationships.propose(BOB, CAROL, GUILD).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ProposalConflict)
    ));
}

#[tokio::test]
async fn married_members_cannot_propose_or_be_proposed_to() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let err = relationships.propose(ALICE, CAROL, GUILD).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyMarried(a)) if a == ALICE
    ));

    let err = relationships.propose(CAROL, BOB, GUILD).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyMarried(b)) if b == BOB
    ));
}

#[tokio::test]
async fn only_the_target_may_respond() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();

    let err = relationships
        .accept_proposal(CAROL, &proposal.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotAddressee)
    ));

    let err = relationships
        .reject_proposal(ALICE, &proposal.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotAddressee)
    ));

    // The proposal survived both bad attempts
    assert!(h
        .ctx
        .proposal_store()
        .get(&proposal.id())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn acceptance_revalidates_that_both_parties_are_single() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();

    // ALICE marries CAROL while the proposal sits pending
    h.ctx
        .marriage_store()
        .link_pair(ALICE, CAROL, Utc::now())
        .await
        .unwrap();

    let err = relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ProposalInvalidated)
    ));

    // The stale proposal was discarded, and BOB stayed single
    assert!(h
        .ctx
        .proposal_store()
        .get(&proposal.id())
        .await
        .unwrap()
        .is_none());
    assert!(relationships.marriage_status(BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn double_accept_resolves_to_not_found() {
    // A double click (or a race against the sweeper) surfaces as the
    // idempotent "gone" outcome, not a crash.
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let err = relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ProposalNotFound)
    ));
}

// ============================================================================
// Divorce - unilateral policy
// ============================================================================

#[tokio::test]
async fn unilateral_divorce_clears_both_links_immediately() {
    let h = harness();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let outcome = relationships.divorce(ALICE, GUILD).await.unwrap();
    assert!(matches!(
        outcome,
        DivorceOutcome::Completed { ex_spouse } if ex_spouse == BOB
    ));

    assert!(relationships.marriage_status(ALICE).await.unwrap().is_none());
    assert!(relationships.marriage_status(BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn divorce_without_a_marriage_fails() {
    let h = harness();
    let err = RelationshipService::new(&h.ctx)
        .divorce(ALICE, GUILD)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotMarried(a)) if a == ALICE
    ));
}

// ============================================================================
// Divorce - mutual-consent policy
// ============================================================================

#[tokio::test]
async fn mutual_divorce_waits_for_the_spouse() {
    let h = mutual();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let outcome = relationships.divorce(ALICE, GUILD).await.unwrap();
    let request = match outcome {
        DivorceOutcome::Pending(request) => request,
        other => panic!("expected a pending request, got {other:?}"),
    };

    // The marriage stands until BOB consents
    assert!(relationships.marriage_status(ALICE).await.unwrap().is_some());

    relationships
        .accept_divorce(BOB, &request.id())
        .await
        .unwrap();
    assert!(relationships.marriage_status(ALICE).await.unwrap().is_none());
    assert!(relationships.marriage_status(BOB).await.unwrap().is_none());
    assert!(h.ctx.divorce_store().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_divorce_keeps_the_marriage() {
    let h = mutual();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let outcome = relationships.divorce(ALICE, GUILD).await.unwrap();
    let request = match outcome {
        DivorceOutcome::Pending(request) => request,
        other => panic!("expected a pending request, got {other:?}"),
    };

    relationships
        .reject_divorce(BOB, &request.id())
        .await
        .unwrap();

    assert!(relationships.marriage_status(ALICE).await.unwrap().is_some());
    assert!(h.ctx.divorce_store().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn second_divorce_filing_conflicts_while_one_is_pending() {
    let h = mutual();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    relationships.divorce(ALICE, GUILD).await.unwrap();
    let err = relationships.divorce(BOB, GUILD).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::DivorceConflict)
    ));
}

#[tokio::test]
async fn only_the_spouse_may_answer_a_divorce_request() {
    let h = mutual();
    let relationships = RelationshipService::new(&h.ctx);

    let proposal = relationships.propose(ALICE, BOB, GUILD).await.unwrap();
    relationships
        .accept_proposal(BOB, &proposal.id())
        .await
        .unwrap();

    let request = match relationships.divorce(ALICE, GUILD).await.unwrap() {
        DivorceOutcome::Pending(request) => request,
        other => panic!("expected a pending request, got {other:?}"),
    };

    // Not even the applicant can consent on the spouse's behalf
    let err = relationships
        .accept_divorce(ALICE, &request.id())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotAddressee)
    ));
}
