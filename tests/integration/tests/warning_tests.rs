//! Warning ledger and escalation scenarios
//!
//! Run with: cargo test -p integration-tests --test warning_tests

use integration_tests::{harness, harness_with, PlatformCall, ALICE, GUILD, MOD};
use warden_common::DivorcePolicy;
use warden_core::{DomainError, EscalationAction, Thresholds};
use warden_service::{ServiceError, WarningService};

// ============================================================================
// Ledger invariants
// ============================================================================

#[tokio::test]
async fn count_tracks_length_through_add_delete_clear() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    let first = warnings
        .add_warning(ALICE, MOD, "spam", GUILD)
        .await
        .unwrap();
    // Warning ids are creation-time millis; space the second one out.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    warnings
        .add_warning(ALICE, MOD, "more spam", GUILD)
        .await
        .unwrap();

    let record = warnings.record(ALICE).await.unwrap();
    assert_eq!(record.count, 2);
    assert_eq!(record.count as usize, record.warnings.len());

    warnings
        .delete_warning(ALICE, first.warning.id)
        .await
        .unwrap();
    let record = warnings.record(ALICE).await.unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.count as usize, record.warnings.len());

    let cleared = warnings.clear_all(ALICE).await.unwrap();
    assert_eq!(cleared, 1);
    let record = warnings.record(ALICE).await.unwrap();
    assert_eq!(record.count, 0);
    assert!(record.warnings.is_empty());
}

#[tokio::test]
async fn delete_unknown_warning_leaves_ledger_unchanged() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    warnings
        .add_warning(ALICE, MOD, "spam", GUILD)
        .await
        .unwrap();
    let before = warnings.record(ALICE).await.unwrap();

    let err = warnings.delete_warning(ALICE, -42).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::WarningNotFound(-42))
    ));

    assert_eq!(warnings.record(ALICE).await.unwrap(), before);
}

#[tokio::test]
async fn clear_all_without_record_is_a_noop() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    assert_eq!(warnings.clear_all(ALICE).await.unwrap(), 0);
    // No DM is owed for a no-op clear
    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::Dm { .. }))
            .await,
        0
    );
}

#[tokio::test]
async fn empty_reason_is_rejected_without_state_change() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    let err = warnings
        .add_warning(ALICE, MOD, "   ", GUILD)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmptyReason)
    ));
    assert_eq!(warnings.record(ALICE).await.unwrap().count, 0);
}

// ============================================================================
// Notification is best-effort
// ============================================================================

#[tokio::test]
async fn warning_is_recorded_even_when_dm_fails() {
    let h = harness();
    h.platform.fail_dms();

    let issued = WarningService::new(&h.ctx)
        .add_warning(ALICE, MOD, "spam", GUILD)
        .await
        .unwrap();
    assert_eq!(issued.count, 1);
}

// ============================================================================
// Escalation
// ============================================================================

#[tokio::test]
async fn third_warning_triggers_mute_exactly_once() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    for reason in ["one", "two"] {
        let issued = warnings.add_warning(ALICE, MOD, reason, GUILD).await.unwrap();
        assert_eq!(issued.action, EscalationAction::None);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let issued = warnings.add_warning(ALICE, MOD, "three", GUILD).await.unwrap();
    assert_eq!(issued.action, EscalationAction::Mute);

    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::Timeout { .. }))
            .await,
        1
    );
    // The auto-mute is tracked so the sweeper can release it
    let stored = h.ctx.mute_store().get(ALICE).await.unwrap().unwrap();
    assert_eq!(stored.duration_minutes, 1440);
}

#[tokio::test]
async fn crossing_the_ban_threshold_triggers_only_a_ban() {
    let h = harness();
    let warnings = WarningService::new(&h.ctx);

    for i in 0..6 {
        warnings
            .add_warning(ALICE, MOD, &format!("warning {i}"), GUILD)
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let before = h.platform.calls().await.len();
    let issued = warnings
        .add_warning(ALICE, MOD, "the last straw", GUILD)
        .await
        .unwrap();
    assert_eq!(issued.count, 7);
    assert_eq!(issued.action, EscalationAction::Ban);

    // The seventh warning produced exactly one DM and one ban - no
    // mute-then-kick-then-ban cascade.
    let after = h.platform.calls().await;
    let delta = &after[before..];
    assert_eq!(
        delta
            .iter()
            .filter(|c| matches!(c, PlatformCall::Ban { .. }))
            .count(),
        1
    );
    assert!(!delta
        .iter()
        .any(|c| matches!(c, PlatformCall::Timeout { .. } | PlatformCall::Kick { .. })));
}

#[tokio::test]
async fn custom_thresholds_shift_the_bands() {
    let h = harness_with(
        Thresholds {
            mute: 1,
            kick: 2,
            ban: 3,
        },
        DivorcePolicy::Unilateral,
    );
    let warnings = WarningService::new(&h.ctx);

    let issued = warnings.add_warning(ALICE, MOD, "a", GUILD).await.unwrap();
    assert_eq!(issued.action, EscalationAction::Mute);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let issued = warnings.add_warning(ALICE, MOD, "b", GUILD).await.unwrap();
    assert_eq!(issued.action, EscalationAction::Kick);
}
