//! Dispatcher scenarios: gating, routing, and registration ingestion
//!
//! Run with: cargo test -p integration-tests --test dispatcher_tests

use std::sync::Arc;

use integration_tests::{
    harness, Harness, PlatformCall, ADMIN_ROLE, ALICE, BOB, GUILD, MOD, REG_CHANNEL,
};
use warden_core::Snowflake;
use warden_gateway::{CommandOptions, Dispatcher, Event, MemberRef};

fn dispatcher(h: &Harness) -> Dispatcher {
    Dispatcher::new(h.ctx.clone(), ADMIN_ROLE, Some(REG_CHANNEL))
}

fn admin(id: Snowflake) -> MemberRef {
    MemberRef {
        id,
        display_name: format!("mod-{id}"),
        role_ids: vec![ADMIN_ROLE],
        is_admin: false,
    }
}

fn regular(id: Snowflake) -> MemberRef {
    MemberRef {
        id,
        display_name: format!("member-{id}"),
        role_ids: vec![],
        is_admin: false,
    }
}

fn command(name: &str, member: MemberRef, options: CommandOptions) -> Event {
    Event::Command {
        name: name.to_string(),
        guild_id: GUILD,
        member,
        options,
    }
}

fn button(custom_id: String, member: MemberRef) -> Event {
    Event::Button {
        custom_id,
        guild_id: GUILD,
        member,
    }
}

// ============================================================================
// Admin gating
// ============================================================================

#[tokio::test]
async fn admin_commands_are_refused_without_the_role() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "warn",
            regular(ALICE),
            CommandOptions {
                user: Some(BOB),
                reason: Some("spam".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.contains("permission"));
    // Nothing was recorded
    assert!(h.ctx.warning_store().get(BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn the_admin_role_unlocks_the_moderation_set() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "warn",
            admin(MOD),
            CommandOptions {
                user: Some(BOB),
                reason: Some("spam".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

    assert!(!reply.ephemeral);
    assert!(reply.content.contains("warned"));
    assert_eq!(h.ctx.warning_store().get(BOB).await.unwrap().unwrap().count, 1);
}

#[tokio::test]
async fn the_platform_admin_flag_also_unlocks_the_set() {
    let h = harness();
    let d = dispatcher(&h);

    let mut member = regular(MOD);
    member.is_admin = true;

    let reply = d
        .handle(command(
            "warn",
            member,
            CommandOptions {
                user: Some(BOB),
                reason: Some("spam".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    assert!(!reply.ephemeral);
}

#[tokio::test]
async fn relationship_commands_are_public() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "propose",
            regular(ALICE),
            CommandOptions {
                user: Some(BOB),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    assert!(!reply.ephemeral);
    assert_eq!(reply.buttons.len(), 2);
}

#[tokio::test]
async fn unknown_commands_are_ignored() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command("frobnicate", regular(ALICE), CommandOptions::default()))
        .await;
    assert!(reply.is_none());
}

// ============================================================================
// Button round-trips
// ============================================================================

#[tokio::test]
async fn proposal_buttons_round_trip_to_a_marriage() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "propose",
            regular(ALICE),
            CommandOptions {
                user: Some(BOB),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

    let accept = reply
        .buttons
        .iter()
        .find(|b| b.custom_id.starts_with("accept_"))
        .expect("an accept button");

    let reply = d
        .handle(button(accept.custom_id.clone(), regular(BOB)))
        .await
        .unwrap();
    assert!(reply.content.contains("married"));

    let link = h.ctx.marriage_store().get(ALICE).await.unwrap().unwrap();
    assert_eq!(link.spouse, BOB);
}

#[tokio::test]
async fn a_dead_button_reads_as_expired() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(button("accept_1_2_3".to_string(), regular(BOB)))
        .await
        .unwrap();
    assert!(reply.ephemeral);
    assert!(reply.content.contains("expired"));
}

#[tokio::test]
async fn unrelated_buttons_are_ignored() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(button("color_picker_42".to_string(), regular(BOB)))
        .await;
    assert!(reply.is_none());
}

// ============================================================================
// Registration ingestion
// ============================================================================

fn registration_message(member: MemberRef, content: &str) -> Event {
    Event::Message {
        guild_id: GUILD,
        channel_id: REG_CHANNEL,
        message_id: Snowflake::new(12345),
        member,
        content: content.to_string(),
    }
}

#[tokio::test]
async fn valid_registration_is_appended_and_acknowledged() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(registration_message(
            regular(ALICE),
            "profession: archer level: 61 power: 1200000 time: weekday evenings",
        ))
        .await
        .unwrap();

    assert!(!reply.ephemeral);
    assert!(reply.content.contains("Registration recorded"));

    let rows = h.sheet.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "archer");
}

#[tokio::test]
async fn malformed_registration_is_rejected_and_removed() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(registration_message(regular(ALICE), "hello i want to join"))
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.contains("template"));
    assert!(h.sheet.rows().await.is_empty());
    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::DeleteMessage { .. }))
            .await,
        1
    );
}

#[tokio::test]
async fn duplicate_registration_is_rejected_and_removed() {
    let h = harness();
    let d = dispatcher(&h);

    let body = "profession: archer level: 61 power: 1200000 time: evenings";
    d.handle(registration_message(regular(ALICE), body))
        .await
        .unwrap();
    let reply = d
        .handle(registration_message(regular(ALICE), body))
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.contains("already exists"));
    assert_eq!(h.sheet.rows().await.len(), 1);
    assert_eq!(
        h.platform
            .count(|c| matches!(c, PlatformCall::DeleteMessage { .. }))
            .await,
        1
    );
}

#[tokio::test]
async fn messages_outside_the_registration_channel_are_ignored() {
    let h = harness();
    let d = dispatcher(&h);

    let event = Event::Message {
        guild_id: GUILD,
        channel_id: Snowflake::new(999),
        message_id: Snowflake::new(12345),
        member: regular(ALICE),
        content: "profession: archer level: 61 power: 1 time: now".to_string(),
    };
    assert!(d.handle(event).await.is_none());
    assert!(h.sheet.rows().await.is_empty());
}

#[tokio::test]
async fn registration_stats_reports_the_row_count() {
    let h = harness();
    let d = dispatcher(&h);

    d.handle(registration_message(
        regular(ALICE),
        "profession: archer level: 61 power: 1200000 time: evenings",
    ))
    .await
    .unwrap();

    let reply = d
        .handle(command(
            "registration_stats",
            regular(BOB),
            CommandOptions::default(),
        ))
        .await
        .unwrap();
    assert!(reply.content.contains("1 registration"));
}

// ============================================================================
// Moderation commands end to end
// ============================================================================

#[tokio::test]
async fn mute_command_validates_the_duration_range() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "mute",
            admin(MOD),
            CommandOptions {
                user: Some(BOB),
                mute_duration: Some(50_000),
                reason: Some("spam".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.contains("40320"));
    assert!(h.ctx.mute_store().get(BOB).await.unwrap().is_none());
}

#[tokio::test]
async fn mute_and_unmute_round_trip() {
    let h = harness();
    let d = dispatcher(&h);

    let reply = d
        .handle(command(
            "mute",
            admin(MOD),
            CommandOptions {
                user: Some(BOB),
                mute_duration: Some(30),
                reason: Some("spam".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    assert!(!reply.ephemeral);
    assert!(h.ctx.mute_store().get(BOB).await.unwrap().is_some());

    // BOB shows as restricted platform-side for the unmute precondition
    h.platform
        .add_member(BOB, Some(chrono::Utc::now() + chrono::Duration::minutes(30)))
        .await;

    let reply = d
        .handle(command(
            "unmute",
            admin(MOD),
            CommandOptions {
                user: Some(BOB),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    assert!(reply.content.contains("lifted"));
    assert!(h.ctx.mute_store().get(BOB).await.unwrap().is_none());
}
