//! Pinning workflow
//!
//! Run with: cargo test -p integration-tests --test pins_tests

use chat_core::PermissionKey;
use chat_service::{MessageService, PinService};
use chrono::Utc;
use integration_tests::{assert_error_code, fixtures::*, ids, TestChat};

#[tokio::test]
async fn test_pin_lifecycle() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let mods = chat
        .system_role(perms(&[(PermissionKey::ManagePins, true), (PermissionKey::DeleteMessages, true)]))
        .await
        .unwrap();
    let moderator = chat.user(&[mods]).await.unwrap();
    let member = chat.user(&[]).await.unwrap();
    let m = chat.backfill(channel, member, 4, Utc::now()).await.unwrap();
    let pins = PinService::new(&chat.ctx);

    for id in [m[3], m[1], m[0], m[2]] {
        pins.pin_message(channel, id, moderator).await.unwrap();
    }
    assert_error_code(pins.pin_message(channel, m[1], moderator).await, "ALREADY_PERFORMED");
    assert_error_code(pins.pin_message(channel, m[0], member).await, "NOT_ALLOWED");

    pins.unpin_message(channel, m[0], moderator).await.unwrap();
    MessageService::new(&chat.ctx)
        .delete_message(m[1], moderator)
        .await
        .unwrap();

    let pinned = pins.get_pins(channel).await.unwrap();
    assert_eq!(pinned.channel_id, channel);
    assert_eq!(ids(&pinned.messages), vec![m[3], m[2]]);

    assert_error_code(pins.unpin_message(channel, m[0], moderator).await, "NOT_FOUND");
}

#[tokio::test]
async fn test_pins_are_per_channel() {
    let chat = TestChat::start().expect("Failed to start chat");
    let general = chat.channel().await.unwrap();
    let random = chat.channel().await.unwrap();
    let mods = chat.system_role(perms(&[(PermissionKey::ManagePins, true)])).await.unwrap();
    let moderator = chat.user(&[mods]).await.unwrap();
    let elsewhere = chat.backfill(random, moderator, 1, Utc::now()).await.unwrap();
    let pins = PinService::new(&chat.ctx);

    assert_error_code(
        pins.pin_message(general, elsewhere[0], moderator).await,
        "NOT_FROM_SAME_CHANNEL",
    );
    assert_error_code(
        pins.pin_message(general, chat.ctx.generate_id(), moderator).await,
        "NOT_FOUND",
    );
    assert!(pins.get_pins(general).await.unwrap().messages.is_empty());
}
