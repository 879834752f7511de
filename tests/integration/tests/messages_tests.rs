//! Message paging and unread tracking
//!
//! Run with: cargo test -p integration-tests --test messages_tests

use chat_core::PageRequest;
use chat_service::MessageService;
use chrono::{Duration, Utc};
use integration_tests::{assert_error_code, fixtures::*, ids, TestChat};

#[tokio::test]
async fn test_four_message_windows() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let all = chat.backfill(channel, author, 4, Utc::now()).await.unwrap();
    let (a, b, c, d) = (all[0], all[1], all[2], all[3]);
    let service = MessageService::new(&chat.ctx);

    let cases = [
        (PageRequest::latest().before(d), vec![a, b, c]),
        (PageRequest::latest().after(a), vec![b, c, d]),
        (PageRequest::latest().before(d).after(a), vec![b, c]),
        (PageRequest::latest().limit(2), vec![c, d]),
        (PageRequest::latest(), vec![a, b, c, d]),
    ];
    for (request, expected) in cases {
        let page = service.get_messages(channel, request).await.unwrap();
        assert_eq!(ids(&page), expected, "{request:?}");
    }
}

#[tokio::test]
async fn test_default_page_is_newest_fifty() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let all = chat.backfill(channel, author, 55, Utc::now()).await.unwrap();

    let page = MessageService::new(&chat.ctx)
        .get_messages(channel, PageRequest::latest().limit(0))
        .await
        .unwrap();
    assert_eq!(ids(&page), all[5..]);
}

#[tokio::test]
async fn test_scroll_back_through_history() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let all = chat.backfill(channel, author, 120, Utc::now()).await.unwrap();
    let service = MessageService::new(&chat.ctx);

    // Walk backwards from the newest page until the start of the channel
    let mut seen = Vec::new();
    let mut page = PageRequest::latest();
    loop {
        let batch = ids(&service.get_messages(channel, page).await.unwrap());
        if batch.is_empty() {
            break;
        }
        assert!(batch.len() <= 50);
        page = PageRequest::latest().before(batch[0]);
        let mut rest = std::mem::take(&mut seen);
        seen = batch;
        seen.append(&mut rest);
    }
    assert_eq!(seen, all);

    // And forwards again from the first message
    let mut forward = vec![all[0]];
    loop {
        let last = *forward.last().unwrap();
        let batch = ids(&service.get_messages(channel, PageRequest::latest().after(last)).await.unwrap());
        if batch.is_empty() {
            break;
        }
        forward.extend(batch);
    }
    assert_eq!(forward, all);
}

#[tokio::test]
async fn test_same_instant_messages_keep_creation_order() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let service = MessageService::new(&chat.ctx);

    let mut created = Vec::new();
    for n in 0..5 {
        let posted = service
            .create_message(channel, author, message(format!("burst {n}")))
            .await
            .unwrap();
        created.push(posted.message.id);
    }

    let page = service.get_messages(channel, PageRequest::latest()).await.unwrap();
    assert_eq!(ids(&page), created);

    let middle = service
        .get_messages(channel, PageRequest::latest().after(created[1]).before(created[4]))
        .await
        .unwrap();
    assert_eq!(ids(&middle), created[2..4]);
}

#[tokio::test]
async fn test_unread_flow() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let reader = chat.user(&[]).await.unwrap();
    let service = MessageService::new(&chat.ctx);

    chat.backfill(channel, author, 10, Utc::now() - Duration::minutes(5))
        .await
        .unwrap();
    let user = service.mark_channel_read(reader, channel).await.unwrap();
    assert_eq!(service.get_unread_message_count(&user, channel).await.unwrap(), 0);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let fresh = service
        .create_message(channel, author, message("anyone around?"))
        .await
        .unwrap();
    let user = chat.load_user(reader).await.unwrap();
    assert_eq!(service.get_unread_message_count(&user, channel).await.unwrap(), 1);
    let oldest = service.get_oldest_unread_message(&user, channel).await.unwrap();
    assert_eq!(oldest.map(|m| m.id), Some(fresh.message.id));

    // Deleted messages are not unread
    service.delete_message(fresh.message.id, author).await.unwrap();
    assert_eq!(service.get_unread_message_count(&user, channel).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unread_cap_follows_config() {
    let mut config = chat_common::AppConfig::default();
    config.messaging.unread_count_cap = 25;
    let chat = TestChat::start_with_config(config).expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    chat.backfill(channel, author, 40, Utc::now()).await.unwrap();

    let user = chat.load_user(author).await.unwrap();
    let count = MessageService::new(&chat.ctx)
        .get_unread_message_count(&user, channel)
        .await
        .unwrap();
    assert_eq!(count, 25);
}

#[tokio::test]
async fn test_unknown_cursor_is_not_found() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let missing = chat.ctx.generate_id();

    assert_error_code(
        MessageService::new(&chat.ctx)
            .get_messages(channel, PageRequest::latest().before(missing))
            .await,
        "NOT_FOUND",
    );
}
