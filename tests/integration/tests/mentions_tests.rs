//! Mention extraction end to end
//!
//! Run with: cargo test -p integration-tests --test mentions_tests

use chat_core::markup::{tokenize, TokenKind};
use chat_service::{MentionService, MessageService};
use integration_tests::{fixtures::*, TestChat};

#[tokio::test]
async fn test_message_mentions_resolve_against_users() {
    let chat = TestChat::start().expect("Failed to start chat");
    let channel = chat.channel().await.unwrap();
    let author = chat.user(&[]).await.unwrap();
    let alice = chat.user(&[]).await.unwrap();
    let bob = chat.user(&[]).await.unwrap();
    let stranger = chat.ctx.generate_id();

    let text = format!(
        "<@{alice}> can you review this?\n```\nping(<@{bob}>)\n```\ncc <@{stranger}> <@{bob}> <@{alice}>"
    );
    let created = MessageService::new(&chat.ctx)
        .create_message(channel, author, message(text.clone()))
        .await
        .unwrap();
    assert_eq!(created.mentions, vec![alice, bob]);

    let direct = MentionService::new(&chat.ctx)
        .get_mentions_from_message_content(&text)
        .await
        .unwrap();
    assert_eq!(direct, created.mentions);
}

#[tokio::test]
async fn test_unclosed_fence_does_not_hide_mentions() {
    let chat = TestChat::start().expect("Failed to start chat");
    let alice = chat.user(&[]).await.unwrap();

    let text = format!("```\nnever closed <@{alice}>");
    let mentions = MentionService::new(&chat.ctx)
        .get_mentions_from_message_content(&text)
        .await
        .unwrap();
    assert_eq!(mentions, vec![alice]);
}

#[test]
fn test_tokens_tile_the_text() {
    let text = "a `b` <@1> ```js\nc\n```\nd";
    let known = std::collections::HashSet::from([chat_core::Snowflake::new(1)]);

    let tokens: Vec<_> = tokenize(text, &known).collect();
    let joined: String = tokens.iter().map(|t| t.raw).collect();
    assert_eq!(joined, text);

    let kinds: Vec<_> = tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Text))
        .map(|t| t.kind.clone())
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::InlineCode { code: "b" },
            TokenKind::Mention { user_id: chat_core::Snowflake::new(1) },
            TokenKind::CodeBlock { lang: "js", code: "c\n" },
        ]
    );
}
