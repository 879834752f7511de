//! Server settings and user profiles
//!
//! Run with: cargo test -p integration-tests --test settings_tests

use chat_core::PermissionKey;
use chat_service::dto::UpdateSettingsRequest;
use chat_service::{SettingsService, UserService};
use integration_tests::{assert_error_code, fixtures::*, TestChat};

#[tokio::test]
async fn test_admin_edits_settings() {
    let chat = TestChat::start().expect("Failed to start chat");
    let owners = chat.system_role(perms(&[(PermissionKey::ManageServer, true)])).await.unwrap();
    let owner = chat.user(&[owners]).await.unwrap();
    let member = chat.user(&[]).await.unwrap();
    let service = SettingsService::new(&chat.ctx);

    assert_eq!(service.get_settings().await.unwrap().name, "Unnamed chat server");

    assert_error_code(service.update_settings(member, rename_server("Mine")).await, "NOT_ALLOWED");
    assert_error_code(service.update_settings(owner, rename_server("")).await, "INVALID_PARAMETER_TYPE");

    service.update_settings(owner, rename_server("Memeland")).await.unwrap();
    let icon = UpdateSettingsRequest {
        name: None,
        icon_url: Some("https://example.com/meme.png".to_string()),
    };
    let settings = service.update_settings(owner, icon).await.unwrap();

    assert_eq!(settings.name, "Memeland");
    assert_eq!(settings.icon_url.as_deref(), Some("https://example.com/meme.png"));
    assert_eq!(settings.role_prioritization_order, vec![owners]);
}

#[tokio::test]
async fn test_avatar_urls_are_memoized() {
    let chat = TestChat::start().expect("Failed to start chat");
    let first = chat.user(&[]).await.unwrap();
    let second = chat.user(&[]).await.unwrap();

    for id in [first, second] {
        let mut user = chat.load_user(id).await.unwrap();
        user.email = Some("Shared@Example.com".to_string());
        chat.ctx.user_repo().update(&user).await.unwrap();
    }

    let service = UserService::new(&chat.ctx);
    let a = service.get_avatar_url(first).await.unwrap();
    let b = service.get_avatar_url(second).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(chat.ctx.avatar_urls().cached(), 1);

    let profile = service.get_profile(first).await.unwrap();
    assert_eq!(profile.avatar_url, a);
}
