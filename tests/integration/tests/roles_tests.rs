//! Role ordering under concurrent role management
//!
//! Run with: cargo test -p integration-tests --test roles_tests

use chat_core::{Actor, PermissionKey, RoleId};
use chat_service::{PermissionService, RoleService, SettingsService};
use futures::future::join_all;
use integration_tests::{assert_error_code, fixtures::*, TestChat};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_role_creation_loses_nothing() {
    let chat = TestChat::start().expect("Failed to start chat");
    let admin_role = chat.system_role(admin_perms()).await.unwrap();
    let admin = chat.user(&[admin_role]).await.unwrap();

    let tasks = (0..16).map(|_| {
        let ctx = chat.ctx.clone();
        tokio::spawn(async move {
            RoleService::new(&ctx)
                .create_role(role_request(perms(&[])), Actor::User(admin))
                .await
        })
    });

    let created: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("role created"))
        .collect();

    let order = chat.role_order().await.unwrap();
    assert_eq!(order.len(), 17);
    // Every new role went directly after the admin's role, never above it
    assert_eq!(order[0], admin_role);
    for role in &created {
        assert!(order.contains(&role.id.custom().unwrap()));
    }

    let prioritized = PermissionService::new(&chat.ctx)
        .get_prioritized_roles(None)
        .await
        .unwrap();
    assert_eq!(prioritized.len(), 19);
    assert_eq!(prioritized[17].id, RoleId::User);
    assert_eq!(prioritized[18].id, RoleId::Everyone);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_settings_edits_do_not_clobber_role_order() {
    let chat = TestChat::start().expect("Failed to start chat");
    let admin_role = chat.system_role(admin_perms()).await.unwrap();
    let admin = chat.user(&[admin_role]).await.unwrap();

    let role_tasks = (0..8).map(|_| {
        let ctx = chat.ctx.clone();
        tokio::spawn(async move {
            RoleService::new(&ctx)
                .add_role(format!("r{}", unique_suffix()), perms(&[]), Actor::System)
                .await
                .map(|_| ())
        })
    });
    let settings_tasks = (0..8).map(|n| {
        let ctx = chat.ctx.clone();
        tokio::spawn(async move {
            SettingsService::new(&ctx)
                .update_settings(admin, rename_server(&format!("Server {n}")))
                .await
                .map(|_| ())
        })
    });

    for joined in join_all(role_tasks.chain(settings_tasks)).await {
        joined.expect("task panicked").expect("write succeeded");
    }

    assert_eq!(chat.role_order().await.unwrap().len(), 9);
    let settings = SettingsService::new(&chat.ctx).get_settings().await.unwrap();
    assert!(settings.name.starts_with("Server "));
}

#[tokio::test]
async fn test_role_creation_rules() {
    let chat = TestChat::start().expect("Failed to start chat");
    let member = chat.user(&[]).await.unwrap();
    let roles = RoleService::new(&chat.ctx);

    let err = assert_error_code(
        roles.create_role(role_request(perms(&[])), Actor::User(member)).await,
        "NOT_ALLOWED",
    );
    assert_eq!(err.missing_permission(), Some(PermissionKey::ManageRoles));

    let mut bad = role_request(perms(&[]));
    bad.name = "very bad role name #~#".to_string();
    assert_error_code(roles.create_role(bad, Actor::System).await, "INVALID_NAME");

    assert!(chat.role_order().await.unwrap().is_empty());
}
