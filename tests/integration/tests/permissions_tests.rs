//! Permission resolution across role management
//!
//! Run with: cargo test -p integration-tests --test permissions_tests

use chat_common::{AppError, ErrorResponse};
use chat_core::{Actor, PermissionKey, RoleId};
use chat_service::{PermissionService, RoleService};
use integration_tests::{assert_error_code, fixtures::*, TestChat};

use PermissionKey::{DeleteMessages, ManagePins, ManageRoles, ManageServer, ReadMessages, SendMessages};

#[tokio::test]
async fn test_fresh_server_baseline() {
    let chat = TestChat::start().expect("Failed to start chat");
    let user = chat.user(&[]).await.unwrap();
    let service = PermissionService::new(&chat.ctx);

    let roles = service.get_prioritized_roles(None).await.unwrap();
    let ids: Vec<_> = roles.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RoleId::User, RoleId::Everyone]);

    assert!(service.user_has_permissions(user, &[ReadMessages, SendMessages], None).await.unwrap());
    assert!(!service.user_has_permission(user, ManageServer, None).await.unwrap());

    let guest = service.get_everyone_permissions().await.unwrap();
    assert!(guest.allows(ReadMessages));
    assert!(!guest.allows(SendMessages));
}

#[tokio::test]
async fn test_bootstrapped_admin_delegates_role_creation() {
    let chat = TestChat::start().expect("Failed to start chat");

    // The command line bootstraps the first admin role
    let admin_role = chat.system_role(admin_perms()).await.unwrap();
    let admin = chat.user(&[admin_role]).await.unwrap();
    let roles = RoleService::new(&chat.ctx);

    let mods = roles
        .create_role(role_request(perms(&[(ManagePins, true), (ManageRoles, true)])), Actor::User(admin))
        .await
        .unwrap();
    let mods_id = mods.id.custom().unwrap();
    assert_eq!(chat.role_order().await.unwrap(), vec![admin_role, mods_id]);

    // A moderator's roles land below their own highest role
    let moderator = chat.user(&[mods_id]).await.unwrap();
    let helpers = roles
        .create_role(role_request(perms(&[(ManagePins, true)])), Actor::User(moderator))
        .await
        .unwrap();
    assert_eq!(
        chat.role_order().await.unwrap(),
        vec![admin_role, mods_id, helpers.id.custom().unwrap()]
    );

    let permissions = PermissionService::new(&chat.ctx);
    assert_eq!(
        permissions.get_highest_role_of_user(moderator).await.unwrap(),
        Some(mods_id)
    );
    assert!(permissions
        .user_has_permissions_of_role(moderator, helpers.id, None)
        .await
        .unwrap());
    assert!(!permissions
        .user_has_permissions_of_role(moderator, RoleId::Custom(admin_role), None)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_reordering_preview_changes_outcome() {
    let chat = TestChat::start().expect("Failed to start chat");
    let granting = chat.system_role(perms(&[(DeleteMessages, true)])).await.unwrap();
    let denying = chat.system_role(perms(&[(DeleteMessages, false)])).await.unwrap();
    let user = chat.user(&[granting, denying]).await.unwrap();

    // Each system role went to the front, so `denying` currently wins
    assert_eq!(chat.role_order().await.unwrap(), vec![denying, granting]);
    let service = PermissionService::new(&chat.ctx);
    assert!(!service.user_has_permission(user, DeleteMessages, None).await.unwrap());

    let preview = service
        .get_user_permissions(user, None, Some(&[granting, denying]))
        .await
        .unwrap();
    assert!(preview.allows(DeleteMessages));

    // The preview is not persisted
    assert!(!service.user_has_permission(user, DeleteMessages, None).await.unwrap());
}

#[tokio::test]
async fn test_permission_guard_reports_missing_key() {
    let chat = TestChat::start().expect("Failed to start chat");
    let user = chat.user(&[]).await.unwrap();

    let err = assert_error_code(
        PermissionService::new(&chat.ctx)
            .require_permissions(user, &[ReadMessages, ManageServer, ManagePins], None)
            .await,
        "NOT_ALLOWED",
    );
    assert_eq!(err.missing_permission(), Some(ManageServer));

    let app_err: AppError = err.into();
    let body = serde_json::to_value(ErrorResponse::from(app_err)).unwrap();
    assert_eq!(body["details"]["missingPermission"], "manageServer");
}
