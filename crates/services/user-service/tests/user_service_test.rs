//! User service unit tests.
//!
//! Use cases run against a mocked repository port.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use domain::{DomainError, Email, MockUserRepository, User, UserId, UserName};
use user_service_lib::{CreateUserCommand, UpdateUserCommand, UserManager, UserService};

fn create_test_user(id: UserId, email: &str) -> User {
    let now = Utc::now();
    User::reconstitute(
        id,
        Email::new(email).unwrap(),
        UserName::new("Test", "User").unwrap(),
        true,
        now,
        now,
    )
    .unwrap()
}

fn service(repo: MockUserRepository) -> UserManager {
    UserManager::new(Arc::new(repo))
}

fn create_command(email: &str) -> CreateUserCommand {
    CreateUserCommand {
        email: email.to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
    }
}

fn update_command(id: UserId) -> UpdateUserCommand {
    UpdateUserCommand {
        user_id: id.to_string(),
        email: None,
        first_name: None,
        last_name: None,
    }
}

#[tokio::test]
async fn test_create_user_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .withf(|email| email.as_str() == "john@example.com")
        .times(1)
        .returning(|_| Ok(false));
    repo.expect_save().times(1).returning(Ok);

    let result = service(repo)
        .create_user(create_command("  john@example.com "))
        .await
        .unwrap();

    assert_eq!(result.email, "john@example.com");
    assert_eq!(result.full_name, "John Doe");
    assert!(result.active);
    assert_eq!(result.created_at, result.updated_at);
}

#[tokio::test]
async fn test_create_user_duplicate_email_never_saves() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email().returning(|_| Ok(true));
    repo.expect_save().never();

    let result = service(repo).create_user(create_command("taken@example.com")).await;

    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_create_user_invalid_email_touches_nothing() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email().never();
    repo.expect_save().never();

    let result = service(repo).create_user(create_command("not-an-email")).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_create_user_blank_name_rejected() {
    let mut repo = MockUserRepository::new();
    repo.expect_save().never();

    let command = CreateUserCommand {
        first_name: "   ".to_string(),
        ..create_command("john@example.com")
    };
    let result = service(repo).create_user(command).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_get_user_success() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(user_id))
        .times(1)
        .returning(move |id| Ok(Some(create_test_user(id, "test@example.com"))));

    let result = service(repo).get_user(&user_id.to_string()).await.unwrap();

    assert_eq!(result.id, user_id.as_uuid());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let result = service(repo)
        .get_user(&UserId::generate().to_string())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_get_user_malformed_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().never();

    let result = service(repo).get_user("not-a-uuid").await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_list_users_preserves_repository_order() {
    let first = UserId::generate();
    let second = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_list_all().returning(move || {
        Ok(vec![
            create_test_user(first, "one@example.com"),
            create_test_user(second, "two@example.com"),
        ])
    });

    let result = service(repo).list_users().await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, first.as_uuid());
    assert_eq!(result[1].id, second.as_uuid());
}

#[tokio::test]
async fn test_update_user_name_and_email() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "old@example.com"))));
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_save().times(1).returning(Ok);

    let command = UpdateUserCommand {
        email: Some("new@example.com".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Smith".to_string()),
        ..update_command(user_id)
    };
    let result = service(repo).update_user(command).await.unwrap();

    assert_eq!(result.email, "new@example.com");
    assert_eq!(result.full_name, "Jane Smith");
    assert!(result.updated_at >= result.created_at);
}

#[tokio::test]
async fn test_update_user_ignores_lone_first_name() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "test@example.com"))));
    repo.expect_save().times(1).returning(Ok);

    let command = UpdateUserCommand {
        first_name: Some("Jane".to_string()),
        ..update_command(user_id)
    };
    let result = service(repo).update_user(command).await.unwrap();

    assert_eq!(result.first_name, "Test");
    assert_eq!(result.last_name, "User");
}

#[tokio::test]
async fn test_update_user_email_taken_by_other() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "mine@example.com"))));
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_user(UserId::generate(), email.as_str()))));
    repo.expect_save().never();

    let command = UpdateUserCommand {
        email: Some("theirs@example.com".to_string()),
        ..update_command(user_id)
    };
    let result = service(repo).update_user(command).await;

    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_update_user_keeping_own_email() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "mine@example.com"))));
    repo.expect_find_by_email()
        .returning(move |email| Ok(Some(create_test_user(user_id, email.as_str()))));
    repo.expect_save().times(1).returning(Ok);

    let command = UpdateUserCommand {
        email: Some("mine@example.com".to_string()),
        ..update_command(user_id)
    };

    assert!(service(repo).update_user(command).await.is_ok());
}

#[tokio::test]
async fn test_update_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_save().never();

    let result = service(repo)
        .update_user(update_command(UserId::generate()))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_user_success() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "test@example.com"))));
    repo.expect_delete_by_id()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let result = service(repo).delete_user(&user_id.to_string()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_delete_by_id().never();

    let result = service(repo)
        .delete_user(&UserId::generate().to_string())
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_deactivate_then_activate() {
    let user_id = UserId::generate();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id, "test@example.com"))));
    repo.expect_save().times(2).returning(Ok);

    let manager = service(repo);
    let deactivated = manager.deactivate_user(&user_id.to_string()).await.unwrap();
    assert!(!deactivated.active);

    let activated = manager.activate_user(&user_id.to_string()).await.unwrap();
    assert!(activated.active);
}

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct ConnectionReset;

#[tokio::test]
async fn test_repository_failure_propagates_unchanged() {
    let mut repo = MockUserRepository::new();
    repo.expect_list_all()
        .returning(|| Err(DomainError::repository(ConnectionReset)));

    let err = service(repo).list_users().await.unwrap_err();

    match err {
        DomainError::Repository(source) => assert!(source.downcast_ref::<ConnectionReset>().is_some()),
        other => panic!("expected repository error, got {:?}", other),
    }
}
