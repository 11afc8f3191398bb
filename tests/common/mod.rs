//! Behavior shared by both store backends.
//!
//! Each scenario takes a fresh [`Services`] and drives it through the
//! query and mutation surface. The per-backend test files run every
//! scenario against their own store.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use todo_api::errors::AppError;
use todo_api::mapper::{
    CreateTodoInput, CreateUserInput, TodoResponse, UpdateTodoInput, UpdateUserInput,
    UserResponse,
};
use todo_api::services::{ServiceContainer, Services};

pub async fn create_user(services: &Services, email: &str, name: &str) -> UserResponse {
    services
        .users()
        .create_user(CreateUserInput {
            email: email.to_string(),
            name: name.to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_todo(services: &Services, title: &str, user_id: Option<&str>) -> TodoResponse {
    services
        .todos()
        .create_todo(CreateTodoInput {
            title: title.to_string(),
            user_id: user_id.map(str::to_string),
        })
        .await
        .unwrap()
}

async fn find_todo(services: &Services, id: &str) -> TodoResponse {
    services.todos().todo(id).await.unwrap()
}

pub async fn deleting_user_orphans_todos(services: Services) {
    let user = create_user(&services, "a@x.com", "A").await;
    let todo = create_todo(&services, "T", Some(&user.id)).await;
    assert_eq!(todo.user_id.as_deref(), Some(user.id.as_str()));

    assert!(services.users().delete_user(&user.id).await.unwrap());

    let todos = services.todos().todos().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "T");
    assert_eq!(todos[0].user_id, None);
    assert!(todos[0].user.is_none());
}

pub async fn todo_without_owner(services: Services) {
    let todo = create_todo(&services, "Orphan", None).await;

    assert_eq!(todo.title, "Orphan");
    assert!(!todo.completed);
    assert_eq!(todo.user_id, None);
    assert!(todo.user.is_none());
}

pub async fn duplicate_email_is_rejected(services: Services) {
    create_user(&services, "dup@x.com", "First").await;

    let err = services
        .users()
        .create_user(CreateUserInput {
            email: "dup@x.com".to_string(),
            name: "Second".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(ref email) if email == "dup@x.com"));

    let users = services.users().users().await.unwrap();
    let matching: Vec<_> = users.iter().filter(|u| u.email == "dup@x.com").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "First");
}

pub async fn email_update_respects_uniqueness(services: Services) {
    let a = create_user(&services, "a@x.com", "A").await;
    create_user(&services, "b@x.com", "B").await;

    let err = services
        .users()
        .update_user(
            &a.id,
            UpdateUserInput {
                email: Some("b@x.com".to_string()),
                name: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(_)));

    // Keeping one's own email is not a collision
    let same = services
        .users()
        .update_user(
            &a.id,
            UpdateUserInput {
                email: Some("a@x.com".to_string()),
                name: Some("Ada".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(same.email, "a@x.com");
    assert_eq!(same.name, "Ada");

    // The freed address becomes available again
    services
        .users()
        .update_user(
            &a.id,
            UpdateUserInput {
                email: Some("c@x.com".to_string()),
                name: None,
            },
        )
        .await
        .unwrap();
    create_user(&services, "a@x.com", "New A").await;
}

pub async fn unknown_owner_leaves_todo_unchanged(services: Services) {
    let user = create_user(&services, "a@x.com", "A").await;
    let todo = create_todo(&services, "T", Some(&user.id)).await;
    let missing = uuid::Uuid::new_v4();

    let err = services
        .todos()
        .update_todo(
            &todo.id,
            UpdateTodoInput {
                title: Some("changed".to_string()),
                completed: None,
                user_id: Some(missing.to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(id) if id == missing));

    let after = find_todo(&services, &todo.id).await;
    assert_eq!(after.user_id.as_deref(), Some(user.id.as_str()));
    assert_eq!(after.title, "T");
}

pub async fn create_with_unknown_owner_creates_nothing(services: Services) {
    let err = services
        .todos()
        .create_todo(CreateTodoInput {
            title: "T".to_string(),
            user_id: Some(uuid::Uuid::new_v4().to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(_)));

    assert!(services.todos().todos().await.unwrap().is_empty());
}

pub async fn malformed_owner_on_create_is_ignored(services: Services) {
    let todo = create_todo(&services, "T", Some("not-an-id")).await;
    assert_eq!(todo.user_id, None);
}

pub async fn partial_update_touches_only_supplied_fields(services: Services) {
    let a = create_user(&services, "a@x.com", "A").await;
    let b = create_user(&services, "b@x.com", "B").await;
    let todo = create_todo(&services, "T", Some(&a.id)).await;

    let done = services
        .todos()
        .update_todo(
            &todo.id,
            UpdateTodoInput {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(done.completed);
    assert_eq!(done.title, "T");
    assert_eq!(done.user_id.as_deref(), Some(a.id.as_str()));

    let moved = services
        .todos()
        .update_todo(
            &todo.id,
            UpdateTodoInput {
                user_id: Some(b.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(moved.completed);
    assert_eq!(moved.user_id.as_deref(), Some(b.id.as_str()));
    assert_eq!(moved.user.map(|u| u.email).as_deref(), Some("b@x.com"));

    let renamed = services
        .users()
        .update_user(
            &b.id,
            UpdateUserInput {
                name: Some("Bea".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.email, "b@x.com");
    assert_eq!(renamed.name, "Bea");
    assert_eq!(renamed.todos.len(), 1);
}

pub async fn missing_entities_are_not_found(services: Services) {
    let id = uuid::Uuid::new_v4().to_string();

    assert!(matches!(
        services.todos().todo(&id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        services.users().user(&id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        services
            .todos()
            .update_todo(&id, UpdateTodoInput::default())
            .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        services
            .users()
            .update_user(&id, UpdateUserInput::default())
            .await,
        Err(AppError::NotFound)
    ));
}

pub async fn delete_is_idempotent(services: Services) {
    let user = create_user(&services, "a@x.com", "A").await;
    let todo = create_todo(&services, "T", None).await;

    assert!(services.todos().delete_todo(&todo.id).await.unwrap());
    assert!(!services.todos().delete_todo(&todo.id).await.unwrap());

    assert!(services.users().delete_user(&user.id).await.unwrap());
    assert!(!services.users().delete_user(&user.id).await.unwrap());
}

pub async fn malformed_ids_are_rejected(services: Services) {
    let err = services
        .todos()
        .update_todo("nope", UpdateTodoInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidIdentifier(_)));

    let err = services
        .users()
        .update_user("nope", UpdateUserInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidIdentifier(_)));
}

/// A malformed owner id on update is ignored; the other fields still apply.
pub async fn malformed_owner_on_update_is_ignored(services: Services) {
    let user = create_user(&services, "a@x.com", "A").await;
    let todo = create_todo(&services, "T", Some(&user.id)).await;

    let updated = services
        .todos()
        .update_todo(
            &todo.id,
            UpdateTodoInput {
                title: Some("X".to_string()),
                user_id: Some("not-a-uuid".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.user_id.as_deref(), Some(user.id.as_str()));

    let fetched = services.todos().todo(&todo.id).await.unwrap();
    assert_eq!(fetched.title, "X");
    assert_eq!(fetched.user_id.as_deref(), Some(user.id.as_str()));
}

pub async fn users_carry_their_todos(services: Services) {
    let a = create_user(&services, "a@x.com", "A").await;
    let b = create_user(&services, "b@x.com", "B").await;
    create_todo(&services, "A1", Some(&a.id)).await;
    create_todo(&services, "A2", Some(&a.id)).await;
    create_todo(&services, "loose", None).await;

    let users = services.users().users().await.unwrap();
    assert_eq!(users.len(), 2);

    let user_a = users.iter().find(|u| u.id == a.id).unwrap();
    let titles: HashSet<_> = user_a.todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, HashSet::from(["A1", "A2"]));
    assert!(user_a
        .todos
        .iter()
        .all(|t| t.user_id.as_deref() == Some(a.id.as_str())));

    let user_b = users.iter().find(|u| u.id == b.id).unwrap();
    assert!(user_b.todos.is_empty());

    assert_eq!(services.users().user(&a.id).await.unwrap().todos.len(), 2);
}

pub async fn empty_fields_are_rejected(services: Services) {
    let err = services
        .users()
        .create_user(CreateUserInput {
            email: String::new(),
            name: "A".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = services
        .todos()
        .create_todo(CreateTodoInput {
            title: String::new(),
            user_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(services.users().users().await.unwrap().is_empty());
    assert!(services.todos().todos().await.unwrap().is_empty());
}

/// Concurrent creates with one email: exactly one wins.
pub async fn concurrent_duplicate_emails(services: Services) {
    let users = services.users();
    let attempts = (0..8).map(|i| {
        let users = Arc::clone(&users);
        tokio::spawn(async move {
            users
                .create_user(CreateUserInput {
                    email: "race@x.com".to_string(),
                    name: format!("racer {}", i),
                })
                .await
        })
    });

    let results = futures::future::join_all(attempts).await;
    let mut created = 0;
    for result in results {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::DuplicateEmail(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(services.users().users().await.unwrap().len(), 1);
}

/// A todo created while its owner is being deleted either fails or ends up
/// orphaned; it never points at a missing user.
pub async fn delete_user_races_create_todo(services: Services) {
    for _ in 0..10 {
        let user = create_user(&services, "owner@x.com", "Owner").await;

        let todos = services.todos();
        let owner = user.id.clone();
        let create = tokio::spawn(async move {
            todos
                .create_todo(CreateTodoInput {
                    title: "late".to_string(),
                    user_id: Some(owner),
                })
                .await
        });

        let users = services.users();
        let owner = user.id.clone();
        let delete = tokio::spawn(async move { users.delete_user(&owner).await });

        match create.await.unwrap() {
            Ok(_) | Err(AppError::UserNotFound(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
        assert!(delete.await.unwrap().unwrap());

        let live: HashSet<_> = services
            .users()
            .users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        for todo in services.todos().todos().await.unwrap() {
            if let Some(user_id) = &todo.user_id {
                assert!(live.contains(user_id), "todo points at deleted user");
            }
        }
    }
}
