use std::collections::BTreeMap;

use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use crate::database::entity::{comment, post, user};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
use blogicum_core::domain::{Comment, Post, PostFilter};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    BaseRepository, CommentRepository, PostRepository, UserRepository,
};

fn user_model(id: Uuid, username: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        username: username.to_owned(),
        first_name: String::new(),
        last_name: String::new(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(id: Uuid, author_id: Uuid, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        category_id: None,
        location_id: None,
        title: title.to_owned(),
        text: "Body".to_owned(),
        pub_date: (now - TimeDelta::days(1)).into(),
        is_published: true,
        image: None,
        created_at: now.into(),
    }
}

fn count_row(post_id: Uuid, count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("post_id", post_id.into()), ("count", count.into())])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_entry_hydrates_author_and_comment_count() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id, "Hello")]])
        .append_query_results([vec![user_model(author_id, "author")]])
        .append_query_results([vec![count_row(post_id, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let entry = repo.find_entry(post_id).await.unwrap().unwrap();

    assert_eq!(entry.author.username, "author");
    assert_eq!(entry.comment_count, 3);
    assert!(entry.category.is_none());
}

#[tokio::test]
async fn test_find_entry_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_entry(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_entries_defaults_missing_counts_to_zero() {
    let author_id = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(first, author_id, "First"),
            post_model(second, author_id, "Second"),
        ]])
        .append_query_results([vec![user_model(author_id, "author")]])
        .append_query_results([vec![count_row(second, 1)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let entries = repo
        .list_entries(PostFilter::by_author(author_id))
        .await
        .unwrap();

    let counts: Vec<u64> = entries.iter().map(|e| e.comment_count).collect();
    assert_eq!(counts, vec![0, 1]);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(id, "reader")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = repo.find_by_username("reader").await.unwrap().unwrap();
    assert_eq!(user.id, id);
}

#[tokio::test]
async fn test_find_comments_by_post() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            comment::Model {
                id: Uuid::new_v4(),
                post_id,
                author_id,
                text: "first".to_owned(),
                created_at: (now - TimeDelta::minutes(5)).into(),
            },
            comment::Model {
                id: Uuid::new_v4(),
                post_id,
                author_id,
                text: "second".to_owned(),
                created_at: now.into(),
            },
        ]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.find_by_post(post_id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "first");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_post_upsert_keeps_author_and_creation_time() {
    let author_id = Uuid::new_v4();
    let stored = post_model(Uuid::new_v4(), author_id, "Edited");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let saved = BaseRepository::<Post, Uuid>::save(&repo, Post::from(stored))
        .await
        .unwrap();
    assert_eq!(saved.author_id, author_id);

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(sql.contains(r#"ON CONFLICT ("id") DO UPDATE SET"#), "{sql}");
    assert!(sql.contains(r#""title" = "excluded"."title""#), "{sql}");
    assert!(!sql.contains(r#""author_id" = "excluded""#), "{sql}");
    assert!(!sql.contains(r#""created_at" = "excluded""#), "{sql}");
    assert!(!sql.contains(r#""id" = "excluded""#), "{sql}");
}

#[tokio::test]
async fn test_comment_upsert_only_rewrites_text() {
    let now = Utc::now();
    let stored = comment::Model {
        id: Uuid::new_v4(),
        post_id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        text: "edited".to_owned(),
        created_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored.clone()]])
        .into_connection();
    let repo = PostgresCommentRepository::new(db);

    BaseRepository::<Comment, Uuid>::save(&repo, Comment::from(stored))
        .await
        .unwrap();

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(sql.contains(r#"DO UPDATE SET "text" = "excluded"."text" RETURNING"#), "{sql}");
}
