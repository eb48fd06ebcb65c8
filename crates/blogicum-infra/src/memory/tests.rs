use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, PostFilter, User};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

use super::InMemoryContentStore;

async fn seed_user(store: &InMemoryContentStore, username: &str) -> User {
    store
        .users()
        .save(User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
        ))
        .await
        .unwrap()
}

async fn seed_post(store: &InMemoryContentStore, author: &User, days_ago: i64) -> Post {
    let mut post = Post::new(author.id, format!("{days_ago} days ago"), "Body".to_string());
    post.pub_date = Utc::now() - TimeDelta::days(days_ago);
    store.posts().save(post).await.unwrap()
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let reader = seed_user(&store, "reader").await;
    let post = seed_post(&store, &author, 1).await;
    let other = seed_post(&store, &author, 2).await;

    let comments = store.comments();
    let first = comments
        .save(Comment::new(post.id, reader.id, "first".to_string()))
        .await
        .unwrap();
    comments
        .save(Comment::new(post.id, author.id, "second".to_string()))
        .await
        .unwrap();
    comments
        .save(Comment::new(other.id, reader.id, "kept".to_string()))
        .await
        .unwrap();

    store.posts().delete(post.id).await.unwrap();

    assert!(comments.find_by_post(post.id).await.unwrap().is_empty());
    assert!(comments.find_by_id(first.id).await.unwrap().is_none());
    assert_eq!(comments.find_by_post(other.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let store = InMemoryContentStore::new();
    let result = store.posts().delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_user_removes_their_content() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let reader = seed_user(&store, "reader").await;
    let authored = seed_post(&store, &author, 1).await;
    let read = seed_post(&store, &reader, 1).await;
    store
        .comments()
        .save(Comment::new(read.id, author.id, "by author".to_string()))
        .await
        .unwrap();
    store
        .comments()
        .save(Comment::new(authored.id, reader.id, "on authored".to_string()))
        .await
        .unwrap();

    store.users().delete(author.id).await.unwrap();

    assert!(store.posts().find_by_id(authored.id).await.unwrap().is_none());
    assert!(store.comments().find_by_post(read.id).await.unwrap().is_empty());
    assert!(store.posts().find_by_id(read.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_post_requires_existing_relations() {
    let store = InMemoryContentStore::new();
    let posts = store.posts();

    let orphan = Post::new(Uuid::new_v4(), "t".to_string(), "b".to_string());
    assert!(matches!(
        posts.save(orphan).await,
        Err(RepoError::Constraint(_))
    ));

    let author = seed_user(&store, "author").await;
    let mut post = Post::new(author.id, "t".to_string(), "b".to_string());
    post.category_id = Some(Uuid::new_v4());
    assert!(matches!(
        posts.save(post).await,
        Err(RepoError::Constraint(_))
    ));
}

#[tokio::test]
async fn test_comment_requires_existing_post() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let result = store
        .comments()
        .save(Comment::new(Uuid::new_v4(), author.id, "text".to_string()))
        .await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_post_author_is_immutable() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let thief = seed_user(&store, "thief").await;
    let mut post = seed_post(&store, &author, 1).await;

    post.author_id = thief.id;
    assert!(matches!(
        store.posts().save(post).await,
        Err(RepoError::Constraint(_))
    ));
}

#[tokio::test]
async fn test_unique_username_and_slug() {
    let store = InMemoryContentStore::new();
    seed_user(&store, "author").await;
    let duplicate = User::new("author".to_string(), String::new(), "hash".to_string());
    assert!(matches!(
        store.users().save(duplicate).await,
        Err(RepoError::Constraint(_))
    ));

    let categories = store.categories();
    categories
        .save(Category::new("A".to_string(), String::new(), "slug".to_string()))
        .await
        .unwrap();
    let result = categories
        .save(Category::new("B".to_string(), String::new(), "slug".to_string()))
        .await;
    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_deleting_category_nulls_post_reference() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let category = store
        .categories()
        .save(Category::new(
            "Travel".to_string(),
            String::new(),
            "travel".to_string(),
        ))
        .await
        .unwrap();
    let location = store
        .locations()
        .save(Location::new("Samara".to_string()))
        .await
        .unwrap();
    let mut post = Post::new(author.id, "t".to_string(), "b".to_string());
    post.category_id = Some(category.id);
    post.location_id = Some(location.id);
    let post = store.posts().save(post).await.unwrap();

    store.categories().delete(category.id).await.unwrap();
    store.locations().delete(location.id).await.unwrap();

    let entry = store.posts().find_entry(post.id).await.unwrap().unwrap();
    assert_eq!(entry.post.category_id, None);
    assert_eq!(entry.post.location_id, None);
    assert!(entry.category.is_none());
}

#[tokio::test]
async fn test_find_entry_reads_relations_and_comment_count() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let category = store
        .categories()
        .save(Category::new(
            "Travel".to_string(),
            String::new(),
            "travel".to_string(),
        ))
        .await
        .unwrap();
    let mut post = Post::new(author.id, "t".to_string(), "b".to_string());
    post.category_id = Some(category.id);
    let post = store.posts().save(post).await.unwrap();
    for text in ["a", "b"] {
        store
            .comments()
            .save(Comment::new(post.id, author.id, text.to_string()))
            .await
            .unwrap();
    }

    let entry = store.posts().find_entry(post.id).await.unwrap().unwrap();
    assert_eq!(entry.author.username, "author");
    assert_eq!(entry.category.map(|c| c.slug), Some("travel".to_string()));
    assert_eq!(entry.comment_count, 2);
}

#[tokio::test]
async fn test_list_entries_filters_and_orders() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    let other = seed_user(&store, "other").await;
    for days_ago in [3, 1, 2] {
        seed_post(&store, &author, days_ago).await;
    }
    seed_post(&store, &other, 0).await;

    let all = store.posts().list_entries(PostFilter::all()).await.unwrap();
    assert_eq!(all.len(), 4);

    let by_author = store
        .posts()
        .list_entries(PostFilter::by_author(author.id))
        .await
        .unwrap();
    let titles: Vec<&str> = by_author.iter().map(|e| e.post.title.as_str()).collect();
    assert_eq!(titles, vec!["1 days ago", "2 days ago", "3 days ago"]);
}

#[tokio::test]
async fn test_find_by_username_and_slug() {
    let store = InMemoryContentStore::new();
    let author = seed_user(&store, "author").await;
    store
        .categories()
        .save(Category::new(
            "Travel".to_string(),
            String::new(),
            "travel".to_string(),
        ))
        .await
        .unwrap();

    let found = store.users().find_by_username("author").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(author.id));
    assert!(store.users().find_by_username("Author").await.unwrap().is_none());
    assert!(store.categories().find_by_slug("travel").await.unwrap().is_some());
    assert!(store.categories().find_by_slug("food").await.unwrap().is_none());
}
