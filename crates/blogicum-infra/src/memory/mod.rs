//! In-memory content store - used when no database is configured, and in tests.
//!
//! All five repositories share one set of tables behind a single async
//! `RwLock`, so a read of a post together with its relations is a consistent
//! snapshot and cascades happen atomically.
//! Note: Data is lost on process restart.

mod repos;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, PostEntry, User};

pub use repos::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLocationRepository,
    InMemoryPostRepository, InMemoryUserRepository,
};

#[derive(Default)]
pub(crate) struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    locations: HashMap<Uuid, Location>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn entry(&self, post: &Post) -> Option<PostEntry> {
        let author = self.users.get(&post.author_id)?.clone();
        let category = post
            .category_id
            .and_then(|id| self.categories.get(&id))
            .cloned();
        let location = post
            .location_id
            .and_then(|id| self.locations.get(&id))
            .cloned();
        let comment_count = self
            .comments
            .values()
            .filter(|c| c.post_id == post.id)
            .count() as u64;

        Some(PostEntry {
            post: post.clone(),
            author,
            category,
            location,
            comment_count,
        })
    }

    fn remove_post(&mut self, post_id: Uuid) -> bool {
        if self.posts.remove(&post_id).is_none() {
            return false;
        }
        self.comments.retain(|_, c| c.post_id != post_id);
        true
    }
}

/// Shared handle over the in-memory tables.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.tables.clone())
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository::new(self.tables.clone())
    }

    pub fn locations(&self) -> InMemoryLocationRepository {
        InMemoryLocationRepository::new(self.tables.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.tables.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository::new(self.tables.clone())
    }
}

#[cfg(test)]
mod tests;
