//! Who may read which posts and comments.
//!
//! A post is publicly visible when it is published, its `pub_date` has been
//! reached and its category (if any) is published. The author sees their own
//! posts regardless. The location's flag plays no part.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::Requester;
use crate::domain::{Category, Comment, Post, PostEntry};

/// `pub_date` has been reached. Equality counts as released.
pub fn is_released(post: &Post, now: DateTime<Utc>) -> bool {
    post.pub_date <= now
}

/// A missing category never hides a post.
pub fn category_is_published(category: Option<&Category>) -> bool {
    category.is_none_or(|c| c.is_published)
}

pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published && is_released(post, now) && category_is_published(category)
}

pub fn is_visible(requester: Requester, entry: &PostEntry, now: DateTime<Utc>) -> bool {
    requester.is(entry.post.author_id)
        || is_publicly_visible(&entry.post, entry.category.as_ref(), now)
}

/// Entries the requester may see, newest `pub_date` first.
///
/// Ties are broken by `created_at` (newest first) and then by id, so the
/// output does not depend on the input order.
pub fn visible_posts<I>(requester: Requester, candidates: I, now: DateTime<Utc>) -> Vec<PostEntry>
where
    I: IntoIterator<Item = PostEntry>,
{
    let mut visible: Vec<PostEntry> = candidates
        .into_iter()
        .filter(|entry| is_visible(requester, entry, now))
        .collect();
    visible.sort_by(|a, b| newest_first(&a.post, &b.post));
    visible
}

/// Comments of `entry`, oldest first, or nothing when the post is hidden from
/// the requester. Comments of other posts are dropped.
pub fn visible_comments<I>(
    requester: Requester,
    entry: &PostEntry,
    comments: I,
    now: DateTime<Utc>,
) -> Vec<Comment>
where
    I: IntoIterator<Item = Comment>,
{
    if !is_visible(requester, entry, now) {
        return Vec::new();
    }
    let mut visible: Vec<Comment> = comments
        .into_iter()
        .filter(|c| c.post_id == entry.post.id)
        .collect();
    visible.sort_by(oldest_first);
    visible
}

/// Listing order for posts.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.pub_date
        .cmp(&a.pub_date)
        .then(b.created_at.cmp(&a.created_at))
        .then(a.id.cmp(&b.id))
}

/// Listing order for comments.
pub fn oldest_first(a: &Comment, b: &Comment) -> Ordering {
    a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))
}
