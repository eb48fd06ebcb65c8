//! Conversions from domain values to response bodies and back from forms.

use chrono::{DateTime, Utc};

use blogicum_core::Page;
use blogicum_core::domain::{Category, Comment, Post, PostEntry, User};
use blogicum_core::forms::{CommentDraft, PostDraft, ProfileChanges};
use blogicum_shared::dto::{
    CategoryResponse, CommentForm, CommentResponse, PageResponse, PostForm, PostResponse,
    ProfileForm, UserResponse,
};

pub fn post_response(entry: &PostEntry) -> PostResponse {
    let post = &entry.post;
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: post.pub_date,
        is_published: post.is_published,
        image: post.image.clone(),
        author: entry.author.username.clone(),
        category: entry.category.as_ref().map(category_response),
        location: entry.location.as_ref().map(|l| l.name.clone()),
        comment_count: entry.comment_count,
        created_at: post.created_at,
    }
}

pub fn post_page(page: Page<PostEntry>) -> PageResponse<PostResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(|entry| post_response(&entry));
    PageResponse {
        items: page.items,
        number: page.number,
        num_pages: page.num_pages,
        total: page.total,
        has_next,
        has_previous,
    }
}

pub fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
    }
}

pub fn comment_response(comment: &Comment, author: &str, can_modify: bool) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: author.to_string(),
        text: comment.text.clone(),
        created_at: comment.created_at,
        can_modify,
    }
}

/// Email is private to the profile owner.
pub fn user_response(user: &User, is_owner: bool) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        full_name: user.full_name(),
        email: is_owner.then(|| user.email.clone()),
        created_at: user.created_at,
    }
}

/// Current values of a post, for prefilling the edit form.
pub fn post_form(post: &Post) -> PostForm {
    PostForm {
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: Some(post.pub_date),
        is_published: Some(post.is_published),
        category: post.category_id,
        location: post.location_id,
        image: post.image.clone(),
    }
}

pub fn post_draft(form: PostForm, now: DateTime<Utc>) -> PostDraft {
    PostDraft {
        title: form.title,
        text: form.text,
        pub_date: form.pub_date.unwrap_or(now),
        is_published: form.is_published.unwrap_or(true),
        category_id: form.category,
        location_id: form.location,
        image: form.image,
    }
}

pub fn comment_form(comment: &Comment) -> CommentForm {
    CommentForm {
        text: comment.text.clone(),
    }
}

pub fn comment_draft(form: CommentForm) -> CommentDraft {
    CommentDraft { text: form.text }
}

pub fn profile_form(user: &User) -> ProfileForm {
    ProfileForm {
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
    }
}

pub fn profile_changes(form: ProfileForm) -> ProfileChanges {
    ProfileChanges {
        username: form.username,
        first_name: form.first_name,
        last_name: form.last_name,
        email: Some(form.email),
    }
}
