//! Post pages: detail, create, edit and delete.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blogicum_core::domain::Post;
use blogicum_core::forms::PostDraft;
use blogicum_core::policy;
use blogicum_core::{DomainError, FieldError};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PostDetailResponse, PostForm};

use super::{
    current_user, load_visible_post, redirect, refuse_unless_author, urls, usernames, views,
};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /posts/{post_id}/
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let requester = identity.requester();
    let now = Utc::now();

    let entry = load_visible_post(&state, post_id, requester, now).await?;
    let comments = state.comments.find_by_post(post_id).await?;
    let comments = policy::visible_comments(requester, &entry, comments, now);
    let authors = usernames(&state, comments.iter().map(|c| c.author_id)).await?;

    let comments = comments
        .iter()
        .map(|comment| {
            let author = authors
                .get(&comment.author_id)
                .map(String::as_str)
                .unwrap_or_default();
            views::comment_response(comment, author, policy::can_modify(requester, comment))
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: views::post_response(&entry),
        comments,
        can_modify: policy::can_modify(requester, &entry),
        can_comment: requester.is_authenticated(),
    })))
}

/// GET /posts/create/ - an empty form.
pub async fn create_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostForm::default())))
}

/// POST /posts/create/
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let author = current_user(&state, &identity).await?;
    let draft = views::post_draft(body.into_inner(), Utc::now()).clean()?;
    check_references(&state, &draft).await?;

    let post = state.posts.save(draft.into_post(author.id)).await?;
    tracing::info!(post_id = %post.id, author = %author.username, "Post created");

    Ok(redirect(urls::profile(&author.username)))
}

/// GET /posts/{post_id}/edit/
pub async fn edit_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &post, "post", urls::post_detail(post.id))
    {
        return Ok(refused);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_form(&post))))
}

/// POST /posts/{post_id}/edit/
pub async fn edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = load_post(&state, path.into_inner()).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &post, "post", urls::post_detail(post.id))
    {
        return Ok(refused);
    }

    let draft = views::post_draft(body.into_inner(), Utc::now()).clean()?;
    check_references(&state, &draft).await?;
    draft.apply_to(&mut post);
    let post = state.posts.save(post).await?;
    tracing::info!(post_id = %post.id, "Post updated");

    Ok(redirect(urls::post_detail(post.id)))
}

/// GET /posts/{post_id}/delete/ - the post to confirm deleting.
pub async fn delete_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &post, "post", urls::post_detail(post.id))
    {
        return Ok(refused);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_form(&post))))
}

/// POST /posts/{post_id}/delete/ - removes the post and its comments.
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &post, "post", urls::post_detail(post.id))
    {
        return Ok(refused);
    }

    let author = current_user(&state, &identity).await?;
    state.posts.delete(post.id).await?;
    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(redirect(urls::profile(&author.username)))
}

/// Edit and delete look posts up regardless of visibility; authorship
/// decides what happens next.
async fn load_post(state: &AppState, post_id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id).into())
}

async fn check_references(state: &AppState, draft: &PostDraft) -> AppResult<()> {
    let mut errors = Vec::new();
    if let Some(category_id) = draft.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            errors.push(FieldError::new("category", "Select a valid choice"));
        }
    }
    if let Some(location_id) = draft.location_id {
        if state.locations.find_by_id(location_id).await?.is_none() {
            errors.push(FieldError::new("location", "Select a valid choice"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors).into())
    }
}
