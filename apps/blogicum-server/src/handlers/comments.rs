//! Comment add, edit and delete.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use blogicum_core::DomainError;
use blogicum_core::domain::Comment;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CommentForm;

use super::{current_user, load_visible_post, redirect, refuse_unless_author, urls, views};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{post_id}/comment/
///
/// Only posts the requester can see accept comments.
pub async fn add_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let author = current_user(&state, &identity).await?;
    let entry = load_visible_post(&state, post_id, identity.requester(), Utc::now()).await?;

    let draft = views::comment_draft(body.into_inner()).clean()?;
    let comment = state
        .comments
        .save(draft.into_comment(entry.post.id, author.id))
        .await?;
    tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment added");

    Ok(redirect(urls::post_detail(post_id)))
}

/// GET /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit_comment_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = load_comment(&state, post_id, comment_id).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &comment, "comment", urls::post_detail(post_id))
    {
        return Ok(refused);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::comment_form(&comment))))
}

/// POST /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let mut comment = load_comment(&state, post_id, comment_id).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &comment, "comment", urls::post_detail(post_id))
    {
        return Ok(refused);
    }

    let draft = views::comment_draft(body.into_inner()).clean()?;
    comment.text = draft.text;
    state.comments.save(comment).await?;
    tracing::info!(comment_id = %comment_id, "Comment updated");

    Ok(redirect(urls::post_detail(post_id)))
}

/// GET /posts/{post_id}/delete_comment/{comment_id}/ - the comment to confirm deleting.
pub async fn delete_comment_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = load_comment(&state, post_id, comment_id).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &comment, "comment", urls::post_detail(post_id))
    {
        return Ok(refused);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::comment_form(&comment))))
}

/// POST /posts/{post_id}/delete_comment/{comment_id}/
pub async fn delete_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = load_comment(&state, post_id, comment_id).await?;
    if let Some(refused) =
        refuse_unless_author(identity.requester(), &comment, "comment", urls::post_detail(post_id))
    {
        return Ok(refused);
    }

    state.comments.delete(comment.id).await?;
    tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");

    Ok(redirect(urls::post_detail(post_id)))
}

/// A comment addressed under a different post is treated as missing.
async fn load_comment(state: &AppState, post_id: Uuid, comment_id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .filter(|comment| comment.post_id == post_id)
        .ok_or_else(|| DomainError::not_found("Comment", comment_id).into())
}
