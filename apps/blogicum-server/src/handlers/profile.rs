//! User profile pages.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use blogicum_core::domain::PostFilter;
use blogicum_core::policy;
use blogicum_core::{DomainError, FieldError};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{PageQuery, ProfileForm, ProfileResponse};

use super::{current_user, redirect, urls, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /profile/{username}/
///
/// The owner sees every post they wrote, drafts and scheduled ones included.
pub async fn profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::not_found("User", &username))?;

    let requester = identity.requester();
    let is_owner = requester.is(user.id);
    let candidates = state
        .posts
        .list_entries(PostFilter::by_author(user.id))
        .await?;
    let visible = policy::visible_posts(requester, candidates, Utc::now());
    let page = state.paginator.get_page(visible, query.page.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse {
        profile: views::user_response(&user, is_owner),
        is_owner,
        page: views::post_page(page),
    })))
}

/// GET /profile/edit/
pub async fn edit_profile_form(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::profile_form(&user))))
}

/// POST /profile/edit/
pub async fn edit_profile(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let mut user = current_user(&state, &identity).await?;
    let changes = views::profile_changes(body.into_inner()).clean()?;

    let taken = state
        .users
        .find_by_username(&changes.username)
        .await?
        .is_some_and(|other| other.id != user.id);
    if taken {
        return Err(DomainError::Validation(vec![FieldError::new(
            "username",
            "A user with that username already exists",
        )])
        .into());
    }

    changes.apply_to(&mut user);
    let user = state.users.save(user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Profile updated");

    Ok(redirect(urls::profile(&user.username)))
}
