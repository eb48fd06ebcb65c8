//! HTTP handlers and route configuration.
//!
//! Reads answer with JSON views. Successful mutations answer with a `302`
//! redirect, as do refused ones: a non-author is sent back to the post page.

mod auth;
mod comments;
mod health;
mod listings;
mod posts;
mod profile;
pub mod urls;
mod views;


use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use blogicum_core::domain::{Authored, PostEntry, User};
use blogicum_core::policy::{self, Requester};
use blogicum_core::DomainError;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/api/health", web::get().to(health::health_check))
    .route("/", web::get().to(listings::index))
    .service(
        web::resource("/posts/create/")
            .route(web::get().to(posts::create_form))
            .route(web::post().to(posts::create)),
    )
    .route("/posts/{post_id}/", web::get().to(posts::detail))
    .service(
        web::resource("/posts/{post_id}/edit/")
            .route(web::get().to(posts::edit_form))
            .route(web::post().to(posts::edit)),
    )
    .service(
        web::resource("/posts/{post_id}/delete/")
            .route(web::get().to(posts::delete_form))
            .route(web::post().to(posts::delete)),
    )
    .route(
        "/posts/{post_id}/comment/",
        web::post().to(comments::add_comment),
    )
    .service(
        web::resource("/posts/{post_id}/edit_comment/{comment_id}/")
            .route(web::get().to(comments::edit_comment_form))
            .route(web::post().to(comments::edit_comment)),
    )
    .service(
        web::resource("/posts/{post_id}/delete_comment/{comment_id}/")
            .route(web::get().to(comments::delete_comment_form))
            .route(web::post().to(comments::delete_comment)),
    )
    .route(
        "/category/{category_slug}/",
        web::get().to(listings::category_posts),
    )
    .service(
        web::resource("/profile/edit/")
            .route(web::get().to(profile::edit_profile_form))
            .route(web::post().to(profile::edit_profile)),
    )
    .route("/profile/{username}/", web::get().to(profile::profile))
    .service(
        web::scope("/auth")
            .route("/registration/", web::post().to(auth::register))
            .service(
                web::resource("/login/")
                    .route(web::get().to(auth::login_form))
                    .route(web::post().to(auth::login)),
            ),
    );
}

pub(crate) fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect to `fallback` unless the requester authored `entity`.
pub(crate) fn refuse_unless_author<E: Authored + ?Sized>(
    requester: Requester,
    entity: &E,
    entity_type: &'static str,
    fallback: String,
) -> Option<HttpResponse> {
    match policy::ensure_can_modify(requester, entity, entity_type) {
        Ok(()) => None,
        Err(e) => {
            tracing::info!(user = ?requester.user_id(), reason = %e, "Modification refused");
            Some(redirect(fallback))
        }
    }
}

/// The post with its relations, or 404 when it is missing or hidden from
/// the requester. Both cases answer the same.
pub(crate) async fn load_visible_post(
    state: &AppState,
    post_id: Uuid,
    requester: Requester,
    now: DateTime<Utc>,
) -> AppResult<PostEntry> {
    state
        .posts
        .find_entry(post_id)
        .await?
        .filter(|entry| policy::is_visible(requester, entry, now))
        .ok_or_else(|| DomainError::not_found("Post", post_id).into())
}

/// The account behind a token. Tokens outlive deleted accounts.
pub(crate) async fn current_user(state: &AppState, identity: &Identity) -> AppResult<User> {
    state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub(crate) async fn usernames<I>(state: &AppState, user_ids: I) -> AppResult<HashMap<Uuid, String>>
where
    I: IntoIterator<Item = Uuid>,
{
    let mut names = HashMap::new();
    for id in user_ids {
        if names.contains_key(&id) {
            continue;
        }
        if let Some(user) = state.users.find_by_id(id).await? {
            names.insert(id, user.username);
        }
    }
    Ok(names)
}
