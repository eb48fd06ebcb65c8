//! Public post feeds: the index page and category pages.
//!
//! Feeds are evaluated as an anonymous reader sees them, so an author's own
//! drafts show up on their profile page only.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use blogicum_core::DomainError;
use blogicum_core::domain::PostFilter;
use blogicum_core::policy::{self, Requester};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{CategoryPostsResponse, PageQuery};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let candidates = state.posts.list_entries(PostFilter::all()).await?;
    let visible = policy::visible_posts(Requester::Anonymous, candidates, Utc::now());
    let page = state.paginator.get_page(visible, query.page.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_page(page))))
}

/// GET /category/{category_slug}/
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| DomainError::not_found("Category", &slug))?;

    let candidates = state
        .posts
        .list_entries(PostFilter::by_category(category.id))
        .await?;
    let visible = policy::visible_posts(Requester::Anonymous, candidates, Utc::now());
    let page = state.paginator.get_page(visible, query.page.as_deref());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryPostsResponse {
        category: views::category_response(&category),
        page: views::post_page(page),
    })))
}
