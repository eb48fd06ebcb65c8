//! Authentication handlers.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use blogicum_core::domain::User;
use blogicum_core::DomainError;
use blogicum_core::forms::Registration;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::urls;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginHint {
    pub next: String,
}

/// POST /auth/registration/
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let registration = Registration {
        username: req.username,
        email: Some(req.email),
        password: req.password,
    }
    .clean()?;

    if state
        .users
        .find_by_username(&registration.username)
        .await?
        .is_some()
    {
        return Err(DomainError::Duplicate {
            entity_type: "User",
            key: registration.username,
        }
        .into());
    }

    let password_hash = state
        .passwords
        .hash(&registration.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(
        registration.username,
        registration.email.unwrap_or_default(),
        password_hash,
    );
    let saved_user = state.users.save(user).await?;
    tracing::info!(user_id = %saved_user.id, username = %saved_user.username, "User registered");

    Ok(HttpResponse::Created().json(issue_token(&state, &saved_user)?))
}

/// GET /auth/login/ - where anonymous visitors land; echoes `next` back.
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    let next = query.into_inner().next.unwrap_or_else(urls::index);
    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LoginHint { next },
        "POST username and password to this endpoint",
    ))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::debug!(username = %req.username, "Rejected login");
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(issue_token(&state, &user)?))
}

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })
}
