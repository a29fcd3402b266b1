use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::token::TokenService,
};
use test_utils::{builder::TestBuilder, factory};

mod require;

const SECRET: &str = "guard-test-secret";

fn tokens() -> TokenService {
    TokenService::new(SECRET, 1)
}

fn bearer(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(value).expect("valid header value"),
    );
    headers
}

/// Issues a token for a stored user and wraps it in an `Authorization` header.
fn headers_for(tokens: &TokenService, user: entity::user::Model) -> HeaderMap {
    let token = tokens
        .issue(&User::from_entity(user))
        .expect("token issued");
    bearer(&format!("Bearer {}", token))
}

async fn require(
    db: &DatabaseConnection,
    tokens: &TokenService,
    headers: &HeaderMap,
    permissions: &[Permission],
) -> Result<User, AppError> {
    AuthGuard::new(db, tokens, headers).require(permissions).await
}
