//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};

use crate::state::AppState;
use crate::token::Role;

/// Current authenticated caller extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub subject: String,
    pub role: Role,
}

impl CurrentUser {
    /// Check if caller has admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Check if caller has admin privileges.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        tracing::debug!(subject = %user.subject, "Admin role required");
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates JWT tokens.
///
/// Any known role passes; per-route role checks happen in the handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = state.tokens.verify(extract_token(&request)?)?;

    // Unknown roles hold no permissions
    let role = claims
        .role
        .parse::<Role>()
        .map_err(|_| AppError::Forbidden)?;

    request.extensions_mut().insert(CurrentUser {
        subject: claims.sub,
        role,
    });

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
