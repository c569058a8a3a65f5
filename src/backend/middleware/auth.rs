/**
 * Authentication Middleware
 *
 * Protects every route except login, register and the public catalog. It
 * extracts and verifies the JWT from the Authorization header, checks the
 * user still exists, and hands the user id to handlers through request
 * extensions.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::middleware::access::Denial;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from `Authorization: Bearer <token>`
/// 2. Verifies signature and expiry
/// 3. Checks that the user in the token still exists
/// 4. Attaches `AuthenticatedUser` to the request extensions
///
/// Any failure answers 401.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Denial> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            Denial::Unauthenticated("missing bearer token")
        })?;

    let claims = app_state.tokens.verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        Denial::Unauthenticated("invalid or expired token")
    })?;

    match get_user_by_id(&app_state.pool, claims.sub).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::warn!("Token for deleted user {}", claims.sub);
            return Err(Denial::Unauthenticated("unknown user"));
        }
        Err(e) => {
            tracing::error!("Database error while checking token owner: {:?}", e);
            return Err(Denial::Internal);
        }
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = Denial;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                Denial::Unauthenticated("authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
