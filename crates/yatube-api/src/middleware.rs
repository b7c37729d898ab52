use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, Validation, decode};

use yatube_feed::Viewer;
use yatube_types::api::Claims;

use crate::AppState;
use crate::error::ApiError;

/// Attach a [`Viewer`] to every request.
///
/// No bearer token means an anonymous viewer. A token that fails to verify
/// is rejected outright instead of being downgraded to anonymous.
pub async fn resolve_viewer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let viewer = match req.headers().typed_get::<Authorization<Bearer>>() {
        None => Viewer::Anonymous,
        Some(Authorization(bearer)) => {
            let claims = verify_token(&state.jwt_secret, bearer.token())?;
            Viewer::User {
                id: claims.sub,
                username: claims.username,
            }
        }
    };

    req.extensions_mut().insert(viewer);
    Ok(next.run(req).await)
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    Ok(token_data.claims)
}
