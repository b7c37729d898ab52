use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use jsonwebtoken::{EncodingKey, Header, encode};
use rand_core::OsRng;
use tracing::info;
use uuid::Uuid;

use yatube_types::api::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::error::ApiError;
use crate::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    let username_chars = req.username.chars().count();
    if !(3..=32).contains(&username_chars) {
        return Err(ApiError::validation("username", "Must be 3 to 32 characters."));
    }
    if req.password.chars().count() < 8 {
        return Err(ApiError::validation("password", "Must be at least 8 characters."));
    }

    let user_id = Uuid::new_v4();
    let username = req.username.clone();

    blocking(&state, move |state| {
        // Hash password with Argon2id
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
            .to_string();

        // The insert itself decides a username race
        if !state.db.create_user(&user_id.to_string(), &req.username, &password_hash)? {
            return Err(ApiError::Conflict);
        }
        Ok(())
    })
    .await?;

    info!("Registered user {}", username);
    let token = create_token(&state.jwt_secret, user_id, &username)?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let user = blocking(&state, move |state| {
        let user = state
            .db
            .get_user_by_username(&req.username)?
            .ok_or(ApiError::Unauthorized)?;

        // Verify password
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|e| anyhow::anyhow!("corrupt password hash for {}: {}", user.username, e))?;

        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(user)
    })
    .await?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {}", user.id, e))?;

    let token = create_token(&state.jwt_secret, user_id, &user.username)?;

    Ok(Json(LoginResponse {
        user_id,
        username: user.username,
        token,
    }))
}

/// Mint a bearer token valid for 30 days.
pub fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
