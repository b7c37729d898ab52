pub mod auth;
pub mod error;
pub mod feeds;
pub mod follow;
pub mod middleware;
pub mod posts;

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    routing::{get, post},
};

use yatube_db::Database;
use yatube_feed::{FeedSettings, PageCache};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub settings: FeedSettings,
    /// Rendered first page of the global feed.
    pub index_cache: PageCache<Bytes>,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: String, settings: FeedSettings) -> AppState {
        let index_cache = PageCache::new(settings.index_cache_ttl);
        Arc::new(Self {
            db,
            jwt_secret,
            settings,
            index_cache,
        })
    }
}

/// Every route of the service. Listing routes accept an anonymous viewer;
/// handlers that need a user reject anonymous ones themselves.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/", get(feeds::index))
        .route("/feed", get(feeds::feed))
        .route("/group/{slug}", get(feeds::group_feed))
        .route("/profile/{username}", get(feeds::profile_feed))
        .route("/profile/{username}/follow", post(follow::follow))
        .route("/profile/{username}/unfollow", post(follow::unfollow))
        .route("/follow", get(feeds::follow_feed))
        .route("/posts", post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post).put(posts::edit_post).delete(posts::delete_post),
        )
        .route("/posts/{id}/comments", post(posts::add_comment))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::resolve_viewer,
        ))
        .with_state(state)
}

/// Run blocking store work off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state)).await?
}
