use axum::{
    Extension,
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use yatube_feed::convert::group_from_row;
use yatube_feed::pagination::parse_page_number;
use yatube_feed::resolver::{find_group, find_user};
use yatube_feed::{FeedContext, FollowGraph, Viewer, paginate, resolve};
use yatube_types::api::{FeedPage, GroupFeedResponse, PageQuery, ProfileFeedResponse};

use crate::error::ApiError;
use crate::{AppState, AppStateInner, blocking};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// `all`, `group:<slug>`, `author:<username>` or `followed`.
    #[serde(default = "default_context")]
    pub context: String,
    pub page: Option<String>,
}

fn default_context() -> String {
    "all".to_string()
}

pub async fn index(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    serve_listing(&state, FeedContext::AllPosts, viewer, query.page.as_deref()).await
}

pub async fn group_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    serve_listing(&state, FeedContext::ByGroup(slug), viewer, query.page.as_deref()).await
}

pub async fn profile_feed(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    serve_listing(&state, FeedContext::ByAuthor(username), viewer, query.page.as_deref()).await
}

pub async fn follow_feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    serve_listing(&state, FeedContext::FollowedFeed, viewer, query.page.as_deref()).await
}

/// Any listing selected by its context tag, e.g. `/feed?context=group:cats&page=2`.
pub async fn feed(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, ApiError> {
    let context: FeedContext = query.context.parse()?;
    serve_listing(&state, context, viewer, query.page.as_deref()).await
}

/// Resolve, paginate and render one listing. The first page of the global
/// feed is answered from the page cache when it is warm.
async fn serve_listing(
    state: &AppState,
    context: FeedContext,
    viewer: Viewer,
    page: Option<&str>,
) -> Result<Response, ApiError> {
    let page_number = parse_page_number(page);

    let body = blocking(state, move |state| {
        if context.is_cacheable(page_number) {
            state
                .index_cache
                .get_or_compute(|| render_listing(state, &context, &viewer, page_number))
        } else {
            render_listing(state, &context, &viewer, page_number)
        }
    })
    .await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

fn render_listing(
    state: &AppStateInner,
    context: &FeedContext,
    viewer: &Viewer,
    page_number: usize,
) -> Result<Bytes, ApiError> {
    debug!("Rendering {} page {}", context, page_number);
    let db = &state.db;
    let posts = resolve(db, context, viewer)?;
    let page: FeedPage = paginate(posts, page_number, state.settings.page_size).into();

    match context {
        FeedContext::AllPosts | FeedContext::FollowedFeed => to_json(&page),
        FeedContext::ByGroup(slug) => {
            let group = group_from_row(find_group(db, slug)?);
            to_json(&GroupFeedResponse { group, page })
        }
        FeedContext::ByAuthor(username) => {
            let author = find_user(db, username)?;
            let following = match viewer.user_id() {
                Some(user_id) => FollowGraph::new(db, state.settings.allow_self_follow)
                    .is_following(&user_id, &author.id)?,
                None => false,
            };
            to_json(&ProfileFeedResponse {
                author: author.username,
                post_count: page.total_items as u64,
                following,
                page,
            })
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Bytes, ApiError> {
    let body = serde_json::to_vec(value).map_err(anyhow::Error::from)?;
    Ok(Bytes::from(body))
}
