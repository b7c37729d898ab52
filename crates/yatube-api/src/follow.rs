use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use yatube_feed::resolver::find_user;
use yatube_feed::{FollowGraph, FollowOutcome, Viewer};
use yatube_types::api::FollowResponse;

use crate::error::ApiError;
use crate::{AppState, blocking};

pub async fn follow(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = viewer.require_user()?;

    let (outcome, author) = blocking(&state, move |state| {
        let author = find_user(&state.db, &username)?;
        let graph = FollowGraph::new(&state.db, state.settings.allow_self_follow);
        Ok((graph.follow(&user_id, &author.id)?, author.username))
    })
    .await?;

    Ok(Json(FollowResponse {
        author,
        following: outcome != FollowOutcome::SelfFollowIgnored,
    }))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(viewer): Extension<Viewer>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = viewer.require_user()?;

    let author = blocking(&state, move |state| {
        let author = find_user(&state.db, &username)?;
        FollowGraph::new(&state.db, state.settings.allow_self_follow)
            .unfollow(&user_id, &author.id)?;
        Ok(author.username)
    })
    .await?;

    Ok(Json(FollowResponse {
        author,
        following: false,
    }))
}
