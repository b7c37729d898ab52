use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::WithRejection;

use yatube_feed::Viewer;
use yatube_feed::posts::{self as feed_posts, AuthorAction, PostDraft};
use yatube_types::api::{CommentRequest, PostRequest};

use crate::error::ApiError;
use crate::{AppState, blocking};

fn draft(req: &PostRequest) -> PostDraft<'_> {
    PostDraft {
        text: &req.text,
        group: req.group.as_deref(),
        image: req.image.as_deref(),
    }
}

/// Non-authors are sent back to the post instead of getting an error.
fn to_post_detail(id: i64) -> Response {
    Redirect::to(&format!("/posts/{id}")).into_response()
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = blocking(&state, move |state| Ok(feed_posts::post_detail(&state.db, id)?)).await?;
    Ok(Json(detail))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    WithRejection(Json(req), _): WithRejection<Json<PostRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = blocking(&state, move |state| {
        let id = feed_posts::create_post(&state.db, &viewer, draft(&req))?;
        Ok(feed_posts::post_detail(&state.db, id)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(detail.post)))
}

pub async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(viewer): Extension<Viewer>,
    WithRejection(Json(req), _): WithRejection<Json<PostRequest>, ApiError>,
) -> Result<Response, ApiError> {
    let edited = blocking(&state, move |state| {
        match feed_posts::edit_post(&state.db, &viewer, id, draft(&req))? {
            AuthorAction::Done => Ok(Some(feed_posts::post_detail(&state.db, id)?)),
            AuthorAction::NotAuthor => Ok(None),
        }
    })
    .await?;

    Ok(match edited {
        Some(detail) => Json(detail.post).into_response(),
        None => to_post_detail(id),
    })
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Response, ApiError> {
    let action = blocking(&state, move |state| {
        Ok(feed_posts::delete_post(&state.db, &viewer, id)?)
    })
    .await?;

    Ok(match action {
        AuthorAction::Done => StatusCode::NO_CONTENT.into_response(),
        AuthorAction::NotAuthor => to_post_detail(id),
    })
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(viewer): Extension<Viewer>,
    WithRejection(Json(req), _): WithRejection<Json<CommentRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = blocking(&state, move |state| {
        Ok(feed_posts::add_comment(&state.db, &viewer, id, &req.text)?)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
